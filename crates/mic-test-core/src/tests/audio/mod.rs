mod capture;
mod clip;

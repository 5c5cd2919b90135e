mod audio;
mod status;

pub(crate) mod capture;
mod clip;

pub use {
    capture::{CpalInput, CpalRecorder, media_input_available},
    clip::{Clip, ClipFormat, Fragment},
};

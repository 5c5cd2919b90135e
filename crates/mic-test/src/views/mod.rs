//! Server-rendered HTML for the two pages.

mod landing;
mod layout;
pub(crate) mod mic_test;

pub(crate) use {landing::render as landing_page, layout::escape};

#![forbid(unsafe_code)]

pub mod cli;
pub mod file;
pub mod font;
pub mod log_level;
pub mod osd;
pub mod prelude;

#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod formats;
pub mod logging;
pub mod pinboard;
pub mod pocket;
pub mod sync;
pub mod watermark;

pub mod clip;
pub mod config;
pub mod constants;
pub mod error;
pub mod gain;
pub mod meter;
pub mod sampler;
pub mod timeline;

pub use error::{MeterError, Result};
pub use transport::framerate::FrameRate;

use thiserror::Error;

use crate::clip::clip_id::ClipId;

pub type Result<T> = std::result::Result<T, MeterError>;

/// Errors raised while building the inputs of the meter.
///
/// Sampling itself never fails: empty decodes, missing curves and a missing
/// timeline are all absorbed by the sampler.
#[derive(Error, Debug)]
pub enum MeterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode WAV data: {0}")]
    Wav(#[from] hound::Error),

    #[error("Only mono or stereo audio is supported, got {0} channels")]
    UnsupportedChannels(u16),

    #[error("Failed to parse meter config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid meter config: {0}")]
    InvalidConfig(String),

    #[error("Clip range must start before it ends (start {start}, end {end})")]
    InvalidClipRange { start: i64, end: i64 },

    #[error("Clip gain must be finite and non-negative, got {0}")]
    InvalidGain(f64),

    #[error("Frame rate parts must be non-zero (got {numerator}/{denominator})")]
    InvalidFrameRate { numerator: u32, denominator: u32 },

    #[error("No clip with id {0} on the timeline")]
    UnknownClip(ClipId),

    #[error("Position queue is full")]
    QueueFull,
}

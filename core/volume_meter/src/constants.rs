/// Tolerance used when comparing decoded or mixed sample values.
pub const AUDIO_SAMPLE_EPSILON: f32 = 1e-5;

/// Decimal digits kept in a sampled volume.
pub const VOLUME_DECIMALS: usize = 4;

/// Default meter range and icon threshold.
pub const DEFAULT_MIN_VOLUME: f64 = -0.0;
pub const DEFAULT_MAX_VOLUME: f64 = 2.0;
pub const DEFAULT_LOUD_THRESHOLD: f64 = 1.0;

pub const DEFAULT_EVENT_CAPACITY: usize = 64;

use std::fmt;

/// Rational frame rate (`numerator / denominator` frames per second).
///
/// Stored as a fraction since rates like 29.97 (`30000 / 1001`) are not
/// exactly representable as a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRate {
    numerator: u32,
    denominator: u32,
}

impl FrameRate {
    pub const FPS_24: Self = Self {
        numerator: 24,
        denominator: 1,
    };
    pub const FPS_25: Self = Self {
        numerator: 25,
        denominator: 1,
    };
    pub const FPS_30: Self = Self {
        numerator: 30,
        denominator: 1,
    };
    pub const NTSC: Self = Self {
        numerator: 30000,
        denominator: 1001,
    };

    /// Returns `None` when either side of the fraction is zero.
    pub const fn new(numerator: u32, denominator: u32) -> Option<Self> {
        if numerator == 0 || denominator == 0 {
            return None;
        }
        Some(Self {
            numerator,
            denominator,
        })
    }

    pub const fn numerator(&self) -> u32 {
        self.numerator
    }

    pub const fn denominator(&self) -> u32 {
        self.denominator
    }

    pub fn fps(&self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }

    pub fn seconds_per_frame(&self) -> f64 {
        f64::from(self.denominator) / f64::from(self.numerator)
    }

    /// Converts a (possibly fractional or negative) frame count to seconds.
    pub fn frames_to_seconds(&self, frames: f64) -> f64 {
        frames / self.fps()
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::FPS_24
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{} fps", self.numerator)
        } else {
            write!(f, "{}/{} fps", self.numerator, self.denominator)
        }
    }
}

#[cfg(test)]
mod framerate_tests {
    use super::*;

    #[test]
    fn test_zero_parts_are_rejected() {
        assert!(FrameRate::new(0, 1).is_none());
        assert!(FrameRate::new(24, 0).is_none());
        assert_eq!(FrameRate::new(24, 1), Some(FrameRate::FPS_24));
    }

    #[test]
    fn test_fractional_rate() {
        let rate = FrameRate::NTSC;
        assert!((rate.fps() - 29.970_029_97).abs() < 1e-6);
        // 30 frames at 29.97 is slightly more than one second
        assert!((rate.frames_to_seconds(30.0) - 1.001).abs() < 1e-9);
    }

    #[test]
    fn test_integer_rate_conversion() {
        let rate = FrameRate::FPS_24;
        assert_eq!(rate.frames_to_seconds(48.0), 2.0);
        assert_eq!(rate.frames_to_seconds(-12.0), -0.5);
        assert!((rate.seconds_per_frame() - 1.0 / 24.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(FrameRate::FPS_25.to_string(), "25 fps");
        assert_eq!(FrameRate::NTSC.to_string(), "30000/1001 fps");
    }
}

use std::f64::consts::FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeCurve {
    Linear,
    EqualPower,
}

impl FadeCurve {
    /// Rising shape, `t` in `[0, 1]` mapped to `[0, 1]`.
    pub fn fade_in(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EqualPower => (t * FRAC_PI_2).sin(),
        }
    }

    /// Falling shape, mirror image of [`FadeCurve::fade_in`].
    pub fn fade_out(&self, t: f64) -> f64 {
        self.fade_in(1.0 - t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fade {
    pub length_frames: u64,
    pub curve: FadeCurve,
}

impl Fade {
    pub const fn none() -> Self {
        Self {
            length_frames: 0,
            curve: FadeCurve::Linear,
        }
    }

    pub const fn linear(length_frames: u64) -> Self {
        Self {
            length_frames,
            curve: FadeCurve::Linear,
        }
    }

    pub const fn is_none(&self) -> bool {
        self.length_frames == 0
    }
}

#[cfg(test)]
mod fade_tests {
    use super::*;

    #[test]
    fn test_linear_shapes() {
        assert_eq!(FadeCurve::Linear.fade_in(0.25), 0.25);
        assert_eq!(FadeCurve::Linear.fade_out(0.25), 0.75);
    }

    #[test]
    fn test_equal_power_endpoints() {
        assert!(FadeCurve::EqualPower.fade_in(0.0).abs() < 1e-12);
        assert!((FadeCurve::EqualPower.fade_in(1.0) - 1.0).abs() < 1e-12);
        // sin(pi/4)
        assert!((FadeCurve::EqualPower.fade_in(0.5) - 0.707_106_78).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_position_is_clamped() {
        assert_eq!(FadeCurve::Linear.fade_in(-1.0), 0.0);
        assert_eq!(FadeCurve::Linear.fade_in(3.0), 1.0);
    }
}

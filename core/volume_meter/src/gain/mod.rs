pub mod fades;
pub mod keyframe;

use std::fmt;

/// Animated gain: frame number in, gain multiplier out.
pub trait GainCurve: Send + Sync + fmt::Debug {
    fn evaluate(&self, frame: f64) -> f64;
}

/// Flat curve, mostly useful to pin a clip's gain in tests and previews.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantGain(pub f64);

impl GainCurve for ConstantGain {
    fn evaluate(&self, _frame: f64) -> f64 {
        self.0
    }
}

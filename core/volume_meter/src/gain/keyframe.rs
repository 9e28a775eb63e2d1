use log::warn;
use transport::timeline::FrameRange;

use crate::gain::{
    GainCurve,
    fades::{Fade, FadeCurve},
};

/// How a keyframe blends into the one after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Hold the value until the next keyframe
    Constant,
    #[default]
    Linear,
    /// Sine/cosine shaped ramp
    EqualPower,
}

impl From<FadeCurve> for Interpolation {
    fn from(value: FadeCurve) -> Self {
        match value {
            FadeCurve::Linear => Self::Linear,
            FadeCurve::EqualPower => Self::EqualPower,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub frame: f64,
    pub value: f64,
    pub interpolation: Interpolation,
}

impl Keyframe {
    pub const fn new(frame: f64, value: f64, interpolation: Interpolation) -> Self {
        Self {
            frame,
            value,
            interpolation,
        }
    }
}

/// Keyframed gain curve.
///
/// Keyframes are kept sorted by frame. Outside the first/last keyframe the
/// curve holds the nearest value; an empty curve evaluates to `0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyframeCurve {
    keyframes: Vec<Keyframe>,
}

impl KeyframeCurve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keyframes(keyframes: impl IntoIterator<Item = Keyframe>) -> Self {
        let mut curve = Self::new();
        for keyframe in keyframes {
            curve.insert(keyframe);
        }
        curve
    }

    /// Curve that ramps a clip up from silence and back down to it.
    ///
    /// Fade lengths are clamped so the fade-out never starts before the
    /// fade-in has finished.
    pub fn with_fades(range: FrameRange, gain: f64, fade_in: Fade, fade_out: Fade) -> Self {
        let length = range.len();
        let fade_in_len = fade_in.length_frames.min(length);
        let fade_out_len = fade_out.length_frames.min(length - fade_in_len);

        let start = range.start as f64;
        let end = range.end as f64;
        let mut curve = Self::new();

        if fade_in_len == 0 {
            curve.insert(Keyframe::new(start, gain, Interpolation::Linear));
        } else {
            curve.insert(Keyframe::new(start, 0.0, fade_in.curve.into()));
            curve.insert(Keyframe::new(
                start + fade_in_len as f64,
                gain,
                Interpolation::Linear,
            ));
        }

        if fade_out_len > 0 {
            curve.insert(Keyframe::new(
                end - fade_out_len as f64,
                gain,
                fade_out.curve.into(),
            ));
            curve.insert(Keyframe::new(end, 0.0, Interpolation::Constant));
        }

        curve
    }

    /// Adds a keyframe, replacing any keyframe already on that frame.
    pub fn insert(&mut self, keyframe: Keyframe) {
        if !keyframe.frame.is_finite() || !keyframe.value.is_finite() {
            warn!("ignoring non-finite keyframe {keyframe:?}");
            return;
        }

        let idx = self
            .keyframes
            .partition_point(|k| k.frame < keyframe.frame);
        match self.keyframes.get_mut(idx) {
            Some(existing) if existing.frame == keyframe.frame => *existing = keyframe,
            _ => self.keyframes.insert(idx, keyframe),
        }
    }

    pub fn remove_at(&mut self, frame: f64) -> Option<Keyframe> {
        let idx = self.keyframes.iter().position(|k| k.frame == frame)?;
        Some(self.keyframes.remove(idx))
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }
}

fn interpolate(from: &Keyframe, to: &Keyframe, frame: f64) -> f64 {
    let t = (frame - from.frame) / (to.frame - from.frame);
    let (a, b) = (from.value, to.value);

    match from.interpolation {
        Interpolation::Constant => a,
        Interpolation::Linear => a + (b - a) * t,
        Interpolation::EqualPower if b >= a => a + (b - a) * FadeCurve::EqualPower.fade_in(t),
        Interpolation::EqualPower => b + (a - b) * FadeCurve::EqualPower.fade_out(t),
    }
}

impl GainCurve for KeyframeCurve {
    fn evaluate(&self, frame: f64) -> f64 {
        let (Some(first), Some(last)) = (self.keyframes.first(), self.keyframes.last()) else {
            return 0.0;
        };

        if frame <= first.frame {
            return first.value;
        }
        if frame >= last.frame {
            return last.value;
        }

        // first.frame < frame < last.frame, so both neighbours exist
        let next = self.keyframes.partition_point(|k| k.frame <= frame);
        interpolate(&self.keyframes[next - 1], &self.keyframes[next], frame)
    }
}

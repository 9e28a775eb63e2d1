use log::{debug, trace};
use transport::framerate::FrameRate;

use crate::{clip::AudioClip, constants::VOLUME_DECIMALS, timeline::Timeline};

/// Which gain a clip contributes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleMode {
    /// The displayed volume of the last completed frame, using static gains.
    #[default]
    PriorFrameOnly,
    /// Volume at an arbitrary frame; animated gain curves override the
    /// static gain of their clip.
    FrameAccurate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRequest {
    pub frame: i64,
    pub mode: SampleMode,
}

impl SampleRequest {
    pub const fn prior_frame(frame: i64) -> Self {
        Self {
            frame,
            mode: SampleMode::PriorFrameOnly,
        }
    }

    pub const fn frame_accurate(frame: i64) -> Self {
        Self {
            frame,
            mode: SampleMode::FrameAccurate,
        }
    }
}

/// Everything a single sample reads. `timeline` is `None` when there is no
/// active timeline to meter.
#[derive(Debug, Clone, Copy)]
pub struct SamplerContext<'a> {
    pub frame_rate: FrameRate,
    pub timeline: Option<&'a Timeline>,
}

impl<'a> SamplerContext<'a> {
    pub const fn new(frame_rate: FrameRate, timeline: &'a Timeline) -> Self {
        Self {
            frame_rate,
            timeline: Some(timeline),
        }
    }

    pub const fn without_timeline(frame_rate: FrameRate) -> Self {
        Self {
            frame_rate,
            timeline: None,
        }
    }
}

/// Computes the blended instantaneous volume of every audible clip at a
/// frame.
///
/// Each clip contributes the larger of `|max|` and `|min|` of its samples over
/// the frame that just ended, scaled by its gain. That is a cheap peak proxy
/// for loudness rather than RMS. The sampler keeps no state between calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeSampler;

impl VolumeSampler {
    pub const fn new() -> Self {
        Self
    }

    /// Always returns a finite, non-negative value rounded to 4 decimals.
    pub fn sample_volume(&self, request: SampleRequest, context: &SamplerContext<'_>) -> f64 {
        let Some(timeline) = context.timeline else {
            trace!("no active timeline, volume is 0");
            return 0.0;
        };

        let total = timeline
            .clips()
            .iter()
            .filter(|clip| clip.is_audible_at(request.frame))
            .map(|clip| Self::clip_contribution(clip, request, context.frame_rate, timeline))
            .fold(0.0, |total, contribution| total + contribution);

        round_volume(total)
    }

    fn clip_contribution(
        clip: &AudioClip,
        request: SampleRequest,
        frame_rate: FrameRate,
        timeline: &Timeline,
    ) -> f64 {
        let Some(peak) = Self::peak_amplitude(clip, request.frame, frame_rate) else {
            return 0.0;
        };

        let gain = match (request.mode, timeline.gain_curve(clip.id())) {
            (SampleMode::FrameAccurate, Some(curve)) => curve.evaluate(request.frame as f64),
            _ => clip.static_gain(),
        };

        let contribution = peak * gain;
        if contribution.is_finite() && contribution > 0.0 {
            contribution
        } else {
            if contribution != 0.0 {
                debug!(
                    "clip {} produced unusable contribution {contribution}, treating as silent",
                    clip.id()
                );
            }
            0.0
        }
    }

    /// Peak of the window ending at `frame`. A failed read is retried once
    /// with the window widened by a frame; `None` means the clip stays silent.
    fn peak_amplitude(clip: &AudioClip, frame: i64, frame_rate: FrameRate) -> Option<f64> {
        let position = (frame - clip.timeline_start() + clip.source_start_offset) as f64;
        let time_from = frame_rate.frames_to_seconds(position - 1.0);
        let time_to = frame_rate.frames_to_seconds(position);

        let asset = clip.asset();
        let mut samples = asset.samples(time_from, time_to);
        if samples.is_empty() {
            trace!(
                "clip {}: empty read for [{time_from:.4}, {time_to:.4}), retrying",
                clip.id()
            );
            samples = asset.samples(time_from - frame_rate.seconds_per_frame(), time_to);
        }
        if samples.is_empty() {
            debug!(
                "clip {}: nothing decoded around frame {frame}, treating as silent",
                clip.id()
            );
            return None;
        }

        let (min, max) = samples
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &s| {
                (min.min(s), max.max(s))
            });
        Some(f64::from(max.abs().max(min.abs())))
    }
}

/// Rounds to the meter's 4 decimal digits.
///
/// Rounds on the exact decimal value of `volume`, so `0.74105` (stored as
/// `0.741049999...`) becomes `0.741`, not `0.7411`.
pub fn round_volume(volume: f64) -> f64 {
    format!("{volume:.prec$}", prec = VOLUME_DECIMALS)
        .parse()
        .unwrap_or(volume)
}

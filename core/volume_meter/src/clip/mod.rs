pub mod asset;
pub mod clip_id;
pub mod wav;

use std::sync::Arc;

use transport::timeline::FrameRange;

use crate::{
    clip::{asset::AudioAsset, clip_id::ClipId},
    error::{MeterError, Result},
};

/// A sound clip placed on the timeline.
///
/// Clips are snapshots owned by whoever hosts the timeline; the sampler only
/// reads them.
#[derive(Debug, Clone)]
pub struct AudioClip {
    id: ClipId,
    /// Placement on the timeline, end exclusive
    range: FrameRange,
    /// Frames into the asset that line up with `range.start`
    pub source_start_offset: i64,
    /// Gain used when no animated curve overrides it
    static_gain: f64,
    pub muted: bool,
    asset: Arc<dyn AudioAsset>,
}

impl AudioClip {
    pub fn new(
        timeline_start: i64,
        timeline_end: i64,
        asset: Arc<dyn AudioAsset>,
    ) -> Result<Self> {
        let range = FrameRange::new(timeline_start, timeline_end).ok_or(
            MeterError::InvalidClipRange {
                start: timeline_start,
                end: timeline_end,
            },
        )?;

        Ok(Self {
            id: ClipId::new(),
            range,
            source_start_offset: 0,
            static_gain: 1.0,
            muted: false,
            asset,
        })
    }

    pub fn with_source_offset(mut self, offset: i64) -> Self {
        self.source_start_offset = offset;
        self
    }

    pub fn with_gain(mut self, gain: f64) -> Result<Self> {
        self.set_static_gain(gain)?;
        Ok(self)
    }

    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    pub fn id(&self) -> ClipId {
        self.id
    }

    pub fn range(&self) -> FrameRange {
        self.range
    }

    pub fn timeline_start(&self) -> i64 {
        self.range.start
    }

    pub fn timeline_end(&self) -> i64 {
        self.range.end
    }

    pub fn static_gain(&self) -> f64 {
        self.static_gain
    }

    pub fn asset(&self) -> &Arc<dyn AudioAsset> {
        &self.asset
    }

    pub fn set_static_gain(&mut self, gain: f64) -> Result<()> {
        if !gain.is_finite() || gain < 0.0 {
            return Err(MeterError::InvalidGain(gain));
        }
        self.static_gain = gain;
        Ok(())
    }

    /// Clips only sound strictly inside their range; a clip starting or
    /// ending exactly on `frame` is silent there.
    pub fn is_audible_at(&self, frame: i64) -> bool {
        !self.muted && self.range.strictly_contains(frame)
    }

    pub fn move_to(&mut self, new_start: i64) {
        self.range = self.range.shifted(new_start - self.range.start);
    }

    pub fn trim(&mut self, new_end: i64) -> Result<()> {
        self.range = FrameRange::new(self.range.start, new_end).ok_or(
            MeterError::InvalidClipRange {
                start: self.range.start,
                end: new_end,
            },
        )?;
        Ok(())
    }

    /// Slides the source under the clip without moving the clip itself.
    pub fn slip(&mut self, delta: i64) {
        self.source_start_offset = (self.source_start_offset + delta).max(0);
    }
}

use std::{collections::HashMap, sync::Arc};

use crate::{
    clip::{AudioClip, clip_id::ClipId},
    error::{MeterError, Result},
    gain::GainCurve,
};

/// Evaluation-time snapshot of the sound clips on a timeline, plus the
/// animated gain curve (if any) of each clip.
#[derive(Debug, Default, Clone)]
pub struct Timeline {
    clips: Vec<AudioClip>,
    gain_curves: HashMap<ClipId, Arc<dyn GainCurve>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_clip(&mut self, clip: AudioClip) -> ClipId {
        let id = clip.id();
        self.clips.push(clip);
        self.clips.sort_by_key(AudioClip::timeline_start);
        id
    }

    /// Removes the clip and forgets its gain curve.
    pub fn remove_clip(&mut self, clip_id: ClipId) -> Option<AudioClip> {
        let idx = self.clips.iter().position(|c| c.id() == clip_id)?;
        self.gain_curves.remove(&clip_id);
        Some(self.clips.remove(idx))
    }

    pub fn clips(&self) -> &[AudioClip] {
        &self.clips
    }

    pub fn clip(&self, clip_id: ClipId) -> Option<&AudioClip> {
        self.clips.iter().find(|c| c.id() == clip_id)
    }

    /// Mutable access to a clip. Moving it through here leaves the clip list
    /// order stale until [`Timeline::resort`] is called.
    pub fn clip_mut(&mut self, clip_id: ClipId) -> Option<&mut AudioClip> {
        self.clips.iter_mut().find(|c| c.id() == clip_id)
    }

    pub fn resort(&mut self) {
        self.clips.sort_by_key(AudioClip::timeline_start);
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn set_gain_curve(&mut self, clip_id: ClipId, curve: Arc<dyn GainCurve>) -> Result<()> {
        if self.clip(clip_id).is_none() {
            return Err(MeterError::UnknownClip(clip_id));
        }
        self.gain_curves.insert(clip_id, curve);
        Ok(())
    }

    pub fn clear_gain_curve(&mut self, clip_id: ClipId) -> Option<Arc<dyn GainCurve>> {
        self.gain_curves.remove(&clip_id)
    }

    pub fn gain_curve(&self, clip_id: ClipId) -> Option<&dyn GainCurve> {
        self.gain_curves.get(&clip_id).map(|curve| &**curve)
    }
}

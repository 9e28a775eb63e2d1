pub mod event;

use log::debug;

use crate::{
    config::MeterConfig,
    error::Result,
    meter::event::{PositionConsumer, PositionEvent, PositionSender, position_channel},
    sampler::{SampleRequest, SamplerContext, VolumeSampler},
};

/// Last sampled frame and the volume measured there. Held by the caller
/// so that re-sampling only happens when the playhead actually moves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeterState {
    last_sampled_frame: Option<i64>,
    volume: f64,
}

impl MeterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_sampled_frame(&self) -> Option<i64> {
        self.last_sampled_frame
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Samples `frame` unless it was the last frame sampled. Returns the new
    /// volume, or `None` when nothing changed.
    pub fn update(
        &mut self,
        frame: i64,
        sampler: &VolumeSampler,
        context: &SamplerContext<'_>,
    ) -> Option<f64> {
        if self.last_sampled_frame == Some(frame) {
            return None;
        }

        self.volume = sampler.sample_volume(SampleRequest::frame_accurate(frame), context);
        self.last_sampled_frame = Some(frame);
        Some(self.volume)
    }

    /// Forces the next [`MeterState::update`] to sample, even on the same frame.
    pub fn invalidate(&mut self) {
        self.last_sampled_frame = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterIcon {
    Normal,
    Loud,
}

/// What the meter widget shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterReading {
    /// Sampled volume, unclamped
    pub volume: f64,
    /// Volume clamped to the meter range
    pub value: f64,
    pub icon: MeterIcon,
}

impl MeterReading {
    pub fn from_volume(volume: f64, config: &MeterConfig) -> Self {
        let icon = if volume > config.loud_threshold {
            MeterIcon::Loud
        } else {
            MeterIcon::Normal
        };

        Self {
            volume,
            // unvalidated bounds must not panic the way `f64::clamp` would
            value: volume.max(config.min_volume).min(config.max_volume),
            icon,
        }
    }

    pub fn label(&self, precision: usize) -> String {
        format!("{:.*}", precision, self.value)
    }

    /// Position of the value inside the meter range, `0.0..=1.0`.
    pub fn fill(&self, config: &MeterConfig) -> f64 {
        (self.value - config.min_volume) / (config.max_volume - config.min_volume)
    }
}

/// Volume meter driven by playhead position changes.
///
/// Positions arrive either through the [`PositionSender`] handed out by
/// [`VolumeMeter::new`] (drained by [`VolumeMeter::poll`]) or directly through
/// [`VolumeMeter::on_position_changed`].
#[derive(Debug)]
pub struct VolumeMeter {
    config: MeterConfig,
    sampler: VolumeSampler,
    state: MeterState,
    events: PositionConsumer,
}

impl VolumeMeter {
    pub fn new(config: MeterConfig) -> Result<(Self, PositionSender)> {
        config.validate()?;
        let (sender, events) = position_channel(config.event_capacity);

        let meter = Self {
            config,
            sampler: VolumeSampler::new(),
            state: MeterState::new(),
            events,
        };
        Ok((meter, sender))
    }

    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    pub fn state(&self) -> &MeterState {
        &self.state
    }

    pub fn reading(&self) -> MeterReading {
        MeterReading::from_volume(self.state.volume(), &self.config)
    }

    pub fn on_position_changed(
        &mut self,
        frame: i64,
        context: &SamplerContext<'_>,
    ) -> Option<MeterReading> {
        let volume = self.state.update(frame, &self.sampler, context)?;
        debug!("frame {frame}: volume {volume}");
        Some(self.reading())
    }

    /// Drains queued events and samples only the newest position. Returns the
    /// reading if a sample was taken.
    pub fn poll(&mut self, context: &SamplerContext<'_>) -> Option<MeterReading> {
        let mut latest = None;
        let mut invalidated = false;

        while let Ok(event) = self.events.pop() {
            match event {
                PositionEvent::Changed { frame } => latest = Some(frame),
                PositionEvent::Invalidate => invalidated = true,
            }
        }

        if invalidated {
            let previous = self.state.last_sampled_frame();
            self.state.invalidate();
            latest = latest.or(previous);
        }

        self.on_position_changed(latest?, context)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use transport::framerate::FrameRate;

    use super::*;
    use crate::{
        clip::{
            AudioClip,
            asset::test_assets::{ConstPeakAsset, FlakyAsset},
        },
        error::MeterError,
        gain::ConstantGain,
        timeline::Timeline,
    };

    const EPS: f64 = 1e-9;

    fn timeline(max: f32, gain: f64) -> Timeline {
        let mut timeline = Timeline::new();
        let clip = AudioClip::new(10, 20, Arc::new(ConstPeakAsset { max, min: 0.0 }))
            .unwrap()
            .with_gain(gain)
            .unwrap();
        timeline.add_clip(clip);
        timeline
    }

    fn meter() -> (VolumeMeter, PositionSender) {
        VolumeMeter::new(MeterConfig::default()).unwrap()
    }

    #[test]
    fn test_state_samples_only_when_frame_changes() {
        let asset = Arc::new(FlakyAsset::new(0, 0.5, 0.0));
        let mut timeline = Timeline::new();
        timeline.add_clip(AudioClip::new(10, 20, asset.clone()).unwrap());
        let context = SamplerContext::new(FrameRate::FPS_24, &timeline);
        let sampler = VolumeSampler::new();
        let mut state = MeterState::new();

        assert_eq!(state.update(15, &sampler, &context), Some(0.5));
        assert_eq!(state.update(15, &sampler, &context), None);
        assert_eq!(asset.windows().len(), 1);

        assert_eq!(state.update(16, &sampler, &context), Some(0.5));
        assert_eq!(state.last_sampled_frame(), Some(16));
        assert_eq!(asset.windows().len(), 2);
    }

    #[test]
    fn test_state_samples_first_frame_even_if_zero() {
        let timeline = Timeline::new();
        let context = SamplerContext::new(FrameRate::FPS_24, &timeline);
        let mut state = MeterState::new();

        assert_eq!(state.update(0, &VolumeSampler::new(), &context), Some(0.0));
        assert_eq!(state.last_sampled_frame(), Some(0));
    }

    #[test]
    fn test_state_uses_gain_curves() {
        let mut timeline = timeline(0.8, 0.5);
        let id = timeline.clips()[0].id();
        timeline.set_gain_curve(id, Arc::new(ConstantGain(1.2))).unwrap();
        let context = SamplerContext::new(FrameRate::FPS_24, &timeline);

        let volume = MeterState::new()
            .update(15, &VolumeSampler::new(), &context)
            .unwrap();
        assert!((volume - 0.96).abs() < 1e-6);
    }

    #[test]
    fn test_reading_clamps_and_picks_icon() {
        let config = MeterConfig::default();

        let quiet = MeterReading::from_volume(0.4, &config);
        assert_eq!(quiet.icon, MeterIcon::Normal);
        assert_eq!(quiet.value, 0.4);

        let at_threshold = MeterReading::from_volume(1.0, &config);
        assert_eq!(at_threshold.icon, MeterIcon::Normal);

        let loud = MeterReading::from_volume(2.7, &config);
        assert_eq!(loud.icon, MeterIcon::Loud);
        assert_eq!(loud.value, 2.0);
        assert_eq!(loud.volume, 2.7);
        assert!((loud.fill(&config) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_reading_tolerates_unvalidated_bounds() {
        let inverted = MeterConfig {
            min_volume: 2.0,
            max_volume: 1.0,
            ..MeterConfig::default()
        };
        assert_eq!(MeterReading::from_volume(0.5, &inverted).value, 1.0);

        let nan_bound = MeterConfig {
            min_volume: f64::NAN,
            ..MeterConfig::default()
        };
        assert_eq!(MeterReading::from_volume(0.5, &nan_bound).value, 0.5);
        assert_eq!(MeterReading::from_volume(3.0, &nan_bound).value, 2.0);
    }

    #[test]
    fn test_reading_label_uses_precision() {
        let reading = MeterReading::from_volume(0.4, &MeterConfig::default());
        assert_eq!(reading.label(4), "0.4000");
        assert_eq!(reading.label(1), "0.4");
    }

    #[test]
    fn test_direct_callback_reports_changes_only() {
        let timeline = timeline(0.8, 0.5);
        let context = SamplerContext::new(FrameRate::FPS_24, &timeline);
        let (mut meter, _sender) = meter();

        let reading = meter.on_position_changed(15, &context).unwrap();
        assert!((reading.value - 0.4).abs() < 1e-6);
        assert!(meter.on_position_changed(15, &context).is_none());

        let reading = meter.on_position_changed(20, &context).unwrap();
        assert_eq!(reading.value, 0.0);
    }

    #[test]
    fn test_poll_samples_only_latest_position() {
        let asset = Arc::new(FlakyAsset::new(0, 0.5, 0.0));
        let mut timeline = Timeline::new();
        timeline.add_clip(AudioClip::new(0, 100, asset.clone()).unwrap());
        let context = SamplerContext::new(FrameRate::FPS_24, &timeline);
        let (mut meter, mut sender) = meter();

        for frame in 10..15 {
            sender.position_changed(frame).unwrap();
        }
        assert!(meter.poll(&context).is_some());
        assert_eq!(meter.state().last_sampled_frame(), Some(14));
        assert_eq!(asset.windows().len(), 1);

        // nothing queued, nothing sampled
        assert!(meter.poll(&context).is_none());
        assert_eq!(asset.windows().len(), 1);
    }

    #[test]
    fn test_poll_resamples_same_frame_after_invalidate() {
        let (mut meter, mut sender) = meter();
        let before = timeline(0.8, 0.5);
        let context = SamplerContext::new(FrameRate::FPS_24, &before);

        sender.position_changed(15).unwrap();
        assert!((meter.poll(&context).unwrap().value - 0.4).abs() < 1e-6);

        // gain changed on the host side; frame stays the same
        let after = timeline(0.8, 1.5);
        let context = SamplerContext::new(FrameRate::FPS_24, &after);
        sender.position_changed(15).unwrap();
        assert!(meter.poll(&context).is_none());

        sender.invalidate().unwrap();
        let reading = meter.poll(&context).unwrap();
        assert!((reading.volume - 1.2).abs() < 1e-6);
        assert_eq!(reading.icon, MeterIcon::Loud);
    }

    #[test]
    fn test_no_timeline_reads_zero() {
        let (mut meter, _sender) = meter();
        let context = SamplerContext::without_timeline(FrameRate::FPS_24);
        let reading = meter.on_position_changed(15, &context).unwrap();
        assert_eq!(reading.value, 0.0);
        assert_eq!(reading.icon, MeterIcon::Normal);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = MeterConfig {
            event_capacity: 0,
            ..MeterConfig::default()
        };
        assert!(matches!(
            VolumeMeter::new(config),
            Err(MeterError::InvalidConfig(_))
        ));
    }
}

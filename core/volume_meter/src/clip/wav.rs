use std::{io::Read, path::Path};

use hound::{SampleFormat, WavReader};
use log::debug;

use crate::{
    clip::asset::AudioAsset,
    error::{MeterError, Result},
};

/// `WavAsset` is an in-memory PCM buffer decoded from a `.wav` file.
///
/// Supports:
/// - Mono and Stereo files
/// - 8/16/24/32-bit integer or 32-bit float samples (normalized to `f32`)
///
/// Does NOT support:
/// - More than 2 channels
///
/// # Example
/// ```no_run
/// use volume_meter::clip::wav::WavAsset;
///
/// let asset = WavAsset::from_file("assets/wav/dialog.wav").unwrap();
/// ```
#[derive(Debug)]
pub struct WavAsset {
    /// file name
    name: String,
    /// Interleaved samples, `channels` per frame
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

impl WavAsset {
    fn from_reader<R: Read>(reader: WavReader<R>, name: &str) -> Result<Self> {
        let spec = reader.spec();
        if spec.channels == 0 || spec.channels > 2 {
            return Err(MeterError::UnsupportedChannels(spec.channels));
        }

        let samples = Self::decode_pcm_samples(reader)?;
        debug!(
            "decoded {name}: {} samples, {} ch @ {} Hz",
            samples.len(),
            spec.channels,
            spec.sample_rate
        );

        Ok(Self {
            name: name.to_owned(),
            samples,
            channels: spec.channels,
            sample_rate: spec.sample_rate,
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map_or_else(|| "unnamed".to_owned(), |n| n.to_string_lossy().into_owned());
        let reader = WavReader::open(path)?;
        Self::from_reader(reader, &name)
    }

    pub fn from_stream<R: Read>(stream: R) -> Result<Self> {
        let reader = WavReader::new(stream)?;
        Self::from_reader(reader, "stream")
    }

    fn decode_pcm_samples<R: Read>(reader: WavReader<R>) -> Result<Vec<f32>> {
        let spec = reader.spec();
        let samples = match spec.sample_format {
            SampleFormat::Int => {
                let scale = (1_i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|s| s as f32 / scale))
                    .collect::<std::result::Result<Vec<f32>, _>>()?
            }
            SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<std::result::Result<Vec<f32>, _>>()?,
        };
        Ok(samples)
    }

    #[cfg(test)]
    pub fn from_raw_samples(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Self {
        Self {
            name: "raw-samples.wav".to_owned(),
            samples,
            channels,
            sample_rate,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Length in sample frames (one frame holds every channel).
    pub fn frame_count(&self) -> usize {
        self.samples.len() / usize::from(self.channels)
    }

    pub fn duration_secs(&self) -> f64 {
        self.frame_count() as f64 / f64::from(self.sample_rate)
    }

    fn frame_index(&self, secs: f64) -> usize {
        (secs * f64::from(self.sample_rate)).floor().max(0.0) as usize
    }
}

impl AudioAsset for WavAsset {
    fn samples(&self, from_secs: f64, to_secs: f64) -> Vec<f32> {
        if !from_secs.is_finite() || !to_secs.is_finite() {
            return Vec::new();
        }

        let start = self.frame_index(from_secs);
        let end = self.frame_index(to_secs).min(self.frame_count());
        if start >= end {
            return Vec::new();
        }

        let channels = usize::from(self.channels);
        self.samples[start * channels..end * channels].to_vec()
    }
}

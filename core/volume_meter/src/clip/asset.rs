use std::fmt;

/// Decoded audio behind a clip, addressable by time in seconds.
///
/// Decoding, resampling and caching are the implementor's business.
pub trait AudioAsset: Send + Sync + fmt::Debug {
    /// Amplitudes of every channel in `[from_secs, to_secs)`.
    /// An empty result means nothing could be read for that window.
    fn samples(&self, from_secs: f64, to_secs: f64) -> Vec<f32>;
}

#[cfg(test)]
pub mod test_assets {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use super::AudioAsset;

    /// Returns the same two samples for every window.
    #[derive(Debug)]
    pub struct ConstPeakAsset {
        pub max: f32,
        pub min: f32,
    }

    impl AudioAsset for ConstPeakAsset {
        fn samples(&self, _from_secs: f64, _to_secs: f64) -> Vec<f32> {
            vec![self.max, self.min]
        }
    }

    /// Never yields anything.
    #[derive(Debug)]
    pub struct SilentAsset;

    impl AudioAsset for SilentAsset {
        fn samples(&self, _from_secs: f64, _to_secs: f64) -> Vec<f32> {
            Vec::new()
        }
    }

    /// Fails the first `empty_reads` reads, then behaves like `ConstPeakAsset`.
    /// Every requested window is recorded.
    #[derive(Debug)]
    pub struct FlakyAsset {
        pub empty_reads: usize,
        pub max: f32,
        pub min: f32,
        reads: AtomicUsize,
        windows: Mutex<Vec<(f64, f64)>>,
    }

    impl FlakyAsset {
        pub fn new(empty_reads: usize, max: f32, min: f32) -> Self {
            Self {
                empty_reads,
                max,
                min,
                reads: AtomicUsize::new(0),
                windows: Mutex::new(Vec::new()),
            }
        }

        pub fn windows(&self) -> Vec<(f64, f64)> {
            self.windows.lock().unwrap().clone()
        }
    }

    impl AudioAsset for FlakyAsset {
        fn samples(&self, from_secs: f64, to_secs: f64) -> Vec<f32> {
            self.windows.lock().unwrap().push((from_secs, to_secs));
            if self.reads.fetch_add(1, Ordering::SeqCst) < self.empty_reads {
                Vec::new()
            } else {
                vec![self.max, self.min]
            }
        }
    }
}

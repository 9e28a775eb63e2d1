use std::{path::PathBuf, process::ExitCode, sync::Arc};

use clap::Parser;
use log::{error, info};
use volume_meter::{
    FrameRate, MeterError, Result,
    clip::{AudioClip, wav::WavAsset},
    config::MeterConfig,
    meter::VolumeMeter,
    sampler::SamplerContext,
    timeline::Timeline,
};

/// Prints the timeline volume meter for every frame of a WAV file
#[derive(Parser, Debug)]
#[command(name = "volume_meter")]
#[command(version)]
struct Args {
    /// WAV file placed as a single clip on the timeline
    path: PathBuf,

    /// Frame rate numerator
    #[arg(default_value_t = 24)]
    fps_num: u32,

    /// Frame rate denominator
    #[arg(default_value_t = 1)]
    fps_den: u32,

    /// Meter config (TOML)
    #[arg(short, long, env = "VOLUME_METER_CONFIG")]
    config: Option<PathBuf>,
}

impl Args {
    fn frame_rate(&self) -> Result<FrameRate> {
        FrameRate::new(self.fps_num, self.fps_den).ok_or(MeterError::InvalidFrameRate {
            numerator: self.fps_num,
            denominator: self.fps_den,
        })
    }
}

fn run(args: &Args) -> Result<()> {
    let frame_rate = args.frame_rate()?;
    let config = match &args.config {
        Some(path) => MeterConfig::load(path)?,
        None => MeterConfig::default(),
    };

    let asset = WavAsset::from_file(&args.path)?;
    let frames = (asset.duration_secs() * frame_rate.fps()).ceil() as i64;
    info!(
        "{}: {:.2}s, {} frames at {frame_rate}",
        asset.name(),
        asset.duration_secs(),
        frames
    );

    // the clip starts on frame 1 so frame 1 itself is its first silent boundary
    let mut timeline = Timeline::new();
    timeline.add_clip(AudioClip::new(1, frames + 1, Arc::new(asset))?);
    let context = SamplerContext::new(frame_rate, &timeline);

    let precision = config.precision;
    let (mut meter, mut playhead) = VolumeMeter::new(config)?;

    for frame in 1..=frames + 1 {
        playhead.position_changed(frame)?;
        if let Some(reading) = meter.poll(&context) {
            let bar = "#".repeat((reading.fill(meter.config()) * 40.0).round() as usize);
            println!("{frame:>6} {:>8} {:?} {bar}", reading.label(precision), reading.icon);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

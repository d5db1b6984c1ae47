use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

mod brightness;
mod calibration;
mod config;
mod device_file;
mod error;
mod estimate;
mod frame;
mod mapping;
mod pipeline;
mod sampler;

use error::Error;
use frame::capturer::webcam::Webcam;

/// Set the screen brightness once, from the ambient light seen by the webcam.
#[derive(Parser, Debug)]
#[command(version = env!("BOOTLIGHT_VERSION"))]
struct Args {
    /// Config file to use instead of $XDG_CONFIG_HOME/bootlight/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Capture from /dev/video<N>, overriding the config file
    #[arg(long)]
    video: Option<usize>,

    /// Print the target brightness and ambient light estimate without applying it
    #[arg(long)]
    dry_run: bool,

    /// Measure the current room and print the values to stdout
    #[arg(long)]
    calibrate: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            let code = err.downcast_ref::<Error>().map_or(1, Error::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = config::load(args.config.as_deref()).map_err(Error::from)?;
    if let Some(video) = args.video {
        config.capture.video = video;
    }
    log::debug!("Using {:#?}", config);

    let sampler = sampler::Sampler::new(
        &config.capture,
        estimate::Estimator::new(&config.estimate),
    );
    let mut webcam = Webcam::open(&config.capture).map_err(Error::from)?;

    if args.calibrate {
        let report = calibration::run(&sampler, &mut webcam)?;
        drop(webcam);
        print!("{}", report.to_toml().context("Unable to format calibration report")?);
        log::info!(
            "Calibrate once in your darkest and once in your brightest lighting, \
            then use the medians as mapping.ambient_min and mapping.ambient_max"
        );
        return Ok(());
    }

    let mut pipeline = pipeline::Pipeline::new(
        sampler,
        Box::new(mapping::Linear::new(&config.mapping)),
        Box::new(brightness::Command::new(&config.apply)),
    )
    .dry_run(args.dry_run);

    if let Some(transition) = &config.transition {
        pipeline = pipeline.with_transition(
            brightness::Transition::new(transition.duration, transition.step, config.mapping.floor),
            Box::new(brightness::Backlight::new(&transition.backlight)),
        );
    }

    let outcome = pipeline.run(Box::new(webcam))?;
    if args.dry_run {
        println!("{} {:.2}", outcome.target, outcome.sample.estimate);
    }
    Ok(())
}

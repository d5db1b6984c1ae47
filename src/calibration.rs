use crate::error::Error;
use crate::frame::capturer::Capturer;
use crate::sampler::{Sample, Sampler};
use chrono::Local;
use serde::Serialize;

/// Ambient light measured in the current room, for tuning `[mapping]`.
#[derive(Debug, Serialize, PartialEq)]
pub struct Report {
    pub ambient_min: f64,
    pub ambient_max: f64,
    pub ambient_median: f64,
    pub frames: usize,
    pub resolution: [u32; 2],
    pub timestamp: String,
}

impl Report {
    fn new(sample: &Sample, timestamp: String) -> Self {
        Self {
            ambient_min: round(sample.min),
            ambient_max: round(sample.max),
            ambient_median: round(sample.estimate),
            frames: sample.frames,
            resolution: [sample.resolution.0, sample.resolution.1],
            timestamp,
        }
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(self)?)
    }
}

pub fn run(sampler: &Sampler, capturer: &mut dyn Capturer) -> Result<Report, Error> {
    log::info!("Calibrating, keep the room lit as usual...");
    let sample = sampler.sample(capturer)?;
    let report = Report::new(&sample, Local::now().to_rfc3339());

    log::info!(
        "Ambient light median {:.2} over {} frames",
        report.ambient_median,
        report.frames
    );
    Ok(report)
}

fn round(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

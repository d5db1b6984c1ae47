use crate::brightness::{Brightness, Current, Transition};
use crate::error::{ApplyError, Error};
use crate::frame::capturer::Capturer;
use crate::mapping::Curve;
use crate::sampler::{Sample, Sampler};

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub sample: Sample,
    pub target: u8,
}

/// Capture, estimate, map and apply, stopping at the first failure.
pub struct Pipeline {
    sampler: Sampler,
    curve: Box<dyn Curve>,
    brightness: Box<dyn Brightness>,
    transition: Option<(Transition, Box<dyn Current>)>,
    dry_run: bool,
}

impl Pipeline {
    pub fn new(sampler: Sampler, curve: Box<dyn Curve>, brightness: Box<dyn Brightness>) -> Self {
        Self {
            sampler,
            curve,
            brightness,
            transition: None,
            dry_run: false,
        }
    }

    pub fn with_transition(mut self, transition: Transition, current: Box<dyn Current>) -> Self {
        self.transition = Some((transition, current));
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn run(&self, mut capturer: Box<dyn Capturer>) -> Result<Outcome, Error> {
        let sample = self.sampler.sample(capturer.as_mut())?;
        // release the camera before touching the display
        drop(capturer);

        let target = self.curve.target(sample.estimate);
        log::info!(
            "Ambient light {:.2} (median of {} frames) -> {target}%",
            sample.estimate,
            sample.frames
        );

        if self.dry_run {
            log::info!("Dry run, would set brightness to {target}%");
        } else {
            self.apply(target)?;
            log::info!("Screen brightness set to {target}%");
        }

        Ok(Outcome { sample, target })
    }

    fn apply(&self, target: u8) -> Result<(), ApplyError> {
        let Some((transition, current)) = &self.transition else {
            return self.brightness.set(target);
        };

        match current.get() {
            Ok(current) => transition.run(self.brightness.as_ref(), current, target),
            Err(err) => {
                log::warn!("Unable to read current brightness, skipping transition: {err:#}");
                self.brightness.set(target)
            }
        }
    }
}

use crate::config::CaptureConfig;
use crate::error::{Error, InvalidFrameError};
use crate::estimate::{self, Estimator};
use crate::frame::capturer::Capturer;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Median of the per-frame estimates.
    pub estimate: f64,
    pub min: f64,
    pub max: f64,
    pub frames: usize,
    pub resolution: (u32, u32),
}

/// Collects several frame estimates and reduces them to their median.
///
/// Near-black frames are treated as camera warm-up and skipped, unless nothing
/// else comes out of the camera, in which case the room is simply dark.
pub struct Sampler {
    estimator: Estimator,
    samples: usize,
    max_attempts: usize,
    interval: Duration,
    dark_threshold: f64,
}

impl Sampler {
    pub fn new(config: &CaptureConfig, estimator: Estimator) -> Self {
        Self {
            estimator,
            samples: config.samples.max(1),
            max_attempts: config.max_attempts.max(config.samples).max(1),
            interval: config.interval,
            dark_threshold: config.dark_threshold,
        }
    }

    pub fn sample(&self, capturer: &mut dyn Capturer) -> Result<Sample, Error> {
        let mut usable = Vec::with_capacity(self.samples);
        let mut dark = Vec::new();
        let mut resolution = (0, 0);

        for attempt in 1..=self.max_attempts {
            if attempt > 1 {
                thread::sleep(self.interval);
            }

            let frame = capturer.capture()?;
            resolution = (frame.width(), frame.height());
            let value = self.estimator.estimate(&frame)?;
            let level = estimate::mean(&estimate::luma(&frame)).unwrap_or_default();

            if level <= self.dark_threshold {
                log::debug!("Frame {attempt} is too dark ({level:.2}), skipping");
                dark.push(value);
                continue;
            }

            log::trace!("Frame {attempt}: {value:.2}");
            usable.push(value);
            if usable.len() >= self.samples {
                break;
            }
        }

        let values = if usable.is_empty() {
            log::warn!("Camera only returned dark frames, assuming a dark room");
            dark
        } else {
            usable
        };

        summarize(values, resolution).ok_or(Error::InvalidFrame(InvalidFrameError::Empty {
            width: resolution.0,
            height: resolution.1,
        }))
    }
}

fn summarize(mut values: Vec<f64>, resolution: (u32, u32)) -> Option<Sample> {
    if values.is_empty() {
        return None;
    }

    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    let estimate = if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    };

    Some(Sample {
        estimate,
        min: values[0],
        max: values[values.len() - 1],
        frames: values.len(),
        resolution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EstimateConfig;
    use crate::error::CaptureError;
    use crate::frame::capturer::MockCapturer;
    use crate::frame::Frame;

    fn sampler(samples: usize, max_attempts: usize) -> Sampler {
        let config = CaptureConfig {
            video: 0,
            resolution: None,
            samples,
            max_attempts,
            interval: Duration::ZERO,
            timeout: Duration::from_secs(1),
            dark_threshold: 10.0,
        };
        let estimator = Estimator::new(&EstimateConfig {
            denoise: false,
            trim_percent: 0.0,
        });
        Sampler::new(&config, estimator)
    }

    fn gray(v: u8) -> Frame {
        Frame::solid(4, 3, [v, v, v])
    }

    fn capturer(frames: Vec<Frame>) -> MockCapturer {
        let expected = frames.len();
        let mut frames = frames.into_iter();
        let mut capturer_mock = MockCapturer::new();
        capturer_mock
            .expect_capture()
            .times(expected)
            .returning(move || Ok(frames.next().expect("no more test frames")));
        capturer_mock
    }

    #[test]
    fn test_sample_takes_median_of_requested_frames() -> Result<(), Error> {
        let mut capturer_mock = capturer(vec![gray(100), gray(180), gray(120)]);

        let sample = sampler(3, 40).sample(&mut capturer_mock)?;

        assert_eq!(
            sample,
            Sample {
                estimate: 120.0,
                min: 100.0,
                max: 180.0,
                frames: 3,
                resolution: (4, 3),
            }
        );
        Ok(())
    }

    #[test]
    fn test_sample_median_of_even_count_averages_middle_values() -> Result<(), Error> {
        let mut capturer_mock = capturer(vec![gray(100), gray(110), gray(130), gray(200)]);

        let sample = sampler(4, 4).sample(&mut capturer_mock)?;

        assert_eq!(sample.estimate, 120.0);
        Ok(())
    }

    #[test]
    fn test_sample_skips_warm_up_frames() -> Result<(), Error> {
        let mut capturer_mock = capturer(vec![gray(0), gray(5), gray(100), gray(140), gray(120)]);

        let sample = sampler(3, 40).sample(&mut capturer_mock)?;

        assert_eq!(sample.estimate, 120.0);
        assert_eq!(sample.frames, 3);
        Ok(())
    }

    #[test]
    fn test_sample_falls_back_to_dark_frames_in_dark_room() -> Result<(), Error> {
        let mut capturer_mock = capturer(vec![gray(0), gray(3), gray(2), gray(0)]);

        let sample = sampler(2, 4).sample(&mut capturer_mock)?;

        assert_eq!(sample.frames, 4);
        assert_eq!(sample.min, 0.0);
        assert_eq!(sample.max, 3.0);
        Ok(())
    }

    #[test]
    fn test_sample_gives_up_after_max_attempts() -> Result<(), Error> {
        let mut capturer_mock = capturer(vec![gray(0), gray(0), gray(90)]);

        let sample = sampler(2, 3).sample(&mut capturer_mock)?;

        assert_eq!(sample.estimate, 90.0);
        assert_eq!(sample.frames, 1);
        Ok(())
    }

    #[test]
    fn test_sample_aborts_on_first_capture_error() {
        let mut capturer_mock = MockCapturer::new();
        capturer_mock
            .expect_capture()
            .times(1)
            .returning(|| Err(CaptureError::Busy("/dev/video0".to_string()).into()));

        assert!(matches!(
            sampler(10, 40).sample(&mut capturer_mock),
            Err(Error::Capture(CaptureError::Busy(_)))
        ));
    }

    #[test]
    fn test_single_frame_sampling() -> Result<(), Error> {
        let mut capturer_mock = capturer(vec![gray(77)]);

        assert_eq!(sampler(1, 1).sample(&mut capturer_mock)?.estimate, 77.0);
        Ok(())
    }
}

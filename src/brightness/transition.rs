use super::Brightness;
use crate::error::ApplyError;
use itertools::Itertools;
use std::thread;
use std::time::Duration;

/// Gradual change of brightness that slows down as it approaches the target.
#[derive(Debug, Clone)]
pub struct Transition {
    duration: Duration,
    step: u8,
    floor: u8,
}

impl Transition {
    pub fn new(duration: Duration, step: u8, floor: u8) -> Self {
        Self {
            duration,
            step: step.max(1),
            floor: floor.min(100),
        }
    }

    /// Intermediate values between `current` and `target`, excluding the target itself.
    pub fn ramp(&self, current: u8, target: u8) -> Vec<u8> {
        if current == target {
            return Vec::new();
        }

        let diff = current.abs_diff(target) as f64;
        let direction = if target > current { 1.0 } else { -1.0 };
        let steps = (current.abs_diff(target) / self.step).max(1) as u32;

        (0..steps)
            .map(|i| {
                let progress = ease_out(i as f64 / steps as f64);
                let value = current as f64 + diff * progress * direction;
                value.clamp(self.floor as f64, 100.0) as u8
            })
            .dedup()
            .collect()
    }

    pub fn run(
        &self,
        brightness: &dyn Brightness,
        current: u8,
        target: u8,
    ) -> Result<(), ApplyError> {
        let ramp = self.ramp(current, target);
        let delay = self.duration / ramp.len().max(1) as u32;
        log::debug!("Transition {current}% -> {target}% in {} steps", ramp.len());

        for value in ramp {
            brightness.set(value)?;
            thread::sleep(delay);
        }

        brightness.set(target)
    }
}

// Cubic ease-out.
fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brightness::MockBrightness;
    use std::sync::{Arc, Mutex};

    fn transition(step: u8, floor: u8) -> Transition {
        Transition::new(Duration::ZERO, step, floor)
    }

    #[test]
    fn test_ramp_is_empty_when_already_at_target() {
        assert!(transition(2, 5).ramp(40, 40).is_empty());
    }

    #[test]
    fn test_ramp_up_is_increasing_and_stays_below_target() {
        let ramp = transition(2, 5).ramp(20, 60);

        assert_eq!(ramp.first(), Some(&20));
        assert_eq!(ramp.last(), Some(&59));
        assert!(ramp.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_ramp_down_is_decreasing_and_stays_above_target() {
        let ramp = transition(2, 5).ramp(80, 30);

        assert_eq!(ramp.first(), Some(&80));
        assert!(ramp.windows(2).all(|w| w[0] > w[1]));
        assert!(ramp.iter().all(|&v| (30..=80).contains(&v)));
    }

    #[test]
    fn test_ramp_eases_out() {
        let ramp = transition(10, 0).ramp(0, 100);

        assert_eq!(ramp, vec![0, 27, 48, 65, 78, 87, 93, 97, 99]);
        assert!(ramp.windows(3).all(|w| w[1] - w[0] >= w[2] - w[1]));
    }

    #[test]
    fn test_ramp_small_change_has_single_step() {
        assert_eq!(transition(10, 5).ramp(50, 53), vec![50]);
    }

    #[test]
    fn test_ramp_respects_floor() {
        let ramp = transition(2, 5).ramp(1, 40);

        assert_eq!(ramp.first(), Some(&5));
        assert!(ramp.iter().all(|&v| v >= 5));
    }

    #[test]
    fn test_run_applies_ramp_then_exact_target() -> Result<(), ApplyError> {
        let applied = Arc::new(Mutex::new(Vec::new()));
        let mut brightness_mock = MockBrightness::new();
        let recorder = Arc::clone(&applied);
        brightness_mock.expect_set().returning(move |v| {
            recorder.lock().unwrap().push(v);
            Ok(())
        });

        let t = transition(2, 5);
        t.run(&brightness_mock, 20, 60)?;

        let mut expected = t.ramp(20, 60);
        expected.push(60);
        assert_eq!(*applied.lock().unwrap(), expected);
        Ok(())
    }

    #[test]
    fn test_run_stops_at_first_failure() {
        let mut brightness_mock = MockBrightness::new();
        brightness_mock
            .expect_set()
            .times(1)
            .returning(|_| Err(ApplyError::Missing("brightnessctl".to_string())));

        assert!(transition(2, 5).run(&brightness_mock, 20, 60).is_err());
    }
}

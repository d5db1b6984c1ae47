use crate::config::MappingConfig;

/// Maps an ambient light estimate to a brightness percentage.
///
/// Implementations must be monotonically non-decreasing and never return more than 100.
pub trait Curve {
    fn target(&self, estimate: f64) -> u8;
}

/// Clamped linear interpolation of `[ambient_min, ambient_max]` onto
/// `[brightness_min, brightness_max]`, never going below `floor`.
#[derive(Debug, Clone)]
pub struct Linear {
    ambient_min: f64,
    ambient_max: f64,
    brightness_min: f64,
    brightness_max: f64,
    floor: f64,
}

impl Linear {
    pub fn new(config: &MappingConfig) -> Self {
        Self {
            ambient_min: config.ambient_min,
            ambient_max: config.ambient_max,
            brightness_min: config.brightness_min.min(100) as f64,
            brightness_max: config.brightness_max.max(config.brightness_min).min(100) as f64,
            floor: config.floor.min(100) as f64,
        }
    }

    fn progress(&self, estimate: f64) -> f64 {
        if estimate.is_nan() {
            0.0
        } else if self.ambient_max > self.ambient_min {
            ((estimate - self.ambient_min) / (self.ambient_max - self.ambient_min)).clamp(0.0, 1.0)
        } else if estimate >= self.ambient_min {
            1.0
        } else {
            0.0
        }
    }
}

impl Curve for Linear {
    fn target(&self, estimate: f64) -> u8 {
        let span = self.brightness_max - self.brightness_min;
        let value = self.brightness_min + self.progress(estimate) * span;
        value.max(self.floor).min(100.0) as u8
    }
}

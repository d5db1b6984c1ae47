use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfig {
    pub video: usize,
    pub resolution: Option<(u32, u32)>,
    pub samples: usize,
    pub max_attempts: usize,
    pub interval: Duration,
    pub timeout: Duration,
    pub dark_threshold: f64,
}

impl CaptureConfig {
    pub fn device_path(&self) -> String {
        format!("/dev/video{}", self.video)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EstimateConfig {
    pub denoise: bool,
    pub trim_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappingConfig {
    pub ambient_min: f64,
    pub ambient_max: f64,
    pub brightness_min: u8,
    pub brightness_max: u8,
    pub floor: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplyConfig {
    pub command: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransitionConfig {
    pub backlight: String,
    pub duration: Duration,
    pub step: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub capture: CaptureConfig,
    pub estimate: EstimateConfig,
    pub mapping: MappingConfig,
    pub apply: ApplyConfig,
    pub transition: Option<TransitionConfig>,
}

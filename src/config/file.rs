use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Capture {
    pub video: Option<usize>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub samples: Option<usize>,
    pub max_attempts: Option<usize>,
    pub interval_ms: Option<u64>,
    pub timeout_ms: Option<u64>,
    pub dark_threshold: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Estimate {
    pub denoise: Option<bool>,
    pub trim_percent: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Mapping {
    pub ambient_min: Option<f64>,
    pub ambient_max: Option<f64>,
    pub brightness_min: Option<u8>,
    pub brightness_max: Option<u8>,
    pub floor: Option<u8>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Apply {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Transition {
    pub enabled: Option<bool>,
    pub backlight: Option<String>,
    pub duration_ms: Option<u64>,
    pub step: Option<u8>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub capture: Capture,
    pub estimate: Estimate,
    pub mapping: Mapping,
    pub apply: Apply,
    pub transition: Transition,
}

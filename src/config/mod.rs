use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod app;
pub mod file;

pub use app::{ApplyConfig, CaptureConfig, Config, EstimateConfig, MappingConfig, TransitionConfig};

const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path.map(Path::to_path_buf).or_else(find_config_file) {
        Some(path) => {
            log::debug!("Loading config from {}", path.display());
            let content = fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadFile(path.display().to_string(), e))?;
            parse(&content)
        }
        None => {
            log::debug!("No config file found, using built-in defaults");
            parse(DEFAULT_CONFIG)
        }
    }
}

fn find_config_file() -> Option<PathBuf> {
    xdg::BaseDirectories::with_prefix("bootlight")
        .ok()
        .and_then(|dirs| dirs.find_config_file("config.toml"))
}

pub fn parse(content: &str) -> Result<Config, ConfigError> {
    let cfg: file::Config = toml::from_str(content)?;
    let config = Config {
        capture: CaptureConfig {
            video: cfg.capture.video.unwrap_or(0),
            resolution: match (cfg.capture.width, cfg.capture.height) {
                (Some(w), Some(h)) => Some((w, h)),
                (None, None) => None,
                _ => {
                    return Err(ConfigError::Invalid(
                        "capture.width and capture.height must be set together".to_string(),
                    ))
                }
            },
            samples: cfg.capture.samples.unwrap_or(10),
            max_attempts: cfg.capture.max_attempts.unwrap_or(40),
            interval: Duration::from_millis(cfg.capture.interval_ms.unwrap_or(50)),
            timeout: Duration::from_millis(cfg.capture.timeout_ms.unwrap_or(2000)),
            dark_threshold: cfg.capture.dark_threshold.unwrap_or(10.0),
        },
        estimate: EstimateConfig {
            denoise: cfg.estimate.denoise.unwrap_or(true),
            trim_percent: cfg.estimate.trim_percent.unwrap_or(10.0),
        },
        mapping: MappingConfig {
            ambient_min: cfg.mapping.ambient_min.unwrap_or(40.0),
            ambient_max: cfg.mapping.ambient_max.unwrap_or(170.0),
            brightness_min: cfg.mapping.brightness_min.unwrap_or(10),
            brightness_max: cfg.mapping.brightness_max.unwrap_or(100),
            floor: cfg.mapping.floor.unwrap_or(5),
        },
        apply: ApplyConfig {
            command: cfg
                .apply
                .command
                .unwrap_or_else(|| "brightnessctl".to_string()),
            args: cfg
                .apply
                .args
                .unwrap_or_else(|| vec!["set".to_string(), "{percent}%".to_string()]),
        },
        transition: cfg
            .transition
            .enabled
            .unwrap_or(false)
            .then(|| TransitionConfig {
                backlight: cfg
                    .transition
                    .backlight
                    .unwrap_or_else(|| "/sys/class/backlight/intel_backlight".to_string()),
                duration: Duration::from_millis(cfg.transition.duration_ms.unwrap_or(5000)),
                step: cfg.transition.step.unwrap_or(2),
            }),
    };

    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
    let (capture, mapping) = (&config.capture, &config.mapping);

    if capture.samples == 0 {
        return invalid("capture.samples must be at least 1");
    }
    if capture.max_attempts < capture.samples {
        return invalid("capture.max_attempts must not be lower than capture.samples");
    }
    if !(0.0..50.0).contains(&config.estimate.trim_percent) {
        return invalid("estimate.trim_percent must be in [0, 50)");
    }
    if !(mapping.ambient_min < mapping.ambient_max) {
        return invalid("mapping.ambient_min must be lower than mapping.ambient_max");
    }
    if mapping.brightness_min > mapping.brightness_max || mapping.brightness_max > 100 {
        return invalid("mapping requires brightness_min <= brightness_max <= 100");
    }
    if mapping.floor > 100 {
        return invalid("mapping.floor must not exceed 100");
    }
    if config.apply.command.trim().is_empty() {
        return invalid("apply.command must not be empty");
    }
    if config.transition.as_ref().is_some_and(|t| t.step == 0) {
        return invalid("transition.step must be at least 1");
    }

    Ok(())
}

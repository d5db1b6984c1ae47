use std::io;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no camera found at {0}")]
    Missing(String),
    #[error("camera {0} is busy")]
    Busy(String),
    #[error("timed out waiting for a frame from {0}")]
    Timeout(String),
    #[error("camera {device} does not provide RGB3 frames (got {fourcc})")]
    Format { device: String, fourcc: String },
    #[error("camera {device} failed")]
    Device {
        device: String,
        #[source]
        source: io::Error,
    },
}

impl CaptureError {
    pub fn from_io(device: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::Missing(device.to_string()),
            io::ErrorKind::ResourceBusy => Self::Busy(device.to_string()),
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => {
                Self::Timeout(device.to_string())
            }
            _ => Self::Device {
                device: device.to_string(),
                source: err,
            },
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidFrameError {
    #[error("frame has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },
    #[error("frame of {width}x{height} needs {expected} bytes, got {actual}")]
    Truncated {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ApplyError {
    #[error("brightness utility '{0}' not found")]
    Missing(String),
    #[error("unable to run '{command}'")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("'{command}' failed: {status}")]
    Failed { command: String, status: ExitStatus },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    ReadFile(String, io::Error),
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    InvalidFrame(#[from] InvalidFrameError),
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

impl Error {
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Config(_) => 1,
            Error::Capture(_) => 2,
            Error::InvalidFrame(_) => 3,
            Error::Apply(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_error_from_io_kind() {
        let dev = "/dev/video0";

        assert!(matches!(
            CaptureError::from_io(dev, io::ErrorKind::NotFound.into()),
            CaptureError::Missing(_)
        ));
        assert!(matches!(
            CaptureError::from_io(dev, io::ErrorKind::ResourceBusy.into()),
            CaptureError::Busy(_)
        ));
        assert!(matches!(
            CaptureError::from_io(dev, io::ErrorKind::TimedOut.into()),
            CaptureError::Timeout(_)
        ));
        assert!(matches!(
            CaptureError::from_io(dev, io::ErrorKind::PermissionDenied.into()),
            CaptureError::Device { .. }
        ));
    }

    #[test]
    fn test_every_stage_has_a_distinct_non_zero_exit_code() {
        let codes = [
            Error::from(ConfigError::Invalid("x".into())).exit_code(),
            Error::from(CaptureError::Missing("x".into())).exit_code(),
            Error::from(InvalidFrameError::Empty {
                width: 0,
                height: 0,
            })
            .exit_code(),
            Error::from(ApplyError::Missing("x".into())).exit_code(),
        ];

        assert!(codes.iter().all(|&c| c != 0));
        assert_eq!(codes.len(), codes.iter().collect::<std::collections::HashSet<_>>().len());
    }
}

use crate::device_file::read;
use anyhow::ensure;
use std::path::PathBuf;

/// A sysfs backlight directory, e.g. `/sys/class/backlight/intel_backlight`.
pub struct Backlight {
    path: PathBuf,
}

impl Backlight {
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(path),
        }
    }
}

impl super::Current for Backlight {
    fn get(&self) -> anyhow::Result<u8> {
        let current = read(&self.path.join("brightness"))?;
        let max = read(&self.path.join("max_brightness"))?;
        ensure!(max > 0, "{} reports max_brightness of 0", self.path.display());

        Ok((current.min(max) * 100 / max) as u8)
    }
}

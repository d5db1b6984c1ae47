use anyhow::Context;
use std::fs;
use std::path::Path;

/// Reads a single integer from a sysfs attribute such as `brightness`.
pub fn read(path: &Path) -> anyhow::Result<u64> {
    fs::read_to_string(path)
        .with_context(|| format!("Unable to read {}", path.display()))?
        .trim()
        .parse()
        .with_context(|| format!("Unexpected content in {}", path.display()))
}

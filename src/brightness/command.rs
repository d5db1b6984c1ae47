use crate::config::ApplyConfig;
use crate::error::ApplyError;
use std::io;
use std::process::{self, Output, Stdio};

const PERCENT_PLACEHOLDER: &str = "{percent}";

/// An external brightness utility, e.g. `brightnessctl set {percent}%`.
pub struct Command {
    program: String,
    args: Vec<String>,
}

impl Command {
    pub fn new(config: &ApplyConfig) -> Self {
        Self {
            program: config.command.clone(),
            args: config.args.clone(),
        }
    }

    fn args(&self, percent: u8) -> Vec<String> {
        let percent = percent.to_string();
        self.args
            .iter()
            .map(|arg| arg.replace(PERCENT_PLACEHOLDER, &percent))
            .collect()
    }
}

impl super::Brightness for Command {
    fn set(&self, percent: u8) -> Result<(), ApplyError> {
        let args = self.args(percent);
        let command = format!("{} {}", self.program, args.join(" "));
        log::debug!("Running {command:?}");

        let Output { status, stderr, .. } = process::Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => ApplyError::Missing(self.program.clone()),
                _ => ApplyError::Spawn {
                    command: command.clone(),
                    source: err,
                },
            })?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            if !stderr.trim().is_empty() {
                log::warn!("{}: {}", self.program, stderr.trim());
            }
            return Err(ApplyError::Failed { command, status });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brightness::Brightness;
    use std::error::Error;
    use std::fs;

    fn command(program: &str, args: &[&str]) -> Command {
        Command::new(&ApplyConfig {
            command: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        })
    }

    #[test]
    fn test_args_substitute_percent() {
        let cmd = command("brightnessctl", &["set", "{percent}%"]);

        assert_eq!(cmd.args(42), vec!["set", "42%"]);
        assert_eq!(cmd.args(0), vec!["set", "0%"]);
        assert_eq!(cmd.args(100), vec!["set", "100%"]);
    }

    #[test]
    fn test_set_passes_exact_percentage() -> Result<(), Box<dyn Error>> {
        let cmd = command("sh", &["-c", "[ \"$1\" = 42 ]", "sh", "{percent}"]);

        cmd.set(42)?;
        assert!(matches!(cmd.set(41), Err(ApplyError::Failed { .. })));
        Ok(())
    }

    #[test]
    fn test_set_invokes_utility_with_substituted_args() -> Result<(), Box<dyn Error>> {
        let out = tempfile::NamedTempFile::new()?;
        let path = out.path().to_string_lossy().to_string();
        let cmd = command(
            "sh",
            &["-c", "printf '%s' \"$*\" > \"$0\"", &path, "set", "{percent}%"],
        );

        cmd.set(73)?;

        assert_eq!(fs::read_to_string(out.path())?, "set 73%");
        Ok(())
    }

    #[test]
    fn test_set_reports_missing_utility() {
        let cmd = command("bootlight-test-no-such-utility", &["{percent}"]);

        assert!(matches!(
            cmd.set(50),
            Err(ApplyError::Missing(p)) if p == "bootlight-test-no-such-utility"
        ));
    }

    #[test]
    fn test_set_reports_non_zero_exit() {
        let cmd = command("sh", &["-c", "echo nope >&2; exit 3"]);

        match cmd.set(50) {
            Err(ApplyError::Failed { status, .. }) => assert_eq!(status.code(), Some(3)),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}

use crate::error::ApplyError;

mod backlight;
mod command;
mod transition;

pub use backlight::Backlight;
pub use command::Command;
pub use transition::Transition;

/// Sets the display brightness, in percent.
#[cfg_attr(test, mockall::automock)]
pub trait Brightness {
    fn set(&self, percent: u8) -> Result<(), ApplyError>;
}

/// Reads the display brightness currently in effect, in percent.
#[cfg_attr(test, mockall::automock)]
pub trait Current {
    fn get(&self) -> anyhow::Result<u8>;
}

use super::Frame;
use crate::error::Error;

pub mod webcam;

#[cfg_attr(test, mockall::automock)]
pub trait Capturer {
    fn capture(&mut self) -> Result<Frame, Error>;
}

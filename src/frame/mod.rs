use crate::error::InvalidFrameError;

pub mod capturer;

/// A single packed RGB24 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl Frame {
    /// Wraps a raw RGB24 buffer, dropping any trailing driver padding.
    pub fn new(width: u32, height: u32, mut rgb: Vec<u8>) -> Result<Self, InvalidFrameError> {
        let pixels = width as usize * height as usize;
        if pixels == 0 {
            return Err(InvalidFrameError::Empty { width, height });
        }

        let expected = pixels * 3;
        if rgb.len() < expected {
            return Err(InvalidFrameError::Truncated {
                width,
                height,
                expected,
                actual: rgb.len(),
            });
        }
        rgb.truncate(expected);

        Ok(Self { width, height, rgb })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    #[cfg(test)]
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self::new(width, height, data).expect("solid frame must be valid")
    }
}

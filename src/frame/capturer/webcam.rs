use crate::config::CaptureConfig;
use crate::error::{CaptureError, Error};
use crate::frame::Frame;
use itertools::Itertools;
use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, FourCC};

const RGB3: &[u8; 4] = b"RGB3";
const BUFFERS: u32 = 4;

pub struct Webcam {
    path: String,
    stream: Stream<'static>,
    width: u32,
    height: u32,
    _device: Device,
}

impl Webcam {
    pub fn open(config: &CaptureConfig) -> Result<Self, CaptureError> {
        let path = config.device_path();
        let io_err = |err| CaptureError::from_io(&path, err);

        let device = Device::new(config.video).map_err(io_err)?;
        let mut format = device.format().map_err(io_err)?;
        format.fourcc = FourCC::new(RGB3);

        let (width, height) = match config.resolution {
            Some(resolution) => resolution,
            None => Self::min_resolution(&device, format.fourcc)
                .map_err(io_err)?
                .unwrap_or((format.width, format.height)),
        };
        format.width = width;
        format.height = height;

        // The driver may adjust the request, trust what it hands back.
        let format = device.set_format(&format).map_err(io_err)?;
        if format.fourcc != FourCC::new(RGB3) {
            return Err(CaptureError::Format {
                device: path.clone(),
                fourcc: format.fourcc.to_string(),
            });
        }

        let mut stream =
            Stream::with_buffers(&device, Type::VideoCapture, BUFFERS).map_err(io_err)?;
        stream.set_timeout(config.timeout);

        log::info!(
            "Capturing from {path} at {}x{}",
            format.width,
            format.height
        );

        Ok(Self {
            path,
            stream,
            width: format.width,
            height: format.height,
            _device: device,
        })
    }

    fn min_resolution(device: &Device, fourcc: FourCC) -> std::io::Result<Option<(u32, u32)>> {
        Ok(device
            .enum_framesizes(fourcc)?
            .into_iter()
            .flat_map(|f| {
                f.size
                    .to_discrete()
                    .into_iter()
                    .map(|d| (d.width, d.height))
                    .collect_vec()
            })
            .min_by(|&(w1, h1), &(w2, h2)| h1.cmp(&h2).then(w1.cmp(&w2))))
    }
}

impl super::Capturer for Webcam {
    fn capture(&mut self) -> Result<Frame, Error> {
        let (buf, meta) = self
            .stream
            .next()
            .map_err(|err| CaptureError::from_io(&self.path, err))?;

        let used = (meta.bytesused as usize).min(buf.len());
        let used = if used == 0 { buf.len() } else { used };
        log::trace!("[{}] Read {used} bytes (sequence {})", self.path, meta.sequence);

        Ok(Frame::new(self.width, self.height, buf[..used].to_vec())?)
    }
}

use crate::config::EstimateConfig;
use crate::error::InvalidFrameError;
use crate::frame::Frame;

const MEDIAN_RADIUS: usize = 2;

/// Reduces a frame to a single ambient light value in `[0, 255]`.
#[derive(Debug, Clone)]
pub struct Estimator {
    denoise: bool,
    trim_percent: f64,
}

impl Estimator {
    pub fn new(config: &EstimateConfig) -> Self {
        Self {
            denoise: config.denoise,
            trim_percent: config.trim_percent,
        }
    }

    pub fn estimate(&self, frame: &Frame) -> Result<f64, InvalidFrameError> {
        let luma = luma(frame);
        let luma = if self.denoise {
            median_blur(&luma, frame.width() as usize, frame.height() as usize)
        } else {
            luma
        };

        trimmed_mean(&luma, self.trim_percent).ok_or(InvalidFrameError::Empty {
            width: frame.width(),
            height: frame.height(),
        })
    }
}

/// BT.601 luma, 14-bit fixed point.
pub fn luma(frame: &Frame) -> Vec<u8> {
    frame
        .rgb()
        .chunks_exact(3)
        .map(|p| {
            let (r, g, b) = (p[0] as u32, p[1] as u32, p[2] as u32);
            ((r * 4899 + g * 9617 + b * 1868 + (1 << 13)) >> 14) as u8
        })
        .collect()
}

pub fn mean(values: &[u8]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|&v| v as u64).sum::<u64>() as f64 / values.len() as f64)
}

fn median_blur(luma: &[u8], width: usize, height: usize) -> Vec<u8> {
    let side = 2 * MEDIAN_RADIUS + 1;
    let mut window = Vec::with_capacity(side * side);

    (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| {
            window.clear();
            for dy in 0..side {
                let sy = (y + dy).saturating_sub(MEDIAN_RADIUS).min(height - 1);
                for dx in 0..side {
                    let sx = (x + dx).saturating_sub(MEDIAN_RADIUS).min(width - 1);
                    window.push(luma[sy * width + sx]);
                }
            }
            *window.select_nth_unstable(side * side / 2).1
        })
        .collect()
}

/// Percentile with linear interpolation between closest ranks.
fn percentile(sorted: &[u8], percent: f64) -> f64 {
    let rank = percent / 100.0 * (sorted.len() - 1) as f64;
    let (lo, hi) = (rank.floor() as usize, rank.ceil() as usize);
    let (a, b) = (sorted[lo] as f64, sorted[hi] as f64);
    a + (b - a) * (rank - lo as f64)
}

/// Mean of the values lying between the `trim` and `100 - trim` percentiles.
fn trimmed_mean(values: &[u8], trim: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let lower = percentile(&sorted, trim);
    let upper = percentile(&sorted, 100.0 - trim);

    let kept = sorted
        .into_iter()
        .filter(|&v| (lower..=upper).contains(&(v as f64)))
        .collect::<Vec<_>>();

    // A narrow band can fall between two samples.
    mean(&kept).or(Some((lower + upper) / 2.0))
}

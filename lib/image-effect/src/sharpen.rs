use crate::{Effect, Frame, is_empty, row_stride};
use derivative::Derivative;
use derive_setters::Setters;
use rayon::prelude::*;

/// 3x3 sharpening convolution.
///
/// The kernel has `9 + sharpness / 20` at the center and `-1` for the eight
/// neighbours. It is applied as-is (no renormalization), so the weights sum
/// to `1 + sharpness / 20`. Pixels outside the frame replicate the nearest
/// edge pixel.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SharpenConfig {
    /// 0..=100, 0 disables the filter
    #[derivative(Default(value = "0"))]
    pub sharpness: u32,
}

impl SharpenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.sharpness > 0
    }

    pub fn center_weight(&self) -> f32 {
        9.0 + self.sharpness as f32 / 20.0
    }
}

impl Effect for SharpenConfig {
    fn apply(&self, frame: &Frame) -> Frame {
        if !self.is_active() || is_empty(frame) {
            return frame.clone();
        }

        let (width, height) = (frame.width() as usize, frame.height() as usize);
        let stride = row_stride(frame);
        let center = self.center_weight();
        let src: &[u8] = frame.as_raw();

        let mut output = Frame::new(frame.width(), frame.height());
        let dst: &mut [u8] = &mut output;

        dst.par_chunks_mut(stride).enumerate().for_each(|(y, row)| {
            let rows = [y.saturating_sub(1), y, (y + 1).min(height - 1)];

            for x in 0..width {
                let cols = [x.saturating_sub(1), x, (x + 1).min(width - 1)];

                for c in 0..3 {
                    let mut window = 0.0f32;
                    for &ny in &rows {
                        for &nx in &cols {
                            window += src[ny * stride + nx * 3 + c] as f32;
                        }
                    }

                    let value = src[y * stride + x * 3 + c] as f32;
                    let sharpened = center * value - (window - value);
                    row[x * 3 + c] = sharpened.round().clamp(0.0, 255.0) as u8;
                }
            }
        });

        output
    }
}

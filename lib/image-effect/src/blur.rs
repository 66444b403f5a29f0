use crate::{Effect, Frame, is_empty, row_stride};
use derivative::Derivative;
use derive_setters::Setters;
use rayon::prelude::*;

/// Separable Gaussian blur with a `(2r + 1)` tap kernel.
///
/// Sigma follows the usual automatic sizing for a kernel of `ksize` taps:
/// `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`. Pixels outside the frame
/// replicate the nearest edge pixel.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct GaussianBlurConfig {
    /// 0..=20 pixels, 0 disables the filter
    #[derivative(Default(value = "0"))]
    pub radius: u32,
}

impl GaussianBlurConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.radius > 0
    }

    pub fn kernel_size(&self) -> u32 {
        2 * self.radius + 1
    }

    pub fn sigma(&self) -> f32 {
        0.3 * ((self.kernel_size() as f32 - 1.0) * 0.5 - 1.0) + 0.8
    }

    /// Normalized 1-D weights, centre tap at index `radius`.
    pub fn kernel(&self) -> Vec<f32> {
        let radius = self.radius as f32;
        let scale = -0.5 / (self.sigma() * self.sigma());

        let mut weights = (0..self.kernel_size())
            .map(|i| {
                let d = i as f32 - radius;
                (scale * d * d).exp()
            })
            .collect::<Vec<f32>>();

        let sum = weights.iter().sum::<f32>();
        weights.iter_mut().for_each(|w| *w /= sum);
        weights
    }
}

impl Effect for GaussianBlurConfig {
    fn apply(&self, frame: &Frame) -> Frame {
        if !self.is_active() || is_empty(frame) {
            return frame.clone();
        }

        let (width, height) = (frame.width() as usize, frame.height() as usize);
        let stride = row_stride(frame);
        let radius = self.radius as isize;
        let kernel = self.kernel();
        let src: &[u8] = frame.as_raw();

        // Horizontal pass keeps full precision for the vertical one.
        let mut horizontal = vec![0.0f32; src.len()];
        horizontal
            .par_chunks_mut(stride)
            .zip(src.par_chunks(stride))
            .for_each(|(dst_row, src_row)| {
                for x in 0..width {
                    let mut acc = [0.0f32; 3];
                    for (k, weight) in kernel.iter().enumerate() {
                        let nx = clamp_index(x as isize + k as isize - radius, width);
                        for c in 0..3 {
                            acc[c] += weight * src_row[nx * 3 + c] as f32;
                        }
                    }
                    dst_row[x * 3..x * 3 + 3].copy_from_slice(&acc);
                }
            });

        let mut output = Frame::new(frame.width(), frame.height());
        let dst: &mut [u8] = &mut output;

        dst.par_chunks_mut(stride).enumerate().for_each(|(y, row)| {
            let mut acc = vec![0.0f32; stride];
            for (k, weight) in kernel.iter().enumerate() {
                let ny = clamp_index(y as isize + k as isize - radius, height);
                let src_row = &horizontal[ny * stride..(ny + 1) * stride];
                for (sum, value) in acc.iter_mut().zip(src_row) {
                    *sum += weight * value;
                }
            }

            for (out, sum) in row.iter_mut().zip(acc) {
                *out = sum.round().clamp(0.0, 255.0) as u8;
            }
        });

        output
    }
}

fn clamp_index(index: isize, len: usize) -> usize {
    index.clamp(0, len as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_kernel_is_normalized_and_symmetric() {
        for radius in [1, 3, 20] {
            let config = GaussianBlurConfig::new().with_radius(radius);
            let kernel = config.kernel();

            assert_eq!(kernel.len(), (2 * radius + 1) as usize);
            assert!((kernel.iter().sum::<f32>() - 1.0).abs() < 1e-5);
            for i in 0..kernel.len() / 2 {
                assert!((kernel[i] - kernel[kernel.len() - 1 - i]).abs() < 1e-6);
            }
            assert!(kernel[radius as usize] >= kernel[0]);
        }
    }

    #[test]
    fn test_sigma_sizing() {
        assert!((GaussianBlurConfig::new().with_radius(1).sigma() - 0.8).abs() < 1e-6);
        assert!((GaussianBlurConfig::new().with_radius(2).sigma() - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_radius_zero_is_bypassed() {
        let frame = Frame::from_fn(7, 3, |x, y| Rgb([(x * 30) as u8, (y * 80) as u8, 1]));
        assert_eq!(GaussianBlurConfig::new().apply(&frame), frame);
    }

    #[test]
    fn test_keeps_dimensions_and_solid_color() {
        let frame = Frame::from_pixel(9, 5, Rgb([12, 128, 240]));
        for radius in [1, 4, 20] {
            let output = GaussianBlurConfig::new().with_radius(radius).apply(&frame);
            assert_eq!(output.dimensions(), (9, 5));
            assert_eq!(output, frame);
        }
    }

    #[test]
    fn test_spreads_a_point() {
        let mut frame = Frame::new(9, 9);
        frame.put_pixel(4, 4, Rgb([255, 255, 255]));

        let output = GaussianBlurConfig::new().with_radius(2).apply(&frame);
        let center = output.get_pixel(4, 4)[0];
        let near = output.get_pixel(5, 4)[0];

        assert!(center < 255);
        assert!(near > 0);
        assert!(center > near);
        assert_eq!(output.get_pixel(0, 0)[0], 0);
    }
}

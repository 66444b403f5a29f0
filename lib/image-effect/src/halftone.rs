use crate::{Effect, Frame, colour_space::luminance, is_empty};
use derivative::Derivative;
use derive_setters::Setters;
use image::Rgb;
use imageproc::drawing::draw_filled_circle_mut;

/// Grayscale dot screen on a black canvas.
///
/// The frame is walked in a grid of `cell_size` pixels starting at the
/// origin. At each grid point the luminance of that single pixel is read and
/// a filled gray dot of radius `cell_size / 2` is drawn centred on it. Later
/// dots overwrite earlier ones where they overlap.
///
/// Cell size 1 gives radius 0 and each dot is the single sampled pixel.
/// Cell sizes 2 and 3 give radius 1, which the raster circle draws as a
/// 5-pixel plus sign rather than a disc.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct HalftoneConfig {
    /// 1..=50 pixels
    #[derivative(Default(value = "5"))]
    pub cell_size: u32,
}

impl HalftoneConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dot_radius(&self) -> u32 {
        self.cell_size.max(1) / 2
    }

    /// Grid points visited for a `width x height` frame, row by row.
    pub fn sample_points(&self, width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
        let step = self.cell_size.max(1) as usize;
        (0..height)
            .step_by(step)
            .flat_map(move |y| (0..width).step_by(step).map(move |x| (x, y)))
    }
}

impl Effect for HalftoneConfig {
    fn apply(&self, frame: &Frame) -> Frame {
        let mut canvas = Frame::new(frame.width(), frame.height());
        if is_empty(frame) {
            return canvas;
        }

        let radius = self.dot_radius();
        for (x, y) in self.sample_points(frame.width(), frame.height()) {
            let gray = luminance(frame.get_pixel(x, y));
            let color = Rgb([gray, gray, gray]);

            if radius == 0 {
                canvas.put_pixel(x, y, color);
            } else {
                draw_filled_circle_mut(&mut canvas, (x as i32, y as i32), radius as i32, color);
            }
        }

        canvas
    }
}

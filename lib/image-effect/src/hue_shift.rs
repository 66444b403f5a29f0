use crate::{
    Effect, Frame,
    colour_space::{DEGREES_PER_STEP, HUE_STEPS, hsv_to_rgb, rgb_to_hsv},
    is_empty,
};
use derivative::Derivative;
use derive_setters::Setters;
use image::Rgb;
use rayon::prelude::*;

/// Rotates the hue of every pixel, leaving saturation and value alone.
///
/// Negative offsets rotate the other way, so shifting by `+h` then `-h`
/// restores the frame up to conversion rounding.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct HueShiftConfig {
    #[derivative(Default(value = "0"))]
    pub degrees: i32,
}

impl HueShiftConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> u8 {
        hue_steps(self.degrees)
    }
}

/// Maps an offset in degrees onto the `[0, 180)` hue scale.
pub fn hue_steps(degrees: i32) -> u8 {
    let steps = (degrees as f32 / DEGREES_PER_STEP).round() as i32;
    steps.rem_euclid(HUE_STEPS) as u8
}

/// Adds `steps` to `hue`, wrapping around the hue circle.
pub fn rotate_hue(hue: u8, steps: u8) -> u8 {
    ((hue as i32 + steps as i32).rem_euclid(HUE_STEPS)) as u8
}

impl Effect for HueShiftConfig {
    fn apply(&self, frame: &Frame) -> Frame {
        let steps = self.steps();
        if steps == 0 || is_empty(frame) {
            return frame.clone();
        }

        let mut output = frame.clone();
        let pixels: &mut [u8] = &mut output;

        pixels.par_chunks_exact_mut(3).for_each(|pixel| {
            let [h, s, v] = rgb_to_hsv(&Rgb([pixel[0], pixel[1], pixel[2]]));
            let shifted = hsv_to_rgb([rotate_hue(h, steps), s, v]);
            pixel.copy_from_slice(&shifted.0);
        });

        output
    }
}

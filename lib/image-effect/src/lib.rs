pub mod blur;
pub mod color_adjust;
pub mod colour_space;
pub mod halftone;
pub mod hue_shift;
pub mod params;
pub mod pipeline;
pub mod posterize;
pub mod sharpen;

pub use image::{Rgb, RgbImage};
pub use params::ParameterSet;
pub use pipeline::{Stage, active_stages, process};

/// One captured or processed image: three 8-bit channels in R, G, B order.
pub type Frame = RgbImage;

pub type ImageEffectResult<T> = Result<T, ImageEffectError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageEffectError {
    #[error("Empty frame: {width}x{height}")]
    EmptyFrame { width: u32, height: u32 },

    #[error("Frame buffer holds {actual} bytes, expected {expected}")]
    BufferMismatch { expected: usize, actual: usize },
}

/// A per-frame transform. Every implementation returns a freshly allocated
/// frame with the same dimensions as its input.
pub trait Effect {
    fn apply(&self, frame: &Frame) -> Frame;
}

/// Rejects frames no stage can work on.
pub fn validate_frame(frame: &Frame) -> ImageEffectResult<()> {
    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageEffectError::EmptyFrame { width, height });
    }

    let expected = width as usize * height as usize * 3;
    let actual = frame.as_raw().len();
    if actual != expected {
        return Err(ImageEffectError::BufferMismatch { expected, actual });
    }

    Ok(())
}

pub(crate) fn is_empty(frame: &Frame) -> bool {
    frame.width() == 0 || frame.height() == 0
}

pub(crate) fn row_stride(frame: &Frame) -> usize {
    frame.width() as usize * 3
}

use crate::{CameraError, CameraResult};
use fast_image_resize::{
    FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image as FastImage,
};
use image::RgbImage;

/// Largest size with the aspect ratio of `src` that fits inside `area`.
///
/// Both returned dimensions are at least 1.
pub fn fit_dimensions(src: (u32, u32), area: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = src;
    let (area_w, area_h) = area;
    if src_w == 0 || src_h == 0 || area_w == 0 || area_h == 0 {
        return (0, 0);
    }

    let scale = (area_w as f64 / src_w as f64).min(area_h as f64 / src_h as f64);
    let fit_w = ((src_w as f64 * scale).round() as u32).clamp(1, area_w);
    let fit_h = ((src_h as f64 * scale).round() as u32).clamp(1, area_h);

    (fit_w, fit_h)
}

/// Scales `frame` to fit a display area while keeping its aspect ratio.
pub fn fit_to_area(frame: RgbImage, area_width: u32, area_height: u32) -> CameraResult<RgbImage> {
    if area_width == 0 || area_height == 0 {
        return Err(CameraError::InvalidArea(area_width, area_height));
    }

    let (img_width, img_height) = frame.dimensions();
    if img_width == 0 || img_height == 0 {
        return Err(CameraError::ImageError(format!(
            "can not scale an empty frame ({img_width} x {img_height})"
        )));
    }

    let (scaled_width, scaled_height) =
        fit_dimensions((img_width, img_height), (area_width, area_height));

    if (scaled_width, scaled_height) == (img_width, img_height) {
        return Ok(frame);
    }

    let src = FastImage::from_vec_u8(img_width, img_height, frame.into_raw(), PixelType::U8x3)?;
    let mut dst = FastImage::new(scaled_width, scaled_height, PixelType::U8x3);

    let resize_options =
        ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));

    Resizer::new().resize(&src, &mut dst, &resize_options)?;

    RgbImage::from_raw(scaled_width, scaled_height, dst.into_vec())
        .ok_or(CameraError::ImageError("to RgbImage failed".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_fit_dimensions_keeps_aspect_ratio() {
        assert_eq!(fit_dimensions((1280, 720), (640, 640)), (640, 360));
        assert_eq!(fit_dimensions((720, 1280), (640, 640)), (360, 640));
        assert_eq!(fit_dimensions((100, 100), (800, 600)), (600, 600));
        assert_eq!(fit_dimensions((4000, 1), (100, 100)), (100, 1));
        assert_eq!(fit_dimensions((0, 10), (100, 100)), (0, 0));
    }

    #[test]
    fn test_fit_to_area() {
        let frame = RgbImage::from_pixel(64, 32, Rgb([200, 100, 50]));
        let scaled = fit_to_area(frame, 16, 16).unwrap();
        assert_eq!(scaled.dimensions(), (16, 8));

        let center = scaled.get_pixel(8, 4);
        assert!((center[0] as i32 - 200).abs() <= 2);
        assert!((center[1] as i32 - 100).abs() <= 2);
        assert!((center[2] as i32 - 50).abs() <= 2);
    }

    #[test]
    fn test_fit_to_area_same_size_is_passthrough() {
        let frame = RgbImage::from_pixel(40, 30, Rgb([1, 2, 3]));
        let scaled = fit_to_area(frame.clone(), 40, 30).unwrap();
        assert_eq!(scaled, frame);
    }

    #[test]
    fn test_zero_area_is_rejected() {
        let frame = RgbImage::new(4, 4);
        assert!(matches!(
            fit_to_area(frame, 0, 10),
            Err(CameraError::InvalidArea(0, 10))
        ));
    }
}

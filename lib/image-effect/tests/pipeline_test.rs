use image_effect::{
    Effect, Frame, ImageEffectError, ParameterSet, Rgb, active_stages,
    color_adjust::ColorAdjustConfig, hue_shift::HueShiftConfig, process,
};

fn test_pattern(width: u32, height: u32) -> Frame {
    Frame::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x + y) * 7 % 256) as u8,
        ])
    })
}

#[test]
fn test_mid_gray_with_defaults_is_unchanged() {
    let frame = Frame::from_pixel(32, 24, Rgb([128, 128, 128]));
    let output = process(&frame, &ParameterSet::default()).unwrap();
    assert_eq!(output, frame);
}

#[test]
fn test_defaults_leave_any_frame_unchanged() {
    let frame = test_pattern(40, 30);
    let output = process(&frame, &ParameterSet::default()).unwrap();
    assert_eq!(output, frame);
}

#[test]
fn test_neutral_color_adjust_is_identity() {
    let frame = test_pattern(64, 64);
    let output = ColorAdjustConfig::new()
        .with_brightness(128)
        .with_contrast(128)
        .apply(&frame);
    assert_eq!(output, frame);
}

#[test]
fn test_halftone_four_dots_on_white() {
    let frame = Frame::from_pixel(10, 10, Rgb([255, 255, 255]));
    let params = ParameterSet::default()
        .with_halftone_enabled(true)
        .with_halftone_cell_size(5);

    let output = process(&frame, &params).unwrap();
    assert_eq!(output.dimensions(), (10, 10));

    let white = Rgb([255, 255, 255]);
    let black = Rgb([0, 0, 0]);

    for (x, y) in [(0, 0), (5, 0), (0, 5), (5, 5)] {
        assert_eq!(output.get_pixel(x, y), &white, "dot at ({x}, {y})");
    }

    // between dots and past the last dot
    assert_eq!(output.get_pixel(3, 3), &black);
    assert_eq!(output.get_pixel(9, 9), &black);
    assert_eq!(output.get_pixel(9, 0), &black);

    for pixel in output.pixels() {
        assert!(pixel == &white || pixel == &black);
    }
}

#[test]
fn test_posterize_limits_palette() {
    let frame = test_pattern(50, 50);
    let params = ParameterSet::default().with_posterize_enabled(true);
    let output = process(&frame, &params).unwrap();

    for pixel in output.pixels() {
        assert!(pixel.0.iter().all(|&c| c == 0 || c == 255));
    }
}

#[test]
fn test_hue_shift_inverse_restores_frame() {
    let frame = Frame::from_fn(36, 8, |x, y| {
        // saturated hues around the circle at a few brightness levels
        let v = 120 + y * 16;
        let segment = x % 6;
        let ramp = (x * 42 % 256) as u32 * v / 255;
        let (r, g, b) = match segment {
            0 => (v, ramp, 30),
            1 => (ramp, v, 30),
            2 => (30, v, ramp),
            3 => (30, ramp, v),
            4 => (ramp, 30, v),
            _ => (v, 30, ramp),
        };
        Rgb([r as u8, g as u8, b as u8])
    });

    for degrees in [20, 90, 181, 350] {
        let shifted = HueShiftConfig::new().with_degrees(degrees).apply(&frame);
        let restored = HueShiftConfig::new().with_degrees(-degrees).apply(&shifted);

        for (a, b) in frame.pixels().zip(restored.pixels()) {
            for c in 0..3 {
                assert!(
                    (a[c] as i32 - b[c] as i32).abs() <= 12,
                    "{degrees}: {a:?} vs {b:?}"
                );
            }
        }
    }
}

#[test]
fn test_blur_keeps_dimensions() {
    let frame = test_pattern(13, 7);
    for radius in [1, 5, 20] {
        let params = ParameterSet::default().with_blur_radius(radius);
        let output = process(&frame, &params).unwrap();
        assert_eq!(output.dimensions(), frame.dimensions());
    }
}

#[test]
fn test_process_is_deterministic() {
    let frame = test_pattern(80, 60);
    let params = ParameterSet::default()
        .with_brightness(150)
        .with_contrast(170)
        .with_sharpness(35)
        .with_blur_radius(3)
        .with_hue(200)
        .with_posterize_enabled(true)
        .with_halftone_enabled(true)
        .with_halftone_cell_size(7);

    let first = process(&frame, &params).unwrap();
    let second = process(&frame, &params).unwrap();
    assert_eq!(first.as_raw(), second.as_raw());
    assert_eq!(active_stages(&params).len(), 6);
}

#[test]
fn test_malformed_frame_is_an_error() {
    let result = process(&Frame::new(16, 0), &ParameterSet::default());
    assert!(matches!(result, Err(ImageEffectError::EmptyFrame { .. })));
}

#[test]
fn test_input_frame_is_not_modified() {
    let frame = test_pattern(20, 20);
    let copy = frame.clone();
    let params = ParameterSet::default()
        .with_sharpness(50)
        .with_posterize_enabled(true);

    let _ = process(&frame, &params).unwrap();
    assert_eq!(frame, copy);
}

//! Colour conversions shared by the halftone and hue stages.
//!
//! HSV uses the 8-bit layout: hue in 2-degree steps on `[0, 180)`,
//! saturation and value on `[0, 255]`.

use image::Rgb;

/// Number of hue steps in a full turn.
pub const HUE_STEPS: i32 = 180;

/// Degrees covered by one hue step.
pub const DEGREES_PER_STEP: f32 = 2.0;

const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899; // 0.299 * 2^14
const LUMA_G: u32 = 9617; // 0.587 * 2^14
const LUMA_B: u32 = 1868; // 0.114 * 2^14

/// `0.299 R + 0.587 G + 0.114 B`, rounded.
pub fn luminance(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    let sum = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
    ((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

pub fn rgb_to_hsv(pixel: &Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = pixel.0.map(i32::from);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let saturation = if max == 0 {
        0
    } else {
        (255 * delta + max / 2) / max
    };

    let hue = if delta == 0 {
        0
    } else {
        let delta = delta as f32;
        let mut degrees = if max == r {
            60.0 * (g - b) as f32 / delta
        } else if max == g {
            120.0 + 60.0 * (b - r) as f32 / delta
        } else {
            240.0 + 60.0 * (r - g) as f32 / delta
        };

        if degrees < 0.0 {
            degrees += 360.0;
        }

        ((degrees / DEGREES_PER_STEP).round() as i32).rem_euclid(HUE_STEPS)
    };

    [hue as u8, saturation as u8, max as u8]
}

pub fn hsv_to_rgb(hsv: [u8; 3]) -> Rgb<u8> {
    let [h, s, v] = hsv;
    if s == 0 {
        return Rgb([v, v, v]);
    }

    let degrees = (h as i32).rem_euclid(HUE_STEPS) as f32 * DEGREES_PER_STEP;
    let s = s as f32 / 255.0;
    let v = v as f32;

    let sector = degrees / 60.0;
    let index = sector.floor();
    let fraction = sector - index;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * fraction);
    let t = v * (1.0 - s * (1.0 - fraction));

    let (r, g, b) = match index as i32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb([to_channel(r), to_channel(g), to_channel(b)])
}

fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

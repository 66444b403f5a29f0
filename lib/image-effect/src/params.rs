use derivative::Derivative;
use derive_setters::Setters;

pub const BRIGHTNESS_RANGE: (u32, u32) = (0, 255);
pub const CONTRAST_RANGE: (u32, u32) = (0, 255);
pub const SHARPNESS_RANGE: (u32, u32) = (0, 100);
pub const BLUR_RADIUS_RANGE: (u32, u32) = (0, 20);
pub const HUE_RANGE: (u32, u32) = (0, 360);
pub const HALFTONE_CELL_SIZE_RANGE: (u32, u32) = (1, 50);

/// Neutral value for brightness and contrast.
pub const NEUTRAL_LEVEL: u32 = 128;

/// Every adjustable value for one processing tick.
///
/// The set is a plain value: the pipeline receives a copy and never writes
/// back. Use [`ParameterSet::clamped`] to force fields into their ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
pub struct ParameterSet {
    /// 0..=255, 128 leaves brightness unchanged
    #[derivative(Default(value = "NEUTRAL_LEVEL"))]
    pub brightness: u32,

    /// 0..=255, 128 is unity gain
    #[derivative(Default(value = "NEUTRAL_LEVEL"))]
    pub contrast: u32,

    /// 0..=100, 0 disables the sharpen stage
    #[derivative(Default(value = "0"))]
    pub sharpness: u32,

    /// 0..=20 pixels, 0 disables the blur stage
    #[derivative(Default(value = "0"))]
    pub blur_radius: u32,

    /// 0..=360 degrees
    #[derivative(Default(value = "0"))]
    pub hue: u32,

    /// 1..=50 pixels
    #[derivative(Default(value = "5"))]
    pub halftone_cell_size: u32,

    #[derivative(Default(value = "false"))]
    pub posterize_enabled: bool,

    #[derivative(Default(value = "false"))]
    pub halftone_enabled: bool,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clamped(&self) -> Self {
        Self {
            brightness: clamp_to(self.brightness, BRIGHTNESS_RANGE),
            contrast: clamp_to(self.contrast, CONTRAST_RANGE),
            sharpness: clamp_to(self.sharpness, SHARPNESS_RANGE),
            blur_radius: clamp_to(self.blur_radius, BLUR_RADIUS_RANGE),
            hue: clamp_to(self.hue, HUE_RANGE),
            halftone_cell_size: clamp_to(self.halftone_cell_size, HALFTONE_CELL_SIZE_RANGE),
            ..*self
        }
    }

    pub fn sharpen_active(&self) -> bool {
        self.sharpness > 0
    }

    pub fn blur_active(&self) -> bool {
        self.blur_radius > 0
    }

    /// True when running the pipeline leaves every frame untouched.
    pub fn is_identity(&self) -> bool {
        let params = self.clamped();
        params.brightness == NEUTRAL_LEVEL
            && params.contrast == NEUTRAL_LEVEL
            && !params.sharpen_active()
            && !params.blur_active()
            && !params.posterize_enabled
            && !params.halftone_enabled
            && crate::hue_shift::hue_steps(params.hue as i32) == 0
    }
}

/// Clamps a possibly out-of-range control value into `range`.
pub fn clamp_input(value: i64, range: (u32, u32)) -> u32 {
    value.clamp(range.0 as i64, range.1 as i64) as u32
}

fn clamp_to(value: u32, range: (u32, u32)) -> u32 {
    value.clamp(range.0, range.1)
}

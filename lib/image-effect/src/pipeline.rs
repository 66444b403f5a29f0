use crate::{
    Effect, Frame, ImageEffectResult, ParameterSet, blur::GaussianBlurConfig,
    color_adjust::ColorAdjustConfig, halftone::HalftoneConfig, hue_shift::HueShiftConfig,
    posterize::PosterizeConfig, sharpen::SharpenConfig, validate_frame,
};

/// Processing stages in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    ColorAdjust,
    Sharpen,
    Blur,
    Posterize,
    Halftone,
    HueShift,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::ColorAdjust => "Color Adjust",
            Stage::Sharpen => "Sharpen",
            Stage::Blur => "Blur",
            Stage::Posterize => "Posterize",
            Stage::Halftone => "Halftone",
            Stage::HueShift => "Hue Shift",
        }
    }

    pub fn all_stages() -> &'static [Stage] {
        &[
            Stage::ColorAdjust,
            Stage::Sharpen,
            Stage::Blur,
            Stage::Posterize,
            Stage::Halftone,
            Stage::HueShift,
        ]
    }

    pub fn is_active(&self, params: &ParameterSet) -> bool {
        match self {
            Stage::ColorAdjust | Stage::HueShift => true,
            Stage::Sharpen => params.sharpen_active(),
            Stage::Blur => params.blur_active(),
            Stage::Posterize => params.posterize_enabled,
            Stage::Halftone => params.halftone_enabled,
        }
    }

    pub fn apply(&self, frame: &Frame, params: &ParameterSet) -> Frame {
        match self {
            Stage::ColorAdjust => ColorAdjustConfig::new()
                .with_brightness(params.brightness)
                .with_contrast(params.contrast)
                .apply(frame),

            Stage::Sharpen => SharpenConfig::new()
                .with_sharpness(params.sharpness)
                .apply(frame),

            Stage::Blur => GaussianBlurConfig::new()
                .with_radius(params.blur_radius)
                .apply(frame),

            Stage::Posterize => PosterizeConfig::new().apply(frame),

            Stage::Halftone => HalftoneConfig::new()
                .with_cell_size(params.halftone_cell_size)
                .apply(frame),

            Stage::HueShift => HueShiftConfig::new()
                .with_degrees(params.hue as i32)
                .apply(frame),
        }
    }
}

/// Stages that run for `params`, in execution order.
pub fn active_stages(params: &ParameterSet) -> Vec<Stage> {
    let params = params.clamped();
    Stage::all_stages()
        .iter()
        .copied()
        .filter(|stage| stage.is_active(&params))
        .collect()
}

/// Runs one frame through every active stage.
///
/// `params` is clamped first, so out-of-range values never fail. Only a
/// malformed frame is an error; the caller is expected to skip it.
pub fn process(frame: &Frame, params: &ParameterSet) -> ImageEffectResult<Frame> {
    validate_frame(frame)?;

    let params = params.clamped();
    let output = Stage::all_stages()
        .iter()
        .fold(frame.clone(), |output, stage| {
            if stage.is_active(&params) {
                stage.apply(&output, &params)
            } else {
                log::trace!("bypass {} stage", stage.name());
                output
            }
        });

    Ok(output)
}

use crate::{Effect, Frame, params::NEUTRAL_LEVEL};
use derivative::Derivative;
use derive_setters::Setters;

/// Linear brightness/contrast adjustment:
/// `v' = clamp(v * contrast / 128 + (brightness - 128), 0, 255)`
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct ColorAdjustConfig {
    #[derivative(Default(value = "NEUTRAL_LEVEL"))]
    pub brightness: u32,

    #[derivative(Default(value = "NEUTRAL_LEVEL"))]
    pub contrast: u32,
}

impl ColorAdjustConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_identity(&self) -> bool {
        self.brightness == NEUTRAL_LEVEL && self.contrast == NEUTRAL_LEVEL
    }

    fn lookup_table(&self) -> [u8; 256] {
        let gain = self.contrast as f32 / NEUTRAL_LEVEL as f32;
        let offset = self.brightness as f32 - NEUTRAL_LEVEL as f32;

        let mut table = [0u8; 256];
        for (value, entry) in table.iter_mut().enumerate() {
            *entry = (value as f32 * gain + offset).round().clamp(0.0, 255.0) as u8;
        }
        table
    }
}

impl Effect for ColorAdjustConfig {
    fn apply(&self, frame: &Frame) -> Frame {
        if self.is_identity() {
            return frame.clone();
        }

        let table = self.lookup_table();
        let mut output = frame.clone();
        for channel in output.iter_mut() {
            *channel = table[*channel as usize];
        }
        output
    }
}

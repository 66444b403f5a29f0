use crate::{Effect, Frame, is_empty};
use derivative::Derivative;
use derive_setters::Setters;
use rayon::prelude::*;

/// Two-tone poster look: blue and red are boosted, green is cut, then every
/// channel is thresholded to 0 or 255.
///
/// The green cut is part of the look and not a mirror of the boost.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct PosterizeConfig {
    /// Added to the red and blue channels before thresholding
    #[derivative(Default(value = "50"))]
    pub boost: u8,

    /// Subtracted from the green channel before thresholding
    #[derivative(Default(value = "30"))]
    pub green_cut: u8,

    /// Values strictly above this become 255, the rest 0
    #[derivative(Default(value = "150"))]
    pub threshold: u8,
}

impl PosterizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    fn binarize(&self, value: u8) -> u8 {
        if value > self.threshold { 255 } else { 0 }
    }

    fn lookup_tables(&self) -> [[u8; 256]; 3] {
        let mut tables = [[0u8; 256]; 3];
        for value in 0..=255u8 {
            let i = value as usize;
            tables[0][i] = self.binarize(value.saturating_add(self.boost));
            tables[1][i] = self.binarize(value.saturating_sub(self.green_cut));
            tables[2][i] = self.binarize(value.saturating_add(self.boost));
        }
        tables
    }
}

impl Effect for PosterizeConfig {
    fn apply(&self, frame: &Frame) -> Frame {
        if is_empty(frame) {
            return frame.clone();
        }

        // indexed by R, G, B
        let tables = self.lookup_tables();
        let mut output = frame.clone();
        let pixels: &mut [u8] = &mut output;

        pixels.par_chunks_exact_mut(3).for_each(|pixel| {
            for (channel, table) in pixel.iter_mut().zip(tables.iter()) {
                *channel = table[*channel as usize];
            }
        });

        output
    }
}

use image_effect::{
    ParameterSet,
    params::{
        BLUR_RADIUS_RANGE, BRIGHTNESS_RANGE, CONTRAST_RANGE, HALFTONE_CELL_SIZE_RANGE, HUE_RANGE,
        SHARPNESS_RANGE, clamp_input,
    },
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Parameter store written by UI controls and read once per tick.
///
/// Clones share the same values. Every setter clamps its input into the
/// documented range instead of failing.
#[derive(Debug, Clone, Default)]
pub struct SharedParameters {
    inner: Arc<Mutex<ParameterSet>>,
}

impl SharedParameters {
    pub fn new(params: ParameterSet) -> Self {
        Self {
            inner: Arc::new(Mutex::new(params.clamped())),
        }
    }

    /// Copy of the whole set, taken under one lock.
    pub fn snapshot(&self) -> ParameterSet {
        *self.lock()
    }

    pub fn replace(&self, params: ParameterSet) {
        *self.lock() = params.clamped();
    }

    pub fn set_brightness(&self, value: i64) {
        let value = clamp_logged("brightness", value, BRIGHTNESS_RANGE);
        self.lock().brightness = value;
    }

    pub fn set_contrast(&self, value: i64) {
        let value = clamp_logged("contrast", value, CONTRAST_RANGE);
        self.lock().contrast = value;
    }

    pub fn set_sharpness(&self, value: i64) {
        let value = clamp_logged("sharpness", value, SHARPNESS_RANGE);
        self.lock().sharpness = value;
    }

    pub fn set_blur(&self, value: i64) {
        let value = clamp_logged("blur", value, BLUR_RADIUS_RANGE);
        self.lock().blur_radius = value;
    }

    pub fn set_hue(&self, value: i64) {
        let value = clamp_logged("hue", value, HUE_RANGE);
        self.lock().hue = value;
    }

    pub fn set_halftone_cell_size(&self, value: i64) {
        let value = clamp_logged("halftone cell size", value, HALFTONE_CELL_SIZE_RANGE);
        self.lock().halftone_cell_size = value;
    }

    pub fn set_posterize(&self, enabled: bool) {
        self.lock().posterize_enabled = enabled;
    }

    pub fn set_halftone(&self, enabled: bool) {
        self.lock().halftone_enabled = enabled;
    }

    /// Flips the posterize flag and returns the new state.
    pub fn toggle_posterize(&self) -> bool {
        let mut params = self.lock();
        params.posterize_enabled = !params.posterize_enabled;
        params.posterize_enabled
    }

    /// Flips the halftone flag and returns the new state.
    pub fn toggle_halftone(&self) -> bool {
        let mut params = self.lock();
        params.halftone_enabled = !params.halftone_enabled;
        params.halftone_enabled
    }

    // A panic while holding the lock cannot leave a half-written set:
    // every write is a single field or a whole copy.
    fn lock(&self) -> MutexGuard<'_, ParameterSet> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn clamp_logged(name: &str, value: i64, range: (u32, u32)) -> u32 {
    let clamped = clamp_input(value, range);
    if clamped as i64 != value {
        log::debug!("{name} {value} out of range, clamped to {clamped}");
    }
    clamped
}

use crate::Frame;
use camera::fit_to_area;

/// Receives every processed frame, in R, G, B order and any size.
pub trait PresentationSink {
    fn present(&mut self, frame: Frame);
}

impl<F: FnMut(Frame)> PresentationSink for F {
    fn present(&mut self, frame: Frame) {
        self(frame)
    }
}

/// Scales frames to fit a display area, keeping the aspect ratio, before
/// handing them on.
pub struct ScaledSink<S> {
    inner: S,
    area: (u32, u32),
}

impl<S: PresentationSink> ScaledSink<S> {
    pub fn new(inner: S, area_width: u32, area_height: u32) -> Self {
        Self {
            inner,
            area: (area_width, area_height),
        }
    }

    /// The display area changed, e.g. the preview widget was resized.
    pub fn set_area(&mut self, area_width: u32, area_height: u32) {
        self.area = (area_width, area_height);
    }

    pub fn area(&self) -> (u32, u32) {
        self.area
    }
}

impl<S: PresentationSink> PresentationSink for ScaledSink<S> {
    fn present(&mut self, frame: Frame) {
        let (width, height) = self.area;
        match fit_to_area(frame, width, height) {
            Ok(frame) => self.inner.present(frame),
            Err(e) => log::warn!("scale frame to {width} x {height} failed. {e}"),
        }
    }
}

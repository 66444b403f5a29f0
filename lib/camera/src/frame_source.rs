use crate::CameraResult;
use image::RgbImage;

/// Anything that hands out camera frames, one per call.
///
/// `open` is called once before the first frame is requested; failing there
/// means the device is unusable and the session must not start. After that,
/// `try_next_frame` returns `Ok(None)` when no new frame is ready yet and an
/// error for a transient read failure. Dropping the source releases the
/// device.
pub trait FrameSource {
    fn open(&mut self) -> CameraResult<()> {
        Ok(())
    }

    fn try_next_frame(&mut self) -> CameraResult<Option<RgbImage>>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn open(&mut self) -> CameraResult<()> {
        (**self).open()
    }

    fn try_next_frame(&mut self) -> CameraResult<Option<RgbImage>> {
        (**self).try_next_frame()
    }
}

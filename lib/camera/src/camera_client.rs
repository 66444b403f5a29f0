use crate::{CameraError, CameraResult, FrameSource};
use derivative::Derivative;
use derive_setters::Setters;
use image::RgbImage;
use nokhwa::{
    Buffer, CallbackCamera,
    pixel_format::RgbFormat,
    utils::{CameraIndex, RequestedFormat, RequestedFormatType, Resolution},
};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct CameraConfig {
    #[derivative(Default(value = "None"))]
    #[setters[strip_option]]
    pub fps: Option<u32>,

    #[derivative(Default(value = "None"))]
    #[setters[strip_option]]
    pub width: Option<u32>,

    #[derivative(Default(value = "None"))]
    #[setters[strip_option]]
    pub height: Option<u32>,
}

/// A native camera delivering RGB frames.
///
/// The stream is stopped when the client is dropped.
pub struct CameraClient {
    camera: Option<CallbackCamera>,
    is_running: Arc<AtomicBool>,
}

impl CameraClient {
    pub fn new(camera_index: CameraIndex, config: CameraConfig) -> CameraResult<Self> {
        let format = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);

        let mut camera = CallbackCamera::new(camera_index, format, move |_| {})
            .map_err(|e| CameraError::DeviceUnavailable(e.to_string()))?;

        if let Some(fps) = config.fps
            && let Err(e) = camera.set_frame_rate(fps)
        {
            log::warn!("camera set frame rate ({fps}) failed: {e}");
        }

        if let Some(w) = config.width
            && let Some(h) = config.height
            && let Err(e) = camera.set_resolution(Resolution::new(w, h))
        {
            log::warn!("camera set resolution ({w} x {h}) failed: {e}");
        }

        Ok(Self {
            camera: Some(camera),
            is_running: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn start(&mut self) -> CameraResult<()> {
        if let Some(ref mut camera) = self.camera {
            camera
                .open_stream()
                .map_err(|e| CameraError::StartError(e.to_string()))?;
            self.is_running.store(true, Ordering::Relaxed);
            Ok(())
        } else {
            Err(CameraError::DeviceUnavailable(
                "Camera not initialized".to_string(),
            ))
        }
    }

    pub fn stop(&mut self) -> CameraResult<()> {
        if let Some(ref mut camera) = self.camera {
            camera
                .stop_stream()
                .map_err(|e| CameraError::StopError(e.to_string()))?;
            self.is_running.store(false, Ordering::Relaxed);
            Ok(())
        } else {
            Err(CameraError::StopError("Camera not initialized".to_string()))
        }
    }

    /// Most recent frame of the stream, `NoFrameAvailable` until the first
    /// one has been captured.
    pub fn last_frame(&self) -> CameraResult<RgbImage> {
        match self.camera {
            Some(ref c) => {
                let buffer = c
                    .last_frame()
                    .map_err(|e| CameraError::FrameReadFailure(e.to_string()))?;

                decode_frame(&buffer)
            }
            None => Err(CameraError::DeviceUnavailable("No camera".to_string())),
        }
    }

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }
}

// The callback camera starts out with an empty placeholder buffer.
fn decode_frame(buffer: &Buffer) -> CameraResult<RgbImage> {
    let resolution = buffer.resolution();
    if buffer.buffer().is_empty() || resolution.width() == 0 || resolution.height() == 0 {
        return Err(CameraError::NoFrameAvailable);
    }

    buffer
        .decode_image::<RgbFormat>()
        .map_err(|e| CameraError::FrameReadFailure(e.to_string()))
}

impl FrameSource for CameraClient {
    fn open(&mut self) -> CameraResult<()> {
        if self.is_running() {
            return Ok(());
        }

        self.start()
            .map_err(|e| CameraError::DeviceUnavailable(e.to_string()))
    }

    fn try_next_frame(&mut self) -> CameraResult<Option<RgbImage>> {
        match self.last_frame() {
            Ok(frame) if frame.is_empty() => Ok(None),
            Ok(frame) => Ok(Some(frame)),
            Err(CameraError::NoFrameAvailable) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl Drop for CameraClient {
    fn drop(&mut self) {
        if self.is_running() {
            match self.stop() {
                Ok(_) => log::info!("camera stream stopped"),
                Err(e) => log::warn!("{e}"),
            }
        }
    }
}

pub mod camera_client;
pub mod camera_info;
pub mod fit;
pub mod frame_source;

pub use camera_client::{CameraClient, CameraConfig};
pub use camera_info::{CameraInfo, first_camera_id, query_available_cameras, query_camera_id};
pub use fit::{fit_dimensions, fit_to_area};
pub use frame_source::FrameSource;
pub use image::{Rgb, RgbImage};
pub use nokhwa::utils::CameraIndex;

pub type CameraResult<T> = Result<T, CameraError>;

#[derive(thiserror::Error, Debug)]
pub enum CameraError {
    #[error("Camera unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Failed to start camera: {0}")]
    StartError(String),

    #[error("Failed to stop camera: {0}")]
    StopError(String),

    #[error("Failed to read frame: {0}")]
    FrameReadFailure(String),

    #[error("No frame available")]
    NoFrameAvailable,

    #[error("Invalid display area: {0}x{1}")]
    InvalidArea(u32, u32),

    #[error("Image processing error: {0}")]
    ImageError(String),

    #[error("Fast image buffer error: {0}")]
    FastImageBufferError(#[from] fast_image_resize::ImageBufferError),

    #[error("Fast image resize error: {0}")]
    FastImageResizeError(#[from] fast_image_resize::ResizeError),

    #[error("Camera error: {0}")]
    NokhwaError(#[from] nokhwa::NokhwaError),
}

pub fn init() {
    #[cfg(target_os = "macos")]
    nokhwa::nokhwa_initialize(|granted| {
        log::info!("User said {} for nokhwa", granted);
    });
}

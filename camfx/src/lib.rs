pub mod controller;
pub mod session;
pub mod sink;

pub use controller::SharedParameters;
pub use image_effect::{Frame, ParameterSet};
pub use session::{PreviewSession, SessionConfig, SessionStats};
pub use sink::{PresentationSink, ScaledSink};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("Camera unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Frame read failure: {0}")]
    FrameReadFailure(String),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] image_effect::ImageEffectError),

    #[error("Failed to spawn acquisition thread: {0}")]
    ThreadSpawn(std::io::Error),
}

pub fn init_logger() {
    _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

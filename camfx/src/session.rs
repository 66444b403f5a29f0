use crate::{Frame, PresentationSink, SessionError, SessionResult, SharedParameters};
use camera::{CameraClient, CameraConfig, FrameSource, first_camera_id, query_camera_id};
use crossbeam::channel::{Receiver, RecvTimeoutError, Sender, bounded};
use derivative::Derivative;
use derive_setters::Setters;
use image_effect::{ParameterSet, active_stages, process, validate_frame};
use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct SessionConfig {
    /// Time between two acquisition ticks (30 ms is roughly 33 FPS)
    #[derivative(Default(value = "Duration::from_millis(30)"))]
    pub tick: Duration,

    /// Camera to open by name, the first working one when unset
    #[derivative(Default(value = "None"))]
    #[setters[strip_option]]
    pub camera_name: Option<String>,

    #[derivative(Default(value = "None"))]
    #[setters[strip_option]]
    pub fps: Option<u32>,

    #[derivative(Default(value = "None"))]
    #[setters[strip_option]]
    pub width: Option<u32>,

    #[derivative(Default(value = "None"))]
    #[setters[strip_option]]
    pub height: Option<u32>,

    /// Consecutive failed ticks before a warning is logged
    #[derivative(Default(value = "30"))]
    pub persistent_failure_ticks: u32,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    fn camera_config(&self) -> CameraConfig {
        let mut config = CameraConfig::default();
        if let Some(fps) = self.fps {
            config = config.with_fps(fps);
        }
        if let Some(w) = self.width
            && let Some(h) = self.height
        {
            config = config.with_width(w).with_height(h);
        }
        config
    }
}

#[derive(Debug, Default)]
pub struct SessionStats {
    presented: AtomicU64,
    skipped: AtomicU64,
}

impl SessionStats {
    pub fn presented(&self) -> u64 {
        self.presented.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }
}

/// A running camera preview: one acquisition thread that reads, processes
/// and presents a frame per tick.
///
/// The session owns the frame source. Stopping (or dropping) the session
/// ends the loop before its next tick and releases the source on the
/// acquisition thread; no frame is presented after [`PreviewSession::stop`]
/// returns.
pub struct PreviewSession {
    stop_sender: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
    stats: Arc<SessionStats>,
}

impl PreviewSession {
    /// Opens a native camera and starts previewing it.
    pub fn open_camera<K>(
        sink: K,
        params: SharedParameters,
        config: SessionConfig,
    ) -> SessionResult<Self>
    where
        K: PresentationSink + Send + 'static,
    {
        camera::init();

        let camera_id = match config.camera_name {
            Some(ref name) => query_camera_id(name),
            None => first_camera_id(),
        }
        .map_err(|e| SessionError::DeviceUnavailable(e.to_string()))?;

        let client = CameraClient::new(camera_id, config.camera_config())
            .map_err(|e| SessionError::DeviceUnavailable(e.to_string()))?;

        Self::start(client, sink, params, config)
    }

    pub fn start<S, K>(
        mut source: S,
        sink: K,
        params: SharedParameters,
        config: SessionConfig,
    ) -> SessionResult<Self>
    where
        S: FrameSource + Send + 'static,
        K: PresentationSink + Send + 'static,
    {
        source
            .open()
            .map_err(|e| SessionError::DeviceUnavailable(e.to_string()))?;

        let (tx, rx) = bounded(1);
        let stats = Arc::new(SessionStats::default());

        let worker = thread::Builder::new()
            .name("camfx-acquisition".to_string())
            .spawn({
                let stats = stats.clone();
                move || acquisition_loop(source, sink, params, config, rx, stats)
            })
            .map_err(SessionError::ThreadSpawn)?;

        log::info!("preview session started");

        Ok(Self {
            stop_sender: Some(tx),
            worker: Some(worker),
            stats,
        })
    }

    /// Ends the session and waits for the camera to be released.
    pub fn stop(&mut self) {
        if let Some(sender) = self.stop_sender.take() {
            // the worker also stops when the channel disconnects
            _ = sender.try_send(());
        }

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("acquisition thread panicked");
            }
            log::info!(
                "preview session stopped: {} frames presented, {} skipped",
                self.stats.presented(),
                self.stats.skipped()
            );
        }
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }
}

impl Drop for PreviewSession {
    fn drop(&mut self) {
        self.stop();
    }
}

fn acquisition_loop<S, K>(
    mut source: S,
    mut sink: K,
    params: SharedParameters,
    config: SessionConfig,
    stop_receiver: Receiver<()>,
    stats: Arc<SessionStats>,
) where
    S: FrameSource,
    K: PresentationSink,
{
    let mut failures = FailureStreak::default();
    let mut last_params: Option<ParameterSet> = None;
    let mut next_tick = Instant::now() + config.tick;

    loop {
        match stop_receiver.recv_deadline(next_tick) {
            Err(RecvTimeoutError::Timeout) => (),
            Ok(_) | Err(RecvTimeoutError::Disconnected) => break,
        }
        next_tick = (next_tick + config.tick).max(Instant::now());

        let snapshot = params.snapshot();
        if last_params != Some(snapshot) {
            let stages = active_stages(&snapshot)
                .iter()
                .map(|stage| stage.name())
                .collect::<Vec<_>>();
            log::debug!("active stages: {}", stages.join(" -> "));
            last_params = Some(snapshot);
        }

        match tick(&mut source, &snapshot) {
            Ok(frame) => {
                failures.reset();
                sink.present(frame);
                stats.presented.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                stats.skipped.fetch_add(1, Ordering::Relaxed);

                if failures.record(config.persistent_failure_ticks) {
                    log::warn!("no frame for {} ticks. {e}", failures.count);
                } else {
                    log::debug!("skip tick. {e}");
                }
            }
        }
    }

    drop(source);
    log::info!("camera thread exit...");
}

/// Consecutive failed ticks; reports a persistent failure once per streak.
#[derive(Debug, Default)]
struct FailureStreak {
    count: u32,
    warned: bool,
}

impl FailureStreak {
    /// Counts one failure and returns true when the streak first reaches
    /// `threshold`.
    fn record(&mut self, threshold: u32) -> bool {
        self.count = self.count.saturating_add(1);
        if !self.warned && self.count >= threshold {
            self.warned = true;
            return true;
        }
        false
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

fn tick<S: FrameSource>(source: &mut S, params: &ParameterSet) -> SessionResult<Frame> {
    let frame = source
        .try_next_frame()
        .map_err(|e| SessionError::FrameReadFailure(e.to_string()))?
        .ok_or_else(|| SessionError::FrameReadFailure("No frame available".to_string()))?;

    validate_frame(&frame).map_err(|e| SessionError::FrameReadFailure(e.to_string()))?;

    Ok(process(&frame, params)?)
}

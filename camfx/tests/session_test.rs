use camera::{CameraError, CameraResult, FrameSource};
use camfx::{Frame, ParameterSet, PreviewSession, SessionConfig, SessionError, SharedParameters};
use crossbeam::channel::{Receiver, unbounded};
use image_effect::Rgb;
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    thread,
    time::{Duration, Instant},
};

const WAIT: Duration = Duration::from_secs(5);

/// Yields solid frames; every `fail_every`-th read fails when set.
struct FakeCamera {
    color: [u8; 3],
    reads: Arc<AtomicUsize>,
    released: Arc<AtomicBool>,
    fail_every: Option<usize>,
    open_fails: bool,
}

impl FakeCamera {
    fn new() -> Self {
        Self {
            color: [128, 128, 128],
            reads: Arc::new(AtomicUsize::new(0)),
            released: Arc::new(AtomicBool::new(false)),
            fail_every: None,
            open_fails: false,
        }
    }
}

impl FrameSource for FakeCamera {
    fn open(&mut self) -> CameraResult<()> {
        if self.open_fails {
            Err(CameraError::DeviceUnavailable("fake camera busy".to_string()))
        } else {
            Ok(())
        }
    }

    fn try_next_frame(&mut self) -> CameraResult<Option<Frame>> {
        let n = self.reads.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(every) = self.fail_every
            && n % every == 0
        {
            return Err(CameraError::FrameReadFailure("fake glitch".to_string()));
        }

        Ok(Some(Frame::from_pixel(8, 6, Rgb(self.color))))
    }
}

impl Drop for FakeCamera {
    fn drop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

fn fast_config() -> SessionConfig {
    SessionConfig::new().with_tick(Duration::from_millis(2))
}

fn wait_for_frames(rx: &Receiver<Frame>, count: usize) -> Vec<Frame> {
    let deadline = Instant::now() + WAIT;
    let mut frames = Vec::new();
    while frames.len() < count {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(frame) => frames.push(frame),
            Err(_) => panic!("only {} of {count} frames arrived", frames.len()),
        }
    }
    frames
}

#[test]
fn test_session_presents_processed_frames() {
    let (tx, rx) = unbounded();
    let params = SharedParameters::default();

    let mut session = PreviewSession::start(
        FakeCamera::new(),
        move |frame: Frame| {
            _ = tx.send(frame);
        },
        params,
        fast_config(),
    )
    .unwrap();

    let frames = wait_for_frames(&rx, 3);
    session.stop();

    for frame in frames {
        assert_eq!(frame.dimensions(), (8, 6));
        assert!(frame.pixels().all(|p| p == &Rgb([128, 128, 128])));
    }
    assert!(session.stats().presented() >= 3);
}

#[test]
fn test_parameter_updates_apply_on_next_ticks() {
    let (tx, rx) = unbounded();
    let params = SharedParameters::default();

    let mut session = PreviewSession::start(
        FakeCamera::new(),
        move |frame: Frame| {
            _ = tx.send(frame);
        },
        params.clone(),
        fast_config(),
    )
    .unwrap();

    wait_for_frames(&rx, 1);
    params.set_brightness(148);

    let deadline = Instant::now() + WAIT;
    loop {
        let frame = wait_for_frames(&rx, 1).remove(0);
        if frame.get_pixel(0, 0) == &Rgb([148, 148, 148]) {
            break;
        }
        assert_eq!(frame.get_pixel(0, 0), &Rgb([128, 128, 128]));
        assert!(Instant::now() < deadline, "brightness change never applied");
    }

    session.stop();
}

#[test]
fn test_stop_releases_camera_and_ends_presentation() {
    let (tx, rx) = unbounded();
    let camera = FakeCamera::new();
    let released = camera.released.clone();
    let reads = camera.reads.clone();

    let mut session = PreviewSession::start(
        camera,
        move |frame: Frame| {
            _ = tx.send(frame);
        },
        SharedParameters::default(),
        fast_config(),
    )
    .unwrap();

    wait_for_frames(&rx, 2);
    assert!(session.is_running());

    session.stop();
    assert!(released.load(Ordering::SeqCst));
    assert!(!session.is_running());

    let reads_after_stop = reads.load(Ordering::SeqCst);
    let presented_after_stop = session.stats().presented();
    thread::sleep(Duration::from_millis(20));
    assert_eq!(reads.load(Ordering::SeqCst), reads_after_stop);
    assert_eq!(session.stats().presented(), presented_after_stop);

    // stopping twice is harmless
    session.stop();
}

#[test]
fn test_drop_stops_session() {
    let camera = FakeCamera::new();
    let released = camera.released.clone();

    let session = PreviewSession::start(
        camera,
        |_: Frame| (),
        SharedParameters::default(),
        fast_config(),
    )
    .unwrap();

    thread::sleep(Duration::from_millis(10));
    drop(session);
    assert!(released.load(Ordering::SeqCst));
}

#[test]
fn test_open_failure_is_device_unavailable() {
    let mut camera = FakeCamera::new();
    camera.open_fails = true;
    let reads = camera.reads.clone();

    let result = PreviewSession::start(
        camera,
        |_: Frame| (),
        SharedParameters::default(),
        fast_config(),
    );

    assert!(matches!(result, Err(SessionError::DeviceUnavailable(_))));
    assert_eq!(reads.load(Ordering::SeqCst), 0);
}

#[test]
fn test_read_failures_are_skipped() {
    let (tx, rx) = unbounded();
    let mut camera = FakeCamera::new();
    camera.fail_every = Some(2);

    let mut session = PreviewSession::start(
        camera,
        move |frame: Frame| {
            _ = tx.send(frame);
        },
        SharedParameters::new(ParameterSet::new().with_posterize_enabled(true)),
        fast_config(),
    )
    .unwrap();

    let frames = wait_for_frames(&rx, 4);
    session.stop();

    assert!(session.stats().skipped() >= 3);
    for frame in frames {
        // 128 + 50 > 150 for red and blue, 128 - 30 is not for green
        assert!(frame.pixels().all(|p| p == &Rgb([255, 0, 255])));
    }
}

#[test]
fn test_persistent_read_failure_keeps_session_alive() {
    let (tx, rx) = unbounded();
    let mut camera = FakeCamera::new();
    camera.fail_every = Some(1);

    let mut session = PreviewSession::start(
        camera,
        move |frame: Frame| {
            _ = tx.send(frame);
        },
        SharedParameters::default(),
        fast_config().with_persistent_failure_ticks(0),
    )
    .unwrap();

    let deadline = Instant::now() + WAIT;
    while session.stats().skipped() < 5 {
        assert!(Instant::now() < deadline, "failed ticks were not counted");
        thread::sleep(Duration::from_millis(2));
    }

    assert!(session.is_running());
    session.stop();

    assert_eq!(session.stats().presented(), 0);
    assert!(rx.try_recv().is_err());
}

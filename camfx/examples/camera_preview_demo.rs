use camfx::{Frame, PreviewSession, ScaledSink, SessionConfig, SharedParameters};
use std::{thread, time::Duration};

fn main() -> anyhow::Result<()> {
    camfx::init_logger();

    let params = SharedParameters::default();
    let sink = ScaledSink::new(
        |frame: Frame| log::debug!("present {}x{}", frame.width(), frame.height()),
        800,
        600,
    );

    let mut session = PreviewSession::open_camera(sink, params.clone(), SessionConfig::new())?;

    // Walk through the controls the way a user would.
    thread::sleep(Duration::from_secs(2));
    params.set_brightness(160);
    params.set_sharpness(30);

    thread::sleep(Duration::from_secs(2));
    log::info!("posterize: {}", params.toggle_posterize());

    thread::sleep(Duration::from_secs(2));
    params.set_posterize(false);
    params.set_halftone_cell_size(8);
    log::info!("halftone: {}", params.toggle_halftone());

    thread::sleep(Duration::from_secs(2));
    params.set_halftone(false);
    params.set_blur(4);
    params.set_hue(120);

    thread::sleep(Duration::from_secs(2));
    session.stop();

    log::info!(
        "{} frames presented, {} ticks skipped",
        session.stats().presented(),
        session.stats().skipped()
    );
    Ok(())
}

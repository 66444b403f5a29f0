use anyhow::Result;
use camera::{
    CameraClient, CameraConfig, FrameSource, fit_to_area, query_available_cameras, query_camera_id,
};
use std::{thread, time::Duration};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    camera::init();

    let fps = 25;
    let cameras = query_available_cameras();
    if cameras.is_empty() {
        log::warn!("No working cameras found!");
        return Ok(());
    }

    for camera in &cameras {
        log::info!("{} [{}]: {}", camera.name, camera.index, camera.description);
    }

    let config = CameraConfig::default()
        .with_width(1280)
        .with_height(720)
        .with_fps(fps);

    let camera_id = query_camera_id(&cameras[0].name)?;
    let mut client = CameraClient::new(camera_id, config)?;
    client.open()?;

    let mut frame_count = 0;
    let mut empty_frame_count = 0;

    for _ in 0..100 {
        thread::sleep(Duration::from_millis(1000 / fps as u64));

        match client.try_next_frame() {
            Ok(Some(frame)) => {
                if frame_count % 10 == 0 {
                    let (w, h) = frame.dimensions();
                    let fitted = fit_to_area(frame, 640, 640)?;
                    log::info!(
                        "Frame #{frame_count}: {w}x{h}, fitted to {}x{}",
                        fitted.width(),
                        fitted.height()
                    );
                }
                frame_count += 1;
            }
            Ok(None) => empty_frame_count += 1,
            Err(e) => log::warn!("{e}"),
        }
    }

    log::info!(
        "Captured {frame_count} frames, {empty_frame_count} ({}%) empty frames",
        empty_frame_count * 100 / (frame_count + empty_frame_count).max(1)
    );
    Ok(())
}

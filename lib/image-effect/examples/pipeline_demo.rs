use anyhow::Result;
use image::ImageReader;
use image_effect::{Frame, ParameterSet, Rgb, Stage, process};
use std::{env, fs, path::Path, time::Instant};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let output_dir = Path::new("tmp/pipeline");
    fs::create_dir_all(output_dir)?;

    let sample_image = match env::args().nth(1) {
        Some(path) => ImageReader::open(path)?.decode()?.to_rgb8(),
        None => Frame::from_fn(640, 480, |x, y| {
            Rgb([(x * 255 / 640) as u8, (y * 255 / 480) as u8, ((x ^ y) & 0xff) as u8])
        }),
    };

    println!(
        "Test image size: {}x{}",
        sample_image.width(),
        sample_image.height()
    );
    println!("Output directory: {}\n", output_dir.display());
    println!("{:<25} {:>12} {:>12}", "Preset", "Time (ms)", "Max FPS");
    println!("{}", "-".repeat(52));

    let presets = [
        ("defaults", ParameterSet::new()),
        ("bright_contrast", ParameterSet::new().with_brightness(150).with_contrast(170)),
        ("sharpen", ParameterSet::new().with_sharpness(60)),
        ("blur", ParameterSet::new().with_blur_radius(8)),
        ("poster", ParameterSet::new().with_posterize_enabled(true)),
        ("halftone", ParameterSet::new().with_halftone_enabled(true).with_halftone_cell_size(8)),
        ("hue_120", ParameterSet::new().with_hue(120)),
        (
            "everything",
            ParameterSet::new()
                .with_sharpness(20)
                .with_blur_radius(2)
                .with_posterize_enabled(true)
                .with_halftone_enabled(true)
                .with_hue(200),
        ),
    ];

    for (name, params) in presets {
        let start = Instant::now();
        let output = process(&sample_image, &params)?;
        let time_ms = start.elapsed().as_secs_f64() * 1000.0;

        let path = output_dir.join(format!("{name}.png"));
        output.save(&path)?;
        log::debug!("saved {}", path.display());

        println!(
            "{:<25} {:>12.3} {:>12.0}",
            name,
            time_ms,
            1000.0 / time_ms.max(0.001)
        );
    }

    println!("\nStages: {}", Stage::all_stages().iter().map(|s| s.name()).collect::<Vec<_>>().join(" -> "));
    Ok(())
}

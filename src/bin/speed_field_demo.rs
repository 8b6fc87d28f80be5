use levelset_speed::config::load_config;
use levelset_speed::diagnostics::{
    summarize_speed_image, InputDescriptor, SpeedFieldReport, TimingBreakdown,
};
use levelset_speed::image::io::{load_feature_image, save_speed_image, write_json_file};
use levelset_speed::{SegmentationFunction, VectorThresholdSpeed};
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;
    let mut timings = TimingBreakdown::default();

    let feature = timings
        .measure("load", || load_feature_image(&config.input, config.channels))?
        .with_geometry(config.geometry);
    let provider = VectorThresholdSpeed::from_params(&config.model).map_err(|e| e.to_string())?;
    let threshold = provider.threshold();

    let mut function = SegmentationFunction::new(provider, &feature);
    function.initialize(config.radius);
    timings
        .measure("speed", || function.calculate_speed_image())
        .map_err(|e| e.to_string())?;

    let speed = function.speed_image();
    timings.measure("save", || save_speed_image(speed, &config.output.speed_image))?;

    let report = SpeedFieldReport {
        input: InputDescriptor {
            width: feature.w,
            height: feature.h,
            channels: feature.channels,
        },
        threshold,
        weights: function.weights(),
        summary: summarize_speed_image(speed),
        timings,
    };
    write_json_file(&config.output.summary_json, &report)?;

    println!(
        "Saved {}x{} speed image to {} ({} inside, {} outside)",
        feature.w,
        feature.h,
        config.output.speed_image.display(),
        report.summary.inside_count,
        report.summary.outside_count
    );
    println!(
        "Saved summary to {} (total {:.3} ms)",
        config.output.summary_json.display(),
        report.timings.total_ms
    );

    Ok(())
}

fn usage() -> String {
    "Usage: speed_field_demo <config.json>".to_string()
}

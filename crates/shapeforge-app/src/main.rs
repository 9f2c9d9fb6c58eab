//! ShapeForge scene exporter.
//!
//! Loads a scene, renders it to PNG, passes the image through an export
//! transform and writes the result.

mod cli;

use cli::{AppError, Scene, Settings};
use shapeforge_core::{EditorConfig, ShapeStore};
use shapeforge_render::{Compositor, export};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting ShapeForge");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("shapeforge: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let settings = Settings::resolve(std::env::args().skip(1), |key| std::env::var(key).ok())?;
    let config = match &settings.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    let transform = export::provider(&settings.provider)?;

    let scene = Scene::from_json(&std::fs::read_to_string(&settings.scene)?)?;
    log::info!(
        "Loaded {} shapes from {}",
        scene.shapes.len(),
        settings.scene.display()
    );
    let store = ShapeStore::with_shapes(scene.shapes, config);

    let compositor = Compositor::new();
    let png = pollster::block_on(export::export_png(
        &compositor,
        store.shapes(),
        scene.width,
        scene.height,
        transform.as_ref(),
    ))?;

    std::fs::write(&settings.output, &png)?;
    log::info!(
        "Wrote {} ({} bytes, provider {})",
        settings.output.display(),
        png.len(),
        transform.name()
    );
    Ok(())
}

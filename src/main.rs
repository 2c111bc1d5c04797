use std::env;
use std::path::Path;
use std::process;

use env_logger::Env;
use log::{error, info};

use zbuf::bmp::save_bmp;
use zbuf::config::SceneFile;
use zbuf::{Engine, EngineError, Image};

const DEFAULT_LOGGING_LEVEL: &str = "info";

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOGGING_LEVEL)).init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        error!("usage: {} <scene.ron> <output.bmp|png>", args[0]);
        process::exit(2);
    }

    if let Err(err) = run(Path::new(&args[1]), Path::new(&args[2])) {
        error!("{}", err);
        process::exit(1);
    }
}

fn run(scene_path: &Path, output: &Path) -> Result<(), EngineError> {
    let (settings, scene) = SceneFile::load(scene_path)?;
    info!(
        "rendering {} at size {} in {:?} mode",
        scene_path.display(),
        settings.size,
        settings.mode
    );

    let image = Engine::new(settings).render(&scene);
    save(&image, output)?;
    info!(
        "saved {}x{} image to {}",
        image.width(),
        image.height(),
        output.display()
    );
    Ok(())
}

/// BMP through the crate's own encoder, anything else through `image`.
fn save(image: &Image, output: &Path) -> Result<(), EngineError> {
    let is_bmp = output
        .extension()
        .map_or(true, |ext| ext.eq_ignore_ascii_case("bmp"));
    if is_bmp {
        save_bmp(image, output)
    } else {
        image.to_rgb_image().save(output)?;
        Ok(())
    }
}

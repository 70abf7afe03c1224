//! Garden viewer - builds a garden scene and runs its frame loop headless.
//!
//! Usage: cargo run --release --bin garden_viewer -- <GARDEN.json> [OPTIONS]
//!
//! Options:
//!   --config <PATH>      Scene config JSON (default: built-in defaults)
//!   --character <PATH>   Character manifest JSON (default: no character model)
//!   --frames <N>         Frames to run (default: 600)
//!   --fps <N>            Frame rate of the scheduler (default: 60)
//!   --hour <H>           Start hour of day (default: from config)
//!   --day <D>            Day of year (default: from config)

use std::path::PathBuf;
use std::time::Duration;

use gardenscape::character::load_character;
use gardenscape::core::logging;
use gardenscape::garden::GardenDescription;
use gardenscape::scene::{triangle_count, GardenScene, SceneConfig};

const VIEWPORT: (f32, f32) = (1280.0, 720.0);

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    let Some(garden_path) = args.get(1).filter(|a| !a.starts_with("--")).map(PathBuf::from) else {
        eprintln!("Usage: garden_viewer <GARDEN.json> [--config PATH] [--character PATH] [--frames N]");
        std::process::exit(2);
    };
    let frames = parse_u32_arg(&args, "--frames").unwrap_or(600);
    let fps = parse_u32_arg(&args, "--fps").unwrap_or(60).max(1);

    let config = match parse_str_arg(&args, "--config") {
        Some(path) => match SceneConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => SceneConfig::default(),
    };

    let garden = match GardenDescription::load(&garden_path) {
        Ok(garden) => garden,
        Err(e) => {
            log::error!("Failed to load garden {}: {}", garden_path.display(), e);
            std::process::exit(1);
        }
    };

    let mut scene = GardenScene::new(config);
    scene.set_viewport(VIEWPORT.0, VIEWPORT.1);
    scene.render_garden(&garden);

    if let Some(hour) = parse_f32_arg(&args, "--hour") {
        let day = parse_u32_arg(&args, "--day").unwrap_or(scene.config().sun.start_day);
        scene.set_sun_time(hour, day);
    }

    if let Some(path) = parse_str_arg(&args, "--character") {
        let tx = scene.request_character();
        tokio::spawn(async move {
            let result = load_character(&path).await;
            // The scene may already be gone
            let _ = tx.send(result);
        });
    }

    let frame = Duration::from_secs_f32(1.0 / fps as f32);
    let mut interval = tokio::time::interval(frame);
    let mut drawn = 0u32;
    for i in 0..frames {
        interval.tick().await;
        if scene.tick(frame.as_secs_f32()) {
            drawn += 1;
        }
        if i % fps == 0 {
            if let Some(farmer) = scene.farmer() {
                log::debug!(
                    "t={:.1}s farmer at ({:.1}, {:.1}), {} waypoints left",
                    scene.clock().elapsed(),
                    farmer.position().x,
                    farmer.position().z,
                    farmer.motion().remaining_route().len()
                );
            }
        }
    }

    let sun = scene.sun();
    log::info!(
        "Ran {} frames, drew {}: {} render items, {} triangles, {} path nodes, sun {:.1} deg ({:?})",
        frames,
        drawn,
        scene.render_list().len(),
        triangle_count(scene.render_list()),
        scene.path_graph().node_count(),
        sun.position.altitude,
        sun.lighting.band
    );
    if let Some(farmer) = scene.farmer() {
        log::info!(
            "Farmer walked to ({:.1}, {:.1}), model {}",
            farmer.position().x,
            farmer.position().z,
            farmer.asset().map_or("not loaded", |a| a.name.as_str())
        );
    }

    scene.dispose();
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

//! Blueprint Demo - Headless placement walkthrough
//!
//! Builds a small structure in the in-memory scene by driving the snapper
//! the way an editor would, then drags out a room next to it and prints the
//! resulting scene as JSON.
//!
//! Run with: `cargo run --bin blueprint_demo [placement.json] [rules.json]`
//!
//! Set `RUST_LOG=debug` to see every snap transition.

use std::path::Path;
use std::process::ExitCode;

use glam::Vec3;

use blueprint_engine::game::building::{GridSpec, RoomDrag, generate_grid, prefabs};
use blueprint_engine::game::{PlacementConfig, RuleTable, Scene, Snapper};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let config = match args.get(1) {
        Some(path) => match PlacementConfig::load(Path::new(path)) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Failed to load placement config {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => PlacementConfig::default(),
    };
    let rules = match args.get(2) {
        Some(path) => match RuleTable::load(Path::new(path)) {
            Ok(rules) => rules,
            Err(err) => {
                log::error!("Failed to load rule table {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => RuleTable::with_defaults(),
    };

    let scale = config.active_scale;
    let mut scene = Scene::new();
    let mut snapper = Snapper::new(rules, config.clone());

    // Free-standing floor at the origin
    snapper.create_preview(prefabs::floor(), Vec3::ZERO, true);
    snapper.resolve_preview(Vec3::ZERO, &scene);
    if let Err(err) = snapper.commit_placement(&mut scene) {
        log::error!("Initial floor rejected: {err}");
        return ExitCode::FAILURE;
    }

    // A wall and a second floor, each snapped from a rough cursor position
    let cursor_moves = [
        (prefabs::wall(), Vec3::new(0.3, 0.0, 2.05)),
        (prefabs::floor(), Vec3::new(3.5, 0.0, 0.0)),
    ];
    for (prefab, cursor) in cursor_moves {
        let name = prefab.name.clone();
        snapper.create_preview(prefab, cursor * scale, false);
        match snapper.resolve_preview(cursor * scale, &scene) {
            Some((pose, true)) => log::info!("{name} snapped to {:?}", pose.position),
            Some((_, false)) => log::info!("{name} found nothing to snap to"),
            None => continue,
        }
        if let Err(err) = snapper.commit_placement(&mut scene) {
            log::warn!("{name} not placed: {err}");
            snapper.clear_preview();
        }
    }

    // Drag a 2x3 room beside the structure
    let mut drag = RoomDrag::new();
    drag.begin(Vec3::new(12.0, 0.0, 0.0) * scale, snapper.preview());
    drag.update(Vec3::new(20.0, 0.0, 4.0) * scale);
    if let Some((start, end)) = drag.finish(Vec3::new(20.0, 0.0, 4.0) * scale) {
        let spec =
            GridSpec::from_config(start, end, prefabs::floor(), Some(prefabs::wall()), &config);
        let room = generate_grid(&spec, &mut scene);
        match serde_json::to_string_pretty(&room) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("Failed to serialize room: {err}"),
        }
    }

    let objects: Vec<_> = scene.objects().collect();
    match serde_json::to_string_pretty(&objects) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Failed to serialize scene: {err}");
            ExitCode::FAILURE
        }
    }
}

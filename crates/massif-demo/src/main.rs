//! Headless demonstration binary for the massif terrain pipeline.
//!
//! Loads settings from a RON config file, applies CLI overrides, generates a
//! seeded heightfield, builds the quad mesh, and logs statistics.
//! Run with `cargo run -p massif-demo -- --seed 99 --divisions 7`.

mod cli;
mod config;
mod logging;

use std::sync::atomic::AtomicBool;
use std::time::Instant;

use clap::Parser;
use massif_grid::HeightGrid;
use massif_mesh::HeightfieldMesh;
use massif_terrain::debug_viz::render_heightfield;
use massif_terrain::{DiamondSquareGenerator, DiamondSquareParams};
use tracing::info;

use crate::cli::CliArgs;
use crate::config::Config;

fn main() {
    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_or_default(path),
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    logging::init(&config.debug.log_level);

    if args.write_config {
        match &args.config {
            Some(path) => match config.save(path) {
                Ok(()) => info!("wrote effective config to {}", path.display()),
                Err(err) => eprintln!("failed to write config: {err}"),
            },
            None => eprintln!("--write-config needs --config <path>"),
        }
    }

    let terrain = &config.terrain;
    let segments = 1_u32 << terrain.divisions.clamp(1, 10);
    info!(
        "generating {}x{} heightfield (seed {}, roughness {}, amplitude {})",
        segments, segments, terrain.seed, terrain.roughness, terrain.amplitude
    );

    let start = Instant::now();
    let mut grid = HeightGrid::new(terrain.width, terrain.length, segments)
        .expect("height grid allocation failed");

    let generator = DiamondSquareGenerator::new(DiamondSquareParams {
        seed: terrain.seed,
        roughness: terrain.roughness,
        amplitude: terrain.amplitude,
    });
    generator
        .generate(&mut grid)
        .expect("terrain generation failed");

    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for &height in grid.heights() {
        min = min.min(height);
        max = max.max(height);
    }
    info!(
        "heightfield ready in {:.1?}: {} samples, height range [{:.3}, {:.3}]",
        start.elapsed(),
        grid.heights().len(),
        min,
        max
    );

    let cancel = AtomicBool::new(false);
    let mesh = HeightfieldMesh::build_cancellable(&grid, &cancel)
        .expect("mesh build was not cancelled");
    info!(
        "mesh: {} vertices, {} quads ({} indices as triangles)",
        mesh.vertex_count(),
        mesh.quad_count(),
        mesh.triangle_indices().len()
    );

    let image = render_heightfield(&grid);
    info!("debug image: {}x{} pixels", image.width, image.height);
}

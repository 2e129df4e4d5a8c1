//! Command-line argument parsing for the demo binary.

use std::path::PathBuf;

use clap::Parser;

/// Massif terrain demo command-line arguments.
///
/// CLI values override settings loaded from the RON config file.
#[derive(Parser, Debug)]
#[command(name = "massif", about = "Seeded diamond-square terrain demo")]
pub struct CliArgs {
    /// Terrain seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Roughness in [0, 1]: 0 is smoothest, 1 is roughest.
    #[arg(long)]
    pub roughness: Option<f32>,

    /// First-pass displacement amplitude.
    #[arg(long)]
    pub amplitude: Option<f32>,

    /// Lattice resolution exponent: 2^divisions faces per axis.
    #[arg(long)]
    pub divisions: Option<u32>,

    /// World-space width.
    #[arg(long)]
    pub width: Option<f32>,

    /// World-space length.
    #[arg(long)]
    pub length: Option<f32>,

    /// Log filter directive (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to a RON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the effective configuration back to the config path.
    #[arg(long)]
    pub write_config: bool,
}

use std::path::PathBuf;

use clap::Parser;
use physketch::{AspectRatio, SketchConfig, SketchError};

/// Click to spawn shapes, double-click to shatter them, drag to throw them.
#[derive(Parser, Debug)]
#[command(name = "physketch", version, about)]
struct Args {
    /// JSON config file; missing fields use defaults.
    #[arg(long, env = "PHYSKETCH_CONFIG")]
    config: Option<PathBuf>,

    /// Canvas aspect ratio as W:H, or "free" to fill the window.
    #[arg(long)]
    aspect: Option<AspectRatio>,

    /// Seed for reproducible spawns.
    #[arg(long)]
    seed: Option<u64>,

    /// Initial window width in logical pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Initial window height in logical pixels.
    #[arg(long)]
    height: Option<u32>,
}

impl Args {
    fn into_config(self) -> Result<SketchConfig, SketchError> {
        let mut config = match &self.config {
            Some(path) => SketchConfig::load(path)?,
            None => SketchConfig::default(),
        };

        if let Some(aspect) = self.aspect {
            config.aspect = aspect;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(width) = self.width {
            config.window_width = width;
        }
        if let Some(height) = self.height {
            config.window_height = height;
        }
        Ok(config)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result = Args::parse().into_config().and_then(physketch::run);
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

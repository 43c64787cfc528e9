use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Command-line configuration.  Gameplay tuning lives in `entities`.
#[derive(Parser, Debug, Clone)]
#[command(name = "moon_shooter")]
#[command(about = "Shoot down the aliens drifting past the moon")]
pub struct Config {
    /// Directory holding the sprite files
    #[arg(long, default_value = "res")]
    pub assets: PathBuf,

    /// Milliseconds between simulation ticks
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Milliseconds between alien spawns
    #[arg(long, default_value_t = 2000, value_parser = clap::value_parser!(u64).range(1..))]
    pub spawn_ms: u64,

    /// Seed for alien placement; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// File receiving the log output (the terminal is busy drawing)
    #[arg(long, default_value = "moon_shooter.log")]
    pub log_file: PathBuf,
}

impl Config {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_ms)
    }
}

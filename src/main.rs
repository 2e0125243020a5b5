use anyhow::{Context, Result};
use clap::Parser;
use retro_snake::game::GameConfig;
use retro_snake::logging;
use retro_snake::modes::HumanMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "retro-snake")]
#[command(version, about = "Classic grid snake in the terminal")]
struct Cli {
    /// YAML config file; unset fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells along each side of the board
    #[arg(long)]
    grid_size: Option<i32>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,

    /// Where to write the log
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.mute {
            config.audio_enabled = false;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(logging::default_log_path);
    logging::init(&log_path)?;

    let config = cli.game_config().context("Failed to load configuration")?;
    tracing::info!(?config, "configuration loaded");

    let mut human_mode = HumanMode::new(config)?;
    human_mode.run().await?;

    Ok(())
}

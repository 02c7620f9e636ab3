use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use the_snake::game::GameConfig;
use the_snake::logging::{self, LogLevel};
use the_snake::modes::HumanMode;
use the_snake::persistence::FileHighScoreStore;

#[derive(Parser)]
#[command(name = "the_snake")]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// TOML file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Simulation ticks per second
    #[arg(long)]
    tick_rate: Option<u32>,

    /// File the high score is kept in
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Seed for apple placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log
    #[arg(long, default_value = "the_snake.log")]
    log_file: PathBuf,

    /// Log verbosity
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(tick_rate) = self.tick_rate {
            config.tick_rate_hz = tick_rate;
        }
        if let Some(path) = &self.high_score_file {
            config.high_score_path = path.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_file, cli.log_level)?;

    let config = cli.game_config()?;
    info!("Starting with {:?}", config);

    let store = FileHighScoreStore::new(&config.high_score_path);
    let mut human_mode = HumanMode::new(&config, store);
    human_mode.run().await?;

    Ok(())
}

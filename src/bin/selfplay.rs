use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use selfplay_connect_four::config::AppConfig;
use selfplay_connect_four::training::{RecordingMode, SelfPlay};

/// Collect Connect Four self-play trajectories between two random agents.
#[derive(Parser)]
#[command(name = "selfplay", about = "Run Connect Four self-play episodes")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "selfplay.toml")]
    config: PathBuf,

    /// Override number of episodes
    #[arg(long)]
    episodes: Option<usize>,

    /// Override the exploration rate passed to the agents
    #[arg(long)]
    exploration_rate: Option<f64>,

    /// Seed both agents for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Record every move instead of only the terminal one
    #[arg(long)]
    every_step: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    // Load configuration
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(episodes) = cli.episodes {
        app_config.selfplay.num_episodes = episodes;
    }
    if let Some(rate) = cli.exploration_rate {
        app_config.selfplay.exploration_rate = rate;
    }
    if let Some(seed) = cli.seed {
        app_config.selfplay.seed = Some(seed);
    }
    if cli.every_step {
        app_config.selfplay.recording = RecordingMode::EveryStep;
    }
    app_config
        .validate()
        .context("validating configuration with command-line overrides")?;

    let selfplay = SelfPlay::new(app_config.selfplay.clone(), app_config.board);
    let (mut first, mut second) = selfplay.random_seats();
    let summary = selfplay.run(&mut first, &mut second);

    log::info!(
        "Collected {} transitions for seat one and {} for seat two",
        first.trajectory().len(),
        second.trajectory().len()
    );
    if let Some(last) = first.trajectory().last() {
        log::debug!(
            "Seat one's latest recorded state (played column {}, reward {}):\n{}",
            last.action,
            last.reward,
            last.state
        );
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&summary).context("serializing summary")?;
        println!("{json}");
    }

    Ok(())
}

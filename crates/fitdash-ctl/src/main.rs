use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

mod commands;
mod config;

use commands::render::OutputFormat;
use commands::weekdays::Metric;

#[derive(Parser)]
#[command(name = "fitdash-ctl")]
#[command(about = "Fitness tracker activity dashboard", long_about = None)]
struct Cli {
    #[arg(short, long, global = true, help = "Configuration file (TOML)")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Activity CSV export, overrides general.data_path")]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the summary cards
    Summary,

    /// Print the per-weekday means
    Weekdays {
        #[arg(short, long, value_enum, default_value_t = Metric::Steps)]
        metric: Metric,
    },

    /// Print minutes and shares per activity category
    Activity,

    /// Render all four charts
    Render {
        #[arg(short, long, help = "Output directory, overrides general.output_dir")]
        out: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init,
    /// Print the configuration file location
    Path,
}

fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let loaded = config::load_from_path(&config_path);
    let level = loaded.as_ref().map(|c| c.general.log_level.as_str()).unwrap_or("info");
    init_logging(level);
    let config = loaded?;
    debug!("Using configuration {:?}", config_path);

    let data_path = cli.data.clone().unwrap_or_else(|| PathBuf::from(&config.general.data_path));

    match cli.command {
        Commands::Summary => commands::summary::show(&data_path, &config.parsing).await?,
        Commands::Weekdays { metric } => {
            commands::weekdays::show(&data_path, &config.parsing, metric).await?
        }
        Commands::Activity => commands::activity::show(&data_path, &config.parsing).await?,
        Commands::Render { out, format } => {
            let out_dir = out.unwrap_or_else(|| PathBuf::from(&config.general.output_dir));
            commands::render::charts(&config, &data_path, &out_dir, format).await?
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config)?,
            ConfigAction::Init => commands::config::init(&config_path)?,
            ConfigAction::Path => commands::config::path(&config_path)?,
        },
    }

    Ok(())
}

// rawinput - raw HID controller profile tool
// Resolves device profiles and remaps raw samples from the command line

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use rawinput::settings;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Init { force } => commands::utility::init(config, force),
        Commands::Check => commands::query::check(&settings::load(config)?),
        Commands::List => commands::query::list(&settings::load(config)?),
        Commands::Resolve {
            device,
            hardware_id,
        } => commands::query::resolve(&settings::load(config)?, &device, &hardware_id),
        Commands::RemapAxis {
            device,
            channel,
            value,
        } => commands::remap::remap_axis(settings::load(config)?, &device, channel, value),
        Commands::RemapButton {
            device,
            channel,
            pressed,
        } => commands::remap::remap_button(settings::load(config)?, &device, channel, pressed),
        Commands::Replay { device, file } => {
            commands::remap::replay(settings::load(config)?, &device, file.as_deref())
        }
    }
}

//! ccms-config CLI entry point.

use anyhow::Result;
use clap::Parser;

use ccms_config::cli::{commands, handle_error, Cli, Commands};
use ccms_config::infrastructure::config::ConfigLoader;
use ccms_config::infrastructure::logging::{LogConfig, LoggerImpl};

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(err) = run(cli) {
        handle_error(err, json_mode);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let _logger = LoggerImpl::init(&LogConfig::from(&settings.logging))?;

    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args, &settings, cli.json),
        Commands::Scan(args) => commands::scan::execute(args, &settings, cli.json),
        Commands::Tier(args) => commands::tier::execute(args, &settings, cli.json),
    }
}

//! volumectl — query and change the system volume from the command line.

use std::path::PathBuf;

use clap::Parser;

mod cli;

#[derive(Parser)]
#[command(
    name = "volumectl",
    version,
    about = "Query and change the system volume through the platform mixer tools"
)]
struct Args {
    /// Output as JSON (for get, muted, status, config)
    #[arg(long, global = true)]
    json: bool,

    /// Log every mixer command that is run
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output device reference (default: from config, then the backend default)
    #[arg(short, long, global = true)]
    device: Option<String>,

    /// Path to an alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: cli::Command,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let opts = cli::Options {
        json: args.json,
        device: args.device,
        config_path: args.config,
    };

    if let Err(e) = cli::run(args.command, &opts) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

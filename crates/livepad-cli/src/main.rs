#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

mod commands;
mod logging;

use clap::Parser;
use livepad_core::config::{DEFAULT_HOST, DEFAULT_PORT};
use livepad_core::Config;
use miette::Result;

#[derive(Parser, Debug)]
#[command(name = "livepad")]
#[command(author, version, about = "Compile-and-serve backend for browser game snippets", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Start the HTTP server (foreground)
    Serve {
        /// Address to bind
        #[arg(long, env = "LIVEPAD_HOST", default_value = DEFAULT_HOST)]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Version)) {
        return commands::version::run(cli.json);
    }

    let config = match cli.command {
        Some(Commands::Serve { host, port }) => Config::new(host, port),
        _ => Config::default(),
    }
    .with_verbosity(cli.verbose)
    .with_json_logs(cli.json);

    logging::init(config.verbosity, config.json_logs);

    commands::serve::run(&config)
}

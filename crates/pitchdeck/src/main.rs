mod app;
mod banner;
mod cli;
mod commands;
mod config;
mod deck;
mod presentation;
mod render;
mod site;
mod theme;

use clap::Parser;
use colored::Colorize;

fn main() {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = cli.run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

/// Our own crate logs at the requested level; dependencies stay at `warn`.
/// `RUST_LOG` overrides both.
fn init_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        "error".to_string()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        };
        format!("warn,pitchdeck={level}")
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .init();
}

use anyhow::Result;
use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(),
        ConfigCommands::Set { key, value } => set(&key, &value),
    }
}

fn show() -> Result<()> {
    let path = Config::path()?;
    let config = Config::load_or_default();

    println!("{} {}", "Config file:".bold(), path.display());
    println!();

    let defaults = config.defaults.unwrap_or_default();
    print_value("defaults.theme", defaults.theme.as_deref(), "light");
    print_value("defaults.start_mode", defaults.start_mode.as_deref(), "page");
    print_value(
        "defaults.windowed",
        defaults.windowed.map(|w| if w { "true" } else { "false" }),
        "false",
    );
    Ok(())
}

fn print_value(key: &str, value: Option<&str>, default: &str) {
    match value {
        Some(v) => println!("  {:<22} {}", key, v.green()),
        None => println!("  {:<22} {}", key, format!("{default} (default)").dimmed()),
    }
}

fn set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load_or_default();
    config.set(key, value)?;
    let path = config.save()?;
    log::debug!("wrote {}", path.display());
    println!("{} {key} = {value}", "Set".green().bold());
    Ok(())
}

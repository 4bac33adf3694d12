use colored::Colorize;

pub fn print_banner_with_version() {
    println!(
        "{} {}",
        "pitchdeck".bold().green(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
}

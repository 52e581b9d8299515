use clap::Parser;
use dayplan::cli::{Cli, load_config};

fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = dayplan::tui::run(config, cli.demo) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

use clap::Parser;
use kubedoc::cli::{Cli, Commands};
use kubedoc::config;
use std::path::Path;
use std::process;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run() -> kubedoc::Result<bool> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Explicit --config wins; otherwise look next to the validated path
    let config = match (&cli.config, &cli.command) {
        (Some(path), _) => config::read_config(path)?,
        (None, Commands::Validate { path, .. }) => {
            let root = if path.is_dir() {
                path.as_path()
            } else {
                path.parent().unwrap_or(Path::new("."))
            };
            config::load_config(Some(root))?
        }
        (None, _) => config::load_config(None)?,
    };

    kubedoc::run_command(cli.command, &config)
}

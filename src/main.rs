use clap::Parser;
use taskboard::cli::commands::Cli;
use taskboard::cli::handlers;
use taskboard::io::config_io;
use taskboard::io::logging::{self, LogTarget};

fn main() {
    let cli = Cli::parse();

    let config = match config_io::load_config(cli.config.as_deref(), cli.api_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    // The TUI owns the terminal, so it only logs to a file
    let log_target = match (&cli.command, &config.ui.log_file) {
        (Some(_), _) => LogTarget::Stderr,
        (None, Some(path)) => LogTarget::File(path.as_path()),
        (None, None) => LogTarget::Off,
    };
    if let Err(e) = logging::init_tracing(cli.verbose, log_target) {
        eprintln!("error: could not open log file: {}", e);
        std::process::exit(1);
    }

    let result = match cli.command {
        // No subcommand → launch TUI
        None => taskboard::tui::run(&config),
        Some(_) => handlers::dispatch(cli, &config),
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

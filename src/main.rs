//! relsync CLI entry point
//!
//! Parses arguments, runs the selected command, and renders failures as
//! user-friendly errors with a non-zero exit for scripting callers.

use clap::Parser;
use relsync::cli;
use relsync::core::user_friendly_error;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute().await {
        user_friendly_error(&e).display();
        std::process::exit(1);
    }
}

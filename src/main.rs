//! Main entry point for the zigwheel CLI app

use tracing_subscriber::EnvFilter;

fn main() -> std::process::ExitCode {
    init_logging();

    if let Err(e) = zigwheel::cli_runner::run_cli_app() {
        eprintln!("Error: {}", e);
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zigwheel=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

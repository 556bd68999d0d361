use clap::Parser;
use colored::Colorize;
use presentation::cli::{Cli, CliApp};
use shared::logging::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // No degraded mode: a backend that cannot be set up stops the process.
    let mut app = match CliApp::connect(&cli).await {
        Ok(app) => app,
        Err(err) => {
            eprintln!("{} {:#}", "Startup failed:".red().bold(), err);
            std::process::exit(1);
        }
    };
    app.run(cli).await?;
    Ok(())
}

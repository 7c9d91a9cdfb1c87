use clap::Parser;
use faculty_scraper::cli::{self, Cli};
use faculty_scraper::config::AppConfig;
use faculty_scraper::context::Context;
use faculty_scraper::department::DepartmentRegistry;
use faculty_scraper::error::Result;
use faculty_scraper::logging::{init_logging, LoggerConfig};
use faculty_scraper::{log_error, log_info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::from_file(&cli.config)?;
    init_logging(LoggerConfig::from_config(&config.logging)?)?;

    log_info!("[main] Starting faculty scraper...");
    let ctx = Context::new(config, DepartmentRegistry::builtin());

    if let Err(e) = cli::run(&ctx, cli.command).await {
        log_error!(&e => "[main] Command failed");
        return Err(e);
    }

    log_info!("[main] Done");
    Ok(())
}

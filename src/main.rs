use clap::Parser;
use confab::core::config;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "confab", about = "Terminal chat client for an AI reply server")]
struct Args {
    /// Chat server base URL (overrides config file and CONFAB_SERVER_URL)
    #[arg(short, long)]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to confab.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("confab.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Config error ({e}), falling back to defaults");
        config::ConfabConfig::default()
    });
    let resolved = config::resolve(&file_config, args.server.as_deref());

    log::info!("Confab starting up, server: {}", resolved.base_url);

    confab::tui::run(resolved)
}

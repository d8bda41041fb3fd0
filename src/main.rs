use clap::Parser;
use holocron::core::config::{self, CliOverrides, HolocronConfig, Layout};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "holocron", about = "Browse Star Wars API lists from the terminal")]
struct Args {
    /// Screen to start on (title, case-insensitive)
    #[arg(short, long)]
    screen: Option<String>,

    /// API base URL (overrides config and HOLOCRON_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Gate every screen on connectivity
    #[arg(long)]
    offline_gate: bool,

    /// Tab strip or side drawer
    #[arg(short, long, value_enum)]
    layout: Option<Layout>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to holocron.log in current directory.
    // Starts permissive so config loading is logged, then narrowed below.
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("holocron.log") {
        let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        HolocronConfig::default()
    });
    let cli = CliOverrides {
        screen: args.screen,
        base_url: args.base_url,
        layout: args.layout,
        offline_gate: args.offline_gate,
    };
    let resolved = config::resolve(&file_config, &cli);

    let level = resolved.log_level.parse().unwrap_or(LevelFilter::Debug);
    log::set_max_level(level);

    log::info!(
        "Holocron starting up: {} screens from {} ({:?} layout)",
        resolved.screens.len(),
        resolved.base_url,
        resolved.layout
    );

    holocron::tui::run(resolved)
}

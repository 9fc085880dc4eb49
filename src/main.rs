use atlas::core::config::{self, AtlasConfig, CliOverrides};
use atlas::core::criteria::SortBy;
use atlas::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "atlas", about = "Browse the countries of the world from your terminal")]
struct Args {
    /// Initial sort key
    #[arg(short, long, value_enum)]
    sort: Option<SortBy>,

    /// Initial search text (matches name, region and subregion)
    #[arg(long)]
    search: Option<String>,

    /// Region to show; repeat for several
    #[arg(short, long = "region")]
    regions: Vec<String>,

    /// Only UN members
    #[arg(long)]
    un_member: bool,

    /// Only independent countries
    #[arg(long)]
    independent: bool,

    /// Country data endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Read countries from a local JSON snapshot instead of the endpoint
    #[arg(long = "data")]
    data_file: Option<PathBuf>,

    /// Open the detail view for this cca3 code on startup
    #[arg(long)]
    country: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to atlas.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("atlas.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {}", e);
        AtlasConfig::default()
    });

    let overrides = CliOverrides {
        endpoint: args.endpoint,
        data_file: args.data_file,
        search: args.search,
        regions: args.regions,
        un_member: args.un_member,
        independent: args.independent,
        sort_by: args.sort,
    };
    let resolved = config::resolve(&file_config, &overrides);

    log::info!(
        "Atlas starting up (endpoint: {}, snapshot: {:?})",
        resolved.endpoint,
        resolved.data_file
    );

    tui::run(resolved, args.country)
}

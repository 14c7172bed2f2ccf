use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "theme-picker")]
#[command(about = "Download the theme catalog and pick a theme from the terminal")]
pub struct AppArgs {
    #[arg(long, help = "Config file with 'key value' lines")]
    pub config: Option<PathBuf>,

    #[arg(
        short = 'o',
        long = "override",
        value_name = "KEY=VALUE",
        help = "Override a config option, may be repeated"
    )]
    pub overrides: Vec<String>,

    #[arg(long, help = "URL of the JSON theme catalog")]
    pub catalog_url: Option<String>,

    #[arg(long, help = "Read the catalog from a local JSON file instead of downloading it")]
    pub catalog_file: Option<PathBuf>,

    #[arg(long, value_name = "SECONDS", help = "Wait this long before starting the download")]
    pub fetch_delay: Option<String>,

    #[arg(long, help = "Write logs to this file (filter with RUST_LOG)")]
    pub log_file: Option<PathBuf>,
}

impl AppArgs {
    pub fn from_cli() -> Self {
        <Self as Parser>::parse()
    }
}

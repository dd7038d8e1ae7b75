use clap::Parser;

#[derive(Debug, Parser)]
#[command(about = "Interactive thermometer console")]
pub struct Args {
    /// Diagnostics filter, written to stderr
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_filter: String,
}

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// File holding the last-sync watermark (unix seconds).
    #[arg(long, default_value = "timestamp.txt")]
    pub timestamp_file: String,

    /// Pause between Pinboard writes (rate limit politeness).
    #[arg(long, default_value_t = 3000)]
    pub delay_ms: u64,
}

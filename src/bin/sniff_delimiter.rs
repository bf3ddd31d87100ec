use anyhow::Result;
use clap::Parser;
use iddiff::load::delimiter::{delimiter_name, detect_delimiter, DEFAULT_DELIMITER};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(about = "Print the delimiter iddiff would detect for each file")]
struct Args {
    /// Files to inspect
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    for path in &args.files {
        let d = detect_delimiter(path, DEFAULT_DELIMITER);
        println!("{}\t{}", path.display(), delimiter_name(d));
    }
    Ok(())
}

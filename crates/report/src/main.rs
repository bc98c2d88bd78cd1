use anyhow::Result;
use clap::Parser;

use humidor_observability::LogFormat;
use humidor_report::{Cli, execute};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = cli
        .log_format
        .clone()
        .or_else(|| std::env::var("HUMIDOR_LOG_FORMAT").ok())
        .and_then(|v| LogFormat::parse(&v))
        .unwrap_or_default();
    humidor_observability::init(format);

    let output = execute(&cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

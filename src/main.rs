use anyhow::{Context, Result};
use clap::Parser;

use gladestring::{Args, Config, emit_header, logging};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init();

    let config = Config::from(args);
    emit_header(&config).context("Failed to create C header")?;

    Ok(())
}

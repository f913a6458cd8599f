use std::path::PathBuf;

use clap::Parser;

use crate::header::HeaderStyle;

#[derive(Debug, Parser)]
#[command(name = "gladestring", about = "Create C header from Glade UI", version)]
pub struct Args {
    /// Input filename
    #[arg(short = 'f', long = "filename", value_name = "FILENAME")]
    pub filename: PathBuf,
}

/// Everything one run needs, fixed at start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub style: HeaderStyle,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            style: HeaderStyle::default(),
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self::new(args.filename)
    }
}

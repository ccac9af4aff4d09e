use std::path::PathBuf;

use clap::Parser;

/// Retail pricing and sales analysis dashboard
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Sales file to open at start-up (.csv, .json or .parquet)
    #[arg(default_value = "BSS_Retail_Cleaned.csv")]
    pub data: PathBuf,

    /// Initial window width
    #[arg(long, default_value = "1200")]
    pub width: f32,

    /// Initial window height
    #[arg(long, default_value = "800")]
    pub height: f32,
}

impl Args {
    /// The start-up file, if it exists on disk.
    pub fn initial_file(&self) -> Option<PathBuf> {
        if self.data.is_file() {
            Some(self.data.clone())
        } else {
            log::warn!("{} not found, starting without data", self.data.display());
            None
        }
    }
}

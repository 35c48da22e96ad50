//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Where the cart and session are kept between runs.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the stored cart and session
    #[arg(long, global = true, env = "COMANDA_STORAGE_DIR", default_value = ".comanda")]
    pub storage_dir: PathBuf,
}

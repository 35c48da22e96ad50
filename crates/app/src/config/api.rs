//! Marketplace API Config

use clap::Args;

/// Remote API settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Base URL of the marketplace API
    #[arg(
        long,
        global = true,
        env = "COMANDA_API_URL",
        default_value = "http://localhost:8000/api"
    )]
    pub api_url: String,
}

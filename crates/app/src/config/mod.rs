//! Client configuration module

use clap::Args;

use crate::config::{
    api::ApiConfig, locale::LocaleConfig, observability::LoggingConfig, storage::StorageConfig,
};

pub mod api;
pub mod locale;
pub mod observability;
pub mod storage;

pub use observability::LogFormat;

/// Comanda client configuration, read from flags, the environment and `.env`.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Marketplace API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Local storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Price display settings.
    #[command(flatten)]
    pub locale: LocaleConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

//! Locale Config

use clap::Args;
use rusty_money::iso::{self, Currency};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown ISO 4217 currency code: {0}")]
pub struct UnknownCurrency(pub String);

/// How prices are displayed.
#[derive(Debug, Args)]
pub struct LocaleConfig {
    /// ISO 4217 currency used when displaying prices
    #[arg(long, global = true, env = "COMANDA_CURRENCY", default_value = "PEN")]
    pub currency: String,
}

impl LocaleConfig {
    /// Resolves the configured currency code.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownCurrency`] when the code isn't an ISO 4217 currency.
    pub fn currency(&self) -> Result<&'static Currency, UnknownCurrency> {
        let code = self.currency.trim().to_ascii_uppercase();

        iso::find(&code).ok_or(UnknownCurrency(code))
    }
}

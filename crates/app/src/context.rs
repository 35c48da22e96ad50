//! App Context

use std::sync::Arc;

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    accounts::Accounts,
    api::{HttpMarketplaceApi, MarketplaceApi},
    carts::{CartPersistence, CartService},
    checkout::Checkout,
    config::{AppConfig, locale::UnknownCurrency},
    notifications::{Notifier, TracingNotifier},
    owners::OwnerDesk,
    session::{Session, SessionStore},
    storage::{FileStore, KeyValueStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("invalid currency")]
    Currency(#[from] UnknownCurrency),
}

/// Everything a command needs, wired once per process.
#[derive(Debug)]
pub struct AppContext {
    pub api: Arc<dyn MarketplaceApi>,
    pub sessions: SessionStore,
    pub session: Session,
    pub cart: CartService,
    pub checkout: Checkout,
    pub accounts: Accounts,
    pub owners: OwnerDesk,
    pub currency: &'static Currency,
}

impl AppContext {
    /// Build application context from configuration: file-backed storage,
    /// the HTTP API client and log-based notifications.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured currency is unknown.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let currency = config.locale.currency()?;
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.storage.storage_dir));
        let session = SessionStore::new(Arc::clone(&store)).load();

        let api = HttpMarketplaceApi::new(&config.api.api_url)
            .with_token(session.token().map(str::to_string));

        Ok(Self::new(
            store,
            Arc::new(api),
            Arc::new(TracingNotifier),
            currency,
        ))
    }

    /// Wire the context from its ports. The stored session and cart are
    /// restored from `store`.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        api: Arc<dyn MarketplaceApi>,
        notifier: Arc<dyn Notifier>,
        currency: &'static Currency,
    ) -> Self {
        let sessions = SessionStore::new(Arc::clone(&store));
        let session = sessions.load();

        Self {
            cart: CartService::new(CartPersistence::new(store), Arc::clone(&notifier)),
            checkout: Checkout::new(Arc::clone(&api), Arc::clone(&notifier)),
            accounts: Accounts::new(Arc::clone(&api)),
            owners: OwnerDesk::new(Arc::clone(&api), notifier),
            api,
            sessions,
            session,
            currency,
        }
    }

    /// Replace the current session and store it.
    pub fn sign_in(&mut self, session: Session) {
        self.sessions.save(&session);
        self.session = session;
    }

    /// Forget the current session.
    pub fn sign_out(&mut self) {
        self.sessions.clear();
        self.session = Session::anonymous();
    }
}

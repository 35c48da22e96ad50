//! Accounts
//!
//! Sign up, sign in and sign out against the marketplace API. The resulting
//! [`Session`] is returned to the caller, which decides whether to store it.

use std::sync::Arc;

use comanda::users::{RegisterRequest, RegistrationError};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    api::{ApiError, MarketplaceApi},
    session::Session,
};

#[derive(Debug, Error)]
pub enum AccountError {
    #[error(transparent)]
    Invalid(#[from] RegistrationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug)]
pub struct Accounts {
    api: Arc<dyn MarketplaceApi>,
}

impl Accounts {
    pub fn new(api: Arc<dyn MarketplaceApi>) -> Self {
        Self { api }
    }

    /// Creates an account and returns its signed in session.
    ///
    /// # Errors
    ///
    /// - [`AccountError::Invalid`] when the form fails validation; nothing is sent.
    /// - [`AccountError::Api`] when the server rejects the sign up.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Session, AccountError> {
        request.validate()?;

        let response = self.api.register(request).await?;

        info!(user_id = %response.user.id, role = %response.user.role, "account created");

        Ok(Session::signed_in(response.access_token, response.user))
    }

    /// Exchanges credentials for a signed in session.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Api`] when the credentials are rejected.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AccountError> {
        let response = self.api.login(email, password).await?;

        info!(user_id = %response.user.id, "signed in");

        Ok(Session::signed_in(response.access_token, response.user))
    }

    /// Revokes the session's token on the server. Failures are logged; the
    /// caller forgets the session locally either way.
    pub async fn logout(&self, session: &Session) {
        if !session.is_signed_in() {
            return;
        }

        if let Err(error) = self.api.logout().await {
            warn!(%error, "server sign out failed");
        }
    }
}

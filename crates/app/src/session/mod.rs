//! Session
//!
//! Who is signed in, passed explicitly to the operations that need it.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use comanda::users::{Role, User};
use thiserror::Error;

mod store;

pub use store::{AUTH_TOKEN_KEY, SessionStore, USER_KEY};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("not signed in")]
    NotSignedIn,

    #[error("not available to the {0} role")]
    Forbidden(Role),
}

/// Current identity: a bearer token and the user it belongs to.
#[derive(Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    /// Nobody signed in.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A signed in user.
    pub fn signed_in(token: impl Into<String>, user: User) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// Returns the signed in customer.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotSignedIn`] when there is no token or user.
    /// - [`SessionError::Forbidden`] when the user is a restaurant owner.
    pub fn require_customer(&self) -> Result<&User, SessionError> {
        self.require_role(Role::Client)
    }

    /// Returns the signed in restaurant owner.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotSignedIn`] when there is no token or user.
    /// - [`SessionError::Forbidden`] when the user is a customer.
    pub fn require_owner(&self) -> Result<&User, SessionError> {
        self.require_role(Role::Owner)
    }

    fn require_role(&self, role: Role) -> Result<&User, SessionError> {
        let user = match (&self.token, &self.user) {
            (Some(_), Some(user)) => user,
            _ => return Err(SessionError::NotSignedIn),
        };

        if user.role != role {
            return Err(SessionError::Forbidden(user.role));
        }

        Ok(user)
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}

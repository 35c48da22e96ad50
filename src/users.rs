//! Users

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::TypedId;

/// User Id
pub type UserId = TypedId<User>;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Customer placing orders.
    Client,

    /// Restaurant owner managing menus and incoming orders.
    Owner,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Role::Client => f.write_str("client"),
            Role::Owner => f.write_str("owner"),
        }
    }
}

/// A marketplace account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User id
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Account role
    pub role: Role,

    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,

    /// Default delivery address
    #[serde(default)]
    pub address: Option<String>,

    /// When the email address was verified
    #[serde(default)]
    pub email_verified_at: Option<Timestamp>,
}

impl User {
    /// Whether this user may fill a cart and place orders.
    pub fn is_customer(&self) -> bool {
        self.role == Role::Client
    }
}

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub access_token: String,

    /// Token type, usually `Bearer`
    #[serde(default)]
    pub token_type: Option<String>,

    /// Signed in user
    pub user: User,
}

/// Why a sign up form can't be submitted yet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// Name shorter than two characters.
    #[error("name must be at least 2 characters")]
    NameTooShort,

    /// Email without a local part and domain.
    #[error("email address is invalid")]
    InvalidEmail,

    /// Password shorter than six characters.
    #[error("password must be at least 6 characters")]
    PasswordTooShort,

    /// Confirmation differs from the password.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Phone given but shorter than nine characters.
    #[error("phone must be at least 9 characters")]
    PhoneTooShort,

    /// Address given but shorter than five characters.
    #[error("address must be at least 5 characters")]
    AddressTooShort,
}

/// Sign up payload.
#[derive(Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Chosen password
    pub password: String,

    /// Password typed a second time
    pub password_confirmation: String,

    /// Customer or restaurant owner
    pub role: Role,

    /// Contact phone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Default delivery address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl RegisterRequest {
    /// Checks the form the way the sign up screen does before submitting.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistrationError`] found, checking fields in form
    /// order.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.name.trim().chars().count() < 2 {
            return Err(RegistrationError::NameTooShort);
        }

        let valid_email = self
            .email
            .trim()
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));

        if !valid_email {
            return Err(RegistrationError::InvalidEmail);
        }

        if self.password.chars().count() < 6 {
            return Err(RegistrationError::PasswordTooShort);
        }

        if self.password != self.password_confirmation {
            return Err(RegistrationError::PasswordMismatch);
        }

        if is_shorter(self.phone.as_deref(), 9) {
            return Err(RegistrationError::PhoneTooShort);
        }

        if is_shorter(self.address.as_deref(), 5) {
            return Err(RegistrationError::AddressTooShort);
        }

        Ok(())
    }
}

impl Debug for RegisterRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("phone", &self.phone)
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

fn is_shorter(value: Option<&str>, minimum: usize) -> bool {
    value.is_some_and(|value| value.trim().chars().count() < minimum)
}

//! Explicit per-call session context.
//!
//! Identity, access token and locale travel with every store and controller
//! call instead of being looked up from ambient global state.

use crate::error::{DesignerError, Result};

/// Default UI locale of the platform.
pub const DEFAULT_LOCALE: &str = "de";

/// Who is calling, with which credentials, in which locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    user_id: Option<String>,
    access_token: Option<String>,
    locale: String,
}

impl SessionContext {
    /// Session for a signed-in user.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            access_token: None,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Session without any identity.
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            access_token: None,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Attach a bearer token issued by the identity provider.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the active locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// The signed-in user id.
    ///
    /// # Errors
    ///
    /// Returns `DesignerError::NotAuthenticated` for anonymous sessions.
    pub fn user(&self) -> Result<&str> {
        self.user_id.as_deref().ok_or(DesignerError::NotAuthenticated)
    }

    /// The signed-in user id, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Bearer token, if any.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Active locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }
}

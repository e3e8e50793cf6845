//! Session handling: who is logged in, and the account endpoints that decide it.
//!
//! [`AuthContext`] is the capability a [`NoteManager`](crate::NoteManager) is
//! built with. It is produced by [`ApiClient::login`] or
//! [`ApiClient::check_session`] and revoked by [`ApiClient::logout`].

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::client::ApiClient;
use crate::{NotekeeperError, Result};

/// An account on the notes service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// Whether, and as whom, the client is logged in.
///
/// ```rust
/// use notekeeper_core::{AuthContext, User};
///
/// assert!(!AuthContext::anonymous().is_authenticated());
/// let ctx = AuthContext::authenticated(User { id: 1, username: "ada".into() });
/// assert_eq!(ctx.user().map(|u| u.username.as_str()), Some("ada"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    user: Option<User>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
}

/// Username and password as sent to `/signup` and `/login`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

const USERNAME_LEN: std::ops::RangeInclusive<usize> = 3..=50;
const MIN_PASSWORD_LEN: usize = 6;

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn require_present(&self) -> Result<()> {
        if self.username.trim().is_empty() || self.password.is_empty() {
            return Err(NotekeeperError::Validation(
                "Username and password required".to_string(),
            ));
        }
        Ok(())
    }

    /// Applies the service's account rules: username of 3 to 50 characters,
    /// password of at least 6.
    ///
    /// # Errors
    ///
    /// Returns [`NotekeeperError::Validation`] describing the first rule broken.
    pub fn validate_for_signup(&self) -> Result<()> {
        self.require_present()?;
        if !USERNAME_LEN.contains(&self.username.chars().count()) {
            return Err(NotekeeperError::Validation(format!(
                "Username must be between {} and {} characters",
                USERNAME_LEN.start(),
                USERNAME_LEN.end()
            )));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(NotekeeperError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

impl ApiClient {
    /// Registers a new account. Does not log in.
    pub fn signup(&self, credentials: &Credentials) -> Result<User> {
        credentials.validate_for_signup()?;
        let user: User = self.execute_json(self.post("signup").json(credentials))?;
        info!("Registered account {}", user.username);
        Ok(user)
    }

    /// Logs in and keeps the session cookie on this client.
    pub fn login(&self, credentials: &Credentials) -> Result<AuthContext> {
        credentials.require_present()?;
        let user: User = self.execute_json(self.post("login").json(credentials))?;
        info!("Logged in as {}", user.username);
        Ok(AuthContext::authenticated(user))
    }

    /// Asks the service whether the stored session cookie is still valid.
    ///
    /// A 401 is an anonymous context, not an error.
    pub fn check_session(&self) -> Result<AuthContext> {
        match self.execute_json::<User>(self.get("check_session")) {
            Ok(user) => Ok(AuthContext::authenticated(user)),
            Err(e) if e.is_status(401) => Ok(AuthContext::anonymous()),
            Err(e) => Err(e),
        }
    }

    /// Ends the session on the server.
    pub fn logout(&self) -> Result<AuthContext> {
        self.execute(self.delete("logout"))?;
        info!("Logged out");
        Ok(AuthContext::anonymous())
    }
}

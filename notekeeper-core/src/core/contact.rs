//! The public contact form.

use std::sync::OnceLock;

use log::info;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::client::ApiClient;
use crate::{NotekeeperError, Result};

/// A message for the site operators. No login needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

const MAX_NAME_LEN: usize = 100;
const MAX_SUBJECT_LEN: usize = 150;
const MIN_MESSAGE_LEN: usize = 10;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    })
}

fn check_length(field: &str, value: &str, max: usize) -> Result<()> {
    let len = value.trim().chars().count();
    if len == 0 || len > max {
        return Err(NotekeeperError::Validation(format!(
            "{field} must be between 1 and {max} characters"
        )));
    }
    Ok(())
}

impl ContactMessage {
    /// Checks every field before anything is sent.
    pub fn validate(&self) -> Result<()> {
        check_length("Name", &self.name, MAX_NAME_LEN)?;
        if !email_pattern().is_match(self.email.trim()) {
            return Err(NotekeeperError::Validation(format!(
                "Not a valid email address: {}",
                self.email
            )));
        }
        check_length("Subject", &self.subject, MAX_SUBJECT_LEN)?;
        if self.message.trim().chars().count() < MIN_MESSAGE_LEN {
            return Err(NotekeeperError::Validation(format!(
                "Message must be at least {MIN_MESSAGE_LEN} characters long"
            )));
        }
        Ok(())
    }
}

impl ApiClient {
    /// Validates and posts a contact message to `/contact`.
    pub fn send_contact(&self, message: &ContactMessage) -> Result<()> {
        message.validate()?;
        self.execute(self.post("contact").json(message))?;
        info!("Contact message sent: {:?}", message.subject);
        Ok(())
    }
}

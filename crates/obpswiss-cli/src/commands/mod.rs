//! Command implementations
//!
//! Each command checks for a token, runs one SDK call under a spinner and
//! renders either a coloured summary or the raw JSON. Errors bubble up to
//! `main`, which owns printing and the exit code.

pub mod accounts;
pub mod authorisations;
pub mod baskets;
pub mod config;
pub mod consents;
pub mod funds;
pub mod payments;
pub mod transactions;

use obpswiss_sdk::{ObpClient, SettingsProvider};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by the command layer itself
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Token not configured.")]
    TokenNotConfigured,

    #[error("{0}")]
    Usage(String),
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }
}

/// State shared by every command
pub struct Context {
    pub client: ObpClient,
    pub json: bool,
    pub config_path: PathBuf,
}

impl Context {
    pub fn settings(&self) -> &Arc<dyn SettingsProvider> {
        self.client.settings()
    }

    /// Refuse to run API commands without a stored token
    pub fn require_auth(&self) -> Result<(), CliError> {
        if self.client.has_token() {
            Ok(())
        } else {
            Err(CliError::TokenNotConfigured)
        }
    }
}

/// Shown for single-resource calls that came back without a body
pub(crate) const NO_DATA: &str = "The bank returned no data.";

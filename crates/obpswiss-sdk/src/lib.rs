//! OBP Swiss SDK - client for a NextGenPSD2 Open Banking API
//!
//! The SDK wraps the bank's REST API behind typed methods on [`ObpClient`].
//! Every call goes through one pipeline: read the bearer token from a
//! [`SettingsProvider`], send exactly one request, classify the outcome
//! into an [`ObpError`].
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use obpswiss_sdk::{AccountListParams, MemorySettings, ObpClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), obpswiss_sdk::ObpError> {
//!     let settings = Arc::new(MemorySettings::with_token("my-token"));
//!     let client = ObpClient::new(settings);
//!
//!     for account in client.list_accounts(&AccountListParams::default()).await? {
//!         println!("{:?}", account.iban);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Consent lifecycle
//!
//! Account data is only served under a `valid` consent. The usual flow:
//!
//! 1. [`ObpClient::create_consent`] returns a consent in `received`
//! 2. [`ObpClient::create_authorisation`] starts SCA for it
//! 3. [`ObpClient::update_authorisation`] submits password, method, OTP
//! 4. [`ObpClient::get_consent_status`] reports `valid` once SCA finalised
//!
//! The client never enforces these states itself; see [`state`].

pub mod client;
pub mod error;
pub mod models;
pub mod request;
mod resources;
pub mod settings;
pub mod state;

pub use client::{ObpClient, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{ErrorKind, ObpError, ObpResult};
pub use models::*;
pub use request::{api_path, ApiRequest};
pub use settings::{MemorySettings, SettingKey, SettingsProvider};
pub use state::{
    authorisations_complete, ConsentStatus, ScaStatus, TransactionStatus, TransitionError,
};

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

//! Funds confirmation

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{AccountReference, Amount};

/// Body of `POST /funds-confirmations`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundsConfirmationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    pub account: AccountReference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    pub instructed_amount: Amount,
}

impl FundsConfirmationRequest {
    pub fn new(account: AccountReference, instructed_amount: Amount) -> Self {
        Self {
            card_number: None,
            account,
            payee: None,
            instructed_amount,
        }
    }
}

/// One-shot answer; nothing is stored server-side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundsConfirmation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funds_available: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

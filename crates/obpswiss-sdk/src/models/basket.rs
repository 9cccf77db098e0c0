//! Signing baskets

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Links;
use crate::state::TransactionStatus;

/// Body of `POST /signing-baskets`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningBasketRequest {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub payment_ids: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consent_ids: Vec<String>,
}

impl SigningBasketRequest {
    pub fn new(payment_ids: Vec<String>, consent_ids: Vec<String>) -> Self {
        Self {
            payment_ids,
            consent_ids,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.payment_ids.is_empty() && self.consent_ids.is_empty()
    }
}

/// Basket grouping payments and consents for one SCA
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningBasket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basket_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_status: Option<TransactionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payments: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consents: Option<Vec<String>>,
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

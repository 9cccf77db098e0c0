//! Payment initiation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::{link_href, AccountReference, Amount, Links, ScaMethod};
use crate::state::TransactionStatus;

/// First path segment of a payment endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentService {
    Payments,
    BulkPayments,
    PeriodicPayments,
}

impl PaymentService {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payments => "payments",
            Self::BulkPayments => "bulk-payments",
            Self::PeriodicPayments => "periodic-payments",
        }
    }
}

impl FromStr for PaymentService {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "payments" => Ok(Self::Payments),
            "bulk-payments" => Ok(Self::BulkPayments),
            "periodic-payments" => Ok(Self::PeriodicPayments),
            other => Err(format!(
                "invalid payment service: {} (payments, bulk-payments, periodic-payments)",
                other
            )),
        }
    }
}

impl fmt::Display for PaymentService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /{service}/{product}` for a single credit transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitiation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_to_end_identification: Option<String>,
    pub debtor_account: AccountReference,
    pub instructed_amount: Amount,
    pub creditor_account: AccountReference,
    pub creditor_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creditor_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remittance_information_unstructured: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_execution_date: Option<NaiveDate>,
}

impl PaymentInitiation {
    pub fn credit_transfer(
        debtor_account: AccountReference,
        creditor_account: AccountReference,
        creditor_name: impl Into<String>,
        instructed_amount: Amount,
    ) -> Self {
        Self {
            end_to_end_identification: None,
            debtor_account,
            instructed_amount,
            creditor_account,
            creditor_name: creditor_name.into(),
            creditor_agent: None,
            remittance_information_unstructured: None,
            requested_execution_date: None,
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.remittance_information_unstructured = Some(reference.into());
        self
    }

    pub fn with_execution_date(mut self, date: NaiveDate) -> Self {
        self.requested_execution_date = Some(date);
        self
    }
}

/// Response to a payment initiation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitiationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_status: Option<TransactionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sca_methods: Option<Vec<ScaMethod>>,
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PaymentInitiationResponse {
    pub fn sca_redirect(&self) -> Option<&str> {
        link_href(self.links.as_ref(), "scaRedirect")
    }
}

/// Body of `GET /{service}/{product}/{id}/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_status: Option<TransactionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funds_available: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

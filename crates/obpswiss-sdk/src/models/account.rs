//! Accounts, balances and transactions
//!
//! Read-only from the client's side; the bank owns and mutates them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::{AccountReference, Amount, Links};

/// Bank account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balances: Option<Vec<Balance>>,
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Account {
    /// `id`, falling back to `resourceId`
    pub fn display_id(&self) -> Option<&str> {
        self.id.as_deref().or(self.resource_id.as_deref())
    }
}

/// One balance of an account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance_amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_limit_included: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Booked or pending account entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creditor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creditor_account: Option<AccountReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debtor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debtor_account: Option<AccountReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remittance_information_unstructured: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Transaction {
    /// `transactionId`, falling back to `resourceId`
    pub fn display_id(&self) -> Option<&str> {
        self.transaction_id
            .as_deref()
            .or(self.resource_id.as_deref())
    }
}

/// `transactions` field: either a flat list or a booked/pending report
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TransactionList {
    Flat(Vec<Transaction>),
    Report {
        #[serde(default)]
        booked: Vec<Transaction>,
        #[serde(default)]
        pending: Vec<Transaction>,
    },
}

impl TransactionList {
    /// Booked entries first, then pending
    pub(crate) fn into_vec(self) -> Vec<Transaction> {
        match self {
            Self::Flat(items) => items,
            Self::Report { mut booked, pending } => {
                booked.extend(pending);
                booked
            }
        }
    }
}

/// Query for `GET /accounts`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_balance: Option<bool>,
}

/// Which entries to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Booked,
    Pending,
    Both,
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "booked" => Ok(Self::Booked),
            "pending" => Ok(Self::Pending),
            "both" => Ok(Self::Both),
            other => Err(format!("invalid booking status: {} (booked, pending, both)", other)),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Booked => "booked",
            Self::Pending => "pending",
            Self::Both => "both",
        })
    }
}

/// Query for `GET /accounts/{id}/transactions`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with_balance: Option<bool>,
}

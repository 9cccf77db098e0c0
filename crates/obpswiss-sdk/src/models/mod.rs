//! Typed resource models
//!
//! Response models keep every field optional and carry the fields this
//! client does not model in `extra`, so re-serializing prints what the bank
//! sent. Request models skip unset fields.

pub mod account;
pub mod basket;
pub mod consent;
pub mod funds;
pub mod payment;

pub use account::*;
pub use basket::*;
pub use consent::*;
pub use funds::*;
pub use payment::*;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Hypermedia links (`_links`), keyed by relation
pub type Links = Map<String, Value>;

/// `href` of a link relation
pub fn link_href<'a>(links: Option<&'a Links>, relation: &str) -> Option<&'a str> {
    links?.get(relation)?.get("href")?.as_str()
}

/// Monetary amount; the amount stays a decimal string as sent
///
/// Some banks send the amount as a JSON number; it is kept in its decimal form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    #[serde(default, deserialize_with = "decimal_string")]
    pub amount: String,
    #[serde(default)]
    pub currency: String,
}

fn decimal_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected a decimal amount, got {}",
            other
        ))),
    }
}

impl Amount {
    pub fn new(amount: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency: currency.into(),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.currency.is_empty() {
            write!(f, "{}", self.amount)
        } else {
            write!(f, "{} {}", self.amount, self.currency)
        }
    }
}

/// Reference to an account by IBAN (or other identifier)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountReference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bban: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masked_pan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl AccountReference {
    pub fn iban(iban: impl Into<String>) -> Self {
        Self {
            iban: Some(iban.into()),
            ..Default::default()
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_display() {
        assert_eq!(Amount::new("12.50", "CHF").to_string(), "12.50 CHF");
        assert_eq!(Amount::new("3", "").to_string(), "3");
    }

    #[test]
    fn test_amount_accepts_numbers() {
        let amount: Amount =
            serde_json::from_value(json!({ "amount": 1500.5, "currency": "CHF" })).unwrap();
        assert_eq!(amount, Amount::new("1500.5", "CHF"));

        let amount: Amount =
            serde_json::from_value(json!({ "amount": -20, "currency": "EUR" })).unwrap();
        assert_eq!(amount.amount, "-20");

        let amount: Amount =
            serde_json::from_value(json!({ "amount": null, "currency": "EUR" })).unwrap();
        assert_eq!(amount.amount, "");

        assert!(serde_json::from_value::<Amount>(json!({ "amount": [1] })).is_err());
    }

    #[test]
    fn test_account_reference_skips_unset() {
        let reference = AccountReference::iban("CH9300762011623852957").with_currency("CHF");
        assert_eq!(
            serde_json::to_value(&reference).unwrap(),
            json!({ "iban": "CH9300762011623852957", "currency": "CHF" })
        );
    }

    #[test]
    fn test_link_href() {
        let links: Links = serde_json::from_value(json!({
            "scaRedirect": { "href": "https://bank.example/sca" },
            "self": "not-an-object"
        }))
        .unwrap();

        assert_eq!(link_href(Some(&links), "scaRedirect"), Some("https://bank.example/sca"));
        assert_eq!(link_href(Some(&links), "self"), None);
        assert_eq!(link_href(None, "scaRedirect"), None);
    }
}

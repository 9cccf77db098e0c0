//! Consents and their authorisations

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{link_href, AccountReference, Links};
use crate::state::{ConsentStatus, ScaStatus};

/// Value of `availableAccounts` / `allPsd2` granting every account
pub const ALL_ACCOUNTS: &str = "allAccounts";

/// Which data a consent grants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentAccess {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts: Option<Vec<AccountReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balances: Option<Vec<AccountReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transactions: Option<Vec<AccountReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_accounts: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_psd2: Option<String>,
}

/// Body of `POST /consents`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRequest {
    pub access: ConsentAccess,
    pub recurring_indicator: bool,
    pub valid_until: NaiveDate,
    pub frequency_per_day: u32,
    pub combined_service_indicator: bool,
}

impl ConsentRequest {
    /// Accounts, balances and transactions of the given accounts
    pub fn for_accounts(accounts: Vec<AccountReference>, valid_until: NaiveDate) -> Self {
        Self {
            access: ConsentAccess {
                accounts: Some(accounts.clone()),
                balances: Some(accounts.clone()),
                transactions: Some(accounts),
                ..Default::default()
            },
            recurring_indicator: true,
            valid_until,
            frequency_per_day: 4,
            combined_service_indicator: false,
        }
    }

    /// Every PSD2 service on every account
    pub fn all_accounts(valid_until: NaiveDate) -> Self {
        Self {
            access: ConsentAccess {
                all_psd2: Some(ALL_ACCOUNTS.to_string()),
                ..Default::default()
            },
            recurring_indicator: true,
            valid_until,
            frequency_per_day: 4,
            combined_service_indicator: false,
        }
    }

    pub fn recurring(mut self, recurring: bool) -> Self {
        self.recurring_indicator = recurring;
        self
    }

    pub fn frequency_per_day(mut self, frequency: u32) -> Self {
        self.frequency_per_day = frequency;
        self
    }
}

/// An SCA method offered by the bank
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaMethod {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_method_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Consent resource, as created or fetched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_status: Option<ConsentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<ConsentAccess>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_indicator: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_per_day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_action_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sca_methods: Option<Vec<ScaMethod>>,
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Consent {
    pub fn is_usable(&self) -> bool {
        self.consent_status
            .as_ref()
            .map(ConsentStatus::is_usable)
            .unwrap_or(false)
    }

    /// Where to send the account holder for redirect SCA
    pub fn sca_redirect(&self) -> Option<&str> {
        link_href(self.links.as_ref(), "scaRedirect")
    }
}

/// Body of `GET /consents/{id}/status`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentStatusResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consent_status: Option<ConsentStatus>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConsentStatusResponse {
    pub fn is_usable(&self) -> bool {
        self.consent_status
            .as_ref()
            .map(ConsentStatus::is_usable)
            .unwrap_or(false)
    }
}

/// Account holder credentials for embedded SCA
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PsuData {
    pub password: String,
}

/// Body of authorisation create/update: SCA data submitted by the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorisationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psu_data: Option<PsuData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication_method_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sca_authentication_data: Option<String>,
}

impl AuthorisationUpdate {
    /// Identify the account holder with a password
    pub fn password(password: impl Into<String>) -> Self {
        Self {
            psu_data: Some(PsuData {
                password: password.into(),
            }),
            ..Default::default()
        }
    }

    /// Pick one of the offered SCA methods
    pub fn select_method(method_id: impl Into<String>) -> Self {
        Self {
            authentication_method_id: Some(method_id.into()),
            ..Default::default()
        }
    }

    /// Submit a one-time code
    pub fn sca_data(code: impl Into<String>) -> Self {
        Self {
            sca_authentication_data: Some(code.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.psu_data.is_none()
            && self.authentication_method_id.is_none()
            && self.sca_authentication_data.is_none()
    }
}

/// OTP challenge presented by the bank
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp_max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_information: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One SCA attempt scoped to a consent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorisation {
    #[serde(alias = "authorizationId", skip_serializing_if = "Option::is_none")]
    pub authorisation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sca_status: Option<ScaStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sca_methods: Option<Vec<ScaMethod>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chosen_sca_method: Option<ScaMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge_data: Option<ChallengeData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psu_message: Option<String>,
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Authorisation {
    /// Reached `finalised` or `failed` (or was exempted)
    pub fn is_terminal(&self) -> bool {
        self.sca_status
            .as_ref()
            .map(ScaStatus::is_terminal)
            .unwrap_or(false)
    }

    pub fn sca_redirect(&self) -> Option<&str> {
        link_href(self.links.as_ref(), "scaRedirect")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_consent_request_for_accounts() {
        let valid_until = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let request = ConsentRequest::for_accounts(
            vec![AccountReference::iban("CH9300762011623852957")],
            valid_until,
        );
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["access"]["accounts"][0]["iban"], "CH9300762011623852957");
        assert_eq!(body["access"]["transactions"][0]["iban"], "CH9300762011623852957");
        assert!(body["access"].get("allPsd2").is_none());
        assert_eq!(body["validUntil"], "2025-12-31");
        assert_eq!(body["recurringIndicator"], true);
        assert_eq!(body["frequencyPerDay"], 4);
    }

    #[test]
    fn test_consent_request_all_accounts() {
        let valid_until = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        let body = serde_json::to_value(
            ConsentRequest::all_accounts(valid_until)
                .recurring(false)
                .frequency_per_day(1),
        )
        .unwrap();

        assert_eq!(body["access"], json!({ "allPsd2": "allAccounts" }));
        assert_eq!(body["recurringIndicator"], false);
        assert_eq!(body["frequencyPerDay"], 1);
    }

    #[test]
    fn test_consent_usable_only_when_valid() {
        let consent: Consent = serde_json::from_value(json!({
            "consentId": "c1",
            "consentStatus": "received",
            "_links": { "scaRedirect": { "href": "https://bank.example/sca/c1" } }
        }))
        .unwrap();
        assert!(!consent.is_usable());
        assert_eq!(consent.sca_redirect(), Some("https://bank.example/sca/c1"));

        let status: ConsentStatusResponse =
            serde_json::from_value(json!({ "consentStatus": "valid" })).unwrap();
        assert!(status.is_usable());
        assert!(!ConsentStatusResponse::default().is_usable());
    }

    #[test]
    fn test_authorisation_accepts_both_spellings() {
        let a: Authorisation =
            serde_json::from_value(json!({ "authorizationId": "x1", "scaStatus": "started" }))
                .unwrap();
        assert_eq!(a.authorisation_id.as_deref(), Some("x1"));
        assert_eq!(a.sca_status, Some(ScaStatus::Started));
        assert!(!a.is_terminal());

        let b: Authorisation =
            serde_json::from_value(json!({ "authorisationId": "x2", "scaStatus": "finalised" }))
                .unwrap();
        assert_eq!(b.authorisation_id.as_deref(), Some("x2"));
        assert!(b.is_terminal());
    }

    #[test]
    fn test_authorisation_update_bodies() {
        assert_eq!(
            serde_json::to_value(AuthorisationUpdate::sca_data("123456")).unwrap(),
            json!({ "scaAuthenticationData": "123456" })
        );
        assert_eq!(
            serde_json::to_value(AuthorisationUpdate::password("pw")).unwrap(),
            json!({ "psuData": { "password": "pw" } })
        );
        assert!(AuthorisationUpdate::default().is_empty());
        assert!(!AuthorisationUpdate::select_method("sms").is_empty());
    }
}

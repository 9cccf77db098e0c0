//! Consent commands

use chrono::{Duration, NaiveDate, Utc};
use obpswiss_sdk::{
    AccountReference, Consent, ConsentRequest, ConsentStatus, SettingKey, SettingsProvider,
};
use tracing::warn;

use super::{CliError, Context, NO_DATA};
use crate::display::{self, with_spinner};

/// Default consent lifetime when `--valid-until` is omitted
const DEFAULT_VALIDITY_DAYS: i64 = 90;

/// Options of `consents create`
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub ibans: Vec<String>,
    pub all_accounts: bool,
    pub valid_until: Option<NaiveDate>,
    pub frequency: Option<u32>,
    pub recurring: bool,
    pub save: bool,
}

impl CreateOptions {
    /// Request body; exactly one of `--iban` / `--all-accounts` is required
    pub fn to_request(&self, today: NaiveDate) -> Result<ConsentRequest, CliError> {
        let valid_until = self
            .valid_until
            .unwrap_or(today + Duration::days(DEFAULT_VALIDITY_DAYS));
        if valid_until < today {
            return Err(CliError::usage(format!(
                "--valid-until {} is in the past",
                valid_until
            )));
        }

        let request = match (self.all_accounts, self.ibans.is_empty()) {
            (true, false) => {
                return Err(CliError::usage("Use either --iban or --all-accounts, not both."))
            }
            (false, true) => {
                return Err(CliError::usage("Specify at least one --iban, or --all-accounts."))
            }
            (true, true) => ConsentRequest::all_accounts(valid_until),
            (false, false) => ConsentRequest::for_accounts(
                self.ibans.iter().map(AccountReference::iban).collect(),
                valid_until,
            ),
        };

        // One-off consents may only be used once a day
        let frequency = self
            .frequency
            .unwrap_or(if self.recurring { 4 } else { 1 });
        Ok(request.recurring(self.recurring).frequency_per_day(frequency))
    }
}

pub async fn create(ctx: &Context, options: CreateOptions) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let request = options.to_request(Utc::now().date_naive())?;
    let consent = with_spinner("Creating consent...", ctx.client.create_consent(&request)).await?;

    // The consent exists at the bank from here on; report it before saving
    if ctx.json {
        display::json(&consent)?;
        if options.save {
            if let Some(id) = consent.as_ref().and_then(|c| c.consent_id.as_deref()) {
                save_default_consent(ctx.settings().as_ref(), id);
            }
        }
        return Ok(());
    }
    let Some(consent) = consent else {
        display::info(NO_DATA);
        return Ok(());
    };

    let id = consent.consent_id.as_deref().unwrap_or("N/A");
    display::success(&format!("Consent created: {}", id));
    print_status(consent.consent_status.as_ref());
    if let Some(url) = consent.sca_redirect() {
        display::info(&format!("Complete SCA at: {}", url));
    }
    if options.save {
        if let Some(consent_id) = consent.consent_id.as_deref() {
            if save_default_consent(ctx.settings().as_ref(), consent_id) {
                display::info("Saved as default consent");
            } else {
                display::warning(&format!(
                    "Could not save {} as default consent; run: obpswiss config set --consent-id {}",
                    consent_id, consent_id
                ));
            }
        }
    }
    if consent.consent_id.is_some() && !consent.is_usable() {
        display::info(&format!("Next: obpswiss authorisations create {}", id));
    }
    Ok(())
}

/// Store `consent_id` as the default consent; a failed write is logged, not raised
fn save_default_consent(settings: &dyn SettingsProvider, consent_id: &str) -> bool {
    match settings.set(SettingKey::ConsentId, consent_id) {
        Ok(()) => true,
        Err(e) => {
            warn!(consent_id, "could not save default consent: {}", e);
            false
        }
    }
}

pub async fn get(ctx: &Context, consent_id: &str) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let consent = with_spinner("Fetching consent...", ctx.client.get_consent(consent_id)).await?;

    if ctx.json {
        return display::json(&consent);
    }
    let Some(consent) = consent else {
        display::info(NO_DATA);
        return Ok(());
    };
    print_consent(&consent);
    Ok(())
}

pub async fn status(ctx: &Context, consent_id: &str) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let status = with_spinner(
        "Fetching consent status...",
        ctx.client.get_consent_status(consent_id),
    )
    .await?;

    if ctx.json {
        return display::json(&status);
    }
    let Some(status) = status else {
        display::info(NO_DATA);
        return Ok(());
    };
    print_status(status.consent_status.as_ref());
    Ok(())
}

pub async fn delete(ctx: &Context, consent_id: &str) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let deleted = with_spinner("Deleting consent...", ctx.client.delete_consent(consent_id)).await?;

    // Forget the stored default if it was this consent
    if deleted && ctx.settings().get(SettingKey::ConsentId) == consent_id {
        ctx.settings().set(SettingKey::ConsentId, "")?;
    }

    if ctx.json {
        return display::json(&serde_json::json!({ "deleted": deleted }));
    }
    display::success(&format!("Consent {} deleted", consent_id));
    Ok(())
}

fn print_consent(consent: &Consent) {
    let frequency = consent.frequency_per_day.map(|f| f.to_string());
    let recurring = consent
        .recurring_indicator
        .map(|r| if r { "yes" } else { "no" });

    display::section("Consent Details");
    display::labeled("ID", consent.consent_id.as_deref());
    display::labeled("Status", consent.consent_status.as_ref().map(ConsentStatus::as_str));
    display::labeled("Valid until", consent.valid_until.as_deref());
    display::labeled("Recurring", recurring);
    display::labeled("Per day", frequency.as_deref());
    display::labeled("Last action", consent.last_action_date.as_deref());
    if let Some(url) = consent.sca_redirect() {
        display::labeled("SCA redirect", Some(url));
    }
    println!();
}

fn print_status(status: Option<&ConsentStatus>) {
    let Some(status) = status else {
        display::labeled("Status", None);
        return;
    };
    display::labeled("Status", Some(status.as_str()));
    if status.is_usable() {
        display::success("Consent is valid; account data can be accessed");
    } else if status.is_terminal() {
        display::warning(&format!("Consent is {}; create a new one", status));
    } else if status.is_pending() {
        display::info("Consent is waiting for authorisation");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::FileSettings;
    use obpswiss_sdk::MemorySettings;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_requires_account_selection() {
        let err = CreateOptions::default().to_request(today()).unwrap_err();
        assert!(err.to_string().contains("--iban"));

        let both = CreateOptions {
            ibans: vec!["CH93".into()],
            all_accounts: true,
            ..Default::default()
        };
        assert!(both.to_request(today()).is_err());
    }

    #[test]
    fn test_defaults() {
        let options = CreateOptions {
            all_accounts: true,
            recurring: true,
            ..Default::default()
        };
        let request = options.to_request(today()).unwrap();
        assert_eq!(request.valid_until, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert_eq!(request.frequency_per_day, 4);
        assert!(request.recurring_indicator);

        let one_off = CreateOptions {
            ibans: vec!["CH93".into()],
            ..Default::default()
        };
        let request = one_off.to_request(today()).unwrap();
        assert_eq!(request.frequency_per_day, 1);
        assert!(!request.recurring_indicator);
        assert_eq!(request.access.accounts.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_rejects_past_validity() {
        let options = CreateOptions {
            all_accounts: true,
            valid_until: NaiveDate::from_ymd_opt(2024, 12, 31),
            ..Default::default()
        };
        assert!(options.to_request(today()).is_err());
    }

    #[test]
    fn test_save_default_consent() {
        let settings = MemorySettings::with_token("t");
        assert!(save_default_consent(&settings, "c-7"));
        assert_eq!(settings.get(SettingKey::ConsentId), "c-7");
    }

    #[test]
    fn test_failed_save_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let settings = FileSettings::in_dir(dir.path());
        std::fs::write(settings.path(), "{not json").unwrap();

        assert!(!save_default_consent(&settings, "c-7"));
        assert_eq!(std::fs::read_to_string(settings.path()).unwrap(), "{not json");
    }
}

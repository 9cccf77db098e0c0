//! Authorisation (SCA) commands

use obpswiss_sdk::{Authorisation, AuthorisationUpdate, ObpResult, ScaStatus};
use tracing::warn;

use super::{CliError, Context, NO_DATA};
use crate::display::{self, with_spinner};

/// Start SCA for a consent, optionally identifying with a password
pub async fn create(ctx: &Context, consent_id: &str, password: Option<String>) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let update = password
        .map(AuthorisationUpdate::password)
        .unwrap_or_default();
    let auth = with_spinner(
        "Starting authorisation...",
        ctx.client.create_authorisation(consent_id, &update),
    )
    .await?;

    if ctx.json {
        return display::json(&auth);
    }
    let Some(auth) = auth else {
        display::info(NO_DATA);
        return Ok(());
    };

    display::success(&format!(
        "Authorisation started: {}",
        auth.authorisation_id.as_deref().unwrap_or("N/A")
    ));
    print_authorisation(&auth);
    Ok(())
}

pub async fn list(ctx: &Context, consent_id: &str) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let ids = with_spinner(
        "Fetching authorisations...",
        ctx.client.list_authorisations(consent_id),
    )
    .await?;

    if ctx.json {
        return display::json(&ids);
    }
    if ids.is_empty() {
        display::info("No authorisations for this consent.");
        return Ok(());
    }
    for id in &ids {
        println!("  {}", id);
    }
    Ok(())
}

pub async fn get(ctx: &Context, consent_id: &str, authorisation_id: &str) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let auth = with_spinner(
        "Fetching authorisation...",
        ctx.client.get_authorisation(consent_id, authorisation_id),
    )
    .await?;

    if ctx.json {
        return display::json(&auth);
    }
    let Some(auth) = auth else {
        display::info(NO_DATA);
        return Ok(());
    };
    display::section("Authorisation Details");
    display::labeled(
        "ID",
        auth.authorisation_id.as_deref().or(Some(authorisation_id)),
    );
    print_authorisation(&auth);
    Ok(())
}

/// Exactly one of the three inputs, enforced by clap
#[derive(Debug, Clone, Default)]
pub struct UpdateInput {
    pub sca_data: Option<String>,
    pub method_id: Option<String>,
    pub password: Option<String>,
}

impl UpdateInput {
    pub fn into_update(self) -> Result<AuthorisationUpdate, CliError> {
        match (self.sca_data, self.method_id, self.password) {
            (Some(code), None, None) => Ok(AuthorisationUpdate::sca_data(code)),
            (None, Some(method), None) => Ok(AuthorisationUpdate::select_method(method)),
            (None, None, Some(password)) => Ok(AuthorisationUpdate::password(password)),
            _ => Err(CliError::usage(
                "Pass exactly one of --sca-data, --method-id or --password.",
            )),
        }
    }
}

/// Submit SCA data; the current status is read first so an unexpected
/// transition can be flagged, but a failed read never blocks the update
pub async fn update(
    ctx: &Context,
    consent_id: &str,
    authorisation_id: &str,
    input: UpdateInput,
) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let update = input.into_update()?;

    let before = prior_status(
        with_spinner(
            "Checking authorisation...",
            ctx.client.get_authorisation(consent_id, authorisation_id),
        )
        .await,
    );

    if let Some(status) = before.as_ref().filter(|s| s.is_terminal()) {
        display::warning(&format!("Authorisation is already {}", status));
    }

    let after = with_spinner(
        "Submitting authorisation data...",
        ctx.client
            .update_authorisation(consent_id, authorisation_id, &update),
    )
    .await?;

    if ctx.json {
        return display::json(&after);
    }
    let Some(after) = after else {
        display::info(NO_DATA);
        return Ok(());
    };

    if let (Some(from), Some(to)) = (before.as_ref(), after.sca_status.as_ref()) {
        if let Err(e) = from.check_transition(to) {
            display::warning(&format!("Unexpected response: {}", e));
        }
    }
    print_authorisation(&after);

    match after.sca_status {
        Some(ref status) if status.is_success() => {
            display::success("Authorisation complete");
            display::info(&format!("Check the consent: obpswiss consents status {}", consent_id));
        }
        Some(ScaStatus::Failed) => display::warning("Authorisation failed; start a new one"),
        _ => {}
    }
    Ok(())
}

/// Status before an update; unknown when the read fails
fn prior_status(read: ObpResult<Option<Authorisation>>) -> Option<ScaStatus> {
    match read {
        Ok(auth) => auth.and_then(|a| a.sca_status),
        Err(e) => {
            warn!("could not read authorisation status before update: {}", e);
            None
        }
    }
}

fn print_authorisation(auth: &Authorisation) {
    display::labeled("SCA status", auth.sca_status.as_ref().map(ScaStatus::as_str));

    if let Some(method) = &auth.chosen_sca_method {
        display::labeled(
            "Chosen method",
            method
                .name
                .as_deref()
                .or(method.authentication_type.as_deref()),
        );
    }
    for method in auth.sca_methods.iter().flatten() {
        let id = method.authentication_method_id.as_deref().unwrap_or("N/A");
        let name = method
            .name
            .as_deref()
            .or(method.authentication_type.as_deref())
            .unwrap_or("");
        display::item(id, name);
    }
    if let Some(challenge) = &auth.challenge_data {
        display::labeled("Challenge", challenge.additional_information.as_deref());
    }
    if let Some(message) = &auth.psu_message {
        display::info(message);
    }
    if let Some(url) = auth.sca_redirect() {
        display::info(&format!("Complete SCA at: {}", url));
    }
}

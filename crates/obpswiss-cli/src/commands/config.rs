//! Config commands - token and consent storage

use obpswiss_sdk::SettingKey;
use serde_json::json;

use super::Context;
use crate::display;

/// Store the token and/or default consent id
pub fn set(ctx: &Context, token: Option<String>, consent_id: Option<String>) -> anyhow::Result<()> {
    if token.is_none() && consent_id.is_none() {
        display::warning("Nothing to set. Pass --token and/or --consent-id.");
        return Ok(());
    }
    if let Some(token) = token {
        ctx.settings().set(SettingKey::AccessToken, token.trim())?;
        display::success("Token set");
    }
    if let Some(consent_id) = consent_id {
        ctx.settings().set(SettingKey::ConsentId, consent_id.trim())?;
        display::success("Consent ID set");
    }
    Ok(())
}

pub fn show(ctx: &Context) -> anyhow::Result<()> {
    let token = display::mask(&ctx.settings().get(SettingKey::AccessToken));
    let consent_id = ctx.settings().get(SettingKey::ConsentId);
    let consent_id = Some(consent_id).filter(|c| !c.is_empty());

    if ctx.json {
        return display::json(&json!({
            "accessToken": token,
            "consentId": consent_id,
            "apiUrl": ctx.client.base_url(),
            "path": ctx.config_path.display().to_string(),
        }));
    }

    display::section("OBP Swiss Configuration");
    display::labeled("Access Token", Some(token.as_deref().unwrap_or("not set")));
    display::labeled("Consent ID", Some(consent_id.as_deref().unwrap_or("not set")));
    display::labeled("API URL", Some(ctx.client.base_url()));
    display::labeled("Config file", Some(&ctx.config_path.display().to_string()));
    println!();
    Ok(())
}

pub fn clear(ctx: &Context) -> anyhow::Result<()> {
    ctx.settings().clear()?;
    display::success("Configuration cleared");
    Ok(())
}

pub fn path(ctx: &Context) -> anyhow::Result<()> {
    println!("{}", ctx.config_path.display());
    Ok(())
}

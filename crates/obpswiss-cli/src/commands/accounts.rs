//! Account commands

use obpswiss_sdk::{Account, AccountListParams};

use super::{Context, NO_DATA};
use crate::display::{self, with_spinner};

pub async fn list(ctx: &Context, with_balance: bool) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let params = AccountListParams {
        with_balance: with_balance.then_some(true),
    };
    let accounts = with_spinner("Fetching accounts...", ctx.client.list_accounts(&params)).await?;

    if ctx.json {
        return display::json(&accounts);
    }
    if accounts.is_empty() {
        display::info("No accounts found.");
        return Ok(());
    }
    for account in &accounts {
        display::item(
            account.display_id().unwrap_or("N/A"),
            &summary(account),
        );
    }
    Ok(())
}

pub async fn get(ctx: &Context, account_id: &str) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let account = with_spinner("Fetching account...", ctx.client.get_account(account_id)).await?;

    if ctx.json {
        return display::json(&account);
    }
    let Some(account) = account else {
        display::info(NO_DATA);
        return Ok(());
    };

    display::section("Account Details");
    display::labeled("ID", account.display_id());
    display::labeled("Type", account.account_type.as_deref());
    display::labeled("IBAN", account.iban.as_deref());
    display::labeled("Currency", account.currency.as_deref());
    display::labeled("Name", account.name.as_deref());
    for balance in account.balances.iter().flatten() {
        let amount = balance.balance_amount.as_ref().map(ToString::to_string);
        display::labeled(
            balance.balance_type.as_deref().unwrap_or("balance"),
            amount.as_deref(),
        );
    }
    println!();
    Ok(())
}

pub async fn balances(ctx: &Context, account_id: &str) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let balances = with_spinner(
        "Fetching balances...",
        ctx.client.get_account_balances(account_id),
    )
    .await?;

    if ctx.json {
        return display::json(&balances);
    }
    if balances.is_empty() {
        display::info("No balances reported.");
        return Ok(());
    }
    for balance in &balances {
        let amount = balance
            .balance_amount
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "N/A".to_string());
        let date = balance
            .reference_date
            .as_deref()
            .map(|d| format!(" ({})", d))
            .unwrap_or_default();
        display::item(
            balance.balance_type.as_deref().unwrap_or("balance"),
            &format!("{}{}", amount, date),
        );
    }
    Ok(())
}

/// `CACC · CH93... · CHF`
fn summary(account: &Account) -> String {
    let parts: Vec<&str> = [
        account.account_type.as_deref(),
        account.iban.as_deref(),
        account.currency.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        "N/A".to_string()
    } else {
        parts.join(" · ")
    }
}

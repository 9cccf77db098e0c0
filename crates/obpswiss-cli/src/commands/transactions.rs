//! Transaction commands

use chrono::NaiveDate;
use obpswiss_sdk::{BookingStatus, Transaction, TransactionParams};

use super::{Context, NO_DATA};
use crate::display::{self, with_spinner};

pub async fn list(
    ctx: &Context,
    account_id: &str,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    booking_status: Option<BookingStatus>,
) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let params = TransactionParams {
        date_from,
        date_to,
        booking_status,
        with_balance: None,
    };
    let transactions = with_spinner(
        "Fetching transactions...",
        ctx.client.list_account_transactions(account_id, &params),
    )
    .await?;

    if ctx.json {
        return display::json(&transactions);
    }
    if transactions.is_empty() {
        display::info("No transactions found.");
        return Ok(());
    }
    for tx in &transactions {
        display::item(tx.display_id().unwrap_or("N/A"), &summary(tx));
    }
    Ok(())
}

pub async fn get(ctx: &Context, account_id: &str, transaction_id: &str) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let tx = with_spinner(
        "Fetching transaction...",
        ctx.client.get_transaction(account_id, transaction_id),
    )
    .await?;

    if ctx.json {
        return display::json(&tx);
    }
    let Some(tx) = tx else {
        display::info(NO_DATA);
        return Ok(());
    };

    let amount = tx.transaction_amount.as_ref().map(ToString::to_string);
    display::section("Transaction Details");
    display::labeled("ID", tx.display_id());
    display::labeled("Amount", amount.as_deref());
    display::labeled("Booking date", tx.booking_date.as_deref());
    display::labeled("Value date", tx.value_date.as_deref());
    display::labeled("Creditor", tx.creditor_name.as_deref());
    display::labeled(
        "Creditor IBAN",
        tx.creditor_account.as_ref().and_then(|a| a.iban.as_deref()),
    );
    display::labeled("Debtor", tx.debtor_name.as_deref());
    display::labeled(
        "Debtor IBAN",
        tx.debtor_account.as_ref().and_then(|a| a.iban.as_deref()),
    );
    display::labeled("Reference", tx.remittance_information_unstructured.as_deref());
    println!();
    Ok(())
}

/// Amount, then booking date and counterparty when known
fn summary(tx: &Transaction) -> String {
    let mut line = tx
        .transaction_amount
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "N/A".to_string());
    if let Some(date) = tx.booking_date.as_deref() {
        line.push_str(&format!("  {}", date));
    }
    if let Some(party) = tx.creditor_name.as_deref().or(tx.debtor_name.as_deref()) {
        line.push_str(&format!("  {}", party));
    }
    line
}

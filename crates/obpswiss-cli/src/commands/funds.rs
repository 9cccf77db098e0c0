//! Funds confirmation command

use obpswiss_sdk::{AccountReference, Amount, FundsConfirmationRequest};

use super::{Context, NO_DATA};
use crate::display::{self, with_spinner};

pub async fn confirm(ctx: &Context, iban: &str, amount: &str, currency: &str) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let request = FundsConfirmationRequest::new(
        AccountReference::iban(iban),
        Amount::new(amount, currency.to_uppercase()),
    );
    let answer = with_spinner("Checking funds...", ctx.client.confirm_funds(&request)).await?;

    if ctx.json {
        return display::json(&answer);
    }
    match answer.and_then(|a| a.funds_available) {
        Some(true) => display::success(&format!("{} available", request.instructed_amount)),
        Some(false) => display::warning(&format!("{} not available", request.instructed_amount)),
        None => display::info(NO_DATA),
    }
    Ok(())
}

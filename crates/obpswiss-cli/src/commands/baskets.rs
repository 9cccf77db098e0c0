//! Signing basket commands

use obpswiss_sdk::{SigningBasket, SigningBasketRequest, TransactionStatus};

use super::{CliError, Context, NO_DATA};
use crate::display::{self, with_spinner};

pub async fn create(
    ctx: &Context,
    payment_ids: Vec<String>,
    consent_ids: Vec<String>,
) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let request = SigningBasketRequest::new(payment_ids, consent_ids);
    if request.is_empty() {
        return Err(CliError::usage("Add at least one --payment-id or --consent-id.").into());
    }

    let basket = with_spinner(
        "Creating signing basket...",
        ctx.client.create_signing_basket(&request),
    )
    .await?;

    if ctx.json {
        return display::json(&basket);
    }
    let Some(basket) = basket else {
        display::info(NO_DATA);
        return Ok(());
    };
    display::success(&format!(
        "Signing basket created: {}",
        basket.basket_id.as_deref().unwrap_or("N/A")
    ));
    print_basket(&basket);
    Ok(())
}

pub async fn get(ctx: &Context, basket_id: &str) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let basket = with_spinner(
        "Fetching signing basket...",
        ctx.client.get_signing_basket(basket_id),
    )
    .await?;

    if ctx.json {
        return display::json(&basket);
    }
    let Some(basket) = basket else {
        display::info(NO_DATA);
        return Ok(());
    };
    display::section("Signing Basket");
    display::labeled("ID", basket.basket_id.as_deref().or(Some(basket_id)));
    print_basket(&basket);
    Ok(())
}

fn print_basket(basket: &SigningBasket) {
    display::labeled(
        "Status",
        basket.transaction_status.as_ref().map(TransactionStatus::code),
    );
    for id in basket.payments.iter().flatten() {
        display::item(id, "payment");
    }
    for id in basket.consents.iter().flatten() {
        display::item(id, "consent");
    }
}

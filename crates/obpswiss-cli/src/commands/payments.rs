//! Payment commands

use chrono::NaiveDate;
use obpswiss_sdk::{AccountReference, Amount, PaymentInitiation, PaymentService, TransactionStatus};

use super::{Context, NO_DATA};
use crate::display::{self, with_spinner};

/// Options of `payments initiate`
#[derive(Debug, Clone)]
pub struct InitiateOptions {
    pub service: PaymentService,
    pub product: String,
    pub amount: String,
    pub currency: String,
    pub debtor_iban: String,
    pub creditor_iban: String,
    pub creditor_name: String,
    pub reference: Option<String>,
    pub execution_date: Option<NaiveDate>,
}

impl InitiateOptions {
    pub fn to_payment(&self) -> PaymentInitiation {
        let mut payment = PaymentInitiation::credit_transfer(
            AccountReference::iban(&self.debtor_iban),
            AccountReference::iban(&self.creditor_iban),
            &self.creditor_name,
            Amount::new(&self.amount, self.currency.to_uppercase()),
        );
        if let Some(reference) = &self.reference {
            payment = payment.with_reference(reference);
        }
        if let Some(date) = self.execution_date {
            payment = payment.with_execution_date(date);
        }
        payment
    }
}

pub async fn initiate(ctx: &Context, options: InitiateOptions) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let payment = options.to_payment();
    let response = with_spinner(
        "Initiating payment...",
        ctx.client
            .initiate_payment(options.service, &options.product, &payment),
    )
    .await?;

    if ctx.json {
        return display::json(&response);
    }
    let Some(response) = response else {
        display::info(NO_DATA);
        return Ok(());
    };

    display::success(&format!(
        "Payment initiated: {}",
        response.payment_id.as_deref().unwrap_or("N/A")
    ));
    display::labeled("Amount", Some(&payment.instructed_amount.to_string()));
    display::labeled("Creditor", Some(&payment.creditor_name));
    print_status(response.transaction_status.as_ref());
    if let Some(url) = response.sca_redirect() {
        display::info(&format!("Authorise the payment at: {}", url));
    }
    Ok(())
}

pub async fn status(
    ctx: &Context,
    service: PaymentService,
    product: &str,
    payment_id: &str,
) -> anyhow::Result<()> {
    ctx.require_auth()?;
    let status = with_spinner(
        "Fetching payment status...",
        ctx.client.get_payment_status(service, product, payment_id),
    )
    .await?;

    if ctx.json {
        return display::json(&status);
    }
    let Some(status) = status else {
        display::info(NO_DATA);
        return Ok(());
    };

    print_status(status.transaction_status.as_ref());
    if let Some(available) = status.funds_available {
        display::labeled("Funds", Some(if available { "available" } else { "insufficient" }));
    }
    Ok(())
}

fn print_status(status: Option<&TransactionStatus>) {
    let Some(status) = status else {
        display::labeled("Status", None);
        return;
    };
    display::labeled(
        "Status",
        Some(&format!("{} ({})", status.code(), status.description())),
    );
    if status.is_rejected() {
        display::warning("The bank rejected this payment");
    } else if status.is_terminal() {
        display::success("Payment settled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_payment() {
        let options = InitiateOptions {
            service: PaymentService::Payments,
            product: "sepa-credit-transfers".into(),
            amount: "10.00".into(),
            currency: "eur".into(),
            debtor_iban: "CH9300762011623852957".into(),
            creditor_iban: "DE89370400440532013000".into(),
            creditor_name: "Muster AG".into(),
            reference: Some("Invoice 7".into()),
            execution_date: None,
        };
        let payment = options.to_payment();
        assert_eq!(payment.instructed_amount, Amount::new("10.00", "EUR"));
        assert_eq!(payment.creditor_account.iban.as_deref(), Some("DE89370400440532013000"));
        assert_eq!(payment.remittance_information_unstructured.as_deref(), Some("Invoice 7"));
        assert!(payment.requested_execution_date.is_none());
    }
}

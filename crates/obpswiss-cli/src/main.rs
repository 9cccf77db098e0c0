//! OBP Swiss CLI - Open Banking from your terminal
//!
//! Talks to a NextGenPSD2 API with a bearer token stored in the local
//! settings file. Account data needs a `valid` consent; the `consents` and
//! `authorisations` commands walk through getting one.
//!
//! # Quick Start
//!
//! ```bash
//! obpswiss config set --token <token>
//! obpswiss consents create --all-accounts --recurring --save
//! obpswiss authorisations create <consent-id> --password <pw>
//! obpswiss authorisations update <consent-id> <auth-id> --sca-data 123456
//! obpswiss accounts list
//! ```

use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};
use obpswiss_sdk::{BookingStatus, ObpClient, ObpError, PaymentService};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod settings;

use commands::{
    accounts, authorisations, baskets, config, consents, funds, payments, transactions, CliError,
    Context,
};
use settings::FileSettings;

const DEFAULT_LOG_FILTER: &str = "obpswiss_sdk=debug,obpswiss=debug";

/// OBP Swiss CLI - Swiss NextGen Banking from your terminal
#[derive(Parser)]
#[command(name = "obpswiss")]
#[command(author = "OBP Swiss Contributors")]
#[command(version)]
#[command(about = "Swiss NextGen Banking CLI - Open Banking from your terminal", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// API base URL (defaults to $OBPSWISS_API_URL, then the OBP sandbox)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print raw JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage CLI configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Manage accounts
    Accounts {
        #[command(subcommand)]
        action: AccountCommands,
    },

    /// View transactions
    Transactions {
        #[command(subcommand)]
        action: TransactionCommands,
    },

    /// Manage consents
    Consents {
        #[command(subcommand)]
        action: ConsentCommands,
    },

    /// Drive Strong Customer Authentication for a consent
    #[command(alias = "auth")]
    Authorisations {
        #[command(subcommand)]
        action: AuthorisationCommands,
    },

    /// Initiate payments and follow their status
    Payments {
        #[command(subcommand)]
        action: PaymentCommands,
    },

    /// Group payments and consents under one SCA
    Baskets {
        #[command(subcommand)]
        action: BasketCommands,
    },

    /// Ask whether an amount is available on an account
    Funds {
        #[command(subcommand)]
        action: FundsCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Store the access token and/or default consent
    Set {
        /// Access token
        #[arg(long)]
        token: Option<String>,

        /// Default consent id
        #[arg(long)]
        consent_id: Option<String>,
    },

    /// Show the stored configuration (token masked)
    Show,

    /// Remove every stored setting
    Clear,

    /// Print the settings file location
    Path,
}

#[derive(Subcommand)]
enum AccountCommands {
    /// List accounts
    List {
        /// Include balances
        #[arg(long)]
        with_balance: bool,
    },

    /// Show one account
    Get {
        account_id: String,
    },

    /// Show balances of an account
    Balances {
        account_id: String,
    },
}

#[derive(Subcommand)]
enum TransactionCommands {
    /// List transactions of an account
    List {
        account_id: String,

        /// First booking date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last booking date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// booked, pending or both
        #[arg(long)]
        booking_status: Option<BookingStatus>,
    },

    /// Show one transaction
    Get {
        account_id: String,
        transaction_id: String,
    },
}

#[derive(Subcommand)]
enum ConsentCommands {
    /// Request a new consent
    Create {
        /// Account to grant access to (repeatable)
        #[arg(long = "iban")]
        ibans: Vec<String>,

        /// Grant access to every account
        #[arg(long)]
        all_accounts: bool,

        /// Last day the consent is valid (YYYY-MM-DD, default: 90 days)
        #[arg(long)]
        valid_until: Option<NaiveDate>,

        /// Accesses per day without the account holder present
        #[arg(long)]
        frequency: Option<u32>,

        /// Allow repeated access
        #[arg(long)]
        recurring: bool,

        /// Store the new consent id as the default
        #[arg(long)]
        save: bool,
    },

    /// Show a consent
    Get {
        consent_id: String,
    },

    /// Show the status of a consent
    Status {
        consent_id: String,
    },

    /// Revoke a consent
    Delete {
        consent_id: String,
    },
}

#[derive(Subcommand)]
enum AuthorisationCommands {
    /// Start SCA for a consent
    Create {
        consent_id: String,

        /// Identify with a password (embedded SCA)
        #[arg(long)]
        password: Option<String>,
    },

    /// List authorisation ids of a consent
    List {
        consent_id: String,
    },

    /// Show one authorisation
    Get {
        consent_id: String,
        authorisation_id: String,
    },

    /// Submit OTP, method choice or password
    #[command(group(
        ArgGroup::new("sca_input")
            .required(true)
            .args(["sca_data", "method_id", "password"])
    ))]
    Update {
        consent_id: String,
        authorisation_id: String,

        /// One-time code
        #[arg(long)]
        sca_data: Option<String>,

        /// Chosen SCA method id
        #[arg(long)]
        method_id: Option<String>,

        /// Account holder password
        #[arg(long)]
        password: Option<String>,
    },
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Initiate a credit transfer
    Initiate {
        /// payments, bulk-payments or periodic-payments
        #[arg(long, default_value = "payments")]
        service: PaymentService,

        /// Payment product, e.g. sepa-credit-transfers
        #[arg(long)]
        product: String,

        /// Decimal amount, e.g. 120.50
        #[arg(long)]
        amount: String,

        #[arg(long)]
        currency: String,

        #[arg(long)]
        debtor_iban: String,

        #[arg(long)]
        creditor_iban: String,

        #[arg(long)]
        creditor_name: String,

        /// Unstructured remittance information
        #[arg(long)]
        reference: Option<String>,

        /// Requested execution date (YYYY-MM-DD)
        #[arg(long)]
        execution_date: Option<NaiveDate>,
    },

    /// Show the status of a payment
    Status {
        payment_id: String,

        #[arg(long, default_value = "payments")]
        service: PaymentService,

        #[arg(long)]
        product: String,
    },
}

#[derive(Subcommand)]
enum BasketCommands {
    /// Create a signing basket
    Create {
        /// Payment to include (repeatable)
        #[arg(long = "payment-id")]
        payment_ids: Vec<String>,

        /// Consent to include (repeatable)
        #[arg(long = "consent-id")]
        consent_ids: Vec<String>,
    },

    /// Show a signing basket
    Get {
        basket_id: String,
    },
}

#[derive(Subcommand)]
enum FundsCommands {
    /// Check whether an amount is available
    Confirm {
        #[arg(long)]
        iban: String,

        #[arg(long)]
        amount: String,

        #[arg(long)]
        currency: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if cli.verbose {
        init_logging();
    }

    if let Err(err) = run(cli).await {
        display::error(&err.to_string());
        if matches!(err.downcast_ref::<CliError>(), Some(CliError::TokenNotConfigured)) {
            println!();
            println!("{}", obpswiss_sdk::error::TOKEN_HINT);
        }
        std::process::exit(exit_code(&err));
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();
}

/// SDK errors carry their own code; anything else is a plain failure
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ObpError>()
        .map(ObpError::exit_code)
        .unwrap_or(1)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = FileSettings::from_env()?;
    let config_path = settings.path().to_path_buf();
    let settings = Arc::new(settings);
    let client = match &cli.api_url {
        Some(url) => ObpClient::with_base_url(settings, url),
        None => ObpClient::from_env(settings),
    };
    tracing::debug!(base_url = client.base_url(), config = %config_path.display(), "starting");

    let ctx = Context {
        client,
        json: cli.json,
        config_path,
    };

    match cli.command {
        // ===== Config =====
        Commands::Config { action } => match action {
            ConfigCommands::Set { token, consent_id } => config::set(&ctx, token, consent_id)?,
            ConfigCommands::Show => config::show(&ctx)?,
            ConfigCommands::Clear => config::clear(&ctx)?,
            ConfigCommands::Path => config::path(&ctx)?,
        },

        // ===== Account information =====
        Commands::Accounts { action } => match action {
            AccountCommands::List { with_balance } => accounts::list(&ctx, with_balance).await?,
            AccountCommands::Get { account_id } => accounts::get(&ctx, &account_id).await?,
            AccountCommands::Balances { account_id } => {
                accounts::balances(&ctx, &account_id).await?
            }
        },

        Commands::Transactions { action } => match action {
            TransactionCommands::List {
                account_id,
                from,
                to,
                booking_status,
            } => transactions::list(&ctx, &account_id, from, to, booking_status).await?,
            TransactionCommands::Get {
                account_id,
                transaction_id,
            } => transactions::get(&ctx, &account_id, &transaction_id).await?,
        },

        // ===== Consent lifecycle =====
        Commands::Consents { action } => match action {
            ConsentCommands::Create {
                ibans,
                all_accounts,
                valid_until,
                frequency,
                recurring,
                save,
            } => {
                let options = consents::CreateOptions {
                    ibans,
                    all_accounts,
                    valid_until,
                    frequency,
                    recurring,
                    save,
                };
                consents::create(&ctx, options).await?
            }
            ConsentCommands::Get { consent_id } => consents::get(&ctx, &consent_id).await?,
            ConsentCommands::Status { consent_id } => consents::status(&ctx, &consent_id).await?,
            ConsentCommands::Delete { consent_id } => consents::delete(&ctx, &consent_id).await?,
        },

        Commands::Authorisations { action } => match action {
            AuthorisationCommands::Create {
                consent_id,
                password,
            } => authorisations::create(&ctx, &consent_id, password).await?,
            AuthorisationCommands::List { consent_id } => {
                authorisations::list(&ctx, &consent_id).await?
            }
            AuthorisationCommands::Get {
                consent_id,
                authorisation_id,
            } => authorisations::get(&ctx, &consent_id, &authorisation_id).await?,
            AuthorisationCommands::Update {
                consent_id,
                authorisation_id,
                sca_data,
                method_id,
                password,
            } => {
                let input = authorisations::UpdateInput {
                    sca_data,
                    method_id,
                    password,
                };
                authorisations::update(&ctx, &consent_id, &authorisation_id, input).await?
            }
        },

        // ===== Payments =====
        Commands::Payments { action } => match action {
            PaymentCommands::Initiate {
                service,
                product,
                amount,
                currency,
                debtor_iban,
                creditor_iban,
                creditor_name,
                reference,
                execution_date,
            } => {
                let options = payments::InitiateOptions {
                    service,
                    product,
                    amount,
                    currency,
                    debtor_iban,
                    creditor_iban,
                    creditor_name,
                    reference,
                    execution_date,
                };
                payments::initiate(&ctx, options).await?
            }
            PaymentCommands::Status {
                payment_id,
                service,
                product,
            } => payments::status(&ctx, service, &product, &payment_id).await?,
        },

        Commands::Baskets { action } => match action {
            BasketCommands::Create {
                payment_ids,
                consent_ids,
            } => baskets::create(&ctx, payment_ids, consent_ids).await?,
            BasketCommands::Get { basket_id } => baskets::get(&ctx, &basket_id).await?,
        },

        Commands::Funds { action } => match action {
            FundsCommands::Confirm {
                iban,
                amount,
                currency,
            } => funds::confirm(&ctx, &iban, &amount, &currency).await?,
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_update_requires_one_input() {
        let parsed = Cli::try_parse_from(["obpswiss", "auth", "update", "c1", "a1"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from([
            "obpswiss", "auth", "update", "c1", "a1", "--sca-data", "1", "--password", "pw",
        ]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from(["obpswiss", "auth", "update", "c1", "a1", "--sca-data", "1"]);
        assert!(parsed.is_ok());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "obpswiss", "accounts", "list", "--json", "--api-url", "http://localhost:1",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:1"));
    }

    #[test]
    fn test_typed_arguments() {
        let cli = Cli::try_parse_from([
            "obpswiss", "transactions", "list", "a1", "--from", "2024-01-01", "--booking-status", "pending",
        ])
        .unwrap();
        match cli.command {
            Commands::Transactions {
                action: TransactionCommands::List { from, booking_status, .. },
            } => {
                assert_eq!(from, NaiveDate::from_ymd_opt(2024, 1, 1));
                assert_eq!(booking_status, Some(BookingStatus::Pending));
            }
            _ => panic!("unexpected command"),
        }

        assert!(Cli::try_parse_from(["obpswiss", "payments", "status", "p1", "--product", "x", "--service", "wire"]).is_err());
    }

    #[test]
    fn test_exit_code_for_sdk_errors() {
        let err = anyhow::Error::new(ObpError::NotFound);
        assert_eq!(exit_code(&err), 4);

        let err = anyhow::Error::new(CliError::TokenNotConfigured);
        assert_eq!(exit_code(&err), 1);
    }
}

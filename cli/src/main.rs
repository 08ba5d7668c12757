mod commands;
mod config;
mod messages;
mod output;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client::{ApiClient, FileSessionStore, SessionEvent};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use commands::auth::{LoginArgs, RegisterArgs};
use commands::cart::CartCommand;
use commands::orders::OrdersCommand;
use commands::payment_methods::PaymentMethodsCommand;
use commands::products::ProductsCommand;
use commands::profile::{AddressCommand, ProfileCommand};
use commands::reviews::ReviewsCommand;
use commands::wishlist::WishlistCommand;
use config::Config;
use output::Output;

/// Command line storefront for the bookstore.
#[derive(Parser, Debug)]
#[command(name = "storefront", version)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and keep the session for later commands
    Login(LoginArgs),
    /// Sign out and forget the saved session
    Logout,
    /// Create an account
    Register(RegisterArgs),
    /// Show the signed-in user
    Whoami,
    #[command(subcommand)]
    Products(ProductsCommand),
    #[command(subcommand)]
    Cart(CartCommand),
    #[command(subcommand)]
    Orders(OrdersCommand),
    #[command(subcommand)]
    Reviews(ReviewsCommand),
    #[command(subcommand)]
    Wishlist(WishlistCommand),
    #[command(subcommand)]
    PaymentMethods(PaymentMethodsCommand),
    #[command(subcommand)]
    Profile(ProfileCommand),
    #[command(subcommand)]
    Address(AddressCommand),
}

impl Command {
    // A 401 from these is a credential problem, not an ended session.
    fn authenticates(&self) -> bool {
        matches!(self, Command::Login(_) | Command::Register(_))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            debug!(?error, "Command failed");
            eprintln!("error: {}", messages::describe(&error));
            ExitCode::FAILURE
        }
    }
}

fn open_client(config: &Config) -> Result<ApiClient> {
    let session_path = config.session_path()?;
    info!(api_url = %config.api_url, session = %session_path.display(), "Opening storefront client");
    let store = Arc::new(FileSessionStore::new(session_path));
    Ok(ApiClient::new(config.client_config(), store)?)
}

async fn run(cli: Cli) -> Result<()> {
    let api = open_client(&cli.config)?;
    let output = Output::new(cli.config.json);
    let mut events = api.subscribe();
    let was_signed_in = api.is_authenticated().unwrap_or_else(|error| {
        warn!(%error, "Saved session is unreadable, treating as signed out");
        false
    });
    let authenticates = cli.command.authenticates();

    let result = dispatch(cli.command, &api, &output).await;

    if !authenticates {
        report_session_events(&mut events, was_signed_in);
    }
    result
}

async fn dispatch(command: Command, api: &ApiClient, output: &Output) -> Result<()> {
    match command {
        Command::Login(args) => commands::auth::login(args, api, output).await,
        Command::Logout => commands::auth::logout(api, output).await,
        Command::Register(args) => commands::auth::register(args, api, output).await,
        Command::Whoami => commands::auth::whoami(api, output),
        Command::Products(command) => commands::products::execute(command, api, output).await,
        Command::Cart(command) => commands::cart::execute(command, api, output).await,
        Command::Orders(command) => commands::orders::execute(command, api, output).await,
        Command::Reviews(command) => commands::reviews::execute(command, api, output).await,
        Command::Wishlist(command) => commands::wishlist::execute(command, api, output).await,
        Command::PaymentMethods(command) => {
            commands::payment_methods::execute(command, api, output).await
        }
        Command::Profile(command) => commands::profile::execute(command, api, output).await,
        Command::Address(command) => {
            commands::profile::execute_address(command, api, output).await
        }
    }
}

fn report_session_events(events: &mut broadcast::Receiver<SessionEvent>, was_signed_in: bool) {
    loop {
        match events.try_recv() {
            Ok(SessionEvent::Expired { path, redirect_to }) => {
                debug!(%path, %redirect_to, "Session expired");
                eprintln!("{}", expiry_notice(was_signed_in));
            }
            Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

fn expiry_notice(was_signed_in: bool) -> &'static str {
    if was_signed_in {
        "Your session has expired, sign in again with `storefront login`."
    } else {
        "Sign in required, run `storefront login` first."
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use shared::{OrderStatus, PaymentMethodType};

    #[test]
    fn test_parse_nested_commands() {
        let cli = Cli::try_parse_from([
            "storefront",
            "--api-url",
            "http://store.test/api",
            "orders",
            "status",
            "42",
            "shipped",
        ])
        .unwrap();
        assert_eq!(cli.config.api_url.as_str(), "http://store.test/api");
        match cli.command {
            Command::Orders(OrdersCommand::Status { id, status }) => {
                assert_eq!(id, 42);
                assert_eq!(status, OrderStatus::Shipped);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_card_type_aliases() {
        let cli = Cli::try_parse_from([
            "storefront",
            "payment-methods",
            "add-card",
            "--type",
            "debit",
            "--holder",
            "Ada Reader",
            "--number",
            "4000056655665556",
            "--expiry-month",
            "09",
            "--expiry-year",
            "2029",
            "--cvv",
            "123",
        ])
        .unwrap();
        match cli.command {
            Command::PaymentMethods(PaymentMethodsCommand::AddCard(args)) => {
                assert_eq!(args.card_type, PaymentMethodType::DebitCard);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_anonymous_prefixes_are_comma_separated() {
        let cli = Cli::try_parse_from([
            "storefront",
            "--anonymous-prefix",
            "/Products,/Catalog",
            "whoami",
        ])
        .unwrap();
        let config = cli.config.client_config();
        assert!(config.tolerates_anonymous("/Catalog/3"));
        assert!(!config.tolerates_anonymous("/Wishlist"));
    }

    #[test]
    fn test_review_rating_is_bounded() {
        let result = Cli::try_parse_from([
            "storefront", "reviews", "add", "3", "--rating", "6",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_only_auth_commands_skip_expiry_reports() {
        let login = Cli::try_parse_from(["storefront", "login", "reader", "--password", "x"]).unwrap();
        assert!(login.command.authenticates());
        let cart = Cli::try_parse_from(["storefront", "cart", "show"]).unwrap();
        assert!(!cart.command.authenticates());
    }

    fn cli_with_session_file(session_file: &std::path::Path, command: &str) -> Result<Cli> {
        let session_file = session_file.to_str().context("non utf-8 temp path")?;
        Ok(Cli::try_parse_from([
            "storefront",
            "--api-url",
            "http://127.0.0.1:9/api",
            "--session-file",
            session_file,
            command,
        ])?)
    }

    #[tokio::test]
    async fn test_logout_discards_unreadable_session_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let session_file = dir.path().join("session.json");
        std::fs::write(&session_file, "{not json")?;

        run(cli_with_session_file(&session_file, "logout")?).await?;

        assert!(!session_file.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_logout_clears_user_left_without_token() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let session_file = dir.path().join("session.json");
        let leftover = client::UserSession {
            token: None,
            user: Some(shared::UserInfo {
                id: 7,
                username: Some("reader".to_owned()),
                email: None,
                first_name: None,
                last_name: None,
                phone_number: None,
                role: None,
                created_at: "2024-05-01T10:00:00".to_owned(),
            }),
        };
        client::SessionStore::save(&FileSessionStore::new(&session_file), &leftover)?;

        run(cli_with_session_file(&session_file, "logout")?).await?;

        assert!(!session_file.exists());
        Ok(())
    }

    #[test]
    fn test_open_client_with_missing_session_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let session_file = dir.path().join("session.json");
        let cli = Cli::try_parse_from([
            "storefront",
            "--session-file",
            session_file.to_str().unwrap(),
            "whoami",
        ])?;
        let api = open_client(&cli.config)?;
        assert!(!api.is_authenticated()?);
        assert_eq!(expiry_notice(false), "Sign in required, run `storefront login` first.");
        Ok(())
    }
}

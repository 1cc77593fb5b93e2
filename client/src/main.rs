//! `catalogue` command-line client.
//!
//! Each invocation restores the persisted session, runs one command, and
//! exits. Product and alert commands pass through the access guard first.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::sync::Arc;

use catalogue_client::app::CatalogueClient;
use catalogue_client::config::ClientSettings;
use catalogue_client::domain::{
    DateRange, EntityId, GuardDecision, Product, ProductDraft, ProductPatch,
};
use catalogue_client::outbound::navigation::LoggingNavigator;
use clap::{Args, Parser, Subcommand};
use ortho_config::OrthoConfig;
use color_eyre::eyre::{Context, Result, eyre};
use pagination::{PageDescriptor, PaginatedView};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `catalogue` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "catalogue",
    about = "Sign in to the product catalogue and manage the cached product list",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and persist the session token.
    Login {
        /// Account name.
        #[arg(long)]
        username: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// End the session and clear the stored token.
    Logout,
    /// Report whether a valid session is stored.
    Status,
    /// Work with the cached product list.
    #[command(subcommand)]
    Products(ProductsCommand),
    /// Show alerts raised for one product.
    Alerts(AlertsArgs),
}

#[derive(Debug, Subcommand)]
enum ProductsCommand {
    /// Show one page of products.
    List {
        /// Zero-based page index.
        #[arg(long, default_value_t = 0)]
        page: usize,
        /// Rows per page; defaults to the configured page size.
        #[arg(long)]
        page_size: Option<usize>,
        /// Replace the cached list, local edits included, with a fresh fetch.
        #[arg(long)]
        refresh: bool,
    },
    /// Add a product to the local list.
    Add {
        /// Product name.
        #[arg(long)]
        name: String,
        /// Product URL (`http://` or `https://`).
        #[arg(long)]
        url: String,
    },
    /// Change fields of a product in the local list.
    Update {
        /// Product id.
        id: String,
        /// New product name.
        #[arg(long)]
        name: Option<String>,
        /// New product URL.
        #[arg(long)]
        url: Option<String>,
    },
    /// Remove a product from the local list.
    Delete {
        /// Product id.
        id: String,
    },
}

#[derive(Debug, Args)]
struct AlertsArgs {
    /// Product id.
    product_id: String,
    /// First day of the window (`YYYY-MM-DD`); defaults to yesterday.
    #[arg(long)]
    start: Option<String>,
    /// Last day of the window (`YYYY-MM-DD`); defaults to today.
    #[arg(long)]
    end: Option<String>,
    /// Zero-based page index.
    #[arg(long, default_value_t = 0)]
    page: usize,
    /// Rows per page; defaults to the configured page size.
    #[arg(long)]
    page_size: Option<usize>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let cli = Cli::parse();
    let settings = ClientSettings::load_from_iter([OsString::from("catalogue")])
        .map_err(|error| eyre!("failed to load configuration: {error}"))?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build Tokio runtime")?;
    runtime.block_on(run(cli.command, &settings))
}

async fn run(command: Command, settings: &ClientSettings) -> Result<()> {
    let client = CatalogueClient::from_settings(settings, Arc::new(LoggingNavigator))
        .wrap_err("failed to initialise catalogue client")?;
    let mut out = io::stdout().lock();

    match command {
        Command::Login { username, password } => {
            let credential = client.session.login(&username, &password).await?;
            writeln!(out, "signed in; session expires at {}", credential.expires_at())?;
        }
        Command::Logout => {
            client.session.logout();
            writeln!(out, "signed out")?;
        }
        Command::Status => {
            let state = if client.session.has_valid_token() {
                "signed in"
            } else {
                "signed out"
            };
            writeln!(out, "{state}")?;
        }
        Command::Products(products) => {
            require_session(&client)?;
            run_products(&client, products, &mut out).await?;
        }
        Command::Alerts(args) => {
            require_session(&client)?;
            run_alerts(&client, args, &mut out).await?;
        }
    }
    Ok(())
}

fn require_session(client: &CatalogueClient) -> Result<()> {
    match client.guard.check() {
        GuardDecision::Allow => Ok(()),
        GuardDecision::RedirectToLogin => Err(eyre!(
            "login required: run `catalogue login --username <name> --password <password>`"
        )),
    }
}

async fn run_products(
    client: &CatalogueClient,
    command: ProductsCommand,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        ProductsCommand::List {
            page,
            page_size,
            refresh,
        } => {
            let items = if refresh {
                client.products.refresh().await?
            } else {
                client.products.list().await?
            };
            let default_size = client.page_size.get();
            let size = page_size.unwrap_or(default_size);
            let mut view = PaginatedView::new(PageDescriptor::new(page, size)?);
            view.on_collection_changed(items, false);
            print_page(out, &view)?;
        }
        ProductsCommand::Add { name, url } => {
            let draft = ProductDraft::try_new(&name, &url)?;
            let created = client.products.create(draft)?;
            let snapshot = client.products.cached()?.unwrap_or_default();
            let mut view = PaginatedView::new(PageDescriptor::first(client.page_size));
            view.on_collection_changed(snapshot, true);
            writeln!(out, "added {} ({})", created.product_name, created.id)?;
            print_page(out, &view)?;
        }
        ProductsCommand::Update { id, name, url } => {
            let entity_id = EntityId::new(id)?;
            let mut patch = ProductPatch::new();
            if let Some(new_name) = name.as_deref() {
                patch = patch.with_product_name(new_name)?;
            }
            if let Some(new_url) = url.as_deref() {
                patch = patch.with_url(new_url)?;
            }
            let outcome = client.products.update(&entity_id, patch)?;
            let verb = if outcome.is_applied() { "updated" } else { "no product with id" };
            writeln!(out, "{verb} {entity_id}")?;
        }
        ProductsCommand::Delete { id } => {
            let entity_id = EntityId::new(id)?;
            let outcome = client.products.delete(&entity_id)?;
            let verb = if outcome.is_applied() { "deleted" } else { "no product with id" };
            writeln!(out, "{verb} {entity_id}")?;
        }
    }
    Ok(())
}

async fn run_alerts(client: &CatalogueClient, args: AlertsArgs, out: &mut impl Write) -> Result<()> {
    let product_id = EntityId::new(args.product_id)?;
    let mut query = client.alerts.default_query(product_id);
    if args.start.is_some() || args.end.is_some() {
        let start = match args.start.as_deref() {
            Some(raw) => DateRange::parse_date(raw)?,
            None => query.range.start(),
        };
        let end = match args.end.as_deref() {
            Some(raw) => DateRange::parse_date(raw)?,
            None => query.range.end(),
        };
        query.range = DateRange::new(start, end)?;
    }
    let default_size = client.page_size.get();
    let size = args.page_size.unwrap_or(default_size);
    query.page = PageDescriptor::new(args.page, size)?;

    let page = client.alerts.fetch(&query).await?;
    let offset = query.page.offset();
    for (position, alert) in page.data.iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {}  {}  {}",
            offset.saturating_add(position).saturating_add(1),
            alert.alert_date,
            alert.alert_name,
            alert.alert_value
        )?;
    }
    writeln!(
        out,
        "page {} of {} alerts",
        query.page.index().saturating_add(1),
        page.total
    )
    .context("failed to write alerts")?;
    Ok(())
}

fn print_page(out: &mut impl Write, view: &PaginatedView<Product>) -> Result<()> {
    let offset = view.page().offset();
    for (position, product) in view.visible().iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {}  {}  {}",
            offset.saturating_add(position).saturating_add(1),
            product.id,
            product.product_name,
            product.url
        )?;
    }
    writeln!(
        out,
        "page {} of {} ({} products)",
        view.page().index().saturating_add(1),
        view.page_count().max(1),
        view.len()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI argument parsing.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parses_product_update_with_optional_fields() {
        let cli = Cli::try_parse_from(["catalogue", "products", "update", "7", "--name", "Gadget"])
            .expect("arguments should parse");
        match cli.command {
            Command::Products(ProductsCommand::Update { id, name, url }) => {
                assert_eq!(id, "7");
                assert_eq!(name.as_deref(), Some("Gadget"));
                assert!(url.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[rstest]
    fn list_defaults_to_first_page_from_cache() {
        let cli = Cli::try_parse_from(["catalogue", "products", "list"]).expect("parse");
        match cli.command {
            Command::Products(ProductsCommand::List {
                page,
                page_size,
                refresh,
            }) => {
                assert_eq!(page, 0);
                assert!(page_size.is_none());
                assert!(!refresh);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[rstest]
    fn login_requires_both_credentials() {
        assert!(Cli::try_parse_from(["catalogue", "login", "--username", "user"]).is_err());
    }
}

//! Subcommand dispatch.
//!
//! Expected failures (validation, duplicates, remote unavailability)
//! print as status lines; only unexpected errors propagate.

use std::sync::Arc;

use quotevault_core::quotes::{by_category, categories, export_quotes, import_quotes, random_pick, CategoryFilter};
use quotevault_core::settings::{SettingsService, SettingsServiceTrait};
use quotevault_core::{Error, Quote, ReconcileStatus, SyncService};
use quotevault_remote::HttpRemoteSource;
use quotevault_storage_sqlite::SqliteCollectionStore;

use crate::config::Config;

type Engine = SyncService<SqliteCollectionStore, HttpRemoteSource>;

pub async fn run(
    service: &Arc<Engine>,
    settings: &SettingsService,
    config: &Config,
    args: &[String],
) -> anyhow::Result<()> {
    match args.first().map(String::as_str) {
        None | Some("show") => show(service, settings, args.get(1)).await,
        Some("add") => add(service, args).await,
        Some("categories") => list_categories(service).await,
        Some("list") => list(service, args.get(1)).await,
        Some("import") => import(service, args.get(1)).await,
        Some("export") => export(service, args.get(1)).await,
        Some("sync") => sync(service).await,
        Some("watch") => watch(service, config).await,
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            usage();
            Ok(())
        }
    }
}

fn usage() {
    eprintln!(
        "Usage: quotevault [command]\n\
         \n\
         Commands:\n\
         \x20 show [category]              Show a random quote (default command)\n\
         \x20 add <text> <category> [author]  Add a quote\n\
         \x20 categories                   List known categories\n\
         \x20 list [category]              List quotes\n\
         \x20 import <file>                Import quotes from a JSON array file\n\
         \x20 export <file>                Export the collection as pretty JSON\n\
         \x20 sync                         Reconcile with the remote source once\n\
         \x20 watch                        Reconcile periodically until Ctrl-C"
    );
}

fn format_quote(quote: &Quote) -> String {
    match &quote.author {
        Some(author) => format!("\"{}\" - {} ({})", quote.text, quote.category, author),
        None => format!("\"{}\" - {}", quote.text, quote.category),
    }
}

async fn resolve_filter(
    settings: &SettingsService,
    arg: Option<&String>,
) -> anyhow::Result<CategoryFilter> {
    match arg {
        Some(label) => {
            let filter = CategoryFilter::parse(label);
            settings.set_last_filter(&filter).await?;
            Ok(filter)
        }
        None => Ok(settings.get_last_filter()?),
    }
}

async fn show(
    service: &Arc<Engine>,
    settings: &SettingsService,
    category: Option<&String>,
) -> anyhow::Result<()> {
    let filter = resolve_filter(settings, category).await?;
    let snapshot = service.snapshot().await;
    match random_pick(&snapshot, &filter) {
        Some(quote) => {
            println!("{}", format_quote(quote));
            settings.set_last_viewed(&quote.key()).await?;
        }
        None => println!("No quotes in category '{}'.", filter),
    }
    Ok(())
}

async fn add(service: &Arc<Engine>, args: &[String]) -> anyhow::Result<()> {
    let (Some(text), Some(category)) = (args.get(1), args.get(2)) else {
        eprintln!("Usage: quotevault add <text> <category> [author]");
        return Ok(());
    };
    match service
        .add_quote(text, category, args.get(3).map(String::as_str))
        .await
    {
        Ok(quote) => println!("Added: {}", format_quote(&quote)),
        Err(Error::DuplicateQuote(_)) => {
            println!("A quote with that text already exists; not added.")
        }
        Err(Error::Validation(e)) => println!("Rejected: {}", e),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

async fn list_categories(service: &Arc<Engine>) -> anyhow::Result<()> {
    let snapshot = service.snapshot().await;
    let cats = categories(&snapshot);
    if cats.is_empty() {
        println!("No categories yet.");
    }
    for category in cats {
        println!("{}", category);
    }
    Ok(())
}

async fn list(service: &Arc<Engine>, category: Option<&String>) -> anyhow::Result<()> {
    let filter = category
        .map(|c| CategoryFilter::parse(c))
        .unwrap_or(CategoryFilter::All);
    let snapshot = service.snapshot().await;
    let quotes = by_category(&snapshot, &filter);
    if quotes.is_empty() {
        println!("No quotes in category '{}'.", filter);
    }
    for quote in &quotes {
        println!("{}", format_quote(quote));
    }
    Ok(())
}

async fn import(service: &Arc<Engine>, path: Option<&String>) -> anyhow::Result<()> {
    let Some(path) = path else {
        eprintln!("Usage: quotevault import <file>");
        return Ok(());
    };
    let bytes = tokio::fs::read(path).await?;
    match import_quotes(service, &bytes).await {
        Ok(report) => println!("{}", report.summary()),
        Err(Error::Validation(e)) => println!("Import failed: {}", e),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

async fn export(service: &Arc<Engine>, path: Option<&String>) -> anyhow::Result<()> {
    let Some(path) = path else {
        eprintln!("Usage: quotevault export <file>");
        return Ok(());
    };
    let snapshot = service.snapshot().await;
    let bytes = export_quotes(&snapshot)?;
    tokio::fs::write(path, bytes).await?;
    println!("Exported {} quotes to {}", snapshot.len(), path);
    Ok(())
}

async fn sync(service: &Arc<Engine>) -> anyhow::Result<()> {
    let report = service.reconcile().await?;
    println!("{}", report.summary());
    if let ReconcileStatus::RemoteUnavailable(_) = report.status {
        println!("The collection was left unchanged; the next attempt may succeed.");
    }
    Ok(())
}

async fn watch(service: &Arc<Engine>, config: &Config) -> anyhow::Result<()> {
    println!(
        "Reconciling every {}s (Ctrl-C to stop)...",
        config.sync_interval.as_secs()
    );
    let report = service.reconcile().await?;
    println!("{}", report.summary());

    let handle = service.spawn_periodic(config.sync_interval);
    tokio::signal::ctrl_c().await?;
    handle.abort();
    println!("Stopped.");
    Ok(())
}

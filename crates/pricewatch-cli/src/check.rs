//! One price-check run: fetch, diff, notify, persist.
//!
//! The order is fixed. Nothing touches the history file until the listing
//! has been fetched and validated, so a failed fetch leaves the previous
//! snapshot as the baseline for the next scheduled run. A failed notification
//! does not stop the save.

use anyhow::Context;
use pricewatch_core::{detect_changes, render_message, AppConfig, HistoryStore};
use pricewatch_scraper::ProductSource;
use pricewatch_telegram::Notifier;

/// What a run did, for the closing log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub products: usize,
    pub events: usize,
    pub notified: bool,
    pub saved: bool,
}

/// Runs a single check against `source`, reporting through `notifier` and
/// persisting to `store`.
///
/// With `dry_run` the message is printed to stdout instead of sent and the
/// history file is left untouched.
///
/// # Errors
///
/// Returns an error if the listing cannot be fetched, contains a malformed
/// product, or the updated history cannot be written. Notification failures
/// are logged and do not fail the run.
pub(crate) async fn run_check(
    config: &AppConfig,
    source: &dyn ProductSource,
    notifier: &dyn Notifier,
    store: &HistoryStore,
    dry_run: bool,
) -> anyhow::Result<RunSummary> {
    let products = source
        .fetch(&config.category)
        .await
        .with_context(|| format!("failed to fetch listing for category {}", config.category))?;

    let history = store.load();
    let known = history.len();
    let detection = detect_changes(&products, history, &config.site_origin);

    for event in &detection.events {
        tracing::info!(kind = event.kind(), product = event.name(), "change detected");
    }
    tracing::info!(
        products = products.len(),
        known,
        events = detection.events.len(),
        "detection complete"
    );

    let mut notified = false;
    if detection.has_changes() {
        let body = render_message(&detection.events, &config.currency);
        if dry_run {
            println!("{body}");
        } else {
            match notifier.notify(&body).await {
                Ok(()) => notified = true,
                Err(e) => {
                    tracing::error!(error = %e, "notification failed; history will still be saved");
                }
            }
        }
    }

    let saved = if dry_run {
        tracing::info!(path = %store.path().display(), "dry run: history not saved");
        false
    } else {
        store
            .save(&detection.history)
            .context("history not saved; the next run will report these changes again")?;
        true
    };

    Ok(RunSummary {
        products: products.len(),
        events: detection.events.len(),
        notified,
        saved,
    })
}

#[cfg(test)]
#[path = "check_test.rs"]
mod tests;

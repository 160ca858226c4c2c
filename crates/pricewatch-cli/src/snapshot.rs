//! `pricewatch history`: print the stored snapshot for inspection.
//!
//! Unlike a check run, an unreadable file is reported as an error here; the
//! point of the command is to find out what is actually on disk.

use std::io::Write;

use anyhow::Context;
use pricewatch_core::{History, HistoryLoadError, HistoryStore};

pub(crate) fn run_show_history(store: &HistoryStore) -> anyhow::Result<()> {
    let history = match store.try_load() {
        Ok(history) => history,
        Err(HistoryLoadError::NotFound { path }) => {
            println!("no history recorded yet at {path}");
            return Ok(());
        }
        Err(e) => return Err(e).context("history file exists but cannot be used"),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_history(&mut out, &history).context("failed to write history to stdout")
}

/// Writes one line per product (`code  price  promo`) and a closing count.
fn write_history(out: &mut impl Write, history: &History) -> std::io::Result<()> {
    let width = history.iter().map(|(code, _)| code.len()).max().unwrap_or(0);
    for (code, state) in history {
        let promo = state
            .promo
            .map_or_else(|| "-".to_string(), |p| p.normalize().to_string());
        writeln!(
            out,
            "{code:<width$}  {:>10}  {promo:>10}",
            state.price.normalize().to_string()
        )?;
    }
    writeln!(out, "{} products tracked", history.len())
}

//! Change detection between the current listing and the stored snapshot.
//!
//! [`detect_changes`] walks the listing in order and classifies each product
//! against its previous [`PriceState`]. Several events may fire for one
//! product in the same run (a regular-price change and a new promotion, for
//! instance). Every listed product ends up in the returned history with its
//! current prices, whether or not anything fired.

use rust_decimal::Decimal;

use crate::history::History;
use crate::products::{PriceState, ProductRecord};

/// A single difference worth telling someone about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    NewProduct {
        name: String,
        url: String,
    },
    PriceChanged {
        name: String,
        url: String,
        old: Decimal,
        new: Decimal,
    },
    /// `regular` is the product's current regular price, not the one from
    /// the previous snapshot.
    PromotionStarted {
        name: String,
        url: String,
        regular: Decimal,
        promo: Decimal,
    },
    PromotionPriceChanged {
        name: String,
        url: String,
        old: Decimal,
        new: Decimal,
    },
}

impl ChangeEvent {
    /// Short machine-friendly label, used in log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ChangeEvent::NewProduct { .. } => "new_product",
            ChangeEvent::PriceChanged { .. } => "price_changed",
            ChangeEvent::PromotionStarted { .. } => "promotion_started",
            ChangeEvent::PromotionPriceChanged { .. } => "promotion_price_changed",
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ChangeEvent::NewProduct { name, .. }
            | ChangeEvent::PriceChanged { name, .. }
            | ChangeEvent::PromotionStarted { name, .. }
            | ChangeEvent::PromotionPriceChanged { name, .. } => name,
        }
    }

    /// Renders the event as a multi-line message block, prices suffixed with
    /// `currency`.
    #[must_use]
    pub fn render(&self, currency: &str) -> String {
        match self {
            ChangeEvent::NewProduct { name, url } => format!("🆕 Nowy produkt: {name}\n{url}"),
            ChangeEvent::PriceChanged {
                name,
                url,
                old,
                new,
            } => format!(
                "💰 Zmiana ceny: {name}\n{} {currency} → {} {currency}\n{url}",
                old.normalize(),
                new.normalize()
            ),
            ChangeEvent::PromotionStarted {
                name,
                url,
                regular,
                promo,
            } => format!(
                "🔥 Nowa promocja: {name}\n{} {currency} → {} {currency}\n{url}",
                regular.normalize(),
                promo.normalize()
            ),
            ChangeEvent::PromotionPriceChanged {
                name,
                url,
                old,
                new,
            } => format!(
                "🔄 Zmiana ceny promocyjnej: {name}\n{} {currency} → {} {currency}\n{url}",
                old.normalize(),
                new.normalize()
            ),
        }
    }
}

/// Result of one detection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Events in listing order.
    pub events: Vec<ChangeEvent>,
    /// The input history with every listed product's current prices applied.
    pub history: History,
}

impl Detection {
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.events.is_empty()
    }
}

/// Diffs `products` against `history`.
///
/// Links in the emitted events are made absolute under `site_origin`. Prices
/// compare by exact decimal value, so `100` and `100.00` are equal.
#[must_use]
pub fn detect_changes(
    products: &[ProductRecord],
    mut history: History,
    site_origin: &str,
) -> Detection {
    let mut events = Vec::new();

    for product in products {
        let current = product.price_state();
        if let Some(previous) = history.get(&product.code) {
            classify(product, previous, site_origin, &mut events);
        } else {
            events.push(ChangeEvent::NewProduct {
                name: product.name.clone(),
                url: product.absolute_url(site_origin),
            });
        }
        history.insert(product.code.clone(), current);
    }

    tracing::debug!(
        products = products.len(),
        events = events.len(),
        "change detection finished"
    );

    Detection { events, history }
}

fn classify(
    product: &ProductRecord,
    previous: &PriceState,
    site_origin: &str,
    events: &mut Vec<ChangeEvent>,
) {
    let url = || product.absolute_url(site_origin);

    if previous.price != product.price {
        events.push(ChangeEvent::PriceChanged {
            name: product.name.clone(),
            url: url(),
            old: previous.price,
            new: product.price,
        });
    }

    match (previous.promo, product.promo_price) {
        (None, Some(promo)) => events.push(ChangeEvent::PromotionStarted {
            name: product.name.clone(),
            url: url(),
            regular: product.price,
            promo,
        }),
        (Some(old), Some(new)) if old != new => {
            events.push(ChangeEvent::PromotionPriceChanged {
                name: product.name.clone(),
                url: url(),
                old,
                new,
            });
        }
        _ => {}
    }
}

/// Joins rendered events with a blank line, in order.
#[must_use]
pub fn render_message(events: &[ChangeEvent], currency: &str) -> String {
    events
        .iter()
        .map(|event| event.render(currency))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
#[path = "detect_test.rs"]
mod tests;

//! Normalization from raw listing types to [`pricewatch_core::ProductRecord`].
//!
//! All "is this field present" checks live here. A record that lacks a
//! required field or carries a non-numeric price rejects the whole batch:
//! it means the upstream contract changed, and a partial listing would make
//! the next diff report spurious new products.

use std::str::FromStr;

use pricewatch_core::ProductRecord;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::ScraperError;
use crate::types::{ListingProduct, PriceValue};

/// Normalizes every product in listing order, failing on the first
/// malformed record.
///
/// # Errors
///
/// Returns [`ScraperError::MalformedProduct`] for the first record that
/// cannot be normalized.
pub fn normalize_products(products: Vec<ListingProduct>) -> Result<Vec<ProductRecord>, ScraperError> {
    products
        .into_iter()
        .enumerate()
        .map(|(idx, product)| normalize_product(product, idx))
        .collect()
}

/// Normalizes one raw [`ListingProduct`]. `index` is its position in the
/// listing and only identifies the record in errors when the code is absent.
///
/// # Errors
///
/// Returns [`ScraperError::MalformedProduct`] if the code, name, URL or
/// regular price is missing, or if any price is not a number.
pub fn normalize_product(product: ListingProduct, index: usize) -> Result<ProductRecord, ScraperError> {
    let code = match product.code.as_ref().and_then(code_string) {
        Some(code) => code,
        None => {
            return Err(ScraperError::MalformedProduct {
                code: format!("#{index}"),
                reason: "missing product code".into(),
            })
        }
    };

    let malformed = |reason: String| ScraperError::MalformedProduct {
        code: code.clone(),
        reason,
    };

    // Present but empty is accepted; only an absent field is malformed.
    let name = product
        .name
        .ok_or_else(|| malformed("missing name".into()))?;
    let url = product
        .url
        .ok_or_else(|| malformed("missing url".into()))?;

    let price_obj = product
        .price
        .ok_or_else(|| malformed("missing price".into()))?;
    let price = parse_price(price_obj.value.as_ref())
        .map_err(|reason| malformed(format!("regular price {reason}")))?;

    // Nested `price.redPrice` wins over a sibling `redPrice`.
    let promo_price = match price_obj.red_price.or(product.red_price) {
        Some(PriceValue { value }) => Some(
            parse_price(value.as_ref())
                .map_err(|reason| malformed(format!("promotional price {reason}")))?,
        ),
        None => None,
    };

    Ok(ProductRecord {
        code,
        name,
        url,
        price,
        promo_price,
    })
}

fn code_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parses a JSON price into a [`Decimal`]. The error is a short reason
/// fragment for the caller to prefix.
fn parse_price(value: Option<&Value>) -> Result<Decimal, String> {
    let raw = match value {
        None | Some(Value::Null) => return Err("is missing".into()),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => return Err(format!("is not a number: {other}")),
    };

    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|_| format!("is not a number: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn raw(value: Value) -> ListingProduct {
        serde_json::from_value(value).expect("fixture should deserialize")
    }

    fn assert_malformed(result: Result<ProductRecord, ScraperError>, code: &str, needle: &str) {
        match result {
            Err(ScraperError::MalformedProduct {
                code: ref got,
                ref reason,
            }) => {
                assert_eq!(got, code);
                assert!(reason.contains(needle), "reason {reason:?} lacks {needle:?}");
            }
            other => panic!("expected MalformedProduct, got: {other:?}"),
        }
    }

    #[test]
    fn normalize_product_without_promotion() {
        let product = normalize_product(
            raw(json!({
                "code": "A1",
                "name": "Jeans",
                "url": "/a1",
                "price": { "value": 100 }
            })),
            0,
        )
        .unwrap();

        assert_eq!(
            product,
            ProductRecord {
                code: "A1".into(),
                name: "Jeans".into(),
                url: "/a1".into(),
                price: Decimal::new(100, 0),
                promo_price: None,
            }
        );
    }

    #[test]
    fn normalize_product_reads_nested_red_price() {
        let product = normalize_product(
            raw(json!({
                "code": "0985197001",
                "name": "Slim Jeans",
                "url": "/pl_pl/productpage.0985197001.html",
                "price": { "value": 129.99, "redPrice": { "value": 89.99 } }
            })),
            0,
        )
        .unwrap();

        assert_eq!(product.price, Decimal::new(12999, 2));
        assert_eq!(product.promo_price, Some(Decimal::new(8999, 2)));
    }

    #[test]
    fn normalize_product_reads_sibling_red_price() {
        let product = normalize_product(
            raw(json!({
                "code": "A1",
                "name": "Jeans",
                "url": "/a1",
                "price": { "value": 100 },
                "redPrice": { "value": 80 }
            })),
            0,
        )
        .unwrap();

        assert_eq!(product.promo_price, Some(Decimal::new(80, 0)));
    }

    #[test]
    fn nested_red_price_wins_over_sibling() {
        let product = normalize_product(
            raw(json!({
                "code": "A1",
                "name": "Jeans",
                "url": "/a1",
                "price": { "value": 100, "redPrice": { "value": 70 } },
                "redPrice": { "value": 80 }
            })),
            0,
        )
        .unwrap();

        assert_eq!(product.promo_price, Some(Decimal::new(70, 0)));
    }

    #[test]
    fn null_red_price_is_absent() {
        let product = normalize_product(
            raw(json!({
                "code": "A1",
                "name": "Jeans",
                "url": "/a1",
                "price": { "value": 100, "redPrice": null }
            })),
            0,
        )
        .unwrap();

        assert_eq!(product.promo_price, None);
    }

    #[test]
    fn numeric_string_prices_are_accepted() {
        let product = normalize_product(
            raw(json!({
                "code": 42,
                "name": "Jeans",
                "url": "/a1",
                "price": { "value": " 59.90 " }
            })),
            0,
        )
        .unwrap();

        assert_eq!(product.code, "42");
        assert_eq!(product.price, Decimal::new(599, 1));
    }

    #[test]
    fn missing_price_is_malformed() {
        let result = normalize_product(
            raw(json!({ "code": "A1", "name": "Jeans", "url": "/a1" })),
            0,
        );
        assert_malformed(result, "A1", "missing price");
    }

    #[test]
    fn missing_price_value_is_malformed() {
        let result = normalize_product(
            raw(json!({ "code": "A1", "name": "Jeans", "url": "/a1", "price": {} })),
            0,
        );
        assert_malformed(result, "A1", "regular price is missing");
    }

    #[test]
    fn non_numeric_price_is_malformed() {
        let result = normalize_product(
            raw(json!({
                "code": "A1",
                "name": "Jeans",
                "url": "/a1",
                "price": { "value": "call us" }
            })),
            0,
        );
        assert_malformed(result, "A1", "regular price is not a number");
    }

    #[test]
    fn negative_price_is_taken_as_is() {
        let product = normalize_product(
            raw(json!({
                "code": "A1",
                "name": "Jeans",
                "url": "/a1",
                "price": { "value": -5, "redPrice": { "value": -2.5 } }
            })),
            0,
        )
        .expect("negative numbers are still numbers");
        assert_eq!(product.price, Decimal::new(-5, 0));
        assert_eq!(product.promo_price, Some(Decimal::new(-25, 1)));
    }

    #[test]
    fn red_price_without_value_is_malformed() {
        let result = normalize_product(
            raw(json!({
                "code": "A1",
                "name": "Jeans",
                "url": "/a1",
                "price": { "value": 100, "redPrice": {} }
            })),
            0,
        );
        assert_malformed(result, "A1", "promotional price is missing");
    }

    #[test]
    fn missing_code_uses_listing_position() {
        let result = normalize_product(
            raw(json!({ "name": "Jeans", "url": "/a1", "price": { "value": 1 } })),
            7,
        );
        assert_malformed(result, "#7", "missing product code");
    }

    #[test]
    fn missing_name_and_url_are_malformed() {
        let no_name = normalize_product(
            raw(json!({ "code": "A1", "url": "/a1", "price": { "value": 1 } })),
            0,
        );
        assert_malformed(no_name, "A1", "missing name");

        let no_url = normalize_product(
            raw(json!({ "code": "A1", "name": "Jeans", "price": { "value": 1 } })),
            0,
        );
        assert_malformed(no_url, "A1", "missing url");
    }

    #[test]
    fn empty_name_and_url_are_kept() {
        let product = normalize_product(
            raw(json!({ "code": "A2", "name": "", "url": " ", "price": { "value": 50 } })),
            1,
        )
        .expect("empty strings are present fields");
        assert_eq!(product.name, "");
        assert_eq!(product.url, " ");
    }

    #[test]
    fn batch_with_empty_name_is_not_rejected() {
        let products = normalize_products(vec![
            raw(json!({ "code": "A1", "name": "Jeans", "url": "/a1", "price": { "value": 100 } })),
            raw(json!({ "code": "A2", "name": "", "url": "/a2", "price": { "value": 50 } })),
        ])
        .expect("batch should normalize");
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].code, "A2");
        assert_eq!(products[1].name, "");
    }

    #[test]
    fn normalize_products_keeps_listing_order() {
        let products = normalize_products(vec![
            raw(json!({ "code": "B", "name": "b", "url": "/b", "price": { "value": 2 } })),
            raw(json!({ "code": "A", "name": "a", "url": "/a", "price": { "value": 1 } })),
        ])
        .unwrap();

        let codes: Vec<&str> = products.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["B", "A"]);
    }

    #[test]
    fn normalize_products_rejects_whole_batch_on_one_bad_record() {
        let result = normalize_products(vec![
            raw(json!({ "code": "A", "name": "a", "url": "/a", "price": { "value": 1 } })),
            raw(json!({ "code": "B", "name": "b", "url": "/b" })),
        ]);

        assert!(
            matches!(result, Err(ScraperError::MalformedProduct { ref code, .. }) if code == "B"),
            "expected MalformedProduct(B), got: {result:?}"
        );
    }
}

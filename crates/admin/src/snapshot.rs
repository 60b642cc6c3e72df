//! The `db.json` snapshot document.
//!
//! A snapshot is the published form of the whole store: the storefront
//! boots from one, the admin exports one, and a remote copy can be pulled
//! over HTTP. Static hosts don't always send permissive CORS headers, so
//! the fetch tries the URL directly and then walks a list of public
//! read-only proxies before giving up. A build-time embedded dataset backs
//! the whole chain, so boot never fails outright.

use std::time::Duration;

use chrono::Utc;
use nursery_core::{Category, Product, Sticker, StoreSettings, StoreStats};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

const FALLBACK_JSON: &str = include_str!("fallback.json");

/// Proxy URL builders, tried in order after the direct request.
const PROXIES: [fn(&str) -> String; 3] = [
    |url| format!("https://api.allorigins.win/raw?url={}", urlencoding::encode(url)),
    |url| format!("https://api.codetabs.com/v1/proxy?quest={}", urlencoding::encode(url)),
    |url| format!("https://corsproxy.io/?{}", urlencoding::encode(url)),
];

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("all fetch routes exhausted")]
    Exhausted,
}

/// The `db.json` document. Every section except the products and
/// categories is optional; a hand-edited file with just products still
/// loads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<StoreSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stickers: Option<Vec<Sticker>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StoreStats>,
    /// Millisecond timestamp stamped at export time.
    #[serde(
        default,
        rename = "_generatedAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub generated_at: Option<i64>,
}

impl Snapshot {
    /// Pretty-printed JSON, as written to `db.json`.
    ///
    /// # Errors
    ///
    /// Returns the underlying encode error; practically unreachable for
    /// these types.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// The dataset compiled into the binary. Used when no local state exists
/// and every remote route fails.
#[must_use]
pub fn embedded() -> Snapshot {
    serde_json::from_str(FALLBACK_JSON).unwrap_or_else(|err| {
        // A broken fallback.json is a packaging bug, not a runtime one.
        error!(%err, "embedded fallback dataset failed to parse");
        Snapshot::default()
    })
}

/// Fetch a remote snapshot, trying the URL directly and then each proxy.
///
/// Every attempt gets its own timeout and a cache-busting `v=<millis>`
/// query parameter on the source URL; the first parseable response wins.
///
/// # Errors
///
/// [`SnapshotError::Http`] when the HTTP client cannot be built,
/// [`SnapshotError::Exhausted`] when every route failed.
pub async fn fetch(url: &str, timeout: Duration) -> Result<Snapshot, SnapshotError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let separator = if url.contains('?') { '&' } else { '?' };
    let busted = format!("{url}{separator}v={}", Utc::now().timestamp_millis());

    let mut routes = vec![busted.clone()];
    routes.extend(PROXIES.iter().map(|build| build(&busted)));

    for route in routes {
        match fetch_one(&client, &route).await {
            Ok(snapshot) => {
                info!(
                    products = snapshot.products.len(),
                    categories = snapshot.categories.len(),
                    "remote snapshot loaded"
                );
                return Ok(snapshot);
            }
            Err(err) => warn!(route = %route, %err, "snapshot route failed"),
        }
    }
    Err(SnapshotError::Exhausted)
}

/// [`fetch`] degrading to the embedded dataset instead of erroring.
pub async fn load_or_fallback(url: &str, timeout: Duration) -> Snapshot {
    match fetch(url, timeout).await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!(%err, "falling back to the embedded dataset");
            embedded()
        }
    }
}

async fn fetch_one(client: &reqwest::Client, url: &str) -> Result<Snapshot, SnapshotError> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(SnapshotError::Status(response.status()));
    }
    // Some proxies relabel the content type; read text and parse ourselves.
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_dataset_parses() {
        let snapshot = embedded();
        assert!(!snapshot.products.is_empty());
        assert!(!snapshot.categories.is_empty());
        assert!(snapshot.settings.is_some());
        assert!(snapshot.stickers.is_some());
    }

    #[test]
    fn test_embedded_references_resolve() {
        let snapshot = embedded();
        for product in &snapshot.products {
            assert!(
                snapshot.categories.iter().any(|c| c.id == product.category_id),
                "product {} points at a missing category",
                product.sku
            );
            for variant in &product.variants {
                assert!(
                    snapshot.products.iter().any(|p| p.id == variant.product_id),
                    "variant of {} points at a missing product",
                    product.sku
                );
            }
            for item in &product.bundle_items {
                assert!(snapshot.products.iter().any(|p| p.id == *item));
            }
        }
    }

    #[test]
    fn test_partial_document_loads() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"products": []}"#).unwrap();
        assert!(snapshot.categories.is_empty());
        assert!(snapshot.settings.is_none());
        assert!(snapshot.generated_at.is_none());
    }

    #[test]
    fn test_generated_at_uses_wire_name() {
        let snapshot = Snapshot {
            generated_at: Some(1_700_000_000_000),
            ..Snapshot::default()
        };
        let json = snapshot.to_json_pretty().unwrap();
        assert!(json.contains("\"_generatedAt\""));
    }

    #[test]
    fn test_proxy_routes_encode_the_url() {
        let url = "https://example.com/db.json?v=1";
        let routes: Vec<String> = PROXIES.iter().map(|build| build(url)).collect();
        assert!(routes[0].starts_with("https://api.allorigins.win/raw?url=https%3A%2F%2F"));
        // The target's own query string must not leak into the proxy's.
        assert!(routes[1].ends_with("quest=https%3A%2F%2Fexample.com%2Fdb.json%3Fv%3D1"));
        assert!(routes[2].contains("corsproxy.io"));
        for route in &routes {
            assert!(!route.contains("?v=1"));
        }
    }
}

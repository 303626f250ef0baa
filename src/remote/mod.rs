//! @acp:module "Remote Resources"
//! @acp:summary "Fetch port, HTTP/local fetchers and per-page memoization"
//! @acp:domain widget
//! @acp:layer io

mod fetcher;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::OnceCell;

use crate::error::{Result, WaifuError};
use crate::model::ModelCatalog;

pub use fetcher::{Fetcher, HttpFetcher, LocalFetcher};

/// Loads a JSON document from a URL or path
pub trait ResourceFetcher: Send + Sync {
    fn fetch_json(&self, url: &str) -> impl std::future::Future<Output = Result<Value>> + Send;
}

/// Documents fetched at most once per page load.
///
/// The first caller performs the fetch; concurrent callers wait for the
/// same result. Failures are remembered as absent and not retried.
pub struct Resources<F> {
    fetcher: F,
    catalog_url: String,
    tips_url: String,
    catalog: OnceCell<Option<Arc<ModelCatalog>>>,
    tips: OnceCell<Option<Arc<Value>>>,
}

impl<F: ResourceFetcher> Resources<F> {
    pub fn new(fetcher: F, catalog_url: impl Into<String>, tips_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            catalog_url: catalog_url.into(),
            tips_url: tips_url.into(),
            catalog: OnceCell::new(),
            tips: OnceCell::new(),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The model catalog, or None if it could not be loaded
    pub async fn catalog(&self) -> Option<Arc<ModelCatalog>> {
        self.catalog
            .get_or_init(|| async {
                let loaded = self
                    .fetcher
                    .fetch_json(&self.catalog_url)
                    .await
                    .and_then(|doc| Ok(serde_json::from_value::<ModelCatalog>(doc)?));
                match loaded {
                    Ok(catalog) => Some(Arc::new(catalog)),
                    Err(e) => {
                        tracing::warn!("Model catalog unavailable from {}: {}", self.catalog_url, e);
                        None
                    }
                }
            })
            .await
            .clone()
    }

    /// The raw tips document, or None if it could not be loaded
    pub async fn tips_document(&self) -> Option<Arc<Value>> {
        self.tips
            .get_or_init(|| async {
                match self.fetcher.fetch_json(&self.tips_url).await {
                    Ok(doc) => Some(Arc::new(doc)),
                    Err(e) => {
                        tracing::warn!("Tips document unavailable from {}: {}", self.tips_url, e);
                        None
                    }
                }
            })
            .await
            .clone()
    }

    /// One short quote from a `{ "hitokoto": ... }` service; never cached
    pub async fn quote(&self, url: &str) -> Option<String> {
        match fetch_quote(&self.fetcher, url).await {
            Ok(quote) => Some(quote),
            Err(e) => {
                tracing::debug!("No quote from {}: {}", url, e);
                None
            }
        }
    }
}

async fn fetch_quote<F: ResourceFetcher>(fetcher: &F, url: &str) -> Result<String> {
    let body = fetcher.fetch_json(url).await?;
    body.get("hitokoto")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| WaifuError::MissingField {
            document: url.to_string(),
            field: "hitokoto".to_string(),
        })
}

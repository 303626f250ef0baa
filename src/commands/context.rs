//! @acp:module "Command Context"
//! @acp:summary "Shared configuration, state and page inputs for CLI commands"
//! @acp:domain cli
//! @acp:layer handler

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDateTime;

use crate::config::{WidgetConfig, MODEL_LIST_FILE, TIPS_FILE};
use crate::model::ModelCatalog;
use crate::remote::{Fetcher, HttpFetcher, LocalFetcher, Resources};
use crate::storage::FileStore;
use crate::tips::{load_tips, PageContext, WaifuTips};

/// Inputs every command shares
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub config: WidgetConfig,
    /// Persisted widget state file
    pub state: PathBuf,
    /// Directory that non-URL cdn paths resolve against
    pub root: PathBuf,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            config: WidgetConfig::default(),
            state: FileStore::default_path(),
            root: PathBuf::from("."),
        }
    }
}

impl SessionOptions {
    pub fn fetcher(&self) -> Result<Fetcher> {
        Ok(Fetcher::new(HttpFetcher::new()?, LocalFetcher::new(&self.root)))
    }

    pub fn resources(&self) -> Result<Resources<Fetcher>> {
        Ok(Resources::new(
            self.fetcher()?,
            self.config.resource_url(MODEL_LIST_FILE),
            self.config.resource_url(TIPS_FILE),
        ))
    }

    pub fn local_store(&self) -> Arc<FileStore> {
        Arc::new(FileStore::open_or_empty(&self.state))
    }

    /// Merged tips, or empty tables when tips are disabled
    pub async fn tips(&self, resources: &Resources<Fetcher>) -> WaifuTips {
        if !self.config.enable_tips {
            return WaifuTips::default();
        }
        let fetched = resources.tips_document().await;
        load_tips(fetched.as_deref(), self.config.waifu_tips.as_ref())
    }

    /// Fetched catalog followed by the configured extra groups
    pub async fn catalog(&self, resources: &Resources<Fetcher>) -> ModelCatalog {
        resources
            .catalog()
            .await
            .as_deref()
            .cloned()
            .unwrap_or_default()
            .with_extra_groups(&self.config.model_list)
    }
}

/// The page the widget is pretending to be on
#[derive(Debug, Clone)]
pub struct PageOptions {
    pub path: String,
    pub host: String,
    pub title: String,
    pub referrer: Option<String>,
    /// Local time to evaluate rules at; now when absent
    pub at: Option<NaiveDateTime>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            host: "localhost".to_string(),
            title: String::new(),
            referrer: None,
            at: None,
        }
    }
}

impl PageOptions {
    pub fn context(&self) -> PageContext {
        PageContext {
            path: self.path.clone(),
            host: self.host.clone(),
            title: self.title.clone(),
            referrer: self.referrer.clone().filter(|r| !r.trim().is_empty()),
            now: self
                .at
                .unwrap_or_else(|| chrono::Local::now().naive_local()),
        }
    }
}

/// Parse `YYYY-MM-DD HH:MM` or `YYYY-MM-DDTHH:MM[:SS]`
pub fn parse_local_time(raw: &str) -> Result<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw.trim(), format).ok())
        .ok_or_else(|| anyhow::anyhow!("Unrecognized time '{}', expected YYYY-MM-DD HH:MM", raw))
}

//! @acp:module "Fetchers"
//! @acp:summary "HTTP and filesystem implementations of the fetch port"
//! @acp:domain widget
//! @acp:layer io

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;

use super::ResourceFetcher;
use crate::error::{Result, WaifuError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches over HTTP(S)
#[derive(Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("waifu-tips/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl ResourceFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WaifuError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json::<Value>().await?)
    }
}

/// Reads documents from a directory standing in for the cdn root
#[derive(Debug, Clone)]
pub struct LocalFetcher {
    root: PathBuf,
}

impl Default for LocalFetcher {
    fn default() -> Self {
        Self::new(".")
    }
}

impl LocalFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `file://` URLs are absolute; anything else is relative to the root
    fn resolve(&self, location: &str) -> Result<PathBuf> {
        if location.starts_with("file://") {
            let url = url::Url::parse(location)?;
            return url.to_file_path().map_err(|_| {
                WaifuError::Config(format!("not a local file url: {}", location))
            });
        }
        Ok(self.root.join(location.trim_start_matches('/')))
    }
}

impl ResourceFetcher for LocalFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let path = self.resolve(url)?;
        tracing::debug!("Reading {}", path.display());
        let content = tokio::fs::read_to_string(&path).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Routes `http(s)://` locations to HTTP and everything else to disk
#[derive(Clone, Default)]
pub struct Fetcher {
    http: HttpFetcher,
    local: LocalFetcher,
}

impl Fetcher {
    pub fn new(http: HttpFetcher, local: LocalFetcher) -> Self {
        Self { http, local }
    }

    pub fn is_remote(location: &str) -> bool {
        location.starts_with("http://") || location.starts_with("https://")
    }
}

impl ResourceFetcher for Fetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        if Self::is_remote(url) {
            self.http.fetch_json(url).await
        } else {
            self.local.fetch_json(url).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_fetch_relative_to_root() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("model_list.json"), r#"{"models": ["a"]}"#).unwrap();

        let fetcher = LocalFetcher::new(dir.path());
        let doc = fetcher.fetch_json("/model_list.json").await.unwrap();
        assert_eq!(doc["models"][0], "a");
    }

    #[tokio::test]
    async fn test_local_fetch_file_url() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tips.json");
        std::fs::write(&path, r#"{"welcome": "hi"}"#).unwrap();

        let url = url::Url::from_file_path(&path).unwrap();
        let doc = Fetcher::default().fetch_json(url.as_str()).await.unwrap();
        assert_eq!(doc["welcome"], "hi");
    }

    #[tokio::test]
    async fn test_local_errors() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        let fetcher = LocalFetcher::new(dir.path());

        assert!(matches!(
            fetcher.fetch_json("missing.json").await,
            Err(WaifuError::Io(_))
        ));
        assert!(matches!(
            fetcher.fetch_json("bad.json").await,
            Err(WaifuError::Json(_))
        ));
    }

    #[test]
    fn test_is_remote() {
        assert!(Fetcher::is_remote("https://cdn.example/model_list.json"));
        assert!(Fetcher::is_remote("http://localhost:8080/x"));
        assert!(!Fetcher::is_remote("/live2d/model_list.json"));
        assert!(!Fetcher::is_remote("file:///tmp/x.json"));
    }
}

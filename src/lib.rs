#![forbid(unsafe_code)]

//! @acp:module "Waifu Tips Library"
//! @acp:summary "Contextual message engine for an on-page companion widget"
//! @acp:domain widget
//! @acp:layer api
//! @acp:stability stable
//!
//! # waifu-tips
//!
//! Decides what a small animated companion figure says and when.
//!
//! ## Features
//!
//! - **Rule tables**: season (`MM/DD` ranges), hour and referrer rules
//! - **Arbitration**: one message at a time, higher priority pre-empts
//! - **Trigger sources**: idle, copy, visibility, dev tools and quotes
//! - **Model rotation**: persisted index over groups of alternates
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use waifu::{Fetcher, Launcher, MemoryStore, PageContext, Ports, WidgetConfig};
//! # use waifu::{FigureRenderer, MessageSink};
//! # struct Console;
//! # impl MessageSink for Console { fn show(&self, _: &str) {} fn hide(&self) {} }
//! # impl FigureRenderer for Console {
//! #     fn load_model(&self, _: &str) {} fn capture(&self, _: &str) {} fn set_visible(&self, _: bool) {}
//! # }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = WidgetConfig::load_or_default();
//!     let ports = Ports {
//!         fetcher: Fetcher::default(),
//!         local: Arc::new(MemoryStore::new()),
//!         session: Arc::new(MemoryStore::new()),
//!         sink: Arc::new(Console),
//!         renderer: Arc::new(Console),
//!     };
//!
//!     let page = PageContext {
//!         path: "/".into(),
//!         host: "example.com".into(),
//!         title: "Home".into(),
//!         referrer: None,
//!         now: chrono::Local::now().naive_local(),
//!     };
//!     let launch = Launcher::new(config, ports).start(&page).await;
//!     println!("active: {}", launch.is_active());
//!     Ok(())
//! }
//! ```

pub mod arbiter;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod remote;
pub mod storage;
pub mod tips;
pub mod triggers;
pub mod widget;

// Re-exports
pub use arbiter::{Arbitrator, DisplayState, MessageSink, Priority};
pub use config::WidgetConfig;
pub use error::{Result, WaifuError};
pub use model::{FigureRenderer, ModelCatalog, ModelGroup, ModelRotation, ModelSelection};
pub use remote::{Fetcher, HttpFetcher, LocalFetcher, ResourceFetcher, Resources};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use tips::{load_tips, select_welcome, MessagePool, PageContext, TemplateArgs, WaifuTips};
pub use triggers::{PageEvent, TriggerSource, Triggers};
pub use widget::{Launch, Launcher, Ports, ToolAction, ToolOutcome, Widget};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

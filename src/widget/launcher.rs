//! @acp:module "Launcher"
//! @acp:summary "Widget entry point: dismiss window check and activation"
//! @acp:domain widget
//! @acp:layer service

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::Widget;
use crate::arbiter::{Arbitrator, DisplayState, MessageSink, WELCOME_PRIORITY, WELCOME_TIMEOUT};
use crate::config::{WidgetConfig, MODEL_LIST_FILE, TIPS_FILE};
use crate::model::{model_resource_path, FigureRenderer, ModelRotation};
use crate::remote::{ResourceFetcher, Resources};
use crate::storage::{KeyValueStore, DISMISS_KEY};
use crate::tips::{load_tips, select_welcome, PageContext, WaifuTips};
use crate::triggers::Triggers;

/// A dismissal keeps the widget dormant for this long
pub const DISMISS_WINDOW_MS: i64 = 86_400_000;

/// Everything the widget talks to outside its own state
pub struct Ports<F> {
    pub fetcher: F,
    /// Survives page loads (dismiss timestamp, model index)
    pub local: Arc<dyn KeyValueStore>,
    /// Lives for one browsing session (displayed priority)
    pub session: Arc<dyn KeyValueStore>,
    pub sink: Arc<dyn MessageSink>,
    pub renderer: Arc<dyn FigureRenderer>,
}

/// Result of starting or toggling the widget
pub enum Launch<F> {
    /// Dismissed recently; only the toggle is shown. Activate it to show
    /// the figure.
    Dormant(Launcher<F>),
    Active(Box<Widget<F>>),
    /// No model could be resolved; nothing is drawn
    NothingToShow,
}

impl<F> Launch<F> {
    pub fn is_active(&self) -> bool {
        matches!(self, Launch::Active(_))
    }

    pub fn is_dormant(&self) -> bool {
        matches!(self, Launch::Dormant(_))
    }

    pub fn into_widget(self) -> Option<Widget<F>> {
        match self {
            Launch::Active(widget) => Some(*widget),
            _ => None,
        }
    }
}

/// Holds the configuration and ports until the widget is activated
pub struct Launcher<F> {
    config: Arc<WidgetConfig>,
    resources: Arc<Resources<F>>,
    local: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
    sink: Arc<dyn MessageSink>,
    renderer: Arc<dyn FigureRenderer>,
}

impl<F: ResourceFetcher> Launcher<F> {
    pub fn new(config: WidgetConfig, ports: Ports<F>) -> Self {
        let config = config.normalized();
        let resources = Resources::new(
            ports.fetcher,
            config.resource_url(MODEL_LIST_FILE),
            config.resource_url(TIPS_FILE),
        );
        Self {
            config: Arc::new(config),
            resources: Arc::new(resources),
            local: ports.local,
            session: ports.session,
            sink: ports.sink,
            renderer: ports.renderer,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Dismiss timestamp in ms since epoch, if one is stored
    pub fn dismissed_at(&self) -> Option<i64> {
        dismissed_at(self.local.as_ref())
    }

    /// True while a dismissal at most [`DISMISS_WINDOW_MS`] old is stored
    pub fn is_dismissed_at(&self, now: DateTime<Utc>) -> bool {
        match self.dismissed_at() {
            Some(at) => now.timestamp_millis() - at <= DISMISS_WINDOW_MS,
            None => false,
        }
    }

    /// Entry point for a page load
    pub async fn start(self, page: &PageContext) -> Launch<F> {
        self.start_at(page, Utc::now()).await
    }

    pub async fn start_at(self, page: &PageContext, now: DateTime<Utc>) -> Launch<F> {
        if self.is_dismissed_at(now) {
            tracing::info!("Dismissed within the last 24h; staying dormant");
            return Launch::Dormant(self);
        }
        self.activate(page).await
    }

    /// Show the figure regardless of any stored dismissal. This is also
    /// what the toggle does on a dormant widget.
    pub async fn activate(self, page: &PageContext) -> Launch<F> {
        DisplayState::default().save(self.session.as_ref());
        self.local.remove(DISMISS_KEY);

        let fetched = self.resources.catalog().await;
        let catalog = fetched
            .as_deref()
            .cloned()
            .unwrap_or_default()
            .with_extra_groups(&self.config.model_list);
        if catalog.is_empty() {
            tracing::info!("Model catalog is empty; nothing to show");
            return Launch::NothingToShow;
        }

        let tips = self.load_tips().await;

        let arbiter = Arbitrator::new(
            self.config.enable_tips,
            Arc::clone(&self.session),
            Arc::clone(&self.sink),
        );
        let triggers = if self.config.enable_tips {
            Triggers::standard(arbiter.clone(), &tips.event)
        } else {
            Triggers::new(arbiter.clone())
        };

        let rotation = ModelRotation::new(Arc::new(catalog), Arc::clone(&self.local));
        let current = rotation.load_current();
        match &current {
            Some(selection) => {
                self.renderer.set_visible(true);
                self.renderer
                    .load_model(&model_resource_path(&self.config.cdn_path, &selection.identifier));
            }
            None => {
                tracing::info!("No usable model in the current group; nothing to show");
                return Launch::NothingToShow;
            }
        }

        if let Some(welcome) = select_welcome(&tips, page, &self.config.title_separator) {
            tracing::debug!("Welcome from {:?}", welcome.source);
            arbiter.request_show(welcome.pool, WELCOME_TIMEOUT, WELCOME_PRIORITY, &welcome.args);
        }

        tracing::info!(
            "Widget active with {} model group(s), {} trigger source(s)",
            rotation.catalog().len(),
            triggers.len()
        );

        Launch::Active(Box::new(Widget {
            config: self.config,
            resources: self.resources,
            local: self.local,
            renderer: self.renderer,
            arbiter,
            tips,
            rotation,
            triggers,
            current,
            visible: true,
        }))
    }

    async fn load_tips(&self) -> WaifuTips {
        if !self.config.enable_tips {
            return WaifuTips::default();
        }
        let fetched = self.resources.tips_document().await;
        load_tips(fetched.as_deref(), self.config.waifu_tips.as_ref())
    }
}

pub(super) fn dismissed_at(store: &dyn KeyValueStore) -> Option<i64> {
    store
        .get(DISMISS_KEY)
        .and_then(|raw| raw.trim().parse::<i64>().ok())
}

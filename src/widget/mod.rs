//! @acp:module "Widget"
//! @acp:summary "Active widget: page events, tool actions, dismiss and restore"
//! @acp:domain widget
//! @acp:layer service
//!
//! A [`Launcher`] decides on page load whether the figure is shown. Once
//! active, the [`Widget`] routes page events to its trigger sources and
//! performs the tool actions. Every message goes through the widget's
//! [`Arbitrator`].

mod launcher;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::arbiter::{
    Arbitrator, EVENT_PRIORITY, EVENT_TIMEOUT, GOODBYE_PRIORITY, GOODBYE_TIMEOUT, MODEL_PRIORITY,
    MODEL_TIMEOUT,
};
use crate::config::WidgetConfig;
use crate::model::{model_resource_path, FigureRenderer, ModelRotation, ModelSelection, SCREENSHOT_NAME};
use crate::remote::{ResourceFetcher, Resources};
use crate::storage::{KeyValueStore, DISMISS_KEY};
use crate::tips::{MessagePool, TemplateArgs, WaifuTips};
use crate::triggers::{PageEvent, Triggers};

pub use launcher::{Launch, Launcher, Ports, DISMISS_WINDOW_MS};

/// Buttons in the tool bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolAction {
    Quote,
    SwitchModel,
    Screenshot,
    About,
    Dismiss,
}

impl ToolAction {
    pub const ALL: [ToolAction; 5] = [
        ToolAction::Quote,
        ToolAction::SwitchModel,
        ToolAction::Screenshot,
        ToolAction::About,
        ToolAction::Dismiss,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolAction::Quote => "quote",
            ToolAction::SwitchModel => "switch-model",
            ToolAction::Screenshot => "screenshot",
            ToolAction::About => "about",
            ToolAction::Dismiss => "dismiss",
        }
    }
}

impl fmt::Display for ToolAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quote" | "hitokoto" => Ok(ToolAction::Quote),
            "switch-model" | "model" | "next" => Ok(ToolAction::SwitchModel),
            "screenshot" | "photo" => Ok(ToolAction::Screenshot),
            "about" | "info" => Ok(ToolAction::About),
            "dismiss" | "quit" => Ok(ToolAction::Dismiss),
            other => Err(format!("unknown tool action: {}", other)),
        }
    }
}

/// What a tool action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutcome {
    /// Tools are turned off in the configuration
    Disabled,
    /// Whether the arbitrator accepted the message
    Message(bool),
    Model(Option<ModelSelection>),
    About(String),
    Dismissed,
}

/// The figure on the page, after activation
pub struct Widget<F> {
    config: Arc<WidgetConfig>,
    resources: Arc<Resources<F>>,
    local: Arc<dyn KeyValueStore>,
    renderer: Arc<dyn FigureRenderer>,
    arbiter: Arbitrator,
    tips: WaifuTips,
    rotation: ModelRotation,
    triggers: Triggers,
    current: Option<ModelSelection>,
    visible: bool,
}

impl<F: ResourceFetcher> Widget<F> {
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn arbiter(&self) -> &Arbitrator {
        &self.arbiter
    }

    pub fn tips(&self) -> &WaifuTips {
        &self.tips
    }

    pub fn current_model(&self) -> Option<&ModelSelection> {
        self.current.as_ref()
    }

    pub fn rotation(&self) -> &ModelRotation {
        &self.rotation
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Feed a page event to the trigger sources. A hidden figure says
    /// nothing.
    pub fn dispatch(&mut self, event: PageEvent) -> Vec<&'static str> {
        if !self.visible {
            return Vec::new();
        }
        self.triggers.dispatch(event)
    }

    /// Fetch one quote and show it. The priority guard runs after the
    /// fetch, against whatever is on screen by then.
    pub async fn show_quote(&self) -> bool {
        let Some(quote) = self.resources.quote(&self.config.quote_url).await else {
            return false;
        };
        self.arbiter.request_show(
            &MessagePool::from(quote),
            EVENT_TIMEOUT,
            EVENT_PRIORITY,
            &TemplateArgs::new(),
        )
    }

    /// Advance to the next model group and load it
    pub fn switch_model(&mut self) -> Option<ModelSelection> {
        let selection = self.rotation.advance()?;
        tracing::info!("Switching to model {} ({})", selection.index, selection.identifier);
        self.renderer
            .load_model(&model_resource_path(&self.config.cdn_path, &selection.identifier));

        if let Some(caption) = &selection.caption {
            self.arbiter.request_show(
                &MessagePool::from(caption.as_str()),
                MODEL_TIMEOUT,
                MODEL_PRIORITY,
                &TemplateArgs::new(),
            );
        }
        self.current = Some(selection.clone());
        Some(selection)
    }

    /// Show the screenshot message and capture the figure
    pub fn screenshot(&self) -> bool {
        let shown = self.arbiter.request_show(
            &self.tips.event.screenshot,
            EVENT_TIMEOUT,
            EVENT_PRIORITY,
            &TemplateArgs::new(),
        );
        self.renderer.capture(SCREENSHOT_NAME);
        shown
    }

    pub fn about_url(&self) -> &str {
        self.config.about_url()
    }

    pub fn dismiss(&mut self) {
        self.dismiss_at(Utc::now());
    }

    /// Remember the dismissal, say goodbye and hide the figure
    pub fn dismiss_at(&mut self, now: DateTime<Utc>) {
        self.local
            .set(DISMISS_KEY, &now.timestamp_millis().to_string());
        self.arbiter.request_show(
            &self.tips.goodbye,
            GOODBYE_TIMEOUT,
            GOODBYE_PRIORITY,
            &TemplateArgs::new(),
        );
        self.renderer.set_visible(false);
        self.visible = false;
        tracing::info!("Widget dismissed");
    }

    /// Forget the dismissal and show the figure again
    pub fn restore(&mut self) {
        self.local.remove(DISMISS_KEY);
        self.renderer.set_visible(true);
        self.visible = true;
        tracing::info!("Widget restored");
    }

    /// Toggle click. Only a dismissed figure reacts; returns whether it
    /// was restored.
    pub fn toggle(&mut self) -> bool {
        if self.visible {
            return false;
        }
        self.restore();
        true
    }

    pub fn dismissed_at(&self) -> Option<i64> {
        launcher::dismissed_at(self.local.as_ref())
    }

    pub async fn handle_tool(&mut self, action: ToolAction) -> ToolOutcome {
        if !self.config.enable_tool {
            tracing::debug!("Tool '{}' ignored; tools are disabled", action);
            return ToolOutcome::Disabled;
        }
        match action {
            ToolAction::Quote => ToolOutcome::Message(self.show_quote().await),
            ToolAction::SwitchModel => ToolOutcome::Model(self.switch_model()),
            ToolAction::Screenshot => ToolOutcome::Message(self.screenshot()),
            ToolAction::About => ToolOutcome::About(self.about_url().to_string()),
            ToolAction::Dismiss => {
                self.dismiss();
                ToolOutcome::Dismissed
            }
        }
    }
}

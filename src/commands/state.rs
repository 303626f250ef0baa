//! @acp:module "State Commands"
//! @acp:summary "Dismiss, restore and report persisted widget state"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;

use super::context::SessionOptions;
use crate::storage::{KeyValueStore, DISMISS_KEY, MODEL_INDEX_KEY};
use crate::widget::DISMISS_WINDOW_MS;

/// Persisted state as the launcher would see it
#[derive(Debug, Clone, Serialize)]
pub struct StateReport {
    pub state_file: String,
    pub dismissed_at: Option<i64>,
    /// Milliseconds until a dismissal stops keeping the widget dormant
    pub dormant_for_ms: Option<i64>,
    pub model_index: Option<String>,
}

impl StateReport {
    pub fn read(session: &SessionOptions, now: DateTime<Utc>) -> Self {
        let store = session.local_store();
        let dismissed_at = store
            .get(DISMISS_KEY)
            .and_then(|raw| raw.trim().parse::<i64>().ok());
        let dormant_for_ms = dismissed_at
            .map(|at| DISMISS_WINDOW_MS - (now.timestamp_millis() - at))
            .filter(|remaining| *remaining > 0);

        Self {
            state_file: session.state.display().to_string(),
            dismissed_at,
            dormant_for_ms,
            model_index: store.get(MODEL_INDEX_KEY),
        }
    }
}

/// Store a dismissal at the current time
pub fn execute_dismiss(session: SessionOptions) -> Result<()> {
    let now = Utc::now();
    session
        .local_store()
        .set(DISMISS_KEY, &now.timestamp_millis().to_string());
    println!(
        "{} Dismissed; the widget stays dormant until {}",
        style("✓").green(),
        (now + chrono::Duration::milliseconds(DISMISS_WINDOW_MS)).format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}

/// Forget any stored dismissal
pub fn execute_restore(session: SessionOptions) -> Result<()> {
    let store = session.local_store();
    if store.get(DISMISS_KEY).is_none() {
        println!("{} Widget was not dismissed", style("○").dim());
        return Ok(());
    }
    store.remove(DISMISS_KEY);
    println!("{} Widget restored", style("✓").green());
    Ok(())
}

/// Show persisted state and configuration
pub fn execute_status(session: SessionOptions, json: bool) -> Result<()> {
    let report = StateReport::read(&session, Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let config = &session.config;
    println!("{}", style("Widget Status").bold());
    println!("  State file:  {}", style(&report.state_file).dim());
    println!("  Cdn path:    {}", config.cdn_path);
    println!(
        "  Tips:        {}",
        if config.enable_tips { style("enabled").green() } else { style("disabled").red() }
    );
    println!(
        "  Tools:       {}",
        if config.enable_tool { style("enabled").green() } else { style("disabled").red() }
    );
    match report.dormant_for_ms {
        Some(remaining) => println!(
            "  Display:     {} ({}h {}m left)",
            style("dormant").yellow(),
            remaining / 3_600_000,
            remaining % 3_600_000 / 60_000
        ),
        None => println!("  Display:     {}", style("active").green()),
    }
    println!(
        "  Model index: {}",
        report.model_index.as_deref().unwrap_or("0 (unset)")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session(dir: &TempDir) -> SessionOptions {
        SessionOptions {
            state: dir.path().join("state.json"),
            ..Default::default()
        }
    }

    #[test]
    fn test_dismiss_and_restore() {
        let dir = TempDir::new().unwrap();
        execute_dismiss(session(&dir)).unwrap();

        let report = StateReport::read(&session(&dir), Utc::now());
        assert!(report.dismissed_at.is_some());
        assert!(report.dormant_for_ms.unwrap() > 0);

        execute_restore(session(&dir)).unwrap();
        let report = StateReport::read(&session(&dir), Utc::now());
        assert_eq!(report.dismissed_at, None);
        assert_eq!(report.dormant_for_ms, None);
    }

    #[test]
    fn test_old_dismissal_is_not_dormant() {
        let dir = TempDir::new().unwrap();
        let two_days_ago = Utc::now() - chrono::Duration::days(2);
        session(&dir)
            .local_store()
            .set(DISMISS_KEY, &two_days_ago.timestamp_millis().to_string());

        let report = StateReport::read(&session(&dir), Utc::now());
        assert!(report.dismissed_at.is_some());
        assert_eq!(report.dormant_for_ms, None);
    }
}

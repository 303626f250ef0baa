//! @acp:module "Welcome Command"
//! @acp:summary "Show which welcome message a page would get"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;
use serde::Serialize;

use super::context::{PageOptions, SessionOptions};
use crate::tips::{render_template, select_welcome, WelcomeSource};

/// Options for the welcome command
#[derive(Debug, Clone, Default)]
pub struct WelcomeOptions {
    pub session: SessionOptions,
    pub page: PageOptions,
    /// Output as JSON
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct WelcomeReport {
    source: Option<String>,
    candidates: Vec<String>,
    rendered: Option<String>,
}

/// Execute the welcome command
pub async fn execute_welcome(options: WelcomeOptions) -> Result<()> {
    let resources = options.session.resources()?;
    let tips = options.session.tips(&resources).await;
    let page = options.page.context();

    let welcome = select_welcome(&tips, &page, &options.session.config.title_separator);

    let report = match &welcome {
        Some(welcome) => {
            let candidates: Vec<String> = welcome
                .pool
                .texts()
                .iter()
                .map(|text| render_template(text, &welcome.args))
                .collect();
            WelcomeReport {
                source: Some(source_label(welcome.source).to_string()),
                rendered: candidates.first().cloned(),
                candidates,
            }
        }
        None => WelcomeReport {
            source: None,
            candidates: Vec::new(),
            rendered: None,
        },
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report.source {
        Some(source) => {
            println!("{} {}", style("Welcome").bold(), style(format!("({})", source)).dim());
            for text in &report.candidates {
                println!("  {} {}", style("→").cyan(), text);
            }
        }
        None => println!("{} No welcome message for {}", style("○").dim(), page.path),
    }
    Ok(())
}

fn source_label(source: WelcomeSource) -> &'static str {
    match source {
        WelcomeSource::Season => "season",
        WelcomeSource::Time => "time",
        WelcomeSource::Referrer => "referrer",
        WelcomeSource::ReferrerDefault => "referrer default",
        WelcomeSource::Generic => "generic",
    }
}

//! @acp:module "Run Command"
//! @acp:summary "Interactive widget session driven by page events on stdin"
//! @acp:domain cli
//! @acp:layer handler
//!
//! One event or tool action per line. The idle detector is fed a tick
//! every second of wall-clock time.

use std::sync::Arc;

use anyhow::Result;
use console::style;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::context::{PageOptions, SessionOptions};
use super::output::{ConsoleRenderer, ConsoleSink};
use crate::remote::Fetcher;
use crate::storage::MemoryStore;
use crate::triggers::{PageEvent, IDLE_TICK};
use crate::widget::{Launch, Launcher, Ports, ToolAction, ToolOutcome, Widget};

/// Options for the run command
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub session: SessionOptions,
    pub page: PageOptions,
    /// Activate even if dismissed within the last 24h
    pub force: bool,
}

/// A parsed stdin line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunInput {
    Event(PageEvent),
    Tool(ToolAction),
    Toggle,
    Help,
    Quit,
}

impl RunInput {
    pub fn parse(line: &str) -> Option<Self> {
        let input = match line.trim().to_ascii_lowercase().as_str() {
            "" => return None,
            "move" | "mouse" => RunInput::Event(PageEvent::PointerMove),
            "key" => RunInput::Event(PageEvent::KeyDown),
            "copy" => RunInput::Event(PageEvent::Copy),
            "hide" | "blur" => RunInput::Event(PageEvent::VisibilityChange { hidden: true }),
            "show" | "focus" => RunInput::Event(PageEvent::VisibilityChange { hidden: false }),
            "devtools" | "console" => RunInput::Event(PageEvent::DevToolsOpened),
            "toggle" => RunInput::Toggle,
            "help" | "?" => RunInput::Help,
            "exit" | "q" => RunInput::Quit,
            other => RunInput::Tool(other.parse().ok()?),
        };
        Some(input)
    }
}

/// Execute the run command
pub async fn execute_run(options: RunOptions) -> Result<()> {
    let session = &options.session;
    let ports = Ports {
        fetcher: session.fetcher()?,
        local: session.local_store(),
        session: Arc::new(MemoryStore::new()),
        sink: Arc::new(ConsoleSink),
        renderer: Arc::new(ConsoleRenderer),
    };
    let launcher = Launcher::new(session.config.clone(), ports);
    let page = options.page.context();

    let launch = if options.force {
        launcher.activate(&page).await
    } else {
        launcher.start(&page).await
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut widget = match launch {
        Launch::Active(widget) => *widget,
        Launch::NothingToShow => {
            println!("{} No model to show; check cdnPath and modelList", style("⚠").yellow());
            return Ok(());
        }
        Launch::Dormant(launcher) => {
            println!(
                "{} Dismissed within the last 24h. Type 'toggle' to show the figure.",
                style("○").dim()
            );
            match wait_for_toggle(&mut lines).await? {
                true => match launcher.activate(&page).await.into_widget() {
                    Some(widget) => widget,
                    None => return Ok(()),
                },
                false => return Ok(()),
            }
        }
    };

    print_help();
    let mut ticker = tokio::time::interval(IDLE_TICK);
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                widget.dispatch(PageEvent::Tick(IDLE_TICK));
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match RunInput::parse(&line) {
                    Some(RunInput::Quit) => break,
                    Some(input) => handle_input(&mut widget, input).await,
                    None if line.trim().is_empty() => {}
                    None => println!("{} Unknown input '{}'", style("?").yellow(), line.trim()),
                }
            }
        }
    }
    Ok(())
}

async fn wait_for_toggle<R>(lines: &mut tokio::io::Lines<R>) -> Result<bool>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    while let Some(line) = lines.next_line().await? {
        match RunInput::parse(&line) {
            Some(RunInput::Toggle) => return Ok(true),
            Some(RunInput::Quit) => return Ok(false),
            _ => println!("{}", style("Only 'toggle' or 'exit' while dormant").dim()),
        }
    }
    Ok(false)
}

async fn handle_input(widget: &mut Widget<Fetcher>, input: RunInput) {
    match input {
        RunInput::Event(event) => {
            let fired = widget.dispatch(event);
            if fired.is_empty() {
                tracing::debug!("{:?}: nothing shown", event);
            }
        }
        RunInput::Tool(action) => match widget.handle_tool(action).await {
            ToolOutcome::Disabled => println!("{} Tools are disabled", style("○").dim()),
            ToolOutcome::About(url) => println!("{} {}", style("ℹ").cyan(), url),
            ToolOutcome::Model(None) => println!("{} No other model", style("○").dim()),
            ToolOutcome::Message(_) | ToolOutcome::Model(Some(_)) | ToolOutcome::Dismissed => {}
        },
        RunInput::Toggle => {
            if !widget.toggle() {
                println!("{} Figure is already shown", style("○").dim());
            }
        }
        RunInput::Help => print_help(),
        RunInput::Quit => {}
    }
}

fn print_help() {
    println!("{}", style("Events: move key copy hide show devtools").dim());
    println!(
        "{}",
        style("Tools:  quote switch-model screenshot about dismiss | toggle help exit").dim()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        assert_eq!(RunInput::parse("copy"), Some(RunInput::Event(PageEvent::Copy)));
        assert_eq!(
            RunInput::parse(" SHOW "),
            Some(RunInput::Event(PageEvent::VisibilityChange { hidden: false }))
        );
        assert_eq!(RunInput::parse("quote"), Some(RunInput::Tool(ToolAction::Quote)));
        assert_eq!(RunInput::parse("toggle"), Some(RunInput::Toggle));
        assert_eq!(RunInput::parse("exit"), Some(RunInput::Quit));
        assert_eq!(RunInput::parse(""), None);
        assert_eq!(RunInput::parse("dance"), None);
    }
}

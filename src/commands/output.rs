//! @acp:module "Console Output"
//! @acp:summary "Terminal implementations of the message sink and figure renderer"
//! @acp:domain cli
//! @acp:layer presentation

use console::style;

use crate::arbiter::MessageSink;
use crate::model::FigureRenderer;
use crate::tips::MessagePool;

/// Prints speech bubbles to stdout
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn show(&self, text: &str) {
        println!("{} {}", style("💬").cyan(), text);
    }

    fn hide(&self) {
        println!("{}", style("   (bubble hidden)").dim());
    }
}

/// Reports what a real renderer would draw
#[derive(Debug, Default)]
pub struct ConsoleRenderer;

impl FigureRenderer for ConsoleRenderer {
    fn load_model(&self, url: &str) {
        println!("{} Loading model {}", style("→").cyan(), style(url).dim());
    }

    fn capture(&self, name: &str) {
        println!("{} Captured {}", style("📷").green(), name);
    }

    fn set_visible(&self, visible: bool) {
        if visible {
            println!("{} Figure shown", style("●").green());
        } else {
            println!("{} Figure hidden", style("○").dim());
        }
    }
}

/// One pool on one line, alternates joined with ` | `
pub fn format_pool(pool: &MessagePool) -> String {
    if pool.is_empty() {
        return style("(empty)").dim().to_string();
    }
    pool.texts().join(" | ")
}

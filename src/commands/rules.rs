//! @acp:module "Rules Command"
//! @acp:summary "Print the merged and normalized message tables"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use super::context::SessionOptions;
use super::output::format_pool;
use crate::tips::WaifuTips;

/// Options for the rules command
#[derive(Debug, Clone, Default)]
pub struct RulesOptions {
    pub session: SessionOptions,
    /// Only print the season and time tables
    pub context_only: bool,
}

/// Execute the rules command
pub async fn execute_rules(options: RulesOptions) -> Result<()> {
    let resources = options.session.resources()?;
    let tips = options.session.tips(&resources).await;
    print!("{}", render_rules(&tips, options.context_only));
    Ok(())
}

fn render_rules(tips: &WaifuTips, context_only: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!("{} ({})\n", style("Seasons").bold(), tips.seasons.len()));
    for rule in &tips.seasons {
        out.push_str(&format!("  {:<12} {}\n", rule.boundary.to_string(), format_pool(&rule.text)));
    }

    out.push_str(&format!("{} ({})\n", style("Times").bold(), tips.times.len()));
    for rule in &tips.times {
        out.push_str(&format!("  {:<12} {}\n", rule.span.to_string(), format_pool(&rule.text)));
    }

    if context_only {
        return out;
    }

    out.push_str(&format!("{}\n", style("Referrers").bold()));
    for (domain, pool) in &tips.referrer.domains {
        out.push_str(&format!("  {:<12} {}\n", domain, format_pool(pool)));
    }
    out.push_str(&format!("  {:<12} {}\n", "default", format_pool(&tips.referrer.default)));

    out.push_str(&format!("{}\n", style("Messages").bold()));
    let event = &tips.event;
    for (name, pool) in [
        ("welcome", &tips.welcome),
        ("goodbye", &tips.goodbye),
        ("idle", &event.idle),
        ("copy", &event.copy),
        ("visibility", &event.visibilitychange),
        ("devtool", &event.devtool),
        ("screenshot", &event.screenshot),
    ] {
        out.push_str(&format!("  {:<12} {}\n", name, format_pool(pool)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tips::load_tips;
    use serde_json::json;

    #[test]
    fn test_render_sorted_tables() {
        console::set_colors_enabled(false);
        let tips = load_tips(
            Some(&json!({
                "seasons": [{"date": "12/25", "text": "xmas"}, {"date": "01/01", "text": "new year"}],
                "times": [{"hour": "6-9", "text": "morning"}]
            })),
            None,
        );

        let rendered = render_rules(&tips, true);
        let xmas = rendered.find("xmas").unwrap();
        let new_year = rendered.find("new year").unwrap();
        assert!(new_year < xmas);
        assert!(!rendered.contains("Referrers"));
    }
}

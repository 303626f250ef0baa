//! @acp:module "Quote Command"
//! @acp:summary "Fetch one quote from the configured service"
//! @acp:domain cli
//! @acp:layer handler

use anyhow::Result;
use console::style;

use super::context::SessionOptions;

/// Execute the quote command
pub async fn execute_quote(session: SessionOptions) -> Result<()> {
    let resources = session.resources()?;
    match resources.quote(&session.config.quote_url).await {
        Some(quote) => println!("{} {}", style("💬").cyan(), quote),
        None => eprintln!(
            "{} No quote from {}",
            style("✗").red(),
            session.config.quote_url
        ),
    }
    Ok(())
}

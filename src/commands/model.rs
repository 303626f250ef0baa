//! @acp:module "Model Command"
//! @acp:summary "Inspect or advance the persisted model rotation"
//! @acp:domain cli
//! @acp:layer handler

use std::sync::Arc;

use anyhow::Result;
use console::style;

use super::context::SessionOptions;
use crate::model::{model_resource_path, ModelRotation};

/// Model subcommands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSubcommand {
    /// Figure for the stored index
    Current,
    /// Advance to the next group
    Next,
}

#[derive(Debug, Clone, Default)]
pub struct ModelOptions {
    pub session: SessionOptions,
    /// List every group as well
    pub list: bool,
}

/// Execute the model command
pub async fn execute_model(subcommand: ModelSubcommand, options: ModelOptions) -> Result<()> {
    let resources = options.session.resources()?;
    let catalog = options.session.catalog(&resources).await;
    if catalog.is_empty() {
        println!("{} Model catalog is empty", style("⚠").yellow());
        return Ok(());
    }

    let rotation = ModelRotation::new(Arc::new(catalog), options.session.local_store());
    let selection = match subcommand {
        ModelSubcommand::Current => rotation.load_current(),
        ModelSubcommand::Next => rotation.advance(),
    };

    match selection {
        Some(selection) => {
            println!(
                "{} [{}/{}] {}",
                style("●").green(),
                selection.index + 1,
                rotation.catalog().len(),
                style(&selection.identifier).bold()
            );
            println!(
                "  {}",
                style(model_resource_path(
                    &options.session.config.cdn_path,
                    &selection.identifier
                ))
                .dim()
            );
            if let Some(caption) = &selection.caption {
                println!("  {} {}", style("💬").cyan(), caption);
            }
        }
        None => println!("{} Current group has no usable model", style("⚠").yellow()),
    }

    if options.list {
        println!("\n{}", style("Groups:").bold());
        for (index, group) in rotation.catalog().models.iter().enumerate() {
            let caption = rotation.catalog().caption(index).unwrap_or("");
            println!("  {:>3}. {:?} {}", index, group, style(caption).dim());
        }
    }
    Ok(())
}

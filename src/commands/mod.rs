//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod context;
pub mod model;
pub mod output;
pub mod quote;
pub mod rules;
pub mod run;
pub mod state;
pub mod welcome;

pub use context::{parse_local_time, PageOptions, SessionOptions};
pub use model::{execute_model, ModelOptions, ModelSubcommand};
pub use output::{format_pool, ConsoleRenderer, ConsoleSink};
pub use quote::execute_quote;
pub use rules::{execute_rules, RulesOptions};
pub use run::{execute_run, RunInput, RunOptions};
pub use state::{execute_dismiss, execute_restore, execute_status, StateReport};
pub use welcome::{execute_welcome, WelcomeOptions};

#![forbid(unsafe_code)]
//! Waifu Tips Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use waifu::commands::{
    execute_dismiss, execute_model, execute_quote, execute_restore, execute_rules, execute_run,
    execute_status, execute_welcome, parse_local_time, ModelOptions, ModelSubcommand, PageOptions,
    RulesOptions, RunOptions, SessionOptions, WelcomeOptions,
};
use waifu::config::DEFAULT_CONFIG_FILE;
use waifu::{FileStore, WidgetConfig};

#[derive(Parser)]
#[command(name = "waifu")]
#[command(about = "Companion widget message engine - welcome rules, model rotation and tips")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Persisted state file (default: platform data dir)
    #[arg(long, global = true, env = "WAIFU_STATE")]
    state: Option<PathBuf>,

    /// Override the configured cdn path
    #[arg(long, global = true)]
    cdn: Option<String>,

    /// Directory that local cdn paths resolve against
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Disable all messages
    #[arg(long, global = true)]
    no_tips: bool,

    /// Disable tool actions
    #[arg(long, global = true)]
    no_tool: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Page the widget is shown on
#[derive(clap::Args, Debug, Clone)]
struct PageArgs {
    /// Page path; `/` is the home page
    #[arg(long, default_value = "/")]
    path: String,

    /// Page host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Document title
    #[arg(long, default_value = "")]
    title: String,

    /// Referring URL
    #[arg(long)]
    referrer: Option<String>,

    /// Local time to evaluate rules at (YYYY-MM-DD HH:MM)
    #[arg(long)]
    at: Option<String>,
}

impl PageArgs {
    fn into_options(self) -> anyhow::Result<PageOptions> {
        Ok(PageOptions {
            path: self.path,
            host: self.host,
            title: self.title,
            referrer: self.referrer,
            at: self.at.as_deref().map(parse_local_time).transpose()?,
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the welcome message a page would get
    Welcome {
        #[command(flatten)]
        page: PageArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or advance the model rotation
    Model {
        #[command(subcommand)]
        cmd: ModelCommands,

        /// List every group
        #[arg(long, global = true)]
        list: bool,
    },

    /// Fetch one quote
    Quote,

    /// Dismiss the widget for 24 hours
    Dismiss,

    /// Undo a dismissal
    Restore,

    /// Show persisted state and configuration
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the merged message tables
    Rules {
        /// Only season and time tables
        #[arg(long)]
        context: bool,
    },

    /// Run an interactive widget session reading page events from stdin
    Run {
        #[command(flatten)]
        page: PageArgs,

        /// Activate even if recently dismissed
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum ModelCommands {
    /// Show the current model
    Current,
    /// Switch to the next model
    Next,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "waifu=debug" } else { "waifu=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load config
    let mut config = if cli.config.exists() {
        match WidgetConfig::load(&cli.config) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{} Cannot read {}: {}", style("✗").red(), cli.config.display(), e);
                std::process::exit(1);
            }
        }
    } else {
        WidgetConfig::default()
    };
    if let Some(cdn) = cli.cdn {
        config.cdn_path = cdn;
    }
    if cli.no_tips {
        config.enable_tips = false;
    }
    if cli.no_tool {
        config.enable_tool = false;
    }

    let session = SessionOptions {
        config: config.normalized(),
        state: cli.state.unwrap_or_else(FileStore::default_path),
        root: cli.root,
    };

    match cli.command {
        Commands::Welcome { page, json } => {
            let options = WelcomeOptions {
                session,
                page: page.into_options()?,
                json,
            };
            execute_welcome(options).await?;
        }

        Commands::Model { cmd, list } => {
            let subcommand = match cmd {
                ModelCommands::Current => ModelSubcommand::Current,
                ModelCommands::Next => ModelSubcommand::Next,
            };
            execute_model(subcommand, ModelOptions { session, list }).await?;
        }

        Commands::Quote => {
            execute_quote(session).await?;
        }

        Commands::Dismiss => {
            execute_dismiss(session)?;
        }

        Commands::Restore => {
            execute_restore(session)?;
        }

        Commands::Status { json } => {
            execute_status(session, json)?;
        }

        Commands::Rules { context } => {
            let options = RulesOptions {
                session,
                context_only: context,
            };
            execute_rules(options).await?;
        }

        Commands::Run { page, force } => {
            let options = RunOptions {
                session,
                page: page.into_options()?,
                force,
            };
            execute_run(options).await?;
        }
    }

    Ok(())
}

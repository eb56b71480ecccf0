//! Command-line interface
//!
//! Thin driver over [`SessionController`]: every subcommand maps onto one or
//! two controller actions and writes the resulting image to disk.

use crate::config::Config;
use crate::core::compositor::Compositor;
use crate::core::providers::Provider;
use crate::core::session::{SessionController, SessionError};
use crate::core::types::{GenerationResult, HistoryEntry, SourceImage};
use crate::storage::{HistoryStore, KeyValueStore};
use crate::utils::error::{Error, Result};
use crate::utils::logging::init_logging;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::{debug, info};

type Session = SessionController<Provider, HistoryStore>;

const DEFAULT_OUTPUT: &str = "panorama.png";

/// Turn any picture into a 16:9 panorama
#[derive(Debug, Parser)]
#[command(name = "outpaint", version, about)]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "OUTPAINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the generation history
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// API key (defaults to GEMINI_API_KEY / GOOGLE_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Composite an image onto the 1280x720 template and save it as PNG
    Template { input: PathBuf, output: PathBuf },
    /// Outpaint an image into a panorama
    Generate {
        input: PathBuf,
        /// Scene description for the extended area
        #[arg(short, long)]
        prompt: String,
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        out: PathBuf,
        /// Run an enhancement pass on the result
        #[arg(long)]
        enhance: bool,
    },
    /// Generate the source picture from a description, then outpaint it
    Imagine {
        /// What the source picture should show
        #[arg(short, long)]
        description: String,
        #[arg(short, long)]
        prompt: String,
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        out: PathBuf,
    },
    /// Enhance a history entry's result (newest when no id is given)
    Enhance {
        id: Option<i64>,
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        out: PathBuf,
    },
    /// Inspect or edit the generation history
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List entries, newest first
    List,
    /// Export an entry's template and result
    Show {
        id: i64,
        /// Also write the entry's template here
        #[arg(long)]
        template: Option<PathBuf>,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Delete one entry
    Delete { id: i64 },
    /// Delete every entry
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// Resolve the effective configuration: file, then environment, then flags
    pub async fn load_config(&self) -> Result<Config> {
        self.load_config_with(|name| std::env::var(name).ok()).await
    }

    /// `load_config` with environment variables read through `lookup`
    pub async fn load_config_with<F>(&self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path).await?,
            None => Config::default(),
        };
        config.apply_env_with(lookup)?;

        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = Some(dir.clone());
        }
        if let Some(key) = &self.api_key {
            config.provider.api_key = Some(key.clone());
        }
        if self.log_json {
            config.logging.json = true;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Run the parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.load_config().await?;
    init_logging(&config.logging)?;
    debug!(build = %crate::build_info(), ?config, "Configuration resolved");

    let compositor = Compositor::new(config.decode_timeout());

    match cli.command {
        Command::Template { input, output } => {
            let source = SourceImage::from_file(&input).await?;
            let template = compositor.compose_async(source).await?;
            write_file(&output, template.bytes()).await?;
            println!("{}", output.display());
            Ok(())
        }
        Command::Generate {
            input,
            prompt,
            out,
            enhance,
        } => {
            let mut session = open_session(&config, compositor).await?;
            let progress = report_progress(&session);

            session.set_prompt(prompt);
            session
                .upload_source(SourceImage::from_file(&input).await?)
                .await?;
            let mut result = session.generate_panorama().await?;
            if enhance {
                result = session.enhance_result().await?;
            }

            progress.abort();
            write_result(&out, &result).await
        }
        Command::Imagine {
            description,
            prompt,
            out,
        } => {
            let mut session = open_session(&config, compositor).await?;
            let progress = report_progress(&session);

            session.generate_source(&description).await?;
            session.set_prompt(prompt);
            let result = session.generate_panorama().await?;

            progress.abort();
            write_result(&out, &result).await
        }
        Command::Enhance { id, out } => {
            let mut session = open_session(&config, compositor).await?;
            let progress = report_progress(&session);

            let id = match id {
                Some(id) => id,
                None => newest_id(&session)?,
            };
            session.reuse_entry(id)?;
            let result = session.enhance_result().await?;

            progress.abort();
            write_result(&out, &result).await
        }
        Command::History { action } => {
            let mut session = open_session(&config, compositor).await?;
            run_history(&mut session, action).await
        }
    }
}

async fn run_history(session: &mut Session, action: HistoryCommand) -> Result<()> {
    match action {
        HistoryCommand::List => {
            if session.history().is_empty() {
                println!("No history yet.");
            }
            for entry in session.history() {
                println!("{}", describe_entry(entry));
            }
            Ok(())
        }
        HistoryCommand::Show { id, template, out } => {
            session.reuse_entry(id)?;
            if let (Some(path), Some(current)) = (template, session.template()) {
                write_file(&path, current.bytes()).await?;
                println!("{}", path.display());
            }
            if let (Some(path), Some(result)) = (out, session.result().cloned()) {
                write_result(&path, &result).await?;
            }
            println!("{}", session.prompt());
            Ok(())
        }
        HistoryCommand::Delete { id } => {
            session.delete_entry(id).await?;
            println!("Deleted entry {}", id);
            Ok(())
        }
        HistoryCommand::Clear { yes } => {
            let count = session.history().len();
            let cleared = session
                .clear_history(|| yes || confirm(&format!("Delete all {} history entries?", count)))
                .await?;
            if cleared {
                println!("History cleared");
            }
            Ok(())
        }
    }
}

async fn open_session(config: &Config, compositor: Compositor) -> Result<Session> {
    let provider = Provider::from_settings(&config.provider)?;
    let data_dir = config.data_dir();
    info!(data_dir = %data_dir.display(), "Opening history store");

    let store = KeyValueStore::local(&data_dir).await?;
    store.health_check().await?;
    let history = HistoryStore::with_key(store, config.storage.history_key.clone());

    let mut session = SessionController::open(provider, history)
        .await
        .with_compositor(compositor);
    session.set_credential(config.api_key().map(str::to_string));
    Ok(session)
}

/// Print pending-status messages to stderr until aborted
fn report_progress(session: &Session) -> JoinHandle<()> {
    let mut status = session.subscribe_status();
    tokio::spawn(async move {
        while status.changed().await.is_ok() {
            let message = status.borrow_and_update().clone();
            if let Some(message) = message {
                eprintln!("{}", message);
            }
        }
    })
}

fn newest_id(session: &Session) -> Result<i64> {
    session
        .history()
        .first()
        .map(|entry| entry.id)
        .ok_or_else(|| Error::NotFound("history is empty".to_string()))
}

fn describe_entry(entry: &HistoryEntry) -> String {
    let created = entry
        .created_at()
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!("{}  {}  {}", entry.id, created, entry.prompt)
}

async fn write_result(path: &Path, result: &GenerationResult) -> Result<()> {
    let image = result.image().map_err(SessionError::MalformedResult)?;
    write_file(path, &image.bytes).await?;
    if let Some(text) = &result.text {
        println!("{}", text);
    }
    println!("{}", path.display());
    Ok(())
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

fn confirm(question: &str) -> bool {
    eprint!("{} [y/N] ", question);
    let _ = std::io::stderr().flush();

    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

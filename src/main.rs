use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use log::{error, info, warn};
use profile_drawer::conversation::{Conversation, other_user};
use profile_drawer::{DeleteOutcome, DrawerConfig, PanelHost, PresenceFeed, ProfilePanel};
use profile_drawer_ureq_http_client::UreqHttpClient;
use std::path::PathBuf;
use std::sync::Arc;

// Inspects a conversation snapshot the way the profile drawer shows it, and
// optionally deletes it.
//
// Usage:
//   cargo run -- -f conversation.json --me me@example.com show
//   cargo run -- -f conversation.json --me me@example.com -a bob@example.com show
//   cargo run -- -f conversation.json --api-base http://localhost:3000 delete --yes

#[derive(Parser, Debug)]
#[command(name = "profile-drawer", about = "Show or delete a conversation")]
struct Cli {
    /// Conversation snapshot (JSON, with embedded users).
    #[arg(short = 'f', long)]
    conversation: PathBuf,

    /// Email of the signed-in user, used to find the other participant.
    #[arg(long)]
    me: Option<String>,

    /// Identities currently active. May be repeated or comma separated.
    #[arg(short, long, value_delimiter = ',')]
    active: Vec<String>,

    /// Optional JSON config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured API origin.
    #[arg(long)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the drawer contents as JSON.
    Show,
    /// Delete the conversation.
    Delete {
        /// Skip the confirmation step.
        #[arg(long)]
        yes: bool,
    },
}

/// Host that reports signals on the terminal.
struct TerminalHost;

impl PanelHost for TerminalHost {
    fn close(&self) {
        info!("Panel closed");
    }

    fn navigate(&self, path: &str) {
        info!("Navigating to {path}");
    }

    fn refresh_listing(&self) {
        info!("Conversation listing refresh requested");
    }

    fn notify_error(&self, message: &str) {
        error!("{message}");
    }
}

fn load_config(cli: &Cli) -> Result<DrawerConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            serde_json::from_str(&raw).context("Invalid config file")?
        }
        None => DrawerConfig::default(),
    };
    if let Some(api_base) = &cli.api_base {
        config.api_base_url = api_base.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "{} [{:<5}] [{}] - {}",
                Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let raw = std::fs::read_to_string(&cli.conversation)
        .with_context(|| format!("Failed to read {}", cli.conversation.display()))?;
    let conversation: Conversation =
        serde_json::from_str(&raw).context("Invalid conversation snapshot")?;

    let counterpart = match &cli.me {
        Some(me) if !conversation.is_group => {
            let found = other_user(&conversation, me).cloned();
            if found.is_none() {
                warn!("No participant other than {me} in conversation {}", conversation.id);
            }
            found
        }
        _ => None,
    };

    let presence = PresenceFeed::new();
    presence.set(cli.active.iter().map(String::as_str));

    let panel = ProfilePanel::builder()
        .with_conversation(conversation)
        .with_counterpart(counterpart)
        .with_presence(presence)
        .with_http_client(UreqHttpClient::new())
        .with_host(Arc::new(TerminalHost))
        .with_config(config)
        .open(true)
        .build()?;

    match cli.command {
        Command::Show => {
            println!("{}", serde_json::to_string_pretty(&panel.view())?);
            Ok(())
        }
        Command::Delete { yes } => {
            if !yes {
                anyhow::bail!("Refusing to delete without --yes");
            }
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to build tokio runtime")?;

            panel.open_confirmation()?;
            match rt.block_on(panel.confirm_delete()) {
                DeleteOutcome::Deleted => Ok(()),
                DeleteOutcome::Failed(e) => Err(e.into()),
                DeleteOutcome::Ignored(e) => Err(e.into()),
            }
        }
    }
}

//! CLI command implementations.

mod folder;
mod item;
mod nav;
mod render;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use isle_config::{CliSettings, Config};
use isle_content::{ContentIslandClient, ContentRepository, Language};
use isle_renderer::MarkdownRenderer;

use crate::error::CliError;

pub(crate) use folder::FolderArgs;
pub(crate) use item::ItemArgs;
pub(crate) use nav::NavArgs;
pub(crate) use render::RenderArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct GlobalArgs {
    /// Path to configuration file (default: auto-discover isle.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Content Island access token (overrides config).
    #[arg(long, global = true)]
    token: Option<String>,

    /// Content language (overrides config).
    #[arg(short, long, global = true)]
    language: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
}

impl GlobalArgs {
    /// Load configuration with command-line overrides applied.
    fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            access_token: self.token.clone(),
            language: self.language.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Build a repository talking to the configured Content Island project.
fn content_repository(config: &Config) -> Result<ContentRepository, CliError> {
    let token = config.require_access_token()?;
    let language: Language = config.content.language.parse()?;
    let client = ContentIslandClient::with_base_url(
        &config.content.base_url(),
        token,
        Duration::from_secs(config.content.timeout_secs),
    );
    Ok(ContentRepository::new(Arc::new(client)).with_language(language))
}

/// Build a markdown renderer from the `[markdown]` section.
fn markdown_renderer(config: &Config) -> MarkdownRenderer {
    MarkdownRenderer::new()
        .with_breaks(config.markdown.breaks)
        .with_gfm(config.markdown.gfm)
}

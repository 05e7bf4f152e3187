//! `isle render` command implementation.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use super::{GlobalArgs, markdown_renderer};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the markdown file.
    markdown_file: PathBuf,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// Does not contact the content service, so no access token is needed.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the file can't be read.
    pub(crate) fn execute(self, global: &GlobalArgs, output: &Output) -> Result<(), CliError> {
        let config = global.load_config()?;
        let markdown = std::fs::read_to_string(&self.markdown_file)?;
        info!(file = %self.markdown_file.display(), "Rendering markdown");

        output.print(&markdown_renderer(&config).render(&markdown));
        Ok(())
    }
}

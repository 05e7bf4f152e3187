//! `isle folder` command implementation.

use clap::Args;

use super::{GlobalArgs, content_repository};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the folder command.
#[derive(Args)]
pub(crate) struct FolderArgs {
    /// Folder slug.
    slug: String,

    /// Print the folder as JSON.
    #[arg(long)]
    json: bool,
}

impl FolderArgs {
    /// Execute the folder command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the folder is not found.
    pub(crate) fn execute(self, global: &GlobalArgs, output: &Output) -> Result<(), CliError> {
        let config = global.load_config()?;
        let repository = content_repository(&config)?;

        let folder = repository
            .folder_by_slug(&self.slug)
            .ok_or_else(|| CliError::NotFound(format!("folder '{}' not found", self.slug)))?;

        if self.json {
            output.print(&serde_json::to_string_pretty(&folder)?);
            return Ok(());
        }

        output.heading(&folder.title);
        output.detail(&format!("id: {}", folder.id));
        output.detail(&format!("slug: {}", folder.slug));
        match folder.items.as_deref() {
            Some(ids) if !ids.is_empty() => {
                output.print(&format!("items ({}):", ids.len()));
                for id in ids {
                    output.print(&format!("  - {id}"));
                }
            }
            _ => output.print("items: none"),
        }
        Ok(())
    }
}

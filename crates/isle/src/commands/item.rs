//! `isle item` command implementation.

use clap::Args;

use super::{GlobalArgs, content_repository, markdown_renderer};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the item command.
#[derive(Args)]
pub(crate) struct ItemArgs {
    /// Item slug.
    slug: String,

    /// Print the content rendered to HTML instead of the item summary.
    #[arg(long)]
    html: bool,
}

impl ItemArgs {
    /// Execute the item command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the item is not found.
    pub(crate) fn execute(self, global: &GlobalArgs, output: &Output) -> Result<(), CliError> {
        let config = global.load_config()?;
        let repository = content_repository(&config)?;

        let item = repository
            .item_by_slug(&self.slug)
            .ok_or_else(|| CliError::NotFound(format!("item '{}' not found", self.slug)))?;

        if self.html {
            match item.content.as_deref() {
                Some(markdown) => output.print(&markdown_renderer(&config).render(markdown)),
                None => output.warning(&format!("Item '{}' has no content", item.slug)),
            }
            return Ok(());
        }

        output.heading(&item.title);
        output.detail(&format!("id: {}", item.id));
        output.detail(&format!("slug: {}", item.slug));
        if let Some(description) = &item.description {
            output.detail(description);
        }
        if let Some(content) = &item.content {
            output.print("");
            output.print(content);
        }
        Ok(())
    }
}

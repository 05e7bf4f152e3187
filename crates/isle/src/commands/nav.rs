//! `isle nav` command implementation.

use clap::Args;
use isle_content::{Navigation, NavigationOrder};

use super::{GlobalArgs, content_repository};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Print the tree as JSON.
    #[arg(long)]
    json: bool,

    /// Order folders and items as the root and folders list them, instead of
    /// the order the service returns.
    #[arg(long)]
    reference_order: bool,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or JSON encoding fails.
    pub(crate) fn execute(self, global: &GlobalArgs, output: &Output) -> Result<(), CliError> {
        let config = global.load_config()?;
        let order = if self.reference_order {
            NavigationOrder::Reference
        } else {
            NavigationOrder::Service
        };
        let repository = content_repository(&config)?.with_navigation_order(order);

        let navigation = repository.navigation();

        if self.json {
            output.print(&serde_json::to_string_pretty(&navigation)?);
            return Ok(());
        }

        if navigation.is_empty() {
            output.warning("Navigation is empty");
            return Ok(());
        }
        print_tree(output, &navigation);
        Ok(())
    }
}

fn print_tree(output: &Output, navigation: &Navigation) {
    for folder in &navigation.folders {
        output.heading(&format!("{} ({})", folder.title, folder.slug));
        for item in &folder.items {
            output.print(&item_line(&item.title, &item.slug));
        }
    }
}

fn item_line(title: &str, slug: &str) -> String {
    format!("  - {title} ({slug})")
}

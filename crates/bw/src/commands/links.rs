//! `bw links` command implementation.

use clap::Args;

use super::BookArgs;
use crate::error::CliError;

/// Arguments for the links command.
#[derive(Args)]
pub(crate) struct LinksArgs {
    #[command(flatten)]
    pub book: BookArgs,

    /// Product whose tree to print.
    product: String,
}

impl LinksArgs {
    #[allow(clippy::print_stdout)]
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let (config, generator) = self.book.load()?;
        let product = config
            .product(&self.product)
            .ok_or_else(|| CliError::Validation(format!("unknown product: {}", self.product)))?;

        let entries = generator.links(product)?;

        println!("{}", serde_json::to_string_pretty(&entries)?);
        Ok(())
    }
}

//! `bw subnav` command implementation.

use clap::Args;

use super::{BookArgs, select_products};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the subnav command.
#[derive(Args)]
pub(crate) struct SubnavArgs {
    #[command(flatten)]
    pub book: BookArgs,

    /// Only generate the subnav of this product.
    #[arg(short, long)]
    product: Option<String>,
}

impl SubnavArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, generator) = self.book.load()?;

        output.book(
            generator.locations().context_dir(),
            config.check_all_links,
        );

        let products = select_products(&config, self.product.as_deref())?;
        for product in &products {
            let entries = generator.generate(product)?;
            output.product(&product.id, entries.len());
        }

        output.done(products.len());
        Ok(())
    }
}

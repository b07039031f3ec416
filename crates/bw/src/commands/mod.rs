//! CLI command implementations.

pub(crate) mod links;
pub(crate) mod subnav;

use std::path::PathBuf;
use std::sync::Arc;

use bw_config::{BookConfig, CliSettings, ProductConfig};
use bw_storage::{FsStorage, Storage};
use bw_subnav::SubnavGenerator;
use clap::Args;

use crate::error::CliError;

pub(crate) use links::LinksArgs;
pub(crate) use subnav::SubnavArgs;

/// Book selection and link-checking options shared by all commands.
#[derive(Args)]
pub(crate) struct BookArgs {
    /// Path to configuration file (default: auto-discover config.yml).
    #[arg(short, long, env = "BW_CONFIG")]
    config: Option<PathBuf>,

    /// Book context directory (overrides config).
    #[arg(long)]
    context_dir: Option<PathBuf>,

    /// Fail on broken or duplicate subnav links (overrides config).
    #[arg(long)]
    strict: bool,

    /// Only warn about broken or duplicate subnav links (overrides config).
    #[arg(long, conflicts_with = "strict")]
    lenient: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BookArgs {
    fn check_all_links(&self) -> Option<bool> {
        if self.strict {
            Some(true)
        } else if self.lenient {
            Some(false)
        } else {
            None
        }
    }

    /// Load the book config and a generator writing to the local filesystem.
    pub(crate) fn load(&self) -> Result<(BookConfig, SubnavGenerator), CliError> {
        let cli_settings = CliSettings {
            check_all_links: self.check_all_links(),
            context_dir: self.context_dir.clone(),
        };
        let config = BookConfig::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            config = ?config.config_path,
            products = config.products.len(),
            "Loaded book config"
        );

        let storage: Arc<dyn Storage> = Arc::new(FsStorage::new());
        let generator =
            SubnavGenerator::new(storage, config.output_locations(), config.check_all_links);
        Ok((config, generator))
    }
}

/// Products to process: the named one, or all of them.
pub(crate) fn select_products<'a>(
    config: &'a BookConfig,
    product: Option<&str>,
) -> Result<Vec<&'a ProductConfig>, CliError> {
    match product {
        Some(id) => config
            .product(id)
            .map(|p| vec![p])
            .ok_or_else(|| CliError::Validation(format!("unknown product: {id}"))),
        None => Ok(config.products.iter().collect()),
    }
}

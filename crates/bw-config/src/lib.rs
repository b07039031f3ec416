//! Book configuration for Bookwatch.
//!
//! Parses `config.yml` book configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//! - a leading `~` in `context_dir` expands to `$HOME`
//!
//! Expanded fields:
//! - `context_dir`
//! - `products[].subnav_root`
//! - `products[].pdf_config`
//! - `products[].toc_directory`

mod expand;
mod locations;
mod product;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use locations::OutputLocations;
pub use product::ProductConfig;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "config.yml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override strict link checking.
    pub check_all_links: Option<bool>,
    /// Override the book's context directory.
    pub context_dir: Option<PathBuf>,
}

/// Book configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Products, one subnav each.
    pub products: Vec<ProductConfig>,
    /// Fail the build on broken or duplicate subnav links.
    pub check_all_links: bool,
    /// Context directory as written in the file (relative to the config file).
    context_dir: Option<String>,

    /// Resolved context directory (set after loading).
    #[serde(skip)]
    pub context_dir_resolved: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`context_dir`").
        field: String,
        /// Error message (e.g., "${`BOOK_DIR`} not set").
        message: String,
    },
}

impl BookConfig {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `config.yml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, no config can be
    /// discovered, or parsing and validation fail.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => path.to_path_buf(),
            None => Self::discover_config()
                .ok_or_else(|| ConfigError::NotFound(PathBuf::from(CONFIG_FILENAME)))?,
        };

        let mut config = Self::load_from_file(&path)?;
        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse configuration from YAML text, resolving paths against `base`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_yaml(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = if content.trim().is_empty() {
            Self::default_with_base(base)
        } else {
            serde_yaml::from_str(content)?
        };

        config.expand_env_vars()?;
        config.resolve_paths(base);
        config.validate()?;

        Ok(config)
    }

    /// Output locations of this book.
    #[must_use]
    pub fn output_locations(&self) -> OutputLocations {
        OutputLocations::new(&self.context_dir_resolved)
    }

    /// Find a product by id.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<&ProductConfig> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a product has no id or two
    /// products share one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (index, product) in self.products.iter().enumerate() {
            if !product.is_valid() {
                return Err(ConfigError::Validation(format!(
                    "products[{index}].id cannot be empty"
                )));
            }
            if !seen.insert(product.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate product id: {}",
                    product.id
                )));
            }
        }
        Ok(())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(check_all_links) = settings.check_all_links {
            self.check_all_links = check_all_links;
        }
        if let Some(context_dir) = &settings.context_dir {
            self.context_dir_resolved.clone_from(context_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            products: Vec::new(),
            check_all_links: false,
            context_dir: None,
            context_dir_resolved: base.to_path_buf(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_yaml(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref context_dir) = self.context_dir {
            self.context_dir = Some(expand::expand_context_dir(context_dir, "context_dir")?);
        }

        for (index, product) in self.products.iter_mut().enumerate() {
            let expand_field = |value: &mut Option<String>, name: &str| {
                if let Some(raw) = value.as_deref() {
                    *value = Some(expand::expand_env(
                        raw,
                        &format!("products[{index}].{name}"),
                    )?);
                }
                Ok::<(), ConfigError>(())
            };
            expand_field(&mut product.subnav_root, "subnav_root")?;
            expand_field(&mut product.pdf_config, "pdf_config")?;
            expand_field(&mut product.toc_directory, "toc_directory")?;
        }

        Ok(())
    }

    /// Resolve the context directory against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.context_dir_resolved = match self.context_dir.as_deref() {
            Some(dir) => config_dir.join(dir),
            None => config_dir.to_path_buf(),
        };
    }
}

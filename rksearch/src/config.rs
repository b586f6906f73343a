use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use crate::errors::SearchResult;
use crate::results::{Locale, OutputFormat};
use crate::search::matcher::{HashParams, DEFAULT_HASH_BASE, DEFAULT_MODULUS};

/// Configuration for a search run.
///
/// # Configuration Locations
///
/// The configuration is layered from these locations, later ones winning:
/// 1. Global `$CONFIG_DIR/rksearch/config.yaml`
/// 2. Local `.rksearch.yaml` in the current directory
/// 3. Custom config file given with `--config` (must exist)
///
/// # Configuration Format
///
/// ```yaml
/// # Rolling hash parameters
/// hash_base: 256
/// modulus: 101
///
/// # Context radius; when set the CLI does not prompt for it
/// radius: 4
///
/// # Report language (en, ru) and format (text, json, yaml)
/// locale: "en"
/// format: "text"
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
///
/// Command-line arguments take precedence over file values, see
/// [`SearchConfig::merge_with_cli`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base of the rolling hash polynomial
    #[serde(default = "default_hash_base")]
    pub hash_base: NonZeroU32,

    /// Modulus of the rolling hash
    #[serde(default = "default_modulus")]
    pub modulus: NonZeroU32,

    /// Context radius, if fixed by configuration
    #[serde(default)]
    pub radius: Option<usize>,

    /// Language of the text report
    #[serde(default)]
    pub locale: Locale,

    /// Encoding of the written report
    #[serde(default)]
    pub format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_hash_base() -> NonZeroU32 {
    NonZeroU32::new(DEFAULT_HASH_BASE).unwrap_or(NonZeroU32::MIN)
}

fn default_modulus() -> NonZeroU32 {
    NonZeroU32::new(DEFAULT_MODULUS).unwrap_or(NonZeroU32::MIN)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            hash_base: default_hash_base(),
            modulus: default_modulus(),
            radius: None,
            locale: Locale::default(),
            format: OutputFormat::default(),
            log_level: default_log_level(),
        }
    }
}

/// Values supplied on the command line; `None` leaves the file value alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub hash_base: Option<NonZeroU32>,
    pub modulus: Option<NonZeroU32>,
    pub radius: Option<usize>,
    pub locale: Option<Locale>,
    pub format: Option<OutputFormat>,
    pub log_level: Option<String>,
}

impl SearchConfig {
    /// Loads configuration from the default locations
    pub fn load() -> SearchResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from the default locations plus an optional custom file
    pub fn load_from(config_path: Option<&Path>) -> SearchResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let default_files = [
            dirs::config_dir().map(|p| p.join("rksearch/config.yaml")),
            Some(PathBuf::from(".rksearch.yaml")),
        ];

        for path in default_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if let Some(base) = cli.hash_base {
            self.hash_base = base;
        }
        if let Some(modulus) = cli.modulus {
            self.modulus = modulus;
        }
        if cli.radius.is_some() {
            self.radius = cli.radius;
        }
        if let Some(locale) = cli.locale {
            self.locale = locale;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        self
    }

    /// The rolling hash parameters described by this configuration
    pub fn hash_params(&self) -> HashParams {
        HashParams {
            base: self.hash_base,
            modulus: self.modulus,
        }
    }
}

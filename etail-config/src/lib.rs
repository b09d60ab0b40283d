//! Settings for the etail viewer: pane sizing, reload behavior and logging.
//!
//! Lookup order, lowest priority first:
//! 1. `defaults/etail.default.toml`, compiled in
//! 2. `<config dir>/etail.toml`
//! 3. the file named by `--config`
//! 4. command-line flags
//!
//! [`Loader`] applies them in that order and yields a validated [`EtailConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, FileSourceFile, ValueKind};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/etail.default.toml");
const APP_DIR: &str = "etail";

/// Top-level configuration consumed by the viewer.
#[derive(Debug, Clone, Deserialize)]
pub struct EtailConfig {
    pub layout: LayoutConfig,
    pub reload: ReloadConfig,
    pub logging: LoggingConfig,
}

/// Pane and column sizing.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    pub min_pane_height: usize,
    pub column_width_divisor: usize,
    pub separator: char,
    pub show_filenames: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReloadConfig {
    pub on_redraw: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: bool,
}

impl EtailConfig {
    /// Reject values the layout engine cannot work with.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.layout.min_pane_height == 0 {
            return Err(ConfigError::Message(
                "layout.min_pane_height must be at least 1".to_string(),
            ));
        }
        if self.layout.column_width_divisor == 0 {
            return Err(ConfigError::Message(
                "layout.column_width_divisor must be at least 1".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Builds an [`EtailConfig`] from sources applied in call order, later
/// sources winning over earlier ones.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

/// A TOML file source; `required` decides whether a missing file is an error
fn toml_file(path: &Path, required: bool) -> File<FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml).required(required)
}

impl Loader {
    /// Loader holding only the built-in `etail.default.toml`
    pub fn new() -> Self {
        Loader {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Add a file given explicitly by the user (`--config`); it must exist
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self.builder.add_source(toml_file(path.as_ref(), true));
        self
    }

    /// Add a file that may or may not be present
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self.builder.add_source(toml_file(path.as_ref(), false));
        self
    }

    /// Force one dotted key, e.g. `layout.show_filenames` for `--names`
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge every source, then check the result with [`EtailConfig::validate`]
    pub fn build(self) -> Result<EtailConfig, ConfigError> {
        let merged = self.builder.build()?;
        merged.try_deserialize::<EtailConfig>()?.validate()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Loader::new()
    }
}

/// The built-in settings with nothing layered on top
pub fn load_defaults() -> Result<EtailConfig, ConfigError> {
    Loader::new().build()
}

/// Base config directory for etail
///
/// `$XDG_CONFIG_HOME/etail` when set, otherwise `~/.config/etail`.
pub fn config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .map(|config| config.join(APP_DIR))
}

/// `<config dir>/etail.toml`
pub fn user_config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("etail.toml"))
}

/// `<config dir>/logs`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

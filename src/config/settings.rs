//! TOML-based configuration for transql.
//!
//! Supports a config file (transql.toml) with render options and custom
//! dialects layered over the built-in ones.
//!
//! Example configuration:
//! ```toml
//! [render]
//! unsupported_level = "warn"  # ignore | warn | raise
//! identify = false
//!
//! [dialects.strict_sqlite]
//! base = "sqlite"
//!
//! [dialects.strict_sqlite.types]
//! boolean = "BOOLEAN"
//!
//! [dialects.strict_sqlite.tokens]
//! auto_increment = "AUTO_INCREMENT"
//!
//! [dialects.strict_sqlite.functions]
//! EDIT_DISTANCE = "levenshtein"
//!
//! [dialects.strict_sqlite.transforms]
//! levenshtein = { rename = "EDIT_DISTANCE" }
//! ilike = "unsupported"
//! date_str_to_date = "inner"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::sql::dialect::{
    constructor_for, Dialect, DialectBuilder, DialectDescriptor, DialectError, DialectRegistry,
    Transform,
};
use crate::sql::expr::NodeKind;
use crate::sql::render::{RenderOptions, UnsupportedLevel};
use crate::sql::token::Keyword;
use crate::sql::types::TypeKind;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid dialect '{name}': {source}")]
    InvalidDialect {
        name: String,
        #[source]
        source: DialectError,
    },
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Default render options.
    pub render: RenderSettings,

    /// Custom dialects by name.
    pub dialects: BTreeMap<String, DialectSettings>,
}

/// Render options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    /// What to do with unsupported-feature diagnostics.
    pub unsupported_level: UnsupportedLevel,

    /// Quote every identifier.
    pub identify: bool,
}

impl From<RenderSettings> for RenderOptions {
    fn from(settings: RenderSettings) -> Self {
        RenderOptions {
            unsupported_level: settings.unsupported_level,
            identify: settings.identify,
        }
    }
}

/// A custom dialect: overrides layered over `base`.
///
/// Table keys are names as accepted by `TypeKind`, `Keyword` and `NodeKind`
/// (`boolean`, `auto_increment`, `json_extract`, ...). Unknown names fail
/// when the registry is built.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DialectSettings {
    /// Parent dialect: a built-in or another configured dialect.
    pub base: String,

    /// Type kind to type keyword.
    pub types: BTreeMap<String, String>,

    /// Keyword to output spelling.
    pub tokens: BTreeMap<String, String>,

    /// Surface function name to canonical node kind.
    pub functions: BTreeMap<String, String>,

    /// Node kind to render transform.
    pub transforms: BTreeMap<String, TransformSetting>,
}

impl Default for DialectSettings {
    fn default() -> Self {
        Self {
            base: Dialect::Generic.name().to_string(),
            types: BTreeMap::new(),
            tokens: BTreeMap::new(),
            functions: BTreeMap::new(),
            transforms: BTreeMap::new(),
        }
    }
}

/// A transform entry: `"unsupported"`, `"inner"`, `"default"` (drop an
/// inherited transform) or `{ rename = "NAME" }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TransformSetting {
    Named(String),
    Rename { rename: String },
}

impl DialectSettings {
    /// Build the descriptor named `name` over `parent`.
    pub fn build(
        &self,
        name: &str,
        parent: &DialectDescriptor,
    ) -> Result<DialectDescriptor, DialectError> {
        let mut builder = DialectBuilder::extend(name.to_string(), parent);

        for (kind, spelling) in &self.types {
            let kind: TypeKind = kind.parse().map_err(DialectError::UnknownType)?;
            builder = builder.type_keyword(kind, spelling.clone());
        }

        for (keyword, spelling) in &self.tokens {
            let keyword: Keyword = keyword.parse().map_err(DialectError::UnknownKeyword)?;
            builder = builder.token(keyword, spelling.clone());
        }

        for (function, target) in &self.functions {
            let kind: NodeKind = target.parse().map_err(DialectError::UnknownNodeKind)?;
            let build = constructor_for(kind).ok_or(DialectError::NotConstructible(kind))?;
            builder = builder.function(function, build);
        }

        for (kind, setting) in &self.transforms {
            let kind: NodeKind = kind.parse().map_err(DialectError::UnknownNodeKind)?;
            builder = match setting {
                TransformSetting::Rename { rename } => {
                    builder.transform(kind, Transform::Rename(rename.clone().into()))
                }
                TransformSetting::Named(named) => match named.to_ascii_lowercase().as_str() {
                    "unsupported" => builder.transform(kind, Transform::Unsupported),
                    "inner" => builder.transform(kind, Transform::Inner),
                    "default" => builder.clear_transform(kind),
                    _ => return Err(DialectError::UnknownTransform(named.clone())),
                },
            };
        }

        builder.build()
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        tracing::debug!(path = %path.display(), "loading settings");
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `TRANSQL_CONFIG`
    /// 2. `./transql.toml`
    /// 3. `~/.config/transql/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("TRANSQL_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("transql.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("transql").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Render options from the `[render]` table.
    pub fn render_options(&self) -> RenderOptions {
        self.render.into()
    }

    /// Build every configured dialect, parents first.
    pub fn registry(&self) -> Result<DialectRegistry, SettingsError> {
        let mut registry = DialectRegistry::new();
        let mut visiting = Vec::new();
        for name in self.dialects.keys() {
            self.register_dialect(name, &mut registry, &mut visiting)?;
        }
        Ok(registry)
    }

    fn register_dialect(
        &self,
        name: &str,
        registry: &mut DialectRegistry,
        visiting: &mut Vec<String>,
    ) -> Result<Arc<DialectDescriptor>, SettingsError> {
        let invalid = |source: DialectError| SettingsError::InvalidDialect {
            name: name.to_string(),
            source,
        };

        let Some(settings) = self.dialects.get(name) else {
            // Not configured here: must be a built-in.
            return registry.resolve(name).map_err(invalid);
        };
        if name.parse::<Dialect>().is_ok() {
            return Err(invalid(DialectError::DuplicateName(name.to_string())));
        }
        if let Some(existing) = registry.get(name) {
            return Ok(existing);
        }
        if visiting.iter().any(|v| v == name) {
            return Err(invalid(DialectError::InheritanceCycle(name.to_string())));
        }

        visiting.push(name.to_string());
        let parent = self.register_dialect(&settings.base, registry, visiting)?;
        visiting.pop();

        let descriptor = settings.build(name, &parent).map_err(invalid)?;
        registry.register(descriptor).map_err(invalid)
    }
}

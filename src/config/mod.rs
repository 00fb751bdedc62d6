//! Configuration module for transql.
//!
//! Handles render settings and custom dialect definitions.

mod settings;

pub use settings::{DialectSettings, RenderSettings, Settings, SettingsError, TransformSetting};

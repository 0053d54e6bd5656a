// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Widget configuration supplied by the host page.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::deps::{default_dependencies, HeadDependency};

/// Error type for config decoding.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON or wrong field types.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Verbosity of the widget's own log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Lifecycle messages.
    #[default]
    Info,
    /// Skipped wiring, ignored values.
    Debug,
    /// Everything.
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

/// Host-facing knobs. Every field is optional in the serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Header title.
    pub title: String,
    /// Footer text after the year.
    pub credit: String,
    /// Head dependencies, injected in order.
    pub dependencies: Vec<HeadDependency>,
    /// Log verbosity.
    pub log_level: LogLevel,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            title: "Settings Dialog".to_owned(),
            credit: "All rights reserved.".to_owned(),
            dependencies: default_dependencies(),
            log_level: LogLevel::default(),
        }
    }
}

impl WidgetConfig {
    /// Decode from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        assert_eq!(WidgetConfig::from_json("{}").unwrap(), WidgetConfig::default());
    }

    #[test]
    fn partial_config_overrides_named_fields() {
        let cfg = WidgetConfig::from_json(
            r#"{
                "title": "Docs",
                "logLevel": "debug",
                "dependencies": [
                    { "kind": "stylesheet", "href": "https://x.test/a.css", "marker": "a.css" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.title, "Docs");
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.credit, WidgetConfig::default().credit);
        assert_eq!(cfg.dependencies.len(), 1);
        assert_eq!(tracing::Level::from(cfg.log_level), tracing::Level::DEBUG);
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(matches!(
            WidgetConfig::from_json(r#"{ "title": 7 }"#),
            Err(ConfigError::Serde(_))
        ));
    }
}

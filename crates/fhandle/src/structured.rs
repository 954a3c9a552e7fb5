//! Format-aware parsing and rendering of structured file content

use std::path::Path;

use serde::{Serialize, de::DeserializeOwned};

use crate::path::normalize_ext;
use crate::{Error, Result};

/// Structured text format, picked from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
    Yaml,
}

impl Format {
    /// Detect the format from an extension (with or without its dot).
    ///
    /// - `toml` -> TOML
    /// - `yaml`, `yml` -> YAML
    /// - anything else -> JSON
    pub fn from_ext(ext: &str) -> Self {
        match normalize_ext(ext).to_lowercase().as_str() {
            "toml" => Self::Toml,
            "yaml" | "yml" => Self::Yaml,
            _ => Self::Json,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Toml => "TOML",
            Self::Yaml => "YAML",
        }
    }

    /// Parse `content`; `path` only labels the error.
    pub fn parse<T: DeserializeOwned>(&self, content: &str, path: &Path) -> Result<T> {
        let parsed = match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| Error::Parse {
            path: path.to_path_buf(),
            format: self.name().into(),
            message,
        })
    }

    /// Render `value`; `path` only labels the error.
    pub fn render<T: Serialize>(&self, value: &T, path: &Path) -> Result<String> {
        let rendered = match self {
            Self::Json => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
            Self::Toml => toml::to_string_pretty(value).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        };
        rendered.map_err(|message| Error::Serialize {
            path: path.to_path_buf(),
            format: self.name().into(),
            message,
        })
    }
}

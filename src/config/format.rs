//! Source formats and byte decoding.

use super::ConfigError;
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Text formats a prompt configuration may be written in.
///
/// All formats share one document shape; TOML is the canonical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    #[default]
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick a format from the file extension. Unknown or missing extensions
    /// fall back to TOML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }

    /// Parse text into a generic document tree.
    pub fn parse(&self, content: &str) -> Result<Value, ConfigError> {
        let parsed = match self {
            ConfigFormat::Toml => toml::from_str::<Value>(content).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str::<Value>(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| ConfigError::Syntax {
            format: *self,
            message,
        })
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Json => "JSON",
        };
        f.write_str(name)
    }
}

/// Decode raw file bytes, honoring a UTF-8 or UTF-16LE byte order mark.
pub(crate) fn decode_source(bytes: Vec<u8>, path: &str) -> Result<String, ConfigError> {
    if bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] == 0xFE {
        if (bytes.len() - 2) % 2 != 0 {
            return Err(ConfigError::LoadError {
                path: path.to_string(),
                reason: "Invalid UTF-16: odd number of bytes after the byte order mark"
                    .to_string(),
                hint: Some(
                    "The file looks truncated; save it again as UTF-16LE or UTF-8.".to_string(),
                ),
            });
        }
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&utf16).map_err(|e| ConfigError::LoadError {
            path: path.to_string(),
            reason: format!("Invalid UTF-16: {}", e),
            hint: None,
        })
    } else if bytes.len() >= 3 && bytes[0] == 0xEF && bytes[1] == 0xBB && bytes[2] == 0xBF {
        String::from_utf8(bytes[3..].to_vec()).map_err(|e| ConfigError::LoadError {
            path: path.to_string(),
            reason: format!("Invalid UTF-8 (after BOM): {}", e),
            hint: None,
        })
    } else {
        String::from_utf8(bytes).map_err(|e| ConfigError::LoadError {
            path: path.to_string(),
            reason: format!("Invalid UTF-8: {}", e),
            hint: Some("Save the file as UTF-8.".to_string()),
        })
    }
}

//! Engine configuration that downstream crates can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Field delimiter for delimited text sources (single byte).
    pub delimiter: u8,

    /// Skip the first record of a source instead of treating it as data.
    pub has_headers: bool,

    /// Trim surrounding whitespace from every field.
    pub trim: bool,

    /// Tag loaded cells with an inferred type instead of leaving them untyped.
    pub infer_types: bool,

    /// Capacity of the buffered reader used when loading a source.
    pub read_buffer_bytes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: false,
            trim: false,
            infer_types: false,
            read_buffer_bytes: 64 * 1024, // 64 KiB default
        }
    }
}

impl EngineConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `ROWPIPE_DELIMITER`: single-character field delimiter (`\t` accepted)
    /// - `ROWPIPE_HAS_HEADERS`: skip the first record
    /// - `ROWPIPE_TRIM`: trim whitespace around fields
    /// - `ROWPIPE_INFER_TYPES`: infer cell types on load
    /// - `ROWPIPE_READ_BUFFER_BYTES`: reader buffer capacity
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("ROWPIPE_DELIMITER") {
            if let Ok(v) = parse_delimiter(&s) {
                cfg.delimiter = v;
            }
        }

        if let Ok(s) = std::env::var("ROWPIPE_HAS_HEADERS") {
            if let Some(v) = parse_flag(&s) {
                cfg.has_headers = v;
            }
        }

        if let Ok(s) = std::env::var("ROWPIPE_TRIM") {
            if let Some(v) = parse_flag(&s) {
                cfg.trim = v;
            }
        }

        if let Ok(s) = std::env::var("ROWPIPE_INFER_TYPES") {
            if let Some(v) = parse_flag(&s) {
                cfg.infer_types = v;
            }
        }

        if let Ok(s) = std::env::var("ROWPIPE_READ_BUFFER_BYTES") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.read_buffer_bytes = v;
            }
        }

        cfg
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: EngineConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.read_buffer_bytes == 0 {
            return Err(Error::Config("read_buffer_bytes must be > 0".into()));
        }
        if self.delimiter == b'"' || self.delimiter == b'\n' || self.delimiter == b'\r' {
            return Err(Error::Config(format!(
                "delimiter {:?} is reserved",
                self.delimiter as char
            )));
        }
        Ok(())
    }
}

/// Parse a delimiter given as a single ASCII character or the escape `\t`.
pub fn parse_delimiter(s: &str) -> Result<u8> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ => {
            let bytes = s.as_bytes();
            if bytes.len() == 1 && bytes[0].is_ascii() {
                Ok(bytes[0])
            } else {
                Err(Error::Config(format!(
                    "delimiter must be one ASCII character, got '{}'",
                    s
                )))
            }
        }
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

//! Conversion limits
//!
//! This module loads the limits that bound template length, decimal precision and the per-statement
//! arena budget. Defaults are embedded as TOML and parsed once; callers may supply their own document.

use std::fmt;
use std::sync::OnceLock;

/// Error type for configuration loading
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The document is not valid TOML
    ParseError(String),
    /// A key holds a value of the wrong type or out of range
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Error parsing limits: {}", msg),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid limit value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

type Result<T> = std::result::Result<T, ConfigError>;

/// Limits applied to every conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Templates of this length or longer are rejected
    pub max_template_len: usize,
    /// Maximum significant digits of a converted number
    pub max_precision: usize,
    /// Maximum fractional digits of a converted number
    pub max_scale: usize,
    /// Bytes one statement may allocate
    pub arena_capacity: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_template_len: 64,
            max_precision: 28,
            max_scale: 28,
            arena_capacity: 64 * 1024,
        }
    }
}

// Embedded defaults, parsed on first use
static EMBEDDED_LIMITS: OnceLock<Limits> = OnceLock::new();

impl Limits {
    /// The limits shipped with the crate
    pub fn embedded() -> &'static Limits {
        EMBEDDED_LIMITS.get_or_init(|| {
            let limits_toml = include_str!("config/limits.toml");
            Self::from_toml_str(limits_toml).unwrap_or_else(|e| {
                tracing::warn!("failed to load embedded limits, using defaults: {}", e);
                Limits::default()
            })
        })
    }

    /// Parse limits from a TOML document. Missing keys keep their default value.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let parsed_toml: toml::Value =
            toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        let table = parsed_toml
            .as_table()
            .ok_or_else(|| ConfigError::ParseError("Root is not a table".to_string()))?;

        let mut limits = Limits::default();

        if let Some(template) = table.get("template") {
            if let Some(max_len) = read_size(template, "template", "max_len")? {
                limits.max_template_len = max_len;
            }
        }

        if let Some(decimal) = table.get("decimal") {
            if let Some(precision) = read_size(decimal, "decimal", "max_precision")? {
                limits.max_precision = precision;
            }
            if let Some(scale) = read_size(decimal, "decimal", "max_scale")? {
                limits.max_scale = scale;
            }
        }

        if let Some(arena) = table.get("arena") {
            if let Some(capacity) = read_size(arena, "arena", "capacity")? {
                limits.arena_capacity = capacity;
            }
        }

        // rust_decimal cannot hold more than 28 fractional digits
        if limits.max_scale > 28 {
            return Err(ConfigError::InvalidValue(format!(
                "decimal.max_scale {} exceeds 28",
                limits.max_scale
            )));
        }

        Ok(limits)
    }
}

fn read_size(section: &toml::Value, section_name: &str, key: &str) -> Result<Option<usize>> {
    let table = section
        .as_table()
        .ok_or_else(|| ConfigError::ParseError(format!("{} is not a table", section_name)))?;

    match table.get(key) {
        None => Ok(None),
        Some(value) => {
            let raw = value.as_integer().ok_or_else(|| {
                ConfigError::InvalidValue(format!("{}.{} is not an integer", section_name, key))
            })?;
            usize::try_from(raw).map(Some).map_err(|_| {
                ConfigError::InvalidValue(format!("{}.{} must not be negative", section_name, key))
            })
        }
    }
}

//! Bootstrap settings, loaded from TOML
//!
//! ```toml
//! nationalized_character_data = false
//! freeze_after_bootstrap = true
//!
//! [logging]
//! profile = "development"
//!
//! [[sql_type_overrides]]
//! code = "BOOLEAN"
//! use = "BIT"
//!
//! [[aliases]]
//! key = "national_text"
//! domain = "String"
//! sql_type = "NVARCHAR"
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{RelmapError, Result};
use crate::logging_facility::Profile;
use crate::types::{SqlTypeCode, SqlTypeRegistry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypeSettings {
    /// Treat every character attribute as nationalized
    pub nationalized_character_data: bool,
    pub freeze_after_bootstrap: bool,
    pub logging: LoggingSettings,
    pub sql_type_overrides: Vec<SqlTypeOverride>,
    pub aliases: Vec<TypeAlias>,
}

impl Default for TypeSettings {
    fn default() -> Self {
        Self {
            nationalized_character_data: false,
            freeze_after_bootstrap: true,
            logging: LoggingSettings::default(),
            sql_type_overrides: Vec::new(),
            aliases: Vec::new(),
        }
    }
}

impl TypeSettings {
    /// # Errors
    ///
    /// `Serialization` if the document is not valid settings TOML.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// # Errors
    ///
    /// `Io` if the file cannot be read, `Serialization` if it does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    pub profile: Profile,
}

/// A SQL type written either as its numeric code or its name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SqlTypeRef {
    Code(i32),
    Name(String),
}

impl SqlTypeRef {
    /// # Errors
    ///
    /// `InvalidSettings` if a name matches no registered descriptor.
    pub fn resolve(&self, registry: &SqlTypeRegistry) -> Result<SqlTypeCode> {
        match self {
            SqlTypeRef::Code(code) => Ok(SqlTypeCode(*code)),
            SqlTypeRef::Name(name) => {
                registry
                    .code_for(name)
                    .map_err(|e| RelmapError::InvalidSettings {
                        reason: e.to_string(),
                    })
            }
        }
    }
}

impl fmt::Display for SqlTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlTypeRef::Code(code) => write!(f, "{}", code),
            SqlTypeRef::Name(name) => f.write_str(name),
        }
    }
}

/// Make `code` use the descriptor registered for `target`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqlTypeOverride {
    pub code: SqlTypeRef,
    #[serde(rename = "use")]
    pub target: SqlTypeRef,
}

/// Extra registration key for a `(domain, sql)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeAlias {
    pub key: String,
    pub domain: String,
    pub sql_type: SqlTypeRef,
}

use relmap_core_types::BootstrapId;
use thiserror::Error;

use crate::sql_ast::TableGroupSlot;

/// Result type alias using RelmapError
pub type Result<T> = std::result::Result<T, RelmapError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on
/// without depending on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Registry lookups
    UnknownTypeCode,
    UnknownTypeName,
    UnknownDomainType,
    UnknownRegistrationKey,
    RegistryFrozen,

    // Resolution
    UnsupportedTemporalPrecision,
    NotTemporal,
    InvalidVersionValue,

    // SQL AST construction
    DuplicateRegistration,
    UnsupportedJoin,
    UnresolvedTableReference,

    // Marshaling
    BindMismatch,
    ExtractMismatch,
    InvalidInput,

    // Configuration / IO
    InvalidSettings,
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::UnknownTypeCode => "ERR_UNKNOWN_TYPE_CODE",
            ExErrorKind::UnknownTypeName => "ERR_UNKNOWN_TYPE_NAME",
            ExErrorKind::UnknownDomainType => "ERR_UNKNOWN_DOMAIN_TYPE",
            ExErrorKind::UnknownRegistrationKey => "ERR_UNKNOWN_REGISTRATION_KEY",
            ExErrorKind::RegistryFrozen => "ERR_REGISTRY_FROZEN",
            ExErrorKind::UnsupportedTemporalPrecision => "ERR_UNSUPPORTED_TEMPORAL_PRECISION",
            ExErrorKind::NotTemporal => "ERR_NOT_TEMPORAL",
            ExErrorKind::InvalidVersionValue => "ERR_INVALID_VERSION_VALUE",
            ExErrorKind::DuplicateRegistration => "ERR_DUPLICATE_REGISTRATION",
            ExErrorKind::UnsupportedJoin => "ERR_UNSUPPORTED_JOIN",
            ExErrorKind::UnresolvedTableReference => "ERR_UNRESOLVED_TABLE_REFERENCE",
            ExErrorKind::BindMismatch => "ERR_BIND_MISMATCH",
            ExErrorKind::ExtractMismatch => "ERR_EXTRACT_MISMATCH",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidSettings => "ERR_INVALID_SETTINGS",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus the context needed to pin a failure on a
/// specific mapping: the SQL type code, registration key or navigable path
/// involved, and the bootstrap that was running.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    type_code: Option<i32>,
    registration_key: Option<String>,
    navigable_path: Option<String>,
    bootstrap_id: Option<BootstrapId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            type_code: None,
            registration_key: None,
            navigable_path: None,
            bootstrap_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add SQL type code context
    pub fn with_type_code(mut self, code: i32) -> Self {
        self.type_code = Some(code);
        self
    }

    /// Add registration key context
    pub fn with_registration_key(mut self, key: impl Into<String>) -> Self {
        self.registration_key = Some(key.into());
        self
    }

    /// Add navigable path context
    pub fn with_navigable_path(mut self, path: impl Into<String>) -> Self {
        self.navigable_path = Some(path.into());
        self
    }

    /// Add bootstrap correlation context
    pub fn with_bootstrap_id(mut self, bootstrap_id: BootstrapId) -> Self {
        self.bootstrap_id = Some(bootstrap_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn type_code(&self) -> Option<i32> {
        self.type_code
    }

    pub fn registration_key(&self) -> Option<&str> {
        self.registration_key.as_deref()
    }

    pub fn navigable_path(&self) -> Option<&str> {
        self.navigable_path.as_deref()
    }

    pub fn bootstrap_id(&self) -> Option<&BootstrapId> {
        self.bootstrap_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(code) = self.type_code {
            write!(f, " (type_code: {})", code)?;
        }
        if let Some(key) = &self.registration_key {
            write!(f, " (registration_key: {})", key)?;
        }
        if let Some(path) = &self.navigable_path {
            write!(f, " (navigable_path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for type resolution and table-group construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RelmapError {
    // ===== Registry Errors =====
    /// No SQL type descriptor registered for a type code
    #[error("No SQL type descriptor registered for type code {code}")]
    UnknownTypeCode { code: i32 },

    /// SQL type name does not match any registered descriptor
    #[error("Unknown SQL type name: {name}")]
    UnknownTypeName { name: String },

    /// Domain type name does not match any registered descriptor
    #[error("Unknown domain type: {name}")]
    UnknownDomainType { name: String },

    /// No basic type registered under a key
    #[error("No basic type registered under key `{key}`")]
    UnknownRegistrationKey { key: String },

    /// Registry no longer accepts new entries
    #[error("Registry `{registry}` is frozen; cannot register `{key}`")]
    RegistryFrozen { registry: &'static str, key: String },

    // ===== Resolution Errors =====
    /// Requested temporal precision is outside what the target supports
    #[error("{target} cannot be treated using `{precision}` precision")]
    UnsupportedTemporalPrecision { target: String, precision: String },

    /// Temporal precision requested for a non-temporal type
    #[error("Type `{type_name}` has no temporal precision")]
    NotTemporal { type_name: String },

    /// Version value cannot be seeded or incremented
    #[error("Invalid version value for type `{type_name}`: {reason}")]
    InvalidVersionValue { type_name: String, reason: String },

    // ===== SQL AST Errors =====
    /// Index or element table group registered twice on one plural group
    #[error("{slot} table group already registered on `{navigable_path}` (existing: `{existing_path}`)")]
    TableGroupAlreadyRegistered {
        slot: TableGroupSlot,
        navigable_path: String,
        existing_path: String,
    },

    /// Correlated table groups only accept inner joins
    #[error("Correlated table group `{navigable_path}` cannot accept a {join_type} join")]
    UnsupportedCorrelatedJoin {
        navigable_path: String,
        join_type: String,
    },

    /// No table group in scope exposes the requested table expression
    #[error("No table reference for `{table_expression}` under `{navigable_path}`")]
    UnresolvedTableReference {
        table_expression: String,
        navigable_path: String,
    },

    // ===== Marshaling Errors =====
    /// Domain value cannot be bound as the requested column representation
    #[error("Cannot bind {domain} value as {column}")]
    BindMismatch { domain: String, column: String },

    /// Column value cannot be extracted into the domain type
    #[error("Cannot extract {column} column value as {domain}")]
    ExtractMismatch { domain: String, column: String },

    /// String form of a value could not be parsed
    #[error("Cannot parse `{input}` as {domain}: {reason}")]
    ValueParse {
        domain: String,
        input: String,
        reason: String,
    },

    // ===== Configuration Errors =====
    /// Settings are well-formed but refer to unknown types or keys
    #[error("Invalid settings: {reason}")]
    InvalidSettings { reason: String },

    /// File system error while loading settings
    #[error("IO error: {message}")]
    Io { message: String },

    /// Settings or output could not be (de)serialized
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

/// Conversion from RelmapError to ExError
impl From<RelmapError> for ExError {
    fn from(err: RelmapError) -> Self {
        let message = err.to_string();
        match err {
            RelmapError::UnknownTypeCode { code } => ExError::new(ExErrorKind::UnknownTypeCode)
                .with_type_code(code)
                .with_message(message),

            RelmapError::UnknownTypeName { .. } => {
                ExError::new(ExErrorKind::UnknownTypeName).with_message(message)
            }

            RelmapError::UnknownDomainType { .. } => {
                ExError::new(ExErrorKind::UnknownDomainType).with_message(message)
            }

            RelmapError::UnknownRegistrationKey { key } => {
                ExError::new(ExErrorKind::UnknownRegistrationKey)
                    .with_registration_key(key)
                    .with_message(message)
            }

            RelmapError::RegistryFrozen { registry, key } => {
                ExError::new(ExErrorKind::RegistryFrozen)
                    .with_op(format!("register:{}", registry))
                    .with_registration_key(key)
                    .with_message(message)
            }

            RelmapError::UnsupportedTemporalPrecision { .. } => {
                ExError::new(ExErrorKind::UnsupportedTemporalPrecision)
                    .with_op("resolve_temporal_precision")
                    .with_message(message)
            }

            RelmapError::NotTemporal { type_name } => ExError::new(ExErrorKind::NotTemporal)
                .with_registration_key(type_name)
                .with_message(message),

            RelmapError::InvalidVersionValue { .. } => {
                ExError::new(ExErrorKind::InvalidVersionValue).with_message(message)
            }

            RelmapError::TableGroupAlreadyRegistered { navigable_path, .. } => {
                ExError::new(ExErrorKind::DuplicateRegistration)
                    .with_op("register_table_group")
                    .with_navigable_path(navigable_path)
                    .with_message(message)
            }

            RelmapError::UnsupportedCorrelatedJoin { navigable_path, .. } => {
                ExError::new(ExErrorKind::UnsupportedJoin)
                    .with_op("add_table_group_join")
                    .with_navigable_path(navigable_path)
                    .with_message(message)
            }

            RelmapError::UnresolvedTableReference { navigable_path, .. } => {
                ExError::new(ExErrorKind::UnresolvedTableReference)
                    .with_op("get_table_reference")
                    .with_navigable_path(navigable_path)
                    .with_message(message)
            }

            RelmapError::BindMismatch { .. } => ExError::new(ExErrorKind::BindMismatch)
                .with_op("bind")
                .with_message(message),

            RelmapError::ExtractMismatch { .. } => ExError::new(ExErrorKind::ExtractMismatch)
                .with_op("extract")
                .with_message(message),

            RelmapError::ValueParse { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            RelmapError::InvalidSettings { .. } => {
                ExError::new(ExErrorKind::InvalidSettings).with_message(message)
            }

            RelmapError::Io { .. } => ExError::new(ExErrorKind::Io).with_message(message),

            RelmapError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<toml::de::Error> for RelmapError {
    fn from(err: toml::de::Error) -> Self {
        RelmapError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for RelmapError {
    fn from(err: std::io::Error) -> Self {
        RelmapError::Io {
            message: err.to_string(),
        }
    }
}

//! Canonical schema constants for structured logging and events
//!
//! These constants keep field names identical between log events,
//! error context and test assertions.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_BOOTSTRAP_ID: &str = "bootstrap_id";
pub const FIELD_COMPILATION_ID: &str = "compilation_id";

// Type resolution
pub const FIELD_TYPE_CODE: &str = "type_code";
pub const FIELD_DOMAIN_TYPE: &str = "domain_type";
pub const FIELD_REGISTRATION_KEY: &str = "registration_key";
pub const FIELD_RESOLVED_TYPE: &str = "resolved_type";

// SQL AST
pub const FIELD_NAVIGABLE_PATH: &str = "navigable_path";
pub const FIELD_TABLE_EXPRESSION: &str = "table_expression";
pub const FIELD_SLOT: &str = "slot";

// Registry sizes
pub const FIELD_SQL_TYPE_COUNT: &str = "sql_type_count";
pub const FIELD_BASIC_TYPE_COUNT: &str = "basic_type_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_ERR_TYPE_CODE: &str = "err.type_code";
pub const FIELD_ERR_REGISTRATION_KEY: &str = "err.registration_key";
pub const FIELD_ERR_NAVIGABLE_PATH: &str = "err.navigable_path";
pub const FIELD_ERR_BOOTSTRAP_ID: &str = "err.bootstrap_id";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

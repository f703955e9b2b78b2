//! relmap core - basic type resolution and SQL-AST table groups
//!
//! This crate provides the type-mapping kernel of the relmap ORM:
//! - SQL type and domain type descriptors with their registries
//! - The basic type registry (memoizing `(domain, sql)` resolution)
//! - Adjustable resolution driven by LOB / nationalized / temporal indicators
//! - Version seed and increment strategies
//! - Value marshaling between domain values and column values
//! - Correlated table groups used when a subquery references an outer
//!   plural attribute

pub mod errors;
pub mod logging_facility;
pub mod settings;
pub mod sql_ast;
pub mod types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, RelmapError, Result};
pub use settings::TypeSettings;
pub use sql_ast::{
    CorrelatedPluralTableGroup, CorrelatedTableGroup, NavigablePath, TableGroup, TableReference,
};
pub use types::{
    resolve_attribute_type, AttributeTypeRequest, BasicType, BasicTypeRef, DomainTypeId,
    ResolutionIndicators, SqlTypeCode, TemporalPrecision, TypeConfiguration,
    TypeConfigurationBuilder, Value,
};

//! Basic types: one domain descriptor paired with one SQL descriptor
//!
//! Concrete types opt into capabilities (`AdjustableType`, `TemporalType`,
//! `VersionType`) by overriding the matching `as_*` accessor; the engine
//! never probes for capabilities any other way.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::adjustable::AdjustableType;
use super::domain_registry::DomainTypeRegistry;
use super::domain_type::{DomainTypeDescriptor, DomainTypeId};
use super::sql_registry::SqlTypeRegistry;
use super::sql_type::{SqlTypeCode, SqlTypeDescriptor};
use super::temporal::TemporalType;
use super::value::{ColumnValue, Value};
use super::version::VersionType;
use crate::errors::Result;

/// Shared handle to a resolved basic type
pub type BasicTypeRef = Arc<dyn BasicType>;

/// The descriptor pair a basic type is built from
#[derive(Debug, Clone)]
pub struct TypeDescriptors {
    pub domain: Arc<DomainTypeDescriptor>,
    pub sql: Arc<SqlTypeDescriptor>,
}

impl TypeDescriptors {
    pub fn new(domain: Arc<DomainTypeDescriptor>, sql: Arc<SqlTypeDescriptor>) -> Self {
        Self { domain, sql }
    }

    /// Fetch both descriptors from the bootstrap registries
    ///
    /// # Errors
    ///
    /// `UnknownDomainType` or `UnknownTypeCode` if either side is missing.
    pub fn lookup(
        domain_types: &DomainTypeRegistry,
        sql_types: &SqlTypeRegistry,
        domain: DomainTypeId,
        sql: SqlTypeCode,
    ) -> Result<Self> {
        Ok(Self {
            domain: domain_types.descriptor(domain)?,
            sql: sql_types.descriptor(sql)?,
        })
    }

    pub fn pair(&self) -> (DomainTypeId, SqlTypeCode) {
        (self.domain.id(), self.sql.code())
    }
}

pub trait BasicType: Send + Sync + fmt::Debug {
    /// Type name; `None` for types only reachable through resolution
    fn name(&self) -> Option<&str>;

    fn descriptors(&self) -> &TypeDescriptors;

    fn domain_type(&self) -> &Arc<DomainTypeDescriptor> {
        &self.descriptors().domain
    }

    fn sql_type(&self) -> &Arc<SqlTypeDescriptor> {
        &self.descriptors().sql
    }

    /// Keys this type answers to in the basic type registry
    fn registration_keys(&self) -> Vec<String> {
        self.name().map(str::to_string).into_iter().collect()
    }

    fn as_adjustable(&self) -> Option<&dyn AdjustableType> {
        None
    }

    fn as_temporal(&self) -> Option<&dyn TemporalType> {
        None
    }

    fn as_version(&self) -> Option<&dyn VersionType> {
        None
    }

    /// # Errors
    ///
    /// `BindMismatch` when the value cannot be carried by this column type.
    fn bind(&self, value: Option<&Value>) -> Result<ColumnValue> {
        self.sql_type().bind(self.domain_type(), value)
    }

    /// # Errors
    ///
    /// `ExtractMismatch` or `ValueParse` when the column value does not fit
    /// the domain type.
    fn extract(&self, column: &ColumnValue) -> Result<Option<Value>> {
        self.sql_type().extract(self.domain_type(), column)
    }

    fn compare(&self, a: &Value, b: &Value) -> Option<Ordering> {
        self.domain_type().compare(a, b)
    }

    fn display_name(&self) -> String {
        match self.name() {
            Some(name) => name.to_string(),
            None => format!(
                "{}/{}",
                self.domain_type().class_name(),
                self.sql_type().name()
            ),
        }
    }
}

/// Outcome of a re-resolution pass
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Keep the type the pass started from
    Unchanged,
    Adjusted(BasicTypeRef),
}

impl Resolution {
    pub fn or_base(self, base: &BasicTypeRef) -> BasicTypeRef {
        match self {
            Resolution::Unchanged => Arc::clone(base),
            Resolution::Adjusted(resolved) => resolved,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Resolution::Unchanged)
    }
}

/// Capability-free basic type created on demand by the registry
#[derive(Debug)]
pub struct StandardBasicType {
    name: Option<String>,
    descriptors: TypeDescriptors,
}

impl StandardBasicType {
    pub fn new(name: Option<String>, descriptors: TypeDescriptors) -> Self {
        Self { name, descriptors }
    }
}

impl BasicType for StandardBasicType {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn descriptors(&self) -> &TypeDescriptors {
        &self.descriptors
    }
}

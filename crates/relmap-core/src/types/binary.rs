//! Byte-array basic types

use std::cmp::Ordering;
use std::sync::Arc;

use super::adjustable::AdjustableType;
use super::basic_type::{BasicType, Resolution, TypeDescriptors};
use super::configuration::TypeConfiguration;
use super::domain_registry::DomainTypeRegistry;
use super::domain_type::{DomainTypeDescriptor, DomainTypeId};
use super::indicators::ResolutionIndicators;
use super::sql_registry::SqlTypeRegistry;
use super::sql_type::SqlTypeCode;
use super::value::Value;
use super::version::{VersionContext, VersionType};
use crate::errors::Result;

const BINARY: &str = "binary";
const WRAPPER_BINARY: &str = "wrapper-binary";

/// Escalate to BLOB when the attribute is marked LOB
fn escalate_to_blob(
    indicators: &ResolutionIndicators,
    domain: &Arc<DomainTypeDescriptor>,
    config: &TypeConfiguration,
    name: &str,
) -> Result<Resolution> {
    if !indicators.lob {
        return Ok(Resolution::Unchanged);
    }
    let blob = config.sql_types().descriptor(SqlTypeCode::BLOB)?;
    let resolved = config.basic_types().resolve(domain, &blob, Some(name))?;
    Ok(Resolution::Adjusted(resolved))
}

/// `Vec<u8>` over VARBINARY
#[derive(Debug)]
pub struct BinaryType {
    descriptors: TypeDescriptors,
}

impl BinaryType {
    /// # Errors
    ///
    /// Fails if either descriptor is missing from the registries.
    pub fn new(domain_types: &DomainTypeRegistry, sql_types: &SqlTypeRegistry) -> Result<Self> {
        Ok(Self {
            descriptors: TypeDescriptors::lookup(
                domain_types,
                sql_types,
                DomainTypeId::ByteArray,
                SqlTypeCode::VARBINARY,
            )?,
        })
    }
}

impl BasicType for BinaryType {
    fn name(&self) -> Option<&str> {
        Some(BINARY)
    }

    fn descriptors(&self) -> &TypeDescriptors {
        &self.descriptors
    }

    fn registration_keys(&self) -> Vec<String> {
        vec![BINARY.to_string(), DomainTypeId::ByteArray.class_name().to_string()]
    }

    fn as_adjustable(&self) -> Option<&dyn AdjustableType> {
        Some(self)
    }

    fn as_version(&self) -> Option<&dyn VersionType> {
        Some(self)
    }
}

impl AdjustableType for BinaryType {
    fn resolve_indicated(
        &self,
        indicators: &ResolutionIndicators,
        domain: &Arc<DomainTypeDescriptor>,
        config: &TypeConfiguration,
    ) -> Result<Resolution> {
        escalate_to_blob(indicators, domain, config, BINARY)
    }
}

/// Binary row versions are generated by the database (SQL Server
/// `rowversion`, Sybase `timestamp`); the application never computes them.
impl VersionType for BinaryType {
    fn seed(&self, _ctx: &VersionContext) -> Result<Option<Value>> {
        Ok(None)
    }

    fn next(&self, current: Option<&Value>, _ctx: &VersionContext) -> Result<Option<Value>> {
        Ok(current.cloned())
    }

    fn compare(&self, a: &Value, b: &Value) -> Option<Ordering> {
        self.descriptors.domain.compare(a, b)
    }
}

/// `Vec<Option<u8>>` over VARBINARY
#[derive(Debug)]
pub struct WrapperBinaryType {
    descriptors: TypeDescriptors,
}

impl WrapperBinaryType {
    /// # Errors
    ///
    /// Fails if either descriptor is missing from the registries.
    pub fn new(domain_types: &DomainTypeRegistry, sql_types: &SqlTypeRegistry) -> Result<Self> {
        Ok(Self {
            descriptors: TypeDescriptors::lookup(
                domain_types,
                sql_types,
                DomainTypeId::ByteWrapperArray,
                SqlTypeCode::VARBINARY,
            )?,
        })
    }
}

impl BasicType for WrapperBinaryType {
    fn name(&self) -> Option<&str> {
        Some(WRAPPER_BINARY)
    }

    fn descriptors(&self) -> &TypeDescriptors {
        &self.descriptors
    }

    fn registration_keys(&self) -> Vec<String> {
        vec![
            WRAPPER_BINARY.to_string(),
            DomainTypeId::ByteWrapperArray.class_name().to_string(),
        ]
    }

    fn as_adjustable(&self) -> Option<&dyn AdjustableType> {
        Some(self)
    }
}

impl AdjustableType for WrapperBinaryType {
    fn resolve_indicated(
        &self,
        indicators: &ResolutionIndicators,
        domain: &Arc<DomainTypeDescriptor>,
        config: &TypeConfiguration,
    ) -> Result<Resolution> {
        escalate_to_blob(indicators, domain, config, WRAPPER_BINARY)
    }
}

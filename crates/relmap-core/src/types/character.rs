//! Character and string basic types

use std::sync::Arc;

use super::adjustable::AdjustableType;
use super::basic_type::{BasicType, Resolution, TypeDescriptors};
use super::configuration::TypeConfiguration;
use super::domain_registry::DomainTypeRegistry;
use super::domain_type::{DomainTypeDescriptor, DomainTypeId};
use super::indicators::ResolutionIndicators;
use super::sql_registry::SqlTypeRegistry;
use super::sql_type::SqlTypeCode;
use crate::errors::Result;

fn lob_code(nationalized: bool) -> SqlTypeCode {
    if nationalized {
        SqlTypeCode::NCLOB
    } else {
        SqlTypeCode::CLOB
    }
}

fn resolve_pair(
    domain: &Arc<DomainTypeDescriptor>,
    code: SqlTypeCode,
    name: Option<&str>,
    config: &TypeConfiguration,
) -> Result<Resolution> {
    let sql = config.sql_types().descriptor(code)?;
    let resolved = config.basic_types().resolve(domain, &sql, name)?;
    Ok(Resolution::Adjusted(resolved))
}

/// A `Vec<char>` attribute gets its own CLOB/NCLOB pair; otherwise a
/// nationalized attribute switches to the NCLOB singleton.
fn character_array_clob_rules(
    indicators: &ResolutionIndicators,
    domain: &Arc<DomainTypeDescriptor>,
    config: &TypeConfiguration,
) -> Result<Resolution> {
    if domain.id() == DomainTypeId::CharArray {
        let actual = config.domain_types().descriptor(domain.id())?;
        return resolve_pair(&actual, lob_code(indicators.nationalized), None, config);
    }
    if indicators.nationalized {
        return Ok(Resolution::Adjusted(Arc::clone(
            &config.standard().character_array_nclob,
        )));
    }
    Ok(Resolution::Unchanged)
}

/// Character arrays marked LOB go through the CLOB type's rules
fn escalate_character_array(
    indicators: &ResolutionIndicators,
    domain: &Arc<DomainTypeDescriptor>,
    config: &TypeConfiguration,
) -> Result<Resolution> {
    if indicators.lob {
        let clob = &config.standard().character_array_clob;
        return character_array_clob_rules(indicators, domain, config)
            .map(|resolution| Resolution::Adjusted(resolution.or_base(clob)));
    }
    if indicators.nationalized {
        return resolve_pair(domain, SqlTypeCode::NVARCHAR, None, config);
    }
    Ok(Resolution::Unchanged)
}

/// `String` over VARCHAR
#[derive(Debug)]
pub struct StringType {
    descriptors: TypeDescriptors,
}

impl StringType {
    /// # Errors
    ///
    /// Fails if either descriptor is missing from the registries.
    pub fn new(domain_types: &DomainTypeRegistry, sql_types: &SqlTypeRegistry) -> Result<Self> {
        Ok(Self {
            descriptors: TypeDescriptors::lookup(
                domain_types,
                sql_types,
                DomainTypeId::String,
                SqlTypeCode::VARCHAR,
            )?,
        })
    }
}

impl BasicType for StringType {
    fn name(&self) -> Option<&str> {
        Some("string")
    }

    fn descriptors(&self) -> &TypeDescriptors {
        &self.descriptors
    }

    fn registration_keys(&self) -> Vec<String> {
        vec!["string".to_string(), DomainTypeId::String.class_name().to_string()]
    }

    fn as_adjustable(&self) -> Option<&dyn AdjustableType> {
        Some(self)
    }
}

impl AdjustableType for StringType {
    fn resolve_indicated(
        &self,
        indicators: &ResolutionIndicators,
        domain: &Arc<DomainTypeDescriptor>,
        config: &TypeConfiguration,
    ) -> Result<Resolution> {
        match (indicators.lob, indicators.nationalized) {
            (true, true) => resolve_pair(domain, SqlTypeCode::NCLOB, Some("materialized-nclob"), config),
            (true, false) => resolve_pair(domain, SqlTypeCode::CLOB, Some("materialized-clob"), config),
            (false, true) => resolve_pair(domain, SqlTypeCode::NVARCHAR, Some("nstring"), config),
            (false, false) => Ok(Resolution::Unchanged),
        }
    }
}

/// `Vec<char>` over VARCHAR
#[derive(Debug)]
pub struct CharArrayType {
    descriptors: TypeDescriptors,
}

impl CharArrayType {
    /// # Errors
    ///
    /// Fails if either descriptor is missing from the registries.
    pub fn new(domain_types: &DomainTypeRegistry, sql_types: &SqlTypeRegistry) -> Result<Self> {
        Ok(Self {
            descriptors: TypeDescriptors::lookup(
                domain_types,
                sql_types,
                DomainTypeId::CharArray,
                SqlTypeCode::VARCHAR,
            )?,
        })
    }
}

impl BasicType for CharArrayType {
    fn name(&self) -> Option<&str> {
        Some("characters")
    }

    fn descriptors(&self) -> &TypeDescriptors {
        &self.descriptors
    }

    fn registration_keys(&self) -> Vec<String> {
        vec!["characters".to_string(), DomainTypeId::CharArray.class_name().to_string()]
    }

    fn as_adjustable(&self) -> Option<&dyn AdjustableType> {
        Some(self)
    }
}

impl AdjustableType for CharArrayType {
    fn resolve_indicated(
        &self,
        indicators: &ResolutionIndicators,
        domain: &Arc<DomainTypeDescriptor>,
        config: &TypeConfiguration,
    ) -> Result<Resolution> {
        escalate_character_array(indicators, domain, config)
    }
}

/// `Vec<Option<char>>` over VARCHAR
#[derive(Debug)]
pub struct CharacterArrayType {
    descriptors: TypeDescriptors,
}

impl CharacterArrayType {
    /// # Errors
    ///
    /// Fails if either descriptor is missing from the registries.
    pub fn new(domain_types: &DomainTypeRegistry, sql_types: &SqlTypeRegistry) -> Result<Self> {
        Ok(Self {
            descriptors: TypeDescriptors::lookup(
                domain_types,
                sql_types,
                DomainTypeId::CharacterArray,
                SqlTypeCode::VARCHAR,
            )?,
        })
    }
}

impl BasicType for CharacterArrayType {
    fn name(&self) -> Option<&str> {
        Some("wrapper-characters")
    }

    fn descriptors(&self) -> &TypeDescriptors {
        &self.descriptors
    }

    fn registration_keys(&self) -> Vec<String> {
        vec![
            "wrapper-characters".to_string(),
            DomainTypeId::CharacterArray.class_name().to_string(),
        ]
    }

    fn as_adjustable(&self) -> Option<&dyn AdjustableType> {
        Some(self)
    }
}

impl AdjustableType for CharacterArrayType {
    fn resolve_indicated(
        &self,
        indicators: &ResolutionIndicators,
        domain: &Arc<DomainTypeDescriptor>,
        config: &TypeConfiguration,
    ) -> Result<Resolution> {
        escalate_character_array(indicators, domain, config)
    }
}

/// `Vec<Option<char>>` over CLOB
///
/// Has no name; it is reached through LOB resolution or by its pair.
#[derive(Debug)]
pub struct CharacterArrayClobType {
    descriptors: TypeDescriptors,
}

impl CharacterArrayClobType {
    /// # Errors
    ///
    /// Fails if either descriptor is missing from the registries.
    pub fn new(domain_types: &DomainTypeRegistry, sql_types: &SqlTypeRegistry) -> Result<Self> {
        Ok(Self {
            descriptors: TypeDescriptors::lookup(
                domain_types,
                sql_types,
                DomainTypeId::CharacterArray,
                SqlTypeCode::CLOB,
            )?,
        })
    }
}

impl BasicType for CharacterArrayClobType {
    fn name(&self) -> Option<&str> {
        None
    }

    fn descriptors(&self) -> &TypeDescriptors {
        &self.descriptors
    }

    fn as_adjustable(&self) -> Option<&dyn AdjustableType> {
        Some(self)
    }
}

impl AdjustableType for CharacterArrayClobType {
    fn resolve_indicated(
        &self,
        indicators: &ResolutionIndicators,
        domain: &Arc<DomainTypeDescriptor>,
        config: &TypeConfiguration,
    ) -> Result<Resolution> {
        character_array_clob_rules(indicators, domain, config)
    }
}

/// `Vec<Option<char>>` over NCLOB
#[derive(Debug)]
pub struct CharacterArrayNClobType {
    descriptors: TypeDescriptors,
}

impl CharacterArrayNClobType {
    /// # Errors
    ///
    /// Fails if either descriptor is missing from the registries.
    pub fn new(domain_types: &DomainTypeRegistry, sql_types: &SqlTypeRegistry) -> Result<Self> {
        Ok(Self {
            descriptors: TypeDescriptors::lookup(
                domain_types,
                sql_types,
                DomainTypeId::CharacterArray,
                SqlTypeCode::NCLOB,
            )?,
        })
    }
}

impl BasicType for CharacterArrayNClobType {
    fn name(&self) -> Option<&str> {
        None
    }

    fn descriptors(&self) -> &TypeDescriptors {
        &self.descriptors
    }
}

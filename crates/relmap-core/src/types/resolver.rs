//! Attribute type resolution pipeline
//!
//! base lookup -> adjustable pass -> temporal precision pass

use std::time::Instant;

use super::adjustable::resolve_indicated_type;
use super::basic_type::BasicTypeRef;
use super::configuration::TypeConfiguration;
use super::domain_type::DomainTypeId;
use super::indicators::ResolutionIndicators;
use super::temporal::resolve_temporal_precision;
use crate::errors::{ExError, Result};
use crate::{log_op_end, log_op_error, log_op_start};

/// Everything the mapping layer knows about one attribute's type
#[derive(Debug, Clone)]
pub struct AttributeTypeRequest {
    /// Attribute name, used for diagnostics only
    pub attribute: String,
    pub domain: DomainTypeId,
    /// Explicit registration key, overriding the domain type's default
    pub explicit_key: Option<String>,
    pub indicators: ResolutionIndicators,
}

impl AttributeTypeRequest {
    pub fn new(attribute: impl Into<String>, domain: DomainTypeId) -> Self {
        Self {
            attribute: attribute.into(),
            domain,
            explicit_key: None,
            indicators: ResolutionIndicators::default(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.explicit_key = Some(key.into());
        self
    }

    pub fn with_indicators(mut self, indicators: ResolutionIndicators) -> Self {
        self.indicators = indicators;
        self
    }
}

/// Resolve the basic type an attribute maps to
///
/// # Errors
///
/// - `UnknownRegistrationKey` if an explicit key is not registered
/// - `NotTemporal` / `UnsupportedTemporalPrecision` from the precision pass
/// - `RegistryFrozen` if an adjusted pair is new and the registry is frozen
pub fn resolve_attribute_type(
    config: &TypeConfiguration,
    request: &AttributeTypeRequest,
) -> Result<BasicTypeRef> {
    let start = Instant::now();
    log_op_start!(
        "resolve_attribute_type",
        attribute = %request.attribute,
        domain_type = %request.domain
    );

    let result = run_pipeline(config, request);
    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(resolved) => {
            log_op_end!(
                "resolve_attribute_type",
                duration_ms = duration_ms,
                resolved_type = %resolved.display_name(),
                type_code = resolved.sql_type().code().value()
            );
        }
        Err(e) => {
            log_op_error!(
                "resolve_attribute_type",
                ExError::from(e.clone()).with_bootstrap_id(config.bootstrap_id().clone()),
                duration_ms = duration_ms,
                attribute = %request.attribute
            );
        }
    }
    result
}

fn run_pipeline(config: &TypeConfiguration, request: &AttributeTypeRequest) -> Result<BasicTypeRef> {
    let domain = config.domain_types().descriptor(request.domain)?;
    let base = match &request.explicit_key {
        Some(key) => config.basic_types().by_key(key)?,
        None => match config.basic_types().by_key(domain.class_name()) {
            Ok(registered) => registered,
            Err(_) => {
                let code = domain.recommended_sql_code(&ResolutionIndicators::default());
                let sql = config.sql_types().descriptor(code)?;
                config.basic_types().resolve(&domain, &sql, None)?
            }
        },
    };

    let mut indicators = request.indicators;
    indicators.nationalized |= config.settings().nationalized_character_data;

    let adjusted = resolve_indicated_type(&base, &indicators, Some(&domain), config)?;
    match indicators.temporal_precision {
        Some(precision) => resolve_temporal_precision(&adjusted, precision, config),
        None => Ok(adjusted),
    }
}

//! Re-resolution of an already-selected type under attribute indicators
//!
//! LOB and nationalized markers can appear independently of the base type,
//! so they refine a default type in a second pass instead of feeding one
//! combined lookup.

use std::sync::Arc;

use super::basic_type::{BasicTypeRef, Resolution};
use super::configuration::TypeConfiguration;
use super::domain_type::DomainTypeDescriptor;
use super::indicators::ResolutionIndicators;
use crate::errors::Result;

pub trait AdjustableType: Send + Sync {
    /// Pick a more specific type for `domain` given the indicators
    ///
    /// `domain` is the attribute's actual domain type, which may differ from
    /// the one this type was built for.
    ///
    /// # Errors
    ///
    /// Registry errors from resolving the adjusted pair.
    fn resolve_indicated(
        &self,
        indicators: &ResolutionIndicators,
        domain: &Arc<DomainTypeDescriptor>,
        config: &TypeConfiguration,
    ) -> Result<Resolution>;
}

/// Run the adjustable pass over `base`
///
/// Types without the capability come back unchanged. `domain` defaults to
/// the base type's own domain descriptor.
///
/// # Errors
///
/// Whatever the type's own resolution returns.
pub fn resolve_indicated_type(
    base: &BasicTypeRef,
    indicators: &ResolutionIndicators,
    domain: Option<&Arc<DomainTypeDescriptor>>,
    config: &TypeConfiguration,
) -> Result<BasicTypeRef> {
    let Some(adjustable) = base.as_adjustable() else {
        return Ok(Arc::clone(base));
    };
    let domain = domain.unwrap_or_else(|| base.domain_type());
    Ok(adjustable
        .resolve_indicated(indicators, domain, config)?
        .or_base(base))
}

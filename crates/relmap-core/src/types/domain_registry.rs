use std::collections::HashMap;
use std::sync::Arc;

use super::domain_type::{DomainTypeDescriptor, DomainTypeId};
use crate::errors::{RelmapError, Result};

/// Domain type descriptors, one shared instance per `DomainTypeId`
#[derive(Debug, Clone)]
pub struct DomainTypeRegistry {
    descriptors: HashMap<DomainTypeId, Arc<DomainTypeDescriptor>>,
}

impl DomainTypeRegistry {
    pub fn with_standard_types() -> Self {
        let descriptors = DomainTypeId::ALL
            .iter()
            .map(|id| (*id, Arc::new(DomainTypeDescriptor::new(*id))))
            .collect();
        Self { descriptors }
    }

    /// # Errors
    ///
    /// `UnknownDomainType` if no descriptor is registered for `id`.
    pub fn descriptor(&self, id: DomainTypeId) -> Result<Arc<DomainTypeDescriptor>> {
        self.descriptors
            .get(&id)
            .cloned()
            .ok_or_else(|| RelmapError::UnknownDomainType {
                name: id.class_name().to_string(),
            })
    }

    /// # Errors
    ///
    /// `UnknownDomainType` if `name` is not a known class or variant name.
    pub fn descriptor_by_name(&self, name: &str) -> Result<Arc<DomainTypeDescriptor>> {
        self.descriptor(name.parse()?)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

//! SQL type descriptor registry
//!
//! Populated on the builder during bootstrap and read-only afterwards; the
//! built registry is a plain `HashMap` behind `Arc`s so lookups never lock.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use super::sql_type::{parse_code_literal, standard_descriptors, unknown_name, SqlTypeCode, SqlTypeDescriptor};
use crate::errors::{RelmapError, Result};

#[derive(Debug, Clone, Default)]
pub struct SqlTypeRegistry {
    descriptors: HashMap<SqlTypeCode, Arc<SqlTypeDescriptor>>,
}

impl SqlTypeRegistry {
    /// Empty registry; see [`SqlTypeRegistry::with_standard_types`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-seeded with a descriptor for every standard code
    pub fn with_standard_types() -> Self {
        let mut registry = Self::new();
        for descriptor in standard_descriptors() {
            registry.register(descriptor);
        }
        registry
    }

    /// Insert or overwrite the descriptor for its code
    pub fn register(&mut self, descriptor: SqlTypeDescriptor) -> Arc<SqlTypeDescriptor> {
        let descriptor = Arc::new(descriptor);
        if let Some(previous) = self
            .descriptors
            .insert(descriptor.code(), Arc::clone(&descriptor))
        {
            debug!(
                type_code = descriptor.code().value(),
                previous = %previous,
                replacement = %descriptor,
                "sql type descriptor overwritten"
            );
        }
        descriptor
    }

    /// Point `code` at the descriptor registered for `target`
    ///
    /// # Errors
    ///
    /// `UnknownTypeCode` if `target` has no descriptor.
    pub fn register_override(&mut self, code: SqlTypeCode, target: SqlTypeCode) -> Result<()> {
        let descriptor = self.descriptor(target)?;
        debug!(
            type_code = code.value(),
            target = %descriptor,
            "sql type override applied"
        );
        self.descriptors.insert(code, descriptor);
        Ok(())
    }

    /// # Errors
    ///
    /// `UnknownTypeCode` if nothing is registered for `code`.
    pub fn descriptor(&self, code: SqlTypeCode) -> Result<Arc<SqlTypeDescriptor>> {
        self.descriptors
            .get(&code)
            .cloned()
            .ok_or(RelmapError::UnknownTypeCode { code: code.value() })
    }

    /// Look up by type name (`"NCLOB"`, case-insensitive) or numeric code (`"2011"`)
    ///
    /// # Errors
    ///
    /// `UnknownTypeName` if no descriptor carries that name, or
    /// `UnknownTypeCode` for an unregistered numeric code.
    pub fn descriptor_by_name(&self, reference: &str) -> Result<Arc<SqlTypeDescriptor>> {
        if let Some(code) = parse_code_literal(reference) {
            return self.descriptor(code);
        }
        let wanted = reference.trim();
        self.descriptors
            .iter()
            .filter(|(code, d)| d.code() == **code)
            .map(|(_, d)| d)
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .cloned()
            .ok_or_else(|| unknown_name(wanted))
    }

    /// Resolve a name or numeric reference to its code without requiring a descriptor
    ///
    /// # Errors
    ///
    /// `UnknownTypeName` if the reference is neither numeric nor a known name.
    pub fn code_for(&self, reference: &str) -> Result<SqlTypeCode> {
        match parse_code_literal(reference) {
            Some(code) => Ok(code),
            None => self.descriptor_by_name(reference).map(|d| d.code()),
        }
    }

    pub fn contains(&self, code: SqlTypeCode) -> bool {
        self.descriptors.contains_key(&code)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Registered codes in ascending order
    pub fn codes(&self) -> Vec<SqlTypeCode> {
        let mut codes: Vec<_> = self.descriptors.keys().copied().collect();
        codes.sort();
        codes
    }
}

//! Basic type registry
//!
//! Memoizing factory over `(DomainTypeId, SqlTypeCode)` pairs. Get-or-create
//! goes through `DashMap::entry`, so concurrent `resolve` calls for the same
//! pair lock one shard and every caller observes the same `Arc`.
//!
//! `freeze` snapshots both maps into plain `HashMap`s; every read after that
//! goes through the snapshot without touching a shard lock.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use tracing::{debug, warn};

use super::basic_type::{BasicTypeRef, StandardBasicType, TypeDescriptors};
use super::domain_type::{DomainTypeDescriptor, DomainTypeId};
use super::sql_type::{SqlTypeCode, SqlTypeDescriptor};
use crate::errors::{RelmapError, Result};

const REGISTRY_NAME: &str = "basic_types";

/// One registry entry as listed by [`BasicTypeRegistry::registrations`]
#[derive(Debug, Clone)]
pub struct Registration {
    pub key: String,
    pub basic_type: BasicTypeRef,
}

type PairKey = (DomainTypeId, SqlTypeCode);

/// Read-only view taken by [`BasicTypeRegistry::freeze`]
#[derive(Debug)]
struct FrozenTypes {
    by_pair: HashMap<PairKey, BasicTypeRef>,
    by_key: HashMap<String, BasicTypeRef>,
}

#[derive(Debug, Default)]
pub struct BasicTypeRegistry {
    by_pair: DashMap<PairKey, BasicTypeRef>,
    by_key: DashMap<String, BasicTypeRef>,
    frozen: OnceLock<FrozenTypes>,
}

impl BasicTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a type under its descriptor pair and every registration key
    ///
    /// Re-registering a pair or key replaces the previous binding; the
    /// displaced type is logged at `warn`. Keys still bound to a displaced
    /// pair instance move to the replacement, so a pair never has two live
    /// instances.
    ///
    /// # Errors
    ///
    /// `RegistryFrozen` once [`BasicTypeRegistry::freeze`] has run.
    pub fn register(&self, basic_type: BasicTypeRef) -> Result<()> {
        let label = basic_type.display_name();
        self.ensure_open(&label)?;

        let pair = basic_type.descriptors().pair();
        if let Some(previous) = self.by_pair.insert(pair, Arc::clone(&basic_type)) {
            if !Arc::ptr_eq(&previous, &basic_type) {
                warn!(
                    domain_type = %pair.0,
                    type_code = pair.1.value(),
                    displaced = %previous.display_name(),
                    replacement = %label,
                    "basic type pair re-registered"
                );
                self.rebind_displaced(&previous, &basic_type);
            }
        }
        for key in basic_type.registration_keys() {
            self.bind_key(key, Arc::clone(&basic_type));
        }
        Ok(())
    }

    /// Bind an additional key (an alias) to an already-built type
    ///
    /// # Errors
    ///
    /// `RegistryFrozen` once the registry is frozen.
    pub fn register_key(&self, key: impl Into<String>, basic_type: BasicTypeRef) -> Result<()> {
        let key = key.into();
        self.ensure_open(&key)?;
        self.bind_key(key, basic_type);
        Ok(())
    }

    /// Return the type for the `(domain, sql)` pair, creating it on first use
    ///
    /// A created type is named `name` and, if that key is still free, bound
    /// under it. Existing key bindings are never displaced by resolution.
    ///
    /// # Errors
    ///
    /// `RegistryFrozen` if the pair is not cached and the registry is frozen.
    pub fn resolve(
        &self,
        domain: &Arc<DomainTypeDescriptor>,
        sql: &Arc<SqlTypeDescriptor>,
        name: Option<&str>,
    ) -> Result<BasicTypeRef> {
        let pair = (domain.id(), sql.code());
        if let Some(frozen) = self.frozen.get() {
            return frozen.by_pair.get(&pair).map(Arc::clone).ok_or_else(|| {
                RelmapError::RegistryFrozen {
                    registry: REGISTRY_NAME,
                    key: format!("{}/{}", domain.class_name(), sql.name()),
                }
            });
        }
        if let Some(existing) = self.by_pair.get(&pair) {
            return Ok(Arc::clone(existing.value()));
        }

        let mut created = false;
        let resolved = {
            let entry = self.by_pair.entry(pair).or_insert_with(|| {
                created = true;
                Arc::new(StandardBasicType::new(
                    name.map(str::to_string),
                    TypeDescriptors::new(Arc::clone(domain), Arc::clone(sql)),
                )) as BasicTypeRef
            });
            Arc::clone(entry.value())
        };

        if created {
            debug!(
                domain_type = %pair.0,
                type_code = pair.1.value(),
                name = name.unwrap_or(""),
                "basic type created on resolve"
            );
            if let Some(name) = name {
                self.by_key
                    .entry(name.to_string())
                    .or_insert_with(|| Arc::clone(&resolved));
            }
        }
        Ok(resolved)
    }

    /// # Errors
    ///
    /// `UnknownRegistrationKey` if nothing is bound under `key`.
    pub fn by_key(&self, key: &str) -> Result<BasicTypeRef> {
        let found = match self.frozen.get() {
            Some(frozen) => frozen.by_key.get(key).map(Arc::clone),
            None => self.by_key.get(key).map(|entry| Arc::clone(entry.value())),
        };
        found.ok_or_else(|| RelmapError::UnknownRegistrationKey {
                key: key.to_string(),
            })
    }

    pub fn by_pair(&self, domain: DomainTypeId, sql: SqlTypeCode) -> Option<BasicTypeRef> {
        match self.frozen.get() {
            Some(frozen) => frozen.by_pair.get(&(domain, sql)).map(Arc::clone),
            None => self
                .by_pair
                .get(&(domain, sql))
                .map(|entry| Arc::clone(entry.value())),
        }
    }

    /// Every key binding, sorted by key
    pub fn registrations(&self) -> Vec<Registration> {
        let mut registrations: Vec<_> = match self.frozen.get() {
            Some(frozen) => frozen
                .by_key
                .iter()
                .map(|(key, basic_type)| Registration {
                    key: key.clone(),
                    basic_type: Arc::clone(basic_type),
                })
                .collect(),
            None => self
                .by_key
                .iter()
                .map(|entry| Registration {
                    key: entry.key().clone(),
                    basic_type: Arc::clone(entry.value()),
                })
                .collect(),
        };
        registrations.sort_by(|a, b| a.key.cmp(&b.key));
        registrations
    }

    /// End the configuration phase
    ///
    /// Takes the read-only snapshot; must not race with `register` or a
    /// creating `resolve`. Freezing twice keeps the first snapshot.
    pub fn freeze(&self) {
        self.frozen.get_or_init(|| FrozenTypes {
            by_pair: self
                .by_pair
                .iter()
                .map(|entry| (*entry.key(), Arc::clone(entry.value())))
                .collect(),
            by_key: self
                .by_key
                .iter()
                .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
                .collect(),
        });
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.get().is_some()
    }

    /// Number of distinct descriptor pairs
    pub fn len(&self) -> usize {
        match self.frozen.get() {
            Some(frozen) => frozen.by_pair.len(),
            None => self.by_pair.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn key_count(&self) -> usize {
        match self.frozen.get() {
            Some(frozen) => frozen.by_key.len(),
            None => self.by_key.len(),
        }
    }

    fn ensure_open(&self, key: &str) -> Result<()> {
        if self.is_frozen() {
            return Err(RelmapError::RegistryFrozen {
                registry: REGISTRY_NAME,
                key: key.to_string(),
            });
        }
        Ok(())
    }

    fn rebind_displaced(&self, previous: &BasicTypeRef, replacement: &BasicTypeRef) {
        for mut entry in self.by_key.iter_mut() {
            if Arc::ptr_eq(entry.value(), previous) {
                *entry.value_mut() = Arc::clone(replacement);
            }
        }
    }

    fn bind_key(&self, key: String, basic_type: BasicTypeRef) {
        let label = basic_type.display_name();
        if let Some(previous) = self.by_key.insert(key.clone(), basic_type) {
            if previous.display_name() != label {
                warn!(
                    registration_key = %key,
                    displaced = %previous.display_name(),
                    replacement = %label,
                    "registration key re-bound"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::domain_registry::DomainTypeRegistry;
    use crate::types::sql_registry::SqlTypeRegistry;

    fn descriptors(
        domain: DomainTypeId,
        sql: SqlTypeCode,
    ) -> (Arc<DomainTypeDescriptor>, Arc<SqlTypeDescriptor>) {
        (
            DomainTypeRegistry::with_standard_types().descriptor(domain).unwrap(),
            SqlTypeRegistry::with_standard_types().descriptor(sql).unwrap(),
        )
    }

    #[test]
    fn test_resolve_is_memoized() {
        let registry = BasicTypeRegistry::new();
        let (domain, sql) = descriptors(DomainTypeId::ByteArray, SqlTypeCode::BLOB);
        let first = registry.resolve(&domain, &sql, Some("blob")).unwrap();
        let second = registry.resolve(&domain, &sql, Some("other")).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
        assert!(registry.by_key("other").is_err());
    }

    #[test]
    fn test_resolve_keeps_existing_key() {
        let registry = BasicTypeRegistry::new();
        let (domain, varbinary) = descriptors(DomainTypeId::ByteArray, SqlTypeCode::VARBINARY);
        let (_, blob) = descriptors(DomainTypeId::ByteArray, SqlTypeCode::BLOB);
        let binary = registry.resolve(&domain, &varbinary, Some("binary")).unwrap();
        let lob = registry.resolve(&domain, &blob, Some("binary")).unwrap();
        assert!(!Arc::ptr_eq(&binary, &lob));
        assert!(Arc::ptr_eq(&registry.by_key("binary").unwrap(), &binary));
    }

    #[test]
    fn test_frozen_registry_serves_cached_pairs_only() {
        let registry = BasicTypeRegistry::new();
        let (domain, sql) = descriptors(DomainTypeId::String, SqlTypeCode::VARCHAR);
        let cached = registry.resolve(&domain, &sql, None).unwrap();
        registry.freeze();

        assert!(Arc::ptr_eq(&registry.resolve(&domain, &sql, None).unwrap(), &cached));
        let (_, clob) = descriptors(DomainTypeId::String, SqlTypeCode::CLOB);
        assert!(matches!(
            registry.resolve(&domain, &clob, None),
            Err(RelmapError::RegistryFrozen { .. })
        ));
        assert!(matches!(
            registry.register(cached),
            Err(RelmapError::RegistryFrozen { .. })
        ));
    }

    #[test]
    fn test_displaced_pair_takes_its_keys_along() {
        let registry = BasicTypeRegistry::new();
        let (domain, sql) = descriptors(DomainTypeId::String, SqlTypeCode::VARCHAR);
        let first = registry.resolve(&domain, &sql, Some("text")).unwrap();
        registry.register_key("prose", Arc::clone(&first)).unwrap();

        let replacement: BasicTypeRef = Arc::new(StandardBasicType::new(
            Some("varchar-text".into()),
            TypeDescriptors::new(domain, sql),
        ));
        registry.register(Arc::clone(&replacement)).unwrap();

        for key in ["text", "prose", "varchar-text"] {
            assert!(Arc::ptr_eq(&registry.by_key(key).unwrap(), &replacement), "{key}");
        }
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_frozen_snapshot_matches_live_view() {
        let registry = BasicTypeRegistry::new();
        let (domain, sql) = descriptors(DomainTypeId::Uuid, SqlTypeCode::BINARY);
        let uuid = registry.resolve(&domain, &sql, Some("uuid-binary")).unwrap();
        let before = registry.registrations().len();
        registry.freeze();
        registry.freeze();

        assert!(registry.is_frozen());
        assert_eq!(registry.registrations().len(), before);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.key_count(), 1);
        assert!(Arc::ptr_eq(
            &registry.by_pair(DomainTypeId::Uuid, SqlTypeCode::BINARY).unwrap(),
            &uuid
        ));
        assert!(Arc::ptr_eq(&registry.by_key("uuid-binary").unwrap(), &uuid));
    }

    #[test]
    fn test_unknown_key() {
        let registry = BasicTypeRegistry::new();
        assert_eq!(
            registry.by_key("nope").unwrap_err(),
            RelmapError::UnknownRegistrationKey { key: "nope".into() }
        );
    }
}

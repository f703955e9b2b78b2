//! Per persistence-unit type configuration
//!
//! Bootstrap order is fixed: domain descriptors, then SQL descriptors (with
//! overrides applied), then the standard basic types, then custom types and
//! aliases. The standard slots then take on whichever instance the registry
//! ended up holding for their pair. The LOB and nationalized variants of every registered type are
//! resolved during `build`, so a frozen registry still serves them. After
//! `freeze` the basic type registry stops accepting new entries.

use std::sync::Arc;
use std::time::Instant;

use relmap_core_types::BootstrapId;
use tracing::debug;

use super::adjustable::resolve_indicated_type;
use super::basic_registry::BasicTypeRegistry;
use super::basic_type::BasicTypeRef;
use super::domain_registry::DomainTypeRegistry;
use super::domain_type::DomainTypeId;
use super::indicators::ResolutionIndicators;
use super::sql_registry::SqlTypeRegistry;
use super::sql_type::SqlTypeCode;
use super::standard::StandardTypes;
use crate::errors::{ExError, RelmapError, Result};
use crate::settings::TypeSettings;
use crate::{log_op_end, log_op_error, log_op_start};

struct PendingAlias {
    key: String,
    domain: DomainTypeId,
    sql: SqlTypeCode,
}

pub struct TypeConfigurationBuilder {
    bootstrap_id: BootstrapId,
    settings: TypeSettings,
    domain_types: DomainTypeRegistry,
    sql_types: SqlTypeRegistry,
    custom_types: Vec<BasicTypeRef>,
    aliases: Vec<PendingAlias>,
}

impl Default for TypeConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeConfigurationBuilder {
    pub fn new() -> Self {
        let domain_types = DomainTypeRegistry::with_standard_types();
        let sql_types = SqlTypeRegistry::with_standard_types();
        Self {
            bootstrap_id: BootstrapId::new(),
            settings: TypeSettings::default(),
            domain_types,
            sql_types,
            custom_types: Vec::new(),
            aliases: Vec::new(),
        }
    }

    /// Apply SQL type overrides and queue aliases from `settings`
    ///
    /// # Errors
    ///
    /// `InvalidSettings` when an override or alias names an unknown type.
    pub fn apply_settings(mut self, settings: &TypeSettings) -> Result<Self> {
        for over in &settings.sql_type_overrides {
            let code = over.code.resolve(&self.sql_types)?;
            let target = over.target.resolve(&self.sql_types)?;
            self.sql_types
                .register_override(code, target)
                .map_err(|e| RelmapError::InvalidSettings {
                    reason: format!("override {} -> {}: {}", over.code, over.target, e),
                })?;
        }
        for alias in &settings.aliases {
            let domain = alias
                .domain
                .parse::<DomainTypeId>()
                .map_err(|e| RelmapError::InvalidSettings {
                    reason: format!("alias `{}`: {}", alias.key, e),
                })?;
            let sql = alias.sql_type.resolve(&self.sql_types)?;
            self.aliases.push(PendingAlias {
                key: alias.key.clone(),
                domain,
                sql,
            });
        }
        self.settings = settings.clone();
        Ok(self)
    }

    /// Direct access to the SQL descriptors before the basic types exist
    pub fn sql_types_mut(&mut self) -> &mut SqlTypeRegistry {
        &mut self.sql_types
    }

    /// Register a custom type after the standard ones; it wins any key clash
    pub fn register_basic_type(mut self, basic_type: BasicTypeRef) -> Self {
        self.custom_types.push(basic_type);
        self
    }

    /// # Errors
    ///
    /// `UnknownTypeCode` if an alias or standard type refers to a code with
    /// no descriptor.
    pub fn build(self) -> Result<TypeConfiguration> {
        let standard = StandardTypes::build(&self.domain_types, &self.sql_types)?;
        let basic_types = BasicTypeRegistry::new();
        for basic_type in standard.all() {
            basic_types.register(basic_type)?;
        }
        for basic_type in &self.custom_types {
            basic_types.register(Arc::clone(basic_type))?;
        }
        let standard = standard.adopt_registered(&basic_types);
        let mut adjustable: Vec<BasicTypeRef> = standard.all();
        adjustable.extend(self.custom_types);
        for alias in self.aliases {
            let domain = self.domain_types.descriptor(alias.domain)?;
            let sql = self.sql_types.descriptor(alias.sql)?;
            let resolved = basic_types.resolve(&domain, &sql, Some(&alias.key))?;
            basic_types.register_key(alias.key, resolved)?;
        }
        let config = TypeConfiguration {
            bootstrap_id: self.bootstrap_id,
            settings: self.settings,
            domain_types: self.domain_types,
            sql_types: self.sql_types,
            basic_types,
            standard,
        };
        config.prewarm_indicated(&adjustable)?;
        debug!(
            bootstrap_id = %config.bootstrap_id,
            sql_type_count = config.sql_types.len(),
            basic_type_count = config.basic_types.len(),
            "type configuration built"
        );
        Ok(config)
    }
}

/// Registries and standard types for one persistence unit
///
/// `Send + Sync`; share it as `Arc<TypeConfiguration>`.
#[derive(Debug)]
pub struct TypeConfiguration {
    bootstrap_id: BootstrapId,
    settings: TypeSettings,
    domain_types: DomainTypeRegistry,
    sql_types: SqlTypeRegistry,
    basic_types: BasicTypeRegistry,
    standard: StandardTypes,
}

impl TypeConfiguration {
    pub fn builder() -> TypeConfigurationBuilder {
        TypeConfigurationBuilder::new()
    }

    /// Build a configuration from settings, freezing it if they say so
    ///
    /// # Errors
    ///
    /// `InvalidSettings` for unknown names in the settings, or any registry
    /// error raised while seeding.
    pub fn bootstrap(settings: &TypeSettings) -> Result<Arc<TypeConfiguration>> {
        let start = Instant::now();
        log_op_start!("bootstrap");

        let builder = TypeConfigurationBuilder::new();
        let bootstrap_id = builder.bootstrap_id.clone();
        let result = builder
            .apply_settings(settings)
            .and_then(TypeConfigurationBuilder::build);

        let duration_ms = start.elapsed().as_millis() as u64;
        match result {
            Ok(config) => {
                if settings.freeze_after_bootstrap {
                    config.freeze();
                }
                log_op_end!(
                    "bootstrap",
                    duration_ms = duration_ms,
                    bootstrap_id = %config.bootstrap_id,
                    basic_type_count = config.basic_types.len(),
                    frozen = config.is_frozen()
                );
                Ok(Arc::new(config))
            }
            Err(e) => {
                log_op_error!(
                    "bootstrap",
                    ExError::from(e.clone()).with_bootstrap_id(bootstrap_id),
                    duration_ms = duration_ms
                );
                Err(e)
            }
        }
    }

    /// End the configuration phase
    pub fn freeze(&self) {
        self.basic_types.freeze();
    }

    pub fn is_frozen(&self) -> bool {
        self.basic_types.is_frozen()
    }

    pub fn bootstrap_id(&self) -> &BootstrapId {
        &self.bootstrap_id
    }

    pub fn settings(&self) -> &TypeSettings {
        &self.settings
    }

    pub fn domain_types(&self) -> &DomainTypeRegistry {
        &self.domain_types
    }

    pub fn sql_types(&self) -> &SqlTypeRegistry {
        &self.sql_types
    }

    pub fn basic_types(&self) -> &BasicTypeRegistry {
        &self.basic_types
    }

    pub fn standard(&self) -> &StandardTypes {
        &self.standard
    }

    /// Resolve every LOB / nationalized variant of `types` so a frozen
    /// registry can still serve them.
    fn prewarm_indicated(&self, types: &[BasicTypeRef]) -> Result<()> {
        for basic_type in types {
            for (lob, nationalized) in INDICATOR_COMBINATIONS {
                let indicators = ResolutionIndicators::new()
                    .with_lob(lob)
                    .with_nationalized(nationalized);
                resolve_indicated_type(basic_type, &indicators, None, self)?;
            }
        }
        Ok(())
    }
}

const INDICATOR_COMBINATIONS: [(bool, bool); 3] = [(true, false), (false, true), (true, true)];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{SqlTypeOverride, SqlTypeRef, TypeAlias};
    use crate::types::basic_type::BasicType;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_configuration_is_send_sync() {
        assert_send_sync::<TypeConfiguration>();
    }

    #[test]
    fn test_standard_types_registered_by_key() {
        let config = TypeConfiguration::builder().build().unwrap();
        let binary = config.basic_types().by_key("binary").unwrap();
        assert!(Arc::ptr_eq(&binary, &config.standard().binary));
        let by_class = config.basic_types().by_key("Vec<u8>").unwrap();
        assert!(Arc::ptr_eq(&by_class, &binary));
    }

    #[test]
    fn test_bootstrap_applies_aliases_and_freezes() {
        let settings = TypeSettings {
            aliases: vec![TypeAlias {
                key: "national_text".into(),
                domain: "String".into(),
                sql_type: SqlTypeRef::Name("NVARCHAR".into()),
            }],
            ..TypeSettings::default()
        };
        let config = TypeConfiguration::bootstrap(&settings).unwrap();
        assert!(config.is_frozen());
        let alias = config.basic_types().by_key("national_text").unwrap();
        assert_eq!(alias.sql_type().code(), SqlTypeCode::NVARCHAR);
    }

    #[test]
    fn test_bootstrap_rejects_unknown_override_target() {
        let settings = TypeSettings {
            sql_type_overrides: vec![SqlTypeOverride {
                code: SqlTypeRef::Code(16),
                target: SqlTypeRef::Code(4242),
            }],
            ..TypeSettings::default()
        };
        assert!(matches!(
            TypeConfiguration::bootstrap(&settings),
            Err(RelmapError::InvalidSettings { .. })
        ));
    }

    #[test]
    fn test_frozen_bootstrap_serves_indicated_variants() {
        let config = TypeConfiguration::bootstrap(&TypeSettings::default()).unwrap();
        assert!(config.is_frozen());
        let string = &config.standard().string;
        let indicators = ResolutionIndicators::new().with_lob(true).with_nationalized(true);
        let nclob = resolve_indicated_type(string, &indicators, None, &config).unwrap();
        assert_eq!(nclob.sql_type().code(), SqlTypeCode::NCLOB);
        assert_eq!(nclob.name(), Some("materialized-nclob"));
    }

    #[test]
    fn test_unfrozen_when_requested() {
        let settings = TypeSettings {
            freeze_after_bootstrap: false,
            ..TypeSettings::default()
        };
        let config = TypeConfiguration::bootstrap(&settings).unwrap();
        assert!(!config.is_frozen());
    }
}

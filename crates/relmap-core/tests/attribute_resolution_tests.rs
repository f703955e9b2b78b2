#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;

use relmap_core::types::{
    resolve_attribute_type, AttributeTypeRequest, BasicType, DomainTypeId, ResolutionIndicators,
    SqlTypeCode, TemporalPrecision,
};
use relmap_core::RelmapError;

#[test]
fn test_default_lookup_by_class_name() {
    let config = common::config();
    for (id, expected) in [
        (DomainTypeId::Boolean, &config.standard().boolean),
        (DomainTypeId::String, &config.standard().string),
        (DomainTypeId::ByteArray, &config.standard().binary),
        (DomainTypeId::Instant, &config.standard().instant),
    ] {
        let request = AttributeTypeRequest::new("Person.attr", id);
        let resolved = resolve_attribute_type(&config, &request).unwrap();
        assert!(Arc::ptr_eq(&resolved, expected), "{}", id);
    }
}

#[test]
fn test_explicit_key_wins() {
    let config = common::config();
    let request = AttributeTypeRequest::new("Person.id", DomainTypeId::Uuid).with_key("uuid-binary");
    let resolved = resolve_attribute_type(&config, &request).unwrap();
    assert!(Arc::ptr_eq(&resolved, &config.standard().uuid_binary));
}

#[test]
fn test_unknown_key_fails() {
    let config = common::config();
    let request = AttributeTypeRequest::new("Person.salary", DomainTypeId::Double).with_key("money");
    assert_eq!(
        resolve_attribute_type(&config, &request).unwrap_err(),
        RelmapError::UnknownRegistrationKey {
            key: "money".into()
        }
    );
}

#[test]
fn test_char_array_lob_nationalized_reaches_nclob() {
    let config = common::config();
    let request = AttributeTypeRequest::new("Document.body", DomainTypeId::CharArray)
        .with_indicators(ResolutionIndicators::new().with_lob(true).with_nationalized(true));

    let resolved = resolve_attribute_type(&config, &request).unwrap();
    assert_eq!(resolved.domain_type().id(), DomainTypeId::CharArray);
    assert_eq!(resolved.sql_type().code(), SqlTypeCode::NCLOB);
}

#[test]
fn test_character_array_through_explicit_key_uses_singleton() {
    let config = common::config();
    let request = AttributeTypeRequest::new("Document.body", DomainTypeId::CharacterArray)
        .with_key("wrapper-characters")
        .with_indicators(ResolutionIndicators::new().with_lob(true).with_nationalized(true));

    let resolved = resolve_attribute_type(&config, &request).unwrap();
    assert!(Arc::ptr_eq(&resolved, &config.standard().character_array_nclob));
}

#[test]
fn test_global_nationalized_setting_applies() {
    let config = common::config_from_toml("nationalized_character_data = true");
    let request = AttributeTypeRequest::new("Person.name", DomainTypeId::String);

    let resolved = resolve_attribute_type(&config, &request).unwrap();
    assert_eq!(resolved.sql_type().code(), SqlTypeCode::NVARCHAR);
    assert_eq!(resolved.name(), Some("nstring"));
}

#[test]
fn test_frozen_configuration_serves_lob_variants() {
    let config = common::config_from_toml("");
    assert!(config.is_frozen());
    let request = AttributeTypeRequest::new("Person.photo", DomainTypeId::ByteArray)
        .with_indicators(ResolutionIndicators::new().with_lob(true));

    let resolved = resolve_attribute_type(&config, &request).unwrap();
    assert_eq!(resolved.sql_type().code(), SqlTypeCode::BLOB);
}

#[test]
fn test_temporal_precision_pass() {
    let config = common::config();
    let request = AttributeTypeRequest::new("Person.born", DomainTypeId::Timestamp)
        .with_indicators(ResolutionIndicators::new().with_temporal_precision(TemporalPrecision::Date));

    let resolved = resolve_attribute_type(&config, &request).unwrap();
    assert!(Arc::ptr_eq(&resolved, &config.standard().date));
}

#[test]
fn test_precision_on_non_temporal_fails() {
    let config = common::config();
    let request = AttributeTypeRequest::new("Person.age", DomainTypeId::Integer).with_indicators(
        ResolutionIndicators::new().with_temporal_precision(TemporalPrecision::Time),
    );
    assert!(matches!(
        resolve_attribute_type(&config, &request),
        Err(RelmapError::NotTemporal { .. })
    ));
}

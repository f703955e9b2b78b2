#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::sync::Arc;

use relmap_core::types::{
    resolve_indicated_type, BasicType, DomainTypeId, ResolutionIndicators, SqlTypeCode,
};

#[test]
fn test_binary_without_lob_is_unchanged() {
    let config = common::config();
    let binary = &config.standard().binary;
    let resolved =
        resolve_indicated_type(binary, &ResolutionIndicators::new(), None, &config).unwrap();
    assert!(Arc::ptr_eq(&resolved, binary));
}

#[test]
fn test_binary_lob_escalates_to_blob() {
    let config = common::config();
    let binary = &config.standard().binary;
    let indicators = ResolutionIndicators::new().with_lob(true);

    let resolved = resolve_indicated_type(binary, &indicators, None, &config).unwrap();
    assert_eq!(resolved.sql_type().code(), SqlTypeCode::BLOB);
    assert_eq!(resolved.domain_type().id(), DomainTypeId::ByteArray);

    let again = resolve_indicated_type(binary, &indicators, None, &config).unwrap();
    assert!(Arc::ptr_eq(&resolved, &again));
    // the "binary" key still belongs to the VARBINARY type
    assert!(Arc::ptr_eq(&config.basic_types().by_key("binary").unwrap(), binary));
}

#[test]
fn test_wrapper_binary_lob_escalates_to_blob() {
    let config = common::config();
    let indicators = ResolutionIndicators::new().with_lob(true);
    let resolved =
        resolve_indicated_type(&config.standard().wrapper_binary, &indicators, None, &config)
            .unwrap();
    assert_eq!(resolved.sql_type().code(), SqlTypeCode::BLOB);
    assert_eq!(resolved.domain_type().id(), DomainTypeId::ByteWrapperArray);
}

#[test]
fn test_char_array_nationalized_resolves_nclob_pair() {
    let config = common::config();
    let clob = &config.standard().character_array_clob;
    let char_array = config.domain_types().descriptor(DomainTypeId::CharArray).unwrap();
    let indicators = ResolutionIndicators::new().with_nationalized(true);

    let resolved = resolve_indicated_type(clob, &indicators, Some(&char_array), &config).unwrap();
    assert_eq!(resolved.sql_type().code(), SqlTypeCode::NCLOB);
    assert_eq!(resolved.domain_type().id(), DomainTypeId::CharArray);
    assert!(!Arc::ptr_eq(&resolved, &config.standard().character_array_nclob));
}

#[test]
fn test_char_array_not_nationalized_resolves_clob_pair() {
    let config = common::config();
    let clob = &config.standard().character_array_clob;
    let char_array = config.domain_types().descriptor(DomainTypeId::CharArray).unwrap();

    let resolved =
        resolve_indicated_type(clob, &ResolutionIndicators::new(), Some(&char_array), &config)
            .unwrap();
    assert_eq!(resolved.sql_type().code(), SqlTypeCode::CLOB);
    assert_eq!(resolved.domain_type().id(), DomainTypeId::CharArray);
    assert!(resolved.name().is_none());
}

#[test]
fn test_character_array_nationalized_returns_nclob_singleton() {
    let config = common::config();
    let clob = &config.standard().character_array_clob;
    let indicators = ResolutionIndicators::new().with_nationalized(true);

    let resolved = resolve_indicated_type(clob, &indicators, None, &config).unwrap();
    assert!(Arc::ptr_eq(&resolved, &config.standard().character_array_nclob));
    assert_eq!(resolved.sql_type().code(), SqlTypeCode::NCLOB);
}

#[test]
fn test_character_array_plain_is_unchanged() {
    let config = common::config();
    let clob = &config.standard().character_array_clob;
    let resolved = resolve_indicated_type(clob, &ResolutionIndicators::new(), None, &config).unwrap();
    assert!(Arc::ptr_eq(&resolved, clob));
}

#[test]
fn test_string_escalation_matrix() {
    let config = common::config();
    let string = &config.standard().string;
    let cases = [
        (false, false, SqlTypeCode::VARCHAR),
        (false, true, SqlTypeCode::NVARCHAR),
        (true, false, SqlTypeCode::CLOB),
        (true, true, SqlTypeCode::NCLOB),
    ];
    for (lob, nationalized, expected) in cases {
        let indicators = ResolutionIndicators::new()
            .with_lob(lob)
            .with_nationalized(nationalized);
        let resolved = resolve_indicated_type(string, &indicators, None, &config).unwrap();
        assert_eq!(
            resolved.sql_type().code(),
            expected,
            "lob={} nationalized={}",
            lob,
            nationalized
        );
    }
}

#[test]
fn test_wrapper_characters_lob_goes_through_clob_rules() {
    let config = common::config();
    let wrapper = &config.standard().wrapper_characters;

    let lob = ResolutionIndicators::new().with_lob(true);
    let resolved = resolve_indicated_type(wrapper, &lob, None, &config).unwrap();
    assert!(Arc::ptr_eq(&resolved, &config.standard().character_array_clob));

    let nlob = lob.with_nationalized(true);
    let resolved = resolve_indicated_type(wrapper, &nlob, None, &config).unwrap();
    assert!(Arc::ptr_eq(&resolved, &config.standard().character_array_nclob));
}

#[test]
fn test_non_adjustable_type_is_returned_as_is() {
    let config = common::config();
    let boolean = &config.standard().boolean;
    let indicators = ResolutionIndicators::new().with_lob(true).with_nationalized(true);
    let resolved = resolve_indicated_type(boolean, &indicators, None, &config).unwrap();
    assert!(Arc::ptr_eq(&resolved, boolean));
}

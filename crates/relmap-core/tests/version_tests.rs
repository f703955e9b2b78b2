#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use relmap_core::types::{BasicType, FixedClock, Value, VersionContext};
use relmap_core::RelmapError;

#[test]
fn test_timestamp_next_is_not_before_call_start() {
    let config = common::config();
    let version = config.standard().timestamp.as_version().unwrap();
    let ctx = VersionContext::new();

    let far_future = Value::Timestamp((Utc::now() + Duration::days(3650)).naive_utc());
    let long_ago = Value::Timestamp(
        Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0)
            .unwrap()
            .naive_utc(),
    );
    for current in [None, Some(&far_future), Some(&long_ago)] {
        let start = Utc::now().naive_utc();
        let next = version.next(current, &ctx).unwrap().unwrap();
        match next {
            Value::Timestamp(at) => assert!(at >= start, "{at} < {start}"),
            other => panic!("unexpected version value {other:?}"),
        }
    }
}

#[test]
fn test_timestamp_seed_uses_context_clock() {
    let config = common::config();
    let version = config.standard().timestamp.as_version().unwrap();
    let pinned = Utc.with_ymd_and_hms(2031, 3, 14, 15, 9, 26).unwrap();
    let ctx = VersionContext::with_clock(Arc::new(FixedClock(pinned)));

    assert_eq!(
        version.seed(&ctx).unwrap(),
        Some(Value::Timestamp(pinned.naive_utc()))
    );
}

#[test]
fn test_instant_next_is_now() {
    let config = common::config();
    let version = config.standard().instant.as_version().unwrap();
    let pinned = Utc.with_ymd_and_hms(2031, 3, 14, 15, 9, 26).unwrap();
    let ctx = VersionContext::with_clock(Arc::new(FixedClock(pinned)));

    let stale = Value::Instant(pinned - Duration::hours(1));
    assert_eq!(
        version.next(Some(&stale), &ctx).unwrap(),
        Some(Value::Instant(pinned))
    );
}

#[test]
fn test_integer_and_long_versions_count_up() {
    let config = common::config();
    let ctx = VersionContext::new();

    let integer = config.standard().integer.as_version().unwrap();
    assert_eq!(integer.seed(&ctx).unwrap(), Some(Value::Integer(0)));
    assert_eq!(
        integer.next(Some(&Value::Integer(41)), &ctx).unwrap(),
        Some(Value::Integer(42))
    );

    let long = config.standard().long.as_version().unwrap();
    assert_eq!(long.seed(&ctx).unwrap(), Some(Value::Long(0)));
    assert_eq!(
        long.next(Some(&Value::Long(9)), &ctx).unwrap(),
        Some(Value::Long(10))
    );
    assert!(matches!(
        long.next(None, &ctx),
        Err(RelmapError::InvalidVersionValue { .. })
    ));
}

#[test]
fn test_binary_version_is_database_generated() {
    let config = common::config();
    let version = config.standard().binary.as_version().unwrap();
    let ctx = VersionContext::new();

    assert_eq!(version.seed(&ctx).unwrap(), None);
    let current = Value::Bytes(vec![0, 0, 0, 7]);
    assert_eq!(version.next(Some(&current), &ctx).unwrap(), Some(current.clone()));
    assert_eq!(version.next(None, &ctx).unwrap(), None);
}

#[test]
fn test_version_compare_orders_values() {
    let config = common::config();
    let version = config.standard().long.as_version().unwrap();
    assert_eq!(
        version.compare(&Value::Long(1), &Value::Long(2)),
        Some(Ordering::Less)
    );
    assert_eq!(version.compare(&Value::Long(1), &Value::Integer(1)), None);
}

#[test]
fn test_non_version_types() {
    let config = common::config();
    assert!(config.standard().string.as_version().is_none());
    assert!(config.standard().date.as_version().is_none());
    assert!(config.standard().character_array_clob.as_version().is_none());
}

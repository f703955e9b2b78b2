//! Temporal basic types and precision resolution

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::basic_type::{BasicType, BasicTypeRef, Resolution, TypeDescriptors};
use super::configuration::TypeConfiguration;
use super::domain_registry::DomainTypeRegistry;
use super::domain_type::DomainTypeId;
use super::sql_registry::SqlTypeRegistry;
use super::sql_type::SqlTypeCode;
use super::value::Value;
use super::version::{VersionContext, VersionType};
use crate::errors::{RelmapError, Result};

/// Requested precision of a temporal attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalPrecision {
    Date,
    Time,
    Timestamp,
}

impl TemporalPrecision {
    pub fn as_str(self) -> &'static str {
        match self {
            TemporalPrecision::Date => "DATE",
            TemporalPrecision::Time => "TIME",
            TemporalPrecision::Timestamp => "TIMESTAMP",
        }
    }
}

impl fmt::Display for TemporalPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemporalPrecision {
    type Err = RelmapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DATE" => Ok(TemporalPrecision::Date),
            "TIME" => Ok(TemporalPrecision::Time),
            "TIMESTAMP" => Ok(TemporalPrecision::Timestamp),
            _ => Err(RelmapError::UnsupportedTemporalPrecision {
                target: "temporal attribute".to_string(),
                precision: s.trim().to_string(),
            }),
        }
    }
}

pub trait TemporalType: Send + Sync {
    fn native_precision(&self) -> TemporalPrecision;

    /// Select the type matching `requested`
    ///
    /// # Errors
    ///
    /// `UnsupportedTemporalPrecision` when this type cannot represent the
    /// requested precision.
    fn resolve_temporal_precision(
        &self,
        requested: TemporalPrecision,
        config: &TypeConfiguration,
    ) -> Result<Resolution>;
}

/// Run the temporal precision pass over `base`
///
/// # Errors
///
/// `NotTemporal` if `base` has no temporal capability, otherwise whatever
/// the type's own resolution returns.
pub fn resolve_temporal_precision(
    base: &BasicTypeRef,
    requested: TemporalPrecision,
    config: &TypeConfiguration,
) -> Result<BasicTypeRef> {
    let temporal = base.as_temporal().ok_or_else(|| RelmapError::NotTemporal {
        type_name: base.display_name(),
    })?;
    Ok(temporal
        .resolve_temporal_precision(requested, config)?
        .or_base(base))
}

/// Shared rule for the three naive temporal types
fn select_precision(
    native: TemporalPrecision,
    requested: TemporalPrecision,
    config: &TypeConfiguration,
) -> Resolution {
    if native == requested {
        return Resolution::Unchanged;
    }
    let standard = config.standard();
    let selected = match requested {
        TemporalPrecision::Date => &standard.date,
        TemporalPrecision::Time => &standard.time,
        TemporalPrecision::Timestamp => &standard.timestamp,
    };
    Resolution::Adjusted(Arc::clone(selected))
}

fn now_version(ctx: &VersionContext) -> Value {
    Value::Timestamp(ctx.now().naive_utc())
}

macro_rules! naive_temporal_type {
    ($(#[$meta:meta])* $ty:ident, $domain:expr, $code:expr, $precision:expr) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $ty {
            descriptors: TypeDescriptors,
        }

        impl $ty {
            /// # Errors
            ///
            /// Fails if either descriptor is missing from the registries.
            pub fn new(
                domain_types: &DomainTypeRegistry,
                sql_types: &SqlTypeRegistry,
            ) -> Result<Self> {
                Ok(Self {
                    descriptors: TypeDescriptors::lookup(domain_types, sql_types, $domain, $code)?,
                })
            }
        }

        impl TemporalType for $ty {
            fn native_precision(&self) -> TemporalPrecision {
                $precision
            }

            fn resolve_temporal_precision(
                &self,
                requested: TemporalPrecision,
                config: &TypeConfiguration,
            ) -> Result<Resolution> {
                Ok(select_precision($precision, requested, config))
            }
        }
    };
}

naive_temporal_type!(
    /// `chrono::NaiveDate` over DATE
    DateType,
    DomainTypeId::Date,
    SqlTypeCode::DATE,
    TemporalPrecision::Date
);

naive_temporal_type!(
    /// `chrono::NaiveTime` over TIME
    TimeType,
    DomainTypeId::Time,
    SqlTypeCode::TIME,
    TemporalPrecision::Time
);

naive_temporal_type!(
    /// `chrono::NaiveDateTime` over TIMESTAMP
    TimestampType,
    DomainTypeId::Timestamp,
    SqlTypeCode::TIMESTAMP,
    TemporalPrecision::Timestamp
);

impl BasicType for DateType {
    fn name(&self) -> Option<&str> {
        Some("date")
    }

    fn descriptors(&self) -> &TypeDescriptors {
        &self.descriptors
    }

    fn registration_keys(&self) -> Vec<String> {
        vec!["date".to_string(), DomainTypeId::Date.class_name().to_string()]
    }

    fn as_temporal(&self) -> Option<&dyn TemporalType> {
        Some(self)
    }
}

impl BasicType for TimeType {
    fn name(&self) -> Option<&str> {
        Some("time")
    }

    fn descriptors(&self) -> &TypeDescriptors {
        &self.descriptors
    }

    fn registration_keys(&self) -> Vec<String> {
        vec!["time".to_string(), DomainTypeId::Time.class_name().to_string()]
    }

    fn as_temporal(&self) -> Option<&dyn TemporalType> {
        Some(self)
    }
}

impl BasicType for TimestampType {
    fn name(&self) -> Option<&str> {
        Some("timestamp")
    }

    fn descriptors(&self) -> &TypeDescriptors {
        &self.descriptors
    }

    fn registration_keys(&self) -> Vec<String> {
        vec![
            "timestamp".to_string(),
            DomainTypeId::Timestamp.class_name().to_string(),
        ]
    }

    fn as_temporal(&self) -> Option<&dyn TemporalType> {
        Some(self)
    }

    fn as_version(&self) -> Option<&dyn VersionType> {
        Some(self)
    }
}

/// The version is always "now"; `current` plays no part in `next`.
impl VersionType for TimestampType {
    fn seed(&self, ctx: &VersionContext) -> Result<Option<Value>> {
        Ok(Some(now_version(ctx)))
    }

    fn next(&self, _current: Option<&Value>, ctx: &VersionContext) -> Result<Option<Value>> {
        self.seed(ctx)
    }

    fn compare(&self, a: &Value, b: &Value) -> Option<Ordering> {
        self.descriptors.domain.compare(a, b)
    }
}

/// `chrono::DateTime<Utc>` over TIMESTAMP_WITH_TIMEZONE
#[derive(Debug)]
pub struct InstantType {
    descriptors: TypeDescriptors,
}

impl InstantType {
    /// # Errors
    ///
    /// Fails if either descriptor is missing from the registries.
    pub fn new(domain_types: &DomainTypeRegistry, sql_types: &SqlTypeRegistry) -> Result<Self> {
        Ok(Self {
            descriptors: TypeDescriptors::lookup(
                domain_types,
                sql_types,
                DomainTypeId::Instant,
                SqlTypeCode::TIMESTAMP_WITH_TIMEZONE,
            )?,
        })
    }
}

impl BasicType for InstantType {
    fn name(&self) -> Option<&str> {
        Some("instant")
    }

    fn descriptors(&self) -> &TypeDescriptors {
        &self.descriptors
    }

    fn registration_keys(&self) -> Vec<String> {
        vec!["instant".to_string(), DomainTypeId::Instant.class_name().to_string()]
    }

    fn as_temporal(&self) -> Option<&dyn TemporalType> {
        Some(self)
    }

    fn as_version(&self) -> Option<&dyn VersionType> {
        Some(self)
    }
}

impl TemporalType for InstantType {
    fn native_precision(&self) -> TemporalPrecision {
        TemporalPrecision::Timestamp
    }

    fn resolve_temporal_precision(
        &self,
        requested: TemporalPrecision,
        _config: &TypeConfiguration,
    ) -> Result<Resolution> {
        match requested {
            TemporalPrecision::Timestamp => Ok(Resolution::Unchanged),
            other => Err(RelmapError::UnsupportedTemporalPrecision {
                target: DomainTypeId::Instant.class_name().to_string(),
                precision: other.to_string(),
            }),
        }
    }
}

impl VersionType for InstantType {
    fn seed(&self, ctx: &VersionContext) -> Result<Option<Value>> {
        Ok(Some(Value::Instant(ctx.now())))
    }

    fn next(&self, _current: Option<&Value>, ctx: &VersionContext) -> Result<Option<Value>> {
        self.seed(ctx)
    }

    fn compare(&self, a: &Value, b: &Value) -> Option<Ordering> {
        self.descriptors.domain.compare(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::version::FixedClock;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_precision_parse_is_case_insensitive() {
        assert_eq!("date".parse::<TemporalPrecision>().unwrap(), TemporalPrecision::Date);
        assert_eq!(
            " Timestamp ".parse::<TemporalPrecision>().unwrap(),
            TemporalPrecision::Timestamp
        );
    }

    #[test]
    fn test_unknown_precision_is_named_in_error() {
        let err = "MINUTE".parse::<TemporalPrecision>().unwrap_err();
        assert!(err.to_string().contains("`MINUTE`"));
        assert!(matches!(err, RelmapError::UnsupportedTemporalPrecision { .. }));
    }

    #[test]
    fn test_timestamp_next_ignores_current() {
        let ty = TimestampType::new(
            &DomainTypeRegistry::with_standard_types(),
            &SqlTypeRegistry::with_standard_types(),
        )
        .unwrap();
        let instant = Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap();
        let ctx = VersionContext::with_clock(Arc::new(FixedClock(instant)));
        let stale = Value::Timestamp(
            Utc.with_ymd_and_hms(1999, 1, 1, 0, 0, 0)
                .unwrap()
                .naive_utc(),
        );
        let expected = Some(Value::Timestamp(instant.naive_utc()));
        assert_eq!(ty.next(Some(&stale), &ctx).unwrap(), expected);
        assert_eq!(ty.next(None, &ctx).unwrap(), expected);
    }
}

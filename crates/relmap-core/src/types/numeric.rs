//! Scalar basic types: booleans, numbers and UUIDs

use std::cmp::Ordering;

use super::basic_type::{BasicType, TypeDescriptors};
use super::domain_registry::DomainTypeRegistry;
use super::domain_type::DomainTypeId;
use super::sql_registry::SqlTypeRegistry;
use super::sql_type::SqlTypeCode;
use super::value::Value;
use super::version::{VersionContext, VersionType};
use crate::errors::{RelmapError, Result};

/// Declares a basic type over a fixed descriptor pair, optionally versioned
macro_rules! scalar_type {
    (@version true) => {
        fn as_version(&self) -> Option<&dyn VersionType> {
            Some(self)
        }
    };
    (@version false) => {};
    (
        $(#[$meta:meta])* $ty:ident, $name:literal, $domain:expr, $code:expr,
        class_key = $class_key:literal, version = $version:tt
    ) => {
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

        impl BasicType for $ty {
            fn name(&self) -> Option<&str> {
                Some($name)
            }

            fn descriptors(&self) -> &TypeDescriptors {
                &self.descriptors
            }

            fn registration_keys(&self) -> Vec<String> {
                let mut keys = vec![$name.to_string()];
                if $class_key {
                    keys.push($domain.class_name().to_string());
                }
                keys
            }

            scalar_type!(@version $version);
        }
    };
}

scalar_type!(
    /// `bool` over BOOLEAN
    BooleanType,
    "boolean",
    DomainTypeId::Boolean,
    SqlTypeCode::BOOLEAN,
    class_key = true,
    version = false
);

scalar_type!(
    /// `i32` over INTEGER
    IntegerType,
    "integer",
    DomainTypeId::Integer,
    SqlTypeCode::INTEGER,
    class_key = true,
    version = true
);

scalar_type!(
    /// `i64` over BIGINT
    LongType,
    "long",
    DomainTypeId::Long,
    SqlTypeCode::BIGINT,
    class_key = true,
    version = true
);

scalar_type!(
    /// `f64` over DOUBLE
    DoubleType,
    "double",
    DomainTypeId::Double,
    SqlTypeCode::DOUBLE,
    class_key = true,
    version = false
);

scalar_type!(
    /// `uuid::Uuid` stored as its hyphenated text form
    UuidCharType,
    "uuid-char",
    DomainTypeId::Uuid,
    SqlTypeCode::VARCHAR,
    class_key = true,
    version = false
);

scalar_type!(
    /// `uuid::Uuid` stored as 16 raw bytes
    UuidBinaryType,
    "uuid-binary",
    DomainTypeId::Uuid,
    SqlTypeCode::BINARY,
    class_key = false,
    version = false
);

fn invalid_version(type_name: &str, reason: impl Into<String>) -> RelmapError {
    RelmapError::InvalidVersionValue {
        type_name: type_name.to_string(),
        reason: reason.into(),
    }
}

impl VersionType for IntegerType {
    fn seed(&self, _ctx: &VersionContext) -> Result<Option<Value>> {
        Ok(Some(Value::Integer(0)))
    }

    fn next(&self, current: Option<&Value>, _ctx: &VersionContext) -> Result<Option<Value>> {
        match current {
            Some(Value::Integer(n)) => n
                .checked_add(1)
                .map(|n| Some(Value::Integer(n)))
                .ok_or_else(|| invalid_version("integer", "version overflowed i32")),
            Some(other) => Err(invalid_version(
                "integer",
                format!("expected i32, found {}", other.domain_type()),
            )),
            None => Err(invalid_version("integer", "no current version to increment")),
        }
    }

    fn compare(&self, a: &Value, b: &Value) -> Option<Ordering> {
        self.descriptors.domain.compare(a, b)
    }
}

impl VersionType for LongType {
    fn seed(&self, _ctx: &VersionContext) -> Result<Option<Value>> {
        Ok(Some(Value::Long(0)))
    }

    fn next(&self, current: Option<&Value>, _ctx: &VersionContext) -> Result<Option<Value>> {
        match current {
            Some(Value::Long(n)) => n
                .checked_add(1)
                .map(|n| Some(Value::Long(n)))
                .ok_or_else(|| invalid_version("long", "version overflowed i64")),
            Some(other) => Err(invalid_version(
                "long",
                format!("expected i64, found {}", other.domain_type()),
            )),
            None => Err(invalid_version("long", "no current version to increment")),
        }
    }

    fn compare(&self, a: &Value, b: &Value) -> Option<Ordering> {
        self.descriptors.domain.compare(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registries() -> (DomainTypeRegistry, SqlTypeRegistry) {
        (
            DomainTypeRegistry::with_standard_types(),
            SqlTypeRegistry::with_standard_types(),
        )
    }

    #[test]
    fn test_integer_version_increments() {
        let (domain, sql) = registries();
        let ty = IntegerType::new(&domain, &sql).unwrap();
        let ctx = VersionContext::default();
        assert_eq!(ty.seed(&ctx).unwrap(), Some(Value::Integer(0)));
        assert_eq!(
            ty.next(Some(&Value::Integer(41)), &ctx).unwrap(),
            Some(Value::Integer(42))
        );
    }

    #[test]
    fn test_long_version_rejects_foreign_current() {
        let (domain, sql) = registries();
        let ty = LongType::new(&domain, &sql).unwrap();
        let ctx = VersionContext::default();
        assert!(matches!(
            ty.next(Some(&Value::String("7".into())), &ctx),
            Err(RelmapError::InvalidVersionValue { .. })
        ));
        assert!(matches!(
            ty.next(None, &ctx),
            Err(RelmapError::InvalidVersionValue { .. })
        ));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let (domain, sql) = registries();
        let ty = IntegerType::new(&domain, &sql).unwrap();
        assert!(ty
            .next(Some(&Value::Integer(i32::MAX)), &VersionContext::default())
            .is_err());
    }

    #[test]
    fn test_uuid_binary_has_name_key_only() {
        let (domain, sql) = registries();
        let ty = UuidBinaryType::new(&domain, &sql).unwrap();
        assert_eq!(ty.registration_keys(), vec!["uuid-binary"]);
        assert!(ty.as_version().is_none());
    }

    #[test]
    fn test_only_counters_are_versioned() {
        let (domain, sql) = registries();
        assert!(IntegerType::new(&domain, &sql).unwrap().as_version().is_some());
        assert!(LongType::new(&domain, &sql).unwrap().as_version().is_some());
        assert!(BooleanType::new(&domain, &sql).unwrap().as_version().is_none());
        assert!(DoubleType::new(&domain, &sql).unwrap().as_version().is_none());
        assert!(UuidCharType::new(&domain, &sql).unwrap().as_version().is_none());
    }
}

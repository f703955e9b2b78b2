//! Domain value type descriptors
//!
//! A `DomainTypeDescriptor` knows how values of one domain type compare,
//! render to and parse from strings, and convert to or from each column
//! representation.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::indicators::ResolutionIndicators;
use super::sql_type::{ColumnRepr, SqlTypeCode};
use super::value::{ColumnValue, Value};
use crate::errors::{RelmapError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
const TIMESTAMP_FORMAT_ISO: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Identity of a domain value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DomainTypeId {
    Boolean,
    Integer,
    Long,
    Double,
    String,
    /// `Vec<char>`
    CharArray,
    /// `Vec<Option<char>>`
    CharacterArray,
    /// `Vec<u8>`
    ByteArray,
    /// `Vec<Option<u8>>`
    ByteWrapperArray,
    Date,
    Time,
    Timestamp,
    Instant,
    Uuid,
}

impl DomainTypeId {
    pub const ALL: [DomainTypeId; 14] = [
        DomainTypeId::Boolean,
        DomainTypeId::Integer,
        DomainTypeId::Long,
        DomainTypeId::Double,
        DomainTypeId::String,
        DomainTypeId::CharArray,
        DomainTypeId::CharacterArray,
        DomainTypeId::ByteArray,
        DomainTypeId::ByteWrapperArray,
        DomainTypeId::Date,
        DomainTypeId::Time,
        DomainTypeId::Timestamp,
        DomainTypeId::Instant,
        DomainTypeId::Uuid,
    ];

    /// Rust type name; doubles as the annotation-free registration key
    pub fn class_name(self) -> &'static str {
        match self {
            DomainTypeId::Boolean => "bool",
            DomainTypeId::Integer => "i32",
            DomainTypeId::Long => "i64",
            DomainTypeId::Double => "f64",
            DomainTypeId::String => "String",
            DomainTypeId::CharArray => "Vec<char>",
            DomainTypeId::CharacterArray => "Vec<Option<char>>",
            DomainTypeId::ByteArray => "Vec<u8>",
            DomainTypeId::ByteWrapperArray => "Vec<Option<u8>>",
            DomainTypeId::Date => "chrono::NaiveDate",
            DomainTypeId::Time => "chrono::NaiveTime",
            DomainTypeId::Timestamp => "chrono::NaiveDateTime",
            DomainTypeId::Instant => "chrono::DateTime<Utc>",
            DomainTypeId::Uuid => "uuid::Uuid",
        }
    }
}

impl fmt::Display for DomainTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

impl FromStr for DomainTypeId {
    type Err = RelmapError;

    /// Accepts the class name (`Vec<char>`) or the variant name (`CharArray`)
    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        DomainTypeId::ALL
            .iter()
            .copied()
            .find(|id| {
                id.class_name() == needle || format!("{:?}", id).eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| RelmapError::UnknownDomainType {
                name: needle.to_string(),
            })
    }
}

/// Comparison, string conversion and marshaling rules for one domain type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainTypeDescriptor {
    id: DomainTypeId,
}

impl DomainTypeDescriptor {
    pub fn new(id: DomainTypeId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> DomainTypeId {
        self.id
    }

    pub fn class_name(&self) -> &'static str {
        self.id.class_name()
    }

    /// SQL type to use when nothing more specific is registered
    pub fn recommended_sql_code(&self, indicators: &ResolutionIndicators) -> SqlTypeCode {
        let character = |lob: bool, nationalized: bool| match (lob, nationalized) {
            (true, true) => SqlTypeCode::NCLOB,
            (true, false) => SqlTypeCode::CLOB,
            (false, true) => SqlTypeCode::NVARCHAR,
            (false, false) => SqlTypeCode::VARCHAR,
        };
        match self.id {
            DomainTypeId::Boolean => SqlTypeCode::BOOLEAN,
            DomainTypeId::Integer => SqlTypeCode::INTEGER,
            DomainTypeId::Long => SqlTypeCode::BIGINT,
            DomainTypeId::Double => SqlTypeCode::DOUBLE,
            DomainTypeId::String | DomainTypeId::CharArray | DomainTypeId::CharacterArray => {
                character(indicators.lob, indicators.nationalized)
            }
            DomainTypeId::Uuid => character(false, indicators.nationalized),
            DomainTypeId::ByteArray | DomainTypeId::ByteWrapperArray => {
                if indicators.lob {
                    SqlTypeCode::BLOB
                } else {
                    SqlTypeCode::VARBINARY
                }
            }
            DomainTypeId::Date => SqlTypeCode::DATE,
            DomainTypeId::Time => SqlTypeCode::TIME,
            DomainTypeId::Timestamp => SqlTypeCode::TIMESTAMP,
            DomainTypeId::Instant => SqlTypeCode::TIMESTAMP_WITH_TIMEZONE,
        }
    }

    /// Order two values of this type; `None` if either belongs elsewhere
    pub fn compare(&self, a: &Value, b: &Value) -> Option<Ordering> {
        if a.domain_type() != self.id || b.domain_type() != self.id {
            return None;
        }
        match (a, b) {
            (Value::Boolean(x), Value::Boolean(y)) => Some(x.cmp(y)),
            (Value::Integer(x), Value::Integer(y)) => Some(x.cmp(y)),
            (Value::Long(x), Value::Long(y)) => Some(x.cmp(y)),
            (Value::Double(x), Value::Double(y)) => x.partial_cmp(y),
            (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
            (Value::Chars(x), Value::Chars(y)) => Some(x.cmp(y)),
            (Value::NullableChars(x), Value::NullableChars(y)) => Some(x.cmp(y)),
            (Value::Bytes(x), Value::Bytes(y)) => Some(x.cmp(y)),
            (Value::NullableBytes(x), Value::NullableBytes(y)) => Some(x.cmp(y)),
            (Value::Date(x), Value::Date(y)) => Some(x.cmp(y)),
            (Value::Time(x), Value::Time(y)) => Some(x.cmp(y)),
            (Value::Timestamp(x), Value::Timestamp(y)) => Some(x.cmp(y)),
            (Value::Instant(x), Value::Instant(y)) => Some(x.cmp(y)),
            (Value::Uuid(x), Value::Uuid(y)) => Some(x.cmp(y)),
            _ => None,
        }
    }

    pub fn are_equal(&self, a: &Value, b: &Value) -> bool {
        self.compare(a, b) == Some(Ordering::Equal)
    }

    /// Render a value in its canonical string form
    ///
    /// # Errors
    ///
    /// `BindMismatch` if the value is of another domain type or is an
    /// array with an absent element.
    pub fn to_string(&self, value: &Value) -> Result<String> {
        if value.domain_type() != self.id {
            return Err(self.bind_mismatch("string"));
        }
        let rendered = match value {
            Value::Boolean(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Long(l) => l.to_string(),
            Value::Double(d) => d.to_string(),
            Value::String(s) => s.clone(),
            Value::Chars(c) => c.iter().collect(),
            Value::NullableChars(c) => c
                .iter()
                .copied()
                .collect::<Option<String>>()
                .ok_or_else(|| self.bind_mismatch("string"))?,
            Value::Bytes(b) => hex::encode(b),
            Value::NullableBytes(b) => hex::encode(
                b.iter()
                    .copied()
                    .collect::<Option<Vec<u8>>>()
                    .ok_or_else(|| self.bind_mismatch("string"))?,
            ),
            Value::Date(d) => d.format(DATE_FORMAT).to_string(),
            Value::Time(t) => t.format(TIME_FORMAT).to_string(),
            Value::Timestamp(ts) => ts.format(TIMESTAMP_FORMAT).to_string(),
            Value::Instant(i) => i.to_rfc3339(),
            Value::Uuid(u) => u.hyphenated().to_string(),
        };
        Ok(rendered)
    }

    /// Parse the canonical string form of a value
    ///
    /// # Errors
    ///
    /// `ValueParse` naming the input and the reason it was rejected.
    pub fn from_string(&self, input: &str) -> Result<Value> {
        let parse_err = |reason: String| RelmapError::ValueParse {
            domain: self.class_name().to_string(),
            input: input.to_string(),
            reason,
        };
        let value = match self.id {
            DomainTypeId::Boolean => match input.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "y" => Value::Boolean(true),
                "false" | "0" | "n" => Value::Boolean(false),
                other => return Err(parse_err(format!("`{}` is not a boolean", other))),
            },
            DomainTypeId::Integer => Value::Integer(
                input.trim().parse().map_err(|e| parse_err(format!("{}", e)))?,
            ),
            DomainTypeId::Long => {
                Value::Long(input.trim().parse().map_err(|e| parse_err(format!("{}", e)))?)
            }
            DomainTypeId::Double => {
                Value::Double(input.trim().parse().map_err(|e| parse_err(format!("{}", e)))?)
            }
            DomainTypeId::String => Value::String(input.to_string()),
            DomainTypeId::CharArray => Value::Chars(input.chars().collect()),
            DomainTypeId::CharacterArray => Value::NullableChars(input.chars().map(Some).collect()),
            DomainTypeId::ByteArray => {
                Value::Bytes(hex::decode(input.trim()).map_err(|e| parse_err(e.to_string()))?)
            }
            DomainTypeId::ByteWrapperArray => Value::NullableBytes(
                hex::decode(input.trim())
                    .map_err(|e| parse_err(e.to_string()))?
                    .into_iter()
                    .map(Some)
                    .collect(),
            ),
            DomainTypeId::Date => Value::Date(
                NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
                    .map_err(|e| parse_err(e.to_string()))?,
            ),
            DomainTypeId::Time => Value::Time(
                NaiveTime::parse_from_str(input.trim(), TIME_FORMAT)
                    .map_err(|e| parse_err(e.to_string()))?,
            ),
            DomainTypeId::Timestamp => {
                let trimmed = input.trim();
                let parsed = NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
                    .or_else(|_| NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT_ISO))
                    .map_err(|e| parse_err(e.to_string()))?;
                Value::Timestamp(parsed)
            }
            DomainTypeId::Instant => Value::Instant(
                DateTime::parse_from_rfc3339(input.trim())
                    .map_err(|e| parse_err(e.to_string()))?
                    .with_timezone(&Utc),
            ),
            DomainTypeId::Uuid => {
                Value::Uuid(Uuid::parse_str(input.trim()).map_err(|e| parse_err(e.to_string()))?)
            }
        };
        Ok(value)
    }

    /// Convert a domain value into the requested column representation
    ///
    /// # Errors
    ///
    /// `BindMismatch` when this type has no conversion to `repr`, the value
    /// belongs to another domain type, or a nullable array holds an absent
    /// element.
    pub fn unwrap(&self, value: &Value, repr: ColumnRepr) -> Result<ColumnValue> {
        if value.domain_type() != self.id {
            return Err(self.bind_mismatch(repr));
        }
        let bound = match (value, repr) {
            (Value::Boolean(b), ColumnRepr::Boolean) => Some(ColumnValue::Boolean(*b)),
            (Value::Boolean(b), ColumnRepr::Integer) => Some(ColumnValue::Integer(i32::from(*b))),
            (Value::Boolean(b), ColumnRepr::BigInt) => Some(ColumnValue::BigInt(i64::from(*b))),
            (Value::Integer(i), ColumnRepr::Integer) => Some(ColumnValue::Integer(*i)),
            (Value::Integer(i), ColumnRepr::BigInt) => Some(ColumnValue::BigInt(i64::from(*i))),
            (Value::Integer(i), ColumnRepr::Double) => Some(ColumnValue::Double(f64::from(*i))),
            (Value::Integer(i), ColumnRepr::Decimal) => Some(ColumnValue::Decimal(i.to_string())),
            (Value::Long(l), ColumnRepr::BigInt) => Some(ColumnValue::BigInt(*l)),
            (Value::Long(l), ColumnRepr::Integer) => i32::try_from(*l).ok().map(ColumnValue::Integer),
            (Value::Long(l), ColumnRepr::Decimal) => Some(ColumnValue::Decimal(l.to_string())),
            (Value::Double(d), ColumnRepr::Double) => Some(ColumnValue::Double(*d)),
            (Value::Double(d), ColumnRepr::Decimal) => Some(ColumnValue::Decimal(d.to_string())),
            (Value::String(s), r) if r.is_character() => ColumnValue::text(r, s.clone()),
            (Value::Chars(c), r) if r.is_character() => ColumnValue::text(r, c.iter().collect()),
            (Value::NullableChars(c), r) if r.is_character() => c
                .iter()
                .copied()
                .collect::<Option<String>>()
                .and_then(|s| ColumnValue::text(r, s)),
            (Value::Bytes(b), r) => ColumnValue::binary(r, b.clone()),
            (Value::NullableBytes(b), r) => b
                .iter()
                .copied()
                .collect::<Option<Vec<u8>>>()
                .and_then(|b| ColumnValue::binary(r, b)),
            (Value::Date(d), ColumnRepr::Date) => Some(ColumnValue::Date(*d)),
            (Value::Date(d), ColumnRepr::Timestamp) => {
                d.and_hms_opt(0, 0, 0).map(ColumnValue::Timestamp)
            }
            (Value::Time(t), ColumnRepr::Time) => Some(ColumnValue::Time(*t)),
            (Value::Timestamp(ts), ColumnRepr::Timestamp) => Some(ColumnValue::Timestamp(*ts)),
            (Value::Timestamp(ts), ColumnRepr::Date) => Some(ColumnValue::Date(ts.date())),
            (Value::Timestamp(ts), ColumnRepr::Time) => Some(ColumnValue::Time(ts.time())),
            (Value::Timestamp(ts), ColumnRepr::TimestampTz) => {
                Some(ColumnValue::TimestampTz(ts.and_utc()))
            }
            (Value::Instant(i), ColumnRepr::TimestampTz) => Some(ColumnValue::TimestampTz(*i)),
            (Value::Instant(i), ColumnRepr::Timestamp) => {
                Some(ColumnValue::Timestamp(i.naive_utc()))
            }
            (Value::Uuid(u), ColumnRepr::Binary) => {
                Some(ColumnValue::Binary(u.as_bytes().to_vec()))
            }
            (other, r) if r.is_character() => ColumnValue::text(r, self.to_string(other)?),
            _ => None,
        };
        bound.ok_or_else(|| self.bind_mismatch(repr))
    }

    /// Convert an extracted column value into this domain type
    ///
    /// # Errors
    ///
    /// `ExtractMismatch` when the column value has no conversion, or
    /// `ValueParse` when text content does not parse.
    pub fn wrap(&self, column: &ColumnValue) -> Result<Value> {
        use ColumnValue as C;
        let wrapped = match (self.id, column) {
            (DomainTypeId::Boolean, C::Boolean(b)) => Some(Value::Boolean(*b)),
            (DomainTypeId::Boolean, C::Integer(i)) => Some(Value::Boolean(*i != 0)),
            (DomainTypeId::Boolean, C::BigInt(i)) => Some(Value::Boolean(*i != 0)),
            (DomainTypeId::Integer, C::Integer(i)) => Some(Value::Integer(*i)),
            (DomainTypeId::Integer, C::BigInt(l)) => i32::try_from(*l).ok().map(Value::Integer),
            (DomainTypeId::Long, C::BigInt(l)) => Some(Value::Long(*l)),
            (DomainTypeId::Long, C::Integer(i)) => Some(Value::Long(i64::from(*i))),
            (DomainTypeId::Double, C::Double(d)) => Some(Value::Double(*d)),
            (DomainTypeId::Double, C::Integer(i)) => Some(Value::Double(f64::from(*i))),
            (DomainTypeId::String, c) => c.as_text().map(|s| Value::String(s.to_string())),
            (DomainTypeId::CharArray, c) => c.as_text().map(|s| Value::Chars(s.chars().collect())),
            (DomainTypeId::CharacterArray, c) => c
                .as_text()
                .map(|s| Value::NullableChars(s.chars().map(Some).collect())),
            (DomainTypeId::ByteArray, c) => c.as_bytes().map(|b| Value::Bytes(b.to_vec())),
            (DomainTypeId::ByteWrapperArray, c) => c
                .as_bytes()
                .map(|b| Value::NullableBytes(b.iter().copied().map(Some).collect())),
            (DomainTypeId::Date, C::Date(d)) => Some(Value::Date(*d)),
            (DomainTypeId::Date, C::Timestamp(ts)) => Some(Value::Date(ts.date())),
            (DomainTypeId::Time, C::Time(t)) => Some(Value::Time(*t)),
            (DomainTypeId::Time, C::Timestamp(ts)) => Some(Value::Time(ts.time())),
            (DomainTypeId::Timestamp, C::Timestamp(ts)) => Some(Value::Timestamp(*ts)),
            (DomainTypeId::Timestamp, C::Date(d)) => d.and_hms_opt(0, 0, 0).map(Value::Timestamp),
            (DomainTypeId::Timestamp, C::TimestampTz(i)) => Some(Value::Timestamp(i.naive_utc())),
            (DomainTypeId::Instant, C::TimestampTz(i)) => Some(Value::Instant(*i)),
            (DomainTypeId::Instant, C::Timestamp(ts)) => Some(Value::Instant(ts.and_utc())),
            (DomainTypeId::Uuid, C::Binary(b)) => Uuid::from_slice(b).ok().map(Value::Uuid),
            (_, c) => match c.as_text() {
                Some(text) => Some(self.from_string(text)?),
                None => None,
            },
        };
        wrapped.ok_or_else(|| RelmapError::ExtractMismatch {
            domain: self.class_name().to_string(),
            column: column
                .repr()
                .map(|r| r.to_string())
                .unwrap_or_else(|| "null".to_string()),
        })
    }

    fn bind_mismatch(&self, column: impl fmt::Display) -> RelmapError {
        RelmapError::BindMismatch {
            domain: self.class_name().to_string(),
            column: column.to_string(),
        }
    }
}

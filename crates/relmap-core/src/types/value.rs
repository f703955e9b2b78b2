//! In-memory domain values and their column-side counterparts

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain_type::DomainTypeId;
use super::sql_type::ColumnRepr;

/// A domain attribute value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Double(f64),
    String(String),
    Chars(Vec<char>),
    /// Character array whose elements may individually be absent
    NullableChars(Vec<Option<char>>),
    Bytes(Vec<u8>),
    /// Byte array whose elements may individually be absent
    NullableBytes(Vec<Option<u8>>),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    Instant(DateTime<Utc>),
    Uuid(Uuid),
}

impl Value {
    /// The domain type this value belongs to
    pub fn domain_type(&self) -> DomainTypeId {
        match self {
            Value::Boolean(_) => DomainTypeId::Boolean,
            Value::Integer(_) => DomainTypeId::Integer,
            Value::Long(_) => DomainTypeId::Long,
            Value::Double(_) => DomainTypeId::Double,
            Value::String(_) => DomainTypeId::String,
            Value::Chars(_) => DomainTypeId::CharArray,
            Value::NullableChars(_) => DomainTypeId::CharacterArray,
            Value::Bytes(_) => DomainTypeId::ByteArray,
            Value::NullableBytes(_) => DomainTypeId::ByteWrapperArray,
            Value::Date(_) => DomainTypeId::Date,
            Value::Time(_) => DomainTypeId::Time,
            Value::Timestamp(_) => DomainTypeId::Timestamp,
            Value::Instant(_) => DomainTypeId::Instant,
            Value::Uuid(_) => DomainTypeId::Uuid,
        }
    }
}

/// A value as it crosses the driver boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnValue {
    Null,
    Boolean(bool),
    Integer(i32),
    BigInt(i64),
    Double(f64),
    Decimal(String),
    Text(String),
    NText(String),
    Clob(String),
    NClob(String),
    Binary(Vec<u8>),
    Blob(Vec<u8>),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
}

impl ColumnValue {
    pub fn is_null(&self) -> bool {
        matches!(self, ColumnValue::Null)
    }

    /// Representation carried by this value; `None` for SQL NULL
    pub fn repr(&self) -> Option<ColumnRepr> {
        let repr = match self {
            ColumnValue::Null => return None,
            ColumnValue::Boolean(_) => ColumnRepr::Boolean,
            ColumnValue::Integer(_) => ColumnRepr::Integer,
            ColumnValue::BigInt(_) => ColumnRepr::BigInt,
            ColumnValue::Double(_) => ColumnRepr::Double,
            ColumnValue::Decimal(_) => ColumnRepr::Decimal,
            ColumnValue::Text(_) => ColumnRepr::Text,
            ColumnValue::NText(_) => ColumnRepr::NationalizedText,
            ColumnValue::Clob(_) => ColumnRepr::Clob,
            ColumnValue::NClob(_) => ColumnRepr::NClob,
            ColumnValue::Binary(_) => ColumnRepr::Binary,
            ColumnValue::Blob(_) => ColumnRepr::Blob,
            ColumnValue::Date(_) => ColumnRepr::Date,
            ColumnValue::Time(_) => ColumnRepr::Time,
            ColumnValue::Timestamp(_) => ColumnRepr::Timestamp,
            ColumnValue::TimestampTz(_) => ColumnRepr::TimestampTz,
        };
        Some(repr)
    }

    /// Character content of any text-like column value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ColumnValue::Text(s)
            | ColumnValue::NText(s)
            | ColumnValue::Clob(s)
            | ColumnValue::NClob(s)
            | ColumnValue::Decimal(s) => Some(s),
            _ => None,
        }
    }

    /// Byte content of any binary column value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ColumnValue::Binary(b) | ColumnValue::Blob(b) => Some(b),
            _ => None,
        }
    }

    /// Wrap character content in the value variant for `repr`
    pub(crate) fn text(repr: ColumnRepr, content: String) -> Option<ColumnValue> {
        match repr {
            ColumnRepr::Text => Some(ColumnValue::Text(content)),
            ColumnRepr::NationalizedText => Some(ColumnValue::NText(content)),
            ColumnRepr::Clob => Some(ColumnValue::Clob(content)),
            ColumnRepr::NClob => Some(ColumnValue::NClob(content)),
            _ => None,
        }
    }

    /// Wrap byte content in the value variant for `repr`
    pub(crate) fn binary(repr: ColumnRepr, content: Vec<u8>) -> Option<ColumnValue> {
        match repr {
            ColumnRepr::Binary => Some(ColumnValue::Binary(content)),
            ColumnRepr::Blob => Some(ColumnValue::Blob(content)),
            _ => None,
        }
    }
}

//! SQL column type codes and descriptors
//!
//! A `SqlTypeDescriptor` describes one column type (identified by its
//! standard integer type code) and how a domain value is bound to and
//! extracted from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain_type::DomainTypeDescriptor;
use super::value::{ColumnValue, Value};
use crate::errors::{RelmapError, Result};

/// Standard SQL type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqlTypeCode(pub i32);

impl SqlTypeCode {
    pub const BIT: SqlTypeCode = SqlTypeCode(-7);
    pub const TINYINT: SqlTypeCode = SqlTypeCode(-6);
    pub const SMALLINT: SqlTypeCode = SqlTypeCode(5);
    pub const INTEGER: SqlTypeCode = SqlTypeCode(4);
    pub const BIGINT: SqlTypeCode = SqlTypeCode(-5);
    pub const FLOAT: SqlTypeCode = SqlTypeCode(6);
    pub const REAL: SqlTypeCode = SqlTypeCode(7);
    pub const DOUBLE: SqlTypeCode = SqlTypeCode(8);
    pub const NUMERIC: SqlTypeCode = SqlTypeCode(2);
    pub const DECIMAL: SqlTypeCode = SqlTypeCode(3);
    pub const CHAR: SqlTypeCode = SqlTypeCode(1);
    pub const VARCHAR: SqlTypeCode = SqlTypeCode(12);
    pub const LONGVARCHAR: SqlTypeCode = SqlTypeCode(-1);
    pub const DATE: SqlTypeCode = SqlTypeCode(91);
    pub const TIME: SqlTypeCode = SqlTypeCode(92);
    pub const TIMESTAMP: SqlTypeCode = SqlTypeCode(93);
    pub const BINARY: SqlTypeCode = SqlTypeCode(-2);
    pub const VARBINARY: SqlTypeCode = SqlTypeCode(-3);
    pub const LONGVARBINARY: SqlTypeCode = SqlTypeCode(-4);
    pub const OTHER: SqlTypeCode = SqlTypeCode(1111);
    pub const BLOB: SqlTypeCode = SqlTypeCode(2004);
    pub const CLOB: SqlTypeCode = SqlTypeCode(2005);
    pub const BOOLEAN: SqlTypeCode = SqlTypeCode(16);
    pub const NCHAR: SqlTypeCode = SqlTypeCode(-15);
    pub const NVARCHAR: SqlTypeCode = SqlTypeCode(-9);
    pub const LONGNVARCHAR: SqlTypeCode = SqlTypeCode(-16);
    pub const NCLOB: SqlTypeCode = SqlTypeCode(2011);
    pub const TIME_WITH_TIMEZONE: SqlTypeCode = SqlTypeCode(2013);
    pub const TIMESTAMP_WITH_TIMEZONE: SqlTypeCode = SqlTypeCode(2014);

    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for SqlTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for SqlTypeCode {
    fn from(code: i32) -> Self {
        SqlTypeCode(code)
    }
}

/// How a column type carries its value across the driver boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRepr {
    Boolean,
    Integer,
    BigInt,
    Double,
    /// Exact numerics travel as their decimal literal
    Decimal,
    Text,
    NationalizedText,
    Clob,
    NClob,
    Binary,
    Blob,
    Date,
    Time,
    Timestamp,
    TimestampTz,
}

impl ColumnRepr {
    pub fn is_lob(self) -> bool {
        matches!(self, ColumnRepr::Clob | ColumnRepr::NClob | ColumnRepr::Blob)
    }

    pub fn is_nationalized(self) -> bool {
        matches!(self, ColumnRepr::NationalizedText | ColumnRepr::NClob)
    }

    pub fn is_character(self) -> bool {
        matches!(
            self,
            ColumnRepr::Text | ColumnRepr::NationalizedText | ColumnRepr::Clob | ColumnRepr::NClob
        )
    }

    pub fn is_temporal(self) -> bool {
        matches!(
            self,
            ColumnRepr::Date | ColumnRepr::Time | ColumnRepr::Timestamp | ColumnRepr::TimestampTz
        )
    }
}

impl fmt::Display for ColumnRepr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnRepr::Boolean => "boolean",
            ColumnRepr::Integer => "integer",
            ColumnRepr::BigInt => "bigint",
            ColumnRepr::Double => "double",
            ColumnRepr::Decimal => "decimal",
            ColumnRepr::Text => "text",
            ColumnRepr::NationalizedText => "nationalized text",
            ColumnRepr::Clob => "clob",
            ColumnRepr::NClob => "nclob",
            ColumnRepr::Binary => "binary",
            ColumnRepr::Blob => "blob",
            ColumnRepr::Date => "date",
            ColumnRepr::Time => "time",
            ColumnRepr::Timestamp => "timestamp",
            ColumnRepr::TimestampTz => "timestamp with time zone",
        };
        f.write_str(name)
    }
}

/// Descriptor for one SQL column type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlTypeDescriptor {
    code: SqlTypeCode,
    name: String,
    repr: ColumnRepr,
}

impl SqlTypeDescriptor {
    pub fn new(code: SqlTypeCode, name: impl Into<String>, repr: ColumnRepr) -> Self {
        Self {
            code,
            name: name.into(),
            repr,
        }
    }

    pub fn code(&self) -> SqlTypeCode {
        self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn repr(&self) -> ColumnRepr {
        self.repr
    }

    pub fn is_lob(&self) -> bool {
        self.repr.is_lob()
    }

    pub fn is_nationalized(&self) -> bool {
        self.repr.is_nationalized()
    }

    pub fn is_temporal(&self) -> bool {
        self.repr.is_temporal()
    }

    /// Convert a domain value into the column value this type binds
    ///
    /// `None` binds SQL NULL.
    ///
    /// # Errors
    ///
    /// `BindMismatch` when the domain type cannot produce this representation.
    pub fn bind(&self, domain: &DomainTypeDescriptor, value: Option<&Value>) -> Result<ColumnValue> {
        match value {
            None => Ok(ColumnValue::Null),
            Some(value) => domain.unwrap(value, self.repr),
        }
    }

    /// Convert an extracted column value back into the domain type
    ///
    /// SQL NULL extracts as `None`.
    ///
    /// # Errors
    ///
    /// `ExtractMismatch` when the column value has no mapping to the domain type.
    pub fn extract(
        &self,
        domain: &DomainTypeDescriptor,
        column: &ColumnValue,
    ) -> Result<Option<Value>> {
        if column.is_null() {
            return Ok(None);
        }
        domain.wrap(column).map(Some)
    }
}

impl fmt::Display for SqlTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.code)
    }
}

/// The descriptors every registry starts with
pub fn standard_descriptors() -> Vec<SqlTypeDescriptor> {
    use ColumnRepr as R;
    vec![
        SqlTypeDescriptor::new(SqlTypeCode::BIT, "BIT", R::Boolean),
        SqlTypeDescriptor::new(SqlTypeCode::BOOLEAN, "BOOLEAN", R::Boolean),
        SqlTypeDescriptor::new(SqlTypeCode::TINYINT, "TINYINT", R::Integer),
        SqlTypeDescriptor::new(SqlTypeCode::SMALLINT, "SMALLINT", R::Integer),
        SqlTypeDescriptor::new(SqlTypeCode::INTEGER, "INTEGER", R::Integer),
        SqlTypeDescriptor::new(SqlTypeCode::BIGINT, "BIGINT", R::BigInt),
        SqlTypeDescriptor::new(SqlTypeCode::FLOAT, "FLOAT", R::Double),
        SqlTypeDescriptor::new(SqlTypeCode::REAL, "REAL", R::Double),
        SqlTypeDescriptor::new(SqlTypeCode::DOUBLE, "DOUBLE", R::Double),
        SqlTypeDescriptor::new(SqlTypeCode::NUMERIC, "NUMERIC", R::Decimal),
        SqlTypeDescriptor::new(SqlTypeCode::DECIMAL, "DECIMAL", R::Decimal),
        SqlTypeDescriptor::new(SqlTypeCode::CHAR, "CHAR", R::Text),
        SqlTypeDescriptor::new(SqlTypeCode::VARCHAR, "VARCHAR", R::Text),
        SqlTypeDescriptor::new(SqlTypeCode::LONGVARCHAR, "LONGVARCHAR", R::Text),
        SqlTypeDescriptor::new(SqlTypeCode::NCHAR, "NCHAR", R::NationalizedText),
        SqlTypeDescriptor::new(SqlTypeCode::NVARCHAR, "NVARCHAR", R::NationalizedText),
        SqlTypeDescriptor::new(SqlTypeCode::LONGNVARCHAR, "LONGNVARCHAR", R::NationalizedText),
        SqlTypeDescriptor::new(SqlTypeCode::CLOB, "CLOB", R::Clob),
        SqlTypeDescriptor::new(SqlTypeCode::NCLOB, "NCLOB", R::NClob),
        SqlTypeDescriptor::new(SqlTypeCode::BINARY, "BINARY", R::Binary),
        SqlTypeDescriptor::new(SqlTypeCode::VARBINARY, "VARBINARY", R::Binary),
        SqlTypeDescriptor::new(SqlTypeCode::LONGVARBINARY, "LONGVARBINARY", R::Binary),
        SqlTypeDescriptor::new(SqlTypeCode::BLOB, "BLOB", R::Blob),
        SqlTypeDescriptor::new(SqlTypeCode::DATE, "DATE", R::Date),
        SqlTypeDescriptor::new(SqlTypeCode::TIME, "TIME", R::Time),
        SqlTypeDescriptor::new(SqlTypeCode::TIME_WITH_TIMEZONE, "TIME_WITH_TIMEZONE", R::Time),
        SqlTypeDescriptor::new(SqlTypeCode::TIMESTAMP, "TIMESTAMP", R::Timestamp),
        SqlTypeDescriptor::new(
            SqlTypeCode::TIMESTAMP_WITH_TIMEZONE,
            "TIMESTAMP_WITH_TIMEZONE",
            R::TimestampTz,
        ),
        SqlTypeDescriptor::new(SqlTypeCode::OTHER, "OTHER", R::Text),
    ]
}

/// Parse a type reference as written in settings: a name or a numeric code
pub(crate) fn parse_code_literal(reference: &str) -> Option<SqlTypeCode> {
    reference.trim().parse::<i32>().ok().map(SqlTypeCode)
}

pub(crate) fn unknown_name(name: &str) -> RelmapError {
    RelmapError::UnknownTypeName {
        name: name.to_string(),
    }
}

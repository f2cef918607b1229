//! Wire-level types and values.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use std::fmt;

/// Primitive type identifiers of the YDB type system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Bool,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float,
    Double,
    /// Arbitrary bytes.
    String,
    Utf8,
    Yson,
    Json,
    JsonDocument,
    DyNumber,
    /// Days since the Unix epoch.
    Date,
    /// Seconds since the Unix epoch.
    Datetime,
    /// Microseconds since the Unix epoch.
    Timestamp,
    /// Signed microseconds.
    Interval,
    TzDate,
    TzDateTime,
    TzTimestamp,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 24] = [
        PrimitiveType::Bool,
        PrimitiveType::Int8,
        PrimitiveType::Uint8,
        PrimitiveType::Int16,
        PrimitiveType::Uint16,
        PrimitiveType::Int32,
        PrimitiveType::Uint32,
        PrimitiveType::Int64,
        PrimitiveType::Uint64,
        PrimitiveType::Float,
        PrimitiveType::Double,
        PrimitiveType::String,
        PrimitiveType::Utf8,
        PrimitiveType::Yson,
        PrimitiveType::Json,
        PrimitiveType::JsonDocument,
        PrimitiveType::DyNumber,
        PrimitiveType::Date,
        PrimitiveType::Datetime,
        PrimitiveType::Timestamp,
        PrimitiveType::Interval,
        PrimitiveType::TzDate,
        PrimitiveType::TzDateTime,
        PrimitiveType::TzTimestamp,
    ];

    /// The keyword used in `DECLARE $name AS <keyword>`.
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "Bool",
            PrimitiveType::Int8 => "Int8",
            PrimitiveType::Uint8 => "Uint8",
            PrimitiveType::Int16 => "Int16",
            PrimitiveType::Uint16 => "Uint16",
            PrimitiveType::Int32 => "Int32",
            PrimitiveType::Uint32 => "Uint32",
            PrimitiveType::Int64 => "Int64",
            PrimitiveType::Uint64 => "Uint64",
            PrimitiveType::Float => "Float",
            PrimitiveType::Double => "Double",
            PrimitiveType::String => "String",
            PrimitiveType::Utf8 => "Utf8",
            PrimitiveType::Yson => "Yson",
            PrimitiveType::Json => "Json",
            PrimitiveType::JsonDocument => "JsonDocument",
            PrimitiveType::DyNumber => "DyNumber",
            PrimitiveType::Date => "Date",
            PrimitiveType::Datetime => "Datetime",
            PrimitiveType::Timestamp => "Timestamp",
            PrimitiveType::Interval => "Interval",
            PrimitiveType::TzDate => "TzDate",
            PrimitiveType::TzDateTime => "TzDateTime",
            PrimitiveType::TzTimestamp => "TzTimestamp",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A YDB type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Primitive(PrimitiveType),
    Decimal { precision: u8, scale: u8 },
    Optional(Box<Type>),
    List(Box<Type>),
    Tuple(Vec<Type>),
    Struct(Vec<(String, Type)>),
    Dict(Box<Type>, Box<Type>),
    Variant(Vec<Type>),
    Void,
    Null,
}

impl Type {
    pub fn optional(inner: Type) -> Self {
        Type::Optional(Box::new(inner))
    }

    pub fn list(inner: Type) -> Self {
        Type::List(Box::new(inner))
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Type::Primitive(_) => TypeKind::Primitive,
            Type::Decimal { .. } => TypeKind::Decimal,
            Type::Optional(_) => TypeKind::Optional,
            Type::List(_) => TypeKind::List,
            Type::Tuple(_) => TypeKind::Tuple,
            Type::Struct(_) => TypeKind::Struct,
            Type::Dict(_, _) => TypeKind::Dict,
            Type::Variant(_) => TypeKind::Variant,
            Type::Void => TypeKind::Void,
            Type::Null => TypeKind::Null,
        }
    }
}

impl From<PrimitiveType> for Type {
    fn from(value: PrimitiveType) -> Self {
        Type::Primitive(value)
    }
}

/// The shape of a [`Type`], used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive,
    Decimal,
    Optional,
    List,
    Tuple,
    Struct,
    Dict,
    Variant,
    Void,
    Null,
}

impl TypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Primitive => "primitive",
            TypeKind::Decimal => "decimal",
            TypeKind::Optional => "optional",
            TypeKind::List => "list",
            TypeKind::Tuple => "tuple",
            TypeKind::Struct => "struct",
            TypeKind::Dict => "dict",
            TypeKind::Variant => "variant",
            TypeKind::Void => "void",
            TypeKind::Null => "null",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wire payload.
///
/// Narrow integers travel in the 32-bit slots, dates and times as their epoch
/// offsets; the accompanying [`Type`] says how to read them.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int32(i32),
    Uint32(u32),
    Int64(i64),
    Uint64(u64),
    Float(f32),
    Double(f64),
    Bytes(Vec<u8>),
    Text(String),
    Items(Vec<Value>),
}

pub(crate) fn epoch_date() -> NaiveDate {
    DateTime::<Utc>::UNIX_EPOCH.date_naive()
}

/// A value paired with its declared type, as bound to a query parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    ty: Type,
    value: Value,
}

impl TypedValue {
    /// Pair a type with a payload without checking that they agree.
    pub fn new(ty: Type, value: Value) -> Self {
        Self { ty, value }
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_parts(self) -> (Type, Value) {
        (self.ty, self.value)
    }

    fn primitive(ty: PrimitiveType, value: Value) -> Self {
        Self::new(Type::Primitive(ty), value)
    }

    pub fn bool(v: bool) -> Self {
        Self::primitive(PrimitiveType::Bool, Value::Bool(v))
    }

    pub fn int8(v: i8) -> Self {
        Self::primitive(PrimitiveType::Int8, Value::Int32(v.into()))
    }

    pub fn uint8(v: u8) -> Self {
        Self::primitive(PrimitiveType::Uint8, Value::Uint32(v.into()))
    }

    pub fn int16(v: i16) -> Self {
        Self::primitive(PrimitiveType::Int16, Value::Int32(v.into()))
    }

    pub fn uint16(v: u16) -> Self {
        Self::primitive(PrimitiveType::Uint16, Value::Uint32(v.into()))
    }

    pub fn int32(v: i32) -> Self {
        Self::primitive(PrimitiveType::Int32, Value::Int32(v))
    }

    pub fn uint32(v: u32) -> Self {
        Self::primitive(PrimitiveType::Uint32, Value::Uint32(v))
    }

    pub fn int64(v: i64) -> Self {
        Self::primitive(PrimitiveType::Int64, Value::Int64(v))
    }

    pub fn uint64(v: u64) -> Self {
        Self::primitive(PrimitiveType::Uint64, Value::Uint64(v))
    }

    pub fn float(v: f32) -> Self {
        Self::primitive(PrimitiveType::Float, Value::Float(v))
    }

    pub fn double(v: f64) -> Self {
        Self::primitive(PrimitiveType::Double, Value::Double(v))
    }

    /// Raw bytes (`String` in YDB terms).
    pub fn bytes(v: impl Into<Vec<u8>>) -> Self {
        Self::primitive(PrimitiveType::String, Value::Bytes(v.into()))
    }

    pub fn utf8(v: impl Into<String>) -> Self {
        Self::primitive(PrimitiveType::Utf8, Value::Text(v.into()))
    }

    pub fn yson(v: impl Into<Vec<u8>>) -> Self {
        Self::primitive(PrimitiveType::Yson, Value::Bytes(v.into()))
    }

    pub fn json(v: &serde_json::Value) -> Self {
        Self::primitive(PrimitiveType::Json, Value::Text(v.to_string()))
    }

    pub fn json_document(v: &serde_json::Value) -> Self {
        Self::primitive(PrimitiveType::JsonDocument, Value::Text(v.to_string()))
    }

    pub fn dy_number(v: impl Into<String>) -> Self {
        Self::primitive(PrimitiveType::DyNumber, Value::Text(v.into()))
    }

    /// Returns `None` for dates before the epoch or beyond the Date range.
    pub fn date(v: NaiveDate) -> Option<Self> {
        let days = v.signed_duration_since(epoch_date()).num_days();
        let days = u32::try_from(days).ok()?;
        Some(Self::primitive(PrimitiveType::Date, Value::Uint32(days)))
    }

    /// Returns `None` for instants before the epoch or beyond the Datetime range.
    pub fn datetime(v: DateTime<Utc>) -> Option<Self> {
        let secs = u32::try_from(v.timestamp()).ok()?;
        Some(Self::primitive(PrimitiveType::Datetime, Value::Uint32(secs)))
    }

    /// Returns `None` for instants before the epoch.
    pub fn timestamp(v: DateTime<Utc>) -> Option<Self> {
        let micros = u64::try_from(v.timestamp_micros()).ok()?;
        Some(Self::primitive(PrimitiveType::Timestamp, Value::Uint64(micros)))
    }

    /// Returns `None` when the interval does not fit in signed microseconds.
    pub fn interval(v: TimeDelta) -> Option<Self> {
        let micros = v.num_microseconds()?;
        Some(Self::primitive(PrimitiveType::Interval, Value::Int64(micros)))
    }

    pub fn tz_date(v: impl Into<String>) -> Self {
        Self::primitive(PrimitiveType::TzDate, Value::Text(v.into()))
    }

    pub fn tz_datetime(v: impl Into<String>) -> Self {
        Self::primitive(PrimitiveType::TzDateTime, Value::Text(v.into()))
    }

    pub fn tz_timestamp(v: impl Into<String>) -> Self {
        Self::primitive(PrimitiveType::TzTimestamp, Value::Text(v.into()))
    }
}

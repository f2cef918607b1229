//! Native values handed to and returned from the dialect.

use super::value::TypedValue;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

/// A plain Rust value as seen by the query builder.
///
/// Parameters are classified by variant (see [`value_to_typed`](super::value_to_typed));
/// result cells are decoded into the same enum.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Interval(TimeDelta),
    Json(serde_json::Value),
    List(Vec<NativeValue>),
    /// An explicitly typed value that skips type inference.
    Typed(TypedValue),
}

impl NativeValue {
    /// A short name for the value's shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::Bool(_) => "boolean",
            NativeValue::Int(_) | NativeValue::Uint(_) | NativeValue::Float(_) => "number",
            NativeValue::Text(_) => "string",
            NativeValue::Bytes(_) => "bytes",
            NativeValue::Date(_) | NativeValue::Timestamp(_) => "date",
            NativeValue::Interval(_) => "interval",
            NativeValue::Json(_) => "json",
            NativeValue::List(_) => "list",
            NativeValue::Typed(_) => "typed value",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, NativeValue::Null)
    }

    /// Structural copy into a JSON value.
    ///
    /// Dates and timestamps become RFC 3339 strings, intervals whole microseconds,
    /// bytes are decoded lossily as UTF-8. Typed values are decoded first;
    /// a payload that does not match its type becomes `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as J;
        match self {
            NativeValue::Null => J::Null,
            NativeValue::Bool(v) => J::Bool(*v),
            NativeValue::Int(v) => J::from(*v),
            NativeValue::Uint(v) => J::from(*v),
            NativeValue::Float(v) => serde_json::Number::from_f64(*v).map_or(J::Null, J::Number),
            NativeValue::Text(v) => J::String(v.clone()),
            NativeValue::Bytes(v) => J::String(String::from_utf8_lossy(v).into_owned()),
            NativeValue::Date(v) => J::String(v.to_string()),
            NativeValue::Timestamp(v) => J::String(v.to_rfc3339()),
            NativeValue::Interval(v) => v.num_microseconds().map_or(J::Null, J::from),
            NativeValue::Json(v) => v.clone(),
            NativeValue::List(items) => J::Array(items.iter().map(NativeValue::to_json).collect()),
            NativeValue::Typed(v) => super::typed_to_native(v.ty(), v.value())
                .map_or(J::Null, |native| native.to_json()),
        }
    }
}

/// Wrap an explicitly typed value so it bypasses inference when bound.
///
/// ```ignore
/// use ydb_dialect::{qb, typed_param, TypedValue};
///
/// let q = qb::select("episodes").eq("episode_id", typed_param(TypedValue::uint64(42)));
/// ```
pub fn typed_param(value: TypedValue) -> NativeValue {
    NativeValue::Typed(value)
}

impl From<TypedValue> for NativeValue {
    fn from(v: TypedValue) -> Self {
        NativeValue::Typed(v)
    }
}

impl From<bool> for NativeValue {
    fn from(v: bool) -> Self {
        NativeValue::Bool(v)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for NativeValue {
            fn from(v: $t) -> Self {
                NativeValue::Int(v.into())
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for NativeValue {
            fn from(v: $t) -> Self {
                NativeValue::Uint(v.into())
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<f32> for NativeValue {
    fn from(v: f32) -> Self {
        NativeValue::Float(v.into())
    }
}

impl From<f64> for NativeValue {
    fn from(v: f64) -> Self {
        NativeValue::Float(v)
    }
}

impl From<&str> for NativeValue {
    fn from(v: &str) -> Self {
        NativeValue::Text(v.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(v: String) -> Self {
        NativeValue::Text(v)
    }
}

impl From<&String> for NativeValue {
    fn from(v: &String) -> Self {
        NativeValue::Text(v.clone())
    }
}

impl From<Vec<u8>> for NativeValue {
    fn from(v: Vec<u8>) -> Self {
        NativeValue::Bytes(v)
    }
}

impl From<NaiveDate> for NativeValue {
    fn from(v: NaiveDate) -> Self {
        NativeValue::Date(v)
    }
}

impl From<DateTime<Utc>> for NativeValue {
    fn from(v: DateTime<Utc>) -> Self {
        NativeValue::Timestamp(v)
    }
}

impl From<TimeDelta> for NativeValue {
    fn from(v: TimeDelta) -> Self {
        NativeValue::Interval(v)
    }
}

impl From<serde_json::Value> for NativeValue {
    fn from(v: serde_json::Value) -> Self {
        NativeValue::Json(v)
    }
}

impl<T: Into<NativeValue>> From<Option<T>> for NativeValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(NativeValue::Null, Into::into)
    }
}

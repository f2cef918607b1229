//! Native <-> wire value mapping.

use super::native::NativeValue;
use super::value::{PrimitiveType, Type, TypedValue, Value, epoch_date};
use crate::error::{YdbError, YdbResult};
use chrono::{DateTime, TimeDelta, Utc};

/// Classify a native value into a typed wire value.
///
/// Precedence: typed passthrough, string (`Utf8`), number (`Uint32`),
/// boolean (`Bool`), date/time (`Timestamp`). Every other shape is rejected.
///
/// Numbers always map to `Uint32`; values that do not fit (negative,
/// fractional, or above `u32::MAX`) are rejected rather than truncated. Bind
/// `typed_param(TypedValue::int64(..))` to pick another width.
pub fn value_to_typed(value: &NativeValue) -> YdbResult<TypedValue> {
    match value {
        NativeValue::Typed(typed) => Ok(typed.clone()),
        NativeValue::Text(s) => Ok(TypedValue::utf8(s.as_str())),
        NativeValue::Int(_) | NativeValue::Uint(_) | NativeValue::Float(_) => {
            number_to_uint32(value).map(TypedValue::uint32)
        }
        NativeValue::Bool(b) => Ok(TypedValue::bool(*b)),
        NativeValue::Date(d) => {
            let midnight = d.and_time(chrono::NaiveTime::MIN).and_utc();
            TypedValue::timestamp(midnight)
                .ok_or_else(|| YdbError::unsupported_parameter(format!("date {d} before epoch")))
        }
        NativeValue::Timestamp(ts) => TypedValue::timestamp(*ts)
            .ok_or_else(|| YdbError::unsupported_parameter(format!("date {ts} before epoch"))),
        other => Err(YdbError::unsupported_parameter(other.shape())),
    }
}

fn number_to_uint32(value: &NativeValue) -> YdbResult<u32> {
    let out_of_range = || {
        YdbError::unsupported_parameter(format!("number {value:?} does not fit Uint32"))
    };
    match *value {
        NativeValue::Int(n) => u32::try_from(n).map_err(|_| out_of_range()),
        NativeValue::Uint(n) => u32::try_from(n).map_err(|_| out_of_range()),
        NativeValue::Float(f) => {
            if f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&f) {
                Ok(f as u32)
            } else {
                Err(out_of_range())
            }
        }
        _ => Err(YdbError::unsupported_parameter(value.shape())),
    }
}

/// The declaration keyword of a parameter type.
///
/// Only primitive types can be declared; composite kinds fail with
/// [`YdbError::UnsupportedType`] and void/null with [`YdbError::EmptyType`].
pub fn type_keyword(ty: &Type) -> YdbResult<&'static str> {
    match ty {
        Type::Primitive(p) => Ok(p.keyword()),
        Type::Void | Type::Null => Err(YdbError::EmptyType),
        other => Err(YdbError::UnsupportedType(other.kind())),
    }
}

/// Decode a result cell of the given column type into a native value.
pub fn typed_to_native(ty: &Type, value: &Value) -> YdbResult<NativeValue> {
    match (ty, value) {
        (_, Value::Null) => Ok(NativeValue::Null),
        (Type::Optional(inner), v) => typed_to_native(inner, v),
        (Type::List(inner), Value::Items(items)) => items
            .iter()
            .map(|item| typed_to_native(inner, item))
            .collect::<YdbResult<Vec<_>>>()
            .map(NativeValue::List),
        (Type::Primitive(p), v) => primitive_to_native(*p, v),
        (other, _) => Err(YdbError::UnsupportedType(other.kind())),
    }
}

fn primitive_to_native(ty: PrimitiveType, value: &Value) -> YdbResult<NativeValue> {
    use PrimitiveType as P;

    let mismatch = || {
        YdbError::validation(format!("payload {value:?} does not match type {ty}"))
    };

    let native = match (ty, value) {
        (P::Bool, Value::Bool(b)) => NativeValue::Bool(*b),
        (P::Int8 | P::Int16 | P::Int32, Value::Int32(n)) => NativeValue::Int((*n).into()),
        (P::Int64, Value::Int64(n)) => NativeValue::Int(*n),
        (P::Uint8 | P::Uint16 | P::Uint32, Value::Uint32(n)) => NativeValue::Uint((*n).into()),
        (P::Uint64, Value::Uint64(n)) => NativeValue::Uint(*n),
        (P::Float, Value::Float(f)) => NativeValue::Float((*f).into()),
        (P::Double, Value::Double(f)) => NativeValue::Float(*f),
        (P::String | P::Yson, Value::Bytes(b)) => NativeValue::Bytes(b.clone()),
        (P::Json | P::JsonDocument, Value::Text(s)) => serde_json::from_str(s)
            .map(NativeValue::Json)
            .map_err(|e| YdbError::validation(format!("invalid {ty} payload: {e}")))?,
        (P::Utf8 | P::DyNumber | P::TzDate | P::TzDateTime | P::TzTimestamp, Value::Text(s)) => {
            NativeValue::Text(s.clone())
        }
        (P::Date, Value::Uint32(days)) => epoch_date()
            .checked_add_signed(TimeDelta::days((*days).into()))
            .map(NativeValue::Date)
            .ok_or_else(mismatch)?,
        (P::Datetime, Value::Uint32(secs)) => DateTime::<Utc>::from_timestamp((*secs).into(), 0)
            .map(NativeValue::Timestamp)
            .ok_or_else(mismatch)?,
        (P::Timestamp, Value::Uint64(micros)) => i64::try_from(*micros)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_micros)
            .map(NativeValue::Timestamp)
            .ok_or_else(mismatch)?,
        (P::Interval, Value::Int64(micros)) => NativeValue::Interval(TimeDelta::microseconds(*micros)),
        _ => return Err(mismatch()),
    };
    Ok(native)
}

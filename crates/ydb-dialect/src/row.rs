//! Decoded result rows and row mapping traits

use crate::error::{YdbError, YdbResult};
use crate::session::ResultSet;
use crate::types::{NativeValue, typed_to_native};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use std::sync::Arc;

/// One row of a result set: native values in column order.
///
/// Column names are shared between all rows of the same result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<NativeValue>,
}

impl Row {
    /// Build a row from names and values of equal length.
    pub fn new(columns: Arc<[String]>, values: Vec<NativeValue>) -> YdbResult<Self> {
        if columns.len() != values.len() {
            return Err(YdbError::validation(format!(
                "row has {} values for {} columns",
                values.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, values })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw value of a column, if present.
    pub fn value(&self, column: &str) -> Option<&NativeValue> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.values[i])
    }

    /// Decode a column into `T`, returning [`YdbError::Decode`] on failure.
    pub fn get<T: FromNative>(&self, column: &str) -> YdbResult<T> {
        let value = self
            .value(column)
            .ok_or_else(|| YdbError::decode(column, "no such column"))?;
        T::from_native(value).map_err(|message| YdbError::decode(column, message))
    }

    /// `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NativeValue)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// A JSON object copy of the row.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.iter()
                .map(|(name, value)| (name.to_string(), value.to_json()))
                .collect(),
        )
    }
}

/// Decode every row of a result set.
pub fn decode_result_set(result_set: &ResultSet) -> YdbResult<Vec<Row>> {
    let columns: Arc<[String]> = result_set.columns.iter().map(|c| c.name.clone()).collect();

    result_set
        .rows
        .iter()
        .map(|cells| {
            if cells.len() != result_set.columns.len() {
                return Err(YdbError::validation(format!(
                    "result row has {} cells for {} columns",
                    cells.len(),
                    result_set.columns.len()
                )));
            }
            let values = result_set
                .columns
                .iter()
                .zip(cells)
                .map(|(column, cell)| {
                    typed_to_native(&column.ty, cell)
                        .map_err(|e| YdbError::decode(column.name.as_str(), e.to_string()))
                })
                .collect::<YdbResult<Vec<_>>>()?;
            Ok(Row {
                columns: Arc::clone(&columns),
                values,
            })
        })
        .collect()
}

/// Trait for types that can be built from a decoded row.
///
/// # Example
///
/// ```ignore
/// use ydb_dialect::{FromRow, Row, YdbResult};
///
/// struct Series {
///     series_id: u64,
///     title: String,
/// }
///
/// impl FromRow for Series {
///     fn from_row(row: &Row) -> YdbResult<Self> {
///         Ok(Self {
///             series_id: row.get("series_id")?,
///             title: row.get("title")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a decoded row into Self
    fn from_row(row: &Row) -> YdbResult<Self>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> YdbResult<Self> {
        Ok(row.clone())
    }
}

impl FromRow for serde_json::Value {
    fn from_row(row: &Row) -> YdbResult<Self> {
        Ok(row.to_json())
    }
}

/// Conversion from a single native cell.
///
/// Errors are plain messages; [`Row::get`] attaches the column name.
pub trait FromNative: Sized {
    fn from_native(value: &NativeValue) -> Result<Self, String>;
}

fn mismatch(expected: &str, value: &NativeValue) -> String {
    format!("expected {expected}, got {}", value.shape())
}

impl FromNative for NativeValue {
    fn from_native(value: &NativeValue) -> Result<Self, String> {
        Ok(value.clone())
    }
}

impl FromNative for bool {
    fn from_native(value: &NativeValue) -> Result<Self, String> {
        match value {
            NativeValue::Bool(b) => Ok(*b),
            other => Err(mismatch("boolean", other)),
        }
    }
}

macro_rules! impl_from_native_int {
    ($($t:ty),*) => {
        $(impl FromNative for $t {
            fn from_native(value: &NativeValue) -> Result<Self, String> {
                let out_of_range = |n: &dyn std::fmt::Display| {
                    format!("{n} out of range for {}", stringify!($t))
                };
                match *value {
                    NativeValue::Int(n) => <$t>::try_from(n).map_err(|_| out_of_range(&n)),
                    NativeValue::Uint(n) => <$t>::try_from(n).map_err(|_| out_of_range(&n)),
                    ref other => Err(mismatch("integer", other)),
                }
            }
        })*
    };
}

impl_from_native_int!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FromNative for f64 {
    fn from_native(value: &NativeValue) -> Result<Self, String> {
        match *value {
            NativeValue::Float(f) => Ok(f),
            NativeValue::Int(n) => Ok(n as f64),
            NativeValue::Uint(n) => Ok(n as f64),
            ref other => Err(mismatch("number", other)),
        }
    }
}

impl FromNative for String {
    fn from_native(value: &NativeValue) -> Result<Self, String> {
        match value {
            NativeValue::Text(s) => Ok(s.clone()),
            other => Err(mismatch("string", other)),
        }
    }
}

impl FromNative for Vec<u8> {
    fn from_native(value: &NativeValue) -> Result<Self, String> {
        match value {
            NativeValue::Bytes(b) => Ok(b.clone()),
            NativeValue::Text(s) => Ok(s.as_bytes().to_vec()),
            other => Err(mismatch("bytes", other)),
        }
    }
}

impl FromNative for NaiveDate {
    fn from_native(value: &NativeValue) -> Result<Self, String> {
        match value {
            NativeValue::Date(d) => Ok(*d),
            NativeValue::Timestamp(ts) => Ok(ts.date_naive()),
            other => Err(mismatch("date", other)),
        }
    }
}

impl FromNative for DateTime<Utc> {
    fn from_native(value: &NativeValue) -> Result<Self, String> {
        match value {
            NativeValue::Timestamp(ts) => Ok(*ts),
            NativeValue::Date(d) => Ok(d.and_time(chrono::NaiveTime::MIN).and_utc()),
            other => Err(mismatch("timestamp", other)),
        }
    }
}

impl FromNative for TimeDelta {
    fn from_native(value: &NativeValue) -> Result<Self, String> {
        match value {
            NativeValue::Interval(d) => Ok(*d),
            other => Err(mismatch("interval", other)),
        }
    }
}

impl FromNative for serde_json::Value {
    fn from_native(value: &NativeValue) -> Result<Self, String> {
        Ok(value.to_json())
    }
}

impl<T: FromNative> FromNative for Option<T> {
    fn from_native(value: &NativeValue) -> Result<Self, String> {
        match value {
            NativeValue::Null => Ok(None),
            other => T::from_native(other).map(Some),
        }
    }
}

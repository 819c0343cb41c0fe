//! Conversion from driver rows to output records.
//!
//! Rows fetched with the extended protocol arrive in binary form and are
//! decoded according to the type the server reported. Types without a binary
//! decoder here are read through the simple protocol instead, where every
//! value arrives as text. No further coercion is applied.

use std::net::IpAddr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use postgres::types::{FromSql, Type};
use postgres::{Row, SimpleQueryMessage, SimpleQueryRow};
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use tracing::warn;

use crate::types::Record;

/// True when values of this type can be decoded from the binary format.
pub fn decodes_binary(ty: &Type) -> bool {
    matches!(
        *ty,
        Type::BOOL
            | Type::CHAR
            | Type::INT2
            | Type::INT4
            | Type::INT8
            | Type::OID
            | Type::FLOAT4
            | Type::FLOAT8
            | Type::NUMERIC
            | Type::TIMESTAMP
            | Type::TIMESTAMPTZ
            | Type::DATE
            | Type::TIME
            | Type::UUID
            | Type::JSON
            | Type::JSONB
            | Type::BYTEA
            | Type::INET
    ) || <String as FromSql>::accepts(ty)
}

/// Convert a result row into a record keyed by column name.
pub fn row_to_record(row: &Row) -> Record {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| (column.name().to_string(), column_value(row, idx, column.type_())))
        .collect()
}

/// Decode a nullable column, mapping SQL NULL and decode errors to `None`.
fn get<'a, T: FromSql<'a>>(row: &'a Row, idx: usize) -> Option<T> {
    row.try_get::<_, Option<T>>(idx).ok().flatten()
}

fn float_value(f: f64) -> Value {
    // QuestDB reports missing doubles as NaN, which JSON cannot carry.
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

fn column_value(row: &Row, idx: usize, ty: &Type) -> Value {
    let value = match *ty {
        Type::BOOL => get::<bool>(row, idx).map(Value::Bool),
        Type::CHAR => get::<i8>(row, idx).map(|c| Value::String(char::from(c as u8).to_string())),
        Type::INT2 => get::<i16>(row, idx).map(Value::from),
        Type::INT4 => get::<i32>(row, idx).map(Value::from),
        Type::INT8 => get::<i64>(row, idx).map(Value::from),
        Type::OID => get::<u32>(row, idx).map(Value::from),
        Type::FLOAT4 => get::<f32>(row, idx).map(|f| float_value(f64::from(f))),
        Type::FLOAT8 => get::<f64>(row, idx).map(float_value),
        // Decimal text keeps the server's scale and precision.
        Type::NUMERIC => get::<Decimal>(row, idx).map(|d| Value::String(d.to_string())),
        Type::TIMESTAMP => get::<NaiveDateTime>(row, idx)
            .map(|ts| Value::String(ts.and_utc().to_rfc3339_opts(SecondsFormat::Micros, true))),
        Type::TIMESTAMPTZ => get::<DateTime<Utc>>(row, idx)
            .map(|ts| Value::String(ts.to_rfc3339_opts(SecondsFormat::Micros, true))),
        Type::DATE => get::<NaiveDate>(row, idx).map(|d| Value::String(d.to_string())),
        Type::TIME => get::<NaiveTime>(row, idx).map(|t| Value::String(t.to_string())),
        Type::UUID => get::<uuid::Uuid>(row, idx).map(|u| Value::String(u.to_string())),
        Type::JSON | Type::JSONB => get::<Value>(row, idx),
        Type::BYTEA => get::<Vec<u8>>(row, idx).map(|b| Value::String(hex::encode(b))),
        Type::INET => get::<IpAddr>(row, idx).map(|ip| Value::String(ip.to_string())),
        _ => get::<String>(row, idx).map(Value::String),
    };

    value.unwrap_or_else(|| {
        if !is_null(row, idx) {
            warn!(column = idx, ty = %ty, "Column value could not be decoded, returning null");
        }
        Value::Null
    })
}

/// True when the raw column value is SQL NULL.
fn is_null(row: &Row, idx: usize) -> bool {
    matches!(row.try_get::<_, Option<RawValue>>(idx), Ok(None))
}

/// Accepts any column type without decoding it; used only for NULL detection.
struct RawValue;

impl<'a> FromSql<'a> for RawValue {
    fn from_sql(
        _ty: &Type,
        _raw: &'a [u8],
    ) -> Result<Self, Box<dyn std::error::Error + Sync + Send>> {
        Ok(RawValue)
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }
}

/// Collect the rows of the last result set in a simple-protocol response.
///
/// `types` gives the column types when they are known from a prepared
/// statement; without them every value stays text.
pub fn records_from_simple(messages: &[SimpleQueryMessage], types: Option<&[Type]>) -> Vec<Record> {
    let mut last = Vec::new();
    let mut current = Vec::new();

    for message in messages {
        match message {
            SimpleQueryMessage::Row(row) => current.push(simple_row_to_record(row, types)),
            SimpleQueryMessage::CommandComplete(_) => last = std::mem::take(&mut current),
            _ => {}
        }
    }

    if current.is_empty() { last } else { current }
}

fn simple_row_to_record(row: &SimpleQueryRow, types: Option<&[Type]>) -> Record {
    row.columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let ty = types.and_then(|types| types.get(idx));
            let text = row.try_get(idx).ok().flatten();
            (column.name().to_string(), text_value(ty, text))
        })
        .collect()
}

/// Convert a text-format value. Scalars with a JSON counterpart are parsed;
/// everything else is kept as the server's text.
fn text_value(ty: Option<&Type>, text: Option<&str>) -> Value {
    let Some(text) = text else {
        return Value::Null;
    };

    let parsed = ty.and_then(|ty| match *ty {
        Type::BOOL => match text {
            "t" => Some(Value::Bool(true)),
            "f" => Some(Value::Bool(false)),
            _ => None,
        },
        Type::INT2 | Type::INT4 | Type::INT8 | Type::OID => text.parse::<i64>().ok().map(Value::from),
        Type::FLOAT4 | Type::FLOAT8 => text.parse::<f64>().ok().map(float_value),
        Type::JSON | Type::JSONB => serde_json::from_str(text).ok(),
        _ => None,
    });

    parsed.unwrap_or_else(|| Value::String(text.to_string()))
}

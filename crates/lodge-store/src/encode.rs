//! Encoding between serde values and SQLite column values.
//!
//! Entities travel through serde: drafts and patches are serialised to a JSON
//! object whose keys are checked against the entity's [`Record`] descriptor
//! before any SQL is built, and result rows are turned back into entities via
//! `serde_json::from_value`. Columns of kind [`ColumnKind::Json`] hold a JSON
//! document as text and are (de)serialised on the way through.

use rusqlite::types::Value;
use serde::Serialize;
use serde_json::{Map, Value as Json};

use crate::{
  Error, Result,
  engine::Row,
  record::{Column, ColumnKind, Fields, Record},
};

/// Convert a scalar JSON value to a SQLite value. Arrays and objects are
/// stored as their JSON text.
pub fn to_sql(value: Json) -> Value {
  match value {
    Json::Null => Value::Null,
    Json::Bool(b) => Value::Integer(i64::from(b)),
    Json::Number(n) => match n.as_i64() {
      Some(i) => Value::Integer(i),
      None => n.as_f64().map_or(Value::Null, Value::Real),
    },
    Json::String(s) => Value::Text(s),
    other @ (Json::Array(_) | Json::Object(_)) => Value::Text(other.to_string()),
  }
}

fn encode_column(column: &Column, value: Json) -> Value {
  match (column.kind, value) {
    (_, Json::Null) => Value::Null,
    (ColumnKind::Json, v) => Value::Text(v.to_string()),
    (_, v) => to_sql(v),
  }
}

/// Split a draft or patch into `(column, value)` pairs in descriptor order.
///
/// Fields absent from the serialised input are omitted, which is what makes
/// a patch partial. Any key that is not a writable column is rejected.
pub fn fields_of<R: Record, T: Serialize>(input: &T) -> Result<Fields> {
  let mut map: Map<String, Json> = serde_json::from_value(serde_json::to_value(input)?)?;

  let mut fields = Vec::with_capacity(map.len());
  for column in R::COLUMNS.iter().chain(R::WRITE_ONLY) {
    if let Some(value) = map.remove(column.name) {
      fields.push((column, encode_column(column, value)));
    }
  }

  if let Some(column) = map.into_iter().next().map(|(k, _)| k) {
    return Err(Error::UnknownColumn { table: R::TABLE, column });
  }

  Ok(fields)
}

/// Decode one row selected with [`select_list`] into an entity.
pub fn decode_row<R: Record>(mut row: Row) -> Result<R> {
  for column in R::COLUMNS.iter().filter(|c| c.kind == ColumnKind::Json) {
    let parsed: Json = match row.get(column.name) {
      Some(Json::String(text)) => serde_json::from_str(text)?,
      _ => continue,
    };
    row.insert(column.name.to_owned(), parsed);
  }
  Ok(serde_json::from_value(Json::Object(row))?)
}

/// `id, col_a, col_b, …`: every readable column of `R`.
pub fn select_list<R: Record>() -> String {
  std::iter::once("id")
    .chain(R::COLUMNS.iter().map(|c| c.name))
    .collect::<Vec<_>>()
    .join(", ")
}

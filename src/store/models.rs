//! Row models and value conversion between JSON and SQLite.
//!
//! Reads come back as plain JSON objects keyed by column name, typed by the
//! runtime SQLite storage class of each value. Writes take loosely typed
//! client values and bind each one with its own SQLite type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Column, Row, Sqlite, TypeInfo, ValueRef};

/// A row as returned to HTTP clients
pub type Record = Map<String, Value>;

/// A scalar value supplied by a client, from a JSON or form body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl FieldValue {
    /// Empty strings, zero and `false` count as missing input
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Integer(i) => *i != 0,
            FieldValue::Real(f) => *f != 0.0 && !f.is_nan(),
            FieldValue::Text(s) => !s.is_empty(),
        }
    }

    /// Render as text, the way it reads in a JSON body
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Real(f) => f.to_string(),
            FieldValue::Text(s) => s,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

/// The seven non-key columns of an `estadistica` row, in column order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstadisticaFields {
    #[serde(default)]
    pub fecha_ingreso: Option<FieldValue>,
    #[serde(default)]
    pub hora_ingreso: Option<FieldValue>,
    #[serde(default)]
    pub pais: Option<FieldValue>,
    #[serde(default)]
    pub ciudad: Option<FieldValue>,
    #[serde(default)]
    pub tiempo: Option<FieldValue>,
    #[serde(default)]
    pub ruta: Option<FieldValue>,
    #[serde(default)]
    pub dispositivo: Option<FieldValue>,
}

impl EstadisticaFields {
    /// Values in the positional order used by INSERT and UPDATE
    pub fn values(&self) -> [&Option<FieldValue>; 7] {
        [
            &self.fecha_ingreso,
            &self.hora_ingreso,
            &self.pais,
            &self.ciudad,
            &self.tiempo,
            &self.ruta,
            &self.dispositivo,
        ]
    }
}

/// A complete `estadistica` record. The key is caller-supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewEstadistica {
    #[serde(default)]
    pub id: Option<FieldValue>,
    #[serde(default)]
    pub fecha_ingreso: Option<FieldValue>,
    #[serde(default)]
    pub hora_ingreso: Option<FieldValue>,
    #[serde(default)]
    pub pais: Option<FieldValue>,
    #[serde(default)]
    pub ciudad: Option<FieldValue>,
    #[serde(default)]
    pub tiempo: Option<FieldValue>,
    #[serde(default)]
    pub ruta: Option<FieldValue>,
    #[serde(default)]
    pub dispositivo: Option<FieldValue>,
}

impl NewEstadistica {
    /// Split into the key and the remaining columns
    pub fn into_parts(self) -> (Option<FieldValue>, EstadisticaFields) {
        let fields = EstadisticaFields {
            fecha_ingreso: self.fecha_ingreso,
            hora_ingreso: self.hora_ingreso,
            pais: self.pais,
            ciudad: self.ciudad,
            tiempo: self.tiempo,
            ruta: self.ruta,
            dispositivo: self.dispositivo,
        };
        (self.id, fields)
    }
}

/// Bind a client value with the matching SQLite type; absent binds NULL
pub(crate) fn bind_field<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &'q Option<FieldValue>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        Some(FieldValue::Bool(b)) => query.bind(i64::from(*b)),
        Some(FieldValue::Integer(i)) => query.bind(*i),
        Some(FieldValue::Real(f)) => query.bind(*f),
        Some(FieldValue::Text(s)) => query.bind(s.as_str()),
        None => query.bind(None::<String>),
    }
}

/// Convert a `SELECT *` row into a JSON object keyed by column name
pub(crate) fn row_to_record(row: &SqliteRow) -> Result<Record, sqlx::Error> {
    let mut record = Record::new();

    for column in row.columns() {
        let idx = column.ordinal();
        let raw = row.try_get_raw(idx)?;

        let value = if raw.is_null() {
            Value::Null
        } else {
            match raw.type_info().name() {
                "INTEGER" => Value::from(row.try_get::<i64, _>(idx)?),
                "REAL" => Value::from(row.try_get::<f64, _>(idx)?),
                "BLOB" => Value::from(row.try_get::<Vec<u8>, _>(idx)?),
                _ => Value::from(row.try_get::<String, _>(idx)?),
            }
        };

        record.insert(column.name().to_string(), value);
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value_from_json_scalars() {
        let values: Vec<FieldValue> = serde_json::from_value(json!([true, 7, 2.5, "abc"])).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Bool(true),
                FieldValue::Integer(7),
                FieldValue::Real(2.5),
                FieldValue::Text("abc".to_string()),
            ]
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(!FieldValue::from("").is_truthy());
        assert!(!FieldValue::from(0).is_truthy());
        assert!(!FieldValue::Bool(false).is_truthy());
        assert!(!FieldValue::Real(0.0).is_truthy());
        assert!(FieldValue::from("0").is_truthy());
        assert!(FieldValue::from(3).is_truthy());
    }

    #[test]
    fn test_into_text() {
        assert_eq!(FieldValue::Integer(42).into_text(), "42");
        assert_eq!(FieldValue::Real(2.5).into_text(), "2.5");
        assert_eq!(FieldValue::Bool(true).into_text(), "true");
        assert_eq!(FieldValue::from("abc").into_text(), "abc");
    }

    #[test]
    fn test_new_estadistica_missing_fields_default_to_none() {
        let record: NewEstadistica =
            serde_json::from_value(json!({"id": 4, "pais": "Chile", "tiempo": null})).unwrap();
        let (id, fields) = record.into_parts();

        assert_eq!(id, Some(FieldValue::Integer(4)));
        assert_eq!(fields.pais, Some(FieldValue::from("Chile")));
        assert!(fields.tiempo.is_none());
        assert!(fields.ruta.is_none());
    }

    #[test]
    fn test_field_order() {
        let fields = EstadisticaFields {
            fecha_ingreso: Some("2023-10-01".into()),
            dispositivo: Some("mobile".into()),
            ..Default::default()
        };
        let values = fields.values();
        assert_eq!(values[0], &Some(FieldValue::from("2023-10-01")));
        assert_eq!(values[6], &Some(FieldValue::from("mobile")));
        assert!(values[3].is_none());
    }
}

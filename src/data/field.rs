use serde::{Deserialize, Serialize};
use sqlx::{
    Decode, Sqlite, Type, TypeInfo, ValueRef,
    error::BoxDynError,
    query::Query,
    sqlite::{SqliteArguments, SqliteTypeInfo, SqliteValueRef},
};

/// A single column value, kept as whatever SQLite type it arrives as.
///
/// Request fields are bound with their own type and the column affinity decides what gets stored,
/// so `"21"` in an `INTEGER` column is stored as `21` and `1` in a `TEXT` column as `'1'`.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Other(serde_json::Value),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

pub fn bind_field<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    field: Option<FieldValue>,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match field {
        None => query.bind(None::<String>),
        Some(FieldValue::Bool(value)) => query.bind(i64::from(value)),
        Some(FieldValue::Integer(value)) => query.bind(value),
        Some(FieldValue::Real(value)) => query.bind(value),
        Some(FieldValue::Text(value)) => query.bind(value),
        //arrays and objects go in as their JSON text
        Some(FieldValue::Other(value)) => query.bind(value.to_string()),
    }
}

impl Type<Sqlite> for FieldValue {
    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }

    fn compatible(_ty: &SqliteTypeInfo) -> bool {
        true
    }
}

impl<'r> Decode<'r, Sqlite> for FieldValue {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let type_name = value.type_info().name().to_string();

        match type_name.as_str() {
            "INTEGER" => Ok(Self::Integer(<i64 as Decode<Sqlite>>::decode(value)?)),
            "REAL" => Ok(Self::Real(<f64 as Decode<Sqlite>>::decode(value)?)),
            _ => Ok(Self::Text(<String as Decode<Sqlite>>::decode(value)?)),
        }
    }
}

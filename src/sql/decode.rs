//! Decoding of SQLite rows into JSON values

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row, TypeInfo, ValueRef};

use crate::error::Result;

/// Decode a SQLite row into a column-ordered map of JSON values
///
/// Values are mapped by storage class: INTEGER to JSON numbers, REAL to
/// floats, TEXT to strings, BLOB to base64 strings, NULL to null. Columns
/// with unrecognized declared types fall back to their text representation.
pub fn row_to_json(row: &SqliteRow) -> Result<IndexMap<String, JsonValue>> {
    let mut value = IndexMap::new();
    for (i, column) in row.columns().iter().enumerate() {
        value.insert(column.name().to_string(), decode_column(row, i)?);
    }
    Ok(value)
}

fn decode_column(row: &SqliteRow, index: usize) -> Result<JsonValue> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(JsonValue::Null);
    }

    let type_info = raw.type_info();
    let decoded = match type_info.name() {
        "INTEGER" => JsonValue::from(row.try_get::<i64, _>(index)?),
        "BOOLEAN" => JsonValue::from(row.try_get::<bool, _>(index)?),
        "REAL" => serde_json::Number::from_f64(row.try_get::<f64, _>(index)?)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        "BLOB" => JsonValue::String(BASE64.encode(row.try_get::<Vec<u8>, _>(index)?)),
        "NUMERIC" => match row.try_get::<i64, _>(index) {
            Ok(n) => JsonValue::from(n),
            Err(_) => serde_json::Number::from_f64(row.try_get::<f64, _>(index)?)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
        },
        // TEXT and date/time storage classes
        _ => JsonValue::String(row.try_get::<String, _>(index)?),
    };

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Connection;
    use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};

    #[tokio::test]
    async fn test_decode_storage_classes() {
        let options = SqliteConnectOptions::new().in_memory(true);
        let mut conn = SqliteConnection::connect_with(&options).await.unwrap();

        sqlx::query("CREATE TABLE t (i INTEGER, r REAL, s TEXT, b BLOB, n TEXT)")
            .execute(&mut conn)
            .await
            .unwrap();
        sqlx::query("INSERT INTO t VALUES (42, 1.5, 'hello', x'00ff', NULL)")
            .execute(&mut conn)
            .await
            .unwrap();

        let row = sqlx::query("SELECT i, r, s, b, n FROM t")
            .fetch_one(&mut conn)
            .await
            .unwrap();

        let decoded = row_to_json(&row).unwrap();
        assert_eq!(decoded["i"], JsonValue::from(42));
        assert_eq!(decoded["r"], JsonValue::from(1.5));
        assert_eq!(decoded["s"], JsonValue::from("hello"));
        assert_eq!(decoded["b"], JsonValue::from(BASE64.encode([0u8, 0xff])));
        assert_eq!(decoded["n"], JsonValue::Null);

        // Column order preserved
        let keys: Vec<&String> = decoded.keys().collect();
        assert_eq!(keys, ["i", "r", "s", "b", "n"]);
    }
}

//! Statement construction and execution utilities.

use tracing::{debug, info};

use super::{render_literal, DatabaseBackend, DbError};
use crate::types::Record;

/// Projection used by the post-insert SELECT when none is given.
pub const DEFAULT_RETURN_FIELDS: &str = "*";

/// Build one INSERT statement from a record's own fields.
///
/// Columns follow the record's field order, so records in the same batch may
/// produce different column lists. Table and column names are not quoted.
pub fn build_insert(table: &str, record: &Record) -> String {
    let columns: Vec<&str> = record.keys().map(String::as_str).collect();
    let values: Vec<String> = record.values().map(render_literal).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        table,
        columns.join(","),
        values.join(",")
    )
}

/// Build the unfiltered SELECT that follows an insert.
pub fn build_select(table: &str, return_fields: &str) -> String {
    format!("SELECT {} from {}", return_fields, table)
}

/// Join statements into one multi-statement command.
///
/// Each statement is trimmed and loses its trailing semicolons; empty
/// statements are dropped; the rest are joined with `;`.
pub fn concat_statements<S: AsRef<str>>(statements: &[S]) -> String {
    statements
        .iter()
        .map(|s| s.as_ref().trim().trim_end_matches(';').trim_end())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(";")
}

/// Run a caller-supplied query once and return its rows.
pub fn run_query(db: &mut dyn DatabaseBackend, sql: &str) -> Result<Vec<Record>, DbError> {
    debug!(backend = db.backend_name(), sql, "Executing query");
    let rows = db.execute_query(sql)?;
    debug!(rows = rows.len(), "Query returned");
    Ok(rows)
}

/// Insert every record into `table` with a single multi-statement submission.
///
/// Returns the number of INSERT statements submitted. An empty batch submits
/// nothing.
pub fn insert_records(
    db: &mut dyn DatabaseBackend,
    table: &str,
    records: &[Record],
) -> Result<usize, DbError> {
    let statements: Vec<String> = records.iter().map(|r| build_insert(table, r)).collect();

    if statements.is_empty() {
        debug!(table, "No records to insert");
        return Ok(0);
    }

    info!(table, statements = statements.len(), "Submitting insert batch");
    db.execute_batch(&concat_statements(&statements))?;
    Ok(statements.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{record, RecordingConnector, Submitted};
    use crate::db::{with_connection, ConnectionConfig, Credential};
    use rstest::rstest;
    use serde_json::json;

    fn config() -> ConnectionConfig {
        ConnectionConfig::from_credential(&Credential::default())
    }

    #[rstest]
    fn test_build_insert_single_record() {
        let r = record(json!({"id": 1, "name": "x"}));
        assert_eq!(build_insert("t", &r), "INSERT INTO t (id,name) VALUES (1,'x');");
    }

    #[rstest]
    fn test_build_insert_keeps_field_order() {
        let r = record(json!({"name": "x", "ts": "2024-01-01T00:00:00Z", "id": 7}));
        assert_eq!(
            build_insert("trades", &r),
            "INSERT INTO trades (name,ts,id) VALUES ('x','2024-01-01T00:00:00Z',7);"
        );
    }

    #[rstest]
    fn test_build_insert_mixed_types() {
        let r = record(json!({"price": 10.5, "active": true, "note": null}));
        assert_eq!(
            build_insert("t", &r),
            "INSERT INTO t (price,active,note) VALUES (10.5,true,null);"
        );
    }

    #[rstest]
    fn test_build_insert_heterogeneous_records() {
        let a = build_insert("t", &record(json!({"id": 1, "name": "x"})));
        let b = build_insert("t", &record(json!({"id": 2, "price": 3})));
        assert_eq!(a, "INSERT INTO t (id,name) VALUES (1,'x');");
        assert_eq!(b, "INSERT INTO t (id,price) VALUES (2,3);");
    }

    #[rstest]
    fn test_build_insert_unescaped_quote_breaks_statement() {
        let stmt = build_insert("people", &record(json!({"name": "O'Brien"})));
        assert_eq!(stmt, "INSERT INTO people (name) VALUES ('O'Brien');");
        // An odd number of quotes leaves a literal unterminated.
        assert_eq!(stmt.matches('\'').count() % 2, 1);
    }

    #[rstest]
    fn test_build_select() {
        assert_eq!(build_select("t", "*"), "SELECT * from t");
        assert_eq!(build_select("t", "id,name"), "SELECT id,name from t");
    }

    #[rstest]
    fn test_concat_statements() {
        let joined = concat_statements(&[
            "INSERT INTO t (id) VALUES (1);",
            "  INSERT INTO t (id) VALUES (2);;  ",
            "",
            "INSERT INTO t (id) VALUES (3)",
        ]);
        assert_eq!(
            joined,
            "INSERT INTO t (id) VALUES (1);INSERT INTO t (id) VALUES (2);INSERT INTO t (id) VALUES (3)"
        );
    }

    #[rstest]
    fn test_concat_statements_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(concat_statements(&empty), "");
    }

    #[rstest]
    fn test_insert_records_submits_one_batch() {
        let connector = RecordingConnector::new();
        let records = vec![
            record(json!({"id": 1, "name": "x"})),
            record(json!({"id": 2, "name": "y"})),
        ];
        let count =
            with_connection(&connector, config(), |db| insert_records(db, "t", &records)).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            connector.log().submitted,
            vec![Submitted::Batch(
                "INSERT INTO t (id,name) VALUES (1,'x');INSERT INTO t (id,name) VALUES (2,'y')"
                    .to_string()
            )]
        );
    }

    #[rstest]
    fn test_insert_records_empty_batch_submits_nothing() {
        let connector = RecordingConnector::new();
        let count = with_connection(&connector, config(), |db| insert_records(db, "t", &[])).unwrap();
        assert_eq!(count, 0);
        assert!(connector.log().submitted.is_empty());
    }

    #[rstest]
    fn test_run_query_forwards_sql_unchanged() {
        let connector = RecordingConnector::new().with_rows(vec![record(json!({"id": 1}))]);
        let rows = with_connection(&connector, config(), |db| run_query(db, "")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(connector.log().submitted, vec![Submitted::Query(String::new())]);
    }
}

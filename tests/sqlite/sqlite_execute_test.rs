//! Transpiled SQLite runs on a real SQLite engine.

use rusqlite::{params, Connection};
use transql::dialect::Dialect;
use transql::render::{RenderOptions, Rendered};
use transql::transpile::transpile;

fn to_sqlite(sql: &str) -> Vec<Rendered> {
    transpile(
        sql,
        Dialect::Generic.descriptor(),
        Dialect::Sqlite.descriptor(),
        RenderOptions::default(),
    )
    .unwrap()
}

fn single(sql: &str) -> String {
    let mut out = to_sqlite(sql);
    assert_eq!(out.len(), 1, "expected one statement from {sql}");
    out.remove(0).sql
}

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    let create = single(
        "CREATE TABLE people (id BIGINT PRIMARY KEY AUTO_INCREMENT, name VARCHAR(40) NOT NULL, \
         team VARCHAR(10), score DOUBLE PRECISION, active BOOLEAN DEFAULT TRUE, doc JSON)",
    );
    conn.execute(&create, []).unwrap();

    let rows = [
        ("ann", "a", 80.5, r#"{"a": {"b": 2}}"#),
        ("bob", "a", 40.0, r#"{"a": {"b": 3}}"#),
        ("cy", "b", 60.0, r#"{"a": {"b": 4}}"#),
    ];
    for (name, team, score, doc) in rows {
        conn.execute(
            "INSERT INTO people (name, team, score, doc) VALUES (?1, ?2, ?3, ?4)",
            params![name, team, score, doc],
        )
        .unwrap();
    }
    conn
}

#[test]
fn create_table_uses_autoincrement() {
    let conn = setup();
    let ids: Vec<i64> = conn
        .prepare("SELECT id FROM people ORDER BY id")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(ids, vec![1, 2, 3]);

    let active: i64 = conn
        .query_row("SELECT active FROM people WHERE name = 'ann'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(active, 1);
}

#[test]
fn group_concat_distinct_runs() {
    let conn = setup();
    let sql = single("SELECT GROUP_CONCAT(DISTINCT team) FROM people");
    let teams: String = conn.query_row(&sql, [], |row| row.get(0)).unwrap();
    let mut teams: Vec<&str> = teams.split(',').collect();
    teams.sort();
    assert_eq!(teams, vec!["a", "b"]);
}

#[test]
fn least_and_greatest_run() {
    let conn = setup();
    let sql = single("SELECT LEAST(score, 50), GREATEST(score, 50) FROM people WHERE name = 'ann'");
    let (low, high): (f64, f64) = conn
        .query_row(&sql, [], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap();
    assert_eq!(low, 50.0);
    assert_eq!(high, 80.5);
}

#[test]
fn fetch_with_offset_runs() {
    let conn = setup();
    let sql = single("SELECT name FROM people ORDER BY id OFFSET 1 ROWS FETCH FIRST 1 ROWS ONLY");
    assert_eq!(sql, "SELECT name FROM people ORDER BY id LIMIT 1 OFFSET 1");
    let name: String = conn.query_row(&sql, [], |row| row.get(0)).unwrap();
    assert_eq!(name, "bob");
}

#[test]
fn ilike_degrade_runs() {
    let conn = setup();
    let out = to_sqlite("SELECT name FROM people WHERE name ILIKE 'A%'").remove(0);
    assert_eq!(out.diagnostics.len(), 1);
    let name: String = conn.query_row(&out.sql, [], |row| row.get(0)).unwrap();
    assert_eq!(name, "ann");
}

#[test]
fn date_add_runs() {
    let conn = setup();
    let sql = single("SELECT DATE_ADD('2024-01-31', 1, 'day')");
    assert_eq!(sql, "SELECT DATE('2024-01-31', '1 day')");
    let date: String = conn.query_row(&sql, [], |row| row.get(0)).unwrap();
    assert_eq!(date, "2024-02-01");
}

#[test]
fn date_string_cast_passes_through() {
    let conn = setup();
    let sql = single("SELECT DATE_STR_TO_DATE('2024-03-01')");
    let date: String = conn.query_row(&sql, [], |row| row.get(0)).unwrap();
    assert_eq!(date, "2024-03-01");
}

#[test]
fn json_extraction_runs() {
    let conn = setup();
    let sql = single(
        "SELECT JSON_EXTRACT(doc, '$.a'), JSON_EXTRACT_SCALAR(doc, '$.a.b') FROM people \
         WHERE name = 'cy'",
    );
    assert_eq!(
        sql,
        "SELECT doc -> '$.a', doc ->> '$.a.b' FROM people WHERE name = 'cy'"
    );
    let (object, scalar): (String, i64) = conn
        .query_row(&sql, [], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap();
    assert_eq!(object, r#"{"b":4}"#);
    assert_eq!(scalar, 4);
}

#[test]
fn try_cast_degrade_runs() {
    let conn = setup();
    let out = to_sqlite("SELECT TRY_CAST(score AS INT) FROM people WHERE name = 'ann'").remove(0);
    assert_eq!(out.sql, "SELECT CAST(score AS INTEGER) FROM people WHERE name = 'ann'");
    let score: i64 = conn.query_row(&out.sql, [], |row| row.get(0)).unwrap();
    assert_eq!(score, 80);
}

#[test]
fn transactions_run() {
    let conn = setup();
    let script: Vec<String> = to_sqlite("BEGIN DEFERRED; COMMIT; BEGIN; ROLLBACK")
        .into_iter()
        .map(|r| r.sql)
        .collect();
    assert_eq!(
        script,
        vec!["BEGIN DEFERRED TRANSACTION", "COMMIT", "BEGIN TRANSACTION", "ROLLBACK"]
    );
    conn.execute_batch(&script.join(";\n")).unwrap();
}

#[test]
fn bare_offset_runs() {
    let conn = setup();
    let out = to_sqlite("SELECT name FROM people ORDER BY id OFFSET 2 ROWS").remove(0);
    assert_eq!(out.sql, "SELECT name FROM people ORDER BY id LIMIT -1 OFFSET 2");
    assert!(out.diagnostics.is_empty());
    let name: String = conn.query_row(&out.sql, [], |row| row.get(0)).unwrap();
    assert_eq!(name, "cy");
}

#[test]
fn hex_integers_stay_integers() {
    let conn = Connection::open_in_memory().unwrap();
    let original = "SELECT 0x1F + 1, length(x'CAFE')";
    let out = transpile(
        original,
        Dialect::Sqlite.descriptor(),
        Dialect::Sqlite.descriptor(),
        RenderOptions::default(),
    )
    .unwrap()
    .remove(0);
    assert_eq!(out.sql, "SELECT 0x1F + 1, length(x'CAFE')");

    let row = |sql: &str| -> (i64, i64) {
        conn.query_row(sql, [], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
    };
    assert_eq!(row(original), (32, 2));
    assert_eq!(row(&out.sql), (32, 2));

    // The generic dialect has no hex integers, so the value is spelled out
    let generic = transpile(
        original,
        Dialect::Sqlite.descriptor(),
        Dialect::Generic.descriptor(),
        RenderOptions::default(),
    )
    .unwrap()
    .remove(0);
    assert_eq!(generic.sql, "SELECT 31 + 1, length(X'CAFE')");
}

#[test]
fn odd_length_blob_is_padded() {
    let conn = Connection::open_in_memory().unwrap();
    let out = to_sqlite("SELECT length(X'ABC')").remove(0);
    assert_eq!(out.sql, "SELECT length(x'0ABC')");
    assert_eq!(out.diagnostics.len(), 1);
    let len: i64 = conn.query_row(&out.sql, [], |row| row.get(0)).unwrap();
    assert_eq!(len, 2);
}

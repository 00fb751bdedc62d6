//! Reading SQLite text.

use insta::assert_snapshot;
use transql::dialect::Dialect;
use transql::expr::*;
use transql::parser::{parse, parse_one, ParseError};
use transql::render::{render, RenderOptions};

fn read_sqlite(sql: &str) -> Expr {
    parse_one(sql, Dialect::Sqlite.descriptor()).unwrap()
}

fn to(dialect: Dialect, expr: &Expr) -> String {
    render(expr, dialect.descriptor(), RenderOptions::default())
        .unwrap()
        .sql
}

#[test]
fn all_identifier_quote_styles() {
    let stmt = read_sqlite(r#"SELECT "a", [b], `c` FROM [my table]"#);
    assert_snapshot!(to(Dialect::Sqlite, &stmt), @r#"SELECT "a", "b", "c" FROM "my table""#);
}

#[test]
fn brackets_are_not_identifiers_in_generic() {
    let err = parse("SELECT [b] FROM t", Dialect::Generic.descriptor()).unwrap_err();
    assert_eq!(err, ParseError::UnexpectedChar { ch: '[', offset: 7 });
}

#[test]
fn hex_string_forms() {
    let stmt = read_sqlite("SELECT x'CAFE', X'00', 0x1F");
    assert_snapshot!(to(Dialect::Sqlite, &stmt), @"SELECT x'CAFE', x'00', 0x1F");
    assert_snapshot!(to(Dialect::Generic, &stmt), @"SELECT X'CAFE', X'00', 31");
}

#[test]
fn autoincrement_keyword() {
    let stmt = read_sqlite("CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT)");
    assert_snapshot!(to(Dialect::Sqlite, &stmt), @"CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT)");
    assert_snapshot!(to(Dialect::Generic, &stmt), @"CREATE TABLE t (id INT PRIMARY KEY AUTO_INCREMENT, name TEXT)");
}

#[test]
fn editdist3_reads_as_levenshtein() {
    let stmt = read_sqlite("SELECT editdist3(a, 'b') FROM words");
    let found = stmt.find(|e| e.kind() == NodeKind::Levenshtein);
    assert_eq!(found, Some(&levenshtein(vec![col("a"), lit_str("b")])));
    assert_snapshot!(to(Dialect::Generic, &stmt), @"SELECT LEVENSHTEIN(a, 'b') FROM words");
}

#[test]
fn json_arrows_read_as_extraction() {
    let stmt = read_sqlite("SELECT doc -> '$.a', doc ->> '$.b' FROM docs");
    assert!(stmt.find(|e| e.kind() == NodeKind::JsonExtract).is_some());
    assert!(stmt.find(|e| e.kind() == NodeKind::JsonExtractScalar).is_some());
    assert_snapshot!(to(Dialect::Generic, &stmt), @"SELECT JSON_EXTRACT(doc, '$.a'), JSON_EXTRACT_SCALAR(doc, '$.b') FROM docs");
    assert_snapshot!(to(Dialect::Sqlite, &stmt), @"SELECT doc -> '$.a', doc ->> '$.b' FROM docs");
}

#[test]
fn comma_limit_reads_offset_first() {
    let stmt = read_sqlite("SELECT * FROM t LIMIT 5, 10");
    assert_snapshot!(to(Dialect::Sqlite, &stmt), @"SELECT * FROM t LIMIT 10 OFFSET 5");
}

#[test]
fn transaction_modifiers() {
    let stmts = parse(
        "BEGIN EXCLUSIVE TRANSACTION; COMMIT TRANSACTION",
        Dialect::Sqlite.descriptor(),
    )
    .unwrap();
    assert_eq!(stmts[0], begin_transaction(Some("EXCLUSIVE")));
    assert_eq!(stmts[1], Expr::Commit);
    assert_snapshot!(to(Dialect::Sqlite, &stmts[0]), @"BEGIN EXCLUSIVE TRANSACTION");
}

#[test]
fn unknown_functions_stay_generic_calls() {
    let stmt = read_sqlite("SELECT strftime('%Y', created_at) FROM t");
    assert!(stmt.find(|e| e.kind() == NodeKind::Function).is_some());
    assert_snapshot!(to(Dialect::Sqlite, &stmt), @"SELECT strftime('%Y', created_at) FROM t");
}

#[test]
fn group_concat_reads_distinct_and_separator() {
    let stmt = read_sqlite("SELECT GROUP_CONCAT(DISTINCT name) FROM users");
    assert_eq!(
        stmt.find(|e| e.kind() == NodeKind::GroupConcat),
        Some(&group_concat(distinct(vec![col("name")]), None))
    );

    let stmt = read_sqlite("SELECT group_concat(name, ';') FROM users");
    assert_snapshot!(to(Dialect::Generic, &stmt), @"SELECT GROUP_CONCAT(name SEPARATOR ';') FROM users");
}

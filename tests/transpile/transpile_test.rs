use insta::assert_snapshot;
use transql::dialect::Dialect;
use transql::parser::ParseError;
use transql::render::RenderOptions;
use transql::transpile::{transpile, TranspileError};
use transql::ExprExt;

fn generic_to_sqlite(sql: &str) -> String {
    transpile(
        sql,
        Dialect::Generic.descriptor(),
        Dialect::Sqlite.descriptor(),
        RenderOptions::default(),
    )
    .unwrap()
    .into_iter()
    .map(|r| r.sql)
    .collect::<Vec<_>>()
    .join(";\n")
}

fn sqlite_to_generic(sql: &str) -> String {
    transpile(
        sql,
        Dialect::Sqlite.descriptor(),
        Dialect::Generic.descriptor(),
        RenderOptions::default(),
    )
    .unwrap()
    .into_iter()
    .map(|r| r.sql)
    .collect::<Vec<_>>()
    .join(";\n")
}

#[test]
fn report_query_to_sqlite() {
    let sql = generic_to_sqlite(
        "SELECT team, GROUP_CONCAT(name ORDER BY name SEPARATOR ', ') AS members, \
         GREATEST(MAX(score), 0) AS best \
         FROM people AS p \
         WHERE p.joined >= DATE_ADD(p.started, -30, DAY) AND p.name IS NOT NULL \
         GROUP BY team HAVING COUNT(*) > 1 \
         ORDER BY best DESC \
         FETCH FIRST 5 ROWS ONLY",
    );
    assert_snapshot!(sql, @"SELECT team, GROUP_CONCAT(name, ', ') AS members, MAX(MAX(score), 0) AS best FROM people AS p WHERE p.joined >= DATE(p.started, '-30 DAY') AND p.name IS NOT NULL GROUP BY team HAVING COUNT(*) > 1 ORDER BY best DESC LIMIT 5");
}

#[test]
fn sqlite_to_generic_restores_canonical_forms() {
    let sql = sqlite_to_generic(
        "SELECT `id`, doc ->> '$.name', editdist3(a, b) FROM [users] LIMIT 10 OFFSET 20",
    );
    assert_snapshot!(sql, @r#"SELECT "id", JSON_EXTRACT_SCALAR(doc, '$.name'), LEVENSHTEIN(a, b) FROM "users" LIMIT 10 OFFSET 20"#);
}

#[test]
fn fetch_follows_offset_in_generic() {
    let sql = sqlite_to_generic("SELECT a FROM t OFFSET 2 ROWS FETCH NEXT 3 ROWS ONLY");
    assert_snapshot!(sql, @"SELECT a FROM t OFFSET 2 ROWS FETCH NEXT 3 ROWS ONLY");
}

#[test]
fn multiple_statements() {
    let sql = generic_to_sqlite(
        "BEGIN IMMEDIATE; CREATE TABLE t (id BIGINT PRIMARY KEY AUTO_INCREMENT, ok BOOLEAN); COMMIT;",
    );
    assert_snapshot!(sql, @r"
    BEGIN IMMEDIATE TRANSACTION;
    CREATE TABLE t (id INTEGER PRIMARY KEY AUTOINCREMENT, ok INTEGER);
    COMMIT
    ");
}

#[test]
fn transpiling_is_deterministic() {
    let sql = "SELECT TRY_CAST(a AS SMALLINT), b ILIKE 'x' FROM t TABLESAMPLE (10 PERCENT)";
    let first = transpile(
        sql,
        Dialect::Generic.descriptor(),
        Dialect::Sqlite.descriptor(),
        RenderOptions::default(),
    )
    .unwrap();
    let second = transpile(
        sql,
        Dialect::Generic.descriptor(),
        Dialect::Sqlite.descriptor(),
        RenderOptions::default(),
    )
    .unwrap();
    assert_eq!(first, second);
    assert_eq!(first[0].sql, "SELECT CAST(a AS INTEGER), LOWER(b) LIKE 'x' FROM t");
    assert_eq!(first[0].diagnostics.len(), 3);
}

#[test]
fn invalid_arguments_are_parse_errors() {
    let err = transpile(
        "SELECT GREATEST() FROM t",
        Dialect::Generic.descriptor(),
        Dialect::Sqlite.descriptor(),
        RenderOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        TranspileError::Parse(ParseError::InvalidArguments { .. })
    ));
}

#[test]
fn crate_root_exports() {
    let out: transql::Rendered = transql::render(
        &transql::col("a").eq(transql::lit_int(1)),
        transql::Dialect::Sqlite.descriptor(),
        transql::RenderOptions::default(),
    )
    .unwrap();
    assert_eq!(out.sql, "a = 1");

    let stmts = transql::transpile(
        "SELECT 1",
        transql::Dialect::Generic.descriptor(),
        transql::Dialect::Sqlite.descriptor(),
        transql::RenderOptions::default(),
    )
    .unwrap();
    assert_eq!(stmts[0].sql, "SELECT 1");
}

//! Rendering canonical trees as SQLite.

use insta::assert_snapshot;
use sqlparser::dialect::SQLiteDialect;
use sqlparser::parser::Parser;
use transql::dialect::Dialect;
use transql::expr::*;
use transql::render::{render, RenderError, RenderOptions, Rendered, UnsupportedLevel};
use transql::types::{DataType, TypeKind};

fn sqlite(expr: &Expr) -> Rendered {
    render(expr, Dialect::Sqlite.descriptor(), RenderOptions::default()).unwrap()
}

fn sqlite_sql(expr: &Expr) -> String {
    sqlite(expr).sql
}

fn assert_valid_sqlite(sql: &str) {
    if let Err(e) = Parser::parse_sql(&SQLiteDialect {}, sql) {
        panic!("Invalid SQL for sqlite: {e}\nSQL: {sql}");
    }
}

// ============================================================================
// Aggregates
// ============================================================================

#[test]
fn group_concat_distinct() {
    let query = Select::new()
        .column(group_concat(distinct(vec![col("name")]), None).alias("names"))
        .from(table("users"))
        .group_by(vec![col("team")])
        .build();
    let out = sqlite(&query);
    assert_snapshot!(out.sql, @"SELECT GROUP_CONCAT(DISTINCT name) AS names FROM users GROUP BY team");
    assert!(out.diagnostics.is_empty());
    assert_valid_sqlite(&out.sql);
}

#[test]
fn group_concat_with_separator() {
    let expr = group_concat(col("name"), Some(lit_str("; ")));
    assert_snapshot!(sqlite_sql(&expr), @"GROUP_CONCAT(name, '; ')");
}

#[test]
fn group_concat_ordering_is_reported() {
    let expr = group_concat(
        col("name").order_by(vec![OrderItem::desc(col("id"))]),
        Some(lit_str(",")),
    );
    let out = sqlite(&expr);
    assert_snapshot!(out.sql, @"GROUP_CONCAT(name, ',')");
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].node, NodeKind::GroupConcat);
}

#[test]
fn least_and_greatest() {
    let query = Select::new()
        .columns(vec![
            least(vec![col("a"), col("b")]),
            greatest(vec![col("a"), lit_int(0)]),
            least(vec![col("c")]),
        ])
        .from(table("t"))
        .build();
    let sql = sqlite_sql(&query);
    assert_snapshot!(sql, @"SELECT MIN(a, b), MAX(a, 0), c FROM t");
    assert_valid_sqlite(&sql);
}

#[test]
fn levenshtein_renders_as_editdist3() {
    let expr = levenshtein(vec![col("word"), lit_str("kitten")]);
    assert_snapshot!(sqlite_sql(&expr), @"EDITDIST3(word, 'kitten')");
}

// ============================================================================
// Dates and JSON
// ============================================================================

#[test]
fn date_add_with_unit() {
    let expr = date_add(col("created_at"), lit_int(7), Some("day"));
    assert_snapshot!(sqlite_sql(&expr), @"DATE(created_at, '7 day')");
}

#[test]
fn date_add_with_string_modifier() {
    let expr = date_add(col("created_at"), lit_str("start of month"), None);
    assert_snapshot!(sqlite_sql(&expr), @"DATE(created_at, 'start of month')");
}

#[test]
fn date_and_time_string_casts_pass_through() {
    let date = Expr::DateStrToDate {
        this: Box::new(lit_str("2024-01-31")),
    };
    let time = Expr::TimeStrToTime {
        this: Box::new(col("ts")),
    };
    assert_snapshot!(sqlite_sql(&date), @"'2024-01-31'");
    assert_snapshot!(sqlite_sql(&time), @"ts");
}

#[test]
fn json_extraction_uses_arrows() {
    let query = Select::new()
        .columns(vec![
            Expr::JsonExtract {
                this: Box::new(col("doc")),
                path: Box::new(lit_str("$.a")),
            },
            Expr::JsonbExtractScalar {
                this: Box::new(col("doc")),
                path: Box::new(lit_str("$.b")),
            },
        ])
        .from(table("docs"))
        .build();
    assert_snapshot!(sqlite_sql(&query), @"SELECT doc -> '$.a', doc ->> '$.b' FROM docs");
}

// ============================================================================
// Row limiting and transactions
// ============================================================================

#[test]
fn fetch_renders_as_limit_before_offset() {
    let query = Select::new()
        .column(star())
        .from(table("t"))
        .order_by(vec![OrderItem::desc(col("id"))])
        .fetch(fetch_first(10))
        .offset(5)
        .build();
    let out = sqlite(&query);
    assert_snapshot!(out.sql, @"SELECT * FROM t ORDER BY id DESC LIMIT 10 OFFSET 5");
    assert!(out.diagnostics.is_empty());
    assert_valid_sqlite(&out.sql);
}

#[test]
fn fetch_qualifiers_are_dropped_with_diagnostics() {
    let fetch = Expr::Fetch {
        direction: FetchDirection::First,
        count: Some(Box::new(lit_int(10))),
        percent: true,
        with_ties: false,
    };
    let out = sqlite(&fetch);
    assert_snapshot!(out.sql, @"LIMIT 10");
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].node, NodeKind::Fetch);
}

#[test]
fn transactions() {
    assert_snapshot!(sqlite_sql(&begin_transaction(Some("IMMEDIATE"))), @"BEGIN IMMEDIATE TRANSACTION");
    assert_snapshot!(sqlite_sql(&begin_transaction(None)), @"BEGIN TRANSACTION");
    assert_snapshot!(sqlite_sql(&Expr::Commit), @"COMMIT");
}

// ============================================================================
// Types and DDL
// ============================================================================

#[test]
fn type_affinities() {
    let cases = [
        (TypeKind::Boolean, "INTEGER"),
        (TypeKind::TinyInt, "INTEGER"),
        (TypeKind::SmallInt, "INTEGER"),
        (TypeKind::Int, "INTEGER"),
        (TypeKind::BigInt, "INTEGER"),
        (TypeKind::Float, "REAL"),
        (TypeKind::Double, "REAL"),
        (TypeKind::Decimal, "REAL"),
        (TypeKind::Char, "TEXT"),
        (TypeKind::NChar, "TEXT"),
        (TypeKind::Varchar, "TEXT"),
        (TypeKind::NVarchar, "TEXT"),
        (TypeKind::Binary, "BLOB"),
        (TypeKind::VarBinary, "BLOB"),
        (TypeKind::Date, "DATE"),
        (TypeKind::Text, "TEXT"),
    ];
    for (kind, expected) in cases {
        assert_eq!(
            sqlite_sql(&cast(col("x"), kind)),
            format!("CAST(x AS {expected})"),
            "{kind}"
        );
    }
}

#[test]
fn type_parameters_follow_the_substituted_keyword() {
    let expr = cast(col("price"), DataType::with_params(TypeKind::Decimal, vec![10, 2]));
    assert_snapshot!(sqlite_sql(&expr), @"CAST(price AS REAL(10, 2))");
}

#[test]
fn create_table_with_autoincrement() {
    let create = Expr::CreateTable(Box::new(CreateTable {
        table: table("users"),
        if_not_exists: true,
        columns: vec![
            ColumnDef::new("id", TypeKind::BigInt)
                .constraint(ColumnConstraint::PrimaryKey)
                .constraint(ColumnConstraint::AutoIncrement),
            ColumnDef::new("name", TypeKind::Varchar).constraint(ColumnConstraint::NotNull),
            ColumnDef::new("active", TypeKind::Boolean)
                .constraint(ColumnConstraint::Default(lit_int(1))),
        ],
    }));
    let sql = sqlite_sql(&create);
    assert_snapshot!(sql, @"CREATE TABLE IF NOT EXISTS users (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, active INTEGER DEFAULT 1)");
    assert_valid_sqlite(&sql);
}

// ============================================================================
// Degraded constructs
// ============================================================================

#[test]
fn ilike_degrades_to_lower_like() {
    let expr = Expr::ILike {
        this: Box::new(col("name")),
        pattern: Box::new(lit_str("a%")),
        negated: true,
    };
    let out = sqlite(&expr);
    assert_snapshot!(out.sql, @"LOWER(name) NOT LIKE 'a%'");
    assert_eq!(out.diagnostics.len(), 1);
}

#[test]
fn try_cast_degrades_to_cast() {
    let out = sqlite(&try_cast(col("x"), TypeKind::Int));
    assert_snapshot!(out.sql, @"CAST(x AS INTEGER)");
    assert_eq!(out.diagnostics[0].node, NodeKind::TryCast);
}

#[test]
fn tablesample_degrades_to_table() {
    let query = Select::new()
        .column(star())
        .from(Expr::TableSample {
            this: Box::new(table("events")),
            method: None,
            size: Box::new(lit_int(10)),
            unit: SampleUnit::Percent,
        })
        .build();
    let out = sqlite(&query);
    assert_snapshot!(out.sql, @"SELECT * FROM events");
    assert_eq!(out.diagnostics.len(), 1);
}

#[test]
fn diagnostics_are_ordered_and_deterministic() {
    let query = Select::new()
        .column(try_cast(col("x"), TypeKind::Int))
        .from(table("t"))
        .filter(col("name").ilike("a%"))
        .build();
    let first = sqlite(&query);
    let second = sqlite(&query);
    assert_eq!(first, second);
    let nodes: Vec<NodeKind> = first.diagnostics.iter().map(|d| d.node).collect();
    assert_eq!(nodes, vec![NodeKind::TryCast, NodeKind::ILike]);
}

#[test]
fn raise_level_fails_on_degrade() {
    let options = RenderOptions {
        unsupported_level: UnsupportedLevel::Raise,
        ..RenderOptions::default()
    };
    let err = render(
        &try_cast(col("x"), TypeKind::Int),
        Dialect::Sqlite.descriptor(),
        options,
    )
    .unwrap_err();
    match err {
        RenderError::Unsupported {
            dialect,
            diagnostics,
        } => {
            assert_eq!(dialect, "sqlite");
            assert_eq!(diagnostics.len(), 1);
        }
        other => panic!("expected unsupported error, got {other}"),
    }
}

// ============================================================================
// Identifiers and literals
// ============================================================================

#[test]
fn quoted_identifiers_use_double_quotes() {
    let expr = Expr::Column {
        table: Some(Ident::quoted("my table")),
        name: Ident::new("id"),
    };
    assert_snapshot!(sqlite_sql(&expr), @r#""my table".id"#);

    let options = RenderOptions {
        identify: true,
        ..RenderOptions::default()
    };
    let out = render(&col("id"), Dialect::Sqlite.descriptor(), options).unwrap();
    assert_snapshot!(out.sql, @r#""id""#);
}

#[test]
fn hex_strings_use_the_first_delimiter() {
    let expr = Expr::Literal(Literal::HexString("CAFE".into()));
    assert_snapshot!(sqlite_sql(&expr), @"x'CAFE'");
}

//! Override layers: custom dialects composed over the built-in tables.

use transql::dialect::{
    Dialect, DialectBuilder, DialectDescriptor, DialectError, DialectRegistry, Transform,
};
use transql::expr::*;
use transql::parser::parse_one;
use transql::render::{render, RenderContext, RenderOptions, Rendered};
use transql::token::Keyword;
use transql::types::{DataType, TypeKind};

fn corpus() -> Vec<Expr> {
    vec![
        Select::new()
            .columns(vec![
                col("a"),
                least(vec![col("a"), col("b")]),
                greatest(vec![col("c")]),
                group_concat(distinct(vec![col("d")]), Some(lit_str(","))),
                levenshtein(vec![col("a"), lit_str("x")]),
                cast(col("e"), DataType::with_params(TypeKind::Varchar, vec![20])),
                try_cast(col("f"), TypeKind::Boolean),
            ])
            .from(table("t"))
            .filter(col("g").ilike("%x%").and(col("h").is_not_null()))
            .order_by(vec![OrderItem::asc(col("a"))])
            .fetch(fetch_first(3))
            .offset(1)
            .build(),
        date_add(col("day"), lit_int(2), Some("month")),
        Expr::JsonExtract {
            this: Box::new(col("doc")),
            path: Box::new(lit_str("$.k")),
        },
        Expr::JsonbExtractScalar {
            this: Box::new(col("doc")),
            path: Box::new(lit_str("$.k")),
        },
        Expr::DateStrToDate {
            this: Box::new(lit_str("2024-01-01")),
        },
        Expr::TableSample {
            this: Box::new(table("events")),
            method: Some("BERNOULLI".into()),
            size: Box::new(lit_int(5)),
            unit: SampleUnit::Percent,
        },
        Expr::Case {
            operand: None,
            whens: vec![(col("x").gt(1), lit_str("big"))],
            else_result: Some(Box::new(lit_null())),
        },
        Expr::Literal(Literal::HexString("FF".into())),
        lit_float(2.5),
        begin_transaction(Some("DEFERRED")),
        Expr::Rollback,
        Expr::CreateTable(Box::new(CreateTable {
            table: table("items"),
            if_not_exists: false,
            columns: vec![ColumnDef::new("id", TypeKind::Int)
                .constraint(ColumnConstraint::PrimaryKey)
                .constraint(ColumnConstraint::AutoIncrement)],
        })),
    ]
}

fn render_all(dialect: &DialectDescriptor) -> Vec<Rendered> {
    corpus()
        .iter()
        .map(|e| render(e, dialect, RenderOptions::default()).unwrap())
        .collect()
}

#[test]
fn empty_layer_over_base_matches_generic() {
    let plain = DialectBuilder::new("plain").build().unwrap();
    assert_eq!(render_all(&plain), render_all(Dialect::Generic.descriptor()));
}

#[test]
fn empty_layer_over_sqlite_matches_sqlite() {
    let copy = DialectBuilder::extend("sqlite_copy", Dialect::Sqlite.descriptor())
        .build()
        .unwrap();
    assert_eq!(render_all(&copy), render_all(Dialect::Sqlite.descriptor()));
}

#[test]
fn single_override_changes_only_its_kind() {
    let custom = DialectBuilder::new("minimum")
        .transform(NodeKind::Least, Transform::Rename("MINIMUM".into()))
        .build()
        .unwrap();
    let base = render_all(Dialect::Generic.descriptor());
    let changed = render_all(&custom);

    for ((expr, base), changed) in corpus().iter().zip(base).zip(changed) {
        if expr.find(|e| e.kind() == NodeKind::Least).is_some() {
            assert_ne!(base.sql, changed.sql);
            assert_eq!(changed.sql, base.sql.replace("LEAST(", "MINIMUM("));
        } else {
            assert_eq!(base, changed);
        }
    }
}

fn commit_work_sql(_expr: &Expr, ctx: &mut RenderContext<'_>) -> String {
    format!("{} WORK", ctx.keyword(Keyword::Commit))
}

#[test]
fn custom_renderer() {
    let custom = DialectBuilder::new("work")
        .transform(NodeKind::Commit, Transform::Custom(commit_work_sql))
        .build()
        .unwrap();
    let out = render(&Expr::Commit, &custom, RenderOptions::default()).unwrap();
    assert_eq!(out.sql, "COMMIT WORK");
}

#[test]
fn unsupported_transform_degrades_in_any_dialect() {
    let custom = DialectBuilder::new("no_ilike")
        .transform(NodeKind::ILike, Transform::Unsupported)
        .build()
        .unwrap();
    let out = render(&col("a").ilike("x%"), &custom, RenderOptions::default()).unwrap();
    assert_eq!(out.sql, "LOWER(a) LIKE 'x%'");
    assert_eq!(out.diagnostics.len(), 1);
}

#[test]
fn extended_sqlite_keeps_lexical_rules() {
    let strict = DialectBuilder::extend("strict_sqlite", Dialect::Sqlite.descriptor())
        .type_keyword(TypeKind::Boolean, "BOOLEAN")
        .build()
        .unwrap();

    let stmt = parse_one("SELECT CAST([flag] AS BOOLEAN), CAST(n AS INT) FROM t", &strict).unwrap();
    let out = render(&stmt, &strict, RenderOptions::default()).unwrap();
    assert_eq!(out.sql, r#"SELECT CAST("flag" AS BOOLEAN), CAST(n AS INTEGER) FROM t"#);
}

#[test]
fn incompatible_transforms_are_rejected() {
    let err = DialectBuilder::new("bad")
        .transform(NodeKind::Column, Transform::Rename("X".into()))
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        DialectError::IncompatibleTransform {
            kind: NodeKind::Column,
            transform: "rename".into(),
        }
    );

    let err = DialectBuilder::new("bad")
        .transform(NodeKind::Select, Transform::Inner)
        .build()
        .unwrap_err();
    assert!(matches!(err, DialectError::IncompatibleTransform { .. }));
}

#[test]
fn invalid_spellings_are_rejected() {
    let err = DialectBuilder::new("bad")
        .token(Keyword::AutoIncrement, "AUTO INCREMENT")
        .build()
        .unwrap_err();
    assert!(matches!(err, DialectError::InvalidSpelling { .. }));

    let err = DialectBuilder::new("bad").identifiers(&[]).build().unwrap_err();
    assert_eq!(err, DialectError::NoIdentifierDelimiters("bad".into()));
}

#[test]
fn registry_resolves_builtins_and_custom_dialects() {
    let mut registry = DialectRegistry::new();
    let custom = DialectBuilder::extend("Strict", Dialect::Sqlite.descriptor())
        .type_keyword(TypeKind::Boolean, "BOOLEAN")
        .build()
        .unwrap();
    registry.register(custom).unwrap();

    assert_eq!(registry.resolve("SQLite").unwrap().name(), "sqlite");
    assert_eq!(registry.resolve("strict").unwrap().name(), "Strict");
    assert_eq!(
        registry.resolve("oracle").unwrap_err(),
        DialectError::UnknownDialect("oracle".into())
    );

    let shadow = DialectBuilder::new("generic").build().unwrap();
    assert_eq!(
        registry.register(shadow).unwrap_err(),
        DialectError::DuplicateName("generic".into())
    );
}

#[test]
fn builtin_descriptor_renders_the_same_across_threads() {
    let sqlite = Dialect::Sqlite.descriptor();
    let expected = render_all(sqlite);

    let outputs: Vec<Vec<Rendered>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| render_all(Dialect::Sqlite.descriptor())))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(outputs.len(), 8);
    for output in outputs {
        assert_eq!(output, expected);
    }
}

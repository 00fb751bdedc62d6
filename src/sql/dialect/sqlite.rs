//! SQLite dialect.
//!
//! - Identifiers: `"x"`, `[x]` and `` `x` `` are all accepted; output uses `"`
//! - Hex strings: `x'..'`, `X'..'`, `0x..`, `0X..`
//! - One storage class per affinity: INTEGER, REAL, TEXT, BLOB
//! - `AUTOINCREMENT` instead of `AUTO_INCREMENT`
//! - `EDITDIST3` (spellfix1) for edit distance
//! - No ILIKE, TRY_CAST or TABLESAMPLE; these degrade with a diagnostic
//! - Row limiting is LIMIT only: FETCH renders as LIMIT, and OFFSET needs
//!   a LIMIT in front of it (`LIMIT -1` means no limit)

use std::sync::Arc;

use once_cell::sync::Lazy;

use super::generic::build_levenshtein;
use super::helpers::{arrow_json_extract_scalar_sql, arrow_json_extract_sql};
use super::{DialectBuilder, DialectDescriptor, Transform};
use crate::sql::expr::{lit_int, Expr, NodeKind};
use crate::sql::render::RenderContext;
use crate::sql::token::{Keyword, TokenStream};
use crate::sql::types::TypeKind;

pub(super) static SQLITE: Lazy<Arc<DialectDescriptor>> = Lazy::new(|| Arc::new(sqlite()));

fn sqlite() -> DialectDescriptor {
    DialectBuilder::new("sqlite")
        .identifiers(&[('"', '"'), ('[', ']'), ('`', '`')])
        .hex_strings(&[("x'", "'"), ("X'", "'"), ("0x", ""), ("0X", "")])
        .keyword("AUTOINCREMENT", Keyword::AutoIncrement)
        .function("EDITDIST3", build_levenshtein)
        // Integer affinity
        .type_keyword(TypeKind::Boolean, "INTEGER")
        .type_keyword(TypeKind::TinyInt, "INTEGER")
        .type_keyword(TypeKind::SmallInt, "INTEGER")
        .type_keyword(TypeKind::Int, "INTEGER")
        .type_keyword(TypeKind::BigInt, "INTEGER")
        // Real affinity
        .type_keyword(TypeKind::Float, "REAL")
        .type_keyword(TypeKind::Double, "REAL")
        .type_keyword(TypeKind::Decimal, "REAL")
        // Text affinity
        .type_keyword(TypeKind::Char, "TEXT")
        .type_keyword(TypeKind::NChar, "TEXT")
        .type_keyword(TypeKind::Varchar, "TEXT")
        .type_keyword(TypeKind::NVarchar, "TEXT")
        // Blob affinity
        .type_keyword(TypeKind::Binary, "BLOB")
        .type_keyword(TypeKind::VarBinary, "BLOB")
        .token(Keyword::AutoIncrement, "AUTOINCREMENT")
        .transform(NodeKind::DateAdd, Transform::Custom(date_add_sql))
        .transform(NodeKind::ILike, Transform::Unsupported)
        .transform(NodeKind::JsonExtract, Transform::Custom(arrow_json_extract_sql))
        .transform(
            NodeKind::JsonExtractScalar,
            Transform::Custom(arrow_json_extract_scalar_sql),
        )
        .transform(NodeKind::JsonbExtract, Transform::Custom(arrow_json_extract_sql))
        .transform(
            NodeKind::JsonbExtractScalar,
            Transform::Custom(arrow_json_extract_scalar_sql),
        )
        .transform(NodeKind::Levenshtein, Transform::Rename("EDITDIST3".into()))
        .transform(NodeKind::TableSample, Transform::Unsupported)
        .transform(NodeKind::DateStrToDate, Transform::Inner)
        .transform(NodeKind::TimeStrToTime, Transform::Inner)
        .transform(NodeKind::TryCast, Transform::Unsupported)
        .transform(NodeKind::GroupConcat, Transform::Custom(group_concat_sql))
        .transform(NodeKind::Fetch, Transform::Custom(fetch_sql))
        .transform(NodeKind::Least, Transform::Custom(least_sql))
        .transform(NodeKind::Greatest, Transform::Custom(greatest_sql))
        .transform(NodeKind::Transaction, Transform::Custom(transaction_sql))
        .transform(NodeKind::Select, Transform::Custom(select_sql))
        .assemble()
}

/// `GROUP_CONCAT([DISTINCT ]x[, sep])`.
///
/// SQLite's aggregate takes a single DISTINCT argument and no ORDER BY; an
/// ordering construct is reported and dropped.
pub fn group_concat_sql(expr: &Expr, ctx: &mut RenderContext<'_>) -> String {
    let Expr::GroupConcat { this, separator } = expr else {
        return ctx.default_sql(expr);
    };

    let distinct = this.find(|e| matches!(e, Expr::Distinct { .. }));
    let mut value: &Expr = this;
    let mut prefix = String::new();
    if let Some(Expr::Distinct { exprs }) = distinct {
        if let Some(first) = exprs.first() {
            value = first;
        }
        prefix = format!("{} ", ctx.keyword(Keyword::Distinct));
    }

    if let Expr::Order { this: ordered, .. } = &**this {
        ctx.unsupported(
            NodeKind::GroupConcat,
            "SQLite GROUP_CONCAT doesn't support ORDER BY",
        );
        if distinct.is_none() {
            value = &**ordered;
        }
    }

    let args = ctx.format_args(&[Some(value), separator.as_deref()]);
    format!("GROUP_CONCAT({prefix}{args})")
}

/// `DATE(base, '<modifier>[ <unit>]')`.
pub fn date_add_sql(expr: &Expr, ctx: &mut RenderContext<'_>) -> String {
    let Expr::DateAdd {
        this,
        expression,
        unit,
    } = expr
    else {
        return ctx.default_sql(expr);
    };

    let modifier = match expression.as_str_literal() {
        Some(text) => text.to_string(),
        None => ctx.sql(expression),
    };
    let modifier = match unit {
        Some(unit) => format!("{modifier} {unit}"),
        None => modifier,
    };
    let base = ctx.sql(this);
    format!("DATE({base}, '{}')", modifier.replace('\'', "''"))
}

/// `MIN(a, b, ..)`, or the bare argument when there is only one.
pub fn least_sql(expr: &Expr, ctx: &mut RenderContext<'_>) -> String {
    match expr {
        Expr::Least { args } => min_max(ctx, "MIN", args),
        _ => ctx.default_sql(expr),
    }
}

/// `MAX(a, b, ..)`, or the bare argument when there is only one.
pub fn greatest_sql(expr: &Expr, ctx: &mut RenderContext<'_>) -> String {
    match expr {
        Expr::Greatest { args } => min_max(ctx, "MAX", args),
        _ => ctx.default_sql(expr),
    }
}

fn min_max(ctx: &mut RenderContext<'_>, name: &str, args: &[Expr]) -> String {
    if args.len() > 1 {
        let args: Vec<&Expr> = args.iter().collect();
        return ctx.func(name, &args);
    }
    ctx.expressions(args, ", ")
}

/// FETCH renders as `LIMIT <count>`; PERCENT and WITH TIES have no SQLite form.
pub fn fetch_sql(expr: &Expr, ctx: &mut RenderContext<'_>) -> String {
    let Expr::Fetch {
        count,
        percent,
        with_ties,
        ..
    } = expr
    else {
        return ctx.default_sql(expr);
    };

    if *percent {
        ctx.unsupported(NodeKind::Fetch, "SQLite LIMIT doesn't support PERCENT");
    }
    if *with_ties {
        ctx.unsupported(NodeKind::Fetch, "SQLite LIMIT doesn't support WITH TIES");
    }
    let count = match count {
        Some(count) => ctx.sql(count),
        None => "1".to_string(),
    };

    let mut ts = TokenStream::new();
    ts.kw(Keyword::Limit).space().raw(count);
    ctx.tokens(&ts)
}

/// SQLite only accepts OFFSET after a LIMIT clause; a bare offset gets
/// `LIMIT -1` in front.
pub fn select_sql(expr: &Expr, ctx: &mut RenderContext<'_>) -> String {
    match expr {
        Expr::Select(select) if select.limit.is_none() && select.offset.is_some() => {
            let mut select = select.clone();
            select.limit = Some(Expr::Limit {
                count: Box::new(lit_int(-1)),
            });
            ctx.default_sql(&Expr::Select(select))
        }
        _ => ctx.default_sql(expr),
    }
}

/// `BEGIN[ <modifier>] TRANSACTION`.
pub fn transaction_sql(expr: &Expr, ctx: &mut RenderContext<'_>) -> String {
    let Expr::Transaction { modifier } = expr else {
        return ctx.default_sql(expr);
    };

    let mut ts = TokenStream::new();
    ts.kw(Keyword::Begin).space();
    if let Some(modifier) = modifier {
        ts.raw(modifier.as_str()).space();
    }
    ts.kw(Keyword::Transaction);
    ctx.tokens(&ts)
}

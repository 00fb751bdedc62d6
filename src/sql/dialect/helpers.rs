//! Shared helper functions for dialect tables.
//!
//! Quoting primitives used by the renderer, plus renderers several dialects
//! can point their transform tables at: the degrade helpers behind
//! [`Transform::Unsupported`](super::Transform::Unsupported) and the JSON
//! arrow operators.

use crate::sql::expr::{Expr, NodeKind};
use crate::sql::render::RenderContext;
use crate::sql::token::{Keyword, TokenStream};

// =============================================================================
// Quoting
// =============================================================================

/// Quote an identifier with a delimiter pair, doubling the closing delimiter.
///
/// - `"` : `"a""b"`
/// - `[]`: `[a]]b]`
/// - `` ` ``: `` `a``b` ``
pub fn quote_with(ident: &str, start: char, end: char) -> String {
    let escaped = ident.replace(end, &format!("{end}{end}"));
    format!("{start}{escaped}{end}")
}

/// Quote string with single quotes (standard SQL).
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

// =============================================================================
// Degrade helpers
// =============================================================================

/// Render the closest supported form of a node the dialect lacks.
pub fn degrade_sql(expr: &Expr, ctx: &mut RenderContext<'_>) -> String {
    match expr.kind() {
        NodeKind::ILike => no_ilike_sql(expr, ctx),
        NodeKind::TryCast => no_trycast_sql(expr, ctx),
        NodeKind::TableSample => no_tablesample_sql(expr, ctx),
        _ => ctx.default_sql(expr),
    }
}

/// `x ILIKE p` becomes `LOWER(x) LIKE p`.
pub fn no_ilike_sql(expr: &Expr, ctx: &mut RenderContext<'_>) -> String {
    let Expr::ILike {
        this,
        pattern,
        negated,
    } = expr
    else {
        return ctx.default_sql(expr);
    };
    ctx.unsupported(NodeKind::ILike, "ILIKE unsupported, rendered as LOWER(..) LIKE");

    let this = ctx.sql(this);
    let pattern = ctx.sql(pattern);
    let mut ts = TokenStream::new();
    ts.raw(format!("LOWER({this})")).space();
    if *negated {
        ts.kw(Keyword::Not).space();
    }
    ts.kw(Keyword::Like).space().raw(pattern);
    ctx.tokens(&ts)
}

/// `TRY_CAST(x AS t)` becomes `CAST(x AS t)`.
pub fn no_trycast_sql(expr: &Expr, ctx: &mut RenderContext<'_>) -> String {
    let Expr::TryCast { this, to } = expr else {
        return ctx.default_sql(expr);
    };
    ctx.unsupported(NodeKind::TryCast, "TRY_CAST unsupported, rendered as CAST");
    ctx.cast_sql(Keyword::Cast, this, to)
}

/// A sampled table renders as the table alone.
pub fn no_tablesample_sql(expr: &Expr, ctx: &mut RenderContext<'_>) -> String {
    let Expr::TableSample { this, .. } = expr else {
        return ctx.default_sql(expr);
    };
    ctx.unsupported(NodeKind::TableSample, "TABLESAMPLE unsupported");
    ctx.sql(this)
}

// =============================================================================
// Operand helpers
// =============================================================================

/// Render only the wrapped operand.
pub fn inner_sql(expr: &Expr, ctx: &mut RenderContext<'_>) -> String {
    match expr.inner() {
        Some(inner) => ctx.sql(inner),
        None => ctx.default_sql(expr),
    }
}

/// `x -> path`
pub fn arrow_json_extract_sql(expr: &Expr, ctx: &mut RenderContext<'_>) -> String {
    arrow(expr, ctx, "->")
}

/// `x ->> path`
pub fn arrow_json_extract_scalar_sql(expr: &Expr, ctx: &mut RenderContext<'_>) -> String {
    arrow(expr, ctx, "->>")
}

fn arrow(expr: &Expr, ctx: &mut RenderContext<'_>, op: &str) -> String {
    match expr {
        Expr::JsonExtract { this, path }
        | Expr::JsonExtractScalar { this, path }
        | Expr::JsonbExtract { this, path }
        | Expr::JsonbExtractScalar { this, path } => {
            format!("{} {op} {}", ctx.sql(this), ctx.sql(path))
        }
        _ => ctx.default_sql(expr),
    }
}

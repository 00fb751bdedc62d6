//! Rendering canonical trees to dialect SQL.
//!
//! [`render`] validates the tree, then walks it with a [`RenderContext`]. At
//! every node the context consults the dialect's transform table and falls
//! back to the default (base) rendering. Degradations are recorded as
//! [`Diagnostic`]s; what happens to them is governed by [`UnsupportedLevel`].
//!
//! ```
//! use transql::sql::dialect::Dialect;
//! use transql::sql::expr::{col, least};
//! use transql::sql::render::{render, RenderOptions};
//!
//! let expr = least(vec![col("a"), col("b")]);
//! let out = render(&expr, Dialect::Sqlite.descriptor(), RenderOptions::default()).unwrap();
//! assert_eq!(out.sql, "MIN(a, b)");
//! assert!(out.diagnostics.is_empty());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::dialect::helpers::{degrade_sql, inner_sql, quote_string_single, quote_with};
use super::dialect::{DialectDescriptor, Transform};
use super::expr::{
    BinaryOperator, ColumnConstraint, Expr, FetchDirection, Ident, Literal, NodeKind, OrderItem,
    SampleUnit, SortDir, UnaryOperator,
};
use super::token::{Keyword, TokenStream};
use super::types::{format_params, DataType, TypeKind};

// =============================================================================
// Options and results
// =============================================================================

/// What to do with unsupported-feature diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedLevel {
    /// Collect silently.
    Ignore,
    /// Collect and log each one.
    #[default]
    Warn,
    /// Fail the render when any were collected.
    Raise,
}

/// Per-call rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub unsupported_level: UnsupportedLevel,
    /// Quote every identifier, not just the ones quoted in the source.
    pub identify: bool,
}

/// A construct the target dialect could not express faithfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub node: NodeKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.node, self.message)
    }
}

/// Rendered SQL plus the diagnostics collected while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub sql: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Rendering errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The tree is malformed; no dialect can render it.
    #[error("malformed {node} node: {message}")]
    Structural { node: NodeKind, message: String },

    /// Degradations were collected under [`UnsupportedLevel::Raise`].
    #[error("{dialect} cannot render: {}", join_diagnostics(.diagnostics))]
    Unsupported {
        dialect: String,
        diagnostics: Vec<Diagnostic>,
    },
}

fn join_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Render a tree for a dialect.
pub fn render(
    expr: &Expr,
    dialect: &DialectDescriptor,
    options: RenderOptions,
) -> Result<Rendered, RenderError> {
    validate(expr)?;
    let mut ctx = RenderContext::new(dialect, options);
    let sql = ctx.sql(expr);
    ctx.finish(sql)
}

// =============================================================================
// Structural validation
// =============================================================================

/// Reject trees no renderer can handle. Runs before any output is produced.
pub fn validate(expr: &Expr) -> Result<(), RenderError> {
    check_node(expr)?;
    expr.children().into_iter().try_for_each(validate)
}

fn structural(node: NodeKind, message: &str) -> RenderError {
    RenderError::Structural {
        node,
        message: message.to_string(),
    }
}

fn check_node(expr: &Expr) -> Result<(), RenderError> {
    let kind = expr.kind();
    match expr {
        Expr::Least { args } | Expr::Greatest { args } if args.is_empty() => {
            Err(structural(kind, "requires at least one argument"))
        }
        Expr::Levenshtein { args } if args.len() < 2 => {
            Err(structural(kind, "requires two arguments"))
        }
        Expr::Distinct { exprs } if exprs.is_empty() => {
            Err(structural(kind, "requires at least one expression"))
        }
        Expr::Order { order_by, .. } if order_by.is_empty() => {
            Err(structural(kind, "requires at least one ordering item"))
        }
        Expr::InList { list, .. } if list.is_empty() => {
            Err(structural(kind, "requires at least one value"))
        }
        Expr::Case { whens, .. } if whens.is_empty() => {
            Err(structural(kind, "requires at least one WHEN branch"))
        }
        Expr::Function { name, .. } if name.trim().is_empty() => {
            Err(structural(kind, "function name is empty"))
        }
        Expr::Literal(Literal::Float(f)) if !f.is_finite() => {
            Err(structural(kind, "float literal is not finite"))
        }
        Expr::Literal(Literal::HexString(digits) | Literal::HexNumber(digits))
            if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) =>
        {
            Err(structural(kind, "hex literal needs one or more hex digits"))
        }
        Expr::Select(select) => {
            if select.projections.is_empty() {
                return Err(structural(kind, "requires at least one projection"));
            }
            match &select.limit {
                None | Some(Expr::Limit { .. }) | Some(Expr::Fetch { .. }) => Ok(()),
                Some(other) => Err(RenderError::Structural {
                    node: kind,
                    message: format!("limit slot holds a {} node", other.kind()),
                }),
            }
        }
        Expr::CreateTable(create) => {
            if create.columns.is_empty() {
                return Err(structural(kind, "requires at least one column"));
            }
            if create.table.kind() != NodeKind::Table {
                return Err(structural(kind, "target is not a table"));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

// =============================================================================
// Render context
// =============================================================================

/// Per-call rendering state: the dialect, the options and the diagnostics
/// collected so far.
pub struct RenderContext<'a> {
    dialect: &'a DialectDescriptor,
    options: RenderOptions,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> RenderContext<'a> {
    pub fn new(dialect: &'a DialectDescriptor, options: RenderOptions) -> Self {
        Self {
            dialect,
            options,
            diagnostics: Vec::new(),
        }
    }

    /// Render a node, honoring the dialect's transform table.
    pub fn sql(&mut self, expr: &Expr) -> String {
        let dialect = self.dialect;
        match dialect.transform(expr.kind()) {
            None => self.default_sql(expr),
            Some(Transform::Rename(name)) => match expr.call_args() {
                Some(args) => self.func(name, &args),
                None => self.default_sql(expr),
            },
            Some(Transform::Unsupported) => degrade_sql(expr, self),
            Some(Transform::Inner) => inner_sql(expr, self),
            Some(Transform::Custom(renderer)) => renderer(expr, self),
        }
    }

    /// Record a degradation.
    pub fn unsupported(&mut self, node: NodeKind, message: impl Into<String>) {
        let message = message.into();
        if self.options.unsupported_level == UnsupportedLevel::Warn {
            tracing::warn!(dialect = %self.dialect.name(), node = %node, "{message}");
        }
        self.diagnostics.push(Diagnostic { node, message });
    }

    /// `NAME(arg, ...)`
    pub fn func(&mut self, name: &str, args: &[&Expr]) -> String {
        let args: Vec<Option<&Expr>> = args.iter().map(|a| Some(*a)).collect();
        format!("{name}({})", self.format_args(&args))
    }

    /// Comma-separated arguments, skipping absent ones.
    pub fn format_args(&mut self, args: &[Option<&Expr>]) -> String {
        args.iter()
            .flatten()
            .map(|arg| self.sql(arg))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Render a list of nodes joined by `sep`.
    pub fn expressions(&mut self, exprs: &[Expr], sep: &str) -> String {
        exprs
            .iter()
            .map(|e| self.sql(e))
            .collect::<Vec<_>>()
            .join(sep)
    }

    /// Dialect spelling of a reserved word.
    pub fn keyword(&self, keyword: Keyword) -> &'a str {
        self.dialect.token_keyword(keyword)
    }

    pub fn tokens(&self, ts: &TokenStream) -> String {
        ts.serialize(self.dialect)
    }

    /// Substituted type keyword with the parameters appended.
    pub fn data_type(&self, data_type: &DataType) -> String {
        format!(
            "{}{}",
            self.dialect.type_keyword(data_type.kind),
            format_params(&data_type.params)
        )
    }

    /// `CAST(x AS type)` spelled with `keyword`.
    pub fn cast_sql(&mut self, keyword: Keyword, this: &Expr, to: &DataType) -> String {
        let this = self.sql(this);
        format!(
            "{}({this} {} {})",
            self.keyword(keyword),
            self.keyword(Keyword::As),
            self.data_type(to)
        )
    }

    pub fn identifier(&self, ident: &Ident) -> String {
        if !(ident.quoted || self.options.identify) {
            return ident.name.clone();
        }
        match self.dialect.lexical().identifiers.first() {
            Some(&(start, end)) => quote_with(&ident.name, start, end),
            None => quote_with(&ident.name, '"', '"'),
        }
    }

    pub fn literal(&mut self, literal: &Literal) -> String {
        match literal {
            Literal::Int(n) => n.to_string(),
            Literal::Float(f) => ryu::Buffer::new().format(*f).to_string(),
            Literal::String(s) => quote_string_single(s),
            Literal::HexString(digits) => self.hex_blob(digits),
            Literal::HexNumber(digits) => self.hex_number(digits),
            Literal::Bool(true) => self.keyword(Keyword::True).to_string(),
            Literal::Bool(false) => self.keyword(Keyword::False).to_string(),
            Literal::Null => self.keyword(Keyword::Null).to_string(),
        }
    }

    /// Blob literal in the first closed hex delimiter pair. A blob needs
    /// whole bytes, so an odd digit count gets a leading zero.
    fn hex_blob(&mut self, digits: &str) -> String {
        let digits = if digits.len() % 2 == 1 {
            self.unsupported(
                NodeKind::Literal,
                format!("hex blob '{digits}' has an odd number of digits, padded with a leading 0"),
            );
            format!("0{digits}")
        } else {
            digits.to_string()
        };
        let closed = self
            .dialect
            .lexical()
            .hex_strings
            .iter()
            .find(|(_, end)| !end.is_empty());
        match closed {
            Some((start, end)) => format!("{start}{digits}{end}"),
            None => format!("X'{digits}'"),
        }
    }

    /// Integer literal written in hex. Dialects without a `0x` prefix get
    /// the decimal value, with 64-bit wrap-around as SQLite applies it.
    fn hex_number(&mut self, digits: &str) -> String {
        let prefix = self
            .dialect
            .lexical()
            .hex_strings
            .iter()
            .find(|(_, end)| end.is_empty());
        if let Some((start, _)) = prefix {
            return format!("{start}{digits}");
        }
        match u64::from_str_radix(digits, 16) {
            Ok(n) => (n as i64).to_string(),
            Err(_) => {
                self.unsupported(
                    NodeKind::Literal,
                    format!("hex integer 0x{digits} doesn't fit in 64 bits"),
                );
                format!("0x{digits}")
            }
        }
    }

    /// Close the call: apply the unsupported level and hand back the output.
    pub fn finish(self, sql: String) -> Result<Rendered, RenderError> {
        if self.options.unsupported_level == UnsupportedLevel::Raise && !self.diagnostics.is_empty()
        {
            return Err(RenderError::Unsupported {
                dialect: self.dialect.name().to_string(),
                diagnostics: self.diagnostics,
            });
        }
        Ok(Rendered {
            sql,
            diagnostics: self.diagnostics,
        })
    }

    // =========================================================================
    // Default rendering
    // =========================================================================

    /// Base rendering of a node, ignoring the node's own transform entry.
    /// Children still go through [`sql`](Self::sql).
    pub fn default_sql(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Column { table, name } => match table {
                Some(table) => format!("{}.{}", self.identifier(table), self.identifier(name)),
                None => self.identifier(name),
            },

            Expr::Literal(literal) => self.literal(literal),

            Expr::Star { table } => match table {
                Some(table) => format!("{}.*", self.identifier(table)),
                None => "*".into(),
            },

            Expr::Alias { this, alias } => {
                let this = self.sql(this);
                format!("{this} {} {}", self.keyword(Keyword::As), self.identifier(alias))
            }

            Expr::Paren(inner) => format!("({})", self.sql(inner)),

            Expr::BinaryOp { left, op, right } => {
                let left = self.sql(left);
                let right = self.sql(right);
                format!("{left} {} {right}", self.binary_operator(*op))
            }

            Expr::UnaryOp { op, expr } => {
                let operand = self.sql(expr);
                match op {
                    UnaryOperator::Not => format!("{} {operand}", self.keyword(Keyword::Not)),
                    UnaryOperator::Minus => format!("-{operand}"),
                }
            }

            Expr::Like {
                this,
                pattern,
                negated,
            } => self.predicate(this, *negated, Keyword::Like, pattern),

            Expr::ILike {
                this,
                pattern,
                negated,
            } => self.predicate(this, *negated, Keyword::ILike, pattern),

            Expr::IsNull { this, negated } => {
                let mut ts = TokenStream::new();
                ts.raw(self.sql(this)).space().kw(Keyword::Is).space();
                if *negated {
                    ts.kw(Keyword::Not).space();
                }
                ts.kw(Keyword::Null);
                self.tokens(&ts)
            }

            Expr::Between {
                this,
                low,
                high,
                negated,
            } => {
                let mut ts = TokenStream::new();
                ts.raw(self.sql(this)).space();
                if *negated {
                    ts.kw(Keyword::Not).space();
                }
                ts.kw(Keyword::Between)
                    .space()
                    .raw(self.sql(low))
                    .space()
                    .kw(Keyword::And)
                    .space()
                    .raw(self.sql(high));
                self.tokens(&ts)
            }

            Expr::InList {
                this,
                list,
                negated,
            } => {
                let mut ts = TokenStream::new();
                ts.raw(self.sql(this)).space();
                if *negated {
                    ts.kw(Keyword::Not).space();
                }
                ts.kw(Keyword::In)
                    .space()
                    .lparen()
                    .raw(self.expressions(list, ", "))
                    .rparen();
                self.tokens(&ts)
            }

            Expr::Case {
                operand,
                whens,
                else_result,
            } => {
                let mut ts = TokenStream::new();
                ts.kw(Keyword::Case);
                if let Some(operand) = operand {
                    ts.space().raw(self.sql(operand));
                }
                for (condition, result) in whens {
                    ts.space()
                        .kw(Keyword::When)
                        .space()
                        .raw(self.sql(condition))
                        .space()
                        .kw(Keyword::Then)
                        .space()
                        .raw(self.sql(result));
                }
                if let Some(else_result) = else_result {
                    ts.space()
                        .kw(Keyword::Else)
                        .space()
                        .raw(self.sql(else_result));
                }
                ts.space().kw(Keyword::End);
                self.tokens(&ts)
            }

            Expr::Cast { this, to } => self.cast_sql(Keyword::Cast, this, to),
            Expr::TryCast { this, to } => self.cast_sql(Keyword::TryCast, this, to),

            Expr::Function { name, args } => {
                let args: Vec<&Expr> = args.iter().collect();
                self.func(name, &args)
            }

            Expr::Distinct { exprs } => {
                format!(
                    "{} {}",
                    self.keyword(Keyword::Distinct),
                    self.expressions(exprs, ", ")
                )
            }

            Expr::Order { this, order_by } => {
                let this = self.sql(this);
                format!("{this} {}", self.order_by(order_by))
            }

            Expr::GroupConcat { this, separator } => {
                let this = self.sql(this);
                match separator {
                    Some(separator) => {
                        format!("GROUP_CONCAT({this} SEPARATOR {})", self.sql(separator))
                    }
                    None => format!("GROUP_CONCAT({this})"),
                }
            }

            Expr::DateAdd {
                this,
                expression,
                unit,
            } => {
                let args = self.format_args(&[Some(&**this), Some(&**expression)]);
                match unit {
                    Some(unit) => format!("DATE_ADD({args}, {})", unit.to_ascii_uppercase()),
                    None => format!("DATE_ADD({args})"),
                }
            }

            Expr::Least { args } => self.call("LEAST", args),
            Expr::Greatest { args } => self.call("GREATEST", args),
            Expr::Levenshtein { args } => self.call("LEVENSHTEIN", args),

            Expr::JsonExtract { this, path } => self.func("JSON_EXTRACT", &[&**this, &**path]),
            Expr::JsonExtractScalar { this, path } => {
                self.func("JSON_EXTRACT_SCALAR", &[&**this, &**path])
            }
            Expr::JsonbExtract { this, path } => self.func("JSONB_EXTRACT", &[&**this, &**path]),
            Expr::JsonbExtractScalar { this, path } => {
                self.func("JSONB_EXTRACT_SCALAR", &[&**this, &**path])
            }

            Expr::DateStrToDate { this } => {
                self.cast_sql(Keyword::Cast, this, &TypeKind::Date.into())
            }
            Expr::TimeStrToTime { this } => {
                self.cast_sql(Keyword::Cast, this, &TypeKind::Timestamp.into())
            }

            Expr::Table {
                schema,
                name,
                alias,
            } => {
                let mut out = match schema {
                    Some(schema) => format!("{}.{}", self.identifier(schema), self.identifier(name)),
                    None => self.identifier(name),
                };
                if let Some(alias) = alias {
                    out = format!("{out} {} {}", self.keyword(Keyword::As), self.identifier(alias));
                }
                out
            }

            Expr::TableSample {
                this,
                method,
                size,
                unit,
            } => {
                let mut ts = TokenStream::new();
                ts.raw(self.sql(this)).space().kw(Keyword::TableSample).space();
                if let Some(method) = method {
                    ts.raw(method.as_str()).space();
                }
                let unit = match unit {
                    SampleUnit::Percent => Keyword::Percent,
                    SampleUnit::Rows => Keyword::Rows,
                };
                ts.lparen()
                    .raw(self.sql(size))
                    .space()
                    .kw(unit)
                    .rparen();
                self.tokens(&ts)
            }

            Expr::Select(select) => {
                let mut ts = TokenStream::new();
                ts.kw(Keyword::Select).space();
                if select.distinct {
                    ts.kw(Keyword::Distinct).space();
                }
                ts.raw(self.expressions(&select.projections, ", "));

                if let Some(from) = &select.from {
                    ts.space().kw(Keyword::From).space().raw(self.sql(from));
                }
                if let Some(predicate) = &select.where_clause {
                    ts.space().kw(Keyword::Where).space().raw(self.sql(predicate));
                }
                if !select.group_by.is_empty() {
                    ts.space()
                        .kw(Keyword::Group)
                        .space()
                        .kw(Keyword::By)
                        .space()
                        .raw(self.expressions(&select.group_by, ", "));
                }
                if let Some(predicate) = &select.having {
                    ts.space().kw(Keyword::Having).space().raw(self.sql(predicate));
                }
                if !select.order_by.is_empty() {
                    ts.space().raw(self.order_by(&select.order_by));
                }

                // An ANSI fetch clause follows OFFSET; anything the dialect
                // rewrites it into is treated like LIMIT and precedes OFFSET.
                let fetch_style = matches!(select.limit, Some(Expr::Fetch { .. }))
                    && self.dialect.transform(NodeKind::Fetch).is_none();
                if fetch_style {
                    if let Some(offset) = &select.offset {
                        ts.space()
                            .kw(Keyword::Offset)
                            .space()
                            .raw(self.sql(offset))
                            .space()
                            .kw(Keyword::Rows);
                    }
                    if let Some(limit) = &select.limit {
                        ts.space().raw(self.sql(limit));
                    }
                } else {
                    if let Some(limit) = &select.limit {
                        ts.space().raw(self.sql(limit));
                    }
                    if let Some(offset) = &select.offset {
                        ts.space().kw(Keyword::Offset).space().raw(self.sql(offset));
                    }
                }
                self.tokens(&ts)
            }

            Expr::Limit { count } => {
                format!("{} {}", self.keyword(Keyword::Limit), self.sql(count))
            }

            Expr::Fetch {
                direction,
                count,
                percent,
                with_ties,
            } => {
                let mut ts = TokenStream::new();
                ts.kw(Keyword::Fetch).space();
                ts.kw(match direction {
                    FetchDirection::First => Keyword::First,
                    FetchDirection::Next => Keyword::Next,
                });
                if let Some(count) = count {
                    ts.space().raw(self.sql(count));
                }
                if *percent {
                    ts.space().kw(Keyword::Percent);
                }
                ts.space().kw(Keyword::Rows).space();
                if *with_ties {
                    ts.kw(Keyword::With).space().kw(Keyword::Ties);
                } else {
                    ts.kw(Keyword::Only);
                }
                self.tokens(&ts)
            }

            Expr::Transaction { modifier } => {
                let mut ts = TokenStream::new();
                ts.kw(Keyword::Begin);
                if let Some(modifier) = modifier {
                    ts.space().raw(modifier.as_str());
                }
                self.tokens(&ts)
            }

            Expr::Commit => self.keyword(Keyword::Commit).to_string(),
            Expr::Rollback => self.keyword(Keyword::Rollback).to_string(),

            Expr::CreateTable(create) => {
                let mut ts = TokenStream::new();
                ts.kw(Keyword::Create).space().kw(Keyword::Table).space();
                if create.if_not_exists {
                    ts.kw(Keyword::If)
                        .space()
                        .kw(Keyword::Not)
                        .space()
                        .kw(Keyword::Exists)
                        .space();
                }
                ts.raw(self.sql(&create.table)).space().lparen();
                for (i, column) in create.columns.iter().enumerate() {
                    if i > 0 {
                        ts.comma().space();
                    }
                    ts.raw(self.identifier(&column.name));
                    if let Some(data_type) = &column.data_type {
                        ts.space().raw(self.data_type(data_type));
                    }
                    for constraint in &column.constraints {
                        ts.space();
                        self.column_constraint(&mut ts, constraint);
                    }
                }
                ts.rparen();
                self.tokens(&ts)
            }
        }
    }

    fn call(&mut self, name: &str, args: &[Expr]) -> String {
        let args: Vec<&Expr> = args.iter().collect();
        self.func(name, &args)
    }

    fn predicate(&mut self, this: &Expr, negated: bool, op: Keyword, operand: &Expr) -> String {
        let mut ts = TokenStream::new();
        ts.raw(self.sql(this)).space();
        if negated {
            ts.kw(Keyword::Not).space();
        }
        ts.kw(op).space().raw(self.sql(operand));
        self.tokens(&ts)
    }

    fn binary_operator(&self, op: BinaryOperator) -> &'a str {
        match op {
            BinaryOperator::Eq => "=",
            BinaryOperator::Ne => "<>",
            BinaryOperator::Lt => "<",
            BinaryOperator::Gt => ">",
            BinaryOperator::Lte => "<=",
            BinaryOperator::Gte => ">=",
            BinaryOperator::And => self.keyword(Keyword::And),
            BinaryOperator::Or => self.keyword(Keyword::Or),
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Concat => "||",
        }
    }

    fn order_by(&mut self, items: &[OrderItem]) -> String {
        let rendered: Vec<String> = items
            .iter()
            .map(|item| {
                let expr = self.sql(&item.expr);
                match item.dir {
                    Some(SortDir::Asc) => format!("{expr} {}", self.keyword(Keyword::Asc)),
                    Some(SortDir::Desc) => format!("{expr} {}", self.keyword(Keyword::Desc)),
                    None => expr,
                }
            })
            .collect();
        format!(
            "{} {} {}",
            self.keyword(Keyword::Order),
            self.keyword(Keyword::By),
            rendered.join(", ")
        )
    }

    fn column_constraint(&mut self, ts: &mut TokenStream, constraint: &ColumnConstraint) {
        match constraint {
            ColumnConstraint::PrimaryKey => {
                ts.kw(Keyword::Primary).space().kw(Keyword::Key);
            }
            ColumnConstraint::NotNull => {
                ts.kw(Keyword::Not).space().kw(Keyword::Null);
            }
            ColumnConstraint::Unique => {
                ts.kw(Keyword::Unique);
            }
            ColumnConstraint::AutoIncrement => {
                ts.kw(Keyword::AutoIncrement);
            }
            ColumnConstraint::Default(value) => {
                ts.kw(Keyword::Default).space().raw(self.sql(value));
            }
        }
    }
}

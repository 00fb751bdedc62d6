//! Canonical node tree - the dialect-neutral representation of a query.
//!
//! Every construct the transpiler understands is one [`Expr`] variant, and
//! every variant has a [`NodeKind`]. Dialect tables key on `NodeKind`, so the
//! kind set is closed: a dialect can override how an existing kind renders but
//! cannot invent a new one.

use std::fmt;
use std::str::FromStr;

use super::types::DataType;

// =============================================================================
// Node kinds
// =============================================================================

/// Dense enumeration of canonical node kinds.
///
/// The discriminant is the index into a dialect's transform table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Column,
    Literal,
    Star,
    Alias,
    Paren,
    BinaryOp,
    UnaryOp,
    Like,
    ILike,
    IsNull,
    Between,
    InList,
    Case,
    Cast,
    TryCast,
    Function,
    Distinct,
    Order,
    GroupConcat,
    DateAdd,
    Least,
    Greatest,
    Levenshtein,
    JsonExtract,
    JsonExtractScalar,
    JsonbExtract,
    JsonbExtractScalar,
    DateStrToDate,
    TimeStrToTime,
    Table,
    TableSample,
    Select,
    Limit,
    Fetch,
    Transaction,
    Commit,
    Rollback,
    CreateTable,
}

impl NodeKind {
    /// Number of node kinds.
    pub const COUNT: usize = 38;

    /// Every kind, in discriminant order.
    pub const ALL: [NodeKind; Self::COUNT] = [
        NodeKind::Column,
        NodeKind::Literal,
        NodeKind::Star,
        NodeKind::Alias,
        NodeKind::Paren,
        NodeKind::BinaryOp,
        NodeKind::UnaryOp,
        NodeKind::Like,
        NodeKind::ILike,
        NodeKind::IsNull,
        NodeKind::Between,
        NodeKind::InList,
        NodeKind::Case,
        NodeKind::Cast,
        NodeKind::TryCast,
        NodeKind::Function,
        NodeKind::Distinct,
        NodeKind::Order,
        NodeKind::GroupConcat,
        NodeKind::DateAdd,
        NodeKind::Least,
        NodeKind::Greatest,
        NodeKind::Levenshtein,
        NodeKind::JsonExtract,
        NodeKind::JsonExtractScalar,
        NodeKind::JsonbExtract,
        NodeKind::JsonbExtractScalar,
        NodeKind::DateStrToDate,
        NodeKind::TimeStrToTime,
        NodeKind::Table,
        NodeKind::TableSample,
        NodeKind::Select,
        NodeKind::Limit,
        NodeKind::Fetch,
        NodeKind::Transaction,
        NodeKind::Commit,
        NodeKind::Rollback,
        NodeKind::CreateTable,
    ];

    /// Index into dense per-kind tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Configuration name (snake_case).
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Column => "column",
            NodeKind::Literal => "literal",
            NodeKind::Star => "star",
            NodeKind::Alias => "alias",
            NodeKind::Paren => "paren",
            NodeKind::BinaryOp => "binary_op",
            NodeKind::UnaryOp => "unary_op",
            NodeKind::Like => "like",
            NodeKind::ILike => "ilike",
            NodeKind::IsNull => "is_null",
            NodeKind::Between => "between",
            NodeKind::InList => "in_list",
            NodeKind::Case => "case",
            NodeKind::Cast => "cast",
            NodeKind::TryCast => "try_cast",
            NodeKind::Function => "function",
            NodeKind::Distinct => "distinct",
            NodeKind::Order => "order",
            NodeKind::GroupConcat => "group_concat",
            NodeKind::DateAdd => "date_add",
            NodeKind::Least => "least",
            NodeKind::Greatest => "greatest",
            NodeKind::Levenshtein => "levenshtein",
            NodeKind::JsonExtract => "json_extract",
            NodeKind::JsonExtractScalar => "json_extract_scalar",
            NodeKind::JsonbExtract => "jsonb_extract",
            NodeKind::JsonbExtractScalar => "jsonb_extract_scalar",
            NodeKind::DateStrToDate => "date_str_to_date",
            NodeKind::TimeStrToTime => "time_str_to_time",
            NodeKind::Table => "table",
            NodeKind::TableSample => "table_sample",
            NodeKind::Select => "select",
            NodeKind::Limit => "limit",
            NodeKind::Fetch => "fetch",
            NodeKind::Transaction => "transaction",
            NodeKind::Commit => "commit",
            NodeKind::Rollback => "rollback",
            NodeKind::CreateTable => "create_table",
        }
    }

    /// Kinds rendered as `NAME(arg, ...)` by the base renderer. Only these can
    /// be renamed declaratively or built from a function call.
    pub fn is_call_shaped(self) -> bool {
        matches!(
            self,
            NodeKind::Function
                | NodeKind::GroupConcat
                | NodeKind::Least
                | NodeKind::Greatest
                | NodeKind::Levenshtein
                | NodeKind::JsonExtract
                | NodeKind::JsonExtractScalar
                | NodeKind::JsonbExtract
                | NodeKind::JsonbExtractScalar
        )
    }

    /// Kinds wrapping exactly one operand that can stand in for the node.
    pub fn has_inner_operand(self) -> bool {
        matches!(
            self,
            NodeKind::Paren
                | NodeKind::Alias
                | NodeKind::Cast
                | NodeKind::TryCast
                | NodeKind::DateStrToDate
                | NodeKind::TimeStrToTime
        )
    }

    /// Kinds the shared degrade helper knows how to approximate.
    pub fn has_degraded_form(self) -> bool {
        matches!(
            self,
            NodeKind::ILike | NodeKind::TryCast | NodeKind::TableSample
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == lower)
            .ok_or_else(|| s.to_string())
    }
}

// =============================================================================
// Leaves and helpers
// =============================================================================

/// An identifier as written in the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    pub name: String,
    /// Whether the source delimited it. Quoted identifiers are quoted on
    /// output too.
    pub quoted: bool,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quoted: false,
        }
    }

    pub fn quoted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quoted: true,
        }
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident::new(name)
    }
}

/// Literal values.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    String(String),
    /// Hex digits of a binary literal, without delimiters.
    HexString(String),
    /// Hex digits of an integer literal (`0x1F` is 31, not a blob).
    HexNumber(String),
    Bool(bool),
    Null,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Comparison
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
    // Logical
    And,
    Or,
    // Arithmetic
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    // String
    Concat,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Minus,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// One ORDER BY item.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub expr: Expr,
    pub dir: Option<SortDir>,
}

impl OrderItem {
    pub fn new(expr: Expr) -> Self {
        Self { expr, dir: None }
    }

    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            dir: Some(SortDir::Asc),
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            dir: Some(SortDir::Desc),
        }
    }
}

/// `FETCH FIRST` vs `FETCH NEXT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchDirection {
    #[default]
    First,
    Next,
}

/// Unit of a TABLESAMPLE size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleUnit {
    #[default]
    Percent,
    Rows,
}

/// Column constraints understood by CREATE TABLE.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraint {
    PrimaryKey,
    NotNull,
    Unique,
    AutoIncrement,
    Default(Expr),
}

/// Column definition in CREATE TABLE.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: Ident,
    pub data_type: Option<DataType>,
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDef {
    pub fn new(name: &str, data_type: impl Into<DataType>) -> Self {
        Self {
            name: Ident::new(name),
            data_type: Some(data_type.into()),
            constraints: Vec::new(),
        }
    }

    pub fn constraint(mut self, constraint: ColumnConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

// =============================================================================
// Statements
// =============================================================================

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Default)]
#[must_use = "builders have no effect until used"]
pub struct Select {
    pub distinct: bool,
    pub projections: Vec<Expr>,
    pub from: Option<Expr>,
    pub where_clause: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
    pub order_by: Vec<OrderItem>,
    /// Row-limiting clause: an [`Expr::Limit`] or [`Expr::Fetch`].
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, expr: Expr) -> Self {
        self.projections.push(expr);
        self
    }

    pub fn columns(mut self, exprs: Vec<Expr>) -> Self {
        self.projections.extend(exprs);
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn from(mut self, source: Expr) -> Self {
        self.from = Some(source);
        self
    }

    pub fn filter(mut self, predicate: Expr) -> Self {
        self.where_clause = Some(predicate);
        self
    }

    pub fn group_by(mut self, exprs: Vec<Expr>) -> Self {
        self.group_by = exprs;
        self
    }

    pub fn having(mut self, predicate: Expr) -> Self {
        self.having = Some(predicate);
        self
    }

    pub fn order_by(mut self, items: Vec<OrderItem>) -> Self {
        self.order_by = items;
        self
    }

    pub fn limit(mut self, count: i64) -> Self {
        self.limit = Some(Expr::Limit {
            count: Box::new(lit_int(count)),
        });
        self
    }

    pub fn fetch(mut self, fetch: Expr) -> Self {
        self.limit = Some(fetch);
        self
    }

    pub fn offset(mut self, count: i64) -> Self {
        self.offset = Some(lit_int(count));
        self
    }

    pub fn build(self) -> Expr {
        Expr::Select(Box::new(self))
    }
}

/// A CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    /// An [`Expr::Table`].
    pub table: Expr,
    pub if_not_exists: bool,
    pub columns: Vec<ColumnDef>,
}

// =============================================================================
// Expression AST
// =============================================================================

/// A canonical node.
///
/// Every variant must be handled by the base renderer and by
/// [`Expr::kind`] - the compiler enforces this.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Column reference: optional_table.column
    Column {
        table: Option<Ident>,
        name: Ident,
    },

    Literal(Literal),

    /// Wildcard: * or table.*
    Star { table: Option<Ident> },

    /// expr AS alias
    Alias { this: Box<Expr>, alias: Ident },

    Paren(Box<Expr>),

    BinaryOp {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },

    UnaryOp { op: UnaryOperator, expr: Box<Expr> },

    Like {
        this: Box<Expr>,
        pattern: Box<Expr>,
        negated: bool,
    },

    /// Case-insensitive LIKE.
    ILike {
        this: Box<Expr>,
        pattern: Box<Expr>,
        negated: bool,
    },

    IsNull { this: Box<Expr>, negated: bool },

    Between {
        this: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },

    InList {
        this: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },

    Case {
        operand: Option<Box<Expr>>,
        whens: Vec<(Expr, Expr)>,
        else_result: Option<Box<Expr>>,
    },

    Cast { this: Box<Expr>, to: DataType },

    /// CAST that yields NULL instead of failing.
    TryCast { this: Box<Expr>, to: DataType },

    /// Any function without a dedicated node kind.
    Function { name: String, args: Vec<Expr> },

    /// DISTINCT modifier inside an aggregate call.
    Distinct { exprs: Vec<Expr> },

    /// Ordering inside an aggregate call: `this ORDER BY ...`.
    Order {
        this: Box<Expr>,
        order_by: Vec<OrderItem>,
    },

    /// Grouped string concatenation aggregate.
    GroupConcat {
        this: Box<Expr>,
        separator: Option<Box<Expr>>,
    },

    /// Date arithmetic: `this` shifted by `expression` units.
    DateAdd {
        this: Box<Expr>,
        expression: Box<Expr>,
        unit: Option<String>,
    },

    Least { args: Vec<Expr> },

    Greatest { args: Vec<Expr> },

    /// Edit distance between strings.
    Levenshtein { args: Vec<Expr> },

    JsonExtract { this: Box<Expr>, path: Box<Expr> },

    JsonExtractScalar { this: Box<Expr>, path: Box<Expr> },

    JsonbExtract { this: Box<Expr>, path: Box<Expr> },

    JsonbExtractScalar { this: Box<Expr>, path: Box<Expr> },

    /// String to date conversion.
    DateStrToDate { this: Box<Expr> },

    /// String to timestamp conversion.
    TimeStrToTime { this: Box<Expr> },

    Table {
        schema: Option<Ident>,
        name: Ident,
        alias: Option<Ident>,
    },

    /// Sampled table source.
    TableSample {
        this: Box<Expr>,
        method: Option<String>,
        size: Box<Expr>,
        unit: SampleUnit,
    },

    Select(Box<Select>),

    Limit { count: Box<Expr> },

    /// ANSI row-limiting clause.
    Fetch {
        direction: FetchDirection,
        count: Option<Box<Expr>>,
        percent: bool,
        with_ties: bool,
    },

    /// Transaction start, with an optional locking/isolation modifier taken
    /// verbatim from the source.
    Transaction { modifier: Option<String> },

    Commit,

    Rollback,

    CreateTable(Box<CreateTable>),
}

impl Expr {
    /// The node's kind.
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Column { .. } => NodeKind::Column,
            Expr::Literal(_) => NodeKind::Literal,
            Expr::Star { .. } => NodeKind::Star,
            Expr::Alias { .. } => NodeKind::Alias,
            Expr::Paren(_) => NodeKind::Paren,
            Expr::BinaryOp { .. } => NodeKind::BinaryOp,
            Expr::UnaryOp { .. } => NodeKind::UnaryOp,
            Expr::Like { .. } => NodeKind::Like,
            Expr::ILike { .. } => NodeKind::ILike,
            Expr::IsNull { .. } => NodeKind::IsNull,
            Expr::Between { .. } => NodeKind::Between,
            Expr::InList { .. } => NodeKind::InList,
            Expr::Case { .. } => NodeKind::Case,
            Expr::Cast { .. } => NodeKind::Cast,
            Expr::TryCast { .. } => NodeKind::TryCast,
            Expr::Function { .. } => NodeKind::Function,
            Expr::Distinct { .. } => NodeKind::Distinct,
            Expr::Order { .. } => NodeKind::Order,
            Expr::GroupConcat { .. } => NodeKind::GroupConcat,
            Expr::DateAdd { .. } => NodeKind::DateAdd,
            Expr::Least { .. } => NodeKind::Least,
            Expr::Greatest { .. } => NodeKind::Greatest,
            Expr::Levenshtein { .. } => NodeKind::Levenshtein,
            Expr::JsonExtract { .. } => NodeKind::JsonExtract,
            Expr::JsonExtractScalar { .. } => NodeKind::JsonExtractScalar,
            Expr::JsonbExtract { .. } => NodeKind::JsonbExtract,
            Expr::JsonbExtractScalar { .. } => NodeKind::JsonbExtractScalar,
            Expr::DateStrToDate { .. } => NodeKind::DateStrToDate,
            Expr::TimeStrToTime { .. } => NodeKind::TimeStrToTime,
            Expr::Table { .. } => NodeKind::Table,
            Expr::TableSample { .. } => NodeKind::TableSample,
            Expr::Select(_) => NodeKind::Select,
            Expr::Limit { .. } => NodeKind::Limit,
            Expr::Fetch { .. } => NodeKind::Fetch,
            Expr::Transaction { .. } => NodeKind::Transaction,
            Expr::Commit => NodeKind::Commit,
            Expr::Rollback => NodeKind::Rollback,
            Expr::CreateTable(_) => NodeKind::CreateTable,
        }
    }

    /// Argument list of a call-shaped node, in call order.
    ///
    /// Returns `None` for kinds that are not call-shaped
    /// (see [`NodeKind::is_call_shaped`]).
    pub fn call_args(&self) -> Option<Vec<&Expr>> {
        match self {
            Expr::Function { args, .. }
            | Expr::Least { args }
            | Expr::Greatest { args }
            | Expr::Levenshtein { args } => Some(args.iter().collect()),
            Expr::GroupConcat { this, separator } => {
                let mut args = vec![this.as_ref()];
                args.extend(separator.as_deref());
                Some(args)
            }
            Expr::JsonExtract { this, path }
            | Expr::JsonExtractScalar { this, path }
            | Expr::JsonbExtract { this, path }
            | Expr::JsonbExtractScalar { this, path } => Some(vec![this, path]),
            _ => None,
        }
    }

    /// The single operand of a wrapper node
    /// (see [`NodeKind::has_inner_operand`]).
    pub fn inner(&self) -> Option<&Expr> {
        match self {
            Expr::Paren(this)
            | Expr::Alias { this, .. }
            | Expr::Cast { this, .. }
            | Expr::TryCast { this, .. }
            | Expr::DateStrToDate { this }
            | Expr::TimeStrToTime { this } => Some(this),
            _ => None,
        }
    }

    /// Direct child nodes, in source order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Column { .. }
            | Expr::Literal(_)
            | Expr::Star { .. }
            | Expr::Table { .. }
            | Expr::Transaction { .. }
            | Expr::Commit
            | Expr::Rollback => vec![],

            Expr::Alias { this, .. }
            | Expr::Paren(this)
            | Expr::Cast { this, .. }
            | Expr::TryCast { this, .. }
            | Expr::DateStrToDate { this }
            | Expr::TimeStrToTime { this }
            | Expr::IsNull { this, .. } => vec![this],

            Expr::UnaryOp { expr, .. } => vec![expr],
            Expr::BinaryOp { left, right, .. } => vec![left, right],
            Expr::Like { this, pattern, .. } | Expr::ILike { this, pattern, .. } => {
                vec![this, pattern]
            }
            Expr::Between {
                this, low, high, ..
            } => vec![this, low, high],
            Expr::InList { this, list, .. } => {
                let mut out = vec![this.as_ref()];
                out.extend(list.iter());
                out
            }
            Expr::Case {
                operand,
                whens,
                else_result,
            } => {
                let mut out: Vec<&Expr> = operand.as_deref().into_iter().collect();
                for (cond, result) in whens {
                    out.push(cond);
                    out.push(result);
                }
                out.extend(else_result.as_deref());
                out
            }
            Expr::Function { args, .. }
            | Expr::Least { args }
            | Expr::Greatest { args }
            | Expr::Levenshtein { args } => args.iter().collect(),
            Expr::Distinct { exprs } => exprs.iter().collect(),
            Expr::Order { this, order_by } => {
                let mut out = vec![this.as_ref()];
                out.extend(order_by.iter().map(|item| &item.expr));
                out
            }
            Expr::GroupConcat { this, separator } => {
                let mut out = vec![this.as_ref()];
                out.extend(separator.as_deref());
                out
            }
            Expr::DateAdd {
                this, expression, ..
            } => vec![this, expression],
            Expr::JsonExtract { this, path }
            | Expr::JsonExtractScalar { this, path }
            | Expr::JsonbExtract { this, path }
            | Expr::JsonbExtractScalar { this, path } => vec![this, path],
            Expr::TableSample { this, size, .. } => vec![this, size],
            Expr::Select(select) => {
                let mut out: Vec<&Expr> = select.projections.iter().collect();
                out.extend(select.from.as_ref());
                out.extend(select.where_clause.as_ref());
                out.extend(select.group_by.iter());
                out.extend(select.having.as_ref());
                out.extend(select.order_by.iter().map(|item| &item.expr));
                out.extend(select.limit.as_ref());
                out.extend(select.offset.as_ref());
                out
            }
            Expr::Limit { count } => vec![count],
            Expr::Fetch { count, .. } => count.as_deref().into_iter().collect(),
            Expr::CreateTable(create) => {
                let mut out = vec![&create.table];
                for column in &create.columns {
                    for constraint in &column.constraints {
                        if let ColumnConstraint::Default(value) = constraint {
                            out.push(value);
                        }
                    }
                }
                out
            }
        }
    }

    /// First node (pre-order, starting with `self`) matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&Expr) -> bool + Copy) -> Option<&Expr> {
        if predicate(self) {
            return Some(self);
        }
        self.children()
            .into_iter()
            .find_map(|child| child.find(predicate))
    }

    /// The text of a string literal.
    pub fn as_str_literal(&self) -> Option<&str> {
        match self {
            Expr::Literal(Literal::String(s)) => Some(s),
            _ => None,
        }
    }
}

// =============================================================================
// Builder DSL
// =============================================================================

/// Column reference.
pub fn col(name: &str) -> Expr {
    Expr::Column {
        table: None,
        name: Ident::new(name),
    }
}

/// Table-qualified column reference.
pub fn table_col(table: &str, column: &str) -> Expr {
    Expr::Column {
        table: Some(Ident::new(table)),
        name: Ident::new(column),
    }
}

pub fn lit_int(n: i64) -> Expr {
    Expr::Literal(Literal::Int(n))
}

pub fn lit_float(f: f64) -> Expr {
    Expr::Literal(Literal::Float(f))
}

pub fn lit_str(s: &str) -> Expr {
    Expr::Literal(Literal::String(s.into()))
}

pub fn lit_bool(b: bool) -> Expr {
    Expr::Literal(Literal::Bool(b))
}

pub fn lit_null() -> Expr {
    Expr::Literal(Literal::Null)
}

pub fn star() -> Expr {
    Expr::Star { table: None }
}

/// Table reference.
pub fn table(name: &str) -> Expr {
    Expr::Table {
        schema: None,
        name: Ident::new(name),
        alias: None,
    }
}

/// Generic function call.
pub fn func(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Function {
        name: name.into(),
        args,
    }
}

/// DISTINCT modifier for aggregate arguments.
pub fn distinct(exprs: Vec<Expr>) -> Expr {
    Expr::Distinct { exprs }
}

pub fn cast(expr: Expr, to: impl Into<DataType>) -> Expr {
    Expr::Cast {
        this: Box::new(expr),
        to: to.into(),
    }
}

pub fn try_cast(expr: Expr, to: impl Into<DataType>) -> Expr {
    Expr::TryCast {
        this: Box::new(expr),
        to: to.into(),
    }
}

pub fn group_concat(this: Expr, separator: Option<Expr>) -> Expr {
    Expr::GroupConcat {
        this: Box::new(this),
        separator: separator.map(Box::new),
    }
}

pub fn date_add(this: Expr, modifier: Expr, unit: Option<&str>) -> Expr {
    Expr::DateAdd {
        this: Box::new(this),
        expression: Box::new(modifier),
        unit: unit.map(str::to_string),
    }
}

pub fn least(args: Vec<Expr>) -> Expr {
    Expr::Least { args }
}

pub fn greatest(args: Vec<Expr>) -> Expr {
    Expr::Greatest { args }
}

pub fn levenshtein(args: Vec<Expr>) -> Expr {
    Expr::Levenshtein { args }
}

/// FETCH FIRST <count> ROWS ONLY.
pub fn fetch_first(count: i64) -> Expr {
    Expr::Fetch {
        direction: FetchDirection::First,
        count: Some(Box::new(lit_int(count))),
        percent: false,
        with_ties: false,
    }
}

pub fn begin_transaction(modifier: Option<&str>) -> Expr {
    Expr::Transaction {
        modifier: modifier.map(str::to_string),
    }
}

// =============================================================================
// Fluent Extension Trait
// =============================================================================

/// Extension trait for fluent expression building.
pub trait ExprExt: Sized {
    fn into_expr(self) -> Expr;

    fn eq(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Eq, other.into())
    }

    fn gt(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Gt, other.into())
    }

    fn lt(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Lt, other.into())
    }

    fn and(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::And, other.into())
    }

    fn or(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Or, other.into())
    }

    fn add(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Plus, other.into())
    }

    fn concat(self, other: impl Into<Expr>) -> Expr {
        binary(self.into_expr(), BinaryOperator::Concat, other.into())
    }

    fn like(self, pattern: impl Into<Expr>) -> Expr {
        Expr::Like {
            this: Box::new(self.into_expr()),
            pattern: Box::new(pattern.into()),
            negated: false,
        }
    }

    fn ilike(self, pattern: impl Into<Expr>) -> Expr {
        Expr::ILike {
            this: Box::new(self.into_expr()),
            pattern: Box::new(pattern.into()),
            negated: false,
        }
    }

    fn is_null(self) -> Expr {
        Expr::IsNull {
            this: Box::new(self.into_expr()),
            negated: false,
        }
    }

    fn is_not_null(self) -> Expr {
        Expr::IsNull {
            this: Box::new(self.into_expr()),
            negated: true,
        }
    }

    fn in_list(self, values: Vec<Expr>) -> Expr {
        Expr::InList {
            this: Box::new(self.into_expr()),
            list: values,
            negated: false,
        }
    }

    /// Wrap this value in an aggregate ordering construct.
    fn order_by(self, items: Vec<OrderItem>) -> Expr {
        Expr::Order {
            this: Box::new(self.into_expr()),
            order_by: items,
        }
    }

    fn alias(self, name: &str) -> Expr {
        Expr::Alias {
            this: Box::new(self.into_expr()),
            alias: Ident::new(name),
        }
    }
}

impl ExprExt for Expr {
    fn into_expr(self) -> Expr {
        self
    }
}

fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::BinaryOp {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

// =============================================================================
// From implementations for convenient literal creation
// =============================================================================

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        lit_int(n)
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        lit_int(n as i64)
    }
}

impl From<f64> for Expr {
    fn from(f: f64) -> Self {
        lit_float(f)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        lit_str(s)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        lit_bool(b)
    }
}

impl From<Select> for Expr {
    fn from(select: Select) -> Self {
        select.build()
    }
}

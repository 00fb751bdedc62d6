//! # transql
//!
//! A dialect-table driven SQL transpiler with a SQLite target.
//!
//! ## Architecture
//!
//! A dialect is a bundle of lookup tables consulted by one generic engine:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      SQL text                            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [lexer: identifier/hex/keyword rules]
//! ┌─────────────────────────────────────────────────────────┐
//! │                      Lexemes                             │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [parser: function rewrite table]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Canonical tree (Expr)                    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [render: type, token and transform tables]
//! ┌─────────────────────────────────────────────────────────┐
//! │             SQL text + diagnostics                       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Constructs the target cannot express are rendered in their closest
//! supported form and reported as [`Diagnostic`](sql::render::Diagnostic)s;
//! [`UnsupportedLevel`](sql::render::UnsupportedLevel) decides whether they
//! are logged or turned into an error.

pub mod config;
pub mod sql;
pub mod transpile;

// Re-export SQL submodules at crate level
pub use sql::dialect;
pub use sql::expr;
pub use sql::parser;
pub use sql::render;
pub use sql::token;
pub use sql::types;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::Settings;
    pub use crate::dialect::{Dialect, DialectBuilder, DialectDescriptor, DialectRegistry};
    pub use crate::expr::{
        // Constructors
        begin_transaction,
        cast,
        col,
        date_add,
        distinct,
        fetch_first,
        func,
        greatest,
        group_concat,
        least,
        levenshtein,
        lit_bool,
        lit_float,
        lit_int,
        lit_null,
        lit_str,
        star,
        table,
        table_col,
        try_cast,
        // Types
        BinaryOperator,
        Expr,
        ExprExt,
        Literal,
        NodeKind,
        OrderItem,
        Select,
        UnaryOperator,
    };
    pub use crate::parser::{parse, parse_one};
    pub use crate::render::{render, RenderOptions, Rendered, UnsupportedLevel};
    pub use crate::transpile::transpile;
    pub use crate::types::{DataType, TypeKind};
}

// Also export at crate root for convenience
pub use dialect::Dialect;
pub use expr::{col, lit_int, lit_str, Expr, ExprExt};
// `render` (module and function) comes in through `sql::render` above
pub use render::{RenderOptions, Rendered};
pub use transpile::{transpile, TranspileError};

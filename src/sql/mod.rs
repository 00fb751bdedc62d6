//! SQL dialect engine.
//!
//! Text flows through the engine in two directions:
//!
//! - [`lexer`] and [`parser`] - SQL text to canonical trees, using a dialect's
//!   lexical rules and function table
//! - [`render`] - canonical trees to SQL text, using a dialect's type, token
//!   and transform tables
//!
//! Supporting modules:
//!
//! - [`expr`] - Canonical node model and builder DSL
//! - [`types`] - Canonical data types
//! - [`token`] - Keywords and output token streams
//! - [`dialect`] - Dialect descriptors, the built-in dialects and the registry

pub mod dialect;
pub mod expr;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod token;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types at the sql module level
pub use dialect::{
    Dialect, DialectBuilder, DialectDescriptor, DialectError, DialectRegistry, Transform,
};
pub use expr::{
    col, func, lit_bool, lit_float, lit_int, lit_null, lit_str, star, table, table_col,
    BinaryOperator, Expr, ExprExt, Ident, Literal, NodeKind, Select, UnaryOperator,
};
pub use lexer::{Lexeme, LexemeKind, Tokenizer};
pub use parser::{parse, parse_expr, parse_one, ParseError};
pub use render::{
    render, Diagnostic, RenderContext, RenderError, RenderOptions, Rendered, UnsupportedLevel,
};
pub use token::{Keyword, Token, TokenStream};
pub use types::{DataType, TypeKind};

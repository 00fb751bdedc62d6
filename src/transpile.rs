//! Parse with one dialect, render with another.
//!
//! ```
//! use transql::sql::dialect::Dialect;
//! use transql::sql::render::RenderOptions;
//! use transql::transpile::transpile;
//!
//! let out = transpile(
//!     "SELECT LEAST(a, b) FROM t FETCH FIRST 5 ROWS ONLY",
//!     Dialect::Generic.descriptor(),
//!     Dialect::Sqlite.descriptor(),
//!     RenderOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(out[0].sql, "SELECT MIN(a, b) FROM t LIMIT 5");
//! ```

use thiserror::Error;

use crate::sql::dialect::{DialectDescriptor, DialectError, DialectRegistry};
use crate::sql::parser::{parse, ParseError};
use crate::sql::render::{render, RenderError, RenderOptions, Rendered};

#[derive(Debug, Error)]
pub enum TranspileError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Dialect(#[from] DialectError),
}

/// Transpile every statement in `sql` from `read` to `write`.
pub fn transpile(
    sql: &str,
    read: &DialectDescriptor,
    write: &DialectDescriptor,
    options: RenderOptions,
) -> Result<Vec<Rendered>, TranspileError> {
    parse(sql, read)?
        .iter()
        .enumerate()
        .map(|(i, stmt)| {
            tracing::trace!(
                read = %read.name(),
                write = %write.name(),
                statement = i,
                kind = %stmt.kind(),
                "transpiling statement"
            );
            Ok(render(stmt, write, options)?)
        })
        .collect()
}

/// Like [`transpile`], resolving both dialects by name.
pub fn transpile_named(
    registry: &DialectRegistry,
    sql: &str,
    read: &str,
    write: &str,
    options: RenderOptions,
) -> Result<Vec<Rendered>, TranspileError> {
    let read = registry.resolve(read)?;
    let write = registry.resolve(write)?;
    transpile(sql, &read, &write, options)
}

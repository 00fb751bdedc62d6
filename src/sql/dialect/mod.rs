//! SQL dialect descriptors.
//!
//! A dialect is data, not a type: a [`DialectDescriptor`] bundles the tables
//! the generic engine consults while tokenizing, parsing and rendering.
//!
//! - Lexical rules: identifier delimiters, hex-string delimiters, keyword words
//! - Function table: surface function name to canonical constructor
//! - Type table: [`TypeKind`] to type keyword
//! - Token table: [`Keyword`] to output spelling
//! - Transform table: [`NodeKind`] to a rendering override
//!
//! Every table is an override layer over the generic base. Lookups check the
//! override first and fall back to the base, so a descriptor with no
//! overrides behaves exactly like [`Dialect::Generic`].
//!
//! # Usage
//!
//! ```
//! use transql::sql::dialect::Dialect;
//! use transql::sql::types::TypeKind;
//!
//! let sqlite = Dialect::Sqlite.descriptor();
//! assert_eq!(sqlite.type_keyword(TypeKind::Boolean), "INTEGER");
//! assert_eq!(sqlite.type_keyword(TypeKind::Date), "DATE");
//! ```
//!
//! Custom dialects are composed with [`DialectBuilder`] and validated when
//! built; [`DialectRegistry`] resolves dialects by name.

mod generic;
pub mod helpers;
mod sqlite;

pub use generic::{base_function, constructor_for};
pub use sqlite::{
    date_add_sql, fetch_sql, greatest_sql, group_concat_sql, least_sql, transaction_sql,
};

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use super::expr::{Expr, NodeKind};
use super::parser::ParseError;
use super::render::RenderContext;
use super::token::Keyword;
use super::types::TypeKind;

/// Procedural renderer for one node kind.
pub type Renderer = fn(&Expr, &mut RenderContext<'_>) -> String;

/// Canonical constructor for a surface function call.
pub type FunctionBuilder = fn(Vec<Expr>) -> Result<Expr, ParseError>;

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while constructing a dialect.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DialectError {
    #[error("unknown node kind: {0}")]
    UnknownNodeKind(String),

    #[error("unknown type: {0}")]
    UnknownType(String),

    #[error("unknown keyword: {0}")]
    UnknownKeyword(String),

    #[error("unknown dialect: {0}")]
    UnknownDialect(String),

    #[error("dialect '{0}' inherits from itself")]
    InheritanceCycle(String),

    #[error("dialect name '{0}' is already registered")]
    DuplicateName(String),

    #[error("transform '{transform}' does not apply to {kind} nodes")]
    IncompatibleTransform { kind: NodeKind, transform: String },

    #[error("unrecognized transform: {0}")]
    UnknownTransform(String),

    #[error("{0} nodes cannot be built from a function call")]
    NotConstructible(NodeKind),

    #[error("dialect '{0}' has no identifier delimiters")]
    NoIdentifierDelimiters(String),

    #[error("invalid {what} spelling: '{value}'")]
    InvalidSpelling { what: &'static str, value: String },
}

// =============================================================================
// Tables
// =============================================================================

/// Rendering override for one node kind.
#[derive(Debug, Clone)]
pub enum Transform {
    /// Render a call-shaped node under another function name.
    Rename(Cow<'static, str>),
    /// Render the closest supported form and record a diagnostic.
    Unsupported,
    /// Render only the node's inner operand.
    Inner,
    /// Procedural renderer.
    Custom(Renderer),
}

impl Transform {
    /// Short name used in errors and configuration.
    pub fn label(&self) -> &'static str {
        match self {
            Transform::Rename(_) => "rename",
            Transform::Unsupported => "unsupported",
            Transform::Inner => "inner",
            Transform::Custom(_) => "custom",
        }
    }

    /// Whether this transform can render nodes of `kind`.
    pub fn applies_to(&self, kind: NodeKind) -> bool {
        match self {
            Transform::Rename(_) => kind.is_call_shaped(),
            Transform::Unsupported => kind.has_degraded_form(),
            Transform::Inner => kind.has_inner_operand(),
            Transform::Custom(_) => true,
        }
    }
}

/// Token-level rules for the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalRules {
    /// Identifier delimiter pairs, all accepted. The first pair quotes output.
    pub identifiers: Vec<(char, char)>,
    /// Hex-string delimiter pairs. An empty end delimiter means the literal
    /// runs to the last hex digit (`0x1F`).
    pub hex_strings: Vec<(String, String)>,
    /// Upper-cased surface word to keyword, merged over the base spellings.
    pub keywords: HashMap<String, Keyword>,
}

impl Default for LexicalRules {
    fn default() -> Self {
        Self {
            identifiers: vec![('"', '"')],
            hex_strings: vec![("X'".into(), "'".into()), ("x'".into(), "'".into())],
            keywords: HashMap::new(),
        }
    }
}

// =============================================================================
// Descriptor
// =============================================================================

/// Immutable table bundle describing one dialect.
#[derive(Debug, Clone)]
pub struct DialectDescriptor {
    name: Cow<'static, str>,
    lexical: LexicalRules,
    functions: HashMap<String, FunctionBuilder>,
    types: [Option<Cow<'static, str>>; TypeKind::COUNT],
    tokens: HashMap<Keyword, Cow<'static, str>>,
    transforms: [Option<Transform>; NodeKind::COUNT],
}

impl DialectDescriptor {
    /// Dialect name for display/logging.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lexical(&self) -> &LexicalRules {
        &self.lexical
    }

    /// Classify a surface word. Case-insensitive.
    pub fn keyword(&self, word: &str) -> Option<Keyword> {
        self.lexical
            .keywords
            .get(&word.to_ascii_uppercase())
            .copied()
            .or_else(|| Keyword::from_base_word(word))
    }

    /// Constructor registered for a surface function name. Case-insensitive.
    pub fn function(&self, name: &str) -> Option<FunctionBuilder> {
        let upper = name.to_ascii_uppercase();
        self.functions
            .get(&upper)
            .copied()
            .or_else(|| base_function(&upper))
    }

    /// Build the canonical node for a function call.
    ///
    /// Names without a constructor become [`Expr::Function`] with the name as
    /// written.
    pub fn parse_function_call(&self, name: &str, args: Vec<Expr>) -> Result<Expr, ParseError> {
        match self.function(name) {
            Some(build) => build(args),
            None => Ok(Expr::Function {
                name: name.to_string(),
                args,
            }),
        }
    }

    /// Keyword a type kind renders as (without parameters).
    pub fn type_keyword(&self, kind: TypeKind) -> &str {
        self.types[kind.index()]
            .as_deref()
            .unwrap_or_else(|| kind.base_keyword())
    }

    /// Output spelling of a reserved word.
    pub fn token_keyword(&self, keyword: Keyword) -> &str {
        self.tokens
            .get(&keyword)
            .map(|s| s.as_ref())
            .unwrap_or_else(|| keyword.base_keyword())
    }

    /// Rendering override for a node kind, if any.
    pub fn transform(&self, kind: NodeKind) -> Option<&Transform> {
        self.transforms[kind.index()].as_ref()
    }

    fn transform_count(&self) -> usize {
        self.transforms.iter().flatten().count()
    }

    fn type_count(&self) -> usize {
        self.types.iter().flatten().count()
    }
}

impl fmt::Display for DialectDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Composes a [`DialectDescriptor`] over the base or over a parent dialect.
///
/// ```
/// use transql::sql::dialect::{Dialect, DialectBuilder};
/// use transql::sql::types::TypeKind;
///
/// let strict = DialectBuilder::extend("strict_sqlite", Dialect::Sqlite.descriptor())
///     .type_keyword(TypeKind::Boolean, "BOOLEAN")
///     .build()
///     .unwrap();
/// assert_eq!(strict.type_keyword(TypeKind::Boolean), "BOOLEAN");
/// assert_eq!(strict.type_keyword(TypeKind::Int), "INTEGER");
/// ```
#[derive(Debug, Clone)]
#[must_use = "builders have no effect until built"]
pub struct DialectBuilder {
    descriptor: DialectDescriptor,
}

impl DialectBuilder {
    /// Start from the generic base: no overrides.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            descriptor: DialectDescriptor {
                name: name.into(),
                lexical: LexicalRules::default(),
                functions: HashMap::new(),
                types: std::array::from_fn(|_| None),
                tokens: HashMap::new(),
                transforms: std::array::from_fn(|_| None),
            },
        }
    }

    /// Start from a copy of `parent`'s tables.
    pub fn extend(name: impl Into<Cow<'static, str>>, parent: &DialectDescriptor) -> Self {
        let mut descriptor = parent.clone();
        descriptor.name = name.into();
        Self { descriptor }
    }

    /// Replace the identifier delimiter pairs.
    pub fn identifiers(mut self, pairs: &[(char, char)]) -> Self {
        self.descriptor.lexical.identifiers = pairs.to_vec();
        self
    }

    /// Replace the hex-string delimiter pairs.
    pub fn hex_strings(mut self, pairs: &[(&str, &str)]) -> Self {
        self.descriptor.lexical.hex_strings = pairs
            .iter()
            .map(|(start, end)| (start.to_string(), end.to_string()))
            .collect();
        self
    }

    /// Classify an additional surface word as `keyword`.
    pub fn keyword(mut self, word: &str, keyword: Keyword) -> Self {
        self.descriptor
            .lexical
            .keywords
            .insert(word.to_ascii_uppercase(), keyword);
        self
    }

    /// Register a constructor for a surface function name.
    pub fn function(mut self, name: &str, build: FunctionBuilder) -> Self {
        self.descriptor
            .functions
            .insert(name.to_ascii_uppercase(), build);
        self
    }

    pub fn type_keyword(mut self, kind: TypeKind, spelling: impl Into<Cow<'static, str>>) -> Self {
        self.descriptor.types[kind.index()] = Some(spelling.into());
        self
    }

    pub fn token(mut self, keyword: Keyword, spelling: impl Into<Cow<'static, str>>) -> Self {
        self.descriptor.tokens.insert(keyword, spelling.into());
        self
    }

    pub fn transform(mut self, kind: NodeKind, transform: Transform) -> Self {
        self.descriptor.transforms[kind.index()] = Some(transform);
        self
    }

    /// Drop an inherited transform so the kind renders with the default.
    pub fn clear_transform(mut self, kind: NodeKind) -> Self {
        self.descriptor.transforms[kind.index()] = None;
        self
    }

    /// Validate every table and produce the descriptor.
    pub fn build(self) -> Result<DialectDescriptor, DialectError> {
        self.validate()?;
        Ok(self.assemble())
    }

    /// Produce the descriptor without validation. Used for the built-in
    /// tables, which are validated by unit tests.
    pub(crate) fn assemble(self) -> DialectDescriptor {
        let descriptor = self.descriptor;
        tracing::debug!(
            dialect = %descriptor.name,
            transforms = descriptor.transform_count(),
            types = descriptor.type_count(),
            tokens = descriptor.tokens.len(),
            functions = descriptor.functions.len(),
            "built dialect descriptor"
        );
        descriptor
    }

    fn validate(&self) -> Result<(), DialectError> {
        let d = &self.descriptor;

        if d.lexical.identifiers.is_empty() {
            return Err(DialectError::NoIdentifierDelimiters(d.name.to_string()));
        }
        for (start, _) in &d.lexical.hex_strings {
            if start.is_empty() {
                return Err(DialectError::InvalidSpelling {
                    what: "hex string delimiter",
                    value: start.clone(),
                });
            }
        }
        for word in d.lexical.keywords.keys() {
            check_word("keyword", word)?;
        }
        for name in d.functions.keys() {
            check_word("function", name)?;
        }
        for spelling in d.types.iter().flatten() {
            check_type_spelling(spelling)?;
        }
        for spelling in d.tokens.values() {
            check_word("keyword", spelling)?;
        }
        for kind in NodeKind::ALL {
            let Some(transform) = d.transform(kind) else {
                continue;
            };
            if !transform.applies_to(kind) {
                return Err(DialectError::IncompatibleTransform {
                    kind,
                    transform: transform.label().to_string(),
                });
            }
            if let Transform::Rename(name) = transform {
                check_word("function", name)?;
            }
        }
        Ok(())
    }
}

/// A single SQL word: letters, digits and underscores, not starting with a digit.
fn check_word(what: &'static str, value: &str) -> Result<(), DialectError> {
    let mut chars = value.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(DialectError::InvalidSpelling {
            what,
            value: value.to_string(),
        })
    }
}

/// Type spellings may be several words (`DOUBLE PRECISION`).
fn check_type_spelling(value: &str) -> Result<(), DialectError> {
    if value.trim().is_empty() {
        return Err(DialectError::InvalidSpelling {
            what: "type",
            value: value.to_string(),
        });
    }
    value
        .split(' ')
        .try_for_each(|word| check_word("type", word))
}

// =============================================================================
// Built-in dialects
// =============================================================================

/// Built-in dialect selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    #[default]
    Generic,
    Sqlite,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Generic, Dialect::Sqlite];

    /// Get the dialect tables.
    pub fn descriptor(&self) -> &'static DialectDescriptor {
        match self {
            Dialect::Generic => &generic::GENERIC,
            Dialect::Sqlite => &sqlite::SQLITE,
        }
    }

    fn shared(&self) -> Arc<DialectDescriptor> {
        match self {
            Dialect::Generic => Arc::clone(&generic::GENERIC),
            Dialect::Sqlite => Arc::clone(&sqlite::SQLITE),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Generic => "generic",
            Dialect::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = DialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" => Ok(Dialect::Generic),
            "sqlite" => Ok(Dialect::Sqlite),
            _ => Err(DialectError::UnknownDialect(s.to_string())),
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Dialects by name: the built-ins plus registered custom dialects.
#[derive(Debug, Clone, Default)]
pub struct DialectRegistry {
    custom: HashMap<String, Arc<DialectDescriptor>>,
}

impl DialectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom dialect under its own name (case-insensitive).
    pub fn register(
        &mut self,
        descriptor: DialectDescriptor,
    ) -> Result<Arc<DialectDescriptor>, DialectError> {
        let key = descriptor.name().to_ascii_lowercase();
        if key.parse::<Dialect>().is_ok() || self.custom.contains_key(&key) {
            return Err(DialectError::DuplicateName(descriptor.name().to_string()));
        }
        let shared = Arc::new(descriptor);
        self.custom.insert(key, Arc::clone(&shared));
        Ok(shared)
    }

    /// Look up a dialect by name.
    pub fn get(&self, name: &str) -> Option<Arc<DialectDescriptor>> {
        match name.parse::<Dialect>() {
            Ok(builtin) => Some(builtin.shared()),
            Err(_) => self.custom.get(&name.trim().to_ascii_lowercase()).cloned(),
        }
    }

    /// Like [`get`](Self::get), but an unknown name is an error.
    pub fn resolve(&self, name: &str) -> Result<Arc<DialectDescriptor>, DialectError> {
        self.get(name)
            .ok_or_else(|| DialectError::UnknownDialect(name.to_string()))
    }

    /// Every known name, built-ins first.
    pub fn names(&self) -> Vec<String> {
        let mut custom: Vec<String> = self.custom.keys().cloned().collect();
        custom.sort();
        Dialect::ALL
            .iter()
            .map(|d| d.name().to_string())
            .chain(custom)
            .collect()
    }
}

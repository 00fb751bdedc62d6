//! Canonical data types.
//!
//! A [`DataType`] is a [`TypeKind`] plus the optional parameters written after
//! the type name (`VARCHAR(255)`, `DECIMAL(10, 2)`). Dialects never see the
//! parameters in their substitution tables: they substitute the keyword for
//! the kind and the renderer appends the parameters unchanged.

use std::fmt;
use std::str::FromStr;

/// Dense enumeration of the canonical type kinds.
///
/// The discriminant doubles as the index into a dialect's type-substitution
/// table, so variants must stay contiguous and [`TypeKind::ALL`] must list
/// them in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeKind {
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Decimal,
    Char,
    NChar,
    Varchar,
    NVarchar,
    Text,
    Binary,
    VarBinary,
    Blob,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Json,
    Uuid,
}

impl TypeKind {
    /// Number of type kinds.
    pub const COUNT: usize = 22;

    /// Every kind, in discriminant order.
    pub const ALL: [TypeKind; Self::COUNT] = [
        TypeKind::Boolean,
        TypeKind::TinyInt,
        TypeKind::SmallInt,
        TypeKind::Int,
        TypeKind::BigInt,
        TypeKind::Float,
        TypeKind::Double,
        TypeKind::Decimal,
        TypeKind::Char,
        TypeKind::NChar,
        TypeKind::Varchar,
        TypeKind::NVarchar,
        TypeKind::Text,
        TypeKind::Binary,
        TypeKind::VarBinary,
        TypeKind::Blob,
        TypeKind::Date,
        TypeKind::Time,
        TypeKind::Timestamp,
        TypeKind::TimestampTz,
        TypeKind::Json,
        TypeKind::Uuid,
    ];

    /// Index into dense per-kind tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Configuration name (snake_case).
    pub fn name(self) -> &'static str {
        match self {
            TypeKind::Boolean => "boolean",
            TypeKind::TinyInt => "tinyint",
            TypeKind::SmallInt => "smallint",
            TypeKind::Int => "int",
            TypeKind::BigInt => "bigint",
            TypeKind::Float => "float",
            TypeKind::Double => "double",
            TypeKind::Decimal => "decimal",
            TypeKind::Char => "char",
            TypeKind::NChar => "nchar",
            TypeKind::Varchar => "varchar",
            TypeKind::NVarchar => "nvarchar",
            TypeKind::Text => "text",
            TypeKind::Binary => "binary",
            TypeKind::VarBinary => "varbinary",
            TypeKind::Blob => "blob",
            TypeKind::Date => "date",
            TypeKind::Time => "time",
            TypeKind::Timestamp => "timestamp",
            TypeKind::TimestampTz => "timestamptz",
            TypeKind::Json => "json",
            TypeKind::Uuid => "uuid",
        }
    }

    /// Keyword used by the base dialect.
    pub fn base_keyword(self) -> &'static str {
        match self {
            TypeKind::Boolean => "BOOLEAN",
            TypeKind::TinyInt => "TINYINT",
            TypeKind::SmallInt => "SMALLINT",
            TypeKind::Int => "INT",
            TypeKind::BigInt => "BIGINT",
            TypeKind::Float => "FLOAT",
            TypeKind::Double => "DOUBLE",
            TypeKind::Decimal => "DECIMAL",
            TypeKind::Char => "CHAR",
            TypeKind::NChar => "NCHAR",
            TypeKind::Varchar => "VARCHAR",
            TypeKind::NVarchar => "NVARCHAR",
            TypeKind::Text => "TEXT",
            TypeKind::Binary => "BINARY",
            TypeKind::VarBinary => "VARBINARY",
            TypeKind::Blob => "BLOB",
            TypeKind::Date => "DATE",
            TypeKind::Time => "TIME",
            TypeKind::Timestamp => "TIMESTAMP",
            TypeKind::TimestampTz => "TIMESTAMPTZ",
            TypeKind::Json => "JSON",
            TypeKind::Uuid => "UUID",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TypeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        TypeKind::ALL
            .into_iter()
            .find(|kind| kind.name() == lower)
            .ok_or_else(|| s.to_string())
    }
}

/// A canonical data type: kind plus optional parameters.
///
/// # Examples
///
/// ```
/// use transql::sql::types::{DataType, TypeKind};
///
/// let parsed = DataType::parse("decimal(10,2)").unwrap();
/// assert_eq!(parsed.kind, TypeKind::Decimal);
/// assert_eq!(parsed.params, vec![10, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataType {
    pub kind: TypeKind,
    pub params: Vec<u32>,
}

impl DataType {
    /// A type without parameters.
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            params: Vec::new(),
        }
    }

    /// A type with parameters.
    pub fn with_params(kind: TypeKind, params: Vec<u32>) -> Self {
        Self { kind, params }
    }

    /// Parse a SQL type name, including common aliases across dialects.
    ///
    /// Accepts an optional parenthesized parameter list. Returns `None` for
    /// names outside the canonical set or malformed parameters.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();

        let (name, params) = match s.find('(') {
            Some(open) => {
                let inner = s[open..].strip_prefix('(')?.strip_suffix(')')?;
                (s[..open].trim().to_string(), parse_params(inner)?)
            }
            None => (s, Vec::new()),
        };

        let kind = match name.as_str() {
            "bool" | "boolean" => TypeKind::Boolean,

            "tinyint" => TypeKind::TinyInt,
            "smallint" | "int2" => TypeKind::SmallInt,
            "int" | "integer" | "int4" | "mediumint" => TypeKind::Int,
            "bigint" | "int8" => TypeKind::BigInt,

            "float" | "real" | "float4" => TypeKind::Float,
            "double" | "double precision" | "float8" => TypeKind::Double,
            "decimal" | "numeric" | "number" => TypeKind::Decimal,

            "char" | "character" => TypeKind::Char,
            "nchar" | "native character" => TypeKind::NChar,
            "varchar" | "character varying" | "varying character" => TypeKind::Varchar,
            "nvarchar" => TypeKind::NVarchar,
            "text" | "string" | "clob" => TypeKind::Text,

            "binary" => TypeKind::Binary,
            "varbinary" => TypeKind::VarBinary,
            "blob" | "bytea" => TypeKind::Blob,

            "date" => TypeKind::Date,
            "time" => TypeKind::Time,
            "timestamp" | "datetime" => TypeKind::Timestamp,
            "timestamptz" | "timestamp with time zone" => TypeKind::TimestampTz,

            "json" | "jsonb" => TypeKind::Json,
            "uuid" => TypeKind::Uuid,

            _ => return None,
        };

        Some(DataType { kind, params })
    }
}

impl From<TypeKind> for DataType {
    fn from(kind: TypeKind) -> Self {
        DataType::new(kind)
    }
}

impl fmt::Display for DataType {
    /// Base-dialect spelling.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.base_keyword(), format_params(&self.params))
    }
}

/// Render a parameter list as `(a, b)`, or nothing when empty.
pub fn format_params(params: &[u32]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let joined: Vec<String> = params.iter().map(|p| p.to_string()).collect();
    format!("({})", joined.join(", "))
}

/// Parse "10" or "10, 2". `max` (T-SQL) is not a canonical parameter.
fn parse_params(inner: &str) -> Option<Vec<u32>> {
    inner
        .split(',')
        .map(|part| part.trim().parse::<u32>().ok())
        .collect()
}

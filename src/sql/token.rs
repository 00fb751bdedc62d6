//! SQL tokens - reserved words and output fragments.
//!
//! [`Keyword`] is the canonical reserved-word set shared by the tokenizer
//! (surface words classify to keywords) and the renderer (keywords serialize
//! to a dialect's spelling). [`Token`] and [`TokenStream`] are the output
//! side: renderers assemble keyword-heavy constructs as token streams and
//! serialize them against a dialect descriptor.

use std::fmt;
use std::str::FromStr;

use super::dialect::DialectDescriptor;

/// Canonical reserved words.
///
/// Adding a variant requires extending [`Keyword::ALL`] and the two match
/// tables below; the compiler flags the matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Keyword {
    // === Query ===
    Select,
    Distinct,
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Asc,
    Desc,
    As,

    // === Row limiting ===
    Limit,
    Offset,
    Fetch,
    First,
    Next,
    Row,
    Rows,
    Only,
    Percent,
    With,
    Ties,
    TableSample,

    // === Predicates and operators ===
    And,
    Or,
    Not,
    Is,
    Null,
    True,
    False,
    Like,
    ILike,
    Between,
    In,
    Case,
    When,
    Then,
    Else,
    End,
    Cast,
    TryCast,

    // === Transactions ===
    Begin,
    Transaction,
    Commit,
    Rollback,

    // === DDL ===
    Create,
    Table,
    If,
    Exists,
    Primary,
    Key,
    Unique,
    Default,
    AutoIncrement,
}

impl Keyword {
    /// Number of keywords.
    pub const COUNT: usize = 54;

    /// Every keyword, in declaration order.
    pub const ALL: [Keyword; Self::COUNT] = [
        Keyword::Select,
        Keyword::Distinct,
        Keyword::From,
        Keyword::Where,
        Keyword::Group,
        Keyword::By,
        Keyword::Having,
        Keyword::Order,
        Keyword::Asc,
        Keyword::Desc,
        Keyword::As,
        Keyword::Limit,
        Keyword::Offset,
        Keyword::Fetch,
        Keyword::First,
        Keyword::Next,
        Keyword::Row,
        Keyword::Rows,
        Keyword::Only,
        Keyword::Percent,
        Keyword::With,
        Keyword::Ties,
        Keyword::TableSample,
        Keyword::And,
        Keyword::Or,
        Keyword::Not,
        Keyword::Is,
        Keyword::Null,
        Keyword::True,
        Keyword::False,
        Keyword::Like,
        Keyword::ILike,
        Keyword::Between,
        Keyword::In,
        Keyword::Case,
        Keyword::When,
        Keyword::Then,
        Keyword::Else,
        Keyword::End,
        Keyword::Cast,
        Keyword::TryCast,
        Keyword::Begin,
        Keyword::Transaction,
        Keyword::Commit,
        Keyword::Rollback,
        Keyword::Create,
        Keyword::Table,
        Keyword::If,
        Keyword::Exists,
        Keyword::Primary,
        Keyword::Key,
        Keyword::Unique,
        Keyword::Default,
        Keyword::AutoIncrement,
    ];

    /// Spelling used by the base dialect, both for lexing and rendering.
    pub fn base_keyword(self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::Distinct => "DISTINCT",
            Keyword::From => "FROM",
            Keyword::Where => "WHERE",
            Keyword::Group => "GROUP",
            Keyword::By => "BY",
            Keyword::Having => "HAVING",
            Keyword::Order => "ORDER",
            Keyword::Asc => "ASC",
            Keyword::Desc => "DESC",
            Keyword::As => "AS",
            Keyword::Limit => "LIMIT",
            Keyword::Offset => "OFFSET",
            Keyword::Fetch => "FETCH",
            Keyword::First => "FIRST",
            Keyword::Next => "NEXT",
            Keyword::Row => "ROW",
            Keyword::Rows => "ROWS",
            Keyword::Only => "ONLY",
            Keyword::Percent => "PERCENT",
            Keyword::With => "WITH",
            Keyword::Ties => "TIES",
            Keyword::TableSample => "TABLESAMPLE",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
            Keyword::Is => "IS",
            Keyword::Null => "NULL",
            Keyword::True => "TRUE",
            Keyword::False => "FALSE",
            Keyword::Like => "LIKE",
            Keyword::ILike => "ILIKE",
            Keyword::Between => "BETWEEN",
            Keyword::In => "IN",
            Keyword::Case => "CASE",
            Keyword::When => "WHEN",
            Keyword::Then => "THEN",
            Keyword::Else => "ELSE",
            Keyword::End => "END",
            Keyword::Cast => "CAST",
            Keyword::TryCast => "TRY_CAST",
            Keyword::Begin => "BEGIN",
            Keyword::Transaction => "TRANSACTION",
            Keyword::Commit => "COMMIT",
            Keyword::Rollback => "ROLLBACK",
            Keyword::Create => "CREATE",
            Keyword::Table => "TABLE",
            Keyword::If => "IF",
            Keyword::Exists => "EXISTS",
            Keyword::Primary => "PRIMARY",
            Keyword::Key => "KEY",
            Keyword::Unique => "UNIQUE",
            Keyword::Default => "DEFAULT",
            Keyword::AutoIncrement => "AUTO_INCREMENT",
        }
    }

    /// Configuration name (snake_case).
    pub fn name(self) -> &'static str {
        match self {
            Keyword::Select => "select",
            Keyword::Distinct => "distinct",
            Keyword::From => "from",
            Keyword::Where => "where",
            Keyword::Group => "group",
            Keyword::By => "by",
            Keyword::Having => "having",
            Keyword::Order => "order",
            Keyword::Asc => "asc",
            Keyword::Desc => "desc",
            Keyword::As => "as",
            Keyword::Limit => "limit",
            Keyword::Offset => "offset",
            Keyword::Fetch => "fetch",
            Keyword::First => "first",
            Keyword::Next => "next",
            Keyword::Row => "row",
            Keyword::Rows => "rows",
            Keyword::Only => "only",
            Keyword::Percent => "percent",
            Keyword::With => "with",
            Keyword::Ties => "ties",
            Keyword::TableSample => "tablesample",
            Keyword::And => "and",
            Keyword::Or => "or",
            Keyword::Not => "not",
            Keyword::Is => "is",
            Keyword::Null => "null",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Like => "like",
            Keyword::ILike => "ilike",
            Keyword::Between => "between",
            Keyword::In => "in",
            Keyword::Case => "case",
            Keyword::When => "when",
            Keyword::Then => "then",
            Keyword::Else => "else",
            Keyword::End => "end",
            Keyword::Cast => "cast",
            Keyword::TryCast => "try_cast",
            Keyword::Begin => "begin",
            Keyword::Transaction => "transaction",
            Keyword::Commit => "commit",
            Keyword::Rollback => "rollback",
            Keyword::Create => "create",
            Keyword::Table => "table",
            Keyword::If => "if",
            Keyword::Exists => "exists",
            Keyword::Primary => "primary",
            Keyword::Key => "key",
            Keyword::Unique => "unique",
            Keyword::Default => "default",
            Keyword::AutoIncrement => "auto_increment",
        }
    }

    /// Classify a surface word by its base spelling (case-insensitive).
    pub fn from_base_word(word: &str) -> Option<Keyword> {
        Keyword::ALL
            .into_iter()
            .find(|kw| kw.base_keyword().eq_ignore_ascii_case(word))
    }

    /// Reserved words cannot appear as bare identifiers. Non-reserved words
    /// (row-limiting qualifiers, `KEY`, ...) are accepted as column names.
    pub fn is_reserved(self) -> bool {
        !matches!(
            self,
            Keyword::First
                | Keyword::Next
                | Keyword::Row
                | Keyword::Rows
                | Keyword::Only
                | Keyword::Percent
                | Keyword::Ties
                | Keyword::Key
                | Keyword::Transaction
                | Keyword::Begin
                | Keyword::Commit
                | Keyword::Rollback
                | Keyword::Fetch
                | Keyword::Offset
                | Keyword::AutoIncrement
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_keyword())
    }
}

impl FromStr for Keyword {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Keyword::ALL
            .into_iter()
            .find(|kw| kw.name() == lower)
            .ok_or_else(|| s.to_string())
    }
}

/// An output fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Reserved word, spelled by the dialect's token table.
    Kw(Keyword),
    Space,
    Comma,
    LParen,
    RParen,
    /// Already-rendered text (sub-expressions, identifiers, literals).
    Raw(String),
}

impl Token {
    /// Serialize this token for the given dialect.
    pub fn serialize(&self, dialect: &DialectDescriptor) -> String {
        match self {
            Token::Kw(kw) => dialect.token_keyword(*kw).to_string(),
            Token::Space => " ".into(),
            Token::Comma => ",".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::Raw(s) => s.clone(),
        }
    }
}

/// A stream of tokens that can be serialized to SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Create an empty token stream.
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    /// Push a single token.
    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    /// Push a keyword.
    pub fn kw(&mut self, kw: Keyword) -> &mut Self {
        self.push(Token::Kw(kw))
    }

    /// Push already-rendered text.
    pub fn raw(&mut self, s: impl Into<String>) -> &mut Self {
        self.push(Token::Raw(s.into()))
    }

    /// Serialize all tokens to a SQL string.
    pub fn serialize(&self, dialect: &DialectDescriptor) -> String {
        self.tokens.iter().map(|t| t.serialize(dialect)).collect()
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}

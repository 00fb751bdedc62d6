//! Table-driven tokenizer.
//!
//! The tokenizer knows SQL's fixed punctuation; everything dialect-specific
//! (identifier delimiters, hex-string delimiters, keyword words) comes from
//! the dialect's [`LexicalRules`](super::dialect::LexicalRules).

use super::dialect::DialectDescriptor;
use super::parser::ParseError;
use super::token::Keyword;

/// Lexeme categories.
#[derive(Debug, Clone, PartialEq)]
pub enum LexemeKind {
    Keyword(Keyword),
    /// Bare identifier or unreserved word.
    Word,
    /// Delimited identifier, delimiters removed and escapes resolved.
    QuotedIdent(String),
    /// String literal, quotes removed and escapes resolved.
    String(String),
    /// Hex digits of a binary literal.
    HexString(String),
    /// Hex digits of an integer written with an open-ended prefix (`0x1F`).
    HexNumber(String),
    Number,
    Comma,
    Dot,
    LParen,
    RParen,
    Semicolon,
    Star,
    Plus,
    Minus,
    Slash,
    Percent,
    Concat,
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
    Arrow,
    DoubleArrow,
}

/// One token of input.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub kind: LexemeKind,
    /// Source text, delimiters included.
    pub text: String,
    /// Byte offset into the input.
    pub offset: usize,
}

const SYMBOLS: &[(&str, LexemeKind)] = &[
    ("->>", LexemeKind::DoubleArrow),
    ("->", LexemeKind::Arrow),
    ("||", LexemeKind::Concat),
    ("<>", LexemeKind::Ne),
    ("!=", LexemeKind::Ne),
    ("<=", LexemeKind::Lte),
    (">=", LexemeKind::Gte),
    ("==", LexemeKind::Eq),
    ("=", LexemeKind::Eq),
    ("<", LexemeKind::Lt),
    (">", LexemeKind::Gt),
    (",", LexemeKind::Comma),
    (".", LexemeKind::Dot),
    ("(", LexemeKind::LParen),
    (")", LexemeKind::RParen),
    (";", LexemeKind::Semicolon),
    ("*", LexemeKind::Star),
    ("+", LexemeKind::Plus),
    ("-", LexemeKind::Minus),
    ("/", LexemeKind::Slash),
    ("%", LexemeKind::Percent),
];

/// Splits SQL text into lexemes using one dialect's lexical rules.
pub struct Tokenizer<'a> {
    dialect: &'a DialectDescriptor,
}

impl<'a> Tokenizer<'a> {
    pub fn new(dialect: &'a DialectDescriptor) -> Self {
        Self { dialect }
    }

    pub fn tokenize(&self, sql: &str) -> Result<Vec<Lexeme>, ParseError> {
        let rules = self.dialect.lexical();
        let mut out = Vec::new();
        let mut pos = 0;

        while let Some(ch) = sql[pos..].chars().next() {
            let rest = &sql[pos..];

            if ch.is_whitespace() {
                pos += ch.len_utf8();
                continue;
            }
            if rest.starts_with("--") {
                pos += rest.find('\n').unwrap_or(rest.len());
                continue;
            }
            if let Some(body) = rest.strip_prefix("/*") {
                let end = body
                    .find("*/")
                    .ok_or(ParseError::UnterminatedComment(pos))?;
                pos += end + 4;
                continue;
            }

            let (kind, len) = if let Some(hex) = self.hex_string(rest, pos)? {
                hex
            } else if let Some(&(_, close)) = rules.identifiers.iter().find(|(open, _)| *open == ch)
            {
                let (name, len) =
                    delimited(rest, close).ok_or(ParseError::UnterminatedIdentifier(pos))?;
                (LexemeKind::QuotedIdent(name), len)
            } else if ch == '\'' {
                let (value, len) =
                    delimited(rest, '\'').ok_or(ParseError::UnterminatedString(pos))?;
                (LexemeKind::String(value), len)
            } else if ch.is_ascii_digit() || (ch == '.' && starts_with_digit(&rest[1..])) {
                (LexemeKind::Number, number_len(rest, pos)?)
            } else if ch.is_alphabetic() || ch == '_' {
                let len = rest
                    .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
                    .unwrap_or(rest.len());
                let kind = match self.dialect.keyword(&rest[..len]) {
                    Some(keyword) => LexemeKind::Keyword(keyword),
                    None => LexemeKind::Word,
                };
                (kind, len)
            } else {
                let (symbol, kind) = SYMBOLS
                    .iter()
                    .find(|(symbol, _)| rest.starts_with(symbol))
                    .ok_or(ParseError::UnexpectedChar { ch, offset: pos })?;
                (kind.clone(), symbol.len())
            };

            out.push(Lexeme {
                kind,
                text: rest[..len].to_string(),
                offset: pos,
            });
            pos += len;
        }

        Ok(out)
    }

    /// Match any configured hex-string delimiter at the start of `rest`.
    fn hex_string(
        &self,
        rest: &str,
        pos: usize,
    ) -> Result<Option<(LexemeKind, usize)>, ParseError> {
        for (start, end) in &self.dialect.lexical().hex_strings {
            let Some(body) = rest.strip_prefix(start.as_str()) else {
                continue;
            };

            if end.is_empty() {
                let digits = body
                    .find(|c: char| !c.is_ascii_hexdigit())
                    .unwrap_or(body.len());
                if digits == 0 {
                    continue;
                }
                let hex = body[..digits].to_string();
                return Ok(Some((LexemeKind::HexNumber(hex), start.len() + digits)));
            }

            let close = body
                .find(end.as_str())
                .ok_or(ParseError::UnterminatedString(pos))?;
            let hex = &body[..close];
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ParseError::InvalidHexString {
                    text: hex.to_string(),
                    offset: pos,
                });
            }
            return Ok(Some((
                LexemeKind::HexString(hex.to_string()),
                start.len() + close + end.len(),
            )));
        }
        Ok(None)
    }
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Read a delimited run starting at the opening delimiter. A doubled closing
/// delimiter stands for itself. Returns the unescaped body and the byte
/// length consumed, or `None` when unterminated.
fn delimited(rest: &str, close: char) -> Option<(String, usize)> {
    let mut chars = rest.char_indices().skip(1).peekable();
    let mut body = String::new();
    while let Some((i, c)) = chars.next() {
        if c != close {
            body.push(c);
            continue;
        }
        if chars.peek().is_some_and(|&(_, next)| next == close) {
            chars.next();
            body.push(close);
            continue;
        }
        return Some((body, i + c.len_utf8()));
    }
    None
}

/// Length of a numeric literal: digits, optional fraction, optional exponent.
fn number_len(rest: &str, pos: usize) -> Result<usize, ParseError> {
    let bytes = rest.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = digits_from(0);
    if end < bytes.len() && bytes[end] == b'.' {
        end = digits_from(end + 1);
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end == exp {
            return Err(ParseError::InvalidNumber {
                text: rest[..exp].to_string(),
                offset: pos,
            });
        }
        end = exp_end;
    }
    Ok(end)
}

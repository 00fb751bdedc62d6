//! Recursive-descent parser producing canonical trees.
//!
//! The grammar is dialect-neutral. Dialects take part through the tokenizer
//! (which words are keywords, how identifiers and hex strings are delimited)
//! and through the function table: every `name(args)` call is handed to
//! [`DialectDescriptor::parse_function_call`].
//!
//! ```
//! use transql::sql::dialect::Dialect;
//! use transql::sql::expr::NodeKind;
//! use transql::sql::parser::parse_one;
//!
//! let stmt = parse_one("SELECT EDITDIST3(a, b) FROM [t]", Dialect::Sqlite.descriptor()).unwrap();
//! assert!(stmt.find(|e| e.kind() == NodeKind::Levenshtein).is_some());
//! ```

use thiserror::Error;

use super::dialect::DialectDescriptor;
use super::expr::{
    BinaryOperator, ColumnConstraint, ColumnDef, CreateTable, Expr, FetchDirection, Ident,
    Literal, OrderItem, SampleUnit, Select, SortDir, UnaryOperator,
};
use super::lexer::{Lexeme, LexemeKind, Tokenizer};
use super::token::Keyword;
use super::types::DataType;

/// Tokenizer and parser errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("unterminated string starting at offset {0}")]
    UnterminatedString(usize),

    #[error("unterminated identifier starting at offset {0}")]
    UnterminatedIdentifier(usize),

    #[error("unterminated comment starting at offset {0}")]
    UnterminatedComment(usize),

    #[error("invalid hex string '{text}' at offset {offset}")]
    InvalidHexString { text: String, offset: usize },

    #[error("invalid number '{text}' at offset {offset}")]
    InvalidNumber { text: String, offset: usize },

    #[error("expected {expected}, found '{found}' at offset {offset}")]
    UnexpectedToken {
        found: String,
        expected: String,
        offset: usize,
    },

    #[error("expected {0}, found end of input")]
    UnexpectedEnd(String),

    #[error("unknown type '{0}'")]
    UnknownType(String),

    #[error("invalid arguments to {function}: {message}")]
    InvalidArguments { function: String, message: String },

    #[error("expected exactly one statement, found {0}")]
    NotSingleStatement(usize),
}

/// Parse every statement in `sql`.
pub fn parse(sql: &str, dialect: &DialectDescriptor) -> Result<Vec<Expr>, ParseError> {
    Parser::new(sql, dialect)?.statements()
}

/// Parse exactly one statement.
pub fn parse_one(sql: &str, dialect: &DialectDescriptor) -> Result<Expr, ParseError> {
    let mut statements = parse(sql, dialect)?;
    match statements.len() {
        1 => Ok(statements.remove(0)),
        n => Err(ParseError::NotSingleStatement(n)),
    }
}

/// Parse a standalone scalar expression.
pub fn parse_expr(sql: &str, dialect: &DialectDescriptor) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(sql, dialect)?;
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(_) => Err(parser.error("end of input")),
    }
}

struct Parser<'a> {
    dialect: &'a DialectDescriptor,
    lexemes: Vec<Lexeme>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(sql: &str, dialect: &'a DialectDescriptor) -> Result<Self, ParseError> {
        Ok(Self {
            dialect,
            lexemes: Tokenizer::new(dialect).tokenize(sql)?,
            pos: 0,
        })
    }

    // =========================================================================
    // Cursor
    // =========================================================================

    fn peek(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&LexemeKind> {
        self.peek_kind_at(0)
    }

    fn peek_kind_at(&self, ahead: usize) -> Option<&LexemeKind> {
        self.lexemes.get(self.pos + ahead).map(|l| &l.kind)
    }

    fn peek_keyword(&self, keyword: Keyword) -> bool {
        self.peek_kind() == Some(&LexemeKind::Keyword(keyword))
    }

    fn advance(&mut self) -> Option<Lexeme> {
        let lexeme = self.lexemes.get(self.pos).cloned();
        if lexeme.is_some() {
            self.pos += 1;
        }
        lexeme
    }

    fn eat(&mut self, kind: &LexemeKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        self.eat(&LexemeKind::Keyword(keyword))
    }

    fn expect(&mut self, kind: &LexemeKind, what: &str) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error(what))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error(keyword.base_keyword()))
        }
    }

    fn error(&self, expected: &str) -> ParseError {
        match self.peek() {
            Some(lexeme) => ParseError::UnexpectedToken {
                found: lexeme.text.clone(),
                expected: expected.to_string(),
                offset: lexeme.offset,
            },
            None => ParseError::UnexpectedEnd(expected.to_string()),
        }
    }

    fn comma_list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = vec![item(self)?];
        while self.eat(&LexemeKind::Comma) {
            items.push(item(self)?);
        }
        Ok(items)
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn statements(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut out = Vec::new();
        loop {
            while self.eat(&LexemeKind::Semicolon) {}
            if self.peek().is_none() {
                return Ok(out);
            }
            out.push(self.statement()?);
            if self.peek().is_some() && !self.eat(&LexemeKind::Semicolon) {
                return Err(self.error("';'"));
            }
        }
    }

    fn statement(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind() {
            Some(LexemeKind::Keyword(Keyword::Select)) => self.select(),
            Some(LexemeKind::Keyword(Keyword::Begin)) => self.begin(),
            Some(LexemeKind::Keyword(Keyword::Commit)) => {
                self.pos += 1;
                self.eat_keyword(Keyword::Transaction);
                Ok(Expr::Commit)
            }
            Some(LexemeKind::Keyword(Keyword::Rollback)) => {
                self.pos += 1;
                self.eat_keyword(Keyword::Transaction);
                Ok(Expr::Rollback)
            }
            Some(LexemeKind::Keyword(Keyword::Create)) => self.create_table(),
            _ => Err(self.error("a statement")),
        }
    }

    /// `BEGIN [modifier words] [TRANSACTION]`
    fn begin(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Begin)?;
        let mut words = Vec::new();
        while self.peek_kind() == Some(&LexemeKind::Word) {
            if let Some(lexeme) = self.advance() {
                words.push(lexeme.text);
            }
        }
        self.eat_keyword(Keyword::Transaction);
        Ok(Expr::Transaction {
            modifier: (!words.is_empty()).then(|| words.join(" ")),
        })
    }

    fn create_table(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Create)?;
        self.expect_keyword(Keyword::Table)?;
        let if_not_exists = if self.eat_keyword(Keyword::If) {
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };
        let table = self.table_name()?;
        self.expect(&LexemeKind::LParen, "'('")?;
        let columns = self.comma_list(Self::column_def)?;
        self.expect(&LexemeKind::RParen, "')'")?;
        Ok(Expr::CreateTable(Box::new(CreateTable {
            table,
            if_not_exists,
            columns,
        })))
    }

    fn column_def(&mut self) -> Result<ColumnDef, ParseError> {
        let name = self.ident("a column name")?;
        let data_type = match self.peek_kind() {
            Some(LexemeKind::Word) => Some(self.data_type()?),
            _ => None,
        };

        let mut constraints = Vec::new();
        loop {
            if self.eat_keyword(Keyword::Primary) {
                self.expect_keyword(Keyword::Key)?;
                if !self.eat_keyword(Keyword::Asc) {
                    self.eat_keyword(Keyword::Desc);
                }
                constraints.push(ColumnConstraint::PrimaryKey);
            } else if self.eat_keyword(Keyword::Not) {
                self.expect_keyword(Keyword::Null)?;
                constraints.push(ColumnConstraint::NotNull);
            } else if self.eat_keyword(Keyword::Null) {
                // nullable is the default
            } else if self.eat_keyword(Keyword::Unique) {
                constraints.push(ColumnConstraint::Unique);
            } else if self.eat_keyword(Keyword::AutoIncrement) {
                constraints.push(ColumnConstraint::AutoIncrement);
            } else if self.eat_keyword(Keyword::Default) {
                constraints.push(ColumnConstraint::Default(self.unary()?));
            } else {
                break;
            }
        }

        Ok(ColumnDef {
            name,
            data_type,
            constraints,
        })
    }

    /// Type name words plus an optional parameter list.
    fn data_type(&mut self) -> Result<DataType, ParseError> {
        let mut words = Vec::new();
        while self.peek_kind() == Some(&LexemeKind::Word) {
            if let Some(lexeme) = self.advance() {
                words.push(lexeme.text);
            }
        }
        if words.is_empty() {
            return Err(self.error("a type name"));
        }
        let mut spelled = words.join(" ");

        if self.eat(&LexemeKind::LParen) {
            let params = self.comma_list(|p| match p.peek() {
                Some(Lexeme {
                    kind: LexemeKind::Number,
                    text,
                    ..
                }) => {
                    let text = text.clone();
                    p.pos += 1;
                    Ok(text)
                }
                _ => Err(p.error("a type parameter")),
            })?;
            self.expect(&LexemeKind::RParen, "')'")?;
            spelled = format!("{spelled}({})", params.join(", "));
        }

        DataType::parse(&spelled).ok_or(ParseError::UnknownType(spelled))
    }

    fn select(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Select)?;
        let mut select = Select::new();
        select.distinct = self.eat_keyword(Keyword::Distinct);
        select.projections = self.comma_list(Self::projection)?;

        if self.eat_keyword(Keyword::From) {
            select.from = Some(self.table_source()?);
        }
        if self.eat_keyword(Keyword::Where) {
            select.where_clause = Some(self.expr()?);
        }
        if self.eat_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            select.group_by = self.comma_list(Self::expr)?;
        }
        if self.eat_keyword(Keyword::Having) {
            select.having = Some(self.expr()?);
        }
        if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            select.order_by = self.order_items()?;
        }

        if self.eat_keyword(Keyword::Limit) {
            let first = self.expr()?;
            if self.eat(&LexemeKind::Comma) {
                // LIMIT <offset>, <count>
                select.offset = Some(first);
                select.limit = Some(Expr::Limit {
                    count: Box::new(self.expr()?),
                });
            } else {
                select.limit = Some(Expr::Limit {
                    count: Box::new(first),
                });
            }
        }
        if select.offset.is_none() && self.eat_keyword(Keyword::Offset) {
            select.offset = Some(self.expr()?);
            if !self.eat_keyword(Keyword::Rows) {
                self.eat_keyword(Keyword::Row);
            }
        }
        if select.limit.is_none() && self.peek_keyword(Keyword::Fetch) {
            select.limit = Some(self.fetch()?);
        }

        Ok(select.build())
    }

    /// `FETCH FIRST|NEXT [count] [PERCENT] ROW|ROWS ONLY|WITH TIES`
    fn fetch(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Fetch)?;
        let direction = if self.eat_keyword(Keyword::First) {
            FetchDirection::First
        } else if self.eat_keyword(Keyword::Next) {
            FetchDirection::Next
        } else {
            return Err(self.error("FIRST or NEXT"));
        };

        let count = if self.peek_keyword(Keyword::Row) || self.peek_keyword(Keyword::Rows) {
            None
        } else {
            Some(Box::new(self.unary()?))
        };
        let percent = self.eat_keyword(Keyword::Percent);
        if !self.eat_keyword(Keyword::Rows) {
            self.expect_keyword(Keyword::Row)?;
        }
        let with_ties = if self.eat_keyword(Keyword::With) {
            self.expect_keyword(Keyword::Ties)?;
            true
        } else {
            self.expect_keyword(Keyword::Only)?;
            false
        };

        Ok(Expr::Fetch {
            direction,
            count,
            percent,
            with_ties,
        })
    }

    fn projection(&mut self) -> Result<Expr, ParseError> {
        if self.eat(&LexemeKind::Star) {
            return Ok(Expr::Star { table: None });
        }
        let expr = self.expr()?;
        if self.eat_keyword(Keyword::As) {
            return Ok(Expr::Alias {
                this: Box::new(expr),
                alias: self.ident("an alias")?,
            });
        }
        match self.peek_kind() {
            Some(LexemeKind::Word) | Some(LexemeKind::QuotedIdent(_)) => Ok(Expr::Alias {
                this: Box::new(expr),
                alias: self.ident("an alias")?,
            }),
            _ => Ok(expr),
        }
    }

    fn table_source(&mut self) -> Result<Expr, ParseError> {
        let table = self.table_name()?;
        let table = match &table {
            Expr::Table {
                schema,
                name,
                alias: None,
            } => Expr::Table {
                schema: schema.clone(),
                name: name.clone(),
                alias: self.table_alias()?,
            },
            _ => table,
        };

        if !self.eat_keyword(Keyword::TableSample) {
            return Ok(table);
        }
        let method = match self.peek() {
            Some(Lexeme {
                kind: LexemeKind::Word,
                text,
                ..
            }) => Some(text.to_ascii_uppercase()),
            _ => None,
        };
        if method.is_some() {
            self.pos += 1;
        }
        self.expect(&LexemeKind::LParen, "'('")?;
        let size = self.expr()?;
        let unit = if self.eat_keyword(Keyword::Rows) {
            SampleUnit::Rows
        } else {
            self.eat_keyword(Keyword::Percent);
            SampleUnit::Percent
        };
        self.expect(&LexemeKind::RParen, "')'")?;

        Ok(Expr::TableSample {
            this: Box::new(table),
            method,
            size: Box::new(size),
            unit,
        })
    }

    /// `[schema.]name`
    fn table_name(&mut self) -> Result<Expr, ParseError> {
        let first = self.ident("a table name")?;
        let (schema, name) = if self.eat(&LexemeKind::Dot) {
            (Some(first), self.ident("a table name")?)
        } else {
            (None, first)
        };
        Ok(Expr::Table {
            schema,
            name,
            alias: None,
        })
    }

    fn table_alias(&mut self) -> Result<Option<Ident>, ParseError> {
        if self.eat_keyword(Keyword::As) {
            return self.ident("an alias").map(Some);
        }
        match self.peek_kind() {
            Some(LexemeKind::Word) | Some(LexemeKind::QuotedIdent(_)) => {
                self.ident("an alias").map(Some)
            }
            _ => Ok(None),
        }
    }

    fn ident(&mut self, what: &str) -> Result<Ident, ParseError> {
        let ident = match self.peek() {
            Some(Lexeme {
                kind: LexemeKind::Word,
                text,
                ..
            }) => Ident::new(text.as_str()),
            Some(Lexeme {
                kind: LexemeKind::QuotedIdent(name),
                ..
            }) => Ident::quoted(name.as_str()),
            Some(Lexeme {
                kind: LexemeKind::Keyword(keyword),
                text,
                ..
            }) if !keyword.is_reserved() => Ident::new(text.as_str()),
            _ => return Err(self.error(what)),
        };
        self.pos += 1;
        Ok(ident)
    }

    fn order_items(&mut self) -> Result<Vec<OrderItem>, ParseError> {
        self.comma_list(|p| {
            let expr = p.expr()?;
            let dir = if p.eat_keyword(Keyword::Asc) {
                Some(SortDir::Asc)
            } else if p.eat_keyword(Keyword::Desc) {
                Some(SortDir::Desc)
            } else {
                None
            };
            Ok(OrderItem { expr, dir })
        })
    }

    // =========================================================================
    // Expressions, lowest precedence first
    // =========================================================================

    fn expr(&mut self) -> Result<Expr, ParseError> {
        self.or()
    }

    fn or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.and()?;
        while self.eat_keyword(Keyword::Or) {
            left = binary(left, BinaryOperator::Or, self.and()?);
        }
        Ok(left)
    }

    fn and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.not()?;
        while self.eat_keyword(Keyword::And) {
            left = binary(left, BinaryOperator::And, self.not()?);
        }
        Ok(left)
    }

    fn not(&mut self) -> Result<Expr, ParseError> {
        if self.eat_keyword(Keyword::Not) {
            return Ok(Expr::UnaryOp {
                op: UnaryOperator::Not,
                expr: Box::new(self.not()?),
            });
        }
        self.comparison()
    }

    fn comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.additive()?;
        loop {
            let negated = self.peek_keyword(Keyword::Not)
                && matches!(
                    self.peek_kind_at(1),
                    Some(LexemeKind::Keyword(
                        Keyword::Like | Keyword::ILike | Keyword::Between | Keyword::In
                    ))
                );
            if negated {
                self.pos += 1;
            }

            let op = match self.peek_kind() {
                Some(LexemeKind::Eq) => Some(BinaryOperator::Eq),
                Some(LexemeKind::Ne) => Some(BinaryOperator::Ne),
                Some(LexemeKind::Lt) => Some(BinaryOperator::Lt),
                Some(LexemeKind::Gt) => Some(BinaryOperator::Gt),
                Some(LexemeKind::Lte) => Some(BinaryOperator::Lte),
                Some(LexemeKind::Gte) => Some(BinaryOperator::Gte),
                _ => None,
            };
            if let Some(op) = op {
                self.pos += 1;
                left = binary(left, op, self.additive()?);
                continue;
            }

            let this = Box::new(left);
            left = if self.eat_keyword(Keyword::Like) {
                Expr::Like {
                    this,
                    pattern: Box::new(self.additive()?),
                    negated,
                }
            } else if self.eat_keyword(Keyword::ILike) {
                Expr::ILike {
                    this,
                    pattern: Box::new(self.additive()?),
                    negated,
                }
            } else if self.eat_keyword(Keyword::Between) {
                let low = Box::new(self.additive()?);
                self.expect_keyword(Keyword::And)?;
                Expr::Between {
                    this,
                    low,
                    high: Box::new(self.additive()?),
                    negated,
                }
            } else if self.eat_keyword(Keyword::In) {
                self.expect(&LexemeKind::LParen, "'('")?;
                let list = self.comma_list(Self::expr)?;
                self.expect(&LexemeKind::RParen, "')'")?;
                Expr::InList {
                    this,
                    list,
                    negated,
                }
            } else if self.eat_keyword(Keyword::Is) {
                let negated = self.eat_keyword(Keyword::Not);
                self.expect_keyword(Keyword::Null)?;
                Expr::IsNull { this, negated }
            } else {
                return Ok(*this);
            };
        }
    }

    fn additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.multiplicative()?;
        loop {
            let op = match self.peek_kind() {
                Some(LexemeKind::Plus) => BinaryOperator::Plus,
                Some(LexemeKind::Minus) => BinaryOperator::Minus,
                _ => return Ok(left),
            };
            self.pos += 1;
            left = binary(left, op, self.multiplicative()?);
        }
    }

    fn multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.concat()?;
        loop {
            let op = match self.peek_kind() {
                Some(LexemeKind::Star) => BinaryOperator::Mul,
                Some(LexemeKind::Slash) => BinaryOperator::Div,
                Some(LexemeKind::Percent) => BinaryOperator::Mod,
                _ => return Ok(left),
            };
            self.pos += 1;
            left = binary(left, op, self.concat()?);
        }
    }

    /// `||`, `->` and `->>` share the tightest binary level, left to right.
    fn concat(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.unary()?;
        loop {
            match self.peek_kind() {
                Some(LexemeKind::Concat) => {
                    self.pos += 1;
                    left = binary(left, BinaryOperator::Concat, self.unary()?);
                }
                Some(LexemeKind::Arrow) => {
                    self.pos += 1;
                    left = Expr::JsonExtract {
                        this: Box::new(left),
                        path: Box::new(self.unary()?),
                    };
                }
                Some(LexemeKind::DoubleArrow) => {
                    self.pos += 1;
                    left = Expr::JsonExtractScalar {
                        this: Box::new(left),
                        path: Box::new(self.unary()?),
                    };
                }
                _ => return Ok(left),
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.eat(&LexemeKind::Minus) {
            return Ok(Expr::UnaryOp {
                op: UnaryOperator::Minus,
                expr: Box::new(self.unary()?),
            });
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let Some(lexeme) = self.peek().cloned() else {
            return Err(self.error("an expression"));
        };

        match lexeme.kind {
            LexemeKind::Number => {
                self.pos += 1;
                number(&lexeme)
            }
            LexemeKind::String(value) => {
                self.pos += 1;
                Ok(Expr::Literal(Literal::String(value)))
            }
            LexemeKind::HexString(digits) => {
                self.pos += 1;
                Ok(Expr::Literal(Literal::HexString(digits)))
            }
            LexemeKind::HexNumber(digits) => {
                self.pos += 1;
                Ok(Expr::Literal(Literal::HexNumber(digits)))
            }
            LexemeKind::Keyword(Keyword::True) => {
                self.pos += 1;
                Ok(Expr::Literal(Literal::Bool(true)))
            }
            LexemeKind::Keyword(Keyword::False) => {
                self.pos += 1;
                Ok(Expr::Literal(Literal::Bool(false)))
            }
            LexemeKind::Keyword(Keyword::Null) => {
                self.pos += 1;
                Ok(Expr::Literal(Literal::Null))
            }
            LexemeKind::Keyword(Keyword::Case) => self.case(),
            LexemeKind::Keyword(keyword @ (Keyword::Cast | Keyword::TryCast)) => {
                self.pos += 1;
                self.expect(&LexemeKind::LParen, "'('")?;
                let this = Box::new(self.expr()?);
                self.expect_keyword(Keyword::As)?;
                let to = self.data_type()?;
                self.expect(&LexemeKind::RParen, "')'")?;
                Ok(if keyword == Keyword::Cast {
                    Expr::Cast { this, to }
                } else {
                    Expr::TryCast { this, to }
                })
            }
            LexemeKind::LParen => {
                self.pos += 1;
                let inner = if self.peek_keyword(Keyword::Select) {
                    self.select()?
                } else {
                    self.expr()?
                };
                self.expect(&LexemeKind::RParen, "')'")?;
                Ok(Expr::Paren(Box::new(inner)))
            }
            LexemeKind::Star => {
                self.pos += 1;
                Ok(Expr::Star { table: None })
            }
            _ => self.column_or_call(),
        }
    }

    fn column_or_call(&mut self) -> Result<Expr, ParseError> {
        let name = self.ident("an expression")?;

        if !name.quoted && self.peek_kind() == Some(&LexemeKind::LParen) {
            let args = self.call_args()?;
            return self.dialect.parse_function_call(&name.name, args);
        }

        if self.eat(&LexemeKind::Dot) {
            if self.eat(&LexemeKind::Star) {
                return Ok(Expr::Star { table: Some(name) });
            }
            return Ok(Expr::Column {
                table: Some(name),
                name: self.ident("a column name")?,
            });
        }

        Ok(Expr::Column { table: None, name })
    }

    /// `( [DISTINCT] arg, ... [ORDER BY ...] [SEPARATOR sep] )`
    fn call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(&LexemeKind::LParen, "'('")?;
        if self.eat(&LexemeKind::RParen) {
            return Ok(Vec::new());
        }

        let distinct = self.eat_keyword(Keyword::Distinct);
        let mut args = self.comma_list(Self::expr)?;
        if distinct {
            args = vec![Expr::Distinct { exprs: args }];
        }

        if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            let order_by = self.order_items()?;
            let first = args.remove(0);
            args.insert(
                0,
                Expr::Order {
                    this: Box::new(first),
                    order_by,
                },
            );
        }

        let separator = matches!(
            self.peek(),
            Some(Lexeme { kind: LexemeKind::Word, text, .. }) if text.eq_ignore_ascii_case("SEPARATOR")
        );
        if separator {
            self.pos += 1;
            args.push(self.expr()?);
        }

        self.expect(&LexemeKind::RParen, "')'")?;
        Ok(args)
    }

    fn case(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Case)?;
        let operand = if self.peek_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.expr()?))
        };

        let mut whens = Vec::new();
        while self.eat_keyword(Keyword::When) {
            let condition = self.expr()?;
            self.expect_keyword(Keyword::Then)?;
            whens.push((condition, self.expr()?));
        }
        if whens.is_empty() {
            return Err(self.error("WHEN"));
        }

        let else_result = if self.eat_keyword(Keyword::Else) {
            Some(Box::new(self.expr()?))
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;

        Ok(Expr::Case {
            operand,
            whens,
            else_result,
        })
    }
}

fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::BinaryOp {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

fn number(lexeme: &Lexeme) -> Result<Expr, ParseError> {
    let text = lexeme.text.as_str();
    let invalid = || ParseError::InvalidNumber {
        text: text.to_string(),
        offset: lexeme.offset,
    };
    if text.contains(['.', 'e', 'E']) {
        return text
            .parse::<f64>()
            .map(|f| Expr::Literal(Literal::Float(f)))
            .map_err(|_| invalid());
    }
    match text.parse::<i64>() {
        Ok(n) => Ok(Expr::Literal(Literal::Int(n))),
        // Out of i64 range: keep the value as a float, as SQLite does.
        Err(_) => text
            .parse::<f64>()
            .map(|f| Expr::Literal(Literal::Float(f)))
            .map_err(|_| invalid()),
    }
}

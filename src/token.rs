use log::debug;
use serde::Serialize;
use std::fmt;

/// The closed set of token kinds produced by the Arbor lexer.
///
/// Kinds carry no data; the literal payload of `NUMBER`, `STRING` and
/// `IDENTIFIER` tokens lives in [`Token::literal`].
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Unsigned decimal integer literal
    NUMBER,

    /// Double‑quoted string literal (contents without quotes)
    STRING,

    /// A user‑defined name
    IDENTIFIER,

    /// '+'
    PLUS,

    /// '-'
    MINUS,

    /// '*'
    MULT,

    /// '/'
    DIV,

    /// '('
    LPAREN,

    /// ')'
    RPAREN,

    /// '{'
    LBRACE,

    /// '}'
    RBRACE,

    /// '['
    LBRACKET,

    /// ']'
    RBRACKET,

    /// ','
    COMMA,

    /// '>'
    GT,

    /// '<'
    LT,

    /// '>='
    GE,

    /// '<='
    LE,

    /// '='
    ASSIGN,

    /// '=='
    EQ,

    /// '!='
    NE,

    /// 'seed'
    SEED,

    /// 'branch'
    BRANCH,

    /// 'then'
    THEN,

    /// 'else'
    ELSE,

    /// 'grow'
    GROW,

    /// 'while'
    WHILE,

    /// 'in'
    IN,

    /// 'print'
    PRINT,

    /// '\n'; statements are line‑terminated
    NEWLINE,

    /// End‑of‑input marker
    EOF,
}

impl TokenKind {
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::NUMBER => "NUMBER",
            TokenKind::STRING => "STRING",
            TokenKind::IDENTIFIER => "IDENTIFIER",
            TokenKind::PLUS => "PLUS",
            TokenKind::MINUS => "MINUS",
            TokenKind::MULT => "MULT",
            TokenKind::DIV => "DIV",
            TokenKind::LPAREN => "LPAREN",
            TokenKind::RPAREN => "RPAREN",
            TokenKind::LBRACE => "LBRACE",
            TokenKind::RBRACE => "RBRACE",
            TokenKind::LBRACKET => "LBRACKET",
            TokenKind::RBRACKET => "RBRACKET",
            TokenKind::COMMA => "COMMA",
            TokenKind::GT => "GT",
            TokenKind::LT => "LT",
            TokenKind::GE => "GE",
            TokenKind::LE => "LE",
            TokenKind::ASSIGN => "ASSIGN",
            TokenKind::EQ => "EQ",
            TokenKind::NE => "NE",
            TokenKind::SEED => "SEED",
            TokenKind::BRANCH => "BRANCH",
            TokenKind::THEN => "THEN",
            TokenKind::ELSE => "ELSE",
            TokenKind::GROW => "GROW",
            TokenKind::WHILE => "WHILE",
            TokenKind::IN => "IN",
            TokenKind::PRINT => "PRINT",
            TokenKind::NEWLINE => "NEWLINE",
            TokenKind::EOF => "EOF",
        }
    }

    /// Relational operators accepted by a `condition`.
    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            TokenKind::GT
                | TokenKind::LT
                | TokenKind::GE
                | TokenKind::LE
                | TokenKind::EQ
                | TokenKind::NE
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload carried by literal‑bearing tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Int(i64),
    Text(String),
}

/// A scanned token: its kind, optional literal payload, and the line where
/// it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The category of this token.
    pub kind: TokenKind,

    /// Integer value of a `NUMBER`, text of a `STRING` or `IDENTIFIER`.
    pub literal: Option<Literal>,

    /// 1‑based line number in the source.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Self {
            kind,
            literal: None,
            line,
        }
    }

    pub fn with_literal(kind: TokenKind, literal: Literal, line: usize) -> Self {
        debug!(
            "Creating literal token: kind={}, literal={:?}, line={}",
            kind, literal, line
        );

        Self {
            kind,
            literal: Some(literal),
            line,
        }
    }

    /// Text payload of a `STRING` or `IDENTIFIER` token.
    pub fn text(&self) -> Option<&str> {
        match &self.literal {
            Some(Literal::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Integer payload of a `NUMBER` token.
    pub fn int(&self) -> Option<i64> {
        match self.literal {
            Some(Literal::Int(n)) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(Literal::Int(n)) => {
                let mut buf: itoa::Buffer = itoa::Buffer::new();
                write!(f, "{} {}", self.kind, buf.format(*n))
            }
            Some(Literal::Text(s)) => write!(f, "{} {}", self.kind, s),
            None => write!(f, "{}", self.kind),
        }
    }
}

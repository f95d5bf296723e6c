//! Centralised error hierarchy for the **Arbor interpreter**.
//!
//! Every stage (lexer, parser, evaluator) reports failure through one of the
//! variants below.  All of them are fatal: nothing in the crate retries or
//! recovers, the first error aborts the run.
//!
//! The module **does not** print diagnostics itself

use std::fmt;
use std::io;
use thiserror::Error;

use log::info;

use crate::token::TokenKind;

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ArborError {
    /// Lexical error: unknown character, unterminated string, oversized literal.
    #[error("[line {line}] Lexical error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// The parser met a token outside the set it could accept.
    #[error("[line {line}] Syntax error: expected {expected}, found {found}")]
    Syntax {
        expected: ExpectedKinds,
        found: String,
        line: usize,
    },

    /// Redeclaration in the same scope, or use of an unbound name.
    #[error("Scope error: {message}")]
    Scope { name: String, message: String },

    /// An operator, condition or loop received a value of the wrong tag.
    #[error("Type error: {0}")]
    Type(String),

    /// Division by zero and `i64` overflow.
    #[error("Arithmetic error: {0}")]
    Arithmetic(String),

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on output.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// UTF‑8 decoding failure when ingesting external text.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl ArborError {
    /// Helper constructor for the **lexer**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        ArborError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.
    pub fn syntax(line: usize, expected: &[TokenKind], found: impl fmt::Display) -> Self {
        let found: String = found.to_string();

        info!(
            "Creating Syntax error: line={}, expected={:?}, found={}",
            line, expected, found
        );

        ArborError::Syntax {
            expected: ExpectedKinds(expected.to_vec()),
            found,
            line,
        }
    }

    pub fn already_declared(name: &str) -> Self {
        ArborError::Scope {
            name: name.to_owned(),
            message: format!("variable '{}' already exists in the current scope", name),
        }
    }

    pub fn undefined(name: &str) -> Self {
        ArborError::Scope {
            name: name.to_owned(),
            message: format!("variable '{}' is not defined", name),
        }
    }

    pub fn type_error<S: Into<String>>(msg: S) -> Self {
        ArborError::Type(msg.into())
    }

    pub fn division_by_zero() -> Self {
        ArborError::Arithmetic("division by zero".to_owned())
    }

    pub fn overflow(op: &str) -> Self {
        ArborError::Arithmetic(format!("integer overflow in '{}'", op))
    }

    /// Lexical and syntax errors are reported before anything runs.
    pub fn is_static(&self) -> bool {
        matches!(self, ArborError::Lex { .. } | ArborError::Syntax { .. })
    }
}

/// The set of token kinds a grammar position would have accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedKinds(pub Vec<TokenKind>);

impl fmt::Display for ExpectedKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "nothing"),
            [only] => write!(f, "{}", only),
            [init @ .., last] => {
                for (i, kind) in init.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", kind)?;
                }
                write!(f, " or {}", last)
            }
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, ArborError>;

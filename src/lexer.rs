//! Module `lexer` implements the pull‑based lexer for Arbor.
//!
//! The parser drives it one token at a time:
//!
//! - `Lexer::new(src)` scans the first token eagerly.
//! - `current()` peeks at the token under the cursor.
//! - `advance()` replaces it with the next one.
//!
//! Horizontal whitespace is skipped, but `\n` is a real `NEWLINE` token
//! because block statements are line‑terminated.  Past the end of input the
//! lexer keeps producing `EOF`, so the parser never has to handle "no token".
//!
//! For the `tokenize` command the same scanning core is exposed as an
//! iterator through [`tokens`], which stops after `EOF` or the first error.
//!
//! # Recognised lexemes
//!
//! - Single‑character punctuators: `+ - * / ( ) { } [ ] ,`
//! - One‑or‑two character operators: `> >= < <= = == !=`
//! - Unsigned decimal integers (must fit in `i64`)
//! - Double‑quoted strings with no escapes, possibly spanning lines
//! - Identifiers and the keywords in [`KEYWORDS`]
//!
//! Anything else is a fatal lexical error.

use crate::error::{ArborError, Result};
use crate::token::{Literal, Token, TokenKind};
use log::{debug, info};
use memchr::{memchr, memchr_iter, memrchr};
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "seed"   => TokenKind::SEED,
    "branch" => TokenKind::BRANCH,
    "then"   => TokenKind::THEN,
    "else"   => TokenKind::ELSE,
    "grow"   => TokenKind::GROW,
    "while"  => TokenKind::WHILE,
    "in"     => TokenKind::IN,
    "print"  => TokenKind::PRINT,
};

/// Byte cursor over the source plus the single token of lookahead.
pub struct Lexer<'a> {
    src: &'a str,
    start: usize,      // index of the first byte of the current lexeme
    curr: usize,       // index one past the last byte examined
    line: usize,       // 1‑based line counter
    line_start: usize, // byte index where the current line begins
    current: Token,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `src` and scan its first token.
    pub fn new(src: &'a str) -> Result<Self> {
        let mut lexer = Self::unprimed(src);
        lexer.advance()?;

        Ok(lexer)
    }

    fn unprimed(src: &'a str) -> Self {
        info!("Lexer created over {} bytes", src.len());

        Self {
            src,
            start: 0,
            curr: 0,
            line: 1,
            line_start: 0,
            current: Token::new(TokenKind::EOF, 1),
        }
    }

    /// The token under the cursor.
    #[inline]
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Move the cursor to the next token.
    pub fn advance(&mut self) -> Result<()> {
        self.current = self.scan_token()?;

        debug!("Lexer advanced to {}", self.current);

        Ok(())
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.src.len()
    }

    #[inline(always)]
    fn bump(&mut self) -> u8 {
        let b = self.bytes()[self.curr];
        self.curr += 1;
        b
    }

    /// Peek at the current byte without consuming it; `0` past the end.
    #[inline(always)]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.bytes()[self.curr]
        }
    }

    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.curr += 1;
            true
        } else {
            false
        }
    }

    /// 1‑based column of the current lexeme, counted in characters.
    fn column(&self) -> usize {
        self.src[self.line_start..self.start].chars().count() + 1
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    fn skip_blanks(&mut self) {
        while !self.is_at_end() {
            let b = self.peek();
            if b == b'\n' || !b.is_ascii_whitespace() {
                break;
            }
            self.curr += 1;
        }
    }

    fn scan_token(&mut self) -> Result<Token> {
        self.skip_blanks();
        self.start = self.curr;

        if self.is_at_end() {
            return Ok(Token::new(TokenKind::EOF, self.line));
        }

        let line = self.line;
        let b = self.bump();

        let kind = match b {
            b'+' => TokenKind::PLUS,
            b'-' => TokenKind::MINUS,
            b'*' => TokenKind::MULT,
            b'/' => TokenKind::DIV,
            b'(' => TokenKind::LPAREN,
            b')' => TokenKind::RPAREN,
            b'{' => TokenKind::LBRACE,
            b'}' => TokenKind::RBRACE,
            b'[' => TokenKind::LBRACKET,
            b']' => TokenKind::RBRACKET,
            b',' => TokenKind::COMMA,

            b'>' => {
                if self.match_byte(b'=') {
                    TokenKind::GE
                } else {
                    TokenKind::GT
                }
            }

            b'<' => {
                if self.match_byte(b'=') {
                    TokenKind::LE
                } else {
                    TokenKind::LT
                }
            }

            b'=' => {
                if self.match_byte(b'=') {
                    TokenKind::EQ
                } else {
                    TokenKind::ASSIGN
                }
            }

            b'!' if self.match_byte(b'=') => TokenKind::NE,

            b'\n' => {
                self.line += 1;
                self.line_start = self.curr;
                TokenKind::NEWLINE
            }

            b'"' => return self.scan_string(),

            b'0'..=b'9' => return self.scan_number(),

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => return Ok(self.scan_identifier()),

            _ => {
                let c = self.src[self.start..].chars().next().unwrap_or('\0');

                return Err(ArborError::lex(
                    line,
                    format!(
                        "unexpected character '{}' at column {}",
                        c.escape_default(),
                        self.column()
                    ),
                ));
            }
        };

        Ok(Token::new(kind, line))
    }

    /// Scan a string literal; `self.start` points at the opening quote.
    fn scan_string(&mut self) -> Result<Token> {
        let line = self.line;
        let rest: &[u8] = &self.bytes()[self.curr..];

        let Some(len) = memchr(b'"', rest) else {
            return Err(ArborError::lex(
                line,
                format!("unterminated string starting at column {}", self.column()),
            ));
        };

        let body: &[u8] = &rest[..len];
        self.line += memchr_iter(b'\n', body).count();
        if let Some(nl) = memrchr(b'\n', body) {
            self.line_start = self.curr + nl + 1;
        }

        let text: &str = &self.src[self.curr..self.curr + len];
        self.curr += len + 1; // past the closing quote

        Ok(Token::with_literal(
            TokenKind::STRING,
            Literal::Text(text.to_owned()),
            line,
        ))
    }

    fn scan_number(&mut self) -> Result<Token> {
        while self.peek().is_ascii_digit() {
            self.curr += 1;
        }

        let digits: &str = &self.src[self.start..self.curr];
        let n: i64 = digits.parse().map_err(|_| {
            ArborError::lex(
                self.line,
                format!("integer literal {} does not fit in 64 bits", digits),
            )
        })?;

        Ok(Token::with_literal(
            TokenKind::NUMBER,
            Literal::Int(n),
            self.line,
        ))
    }

    /// Longest run of `[A-Za-z0-9_]`; exact keyword matches become keywords.
    fn scan_identifier(&mut self) -> Token {
        while {
            let c: u8 = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.curr += 1;
        }

        let word: &str = &self.src[self.start..self.curr];

        match KEYWORDS.get(word) {
            Some(kind) => Token::new(*kind, self.line),
            None => Token::with_literal(
                TokenKind::IDENTIFIER,
                Literal::Text(word.to_owned()),
                self.line,
            ),
        }
    }
}

// ───────────────────────── Iterator adapter ─────────────────────────

/// Iterate over every token of `src`, ending with `EOF`.
pub fn tokens(src: &str) -> Tokens<'_> {
    Tokens {
        lexer: Lexer::unprimed(src),
        done: false,
    }
}

/// Yields `Ok(token)` up to and including `EOF`, or a single `Err` and then
/// nothing.
pub struct Tokens<'a> {
    lexer: Lexer<'a>,
    done: bool,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.lexer.scan_token();

        match &result {
            Ok(token) if token.kind == TokenKind::EOF => self.done = true,
            Ok(_) => {}
            Err(_) => self.done = true,
        }

        Some(result)
    }
}

impl<'a> FusedIterator for Tokens<'a> {}

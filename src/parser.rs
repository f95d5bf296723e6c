/*!
Recursive‑descent parser for Arbor.

The parser pulls tokens from a [`Lexer`] on demand, one token of lookahead,
and builds the [`Program`] tree.  It never recovers: the first token outside
the expected set becomes an [`ArborError::Syntax`] naming that set and the
token actually found.

### Cost

| Phase                     | Cost | Rationale                                      |
|---------------------------|-----:|------------------------------------------------|
| `Parser::parse` main loop | Θ(n) | Each token is consumed exactly once.           |
| Individual productions    | O(1) per token | No backtracking, no second pass.     |

Call‑stack depth grows with syntactic nesting (blocks and parentheses).

### Logging Policy

| Location                    | Level   | Purpose                                    |
|-----------------------------|---------|--------------------------------------------|
| `Parser::new`, `parse`      | `info`  | Lifecycle milestones.                      |
| `statement`, `block`, loops | `debug` | Descent into grammar branches.             |

--------------------------------------------------------------------------------
Grammar
-------

```text
program    → ( statement | NEWLINE )* EOF ;
block      → "{" NEWLINE? ( statement | NEWLINE )* "}" ( NEWLINE | EOF | "else" | "}" ) ;
statement  → "seed" IDENT ( "=" value )? terminator
           | IDENT "=" value terminator
           | "branch" condition "then" block ( "else" block )?
           | "grow" ( IDENT "in" ( IDENT | list ) block | "while" condition block )
           | "print" value terminator ;
terminator → NEWLINE | EOF | "}" (inside a block, left unconsumed) ;
condition  → expression compare_op expression | "(" comparison ")" ;
expression → term ( ( "+" | "-" ) term )* ;
term       → factor ( ( "*" | "/" ) factor )* ;
factor     → NUMBER | STRING | IDENT | "(" expression ( compare_op expression )? ")" | list ;
list       → "[" ( elem ( "," elem )* )? "]" ;
elem       → NUMBER | STRING | IDENT ;
value      → expression ;
```

A `}` is accepted after a closing `}` only when the block is itself nested
inside another block.
*/

use crate::ast::{BinaryOp, Block, Expr, LoopSource, Program, Stmt};
use crate::error::{ArborError, Result};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

use log::{debug, info};

const STATEMENT_START: &[TokenKind] = &[
    TokenKind::SEED,
    TokenKind::IDENTIFIER,
    TokenKind::BRANCH,
    TokenKind::GROW,
    TokenKind::PRINT,
    TokenKind::NEWLINE,
];

const COMPARISON: &[TokenKind] = &[
    TokenKind::GT,
    TokenKind::LT,
    TokenKind::EQ,
    TokenKind::LE,
    TokenKind::GE,
    TokenKind::NE,
];

const FACTOR_START: &[TokenKind] = &[
    TokenKind::NUMBER,
    TokenKind::STRING,
    TokenKind::IDENTIFIER,
    TokenKind::LPAREN,
    TokenKind::LBRACKET,
];

const LIST_ELEMENT: &[TokenKind] = &[TokenKind::NUMBER, TokenKind::STRING, TokenKind::IDENTIFIER];

/// Lex and parse `source` in one call.
pub fn parse(source: &str) -> Result<Program> {
    Parser::new(source)?.parse()
}

/// Top‑level parser over a pull‑based lexer.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// Number of enclosing `{ ... }` bodies at the cursor.
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Construct a new parser; scans the first token.
    pub fn new(source: &'a str) -> Result<Self> {
        info!("Parser created over {} bytes", source.len());

        Ok(Self {
            lexer: Lexer::new(source)?,
            depth: 0,
        })
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse an entire program into its top‑level block.
    pub fn parse(&mut self) -> Result<Program> {
        info!("Beginning parse phase");

        let mut statements: Vec<Stmt> = Vec::new();

        while !self.check(TokenKind::EOF) {
            if self.matches(TokenKind::NEWLINE)? {
                continue;
            }

            statements.push(self.statement()?);
        }

        info!("Parsed {} top-level statement(s)", statements.len());

        Ok(Block::new(statements))
    }

    // ───────────────────────── statement rules ────────────────────

    fn statement(&mut self) -> Result<Stmt> {
        debug!("Entering statement at {}", self.peek());

        let kind: TokenKind = self.peek().kind;

        match kind {
            TokenKind::SEED => {
                let stmt = self.declaration()?;
                self.terminator()?;
                Ok(stmt)
            }

            TokenKind::IDENTIFIER => {
                let stmt = self.assignment()?;
                self.terminator()?;
                Ok(stmt)
            }

            TokenKind::PRINT => {
                self.advance()?;
                let stmt = Stmt::Print(self.value()?);
                self.terminator()?;
                Ok(stmt)
            }

            TokenKind::BRANCH => self.conditional(),

            TokenKind::GROW => self.grow(),

            _ => Err(self.error(STATEMENT_START)),
        }
    }

    fn declaration(&mut self) -> Result<Stmt> {
        self.consume(TokenKind::SEED)?;
        let name: String = self.identifier()?;

        let initializer: Option<Expr> = if self.matches(TokenKind::ASSIGN)? {
            Some(self.value()?)
        } else {
            None
        };

        Ok(Stmt::Declaration { name, initializer })
    }

    fn assignment(&mut self) -> Result<Stmt> {
        let name: String = self.identifier()?;
        self.consume(TokenKind::ASSIGN)?;
        let value: Expr = self.value()?;

        Ok(Stmt::Assignment { name, value })
    }

    fn conditional(&mut self) -> Result<Stmt> {
        self.consume(TokenKind::BRANCH)?;
        let condition: Expr = self.condition()?;
        self.consume(TokenKind::THEN)?;

        let then_branch: Block = self.block()?;
        let else_branch: Option<Block> = if self.matches(TokenKind::ELSE)? {
            Some(self.block()?)
        } else {
            None
        };

        Ok(Stmt::Conditional {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn grow(&mut self) -> Result<Stmt> {
        self.consume(TokenKind::GROW)?;

        if self.check(TokenKind::IDENTIFIER) {
            let binding: String = self.identifier()?;
            self.consume(TokenKind::IN)?;

            let kind: TokenKind = self.peek().kind;
            let source: LoopSource = match kind {
                TokenKind::IDENTIFIER => LoopSource::Name(self.identifier()?),
                TokenKind::LBRACKET => LoopSource::Literal(self.list()?),
                _ => return Err(self.error(&[TokenKind::IDENTIFIER, TokenKind::LBRACKET])),
            };

            debug!("Parsing for-each loop over {:?}", source);

            let body: Block = self.block()?;

            return Ok(Stmt::ForEach {
                binding,
                source,
                body,
            });
        }

        if self.matches(TokenKind::WHILE)? {
            debug!("Parsing while loop");

            let condition: Expr = self.condition()?;
            let body: Block = self.block()?;

            return Ok(Stmt::While { condition, body });
        }

        Err(self.error(&[TokenKind::IDENTIFIER, TokenKind::WHILE]))
    }

    fn block(&mut self) -> Result<Block> {
        self.consume(TokenKind::LBRACE)?;
        self.matches(TokenKind::NEWLINE)?;
        self.depth += 1;

        debug!("Entering block at depth {}", self.depth);

        let mut statements: Vec<Stmt> = Vec::new();

        while !self.check(TokenKind::RBRACE) {
            if self.check(TokenKind::EOF) {
                return Err(self.error(&[TokenKind::RBRACE]));
            }

            if self.matches(TokenKind::NEWLINE)? {
                continue;
            }

            statements.push(self.statement()?);
        }

        self.consume(TokenKind::RBRACE)?;
        self.depth -= 1;

        let kind: TokenKind = self.peek().kind;

        match kind {
            TokenKind::NEWLINE => {
                self.advance()?;
            }
            TokenKind::EOF | TokenKind::ELSE => {}
            TokenKind::RBRACE if self.depth > 0 => {}
            _ => {
                let mut expected = vec![TokenKind::NEWLINE, TokenKind::EOF, TokenKind::ELSE];
                if self.depth > 0 {
                    expected.push(TokenKind::RBRACE);
                }
                return Err(self.error(&expected));
            }
        }

        Ok(Block::new(statements))
    }

    /// A simple statement ends at a newline or the end of input.  Inside a
    /// block it may also end right before the closing brace.
    fn terminator(&mut self) -> Result<()> {
        let kind: TokenKind = self.peek().kind;

        match kind {
            TokenKind::NEWLINE => {
                self.advance()?;
                Ok(())
            }
            TokenKind::EOF => Ok(()),
            TokenKind::RBRACE if self.depth > 0 => Ok(()),
            _ if self.depth > 0 => {
                Err(self.error(&[TokenKind::NEWLINE, TokenKind::EOF, TokenKind::RBRACE]))
            }
            _ => Err(self.error(&[TokenKind::NEWLINE, TokenKind::EOF])),
        }
    }

    // ───────────────────────── expression rules ─────────────────────

    fn value(&mut self) -> Result<Expr> {
        self.expression()
    }

    /// Exactly one relational operator; bare expressions are rejected.
    fn condition(&mut self) -> Result<Expr> {
        let left: Expr = self.expression()?;

        if let Some(op) = self.comparison_op() {
            self.advance()?;
            let right: Expr = self.expression()?;
            return Ok(Expr::binary(op, left, right));
        }

        // `(a < b)` arrives here already built by `factor`.
        if matches!(&left, Expr::Binary { op, .. } if op.is_comparison()) {
            return Ok(left);
        }

        Err(self.error(COMPARISON))
    }

    fn expression(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.term()?;

        while let Some(op) = self.operator(&[TokenKind::PLUS, TokenKind::MINUS]) {
            self.advance()?;
            let right: Expr = self.term()?;
            expr = Expr::binary(op, expr, right);
        }

        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.factor()?;

        while let Some(op) = self.operator(&[TokenKind::MULT, TokenKind::DIV]) {
            self.advance()?;
            let right: Expr = self.factor()?;
            expr = Expr::binary(op, expr, right);
        }

        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr> {
        let kind: TokenKind = self.peek().kind;

        match kind {
            TokenKind::NUMBER | TokenKind::STRING | TokenKind::IDENTIFIER => self.atom(),

            TokenKind::LPAREN => {
                self.advance()?;
                let mut expr: Expr = self.expression()?;

                if let Some(op) = self.comparison_op() {
                    self.advance()?;
                    let right: Expr = self.expression()?;
                    expr = Expr::binary(op, expr, right);
                }

                self.consume(TokenKind::RPAREN)?;
                Ok(expr)
            }

            TokenKind::LBRACKET => Ok(Expr::List(self.list()?)),

            _ => Err(self.error(FACTOR_START)),
        }
    }

    fn list(&mut self) -> Result<Vec<Expr>> {
        self.consume(TokenKind::LBRACKET)?;

        let mut elements: Vec<Expr> = Vec::new();

        if !self.check(TokenKind::RBRACKET) {
            elements.push(self.list_element()?);

            while self.matches(TokenKind::COMMA)? {
                elements.push(self.list_element()?);
            }
        }

        self.consume(TokenKind::RBRACKET)?;

        Ok(elements)
    }

    fn list_element(&mut self) -> Result<Expr> {
        let kind: TokenKind = self.peek().kind;

        match kind {
            TokenKind::NUMBER | TokenKind::STRING | TokenKind::IDENTIFIER => self.atom(),
            _ => Err(self.error(LIST_ELEMENT)),
        }
    }

    /// NUMBER, STRING or IDENTIFIER leaf; the caller has checked the kind.
    fn atom(&mut self) -> Result<Expr> {
        let token: Token = self.advance()?;

        let expr = match (token.kind, token.int(), token.text()) {
            (TokenKind::NUMBER, Some(n), _) => Expr::Int(n),
            (TokenKind::STRING, _, Some(s)) => Expr::Str(s.to_owned()),
            (TokenKind::IDENTIFIER, _, Some(name)) => Expr::Identifier(name.to_owned()),
            _ => return Err(ArborError::syntax(token.line, LIST_ELEMENT, &token)),
        };

        Ok(expr)
    }

    // ────────────────────── utility helpers ───────────────────────

    fn comparison_op(&self) -> Option<BinaryOp> {
        let kind: TokenKind = self.peek().kind;

        if kind.is_comparison() {
            BinaryOp::from_kind(kind)
        } else {
            None
        }
    }

    fn operator(&self, kinds: &[TokenKind]) -> Option<BinaryOp> {
        let kind = self.peek().kind;

        if kinds.contains(&kind) {
            BinaryOp::from_kind(kind)
        } else {
            None
        }
    }

    fn identifier(&mut self) -> Result<String> {
        let token: Token = self.consume(TokenKind::IDENTIFIER)?;

        match token.text() {
            Some(name) => Ok(name.to_owned()),
            None => Err(ArborError::syntax(token.line, &[TokenKind::IDENTIFIER], &token)),
        }
    }

    #[inline(always)]
    fn matches(&mut self, kind: TokenKind) -> Result<bool> {
        if self.check(kind) {
            self.advance()?;

            return Ok(true);
        }

        Ok(false)
    }

    #[inline(always)]
    fn consume(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(kind) {
            return self.advance();
        }

        Err(self.error(&[kind]))
    }

    #[inline(always)]
    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the current token and return it.
    #[inline(always)]
    fn advance(&mut self) -> Result<Token> {
        let token: Token = self.lexer.current().clone();
        self.lexer.advance()?;

        Ok(token)
    }

    #[inline(always)]
    fn peek(&self) -> &Token {
        self.lexer.current()
    }

    fn error(&self, expected: &[TokenKind]) -> ArborError {
        let found: &Token = self.peek();

        debug!("Syntax error: expected {:?}, found {}", expected, found);

        ArborError::syntax(found.line, expected, found)
    }
}

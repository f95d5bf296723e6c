use std::fmt::Write;

use crate::ast::{Block, Expr, LoopSource, Program, Stmt};

/// Renders a parsed program as an indented tree, two spaces per level and
/// one node per line.  The output is for humans only; it does not parse back.
pub struct AstPrinter {
    out: String,
}

impl AstPrinter {
    pub fn print(program: &Program) -> String {
        let mut printer = AstPrinter { out: String::new() };
        printer.block(program, 0);
        printer.out
    }

    /// Dump of a single expression, starting at indent level 0.
    pub fn print_expr(expr: &Expr) -> String {
        let mut printer = AstPrinter { out: String::new() };
        printer.expr(expr, 0);
        printer.out
    }

    fn line(&mut self, indent: usize, text: impl std::fmt::Display) {
        // Writing into a String cannot fail.
        let _ = writeln!(self.out, "{:width$}{}", "", text, width = indent * 2);
    }

    fn block(&mut self, block: &Block, indent: usize) {
        self.line(indent, "Block");
        for stmt in &block.statements {
            self.stmt(stmt, indent + 1);
        }
    }

    fn stmt(&mut self, stmt: &Stmt, indent: usize) {
        match stmt {
            Stmt::Declaration { name, initializer } => {
                self.line(indent, "Declaration");
                self.line(indent + 1, format_args!("Identifier({})", name));
                if let Some(expr) = initializer {
                    self.expr(expr, indent + 1);
                }
            }

            Stmt::Assignment { name, value } => {
                self.line(indent, "Assignment");
                self.line(indent + 1, format_args!("Identifier({})", name));
                self.expr(value, indent + 1);
            }

            Stmt::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                self.line(indent, "Conditional");
                self.line(indent + 1, "Condition:");
                self.expr(condition, indent + 2);
                self.line(indent + 1, "Then:");
                self.block(then_branch, indent + 2);
                if let Some(else_branch) = else_branch {
                    self.line(indent + 1, "Else:");
                    self.block(else_branch, indent + 2);
                }
            }

            Stmt::While { condition, body } => {
                self.line(indent, "WhileLoop");
                self.line(indent + 1, "Condition:");
                self.expr(condition, indent + 2);
                self.line(indent + 1, "Body:");
                self.block(body, indent + 2);
            }

            Stmt::ForEach {
                binding,
                source,
                body,
            } => {
                match source {
                    LoopSource::Name(list) => {
                        self.line(indent, format_args!("InLoop(var: {}, list: {})", binding, list));
                    }
                    LoopSource::Literal(elements) => {
                        self.line(indent, format_args!("InLoop(var: {})", binding));
                        self.line(indent + 1, "List:");
                        self.list(elements, indent + 2);
                    }
                }
                self.line(indent + 1, "Body:");
                self.block(body, indent + 2);
            }

            Stmt::Print(expr) => {
                self.line(indent, "Print");
                self.expr(expr, indent + 1);
            }
        }
    }

    fn expr(&mut self, expr: &Expr, indent: usize) {
        match expr {
            Expr::Int(n) => self.line(indent, format_args!("IntVal({})", n)),
            Expr::Str(s) => self.line(indent, format_args!("StrVal({})", s)),
            Expr::Identifier(name) => self.line(indent, format_args!("Identifier({})", name)),
            Expr::List(elements) => self.list(elements, indent),
            Expr::Binary { op, left, right } => {
                self.line(indent, format_args!("BinOp({})", op.symbol()));
                self.expr(left, indent + 1);
                self.expr(right, indent + 1);
            }
        }
    }

    fn list(&mut self, elements: &[Expr], indent: usize) {
        self.line(indent, "ListVal");
        for element in elements {
            self.expr(element, indent + 1);
        }
    }
}

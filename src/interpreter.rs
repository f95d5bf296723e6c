use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use log::{debug, info};

use crate::ast::{BinaryOp, Block, Expr, LoopSource, Program, Stmt};
use crate::environment::Environment;
use crate::error::{ArborError, Result};
use crate::value::Value;

/// Tree‑walking evaluator.  `print` output goes to `out`.
pub struct Interpreter<W: Write> {
    environment: Rc<RefCell<Environment>>,
    out: W,
}

impl Interpreter<io::Stdout> {
    /// Interpreter with a fresh root scope printing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self::with_environment(Rc::new(RefCell::new(Environment::new())), out)
    }

    /// Run against a caller‑supplied root scope.
    pub fn with_environment(environment: Rc<RefCell<Environment>>, out: W) -> Self {
        info!("Initializing Interpreter");

        Self { environment, out }
    }

    /// The scope statements currently run in.
    pub fn environment(&self) -> Rc<RefCell<Environment>> {
        Rc::clone(&self.environment)
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs a whole program in the current scope.
    pub fn interpret(&mut self, program: &Program) -> Result<()> {
        debug!("Interpreting {} statements", program.statements.len());

        self.execute_block(program)?;
        self.out.flush()?;

        info!("Interpretation completed successfully");
        Ok(())
    }

    /// Statements in order, stopping at the first error.  No new scope.
    fn execute_block(&mut self, block: &Block) -> Result<()> {
        for stmt in &block.statements {
            self.execute(stmt)?;
        }
        Ok(())
    }

    /// Runs `body` once in a fresh child of the current scope.
    fn execute_in_child(&mut self, body: &Block, binding: Option<(&str, Value)>) -> Result<()> {
        let mut child = Environment::with_enclosing(Rc::clone(&self.environment));
        if let Some((name, value)) = binding {
            child.declare(name, value)?;
        }

        let previous = std::mem::replace(&mut self.environment, Rc::new(RefCell::new(child)));
        let result = self.execute_block(body);
        self.environment = previous;

        result
    }

    pub fn execute(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::Declaration { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::None,
                };
                self.environment.borrow_mut().declare(name, value)
            }

            Stmt::Assignment { name, value } => {
                // Unbound targets fail before the right‑hand side runs.
                self.environment.borrow().get(name)?;
                let value = self.evaluate(value)?;
                self.environment.borrow_mut().assign(name, value)
            }

            Stmt::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.condition(condition, "branch")? {
                    debug!("Condition is true; executing then branch");
                    self.execute_block(then_branch)
                } else if let Some(else_branch) = else_branch {
                    debug!("Condition is false; executing else branch");
                    self.execute_block(else_branch)
                } else {
                    Ok(())
                }
            }

            Stmt::While { condition, body } => {
                debug!("Entering while loop");
                let mut passes: usize = 0;
                while self.condition(condition, "while")? {
                    self.execute_in_child(body, None)?;
                    passes += 1;
                }
                debug!("Exited while loop after {} passes", passes);
                Ok(())
            }

            Stmt::ForEach {
                binding,
                source,
                body,
            } => {
                let value = match source {
                    LoopSource::Name(name) => self.environment.borrow().get(name)?,
                    LoopSource::Literal(elements) => self.evaluate_list(elements)?,
                };

                let Value::List(items) = value else {
                    return Err(ArborError::type_error(format!(
                        "'in' loop expects a list, got {}",
                        value.value_type()
                    )));
                };

                debug!("Entering for-each loop over {} items", items.len());
                for item in items {
                    self.execute_in_child(body, Some((binding, item)))?;
                }
                Ok(())
            }

            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.out, "{}", value)?;
                debug!("Printed value: {}", value);
                Ok(())
            }
        }
    }

    fn condition(&mut self, expr: &Expr, keyword: &str) -> Result<bool> {
        match self.evaluate(expr)? {
            Value::Bool(b) => Ok(b),
            other => Err(ArborError::type_error(format!(
                "{} condition must be bool, got {}",
                keyword,
                other.value_type()
            ))),
        }
    }

    /// Evaluates an expression to a value; its tag is `value.value_type()`.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Int(n) => Ok(Value::Integer(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::List(elements) => self.evaluate_list(elements),
            Expr::Identifier(name) => self.environment.borrow().get(name),
            Expr::Binary { op, left, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                binary(*op, left, right)
            }
        }
    }

    fn evaluate_list(&mut self, elements: &[Expr]) -> Result<Value> {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            values.push(self.evaluate(element)?);
        }
        Ok(Value::List(values))
    }
}

/// Applies `op` to two already evaluated operands.
pub fn binary(op: BinaryOp, left: Value, right: Value) -> Result<Value> {
    debug!("Binary {}: {} and {}", op.symbol(), left, right);

    if op.is_comparison() {
        return compare(op, &left, &right);
    }

    match (op, left, right) {
        (BinaryOp::Add, Value::Str(a), Value::Str(b)) => Ok(Value::Str(a + &b)),
        (op, Value::Integer(a), Value::Integer(b)) => arithmetic(op, a, b).map(Value::Integer),
        (BinaryOp::Add, l, r) => Err(ArborError::type_error(format!(
            "operator '+' requires two ints or two strs, got {} and {}",
            l.value_type(),
            r.value_type()
        ))),
        (op, l, r) => Err(ArborError::type_error(format!(
            "operator '{}' requires int operands, got {} and {}",
            op.symbol(),
            l.value_type(),
            r.value_type()
        ))),
    }
}

fn arithmetic(op: BinaryOp, a: i64, b: i64) -> Result<i64> {
    let result = match op {
        BinaryOp::Add => a.checked_add(b),
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mul => a.checked_mul(b),
        BinaryOp::Div => {
            if b == 0 {
                return Err(ArborError::division_by_zero());
            }
            floor_div(a, b)
        }
        _ => unreachable!("comparison operators are handled by compare()"),
    };

    result.ok_or_else(|| ArborError::overflow(op.symbol()))
}

/// Integer division rounding toward negative infinity.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

fn compare(op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
    let (lt, rt) = (left.value_type(), right.value_type());
    if lt != rt {
        return Err(ArborError::type_error(format!(
            "operator '{}' requires operands of the same type, got {} and {}",
            op.symbol(),
            lt,
            rt
        )));
    }

    let result = match op {
        BinaryOp::Eq => left == right,
        BinaryOp::Ne => left != right,
        BinaryOp::Gt => left.compare(right)?.is_gt(),
        BinaryOp::Lt => left.compare(right)?.is_lt(),
        BinaryOp::Ge => left.compare(right)?.is_ge(),
        BinaryOp::Le => left.compare(right)?.is_le(),
        _ => unreachable!("arithmetic operators are handled by arithmetic()"),
    };

    debug!("Comparison {} {} {} => {}", left, op.symbol(), right, result);

    Ok(Value::Bool(result))
}

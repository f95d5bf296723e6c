pub mod ast;
pub mod ast_printer;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod prepro;
pub mod token;
pub mod value;

use std::io::Write;

pub use error::{ArborError, Result};
pub use interpreter::Interpreter;
pub use parser::parse;
pub use value::{Value, ValueType};

/// Parse already filtered `source` and run it with a fresh root scope,
/// writing `print` output to `out`.
pub fn run<W: Write>(source: &str, out: W) -> Result<W> {
    let program = parse(source)?;
    let mut interpreter = Interpreter::new(out);
    interpreter.interpret(&program)?;

    Ok(interpreter.into_output())
}

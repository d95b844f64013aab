use std::io::Write;
use std::rc::Rc;

use lox_core::ast::Stmt;
use lox_core::errors::RuntimeError;
use objects::environment::{EnvRef, Environment};
use objects::Value;

// Submodules
mod expressions;
mod natives;
mod statements;

#[cfg(test)]
mod tests;

/// The outcome of executing a single statement. A `return` statement is
/// ordinary control flow, not a failure: it unwinds through every
/// enclosing block until a call frame catches it.
pub enum ExecResult {
  Ok,
  Return(Value),
  Error(RuntimeError),
}

/// Tree-walking evaluator. Holds the global environment for the lifetime
/// of a session, so a REPL can keep definitions across lines, and writes
/// `print` output through the given sink.
pub struct Interpreter<W: Write> {
  globals: EnvRef,
  env: EnvRef,
  out: W,
}

impl<W: Write> Interpreter<W> {
  /// Creates an interpreter whose global environment is seeded with the
  /// native prelude.
  pub fn new(out: W) -> Interpreter<W> {
    let globals = Environment::new();

    for native in natives::prelude() {
      let name = native.name.clone();
      globals.borrow_mut().define(&name, Value::Native(Rc::new(native)));
    }

    Interpreter {
      env: globals.clone(),
      globals,
      out,
    }
  }

  /// Executes a resolved program against the persistent globals. The first
  /// runtime error aborts execution and is returned to the caller.
  pub fn interpret(&mut self, program: &[Stmt]) -> Result<(), RuntimeError> {
    for stmt in program {
      match self.execute(stmt) {
        ExecResult::Ok => {}
        // The resolver rejects top-level returns, so a stray `Return`
        // can only mean the program skipped resolution; swallow it.
        ExecResult::Return(_) => {}
        ExecResult::Error(error) => return Err(error),
      }
    }

    Ok(())
  }
}

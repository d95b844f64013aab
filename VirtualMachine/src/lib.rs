use std::io::Write;

use compiler::Compiler;
use lox_core::errors::report_errors_list;

// Submodules
mod run;
mod stack;

#[cfg(test)]
mod tests;

pub use stack::ValueStack;

/// The types of results the interpreter can return.
#[derive(Debug, PartialEq, Eq)]
pub enum InterpretResult {
  CompileError,
  Ok,
  RuntimeError,
}

/// Represents the virtual machine. Owns the sink the final value of an
/// expression chunk is printed to.
pub struct Vm<W: Write> {
  out: W,
}

impl<W: Write> Vm<W> {
  pub fn new(out: W) -> Vm<W> {
    Vm { out }
  }

  /// Compiles and executes a string of source code.
  pub fn interpret(&mut self, source: &str) -> InterpretResult {
    let chunk = match Compiler::compile(source) {
      Ok(chunk) => chunk,
      Err(errors) => {
        report_errors_list(&errors);
        return InterpretResult::CompileError;
      }
    };

    let mut stack = ValueStack::new();
    self.run(&chunk, &mut stack)
  }
}

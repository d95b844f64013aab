use std::fmt;
use std::fmt::Formatter;

/// The stages an error can originate from. Scanner faults are surfaced by
/// the parser or compiler, so user-facing reports only ever carry the
/// `Syntax` or `Runtime` kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Lexical,
  Syntax,
  Runtime,
}

impl ErrorKind {
  /// The user-facing name of this error kind.
  pub fn name(&self) -> &'static str {
    match self {
      ErrorKind::Lexical => "LexicalError",
      ErrorKind::Syntax => "SyntaxError",
      ErrorKind::Runtime => "RuntimeError",
    }
  }
}

/// A single static-analysis error found while scanning, parsing, compiling,
/// or resolving a program.
#[derive(Debug, Clone)]
pub struct ErrorReport {
  pub kind: ErrorKind,
  pub line: usize,
  pub column: usize,
  pub message: String,
}

impl fmt::Display for ErrorReport {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
    write!(
      f,
      "\x1b[31;1m{}:\x1b[0m\x1b[1m {}\x1b[0m [{}:{}]",
      self.kind.name(),
      self.message,
      self.line,
      self.column
    )
  }
}

/// Prints a list of reported errors to the console.
pub fn report_errors_list(errors: &[ErrorReport]) {
  for error in errors {
    eprintln!("{}", error);
  }
}

/// An execution fault raised while evaluating a program.
#[derive(Debug, Clone)]
pub struct RuntimeError {
  pub message: String,
  pub line: usize,
}

impl RuntimeError {
  pub fn new<S: Into<String>>(message: S, line: usize) -> RuntimeError {
    RuntimeError {
      message: message.into(),
      line,
    }
  }
}

impl fmt::Display for RuntimeError {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
    write!(
      f,
      "\x1b[31;1mRuntimeError:\x1b[0m\x1b[1m {}\x1b[0m [line {}]",
      self.message, self.line
    )
  }
}

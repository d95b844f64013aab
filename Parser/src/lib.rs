use lexer::Lexer;
use lox_core::ast::Stmt;
use lox_core::errors::{ErrorKind, ErrorReport};
use lox_core::tokens::{Token, TokenKind};

// Submodules
mod parse_declarations;
mod parse_expressions;
mod parse_statements;


/// The most arguments (and parameters) a single call is allowed to take.
pub const MAX_CALL_ARGS: usize = 254;

/// Represents the parser, which converts source text into an Abstract
/// Syntax Tree representation of the program.
pub struct Parser {
  /// The lexer used in this parser.
  lexer: Lexer,
  /// The previously consumed token.
  previous: Token,
  /// The current token (not yet consumed).
  current: Token,
  /// Whether the parser is in error-recovery mode or not.
  is_in_panic: bool,
  /// A list of reported errors generated while parsing.
  errors: Vec<ErrorReport>,
}

impl Parser {
  /// Parses a string of source text into a Lox AST.
  ///
  /// # Returns
  /// - `Ok(Vec<Stmt>)`: The statements of the program.
  /// - `Err(Vec<ErrorReport>)`: A list of parsing errors.
  pub fn parse(src: &str) -> Result<Vec<Stmt>, Vec<ErrorReport>> {
    let mut parser = Parser {
      lexer: Lexer::new(src),
      previous: Token::empty(),
      current: Token::empty(),
      is_in_panic: false,
      errors: vec![],
    };

    let mut program: Vec<Stmt> = vec![];

    parser.advance();
    while !parser.matches(&TokenKind::EOF) {
      match parser.parse_declaration() {
        Some(stmt) => program.push(stmt),
        // The error was reported and the parser synchronized; keep going
        // to catch other errors in the program.
        None => {}
      }
    }

    if parser.errors.is_empty() {
      Ok(program)
    } else {
      Err(parser.errors)
    }
  }

  /// Checks that the current token matches the token kind provided.
  fn check(&self, kind: &TokenKind) -> bool {
    self.current.kind == *kind
  }

  /// Checks that the current token matches the token kind provided.
  /// If the tokens match, the current token gets consumed, and the function
  /// returns true. Otherwise, the token is not consumed, and the function
  /// returns false.
  fn matches(&mut self, kind: &TokenKind) -> bool {
    if self.check(kind) {
      self.advance();
      true
    } else {
      false
    }
  }

  /// Advances the parser to the next token, folding any error tokens the
  /// scanner produces into syntax errors.
  fn advance(&mut self) {
    self.previous = self.current.clone();

    loop {
      self.current = self.lexer.next_token();

      match self.current.kind {
        TokenKind::ERROR => {
          let message = self.current.lexeme.clone();
          self.error_at_current(&message);
        }
        _ => break,
      }
    }
  }

  /// Consumes the current token only if it is of a given kind. If the token
  /// does not match the kind, emits a syntax error and yields `None` so the
  /// caller can propagate the failure.
  fn consume(&mut self, kind: &TokenKind, message: &str) -> Option<()> {
    if self.check(kind) {
      self.advance();
      return Some(());
    }

    if let TokenKind::SEMICOLON = kind {
      self.error_at_previous(message);
    } else {
      self.error_at_current(message);
    }

    None
  }

  /// Emits a syntax error from the current token.
  fn error_at_current(&mut self, message: &str) {
    self.error_at_token(&self.current.clone(), message);
  }

  /// Emits a syntax error from the previous token.
  fn error_at_previous(&mut self, message: &str) {
    self.error_at_token(&self.previous.clone(), message);
  }

  /// Emits a syntax error from the given token. While the parser is in
  /// panic mode, further reports are suppressed.
  fn error_at_token(&mut self, token: &Token, message: &str) {
    if self.is_in_panic {
      return;
    }
    self.is_in_panic = true;

    self.errors.push(ErrorReport {
      kind: ErrorKind::Syntax,
      line: token.line_num,
      column: token.column_start,
      message: String::from(message),
    });
  }

  /// Synchronizes the parser after it has found an error. This method helps
  /// minimize the number of cascading errors the parser emits when it finds
  /// a parsing error. Once it reaches a synchronization point, like a
  /// keyword for a statement, it resumes reporting.
  fn synchronize(&mut self) {
    self.is_in_panic = false;

    while !self.check(&TokenKind::EOF) {
      if let TokenKind::SEMICOLON = self.previous.kind {
        return;
      }

      match self.current.kind {
        TokenKind::CLASS_KW
        | TokenKind::FUN_KW
        | TokenKind::VAR_KW
        | TokenKind::FOR_KW
        | TokenKind::IF_KW
        | TokenKind::WHILE_KW
        | TokenKind::PRINT_KW
        | TokenKind::RETURN_KW => return,

        _ => {}
      }

      self.advance();
    }
  }
}

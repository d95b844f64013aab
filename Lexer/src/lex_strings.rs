use crate::Lexer;
use lox_core::tokens::{Token, TokenKind};

impl Lexer {
  /// Generates a string literal token with the current state of the
  /// scanner. The opening quote has already been consumed; the lexeme
  /// includes both quotes. Strings may span lines.
  pub(crate) fn make_string_token(&mut self) -> Token {
    while !self.is_at_end() && self.get_current() != '"' {
      if self.get_current() == '\n' {
        self.line_num += 1;
        self.line_start = self.current + 1;
      }

      self.advance();
    }

    if self.is_at_end() {
      return self.make_error_token("Unterminated string.");
    }

    // The closing quote
    self.advance();

    self.make_token(TokenKind::STR_LIT)
  }
}

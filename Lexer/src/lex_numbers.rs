use crate::Lexer;
use lox_core::tokens::{Token, TokenKind};

impl Lexer {
  /// Generates a numeric literal token with the current state of the
  /// scanner. A trailing dot is never consumed: `7.` lexes as the number
  /// `7` followed by a `.` token.
  pub(crate) fn make_numeric_token(&mut self) -> Token {
    while self.get_current().is_ascii_digit() {
      self.advance();
    }

    if self.get_current() == '.' && self.get_next().is_ascii_digit() {
      self.advance();

      while self.get_current().is_ascii_digit() {
        self.advance();
      }
    }

    self.make_token(TokenKind::NUM_LIT)
  }
}

use crate::char_is_ident_start;
use crate::Lexer;
use lox_core::tokens::{Token, TokenKind};

impl Lexer {
  /// Scans and returns the next token in the source. Once the input is
  /// exhausted, every call produces the same `EOF` token.
  pub fn next_token(&mut self) -> Token {
    self.skip_whitespace();
    self.token_start = self.current;

    if self.is_at_end() {
      return self.make_eof_token();
    }

    let c = self.advance();

    if char_is_ident_start!(c) {
      return self.make_identifier_token();
    }

    if c.is_ascii_digit() {
      return self.make_numeric_token();
    }

    match c {
      '(' => self.make_token(TokenKind::L_PAREN),
      ')' => self.make_token(TokenKind::R_PAREN),
      '{' => self.make_token(TokenKind::L_CURLY),
      '}' => self.make_token(TokenKind::R_CURLY),
      ';' => self.make_token(TokenKind::SEMICOLON),
      ',' => self.make_token(TokenKind::COMMA),
      '.' => self.make_token(TokenKind::DOT),
      '-' => self.make_token(TokenKind::DASH),
      '+' => self.make_token(TokenKind::PLUS),
      '/' => self.make_token(TokenKind::SLASH),
      '*' => self.make_token(TokenKind::STAR),
      '!' => {
        if self.matches('=') {
          self.make_token(TokenKind::LOGIC_NOT_EQ)
        } else {
          self.make_token(TokenKind::BANG)
        }
      }
      '=' => {
        if self.matches('=') {
          self.make_token(TokenKind::LOGIC_EQ)
        } else {
          self.make_token(TokenKind::EQUALS)
        }
      }
      '<' => {
        if self.matches('=') {
          self.make_token(TokenKind::LESS_THAN_EQ)
        } else {
          self.make_token(TokenKind::LESS_THAN)
        }
      }
      '>' => {
        if self.matches('=') {
          self.make_token(TokenKind::GREATER_THAN_EQ)
        } else {
          self.make_token(TokenKind::GREATER_THAN)
        }
      }
      '"' => self.make_string_token(),
      _ => self.make_error_token("Unexpected character."),
    }
  }

  /// Generates an identifier or reserved-word token with the current state
  /// of the scanner.
  pub(crate) fn make_identifier_token(&mut self) -> Token {
    while !self.is_at_end() {
      let c = self.get_current();

      if c.is_ascii_alphanumeric() || c == '_' {
        self.advance();
      } else {
        break;
      }
    }

    self.make_token(self.identifier_kind())
  }

  /// Distinguishes reserved words from plain identifiers with a switch
  /// tree keyed on the first (and occasionally second) character of the
  /// lexeme, rather than a generic map lookup.
  fn identifier_kind(&self) -> TokenKind {
    let length = self.current - self.token_start;

    match self.source[self.token_start] {
      'a' => self.check_keyword(1, "nd", TokenKind::AND_KW),
      'c' => self.check_keyword(1, "lass", TokenKind::CLASS_KW),
      'e' => self.check_keyword(1, "lse", TokenKind::ELSE_KW),
      'f' if length > 1 => match self.source[self.token_start + 1] {
        'a' => self.check_keyword(2, "lse", TokenKind::FALSE_LIT),
        'o' => self.check_keyword(2, "r", TokenKind::FOR_KW),
        'u' => self.check_keyword(2, "n", TokenKind::FUN_KW),
        _ => TokenKind::IDENTIFIER,
      },
      'i' => self.check_keyword(1, "f", TokenKind::IF_KW),
      'n' => self.check_keyword(1, "il", TokenKind::NIL_LIT),
      'o' => self.check_keyword(1, "r", TokenKind::OR_KW),
      'p' => self.check_keyword(1, "rint", TokenKind::PRINT_KW),
      'r' => self.check_keyword(1, "eturn", TokenKind::RETURN_KW),
      's' => self.check_keyword(1, "uper", TokenKind::SUPER_KW),
      't' if length > 1 => match self.source[self.token_start + 1] {
        'h' => self.check_keyword(2, "is", TokenKind::THIS_KW),
        'r' => self.check_keyword(2, "ue", TokenKind::TRUE_LIT),
        _ => TokenKind::IDENTIFIER,
      },
      'v' => self.check_keyword(1, "ar", TokenKind::VAR_KW),
      'w' => self.check_keyword(1, "hile", TokenKind::WHILE_KW),
      _ => TokenKind::IDENTIFIER,
    }
  }

  /// Checks that the current lexeme ends with `rest` starting at offset
  /// `start`, yielding the keyword kind on a full match.
  fn check_keyword(&self, start: usize, rest: &str, kind: TokenKind) -> TokenKind {
    let length = self.current - self.token_start;

    if length == start + rest.len() {
      let tail = &self.source[self.token_start + start..self.current];
      if tail.iter().zip(rest.chars()).all(|(a, b)| *a == b) {
        return kind;
      }
    }

    TokenKind::IDENTIFIER
  }
}

/// A token that represents a single unit of Lox code.
#[derive(Debug, Clone)]
pub struct Token {
  /// The token's line number.
  pub line_num: usize,
  /// The token's column offset within its line.
  pub column_start: usize,
  /// The token's type.
  pub kind: TokenKind,
  /// The slice of source text that produced this token. For `ERROR` tokens
  /// this is the diagnostic message instead, and for `EOF` it is empty.
  pub lexeme: String,
}

impl Token {
  /// A zero-valued token used to seed parser state before the first advance.
  pub fn empty() -> Token {
    Token {
      line_num: 0,
      column_start: 0,
      kind: TokenKind::EOF,
      lexeme: String::new(),
    }
  }
}

/// The types of tokens in a Lox program.
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum TokenKind {
  // Symbol-based tokens
  BANG,            // !
  COMMA,           // ,
  DASH,            // -
  DOT,             // .
  EQUALS,          // =
  GREATER_THAN,    // >
  GREATER_THAN_EQ, // >=
  LESS_THAN,       // <
  LESS_THAN_EQ,    // <=
  LOGIC_EQ,        // ==
  LOGIC_NOT_EQ,    // !=
  L_CURLY,         // {
  L_PAREN,         // (
  PLUS,            // +
  R_CURLY,         // }
  R_PAREN,         // )
  SEMICOLON,       // ;
  SLASH,           // /
  STAR,            // *

  // Value literals
  FALSE_LIT,
  IDENTIFIER,
  NIL_LIT,
  NUM_LIT,
  STR_LIT,
  TRUE_LIT,

  // Keywords
  AND_KW,
  CLASS_KW,
  ELSE_KW,
  FOR_KW,
  FUN_KW,
  IF_KW,
  OR_KW,
  PRINT_KW,
  RETURN_KW,
  SUPER_KW,
  THIS_KW,
  VAR_KW,
  WHILE_KW,

  // Other tokens
  EOF,
  ERROR,
}

use lox_core::tokens::TokenKind;

/// Represents the precedence of different expressions in ascending order.
/// For example, `Equality` has lower precedence than `Unary` because
/// `Equality` appears earlier in the enum, and `Unary` appears after.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Precedence {
  None,
  Assignment, // =
  Or,         // or
  And,        // and
  Equality,   // == !=
  Comparison, // < > <= >=
  Term,       // + -
  Factor,     // * /
  Unary,      // ! -
  Call,       // . ()
  Primary,
}

impl Precedence {
  /// Gets the Precedence variant associated with a given numeric value.
  /// Used to parse a binary operator's right operand one level tighter
  /// than the operator itself.
  pub fn get_by_val(val: u8) -> Precedence {
    match val {
      0 => Precedence::None,
      1 => Precedence::Assignment,
      2 => Precedence::Or,
      3 => Precedence::And,
      4 => Precedence::Equality,
      5 => Precedence::Comparison,
      6 => Precedence::Term,
      7 => Precedence::Factor,
      8 => Precedence::Unary,
      9 => Precedence::Call,
      _ => Precedence::Primary,
    }
  }
}

/// The compiling function that can be associated with a given token.
#[derive(Clone, Copy)]
pub enum ParseFn {
  CompileBinaryExpr,
  CompileGrouping,
  CompileNumeric,
  CompileUnary,
  None, // Do not call a compiling function
}

/// Wraps the parsing properties of a token so that they can be easily
/// accessed throughout the compiler.
pub struct ParserRule {
  pub prefix: ParseFn,
  pub infix: ParseFn,
  pub precedence: Precedence,
}

/// Gets the parse rule associated with a token kind. Tokens outside the
/// expression grammar carry no rules and `Precedence::None`.
pub fn get_rule(kind: &TokenKind) -> ParserRule {
  match kind {
    TokenKind::DASH => ParserRule {
      prefix: ParseFn::CompileUnary,
      infix: ParseFn::CompileBinaryExpr,
      precedence: Precedence::Term,
    },

    TokenKind::L_PAREN => ParserRule {
      prefix: ParseFn::CompileGrouping,
      infix: ParseFn::None,
      precedence: Precedence::None,
    },

    TokenKind::NUM_LIT => ParserRule {
      prefix: ParseFn::CompileNumeric,
      infix: ParseFn::None,
      precedence: Precedence::None,
    },

    TokenKind::PLUS => ParserRule {
      prefix: ParseFn::None,
      infix: ParseFn::CompileBinaryExpr,
      precedence: Precedence::Term,
    },

    TokenKind::SLASH => ParserRule {
      prefix: ParseFn::None,
      infix: ParseFn::CompileBinaryExpr,
      precedence: Precedence::Factor,
    },

    TokenKind::STAR => ParserRule {
      prefix: ParseFn::None,
      infix: ParseFn::CompileBinaryExpr,
      precedence: Precedence::Factor,
    },

    // The rest of the tokens do not have a parse rule
    _ => ParserRule {
      prefix: ParseFn::None,
      infix: ParseFn::None,
      precedence: Precedence::None,
    },
  }
}

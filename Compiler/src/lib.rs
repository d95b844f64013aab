use lexer::Lexer;
use lox_core::bytecode::OpCode;
use lox_core::chunk::Chunk;
use lox_core::errors::{ErrorKind, ErrorReport};
use lox_core::tokens::{Token, TokenKind};

// Submodules
mod precedence;

#[cfg(test)]
mod tests;

use precedence::{get_rule, ParseFn, Precedence};

/// Single-pass Pratt compiler for the bytecode pipeline. Parses an
/// expression straight off the scanner, emitting instructions as it goes,
/// and finishes the chunk with an implicit return.
pub struct Compiler {
  /// The lexer used in this compiler.
  lexer: Lexer,
  /// The previously consumed token.
  previous: Token,
  /// The current token (not yet consumed).
  current: Token,
  /// Whether the compiler found an error in the program.
  had_error: bool,
  /// Whether the compiler is in error-recovery mode or not.
  panic_mode: bool,
  /// The chunk being produced.
  chunk: Chunk,
  /// A list of reported errors generated while compiling.
  errors: Vec<ErrorReport>,
}

impl Compiler {
  /// Compiles a string of source text into a bytecode chunk.
  ///
  /// # Returns
  /// - `Ok(Chunk)`: The compiled chunk.
  /// - `Err(Vec<ErrorReport>)`: A list of compile-time errors.
  pub fn compile(src: &str) -> Result<Chunk, Vec<ErrorReport>> {
    let mut compiler = Compiler {
      lexer: Lexer::new(src),
      previous: Token::empty(),
      current: Token::empty(),
      had_error: false,
      panic_mode: false,
      chunk: Chunk::new(),
      errors: vec![],
    };

    compiler.advance();
    compiler.compile_expression();
    compiler.consume(&TokenKind::EOF, "expected end of expression");
    compiler.emit_op(OpCode::Return);

    if compiler.had_error {
      return Err(compiler.errors);
    }

    #[cfg(feature = "print_code")]
    disassembler::disassemble_chunk(&compiler.chunk, "code");

    Ok(compiler.chunk)
  }

  fn compile_expression(&mut self) {
    self.parse_precedence(Precedence::Assignment);
  }

  /// The Pratt loop: consume a token and run its prefix rule, then keep
  /// consuming infix rules while the current token binds at least as
  /// tightly as the given minimum precedence.
  fn parse_precedence(&mut self, precedence: Precedence) {
    self.advance();

    let prefix = get_rule(&self.previous.kind).prefix;
    if let ParseFn::None = prefix {
      self.error_at_previous("expected expression");
      return;
    }
    self.run_parse_fn(prefix);

    while (precedence as u8) <= (get_rule(&self.current.kind).precedence as u8) {
      self.advance();
      let infix = get_rule(&self.previous.kind).infix;
      self.run_parse_fn(infix);
    }
  }

  /// Dispatches one entry of the rule table.
  fn run_parse_fn(&mut self, func: ParseFn) {
    match func {
      ParseFn::CompileBinaryExpr => self.compile_binary_expr(),
      ParseFn::CompileGrouping => self.compile_grouping(),
      ParseFn::CompileNumeric => self.compile_numeric(),
      ParseFn::CompileUnary => self.compile_unary(),
      ParseFn::None => {}
    }
  }

  /// Compiles a numeric literal into a constant load.
  fn compile_numeric(&mut self) {
    match self.previous.lexeme.parse::<f64>() {
      Ok(value) => self.emit_constant(value),
      Err(_) => self.error_at_previous("invalid numeric literal"),
    }
  }

  /// Compiles a parenthesized expression. The open paren has been consumed.
  fn compile_grouping(&mut self) {
    self.compile_expression();
    self.consume(&TokenKind::R_PAREN, "expected ')' after expression");
  }

  /// Compiles a unary operator and its operand.
  fn compile_unary(&mut self) {
    let op = self.previous.kind.clone();

    // Compile the operand first; the instruction acts on the stack top.
    self.parse_precedence(Precedence::Unary);

    if let TokenKind::DASH = op {
      self.emit_op(OpCode::Negate);
    }
  }

  /// Compiles a binary operator's right operand, then the operator itself.
  /// The right operand is parsed one precedence level tighter, making the
  /// operators left-associative.
  fn compile_binary_expr(&mut self) {
    let op = self.previous.kind.clone();

    let rule = get_rule(&op);
    self.parse_precedence(Precedence::get_by_val(rule.precedence as u8 + 1));

    match op {
      TokenKind::PLUS => self.emit_op(OpCode::Add),
      TokenKind::DASH => self.emit_op(OpCode::Subtract),
      TokenKind::STAR => self.emit_op(OpCode::Multiply),
      TokenKind::SLASH => self.emit_op(OpCode::Divide),
      _ => {}
    }
  }

  /// Emits an instruction with no operands. Its line is the line of the
  /// previously consumed token.
  fn emit_op(&mut self, op: OpCode) {
    let line = self.previous.line_num;
    self.chunk.push_op_code(op, line);
  }

  /// Emits a raw operand byte on the previous token's line.
  fn emit_byte(&mut self, byte: u8) {
    let line = self.previous.line_num;
    self.chunk.push_byte(byte, line);
  }

  /// Adds a constant to the pool and emits the load for it: a one-byte
  /// `Constant` while the index fits, a three-byte little-endian
  /// `ConstantLong` once the zero-based index reaches 256.
  fn emit_constant(&mut self, value: f64) {
    let index = self.chunk.add_constant(value);

    if index < 256 {
      self.emit_op(OpCode::Constant);
      self.emit_byte(index as u8);
    } else {
      self.emit_op(OpCode::ConstantLong);
      let operand = (index as u32).to_le_bytes();
      self.emit_byte(operand[0]);
      self.emit_byte(operand[1]);
      self.emit_byte(operand[2]);
    }
  }

  /// Checks that the current token matches the token kind provided.
  fn check(&self, kind: &TokenKind) -> bool {
    self.current.kind == *kind
  }

  /// Advances the compiler to the next token, folding any error tokens the
  /// scanner produces into compile errors.
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

  /// Consumes the current token only if it is of a given kind. If the
  /// token does not match the kind, emits a compile error.
  fn consume(&mut self, kind: &TokenKind, message: &str) {
    if self.check(kind) {
      self.advance();
      return;
    }

    self.error_at_current(message);
  }

  /// Emits a compile error from the current token.
  fn error_at_current(&mut self, message: &str) {
    self.error_at_token(&self.current.clone(), message);
  }

  /// Emits a compile error from the previous token.
  fn error_at_previous(&mut self, message: &str) {
    self.error_at_token(&self.previous.clone(), message);
  }

  /// Emits a compile error from the given token. While the compiler is in
  /// panic mode, further reports are suppressed.
  fn error_at_token(&mut self, token: &Token, message: &str) {
    if self.panic_mode {
      return;
    }
    self.panic_mode = true;
    self.had_error = true;

    self.errors.push(ErrorReport {
      kind: ErrorKind::Syntax,
      line: token.line_num,
      column: token.column_start,
      message: String::from(message),
    });
  }
}

use crate::Parser;
use crate::MAX_CALL_ARGS;
use lox_core::ast::{
  AssignExpr, BinaryExpr, CallExpr, Expr, GetExpr, LitValue, LiteralExpr, LogicalExpr, SetExpr,
  SuperExpr, ThisExpr, UnaryExpr, VariableExpr,
};
use lox_core::tokens::TokenKind;

impl Parser {
  /// Parses a single expression.
  pub(crate) fn parse_expression(&mut self) -> Option<Expr> {
    self.parse_assignment()
  }

  /// Parses an assignment. The left-hand side is parsed as an ordinary
  /// expression first, then rewritten: a variable becomes an `Assign`
  /// target, a property access becomes a `Set` target, and anything else
  /// is an invalid assignment target.
  fn parse_assignment(&mut self) -> Option<Expr> {
    let expr = self.parse_logic_or()?;

    if self.matches(&TokenKind::EQUALS) {
      let equals = self.previous.clone();
      let value = self.parse_assignment()?;

      return match expr {
        Expr::Variable(var) => Some(Expr::Assign(Box::new(AssignExpr::new(var.name, value)))),
        Expr::Get(get) => Some(Expr::Set(Box::new(SetExpr {
          object: get.object,
          name: get.name,
          value,
        }))),
        _ => {
          self.error_at_token(&equals, "invalid assignment target");
          None
        }
      };
    }

    Some(expr)
  }

  fn parse_logic_or(&mut self) -> Option<Expr> {
    let mut expr = self.parse_logic_and()?;

    while self.matches(&TokenKind::OR_KW) {
      let op = self.previous.clone();
      let right = self.parse_logic_and()?;
      expr = Expr::Logical(Box::new(LogicalExpr { left: expr, op, right }));
    }

    Some(expr)
  }

  fn parse_logic_and(&mut self) -> Option<Expr> {
    let mut expr = self.parse_equality()?;

    while self.matches(&TokenKind::AND_KW) {
      let op = self.previous.clone();
      let right = self.parse_equality()?;
      expr = Expr::Logical(Box::new(LogicalExpr { left: expr, op, right }));
    }

    Some(expr)
  }

  fn parse_equality(&mut self) -> Option<Expr> {
    let mut expr = self.parse_comparison()?;

    while self.matches(&TokenKind::LOGIC_NOT_EQ) || self.matches(&TokenKind::LOGIC_EQ) {
      let op = self.previous.clone();
      let right = self.parse_comparison()?;
      expr = Expr::Binary(Box::new(BinaryExpr { left: expr, op, right }));
    }

    Some(expr)
  }

  fn parse_comparison(&mut self) -> Option<Expr> {
    let mut expr = self.parse_addition()?;

    while self.matches(&TokenKind::GREATER_THAN)
      || self.matches(&TokenKind::GREATER_THAN_EQ)
      || self.matches(&TokenKind::LESS_THAN)
      || self.matches(&TokenKind::LESS_THAN_EQ)
    {
      let op = self.previous.clone();
      let right = self.parse_addition()?;
      expr = Expr::Binary(Box::new(BinaryExpr { left: expr, op, right }));
    }

    Some(expr)
  }

  fn parse_addition(&mut self) -> Option<Expr> {
    let mut expr = self.parse_multiplication()?;

    while self.matches(&TokenKind::PLUS) || self.matches(&TokenKind::DASH) {
      let op = self.previous.clone();
      let right = self.parse_multiplication()?;
      expr = Expr::Binary(Box::new(BinaryExpr { left: expr, op, right }));
    }

    Some(expr)
  }

  fn parse_multiplication(&mut self) -> Option<Expr> {
    let mut expr = self.parse_unary()?;

    while self.matches(&TokenKind::STAR) || self.matches(&TokenKind::SLASH) {
      let op = self.previous.clone();
      let right = self.parse_unary()?;
      expr = Expr::Binary(Box::new(BinaryExpr { left: expr, op, right }));
    }

    Some(expr)
  }

  fn parse_unary(&mut self) -> Option<Expr> {
    if self.matches(&TokenKind::BANG) || self.matches(&TokenKind::DASH) {
      let op = self.previous.clone();
      let right = self.parse_unary()?;
      return Some(Expr::Unary(Box::new(UnaryExpr { op, right })));
    }

    self.parse_call()
  }

  /// Parses a primary expression followed by any number of call argument
  /// lists and property accesses.
  fn parse_call(&mut self) -> Option<Expr> {
    let mut expr = self.parse_primary()?;

    loop {
      if self.matches(&TokenKind::L_PAREN) {
        expr = self.finish_call(expr)?;
      } else if self.matches(&TokenKind::DOT) {
        self.consume(&TokenKind::IDENTIFIER, "expected property name after '.'")?;
        expr = Expr::Get(Box::new(GetExpr {
          object: expr,
          name: self.previous.clone(),
        }));
      } else {
        break;
      }
    }

    Some(expr)
  }

  /// Parses a call's argument list. The opening parenthesis has been
  /// consumed.
  fn finish_call(&mut self, callee: Expr) -> Option<Expr> {
    let mut args = vec![];

    if !self.check(&TokenKind::R_PAREN) {
      loop {
        if args.len() >= MAX_CALL_ARGS {
          self.error_at_current("cannot have more than 254 arguments");
          return None;
        }

        args.push(self.parse_expression()?);

        if !self.matches(&TokenKind::COMMA) {
          break;
        }
      }
    }

    self.consume(&TokenKind::R_PAREN, "expected ')' after arguments")?;
    let paren = self.previous.clone();

    Some(Expr::Call(Box::new(CallExpr { callee, paren, args })))
  }

  fn parse_primary(&mut self) -> Option<Expr> {
    let line = self.current.line_num;

    if self.matches(&TokenKind::FALSE_LIT) {
      return Some(Expr::Literal(LiteralExpr {
        value: LitValue::Bool(false),
        line,
      }));
    }

    if self.matches(&TokenKind::TRUE_LIT) {
      return Some(Expr::Literal(LiteralExpr {
        value: LitValue::Bool(true),
        line,
      }));
    }

    if self.matches(&TokenKind::NIL_LIT) {
      return Some(Expr::Literal(LiteralExpr {
        value: LitValue::Nil,
        line,
      }));
    }

    if self.matches(&TokenKind::NUM_LIT) {
      let value = match self.previous.lexeme.parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
          self.error_at_previous("invalid numeric literal");
          return None;
        }
      };

      return Some(Expr::Literal(LiteralExpr {
        value: LitValue::Num(value),
        line,
      }));
    }

    if self.matches(&TokenKind::STR_LIT) {
      // Strip the surrounding quotes off the lexeme.
      let lexeme = &self.previous.lexeme;
      let value = lexeme[1..lexeme.len() - 1].to_string();

      return Some(Expr::Literal(LiteralExpr {
        value: LitValue::Str(value),
        line,
      }));
    }

    if self.matches(&TokenKind::THIS_KW) {
      return Some(Expr::This(ThisExpr::new(self.previous.clone())));
    }

    if self.matches(&TokenKind::SUPER_KW) {
      let keyword = self.previous.clone();
      self.consume(&TokenKind::DOT, "expected '.' after 'super'")?;
      self.consume(&TokenKind::IDENTIFIER, "expected superclass method name")?;
      return Some(Expr::Super(SuperExpr::new(keyword, self.previous.clone())));
    }

    if self.matches(&TokenKind::IDENTIFIER) {
      return Some(Expr::Variable(VariableExpr::new(self.previous.clone())));
    }

    if self.matches(&TokenKind::L_PAREN) {
      let expr = self.parse_expression()?;
      self.consume(&TokenKind::R_PAREN, "expected ')' after expression")?;
      return Some(Expr::Grouping(Box::new(expr)));
    }

    if self.check(&TokenKind::EOF) {
      self.error_at_current("unexpected EOF");
    } else {
      self.error_at_current("invalid syntax");
    }

    None
  }
}

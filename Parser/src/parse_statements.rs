use crate::Parser;
use lox_core::ast::{Expr, IfStmt, LitValue, LiteralExpr, ReturnStmt, Stmt, WhileStmt};
use lox_core::tokens::TokenKind;

impl Parser {
  /// Parses a single statement.
  pub(crate) fn parse_statement(&mut self) -> Option<Stmt> {
    if self.matches(&TokenKind::FOR_KW) {
      self.parse_for_statement()
    } else if self.matches(&TokenKind::IF_KW) {
      self.parse_if_statement()
    } else if self.matches(&TokenKind::PRINT_KW) {
      self.parse_print_statement()
    } else if self.matches(&TokenKind::RETURN_KW) {
      self.parse_return_statement()
    } else if self.matches(&TokenKind::WHILE_KW) {
      self.parse_while_statement()
    } else if self.matches(&TokenKind::L_CURLY) {
      Some(Stmt::Block(self.parse_block_statements()?))
    } else {
      self.parse_expression_statement()
    }
  }

  /// Parses the declarations of a block up to and including the closing
  /// brace. The opening brace has been consumed.
  pub(crate) fn parse_block_statements(&mut self) -> Option<Vec<Stmt>> {
    let mut stmts = vec![];

    while !self.check(&TokenKind::R_CURLY) && !self.check(&TokenKind::EOF) {
      match self.parse_declaration() {
        Some(stmt) => stmts.push(stmt),
        // Already reported and synchronized; scan on for the brace.
        None => {}
      }
    }

    self.consume(&TokenKind::R_CURLY, "expected '}' at the end of the block")?;

    Some(stmts)
  }

  /// Parses a `for` statement by rewriting it into an equivalent `while`
  /// loop: `for (init; cond; inc) body` becomes
  /// `{ init; while (cond) { body; inc; } }`, with a missing condition
  /// treated as `true`.
  fn parse_for_statement(&mut self) -> Option<Stmt> {
    self.consume(&TokenKind::L_PAREN, "expected '(' after 'for'")?;

    let initializer = if self.matches(&TokenKind::SEMICOLON) {
      None
    } else if self.matches(&TokenKind::VAR_KW) {
      Some(self.parse_var_declaration()?)
    } else {
      Some(self.parse_expression_statement()?)
    };

    let condition = if self.check(&TokenKind::SEMICOLON) {
      None
    } else {
      Some(self.parse_expression()?)
    };
    self.consume(&TokenKind::SEMICOLON, "expected ';' after loop condition")?;

    let increment = if self.check(&TokenKind::R_PAREN) {
      None
    } else {
      Some(self.parse_expression()?)
    };
    self.consume(&TokenKind::R_PAREN, "expected ')' after for clauses")?;

    let body = self.parse_statement()?;

    let body = match increment {
      Some(inc) => Stmt::Block(vec![body, Stmt::Expression(inc)]),
      None => body,
    };

    let cond = match condition {
      Some(cond) => cond,
      None => Expr::Literal(LiteralExpr {
        value: LitValue::Bool(true),
        line: self.previous.line_num,
      }),
    };

    let while_loop = Stmt::While(Box::new(WhileStmt { cond, body }));

    Some(match initializer {
      Some(init) => Stmt::Block(vec![init, while_loop]),
      None => while_loop,
    })
  }

  fn parse_if_statement(&mut self) -> Option<Stmt> {
    self.consume(&TokenKind::L_PAREN, "expected '(' after 'if'")?;
    let cond = self.parse_expression()?;
    self.consume(&TokenKind::R_PAREN, "expected ')' after if condition")?;

    let then_branch = self.parse_statement()?;
    let else_branch = if self.matches(&TokenKind::ELSE_KW) {
      Some(self.parse_statement()?)
    } else {
      None
    };

    Some(Stmt::If(Box::new(IfStmt {
      cond,
      then_branch,
      else_branch,
    })))
  }

  fn parse_print_statement(&mut self) -> Option<Stmt> {
    let expr = self.parse_expression()?;
    self.consume(&TokenKind::SEMICOLON, "expected ';' at the end of statement")?;
    Some(Stmt::Print(expr))
  }

  fn parse_return_statement(&mut self) -> Option<Stmt> {
    let keyword = self.previous.clone();

    let value = if self.check(&TokenKind::SEMICOLON) {
      None
    } else {
      Some(self.parse_expression()?)
    };

    self.consume(&TokenKind::SEMICOLON, "expected ';' at the end of statement")?;

    Some(Stmt::Return(ReturnStmt { keyword, value }))
  }

  fn parse_while_statement(&mut self) -> Option<Stmt> {
    self.consume(&TokenKind::L_PAREN, "expected '(' after 'while'")?;
    let cond = self.parse_expression()?;
    self.consume(&TokenKind::R_PAREN, "expected ')' after while condition")?;
    let body = self.parse_statement()?;

    Some(Stmt::While(Box::new(WhileStmt { cond, body })))
  }

  fn parse_expression_statement(&mut self) -> Option<Stmt> {
    let expr = self.parse_expression()?;
    self.consume(&TokenKind::SEMICOLON, "expected ';' at the end of statement")?;
    Some(Stmt::Expression(expr))
  }
}

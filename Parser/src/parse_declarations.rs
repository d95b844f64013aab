use std::rc::Rc;

use crate::Parser;
use crate::MAX_CALL_ARGS;
use lox_core::ast::{ClassDecl, FunctionDecl, Stmt, VarDecl, VariableExpr};
use lox_core::tokens::TokenKind;

impl Parser {
  /// Parses a single declaration or statement. On failure the error has
  /// already been reported; the parser synchronizes to the next statement
  /// boundary and `None` is returned.
  pub(crate) fn parse_declaration(&mut self) -> Option<Stmt> {
    let decl = if self.matches(&TokenKind::CLASS_KW) {
      self.parse_class_declaration()
    } else if self.matches(&TokenKind::FUN_KW) {
      self.parse_func_declaration()
    } else if self.matches(&TokenKind::VAR_KW) {
      self.parse_var_declaration()
    } else {
      self.parse_statement()
    };

    if decl.is_none() {
      self.synchronize();
    }

    decl
  }

  /// Parses a variable declaration. The `var` keyword has been consumed.
  pub(crate) fn parse_var_declaration(&mut self) -> Option<Stmt> {
    self.consume(&TokenKind::IDENTIFIER, "expected variable name after 'var'")?;
    let name = self.previous.clone();

    let initializer = if self.matches(&TokenKind::EQUALS) {
      Some(self.parse_expression()?)
    } else {
      None
    };

    self.consume(&TokenKind::SEMICOLON, "expected ';' at the end of statement")?;

    Some(Stmt::Var(VarDecl { name, initializer }))
  }

  /// Parses a function declaration. The `fun` keyword has been consumed.
  fn parse_func_declaration(&mut self) -> Option<Stmt> {
    self.consume(&TokenKind::IDENTIFIER, "expected function name after 'fun'")?;
    Some(Stmt::Function(Rc::new(self.parse_function()?)))
  }

  /// Parses a function's signature and body. The name identifier has been
  /// consumed and is the previous token. Also used for class methods,
  /// which have no leading `fun` keyword.
  fn parse_function(&mut self) -> Option<FunctionDecl> {
    let name = self.previous.clone();

    self.consume(&TokenKind::L_PAREN, "expected '(' after function name")?;

    let mut params = vec![];
    if !self.check(&TokenKind::R_PAREN) {
      loop {
        if params.len() >= MAX_CALL_ARGS {
          self.error_at_current("cannot have more than 254 parameters");
          return None;
        }

        self.consume(&TokenKind::IDENTIFIER, "expected parameter name")?;
        params.push(self.previous.clone());

        if !self.matches(&TokenKind::COMMA) {
          break;
        }
      }
    }

    self.consume(&TokenKind::R_PAREN, "expected ')' after parameters")?;
    self.consume(&TokenKind::L_CURLY, "expected '{' before function body")?;
    let body = self.parse_block_statements()?;

    Some(FunctionDecl { name, params, body })
  }

  /// Parses a class declaration, with an optional superclass clause and
  /// zero or more methods. The `class` keyword has been consumed.
  fn parse_class_declaration(&mut self) -> Option<Stmt> {
    self.consume(&TokenKind::IDENTIFIER, "expected class name after 'class'")?;
    let name = self.previous.clone();

    let superclass = if self.matches(&TokenKind::LESS_THAN) {
      self.consume(&TokenKind::IDENTIFIER, "expected superclass name after '<'")?;
      Some(VariableExpr::new(self.previous.clone()))
    } else {
      None
    };

    self.consume(&TokenKind::L_CURLY, "expected '{' before class body")?;

    let mut methods = vec![];
    while !self.check(&TokenKind::R_CURLY) && !self.check(&TokenKind::EOF) {
      self.consume(&TokenKind::IDENTIFIER, "expected method name")?;
      methods.push(Rc::new(self.parse_function()?));
    }

    self.consume(&TokenKind::R_CURLY, "expected '}' after class body")?;

    Some(Stmt::Class(ClassDecl {
      name,
      superclass,
      methods,
    }))
  }
}

use std::io::Write;
use std::rc::Rc;

use lox_core::ast::{BinaryExpr, CallExpr, Expr, GetExpr, LitValue, ResolvedDistance, SetExpr, SuperExpr};
use lox_core::errors::RuntimeError;
use lox_core::tokens::{Token, TokenKind};
use objects::environment::Environment;
use objects::Value;

use crate::Interpreter;

impl<W: Write> Interpreter<W> {
  /// Evaluates a single expression to a value.
  pub(crate) fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
    match expr {
      Expr::Assign(assign) => {
        let value = self.evaluate(&assign.value)?;

        let assigned = match assign.dist.get() {
          Some(distance) => {
            Environment::assign_at(&self.env, distance, &assign.name.lexeme, value.clone())
          }
          None => self
            .globals
            .borrow_mut()
            .assign(&assign.name.lexeme, value.clone()),
        };

        if assigned {
          Ok(value)
        } else {
          Err(RuntimeError::new(
            format!("undefined variable '{}'", assign.name.lexeme),
            assign.name.line_num,
          ))
        }
      }
      Expr::Binary(binary) => self.evaluate_binary(binary),
      Expr::Call(call) => self.evaluate_call(call),
      Expr::Get(get) => self.evaluate_get(get),
      Expr::Grouping(inner) => self.evaluate(inner),
      Expr::Literal(lit) => Ok(match &lit.value {
        LitValue::Bool(b) => Value::Bool(*b),
        LitValue::Nil => Value::Nil,
        LitValue::Num(n) => Value::Number(*n),
        LitValue::Str(s) => Value::String(s.clone()),
      }),
      Expr::Logical(logical) => {
        let left = self.evaluate(&logical.left)?;

        let short_circuits = match logical.op.kind {
          TokenKind::OR_KW => !left.is_falsey(),
          _ => left.is_falsey(),
        };

        if short_circuits {
          Ok(left)
        } else {
          self.evaluate(&logical.right)
        }
      }
      Expr::Set(set) => self.evaluate_set(set),
      Expr::Super(sup) => self.evaluate_super(sup),
      Expr::This(this) => self.lookup_variable(&this.keyword, &this.dist),
      Expr::Unary(unary) => {
        let right = self.evaluate(&unary.right)?;

        match unary.op.kind {
          TokenKind::BANG => Ok(Value::Bool(right.is_falsey())),
          _ => match right {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(RuntimeError::new(
              "operand must be a number",
              unary.op.line_num,
            )),
          },
        }
      }
      Expr::Variable(var) => self.lookup_variable(&var.name, &var.dist),
    }
  }

  /// Reads a variable (or `this`) reference, using the resolver's distance
  /// annotation for locals and a by-name global lookup otherwise.
  pub(crate) fn lookup_variable(
    &mut self,
    name: &Token,
    dist: &ResolvedDistance,
  ) -> Result<Value, RuntimeError> {
    let value = match dist.get() {
      Some(distance) => Environment::get_at(&self.env, distance, &name.lexeme),
      None => self.globals.borrow().get(&name.lexeme),
    };

    match value {
      Some(value) => Ok(value),
      None => Err(RuntimeError::new(
        format!("undefined variable '{}'", name.lexeme),
        name.line_num,
      )),
    }
  }

  fn evaluate_binary(&mut self, binary: &BinaryExpr) -> Result<Value, RuntimeError> {
    let left = self.evaluate(&binary.left)?;
    let right = self.evaluate(&binary.right)?;
    let line = binary.op.line_num;

    match binary.op.kind {
      TokenKind::PLUS => match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
        _ => Err(RuntimeError::new(
          "operands must be two numbers or two strings",
          line,
        )),
      },
      TokenKind::DASH => {
        let (a, b) = number_operands(left, right, line)?;
        Ok(Value::Number(a - b))
      }
      TokenKind::STAR => {
        let (a, b) = number_operands(left, right, line)?;
        Ok(Value::Number(a * b))
      }
      TokenKind::SLASH => {
        let (a, b) = number_operands(left, right, line)?;
        Ok(Value::Number(a / b))
      }
      TokenKind::GREATER_THAN => {
        let (a, b) = number_operands(left, right, line)?;
        Ok(Value::Bool(a > b))
      }
      TokenKind::GREATER_THAN_EQ => {
        let (a, b) = number_operands(left, right, line)?;
        Ok(Value::Bool(a >= b))
      }
      TokenKind::LESS_THAN => {
        let (a, b) = number_operands(left, right, line)?;
        Ok(Value::Bool(a < b))
      }
      TokenKind::LESS_THAN_EQ => {
        let (a, b) = number_operands(left, right, line)?;
        Ok(Value::Bool(a <= b))
      }
      TokenKind::LOGIC_EQ => Ok(Value::Bool(left.equals(&right))),
      TokenKind::LOGIC_NOT_EQ => Ok(Value::Bool(!left.equals(&right))),
      _ => Err(RuntimeError::new("invalid binary operator", line)),
    }
  }

  fn evaluate_call(&mut self, call: &CallExpr) -> Result<Value, RuntimeError> {
    let callee = self.evaluate(&call.callee)?;

    let mut args = Vec::with_capacity(call.args.len());
    for arg in &call.args {
      args.push(self.evaluate(arg)?);
    }

    self.call_value(callee, args, call.paren.line_num)
  }

  /// Reads a property off an instance: fields first, then the class's
  /// method table up the superclass chain. Methods are bound to the
  /// instance as they are read.
  fn evaluate_get(&mut self, get: &GetExpr) -> Result<Value, RuntimeError> {
    let object = self.evaluate(&get.object)?;

    match object {
      Value::Instance(instance) => {
        if let Some(value) = instance.borrow().fields.get(&get.name.lexeme) {
          return Ok(value.clone());
        }

        let method = instance.borrow().class.find_method(&get.name.lexeme);
        match method {
          Some(method) => Ok(Value::Function(Rc::new(
            method.bind(Value::Instance(instance.clone())),
          ))),
          None => Err(RuntimeError::new(
            format!("undefined property '{}'", get.name.lexeme),
            get.name.line_num,
          )),
        }
      }
      _ => Err(RuntimeError::new(
        "only instances have properties",
        get.name.line_num,
      )),
    }
  }

  /// Writes a field on an instance, inserting or overwriting it. Only
  /// instances accept field writes.
  fn evaluate_set(&mut self, set: &SetExpr) -> Result<Value, RuntimeError> {
    let object = self.evaluate(&set.object)?;

    match object {
      Value::Instance(instance) => {
        let value = self.evaluate(&set.value)?;
        instance
          .borrow_mut()
          .fields
          .insert(set.name.lexeme.clone(), value.clone());
        Ok(value)
      }
      _ => Err(RuntimeError::new(
        "only instances have fields",
        set.name.line_num,
      )),
    }
  }

  /// Looks a method up starting at the superclass and binds it to the
  /// current instance.
  fn evaluate_super(&mut self, sup: &SuperExpr) -> Result<Value, RuntimeError> {
    let distance = match sup.dist.get() {
      Some(distance) => distance,
      None => {
        return Err(RuntimeError::new(
          "undefined variable 'super'",
          sup.keyword.line_num,
        ))
      }
    };

    let superclass = Environment::get_at(&self.env, distance, "super");
    // The implicit `this` frame sits one hop inside the `super` frame.
    let object = Environment::get_at(&self.env, distance - 1, "this");

    match (superclass, object) {
      (Some(Value::Class(superclass)), Some(instance)) => {
        match superclass.find_method(&sup.method.lexeme) {
          Some(method) => Ok(Value::Function(Rc::new(method.bind(instance)))),
          None => Err(RuntimeError::new(
            format!("undefined property '{}'", sup.method.lexeme),
            sup.method.line_num,
          )),
        }
      }
      _ => Err(RuntimeError::new(
        "undefined variable 'super'",
        sup.keyword.line_num,
      )),
    }
  }
}

/// Unwraps two numeric operands or reports the operand type error.
fn number_operands(left: Value, right: Value, line: usize) -> Result<(f64, f64), RuntimeError> {
  match (left, right) {
    (Value::Number(a), Value::Number(b)) => Ok((a, b)),
    _ => Err(RuntimeError::new("operands must be numbers", line)),
  }
}

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use hashbrown::HashMap;

use lox_core::ast::{ClassDecl, Stmt};
use lox_core::errors::RuntimeError;
use objects::class_obj::{ClassObj, InstanceObj};
use objects::environment::{EnvRef, Environment};
use objects::func_obj::FuncObj;
use objects::Value;

use crate::{ExecResult, Interpreter};

/// Evaluates an expression inside a statement executor, converting a
/// runtime failure into an early `ExecResult::Error` return.
macro_rules! eval_or_bail {
  ($self:ident, $expr:expr) => {{
    match $self.evaluate($expr) {
      Ok(value) => value,
      Err(error) => return ExecResult::Error(error),
    }
  }};
}

impl<W: Write> Interpreter<W> {
  /// Executes a single statement.
  pub(crate) fn execute(&mut self, stmt: &Stmt) -> ExecResult {
    match stmt {
      Stmt::Block(stmts) => {
        let env = Environment::with_enclosing(self.env.clone());
        self.execute_block(stmts, env)
      }
      Stmt::Class(decl) => self.execute_class_decl(decl),
      Stmt::Expression(expr) => {
        eval_or_bail!(self, expr);
        ExecResult::Ok
      }
      Stmt::Function(decl) => {
        let func = FuncObj {
          declaration: decl.clone(),
          closure: self.env.clone(),
          is_initializer: false,
        };
        self
          .env
          .borrow_mut()
          .define(&decl.name.lexeme, Value::from(func));
        ExecResult::Ok
      }
      Stmt::If(stmt) => {
        let cond = eval_or_bail!(self, &stmt.cond);

        if !cond.is_falsey() {
          self.execute(&stmt.then_branch)
        } else if let Some(alt) = &stmt.else_branch {
          self.execute(alt)
        } else {
          ExecResult::Ok
        }
      }
      Stmt::Print(expr) => {
        let value = eval_or_bail!(self, expr);
        let _ = writeln!(self.out, "{}", value);
        ExecResult::Ok
      }
      Stmt::Return(ret) => {
        let value = match &ret.value {
          Some(expr) => eval_or_bail!(self, expr),
          None => Value::Nil,
        };
        ExecResult::Return(value)
      }
      Stmt::Var(decl) => {
        let value = match &decl.initializer {
          Some(init) => eval_or_bail!(self, init),
          None => Value::Nil,
        };
        self.env.borrow_mut().define(&decl.name.lexeme, value);
        ExecResult::Ok
      }
      Stmt::While(stmt) => {
        loop {
          let cond = eval_or_bail!(self, &stmt.cond);
          if cond.is_falsey() {
            break;
          }

          match self.execute(&stmt.body) {
            ExecResult::Ok => {}
            // A return or error unwinds straight through the loop.
            other => return other,
          }
        }

        ExecResult::Ok
      }
    }
  }

  /// Executes a list of statements inside the given environment, restoring
  /// the previous environment afterwards. A `return` or error stops the
  /// list early and is handed back to the caller.
  pub(crate) fn execute_block(&mut self, stmts: &[Stmt], env: EnvRef) -> ExecResult {
    let previous = std::mem::replace(&mut self.env, env);

    let mut result = ExecResult::Ok;
    for stmt in stmts {
      match self.execute(stmt) {
        ExecResult::Ok => {}
        other => {
          result = other;
          break;
        }
      }
    }

    self.env = previous;
    result
  }

  /// Executes a class declaration: evaluates the superclass clause, builds
  /// the method table (chaining each method's closure through a `super`
  /// frame when there is a superclass), and binds the class object to its
  /// name in the current environment.
  fn execute_class_decl(&mut self, decl: &ClassDecl) -> ExecResult {
    let superclass = match &decl.superclass {
      Some(var) => match self.lookup_variable(&var.name, &var.dist) {
        Ok(Value::Class(class)) => Some(class),
        Ok(_) => {
          return ExecResult::Error(RuntimeError::new(
            "superclass must be a class",
            var.name.line_num,
          ))
        }
        Err(error) => return ExecResult::Error(error),
      },
      None => None,
    };

    let method_env = match &superclass {
      Some(superclass) => {
        let env = Environment::with_enclosing(self.env.clone());
        env
          .borrow_mut()
          .define("super", Value::Class(superclass.clone()));
        env
      }
      None => self.env.clone(),
    };

    let mut methods = HashMap::new();
    for method in &decl.methods {
      let func = FuncObj {
        declaration: method.clone(),
        closure: method_env.clone(),
        is_initializer: method.name.lexeme == "init",
      };
      methods.insert(method.name.lexeme.clone(), Rc::new(func));
    }

    let class = ClassObj {
      name: decl.name.lexeme.clone(),
      superclass,
      methods,
    };

    self
      .env
      .borrow_mut()
      .define(&decl.name.lexeme, Value::Class(Rc::new(class)));

    ExecResult::Ok
  }

  /// Calls a user-declared function: binds the arguments to the parameters
  /// in a fresh frame chained from the function's closure, runs the body,
  /// and catches a `return`. Initializers always yield `this`.
  pub(crate) fn call_function(
    &mut self,
    func: &Rc<FuncObj>,
    args: Vec<Value>,
    line: usize,
  ) -> Result<Value, RuntimeError> {
    let env = Environment::with_enclosing(func.closure.clone());
    for (param, arg) in func.declaration.params.iter().zip(args) {
      env.borrow_mut().define(&param.lexeme, arg);
    }

    let returned = match self.execute_block(&func.declaration.body, env) {
      ExecResult::Ok => Value::Nil,
      ExecResult::Return(value) => value,
      ExecResult::Error(error) => return Err(error),
    };

    if func.is_initializer {
      return match Environment::get_at(&func.closure, 0, "this") {
        Some(this) => Ok(this),
        None => Err(RuntimeError::new("undefined variable 'this'", line)),
      };
    }

    Ok(returned)
  }

  /// Calls any callee value with the given evaluated arguments, checking
  /// arity first and dispatching on the callee's variant.
  pub(crate) fn call_value(
    &mut self,
    callee: Value,
    args: Vec<Value>,
    line: usize,
  ) -> Result<Value, RuntimeError> {
    match callee {
      Value::Function(func) => {
        self.verify_arity(func.arity(), args.len(), line)?;
        self.call_function(&func, args, line)
      }
      Value::Native(native) => {
        self.verify_arity(native.arity, args.len(), line)?;
        (native.body)(&args).map_err(|message| RuntimeError::new(message, line))
      }
      Value::Class(class) => {
        self.verify_arity(class.arity(), args.len(), line)?;

        let instance = Rc::new(RefCell::new(InstanceObj::new(class.clone())));

        if let Some(init) = class.find_method("init") {
          let bound = Rc::new(init.bind(Value::Instance(instance.clone())));
          self.call_function(&bound, args, line)?;
        }

        Ok(Value::Instance(instance))
      }
      _ => Err(RuntimeError::new("can only call functions or classes", line)),
    }
  }

  /// Checks that a call passes exactly the number of arguments the callee
  /// expects.
  fn verify_arity(&self, expected: usize, got: usize, line: usize) -> Result<(), RuntimeError> {
    if expected != got {
      let message = format!("expected {} arguments, got {}", expected, got);
      return Err(RuntimeError::new(message, line));
    }

    Ok(())
  }
}

use std::rc::Rc;

use lox_core::ast::FunctionDecl;

use crate::environment::{EnvRef, Environment};
use crate::Value;

/// Represents a user-declared Lox function together with the environment
/// chain captured at its point of definition.
#[derive(Clone)]
pub struct FuncObj {
  pub declaration: Rc<FunctionDecl>,
  pub closure: EnvRef,
  /// Whether this function is a class's `init` method. Initializers always
  /// yield the constructed instance, regardless of `return`.
  pub is_initializer: bool,
}

impl FuncObj {
  /// The number of parameters this function declares.
  pub fn arity(&self) -> usize {
    self.declaration.params.len()
  }

  pub fn name(&self) -> &str {
    &self.declaration.name.lexeme
  }

  /// Produces a bound copy of this function whose closure is extended with
  /// a frame mapping `this` to the given instance.
  pub fn bind(&self, instance: Value) -> FuncObj {
    let env = Environment::with_enclosing(self.closure.clone());
    env.borrow_mut().define("this", instance);

    FuncObj {
      declaration: self.declaration.clone(),
      closure: env,
      is_initializer: self.is_initializer,
    }
  }
}

/// The signature of a native function's body.
pub type NativeFn = fn(&[Value]) -> Result<Value, String>;

/// Represents a native (Rust-implemented) function exposed to Lox programs.
pub struct NativeFuncObj {
  pub name: String,
  pub arity: usize,
  pub body: NativeFn,
}

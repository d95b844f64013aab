use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use crate::Value;

/// A shared handle to an environment frame. Closures keep the chain in
/// effect at their definition alive through these handles.
pub type EnvRef = Rc<RefCell<Environment>>;

/// A single frame in the chain of lexical scopes: a mapping from names to
/// values, plus the enclosing frame.
pub struct Environment {
  values: HashMap<String, Value>,
  enclosing: Option<EnvRef>,
}

impl Environment {
  /// Creates a new, unenclosed frame.
  pub fn new() -> EnvRef {
    Rc::new(RefCell::new(Environment {
      values: HashMap::new(),
      enclosing: None,
    }))
  }

  /// Creates a new frame chained onto the given enclosing frame.
  pub fn with_enclosing(enclosing: EnvRef) -> EnvRef {
    Rc::new(RefCell::new(Environment {
      values: HashMap::new(),
      enclosing: Some(enclosing),
    }))
  }

  /// Binds a name in this frame, shadowing any outer binding of the same
  /// name. Never fails; rebinding in the same frame overwrites.
  pub fn define(&mut self, name: &str, value: Value) {
    self.values.insert(String::from(name), value);
  }

  /// Reads a name, searching outward through the enclosing frames.
  pub fn get(&self, name: &str) -> Option<Value> {
    match self.values.get(name) {
      Some(value) => Some(value.clone()),
      None => match &self.enclosing {
        Some(enclosing) => enclosing.borrow().get(name),
        None => None,
      },
    }
  }

  /// Reassigns an existing binding, searching outward through the
  /// enclosing frames. Returns false if no frame binds the name.
  pub fn assign(&mut self, name: &str, value: Value) -> bool {
    if let Some(slot) = self.values.get_mut(name) {
      *slot = value;
      return true;
    }

    match &self.enclosing {
      Some(enclosing) => enclosing.borrow_mut().assign(name, value),
      None => false,
    }
  }

  /// Climbs exactly `distance` frames outward and reads the name there,
  /// without searching. Used for references the resolver annotated.
  pub fn get_at(env: &EnvRef, distance: usize, name: &str) -> Option<Value> {
    Environment::ancestor(env, distance)
      .borrow()
      .values
      .get(name)
      .cloned()
  }

  /// Climbs exactly `distance` frames outward and reassigns the name
  /// there. Returns false if that frame does not bind the name.
  pub fn assign_at(env: &EnvRef, distance: usize, name: &str, value: Value) -> bool {
    match Environment::ancestor(env, distance)
      .borrow_mut()
      .values
      .get_mut(name)
    {
      Some(slot) => {
        *slot = value;
        true
      }
      None => false,
    }
  }

  fn ancestor(env: &EnvRef, distance: usize) -> EnvRef {
    let mut current = env.clone();

    for _ in 0..distance {
      let enclosing = current.borrow().enclosing.clone();
      current = match enclosing {
        Some(enclosing) => enclosing,
        // The resolver only hands out distances within the chain.
        None => unreachable!("resolved distance points past the global frame"),
      };
    }

    current
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn define_then_get_yields_the_value() {
    let env = Environment::new();
    env.borrow_mut().define("x", Value::Number(4.0));

    match env.borrow().get("x") {
      Some(Value::Number(n)) => assert_eq!(n, 4.0),
      _ => panic!("expected to read back the defined number"),
    };
  }

  #[test]
  fn get_walks_outward_and_define_shadows() {
    let outer = Environment::new();
    outer.borrow_mut().define("x", Value::Number(1.0));
    let inner = Environment::with_enclosing(outer.clone());

    match inner.borrow().get("x") {
      Some(Value::Number(n)) => assert_eq!(n, 1.0),
      _ => panic!("inner frame should see the outer binding"),
    }

    inner.borrow_mut().define("x", Value::Number(2.0));
    match inner.borrow().get("x") {
      Some(Value::Number(n)) => assert_eq!(n, 2.0),
      _ => panic!("inner frame should shadow the outer binding"),
    }
    match outer.borrow().get("x") {
      Some(Value::Number(n)) => assert_eq!(n, 1.0),
      _ => panic!("the outer binding should be untouched"),
    };
  }

  #[test]
  fn assign_updates_the_binding_frame() {
    let outer = Environment::new();
    outer.borrow_mut().define("x", Value::Number(1.0));
    let inner = Environment::with_enclosing(outer.clone());

    assert!(inner.borrow_mut().assign("x", Value::Number(9.0)));
    match outer.borrow().get("x") {
      Some(Value::Number(n)) => assert_eq!(n, 9.0),
      _ => panic!("assignment should write through to the outer frame"),
    };
  }

  #[test]
  fn assign_fails_when_the_name_is_unbound() {
    let env = Environment::new();
    assert!(!env.borrow_mut().assign("missing", Value::Nil));
  }

  #[test]
  fn get_at_climbs_an_exact_number_of_frames() {
    let global = Environment::new();
    global.borrow_mut().define("x", Value::Number(1.0));
    let middle = Environment::with_enclosing(global);
    middle.borrow_mut().define("x", Value::Number(2.0));
    let inner = Environment::with_enclosing(middle);

    match Environment::get_at(&inner, 1, "x") {
      Some(Value::Number(n)) => assert_eq!(n, 2.0),
      _ => panic!("distance 1 should land on the middle frame"),
    }
    match Environment::get_at(&inner, 2, "x") {
      Some(Value::Number(n)) => assert_eq!(n, 1.0),
      _ => panic!("distance 2 should land on the global frame"),
    }
  }
}

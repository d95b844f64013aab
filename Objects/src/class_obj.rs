use std::rc::Rc;

use hashbrown::HashMap;

use crate::func_obj::FuncObj;
use crate::Value;

/// Represents a Lox class: a name, an optional superclass, and a table of
/// methods. The method table is fixed once the class declaration executes.
pub struct ClassObj {
  pub name: String,
  pub superclass: Option<Rc<ClassObj>>,
  pub methods: HashMap<String, Rc<FuncObj>>,
}

impl ClassObj {
  /// Looks up a method by name, searching this class first and then up the
  /// superclass chain.
  pub fn find_method(&self, name: &str) -> Option<Rc<FuncObj>> {
    if let Some(method) = self.methods.get(name) {
      return Some(method.clone());
    }

    match &self.superclass {
      Some(superclass) => superclass.find_method(name),
      None => None,
    }
  }

  /// The number of arguments a call to this class takes: the arity of its
  /// `init` method, or zero when there is none anywhere in the chain.
  pub fn arity(&self) -> usize {
    match self.find_method("init") {
      Some(init) => init.arity(),
      None => 0,
    }
  }
}

/// Represents an instance of a Lox class with its own mutable field map.
pub struct InstanceObj {
  pub class: Rc<ClassObj>,
  pub fields: HashMap<String, Value>,
}

impl InstanceObj {
  pub fn new(class: Rc<ClassObj>) -> InstanceObj {
    InstanceObj {
      class,
      fields: HashMap::new(),
    }
  }
}

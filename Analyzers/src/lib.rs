use std::rc::Rc;

use hashbrown::HashMap;
use lox_core::ast::{ClassDecl, Expr, FunctionDecl, ResolvedDistance, Stmt, VariableExpr};
use lox_core::errors::{ErrorKind, ErrorReport};
use lox_core::tokens::Token;

#[cfg(test)]
mod tests;

/// The kind of function body the resolver is currently inside of.
#[derive(Clone, Copy, PartialEq, Eq)]
enum FunctionKind {
  None,
  Function,
  Initializer,
  Method,
}

/// The kind of class body the resolver is currently inside of.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ClassKind {
  None,
  Class,
  Subclass,
}

/// Static analysis pass over a parsed program. Walks the AST before
/// execution, reporting scope-usage errors and annotating every variable,
/// `this`, and `super` reference with the number of environment frames
/// between the reference and its binding. The interpreter must not run a
/// program this pass rejected.
pub struct Resolver {
  /// The lexical scopes currently in effect, innermost last. Each scope
  /// maps a declared name to whether its initializer has finished.
  scopes: Vec<HashMap<String, bool>>,
  current_function: FunctionKind,
  current_class: ClassKind,
  errors: Vec<ErrorReport>,
}

impl Resolver {
  /// Resolves a whole program.
  ///
  /// # Returns
  /// - `Ok(())`: The program passed the analysis and was annotated.
  /// - `Err(Vec<ErrorReport>)`: A list of resolution errors.
  pub fn resolve(program: &[Stmt]) -> Result<(), Vec<ErrorReport>> {
    let mut resolver = Resolver {
      scopes: vec![],
      current_function: FunctionKind::None,
      current_class: ClassKind::None,
      errors: vec![],
    };

    for stmt in program {
      resolver.resolve_stmt(stmt);
    }

    if resolver.errors.is_empty() {
      Ok(())
    } else {
      Err(resolver.errors)
    }
  }

  fn resolve_stmt(&mut self, stmt: &Stmt) {
    match stmt {
      Stmt::Block(stmts) => {
        self.begin_scope();
        for stmt in stmts {
          self.resolve_stmt(stmt);
        }
        self.end_scope();
      }
      Stmt::Class(class) => self.resolve_class(class),
      Stmt::Expression(expr) | Stmt::Print(expr) => self.resolve_expr(expr),
      Stmt::Function(func) => {
        self.declare(&func.name);
        self.define(&func.name);
        self.resolve_function(func, FunctionKind::Function);
      }
      Stmt::If(stmt) => {
        self.resolve_expr(&stmt.cond);
        self.resolve_stmt(&stmt.then_branch);
        if let Some(alt) = &stmt.else_branch {
          self.resolve_stmt(alt);
        }
      }
      Stmt::Return(ret) => {
        if self.current_function == FunctionKind::None {
          self.error_at(&ret.keyword, "cannot return from top-level code");
        }

        if let Some(value) = &ret.value {
          if self.current_function == FunctionKind::Initializer {
            self.error_at(&ret.keyword, "cannot return a value from an initializer");
          }
          self.resolve_expr(value);
        }
      }
      Stmt::Var(decl) => {
        self.declare(&decl.name);
        if let Some(init) = &decl.initializer {
          self.resolve_expr(init);
        }
        self.define(&decl.name);
      }
      Stmt::While(stmt) => {
        self.resolve_expr(&stmt.cond);
        self.resolve_stmt(&stmt.body);
      }
    }
  }

  /// Resolves a class declaration: the optional superclass clause, the
  /// implicit `super` and `this` scopes, and every method body.
  fn resolve_class(&mut self, class: &ClassDecl) {
    let enclosing = self.current_class;
    self.current_class = ClassKind::Class;

    self.declare(&class.name);
    self.define(&class.name);

    if let Some(superclass) = &class.superclass {
      if superclass.name.lexeme == class.name.lexeme {
        self.error_at(&superclass.name, "a class cannot inherit from itself");
      }

      self.current_class = ClassKind::Subclass;
      self.resolve_variable(superclass);

      // Methods of a subclass close over a scope binding `super`.
      self.begin_scope();
      self.define_name("super");
    }

    // Every method closes over a scope binding `this`.
    self.begin_scope();
    self.define_name("this");

    for method in &class.methods {
      let kind = if method.name.lexeme == "init" {
        FunctionKind::Initializer
      } else {
        FunctionKind::Method
      };
      self.resolve_function(method, kind);
    }

    self.end_scope();

    if class.superclass.is_some() {
      self.end_scope();
    }

    self.current_class = enclosing;
  }

  /// Resolves a function body: one scope holds the parameters and the body
  /// statements, matching the single environment a call creates.
  fn resolve_function(&mut self, func: &Rc<FunctionDecl>, kind: FunctionKind) {
    let enclosing = self.current_function;
    self.current_function = kind;

    self.begin_scope();
    for param in &func.params {
      self.declare(param);
      self.define(param);
    }
    for stmt in &func.body {
      self.resolve_stmt(stmt);
    }
    self.end_scope();

    self.current_function = enclosing;
  }

  fn resolve_expr(&mut self, expr: &Expr) {
    match expr {
      Expr::Assign(assign) => {
        self.resolve_expr(&assign.value);
        self.resolve_local(&assign.name, &assign.dist);
      }
      Expr::Binary(binary) => {
        self.resolve_expr(&binary.left);
        self.resolve_expr(&binary.right);
      }
      Expr::Call(call) => {
        self.resolve_expr(&call.callee);
        for arg in &call.args {
          self.resolve_expr(arg);
        }
      }
      Expr::Get(get) => self.resolve_expr(&get.object),
      Expr::Grouping(inner) => self.resolve_expr(inner),
      Expr::Literal(_) => {}
      Expr::Logical(logical) => {
        self.resolve_expr(&logical.left);
        self.resolve_expr(&logical.right);
      }
      Expr::Set(set) => {
        self.resolve_expr(&set.value);
        self.resolve_expr(&set.object);
      }
      Expr::Super(sup) => match self.current_class {
        ClassKind::None => self.error_at(&sup.keyword, "cannot use 'super' outside of a class"),
        ClassKind::Class => {
          self.error_at(&sup.keyword, "cannot use 'super' in a class with no superclass")
        }
        ClassKind::Subclass => self.resolve_local(&sup.keyword, &sup.dist),
      },
      Expr::This(this) => {
        if self.current_class == ClassKind::None {
          self.error_at(&this.keyword, "cannot use 'this' outside of a class");
        } else {
          self.resolve_local(&this.keyword, &this.dist);
        }
      }
      Expr::Unary(unary) => self.resolve_expr(&unary.right),
      Expr::Variable(var) => self.resolve_variable(var),
    }
  }

  fn resolve_variable(&mut self, var: &VariableExpr) {
    if let Some(scope) = self.scopes.last() {
      if scope.get(&var.name.lexeme) == Some(&false) {
        self.error_at(&var.name, "cannot read local variable in its own initializer");
      }
    }

    self.resolve_local(&var.name, &var.dist);
  }

  /// Finds the innermost scope binding the name and records how many hops
  /// outward it lives. Names bound in no lexical scope are left unresolved
  /// and fall through to the globals at run time.
  fn resolve_local(&mut self, name: &Token, dist: &ResolvedDistance) {
    for (hops, scope) in self.scopes.iter().rev().enumerate() {
      if scope.contains_key(&name.lexeme) {
        dist.set(Some(hops));
        return;
      }
    }

    dist.set(None);
  }

  /// Inserts a name into the innermost scope, marked as not yet usable.
  /// Declaring the same name twice in one local scope is an error.
  fn declare(&mut self, name: &Token) {
    if self.scopes.is_empty() {
      return;
    }

    let duplicate = self.scopes.last().unwrap().contains_key(&name.lexeme);
    if duplicate {
      let message = format!("variable '{}' is already declared in this scope", name.lexeme);
      self.error_at(name, &message);
      return;
    }

    self
      .scopes
      .last_mut()
      .unwrap()
      .insert(name.lexeme.clone(), false);
  }

  /// Marks a declared name's initializer as finished.
  fn define(&mut self, name: &Token) {
    if let Some(scope) = self.scopes.last_mut() {
      scope.insert(name.lexeme.clone(), true);
    }
  }

  /// Defines an implicit name (`this`, `super`) in the innermost scope.
  fn define_name(&mut self, name: &str) {
    if let Some(scope) = self.scopes.last_mut() {
      scope.insert(String::from(name), true);
    }
  }

  fn begin_scope(&mut self) {
    self.scopes.push(HashMap::new());
  }

  fn end_scope(&mut self) {
    self.scopes.pop();
  }

  fn error_at(&mut self, token: &Token, message: &str) {
    self.errors.push(ErrorReport {
      kind: ErrorKind::Syntax,
      line: token.line_num,
      column: token.column_start,
      message: String::from(message),
    });
  }
}

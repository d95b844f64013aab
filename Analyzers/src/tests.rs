use crate::Resolver;
use parser::Parser;

fn resolve_err(src: &str) -> String {
  let program = match Parser::parse(src) {
    Ok(program) => program,
    Err(errors) => panic!("expected '{}' to parse, got {:?}", src, errors),
  };

  match Resolver::resolve(&program) {
    Ok(()) => panic!("expected '{}' to fail resolution", src),
    Err(errors) => errors[0].message.clone(),
  }
}

fn resolve_ok(src: &str) {
  let program = Parser::parse(src).expect("program should parse");

  if let Err(errors) = Resolver::resolve(&program) {
    panic!("expected '{}' to resolve, got {:?}", src, errors);
  }
}

#[test]
fn reading_a_local_in_its_own_initializer() {
  assert_eq!(
    resolve_err("{ var a = a; }"),
    "cannot read local variable in its own initializer"
  );
}

#[test]
fn global_initializer_may_mention_its_own_name() {
  // At the top level this is legal; the lookup fails at run time instead.
  resolve_ok("var a = a;");
}

#[test]
fn duplicate_declaration_in_the_same_scope() {
  assert_eq!(
    resolve_err("{ var a = 1; var a = 2; }"),
    "variable 'a' is already declared in this scope"
  );

  // Shadowing an outer scope is fine.
  resolve_ok("var a = 1; { var a = 2; }");
}

#[test]
fn return_at_top_level() {
  assert_eq!(resolve_err("return 1;"), "cannot return from top-level code");
  resolve_ok("fun f() { return 1; }");
}

#[test]
fn returning_a_value_from_an_initializer() {
  assert_eq!(
    resolve_err("class C { init() { return 1; } }"),
    "cannot return a value from an initializer"
  );

  // A bare return inside init is allowed.
  resolve_ok("class C { init() { return; } }");
}

#[test]
fn this_outside_of_a_class() {
  assert_eq!(resolve_err("print this;"), "cannot use 'this' outside of a class");
  assert_eq!(
    resolve_err("fun f() { return this; }"),
    "cannot use 'this' outside of a class"
  );
  resolve_ok("class C { m() { return this; } }");
}

#[test]
fn super_outside_of_a_class() {
  assert_eq!(
    resolve_err("super.m();"),
    "cannot use 'super' outside of a class"
  );
}

#[test]
fn super_in_a_class_with_no_superclass() {
  assert_eq!(
    resolve_err("class C { m() { super.m(); } }"),
    "cannot use 'super' in a class with no superclass"
  );
  resolve_ok("class A { m() {} } class B < A { m() { super.m(); } }");
}

#[test]
fn a_class_cannot_inherit_from_itself() {
  assert_eq!(
    resolve_err("class C < C {}"),
    "a class cannot inherit from itself"
  );
}

#[test]
fn distances_count_scopes_not_variables() {
  use lox_core::ast::{Expr, Stmt};

  let program = Parser::parse("{ var a = 1; { { print a; } } }").expect("should parse");
  Resolver::resolve(&program).expect("should resolve");

  // Walk down to the print statement's variable expression.
  let mut stmts: &[Stmt] = &program;
  for _ in 0..3 {
    stmts = match &stmts[stmts.len() - 1] {
      Stmt::Block(inner) => inner,
      _ => panic!("expected a block"),
    };
  }

  match &stmts[0] {
    Stmt::Print(Expr::Variable(var)) => assert_eq!(var.dist.get(), Some(2)),
    _ => panic!("expected a print statement"),
  }
}

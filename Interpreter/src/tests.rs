use analyzers::Resolver;
use parser::Parser;

use crate::Interpreter;

/// Runs a program through the full tree-walking pipeline, returning the
/// captured standard output.
fn run(src: &str) -> String {
  let program = match Parser::parse(src) {
    Ok(program) => program,
    Err(errors) => panic!("expected '{}' to parse, got {:?}", src, errors),
  };

  if let Err(errors) = Resolver::resolve(&program) {
    panic!("expected '{}' to resolve, got {:?}", src, errors);
  }

  let mut out: Vec<u8> = vec![];
  let mut interpreter = Interpreter::new(&mut out);
  if let Err(error) = interpreter.interpret(&program) {
    panic!("expected '{}' to run, got: {}", src, error.message);
  }

  String::from_utf8(out).expect("output should be utf-8")
}

/// Runs a program expected to fail at run time, returning the error
/// message and the captured output produced before the failure.
fn run_err(src: &str) -> (String, String) {
  let program = Parser::parse(src).expect("program should parse");
  Resolver::resolve(&program).expect("program should resolve");

  let mut out: Vec<u8> = vec![];
  let mut interpreter = Interpreter::new(&mut out);
  match interpreter.interpret(&program) {
    Ok(()) => panic!("expected '{}' to fail at run time", src),
    Err(error) => (error.message, String::from_utf8(out).unwrap()),
  }
}

#[test]
fn arithmetic_precedence() {
  assert_eq!(run("print 1 + 2 * 3;"), "7\n");
}

#[test]
fn block_scoping_and_shadowing() {
  assert_eq!(run("var a = 1; { var a = 2; print a; } print a;"), "2\n1\n");
}

#[test]
fn closures_capture_their_defining_environment() {
  let src = "
    fun make(n) {
      fun inc() { n = n + 1; return n; }
      return inc;
    }
    var f = make(10);
    print f();
    print f();
  ";

  assert_eq!(run(src), "11\n12\n");
}

#[test]
fn super_dispatches_to_the_superclass_method() {
  let src = "
    class A { greet() { print \"hi from A\"; } }
    class B < A { greet() { super.greet(); print \"and B\"; } }
    B().greet();
  ";

  assert_eq!(run(src), "hi from A\nand B\n");
}

#[test]
fn for_loops_count() {
  assert_eq!(run("for (var i = 0; i < 3; i = i + 1) print i;"), "0\n1\n2\n");
}

#[test]
fn initializers_bind_this_and_fields() {
  assert_eq!(run("class C { init(x) { this.x = x; } } print C(42).x;"), "42\n");
}

#[test]
fn calling_a_non_callable_value() {
  let (message, _) = run_err("var a; a();");
  assert_eq!(message, "can only call functions or classes");
}

#[test]
fn adding_a_number_and_a_string() {
  let (message, _) = run_err("print 1 + \"x\";");
  assert_eq!(message, "operands must be two numbers or two strings");
}

#[test]
fn string_concatenation() {
  assert_eq!(run("print \"foo\" + \"bar\";"), "foobar\n");
}

#[test]
fn comparison_operands_must_be_numbers() {
  let (message, _) = run_err("print \"a\" < \"b\";");
  assert_eq!(message, "operands must be numbers");
}

#[test]
fn unary_minus_requires_a_number() {
  let (message, _) = run_err("print -\"x\";");
  assert_eq!(message, "operand must be a number");
}

#[test]
fn undefined_variable_read() {
  let (message, _) = run_err("print missing;");
  assert_eq!(message, "undefined variable 'missing'");
}

#[test]
fn undefined_variable_assignment() {
  let (message, _) = run_err("missing = 1;");
  assert_eq!(message, "undefined variable 'missing'");
}

#[test]
fn arity_mismatch_message() {
  let (message, _) = run_err("fun f(a, b) {} f(1);");
  assert_eq!(message, "expected 2 arguments, got 1");
}

#[test]
fn logical_operators_short_circuit_and_yield_operands() {
  assert_eq!(run("print nil or \"yes\";"), "yes\n");
  assert_eq!(run("print false and 1;"), "false\n");
  assert_eq!(run("print 1 or 2;"), "1\n");

  // The right side of a short-circuited `or` must not run.
  assert_eq!(run("fun boom() { print \"ran\"; } true or boom();"), "");
}

#[test]
fn equality_follows_the_value_model() {
  assert_eq!(run("print nil == nil;"), "true\n");
  assert_eq!(run("print nil == false;"), "false\n");
  assert_eq!(run("print 1 == 1;"), "true\n");
  assert_eq!(run("print \"a\" != \"b\";"), "true\n");
  assert_eq!(run("print 1 == \"1\";"), "false\n");
}

#[test]
fn returns_unwind_through_nested_blocks_and_loops() {
  let src = "
    fun find() {
      for (var i = 0; i < 10; i = i + 1) {
        if (i == 3) { return i; }
      }
      return -1;
    }
    print find();
  ";

  assert_eq!(run(src), "3\n");
}

#[test]
fn functions_without_a_return_yield_nil() {
  assert_eq!(run("fun f() {} print f();"), "nil\n");
}

#[test]
fn methods_close_over_this() {
  let src = "
    class Counter {
      init() { this.count = 0; }
      bump() { this.count = this.count + 1; return this.count; }
    }
    var c = Counter();
    var bump = c.bump;
    bump();
    print bump();
  ";

  assert_eq!(run(src), "2\n");
}

#[test]
fn fields_shadow_methods() {
  let src = "
    class C { m() { return \"method\"; } }
    var c = C();
    c.m = 1;
    print c.m;
  ";

  assert_eq!(run(src), "1\n");
}

#[test]
fn inherited_methods_are_found_through_the_chain() {
  let src = "
    class A { m() { return \"from A\"; } }
    class B < A {}
    class C < B {}
    print C().m();
  ";

  assert_eq!(run(src), "from A\n");
}

#[test]
fn initializers_always_yield_the_instance() {
  let src = "
    class C { init() { this.x = 1; return; } }
    var c = C();
    print c.x;
  ";

  assert_eq!(run(src), "1\n");
}

#[test]
fn pure_calls_are_repeatable() {
  let src = "
    fun square(n) { return n * n; }
    print square(9) == square(9);
  ";

  assert_eq!(run(src), "true\n");
}

#[test]
fn value_printing_forms() {
  let src = "
    class C {}
    fun f() {}
    print nil;
    print true;
    print 2.5;
    print \"raw\";
    print f;
    print C;
    print C();
  ";

  assert_eq!(run(src), "nil\ntrue\n2.5\nraw\n<fn f>\nC\nC instance\n");
}

#[test]
fn number_printing_rounds_to_six_significant_digits() {
  assert_eq!(run("print 1 / 3;"), "0.333333\n");
  assert_eq!(run("print 100000000;"), "1e+08\n");
  assert_eq!(run("print 1 / 200000;"), "5e-06\n");
}

#[test]
fn clock_returns_a_number() {
  assert_eq!(run("print clock() > 0;"), "true\n");
}

#[test]
fn superclass_must_be_a_class() {
  let (message, _) = run_err("var NotAClass = 1; class C < NotAClass {}");
  assert_eq!(message, "superclass must be a class");
}

#[test]
fn only_instances_have_properties() {
  let (message, _) = run_err("print 1.x;");
  assert_eq!(message, "only instances have properties");

  let (message, _) = run_err("var s = \"str\"; s.field = 1;");
  assert_eq!(message, "only instances have fields");
}

#[test]
fn undefined_property_read() {
  let (message, _) = run_err("class C {} print C().missing;");
  assert_eq!(message, "undefined property 'missing'");
}

#[test]
fn output_before_a_runtime_error_is_kept() {
  let (message, out) = run_err("print 1; print 2 + nil;");
  assert_eq!(out, "1\n");
  assert_eq!(message, "operands must be two numbers or two strings");
}

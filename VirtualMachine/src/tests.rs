use crate::{InterpretResult, ValueStack, Vm};
use compiler::Compiler;

/// Interprets an expression and returns what the final return printed.
fn interpret(src: &str) -> String {
  let mut out: Vec<u8> = vec![];
  let mut vm = Vm::new(&mut out);

  match vm.interpret(src) {
    InterpretResult::Ok => {}
    other => panic!("expected '{}' to interpret, got {:?}", src, other),
  }

  String::from_utf8(out).expect("output should be utf-8")
}

#[test]
fn arithmetic_expressions_evaluate() {
  assert_eq!(interpret("1 + 2 * 3"), "7\n");
  assert_eq!(interpret("(1 + 2) * 3"), "9\n");
  assert_eq!(interpret("6 / 2 - 1"), "2\n");
  assert_eq!(interpret("-(4 + 4)"), "-8\n");
}

#[test]
fn fractional_results_print_plainly() {
  assert_eq!(interpret("1 / 2"), "0.5\n");
  assert_eq!(interpret("0.5 + 0.25"), "0.75\n");
}

#[test]
fn results_print_with_six_significant_digits() {
  assert_eq!(interpret("1 / 3"), "0.333333\n");
  assert_eq!(interpret("10000 * 10000"), "1e+08\n");
}

#[test]
fn the_stack_is_empty_after_a_successful_run() {
  let chunk = Compiler::compile("(1 + 2) * (3 - 4)").expect("should compile");

  let mut out: Vec<u8> = vec![];
  let mut vm = Vm::new(&mut out);
  let mut stack = ValueStack::new();

  assert_eq!(vm.run(&chunk, &mut stack), InterpretResult::Ok);
  assert!(stack.is_empty());
}

#[test]
fn long_constants_load_like_short_ones() {
  // Force constant 256 onto the long path and make it the final result:
  // the sum of 0..=299 is 44850.
  let mut src = String::from("0");
  for i in 1..300 {
    src.push_str(&format!(" + {}", i));
  }

  assert_eq!(interpret(&src), "44850\n");
}

#[test]
fn compile_errors_surface_as_a_compile_result() {
  let mut out: Vec<u8> = vec![];
  let mut vm = Vm::new(&mut out);

  assert_eq!(vm.interpret("1 +"), InterpretResult::CompileError);
  assert!(out.is_empty());
}

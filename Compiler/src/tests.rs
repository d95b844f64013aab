use crate::Compiler;
use lox_core::bytecode::OpCode;
use lox_core::chunk::Chunk;

fn compile_ok(src: &str) -> Chunk {
  match Compiler::compile(src) {
    Ok(chunk) => chunk,
    Err(errors) => panic!("expected '{}' to compile, got {:?}", src, errors),
  }
}

/// Decodes a chunk back into a flat list of opcodes, skipping operands.
fn op_codes(chunk: &Chunk) -> Vec<OpCode> {
  let mut ops = vec![];
  let mut offset = 0;

  while offset < chunk.len() {
    let op = match chunk.get_op_code(offset) {
      Some(op) => op,
      None => panic!("byte at offset {} is not an instruction", offset),
    };
    offset += match op {
      OpCode::Constant => 2,
      OpCode::ConstantLong => 4,
      _ => 1,
    };
    ops.push(op);
  }

  ops
}

#[test]
fn factors_compile_before_the_enclosing_term() {
  let chunk = compile_ok("1 + 2 * 3");

  assert_eq!(
    op_codes(&chunk),
    vec![
      OpCode::Constant,
      OpCode::Constant,
      OpCode::Constant,
      OpCode::Multiply,
      OpCode::Add,
      OpCode::Return,
    ]
  );
}

#[test]
fn grouping_overrides_precedence() {
  let chunk = compile_ok("(1 + 2) * 3");

  assert_eq!(
    op_codes(&chunk),
    vec![
      OpCode::Constant,
      OpCode::Constant,
      OpCode::Add,
      OpCode::Constant,
      OpCode::Multiply,
      OpCode::Return,
    ]
  );
}

#[test]
fn subtraction_is_left_associative() {
  let chunk = compile_ok("5 - 3 - 1");

  assert_eq!(
    op_codes(&chunk),
    vec![
      OpCode::Constant,
      OpCode::Constant,
      OpCode::Subtract,
      OpCode::Constant,
      OpCode::Subtract,
      OpCode::Return,
    ]
  );
}

#[test]
fn unary_negation_nests() {
  let chunk = compile_ok("--7");

  assert_eq!(
    op_codes(&chunk),
    vec![OpCode::Constant, OpCode::Negate, OpCode::Negate, OpCode::Return]
  );
}

#[test]
fn constant_operands_index_the_pool() {
  let chunk = compile_ok("1.5 / 0.5");

  assert_eq!(chunk.get_constant(chunk.get_byte(1) as usize), 1.5);
  assert_eq!(chunk.get_constant(chunk.get_byte(3) as usize), 0.5);
}

#[test]
fn long_constants_start_at_index_256() {
  // An expression with 300 literals overflows the one-byte operand.
  let mut src = String::from("0");
  for i in 1..300 {
    src.push_str(&format!(" + {}", i));
  }

  let chunk = compile_ok(&src);
  let ops = op_codes(&chunk);

  let shorts = ops.iter().filter(|op| **op == OpCode::Constant).count();
  let longs = ops.iter().filter(|op| **op == OpCode::ConstantLong).count();

  assert_eq!(shorts, 256);
  assert_eq!(longs, 44);
  assert_eq!(chunk.constants_count(), 300);
}

#[test]
fn long_constant_operands_are_little_endian() {
  let mut src = String::from("0");
  for i in 1..300 {
    src.push_str(&format!(" + {}", i));
  }

  let chunk = compile_ok(&src);

  // Find the first ConstantLong and decode its operand.
  let mut offset = 0;
  loop {
    match chunk.get_op_code(offset) {
      Some(OpCode::Constant) => offset += 2,
      Some(OpCode::ConstantLong) => break,
      Some(_) => offset += 1,
      None => panic!("undecodable instruction stream"),
    }
  }

  let index = chunk.get_byte(offset + 1) as usize
    | (chunk.get_byte(offset + 2) as usize) << 8
    | (chunk.get_byte(offset + 3) as usize) << 16;

  assert_eq!(index, 256);
  assert_eq!(chunk.get_constant(index), 256.0);
}

#[test]
fn incomplete_expression_reports_at_the_operator_line() {
  let errors = match Compiler::compile("1 +") {
    Ok(_) => panic!("expected a compile failure"),
    Err(errors) => errors,
  };

  assert_eq!(errors[0].message, "expected expression");
  assert_eq!(errors[0].line, 1);
}

#[test]
fn trailing_tokens_are_rejected() {
  let errors = match Compiler::compile("1 2") {
    Ok(_) => panic!("expected a compile failure"),
    Err(errors) => errors,
  };

  assert_eq!(errors[0].message, "expected end of expression");
}

#[test]
fn panic_mode_reports_only_the_first_error() {
  let errors = match Compiler::compile("+ + +") {
    Ok(_) => panic!("expected a compile failure"),
    Err(errors) => errors,
  };

  assert_eq!(errors.len(), 1);
}

#[test]
fn lines_thread_into_the_chunk() {
  let chunk = compile_ok("1 +\n2");

  // The final Return is emitted from line 2's token.
  assert_eq!(chunk.get_line(chunk.len() - 1), 2);
  assert_eq!(chunk.get_line(0), 1);
}

use lox_core::bytecode::OpCode;
use lox_core::chunk::Chunk;
use lox_core::values::print_value;

/// Disassembles a whole chunk, printing each instruction and its related
/// information under a named header.
pub fn disassemble_chunk(chunk: &Chunk, name: &str) {
  println!("== {} ==", name);

  let mut offset = 0;
  while offset < chunk.len() {
    offset = disassemble_instruction(chunk, offset);
  }
}

/// Prints a single instruction and returns the offset of the instruction
/// that follows it.
pub fn disassemble_instruction(chunk: &Chunk, offset: usize) -> usize {
  let (text, next) = instruction_to_string(chunk, offset);
  println!("{}", text);
  next
}

/// Renders a single instruction as `OFFSET LINE NAME [operand]`, along
/// with the offset of the instruction that follows it. The line column
/// reads `   | ` when the instruction shares the previous instruction's
/// line.
pub fn instruction_to_string(chunk: &Chunk, offset: usize) -> (String, usize) {
  let mut text = format!("{:04} ", offset);

  if offset > 0 && chunk.get_line(offset) == chunk.get_line(offset - 1) {
    text.push_str("   | ");
  } else {
    text.push_str(&format!("{:4} ", chunk.get_line(offset)));
  }

  let (body, next) = match chunk.get_op_code(offset) {
    Some(OpCode::Constant) => constant_instruction("OP_CONSTANT", chunk, offset),
    Some(OpCode::ConstantLong) => constant_long_instruction("OP_CONSTANT_LONG", chunk, offset),
    Some(OpCode::Add) => simple_instruction("OP_ADD", offset),
    Some(OpCode::Subtract) => simple_instruction("OP_SUBTRACT", offset),
    Some(OpCode::Multiply) => simple_instruction("OP_MULTIPLY", offset),
    Some(OpCode::Divide) => simple_instruction("OP_DIVIDE", offset),
    Some(OpCode::Negate) => simple_instruction("OP_NEGATE", offset),
    Some(OpCode::Return) => simple_instruction("OP_RETURN", offset),
    None => (
      format!("Unknown opcode: {}", chunk.get_byte(offset)),
      offset + 1,
    ),
  };

  text.push_str(&body);
  (text, next)
}

/// A one-byte instruction with no operands.
fn simple_instruction(name: &str, offset: usize) -> (String, usize) {
  (String::from(name), offset + 1)
}

/// A `Constant` instruction: the opcode plus a one-byte pool index.
fn constant_instruction(name: &str, chunk: &Chunk, offset: usize) -> (String, usize) {
  let index = chunk.get_byte(offset + 1) as usize;

  (
    format!("{:<16} {:4} '{}'", name, index, print_value(chunk.get_constant(index))),
    offset + 2,
  )
}

/// A `ConstantLong` instruction: the opcode plus a three-byte little-endian
/// pool index.
fn constant_long_instruction(name: &str, chunk: &Chunk, offset: usize) -> (String, usize) {
  let index = chunk.get_byte(offset + 1) as usize
    | (chunk.get_byte(offset + 2) as usize) << 8
    | (chunk.get_byte(offset + 3) as usize) << 16;

  (
    format!("{:<16} {:4} '{}'", name, index, print_value(chunk.get_constant(index))),
    offset + 4,
  )
}

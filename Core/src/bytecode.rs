use num_derive::FromPrimitive;

/// The set of instructions supported by the virtual machine.
///
/// **NOTE:** Changing the order in which members are declared creates
/// incompatibilities between different versions of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(u8)]
pub enum OpCode {
  // Instructions with zero chunk operands. While these instructions do not
  // have any bytecode operands, most of them do have value operands that
  // they take from the stack.
  Add,
  Divide,
  Multiply,
  Negate,
  Return,
  Subtract,

  // Instructions with one chunk operand. The operand is the next byte in
  // the chunk, an index into the constants pool.
  Constant,

  // Instructions with three chunk operands. The operands are the next three
  // bytes in the chunk, a little-endian index into the constants pool.
  ConstantLong,
}

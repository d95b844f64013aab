use num_traits::FromPrimitive;

use crate::bytecode::OpCode;
use crate::values::Value;

/// Contains all the necessary information about the instructions to be
/// executed: the raw instruction bytes, the constants pool, and a
/// run-length-encoded table mapping instruction offsets to source lines.
#[derive(Default, Clone)]
pub struct Chunk {
  instructions: Vec<u8>,
  constants: Vec<Value>,
  /// `(line, run_length)` pairs. The sum of the run lengths always equals
  /// the length of the instructions list.
  lines: Vec<(usize, usize)>,
}

impl Chunk {
  /// Creates a new, empty chunk.
  pub fn new() -> Chunk {
    Chunk {
      instructions: vec![],
      constants: vec![],
      lines: vec![],
    }
  }

  /// Gets the size of the instructions list.
  pub fn len(&self) -> usize {
    self.instructions.len()
  }

  /// Checks whether or not the instructions list is empty.
  pub fn is_empty(&self) -> bool {
    self.instructions.is_empty()
  }

  /// Adds a bytecode instruction from a given OpCode into the instructions
  /// list, recording the source line it came from.
  pub fn push_op_code(&mut self, op: OpCode, line: usize) {
    self.instructions.push(op as u8);
    self.push_line(line);
  }

  /// Adds a raw byte into the instructions list, recording the source line
  /// it came from.
  pub fn push_byte(&mut self, byte: u8, line: usize) {
    self.instructions.push(byte);
    self.push_line(line);
  }

  /// Returns the OpCode associated with the byte at the given instruction
  /// index, or `None` if the byte does not encode an instruction.
  pub fn get_op_code(&self, idx: usize) -> Option<OpCode> {
    match self.instructions.get(idx) {
      Some(byte) => FromPrimitive::from_u8(*byte),
      None => None,
    }
  }

  /// Retrieves a raw byte from the instructions list.
  pub fn get_byte(&self, idx: usize) -> u8 {
    self.instructions[idx]
  }

  /// Adds a constant to this chunk's constants pool and returns its
  /// zero-based index.
  pub fn add_constant(&mut self, value: Value) -> usize {
    self.constants.push(value);
    self.constants.len() - 1
  }

  /// Retrieves a constant from this chunk's constants pool.
  pub fn get_constant(&self, idx: usize) -> Value {
    self.constants[idx]
  }

  /// Gets the number of constants in this chunk's constants pool.
  pub fn constants_count(&self) -> usize {
    self.constants.len()
  }

  /// Gets the source line for the instruction at the given offset by
  /// walking the run-length pairs. Offsets at or past the final
  /// instruction map to the line of the last pair.
  pub fn get_line(&self, offset: usize) -> usize {
    let mut covered = 0;

    for (line, run_length) in &self.lines {
      covered += run_length;
      if offset < covered {
        return *line;
      }
    }

    match self.lines.last() {
      Some((line, _)) => *line,
      None => 0,
    }
  }

  /// Extends the run-length line table by one instruction on the given
  /// line, growing the last run when the line repeats.
  fn push_line(&mut self, line: usize) {
    match self.lines.last_mut() {
      Some(last) if last.0 == line => last.1 += 1,
      _ => self.lines.push((line, 1)),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn line_runs_cover_every_instruction() {
    let mut chunk = Chunk::new();
    chunk.push_op_code(OpCode::Constant, 1);
    chunk.push_byte(0, 1);
    chunk.push_op_code(OpCode::Negate, 1);
    chunk.push_op_code(OpCode::Return, 2);

    let total: usize = chunk.lines.iter().map(|(_, run)| run).sum();
    assert_eq!(total, chunk.len());
    assert_eq!(chunk.lines.len(), 2);
  }

  #[test]
  fn get_line_is_monotonic() {
    let mut chunk = Chunk::new();
    for line in [1, 1, 2, 5, 5, 5, 9] {
      chunk.push_op_code(OpCode::Add, line);
    }

    let mut previous = 0;
    for offset in 0..chunk.len() {
      let line = chunk.get_line(offset);
      if line < previous {
        panic!("line table went backwards at offset {}", offset);
      }
      previous = line;
    }
  }

  #[test]
  fn get_line_at_last_instruction() {
    let mut chunk = Chunk::new();
    chunk.push_op_code(OpCode::Add, 3);
    chunk.push_op_code(OpCode::Return, 7);

    assert_eq!(chunk.get_line(chunk.len() - 1), 7);
  }

  #[test]
  fn constants_round_trip() {
    let mut chunk = Chunk::new();
    let idx = chunk.add_constant(1.5);

    assert_eq!(idx, 0);
    assert_eq!(chunk.get_constant(idx), 1.5);
    assert_eq!(chunk.constants_count(), 1);
  }
}

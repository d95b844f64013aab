use std::io::Write;

use lox_core::bytecode::OpCode;
use lox_core::chunk::Chunk;
use lox_core::values::print_value;

use crate::{InterpretResult, ValueStack, Vm};

impl<W: Write> Vm<W> {
  /// Executes the instructions in a chunk: a fetch-decode-execute loop
  /// over the byte stream, with the operand stack threaded through so
  /// callers can observe it afterwards.
  pub(crate) fn run(&mut self, chunk: &Chunk, stack: &mut ValueStack) -> InterpretResult {
    let mut ip = 0;

    while ip < chunk.len() {
      #[cfg(feature = "trace_execution")]
      {
        print!("        ");
        for value in stack.iter() {
          print!("[ {} ]", print_value(*value));
        }
        println!();

        disassembler::disassemble_instruction(chunk, ip);
      }

      let instruction = match chunk.get_op_code(ip) {
        Some(instruction) => instruction,
        None => {
          eprintln!("Unknown opcode {} at offset {}.", chunk.get_byte(ip), ip);
          return InterpretResult::RuntimeError;
        }
      };
      ip += 1;

      match instruction {
        OpCode::Constant => {
          let index = chunk.get_byte(ip) as usize;
          ip += 1;
          stack.push(chunk.get_constant(index));
        }
        OpCode::ConstantLong => {
          let index = chunk.get_byte(ip) as usize
            | (chunk.get_byte(ip + 1) as usize) << 8
            | (chunk.get_byte(ip + 2) as usize) << 16;
          ip += 3;
          stack.push(chunk.get_constant(index));
        }
        OpCode::Add => {
          let b = stack.pop();
          let a = stack.pop();
          stack.push(a + b);
        }
        OpCode::Subtract => {
          let b = stack.pop();
          let a = stack.pop();
          stack.push(a - b);
        }
        OpCode::Multiply => {
          let b = stack.pop();
          let a = stack.pop();
          stack.push(a * b);
        }
        OpCode::Divide => {
          let b = stack.pop();
          let a = stack.pop();
          stack.push(a / b);
        }
        OpCode::Negate => {
          let value = stack.pop();
          stack.push(-value);
        }
        OpCode::Return => {
          let value = stack.pop();
          let _ = writeln!(self.out, "{}", print_value(value));
          return InterpretResult::Ok;
        }
      }
    }

    // The compiler terminates every chunk with a return; running off the
    // end means the chunk was malformed.
    eprintln!("Reached the end of the chunk without a return.");
    InterpretResult::RuntimeError
  }
}

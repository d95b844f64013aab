use std::io::{self, BufRead, Write};
use std::{env, fs, process};

use virtual_machine::{InterpretResult, Vm};

fn main() {
  let args: Vec<String> = env::args().collect();

  match args.len() {
    1 => repl(),
    2 => run_file(&args[1]),
    _ => {
      eprintln!("Usage: lox-vm [path]");
      process::exit(64);
    }
  }
}

/// Reads an expression script and executes it on the bytecode pipeline.
fn run_file(path: &str) {
  let source = match fs::read_to_string(path) {
    Ok(source) => source,
    Err(error) => {
      eprintln!("Could not read file '{}': {}", path, error);
      process::exit(74);
    }
  };

  let mut vm = Vm::new(io::stdout());
  process::exit(exit_code(vm.interpret(&source)));
}

/// Reads one expression at a time from standard input, compiling and
/// running each on a fresh chunk.
fn repl() {
  let stdin = io::stdin();
  let mut vm = Vm::new(io::stdout());

  loop {
    print!("> ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
      Ok(0) => {
        println!();
        break;
      }
      Ok(_) => {
        if !line.trim().is_empty() {
          vm.interpret(&line);
        }
      }
      Err(_) => break,
    }
  }
}

fn exit_code(result: InterpretResult) -> i32 {
  match result {
    InterpretResult::Ok => 0,
    InterpretResult::CompileError => 65,
    InterpretResult::RuntimeError => 70,
  }
}

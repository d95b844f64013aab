use std::io::{self, BufRead, Write};
use std::{env, fs, process};

use analyzers::Resolver;
use interpreter::Interpreter;
use lox_core::errors::report_errors_list;
use parser::Parser;

fn main() {
  let args: Vec<String> = env::args().collect();

  match args.len() {
    1 => repl(),
    2 => run_file(&args[1]),
    _ => {
      eprintln!("Usage: lox [path]");
      process::exit(64);
    }
  }
}

/// Reads and executes the named script, exiting with the appropriate code:
/// 65 for a compile-time error, 70 for a runtime error, 74 when the file
/// cannot be read, and 0 on success.
fn run_file(path: &str) {
  let source = match fs::read_to_string(path) {
    Ok(source) => source,
    Err(error) => {
      eprintln!("Could not read file '{}': {}", path, error);
      process::exit(74);
    }
  };

  let mut interpreter = Interpreter::new(io::stdout());
  process::exit(run(&mut interpreter, &source));
}

/// Reads one line at a time from standard input and evaluates it. The
/// interpreter persists across lines, so definitions stay visible; an
/// error discards the current line's work and prompts again.
fn repl() {
  let stdin = io::stdin();
  let mut interpreter = Interpreter::new(io::stdout());

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
        run(&mut interpreter, &line);
      }
      Err(_) => break,
    }
  }
}

/// Runs one source unit through the tree-walking pipeline and reports any
/// errors. Returns the exit code the result maps to.
fn run(interpreter: &mut Interpreter<io::Stdout>, source: &str) -> i32 {
  let program = match Parser::parse(source) {
    Ok(program) => program,
    Err(errors) => {
      report_errors_list(&errors);
      return 65;
    }
  };

  if let Err(errors) = Resolver::resolve(&program) {
    report_errors_list(&errors);
    return 65;
  }

  match interpreter.interpret(&program) {
    Ok(()) => 0,
    Err(error) => {
      eprintln!("{}", error);
      70
    }
  }
}

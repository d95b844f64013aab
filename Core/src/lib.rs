// Shared definitions for both execution pipelines: tokens and the AST for
// the tree walker, the bytecode chunk and opcodes for the virtual machine,
// and the error reports every stage accumulates.

pub mod ast;
pub mod bytecode;
pub mod chunk;
pub mod errors;
pub mod tokens;
pub mod values;

//! A Brainfuck interpreter with an unbounded sparse tape.
//!
//! This crate executes the classic 8-instruction language against a
//! sparse, logically infinite memory tape, reading characters from an
//! input capability and writing them to an output capability.
//!
//! Features and behaviors:
//! - Sparse tape: `i64` cell indices in both directions, unwritten cells
//!   read as 0, cell arithmetic wraps within `i64`.
//! - Quirky loop entry by default: `[` pushes its position and always
//!   enters the body, even on a 0 cell; the exit test happens only at
//!   `]`. See [`LoopEntry`] for the conventional alternative.
//! - Input (`,`) is fatal when the source is exhausted; output (`.`) is
//!   fatal when the cell is not a valid character code point.
//! - Non-command characters are comments, dropped at parse time.
//! - No bracket pre-validation; mismatches surface only when reached.
//! - A run returns the final [`Tape`] alongside its side-effected output.
//!
//! Quick start:
//!
//! ```
//! use bf_tape::{Interpreter, Program, StrInput};
//!
//! // Drain cell 0 into cell 1 with a counter loop.
//! let program = Program::parse("++>+++<[>+<-]");
//! let mut input = StrInput::new("");
//! let mut output = String::new();
//! let tape = Interpreter::new()
//!     .run(&program, &mut input, &mut output)
//!     .expect("program should run");
//! assert_eq!(tape.get(1), 5);
//! assert_eq!(tape.get(0), 0);
//! ```

pub mod cli_util;
pub mod commands;
pub mod config;
mod instruction;
mod interpreter;
pub mod io;
mod program;
pub mod repl;
mod tape;
pub mod theme;

pub use instruction::Instruction;
pub use interpreter::{Interpreter, LoopEntry, RuntimeError};
pub use io::{EmptyInput, InputSource, OutputSink, StdinInput, StdoutSink, StrInput};
pub use program::Program;
pub use tape::Tape;

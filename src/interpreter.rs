use crate::io::{InputSource, OutputSink};
use crate::{Instruction, Program, Tape};

/// Errors that can abort a run. All are fatal; the engine defines no
/// recovery path, and no partial tape is returned.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// A `]` was reached while the jump stack was empty.
    #[error("unmatched ']' at instruction {ip}")]
    UnmatchedLoopClose { ip: usize },

    /// Conventional loop entry only: a skipping `[` has no matching `]`.
    #[error("unmatched '[' at instruction {ip}")]
    UnmatchedLoopOpen { ip: usize },

    /// A `,` was reached but the input source yielded nothing.
    #[error("input exhausted at instruction {ip}")]
    InputExhausted { ip: usize },

    /// A `.` was reached on a cell whose value is not a character code point.
    #[error("cell value {value} at instruction {ip} is not a valid character")]
    InvalidOutputValue { ip: usize, value: i64 },
}

impl RuntimeError {
    /// Program index of the instruction that failed.
    pub fn ip(&self) -> usize {
        match self {
            RuntimeError::UnmatchedLoopClose { ip }
            | RuntimeError::UnmatchedLoopOpen { ip }
            | RuntimeError::InputExhausted { ip }
            | RuntimeError::InvalidOutputValue { ip, .. } => *ip,
        }
    }
}

/// What `[` does when it is reached.
///
/// The default, [`LoopEntry::Quirky`], never inspects the current cell:
/// `[` pushes its own position and falls into the body, so a loop body
/// always executes at least once even when the counter starts at 0. The
/// only exit test happens at `]`. [`LoopEntry::Conventional`] restores the
/// usual semantics, skipping the body when the cell is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoopEntry {
    #[default]
    Quirky,
    Conventional,
}

/// The execution engine.
///
/// A run owns a fresh [`Tape`], a signed data pointer, an instruction
/// pointer into a borrowed [`Program`], and a jump stack of saved
/// instruction-pointer positions. Execution is synchronous and
/// run-to-completion; the only blocking point is `,` pulling from the
/// input source. On normal termination the tape is returned to the caller.
///
/// Loop semantics are deliberately unconventional by default: see
/// [`LoopEntry`]. Bracket matching is never validated ahead of time — a
/// mismatch surfaces only at the moment it is reached, and a `[` that is
/// never closed terminates the run normally with its entry still on the
/// jump stack.
///
/// Cell values and the data pointer wrap within `i64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interpreter {
    loop_entry: LoopEntry,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loop_entry(loop_entry: LoopEntry) -> Self {
        Self { loop_entry }
    }

    pub fn loop_entry(&self) -> LoopEntry {
        self.loop_entry
    }

    /// Execute `program` until the instruction pointer falls off the end,
    /// returning the final tape. Output is delivered to `output` as a side
    /// effect while the run is in flight.
    pub fn run<I, O>(&self, program: &Program, input: &mut I, output: &mut O) -> Result<Tape, RuntimeError>
    where
        I: InputSource,
        O: OutputSink,
    {
        self.execute(program, input, output, false)
    }

    /// Execute `program`, printing a step-by-step table of operations
    /// instead of performing I/O. The tape and pointers advance exactly as
    /// in a real run, but `.` logs the character it would emit and `,`
    /// reads a simulated NUL, so a trace never blocks or fails on input.
    pub fn trace<I, O>(&self, program: &Program, input: &mut I, output: &mut O) -> Result<Tape, RuntimeError>
    where
        I: InputSource,
        O: OutputSink,
    {
        self.execute(program, input, output, true)
    }

    /// Internal executor shared by run and trace.
    fn execute<I, O>(
        &self,
        program: &Program,
        input: &mut I,
        output: &mut O,
        trace: bool,
    ) -> Result<Tape, RuntimeError>
    where
        I: InputSource,
        O: OutputSink,
    {
        let mut tape = Tape::new();
        let mut ip: usize = 0;
        let mut idx: i64 = 0;
        let mut stack: Vec<usize> = Vec::new();

        let mut step: usize = 0;
        if trace {
            println!("STEP | IP  | PTR | CELL | INSTR | ACTION");
            println!("-----+-----+-----+------+-------+------------------------------------------------");
        }

        while ip < program.len() {
            let instr = program.get(ip).expect("ip is bounded by the loop condition");
            let (ptr_before, cell_before) = (idx, tape.get(idx));
            let mut action: Option<String> = if trace { Some(String::new()) } else { None };

            match instr {
                Instruction::Increment => {
                    tape.shift(idx, 1);
                    if let Some(a) = action.as_mut() {
                        *a = format!("Increment cell[{}] from {} to {}", ptr_before, cell_before, tape.get(idx));
                    }
                }
                Instruction::Decrement => {
                    tape.shift(idx, -1);
                    if let Some(a) = action.as_mut() {
                        *a = format!("Decrement cell[{}] from {} to {}", ptr_before, cell_before, tape.get(idx));
                    }
                }
                Instruction::MoveRight => {
                    idx = idx.wrapping_add(1);
                    if let Some(a) = action.as_mut() {
                        *a = format!("Moved pointer head to index {}", idx);
                    }
                }
                Instruction::MoveLeft => {
                    idx = idx.wrapping_sub(1);
                    if let Some(a) = action.as_mut() {
                        *a = format!("Moved pointer head to index {}", idx);
                    }
                }
                Instruction::Output => {
                    let value = tape.get(idx);
                    let ch = u32::try_from(value)
                        .ok()
                        .and_then(char::from_u32)
                        .ok_or(RuntimeError::InvalidOutputValue { ip, value })?;
                    if trace {
                        if let Some(a) = action.as_mut() {
                            *a = format!("Output {:?} (suppressed in trace)", ch);
                        }
                    } else {
                        output.write_char(ch);
                    }
                }
                Instruction::Input => {
                    if trace {
                        tape.set(idx, 0);
                        if let Some(a) = action.as_mut() {
                            *a = "Read character -> simulated NUL (set cell to 0)".to_string();
                        }
                    } else {
                        let ch = input.next_char().ok_or(RuntimeError::InputExhausted { ip })?;
                        tape.set(idx, ch as i64);
                    }
                }
                Instruction::LoopOpen => match self.loop_entry {
                    // Quirky entry: push unconditionally, never look at the
                    // cell. The body runs at least once.
                    LoopEntry::Quirky => {
                        stack.push(ip);
                        if let Some(a) = action.as_mut() {
                            *a = "Enter loop (entry is unconditional)".to_string();
                        }
                    }
                    LoopEntry::Conventional => {
                        if tape.get(idx) != 0 {
                            stack.push(ip);
                            if let Some(a) = action.as_mut() {
                                *a = "Enter loop (cell != 0)".to_string();
                            }
                        } else {
                            let close = matching_close(program, ip)
                                .ok_or(RuntimeError::UnmatchedLoopOpen { ip })?;
                            if let Some(a) = action.as_mut() {
                                *a = format!("Cell is 0; skip to matching ']' at IP {}", close);
                            }
                            ip = close;
                        }
                    }
                },
                Instruction::LoopClose => {
                    if tape.get(idx) != 0 {
                        // Leave the entry on the stack; the ip += 1 below
                        // re-enters the body without re-pushing.
                        let &open = stack.last().ok_or(RuntimeError::UnmatchedLoopClose { ip })?;
                        if let Some(a) = action.as_mut() {
                            *a = format!("Cell != 0; jump back to '[' at IP {}", open);
                        }
                        ip = open;
                    } else {
                        stack.pop().ok_or(RuntimeError::UnmatchedLoopClose { ip })?;
                        if let Some(a) = action.as_mut() {
                            *a = "Exit loop (cell is 0)".to_string();
                        }
                    }
                }
            }

            if trace {
                println!(
                    "{:<4} | {:<3} | {:<3} | {:<4} |  {}    | {}",
                    step,
                    ip,
                    ptr_before,
                    cell_before,
                    instr,
                    action.unwrap_or_default()
                );
            }

            step += 1;
            ip += 1;
        }

        Ok(tape)
    }
}

/// Forward scan for the `]` matching the `[` at `open_ip`, tracking nesting
/// depth. Used only by conventional loop entry; there is no pre-pass.
fn matching_close(program: &Program, open_ip: usize) -> Option<usize> {
    let mut depth = 0usize;
    for ip in (open_ip + 1)..program.len() {
        match program.get(ip) {
            Some(Instruction::LoopOpen) => depth += 1,
            Some(Instruction::LoopClose) => {
                if depth == 0 {
                    return Some(ip);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

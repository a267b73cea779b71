use std::io::{self, Write};
use crate::{Program, RuntimeError};

/// Pretty-print a structured RuntimeError with caret positioning against
/// the original (unfiltered) source text. If `program_name` is
/// `Some("bft")`, messages are prefixed with "bft: ..." for CLI run mode.
pub fn print_runtime_error(
    program_name: Option<&str>,
    source: &str,
    program: &Program,
    err: &RuntimeError,
) {
    let describe = match err {
        RuntimeError::UnmatchedLoopClose { .. } => "unmatched ']'".to_string(),
        RuntimeError::UnmatchedLoopOpen { .. } => "unmatched '['".to_string(),
        RuntimeError::InputExhausted { .. } => "input exhausted".to_string(),
        RuntimeError::InvalidOutputValue { value, .. } => {
            format!("cell value {value} is not a valid character")
        }
    };

    let msg = match program_name {
        Some(p) => format!("{p}: Runtime error: {describe}"),
        None => format!("Runtime error: {describe}"),
    };

    match program.source_position(err.ip()) {
        Some(pos) => print_error_with_context(&msg, source, pos),
        None => {
            eprintln!("{msg} at instruction {}", err.ip());
            let _ = io::stderr().flush();
        }
    }
}

/// Print a concise error with source offset and a caret context window,
/// working with UTF-8 by slicing using char indices.
pub fn print_error_with_context(prefix: &str, source: &str, pos: usize) {
    eprintln!("{prefix} at source offset {pos}");

    // Show a short window around the position for context
    const WINDOW_CHARS: usize = 32;

    let total_chars = source.chars().count();
    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let end_char = (pos + WINDOW_CHARS + 1).min(total_chars);

    let start_byte = char_to_byte_index(source, start_char);
    let end_byte = char_to_byte_index(source, end_char);
    let slice = &source[start_byte..end_byte];

    eprintln!("  {}", slice);

    // Caret under the exact position
    let caret_offset_chars = pos.saturating_sub(start_char);
    let mut underline = String::new();
    for _ in 0..caret_offset_chars {
        underline.push(' ');
    }
    underline.push('^');
    eprintln!("  {}", underline);
    let _ = io::stderr().flush();
}

/// Convert a char index into a byte index in the given UTF-8 string.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }

    let mut count = 0usize;
    let mut byte_idx = 0usize;

    for ch in s.chars() {
        if count == char_idx {
            break;
        }
        byte_idx += ch.len_utf8();
        count += 1;
    }

    byte_idx
}

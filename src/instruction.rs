use std::fmt;

/// One of the eight commands of the language.
///
/// Instructions carry no payload; a [`crate::Program`] is just an ordered
/// sequence of these. Every other character in source text is a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `+` — add one to the current cell.
    Increment,
    /// `-` — subtract one from the current cell.
    Decrement,
    /// `>` — move the data pointer one cell right.
    MoveRight,
    /// `<` — move the data pointer one cell left.
    MoveLeft,
    /// `[` — push this position onto the jump stack and enter the loop body.
    LoopOpen,
    /// `]` — re-enter the loop body if the current cell is non-zero.
    LoopClose,
    /// `.` — emit the current cell as a character.
    Output,
    /// `,` — read one character into the current cell.
    Input,
}

impl Instruction {
    /// Look up the instruction for a source character.
    ///
    /// Returns `None` for anything outside `><+-.,[]`; callers treat those
    /// characters as comments.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Instruction::Increment),
            '-' => Some(Instruction::Decrement),
            '>' => Some(Instruction::MoveRight),
            '<' => Some(Instruction::MoveLeft),
            '[' => Some(Instruction::LoopOpen),
            ']' => Some(Instruction::LoopClose),
            '.' => Some(Instruction::Output),
            ',' => Some(Instruction::Input),
            _ => None,
        }
    }

    /// The source symbol for this instruction.
    pub fn as_char(self) -> char {
        match self {
            Instruction::Increment => '+',
            Instruction::Decrement => '-',
            Instruction::MoveRight => '>',
            Instruction::MoveLeft => '<',
            Instruction::LoopOpen => '[',
            Instruction::LoopClose => ']',
            Instruction::Output => '.',
            Instruction::Input => ',',
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_symbol_maps_to_an_instruction() {
        let pairs = [
            ('+', Instruction::Increment),
            ('-', Instruction::Decrement),
            ('>', Instruction::MoveRight),
            ('<', Instruction::MoveLeft),
            ('[', Instruction::LoopOpen),
            (']', Instruction::LoopClose),
            ('.', Instruction::Output),
            (',', Instruction::Input),
        ];
        for (ch, instr) in pairs {
            assert_eq!(Instruction::from_char(ch), Some(instr));
            assert_eq!(instr.as_char(), ch);
        }
    }

    #[test]
    fn non_command_characters_have_no_instruction() {
        for ch in ['a', ' ', '\n', '0', '!', '#'] {
            assert_eq!(Instruction::from_char(ch), None);
        }
    }
}

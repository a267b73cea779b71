//! Interactive and pipe-driven REPL sessions.
//!
//! On a TTY the REPL uses a reedline editor: Enter inserts a newline,
//! Ctrl+D (Ctrl+Z on Windows) submits the buffer, and the eight command
//! characters are highlighted with the configured palette. With piped
//! stdin the session falls back to bare mode: lines are collected until
//! EOF and executed once, which keeps the binary usable in pipelines and
//! tests.
//!
//! Because input exhaustion is fatal to the interpreter, `,` cannot read
//! the terminal mid-session; each run draws from the buffer stocked with
//! the `:input` meta command instead (empty by default).

use std::env;
use std::io::{self, BufRead, IsTerminal, Write};
use nu_ansi_term::Style;
use reedline::{DefaultPrompt, DefaultPromptSegment, Highlighter, HistoryItem, Signal, StyledText};
use crate::config::{config, Colors};
use crate::{cli_util, Interpreter, Program, StdoutSink, StrInput, Tape};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplMode {
    Bare,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeFlagOverride {
    None,
    Bare,
    Editor,
}

pub fn select_mode(flag: ModeFlagOverride) -> Result<ReplMode, String> {
    // Flag override
    match flag {
        ModeFlagOverride::Bare => return Ok(ReplMode::Bare),
        ModeFlagOverride::Editor => {
            if !io::stdin().is_terminal() {
                return Err("cannot start editor: stdin is not a TTY (use --bare or BFT_REPL_MODE=bare)".to_string());
            }
            return Ok(ReplMode::Editor);
        }
        ModeFlagOverride::None => {}
    }

    // Environment override
    if let Ok(val) = env::var("BFT_REPL_MODE") {
        let v = val.trim().to_ascii_lowercase();
        return match v.as_str() {
            "bare" => Ok(ReplMode::Bare),
            "editor" => {
                if !io::stdin().is_terminal() {
                    return Err("cannot start editor: stdin is not a TTY (use BFT_REPL_MODE=bare)".to_string());
                }
                Ok(ReplMode::Editor)
            }
            _ => Err(format!("invalid BFT_REPL_MODE value: {val}, must be 'bare' or 'editor'")),
        };
    }

    // Auto-detect
    if io::stdin().is_terminal() {
        Ok(ReplMode::Editor)
    } else {
        Ok(ReplMode::Bare)
    }
}

/// State carried across submissions: the configured interpreter, the
/// `:input` buffer, and the tape of the last successful run.
pub struct ReplSession {
    interpreter: Interpreter,
    input_buffer: String,
    last_tape: Option<Tape>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetaOutcome {
    Continue,
    Exit,
}

impl ReplSession {
    pub fn new(interpreter: Interpreter) -> Self {
        Self {
            interpreter,
            input_buffer: String::new(),
            last_tape: None,
        }
    }

    /// Executes a single program contained in `buffer`.
    /// - Program output goes to stdout.
    /// - Errors are printed concisely to stderr.
    /// - A newline is always written to stdout after execution (success or
    ///   error) so that the prompt begins at column 0 on the next iteration.
    fn execute(&mut self, buffer: &str) {
        let program = Program::parse(buffer);
        let mut input = StrInput::new(&self.input_buffer);
        let mut sink = StdoutSink;
        match self.interpreter.run(&program, &mut input, &mut sink) {
            Ok(tape) => {
                self.last_tape = Some(tape);
            }
            Err(err) => {
                cli_util::print_runtime_error(None, buffer, &program, &err);
                let _ = io::stderr().flush();
            }
        }
        println!();
        let _ = io::stdout().flush();
    }

    /// Handle a `:`-prefixed meta line. Diagnostics go to stderr so program
    /// output on stdout stays clean.
    fn handle_meta(&mut self, line: &str) -> MetaOutcome {
        let body = line.trim_start_matches(':').trim();
        let (word, rest) = match body.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (body, ""),
        };

        match word {
            "exit" | "quit" => return MetaOutcome::Exit,
            "input" => {
                self.input_buffer = rest.to_string();
                eprintln!("input buffer set ({} chars)", self.input_buffer.chars().count());
            }
            "tape" => match &self.last_tape {
                Some(tape) if !tape.is_empty() => {
                    for (index, value) in tape.sorted_cells() {
                        eprintln!("{index}: {value}");
                    }
                }
                Some(_) => eprintln!("tape: empty"),
                None => eprintln!("tape: no run yet"),
            },
            "help" => {
                eprintln!(":help          show this help");
                eprintln!(":input TEXT    stock the ',' input buffer for following runs");
                eprintln!(":tape          show the tape of the last successful run");
                eprintln!(":run           execute the pending buffer now (bare mode)");
                eprintln!(":exit          leave the session");
            }
            other => {
                eprintln!("unknown meta command ':{other}' (try :help)");
            }
        }
        let _ = io::stderr().flush();
        MetaOutcome::Continue
    }
}

/// Keep only command characters
fn commands_only(s: &str) -> String {
    s.chars()
        .filter(|c| matches!(c, '>' | '<' | '+' | '-' | '.' | ',' | '[' | ']'))
        .collect()
}

/// Bare mode: collect program lines until EOF and execute once. Lines
/// starting with `:` are meta commands handled immediately; `:run`
/// executes the pending buffer early and clears it.
pub fn run_bare(mut session: ReplSession) -> io::Result<()> {
    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());
    let mut buffer = String::new();

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(_) => break,
        }

        let trimmed = line.trim();
        if trimmed.starts_with(':') {
            if trimmed == ":run" {
                let filtered = commands_only(&buffer);
                buffer.clear();
                if !filtered.is_empty() {
                    session.execute(&filtered);
                }
            } else if session.handle_meta(trimmed) == MetaOutcome::Exit {
                return Ok(());
            }
            continue;
        }

        buffer.push_str(&line);
    }

    let filtered = commands_only(&buffer);
    if !filtered.is_empty() {
        session.execute(&filtered);
    }
    Ok(())
}

/// Editor mode: reedline-driven loop, one program per submission.
pub fn run_editor(mut session: ReplSession) -> io::Result<()> {
    let mut editor = init_line_editor()?;

    loop {
        let submission = read_submission_interactive(&mut editor)?;
        let Some(submission) = submission else {
            // EOF or editor closed. End the session cleanly to avoid
            // hanging when stdin is closed
            println!();
            io::stdout().flush()?;
            return Ok(());
        };

        let trimmed = submission.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with(':') {
            if session.handle_meta(trimmed) == MetaOutcome::Exit {
                return Ok(());
            }
            continue;
        }

        let filtered = commands_only(trimmed);
        if filtered.is_empty() {
            continue;
        }

        session.execute(&filtered);

        // Test hook: if BFT_REPL_ONCE=1, exit after one execution
        if env::var("BFT_REPL_ONCE").ok().as_deref() == Some("1") {
            return Ok(());
        }
    }
}

fn init_line_editor() -> io::Result<reedline::Reedline> {
    use reedline::{
        default_emacs_keybindings, EditCommand, Emacs, KeyCode, KeyModifiers, Reedline, ReedlineEvent,
    };

    // Start from default emacs-like bindings and adjust:
    // - Enter -> InsertNewline (do not submit)
    // - Ctrl+D -> AcceptLine (submit)
    // - Ctrl+Z -> AcceptLine (submit, for Windows)
    let mut keybindings = default_emacs_keybindings();
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Enter, ReedlineEvent::Edit(vec![EditCommand::InsertNewline]));
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Char('d'), ReedlineEvent::Submit);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Char('z'), ReedlineEvent::Submit);

    // Up/down move within the current multiline buffer, not history.
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Up, ReedlineEvent::Up);
    keybindings.add_binding(KeyModifiers::NONE, KeyCode::Down, ReedlineEvent::Down);

    // Explicit history-mode convenience bindings
    keybindings.add_binding(KeyModifiers::ALT, KeyCode::Up, ReedlineEvent::PreviousHistory);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Up, ReedlineEvent::PreviousHistory);
    keybindings.add_binding(KeyModifiers::ALT, KeyCode::Down, ReedlineEvent::NextHistory);
    keybindings.add_binding(KeyModifiers::CONTROL, KeyCode::Down, ReedlineEvent::NextHistory);

    let history = reedline::FileBackedHistory::new(1_000).unwrap();

    let editor = Reedline::create()
        .with_highlighter(Box::new(SymbolHighlighter::from_colors(&config().colors)))
        .with_history(Box::new(history))
        .with_edit_mode(Box::new(Emacs::new(keybindings)));

    Ok(editor)
}

fn read_submission_interactive(editor: &mut reedline::Reedline) -> io::Result<Option<String>> {
    let prompt = DefaultPrompt::new(DefaultPromptSegment::Basic("bft".to_string()), DefaultPromptSegment::Empty);

    // Render prompt and read until the user submits with Ctrl+D or Ctrl+Z;
    // Enter inserts a newline
    let res = editor.read_line(&prompt);

    match res {
        Ok(Signal::Success(buffer)) => {
            // Add one history item per submitted buffer (program-level)
            if !buffer.trim().is_empty() {
                let _ = editor.history_mut().save(HistoryItem::from_command_line(buffer.clone()));
            }
            Ok(Some(buffer))
        }
        Ok(Signal::CtrlC) => Ok(None), // Global SIGINT, exit immediately
        Ok(Signal::CtrlD) => Ok(None), // EOF, exit cleanly
        Err(e) => {
            eprintln!("repl: editor error: {e}");
            let _ = io::stderr().flush();
            Ok(None)
        }
    }
}

/// Per-symbol styles for the eight commands, and a fallback for comments.
struct SymbolHighlighter {
    map_plus: Style,
    map_minus: Style,
    map_lt: Style,
    map_gt: Style,
    map_dot: Style,
    map_comma: Style,
    map_lbracket: Style,
    map_rbracket: Style,
    map_other: Style,
}

impl SymbolHighlighter {
    fn from_colors(colors: &Colors) -> Self {
        Self {
            map_gt: Style::new().fg(colors.op_right).bold(),
            map_lt: Style::new().fg(colors.op_left).bold(),
            map_plus: Style::new().fg(colors.op_inc).bold(),
            map_minus: Style::new().fg(colors.op_dec).bold(),
            map_dot: Style::new().fg(colors.op_output).bold(),
            map_comma: Style::new().fg(colors.op_input).bold(),
            map_lbracket: Style::new().fg(colors.op_bracket).bold(),
            map_rbracket: Style::new().fg(colors.op_bracket).bold(),
            map_other: Style::new().fg(colors.non_command).bold(),
        }
    }

    #[inline]
    fn style_for(&self, ch: char) -> Style {
        match ch {
            '>' => self.map_gt,
            '<' => self.map_lt,
            '+' => self.map_plus,
            '-' => self.map_minus,
            '.' => self.map_dot,
            ',' => self.map_comma,
            '[' => self.map_lbracket,
            ']' => self.map_rbracket,
            _ => self.map_other,
        }
    }
}

impl Highlighter for SymbolHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut out: StyledText = StyledText::new();
        let mut current_style: Option<Style> = None;
        let mut buffer = String::new();

        for ch in line.chars() {
            let style = self.style_for(ch);

            match current_style {
                None => {
                    current_style = Some(style);
                    buffer.push(ch);
                }
                Some(s) if s == style => {
                    buffer.push(ch);
                }
                Some(s) => {
                    out.push((s, std::mem::take(&mut buffer)));
                    current_style = Some(style);
                    buffer.push(ch);
                }
            }
        }

        if let Some(s) = current_style {
            if !buffer.is_empty() {
                out.push((s, buffer));
            }
        }
        out
    }
}

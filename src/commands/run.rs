use clap::Args;
use std::{fs, thread};
use std::io::{self, Write};
use std::sync::mpsc;
use std::time::Duration;
use crate::cli_util::print_runtime_error;
use crate::config::{config, parse_loop_entry};
use crate::io::{EmptyInput, StdinInput, StdoutSink};
use crate::{Interpreter, Program, RuntimeError, Tape};

#[derive(Args, Debug, Default)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Print a step-by-step table of operations instead of executing
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Read code from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file")]
    pub file: Option<String>,

    /// Print the materialized tape cells after a successful run
    #[arg(long = "dump-tape")]
    pub dump_tape: bool,

    /// Wall-clock timeout in milliseconds (fallback BFT_TIMEOUT_MS; default 2_000)
    #[arg(long = "timeout", value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Loop entry mode: quirky (default) or conventional
    #[arg(long = "loop-entry", value_name = "MODE")]
    pub loop_entry: Option<String>,

    /// Concatenated code parts ('-' is a command, so hyphen values are allowed)
    #[arg(value_name = "code", trailing_var_arg = true, allow_hyphen_values = true)]
    pub code: Vec<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program_name: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program_name, 0);
    }

    let RunArgs {
        debug,
        file,
        dump_tape,
        timeout_ms,
        loop_entry,
        code,
        ..
    } = args;

    if file.is_none() && code.is_empty() {
        usage_and_exit(program_name, 2);
    }

    if file.is_some() && !code.is_empty() {
        eprintln!("{program_name}: cannot use positional code together with --file");
        usage_and_exit(program_name, 2);
    }

    let source = if let Some(path) = file {
        match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{program_name}: failed to read code file as UTF-8: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
        }
    } else {
        code.join("")
    };

    // Resolve limits and modes: flags -> env -> config file -> defaults
    let loop_entry = match loop_entry {
        Some(value) => match parse_loop_entry(&value) {
            Some(mode) => mode,
            None => {
                eprintln!("{program_name}: invalid --loop-entry value: {value}, must be 'quirky' or 'conventional'");
                usage_and_exit(program_name, 2);
            }
        },
        None => config().loop_entry,
    };
    let timeout_ms = timeout_ms
        .or_else(|| std::env::var("BFT_TIMEOUT_MS").ok().and_then(|s| s.parse::<u64>().ok()))
        .or(config().timeout_ms)
        .unwrap_or(2_000);

    let program = Program::parse(&source);

    // Execute on a worker thread; the engine has no watchdog of its own,
    // so bounded execution means abandoning the run from outside.
    let (tx, rx) = mpsc::channel::<Result<Tape, RuntimeError>>();
    let worker_program = program.clone();

    thread::spawn(move || {
        let interpreter = Interpreter::with_loop_entry(loop_entry);
        let res = if debug {
            // Trace mode never touches real I/O
            interpreter.trace(&worker_program, &mut EmptyInput, &mut StdoutSink)
        } else {
            interpreter.run(&worker_program, &mut StdinInput::new(), &mut StdoutSink)
        };
        let _ = tx.send(res);
    });

    let timeout = Duration::from_millis(timeout_ms);
    let exit_code = match rx.recv_timeout(timeout) {
        Ok(Ok(tape)) => {
            if dump_tape {
                println!();
                for (index, value) in tape.sorted_cells() {
                    println!("{index}: {value}");
                }
            }
            0
        }
        Ok(Err(err)) => {
            print_runtime_error(Some(program_name), &source, &program, &err);
            let _ = io::stderr().flush();
            1
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            eprintln!("Execution aborted: wall-clock timeout exceeded ({timeout_ms} ms)");
            let _ = io::stderr().flush();
            1
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => 1,
    };

    println!();
    let _ = io::stdout().flush();
    exit_code
}

fn usage_and_exit(program_name: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run [--debug|-d] "<code>"
  {0} run [--debug|-d] --file <PATH>

Options:
  --file,  -f <PATH>   Read code from PATH instead of positional "<code>"
  --debug, -d          Print a step-by-step table of operations instead of executing
  --dump-tape          Print the materialized tape cells after a successful run
  --timeout <MS>       Wall-clock timeout in milliseconds (fallback BFT_TIMEOUT_MS; default 2_000)
  --loop-entry <MODE>  'quirky' (default): '[' always enters the loop body; 'conventional': '[' skips on a 0 cell
  --help,  -h          Show this help

Notes:
- The tape is sparse and unbounded in both directions; cells hold signed 64-bit values.
- Input (`,`) reads a single byte from stdin; exhausted input is a runtime error.
- Characters outside ><+-.,[] are comments and are ignored.

Examples:
- Load code from a file:
    {0} run --file ./program.bf
- Read bytes from a file as stdin (`,` will consume file input):
    {0} run ",." < input.txt
"#,
        program_name
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

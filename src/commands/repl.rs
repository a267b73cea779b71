use clap::Args;
use std::io::{self, Write};
use crate::config::config;
use crate::repl::{self, ModeFlagOverride, ReplMode, ReplSession};
use crate::Interpreter;

#[derive(Args, Debug, Default)]
#[command(disable_help_flag = true)]
pub struct ReplArgs {
    /// Force bare mode (read stdin to EOF, execute once)
    #[arg(long = "bare")]
    pub bare: bool,

    /// Force the interactive editor (requires a TTY)
    #[arg(long = "editor")]
    pub editor: bool,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program_name: &str, args: ReplArgs) -> i32 {
    if args.help {
        usage_and_exit(program_name, 0);
    }

    if args.bare && args.editor {
        eprintln!("{program_name}: --bare and --editor are mutually exclusive");
        usage_and_exit(program_name, 2);
    }

    let flag = if args.bare {
        ModeFlagOverride::Bare
    } else if args.editor {
        ModeFlagOverride::Editor
    } else {
        ModeFlagOverride::None
    };

    let mode = match repl::select_mode(flag) {
        Ok(mode) => mode,
        Err(msg) => {
            eprintln!("{program_name}: {msg}");
            let _ = io::stderr().flush();
            return 1;
        }
    };

    // Install SIGINT (ctrl+c) handler to flush and exit(0) immediately
    if let Err(e) = ctrlc::set_handler(|| {
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();
        std::process::exit(0);
    }) {
        eprintln!("{program_name}: failed to set ctrl+c handler: {e}");
        let _ = io::stderr().flush();
        return 1;
    }

    let session = ReplSession::new(Interpreter::with_loop_entry(config().loop_entry));

    let result = match mode {
        ReplMode::Bare => repl::run_bare(session),
        ReplMode::Editor => {
            println!("bft REPL");
            println!("Ctrl+d/Ctrl+z Enter (Windows) executes the current buffer. Press ctrl+c to exit");
            repl::run_editor(session)
        }
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{program_name}: repl error: {e}");
            let _ = io::stderr().flush();
            1
        }
    }
}

fn usage_and_exit(program_name: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} repl [--bare|--editor]   # Start a REPL (read-eval-print loop)

Options:
  --bare      Read stdin to EOF and execute once (pipeline-friendly)
  --editor    Force the interactive editor (requires a TTY)
  --help, -h  Show this help

Description:
  Starts a REPL where you can enter code and execute it live.

Notes:
    - Ctrl+d executes the current buffer on *nix/macOS.
    - Ctrl+z and Enter will execute the current buffer on Windows.
    - Ctrl+c exits the REPL immediately.
    - Each execution starts with a fresh tape and pointer.
    - ',' reads from the buffer set with ':input TEXT'; exhausted input is a runtime error.
    - Meta commands: :help, :input, :tape, :run, :exit.
    - The REPL will exit after a single execution if the environment variable `BFT_REPL_ONCE` is set to `1`.
"#,
        program_name
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

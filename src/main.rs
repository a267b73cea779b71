use bf_tape::commands;
use clap::{Parser, Subcommand};
use std::env;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(name = "bft", disable_help_flag = true, disable_help_subcommand = true)]
struct Cli {
    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Run(commands::run::RunArgs),
    Repl(commands::repl::ReplArgs),
}

fn print_top_usage_and_exit(program_name: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run  [--debug|-d] "<code>"      # Run code (args are concatenated)
  {0} run  [--debug|-d] --file <PATH> # Run code loaded from file
  {0} repl [--bare|--editor]          # Start a REPL (read-eval-print loop)

With no subcommand, {0} starts the REPL; piped stdin is executed once.

Run "{0} <subcommand> --help" for more info.
"#,
        program_name
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

fn main() {
    // We still pull the program name for help rendering consistency
    let program_name = env::args().next().unwrap_or_else(|| String::from("bft"));

    let cli = Cli::parse();

    if cli.help {
        print_top_usage_and_exit(&program_name, 0);
    }

    let code = match cli.command {
        Some(Command::Run(args)) => commands::run::run(&program_name, args),
        Some(Command::Repl(args)) => commands::repl::run(&program_name, args),
        // No subcommand: drop into the REPL so piped stdin executes once
        None => commands::repl::run(&program_name, commands::repl::ReplArgs::default()),
    };

    std::process::exit(code);
}

mod debug_report;

use sdpform::{Grammar, NumericPolicy, Options, Value, decode_verbose_with, decode_with, encode_with};
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SDPFORM_LOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_logging(config.verbose);

    if let Err(err) = run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> Result<(), String> {
    let grammar = Grammar::sdp();
    let opts = Options { numeric: config.numeric };

    match config.mode {
        Mode::Decode => {
            let tree = decode_with(&config.input, grammar, &opts);
            let json = serde_json::to_string_pretty(&tree).map_err(|err| err.to_string())?;
            println!("{json}");
        }
        Mode::Encode => {
            let tree: Value = serde_json::from_str(&config.input).map_err(|err| format!("invalid JSON input: {err}"))?;
            let text = encode_with(&tree, grammar).map_err(|err| err.to_string())?;
            print!("{text}");
        }
        Mode::Report => {
            let res = decode_verbose_with(&config.input, grammar, &opts);
            debug_report::print_run(&config.input, &res, config.color);
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Decode,
    Encode,
    Report,
}

struct CliConfig {
    input: String,
    mode: Mode,
    numeric: NumericPolicy,
    color: bool,
    verbose: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut mode = Mode::Decode;
    let mut numeric = NumericPolicy::Lenient;
    let mut color = io::stdout().is_terminal();
    let mut verbose = false;
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("sdpform {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "-d" | "--decode" => mode = Mode::Decode,
            "-e" | "--encode" => mode = Mode::Encode,
            "-r" | "--report" => mode = Mode::Report,
            "--strict" => numeric = NumericPolicy::Strict,
            "--color" => color = true,
            "--no-color" => color = false,
            "-v" | "--verbose" => verbose = true,
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_input(&mut input, value)?;
            }
            "--file" | "-f" => {
                let path = args.next().ok_or_else(|| "error: --file expects a path".to_string())?;
                set_input(&mut input, read_file_input(&path)?)?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                set_input(&mut input, value.to_string())?;
            }
            _ if arg.starts_with("--file=") => {
                let path = arg.trim_start_matches("--file=");
                set_input(&mut input, read_file_input(path)?)?;
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, mode, numeric, color, verbose })
}

fn set_input(slot: &mut Option<String>, value: String) -> Result<(), String> {
    if slot.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *slot = Some(value);
    Ok(())
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn read_file_input(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|err| format!("error: failed to read '{path}': {err}"))
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "sdpform {version}

Session description (SDP) to JSON transcoder.

Usage:
  sdpform [OPTIONS] [--] <input...>
  sdpform [OPTIONS] --input <text>
  sdpform [OPTIONS] --file <path>

Input is read from the remaining args, --input, --file, or stdin when none
are given.

Modes:
  -d, --decode               SDP text to pretty-printed JSON (default).
  -e, --encode               JSON session tree to SDP text.
  -r, --report               Decode and print which rule claimed each line
                             and which lines were dropped.

Options:
  -i, --input <text>         Input text.
  -f, --file <path>          Read input from a file.
  --strict                   Drop lines whose numeric fields are not numbers
                             instead of reading them as 0.
  --color                    Force ANSI color output (report mode).
  --no-color                 Disable ANSI color output.
  -v, --verbose              Log debug details to stderr.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}                Log filter (tracing EnvFilter syntax). Overrides
                             --verbose. Default: warn

Exit codes:
  0  Success.
  1  Runtime error (invalid JSON, non-object session tree).
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV
    )
}

//! The read loop: prompt, read a line, route it, print the answer.

use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error};

use crate::config::{write_usage, ReplConfig};
use crate::logging::init_logging;
use crate::repl::router::{Router, RouterResult};

const BANNER_RULE: &str = "═══════════════════════════════════════════════════════";
pub const FAREWELL: &str = "Goodbye!";

/// Run the shell over `input`, writing answers to `out` and diagnostics to
/// `err`. Returns the process exit code: 0 on `:quit` or end of input, 2 on
/// a bad command line, 1 if the output stream itself fails.
pub fn run<I, R, W, E>(args: I, input: &mut R, out: &mut W, err: &mut E) -> i32
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
{
    let config = match ReplConfig::from_env_and_args(args) {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(err, "error: {e}");
            let _ = write_usage(err);
            return 2;
        }
    };

    if config.show_help {
        return exit_code(write_usage(out));
    }
    if config.show_version {
        return exit_code(writeln!(out, "mpdb {}", env!("CARGO_PKG_VERSION")));
    }

    init_logging(config.verbose);
    let mut router = Router::new();

    if let Some(line) = config.command.as_deref() {
        return exit_code(run_one(&mut router, line, out));
    }

    exit_code(run_loop(&mut router, &config.prompt, input, out, err))
}

fn exit_code(result: io::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %e, "output failed");
            1
        }
    }
}

fn run_one<W: Write>(router: &mut Router, line: &str, out: &mut W) -> io::Result<()> {
    match router.route(line.trim()) {
        RouterResult::Text(text) => writeln!(out, "{text}"),
        RouterResult::Exit | RouterResult::Continue => Ok(()),
    }
}

pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{BANNER_RULE}")?;
    writeln!(out, "  mp-db SQL shell v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "  Type ':help' or ':h' for available commands")?;
    writeln!(out, "  Type ':quit', ':exit' or ':q' to quit")?;
    writeln!(out, "{BANNER_RULE}")?;
    writeln!(out)
}

fn run_loop<R, W, E>(
    router: &mut Router,
    prompt: &str,
    input: &mut R,
    out: &mut W,
    err: &mut E,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    write_banner(out)?;
    let mut line = String::new();

    loop {
        write!(out, "{prompt}")?;
        out.flush()?;

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                // EOF: finish the prompt line before saying goodbye.
                writeln!(out)?;
                break;
            }
            Ok(_) => {}
            Err(e) => {
                writeln!(err, "error: {e}")?;
                // Undecodable input is reported and skipped; the prompt comes back.
                if e.kind() == io::ErrorKind::InvalidData {
                    continue;
                }
                break;
            }
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let routed = panic::catch_unwind(AssertUnwindSafe(|| router.route(trimmed)));
        let Ok(result) = routed else {
            error!(line = trimmed, "router panicked");
            writeln!(err, "internal error while handling input; the session continues")?;
            continue;
        };
        match result {
            RouterResult::Exit => break,
            RouterResult::Continue => {}
            RouterResult::Text(text) => {
                writeln!(out, "{text}")?;
                writeln!(out)?;
            }
        }
    }

    debug!("read loop finished");
    writeln!(out, "{FAREWELL}")
}

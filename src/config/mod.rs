//! Shell configuration resolved from defaults, the environment, then flags.

use std::ffi::OsString;
use std::io::{self, Write};

use crate::error::{MpdbError, Result};

pub const DEFAULT_PROMPT: &str = "mp-db> ";
pub const PROMPT_ENV_VAR: &str = "MPDB_PROMPT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplConfig {
    pub prompt: String,
    /// Route this one line, print the answer and exit.
    pub command: Option<String>,
    pub verbose: bool,
    pub show_help: bool,
    pub show_version: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            prompt: DEFAULT_PROMPT.to_string(),
            command: None,
            verbose: false,
            show_help: false,
            show_version: false,
        }
    }
}

impl ReplConfig {
    /// Resolve from the process environment and `args` (argv[0] first).
    pub fn from_env_and_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        parse_args(args, |key| std::env::var(key).ok())
    }
}

/// Build a [`ReplConfig`]. `env` looks up environment variables so callers
/// (and tests) decide where they come from. Flags override the environment.
pub fn parse_args<I, F>(args: I, env: F) -> Result<ReplConfig>
where
    I: IntoIterator<Item = OsString>,
    F: Fn(&str) -> Option<String>,
{
    let mut config = ReplConfig::default();
    if let Some(prompt) = env(PROMPT_ENV_VAR) {
        config.prompt = prompt;
    }

    let mut iter = args.into_iter();
    let _argv0 = iter.next();

    while let Some(argument) = iter.next() {
        let arg = argument.to_string_lossy();
        let arg_str = arg.as_ref();

        match arg_str {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-v" | "--verbose" => config.verbose = true,
            "-c" | "--command" => {
                let next = iter.next().ok_or_else(|| missing_value("-c/--command"))?;
                set_command(&mut config, next.to_string_lossy().into_owned())?;
            }
            "--prompt" => {
                let next = iter.next().ok_or_else(|| missing_value("--prompt"))?;
                config.prompt = next.to_string_lossy().into_owned();
            }
            _ => {
                if let Some(value) = arg_str.strip_prefix("--prompt=") {
                    config.prompt = value.to_owned();
                } else if let Some(value) = arg_str.strip_prefix("--command=") {
                    set_command(&mut config, value.to_owned())?;
                } else if arg_str.starts_with('-') {
                    return Err(MpdbError::Config(format!("unknown option `{arg_str}`")));
                } else {
                    return Err(MpdbError::Config(format!(
                        "unexpected argument `{arg_str}`"
                    )));
                }
            }
        }
    }

    Ok(config)
}

fn set_command(config: &mut ReplConfig, line: String) -> Result<()> {
    if config.command.is_some() {
        return Err(MpdbError::Config(
            "`-c/--command` may only be provided once".to_string(),
        ));
    }
    config.command = Some(line);
    Ok(())
}

fn missing_value(flag: &str) -> MpdbError {
    MpdbError::Config(format!("missing value for `{flag}`"))
}

pub fn write_usage<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "Usage: mpdb [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 -c, --command <LINE>  Route one line (SQL or :command), print the answer and exit\n\
         \x20     --prompt <P>      Prompt string (default \"{DEFAULT_PROMPT}\", env {PROMPT_ENV_VAR})\n\
         \x20 -v, --verbose         Debug logging on stderr (RUST_LOG overrides)\n\
         \x20 -h, --help            Print this help\n\
         \x20 -V, --version         Print version"
    )
}

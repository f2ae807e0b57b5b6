//! The colon-command table.

/// A recognised meta-command. Aliases resolve to the same variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColonCommand {
    DebugAst,
    Quit,
    Help,
    Status,
}

impl ColonCommand {
    /// Look up a command by its (already case-folded) name or alias.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "debug-ast" => Some(ColonCommand::DebugAst),
            "quit" | "exit" | "q" => Some(ColonCommand::Quit),
            "help" | "h" | "?" => Some(ColonCommand::Help),
            "status" => Some(ColonCommand::Status),
            _ => None,
        }
    }
}

/// A colon-command line split into its case-folded name and argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub arg: Option<String>,
}

impl Invocation {
    /// Split the text after the leading `:` on its first run of whitespace.
    pub fn parse(body: &str) -> Self {
        let body = body.trim();
        let (name, arg) = match body.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, Some(rest.trim())),
            None => (body, None),
        };
        Invocation {
            name: name.to_lowercase(),
            arg: arg.filter(|a| !a.is_empty()).map(str::to_lowercase),
        }
    }
}

pub const HELP_TEXT: &str = "\
Colon-prefixed commands:
  :quit, :exit, :q     - Exit the application
  :help, :h, :?        - Show this help message
  :status              - Show system status (debug modes)
  :debug-ast [on|off]  - Enable/disable AST debug output

SQL Support (parsing & validation only):
  SELECT ...           - Parse SELECT queries
  INSERT ...           - Parse INSERT queries
  UPDATE ...           - Parse UPDATE queries
  DELETE FROM ...      - Parse DELETE queries
  CREATE TABLE ...     - Parse CREATE TABLE statements

Note: statements are parsed and validated only.
      Execution is not yet implemented.";

pub const DEBUG_AST_USAGE: &str = ":debug-ast [on|off]";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_same_command() {
        for name in ["quit", "exit", "q"] {
            assert_eq!(ColonCommand::from_name(name), Some(ColonCommand::Quit));
        }
        for name in ["help", "h", "?"] {
            assert_eq!(ColonCommand::from_name(name), Some(ColonCommand::Help));
        }
        assert_eq!(ColonCommand::from_name("wat"), None);
    }

    #[test]
    fn invocation_splits_on_first_whitespace_run() {
        let inv = Invocation::parse("Debug-AST   OFF ");
        assert_eq!(inv.name, "debug-ast");
        assert_eq!(inv.arg.as_deref(), Some("off"));

        let inv = Invocation::parse("status");
        assert_eq!(inv.name, "status");
        assert_eq!(inv.arg, None);
    }

    #[test]
    fn invocation_keeps_rest_of_line_as_argument() {
        let inv = Invocation::parse("debug-ast on please");
        assert_eq!(inv.arg.as_deref(), Some("on please"));
    }

    #[test]
    fn bare_colon_has_empty_name() {
        let inv = Invocation::parse("");
        assert_eq!(inv.name, "");
        assert_eq!(inv.arg, None);
    }
}

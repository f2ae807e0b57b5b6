//! Command Router: the single boundary between the read loop and the core.
//!
//! A line starting with `:` is a meta-command; anything else is SQL and goes
//! through [`parse_and_validate`] untouched. Rendering is a pure function of
//! the [`ParseResult`] and a [`SessionState`] value.

use tracing::debug;

use crate::error::CommandError;
use crate::repl::command::{ColonCommand, Invocation, DEBUG_AST_USAGE, HELP_TEXT};
use crate::repl::session::SessionState;
use crate::sql::{parse_and_validate, ParseResult};

pub const EXECUTION_NOTE: &str = "⚠️  Note: Query execution is not yet implemented.";

/// What the read loop should do with a routed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterResult {
    /// Print the farewell and stop reading.
    Exit,
    /// Print the text and prompt again.
    Text(String),
    /// Nothing to print.
    Continue,
}

#[derive(Debug, Default)]
pub struct Router {
    state: SessionState,
}

impl Router {
    pub fn new() -> Self {
        Router::default()
    }

    pub fn with_state(state: SessionState) -> Self {
        Router { state }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn route(&mut self, line: &str) -> RouterResult {
        if line.trim().is_empty() {
            return RouterResult::Continue;
        }
        if let Some(body) = line.trim_start().strip_prefix(':') {
            return self.dispatch(Invocation::parse(body));
        }
        let result = parse_and_validate(line);
        RouterResult::Text(render_sql_response(&result, self.state))
    }

    fn dispatch(&mut self, inv: Invocation) -> RouterResult {
        debug!(command = %inv.name, arg = ?inv.arg, "meta-command");
        let Some(command) = ColonCommand::from_name(&inv.name) else {
            return RouterResult::Text(CommandError::UnknownCommand(inv.name).to_string());
        };
        match command {
            ColonCommand::Quit => RouterResult::Exit,
            ColonCommand::Help => RouterResult::Text(HELP_TEXT.to_string()),
            ColonCommand::Status => RouterResult::Text(self.status()),
            ColonCommand::DebugAst => match self.debug_ast(inv.arg.as_deref()) {
                Ok(text) => RouterResult::Text(text),
                Err(err) => RouterResult::Text(err.to_string()),
            },
        }
    }

    fn debug_ast(&mut self, arg: Option<&str>) -> Result<String, CommandError> {
        match arg {
            None => Ok(format!(
                "Debug AST mode is currently: {}\nUsage: {DEBUG_AST_USAGE}",
                self.state.debug_ast_label()
            )),
            Some("on") => {
                self.state.debug_ast_shown = true;
                Ok("✅ Debug AST mode enabled. AST will be shown for all queries.".to_string())
            }
            Some("off") => {
                self.state.debug_ast_shown = false;
                Ok("✅ Debug AST mode disabled.".to_string())
            }
            Some(other) => Err(CommandError::InvalidArgument {
                command: "debug-ast".to_string(),
                arg: other.to_string(),
                usage: DEBUG_AST_USAGE,
            }),
        }
    }

    fn status(&self) -> String {
        format!(
            "=== System Status ===\nDebug AST mode: {}\n",
            self.state.debug_ast_label()
        )
    }
}

/// Render the shell's answer for one parsed line. Validity is always shown;
/// the session flag only controls whether the tree is included.
pub fn render_sql_response(result: &ParseResult, state: SessionState) -> String {
    let Some(ast) = result.ast() else {
        let message = result.error_message().unwrap_or_default();
        return format!("❌ SQL Parse Error:\n{message}");
    };
    let kind = ast.kind();
    if state.debug_ast_shown {
        let tree = result.ast_string();
        debug!(kind = %kind, ast = %tree, "AST");
        format!("✅ Valid SQL\nQuery Type: {kind}\n\nAST:\n{tree}\n\n{EXECUTION_NOTE}")
    } else {
        format!("✅ Valid SQL ({kind})\n\n{EXECUTION_NOTE}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(result: RouterResult) -> String {
        match result {
            RouterResult::Text(text) => text,
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn quit_aliases_exit() {
        let mut router = Router::new();
        for line in [":quit", ":exit", ":q", ":QUIT", "  :q  "] {
            assert_eq!(router.route(line), RouterResult::Exit, "{line}");
        }
    }

    #[test]
    fn blank_line_continues() {
        let mut router = Router::new();
        assert_eq!(router.route(""), RouterResult::Continue);
        assert_eq!(router.route("   \t"), RouterResult::Continue);
    }

    #[test]
    fn debug_ast_toggle_reports_state() {
        let mut router = Router::new();
        assert!(text(router.route(":debug-ast")).contains("ON"));
        assert_eq!(
            text(router.route(":debug-ast off")),
            "✅ Debug AST mode disabled."
        );
        assert!(!router.state().debug_ast_shown);
        let report = text(router.route(":debug-ast"));
        assert!(report.contains("OFF"));
        assert!(report.contains("Usage: :debug-ast [on|off]"));

        text(router.route(":DEBUG-AST ON"));
        assert!(router.state().debug_ast_shown);
    }

    #[test]
    fn bad_debug_ast_argument_leaves_state_alone() {
        let mut router = Router::new();
        let reply = text(router.route(":debug-ast maybe"));
        assert!(reply.contains("Usage: :debug-ast [on|off]"));
        assert!(reply.contains("maybe"));
        assert!(router.state().debug_ast_shown);
    }

    #[test]
    fn unknown_command_gives_guidance() {
        let mut router = Router::new();
        let reply = text(router.route(":frobnicate now"));
        assert!(reply.starts_with("Unknown command: :frobnicate"));
        assert!(reply.contains(":help"));
    }

    #[test]
    fn help_and_status() {
        let mut router = Router::new();
        for line in [":help", ":h", ":?"] {
            let reply = text(router.route(line));
            assert!(reply.contains(":debug-ast [on|off]"));
            assert!(reply.contains("CREATE TABLE"));
        }
        assert_eq!(
            text(router.route(":status")),
            "=== System Status ===\nDebug AST mode: ON\n"
        );
    }

    #[test]
    fn valid_sql_with_tree() {
        let mut router = Router::new();
        let reply = text(router.route("SELECT * FROM users"));
        assert!(reply.starts_with("✅ Valid SQL\nQuery Type: SELECT\n\nAST:\nSelect\n"));
        assert!(reply.ends_with(EXECUTION_NOTE));
    }

    #[test]
    fn valid_sql_without_tree_still_reports_validity() {
        let mut router = Router::with_state(SessionState {
            debug_ast_shown: false,
        });
        assert_eq!(
            text(router.route("delete from t")),
            format!("✅ Valid SQL (DELETE)\n\n{EXECUTION_NOTE}")
        );
    }

    #[test]
    fn invalid_sql_reports_position() {
        let mut router = Router::new();
        let reply = text(router.route("SELECT * FORM users"));
        assert!(reply.starts_with("❌ SQL Parse Error:\nSyntax error at line 1, column 10"));
    }

    #[test]
    fn failed_parse_does_not_touch_state() {
        let mut router = Router::with_state(SessionState {
            debug_ast_shown: false,
        });
        router.route("SELECT FROM");
        assert!(!router.state().debug_ast_shown);
    }
}

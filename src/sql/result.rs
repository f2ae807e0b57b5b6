//! The outcome of parsing one line of SQL.

use tracing::debug;

use crate::error::SyntaxError;
use crate::sql::ast::Statement;
use crate::sql::format::format_ast;
use crate::sql::parser::Parser;

const NOT_AVAILABLE: &str = "N/A";

/// Immutable pairing of the original SQL with either its tree or the error
/// that stopped the parse. Exactly one of [`ast`](Self::ast) and
/// [`error`](Self::error) is present.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    outcome: Result<Statement, SyntaxError>,
    original_sql: String,
}

impl ParseResult {
    pub fn is_valid(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn ast(&self) -> Option<&Statement> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&SyntaxError> {
        self.outcome.as_ref().err()
    }

    pub fn original_sql(&self) -> &str {
        &self.original_sql
    }

    /// The formatted error, e.g. `Syntax error at line 1, column 10: ...`.
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    /// `SELECT`, `INSERT`, `UPDATE`, `DELETE` or `CREATE`; `N/A` without a tree.
    pub fn sql_kind(&self) -> &'static str {
        self.ast().map_or(NOT_AVAILABLE, |stmt| stmt.kind().as_str())
    }

    /// The rendered tree, or `N/A` without one.
    pub fn ast_string(&self) -> String {
        self.ast()
            .map_or_else(|| NOT_AVAILABLE.to_string(), format_ast)
    }

    pub fn into_outcome(self) -> Result<Statement, SyntaxError> {
        self.outcome
    }
}

/// Parse `sql` and capture the outcome. Never panics and never fails.
pub fn parse_and_validate(sql: &str) -> ParseResult {
    let outcome = Parser::parse(sql);
    match &outcome {
        Ok(stmt) => debug!(kind = %stmt.kind(), "parsed statement"),
        Err(err) => debug!(line = err.line, column = err.column, error = %err.message, "parse failed"),
    }
    ParseResult {
        outcome,
        original_sql: sql.to_string(),
    }
}

/// Statement family of an optional tree, `N/A` when absent.
pub fn sql_kind(ast: Option<&Statement>) -> &'static str {
    ast.map_or(NOT_AVAILABLE, |stmt| stmt.kind().as_str())
}

//! # mp-db
//!
//! An interactive SQL shell that parses and validates statements without
//! executing them. Each line is either a colon-prefixed meta-command or a
//! SQL statement; SQL is tokenized, parsed by a hand-written
//! recursive-descent parser, and answered with either the statement's tree
//! or a positioned syntax error.
//!
//! ```
//! use mpdb::{parse_and_validate, Router, RouterResult};
//!
//! let result = parse_and_validate("SELECT * FROM users");
//! assert!(result.is_valid());
//! assert_eq!(result.sql_kind(), "SELECT");
//!
//! let mut router = Router::new();
//! assert_eq!(router.route(":quit"), RouterResult::Exit);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod repl;
pub mod sql;

pub use config::ReplConfig;
pub use error::{CommandError, MpdbError, Result, SyntaxError};
pub use repl::{render_sql_response, run, Router, RouterResult, SessionState};
pub use sql::{format_ast, parse_and_validate, tokenize, ParseResult, Statement};

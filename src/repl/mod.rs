//! The interactive shell's core: colon-command table, session settings and
//! the router that ties them to the SQL front-end, and the read loop
//! that drives it.

pub mod command;
pub mod router;
pub mod session;
pub mod shell;

pub use command::{ColonCommand, Invocation, HELP_TEXT};
pub use router::{render_sql_response, Router, RouterResult, EXECUTION_NOTE};
pub use session::SessionState;
pub use shell::{run, FAREWELL};

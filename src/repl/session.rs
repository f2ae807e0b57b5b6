//! Per-shell mutable settings.

/// Settings toggled by meta-commands. Owned by the [`super::Router`] and
/// passed by value into rendering, so formatting never reads global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    /// Whether valid SQL responses include the rendered tree.
    pub debug_ast_shown: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState {
            debug_ast_shown: true,
        }
    }
}

impl SessionState {
    pub fn debug_ast_label(&self) -> &'static str {
        if self.debug_ast_shown {
            "ON"
        } else {
            "OFF"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_ast_defaults_to_on() {
        let state = SessionState::default();
        assert!(state.debug_ast_shown);
        assert_eq!(state.debug_ast_label(), "ON");
    }
}

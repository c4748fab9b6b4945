//! Analysis session lifecycle state

use serde::{Deserialize, Serialize};

/// Lifecycle state of the analysis session.
///
/// ```text
/// Idle   --begin_analysis ok-->  Active
/// Active --begin_analysis ok-->  Active   (previous session replaced)
/// *      --begin_analysis err--> Idle
/// Active --ask_follow_up-->      Active   (success or failure)
/// *      --reset-->              Idle
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No live session; follow-ups are rejected
    #[default]
    Idle,
    /// Exactly one session is live and bound to one diagram
    Active,
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::Active => write!(f, "active"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(SessionState::default(), SessionState::Idle);
        assert!(!SessionState::Idle.is_active());
        assert!(SessionState::Active.is_active());
    }
}

//! Shared helpers for progression integration tests

#![allow(dead_code)]

use creatorxp::{EventSource, ProgressSession, ProgressionEngine};

/// Session over the built-in catalog for a fresh user
pub fn fresh_session(user_id: &str) -> ProgressSession {
    ProgressSession::new(ProgressionEngine::builtin(), user_id)
}

/// Tag that matches no unlock rule
pub fn untracked() -> EventSource {
    EventSource::Other("untracked".to_string())
}

/// Keep applying zero-XP awards until the level stops moving
pub fn settle_levels(session: &mut ProgressSession) {
    while session.apply_award(0, &untracked()).leveled_up {}
}

//! The practice-session lifecycle state machine.

use crate::error::{DojoError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Where a practice session is in its lifecycle.
///
/// Transitions: `NoSession -> Active -> {Expired, Ended}`. Expiry and end
/// both set `finished`, which permanently blocks a restart for this
/// browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No practice session has been started yet.
    NoSession,
    /// A timed session is running.
    Active,
    /// The session ran past its configured duration.
    Expired,
    /// The session was ended explicitly.
    Ended,
}

/// Result of an activity check, distinguishing the check that caused the
/// lazy expiry transition from later checks on an already-dead session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// The session is running and within its time budget.
    Active,
    /// This check observed the timeout and transitioned the session.
    JustExpired,
    /// The session was already inactive before this check.
    Inactive,
}

/// Lifecycle flags of one practice session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Current lifecycle phase.
    pub phase: SessionPhase,
    /// When the session became active, if it ever did.
    pub started_at: Option<DateTime<Utc>>,
    /// Once true, no new session may start for this browser session.
    pub finished: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::NoSession,
            started_at: None,
            finished: false,
        }
    }
}

impl SessionState {
    /// Creates the initial `NoSession` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activates a session at `now`.
    ///
    /// Restarting while a session is still `Active` is allowed and simply
    /// resets the clock; the caller discards the old bindings.
    ///
    /// # Errors
    ///
    /// Returns `SessionFinished` if a previous session already finished.
    pub fn begin(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.finished {
            return Err(DojoError::SessionFinished);
        }
        self.phase = SessionPhase::Active;
        self.started_at = Some(now);
        Ok(())
    }

    /// Checks whether the session is active at `now`, lazily expiring it
    /// when the configured duration has elapsed.
    ///
    /// Expiry is only observed when queried; every mutating operation
    /// performs this check first, so a stale active session is never served.
    pub fn liveness(&mut self, now: DateTime<Utc>, duration: Duration) -> Liveness {
        match (self.phase, self.started_at) {
            (SessionPhase::Active, Some(started_at)) => {
                if now - started_at > duration {
                    self.phase = SessionPhase::Expired;
                    self.finished = true;
                    Liveness::JustExpired
                } else {
                    Liveness::Active
                }
            }
            _ => Liveness::Inactive,
        }
    }

    /// True when `liveness` would report `Active`; performs the same lazy
    /// expiry side effect.
    pub fn is_active(&mut self, now: DateTime<Utc>, duration: Duration) -> bool {
        self.liveness(now, duration) == Liveness::Active
    }

    /// Ends the session explicitly. A no-op unless a session is running;
    /// ending a never-started session must not finalize the browser session.
    pub fn end(&mut self) {
        if self.phase == SessionPhase::Active {
            self.phase = SessionPhase::Ended;
            self.finished = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(m: i64) -> Duration {
        Duration::minutes(m)
    }

    #[test]
    fn test_begin_from_no_session() {
        let mut state = SessionState::new();
        let now = Utc::now();
        state.begin(now).unwrap();
        assert_eq!(state.phase, SessionPhase::Active);
        assert_eq!(state.started_at, Some(now));
        assert!(!state.finished);
    }

    #[test]
    fn test_begin_after_finish_is_rejected() {
        let mut state = SessionState::new();
        state.begin(Utc::now()).unwrap();
        state.end();
        let err = state.begin(Utc::now()).unwrap_err();
        assert!(matches!(err, DojoError::SessionFinished));
        assert_eq!(state.phase, SessionPhase::Ended);
    }

    #[test]
    fn test_restart_while_active_resets_clock() {
        let mut state = SessionState::new();
        let first = Utc::now();
        state.begin(first).unwrap();
        let second = first + minutes(5);
        state.begin(second).unwrap();
        assert_eq!(state.started_at, Some(second));
    }

    #[test]
    fn test_lazy_expiry_observed_on_check() {
        let mut state = SessionState::new();
        let start = Utc::now();
        state.begin(start).unwrap();

        assert_eq!(state.liveness(start + minutes(10), minutes(20)), Liveness::Active);
        assert_eq!(
            state.liveness(start + minutes(21), minutes(20)),
            Liveness::JustExpired
        );
        assert_eq!(state.phase, SessionPhase::Expired);
        assert!(state.finished);
        // A second check no longer reports the transition
        assert_eq!(
            state.liveness(start + minutes(22), minutes(20)),
            Liveness::Inactive
        );
    }

    #[test]
    fn test_end_before_start_is_a_noop() {
        let mut state = SessionState::new();
        state.end();
        assert_eq!(state.phase, SessionPhase::NoSession);
        assert!(!state.finished);
        // A first start still goes through
        state.begin(Utc::now()).unwrap();
        assert_eq!(state.phase, SessionPhase::Active);
    }

    #[test]
    fn test_no_session_is_inactive() {
        let mut state = SessionState::new();
        assert_eq!(state.liveness(Utc::now(), minutes(20)), Liveness::Inactive);
        assert!(!state.finished);
    }

    #[test]
    fn test_exact_boundary_is_still_active() {
        let mut state = SessionState::new();
        let start = Utc::now();
        state.begin(start).unwrap();
        // Expiry requires strictly more than the configured duration
        assert!(state.is_active(start + minutes(20), minutes(20)));
    }
}

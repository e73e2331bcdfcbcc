use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// The independently armed timers a widget instance may hold.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TimerKind {
    /// Armed once a rating is chosen.
    AutoSubmit,
    /// Debounce re-armed on every comment keystroke.
    Inactivity,
    /// Armed at render; covers total silence.
    Dismiss,
}

impl TimerKind {
    const fn slot(self) -> usize {
        match self {
            Self::AutoSubmit => 0,
            Self::Inactivity => 1,
            Self::Dismiss => 2,
        }
    }
}

/// Deadlines for one instance's timers.
///
/// Arming an armed timer moves its deadline. Cancelling a timer that fired
/// or was never armed is a no-op.
#[derive(Debug, Default, Clone)]
pub struct TimerSet {
    deadlines: [Option<Instant>; 3],
}

impl TimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, kind: TimerKind, now: Instant, after: Duration) {
        self.deadlines[kind.slot()] = Some(now + after);
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.deadlines[kind.slot()] = None;
    }

    pub fn cancel_all(&mut self) {
        self.deadlines = [None; 3];
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.deadlines[kind.slot()].is_some()
    }

    pub fn armed_count(&self) -> usize {
        self.deadlines.iter().flatten().count()
    }

    /// Earliest armed deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.iter().flatten().min().copied()
    }

    /// Disarm and return the single earliest timer due at `now`.
    ///
    /// Only one timer is handed out per call so the caller can react
    /// (typically by cancelling the rest) before another one is considered.
    pub fn take_due(&mut self, now: Instant) -> Option<TimerKind> {
        let kind = [TimerKind::AutoSubmit, TimerKind::Inactivity, TimerKind::Dismiss]
            .into_iter()
            .filter_map(|k| self.deadlines[k.slot()].map(|d| (d, k)))
            .filter(|(deadline, _)| *deadline <= now)
            .min_by_key(|(deadline, _)| *deadline)
            .map(|(_, k)| k)?;
        self.cancel(kind);
        Some(kind)
    }
}

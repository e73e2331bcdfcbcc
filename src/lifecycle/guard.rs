/// Single-assignment completion guard.
///
/// Every path into a terminal state claims the guard first; only the first
/// claim succeeds. The widget session feeds events one at a time, so a plain
/// flag is enough.
#[derive(Debug, Default)]
pub struct CompletionGuard {
    claimed: bool,
}

impl CompletionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` for the first caller only.
    pub fn try_claim(&mut self) -> bool {
        !std::mem::replace(&mut self.claimed, true)
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed
    }
}

/// Re-enterable guard around an in-flight submission.
///
/// Unlike [`CompletionGuard`] it can be released again so a failed attempt
/// may be retried.
#[derive(Debug, Default)]
pub struct SubmissionGuard {
    in_flight: bool,
}

impl SubmissionGuard {
    pub fn try_enter(&mut self) -> bool {
        !std::mem::replace(&mut self.in_flight, true)
    }

    pub fn release(&mut self) {
        self.in_flight = false;
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }
}

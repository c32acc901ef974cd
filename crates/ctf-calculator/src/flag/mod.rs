//! Flag verification and completion persistence

mod store;

pub use store::{CompletionStore, FileStore, MemoryStore, StoreError, StoreResult};

use tracing::{info, warn};

/// The flag the challenge accepts
pub const FLAG: &str = "CTF{M4th_1s_FuN}";

/// Result of a flag submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Correct flag, first completion; success side effects should run
    Solved,
    /// Correct flag, but completion was already recorded; nothing happens
    AlreadyCompleted,
    /// Wrong flag
    Incorrect,
}

impl SubmitOutcome {
    /// True for a correct flag, first time or not
    #[must_use]
    pub const fn is_correct(self) -> bool {
        !matches!(self, Self::Incorrect)
    }
}

/// Compares submissions against the fixed flag and records completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagVerifier {
    expected: String,
}

impl Default for FlagVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl FlagVerifier {
    /// Verifier for [`FLAG`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_flag(FLAG)
    }

    /// Verifier for a custom flag
    #[must_use]
    pub fn with_flag(flag: impl Into<String>) -> Self {
        Self {
            expected: flag.into(),
        }
    }

    /// Exact comparison, no trimming or case folding
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        candidate == self.expected
    }

    /// Verifies `candidate` and persists the first completion.
    ///
    /// Store failures never turn a correct flag into a wrong one: a failed
    /// read counts as "not completed yet", a failed write is logged and the
    /// submission still reports [`SubmitOutcome::Solved`].
    pub fn submit<S: CompletionStore + ?Sized>(&self, candidate: &str, store: &mut S) -> SubmitOutcome {
        if !self.matches(candidate) {
            info!("incorrect flag submitted");
            return SubmitOutcome::Incorrect;
        }

        if completion_state(store) {
            info!("correct flag resubmitted after completion");
            return SubmitOutcome::AlreadyCompleted;
        }

        if let Err(err) = store.mark_completed() {
            warn!(%err, "could not persist completion");
        }
        info!("challenge solved");
        SubmitOutcome::Solved
    }
}

/// Reads the completion flag, logging a store failure and treating it as
/// "not completed"
#[must_use]
pub fn completion_state<S: CompletionStore + ?Sized>(store: &S) -> bool {
    store.is_completed().unwrap_or_else(|err| {
        warn!(%err, "could not read completion state");
        false
    })
}

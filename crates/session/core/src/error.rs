//! Error types surfaced by the session.
//!
//! The economy itself never fails — an unaffordable commit is silently
//! absorbed (no debit, no ledger entry, side effects still dispatched).
//! Errors exist only for caller-contract violations that are cheap to
//! detect: operating without an assigned frame, unregistered actions, and
//! undo correlation mismatches.

use crate::action::ActionKind;
use crate::log::LogError;

/// Errors from committing operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no active frame is assigned to the session")]
    NoActiveFrame,

    #[error("action {0:?} is not present in the registry")]
    UnknownAction(ActionKind),
}

/// Errors from undoing operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UndoError {
    #[error("no active frame is assigned to the session")]
    NoActiveFrame,

    #[error("action {0:?} is not present in the registry")]
    UnknownAction(ActionKind),

    #[error("no pending {0} snapshot to undo")]
    NothingPending(&'static str),

    #[error(transparent)]
    Log(#[from] LogError),
}

impl From<SessionError> for UndoError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NoActiveFrame => UndoError::NoActiveFrame,
            SessionError::UnknownAction(kind) => UndoError::UnknownAction(kind),
        }
    }
}

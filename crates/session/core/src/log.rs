//! Append-only combat audit log.
//!
//! Every mutating session operation writes an entry stamped with the
//! mission/encounter/round it happened in. Appending returns an opaque
//! [`LogToken`]; undoing an operation removes exactly the entry bearing the
//! token it was committed with, and a missing token is a reportable error
//! rather than a silent best-effort search.

/// Opaque correlation handle for one ledger entry.
///
/// Tokens are allocated monotonically and never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogToken(pub u64);

/// Mission/encounter/round context captured at append time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogStamp {
    pub timestamp: String,
    pub mission: u32,
    pub encounter: u32,
    pub round: u32,
}

/// One audit record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    /// Correlation token assigned at append time.
    pub token: LogToken,
    /// Stable entry family (e.g. `set_move`, `stabilize`, an action id).
    pub tag: String,
    pub timestamp: String,
    pub mission: u32,
    pub encounter: u32,
    pub round: u32,
    /// Display heading (e.g. `QUICK`, `STRUCTURE DAMAGE`, a weapon name).
    pub event: String,
    /// Display body.
    pub detail: String,
}

/// Errors surfaced by ledger removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LogError {
    #[error("no ledger entry bears token {0:?}")]
    UnknownToken(LogToken),
}

/// The append-only ledger itself.
#[derive(Debug, Default)]
pub struct CombatLog {
    entries: Vec<LogEntry>,
    next_token: u64,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry and returns its correlation token.
    pub fn append(
        &mut self,
        stamp: LogStamp,
        tag: impl Into<String>,
        event: impl Into<String>,
        detail: impl Into<String>,
    ) -> LogToken {
        let token = LogToken(self.next_token);
        self.next_token += 1;
        self.entries.push(LogEntry {
            token,
            tag: tag.into(),
            timestamp: stamp.timestamp,
            mission: stamp.mission,
            encounter: stamp.encounter,
            round: stamp.round,
            event: event.into(),
            detail: detail.into(),
        });
        token
    }

    /// Removes and returns the entry bearing `token`.
    pub fn remove(&mut self, token: LogToken) -> Result<LogEntry, LogError> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.token == token)
            .ok_or(LogError::UnknownToken(token))?;
        Ok(self.entries.remove(idx))
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp() -> LogStamp {
        LogStamp {
            timestamp: "3025.06.01//00:00:00".into(),
            mission: 1,
            encounter: 2,
            round: 3,
        }
    }

    #[test]
    fn append_stamps_context_and_allocates_tokens() {
        let mut log = CombatLog::new();
        let a = log.append(stamp(), "set_move", "MOVE", "FRAME/COMMIT.TAC: 4 SPACES");
        let b = log.append(stamp(), "set_move", "MOVE", "FRAME/COMMIT.TAC: 2 SPACES");

        assert_ne!(a, b);
        assert_eq!(log.len(), 2);
        let entry = &log.entries()[0];
        assert_eq!(entry.mission, 1);
        assert_eq!(entry.encounter, 2);
        assert_eq!(entry.round, 3);
    }

    #[test]
    fn remove_targets_exactly_the_token_holder() {
        let mut log = CombatLog::new();
        let a = log.append(stamp(), "skirmish", "RIFLE", "first");
        let _b = log.append(stamp(), "skirmish", "RIFLE", "second");

        // Two entries share a tag; the token disambiguates.
        let removed = log.remove(a).unwrap();
        assert_eq!(removed.detail, "first");
        assert_eq!(log.len(), 1);
        assert_eq!(log.last().unwrap().detail, "second");
    }

    #[test]
    fn remove_unknown_token_is_reported() {
        let mut log = CombatLog::new();
        let a = log.append(stamp(), "stabilize", "STABILIZE", "x");
        log.remove(a).unwrap();

        assert_eq!(log.remove(a), Err(LogError::UnknownToken(a)));
    }
}

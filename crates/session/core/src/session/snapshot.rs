//! The round-trippable session snapshot.
//!
//! This is the single persistence record the core exposes. Field names
//! match the legacy save format (`turn`, `bracedCooldown`); absent fields
//! deserialize to the documented defaults, and everything else passes
//! through untouched. Stored zeros are preserved — only *absent* fields
//! take defaults.

use crate::action::ActionRegistry;
use crate::pilot::Pilot;
use crate::stats::CombatStats;
use crate::traits::{ChangeNotifier, Clock};

use super::{Session, Stage};

/// Free-form history record carried through the snapshot untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoryItem {
    pub field: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub val: Option<String>,
}

#[cfg(feature = "serde")]
fn default_round() -> u32 {
    1
}

#[cfg(feature = "serde")]
fn default_actions() -> i32 {
    2
}

/// Serializable record of the session's own state (the frame and pilot are
/// persisted by their owners).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    #[cfg_attr(feature = "serde", serde(default))]
    pub stage: Stage,
    #[cfg_attr(feature = "serde", serde(default = "default_round", rename = "turn"))]
    pub round: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mission: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_actions"))]
    pub actions: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub overwatch: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub braced: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub overcharged: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub prepare: bool,
    #[cfg_attr(feature = "serde", serde(default, rename = "bracedCooldown"))]
    pub braced_cooldown: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub redundant: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub history: Vec<HistoryItem>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mounted: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: CombatStats,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            stage: Stage::Narrative,
            round: 1,
            mission: 0,
            actions: 2,
            overwatch: false,
            braced: false,
            overcharged: false,
            prepare: false,
            braced_cooldown: false,
            redundant: false,
            history: Vec::new(),
            mounted: false,
            stats: CombatStats::new(),
        }
    }
}

/// Snapshot methods for [`Session`].
impl Session {
    /// Captures the current persistence record.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            stage: self.stage,
            round: self.round,
            mission: self.mission,
            actions: self.actions,
            overwatch: self.overwatch,
            braced: self.braced,
            overcharged: self.overcharged,
            prepare: self.prepare,
            braced_cooldown: self.braced_cooldown,
            redundant: self.redundant,
            history: self.history.clone(),
            mounted: self.pilot_mounted,
            stats: self.stats.clone(),
        }
    }

    /// Rebuilds a session from a stored snapshot.
    pub fn restore(
        pilot: Pilot,
        registry: ActionRegistry,
        snapshot: SessionSnapshot,
        clock: Box<dyn Clock>,
        notifier: Box<dyn ChangeNotifier>,
    ) -> Self {
        let mut session = Session::new(pilot, registry, clock, notifier);
        session.stage = snapshot.stage;
        session.round = snapshot.round;
        session.mission = snapshot.mission;
        session.actions = snapshot.actions;
        session.overwatch = snapshot.overwatch;
        session.braced = snapshot.braced;
        session.overcharged = snapshot.overcharged;
        session.prepare = snapshot.prepare;
        session.braced_cooldown = snapshot.braced_cooldown;
        session.redundant = snapshot.redundant;
        session.history = snapshot.history;
        session.pilot_mounted = snapshot.mounted;
        session.stats = snapshot.stats;
        session
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::combat_session;
    use super::*;

    #[test]
    fn snapshot_reflects_session_state() {
        let mut session = combat_session();
        session.stats.kills = 3;
        session.push_history(HistoryItem {
            field: "move".into(),
            val: Some("4".into()),
        });

        let snapshot = session.snapshot();
        assert_eq!(snapshot.stage, Stage::Combat);
        assert_eq!(snapshot.round, 1);
        assert!(snapshot.mounted);
        assert_eq!(snapshot.stats.kills, 3);
        assert_eq!(snapshot.history.len(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn absent_fields_deserialize_to_defaults() {
        let snapshot: SessionSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot.stage, Stage::Narrative);
        assert_eq!(snapshot.round, 1);
        assert_eq!(snapshot.mission, 0);
        assert_eq!(snapshot.actions, 2);
        assert_eq!(snapshot.stats, CombatStats::new());
        assert!(!snapshot.mounted);
        assert!(snapshot.history.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn stored_zeros_survive_the_round_trip() {
        let json = r#"{"stage":"Combat","turn":0,"mission":0,"actions":0}"#;
        let snapshot: SessionSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.round, 0);
        assert_eq!(snapshot.actions, 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn legacy_field_names_are_used_on_the_wire() {
        let snapshot = SessionSnapshot {
            round: 7,
            braced_cooldown: true,
            ..Default::default()
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"turn\":7"));
        assert!(json.contains("\"bracedCooldown\":true"));
        assert!(!json.contains("\"round\""));
    }

    #[test]
    fn restore_rebuilds_counters_and_flags() {
        let session = combat_session();
        let mut snapshot = session.snapshot();
        snapshot.mission = 5;
        snapshot.braced = true;

        let restored = Session::restore(
            crate::pilot::Pilot::new("Hawk"),
            super::super::testing::test_registry(),
            snapshot.clone(),
            Box::new(crate::traits::FixedClock::default()),
            Box::new(crate::traits::NullNotifier),
        );
        assert_eq!(restored.mission(), 5);
        assert!(restored.is_braced());
        assert_eq!(restored.snapshot(), snapshot);
    }
}

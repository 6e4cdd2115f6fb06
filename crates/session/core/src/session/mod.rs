//! The per-combatant turn state machine.
//!
//! [`Session`] is the authoritative reducer for one combatant's in-encounter
//! state. It owns the action budget, counters, flags, audit log, and running
//! statistics; it exclusively mutates the assigned [`Frame`] and [`Pilot`];
//! and it notifies the injected persistence seam after mutating operations.
//!
//! Method groups live in sibling files, one per concern:
//! - [`turn`]: stage transitions, rounds, missions, self-destruct
//! - [`economy`]: action commit/undo with receipts and side-effect dispatch
//! - [`resources`]: resource-setting operations and stat accumulation
//! - [`compound`]: stabilize / shutdown / overcharge snapshots
//! - [`barrage`]: staged multi-weapon attack selection
//! - [`snapshot`]: the round-trippable persistence record

mod barrage;
mod compound;
mod economy;
mod resources;
mod snapshot;
mod turn;

pub use barrage::BarrageSelection;
pub use compound::{StabilizeMajor, StabilizeMinor};
pub use economy::ActionReceipt;
pub use resources::AttackReceipt;
pub use snapshot::{HistoryItem, SessionSnapshot};
pub use turn::{SelfDestruct, Stage};

use arrayvec::ArrayVec;

use crate::action::{ActionKind, ActionRegistry};
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::frame::Frame;
use crate::log::{CombatLog, LogStamp, LogToken};
use crate::pilot::Pilot;
use crate::stats::CombatStats;
use crate::traits::{ChangeNotifier, Clock};

use compound::{OverchargeUndo, ShutdownUndo, StabilizeUndo};

/// One combatant's active-mode session.
pub struct Session {
    pilot: Pilot,
    frame: Option<Frame>,
    registry: ActionRegistry,

    stage: Stage,
    round: u32,
    encounter: u32,
    mission: u32,

    actions: i32,
    pilot_mounted: bool,
    pilot_move: i32,

    jockeying: bool,
    overwatch: bool,
    braced: bool,
    overcharged: bool,
    prepare: bool,
    braced_cooldown: bool,
    redundant: bool,

    self_destruct: SelfDestruct,

    barrage: ArrayVec<BarrageSelection, { SessionConfig::BARRAGE_WEAPONS }>,
    sh_barrage: Option<BarrageSelection>,

    stabilize_undo: Option<StabilizeUndo>,
    shutdown_undo: Option<ShutdownUndo>,
    overcharge_undo: Option<OverchargeUndo>,

    log: CombatLog,
    stats: CombatStats,
    history: Vec<HistoryItem>,

    clock: Box<dyn Clock>,
    notifier: Box<dyn ChangeNotifier>,
}

impl Session {
    pub fn new(
        pilot: Pilot,
        registry: ActionRegistry,
        clock: Box<dyn Clock>,
        notifier: Box<dyn ChangeNotifier>,
    ) -> Self {
        let pilot_move = pilot.speed();
        Self {
            pilot,
            frame: None,
            registry,
            stage: Stage::Narrative,
            round: 1,
            encounter: 1,
            mission: 0,
            actions: SessionConfig::ACTIONS_PER_ROUND,
            pilot_mounted: false,
            pilot_move,
            jockeying: false,
            overwatch: false,
            braced: false,
            overcharged: false,
            prepare: false,
            braced_cooldown: false,
            redundant: false,
            self_destruct: SelfDestruct::Inactive,
            barrage: ArrayVec::new(),
            sh_barrage: None,
            stabilize_undo: None,
            shutdown_undo: None,
            overcharge_undo: None,
            log: CombatLog::new(),
            stats: CombatStats::new(),
            history: Vec::new(),
            clock,
            notifier,
        }
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = Some(frame);
        self
    }

    // ===== collaborators =====

    pub fn pilot(&self) -> &Pilot {
        &self.pilot
    }

    pub fn pilot_mut(&mut self) -> &mut Pilot {
        &mut self.pilot
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }

    pub fn frame_mut(&mut self) -> Option<&mut Frame> {
        self.frame.as_mut()
    }

    pub fn set_active_frame(&mut self, frame: Option<Frame>) {
        self.frame = frame;
        self.notify();
    }

    pub fn take_active_frame(&mut self) -> Option<Frame> {
        self.frame.take()
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    // ===== counters & budget =====

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn encounter(&self) -> u32 {
        self.encounter
    }

    pub fn mission(&self) -> u32 {
        self.mission
    }

    pub fn actions(&self) -> i32 {
        self.actions
    }

    pub fn set_actions(&mut self, actions: i32) {
        self.actions = actions;
    }

    // ===== flags =====

    pub fn is_mounted(&self) -> bool {
        self.pilot_mounted
    }

    pub fn set_mounted(&mut self, mounted: bool) {
        self.pilot_mounted = mounted;
        self.notify();
    }

    pub fn is_jockeying(&self) -> bool {
        self.jockeying
    }

    pub fn set_jockeying(&mut self, jockeying: bool) {
        self.jockeying = jockeying;
    }

    pub fn is_braced(&self) -> bool {
        self.braced
    }

    pub fn is_brace_cooldown(&self) -> bool {
        self.braced_cooldown
    }

    pub fn is_overwatch(&self) -> bool {
        self.overwatch
    }

    pub fn set_overwatch(&mut self, overwatch: bool) {
        self.overwatch = overwatch;
    }

    pub fn is_overcharged(&self) -> bool {
        self.overcharged
    }

    pub fn set_overcharged(&mut self, overcharged: bool) {
        self.overcharged = overcharged;
    }

    pub fn is_preparing(&self) -> bool {
        self.prepare
    }

    pub fn set_preparing(&mut self, prepare: bool) {
        self.prepare = prepare;
    }

    pub fn is_redundant(&self) -> bool {
        self.redundant
    }

    pub fn set_redundant(&mut self, redundant: bool) {
        self.redundant = redundant;
    }

    // ===== movement queries =====

    /// Movement remaining this turn: the pilot's when dismounted, the
    /// frame's when mounted, and zero while mounted on a shut-down frame.
    pub fn move_remaining(&self) -> i32 {
        match &self.frame {
            Some(frame) if self.pilot_mounted => {
                if frame.is_shut_down() {
                    0
                } else {
                    frame.current_move()
                }
            }
            _ => self.pilot_move,
        }
    }

    pub fn max_move(&self) -> i32 {
        match &self.frame {
            Some(frame) if self.pilot_mounted => {
                if frame.is_shut_down() {
                    0
                } else {
                    frame.max_move()
                }
            }
            _ => self.pilot.speed(),
        }
    }

    /// Protocols may only open a turn: full movement, full budget, and no
    /// overcharge spent yet.
    pub fn is_protocol_available(&self) -> bool {
        self.move_remaining() == self.max_move()
            && self.actions == SessionConfig::ACTIONS_PER_ROUND
            && !self.overcharged
    }

    /// Actions currently offered to the player.
    pub fn available_actions(&self) -> Vec<ActionKind> {
        let mounted_frame = if self.pilot_mounted {
            self.frame.as_ref()
        } else {
            None
        };
        match mounted_frame {
            None => self
                .registry
                .iter()
                .filter(|a| a.is_pilot_usable() && !a.is_hidden())
                .map(|a| a.kind())
                .collect(),
            Some(frame) if frame.is_shut_down() => {
                vec![ActionKind::BootUp, ActionKind::Dismount, ActionKind::Eject]
            }
            Some(frame) if frame.is_stunned() => {
                vec![ActionKind::Dismount, ActionKind::Eject]
            }
            Some(_) => self
                .registry
                .iter()
                .filter(|a| a.is_frame_usable() && !a.is_hidden())
                .map(|a| a.kind())
                .collect(),
        }
    }

    // ===== audit log & stats =====

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn stats(&self) -> &CombatStats {
        &self.stats
    }

    pub fn history(&self) -> &[HistoryItem] {
        &self.history
    }

    pub fn push_history(&mut self, item: HistoryItem) {
        self.history.push(item);
    }

    // ===== internal plumbing =====

    pub(crate) fn stamp(&self) -> LogStamp {
        LogStamp {
            timestamp: self.clock.timestamp(),
            mission: self.mission,
            encounter: self.encounter,
            round: self.round,
        }
    }

    pub(crate) fn push_log(
        &mut self,
        tag: &str,
        event: impl Into<String>,
        detail: impl Into<String>,
    ) -> LogToken {
        let stamp = self.stamp();
        self.log.append(stamp, tag, event, detail)
    }

    pub(crate) fn remove_log(&mut self, token: LogToken) -> Result<(), crate::log::LogError> {
        self.log.remove(token).map(|_| ())
    }

    pub(crate) fn notify(&self) {
        let snapshot = self.snapshot();
        self.notifier.state_changed(&snapshot);
    }

    pub(crate) fn frame_ref(&self) -> Result<&Frame, SessionError> {
        self.frame.as_ref().ok_or(SessionError::NoActiveFrame)
    }

    pub(crate) fn frame_mut_ok(&mut self) -> Result<&mut Frame, SessionError> {
        self.frame.as_mut().ok_or(SessionError::NoActiveFrame)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{combat_session, narrative_session};
    use super::*;

    #[test]
    fn fresh_sessions_start_in_narrative_at_full_budget() {
        let session = narrative_session();
        assert_eq!(session.stage(), Stage::Narrative);
        assert_eq!(session.round(), 1);
        assert_eq!(session.mission(), 0);
        assert_eq!(session.actions(), SessionConfig::ACTIONS_PER_ROUND);
        assert!(!session.is_mounted());
    }

    #[test]
    fn move_queries_follow_the_mount_state() {
        let mut session = combat_session();
        let frame_speed = session.frame().unwrap().speed();
        assert_eq!(session.move_remaining(), frame_speed);
        assert_eq!(session.max_move(), frame_speed);

        session.set_mounted(false);
        assert_eq!(session.move_remaining(), session.pilot().speed());
    }

    #[test]
    fn assigning_and_taking_the_frame() {
        let mut session = narrative_session();
        assert!(session.frame().is_some());

        let frame = session.take_active_frame().unwrap();
        assert!(session.frame().is_none());

        session.set_active_frame(Some(frame));
        assert!(session.frame().is_some());
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared fixtures for the session test modules.

    use super::*;
    use crate::action::{ActionDef, Activation};
    use crate::frame::{Loadout, MountKind, System, Weapon};
    use crate::traits::{FixedClock, NullNotifier};

    /// Registry covering every kind the dispatch table and tests exercise.
    pub fn test_registry() -> ActionRegistry {
        let standard = vec![
            ActionDef::new(ActionKind::Boost, "Boost", Activation::Quick).pilot_usable(),
            ActionDef::new(ActionKind::Skirmish, "Skirmish", Activation::Quick),
            ActionDef::new(ActionKind::Barrage, "Barrage", Activation::Full),
            ActionDef::new(ActionKind::Brace, "Brace", Activation::Reaction),
            ActionDef::new(ActionKind::Hide, "Hide", Activation::Quick).pilot_usable(),
            ActionDef::new(ActionKind::Jockey, "Jockey", Activation::Full).pilot_usable(),
            ActionDef::new(ActionKind::Mount, "Mount", Activation::Full).pilot_usable(),
            ActionDef::new(ActionKind::Dismount, "Dismount", Activation::Full),
            ActionDef::new(ActionKind::Eject, "Eject", Activation::Quick),
            ActionDef::new(ActionKind::BootUp, "Boot Up", Activation::Full),
            ActionDef::new(ActionKind::ShutDown, "Shut Down", Activation::Quick),
            ActionDef::new(ActionKind::SelfDestruct, "Self Destruct", Activation::Quick),
            ActionDef::new(ActionKind::Stabilize, "Stabilize", Activation::Full),
            ActionDef::new(ActionKind::Overcharge, "Overcharge", Activation::Free),
        ];
        let tech = vec![
            ActionDef::new(ActionKind::Invade, "Invade", Activation::QuickTech),
            ActionDef::new(ActionKind::LockOn, "Lock On", Activation::QuickTech),
        ];
        ActionRegistry::new(standard, tech)
    }

    pub fn test_frame() -> Frame {
        Frame::new("Everest")
            .with_hp(10)
            .with_structure(4)
            .with_stress(4)
            .with_heat_capacity(6)
            .with_repair_capacity(5)
            .with_speed(4)
            .with_loadout(Loadout::new(
                vec![
                    Weapon::new("w_siege_cannon", "Siege Cannon", MountKind::Heavy).loading(),
                    Weapon::new("w_assault_rifle", "Assault Rifle", MountKind::Main),
                ],
                vec![System::new("s_comp", "Companion AI")],
            ))
    }

    /// A mounted, in-combat session ready for commit/undo exercises.
    pub fn combat_session() -> Session {
        let mut session = Session::new(
            Pilot::new("Hawk").with_hp(8).with_speed(4),
            test_registry(),
            Box::new(FixedClock::default()),
            Box::new(NullNotifier),
        )
        .with_frame(test_frame());
        session.start_combat();
        session
    }

    /// A narrative-stage session with a frame assigned but combat not begun.
    pub fn narrative_session() -> Session {
        Session::new(
            Pilot::new("Hawk").with_hp(8).with_speed(4),
            test_registry(),
            Box::new(FixedClock::default()),
            Box::new(NullNotifier),
        )
        .with_frame(test_frame())
    }
}

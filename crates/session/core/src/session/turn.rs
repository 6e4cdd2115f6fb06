//! Stage transitions, round bookkeeping, missions, and the self-destruct
//! fuse.
//!
//! Transitions are not guarded: the hosting UI is trusted to drive them in
//! order. Frame-side work is skipped when no frame is assigned so a
//! pilot-only session can still move through the stages.

use crate::config::SessionConfig;

use super::Session;

/// Encounter phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    #[default]
    Narrative,
    Combat,
    Rest,
}

/// Self-destruct fuse state.
///
/// `Armed(n)` counts down one step per round; the terminal effect fires
/// exactly on the transition to zero, and the fuse then latches at
/// `Armed(0)` until explicitly cancelled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelfDestruct {
    #[default]
    Inactive,
    Armed(u8),
}

impl SelfDestruct {
    pub fn is_armed(self) -> bool {
        matches!(self, SelfDestruct::Armed(_))
    }

    /// Rounds until detonation; `None` when inactive, `Some(0)` once fired.
    pub fn rounds_remaining(self) -> Option<u8> {
        match self {
            SelfDestruct::Inactive => None,
            SelfDestruct::Armed(n) => Some(n),
        }
    }
}

/// Stage transition methods for [`Session`].
impl Session {
    /// Begins a new mission: bumps the mission counter, zeroes the running
    /// statistics, and rolls straight into combat.
    pub fn start_mission(&mut self) {
        self.mission += 1;
        self.stats.reset();
        let ts = self.clock.timestamp();
        self.push_log(
            "start_mission",
            "MISSION.START",
            format!("STARTING MISSION//{ts}"),
        );
        self.start_combat();
    }

    /// [`Session::start_mission`] with a generated mission codename stamped
    /// into the log entry.
    pub fn start_mission_with_codename(&mut self, codename: &str) {
        self.mission += 1;
        self.stats.reset();
        let ts = self.clock.timestamp();
        self.push_log(
            "start_mission",
            "MISSION.START",
            format!("STARTING MISSION//{ts}::{codename}"),
        );
        self.start_combat();
    }

    /// Narrative/Rest → Combat. Mounts the pilot, opens a new encounter,
    /// and runs the first round setup.
    pub fn start_combat(&mut self) {
        self.stage = Stage::Combat;
        self.pilot_mounted = true;
        self.round = 0;
        self.encounter += 1;
        self.push_log("start_combat", "LOG.INIT", "COMBAT MODE ACTIVATED");
        self.next_round();
        self.notify();
    }

    /// Advances to the next round: ticks the self-destruct fuse, restores
    /// the action budget and movement (reduced if braced last round), and
    /// resets every per-round used flag.
    pub fn next_round(&mut self) {
        self.round += 1;

        if let SelfDestruct::Armed(n) = self.self_destruct {
            if n > 0 {
                self.self_destruct = SelfDestruct::Armed(n - 1);
                if n == 1 {
                    self.self_destruct();
                }
            }
        }

        if self.braced_cooldown {
            self.braced_cooldown = false;
        }
        self.actions = if self.braced {
            SessionConfig::BRACED_ACTIONS_PER_ROUND
        } else {
            SessionConfig::ACTIONS_PER_ROUND
        };
        self.pilot_move = self.pilot.speed();
        self.barrage.clear();
        self.registry.reset_all();
        self.pilot.reset_gear();
        if let Some(frame) = self.frame.as_mut() {
            frame.loadout_mut().reset_all();
            let move_reset = if self.braced { 0 } else { frame.max_move() };
            frame.set_current_move(move_reset);
        }
        self.braced = false;

        self.push_log("start_combat", "LOG.ROUND", "ROUND START");
        self.notify();
    }

    /// Combat → Rest. Patches the pilot up to half strength, vents heat,
    /// and clears every status and condition.
    pub fn start_rest(&mut self) {
        self.stage = Stage::Rest;
        let half = (self.pilot.max_hp() + 1) / 2;
        self.pilot.heal(half);
        if let Some(frame) = self.frame.as_mut() {
            frame.set_current_heat(0);
            frame.conditions_mut().clear();
            frame.statuses_mut().clear();
        }
        if self.pilot.is_down_and_out() {
            let half = (self.pilot.max_hp() + 1) / 2;
            self.pilot.set_current_hp(half);
        }
        self.push_log(
            "start_combat",
            "LOG.END",
            "ENCOUNTER COMPLETE. COMBAT MODE DEACTIVATED.",
        );
        self.notify();
    }

    /// Rest/Combat → Narrative. Flushes the mission's statistics to the
    /// pilot's career record exactly once.
    pub fn end_mission(&mut self) {
        let stats = self.stats.clone();
        self.pilot.absorb_combat_stats(&stats);
        let ts = self.clock.timestamp();
        self.push_log(
            "end_mission",
            "MISSION.COMPLETE",
            format!("REC::MISSION COMPLETE @ {ts}"),
        );
        self.stage = Stage::Narrative;
        self.notify();
    }

    // ===== self-destruct =====

    pub fn self_destruct_state(&self) -> SelfDestruct {
        self.self_destruct
    }

    /// Rounds until detonation; `None` when the fuse is inactive.
    pub fn self_destruct_counter(&self) -> Option<u8> {
        self.self_destruct.rounds_remaining()
    }

    pub fn start_self_destruct(&mut self) {
        self.self_destruct = SelfDestruct::Armed(SessionConfig::SELF_DESTRUCT_FUSE);
    }

    pub fn cancel_self_destruct(&mut self) {
        self.self_destruct = SelfDestruct::Inactive;
    }

    /// The terminal effect: the frame is wrecked outright and a mounted
    /// pilot does not survive it. The fuse latches at zero.
    pub fn self_destruct(&mut self) {
        if let Some(frame) = self.frame.as_mut() {
            frame.set_current_structure(0);
            frame.set_current_hp(0);
            frame.set_current_stress(0);
            frame.set_destroyed(true);
            frame.set_reactor_destroyed(true);
        }
        self.self_destruct = SelfDestruct::Armed(0);
        if self.pilot_mounted {
            self.pilot.kill();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::combat_session;
    use super::*;

    #[test]
    fn start_mission_resets_stats_and_bumps_counter() {
        let mut session = combat_session();
        session.stats.kills = 9;
        session.stats.damage = 120;
        let mission_before = session.mission();

        session.start_mission();
        assert_eq!(session.mission(), mission_before + 1);
        assert_eq!(session.stats().kills, 0);
        assert_eq!(session.stats().damage, 0);
        assert_eq!(session.stage(), Stage::Combat);
    }

    #[test]
    fn end_mission_flushes_stats_to_pilot_once() {
        let mut session = combat_session();
        session.stats.kills = 2;
        session.stats.damage = 31;

        session.end_mission();
        assert_eq!(session.stage(), Stage::Narrative);
        assert_eq!(session.pilot().career_stats().kills, 2);
        assert_eq!(session.pilot().career_stats().damage, 31);
    }

    #[test]
    fn next_round_after_bracing_halves_the_budget_and_roots_the_frame() {
        let mut session = combat_session();
        session.braced = true;
        session.select_barrage(
            crate::frame::EquipmentId::new("w_assault_rifle"),
            crate::frame::MountKind::Main,
        );

        session.next_round();
        assert_eq!(session.actions(), 1);
        assert_eq!(session.frame().unwrap().current_move(), 0);
        assert!(session.barrage_selections().is_empty());
        assert!(!session.is_braced());
    }

    #[test]
    fn next_round_unbraced_restores_full_budget_and_move() {
        let mut session = combat_session();
        session.actions = 0;
        if let Some(frame) = session.frame_mut() {
            frame.set_current_move(0);
        }

        session.next_round();
        assert_eq!(session.actions(), 2);
        let frame = session.frame().unwrap();
        assert_eq!(frame.current_move(), frame.max_move());
    }

    #[test]
    fn round_reset_clears_used_flags() {
        let mut session = combat_session();
        session.registry.mark_used(crate::action::ActionKind::Skirmish);
        if let Some(frame) = session.frame_mut() {
            frame.loadout_mut().weapons[1].used = true;
        }

        session.next_round();
        assert!(session.registry().used_kinds().is_empty());
        assert!(!session.frame().unwrap().loadout().weapons[1].used);
    }

    #[test]
    fn self_destruct_fuse_burns_down_over_three_rounds() {
        let mut session = combat_session();
        session.start_self_destruct();
        assert_eq!(session.self_destruct_counter(), Some(3));

        session.next_round();
        assert_eq!(session.self_destruct_counter(), Some(2));
        assert!(!session.frame().unwrap().is_destroyed());

        session.next_round();
        assert_eq!(session.self_destruct_counter(), Some(1));

        session.next_round();
        assert_eq!(session.self_destruct_counter(), Some(0));
        let frame = session.frame().unwrap();
        assert_eq!(frame.current_hp(), 0);
        assert_eq!(frame.current_structure(), 0);
        assert_eq!(frame.current_stress(), 0);
        assert!(frame.is_destroyed());
        assert!(frame.is_reactor_destroyed());
        assert!(session.pilot().is_dead());

        // A fourth advance leaves the latched fuse alone.
        session.next_round();
        assert_eq!(session.self_destruct_counter(), Some(0));
    }

    #[test]
    fn cancel_disarms_the_fuse() {
        let mut session = combat_session();
        session.start_self_destruct();
        session.next_round();
        session.cancel_self_destruct();

        for _ in 0..4 {
            session.next_round();
        }
        assert_eq!(session.self_destruct_counter(), None);
        assert!(!session.frame().unwrap().is_destroyed());
    }

    #[test]
    fn start_rest_heals_and_clears_markers() {
        let mut session = combat_session();
        if let Some(frame) = session.frame_mut() {
            frame.add_heat(4);
            frame.statuses_mut().add(crate::frame::Status::Exposed);
            frame.conditions_mut().add(crate::frame::Condition::Jammed);
        }
        session.pilot_mut().set_current_hp(2);

        session.start_rest();
        assert_eq!(session.stage(), Stage::Rest);
        assert_eq!(session.pilot().current_hp(), 6); // 2 + ceil(8/2)
        let frame = session.frame().unwrap();
        assert_eq!(frame.current_heat(), 0);
        assert!(frame.statuses().is_empty());
        assert!(frame.conditions().is_empty());
    }

    #[test]
    fn start_rest_recovers_a_downed_pilot_to_half() {
        let mut session = combat_session();
        session.pilot_mut().set_current_hp(0);

        session.start_rest();
        assert_eq!(session.pilot().current_hp(), 4);
    }

    #[test]
    fn start_combat_opens_a_new_encounter_at_round_one() {
        let mut session = combat_session();
        let encounter = session.encounter();
        session.start_rest();
        session.start_combat();

        assert_eq!(session.stage(), Stage::Combat);
        assert_eq!(session.round(), 1);
        assert_eq!(session.encounter(), encounter + 1);
        assert!(session.is_mounted());
    }
}

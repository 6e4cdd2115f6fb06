//! The pilot collaborator.
//!
//! Thin data holder: vitals, movement speed, carried gear, and a career
//! record that absorbs the session's combat statistics at mission end.

use crate::frame::{Meter, System};
use crate::stats::CombatStats;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pilot {
    callsign: String,
    speed: i32,
    hp: Meter,
    dead: bool,
    gear: Vec<System>,
    career: CombatStats,
}

impl Pilot {
    pub fn new(callsign: impl Into<String>) -> Self {
        Self {
            callsign: callsign.into(),
            speed: 4,
            hp: Meter::at_max(8),
            dead: false,
            gear: Vec::new(),
            career: CombatStats::new(),
        }
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_hp(mut self, maximum: i32) -> Self {
        self.hp = Meter::at_max(maximum);
        self
    }

    pub fn with_gear(mut self, gear: Vec<System>) -> Self {
        self.gear = gear;
        self
    }

    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn current_hp(&self) -> i32 {
        self.hp.current
    }

    pub fn max_hp(&self) -> i32 {
        self.hp.maximum
    }

    pub fn set_current_hp(&mut self, val: i32) {
        self.hp.current = val.clamp(0, self.hp.maximum);
    }

    /// Heals up to the pilot's maximum.
    pub fn heal(&mut self, amount: i32) {
        self.set_current_hp(self.hp.current + amount);
    }

    /// At zero HP the pilot is down and out (unconscious, not dead).
    pub fn is_down_and_out(&self) -> bool {
        !self.dead && self.hp.current <= 0
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn kill(&mut self) {
        self.dead = true;
        self.hp.current = 0;
    }

    pub fn gear(&self) -> &[System] {
        &self.gear
    }

    /// Per-round reset of carried gear.
    pub fn reset_gear(&mut self) {
        for item in &mut self.gear {
            item.reset();
        }
    }

    pub fn career_stats(&self) -> &CombatStats {
        &self.career
    }

    /// Folds one mission's totals into the career record.
    pub fn absorb_combat_stats(&mut self, stats: &CombatStats) {
        self.career.absorb(stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heal_clamps_to_max() {
        let mut pilot = Pilot::new("Hawk").with_hp(8);
        pilot.set_current_hp(5);
        pilot.heal(10);
        assert_eq!(pilot.current_hp(), 8);
    }

    #[test]
    fn down_and_out_at_zero_but_not_when_dead() {
        let mut pilot = Pilot::new("Hawk");
        pilot.set_current_hp(0);
        assert!(pilot.is_down_and_out());

        pilot.kill();
        assert!(pilot.is_dead());
        assert!(!pilot.is_down_and_out());
    }

    #[test]
    fn career_absorbs_mission_totals() {
        let mut pilot = Pilot::new("Hawk");
        let stats = CombatStats {
            kills: 2,
            damage: 31,
            ..Default::default()
        };
        pilot.absorb_combat_stats(&stats);
        pilot.absorb_combat_stats(&stats);
        assert_eq!(pilot.career_stats().kills, 4);
        assert_eq!(pilot.career_stats().damage, 62);
    }
}

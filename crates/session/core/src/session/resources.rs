//! Resource-setting operations.
//!
//! Each setter accumulates the exact signed delta it causes into the
//! running statistics, mutates the frame, and appends ledger entries whose
//! wording matches the direction of the change. Structure, stress, and heat
//! writes emit a second entry when they cross a danger threshold.

use crate::error::{SessionError, UndoError};
use crate::frame::{Condition, EquipmentId, FrameBonus, Resistances, Status};
use crate::log::LogToken;

use super::Session;

/// Two-decimal `current/max` fraction used in integrity warnings.
fn integrity_fraction(current: i32, maximum: i32) -> String {
    format!("{:.2}", current as f64 / maximum as f64)
}

/// Correlation record returned by [`Session::log_attack`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackReceipt {
    damage: i32,
    kill: bool,
    token: LogToken,
}

impl AttackReceipt {
    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn was_kill(&self) -> bool {
        self.kill
    }

    pub fn token(&self) -> LogToken {
        self.token
    }
}

/// Resource-setting methods for [`Session`].
impl Session {
    /// Sets the frame's remaining move, accumulating spaces spent.
    pub fn set_move(&mut self, val: i32) -> Result<(), SessionError> {
        let old = self.frame_ref()?.current_move();
        self.stats.moves += old - val;
        if let Some(frame) = self.frame.as_mut() {
            frame.set_current_move(val);
        }
        let detail = if val > 0 {
            format!("FRAME/COMMIT.TAC: {val} SPACES")
        } else {
            format!("FRAME/RESCIND.TAC: {} SPACES", val.abs())
        };
        self.push_log("set_move", "MOVE", detail);
        self.notify();
        Ok(())
    }

    /// Sets HP. Lowering it may consume structure through the frame's
    /// overflow rule, which earns a second, critical ledger entry.
    pub fn set_hp(&mut self, val: i32) -> Result<(), SessionError> {
        let (old_hp, structure_before) = {
            let frame = self.frame_ref()?;
            (frame.current_hp(), frame.current_structure())
        };
        self.stats.hp_damage += old_hp - val;

        if val > old_hp {
            if let Some(frame) = self.frame.as_mut() {
                frame.set_current_hp(val);
            }
            self.push_log(
                "rep_dmg",
                "REPAIR",
                format!("FRAME/REP.PROCESS:: {val} HP RESTORED"),
            );
        } else {
            if let Some(frame) = self.frame.as_mut() {
                frame.set_current_hp(val);
            }
            self.push_log("add_dmg", "DAMAGE", format!("!WARN! INC:: {val} HP DAMAGE"));
            let (structure, max_structure) = {
                let frame = self.frame_ref()?;
                (frame.current_structure(), frame.max_structure())
            };
            if structure < structure_before {
                let pct = integrity_fraction(structure, max_structure);
                self.push_log(
                    "set_str",
                    "STRUCTURE DAMAGE",
                    format!("!CRITICAL! FRAME.STR::INTEGRITY COMPROMISED ++{pct}++"),
                );
            }
        }
        self.notify();
        Ok(())
    }

    /// Sets structure directly.
    pub fn set_structure(&mut self, val: i32) -> Result<(), SessionError> {
        let old = self.frame_ref()?.current_structure();
        self.stats.structure_damage += old - val;
        let (structure, max_structure) = {
            let frame = self.frame_mut_ok()?;
            frame.set_current_structure(val);
            (frame.current_structure(), frame.max_structure())
        };
        let pct = integrity_fraction(structure, max_structure);
        self.push_log(
            "set_str",
            "STRUCTURE DAMAGE",
            format!("!CRITICAL! FRAME.STR::INTEGRITY COMPROMISED ++{pct}++"),
        );
        self.notify();
        Ok(())
    }

    /// Sets reactor stress directly.
    pub fn set_stress(&mut self, val: i32) -> Result<(), SessionError> {
        let old = self.frame_ref()?.current_stress();
        self.stats.reactor_damage += old - val;
        let (stress, max_stress) = {
            let frame = self.frame_mut_ok()?;
            frame.set_current_stress(val);
            (frame.current_stress(), frame.max_stress())
        };
        let pct = integrity_fraction(stress, max_stress);
        self.push_log(
            "set_stress",
            "REACTOR STRESS",
            format!("!CRITICAL! FRAME.REACTOR::INTEGRITY COMPROMISED ++{pct}++"),
        );
        self.notify();
        Ok(())
    }

    /// Sets the overshield pool.
    pub fn set_overshield(&mut self, val: i32) -> Result<(), SessionError> {
        let old = self.frame_ref()?.overshield();
        self.stats.overshield += old - val;
        if let Some(frame) = self.frame.as_mut() {
            frame.set_overshield(val);
        }
        self.push_log(
            "set_overshield",
            "OVERSHIELD",
            format!("FRAME.REMOTE::OVERSHIELD.SET ++{val}++"),
        );
        self.notify();
        Ok(())
    }

    /// Sets heat. Heat accumulates with inverse sign (an increase is the
    /// cost being paid). Crossing the danger zone in either direction, or
    /// overflowing into reactor stress, earns extra ledger entries.
    pub fn set_heat(&mut self, val: i32) -> Result<(), SessionError> {
        let old = self.frame_ref()?.current_heat();
        self.stats.heat_damage += val - old;

        if val < old {
            let was_in_danger = self.frame_ref()?.is_in_danger_zone();
            if let Some(frame) = self.frame.as_mut() {
                frame.set_current_heat(val);
            }
            self.push_log(
                "clear_heat",
                "CLEAR HEAT",
                format!("FRAME/REACTOR.VENT:: {val} HEAT CLEARED"),
            );
            if was_in_danger && !self.frame_ref()?.is_in_danger_zone() {
                self.push_log(
                    "out_dangerzone",
                    "HEAT LEVELS NOMINAL",
                    "FRAME/REACTOR:: ++TEMP.OK++",
                );
            }
        } else {
            let stress_before = self.frame_ref()?.current_stress();
            if let Some(frame) = self.frame.as_mut() {
                frame.set_current_heat(val);
            }
            self.push_log(
                "add_heat",
                "HEAT",
                format!("!WARN! FRAME/REACTOR.HEAT_LVL:: {val} HEAT"),
            );
            if self.frame_ref()?.is_in_danger_zone() {
                self.push_log(
                    "dangerzone",
                    "HEAT ALERT",
                    "!ALERT! FRAME/REACTOR:: ++TEMP.CRITICAL++",
                );
            }
            let (stress, max_stress) = {
                let frame = self.frame_ref()?;
                (frame.current_stress(), frame.max_stress())
            };
            if stress < stress_before {
                let pct = integrity_fraction(stress, max_stress);
                self.push_log(
                    "set_stress",
                    "REACTOR STRESS",
                    format!("!CRITICAL! FRAME.REACTOR::INTEGRITY COMPROMISED ++{pct}++"),
                );
            }
        }
        self.notify();
        Ok(())
    }

    /// Sets repair capacity. No accumulator: a modeled game resource that
    /// is allowed to run negative.
    pub fn set_repair_capacity(&mut self, val: i32) -> Result<(), SessionError> {
        self.frame_mut_ok()?.set_current_repairs(val);
        let detail = if val < 0 {
            format!("FRAME/COMMIT.REPAIR: {val}")
        } else {
            format!("FRAME/RECOVER.REPAIR: {}", val.abs())
        };
        self.push_log("set_rep", "REPAIR CAPACITY", detail);
        self.notify();
        Ok(())
    }

    /// Sets core power.
    pub fn set_core_power(&mut self, val: i32) -> Result<(), SessionError> {
        let old = self.frame_ref()?.core_power();
        self.stats.core_uses += old - val;
        if let Some(frame) = self.frame.as_mut() {
            frame.set_core_power(val);
        }
        let detail = if val > 0 {
            "FRAME/CORE:: CAPACITY RESTORED".to_string()
        } else {
            "!ALERT! FRAME CORE ACTIVATION !ALERT!".to_string()
        };
        self.push_log("set_core", "CORE POWER", detail);
        self.notify();
        Ok(())
    }

    /// Sets the overcharge level. Accumulates with inverse sign, like heat.
    pub fn set_overcharge(&mut self, val: i32) -> Result<(), SessionError> {
        let old = self.frame_ref()?.overcharge_level();
        let increased = old < val;
        self.stats.overcharge_uses += val - old;
        if let Some(frame) = self.frame.as_mut() {
            frame.set_overcharge_level(val);
        }
        let detail = if increased {
            "!WARN! FRAME/REACTOR.SYS::POWER REROUTE CONFIRM ++HEAT.ALARM.ON++"
        } else {
            "FRAME/REACTOR.SYS::CHARGE PROTOCOL RECOVERY"
        };
        self.push_log("set_oc", "OVERCHARGE", detail);
        self.notify();
        Ok(())
    }

    /// Sets ongoing burn. Ledger only, no accumulator.
    pub fn set_burn(&mut self, val: i32) -> Result<(), SessionError> {
        self.frame_mut_ok()?.set_burn(val);
        let detail = if val > 0 {
            format!("!ALERT! FRAME/DMG.ONGOING: {val} ++ALARM.ON++")
        } else {
            let alarm = if self.frame_ref()?.burn() > 0 {
                "++ALARM.ON++"
            } else {
                "++ALARM.OFF++"
            };
            format!("FRAME/DMG.MITIGATE: {} {alarm}", val.abs())
        };
        self.push_log("set_burn", "BURN", detail);
        self.notify();
        Ok(())
    }

    /// Replaces the status list, logging the first added or removed marker.
    pub fn set_statuses(&mut self, statuses: &[Status]) -> Result<(), SessionError> {
        if statuses.is_empty() {
            self.frame_mut_ok()?.statuses_mut().clear();
            self.push_log("clear_status", "STATUS", "FRAME/STATUS.CLEAR ++ALARM.OFF.ALL++");
            self.notify();
            return Ok(());
        }
        let (added, removed) = {
            let frame = self.frame_ref()?;
            let added = statuses.iter().copied().find(|s| !frame.statuses().has(*s));
            let removed = frame
                .statuses()
                .iter()
                .copied()
                .find(|s| !statuses.contains(s));
            (added, removed)
        };
        self.frame_mut_ok()?.statuses_mut().set_all(statuses);
        let subject = added
            .or(removed)
            .map(|s| s.to_string())
            .unwrap_or_default();
        let prefix = if added.is_some() { "" } else { "!ALERT! " };
        let alarm = if removed.is_some() { "OFF" } else { "ON" };
        self.push_log(
            "set_status",
            "STATUS",
            format!("{prefix}FRAME/STATUS.{subject} ++ALARM.{alarm}++"),
        );
        self.notify();
        Ok(())
    }

    /// Replaces the condition list, logging the first added or removed
    /// marker.
    pub fn set_conditions(&mut self, conditions: &[Condition]) -> Result<(), SessionError> {
        if conditions.is_empty() {
            self.frame_mut_ok()?.conditions_mut().clear();
            self.push_log("clear_status", "STATUS", "FRAME/STATUS.CLEAR ++ALARM.OFF.ALL++");
            self.notify();
            return Ok(());
        }
        let (added, removed) = {
            let frame = self.frame_ref()?;
            let added = conditions
                .iter()
                .copied()
                .find(|c| !frame.conditions().has(*c));
            let removed = frame
                .conditions()
                .iter()
                .copied()
                .find(|c| !conditions.contains(c));
            (added, removed)
        };
        self.frame_mut_ok()?.conditions_mut().set_all(conditions);
        let subject = added
            .or(removed)
            .map(|c| c.to_string())
            .unwrap_or_default();
        let prefix = if added.is_some() { "" } else { "!ALERT! " };
        let alarm = if removed.is_some() { "OFF" } else { "ON" };
        self.push_log(
            "set_status",
            "STATUS",
            format!("{prefix}FRAME/STATUS.{subject} ++ALARM.{alarm}++"),
        );
        self.notify();
        Ok(())
    }

    /// Replaces the resistance set.
    pub fn set_resistances(&mut self, resistances: Resistances) -> Result<(), SessionError> {
        let old = self.frame_ref()?.resistances();
        if resistances.is_empty() {
            self.frame_mut_ok()?.set_resistances(resistances);
            self.push_log("clear_resist", "RESISTANCE", "FRAME/DEF.RES ++RES.END.ALL++");
            self.notify();
            return Ok(());
        }
        let added = (resistances - old).first_name();
        let removed = (old - resistances).first_name();
        self.frame_mut_ok()?.set_resistances(resistances);
        let subject = added.or(removed).unwrap_or_default();
        let suffix = if removed.is_some() { "++RES.END++" } else { "" };
        self.push_log(
            "set_res",
            "RESISTANCE",
            format!("FRAME/DEF.RES::{subject}{suffix}"),
        );
        self.notify();
        Ok(())
    }

    // ===== attack logging =====

    /// Records a resolved attack: damage and kill counters plus a ledger
    /// entry tagged with the acting weapon.
    pub fn log_attack(
        &mut self,
        action: &str,
        weapon: &str,
        damage: i32,
        kill: bool,
    ) -> AttackReceipt {
        self.stats.damage += damage;
        if kill {
            self.stats.kills += 1;
        }
        let confirm = if kill { "++KILL CONFIRM++" } else { "" };
        let token = self.push_log(
            action,
            weapon.to_uppercase(),
            format!(
                "{}//{}::{damage} DMG {confirm}",
                action.to_uppercase(),
                weapon.to_uppercase()
            ),
        );
        self.notify();
        AttackReceipt {
            damage,
            kill,
            token,
        }
    }

    /// Subtracts exactly the deltas a logged attack added and removes its
    /// ledger entry.
    pub fn undo_attack(&mut self, receipt: AttackReceipt) -> Result<(), UndoError> {
        self.remove_log(receipt.token)?;
        self.stats.damage -= receipt.damage;
        if receipt.kill {
            self.stats.kills -= 1;
        }
        self.notify();
        Ok(())
    }

    // ===== repair bay =====

    /// Spends one repair point to restore HP to maximum.
    pub fn repair_hp(&mut self) -> Result<(), SessionError> {
        let frame = self.frame_mut_ok()?;
        let max = frame.max_hp();
        frame.set_current_hp(max);
        frame.spend_repairs(1);
        self.notify();
        Ok(())
    }

    /// Restores one structure. Costs 2 repair points, or 1 with the
    /// cheap-structure chassis bonus.
    pub fn repair_structure(&mut self) -> Result<(), SessionError> {
        let frame = self.frame_mut_ok()?;
        let current = frame.current_structure();
        frame.set_current_structure(current + 1);
        let cost = if frame.has_bonus(FrameBonus::CheapStructureRepair) {
            1
        } else {
            2
        };
        frame.spend_repairs(cost);
        self.notify();
        Ok(())
    }

    /// Restores reactor stress to maximum. Costs 2 repair points, or 1 with
    /// the cheap-stress chassis bonus.
    pub fn repair_stress(&mut self) -> Result<(), SessionError> {
        let frame = self.frame_mut_ok()?;
        let max = frame.max_stress();
        frame.set_current_stress(max);
        let cost = if frame.has_bonus(FrameBonus::CheapStressRepair) {
            1
        } else {
            2
        };
        frame.spend_repairs(cost);
        self.notify();
        Ok(())
    }

    /// Spends one repair point to fix a destroyed weapon or system.
    pub fn repair_system(&mut self, id: &EquipmentId) -> Result<(), SessionError> {
        let frame = self.frame_mut_ok()?;
        frame.loadout_mut().repair(id);
        frame.spend_repairs(1);
        self.notify();
        Ok(())
    }

    /// Rebuilds a destroyed frame for the given number of repair points.
    pub fn repair_destroyed(&mut self, self_repair_points: i32) -> Result<(), SessionError> {
        let frame = self.frame_mut_ok()?;
        frame.spend_repairs(self_repair_points);
        frame.full_repair();
        self.notify();
        Ok(())
    }

    /// Full repair outside the repair-point economy (downtime).
    pub fn commit_full_repair(&mut self) -> Result<(), SessionError> {
        self.frame_mut_ok()?.full_repair();
        self.push_log("full_repair", "FULL REPAIR", "FRAME/ROOT::FULL REPAIR");
        self.notify();
        Ok(())
    }

    // ===== burn =====

    pub fn clear_burn(&mut self) -> Result<(), SessionError> {
        self.frame_mut_ok()?.set_burn(0);
        self.notify();
        Ok(())
    }

    /// Applies the current burn as damage through overshield then HP.
    pub fn take_burn(&mut self) -> Result<(), SessionError> {
        let frame = self.frame_mut_ok()?;
        let burn = frame.burn();
        frame.add_damage(burn);
        self.notify();
        Ok(())
    }
}

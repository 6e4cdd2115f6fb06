//! The combatant resource object: a mech frame.
//!
//! `Frame` is deliberately a data holder. It owns the sheet-state meters and
//! the overflow rules baked into them (HP overflow consumes structure, heat
//! overflow consumes reactor stress), but every decision about *when* fields
//! change is made by the session.

pub mod equipment;
pub mod status;

pub use equipment::{EquipmentId, Loadout, MountKind, System, Weapon};
pub use status::{Condition, ConditionList, Resistances, Status, StatusList};

/// Integer resource meter (current/maximum) tracked on the sheet.
///
/// Current values are signed: repair capacity is allowed to run negative
/// (a modeled game state, not an error).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meter {
    pub current: i32,
    pub maximum: i32,
}

impl Meter {
    pub fn new(current: i32, maximum: i32) -> Self {
        Self { current, maximum }
    }

    pub fn at_max(maximum: i32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }
}

/// Chassis bonuses the session consults for repair discounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameBonus {
    /// Structure repairs cost 1 repair point instead of 2.
    CheapStructureRepair,
    /// Reactor stress repairs cost 1 repair point instead of 2.
    CheapStressRepair,
}

/// Default overcharge progression track.
const OVERCHARGE_TRACK: [&str; 4] = ["+1", "+1d3", "+1d6", "+1d6+4"];

/// One combatant's frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    name: String,
    hp: Meter,
    structure: Meter,
    stress: Meter,
    /// `maximum` here is heat capacity; `current` runs 0..=capacity.
    heat: Meter,
    repairs: Meter,
    overshield: i32,
    burn: i32,
    core_power: i32,
    overcharge: i32,
    overcharge_track: Vec<String>,
    speed: i32,
    current_move: i32,
    destroyed: bool,
    reactor_destroyed: bool,
    statuses: StatusList,
    conditions: ConditionList,
    resistances: Resistances,
    bonuses: Vec<FrameBonus>,
    loadout: Loadout,
}

impl Frame {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hp: Meter::at_max(10),
            structure: Meter::at_max(4),
            stress: Meter::at_max(4),
            heat: Meter::new(0, 6),
            repairs: Meter::at_max(5),
            overshield: 0,
            burn: 0,
            core_power: 1,
            overcharge: 0,
            overcharge_track: OVERCHARGE_TRACK.iter().map(|s| s.to_string()).collect(),
            speed: 4,
            current_move: 4,
            destroyed: false,
            reactor_destroyed: false,
            statuses: StatusList::new(),
            conditions: ConditionList::new(),
            resistances: Resistances::empty(),
            bonuses: Vec::new(),
            loadout: Loadout::default(),
        }
    }

    pub fn with_hp(mut self, maximum: i32) -> Self {
        self.hp = Meter::at_max(maximum);
        self
    }

    pub fn with_structure(mut self, maximum: i32) -> Self {
        self.structure = Meter::at_max(maximum);
        self
    }

    pub fn with_stress(mut self, maximum: i32) -> Self {
        self.stress = Meter::at_max(maximum);
        self
    }

    pub fn with_heat_capacity(mut self, capacity: i32) -> Self {
        self.heat = Meter::new(0, capacity);
        self
    }

    pub fn with_repair_capacity(mut self, capacity: i32) -> Self {
        self.repairs = Meter::at_max(capacity);
        self
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self.current_move = speed;
        self
    }

    pub fn with_loadout(mut self, loadout: Loadout) -> Self {
        self.loadout = loadout;
        self
    }

    pub fn with_bonus(mut self, bonus: FrameBonus) -> Self {
        self.bonuses.push(bonus);
        self
    }

    // ===== identity & flags =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_reactor_destroyed(&self) -> bool {
        self.reactor_destroyed
    }

    pub fn set_destroyed(&mut self, destroyed: bool) {
        self.destroyed = destroyed;
    }

    pub fn set_reactor_destroyed(&mut self, destroyed: bool) {
        self.reactor_destroyed = destroyed;
    }

    pub fn has_bonus(&self, bonus: FrameBonus) -> bool {
        self.bonuses.contains(&bonus)
    }

    // ===== hit points & structure =====

    pub fn current_hp(&self) -> i32 {
        self.hp.current
    }

    pub fn max_hp(&self) -> i32 {
        self.hp.maximum
    }

    /// Sets HP, overflowing damage into structure: a write at or below zero
    /// consumes one structure and carries the remainder back into HP.
    pub fn set_current_hp(&mut self, val: i32) {
        let mut val = val;
        loop {
            if val > self.hp.maximum {
                self.hp.current = self.hp.maximum;
                return;
            }
            if val <= 0 {
                if self.structure.current > 0 {
                    self.set_current_structure(self.structure.current - 1);
                    val += self.hp.maximum;
                    continue;
                }
                self.hp.current = 0;
                return;
            }
            self.hp.current = val;
            return;
        }
    }

    pub fn current_structure(&self) -> i32 {
        self.structure.current
    }

    pub fn max_structure(&self) -> i32 {
        self.structure.maximum
    }

    /// Sets structure, clamped to the meter. Reaching zero marks the frame
    /// destroyed; the flag is only cleared by a full repair.
    pub fn set_current_structure(&mut self, val: i32) {
        self.structure.current = val.clamp(0, self.structure.maximum);
        if self.structure.current == 0 {
            self.destroyed = true;
        }
    }

    /// Applies incoming damage through the overshield, then HP.
    pub fn add_damage(&mut self, damage: i32) {
        let absorbed = damage.min(self.overshield).max(0);
        self.overshield -= absorbed;
        let rest = damage - absorbed;
        if rest > 0 {
            self.set_current_hp(self.hp.current - rest);
        }
    }

    // ===== reactor =====

    pub fn current_stress(&self) -> i32 {
        self.stress.current
    }

    pub fn max_stress(&self) -> i32 {
        self.stress.maximum
    }

    pub fn set_current_stress(&mut self, val: i32) {
        self.stress.current = val.clamp(0, self.stress.maximum);
    }

    pub fn current_heat(&self) -> i32 {
        self.heat.current
    }

    pub fn heat_capacity(&self) -> i32 {
        self.heat.maximum
    }

    /// Sets heat, overflowing past capacity into reactor stress.
    pub fn set_current_heat(&mut self, val: i32) {
        let mut val = val;
        loop {
            if val < 0 {
                self.heat.current = 0;
                return;
            }
            if val > self.heat.maximum && self.stress.current > 0 {
                self.set_current_stress(self.stress.current - 1);
                val -= self.heat.maximum;
                continue;
            }
            self.heat.current = val.min(self.heat.maximum);
            return;
        }
    }

    pub fn add_heat(&mut self, heat: i32) {
        self.set_current_heat(self.heat.current + heat);
    }

    pub fn reduce_heat(&mut self, heat: i32) {
        self.set_current_heat(self.heat.current - heat);
    }

    /// Heat at or past half capacity (rounded up) is the danger zone.
    pub fn is_in_danger_zone(&self) -> bool {
        self.heat.current >= (self.heat.maximum + 1) / 2
    }

    // ===== shields, burn, repairs, core =====

    pub fn overshield(&self) -> i32 {
        self.overshield
    }

    pub fn set_overshield(&mut self, val: i32) {
        self.overshield = val.max(0);
    }

    pub fn burn(&self) -> i32 {
        self.burn
    }

    pub fn set_burn(&mut self, val: i32) {
        self.burn = val.max(0);
    }

    pub fn current_repairs(&self) -> i32 {
        self.repairs.current
    }

    pub fn repair_capacity(&self) -> i32 {
        self.repairs.maximum
    }

    /// Repair capacity is permitted to run negative.
    pub fn set_current_repairs(&mut self, val: i32) {
        self.repairs.current = val.min(self.repairs.maximum);
    }

    pub fn spend_repairs(&mut self, points: i32) {
        self.repairs.current -= points;
    }

    pub fn restore_repairs(&mut self, points: i32) {
        self.set_current_repairs(self.repairs.current + points);
    }

    pub fn core_power(&self) -> i32 {
        self.core_power
    }

    pub fn set_core_power(&mut self, val: i32) {
        self.core_power = val.max(0);
    }

    // ===== overcharge =====

    pub fn overcharge_level(&self) -> i32 {
        self.overcharge
    }

    pub fn set_overcharge_level(&mut self, val: i32) {
        self.overcharge = val.clamp(0, self.overcharge_track.len() as i32);
    }

    pub fn overcharge_track(&self) -> &[String] {
        &self.overcharge_track
    }

    pub fn overcharge_track_len(&self) -> i32 {
        self.overcharge_track.len() as i32
    }

    // ===== movement =====

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn max_move(&self) -> i32 {
        self.speed
    }

    pub fn current_move(&self) -> i32 {
        self.current_move
    }

    pub fn set_current_move(&mut self, val: i32) {
        self.current_move = val.max(0);
    }

    // ===== markers =====

    pub fn statuses(&self) -> &StatusList {
        &self.statuses
    }

    pub fn statuses_mut(&mut self) -> &mut StatusList {
        &mut self.statuses
    }

    pub fn conditions(&self) -> &ConditionList {
        &self.conditions
    }

    pub fn conditions_mut(&mut self) -> &mut ConditionList {
        &mut self.conditions
    }

    pub fn resistances(&self) -> Resistances {
        self.resistances
    }

    pub fn set_resistances(&mut self, resistances: Resistances) {
        self.resistances = resistances;
    }

    pub fn is_shut_down(&self) -> bool {
        self.statuses.has(Status::ShutDown)
    }

    pub fn is_stunned(&self) -> bool {
        self.statuses.has(Status::Stunned) || self.conditions.has(Condition::Stunned)
    }

    // ===== loadout =====

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    pub fn loadout_mut(&mut self) -> &mut Loadout {
        &mut self.loadout
    }

    /// Restores the frame to its post-full-repair baseline.
    pub fn full_repair(&mut self) {
        self.hp.current = self.hp.maximum;
        self.structure.current = self.structure.maximum;
        self.stress.current = self.stress.maximum;
        self.heat.current = 0;
        self.repairs.current = self.repairs.maximum;
        self.overshield = 0;
        self.burn = 0;
        self.core_power = 1;
        self.overcharge = 0;
        self.current_move = self.speed;
        self.destroyed = false;
        self.reactor_destroyed = false;
        self.statuses.clear();
        self.conditions.clear();
        self.resistances = Resistances::empty();
        self.loadout.full_repair();
    }
}

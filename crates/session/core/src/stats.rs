//! Running combat statistics.
//!
//! Each field is a signed accumulator: resource-setting operations add the
//! exact delta they caused, and undoing an operation subtracts the same
//! delta. Totals are reset at mission start and flushed to the pilot's
//! career record at mission end.

/// Per-mission combat totals.
///
/// Damage-flavored fields accumulate `old − new` (positive means lost);
/// heat and overcharge accumulate `new − old` because an increase there is
/// the cost being paid, not a restoration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatStats {
    #[cfg_attr(feature = "serde", serde(default))]
    pub moves: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kills: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp_damage: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub structure_damage: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub overshield: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub heat_damage: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reactor_damage: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub overcharge_uses: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub core_uses: i32,
}

impl CombatStats {
    /// Fresh all-zero accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes every field in place.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Adds another accumulator into this one, field by field.
    ///
    /// Used by the pilot's career record when a mission's totals are
    /// flushed.
    pub fn absorb(&mut self, other: &CombatStats) {
        self.moves += other.moves;
        self.kills += other.kills;
        self.damage += other.damage;
        self.hp_damage += other.hp_damage;
        self.structure_damage += other.structure_damage;
        self.overshield += other.overshield;
        self.heat_damage += other.heat_damage;
        self.reactor_damage += other.reactor_damage;
        self.overcharge_uses += other.overcharge_uses;
        self.core_uses += other.core_uses;
    }
}

//! Equipment data holders: weapons, systems, and the mounted loadout.
//!
//! These are thin sheet-state records. The catalog that produces them is
//! external; the session only needs the per-round flags (used, loading,
//! cascading, destroyed) and bulk reset/repair operations.

use std::fmt;

/// Stable identifier of one piece of equipment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentId(pub String);

impl EquipmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for EquipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hardpoint class a weapon is fitted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MountKind {
    Aux,
    Main,
    Flex,
    Heavy,
    Superheavy,
    Integrated,
}

/// A mounted weapon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Weapon {
    pub id: EquipmentId,
    pub name: String,
    pub mount: MountKind,
    /// Loading weapons must be reloaded between shots.
    pub loading: bool,
    pub loaded: bool,
    pub used: bool,
    pub destroyed: bool,
    pub cascading: bool,
}

impl Weapon {
    pub fn new(id: impl Into<String>, name: impl Into<String>, mount: MountKind) -> Self {
        Self {
            id: EquipmentId::new(id),
            name: name.into(),
            mount,
            loading: false,
            loaded: true,
            used: false,
            destroyed: false,
            cascading: false,
        }
    }

    /// Marks the weapon as a loading weapon (starts loaded).
    pub fn loading(mut self) -> Self {
        self.loading = true;
        self.loaded = true;
        self
    }

    /// Per-round reset.
    pub fn reset(&mut self) {
        self.used = false;
    }

    pub fn repair(&mut self) {
        self.destroyed = false;
    }
}

/// A mounted system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct System {
    pub id: EquipmentId,
    pub name: String,
    pub used: bool,
    pub destroyed: bool,
    /// Fault state cleared by a shutdown.
    pub cascading: bool,
}

impl System {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: EquipmentId::new(id),
            name: name.into(),
            used: false,
            destroyed: false,
            cascading: false,
        }
    }

    pub fn reset(&mut self) {
        self.used = false;
    }

    pub fn repair(&mut self) {
        self.destroyed = false;
    }
}

/// Everything currently fitted to the frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loadout {
    pub weapons: Vec<Weapon>,
    pub systems: Vec<System>,
}

impl Loadout {
    pub fn new(weapons: Vec<Weapon>, systems: Vec<System>) -> Self {
        Self { weapons, systems }
    }

    /// Per-round reset of every used flag.
    pub fn reset_all(&mut self) {
        for weapon in &mut self.weapons {
            weapon.reset();
        }
        for system in &mut self.systems {
            system.reset();
        }
    }

    /// Ids of equipment currently in cascade.
    pub fn cascading_ids(&self) -> Vec<EquipmentId> {
        let weapons = self
            .weapons
            .iter()
            .filter(|w| w.cascading)
            .map(|w| w.id.clone());
        let systems = self
            .systems
            .iter()
            .filter(|s| s.cascading)
            .map(|s| s.id.clone());
        weapons.chain(systems).collect()
    }

    pub fn clear_cascades(&mut self) {
        for weapon in &mut self.weapons {
            weapon.cascading = false;
        }
        for system in &mut self.systems {
            system.cascading = false;
        }
    }

    /// Re-flags the given equipment as cascading (shutdown undo).
    pub fn restore_cascades(&mut self, ids: &[EquipmentId]) {
        for weapon in &mut self.weapons {
            if ids.contains(&weapon.id) {
                weapon.cascading = true;
            }
        }
        for system in &mut self.systems {
            if ids.contains(&system.id) {
                system.cascading = true;
            }
        }
    }

    /// Ids of loading weapons that are waiting on a reload.
    pub fn unloaded_loading_ids(&self) -> Vec<EquipmentId> {
        self.weapons
            .iter()
            .filter(|w| w.loading && !w.loaded)
            .map(|w| w.id.clone())
            .collect()
    }

    /// Reloads every loading weapon that is currently unloaded.
    pub fn reload_all(&mut self) {
        for weapon in &mut self.weapons {
            if weapon.loading && !weapon.loaded {
                weapon.loaded = true;
            }
        }
    }

    pub fn set_loaded(&mut self, id: &EquipmentId, loaded: bool) {
        if let Some(weapon) = self.weapons.iter_mut().find(|w| &w.id == id) {
            weapon.loaded = loaded;
        }
    }

    pub fn weapon(&self, id: &EquipmentId) -> Option<&Weapon> {
        self.weapons.iter().find(|w| &w.id == id)
    }

    /// Repairs one destroyed weapon or system; returns false if unknown.
    pub fn repair(&mut self, id: &EquipmentId) -> bool {
        if let Some(weapon) = self.weapons.iter_mut().find(|w| &w.id == id) {
            weapon.repair();
            return true;
        }
        if let Some(system) = self.systems.iter_mut().find(|s| &s.id == id) {
            system.repair();
            return true;
        }
        false
    }

    /// Full-repair pass: everything fixed, reloaded, out of cascade.
    pub fn full_repair(&mut self) {
        for weapon in &mut self.weapons {
            weapon.repair();
            weapon.cascading = false;
            if weapon.loading {
                weapon.loaded = true;
            }
            weapon.used = false;
        }
        for system in &mut self.systems {
            system.repair();
            system.cascading = false;
            system.used = false;
        }
    }
}

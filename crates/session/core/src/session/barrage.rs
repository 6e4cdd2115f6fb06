//! Staged barrage selection.
//!
//! A barrage fires up to two staged weapons. Each staging is one
//! (weapon, mount) pair, so the weapon list and mount list cannot fall out
//! of step. The superheavy selection is a separate single slot.

use crate::frame::{EquipmentId, MountKind};

use super::Session;

/// One staged weapon with the mount it fires from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarrageSelection {
    pub weapon: EquipmentId,
    pub mount: MountKind,
}

/// Barrage staging methods for [`Session`].
impl Session {
    pub fn barrage_selections(&self) -> &[BarrageSelection] {
        &self.barrage
    }

    pub fn sh_barrage_selection(&self) -> Option<&BarrageSelection> {
        self.sh_barrage.as_ref()
    }

    /// Stages a weapon for the barrage; ignored once two are staged.
    pub fn select_barrage(&mut self, weapon: EquipmentId, mount: MountKind) {
        if !self.barrage.is_full() {
            self.barrage.push(BarrageSelection { weapon, mount });
        }
    }

    /// Unstages the selection carrying the given weapon.
    pub fn remove_barrage(&mut self, weapon: &EquipmentId) {
        if let Some(idx) = self.barrage.iter().position(|s| &s.weapon == weapon) {
            self.barrage.remove(idx);
        }
    }

    pub fn clear_barrage(&mut self) {
        self.barrage.clear();
    }

    pub fn select_sh_barrage(&mut self, weapon: EquipmentId, mount: MountKind) {
        self.sh_barrage = Some(BarrageSelection { weapon, mount });
    }

    pub fn clear_sh_barrage(&mut self) {
        self.sh_barrage = None;
    }
}

//! Statuses, conditions, and resistances carried by a frame.
//!
//! Statuses and conditions are separate lists on the sheet; a few markers
//! (notably Stunned) can legitimately appear on either. Display forms match
//! the uppercase wording used in ledger entries.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::config::SessionConfig;

/// Status markers (self-inflicted or stance-like).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Engaged,
    Exposed,
    Hidden,
    Invisible,
    Prone,
    #[strum(serialize = "SHUT DOWN")]
    ShutDown,
    Stunned,
}

/// Condition markers (typically inflicted by the opposition).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Condition {
    Impaired,
    Immobilized,
    Jammed,
    #[strum(serialize = "LOCK ON")]
    LockOn,
    Shredded,
    Slowed,
    Stunned,
}

bitflags! {
    /// Damage types the frame currently resists.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Resistances: u8 {
        const KINETIC   = 1 << 0;
        const ENERGY    = 1 << 1;
        const EXPLOSIVE = 1 << 2;
        const HEAT      = 1 << 3;
        const BURN      = 1 << 4;
    }
}

impl Resistances {
    /// Name of the first resistance present in `self`, for log wording.
    pub fn first_name(self) -> Option<&'static str> {
        self.iter_names().next().map(|(name, _)| name)
    }
}

macro_rules! marker_list {
    ($(#[$doc:meta])* $name:ident, $marker:ty, $cap:expr) => {
        $(#[$doc])*
        #[derive(Clone, Debug, Default, PartialEq, Eq)]
        pub struct $name {
            markers: ArrayVec<$marker, $cap>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn has(&self, marker: $marker) -> bool {
                self.markers.contains(&marker)
            }

            /// Adds a marker if absent and capacity allows.
            pub fn add(&mut self, marker: $marker) {
                if !self.has(marker) && !self.markers.is_full() {
                    self.markers.push(marker);
                }
            }

            pub fn remove(&mut self, marker: $marker) {
                self.markers.retain(|m| *m != marker);
            }

            pub fn clear(&mut self) {
                self.markers.clear();
            }

            /// Wholesale replacement (used by the shutdown undo and the
            /// status-setting operation).
            pub fn set_all(&mut self, markers: &[$marker]) {
                self.markers.clear();
                for marker in markers {
                    self.add(*marker);
                }
            }

            pub fn as_slice(&self) -> &[$marker] {
                &self.markers
            }

            pub fn iter(&self) -> impl Iterator<Item = &$marker> {
                self.markers.iter()
            }

            pub fn len(&self) -> usize {
                self.markers.len()
            }

            pub fn is_empty(&self) -> bool {
                self.markers.is_empty()
            }
        }
    };
}

marker_list!(
    /// Bounded list of active statuses.
    StatusList,
    Status,
    { SessionConfig::MAX_STATUSES }
);

marker_list!(
    /// Bounded list of active conditions.
    ConditionList,
    Condition,
    { SessionConfig::MAX_CONDITIONS }
);

/// Session tuning constants.
///
/// These are the fixed parameters of the turn economy. They are associated
/// constants rather than runtime fields because the round structure is part
/// of the rules, not a per-table option.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig;

impl SessionConfig {
    /// Action points granted at the top of a normal round.
    pub const ACTIONS_PER_ROUND: i32 = 2;
    /// Action points granted on the round after bracing.
    pub const BRACED_ACTIONS_PER_ROUND: i32 = 1;
    /// Rounds between arming self-destruct and detonation.
    pub const SELF_DESTRUCT_FUSE: u8 = 3;
    /// Weapons that can be staged for a single barrage.
    pub const BARRAGE_WEAPONS: usize = 2;

    // ===== compile-time bounds used as type parameters =====
    pub const MAX_STATUSES: usize = 8;
    pub const MAX_CONDITIONS: usize = 8;
}

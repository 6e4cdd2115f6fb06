//! Deterministic combat-session logic shared across hosts.
//!
//! `session-core` defines the canonical rules of active-mode play: the turn
//! state machine, the action-point economy with its commit/undo receipts,
//! the append-only combat audit log, running statistics, and the compound
//! actions (stabilize, shutdown, overcharge) with their snapshot-based
//! undo. The crate performs no I/O; timestamps and persistence are injected
//! through the seams in [`traits`].
pub mod action;
pub mod config;
pub mod error;
pub mod frame;
pub mod log;
pub mod pilot;
pub mod session;
pub mod stats;
pub mod traits;

pub use action::{ActionDef, ActionKind, ActionRegistry, Activation};
pub use config::SessionConfig;
pub use error::{SessionError, UndoError};
pub use frame::{
    Condition, ConditionList, EquipmentId, Frame, FrameBonus, Loadout, Meter, MountKind,
    Resistances, Status, StatusList, System, Weapon,
};
pub use log::{CombatLog, LogEntry, LogError, LogStamp, LogToken};
pub use pilot::Pilot;
pub use session::{
    ActionReceipt, AttackReceipt, BarrageSelection, HistoryItem, SelfDestruct, Session,
    SessionSnapshot, StabilizeMajor, StabilizeMinor, Stage,
};
pub use stats::CombatStats;
pub use traits::{ChangeNotifier, Clock, FixedClock, NullNotifier};

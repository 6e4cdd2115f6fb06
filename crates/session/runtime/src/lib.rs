//! Host-side adapters for the combat session engine.
//!
//! `session-core` is deterministic and I/O-free; this crate supplies the
//! pieces a real host wires into it:
//! - [`clock`] renders wall-clock time into combat-log stamps
//! - [`store`] autosaves the session snapshot as JSON via the
//!   change-notifier seam
//! - [`codename`] generates mission designations
//!
//! Integration tests for the full commit/undo surface live under `tests/`.

pub mod clock;
pub mod codename;
pub mod store;

pub use clock::SystemClock;
pub use codename::{mission_codename, random_codename};
pub use store::{JsonFileStore, StoreError};

use std::path::PathBuf;

use session_core::{ActionRegistry, Pilot, Session};

/// Builds a session wired to the system clock and a JSON autosave store.
pub fn session_with_autosave(
    pilot: Pilot,
    registry: ActionRegistry,
    save_path: impl Into<PathBuf>,
) -> Session {
    let store = JsonFileStore::new(save_path);
    tracing::info!(
        pilot = pilot.callsign(),
        path = %store.path().display(),
        "starting session with autosave"
    );
    Session::new(pilot, registry, Box::new(SystemClock), Box::new(store))
}

/// Resumes a session from a previously autosaved snapshot.
pub fn resume_session(
    pilot: Pilot,
    registry: ActionRegistry,
    save_path: impl Into<PathBuf>,
) -> Result<Session, StoreError> {
    let store = JsonFileStore::new(save_path);
    let snapshot = store.load()?;
    tracing::info!(
        pilot = pilot.callsign(),
        mission = snapshot.mission,
        round = snapshot.round,
        "resuming session from autosave"
    );
    Ok(Session::restore(
        pilot,
        registry,
        snapshot,
        Box::new(SystemClock),
        Box::new(store),
    ))
}

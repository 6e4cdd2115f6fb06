//! Mission codename generation.
//!
//! Produces the two-word designations stamped into MISSION.START log
//! entries.

use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "SOLEMN", "CRIMSON", "SILENT", "BURNING", "HOLLOW", "IRON", "VIOLET", "LONG", "BROKEN",
    "PALE", "SOVEREIGN", "LUCID", "FERAL", "WINTER", "RADIANT", "BLACK",
];

const NOUNS: &[&str] = &[
    "HARVEST", "LANTERN", "VERDICT", "METEOR", "CHORUS", "RAMPART", "PILGRIM", "SICKLE",
    "HALO", "FURNACE", "CENOTAPH", "MERIDIAN", "TEMPEST", "VIGIL", "CARAVAN", "ANTHEM",
];

/// Draws a codename like `CRIMSON VIGIL` from the given RNG.
pub fn mission_codename<R: Rng + ?Sized>(rng: &mut R) -> String {
    let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.gen_range(0..NOUNS.len())];
    format!("{adjective} {noun}")
}

/// Draws a codename from the thread-local RNG.
pub fn random_codename() -> String {
    mission_codename(&mut rand::thread_rng())
}

//! Action compendium loader.
//!
//! Loads the baseline action definitions from embedded RON data files.

use anyhow::{Context, Result};
use session_core::{ActionDef, ActionRegistry};

/// Loader for the built-in action compendium.
#[derive(Debug, Clone, Copy)]
pub struct Compendium;

impl Compendium {
    /// Loads the baseline standard and tech actions into a fresh registry.
    pub fn load() -> Result<ActionRegistry> {
        let standard: Vec<ActionDef> =
            ron::from_str(include_str!("../data/actions/standard.ron"))
                .context("failed to parse standard.ron")?;
        let tech: Vec<ActionDef> = ron::from_str(include_str!("../data/actions/tech.ron"))
            .context("failed to parse tech.ron")?;
        Ok(ActionRegistry::new(standard, tech))
    }

    /// Parses additional action definitions from caller-supplied RON, for
    /// hosts layering gear actions on top of the baseline.
    pub fn parse_actions(source: &str) -> Result<Vec<ActionDef>> {
        ron::from_str(source).context("failed to parse action definitions")
    }
}

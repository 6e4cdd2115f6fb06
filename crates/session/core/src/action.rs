//! Action collaborator types and the per-session registry.
//!
//! An [`ActionDef`] is one entry of the compendium: what the action is
//! called, what it costs, and its per-round used flag. The session's
//! side-effect dispatch keys off [`ActionKind`] with an exhaustive match,
//! so commit and undo arms cannot drift apart silently.

/// Activation cost category of an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Activation {
    Free,
    Protocol,
    Quick,
    Full,
    Reaction,
    Invade,
    #[strum(serialize = "Quick Tech")]
    QuickTech,
    #[strum(serialize = "Full Tech")]
    FullTech,
}

impl Activation {
    /// Action-point cost of this category.
    ///
    /// Only Quick and Full activations draw from the round budget; every
    /// other category (including tech variants) is untracked.
    pub fn cost(self) -> i32 {
        match self {
            Activation::Quick => 1,
            Activation::Full => 2,
            _ => 0,
        }
    }
}

/// Every action the session can commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    // Standard actions
    Boost,
    BootUp,
    Brace,
    Disengage,
    Dismount,
    Eject,
    Grapple,
    Hide,
    ImprovisedAttack,
    Jockey,
    Mount,
    Overcharge,
    Overwatch,
    Ram,
    Search,
    SelfDestruct,
    ShutDown,
    Skirmish,
    Barrage,
    Stabilize,
    ActivateQuick,
    ActivateFull,
    // Tech actions
    Invade,
    LockOn,
    Bolster,
    Scan,
    QuickTech,
    FullTech,
}

impl ActionKind {
    /// Stable snake_case identifier, used as the ledger entry tag.
    pub fn as_snake_case(self) -> &'static str {
        self.into()
    }
}

/// One compendium entry: the action collaborator.
///
/// Runtime state (the per-round used flag and the activation it was last
/// used at) lives alongside the static definition, as the session resets it
/// wholesale each round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDef {
    kind: ActionKind,
    name: String,
    activation: Activation,
    #[cfg_attr(feature = "serde", serde(default))]
    heat_cost: i32,
    /// Overrides the uppercased name in ledger entries when present.
    #[cfg_attr(feature = "serde", serde(default))]
    log_override: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pilot_usable: bool,
    #[cfg_attr(feature = "serde", serde(default = "ActionDef::default_frame_usable"))]
    frame_usable: bool,
    /// Hidden from the active-mode action list (committed through other UI).
    #[cfg_attr(feature = "serde", serde(default))]
    hidden: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    used: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    last_use: Option<Activation>,
}

impl ActionDef {
    #[cfg(feature = "serde")]
    fn default_frame_usable() -> bool {
        true
    }

    pub fn new(kind: ActionKind, name: impl Into<String>, activation: Activation) -> Self {
        Self {
            kind,
            name: name.into(),
            activation,
            heat_cost: 0,
            log_override: None,
            pilot_usable: false,
            frame_usable: true,
            hidden: false,
            used: false,
            last_use: None,
        }
    }

    pub fn with_heat_cost(mut self, heat: i32) -> Self {
        self.heat_cost = heat;
        self
    }

    pub fn with_log(mut self, log: impl Into<String>) -> Self {
        self.log_override = Some(log.into());
        self
    }

    pub fn pilot_usable(mut self) -> Self {
        self.pilot_usable = true;
        self
    }

    pub fn frame_only(mut self) -> Self {
        self.pilot_usable = false;
        self.frame_usable = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn heat_cost(&self) -> i32 {
        self.heat_cost
    }

    pub fn is_pilot_usable(&self) -> bool {
        self.pilot_usable
    }

    pub fn is_frame_usable(&self) -> bool {
        self.frame_usable
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_used(&self) -> bool {
        self.used
    }

    pub fn last_use(&self) -> Option<Activation> {
        self.last_use
    }

    /// Ledger body for a commit of this action.
    pub fn log_line(&self) -> String {
        match &self.log_override {
            Some(log) => log.clone(),
            None => self.name.to_uppercase(),
        }
    }

    /// Marks the action used at its own activation category.
    pub fn mark_used(&mut self) {
        self.used = true;
        self.last_use = Some(self.activation);
    }

    /// Reverses a single use. The last-use record is kept for display.
    pub fn undo_use(&mut self) {
        self.used = false;
    }

    /// Per-round reset.
    pub fn reset(&mut self) {
        self.used = false;
    }
}

/// The session's view of the compendium: standard and tech action lists.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionRegistry {
    standard: Vec<ActionDef>,
    tech: Vec<ActionDef>,
}

impl ActionRegistry {
    pub fn new(standard: Vec<ActionDef>, tech: Vec<ActionDef>) -> Self {
        Self { standard, tech }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn standard(&self) -> &[ActionDef] {
        &self.standard
    }

    pub fn tech(&self) -> &[ActionDef] {
        &self.tech
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionDef> {
        self.standard.iter().chain(self.tech.iter())
    }

    pub fn get(&self, kind: ActionKind) -> Option<&ActionDef> {
        self.iter().find(|a| a.kind == kind)
    }

    fn get_mut(&mut self, kind: ActionKind) -> Option<&mut ActionDef> {
        self.standard
            .iter_mut()
            .chain(self.tech.iter_mut())
            .find(|a| a.kind == kind)
    }

    /// Marks one action used; returns false if the kind is unregistered.
    pub fn mark_used(&mut self, kind: ActionKind) -> bool {
        match self.get_mut(kind) {
            Some(action) => {
                action.mark_used();
                true
            }
            None => false,
        }
    }

    /// Reverses one use; returns false if the kind is unregistered.
    pub fn undo_use(&mut self, kind: ActionKind) -> bool {
        match self.get_mut(kind) {
            Some(action) => {
                action.undo_use();
                true
            }
            None => false,
        }
    }

    /// Kinds currently marked used, across standard and tech actions.
    pub fn used_kinds(&self) -> Vec<ActionKind> {
        self.iter().filter(|a| a.is_used()).map(|a| a.kind).collect()
    }

    /// Re-marks a set of kinds as used (overcharge undo).
    pub fn mark_all_used(&mut self, kinds: &[ActionKind]) {
        for kind in kinds {
            self.mark_used(*kind);
        }
    }

    /// Per-round reset of every used flag.
    pub fn reset_all(&mut self) {
        for action in self.standard.iter_mut().chain(self.tech.iter_mut()) {
            action.reset();
        }
    }
}

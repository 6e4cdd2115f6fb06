//! Action-point economy: commit, undo, and the side-effect dispatch table.
//!
//! Committing an action the budget cannot cover is not an error: the
//! economy silently absorbs it (no debit, no ledger entry) but the action's
//! toggle effects still apply — mounting, bracing, hiding and the rest work
//! regardless of whether the point cost could be paid. The receipt returned
//! by a commit records exactly what was charged so the matching undo is
//! symmetric by construction.

use crate::action::ActionKind;
use crate::error::{SessionError, UndoError};
use crate::frame::{Condition, Status};
use crate::log::LogToken;

use super::Session;

/// Correlation record returned by [`Session::commit_action`].
///
/// Holds everything the matching undo needs: the amount actually debited,
/// the heat actually applied, and the ledger token (absent when the commit
/// was refused for budget and wrote no entry).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionReceipt {
    kind: ActionKind,
    paid: bool,
    charged: i32,
    heat: i32,
    token: Option<LogToken>,
}

impl ActionReceipt {
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// Whether the cost check passed (the action was marked used and any
    /// ledger entry written).
    pub fn was_paid(&self) -> bool {
        self.paid
    }

    pub fn charged(&self) -> i32 {
        self.charged
    }

    pub fn token(&self) -> Option<LogToken> {
        self.token
    }
}

/// Economy methods for [`Session`].
impl Session {
    /// Commits a discrete action.
    ///
    /// Cost is 1 for Quick, 2 for Full, 0 for every other activation, and 0
    /// when `free`. If the budget covers it, the action is marked used, the
    /// budget debited, any heat cost applied, and a ledger entry appended.
    /// The side-effect dispatch runs in both cases.
    pub fn commit_action(
        &mut self,
        kind: ActionKind,
        free: bool,
    ) -> Result<ActionReceipt, SessionError> {
        let (activation, heat_cost, log_line) = {
            let def = self
                .registry
                .get(kind)
                .ok_or(SessionError::UnknownAction(kind))?;
            (def.activation(), def.heat_cost(), def.log_line())
        };
        let cost = if free { 0 } else { activation.cost() };

        let mut receipt = ActionReceipt {
            kind,
            paid: false,
            charged: 0,
            heat: 0,
            token: None,
        };
        if self.actions >= cost {
            self.registry.mark_used(kind);
            self.actions -= cost;
            if heat_cost != 0 {
                self.frame_mut_ok()?.add_heat(heat_cost);
            }
            let token = self.push_log(
                kind.as_snake_case(),
                activation.to_string().to_uppercase(),
                log_line,
            );
            receipt = ActionReceipt {
                kind,
                paid: true,
                charged: cost,
                heat: heat_cost,
                token: Some(token),
            };
        }

        self.apply_side_effects(kind)?;
        self.notify();
        Ok(receipt)
    }

    /// Reverses a committed action using its receipt.
    ///
    /// Credits back exactly the recorded charge, reverses the used flag and
    /// heat only if the commit applied them, removes the ledger entry by
    /// token, and reverses the side-effect dispatch symmetrically. A stale
    /// or already-consumed token is reported before any state is touched.
    pub fn undo_action(&mut self, receipt: ActionReceipt) -> Result<(), UndoError> {
        if receipt.heat != 0 && self.frame.is_none() {
            return Err(UndoError::NoActiveFrame);
        }
        if let Some(token) = receipt.token {
            self.remove_log(token)?;
        }
        self.actions += receipt.charged;
        if receipt.paid {
            self.registry.undo_use(receipt.kind);
            if receipt.heat != 0 {
                if let Some(frame) = self.frame.as_mut() {
                    frame.reduce_heat(receipt.heat);
                }
            }
        }
        self.revert_side_effects(receipt.kind)?;
        self.notify();
        Ok(())
    }

    /// Applies the action's toggle effects. Runs whether or not the point
    /// cost was paid.
    fn apply_side_effects(&mut self, kind: ActionKind) -> Result<(), SessionError> {
        // Only jockeying sets the flag; any other action ends the ride.
        self.jockeying = kind == ActionKind::Jockey;
        match kind {
            ActionKind::SelfDestruct => self.start_self_destruct(),
            ActionKind::ShutDown => self.commit_shut_down()?,
            ActionKind::BootUp => self.commit_boot_up()?,
            ActionKind::Brace => self.braced = true,
            ActionKind::Dismount => self.pilot_mounted = false,
            ActionKind::Mount => self.pilot_mounted = true,
            ActionKind::Hide => self.frame_mut_ok()?.statuses_mut().add(Status::Hidden),
            ActionKind::Eject => {
                let frame = self.frame_mut_ok()?;
                frame.conditions_mut().add(Condition::Impaired);
                self.pilot_mounted = false;
            }
            _ => {}
        }
        Ok(())
    }

    /// Mirror of [`Session::apply_side_effects`], arm for arm.
    fn revert_side_effects(&mut self, kind: ActionKind) -> Result<(), UndoError> {
        match kind {
            ActionKind::Jockey => self.jockeying = false,
            ActionKind::SelfDestruct => self.cancel_self_destruct(),
            ActionKind::ShutDown => self.undo_shut_down()?,
            ActionKind::BootUp => self.undo_boot_up()?,
            ActionKind::Brace => self.braced = false,
            ActionKind::Dismount => self.pilot_mounted = true,
            ActionKind::Mount => self.pilot_mounted = false,
            ActionKind::Hide => self.frame_mut_ok()?.statuses_mut().remove(Status::Hidden),
            ActionKind::Eject => {
                let frame = self.frame_mut_ok()?;
                frame.conditions_mut().remove(Condition::Impaired);
                self.pilot_mounted = true;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::combat_session;
    use super::*;
    use crate::action::{ActionDef, Activation};

    #[test]
    fn quick_action_debits_one_and_logs() {
        let mut session = combat_session();
        let before = session.log().len();

        let receipt = session.commit_action(ActionKind::Skirmish, false).unwrap();
        assert!(receipt.was_paid());
        assert_eq!(receipt.charged(), 1);
        assert_eq!(session.actions(), 1);
        assert_eq!(session.log().len(), before + 1);
        assert_eq!(session.log().last().unwrap().event, "QUICK");
        assert!(session.registry().get(ActionKind::Skirmish).unwrap().is_used());
    }

    #[test]
    fn free_commit_costs_nothing_but_still_logs() {
        let mut session = combat_session();
        let receipt = session.commit_action(ActionKind::Barrage, true).unwrap();
        assert!(receipt.was_paid());
        assert_eq!(receipt.charged(), 0);
        assert_eq!(session.actions(), 2);
        assert_eq!(session.log().last().unwrap().event, "FULL");
    }

    #[test]
    fn commit_then_undo_is_a_round_trip() {
        let mut session = combat_session();
        let actions = session.actions();
        let log_len = session.log().len();

        let receipt = session.commit_action(ActionKind::Barrage, false).unwrap();
        assert_eq!(session.actions(), actions - 2);

        session.undo_action(receipt).unwrap();
        assert_eq!(session.actions(), actions);
        assert_eq!(session.log().len(), log_len);
        assert!(!session.registry().get(ActionKind::Barrage).unwrap().is_used());
    }

    #[test]
    fn unaffordable_commit_is_absorbed_but_side_effects_run() {
        let mut session = combat_session();
        session.actions = 1;
        let log_len = session.log().len();

        // Dismount is a full action the budget cannot cover.
        let receipt = session.commit_action(ActionKind::Dismount, false).unwrap();
        assert!(!receipt.was_paid());
        assert_eq!(receipt.charged(), 0);
        assert!(receipt.token().is_none());
        assert_eq!(session.actions(), 1);
        assert_eq!(session.log().len(), log_len);
        // The toggle still applied.
        assert!(!session.is_mounted());

        // And the undo reverses only what was done.
        session.undo_action(receipt).unwrap();
        assert_eq!(session.actions(), 1);
        assert!(session.is_mounted());
    }

    #[test]
    fn heat_cost_applies_and_reverses() {
        let mut session = combat_session();
        // Swap in a tech action with a heat cost.
        let registry = super::super::testing::test_registry();
        session.registry = crate::action::ActionRegistry::new(
            registry.standard().to_vec(),
            vec![ActionDef::new(ActionKind::FullTech, "Full Tech", Activation::FullTech)
                .with_heat_cost(2)],
        );

        let receipt = session.commit_action(ActionKind::FullTech, false).unwrap();
        assert_eq!(session.frame().unwrap().current_heat(), 2);
        assert_eq!(session.log().last().unwrap().event, "FULL TECH");

        session.undo_action(receipt).unwrap();
        assert_eq!(session.frame().unwrap().current_heat(), 0);
    }

    #[test]
    fn jockeying_is_exclusive_to_the_jockey_action() {
        let mut session = combat_session();
        session.set_mounted(false);
        session.commit_action(ActionKind::Jockey, false).unwrap();
        assert!(session.is_jockeying());

        session.commit_action(ActionKind::Skirmish, false).unwrap();
        assert!(!session.is_jockeying());
    }

    #[test]
    fn eject_impairs_and_dismounts_and_undo_remounts() {
        let mut session = combat_session();
        let receipt = session.commit_action(ActionKind::Eject, false).unwrap();
        assert!(!session.is_mounted());
        assert!(session.frame().unwrap().conditions().has(Condition::Impaired));

        session.undo_action(receipt).unwrap();
        assert!(session.is_mounted());
        assert!(!session.frame().unwrap().conditions().has(Condition::Impaired));
    }

    #[test]
    fn self_destruct_action_arms_the_fuse_and_undo_disarms() {
        let mut session = combat_session();
        let receipt = session.commit_action(ActionKind::SelfDestruct, false).unwrap();
        assert_eq!(session.self_destruct_counter(), Some(3));

        session.undo_action(receipt).unwrap();
        assert_eq!(session.self_destruct_counter(), None);
    }

    #[test]
    fn unregistered_action_is_reported() {
        let mut session = combat_session();
        assert_eq!(
            session.commit_action(ActionKind::Ram, false),
            Err(SessionError::UnknownAction(ActionKind::Ram))
        );
    }

    #[test]
    fn stale_token_undo_is_reported() {
        let mut session = combat_session();
        let receipt = session.commit_action(ActionKind::Skirmish, false).unwrap();
        session.undo_action(receipt.clone()).unwrap();

        // The entry is gone; a second undo must not silently corrupt state.
        let actions = session.actions();
        let err = session.undo_action(receipt).unwrap_err();
        assert!(matches!(err, UndoError::Log(_)));
        assert_eq!(session.actions(), actions);
    }

    #[test]
    fn available_actions_follow_frame_state() {
        let mut session = combat_session();
        session.commit_action(ActionKind::ShutDown, false).unwrap();
        assert_eq!(
            session.available_actions(),
            vec![ActionKind::BootUp, ActionKind::Dismount, ActionKind::Eject]
        );

        session.commit_action(ActionKind::BootUp, false).unwrap();
        assert!(session.available_actions().contains(&ActionKind::Skirmish));

        session.set_mounted(false);
        let pilot_actions = session.available_actions();
        assert!(pilot_actions.contains(&ActionKind::Mount));
        assert!(!pilot_actions.contains(&ActionKind::Skirmish));
    }
}

//! Compound actions: stabilize, shutdown/boot-up, and overcharge.
//!
//! Each commit records a snapshot of exactly the state it is about to
//! touch; the matching undo consumes the snapshot and restores it. The
//! three snapshots are distinct types in distinct slots, so one compound
//! action's undo can never read another's leftovers. Committing the same
//! kind again before undoing overwrites the snapshot (last writer wins) —
//! one-level undo discipline is the caller's contract.

use crate::action::ActionKind;
use crate::error::{SessionError, UndoError};
use crate::frame::{Condition, EquipmentId, Status};
use crate::log::LogToken;

use super::Session;
use super::economy::ActionReceipt;

/// Major stabilize choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StabilizeMajor {
    /// Vent the reactor: heat to zero, Exposed cleared.
    Cool,
    /// Field repair: one repair point for full HP.
    Repair,
}

/// Minor stabilize choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StabilizeMinor {
    /// Reload every loading weapon.
    Reload,
    /// End ongoing burn.
    EndBurn,
    /// Shake off one self condition (resolved at the table; cost only).
    EndSelfCondition,
    /// Clear an adjacent ally's condition (cost only).
    EndAllyCondition,
}

/// Pre-mutation snapshot for one stabilize.
#[derive(Clone, Debug)]
pub(crate) struct StabilizeUndo {
    major: StabilizeMajor,
    minor: StabilizeMinor,
    heat: i32,
    hp: i32,
    reloads: Vec<EquipmentId>,
    burn: i32,
    exposed: bool,
    charged: i32,
    token: LogToken,
}

/// Pre-mutation snapshot for one shutdown.
#[derive(Clone, Debug)]
pub(crate) struct ShutdownUndo {
    heat: i32,
    cascade: Vec<EquipmentId>,
    statuses: Vec<Status>,
    conditions: Vec<Condition>,
}

/// Pre-mutation snapshot for one overcharge.
#[derive(Clone, Debug)]
pub(crate) struct OverchargeUndo {
    used: Vec<ActionKind>,
    receipt: ActionReceipt,
    heat: i32,
}

/// Compound-action methods for [`Session`].
impl Session {
    /// Stabilize: a full-action (2 point) defensive reset with one major
    /// and one minor benefit. The debit saturates at zero and the amount
    /// actually charged is recorded for the refund.
    pub fn commit_stabilize(
        &mut self,
        major: StabilizeMajor,
        minor: StabilizeMinor,
    ) -> Result<(), SessionError> {
        self.frame_ref()?;
        let charged = self.actions.clamp(0, 2);
        self.actions -= charged;

        let (heat, hp, reloads, burn, exposed) = {
            let frame = self.frame_ref()?;
            (
                frame.current_heat(),
                frame.current_hp(),
                frame.loadout().unloaded_loading_ids(),
                frame.burn(),
                frame.statuses().has(Status::Exposed),
            )
        };

        let mut detail = String::from("FRAME.ROOT.DEF//STABILIZE");
        if let Some(frame) = self.frame.as_mut() {
            match major {
                StabilizeMajor::Cool => {
                    detail.push_str(" ::REACTOR_VENT");
                    frame.set_current_heat(0);
                    frame.statuses_mut().remove(Status::Exposed);
                }
                StabilizeMajor::Repair => {
                    detail.push_str(" ::REPAIR");
                    frame.spend_repairs(1);
                    let max = frame.max_hp();
                    frame.set_current_hp(max);
                }
            }
            match minor {
                StabilizeMinor::Reload => {
                    detail.push_str(" ::RELOAD");
                    frame.loadout_mut().reload_all();
                }
                StabilizeMinor::EndBurn => {
                    detail.push_str(" ::END.BURN");
                    frame.set_burn(0);
                }
                StabilizeMinor::EndSelfCondition => detail.push_str(" ::SYS.RESTORE"),
                StabilizeMinor::EndAllyCondition => detail.push_str(" ::REMOTE.ASSIST"),
            }
        }

        let token = self.push_log("stabilize", "STABILIZE", detail);
        self.stabilize_undo = Some(StabilizeUndo {
            major,
            minor,
            heat,
            hp,
            reloads,
            burn,
            exposed,
            charged,
            token,
        });
        self.notify();
        Ok(())
    }

    /// Reverses the pending stabilize: refunds the recorded debit, removes
    /// the ledger entry, and restores the major- and minor-specific state.
    pub fn undo_stabilize(&mut self) -> Result<(), UndoError> {
        if self.frame.is_none() {
            return Err(UndoError::NoActiveFrame);
        }
        let undo = self
            .stabilize_undo
            .take()
            .ok_or(UndoError::NothingPending("stabilize"))?;
        if let Err(err) = self.remove_log(undo.token) {
            self.stabilize_undo = Some(undo);
            return Err(err.into());
        }

        self.actions += undo.charged;
        if let Some(frame) = self.frame.as_mut() {
            match undo.major {
                StabilizeMajor::Cool => {
                    frame.set_current_heat(undo.heat);
                    if undo.exposed {
                        frame.statuses_mut().add(Status::Exposed);
                    }
                }
                StabilizeMajor::Repair => {
                    frame.restore_repairs(1);
                    frame.set_current_hp(undo.hp);
                }
            }
            match undo.minor {
                StabilizeMinor::Reload => {
                    for id in &undo.reloads {
                        frame.loadout_mut().set_loaded(id, false);
                    }
                }
                StabilizeMinor::EndBurn => frame.set_burn(undo.burn),
                StabilizeMinor::EndSelfCondition | StabilizeMinor::EndAllyCondition => {}
            }
        }
        self.notify();
        Ok(())
    }

    /// Enters the shut-down compound state: heat vented, Exposed and the
    /// tech-inflicted conditions cleared, cascades stopped, and the frame
    /// marked SHUT DOWN and STUNNED. No economy cost of its own; reached
    /// through the shutdown action's dispatch.
    pub fn commit_shut_down(&mut self) -> Result<(), SessionError> {
        let undo = {
            let frame = self.frame_mut_ok()?;
            let undo = ShutdownUndo {
                heat: frame.current_heat(),
                cascade: frame.loadout().cascading_ids(),
                statuses: frame.statuses().as_slice().to_vec(),
                conditions: frame.conditions().as_slice().to_vec(),
            };
            frame.set_current_heat(0);
            frame.statuses_mut().remove(Status::Exposed);
            frame.conditions_mut().remove(Condition::Jammed);
            frame.conditions_mut().remove(Condition::LockOn);
            frame.loadout_mut().clear_cascades();
            frame.statuses_mut().add(Status::ShutDown);
            frame.statuses_mut().add(Status::Stunned);
            undo
        };
        self.shutdown_undo = Some(undo);
        self.notify();
        Ok(())
    }

    /// Reverses the pending shutdown: restores heat, re-flags previously
    /// cascading equipment, and replaces the status and condition lists
    /// wholesale with their pre-shutdown contents.
    pub fn undo_shut_down(&mut self) -> Result<(), UndoError> {
        if self.frame.is_none() {
            return Err(UndoError::NoActiveFrame);
        }
        let undo = self
            .shutdown_undo
            .take()
            .ok_or(UndoError::NothingPending("shutdown"))?;
        if let Some(frame) = self.frame.as_mut() {
            frame.set_current_heat(undo.heat);
            frame.loadout_mut().restore_cascades(&undo.cascade);
            frame.statuses_mut().set_all(&undo.statuses);
            frame.conditions_mut().set_all(&undo.conditions);
        }
        self.notify();
        Ok(())
    }

    /// Boot-up clears the shut-down markers.
    pub fn commit_boot_up(&mut self) -> Result<(), SessionError> {
        let frame = self.frame_mut_ok()?;
        frame.statuses_mut().remove(Status::ShutDown);
        frame.statuses_mut().remove(Status::Stunned);
        self.notify();
        Ok(())
    }

    pub fn undo_boot_up(&mut self) -> Result<(), UndoError> {
        let frame = self.frame_mut_ok()?;
        frame.statuses_mut().add(Status::ShutDown);
        frame.statuses_mut().add(Status::Stunned);
        self.notify();
        Ok(())
    }

    /// Overcharge: resets every spent action, commits the chosen one again
    /// through the economy, grants a bonus action point, takes the rolled
    /// heat, and advances the overcharge track (capped at its length).
    pub fn commit_overcharge(&mut self, kind: ActionKind, heat: i32) -> Result<(), SessionError> {
        self.frame_ref()?;
        let used = self.registry.used_kinds();
        self.registry.reset_all();
        let receipt = self.commit_action(kind, false)?;
        self.actions += 1;
        if let Some(frame) = self.frame.as_mut() {
            frame.add_heat(heat);
            let level = frame.overcharge_level();
            if level < frame.overcharge_track_len() {
                frame.set_overcharge_level(level + 1);
            }
        }
        self.overcharge_undo = Some(OverchargeUndo {
            used,
            receipt,
            heat,
        });
        self.notify();
        Ok(())
    }

    /// Reverses the pending overcharge: re-marks the snapshotted actions
    /// used, undoes the chosen action, revokes the bonus point, removes the
    /// heat, and steps the overcharge track back (floored at zero).
    pub fn undo_overcharge(&mut self) -> Result<(), UndoError> {
        if self.frame.is_none() {
            return Err(UndoError::NoActiveFrame);
        }
        let undo = self
            .overcharge_undo
            .take()
            .ok_or(UndoError::NothingPending("overcharge"))?;
        self.registry.mark_all_used(&undo.used);
        self.undo_action(undo.receipt)?;
        self.actions -= 1;
        if let Some(frame) = self.frame.as_mut() {
            frame.reduce_heat(undo.heat);
            let level = frame.overcharge_level();
            if level > 0 {
                frame.set_overcharge_level(level - 1);
            }
        }
        self.notify();
        Ok(())
    }
}

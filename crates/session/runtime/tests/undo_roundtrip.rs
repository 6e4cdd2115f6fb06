//! Commit/undo symmetry over the full action surface.

use session_content::Compendium;
use session_core::{
    ActionKind, FixedClock, Frame, Loadout, MountKind, NullNotifier, Pilot, StabilizeMajor,
    StabilizeMinor, System, UndoError, Weapon,
};

fn test_frame() -> Frame {
    Frame::new("Everest")
        .with_hp(10)
        .with_structure(4)
        .with_stress(4)
        .with_heat_capacity(6)
        .with_repair_capacity(5)
        .with_speed(4)
        .with_loadout(Loadout::new(
            vec![Weapon::new("w_siege_cannon", "Siege Cannon", MountKind::Heavy).loading()],
            vec![System::new("s_comp", "Companion AI")],
        ))
}

fn combat_session() -> session_core::Session {
    let mut session = session_core::Session::new(
        Pilot::new("Kestrel").with_hp(8).with_speed(4),
        Compendium::load().expect("compendium must load"),
        Box::new(FixedClock::default()),
        Box::new(NullNotifier),
    )
    .with_frame(test_frame());
    session.start_combat();
    session
}

/// Commit followed immediately by undo restores budget, ledger length, the
/// mounted flag, and every touched frame field.
#[test]
fn discrete_actions_round_trip() {
    for kind in [
        ActionKind::Skirmish,
        ActionKind::Barrage,
        ActionKind::Hide,
        ActionKind::Brace,
        ActionKind::ShutDown,
        ActionKind::Eject,
        ActionKind::SelfDestruct,
        ActionKind::Grapple,
    ] {
        let mut session = combat_session();
        let actions_before = session.actions();
        let log_before = session.log().len();
        let mounted_before = session.is_mounted();
        let frame_before = session.frame().unwrap().clone();

        let receipt = session.commit_action(kind, false).unwrap();
        session.undo_action(receipt).unwrap();

        assert_eq!(session.actions(), actions_before, "budget for {kind:?}");
        assert_eq!(session.log().len(), log_before, "ledger for {kind:?}");
        assert_eq!(session.is_mounted(), mounted_before, "mount for {kind:?}");
        assert_eq!(
            session.frame().unwrap(),
            &frame_before,
            "frame state for {kind:?}"
        );
        assert_eq!(session.self_destruct_counter(), None, "fuse for {kind:?}");
    }
}

#[test]
fn stabilize_round_trips_under_every_choice_pair() {
    let majors = [StabilizeMajor::Cool, StabilizeMajor::Repair];
    let minors = [
        StabilizeMinor::Reload,
        StabilizeMinor::EndBurn,
        StabilizeMinor::EndSelfCondition,
        StabilizeMinor::EndAllyCondition,
    ];
    for major in majors {
        for minor in minors {
            let mut session = combat_session();
            if let Some(frame) = session.frame_mut() {
                frame.add_heat(4);
                frame.set_current_hp(5);
                frame.set_burn(3);
                frame.loadout_mut().weapons[0].loaded = false;
            }
            let actions_before = session.actions();
            let log_before = session.log().len();
            let frame_before = session.frame().unwrap().clone();

            session.commit_stabilize(major, minor).unwrap();
            session.undo_stabilize().unwrap();

            assert_eq!(session.actions(), actions_before, "{major:?}/{minor:?}");
            assert_eq!(session.log().len(), log_before, "{major:?}/{minor:?}");
            assert_eq!(
                session.frame().unwrap(),
                &frame_before,
                "frame under {major:?}/{minor:?}"
            );
        }
    }
}

#[test]
fn overcharge_round_trips_and_respects_the_track_bounds() {
    let mut session = combat_session();
    let track_len = session.frame().unwrap().overcharge_track_len();

    // Spend an action, then overcharge into a second one.
    session.commit_action(ActionKind::Skirmish, false).unwrap();
    let used_before = session.registry().used_kinds();
    session.commit_overcharge(ActionKind::Grapple, 2).unwrap();
    assert_eq!(session.frame().unwrap().overcharge_level(), 1);
    assert_eq!(session.frame().unwrap().current_heat(), 2);

    session.undo_overcharge().unwrap();
    assert_eq!(session.frame().unwrap().overcharge_level(), 0);
    assert_eq!(session.frame().unwrap().current_heat(), 0);
    assert_eq!(session.registry().used_kinds(), used_before);

    // Repeated commits saturate at the track length.
    for _ in 0..track_len + 3 {
        session.commit_overcharge(ActionKind::Skirmish, 0).unwrap();
    }
    assert_eq!(session.frame().unwrap().overcharge_level(), track_len);
}

#[test]
fn attack_undo_subtracts_exactly_what_was_added() {
    let mut session = combat_session();
    let first = session.log_attack("skirmish", "Siege Cannon", 8, false);
    let second = session.log_attack("skirmish", "Siege Cannon", 5, true);
    assert_eq!(session.stats().damage, 13);
    assert_eq!(session.stats().kills, 1);

    session.undo_attack(second).unwrap();
    assert_eq!(session.stats().damage, 8);
    assert_eq!(session.stats().kills, 0);

    session.undo_attack(first).unwrap();
    assert_eq!(session.stats().damage, 0);
}

#[test]
fn undo_discipline_violations_are_reported_not_absorbed() {
    let mut session = combat_session();

    assert_eq!(
        session.undo_stabilize(),
        Err(UndoError::NothingPending("stabilize"))
    );
    assert_eq!(
        session.undo_overcharge(),
        Err(UndoError::NothingPending("overcharge"))
    );

    let receipt = session.commit_action(ActionKind::Skirmish, false).unwrap();
    session.undo_action(receipt.clone()).unwrap();
    assert!(matches!(
        session.undo_action(receipt),
        Err(UndoError::Log(_))
    ));
}

#[test]
fn interleaved_commits_undo_by_token_not_recency() {
    let mut session = combat_session();
    let first = session.commit_action(ActionKind::Skirmish, true).unwrap();
    let second = session.commit_action(ActionKind::Grapple, true).unwrap();
    let log_len = session.log().len();

    // Undo the older commit first; the newer entry must survive.
    session.undo_action(first).unwrap();
    assert_eq!(session.log().len(), log_len - 1);
    assert_eq!(session.log().last().unwrap().tag, "grapple");

    session.undo_action(second).unwrap();
    assert_eq!(session.log().len(), log_len - 2);
}

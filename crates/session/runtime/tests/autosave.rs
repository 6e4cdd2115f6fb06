//! Autosave wiring: every mutating operation leaves a loadable snapshot.

use session_content::Compendium;
use session_core::{ActionKind, Pilot, Stage};
use session_runtime::{JsonFileStore, resume_session, session_with_autosave};

#[test]
fn mutations_are_mirrored_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut session = session_with_autosave(
        Pilot::new("Kestrel"),
        Compendium::load().unwrap(),
        &path,
    );
    session.start_mission();
    session.commit_action(ActionKind::Skirmish, false).unwrap();

    let stored = JsonFileStore::new(&path).load().unwrap();
    assert_eq!(stored.stage, Stage::Combat);
    assert_eq!(stored.mission, 1);
    assert_eq!(stored.actions, 1);
    assert_eq!(stored, session.snapshot());
}

#[test]
fn resumed_sessions_pick_up_where_they_left_off() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let mut session = session_with_autosave(
            Pilot::new("Kestrel"),
            Compendium::load().unwrap(),
            &path,
        );
        session.start_mission();
        session.next_round();
        session.next_round();
    }

    let resumed = resume_session(
        Pilot::new("Kestrel"),
        Compendium::load().unwrap(),
        &path,
    )
    .unwrap();
    assert_eq!(resumed.stage(), Stage::Combat);
    assert_eq!(resumed.mission(), 1);
    assert_eq!(resumed.round(), 3);
    assert!(resumed.is_mounted());
}

#[test]
fn resuming_without_a_save_reports_the_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = resume_session(
        Pilot::new("Kestrel"),
        Compendium::load().unwrap(),
        dir.path().join("absent.json"),
    );
    assert!(result.is_err());
}

use std::time::Duration;

use npc_app::actions::AppAction;
use npc_app::driver::AppDriver;
use npc_app::prefs::{load_prefs_from, save_prefs_to, AppPrefs};
use npc_app::script::run_script;
use npc_core::{Persona, PersonaSlot, Position, RayHit, SpawnRequest};

fn spawn_at(driver: &mut AppDriver, x: f32, persona: Option<usize>) {
    driver
        .dispatch(AppAction::SetSpawnPosition(Position::new(x, 0.0, 0.0)))
        .expect("position");
    driver
        .dispatch(AppAction::SelectPersona(persona))
        .expect("persona");
    driver.dispatch(AppAction::Spawn).expect("spawn");
}

#[test]
fn e2e_hist_001_two_spawns_undo_redo() {
    let mut driver = AppDriver::new();
    spawn_at(&mut driver, 1.0, Some(0));
    spawn_at(&mut driver, 2.0, Some(1));
    let first = driver.state().records()[0].handle;
    let second = driver.state().records()[1].handle;

    driver.dispatch(AppAction::Undo).expect("undo");
    let snapshot = driver.snapshot();
    assert!(snapshot.can_undo);
    assert!(snapshot.can_redo);
    assert_eq!(snapshot.npc_count, 1);
    assert_eq!(driver.state().records()[0].handle, first);

    driver.dispatch(AppAction::Redo).expect("redo");
    let snapshot = driver.snapshot();
    assert!(!snapshot.can_redo);
    assert_eq!(snapshot.npc_count, 2);
    let recreated = &driver.state().records()[1];
    assert_ne!(recreated.handle, second);
    assert_eq!(recreated.position, Position::new(2.0, 0.0, 0.0));
    assert_eq!(
        recreated.persona,
        PersonaSlot::Assigned(Persona::new("merchant", "Merchant"))
    );
}

#[test]
fn e2e_hist_002_undo_on_empty_is_quiet() {
    let mut driver = AppDriver::new();
    driver.dispatch(AppAction::Undo).expect("undo");
    driver.dispatch(AppAction::Redo).expect("redo");
    let snapshot = driver.snapshot();
    assert!(!snapshot.can_undo);
    assert!(!snapshot.can_redo);
    assert_eq!(snapshot.status, "");
}

#[test]
fn e2e_hist_003_new_spawn_discards_redo() {
    let mut driver = AppDriver::new();
    spawn_at(&mut driver, 1.0, None);
    spawn_at(&mut driver, 2.0, None);
    driver.dispatch(AppAction::Undo).expect("undo");
    driver.dispatch(AppAction::Undo).expect("undo");
    assert_eq!(driver.snapshot().redo_depth, 2);

    driver
        .dispatch(AppAction::SpawnAt(SpawnRequest::at(Position::new(9.0, 0.0, 9.0))))
        .expect("spawn");
    let snapshot = driver.snapshot();
    assert_eq!(snapshot.undo_depth, 1);
    assert_eq!(snapshot.redo_depth, 0);
    assert!(!snapshot.can_redo);
}

#[test]
fn e2e_target_001_active_npc_follows_aim_and_undo() {
    let mut driver = AppDriver::new();
    spawn_at(&mut driver, 3.0, Some(2));
    let handle = driver.state().records()[0].handle;
    let frame = Duration::from_millis(16);

    driver
        .dispatch(AppAction::Aim(Some(RayHit { handle, distance: 3.0 }), frame))
        .expect("aim");
    assert_eq!(driver.snapshot().active_target, Some(handle));

    // A short glance away keeps the conversation going.
    driver.dispatch(AppAction::Aim(None, frame)).expect("miss");
    assert_eq!(driver.snapshot().active_target, Some(handle));

    driver.dispatch(AppAction::Undo).expect("undo");
    assert_eq!(driver.snapshot().active_target, None);
}

#[test]
fn e2e_prefs_001_limit_and_capacity_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("prefs.json");
    let mut prefs = AppPrefs::default();
    prefs.history_limit = 2;
    prefs.roster.max_npcs = Some(3);
    save_prefs_to(&prefs, &path).expect("save");

    let mut driver = AppDriver::with_prefs(load_prefs_from(&path).expect("load"));
    for x in 0..3 {
        spawn_at(&mut driver, x as f32, None);
    }
    assert!(driver.dispatch(AppAction::Spawn).is_err());

    let snapshot = driver.snapshot();
    assert_eq!(snapshot.npc_count, 3);
    assert_eq!(snapshot.undo_depth, 2);
}

#[test]
fn e2e_script_001_replay() {
    let mut driver = AppDriver::new();
    let script = "\
# two guides, one taken back
spawn 0 0 0 guide
spawn 2 0 1 guard 3
undo
spawn 5 0 5
persona 1 merchant
";
    let steps = run_script(&mut driver, script).expect("run");
    assert_eq!(steps, 5);

    let records = driver.state().records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].persona.display_name(), "Merchant");
    assert_eq!(records[1].persona, PersonaSlot::Default);
    assert_eq!(driver.snapshot().redo_depth, 0);
}

#[test]
fn e2e_hist_004_clear_keeps_npcs_and_disables_history() {
    let mut driver = AppDriver::new();
    spawn_at(&mut driver, 1.0, None);
    spawn_at(&mut driver, 2.0, None);
    driver.dispatch(AppAction::Undo).expect("undo");

    driver.dispatch(AppAction::ClearHistory).expect("clear");
    let snapshot = driver.snapshot();
    assert_eq!(snapshot.npc_count, 1);
    assert!(!snapshot.can_undo);
    assert!(!snapshot.can_redo);
    assert_eq!(snapshot.status, "History cleared");
}

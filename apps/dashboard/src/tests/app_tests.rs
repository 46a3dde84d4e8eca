use super::*;

use chrono::NaiveDate;
use crossbeam_channel::bounded;
use shared::{domain::Gender, protocol::FestivalRecord};
use storage::{MemoryStore, USER_INFO_KEY};

struct Harness {
    app: DashboardApp<MemoryStore>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
}

fn harness_with(store: MemoryStore, start: Route) -> Harness {
    let (cmd_tx, cmd_rx) = bounded(16);
    let (ui_tx, ui_rx) = bounded(16);
    let app = DashboardApp::new(cmd_tx, ui_rx, ProfileStore::new(store), 1000, start);
    Harness { app, cmd_rx, ui_tx }
}

fn harness(start: Route) -> Harness {
    harness_with(MemoryStore::default(), start)
}

fn profile() -> UserProfile {
    UserProfile {
        name: "Jung".into(),
        birthdate: NaiveDate::from_ymd_opt(1995, 3, 14).expect("date"),
        gender: Gender::Female,
    }
}

fn drain(rx: &Receiver<BackendCommand>) -> Vec<BackendCommand> {
    rx.try_iter().collect()
}

#[test]
fn home_mount_requests_every_home_field() {
    let h = harness(Route::Home);
    let commands = drain(&h.cmd_rx);
    assert_eq!(commands.len(), 3);
    assert!(commands
        .iter()
        .all(|cmd| matches!(cmd, BackendCommand::LoadHomeField { .. })));
    assert!(h.app.onboarding.is_open(), "no stored profile opens onboarding");
}

#[test]
fn festival_results_apply_only_to_the_live_mount() {
    let mut h = harness(Route::FestivalList);
    let first = match drain(&h.cmd_rx).as_slice() {
        [BackendCommand::LoadFestivals {
            generation,
            num_of_rows,
        }] => {
            assert_eq!(*num_of_rows, 1000);
            *generation
        }
        other => panic!("unexpected commands: {other:?}"),
    };

    h.app.navigate(Route::Counter);
    h.app.navigate(Route::FestivalList);
    let second = match drain(&h.cmd_rx).as_slice() {
        [BackendCommand::LoadFestivals { generation, .. }] => *generation,
        other => panic!("unexpected commands: {other:?}"),
    };
    assert_ne!(first, second);

    h.ui_tx
        .send(UiEvent::FestivalsLoaded {
            generation: first,
            records: vec![FestivalRecord::named("stale", Some("2030-01-01"))],
        })
        .expect("send");
    h.app.process_ui_events();
    match h.app.view() {
        ActiveView::Festivals(page) => assert!(page.is_loading(), "stale result ignored"),
        other => panic!("unexpected view: {other:?}"),
    }

    h.app.apply_event(UiEvent::FestivalsLoaded {
        generation: second,
        records: vec![FestivalRecord::named("fresh", Some("2030-01-01"))],
    });
    match h.app.view() {
        ActiveView::Festivals(page) => {
            assert!(!page.is_loading());
            assert_eq!(page.records()[0].name, "fresh");
        }
        other => panic!("unexpected view: {other:?}"),
    }
}

#[test]
fn home_fields_from_an_unmounted_home_are_dropped() {
    let mut h = harness(Route::Home);
    let generation = match drain(&h.cmd_rx).first() {
        Some(BackendCommand::LoadHomeField { generation, .. }) => *generation,
        other => panic!("unexpected command: {other:?}"),
    };

    h.app.navigate(Route::Home);
    h.app.apply_event(UiEvent::HomeFieldLoaded {
        generation,
        field: HomeField::Message,
        text: "old".into(),
    });
    match h.app.view() {
        ActiveView::Home(home) => assert_eq!(home.greeting(None), ""),
        other => panic!("unexpected view: {other:?}"),
    }
}

#[test]
fn submitted_profile_is_persisted_and_current() {
    let mut h = harness(Route::Counter);
    h.app.submit_profile(profile());
    assert_eq!(h.app.profile(), Some(&profile()));
    assert_eq!(h.app.profile_store.load(), Some(profile()));

    let store = std::mem::replace(&mut h.app.profile_store, ProfileStore::new(MemoryStore::default()))
        .into_inner();
    assert!(store.get(USER_INFO_KEY).is_some());

    let reopened = harness_with(store, Route::Counter);
    assert_eq!(reopened.app.profile(), Some(&profile()));
    assert!(!reopened.app.onboarding.is_open());
}

#[test]
fn profile_editor_prefills_current_profile() {
    let mut h = harness(Route::Counter);
    h.app.submit_profile(profile());
    h.app.open_profile_editor();
    assert!(h.app.onboarding.is_open());
    assert_eq!(h.app.onboarding.draft_mut().name, "Jung");
}

#[test]
fn unknown_paths_mount_not_found_and_views_reset_on_navigation() {
    let mut h = harness(Route::from_path("/missing"));
    assert!(matches!(h.app.view(), ActiveView::NotFound(path) if path == "/missing"));
    assert!(drain(&h.cmd_rx).is_empty());

    h.app.navigate(Route::Counter);
    if let ActiveView::Counter(counter) = &mut h.app.view {
        counter.apply(crate::widgets::CounterAction::Increment);
    }
    h.app.navigate(Route::TodoList);
    h.app.navigate(Route::Counter);
    match h.app.view() {
        ActiveView::Counter(counter) => assert_eq!(counter.value(), 0),
        other => panic!("unexpected view: {other:?}"),
    }
    assert_eq!(h.app.route(), &Route::Counter);
}

#[test]
fn backend_unavailable_surfaces_status() {
    let mut h = harness(Route::Counter);
    h.app
        .apply_event(UiEvent::BackendUnavailable("backend worker startup failure".into()));
    assert_eq!(
        h.app.status.as_deref(),
        Some("backend worker startup failure")
    );
}

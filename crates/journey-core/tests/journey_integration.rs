//! Integration tests for journey derivation and completion toggles.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use journey_core::providers::read_snapshot;
use journey_core::{
    CompletionStore, Config, CurriculumUnit, ExternalProgress, JourneyEngine, JourneySnapshot,
    MemoryStore, MilestoneIcon, MilestoneKind, Phase, ProgramWindow, Task, UnitSchedule,
    UnitStatus, UrgencyTier,
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn noon(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
}

fn cohort() -> JourneySnapshot {
    JourneySnapshot {
        window: Some(ProgramWindow::new(d(2025, 6, 10), Some(d(2025, 6, 13)))),
        units: vec![
            CurriculumUnit::new("kickoff", 0, "Kickoff")
                .with_schedule(UnitSchedule::Offset(0))
                .with_milestone(MilestoneKind::Kickoff),
            CurriculumUnit::new("workshop", 1, "Mentor workshop")
                .with_schedule(UnitSchedule::Offset(1))
                .with_milestone(MilestoneKind::from_key("mentor")),
            CurriculumUnit::new("demo", 2, "Demo day")
                .with_schedule(UnitSchedule::Date(d(2025, 6, 13)))
                .with_reveal_days_before(2),
        ],
        tasks: vec![
            Task::new("passport", "kickoff").due_days_before_start(3).linked_to("travel"),
            Task::new("profile", "kickoff").due_days_before_start(5),
            Task::new("reading", "workshop").optional(),
            Task::new("deck", "demo").due_days_before_start(-3),
        ],
        ..Default::default()
    }
}

#[test]
fn overdue_scenario_from_start_and_offset() {
    let engine = JourneyEngine::default();
    let view = engine.derive(&cohort(), noon(d(2025, 6, 8)));
    let passport = view.task("passport").unwrap();
    assert_eq!(passport.urgency.due_date, Some(d(2025, 6, 7)));
    assert_eq!(passport.urgency.days_until_due, Some(-1));
    assert_eq!(passport.urgency.tier, UrgencyTier::Overdue);
}

#[test]
fn reveal_window_scenario() {
    let engine = JourneyEngine::default();
    let snapshot = cohort();

    let nine_out = engine.derive(&snapshot, noon(d(2025, 6, 1)));
    assert_eq!(nine_out.days_until_start, Some(9));
    assert!(!nine_out.unit("kickoff").unwrap().is_revealed);

    let five_out = engine.derive(&snapshot, noon(d(2025, 6, 5)));
    assert!(five_out.unit("kickoff").unwrap().is_revealed);
    assert!(!five_out.unit("demo").unwrap().is_revealed);
    assert_eq!(five_out.unit("demo").unwrap().display_title("???"), "???");
}

#[test]
fn walks_through_the_program() {
    let engine = JourneyEngine::default();
    let snapshot = cohort();
    let mut store = MemoryStore::new(snapshot.clone());

    let day1 = engine.derive(&snapshot, noon(d(2025, 6, 10)));
    assert_eq!(day1.phase, Some(Phase::During));
    assert_eq!(day1.current_unit_id.as_deref(), Some("kickoff"));

    // finish kickoff's required tasks; passport via the travel checklist
    store.set_external("travel", ExternalProgress::new(3, 3));
    let snap = store.data().clone();
    engine
        .toggle_task(&mut store, &snap, "profile", noon(d(2025, 6, 11)))
        .unwrap();
    let snap = store.data().clone();

    let day2 = engine.derive(&snap, noon(d(2025, 6, 11)));
    assert_eq!(day2.unit("kickoff").unwrap().status, UnitStatus::Completed);
    assert!(day2.unit("kickoff").unwrap().is_all_done());
    assert_eq!(day2.current_unit_id.as_deref(), Some("workshop"));
    assert_eq!(day2.unit("demo").unwrap().status, UnitStatus::Upcoming);
    assert_eq!(day2.unit("workshop").unwrap().icon, MilestoneIcon::Users);
    assert!(day2.task("passport").unwrap().completion.is_auto_completed);

    let after = engine.derive(&snap, noon(d(2025, 6, 14)));
    assert_eq!(after.phase, Some(Phase::After));
    assert!(after.units.iter().all(|u| u.status == UnitStatus::Completed));
}

#[test]
fn lock_policy_from_config() {
    let mut config = Config::default();
    config.set_value("locking.lock_future_units", "true").unwrap();
    let engine = JourneyEngine::new(config);
    let view = engine.derive(&cohort(), noon(d(2025, 6, 10)));
    assert_eq!(view.unit("kickoff").unwrap().status, UnitStatus::Current);
    assert_eq!(view.unit("workshop").unwrap().status, UnitStatus::Locked);
    assert_eq!(view.unit("demo").unwrap().status, UnitStatus::Locked);
}

#[test]
fn double_toggle_returns_to_single_toggle_state() {
    let engine = JourneyEngine::default();
    let now = noon(d(2025, 6, 8));
    let mut store = MemoryStore::new(cohort());

    let mut states = Vec::new();
    for _ in 0..3 {
        let snap = store.data().clone();
        let outcome = engine.toggle_task(&mut store, &snap, "profile", now).unwrap();
        assert!(outcome.written);
        let snap = store.data().clone();
        states.push(engine.completion_of(&snap, snap.task("profile").unwrap()));
    }

    assert!(states[0].is_complete);
    assert!(!states[1].is_complete);
    assert_eq!(states[2], states[0]);
    assert!(states.iter().all(|c| !c.is_auto_completed));
}

#[test]
fn explicit_toggle_stops_inference() {
    let engine = JourneyEngine::default();
    let now = noon(d(2025, 6, 8));
    let mut store = MemoryStore::new(cohort());
    store.set_external("travel", ExternalProgress::new(2, 2));

    // auto-completed -> pinned explicit -> cleared
    for _ in 0..2 {
        let snap = store.data().clone();
        engine.toggle_task(&mut store, &snap, "passport", now).unwrap();
    }
    let snap = store.data().clone();
    let c = engine.completion_of(&snap, snap.task("passport").unwrap());
    assert!(!c.is_complete);
    assert!(!c.is_auto_completed);
}

#[test]
fn snapshot_from_providers_matches_direct_snapshot() {
    let engine = JourneyEngine::default();
    let mut store = MemoryStore::new(cohort());
    store.set_external("travel", ExternalProgress::new(1, 2));
    store.log_activity(d(2025, 6, 7));
    store.log_activity(d(2025, 6, 8));
    store
        .set_completion("profile", true, noon(d(2025, 6, 7)))
        .unwrap();

    let snapshot = read_snapshot(&store, &store, &store, &store).unwrap();
    let view = engine.derive(&snapshot, noon(d(2025, 6, 8)));
    assert_eq!(view.streak.length, 2);
    assert!(view.streak.is_active_today);
    assert_eq!(view.required.completed, 1);
    assert_eq!(view.required.total, 3);
    assert_eq!(view.next_action.unwrap().task_id, "passport");
}

#[test]
fn view_serializes_for_presentation() {
    let engine = JourneyEngine::default();
    let view = engine.derive(&cohort(), noon(d(2025, 6, 8)));
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["phase"], "BEFORE");
    assert_eq!(json["units"][0]["status"], "upcoming");
    assert_eq!(json["units"][0]["tasks"][0]["urgency"]["tier"], "overdue");
}

//! Integration tests for the session workflow.
//!
//! Covers the full path from schedule mutations through journal
//! reconciliation, status resolution and the refresh snapshot.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use medtimer_core::{DoseStatus, Session};
use rand::rngs::mock::StepRng;

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 10)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn rng() -> StepRng {
    StepRng::new(0, 1)
}

#[test]
fn dose_before_schedule_time_is_upcoming() {
    let mut session = Session::new();
    session.add_medicine("Metformin", t(9, 0), at(8, 0)).unwrap();

    let overview = session.refresh(at(8, 0), &mut rng());
    assert_eq!(overview.checklist.len(), 1);
    assert_eq!(overview.checklist[0].status, DoseStatus::Upcoming);
}

#[test]
fn dose_past_schedule_time_without_mark_is_missed() {
    let mut session = Session::new();
    session.add_medicine("Metformin", t(9, 0), at(8, 0)).unwrap();

    let overview = session.refresh(at(9, 1), &mut rng());
    assert_eq!(overview.checklist[0].status, DoseStatus::Missed);
}

#[test]
fn marked_dose_is_taken_with_timestamp() {
    let mut session = Session::new();
    let m = session.add_medicine("Metformin", t(9, 0), at(8, 0)).unwrap();

    session.mark_taken(m.id, at(9, 5)).unwrap();
    let overview = session.refresh(at(9, 6), &mut rng());

    assert_eq!(overview.checklist[0].status, DoseStatus::Taken);
    assert_eq!(overview.checklist[0].taken_at, Some(t(9, 5)));
}

#[test]
fn due_soon_window_boundaries() {
    let mut session = Session::new();
    session.add_medicine("Metformin", t(9, 0), at(8, 0)).unwrap();

    let overview = session.refresh(at(8, 56), &mut rng());
    assert_eq!(overview.due_soon.len(), 1);
    assert_eq!(overview.due_soon[0].name, "Metformin");
    assert_eq!(overview.due_soon[0].minutes_until, 4);

    let overview = session.refresh(at(8, 54), &mut rng());
    assert!(overview.due_soon.is_empty());
}

#[test]
fn journal_never_holds_duplicate_day_entries() {
    let mut session = Session::new();
    let m = session.add_medicine("Metformin", t(9, 0), at(8, 0)).unwrap();

    // Repeated refreshes and redundant mutations on the same day.
    for minutes in [0, 5, 30, 120] {
        session.refresh(at(8, 0) + Duration::minutes(minutes), &mut rng());
    }
    session.edit_medicine(m.id, Some("Metformin XR"), None, at(9, 0)).unwrap();
    session.refresh(at(10, 0), &mut rng());

    let day_logs: Vec<_> = session
        .journal()
        .logs()
        .iter()
        .filter(|l| l.medicine_id == m.id && l.date == at(8, 0).date())
        .collect();
    assert_eq!(day_logs.len(), 1);
}

#[test]
fn ids_stay_monotonic_across_deletes() {
    let mut session = Session::new();
    let a = session.add_medicine("A-med", t(8, 0), at(7, 0)).unwrap();
    let b = session.add_medicine("B-med", t(9, 0), at(7, 0)).unwrap();
    session.delete_medicine(a.id, at(7, 30));
    session.delete_medicine(b.id, at(7, 30));
    let c = session.add_medicine("C-med", t(10, 0), at(7, 45)).unwrap();

    assert!(c.id > b.id);
    assert!(b.id > a.id);
}

#[test]
fn midnight_rollover_creates_exactly_one_new_day_entry() {
    let mut session = Session::new();
    let m = session.add_medicine("Metformin", t(9, 0), at(23, 50)).unwrap();
    session.refresh(at(23, 55), &mut rng());

    // Process keeps running past midnight.
    let next_morning = at(23, 55) + Duration::minutes(20);
    assert_ne!(next_morning.date(), at(23, 55).date());
    session.refresh(next_morning, &mut rng());
    session.refresh(next_morning + Duration::minutes(1), &mut rng());

    let new_day: Vec<_> = session
        .journal()
        .logs()
        .iter()
        .filter(|l| l.medicine_id == m.id && l.date == next_morning.date())
        .collect();
    assert_eq!(new_day.len(), 1);
    assert_eq!(new_day[0].status, DoseStatus::Upcoming);
    assert_eq!(session.journal().len(), 2);
}

#[test]
fn deleting_a_medicine_keeps_history_counting() {
    let mut session = Session::new();
    let m = session.add_medicine("Metformin", t(9, 0), at(8, 0)).unwrap();
    session.seed_sample_week(at(8, 0), &mut rng());
    let before = session.refresh(at(8, 30), &mut rng()).adherence;

    session.delete_medicine(m.id, at(8, 45));
    let after = session.refresh(at(9, 0), &mut rng()).adherence;

    // Today's upcoming entry is gone, the six historical days remain.
    assert_eq!(before.scheduled, 7);
    assert_eq!(after.scheduled, 6);
    assert_eq!(after.taken, before.taken);
}

#[test]
fn stale_ids_degrade_to_noops() {
    let mut session = Session::new();
    let m = session.add_medicine("Metformin", t(9, 0), at(8, 0)).unwrap();
    session.delete_medicine(m.id, at(8, 10));

    assert!(session.mark_taken(m.id, at(9, 0)).is_none());
    assert!(session
        .edit_medicine(m.id, Some("Other"), None, at(9, 0))
        .unwrap()
        .is_none());
    assert!(session.delete_medicine(m.id, at(9, 0)).is_none());
}

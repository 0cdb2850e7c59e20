//! Dose journal: one record per (medicine, calendar day).
//!
//! The journal is the permanent adherence record. It is derived from the
//! schedule store but outlives it: deleting a medicine prunes only the
//! current day's entry, while historical entries are retained and keep
//! counting toward adherence.
//!
//! Invariant: at most one `DoseLog` per (medicine_id, date) pair.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::schedule::{MedicineId, ScheduleStore};

/// Status of a single scheduled dose.
///
/// `Upcoming` and `Missed` are clock-derived and recomputed every refresh;
/// `Taken` is sticky once set (there is no un-mark operation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoseStatus {
    Upcoming,
    Taken,
    Missed,
}

impl std::fmt::Display for DoseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let word = match self {
            DoseStatus::Upcoming => "upcoming",
            DoseStatus::Taken => "taken",
            DoseStatus::Missed => "missed",
        };
        f.write_str(word)
    }
}

/// One dose record for a (medicine, calendar day) pair.
///
/// `name` and `scheduled_time` are snapshots copied at creation time. The
/// entry for the current day is re-synced when its medicine is edited;
/// historical entries keep the values they were created with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseLog {
    pub medicine_id: MedicineId,
    pub name: String,
    pub scheduled_time: NaiveTime,
    pub date: NaiveDate,
    pub status: DoseStatus,
    /// Wall-clock time the dose was marked taken. `Some` iff status is `Taken`.
    pub taken_at: Option<NaiveTime>,
}

/// Append-ordered collection of dose logs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoseJournal {
    logs: Vec<DoseLog>,
}

impl DoseJournal {
    pub fn new() -> Self {
        Self { logs: Vec::new() }
    }

    /// Reconcile the journal with the schedule for `date`.
    ///
    /// Creates an `Upcoming` log for every medicine that has none at `date`,
    /// copying the medicine's current name and time. Existing logs at `date`
    /// have their name/time snapshot re-synced so edits to a medicine show
    /// up in the current day's entry; status and `taken_at` are untouched.
    ///
    /// Idempotent: repeated calls never create duplicates. Must run after
    /// every schedule mutation and at the start of every refresh cycle, so
    /// a session crossing midnight converges to exactly one log per
    /// medicine for the new day.
    pub fn ensure_day(&mut self, schedule: &ScheduleStore, date: NaiveDate) {
        for medicine in schedule.list() {
            match self
                .logs
                .iter_mut()
                .find(|l| l.medicine_id == medicine.id && l.date == date)
            {
                Some(log) => {
                    log.name = medicine.name.clone();
                    log.scheduled_time = medicine.time;
                }
                None => self.logs.push(DoseLog {
                    medicine_id: medicine.id,
                    name: medicine.name.clone(),
                    scheduled_time: medicine.time,
                    date,
                    status: DoseStatus::Upcoming,
                    taken_at: None,
                }),
            }
        }
    }

    /// Remove the log for (`id`, `date`) only. Historical entries for other
    /// dates are left intact.
    pub fn prune(&mut self, id: MedicineId, date: NaiveDate) -> Option<DoseLog> {
        let idx = self
            .logs
            .iter()
            .position(|l| l.medicine_id == id && l.date == date)?;
        Some(self.logs.remove(idx))
    }

    /// Insert a log directly, skipping if one already exists for the
    /// (medicine, date) pair. Used by the sample-week generator.
    pub fn insert_if_absent(&mut self, log: DoseLog) -> bool {
        if self.get(log.medicine_id, log.date).is_some() {
            return false;
        }
        self.logs.push(log);
        true
    }

    pub fn get(&self, id: MedicineId, date: NaiveDate) -> Option<&DoseLog> {
        self.logs
            .iter()
            .find(|l| l.medicine_id == id && l.date == date)
    }

    pub fn get_mut(&mut self, id: MedicineId, date: NaiveDate) -> Option<&mut DoseLog> {
        self.logs
            .iter_mut()
            .find(|l| l.medicine_id == id && l.date == date)
    }

    pub fn logs(&self) -> &[DoseLog] {
        &self.logs
    }

    /// Logs dated `date`, mutable, in append order.
    pub fn day_mut(&mut self, date: NaiveDate) -> impl Iterator<Item = &mut DoseLog> + '_ {
        self.logs.iter_mut().filter(move |l| l.date == date)
    }

    /// Logs whose date falls within `[from, to]` inclusive.
    pub fn window(&self, from: NaiveDate, to: NaiveDate) -> Vec<&DoseLog> {
        self.logs
            .iter()
            .filter(|l| l.date >= from && l.date <= to)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn ensure_day_creates_upcoming_logs() {
        let mut schedule = ScheduleStore::new();
        let m = schedule.add("Metformin", t(9, 0)).unwrap();
        let mut journal = DoseJournal::new();

        journal.ensure_day(&schedule, d(10));

        let log = journal.get(m.id, d(10)).unwrap();
        assert_eq!(log.status, DoseStatus::Upcoming);
        assert_eq!(log.name, "Metformin");
        assert_eq!(log.scheduled_time, t(9, 0));
        assert!(log.taken_at.is_none());
    }

    #[test]
    fn ensure_day_is_idempotent() {
        let mut schedule = ScheduleStore::new();
        schedule.add("Metformin", t(9, 0)).unwrap();
        schedule.add("Aspirin", t(21, 0)).unwrap();
        let mut journal = DoseJournal::new();

        journal.ensure_day(&schedule, d(10));
        journal.ensure_day(&schedule, d(10));
        journal.ensure_day(&schedule, d(10));

        assert_eq!(journal.len(), 2);
    }

    #[test]
    fn ensure_day_resyncs_today_snapshot_after_edit() {
        let mut schedule = ScheduleStore::new();
        let m = schedule.add("Metformin", t(9, 0)).unwrap();
        let mut journal = DoseJournal::new();
        journal.ensure_day(&schedule, d(10));

        schedule
            .edit(m.id, Some("Metformin XR"), Some(t(10, 0)))
            .unwrap();
        journal.ensure_day(&schedule, d(10));

        let log = journal.get(m.id, d(10)).unwrap();
        assert_eq!(log.name, "Metformin XR");
        assert_eq!(log.scheduled_time, t(10, 0));
    }

    #[test]
    fn ensure_day_leaves_past_snapshots_alone() {
        let mut schedule = ScheduleStore::new();
        let m = schedule.add("Metformin", t(9, 0)).unwrap();
        let mut journal = DoseJournal::new();
        journal.ensure_day(&schedule, d(9));

        schedule.edit(m.id, Some("Renamed"), None).unwrap();
        journal.ensure_day(&schedule, d(10));

        assert_eq!(journal.get(m.id, d(9)).unwrap().name, "Metformin");
        assert_eq!(journal.get(m.id, d(10)).unwrap().name, "Renamed");
    }

    #[test]
    fn prune_removes_only_the_given_date() {
        let mut schedule = ScheduleStore::new();
        let m = schedule.add("Metformin", t(9, 0)).unwrap();
        let mut journal = DoseJournal::new();
        journal.ensure_day(&schedule, d(9));
        journal.ensure_day(&schedule, d(10));

        journal.prune(m.id, d(10)).unwrap();

        assert!(journal.get(m.id, d(10)).is_none());
        assert!(journal.get(m.id, d(9)).is_some());
    }

    #[test]
    fn insert_if_absent_preserves_uniqueness() {
        let mut journal = DoseJournal::new();
        let log = DoseLog {
            medicine_id: MedicineId(1),
            name: "Metformin".to_string(),
            scheduled_time: t(9, 0),
            date: d(10),
            status: DoseStatus::Missed,
            taken_at: None,
        };
        assert!(journal.insert_if_absent(log.clone()));
        assert!(!journal.insert_if_absent(log));
        assert_eq!(journal.len(), 1);
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        let mut schedule = ScheduleStore::new();
        schedule.add("Metformin", t(9, 0)).unwrap();
        let mut journal = DoseJournal::new();
        for day in 8..=12 {
            journal.ensure_day(&schedule, d(day));
        }

        let window = journal.window(d(9), d(11));
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&DoseStatus::Upcoming).unwrap(),
            "\"upcoming\""
        );
        assert_eq!(DoseStatus::Taken.to_string(), "taken");
    }
}

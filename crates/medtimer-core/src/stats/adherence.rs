//! Rolling adherence aggregation and the due-soon alert scan.
//!
//! Both computations are snapshot reads over one fixed `now`/`today` value
//! taken at the start of a refresh cycle. The adherence denominator is the
//! count of *scheduled doses* (journal entries) in the window, not the
//! count of medicines, so schedule changes alter future days' denominators
//! but never rewrite past days.

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::journal::{DoseJournal, DoseStatus};
use crate::schedule::{MedicineId, ScheduleStore};

/// Default alert window: doses scheduled within the next 5 minutes.
pub const DEFAULT_DUE_WINDOW_MIN: i64 = 5;

/// Aggregate adherence over the rolling window.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AdherenceSummary {
    /// Scheduled doses (journal entries) inside the window.
    pub scheduled: u32,
    /// Doses marked taken inside the window.
    pub taken: u32,
    /// Percentage in `[0.0, 100.0]`; exactly `0.0` for an empty window.
    pub score: f64,
}

/// A dose due within the alert window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDose {
    pub medicine_id: MedicineId,
    pub name: String,
    /// Whole minutes until the scheduled time, truncated.
    pub minutes_until: i64,
}

/// Analyzer for rolling adherence and due-soon alerts.
#[derive(Debug, Clone, Copy)]
pub struct AdherenceAnalyzer {
    /// Rolling window length in days (window = `[today - days + 1, today]`).
    pub window_days: u32,
    /// Alert window in minutes, inclusive at both bounds.
    pub due_window_min: i64,
}

impl Default for AdherenceAnalyzer {
    fn default() -> Self {
        Self {
            window_days: 7,
            due_window_min: DEFAULT_DUE_WINDOW_MIN,
        }
    }
}

impl AdherenceAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(window_days: u32, due_window_min: i64) -> Self {
        Self {
            window_days,
            due_window_min,
        }
    }

    /// First day of the rolling window ending at `today`.
    pub fn window_start(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_sub_days(Days::new(u64::from(self.window_days.saturating_sub(1))))
            .unwrap_or(today)
    }

    /// Summarize adherence over the window ending at `today`.
    pub fn summarize(&self, journal: &DoseJournal, today: NaiveDate) -> AdherenceSummary {
        let cutoff = self.window_start(today);
        let mut scheduled = 0u32;
        let mut taken = 0u32;
        for log in journal.logs() {
            if log.date >= cutoff && log.date <= today {
                scheduled += 1;
                if log.status == DoseStatus::Taken {
                    taken += 1;
                }
            }
        }
        let score = if scheduled == 0 {
            0.0
        } else {
            f64::from(taken) / f64::from(scheduled) * 100.0
        };
        AdherenceSummary {
            scheduled,
            taken,
            score,
        }
    }

    /// Rolling adherence percentage; `0.0` for an empty window.
    pub fn weekly_adherence(&self, journal: &DoseJournal, today: NaiveDate) -> f64 {
        self.summarize(journal, today).score
    }

    /// Doses due within the alert window, in schedule insertion order.
    ///
    /// A medicine is included iff its today-dated log exists with status
    /// other than `Taken` and its scheduled time is between zero and
    /// `due_window_min` minutes away, inclusive at both bounds.
    pub fn due_soon(
        &self,
        schedule: &ScheduleStore,
        journal: &DoseJournal,
        now: NaiveDateTime,
    ) -> Vec<DueDose> {
        let today = now.date();
        let mut due = Vec::new();
        for medicine in schedule.list() {
            let Some(log) = journal.get(medicine.id, today) else {
                continue;
            };
            if log.status == DoseStatus::Taken {
                continue;
            }
            let scheduled = today.and_time(medicine.time);
            let secs = (scheduled - now).num_seconds();
            if secs >= 0 && secs <= self.due_window_min * 60 {
                due.push(DueDose {
                    medicine_id: medicine.id,
                    name: medicine.name.clone(),
                    minutes_until: secs / 60,
                });
            }
        }
        due
    }
}

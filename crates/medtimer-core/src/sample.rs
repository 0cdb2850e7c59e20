//! Sample-week generator for demos and manual testing.

use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::journal::{DoseJournal, DoseLog, DoseStatus};
use crate::schedule::ScheduleStore;

/// Probability that a seeded historical dose was taken.
const TAKEN_PROBABILITY: f64 = 0.75;

/// Seed one log per (medicine, day) for the six days before `today`.
///
/// Existing logs are never touched, preserving the per-day uniqueness
/// invariant. Taken doses get `taken_at` stamped with the scheduled time.
/// Returns the number of logs created.
pub fn seed_sample_week<R: Rng + ?Sized>(
    journal: &mut DoseJournal,
    schedule: &ScheduleStore,
    today: NaiveDate,
    rng: &mut R,
) -> usize {
    let mut created = 0;
    for day_offset in 1..=6u64 {
        let Some(date) = today.checked_sub_days(Days::new(day_offset)) else {
            continue;
        };
        for medicine in schedule.list() {
            let taken = rng.gen_bool(TAKEN_PROBABILITY);
            let log = DoseLog {
                medicine_id: medicine.id,
                name: medicine.name.clone(),
                scheduled_time: medicine.time,
                date,
                status: if taken {
                    DoseStatus::Taken
                } else {
                    DoseStatus::Missed
                },
                taken_at: taken.then_some(medicine.time),
            };
            if journal.insert_if_absent(log) {
                created += 1;
            }
        }
    }
    created
}

//! Status resolution: the per-refresh dose state machine.
//!
//! ## State transitions
//!
//! ```text
//! upcoming <-> missed   (clock-derived, recomputed from scratch each refresh)
//! upcoming -> taken     (explicit mark; terminal for the day)
//! missed   -> taken     (explicit mark; terminal for the day)
//! ```
//!
//! `resolve` is a pure function of (`now`, `scheduled_time`); the resolver
//! never trusts a previously stored `Upcoming`/`Missed` value. `Taken` is
//! sticky and is never recomputed.

use chrono::{NaiveDateTime, NaiveTime};

use crate::journal::{DoseJournal, DoseStatus};
use crate::schedule::MedicineId;

/// Compute the clock-derived status of a not-taken dose.
///
/// The scheduled time is combined with `now`'s date; a strictly future
/// schedule is `Upcoming`, everything else (including exactly now) is
/// `Missed`.
pub fn resolve(now: NaiveDateTime, scheduled_time: NaiveTime) -> DoseStatus {
    let scheduled = now.date().and_time(scheduled_time);
    if scheduled > now {
        DoseStatus::Upcoming
    } else {
        DoseStatus::Missed
    }
}

/// Recompute the status of every not-taken log dated `now.date()`.
///
/// Must run once per refresh cycle, before any aggregation or rendering
/// reads statuses. Past days are never revisited.
pub fn refresh_day(journal: &mut DoseJournal, now: NaiveDateTime) {
    for log in journal.day_mut(now.date()) {
        if log.status != DoseStatus::Taken {
            log.status = resolve(now, log.scheduled_time);
        }
    }
}

/// Mark today's dose for `id` as taken, stamping `taken_at` with `now`'s
/// time of day. A missing today-log is a silent no-op (`None`).
///
/// Re-marking an already-taken dose leaves the status unchanged but moves
/// `taken_at` to the latest call time, matching the observed behavior of
/// the reference system.
pub fn mark_taken(
    journal: &mut DoseJournal,
    id: MedicineId,
    now: NaiveDateTime,
) -> Option<NaiveTime> {
    let log = journal.get_mut(id, now.date())?;
    let taken_at = now.time();
    log.status = DoseStatus::Taken;
    log.taken_at = Some(taken_at);
    Some(taken_at)
}

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::schedule::MedicineId;

/// Every session mutation produces an Event. The display layer may render
/// them as toasts or append them to an activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    MedicineAdded {
        id: MedicineId,
        name: String,
        time: NaiveTime,
        at: NaiveDateTime,
    },
    MedicineEdited {
        id: MedicineId,
        name: String,
        time: NaiveTime,
        at: NaiveDateTime,
    },
    MedicineDeleted {
        id: MedicineId,
        name: String,
        at: NaiveDateTime,
    },
    DoseTaken {
        id: MedicineId,
        date: NaiveDate,
        taken_at: NaiveTime,
        at: NaiveDateTime,
    },
    SampleWeekSeeded {
        logs_created: usize,
        at: NaiveDateTime,
    },
}

//! Schedule store: the set of active medicine definitions.
//!
//! Medicines are kept in insertion order and identified by a monotonically
//! assigned integer id that is never reused, even after deletions. The
//! store owns the medicines exclusively; the dose journal correlates with
//! it only by id value.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationError};

/// Stable identifier for a medicine. Never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MedicineId(pub u64);

impl std::fmt::Display for MedicineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recurring daily medicine with a scheduled time of day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medicine {
    pub id: MedicineId,
    pub name: String,
    pub time: NaiveTime,
}

/// Insertion-ordered collection of active medicines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleStore {
    medicines: Vec<Medicine>,
    next_id: u64,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self {
            medicines: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a medicine. The trimmed name must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` if the name is empty or
    /// whitespace-only; no state is mutated in that case.
    pub fn add(&mut self, name: &str, time: NaiveTime) -> Result<Medicine, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        let id = MedicineId(self.next_id);
        self.next_id += 1;

        let medicine = Medicine {
            id,
            name: name.to_string(),
            time,
        };
        self.medicines.push(medicine.clone());
        Ok(medicine)
    }

    /// Edit a medicine in place. Unknown ids are a silent no-op (`Ok(None)`),
    /// matching a UI that may act on stale state.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` if a new name is given and is
    /// empty after trimming; the medicine is left unchanged.
    pub fn edit(
        &mut self,
        id: MedicineId,
        new_name: Option<&str>,
        new_time: Option<NaiveTime>,
    ) -> Result<Option<Medicine>, CoreError> {
        let trimmed = match new_name {
            Some(name) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(ValidationError::EmptyName.into());
                }
                Some(name.to_string())
            }
            None => None,
        };

        let Some(medicine) = self.medicines.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        if let Some(name) = trimmed {
            medicine.name = name;
        }
        if let Some(time) = new_time {
            medicine.time = time;
        }
        Ok(Some(medicine.clone()))
    }

    /// Remove a medicine. Returns the removed entry, or `None` if unknown.
    pub fn delete(&mut self, id: MedicineId) -> Option<Medicine> {
        let idx = self.medicines.iter().position(|m| m.id == id)?;
        Some(self.medicines.remove(idx))
    }

    pub fn get(&self, id: MedicineId) -> Option<&Medicine> {
        self.medicines.iter().find(|m| m.id == id)
    }

    /// Medicines in insertion order.
    pub fn list(&self) -> &[Medicine] {
        &self.medicines
    }

    pub fn is_empty(&self) -> bool {
        self.medicines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.medicines.len()
    }
}

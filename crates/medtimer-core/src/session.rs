//! The session facade: one in-memory store per running session.
//!
//! `Session` owns the schedule store and the dose journal and exposes
//! every mutation plus the refresh cycle. Nothing here reads the real
//! clock or any ambient global state; the driver captures one `now` per
//! cycle and passes it in, so every status within a render pass derives
//! from the same instant. The session lives exactly as long as the
//! process and is never persisted.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::{ConfigError, CoreError};
use crate::events::Event;
use crate::journal::{DoseJournal, DoseStatus};
use crate::report::WeeklyReport;
use crate::resolver;
use crate::reward::{RewardBanner, RewardStyle};
use crate::schedule::{Medicine, MedicineId, ScheduleStore};
use crate::stats::{AdherenceAnalyzer, AdherenceSummary, DueDose};
use crate::tips;

/// One row of the daily checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistRow {
    pub medicine_id: MedicineId,
    pub name: String,
    pub scheduled_time: NaiveTime,
    pub status: DoseStatus,
    pub taken_at: Option<NaiveTime>,
}

/// Immutable snapshot handed to the display layer per refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayOverview {
    pub date: NaiveDate,
    /// Today's doses in schedule insertion order.
    pub checklist: Vec<ChecklistRow>,
    pub due_soon: Vec<DueDose>,
    pub adherence: AdherenceSummary,
    pub reward: RewardBanner,
    pub tip: String,
}

/// One user's in-memory session: schedule store + dose journal.
///
/// Every mutation appends an [`Event`] to an internal feed; a display
/// layer polls the feed with [`Session::take_events`].
#[derive(Debug)]
pub struct Session {
    schedule: ScheduleStore,
    journal: DoseJournal,
    analyzer: AdherenceAnalyzer,
    reward_style: RewardStyle,
    events: Vec<Event>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            schedule: ScheduleStore::new(),
            journal: DoseJournal::new(),
            analyzer: AdherenceAnalyzer::new(),
            reward_style: RewardStyle::default(),
            events: Vec::new(),
        }
    }

    /// Build a session with the preferences from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured reward style is not a known
    /// value.
    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        let reward_style: RewardStyle =
            config
                .rewards
                .style
                .parse()
                .map_err(|message| ConfigError::InvalidValue {
                    key: "rewards.style".to_string(),
                    message,
                })?;
        Ok(Self {
            schedule: ScheduleStore::new(),
            journal: DoseJournal::new(),
            analyzer: AdherenceAnalyzer::with_settings(
                config.adherence.window_days,
                config.alerts.due_soon_window_min,
            ),
            reward_style,
            events: Vec::new(),
        })
    }

    /// Drain the pending event feed. Display layers poll this after
    /// applying commands.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn schedule(&self) -> &ScheduleStore {
        &self.schedule
    }

    pub fn journal(&self) -> &DoseJournal {
        &self.journal
    }

    pub fn analyzer(&self) -> &AdherenceAnalyzer {
        &self.analyzer
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Add a medicine and reconcile today's journal entries.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` for an empty or
    /// whitespace-only name.
    pub fn add_medicine(
        &mut self,
        name: &str,
        time: NaiveTime,
        now: NaiveDateTime,
    ) -> Result<Medicine, CoreError> {
        let medicine = self.schedule.add(name, time)?;
        self.journal.ensure_day(&self.schedule, now.date());
        self.events.push(Event::MedicineAdded {
            id: medicine.id,
            name: medicine.name.clone(),
            time: medicine.time,
            at: now,
        });
        Ok(medicine)
    }

    /// Edit a medicine. Unknown ids are a silent no-op (`Ok(None)`).
    /// Today's journal entry is re-synced to the new name/time.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyName` if the new name is empty
    /// after trimming.
    pub fn edit_medicine(
        &mut self,
        id: MedicineId,
        new_name: Option<&str>,
        new_time: Option<NaiveTime>,
        now: NaiveDateTime,
    ) -> Result<Option<Medicine>, CoreError> {
        let edited = self.schedule.edit(id, new_name, new_time)?;
        if let Some(medicine) = &edited {
            self.journal.ensure_day(&self.schedule, now.date());
            self.events.push(Event::MedicineEdited {
                id: medicine.id,
                name: medicine.name.clone(),
                time: medicine.time,
                at: now,
            });
        }
        Ok(edited)
    }

    /// Delete a medicine and prune only today's journal entry for it.
    /// Historical entries remain the permanent adherence record.
    pub fn delete_medicine(&mut self, id: MedicineId, now: NaiveDateTime) -> Option<Medicine> {
        let removed = self.schedule.delete(id)?;
        self.journal.prune(id, now.date());
        self.events.push(Event::MedicineDeleted {
            id: removed.id,
            name: removed.name.clone(),
            at: now,
        });
        Some(removed)
    }

    /// Mark today's dose taken. Missing today-log is a silent no-op.
    pub fn mark_taken(&mut self, id: MedicineId, now: NaiveDateTime) -> Option<Event> {
        self.journal.ensure_day(&self.schedule, now.date());
        let taken_at = resolver::mark_taken(&mut self.journal, id, now)?;
        let event = Event::DoseTaken {
            id,
            date: now.date(),
            taken_at,
            at: now,
        };
        self.events.push(event.clone());
        Some(event)
    }

    /// Seed one log per medicine for the six days before `now.date()`.
    pub fn seed_sample_week<R: Rng + ?Sized>(&mut self, now: NaiveDateTime, rng: &mut R) -> Event {
        let logs_created =
            crate::sample::seed_sample_week(&mut self.journal, &self.schedule, now.date(), rng);
        let event = Event::SampleWeekSeeded {
            logs_created,
            at: now,
        };
        self.events.push(event.clone());
        event
    }

    // ── Refresh cycle ────────────────────────────────────────────────

    /// Run one refresh cycle with the fixed instant `now`:
    /// reconcile today's logs, re-resolve statuses, then aggregate.
    pub fn refresh<R: Rng + ?Sized>(&mut self, now: NaiveDateTime, rng: &mut R) -> DayOverview {
        let today = now.date();
        self.journal.ensure_day(&self.schedule, today);
        resolver::refresh_day(&mut self.journal, now);

        let checklist = self
            .schedule
            .list()
            .iter()
            .filter_map(|m| self.journal.get(m.id, today))
            .map(|log| ChecklistRow {
                medicine_id: log.medicine_id,
                name: log.name.clone(),
                scheduled_time: log.scheduled_time,
                status: log.status,
                taken_at: log.taken_at,
            })
            .collect();

        let adherence = self.analyzer.summarize(&self.journal, today);

        DayOverview {
            date: today,
            checklist,
            due_soon: self.analyzer.due_soon(&self.schedule, &self.journal, now),
            adherence,
            reward: RewardBanner::for_score(adherence.score, self.reward_style),
            tip: tips::random_tip(rng).to_string(),
        }
    }

    /// Assemble the weekly report for the window ending today.
    pub fn weekly_report(&self, now: NaiveDateTime) -> WeeklyReport {
        WeeklyReport::assemble(&self.journal, &self.analyzer, now)
    }
}

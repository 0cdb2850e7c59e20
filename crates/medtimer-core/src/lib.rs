//! # MedTimer Core Library
//!
//! This library provides the core business logic for MedTimer, a
//! single-user daily medication reminder and adherence tracker. All
//! operations are available via a standalone CLI binary; any GUI is a
//! thin layer over the same core library, consuming the per-refresh
//! `DayOverview` snapshot and the session's mutation operations.
//!
//! ## Architecture
//!
//! - **Schedule Store**: active medicine definitions with stable,
//!   monotonically assigned ids
//! - **Dose Journal**: one record per (medicine, calendar day), lazily
//!   reconciled and retained as the permanent adherence record
//! - **Status Resolver**: pure per-refresh recomputation of dose status
//!   from a fixed `now`; `taken` is sticky
//! - **Adherence Analytics**: rolling 7-day adherence percentage and the
//!   due-soon alert scan
//! - **Reports**: weekly report assembly with CSV and PDF serializers,
//!   selected once at startup from configuration
//!
//! ## Key Components
//!
//! - [`Session`]: the in-memory store, one per running session
//! - [`AdherenceAnalyzer`]: rolling adherence and due-soon scans
//! - [`AppConfig`]: TOML-backed preferences (never session data)

pub mod alert;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod journal;
pub mod report;
pub mod resolver;
pub mod reward;
pub mod sample;
pub mod schedule;
pub mod session;
pub mod stats;
pub mod tips;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::AppConfig;
pub use error::{ConfigError, CoreError, ReportError, ValidationError};
pub use events::Event;
pub use journal::{DoseJournal, DoseLog, DoseStatus};
pub use report::{ReportFormat, ReportSerializer, WeeklyReport};
pub use reward::{RewardBanner, RewardStyle, RewardTier};
pub use schedule::{Medicine, MedicineId, ScheduleStore};
pub use session::{ChecklistRow, DayOverview, Session};
pub use stats::{AdherenceAnalyzer, AdherenceSummary, DueDose};

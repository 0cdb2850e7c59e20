//! Adherence analytics over the dose journal.

mod adherence;

pub use adherence::{AdherenceAnalyzer, AdherenceSummary, DueDose, DEFAULT_DUE_WINDOW_MIN};

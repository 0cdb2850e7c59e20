//! Weekly report assembly and serialization.
//!
//! The core assembles a `WeeklyReport` from the rolling window's dose logs
//! and hands it to one of two serializers, selected once at startup from
//! configuration. Reports are export-only: they are never read back.

mod csv;
mod pdf;

pub use self::csv::CsvSerializer;
pub use self::pdf::PdfSerializer;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::error::ReportError;
use crate::journal::{DoseJournal, DoseStatus};
use crate::stats::AdherenceAnalyzer;

/// One row of the weekly report table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub date: NaiveDate,
    pub name: String,
    pub scheduled_time: NaiveTime,
    pub status: DoseStatus,
    pub taken_at: Option<NaiveTime>,
}

/// The assembled weekly adherence report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub generated_at: NaiveDateTime,
    pub adherence_pct: f64,
    pub rows: Vec<ReportRow>,
}

impl WeeklyReport {
    /// Assemble the report for the window ending at `now.date()`.
    ///
    /// Rows are sorted by (date, scheduled time, name).
    pub fn assemble(
        journal: &DoseJournal,
        analyzer: &AdherenceAnalyzer,
        now: NaiveDateTime,
    ) -> Self {
        let today = now.date();
        let mut rows: Vec<ReportRow> = journal
            .window(analyzer.window_start(today), today)
            .into_iter()
            .map(|log| ReportRow {
                date: log.date,
                name: log.name.clone(),
                scheduled_time: log.scheduled_time,
                status: log.status,
                taken_at: log.taken_at,
            })
            .collect();
        rows.sort_by(|a, b| {
            (a.date, a.scheduled_time, &a.name).cmp(&(b.date, b.scheduled_time, &b.name))
        });

        Self {
            generated_at: now,
            adherence_pct: analyzer.weekly_adherence(journal, today),
            rows,
        }
    }
}

/// Supported report output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Csv,
    Pdf,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Pdf => "pdf",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "pdf" => Ok(ReportFormat::Pdf),
            other => Err(ReportError::UnknownFormat(other.to_string())),
        }
    }
}

/// A serializer turns an assembled report into bytes on a writer.
pub trait ReportSerializer {
    fn format(&self) -> ReportFormat;

    /// # Errors
    ///
    /// Returns an error if encoding fails or the writer rejects the bytes.
    fn write(&self, report: &WeeklyReport, out: &mut dyn Write) -> Result<(), ReportError>;
}

/// Resolve the serializer for a format. Called once at startup.
pub fn serializer_for(format: ReportFormat) -> Box<dyn ReportSerializer> {
    match format {
        ReportFormat::Csv => Box::new(CsvSerializer),
        ReportFormat::Pdf => Box::new(PdfSerializer),
    }
}

/// Serialize a report to a file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_to_path(
    serializer: &dyn ReportSerializer,
    report: &WeeklyReport,
    path: &Path,
) -> Result<(), ReportError> {
    let mut file = std::fs::File::create(path)?;
    serializer.write(report, &mut file)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::DoseLog;
    use crate::schedule::MedicineId;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("pdf".parse::<ReportFormat>().unwrap(), ReportFormat::Pdf);
        assert_eq!("CSV".parse::<ReportFormat>().unwrap(), ReportFormat::Csv);
        assert!(matches!(
            "xlsx".parse::<ReportFormat>(),
            Err(ReportError::UnknownFormat(_))
        ));
    }

    #[test]
    fn assemble_sorts_rows_by_date_time_name() {
        let mut journal = DoseJournal::new();
        let mut push = |id: u64, name: &str, date: NaiveDate, time: NaiveTime| {
            journal.insert_if_absent(DoseLog {
                medicine_id: MedicineId(id),
                name: name.to_string(),
                scheduled_time: time,
                date,
                status: DoseStatus::Missed,
                taken_at: None,
            });
        };
        push(1, "Zinc", d(9), t(8, 0));
        push(2, "Aspirin", d(9), t(8, 0));
        push(3, "Metformin", d(8), t(21, 0));

        let report = WeeklyReport::assemble(
            &journal,
            &AdherenceAnalyzer::new(),
            d(10).and_hms_opt(12, 0, 0).unwrap(),
        );

        let names: Vec<_> = report.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Metformin", "Aspirin", "Zinc"]);
    }

    #[test]
    fn assemble_limits_rows_to_the_window() {
        let mut journal = DoseJournal::new();
        for day in 1..=10 {
            journal.insert_if_absent(DoseLog {
                medicine_id: MedicineId(1),
                name: "Metformin".to_string(),
                scheduled_time: t(9, 0),
                date: d(day),
                status: DoseStatus::Taken,
                taken_at: Some(t(9, 0)),
            });
        }

        let report = WeeklyReport::assemble(
            &journal,
            &AdherenceAnalyzer::new(),
            d(10).and_hms_opt(12, 0, 0).unwrap(),
        );
        assert_eq!(report.rows.len(), 7);
        assert_eq!(report.rows[0].date, d(4));
    }
}

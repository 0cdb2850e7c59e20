//! CSV report serializer.
//!
//! Output starts with a `#` comment line carrying the generation timestamp
//! and the adherence score, followed by a standard CSV table.

use std::io::Write;

use csv::Writer;

use super::{ReportFormat, ReportSerializer, WeeklyReport};
use crate::error::ReportError;

pub struct CsvSerializer;

impl ReportSerializer for CsvSerializer {
    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }

    fn write(&self, report: &WeeklyReport, out: &mut dyn Write) -> Result<(), ReportError> {
        writeln!(
            out,
            "# MedTimer Weekly Report (generated {}); Adherence: {:.1}%",
            report.generated_at.format("%Y-%m-%d %H:%M"),
            report.adherence_pct
        )?;

        let mut wtr = Writer::from_writer(out);
        wtr.write_record(["date", "name", "scheduled_time", "status", "taken_at"])?;

        for row in &report.rows {
            wtr.write_record(&[
                row.date.to_string(),
                row.name.clone(),
                row.scheduled_time.format("%H:%M").to_string(),
                row.status.to_string(),
                row.taken_at
                    .map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_default(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }
}

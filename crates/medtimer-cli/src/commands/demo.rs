//! Scripted end-to-end session.
//!
//! Seeds a small schedule plus a sample week of history, prints the daily
//! overview (text and JSON), and writes the weekly report. Exists so the
//! whole pipeline is runnable without a TTY.

use std::path::PathBuf;

use medtimer_core::report::{serializer_for, write_to_path};
use medtimer_core::{AppConfig, Clock, ReportFormat, Session, SystemClock};

use crate::common::{parse_hhmm, render_overview};

pub fn run(out: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_or_default();
    let mut session = Session::from_config(&config)?;
    let format: ReportFormat = config.report.format.parse()?;
    let clock = SystemClock;
    let mut rng = rand::thread_rng();

    let now = clock.now();
    let metformin = session.add_medicine("Metformin 500mg", parse_hhmm("09:00")?, now)?;
    session.add_medicine("Vitamin D", parse_hhmm("12:30")?, now)?;
    session.add_medicine("Aspirin", parse_hhmm("21:00")?, now)?;

    session.seed_sample_week(now, &mut rng);
    session.mark_taken(metformin.id, now);

    let overview = session.refresh(clock.now(), &mut rng);
    print!("{}", render_overview(&overview));
    println!("{}", serde_json::to_string_pretty(&overview)?);

    let dir = out.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(format!("MedTimer_Weekly_Report.{}", format.extension()));
    let report = session.weekly_report(clock.now());
    write_to_path(serializer_for(format).as_ref(), &report, &path)?;
    tracing::info!(path = %path.display(), rows = report.rows.len(), "demo report written");
    println!("Report written to {}", path.display());

    Ok(())
}

//! The interactive session shell.
//!
//! One process run hosts exactly one in-memory session; nothing survives
//! exit. Lines read from stdin (interactive or piped) are parsed with a
//! clap grammar and applied to the session. Parse errors and unknown
//! medicine ids print a notice and the loop continues -- the session
//! never aborts on user input.

use std::io::BufRead;
use std::path::PathBuf;

use chrono::NaiveTime;
use clap::Parser;
use medtimer_core::alert::{beep_wav, BeepSpec};
use medtimer_core::report::{serializer_for, write_to_path};
use medtimer_core::{
    AppConfig, Clock, MedicineId, ReportFormat, Session, SystemClock,
};

use crate::common::{parse_hhmm, render_overview};

#[derive(Parser)]
#[command(name = "medtimer", no_binary_name = true, disable_version_flag = true)]
enum ShellCommand {
    /// Add a daily medicine
    Add {
        /// Medicine name (may span several words)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        /// Scheduled time as HH:MM
        #[arg(long, value_parser = parse_hhmm)]
        at: NaiveTime,
    },
    /// Edit a medicine's name and/or time
    Edit {
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = parse_hhmm)]
        at: Option<NaiveTime>,
    },
    /// Delete a medicine (today's entry only; history is kept)
    Del { id: u64 },
    /// List medicines in insertion order
    List,
    /// Mark today's dose taken
    Take { id: u64 },
    /// Refresh and show the daily overview
    Status,
    /// Write the weekly adherence report
    Report {
        /// Output format ("csv" or "pdf"); defaults to the configured one
        #[arg(long)]
        format: Option<String>,
        /// Output file path
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Seed a sample week of history for every medicine
    Seed,
    /// Write the alert tone as a WAV file
    Beep {
        /// Output file path
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a motivational tip
    Tip,
    /// Exit the shell
    Quit,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_or_default();
    let mut session = Session::from_config(&config)?;
    let default_format: ReportFormat = config.report.format.parse()?;
    let clock = SystemClock;
    let mut rng = rand::thread_rng();

    println!("MedTimer session shell -- 'help' lists commands, 'quit' exits.");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        let command = match ShellCommand::try_parse_from(tokens.iter().copied()) {
            Ok(command) => command,
            Err(e) => {
                // Renders help/usage for `help` and malformed input alike.
                let _ = e.print();
                continue;
            }
        };

        if !handle(command, &mut session, &config, default_format, &clock, &mut rng) {
            break;
        }
    }

    Ok(())
}

/// Apply one command. Returns `false` when the shell should exit.
fn handle<R: rand::Rng>(
    command: ShellCommand,
    session: &mut Session,
    config: &AppConfig,
    default_format: ReportFormat,
    clock: &impl Clock,
    rng: &mut R,
) -> bool {
    let now = clock.now();
    match command {
        ShellCommand::Add { name, at } => {
            let name = name.join(" ");
            match session.add_medicine(&name, at, now) {
                Ok(medicine) => {
                    tracing::info!(id = %medicine.id, "medicine added");
                    println!(
                        "Added: {} at {} (id {})",
                        medicine.name,
                        medicine.time.format("%H:%M"),
                        medicine.id
                    );
                }
                Err(e) => eprintln!("error: {e}"),
            }
        }
        ShellCommand::Edit { id, name, at } => {
            match session.edit_medicine(MedicineId(id), name.as_deref(), at, now) {
                Ok(Some(medicine)) => {
                    tracing::info!(id = %medicine.id, "medicine edited");
                    println!(
                        "Saved: {} at {} (id {})",
                        medicine.name,
                        medicine.time.format("%H:%M"),
                        medicine.id
                    );
                }
                Ok(None) => println!("no medicine with id {id}"),
                Err(e) => eprintln!("error: {e}"),
            }
        }
        ShellCommand::Del { id } => match session.delete_medicine(MedicineId(id), now) {
            Some(medicine) => {
                tracing::info!(id = %medicine.id, "medicine deleted");
                println!("Deleted: {}", medicine.name);
            }
            None => println!("no medicine with id {id}"),
        },
        ShellCommand::List => {
            if session.schedule().is_empty() {
                println!("No medicines yet -- add your first dose.");
            }
            for medicine in session.schedule().list() {
                println!(
                    "[{}] {} at {}",
                    medicine.id,
                    medicine.name,
                    medicine.time.format("%H:%M")
                );
            }
        }
        ShellCommand::Take { id } => match session.mark_taken(MedicineId(id), now) {
            Some(event) => {
                tracing::info!(id, "dose marked taken");
                if let medtimer_core::Event::DoseTaken { taken_at, .. } = event {
                    println!("Marked taken at {} (id {id})", taken_at.format("%H:%M"));
                }
            }
            None => println!("no dose scheduled today for id {id}"),
        },
        ShellCommand::Status => {
            let overview = session.refresh(now, rng);
            tracing::info!(date = %overview.date, "session refreshed");
            print!("{}", render_overview(&overview));
        }
        ShellCommand::Report { format, out } => {
            let format = match format {
                Some(name) => match name.parse::<ReportFormat>() {
                    Ok(format) => format,
                    Err(e) => {
                        eprintln!("error: {e}");
                        return true;
                    }
                },
                None => default_format,
            };
            let path = out.unwrap_or_else(|| {
                PathBuf::from(format!("MedTimer_Weekly_Report.{}", format.extension()))
            });
            let report = session.weekly_report(now);
            let serializer = serializer_for(format);
            match write_to_path(serializer.as_ref(), &report, &path) {
                Ok(()) => {
                    tracing::info!(path = %path.display(), "weekly report written");
                    println!(
                        "Report written to {} ({} rows, {:.1}%)",
                        path.display(),
                        report.rows.len(),
                        report.adherence_pct
                    );
                }
                Err(e) => eprintln!("error: {e}"),
            }
        }
        ShellCommand::Seed => {
            let event = session.seed_sample_week(now, rng);
            if let medtimer_core::Event::SampleWeekSeeded { logs_created, .. } = event {
                tracing::info!(logs_created, "sample week seeded");
                println!("Sample week data generated ({logs_created} logs).");
            }
        }
        ShellCommand::Beep { out } => {
            let spec = BeepSpec {
                seconds: config.alerts.beep_secs,
                freq_hz: config.alerts.beep_freq_hz,
                volume: config.alerts.beep_volume,
                ..BeepSpec::default()
            };
            let path = out.unwrap_or_else(|| PathBuf::from("beep.wav"));
            match std::fs::write(&path, beep_wav(&spec)) {
                Ok(()) => println!("Beep written to {}", path.display()),
                Err(e) => eprintln!("error: {e}"),
            }
        }
        ShellCommand::Tip => {
            println!("{}", medtimer_core::tips::random_tip(rng));
        }
        ShellCommand::Quit => return false,
    }
    true
}

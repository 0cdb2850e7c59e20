//! Shared helpers for rendering session output.

use chrono::NaiveTime;
use medtimer_core::{DayOverview, DoseStatus};

/// Parse an HH:MM argument.
pub fn parse_hhmm(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| format!("expected HH:MM, got '{s}'"))
}

fn status_label(status: DoseStatus) -> &'static str {
    match status {
        DoseStatus::Upcoming => "Upcoming",
        DoseStatus::Taken => "Taken",
        DoseStatus::Missed => "Missed",
    }
}

/// Render the per-refresh snapshot as plain text.
pub fn render_overview(overview: &DayOverview) -> String {
    let mut out = String::new();

    out.push_str(&format!("Today's checklist ({})\n", overview.date));
    if overview.checklist.is_empty() {
        out.push_str("  (no medicines yet -- add your first dose)\n");
    }
    for row in &overview.checklist {
        let taken = row
            .taken_at
            .map(|t| format!(" at {}", t.format("%H:%M")))
            .unwrap_or_default();
        out.push_str(&format!(
            "  [{}] {} at {} -- {}{}\n",
            row.medicine_id,
            row.name,
            row.scheduled_time.format("%H:%M"),
            status_label(row.status),
            taken,
        ));
    }

    if !overview.due_soon.is_empty() {
        let list = overview
            .due_soon
            .iter()
            .map(|d| format!("{} ({} min)", d.name, d.minutes_until))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("Upcoming dose soon: {list}\n"));
    }

    out.push_str(&format!(
        "Adherence: {:.1}% (last 7 days, {} of {} doses)\n",
        overview.adherence.score, overview.adherence.taken, overview.adherence.scheduled
    ));
    out.push_str(&format!(
        "{} {}\n",
        overview.reward.symbol, overview.reward.message
    ));
    out.push_str(&format!("Tip: {}\n", overview.tip));

    out
}

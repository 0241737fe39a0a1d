//! Text rendering for command output.

use std::fmt::Write as _;

use serde_json::json;

use super::OutputFormat;
use crate::analytics::Stats;
use crate::error::Result;
use crate::recovery::{Milestone, Procedure, TimelineEntry};

/// Render the procedure catalog.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn procedures(procedures: &[Procedure], json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(procedures)?);
    }

    let mut out = String::new();
    for p in procedures {
        let _ = writeln!(
            out,
            "{:<20} {:<20} {} milestones",
            p.id.as_str(),
            p.name,
            p.milestones.len()
        );
    }
    Ok(out)
}

/// Render a procedure's timeline for a given day.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn timeline(
    procedure: &Procedure,
    days_post_op: u32,
    entries: &[TimelineEntry],
    format: OutputFormat,
) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => {
            let doc = json!({
                "procedure": procedure.id,
                "name": procedure.name,
                "days_post_op": days_post_op,
                "milestones": entries,
            });
            out = serde_json::to_string_pretty(&doc)?;
        }
        OutputFormat::Table => {
            let _ = writeln!(out, "{} - day {}", procedure.name, days_post_op);
            let _ = writeln!(out);
            let _ = writeln!(out, "{:>4}  {:<9} {:<16} DESCRIPTION", "DAY", "STATUS", "TITLE");
            for e in entries {
                let _ = writeln!(
                    out,
                    "{:>4}  {:<9} {:<16} {}",
                    e.milestone.day,
                    e.status.to_string(),
                    e.milestone.title,
                    e.milestone.description
                );
            }
        }
        OutputFormat::Plain => {
            for e in entries {
                let _ = writeln!(
                    out,
                    "Day {} [{}] {}: {}",
                    e.milestone.day, e.status, e.milestone.title, e.milestone.description
                );
            }
        }
    }
    Ok(out)
}

/// Render the "Today's Focus" card.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn focus(days_post_op: u32, milestones: &[&Milestone], json: bool) -> Result<String> {
    if json {
        let doc = json!({ "days_post_op": days_post_op, "current": milestones });
        return Ok(serde_json::to_string_pretty(&doc)?);
    }

    let mut out = String::new();
    let _ = writeln!(out, "Day {days_post_op} of your recovery journey");
    if milestones.is_empty() {
        let _ = writeln!(out, "No milestone today.");
    }
    for m in milestones {
        let _ = writeln!(out, "{}: {}", m.title, m.description);
    }
    Ok(out)
}

/// Render the local analytics panel.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn stats(stats: &Stats, limit: Option<usize>, json: bool) -> Result<String> {
    let shown = limit.map_or(stats.event_log.len(), |n| n.min(stats.event_log.len()));
    let events = &stats.event_log[..shown];

    if json {
        let doc = json!({ "visit_count": stats.visit_count, "event_log": events });
        return Ok(serde_json::to_string_pretty(&doc)?);
    }

    let mut out = String::new();
    let _ = writeln!(out, "Local Analytics");
    let _ = writeln!(out, "===============");
    let _ = writeln!(out, "Visits:  {}", stats.visit_count);
    let _ = writeln!(
        out,
        "Events:  {} (showing {})",
        stats.event_log.len(),
        events.len()
    );
    for e in events {
        let at = e
            .recorded_at()
            .map_or_else(|| e.timestamp.to_string(), |t| t.to_rfc3339());
        let payload = serde_json::to_string(&e.payload)?;
        let _ = writeln!(out, "  {at}  {:<18} {payload}", e.name);
    }
    Ok(out)
}

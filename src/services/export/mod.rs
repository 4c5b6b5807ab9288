//! Schedule export.
//!
//! Every renderer works from the same flattened rows: scheduled tasks only,
//! ordered by start slot. Backlog tasks are never exported.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use thiserror::Error;

use crate::models::grid::{slot_to_time, SLOT_MINUTES};
use crate::models::settings::ExportConfig;
use crate::models::task::{Priority, Task, TaskId};

mod csv;
mod icalendar;
mod markdown;
mod pdf;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("No scheduled tasks to export")]
    NothingScheduled,

    #[error("Unknown export format '{0}': expected csv, md, ics or pdf")]
    UnknownFormat(String),

    #[error("{0} export is binary and must be written to a file")]
    BinaryFormat(ExportFormat),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Markdown,
    Icalendar,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
            ExportFormat::Icalendar => "ics",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Default download name, e.g. `mindframe_schedule.ics`
    pub fn file_name(self) -> String {
        format!("mindframe_schedule.{}", self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Markdown => "Markdown",
            ExportFormat::Icalendar => "iCalendar",
            ExportFormat::Pdf => "PDF",
        };
        f.write_str(name)
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "ics" | "ical" | "icalendar" => Ok(ExportFormat::Icalendar),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// One scheduled task as the exporters see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub task_id: TaskId,
    pub title: String,
    pub priority: Priority,
    pub start_index: u32,
    /// Exclusive; may be 96 for tasks ending at midnight
    pub end_index: u32,
}

impl ExportRow {
    pub fn start_time(&self) -> String {
        slot_to_time(self.start_index)
    }

    pub fn end_time(&self) -> String {
        slot_to_time(self.end_index)
    }

    pub fn duration_minutes(&self) -> u32 {
        (self.end_index - self.start_index) * SLOT_MINUTES
    }
}

/// Flatten the scheduled tasks into rows ordered by start slot.
pub fn export_rows(tasks: &[Task]) -> Result<Vec<ExportRow>, ExportError> {
    let mut rows: Vec<ExportRow> = tasks
        .iter()
        .filter_map(|task| {
            task.placement().map(|p| ExportRow {
                task_id: task.id.clone(),
                title: task.title.clone(),
                priority: task.priority,
                start_index: p.start_index,
                end_index: p.end_index(),
            })
        })
        .collect();

    if rows.is_empty() {
        return Err(ExportError::NothingScheduled);
    }
    rows.sort_by_key(|row| row.start_index);
    Ok(rows)
}

/// Document-level settings shared by all renderers.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub title: String,
    /// Day the schedule is for
    pub date: NaiveDate,
    pub timezone: Tz,
    /// Creation time stamped into calendar entries
    pub generated_at: DateTime<Utc>,
}

impl ExportOptions {
    pub fn from_config(
        config: &ExportConfig,
        date: NaiveDate,
        generated_at: DateTime<Utc>,
    ) -> Result<Self> {
        let timezone = config.tz().map_err(anyhow::Error::msg)?;
        Ok(Self {
            title: config.title.clone(),
            date,
            timezone,
            generated_at,
        })
    }
}

pub struct ExportService;

impl ExportService {
    /// Render a text format into a string.
    pub fn render_text(format: ExportFormat, tasks: &[Task], options: &ExportOptions) -> Result<String> {
        let rows = export_rows(tasks)?;
        let rendered = match format {
            ExportFormat::Csv => csv::render(&rows)?,
            ExportFormat::Markdown => markdown::render(&rows, options),
            ExportFormat::Icalendar => icalendar::render(&rows, options),
            ExportFormat::Pdf => return Err(ExportError::BinaryFormat(format).into()),
        };
        Ok(rendered)
    }

    /// Render `format` and write it to `path`.
    pub fn export_to_path(
        format: ExportFormat,
        tasks: &[Task],
        options: &ExportOptions,
        path: &Path,
    ) -> Result<()> {
        if format == ExportFormat::Pdf {
            let rows = export_rows(tasks)?;
            pdf::write(&rows, options, path)?;
        } else {
            let content = Self::render_text(format, tasks, options)?;
            fs::write(path, content)
                .with_context(|| format!("Failed to write {} export to {}", format, path.display()))?;
        }

        log::info!("Exported schedule as {} to {}", format, path.display());
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::models::task::{BacklogList, TaskPatch};
    use chrono::TimeZone;

    pub fn scheduled(id: &str, title: &str, priority: Priority, start: u32, duration: u32) -> Task {
        let mut task = Task::new(title, priority, BacklogList::Today).unwrap();
        task.id = TaskId::from(id);
        task.apply(&TaskPatch::schedule(start, duration));
        task
    }

    pub fn options() -> ExportOptions {
        ExportOptions {
            title: "MindFrame Daily Schedule".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            timezone: chrono_tz::Europe::Berlin,
            generated_at: Utc.with_ymd_and_hms(2024, 3, 9, 7, 30, 5).unwrap(),
        }
    }
}

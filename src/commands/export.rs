use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, Utc};
use clap::Args;

use mindframe::services::export::{ExportFormat, ExportOptions, ExportService};

use super::Session;

#[derive(Args)]
pub struct ExportArgs {
    /// csv, md, ics or pdf
    pub format: ExportFormat,
    /// Output file (defaults to mindframe_schedule.<ext> in the export dir)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Day the schedule is for, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
    /// Print text formats to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

pub fn run(session: &Session, args: ExportArgs) -> Result<()> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let options = ExportOptions::from_config(&session.config.export, date, Utc::now())
        .context("Invalid export settings")?;
    let tasks = session.store.tasks();

    if args.stdout {
        print!("{}", ExportService::render_text(args.format, tasks, &options)?);
        return Ok(());
    }

    let path = args.output.unwrap_or_else(|| {
        let dir = session
            .config
            .export
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        dir.join(args.format.file_name())
    });

    ExportService::export_to_path(args.format, tasks, &options, &path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

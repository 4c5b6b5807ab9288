use anyhow::{Context, Result};
use ::csv::{QuoteStyle, Terminator, WriterBuilder};

use super::ExportRow;

const HEADER: [&str; 5] = ["Title", "Priority", "Start", "End", "Duration (min)"];

/// `;`-separated, every field quoted.
pub(super) fn render(rows: &[ExportRow]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER).context("Failed to write CSV header")?;
    for row in rows {
        writer
            .write_record([
                row.title.clone(),
                row.priority.to_string(),
                row.start_time(),
                row.end_time(),
                row.duration_minutes().to_string(),
            ])
            .with_context(|| format!("Failed to write CSV row for {}", row.task_id))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::super::test_support::scheduled;
    use super::super::export_rows;
    use super::*;
    use crate::models::task::Priority;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_csv() {
        let tasks = vec![
            scheduled("t-1", "Say \"hi\"; wave", Priority::High, 95, 1),
            scheduled("t-2", "Standup", Priority::Medium, 36, 2),
        ];
        let output = render(&export_rows(&tasks).unwrap()).unwrap();

        assert_eq!(
            output,
            "\"Title\";\"Priority\";\"Start\";\"End\";\"Duration (min)\"\n\
             \"Standup\";\"2\";\"09:00\";\"09:30\";\"30\"\n\
             \"Say \"\"hi\"\"; wave\";\"1\";\"23:45\";\"24:00\";\"15\"\n"
        );
    }

    #[test]
    fn test_multiline_title_stays_one_record() {
        let tasks = vec![scheduled("t-1", "Line one", Priority::Low, 0, 4)];
        let mut rows = export_rows(&tasks).unwrap();
        rows[0].title = "Line one\nLine two".to_string();

        let output = render(&rows).unwrap();
        let mut reader = ::csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_reader(output.as_bytes());
        let records: Vec<_> = reader.records().collect::<Result<_, _>>().unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][0], "Line one\nLine two");
    }
}

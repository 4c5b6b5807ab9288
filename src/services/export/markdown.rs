use super::{ExportOptions, ExportRow};

pub(super) fn render(rows: &[ExportRow], options: &ExportOptions) -> String {
    let mut out = format!(
        "# {}\n\n{}\n\n",
        options.title,
        options.date.format("%Y-%m-%d")
    );

    let items: Vec<String> = rows
        .iter()
        .map(|row| {
            format!(
                "- **{}** (P{}) {} - {} ({} min)",
                escape_markdown(&row.title),
                row.priority,
                row.start_time(),
                row.end_time(),
                row.duration_minutes()
            )
        })
        .collect();
    out.push_str(&items.join("\n"));
    out.push('\n');
    out
}

fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '*' | '_' | '`' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

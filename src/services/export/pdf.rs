//! Printable schedule (A4 portrait).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point, Rgb,
};

use super::{ExportOptions, ExportRow};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 17.0;
const BOTTOM: f32 = 25.0;
const ROW_HEIGHT: f32 = 5.6;
const LINE_HEIGHT: f32 = 4.2;
const BODY_SIZE: f32 = 10.0;

// Column offsets from the left margin
const COL_END: f32 = 28.0;
const COL_DURATION: f32 = 56.0;
const COL_PRIORITY: f32 = 78.0;
const COL_TASK: f32 = 106.0;
const TITLE_WRAP_CHARS: usize = 40;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

pub(super) fn write(rows: &[ExportRow], options: &ExportOptions, path: &Path) -> Result<()> {
    let (doc, page, layer) = PdfDocument::new(
        &options.title,
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .context("Failed to add font")?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .context("Failed to add bold font")?,
    };

    let mut layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT - MARGIN;

    draw_text(&layer, &fonts.bold, 16.0, MARGIN, y, &options.title, 0.0);
    y -= 7.0;
    draw_text(
        &layer,
        &fonts.regular,
        11.0,
        MARGIN,
        y,
        &options.date.format("%d.%m.%Y").to_string(),
        0.45,
    );
    y -= 10.0;
    y = draw_header(&layer, &fonts, y);

    for row in rows {
        let title_lines = wrap_text(&row.title, TITLE_WRAP_CHARS);
        let needed = ROW_HEIGHT + (title_lines.len().saturating_sub(1)) as f32 * LINE_HEIGHT;
        if y - needed < BOTTOM {
            layer = new_page(&doc);
            y = PAGE_HEIGHT - MARGIN;
        }

        let cells = [
            (0.0, row.start_time()),
            (COL_END, row.end_time()),
            (COL_DURATION, format!("{} min", row.duration_minutes())),
            (COL_PRIORITY, row.priority.to_string()),
        ];
        for (offset, text) in cells {
            draw_text(&layer, &fonts.regular, BODY_SIZE, MARGIN + offset, y, &text, 0.0);
        }
        for (i, line) in title_lines.iter().enumerate() {
            let line_y = y - i as f32 * LINE_HEIGHT;
            draw_text(&layer, &fonts.regular, BODY_SIZE, MARGIN + COL_TASK, line_y, line, 0.0);
        }

        y -= needed;
    }

    let file = File::create(path).context("Failed to create PDF file")?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer).context("Failed to save PDF")?;

    Ok(())
}

fn draw_header(layer: &PdfLayerReference, fonts: &Fonts, y: f32) -> f32 {
    let headers = [
        (0.0, "Start"),
        (COL_END, "End"),
        (COL_DURATION, "Duration"),
        (COL_PRIORITY, "Priority"),
        (COL_TASK, "Task"),
    ];
    for (offset, text) in headers {
        draw_text(layer, &fonts.bold, BODY_SIZE, MARGIN + offset, y, text, 0.0);
    }

    let rule_y = y - 2.5;
    layer.set_outline_color(printpdf::Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_thickness(0.5);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN), Mm(rule_y)), false),
            (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(rule_y)), false),
        ],
        is_closed: false,
    });

    rule_y - 5.0
}

fn new_page(doc: &PdfDocumentReference) -> PdfLayerReference {
    let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    doc.get_page(page).get_layer(layer)
}

/// `grey` is 0.0 for black text
fn draw_text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    size: f32,
    x: f32,
    y: f32,
    text: &str,
    grey: f32,
) {
    layer.begin_text_section();
    layer.set_font(font, size);
    layer.set_fill_color(printpdf::Color::Rgb(Rgb::new(grey, grey, grey, None)));
    layer.set_text_cursor(Mm(x), Mm(y));
    layer.write_text(text, font);
    layer.end_text_section();
}

/// Greedy word wrap; words longer than `max_chars` are split.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let word: String = word.into_iter().collect();
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

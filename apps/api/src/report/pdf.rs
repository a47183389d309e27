//! PDF layout for hiring reports.
//!
//! Uses the built-in Helvetica faces, so text is reduced to Latin-1 before layout.
//! Word-wrapping uses an average glyph width; long reports continue on new pages.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};

use crate::report::models::{HiringReport, Verdict};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica advance width as a fraction of the font size.
const AVG_GLYPH_WIDTH_EM: f32 = 0.5;
const LINE_SPACING: f32 = 1.4;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.5;

/// Lays out a `HiringReport` as an A4 PDF document.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, report: &HiringReport) -> Result<Vec<u8>, printpdf::Error> {
        let mut writer = PageWriter::new("Technical Due Diligence Report")?;

        writer.text_block("TECHNICAL DUE DILIGENCE REPORT", TITLE_SIZE, true, None);
        writer.spacer(2.0);
        writer.text_block(&format!("Candidate: {}", report.candidate_name), BODY_SIZE, false, None);
        writer.text_block(&format!("Role: {}", report.role), BODY_SIZE, false, None);
        writer.text_block(&format!("Session: {}", report.session_id), BODY_SIZE, false, None);
        writer.spacer(6.0);

        writer.text_block("EXECUTIVE SUMMARY", HEADING_SIZE, true, None);
        writer.text_block(&report.executive_summary, BODY_SIZE, false, None);
        writer.spacer(4.0);

        if !report.top_skills.is_empty() {
            writer.text_block("TOP SKILLS", HEADING_SIZE, true, None);
            for skill in &report.top_skills {
                writer.text_block(&format!("- {}", skill.name), BODY_SIZE, true, None);
                writer.text_block(&skill.evidence, BODY_SIZE, false, None);
                writer.spacer(1.5);
            }
            writer.spacer(2.5);
        }

        if !report.communication_style.trim().is_empty() {
            writer.text_block("COMMUNICATION STYLE", HEADING_SIZE, true, None);
            writer.text_block(&report.communication_style, BODY_SIZE, false, None);
            writer.spacer(4.0);
        }

        writer.text_block(
            &format!("VERDICT: {}", report.verdict),
            HEADING_SIZE + 2.0,
            true,
            Some(verdict_color(report.verdict)),
        );

        writer.finish()
    }
}

fn verdict_color(verdict: Verdict) -> Color {
    let (r, g, b) = match verdict {
        Verdict::StrongHire => (0.05, 0.55, 0.25),
        Verdict::Hire => (0.10, 0.35, 0.70),
        Verdict::NoHire => (0.75, 0.10, 0.10),
    };
    Color::Rgb(Rgb::new(r, g, b, None))
}

// ────────────────────────────────────────────────────────────────────────────
// Page writer
// ────────────────────────────────────────────────────────────────────────────

struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    cursor_mm: f32,
    pages: usize,
    /// (page, colour) for every fill change.
    #[cfg(test)]
    fills: Vec<(usize, Color)>,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, printpdf::Error> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Page 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor_mm: PAGE_HEIGHT_MM - MARGIN_MM,
            pages: 1,
            #[cfg(test)]
            fills: Vec::new(),
        })
    }

    fn line_height(size: f32) -> f32 {
        size * PT_TO_MM * LINE_SPACING
    }

    fn spacer(&mut self, mm: f32) {
        self.cursor_mm -= mm;
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    fn text_block(&mut self, text: &str, size: f32, bold: bool, color: Option<Color>) {
        let max_chars = max_chars_per_line(size);
        let line_height = Self::line_height(size);
        let font = if bold { self.bold.clone() } else { self.regular.clone() };
        let fill = color.unwrap_or_else(black);

        self.apply_fill(&fill);

        for line in wrap_text(&to_latin1(text), max_chars) {
            if self.cursor_mm - line_height < MARGIN_MM {
                // Graphics state is per page.
                self.new_page();
                self.apply_fill(&fill);
            }
            self.cursor_mm -= line_height;
            self.layer
                .use_text(line, size, Mm(MARGIN_MM), Mm(self.cursor_mm), &font);
        }
    }

    fn apply_fill(&mut self, color: &Color) {
        self.layer.set_fill_color(color.clone());
        #[cfg(test)]
        self.fills.push((self.pages, color.clone()));
    }

    fn finish(self) -> Result<Vec<u8>, printpdf::Error> {
        self.doc.save_to_bytes()
    }
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn max_chars_per_line(size: f32) -> usize {
    let usable = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
    let glyph = size * PT_TO_MM * AVG_GLYPH_WIDTH_EM;
    ((usable / glyph).floor() as usize).max(10)
}

/// Greedy word wrap on character counts. Words longer than a line are split.
/// Paragraph breaks in the input are kept.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_chars {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
            if needed > max_chars && current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.extend(word.iter());
            current_len += word.len();
        }
        if current_len > 0 {
            lines.push(current);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Maps text onto what the built-in fonts can encode.
fn to_latin1(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2022}' => '*',
            '\t' => ' ',
            c if (c as u32) <= 0xFF => c,
            _ => '?',
        })
        .collect()
}

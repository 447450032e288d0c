// SPDX-License-Identifier: MIT

//! Minimal PDF writer for the portfolio export.
//!
//! The export is a plain multi-page text layout (US Letter, Helvetica),
//! not a structured document contract, so the file is assembled directly:
//! one content stream per page, a shared font pair, and a standard
//! cross-reference table. Text is restricted to the printable ASCII range
//! of the built-in fonts; anything else is replaced with `?`.

/// Visual style of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Document title (student name)
    Title,
    /// Activity title
    Heading,
    /// Wrapped description text
    Body,
    /// Dates and captions
    Small,
    /// Vertical spacing only
    Blank,
}

impl LineStyle {
    /// (font resource, size, leading) per style.
    fn metrics(self) -> (&'static str, u32, f32) {
        match self {
            LineStyle::Title => ("/F2", 18, 26.0),
            LineStyle::Heading => ("/F2", 13, 18.0),
            LineStyle::Body => ("/F1", 11, 15.0),
            LineStyle::Small => ("/F1", 9, 14.0),
            LineStyle::Blank => ("/F1", 11, 15.0),
        }
    }
}

/// One laid-out line of page content.
#[derive(Debug, Clone)]
pub struct PdfLine {
    pub text: String,
    pub style: LineStyle,
}

impl PdfLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn blank() -> Self {
        Self {
            text: String::new(),
            style: LineStyle::Blank,
        }
    }
}

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;

/// Escape text for a PDF literal string, replacing non-ASCII bytes.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            c if (' '..='~').contains(&c) => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

/// Build the content stream for one page of lines.
fn page_content(lines: &[PdfLine]) -> String {
    let mut content = String::new();
    let mut y = PAGE_HEIGHT - MARGIN;

    for line in lines {
        let (font, size, leading) = line.style.metrics();
        y -= leading;
        if line.style != LineStyle::Blank && !line.text.is_empty() {
            content.push_str(&format!(
                "BT {} {} Tf 1 0 0 1 {} {:.1} Tm ({}) Tj ET\n",
                font,
                size,
                MARGIN,
                y,
                escape_text(&line.text)
            ));
        }
    }

    content
}

/// Render laid-out pages into a complete PDF document.
pub fn render(pages: &[Vec<PdfLine>]) -> Vec<u8> {
    // Object numbering: 1 catalog, 2 page tree, 3/4 fonts, then an
    // alternating (page, content) pair per page.
    let mut objects: Vec<String> = Vec::new();

    let first_page_obj = 5;
    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", first_page_obj + 2 * i))
        .collect();

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    objects.push(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    );
    objects.push(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>".to_string(),
    );

    for (i, page) in pages.iter().enumerate() {
        let content_obj = first_page_obj + 2 * i + 1;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
            PAGE_WIDTH as u32, PAGE_HEIGHT as u32, content_obj
        ));

        let content = page_content(page);
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ));
    }

    let mut out: Vec<u8> = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n");

    let mut offsets: Vec<usize> = Vec::with_capacity(objects.len());
    for (i, object) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, object).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    out
}

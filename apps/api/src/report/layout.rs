//! Page layout: places classified report lines onto paginated pages.
//!
//! Pure and font-independent so pagination can be tested without font files.
//! Coordinates are millimetres from the top-left corner of the page.

use crate::report::classifier::ReportLine;
use crate::report::metrics::{measure_str, wrap, PageLayout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Weight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    /// Zero-based page index.
    pub page: usize,
    pub x_mm: f32,
    /// Baseline, measured from the top edge.
    pub baseline_mm: f32,
    pub text: String,
    pub weight: Weight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub page_count: usize,
    pub items: Vec<PlacedText>,
}

/// Baseline sits this fraction of the line height below the top of its line box.
const BASELINE_RATIO: f32 = 0.7;

struct Cursor<'a> {
    layout: &'a PageLayout,
    title: &'a str,
    page: usize,
    y_mm: f32,
    items: Vec<PlacedText>,
}

impl<'a> Cursor<'a> {
    fn new(layout: &'a PageLayout, title: &'a str) -> Self {
        let mut cursor = Self {
            layout,
            title,
            page: 0,
            y_mm: layout.margin_mm,
            items: Vec::new(),
        };
        cursor.page_header();
        cursor
    }

    /// Centered bold title at the top of every page.
    fn page_header(&mut self) {
        let width_mm = measure_str(self.title) * self.layout.em_mm();
        let x_mm = ((self.layout.page_width_mm - width_mm) / 2.0).max(self.layout.margin_mm);
        self.place(x_mm, self.title.to_string(), Weight::Bold);
    }

    fn new_page(&mut self) {
        self.page += 1;
        self.y_mm = self.layout.margin_mm;
        self.page_header();
    }

    /// Places one line at the cursor, breaking the page first when it would not fit.
    fn line(&mut self, text: String, weight: Weight) {
        if self.y_mm + self.layout.line_height_mm > self.layout.content_bottom_mm() {
            self.new_page();
        }
        self.place(self.layout.margin_mm, text, weight);
    }

    fn place(&mut self, x_mm: f32, text: String, weight: Weight) {
        self.items.push(PlacedText {
            page: self.page,
            x_mm,
            baseline_mm: self.y_mm + self.layout.line_height_mm * BASELINE_RATIO,
            text,
            weight,
        });
        self.y_mm += self.layout.line_height_mm;
    }

    fn gap(&mut self, mm: f32) {
        self.y_mm += mm;
    }
}

/// Lays out `lines` under a repeating `title` header.
/// Headings are bold and followed by the heading gap; body lines wrap to the
/// text width and are followed by the paragraph gap.
pub fn lay_out(lines: &[ReportLine], title: &str, layout: &PageLayout) -> LaidOutDocument {
    let mut cursor = Cursor::new(layout, title);
    let width_em = layout.text_width_em();

    for line in lines {
        match line {
            ReportLine::Heading(text) => {
                for wrapped in wrap(text, width_em) {
                    cursor.line(wrapped, Weight::Bold);
                }
                cursor.gap(layout.heading_gap_mm);
            }
            ReportLine::Body(text) => {
                for wrapped in wrap(text, width_em) {
                    cursor.line(wrapped, Weight::Regular);
                }
                cursor.gap(layout.paragraph_gap_mm);
            }
        }
    }

    LaidOutDocument {
        page_count: cursor.page + 1,
        items: cursor.items,
    }
}

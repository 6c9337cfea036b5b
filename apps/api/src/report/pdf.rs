//! PDF writer: turns a laid-out document into PDF bytes with `printpdf`.

use std::io::Cursor;

use printpdf::{IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::report::layout::{LaidOutDocument, Weight};
use crate::report::metrics::PageLayout;
use crate::report::{FontSet, RenderError};

const LAYER_NAME: &str = "Report";

/// Writes `doc` as a PDF with the regular and bold faces of `fonts` embedded.
/// CPU-bound: call from `spawn_blocking`.
pub fn write_pdf(
    doc: &LaidOutDocument,
    title: &str,
    layout: &PageLayout,
    fonts: &FontSet,
) -> Result<Vec<u8>, RenderError> {
    let width = Mm(layout.page_width_mm);
    let height = Mm(layout.page_height_mm);

    let (pdf, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);

    let regular: IndirectFontRef = pdf
        .add_external_font(Cursor::new(fonts.regular()))
        .map_err(|e| RenderError::Pdf(format!("regular font rejected: {e:?}")))?;
    let bold: IndirectFontRef = pdf
        .add_external_font(Cursor::new(fonts.bold()))
        .map_err(|e| RenderError::Pdf(format!("bold font rejected: {e:?}")))?;

    let mut layers: Vec<PdfLayerReference> =
        vec![pdf.get_page(first_page).get_layer(first_layer)];
    for _ in 1..doc.page_count {
        let (page, layer) = pdf.add_page(width, height, LAYER_NAME);
        layers.push(pdf.get_page(page).get_layer(layer));
    }

    for item in &doc.items {
        let layer = layers
            .get(item.page)
            .ok_or_else(|| RenderError::Pdf(format!("page {} out of range", item.page)))?;
        let font = match item.weight {
            Weight::Regular => &regular,
            Weight::Bold => &bold,
        };
        layer.use_text(
            item.text.as_str(),
            layout.font_size_pt,
            Mm(item.x_mm),
            Mm(layout.page_height_mm - item.baseline_mm),
            font,
        );
    }

    pdf.save_to_bytes()
        .map_err(|e| RenderError::Pdf(format!("failed to serialise PDF: {e:?}")))
}

// Document Renderer: generated text → classified lines → paginated PDF → base64.
// Rendering is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod classifier;
pub mod layout;
pub mod metrics;
pub mod pdf;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info};

use crate::report::classifier::classify;
use crate::report::layout::lay_out;
use crate::report::metrics::PageLayout;

/// Title printed at the top of every report page.
pub const REPORT_TITLE: &str = "개인 맞춤 진로 추천 보고서";

pub const REGULAR_FONT_FILE: &str = "NanumGothic-Regular.ttf";
pub const BOLD_FONT_FILE: &str = "NanumGothic-Bold.ttf";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Font file {path} is unavailable: {source}")]
    FontUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Render task failed: {0}")]
    Join(String),
}

/// The finished artifact: raw PDF bytes plus their base64 encoding.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Bytes,
    pub base64: String,
}

impl RenderedDocument {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let base64 = STANDARD.encode(&bytes);
        Self {
            bytes: Bytes::from(bytes),
            base64,
        }
    }

    /// `data:` URI suitable for an `<a href>` download link.
    pub fn data_uri(&self) -> String {
        format!("data:application/pdf;base64,{}", self.base64)
    }
}

/// Rendering seam used by the pipeline. `PdfRenderer` in production.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, text: &str) -> Result<RenderedDocument, RenderError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Fonts
// ────────────────────────────────────────────────────────────────────────────

/// Regular and bold font files, read once at startup. There is no fallback font.
#[derive(Clone)]
pub struct FontSet {
    regular: Arc<Vec<u8>>,
    bold: Arc<Vec<u8>>,
}

impl FontSet {
    pub async fn load(dir: &Path) -> Result<Self, RenderError> {
        let regular = read_font(&dir.join(REGULAR_FONT_FILE)).await?;
        let bold = read_font(&dir.join(BOLD_FONT_FILE)).await?;
        info!("Loaded report fonts from {}", dir.display());
        Ok(Self {
            regular: Arc::new(regular),
            bold: Arc::new(bold),
        })
    }

    pub fn regular(&self) -> &[u8] {
        &self.regular
    }

    pub fn bold(&self) -> &[u8] {
        &self.bold
    }
}

async fn read_font(path: &Path) -> Result<Vec<u8>, RenderError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| RenderError::FontUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

// ────────────────────────────────────────────────────────────────────────────
// PdfRenderer
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PdfRenderer {
    fonts: FontSet,
    layout: PageLayout,
    /// Highest `N.` prefix treated as a section heading.
    max_heading: u8,
}

impl PdfRenderer {
    pub fn new(fonts: FontSet, max_heading: u8) -> Self {
        Self {
            fonts,
            layout: PageLayout::default(),
            max_heading,
        }
    }
}

#[async_trait]
impl DocumentRenderer for PdfRenderer {
    async fn render(&self, text: &str) -> Result<RenderedDocument, RenderError> {
        let text = text.to_string();
        let renderer = self.clone();

        let bytes = tokio::task::spawn_blocking(move || {
            let lines = classify(&text, renderer.max_heading);
            let doc = lay_out(&lines, REPORT_TITLE, &renderer.layout);
            debug!(
                "Laid out {} lines over {} pages",
                doc.items.len(),
                doc.page_count
            );
            pdf::write_pdf(&doc, REPORT_TITLE, &renderer.layout, &renderer.fonts)
        })
        .await
        .map_err(|e| RenderError::Join(e.to_string()))??;

        info!("Rendered report document ({} bytes)", bytes.len());
        Ok(RenderedDocument::from_bytes(bytes))
    }
}

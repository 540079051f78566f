//! Generators for the stress-test material.
//!
//! * [`documents`] draws the ten raster documents of
//!   [`crate::catalog::DOCUMENTS`] at their exact pixel sizes.
//! * [`pdfs`] builds the seven multi-page PDFs of [`crate::catalog::PDFS`].
//! * [`sheet`] is the raster drawing surface the document layouts use.
//!
//! Each item is written independently; one that fails is recorded in the
//! [`GenerationReport`] and the rest are still produced.

pub mod documents;
pub mod pdfs;
pub mod sheet;

use crate::catalog::{DocumentSpec, PdfSpec};
use crate::error::{ItemError, ProbeError};
use crate::report::write_atomic;
use ab_glyph::FontVec;
use image::{ImageFormat, RgbImage};
use pdfium_render::prelude::Pdfium;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One generated (or failed) file.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedItem {
    pub id: String,
    pub path: PathBuf,
    /// `"WxH"` in pixels for documents, the first page's size in points for PDFs.
    pub dimensions: String,
    pub aspect_ratio: f64,
    pub orientation: char,
    /// Page count, PDFs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<usize>,
    pub bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ItemError>,
}

impl GeneratedItem {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of a `generate-docs` or `generate-pdfs` run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub out_dir: PathBuf,
    pub items: Vec<GeneratedItem>,
}

impl GenerationReport {
    pub fn generated(&self) -> usize {
        self.items.iter().filter(|i| i.is_ok()).count()
    }
}

/// Read and parse a TrueType / OpenType font.
pub fn load_font(path: &Path) -> Result<FontVec, ProbeError> {
    let bytes = fs::read(path).map_err(|e| ProbeError::FontLoadFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    FontVec::try_from_vec(bytes).map_err(|e| ProbeError::FontLoadFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

/// Create `dir` (and parents) if needed.
pub fn ensure_dir(dir: &Path) -> Result<(), ProbeError> {
    fs::create_dir_all(dir).map_err(|source| ProbeError::OutputWriteFailed {
        path: dir.to_path_buf(),
        source,
    })
}

/// Draw `spec` and save it as `{dir}/{id}.png`.
pub fn write_document(
    spec: &DocumentSpec,
    font: Option<&FontVec>,
    dir: &Path,
) -> GeneratedItem {
    let path = dir.join(spec.file_name());
    let image = documents::render_document(spec, font);
    let result = save_png(&image, &path).map_err(|detail| ItemError::GenerationFailed {
        id: spec.id.to_string(),
        detail,
    });
    let bytes = file_size(&path);
    debug!("{} -> {} ({} bytes)", spec.id, path.display(), bytes);

    GeneratedItem {
        id: spec.id.to_string(),
        dimensions: spec.dimensions(),
        aspect_ratio: spec.aspect_ratio(),
        orientation: spec.orientation(),
        pages: None,
        bytes,
        error: result.err(),
        path,
    }
}

/// Build `spec` and save it as `{dir}/{id}.pdf`.
pub fn write_pdf(pdfium: &Pdfium, spec: &PdfSpec, dir: &Path) -> GeneratedItem {
    let path = dir.join(spec.file_name());
    let first = spec.paper(0);
    let result = pdfs::write_pdf(pdfium, spec, &path).map_err(|e| ItemError::GenerationFailed {
        id: spec.id.to_string(),
        detail: format!("{:?}", e),
    });
    let (long, short) = (first.width.max(first.height), first.width.min(first.height));

    GeneratedItem {
        id: spec.id.to_string(),
        dimensions: format!("{:.0}x{:.0}pt", first.width, first.height),
        aspect_ratio: f64::from(long / short.max(1.0)),
        orientation: if first.width > first.height { 'H' } else { 'V' },
        pages: result.as_ref().ok().copied(),
        bytes: file_size(&path),
        error: result.err(),
        path,
    }
}

/// Encode a PNG through a temp file in the same directory, then rename.
fn save_png(image: &RgbImage, path: &Path) -> Result<(), String> {
    write_atomic(path, |w| {
        image
            .write_to(w, ImageFormat::Png)
            .map_err(std::io::Error::other)
    })
    .map_err(|e| e.to_string())
}

fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

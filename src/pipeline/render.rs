//! PDF rasterisation: render selected pages to `DynamicImage` via pdfium.
//!
//! Pages are rendered at `dpi / 72` pixels per point, so the page size in
//! points decides the native resolution the models see. An optional
//! longest-edge cap bounds memory for oversized pages.

use crate::error::ItemError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::debug;

/// Rendering parameters shared by every page of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    pub dpi: u32,
    pub max_rendered_pixels: Option<u32>,
}

impl RenderSettings {
    /// Pixels per PDF point.
    pub fn scale(&self) -> f32 {
        self.dpi as f32 / 72.0
    }

    /// Pixel size of a `width × height` point page, before any cap.
    pub fn page_pixels(&self, width_pt: f32, height_pt: f32) -> (u32, u32) {
        let s = self.scale();
        ((width_pt * s) as u32, (height_pt * s) as u32)
    }

    fn pdfium_config(&self) -> PdfRenderConfig {
        let config = PdfRenderConfig::new().scale_page_by_factor(self.scale());
        match self.max_rendered_pixels {
            Some(px) => config
                .set_maximum_width(px as i32)
                .set_maximum_height(px as i32),
            None => config,
        }
    }
}

/// An opened PDF, ready to render pages from.
pub struct OpenedPdf<'a> {
    document: PdfDocument<'a>,
    settings: RenderSettings,
    config: PdfRenderConfig,
}

impl<'a> OpenedPdf<'a> {
    /// Open `path` with an already-bound pdfium.
    pub fn open(
        pdfium: &'a Pdfium,
        path: &Path,
        id: &str,
        settings: RenderSettings,
    ) -> Result<Self, ItemError> {
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| ItemError::PdfOpen {
                id: id.to_string(),
                detail: format!("{:?}", e),
            })?;
        Ok(Self {
            document,
            settings,
            config: settings.pdfium_config(),
        })
    }

    pub fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    /// Pixel size a page would render at, read from its size in points.
    ///
    /// Used to label ERROR records when rendering itself failed.
    pub fn page_size_px(&self, idx: usize) -> Option<(u32, u32)> {
        let page = self.document.pages().get(idx as u16).ok()?;
        Some(
            self.settings
                .page_pixels(page.width().value, page.height().value),
        )
    }

    /// Render one page (0-based index).
    pub fn render_page(&self, idx: usize) -> Result<DynamicImage, ItemError> {
        let page = self
            .document
            .pages()
            .get(idx as u16)
            .map_err(|e| ItemError::RenderFailed {
                page: idx + 1,
                detail: format!("{:?}", e),
            })?;

        let bitmap = page
            .render_with_config(&self.config)
            .map_err(|e| ItemError::RenderFailed {
                page: idx + 1,
                detail: format!("{:?}", e),
            })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} at {} DPI → {}x{} px",
            idx + 1,
            self.settings.dpi,
            image.width(),
            image.height()
        );
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_at_150_dpi() {
        let s = RenderSettings {
            dpi: 150,
            max_rendered_pixels: None,
        };
        assert_eq!(s.page_pixels(595.2756, 841.8898), (1240, 1753));
    }

    #[test]
    fn seventy_two_dpi_is_one_pixel_per_point() {
        let s = RenderSettings {
            dpi: 72,
            max_rendered_pixels: None,
        };
        assert_eq!(s.scale(), 1.0);
        assert_eq!(s.page_pixels(612.0, 792.0), (612, 792));
    }
}

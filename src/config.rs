//! Configuration types for generation and verification runs.
//!
//! Every knob of a run lives in [`ProbeConfig`], built via its
//! [`ProbeConfigBuilder`]. The CLI maps its flags onto the builder; library
//! callers set only what they care about and rely on the documented defaults
//! for the rest.

use crate::adapter::ModelFamily;
use crate::error::ProbeError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use token_budget::{VerifierPolicy, DEFAULT_PATCH_SIZE};

/// Default directory for generated raster documents.
pub const DEFAULT_DOC_DIR: &str = "stress_test_documents";

/// Default directory for generated PDFs.
pub const DEFAULT_PDF_DIR: &str = "stress_test_pdfs";

/// Default number of pages sampled per PDF.
pub const DEFAULT_MAX_PAGES: usize = 5;

/// Configuration for a generation or verification run.
///
/// # Example
/// ```rust
/// use navit_probe::{ModelSelection, ProbeConfig};
///
/// let config = ProbeConfig::builder()
///     .dpi(150)
///     .models(ModelSelection::Qwen)
///     .max_pages(3)
///     .build()
///     .unwrap();
/// assert_eq!(config.patch_size, 14);
/// ```
#[derive(Clone)]
pub struct ProbeConfig {
    /// Patch side used for the expected budget. Default: 14.
    pub patch_size: u32,

    /// Rendering DPI for PDF pages. Range: 72–400. Default: 150.
    ///
    /// Pages are rendered at `dpi / 72` pixels per point, so an A4 page at
    /// 150 DPI becomes roughly 1240 × 1754 px.
    pub dpi: u32,

    /// Optional cap on the longest rendered edge, in pixels. Default: none.
    ///
    /// Capping changes the native resolution the models see, so it is off
    /// unless explicitly requested.
    pub max_rendered_pixels: Option<u32>,

    /// Which PDF pages to verify. Default: [`PageSelection::Spread`] of 5.
    pub pages: PageSelection,

    /// Which model families to run. Default: [`ModelSelection::Both`].
    pub models: ModelSelection,

    /// Directory holding `{id}.png` raster documents.
    pub doc_dir: PathBuf,

    /// Directory holding `{id}.pdf` documents.
    pub pdf_dir: PathBuf,

    /// TrueType font used when drawing raster documents. Without one, text
    /// lines are drawn as greeked bars.
    pub font_path: Option<PathBuf>,

    /// Path to libpdfium (file or containing directory). Falls back to
    /// `PDFIUM_LIB_PATH`, then the working directory, then the system library.
    pub pdfium_lib_path: Option<PathBuf>,

    /// `preprocessor_config.json` override for GLM-OCR.
    pub glm_preprocessor: Option<PathBuf>,

    /// `preprocessor_config.json` override for Qwen2.5-VL.
    pub qwen_preprocessor: Option<PathBuf>,

    /// Classification thresholds. Default: the published protocol.
    pub policy: VerifierPolicy,

    /// Optional per-item progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            patch_size: DEFAULT_PATCH_SIZE,
            dpi: 150,
            max_rendered_pixels: None,
            pages: PageSelection::default(),
            models: ModelSelection::default(),
            doc_dir: PathBuf::from(DEFAULT_DOC_DIR),
            pdf_dir: PathBuf::from(DEFAULT_PDF_DIR),
            font_path: None,
            pdfium_lib_path: None,
            glm_preprocessor: None,
            qwen_preprocessor: None,
            policy: VerifierPolicy::default(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ProbeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeConfig")
            .field("patch_size", &self.patch_size)
            .field("dpi", &self.dpi)
            .field("max_rendered_pixels", &self.max_rendered_pixels)
            .field("pages", &self.pages)
            .field("models", &self.models)
            .field("doc_dir", &self.doc_dir)
            .field("pdf_dir", &self.pdf_dir)
            .field("font_path", &self.font_path)
            .field("pdfium_lib_path", &self.pdfium_lib_path)
            .field("glm_preprocessor", &self.glm_preprocessor)
            .field("qwen_preprocessor", &self.qwen_preprocessor)
            .field("policy", &self.policy)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn ProbeProgressCallback>"),
            )
            .finish()
    }
}

impl ProbeConfig {
    /// Create a new builder for `ProbeConfig`.
    pub fn builder() -> ProbeConfigBuilder {
        ProbeConfigBuilder {
            config: Self::default(),
        }
    }

    /// Page cap recorded in PDF reports, when sampling by spread.
    pub fn max_pages_per_pdf(&self) -> Option<usize> {
        match self.pages {
            PageSelection::Spread(n) => Some(n),
            _ => None,
        }
    }
}

/// Builder for [`ProbeConfig`].
#[derive(Debug)]
pub struct ProbeConfigBuilder {
    config: ProbeConfig,
}

impl ProbeConfigBuilder {
    pub fn patch_size(mut self, patch: u32) -> Self {
        self.config.patch_size = patch;
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(72, 400);
        self
    }

    pub fn max_rendered_pixels(mut self, px: u32) -> Self {
        self.config.max_rendered_pixels = Some(px.max(100));
        self
    }

    pub fn pages(mut self, selection: PageSelection) -> Self {
        self.config.pages = selection;
        self
    }

    /// Shorthand for `pages(PageSelection::Spread(n))`.
    pub fn max_pages(mut self, n: usize) -> Self {
        self.config.pages = PageSelection::Spread(n);
        self
    }

    pub fn models(mut self, models: ModelSelection) -> Self {
        self.config.models = models;
        self
    }

    pub fn doc_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.doc_dir = dir.into();
        self
    }

    pub fn pdf_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.pdf_dir = dir.into();
        self
    }

    pub fn font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.font_path = Some(path.into());
        self
    }

    pub fn pdfium_lib_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.pdfium_lib_path = Some(path.into());
        self
    }

    pub fn glm_preprocessor(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.glm_preprocessor = Some(path.into());
        self
    }

    pub fn qwen_preprocessor(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.qwen_preprocessor = Some(path.into());
        self
    }

    pub fn policy(mut self, policy: VerifierPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ProbeConfig, ProbeError> {
        let c = &self.config;
        if c.patch_size == 0 {
            return Err(ProbeError::InvalidConfig("Patch size must be ≥ 1".into()));
        }
        if c.dpi < 72 || c.dpi > 400 {
            return Err(ProbeError::InvalidConfig(format!(
                "DPI must be 72–400, got {}",
                c.dpi
            )));
        }
        if matches!(c.pages, PageSelection::Spread(0)) {
            return Err(ProbeError::InvalidConfig(
                "Max pages per PDF must be ≥ 1".into(),
            ));
        }
        if !(c.policy.relative_tolerance > 0.0) {
            return Err(ProbeError::InvalidConfig(format!(
                "Relative tolerance must be > 0, got {}",
                c.policy.relative_tolerance
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Which model families a verification run exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSelection {
    /// GLM-OCR only.
    Glm,
    /// Qwen2.5-VL only.
    Qwen,
    /// GLM-OCR then Qwen2.5-VL. (default)
    #[default]
    Both,
    /// The fixed-canvas control encoder only.
    Fixed,
    /// GLM-OCR, Qwen2.5-VL and the fixed-canvas control.
    All,
}

impl ModelSelection {
    /// Families in run order.
    pub fn families(&self) -> Vec<ModelFamily> {
        match self {
            ModelSelection::Glm => vec![ModelFamily::Glm],
            ModelSelection::Qwen => vec![ModelFamily::Qwen],
            ModelSelection::Both => vec![ModelFamily::Glm, ModelFamily::Qwen],
            ModelSelection::Fixed => vec![ModelFamily::FixedCanvas],
            ModelSelection::All => vec![
                ModelFamily::Glm,
                ModelFamily::Qwen,
                ModelFamily::FixedCanvas,
            ],
        }
    }
}

/// Specifies which pages of each PDF to verify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSelection {
    /// First page, last page, and evenly spaced pages in between, capped at
    /// the given count. Every page when the PDF is short enough. (default: 5)
    Spread(usize),
    /// Every page.
    All,
    /// A single page (1-indexed).
    Single(usize),
    /// A contiguous range of pages (1-indexed, inclusive).
    Range(usize, usize),
    /// Specific pages (1-indexed, deduplicated).
    Set(Vec<usize>),
}

impl Default for PageSelection {
    fn default() -> Self {
        PageSelection::Spread(DEFAULT_MAX_PAGES)
    }
}

impl PageSelection {
    /// Expand the selection into a sorted, deduplicated list of 0-indexed page numbers.
    pub fn to_indices(&self, total_pages: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = match self {
            PageSelection::Spread(max) => return spread_indices(total_pages, *max),
            PageSelection::All => (0..total_pages).collect(),
            PageSelection::Single(p) => {
                if *p >= 1 && *p <= total_pages {
                    vec![p - 1]
                } else {
                    vec![]
                }
            }
            PageSelection::Range(start, end) => {
                let s = (*start).max(1) - 1;
                let e = (*end).min(total_pages);
                (s..e).collect()
            }
            PageSelection::Set(pages) => pages
                .iter()
                .filter(|&&p| p >= 1 && p <= total_pages)
                .map(|p| p - 1)
                .collect(),
        };
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

/// First, last, and `max - 2` evenly stepped pages.
///
/// Steps are truncated and may collide with the endpoints, so fewer than
/// `max` pages can come back (15 pages, max 5 → 0, 5, 10, 14).
fn spread_indices(total_pages: usize, max: usize) -> Vec<usize> {
    if total_pages <= max {
        return (0..total_pages).collect();
    }

    let last = total_pages - 1;
    let mut picked = BTreeSet::from([0, last]);
    if max > 2 {
        let step = total_pages as f64 / (max - 2) as f64;
        for i in 0..max - 2 {
            picked.insert(((i as f64 * step) as usize).min(last));
        }
    }
    picked.into_iter().collect()
}

//! # navit-probe
//!
//! Check whether a vision-language model's image preprocessor keeps the
//! native resolution of a document (NaViT-style) or squeezes every input
//! onto one fixed canvas.
//!
//! ## Why this crate?
//!
//! Document OCR models are often advertised as "native resolution", yet a
//! 100 × 2800 px receipt and a 3840 × 2160 px report can silently end up as
//! the same 24 × 24 patch grid. The only reliable check is to feed the
//! preprocessor documents of extreme shapes and compare the token grid it
//! reports with the budget the native pixels would need. This crate
//! generates such documents, runs them through emulations of each model's
//! preprocessor, and classifies every result.
//!
//! ## Pipeline Overview
//!
//! ```text
//! catalog
//!  │
//!  ├─ 1. Generate  raster documents (image + imageproc), PDFs (pdfium)
//!  ├─ 2. Input     locate PNGs / PDFs, decode or open them
//!  ├─ 3. Render    rasterise sampled PDF pages at dpi / 72 px per point
//!  ├─ 4. Adapt     smart_resize / fixed canvas → token grid per model
//!  ├─ 5. Verify    expected vs actual → PASS / FAIL / CHECK / ERROR / N/A
//!  └─ 6. Report    console tables + atomic JSON results
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use navit_probe::{generate_documents, verify_documents, ModelSelection, ProbeConfig, Status};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProbeConfig::builder()
//!         .doc_dir("stress_test_documents")
//!         .models(ModelSelection::All)
//!         .build()?;
//!     generate_documents(&config)?;
//!     let report = verify_documents(&config)?;
//!     for (model, results) in &report.results {
//!         let passed = results.iter().filter(|r| r.measurement.status == Status::Pass).count();
//!         println!("{model}: {passed}/{} PASS", results.len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `navit-probe` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! PDF generation and verification need a pdfium shared library at run
//! time; see [`pdfium::bind_pdfium`] for the lookup order.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod adapter;
pub mod catalog;
pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod pdfium;
pub mod pipeline;
pub mod probe;
pub mod progress;
pub mod report;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use adapter::{ModelFamily, PreprocessOutput, TokenGrid, VisionPreprocessor};
pub use config::{ModelSelection, PageSelection, ProbeConfig, ProbeConfigBuilder};
pub use error::{ItemError, ProbeError};
pub use generate::{GeneratedItem, GenerationReport};
pub use output::{
    DocumentResult, DocumentRunReport, Measurement, ModelSummary, PageResult, PdfReport,
    PdfRunReport,
};
pub use probe::{
    generate_documents, generate_pdfs, inspect, verify_documents, verify_documents_to_file,
    verify_pdfs, verify_pdfs_to_file,
};
pub use progress::{NoopProgressCallback, ProbeProgressCallback, ProgressCallback};
pub use token_budget::{Status, VerifierPolicy};

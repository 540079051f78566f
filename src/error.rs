//! Error types for the navit-probe library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ProbeError`]: **Fatal**: the run cannot proceed at all (input
//!   directory missing, pdfium not bindable, result file not writable).
//!   Returned as `Err(ProbeError)` from the top-level entry points.
//!
//! * [`ItemError`]: **Non-fatal**: one document, page or model failed but
//!   every other item is fine. Stored inside the report (its message becomes
//!   the `error` field of an `ERROR` result) and the run moves on.

use std::path::PathBuf;
use thiserror::Error;

/// Longest error message kept in a result record, in characters.
pub const ERROR_MESSAGE_LIMIT: usize = 80;

/// All fatal errors returned by the navit-probe library.
#[derive(Debug, Error)]
pub enum ProbeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The documents or PDF directory does not exist.
    #[error("Input directory not found: '{path}'\nGenerate it first (generate-docs / generate-pdfs) or pass the right directory.")]
    DirectoryNotFound { path: PathBuf },

    /// A TrueType font was requested but could not be read or parsed.
    #[error("Failed to load font '{path}': {detail}")]
    FontLoadFailed { path: PathBuf, detail: String },

    /// A `preprocessor_config.json` override could not be read or parsed.
    #[error("Invalid preprocessor config '{path}': {detail}")]
    PreprocessorConfig { path: PathBuf, detail: String },

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Set PDFIUM_LIB_PATH (or --pdfium-lib) to a libpdfium shared library or the\n\
directory containing it. Pre-built libraries are published at\n\
https://github.com/bblanchon/pdfium-binaries/releases\n"
    )]
    PdfiumBindingFailed(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A report could not be serialised.
    #[error("Failed to serialise report: {0}")]
    Serialization(String),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single document, page or model.
#[derive(Debug, Clone, PartialEq, Error, serde::Serialize, serde::Deserialize)]
pub enum ItemError {
    /// A raster document could not be opened or decoded.
    #[error("{id}: cannot load image: {detail}")]
    ImageLoad { id: String, detail: String },

    /// A PDF could not be opened by pdfium.
    #[error("{id}: cannot open PDF: {detail}")]
    PdfOpen { id: String, detail: String },

    /// A PDF page could not be rasterised.
    #[error("Page {page}: rasterisation failed: {detail}")]
    RenderFailed { page: usize, detail: String },

    /// The model's preprocessor rejected the image.
    #[error("{detail}")]
    Preprocess { model: String, detail: String },

    /// The model's preprocessor could not be constructed.
    #[error("{model} processor unavailable: {detail}")]
    ProcessorUnavailable { model: String, detail: String },

    /// A document or PDF could not be generated.
    #[error("{id}: generation failed: {detail}")]
    GenerationFailed { id: String, detail: String },
}

impl ItemError {
    /// The message stored in a result's `error` field.
    pub fn short_message(&self) -> String {
        truncate_message(&self.to_string(), ERROR_MESSAGE_LIMIT)
    }
}

/// Cut `msg` to at most `limit` characters, never splitting a code point.
pub fn truncate_message(msg: &str, limit: usize) -> String {
    msg.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_not_found_display() {
        let e = ProbeError::DirectoryNotFound {
            path: PathBuf::from("stress_test_pdfs"),
        };
        let msg = e.to_string();
        assert!(msg.contains("stress_test_pdfs"), "got: {msg}");
    }

    #[test]
    fn pdfium_binding_display_mentions_env_var() {
        let e = ProbeError::PdfiumBindingFailed("dlopen failed".into());
        assert!(e.to_string().contains("dlopen failed"));
        assert!(e.to_string().contains("PDFIUM_LIB_PATH"));
    }

    #[test]
    fn preprocess_error_keeps_upstream_message() {
        let e = ItemError::Preprocess {
            model: "qwen".into(),
            detail: "absolute aspect ratio must be smaller than 200, got 250".into(),
        };
        assert!(e.to_string().starts_with("absolute aspect ratio"));
    }

    #[test]
    fn short_message_is_capped_at_eighty_chars() {
        let e = ItemError::ImageLoad {
            id: "01_long_receipt".into(),
            detail: "x".repeat(200),
        };
        assert_eq!(e.short_message().chars().count(), ERROR_MESSAGE_LIMIT);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let s = "é".repeat(100);
        let t = truncate_message(&s, 80);
        assert_eq!(t.chars().count(), 80);
        assert_eq!(truncate_message("short", 80), "short");
    }
}

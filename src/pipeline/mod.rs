//! Pipeline stages for token-budget verification.
//!
//! Each submodule implements exactly one step and returns
//! `Result<_, ItemError>` for per-item failures, so the entry points in
//! [`crate::probe`] can record successes and errors the same way.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ render ──▶ verify
//! (dir/file)  (pdfium)   (adapter + classify)
//! ```
//!
//! 1. [`input`]: locate documents and PDFs, check magic bytes, decode PNGs
//! 2. [`render`]: rasterise selected PDF pages at `dpi / 72` px per point
//! 3. [`verify`]: run every model adapter and classify the reported budget

pub mod input;
pub mod render;
pub mod verify;

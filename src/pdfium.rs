//! Locating and binding the pdfium shared library.
//!
//! Search order:
//!
//! 1. the explicit path from the config (`--pdfium-lib`), a file or a directory
//! 2. `PDFIUM_LIB_PATH`
//! 3. the current working directory
//! 4. the system library search path

use crate::error::ProbeError;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the pdfium library or its directory.
pub const PDFIUM_LIB_ENV: &str = "PDFIUM_LIB_PATH";

/// Bind to pdfium, trying each candidate location in turn.
pub fn bind_pdfium(explicit: Option<&Path>) -> Result<Pdfium, ProbeError> {
    let mut failures = Vec::new();

    for candidate in candidates(explicit) {
        match Pdfium::bind_to_library(&candidate) {
            Ok(bindings) => {
                debug!("Bound pdfium from {}", candidate.display());
                return Ok(Pdfium::new(bindings));
            }
            Err(e) => failures.push(format!("{}: {e}", candidate.display())),
        }
    }

    match Pdfium::bind_to_system_library() {
        Ok(bindings) => {
            debug!("Bound system pdfium");
            Ok(Pdfium::new(bindings))
        }
        Err(e) => {
            failures.push(format!("system library: {e}"));
            Err(ProbeError::PdfiumBindingFailed(failures.join("; ")))
        }
    }
}

fn candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let from_env = std::env::var_os(PDFIUM_LIB_ENV).map(PathBuf::from);
    explicit
        .map(Path::to_path_buf)
        .into_iter()
        .chain(from_env)
        .map(|p| library_file(&p))
        .chain(std::iter::once(Pdfium::pdfium_platform_library_name_at_path("./")))
        .collect()
}

/// A directory resolves to the platform library name inside it.
fn library_file(path: &Path) -> PathBuf {
    if path.is_dir() {
        Pdfium::pdfium_platform_library_name_at_path(path)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_resolve_to_platform_library() {
        let dir = tempfile::tempdir().unwrap();
        let lib = library_file(dir.path());
        assert!(lib.starts_with(dir.path()));
        assert!(lib.to_string_lossy().contains("pdfium"));
    }

    #[test]
    fn explicit_path_is_tried_first() {
        let c = candidates(Some(Path::new("/opt/pdfium/libpdfium.so")));
        assert_eq!(c[0], PathBuf::from("/opt/pdfium/libpdfium.so"));
        assert!(c.len() >= 2);
    }
}

//! Input resolution: locate the documents and PDFs a verification run reads.
//!
//! Missing directories are fatal; a missing or unreadable file only costs
//! that one item. PDF magic bytes (`%PDF`) are checked before pdfium sees a
//! file so a stray text file yields a readable error instead of a pdfium
//! status code.

use crate::error::{ItemError, ProbeError};
use image::DynamicImage;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A PDF discovered in the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfInput {
    /// File stem, used as the report key.
    pub id: String,
    pub path: PathBuf,
}

/// Fail unless `dir` is an existing directory.
pub fn require_dir(dir: &Path) -> Result<(), ProbeError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(ProbeError::DirectoryNotFound {
            path: dir.to_path_buf(),
        })
    }
}

/// Every `*.pdf` in `dir`, sorted by file name.
pub fn list_pdfs(dir: &Path) -> Result<Vec<PdfInput>, ProbeError> {
    require_dir(dir)?;
    let entries = std::fs::read_dir(dir).map_err(|e| ProbeError::Internal(format!(
        "Cannot list '{}': {e}",
        dir.display()
    )))?;

    let mut pdfs: Vec<PdfInput> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
        })
        .filter_map(|path| {
            let id = path.file_stem()?.to_str()?.to_string();
            Some(PdfInput { id, path })
        })
        .collect();
    pdfs.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));

    debug!("Found {} PDFs in {}", pdfs.len(), dir.display());
    Ok(pdfs)
}

/// Verify the first four bytes of `path` are `%PDF`.
pub fn check_pdf_magic(path: &Path, id: &str) -> Result<(), ItemError> {
    let mut f = std::fs::File::open(path).map_err(|e| ItemError::PdfOpen {
        id: id.to_string(),
        detail: e.to_string(),
    })?;
    let mut magic = [0u8; 4];
    match f.read_exact(&mut magic) {
        Ok(()) if &magic == b"%PDF" => Ok(()),
        Ok(()) => Err(ItemError::PdfOpen {
            id: id.to_string(),
            detail: format!("not a PDF (magic bytes {magic:02x?})"),
        }),
        Err(_) => Err(ItemError::PdfOpen {
            id: id.to_string(),
            detail: "file shorter than a PDF header".into(),
        }),
    }
}

/// Open and decode a raster document.
pub fn load_image(path: &Path, id: &str) -> Result<DynamicImage, ItemError> {
    if !path.exists() {
        return Err(ItemError::ImageLoad {
            id: id.to_string(),
            detail: format!("file not found: {}", path.display()),
        });
    }
    image::open(path).map_err(|e| ItemError::ImageLoad {
        id: id.to_string(),
        detail: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_dir_is_fatal() {
        let err = require_dir(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, ProbeError::DirectoryNotFound { .. }));
    }

    #[test]
    fn lists_only_pdfs_sorted() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.pdf"), b"%PDF-1.7").unwrap();
        std::fs::write(dir.path().join("a.PDF"), b"%PDF-1.7").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
        std::fs::create_dir(dir.path().join("sub.pdf")).unwrap();

        let ids: Vec<String> = list_pdfs(dir.path()).unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn magic_bytes_are_checked() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.pdf");
        let bad = dir.path().join("bad.pdf");
        let short = dir.path().join("short.pdf");
        std::fs::write(&good, b"%PDF-1.7\n").unwrap();
        std::fs::write(&bad, b"<html>").unwrap();
        std::fs::write(&short, b"%P").unwrap();

        assert!(check_pdf_magic(&good, "good").is_ok());
        assert!(check_pdf_magic(&bad, "bad").unwrap_err().to_string().contains("not a PDF"));
        assert!(check_pdf_magic(&short, "short").is_err());
    }

    #[test]
    fn missing_and_corrupt_images_are_item_errors() {
        let dir = TempDir::new().unwrap();
        let missing = load_image(&dir.path().join("nope.png"), "nope").unwrap_err();
        assert!(missing.to_string().contains("file not found"));

        let junk = dir.path().join("junk.png");
        std::fs::write(&junk, b"not an image").unwrap();
        assert!(matches!(
            load_image(&junk, "junk"),
            Err(ItemError::ImageLoad { .. })
        ));
    }
}

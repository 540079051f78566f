//! Report writer: console tables and atomic JSON result files.
//!
//! The `render_*` functions return the text instead of printing it, so the
//! binary decides where it goes (stdout, or nowhere under `--json`).

use crate::adapter::ModelFamily;
use crate::error::ProbeError;
use crate::generate::GenerationReport;
use crate::output::{DocumentRunReport, Measurement, ModelSummary, PageResult, PdfRunReport};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// File name of the raster document results, inside the documents directory.
pub const DOCUMENT_RESULTS_FILE: &str = "document_navit_results.json";

/// File name of the PDF results, inside the PDF directory.
pub const PDF_RESULTS_FILE: &str = "pdf_navit_results.json";

const RULE_WIDTH: usize = 70;

// ── File output ──────────────────────────────────────────────────────────

/// Write `path` through a temp file in the same directory, then rename it
/// into place. A reader never sees a half-written file.
pub(crate) fn write_atomic<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<&File>) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        write(&mut writer)?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Serialise `value` as pretty-printed UTF-8 JSON to `path`, atomically.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), ProbeError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ProbeError::Serialization(e.to_string()))?;
    write_atomic(path, |w| {
        w.write_all(json.as_bytes())?;
        w.write_all(b"\n")
    })
    .map_err(|source| ProbeError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tables ───────────────────────────────────────────────────────────────

fn banner(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{rule}\n{title}\n{rule}");
}

/// `12345` → `"12,345"`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn cells(m: &Measurement) -> (String, String, String) {
    (
        m.actual_tokens.map(thousands).unwrap_or_else(|| "N/A".to_string()),
        m.grid.clone().unwrap_or_else(|| "-".to_string()),
        m.padding.clone().unwrap_or_else(|| "-".to_string()),
    )
}

/// Per-model document tables, each followed by `"{label}: p/N PASS"`.
pub fn render_document_report(report: &DocumentRunReport) -> String {
    let mut out = String::new();
    banner(&mut out, "NaViT DOCUMENT STRESS TEST - REALISTIC DOCUMENTS");

    for family in ModelFamily::ALL {
        let Some(results) = report.results.get(family.key()) else {
            continue;
        };
        let _ = writeln!(out, "\n{}", family.label());
        let _ = writeln!(
            out,
            "{:<28} {:<14} {:>8} {:>8} {:>12} {:>14} Status",
            "Document", "Dims", "Expected", "Actual", "Grid", "Padding"
        );
        let _ = writeln!(out, "{}", "-".repeat(90));
        for r in results {
            let m = &r.measurement;
            let (actual, grid, padding) = cells(m);
            let _ = writeln!(
                out,
                "  {:<26} {:<14} {:>8} {:>8} {:>12} {:>14} {}",
                r.id,
                format!("{}x{}", m.width, m.height),
                thousands(m.expected_tokens),
                actual,
                grid,
                padding,
                m.status.icon()
            );
            if let Some(err) = &m.error {
                let _ = writeln!(out, "      {err}");
            }
        }
        let summary = ModelSummary::from_statuses(results.iter().map(|r| r.measurement.status));
        let _ = writeln!(out, "\n{}: {}/{} PASS", family.label(), summary.pass, summary.total);
    }
    out
}

fn page_table(out: &mut String, results: &[PageResult]) {
    let _ = writeln!(
        out,
        "\n  {:>4}  {:<14} {:>8} {:>8} {:>12} {:>14} St",
        "Page", "Dims", "Expected", "Actual", "Grid", "Pad"
    );
    let _ = writeln!(
        out,
        "  {}  {} {} {} {} {} {}",
        "-".repeat(4),
        "-".repeat(14),
        "-".repeat(8),
        "-".repeat(8),
        "-".repeat(12),
        "-".repeat(14),
        "-".repeat(4)
    );
    for r in results {
        let m = &r.measurement;
        let (actual, grid, padding) = cells(m);
        let _ = writeln!(
            out,
            "  {:>4}  {:<14} {:>8} {:>8} {:>12} {:>14} {}",
            r.page,
            format!("{}x{}", m.width, m.height),
            thousands(m.expected_tokens),
            actual,
            grid,
            padding,
            m.status.icon()
        );
    }
    let s = ModelSummary::from_statuses(results.iter().map(|r| r.measurement.status));
    let _ = writeln!(
        out,
        "\n  Result: {} PASS / {} CHECK / {} FAIL / {} total",
        s.pass, s.check, s.fail, s.total
    );
}

/// Per-PDF, per-model page tables and the final cross-PDF summary.
pub fn render_pdf_report(report: &PdfRunReport) -> String {
    let mut out = String::new();
    let sampling = match report.max_pages_per_pdf {
        Some(n) => format!("Max pages sampled per PDF: {n}"),
        None => "Explicit page selection".to_string(),
    };
    banner(
        &mut out,
        &format!("NaViT MULTI-PAGE PDF STRESS TEST\n{} DPI | {sampling}", report.dpi),
    );

    for (name, pdf) in &report.pdfs {
        let _ = writeln!(out, "\nPDF: {name}");
        if let Some(err) = &pdf.error {
            let _ = writeln!(out, "  ERROR: {err}");
            continue;
        }
        let _ = writeln!(out, "  Testing {} of {} pages", pdf.sampled_pages, pdf.total_pages);
        let _ = writeln!(out, "  Page dimensions: {}", pdf.page_dimensions.join(", "));
        for family in ModelFamily::ALL {
            if let Some(results) = pdf.models.get(family.key()) {
                let _ = writeln!(out, "\n  -- {} --", family.label());
                page_table(&mut out, results);
            }
        }
    }

    let _ = writeln!(out);
    banner(&mut out, "FINAL SUMMARY - MULTI-PAGE PDF NaViT TEST");
    for family in ModelFamily::ALL {
        let s = report.summary(family);
        if s.total > 0 {
            let _ = writeln!(
                out,
                "  {:<12} {}/{} PASS across {} PDFs",
                format!("{}:", family.label()),
                s.pass,
                s.total,
                report.pdfs.len()
            );
        }
    }
    out
}

/// One line per generated file with its geometry.
pub fn render_generation_report(report: &GenerationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<28} {:>14} {:>8} {:>6} {:>10}",
        "File", "Dims", "Aspect", "Orient", "Size"
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    for item in &report.items {
        let name = item
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| item.id.clone());
        match &item.error {
            None => {
                let size = match item.pages {
                    Some(p) => format!("{p}p {}KB", item.bytes / 1024),
                    None => format!("{}KB", item.bytes / 1024),
                };
                let _ = writeln!(
                    out,
                    "{:<28} {:>14} {:>7.1}:1 {:>6} {:>10}",
                    name, item.dimensions, item.aspect_ratio, item.orientation, size
                );
            }
            Some(e) => {
                let _ = writeln!(out, "{name:<28} FAILED: {e}");
            }
        }
    }
    let _ = writeln!(
        out,
        "\n{}/{} files written to {}",
        report.generated(),
        report.items.len(),
        report.out_dir.display()
    );
    out
}

/// Processor attributes, one block per model.
pub fn render_inspection(models: &[(ModelFamily, Vec<(&'static str, String)>)]) -> String {
    let mut out = String::new();
    for (family, attrs) in models {
        let _ = writeln!(out, "{}", family.label());
        for (name, value) in attrs {
            let _ = writeln!(out, "  {name}: {value}");
        }
        let _ = writeln!(out);
    }
    out
}

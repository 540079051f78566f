//! Library entry points: generate the stress-test material, verify it, and
//! inspect the model adapters.
//!
//! Every entry point is synchronous and processes one item at a time. Fatal
//! conditions (missing directory, pdfium not bindable, unwritable output)
//! are returned as [`ProbeError`]; anything that concerns a single document,
//! page or model is recorded in the returned report and the run continues.

use crate::adapter::{load_preprocessor, ModelFamily};
use crate::catalog::{DOCUMENTS, PDFS};
use crate::config::ProbeConfig;
use crate::error::ProbeError;
use crate::generate::{self, GeneratedItem, GenerationReport};
use crate::output::{DocumentResult, DocumentRunReport, PageResult, PdfReport, PdfRunReport};
use crate::pdfium::bind_pdfium;
use crate::pipeline::render::{OpenedPdf, RenderSettings};
use crate::pipeline::{input, verify};
use crate::progress;
use crate::report::{self, DOCUMENT_RESULTS_FILE, PDF_RESULTS_FILE};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use token_budget::Status;
use tracing::{debug, info, warn};

// ── Generation ───────────────────────────────────────────────────────────

/// Draw every raster document into `config.doc_dir`.
///
/// # Errors
/// Fatal only when the directory cannot be created or the configured font
/// cannot be loaded. A document that fails to save is recorded in the report.
pub fn generate_documents(config: &ProbeConfig) -> Result<GenerationReport, ProbeError> {
    let dir = config.doc_dir.clone();
    generate::ensure_dir(&dir)?;

    let font = config.font_path.as_deref().map(generate::load_font).transpose()?;
    if font.is_none() {
        info!("No font configured; text is drawn as greeked bars");
    }

    let cb = progress::resolve(&config.progress_callback);
    let total = DOCUMENTS.len();
    cb.on_run_start(total);

    let mut items = Vec::with_capacity(total);
    for (i, spec) in DOCUMENTS.iter().enumerate() {
        cb.on_item_start(i + 1, total, spec.id);
        let item = generate::write_document(spec, font.as_ref(), &dir);
        report_generated(&cb, i + 1, total, &item);
        items.push(item);
    }

    let report = GenerationReport { out_dir: dir, items };
    cb.on_run_complete(total, report.generated());
    info!("Generated {}/{} documents in {}", report.generated(), total, report.out_dir.display());
    Ok(report)
}

/// Build every multi-page PDF into `config.pdf_dir`.
///
/// # Errors
/// Fatal when the directory cannot be created or pdfium cannot be bound.
pub fn generate_pdfs(config: &ProbeConfig) -> Result<GenerationReport, ProbeError> {
    let dir = config.pdf_dir.clone();
    generate::ensure_dir(&dir)?;
    let pdfium = bind_pdfium(config.pdfium_lib_path.as_deref())?;

    let cb = progress::resolve(&config.progress_callback);
    let total = PDFS.len();
    cb.on_run_start(total);

    let mut items = Vec::with_capacity(total);
    for (i, spec) in PDFS.iter().enumerate() {
        cb.on_item_start(i + 1, total, spec.id);
        let item = generate::write_pdf(&pdfium, spec, &dir);
        report_generated(&cb, i + 1, total, &item);
        items.push(item);
    }

    let report = GenerationReport { out_dir: dir, items };
    cb.on_run_complete(total, report.generated());
    info!("Generated {}/{} PDFs in {}", report.generated(), total, report.out_dir.display());
    Ok(report)
}

fn report_generated(
    cb: &progress::ProgressCallback,
    index: usize,
    total: usize,
    item: &GeneratedItem,
) {
    match &item.error {
        None => {
            let size = format!("{} KB", item.bytes / 1024);
            cb.on_item_complete(index, total, &item.id, &size);
        }
        Some(e) => {
            warn!("{}", e);
            cb.on_item_error(index, total, &item.id, &e.to_string());
        }
    }
}

// ── Raster documents ─────────────────────────────────────────────────────

/// Verify every catalog document in `config.doc_dir` against the selected
/// models.
///
/// The expected budget is computed from the image's actual size; a file
/// whose size differs from the catalog is logged and measured as found.
///
/// # Errors
/// Fatal only when the documents directory does not exist.
pub fn verify_documents(config: &ProbeConfig) -> Result<DocumentRunReport, ProbeError> {
    let started = Instant::now();

    // ── Step 1: Check input ──────────────────────────────────────────────
    input::require_dir(&config.doc_dir)?;

    // ── Step 2: Load model adapters ──────────────────────────────────────
    let models = verify::load_models(config);
    let mut report = DocumentRunReport::new(config.patch_size);
    for slot in &models {
        report.results.insert(slot.family.key().to_string(), Vec::with_capacity(DOCUMENTS.len()));
    }

    let cb = progress::resolve(&config.progress_callback);
    let total = DOCUMENTS.len();
    cb.on_run_start(total);
    let mut loaded = 0;

    // ── Step 3: Measure each document with each model ────────────────────
    for (i, spec) in DOCUMENTS.iter().enumerate() {
        cb.on_item_start(i + 1, total, spec.id);
        let path = config.doc_dir.join(spec.file_name());

        let measurements = match input::load_image(&path, spec.id) {
            Ok(image) => {
                loaded += 1;
                if (image.width(), image.height()) != (spec.width, spec.height) {
                    warn!(
                        "{}: found {}x{}, catalog says {}",
                        spec.id,
                        image.width(),
                        image.height(),
                        spec.dimensions()
                    );
                }
                let ms = verify::measure_all(&models, &image, config.patch_size, &config.policy);
                let line = verify::outcome_line(ms.iter().map(|(f, m)| (*f, m)));
                cb.on_item_complete(i + 1, total, spec.id, &line);
                ms
            }
            Err(e) => {
                warn!("{}", e);
                cb.on_item_error(i + 1, total, spec.id, &e.to_string());
                verify::error_all(&models, spec.width, spec.height, config.patch_size, &e)
            }
        };

        for (family, measurement) in measurements {
            debug!("{} [{}] {}", spec.id, family.key(), measurement.status);
            if let Some(results) = report.results.get_mut(family.key()) {
                results.push(DocumentResult {
                    id: spec.id.to_string(),
                    desc: spec.desc.to_string(),
                    dimensions: spec.dimensions(),
                    measurement,
                });
            }
        }
    }

    cb.on_run_complete(total, loaded);
    info!(
        "Verified {} documents with {} models in {}ms",
        total,
        models.len(),
        started.elapsed().as_millis()
    );
    Ok(report)
}

/// [`verify_documents`], then write the JSON report.
///
/// Writes to `output`, or `{doc_dir}/document_navit_results.json` when `None`.
/// Returns the report and the path written.
pub fn verify_documents_to_file(
    config: &ProbeConfig,
    output: Option<&Path>,
) -> Result<(DocumentRunReport, PathBuf), ProbeError> {
    let report = verify_documents(config)?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.doc_dir.join(DOCUMENT_RESULTS_FILE));
    report::write_json(&report, &path)?;
    info!("Results written to {}", path.display());
    Ok((report, path))
}

// ── PDFs ─────────────────────────────────────────────────────────────────

/// Render the selected pages of every PDF in `config.pdf_dir` and verify
/// them against the selected models.
///
/// # Errors
/// Fatal when the PDF directory does not exist or pdfium cannot be bound.
pub fn verify_pdfs(config: &ProbeConfig) -> Result<PdfRunReport, ProbeError> {
    let started = Instant::now();

    // ── Step 1: Discover PDFs ────────────────────────────────────────────
    let pdfs = input::list_pdfs(&config.pdf_dir)?;
    if pdfs.is_empty() {
        warn!("No PDFs found in {}", config.pdf_dir.display());
    }

    // ── Step 2: Bind pdfium, load model adapters ─────────────────────────
    let pdfium = bind_pdfium(config.pdfium_lib_path.as_deref())?;
    let models = verify::load_models(config);
    let settings = RenderSettings {
        dpi: config.dpi,
        max_rendered_pixels: config.max_rendered_pixels,
    };

    let mut report = PdfRunReport::new(config.dpi, config.max_pages_per_pdf(), config.patch_size);
    let cb = progress::resolve(&config.progress_callback);
    let total = pdfs.len();
    cb.on_run_start(total);
    let mut opened = 0;

    // ── Step 3: Render and measure, one PDF at a time ────────────────────
    for (i, pdf) in pdfs.iter().enumerate() {
        cb.on_item_start(i + 1, total, &pdf.id);

        let doc = input::check_pdf_magic(&pdf.path, &pdf.id)
            .and_then(|()| OpenedPdf::open(&pdfium, &pdf.path, &pdf.id, settings));
        let doc = match doc {
            Ok(doc) => doc,
            Err(e) => {
                warn!("{}", e);
                cb.on_item_error(i + 1, total, &pdf.id, &e.to_string());
                report.pdfs.insert(
                    pdf.id.clone(),
                    PdfReport {
                        error: Some(e.short_message()),
                        ..PdfReport::default()
                    },
                );
                continue;
            }
        };
        opened += 1;

        let pdf_report = verify_pdf(&doc, &pdf.id, &models, config);
        let summary = models
            .iter()
            .map(|slot| {
                let pass = pdf_report
                    .models
                    .get(slot.family.key())
                    .map(|rs| rs.iter().filter(|r| r.measurement.status == Status::Pass).count())
                    .unwrap_or(0);
                format!("{} {}/{}", slot.family.key(), pass, pdf_report.sampled_pages)
            })
            .collect::<Vec<_>>()
            .join(", ");
        cb.on_item_complete(i + 1, total, &pdf.id, &summary);
        report.pdfs.insert(pdf.id.clone(), pdf_report);
    }

    cb.on_run_complete(total, opened);
    info!("Verified {} PDFs in {}ms", total, started.elapsed().as_millis());
    Ok(report)
}

/// Measure the sampled pages of one opened PDF.
fn verify_pdf(
    doc: &OpenedPdf<'_>,
    id: &str,
    models: &[verify::ModelSlot],
    config: &ProbeConfig,
) -> PdfReport {
    let total_pages = doc.page_count();
    let indices = config.pages.to_indices(total_pages);
    info!("{}: testing {} of {} pages", id, indices.len(), total_pages);

    let mut out = PdfReport {
        total_pages,
        sampled_pages: indices.len(),
        page_numbers: indices.iter().map(|i| i + 1).collect(),
        ..PdfReport::default()
    };
    for slot in models {
        out.models.insert(slot.family.key().to_string(), Vec::with_capacity(indices.len()));
    }
    let mut dims = BTreeSet::new();

    for idx in indices {
        let page = idx + 1;
        let measurements = match doc.render_page(idx) {
            Ok(image) => {
                dims.insert(format!("{}x{}", image.width(), image.height()));
                verify::measure_all(models, &image, config.patch_size, &config.policy)
            }
            Err(e) => {
                warn!("{}: {}", id, e);
                let (w, h) = doc.page_size_px(idx).unwrap_or((0, 0));
                verify::error_all(models, w, h, config.patch_size, &e)
            }
        };

        for (family, measurement) in measurements {
            if let Some(results) = out.models.get_mut(family.key()) {
                results.push(PageResult { page, measurement });
            }
        }
    }

    out.page_dimensions = dims.into_iter().collect();
    out
}

/// [`verify_pdfs`], then write the JSON report.
///
/// Writes to `output`, or `{pdf_dir}/pdf_navit_results.json` when `None`.
pub fn verify_pdfs_to_file(
    config: &ProbeConfig,
    output: Option<&Path>,
) -> Result<(PdfRunReport, PathBuf), ProbeError> {
    let report = verify_pdfs(config)?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.pdf_dir.join(PDF_RESULTS_FILE));
    report::write_json(&report, &path)?;
    info!("Results written to {}", path.display());
    Ok((report, path))
}

// ── Inspection ───────────────────────────────────────────────────────────

/// Attributes of each selected model adapter, after applying overrides.
///
/// Unlike verification, an override that cannot be loaded is fatal here:
/// there is nothing else to report.
pub fn inspect(
    config: &ProbeConfig,
) -> Result<Vec<(ModelFamily, Vec<(&'static str, String)>)>, ProbeError> {
    config
        .models
        .families()
        .into_iter()
        .map(|family| {
            let override_path = match family {
                ModelFamily::Glm => config.glm_preprocessor.as_deref(),
                ModelFamily::Qwen => config.qwen_preprocessor.as_deref(),
                ModelFamily::FixedCanvas => None,
            };
            let processor = load_preprocessor(family, override_path)?;
            Ok((family, processor.attributes()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelSelection;

    fn config_in(dir: &Path, models: ModelSelection) -> ProbeConfig {
        ProbeConfig::builder().doc_dir(dir).models(models).build().unwrap()
    }

    #[test]
    fn missing_doc_dir_is_fatal() {
        let config = config_in(Path::new("/nonexistent/navit/docs"), ModelSelection::Qwen);
        assert!(matches!(
            verify_documents(&config),
            Err(ProbeError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn missing_files_become_error_records() {
        let dir = tempfile::tempdir().unwrap();
        let report = verify_documents(&config_in(dir.path(), ModelSelection::Both)).unwrap();
        assert_eq!(report.results.len(), 2);
        for results in report.results.values() {
            assert_eq!(results.len(), DOCUMENTS.len());
            assert!(results.iter().all(|r| r.measurement.status == Status::Error));
            assert!(results[0].measurement.error.as_deref().unwrap().len() <= 80);
        }
    }

    #[test]
    fn generated_documents_verify_as_native() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), ModelSelection::All);
        let generated = generate_documents(&config).unwrap();
        assert_eq!(generated.generated(), DOCUMENTS.len());

        let (report, path) = verify_documents_to_file(&config, None).unwrap();
        assert_eq!(path, dir.path().join(DOCUMENT_RESULTS_FILE));
        assert!(path.is_file());

        let glm = report.summary(ModelFamily::Glm).unwrap();
        let qwen = report.summary(ModelFamily::Qwen).unwrap();
        let fixed = report.summary(ModelFamily::FixedCanvas).unwrap();
        assert_eq!((glm.pass, glm.total), (10, 10));
        assert_eq!((qwen.pass, qwen.total), (10, 10));
        assert_eq!((fixed.fail, fixed.total), (10, 10));
    }

    #[test]
    fn inspect_lists_selected_models() {
        let config = ProbeConfig::builder().models(ModelSelection::All).build().unwrap();
        let models = inspect(&config).unwrap();
        assert_eq!(models.len(), 3);
        assert!(models.iter().all(|(_, attrs)| !attrs.is_empty()));

        let bad = ProbeConfig::builder()
            .models(ModelSelection::Qwen)
            .qwen_preprocessor("/nonexistent/preprocessor_config.json")
            .build()
            .unwrap();
        assert!(matches!(inspect(&bad), Err(ProbeError::PreprocessorConfig { .. })));
    }
}

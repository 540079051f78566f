//! End-to-end pipeline tests: generate the stress-test material into a
//! temporary directory, verify it, and check the classifications.
//!
//! The PDF tests need a pdfium shared library. They skip themselves when
//! none can be bound; point `PDFIUM_LIB_PATH` at one to run them:
//!   PDFIUM_LIB_PATH=/opt/pdfium/lib cargo test --test pipeline -- --nocapture

use navit_probe::catalog::{DOCUMENTS, PDFS};
use navit_probe::pdfium::bind_pdfium;
use navit_probe::{
    generate_documents, generate_pdfs, verify_documents, verify_documents_to_file,
    verify_pdfs_to_file, ModelFamily, ModelSelection, PageSelection, ProbeConfig, Status,
};
use std::path::Path;
use std::sync::Mutex;

// ── Test helpers ─────────────────────────────────────────────────────────────

/// pdfium keeps process-wide state; PDF tests take this lock so only one
/// binding is alive at a time.
static PDFIUM_LOCK: Mutex<()> = Mutex::new(());

/// Skip this test unless a pdfium library can be bound. Evaluates to the
/// guard that serialises PDF tests.
macro_rules! skip_without_pdfium {
    () => {{
        let guard = PDFIUM_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = bind_pdfium(None) {
            println!("SKIP: pdfium not available: {}", e.to_string().lines().next().unwrap_or(""));
            return;
        }
        guard
    }};
}

fn doc_config(dir: &Path, models: ModelSelection) -> ProbeConfig {
    ProbeConfig::builder()
        .doc_dir(dir)
        .models(models)
        .build()
        .expect("valid config")
}

// ── Raster documents ─────────────────────────────────────────────────────────

#[test]
fn generated_documents_have_catalog_sizes() {
    let dir = tempfile::tempdir().unwrap();
    let report = generate_documents(&doc_config(dir.path(), ModelSelection::Both)).unwrap();
    assert_eq!(report.items.len(), DOCUMENTS.len());

    for spec in DOCUMENTS.iter() {
        let img = image::open(dir.path().join(spec.file_name())).unwrap();
        assert_eq!(
            (img.width(), img.height()),
            (spec.width, spec.height),
            "{} has the wrong size",
            spec.id
        );
    }
}

#[test]
fn native_models_pass_and_fixed_canvas_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = doc_config(dir.path(), ModelSelection::All);
    generate_documents(&config).unwrap();

    let report = verify_documents(&config).unwrap();
    for family in [ModelFamily::Glm, ModelFamily::Qwen] {
        for r in &report.results[family.key()] {
            assert_eq!(
                r.measurement.status,
                Status::Pass,
                "{} on {}: {:?}",
                r.id,
                family,
                r.measurement
            );
        }
    }
    for r in &report.results["fixed"] {
        assert_eq!(r.measurement.status, Status::Fail, "{}", r.id);
        assert_eq!(r.measurement.actual_tokens, Some(576));
    }
}

#[test]
fn known_grids() {
    let dir = tempfile::tempdir().unwrap();
    let config = doc_config(dir.path(), ModelSelection::Both);
    generate_documents(&config).unwrap();
    let report = verify_documents(&config).unwrap();

    let find = |model: &str, id: &str| {
        report.results[model]
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.measurement.clone())
            .unwrap()
    };

    let four_k = find("glm", "08_financial_report_4k");
    assert_eq!(four_k.expected_tokens, 42_196);
    assert_eq!(four_k.actual_tokens, Some(24_128));
    assert_eq!(four_k.grid.as_deref(), Some("116x208"));

    let receipt = find("qwen", "01_long_receipt");
    assert_eq!(receipt.expected_tokens, 1_400);
    assert_eq!(receipt.actual_tokens, Some(1_600));

    let stamp = find("glm", "10_postage_stamp");
    assert_eq!(stamp.expected_tokens, 16);
    assert_eq!(stamp.actual_tokens, Some(36));
    assert_eq!(stamp.status, Status::Pass);
}

#[test]
fn results_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let config = doc_config(dir.path(), ModelSelection::Qwen);
    generate_documents(&config).unwrap();

    let out = dir.path().join("custom.json");
    let (_, path) = verify_documents_to_file(&config, Some(&out)).unwrap();
    assert_eq!(path, out);

    let text = std::fs::read_to_string(&out).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["test_type"], "realistic_documents");
    assert_eq!(json["results"]["qwen"].as_array().unwrap().len(), DOCUMENTS.len());
    assert!(json["results"].get("glm").is_none());
    assert_eq!(json["results"]["qwen"][0]["id"], "01_long_receipt");
}

#[test]
fn corrupt_document_is_an_error_record() {
    let dir = tempfile::tempdir().unwrap();
    let config = doc_config(dir.path(), ModelSelection::Both);
    generate_documents(&config).unwrap();
    std::fs::write(dir.path().join("03_research_paper_a4.png"), b"not a png").unwrap();

    let report = verify_documents(&config).unwrap();
    for results in report.results.values() {
        let paper = results.iter().find(|r| r.id == "03_research_paper_a4").unwrap();
        assert_eq!(paper.measurement.status, Status::Error);
        assert!(paper.measurement.error.as_ref().unwrap().chars().count() <= 80);
        let others = results.iter().filter(|r| r.measurement.status == Status::Pass).count();
        assert_eq!(others, DOCUMENTS.len() - 1);
    }
}

// ── PDFs ─────────────────────────────────────────────────────────────────────

#[test]
fn pdfs_generate_and_verify() {
    let _pdfium = skip_without_pdfium!();

    let dir = tempfile::tempdir().unwrap();
    let config = ProbeConfig::builder()
        .pdf_dir(dir.path())
        .models(ModelSelection::All)
        .max_pages(3)
        .build()
        .unwrap();

    let generated = generate_pdfs(&config).unwrap();
    assert_eq!(generated.generated(), PDFS.len());
    for (item, spec) in generated.items.iter().zip(PDFS.iter()) {
        assert_eq!(item.pages, Some(spec.pages));
    }

    let (report, path) = verify_pdfs_to_file(&config, None).unwrap();
    assert!(path.ends_with("pdf_navit_results.json"));
    assert_eq!(report.pdfs.len(), PDFS.len());
    assert_eq!(report.max_pages_per_pdf, Some(3));

    let financial = &report.pdfs["01_financial_report"];
    assert_eq!(financial.total_pages, 15);
    assert_eq!(financial.page_numbers, vec![1, 15]);
    assert_eq!(financial.page_dimensions, vec!["1240x1753".to_string()]);

    let glm = report.summary(ModelFamily::Glm);
    let qwen = report.summary(ModelFamily::Qwen);
    let fixed = report.summary(ModelFamily::FixedCanvas);
    assert_eq!(glm.pass, glm.total);
    assert_eq!(qwen.pass, qwen.total);
    assert_eq!(fixed.fail, fixed.total);
}

#[test]
fn mixed_sizes_render_at_their_own_size() {
    let _pdfium = skip_without_pdfium!();

    let dir = tempfile::tempdir().unwrap();
    let config = ProbeConfig::builder()
        .pdf_dir(dir.path())
        .models(ModelSelection::Qwen)
        .pages(PageSelection::All)
        .build()
        .unwrap();
    generate_pdfs(&config).unwrap();

    let (report, _) = verify_pdfs_to_file(&config, None).unwrap();
    let mixed = &report.pdfs["02_mixed_sizes"];
    assert_eq!(mixed.sampled_pages, 10);
    assert!(mixed.page_dimensions.contains(&"625x2500".to_string()));
    assert!(mixed.page_dimensions.contains(&"2500x833".to_string()));
    assert_eq!(report.max_pages_per_pdf, None);
}

#[test]
fn unreadable_pdf_is_recorded_not_fatal() {
    let _pdfium = skip_without_pdfium!();

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.pdf"), b"plain text").unwrap();
    let config = ProbeConfig::builder()
        .pdf_dir(dir.path())
        .models(ModelSelection::Both)
        .build()
        .unwrap();

    let (report, _) = verify_pdfs_to_file(&config, None).unwrap();
    let broken = &report.pdfs["broken"];
    assert!(broken.error.is_some());
    assert_eq!(broken.total_pages, 0);
    assert!(broken.models.is_empty());
}

//! Result records and run reports.
//!
//! Every (document or page, model) pair produces one [`Measurement`]. The
//! records are grouped into a [`DocumentRunReport`] (raster documents) or a
//! [`PdfRunReport`] (multi-page PDFs), which the report writer prints and
//! serialises to JSON.

use crate::adapter::{ModelFamily, PreprocessOutput};
use crate::error::ItemError;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use token_budget::{Status, Verification, VerifierPolicy};

/// One classified (image, model) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub width: u32,
    pub height: u32,
    pub expected_tokens: u64,
    pub actual_tokens: Option<u64>,
    pub grid: Option<String>,
    pub padding: Option<String>,
    pub preprocessed_size: Option<String>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Measurement {
    /// Classify an adapter's output for a `width × height` image.
    pub fn from_output(
        width: u32,
        height: u32,
        patch_size: u32,
        policy: &VerifierPolicy,
        output: &PreprocessOutput,
    ) -> Self {
        let actual = output.actual_tokens(patch_size);
        let v = Verification::with_policy(policy, width, height, patch_size, actual);
        Self {
            width,
            height,
            expected_tokens: v.expected_tokens,
            actual_tokens: v.actual_tokens,
            grid: output.grid_label(),
            padding: output.padding_label(width, height, patch_size),
            preprocessed_size: output.preprocessed_size(),
            status: v.status,
            error: None,
        }
    }

    /// ERROR record for a pair that failed before anything was reported.
    pub fn from_error(width: u32, height: u32, patch_size: u32, error: &ItemError) -> Self {
        let v = Verification::errored(width, height, patch_size);
        Self {
            width,
            height,
            expected_tokens: v.expected_tokens,
            actual_tokens: None,
            grid: None,
            padding: None,
            preprocessed_size: None,
            status: Status::Error,
            error: Some(error.short_message()),
        }
    }

}

// ── Raster documents ─────────────────────────────────────────────────────

/// Result for one raster document under one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResult {
    pub id: String,
    pub desc: String,
    /// Catalog dimensions, `"WxH"`.
    pub dimensions: String,
    #[serde(flatten)]
    pub measurement: Measurement,
}

/// Everything `verify-docs` produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRunReport {
    pub timestamp: DateTime<Local>,
    pub test_type: String,
    pub patch_size: u32,
    /// Keyed by model key (`glm`, `qwen`, `fixed`).
    pub results: BTreeMap<String, Vec<DocumentResult>>,
}

impl DocumentRunReport {
    pub const TEST_TYPE: &'static str = "realistic_documents";

    pub fn new(patch_size: u32) -> Self {
        Self {
            timestamp: Local::now(),
            test_type: Self::TEST_TYPE.to_string(),
            patch_size,
            results: BTreeMap::new(),
        }
    }

    pub fn summary(&self, family: ModelFamily) -> Option<ModelSummary> {
        self.results
            .get(family.key())
            .map(|rs| ModelSummary::from_statuses(rs.iter().map(|r| r.measurement.status)))
    }
}

// ── PDFs ─────────────────────────────────────────────────────────────────

/// Result for one PDF page under one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    /// 1-based page number.
    pub page: usize,
    #[serde(flatten)]
    pub measurement: Measurement,
}

/// Everything verified for one PDF.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PdfReport {
    pub total_pages: usize,
    /// Number of pages verified.
    pub sampled_pages: usize,
    /// 1-based numbers of the verified pages.
    pub page_numbers: Vec<usize>,
    /// Distinct rendered sizes, `"WxH"`, sorted.
    pub page_dimensions: Vec<String>,
    /// Page results keyed by model key.
    #[serde(flatten)]
    pub models: BTreeMap<String, Vec<PageResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything `verify-pdfs` produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfRunReport {
    pub timestamp: DateTime<Local>,
    pub test_type: String,
    pub dpi: u32,
    pub max_pages_per_pdf: Option<usize>,
    pub patch_size: u32,
    pub pdfs: BTreeMap<String, PdfReport>,
}

impl PdfRunReport {
    pub const TEST_TYPE: &'static str = "multi_page_pdf";

    pub fn new(dpi: u32, max_pages_per_pdf: Option<usize>, patch_size: u32) -> Self {
        Self {
            timestamp: Local::now(),
            test_type: Self::TEST_TYPE.to_string(),
            dpi,
            max_pages_per_pdf,
            patch_size,
            pdfs: BTreeMap::new(),
        }
    }

    /// Totals for `family` across every PDF.
    pub fn summary(&self, family: ModelFamily) -> ModelSummary {
        ModelSummary::from_statuses(
            self.pdfs
                .values()
                .filter_map(|p| p.models.get(family.key()))
                .flatten()
                .map(|r| r.measurement.status),
        )
    }
}

// ── Summaries ────────────────────────────────────────────────────────────

/// Status counts for one model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub check: usize,
    pub error: usize,
    pub not_applicable: usize,
}

impl ModelSummary {
    pub fn from_statuses(statuses: impl IntoIterator<Item = Status>) -> Self {
        let mut s = Self::default();
        for status in statuses {
            s.total += 1;
            match status {
                Status::Pass => s.pass += 1,
                Status::Fail => s.fail += 1,
                Status::Check => s.check += 1,
                Status::Error => s.error += 1,
                Status::NotApplicable => s.not_applicable += 1,
            }
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::TokenGrid;

    fn render_error(page: usize) -> ItemError {
        ItemError::RenderFailed {
            page,
            detail: "boom".into(),
        }
    }

    fn qwen_receipt() -> PreprocessOutput {
        PreprocessOutput {
            resized_width: 112,
            resized_height: 2800,
            grid: TokenGrid::Present {
                height_patches: 200,
                width_patches: 8,
            },
            pixel_shape: None,
        }
    }

    #[test]
    fn measurement_from_grid() {
        let policy = VerifierPolicy::default();
        let m = Measurement::from_output(100, 2800, 14, &policy, &qwen_receipt());
        assert_eq!(m.expected_tokens, 1400);
        assert_eq!(m.actual_tokens, Some(1600));
        assert_eq!(m.status, Status::Pass);
        assert_eq!(m.padding.as_deref(), Some("+12w,+0h"));
        assert_eq!(m.error, None);
    }

    #[test]
    fn error_measurement_is_truncated() {
        let e = ItemError::Preprocess {
            model: "glm".into(),
            detail: "y".repeat(300),
        };
        let m = Measurement::from_error(10, 10, 14, &e);
        assert_eq!(m.status, Status::Error);
        assert_eq!(m.error.unwrap().chars().count(), 80);
    }

    #[test]
    fn document_result_serialises_flat() {
        let policy = VerifierPolicy::default();
        let m = Measurement::from_output(100, 2800, 14, &policy, &qwen_receipt());
        let r = DocumentResult {
            id: "01_long_receipt".into(),
            desc: "Supermarket receipt".into(),
            dimensions: "100x2800".into(),
            measurement: m,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["expected_tokens"], 1400);
        assert_eq!(json["status"], "PASS");
        assert_eq!(json["grid"], "200x8");
        assert!(json.get("error").is_none());
        assert!(json.get("measurement").is_none());
    }

    #[test]
    fn pdf_report_flattens_models() {
        let mut report = PdfReport {
            total_pages: 15,
            sampled_pages: 1,
            page_numbers: vec![1],
            page_dimensions: vec!["1240x1754".into()],
            ..PdfReport::default()
        };
        report.models.insert(
            "qwen".into(),
            vec![PageResult {
                page: 1,
                measurement: Measurement::from_error(1240, 1754, 14, &render_error(1)),
            }],
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["qwen"][0]["page"], 1);
        assert_eq!(json["qwen"][0]["status"], "ERROR");
        assert_eq!(json["total_pages"], 15);
    }

    #[test]
    fn summaries_count_statuses() {
        let s = ModelSummary::from_statuses([
            Status::Pass,
            Status::Pass,
            Status::Fail,
            Status::Check,
        ]);
        assert_eq!((s.total, s.pass, s.fail, s.check), (4, 2, 1, 1));

        let mut run = PdfRunReport::new(150, Some(5), 14);
        let mut a = PdfReport::default();
        a.models.insert(
            "glm".into(),
            vec![PageResult {
                page: 1,
                measurement: Measurement::from_error(100, 100, 14, &render_error(1)),
            }],
        );
        run.pdfs.insert("a".into(), a);
        let glm = run.summary(ModelFamily::Glm);
        assert_eq!((glm.total, glm.error), (1, 1));
        assert_eq!(run.summary(ModelFamily::Qwen).total, 0);
    }
}

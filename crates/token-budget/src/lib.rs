//! # token-budget
//!
//! Expected visual-token budgets for vision encoders, and the rule that
//! classifies a preprocessor's reported budget against them.
//!
//! A NaViT-style encoder allocates one token position per `patch × patch`
//! square of the *native* image, so the budget it should spend is
//!
//! ```text
//! expected = floor(width / patch) * floor(height / patch)
//! ```
//!
//! Legacy encoders resize every input to one canvas instead, which shows up
//! as one of a handful of fixed token counts ([`FIXED_BUCKETS`]).
//! [`classify`] turns `(expected, actual)` into a [`Status`]:
//!
//! | Status | Condition (evaluated in this order) |
//! |--------|-------------------------------------|
//! | `N/A`  | the preprocessor reported no grid |
//! | `FAIL` | `actual` is a fixed bucket and `expected` is not |
//! | `PASS` | relative deviation `< 0.5` |
//! | `PASS` | `expected < 100` and `actual` is not a bucket (tiny image upscaled) |
//! | `CHECK`| anything else |
//!
//! `ERROR` is never produced here. Callers assign it when the preprocessor
//! itself failed.
//!
//! ```rust
//! use token_budget::{classify, expected_tokens, Status};
//!
//! assert_eq!(expected_tokens(595, 842, 14), 2520);
//! assert_eq!(classify(595, 842, 14, Some(2550)), Status::Pass);
//! assert_eq!(classify(2800, 100, 14, Some(576)), Status::Fail);
//! assert_eq!(classify(512, 512, 14, None), Status::NotApplicable);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// ── Constants ────────────────────────────────────────────────────────────────

/// Patch side length used by the GLM-OCR and Qwen2.5-VL vision towers.
pub const DEFAULT_PATCH_SIZE: u32 = 14;

/// Token counts produced by fixed-resolution encoders (16², 24², 32² grids).
pub const FIXED_BUCKETS: [u64; 3] = [256, 576, 1024];

/// Relative deviation below which a reported budget counts as native.
pub const RELATIVE_TOLERANCE: f64 = 0.5;

/// Expected budgets below this are "tiny": any model has to upscale them.
pub const TINY_IMAGE_TOKENS: u64 = 100;

// ── Status ───────────────────────────────────────────────────────────────────

/// Outcome of verifying one (image, model) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Budget matches native resolution (or a tiny image was upscaled).
    #[serde(rename = "PASS")]
    Pass,
    /// Model fell back to a fixed canvas.
    #[serde(rename = "FAIL")]
    Fail,
    /// Outside tolerance but not bucket-shaped; needs a human look.
    #[serde(rename = "CHECK")]
    Check,
    /// The preprocessor raised before reporting anything.
    #[serde(rename = "ERROR")]
    Error,
    /// The preprocessor reported no token grid.
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Status {
    /// Label used in reports and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
            Status::Check => "CHECK",
            Status::Error => "ERROR",
            Status::NotApplicable => "N/A",
        }
    }

    /// Single-glyph marker for terminal tables.
    pub fn icon(&self) -> &'static str {
        match self {
            Status::Pass => "✅",
            Status::Fail => "❌",
            Status::Check => "⚠️",
            Status::Error => "💥",
            Status::NotApplicable => "❓",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Expectation ──────────────────────────────────────────────────────────────

/// Token budget of a native-resolution encoder for a `width × height` image.
///
/// A `patch_size` of zero is treated as one.
pub fn expected_tokens(width: u32, height: u32, patch_size: u32) -> u64 {
    let patch = patch_size.max(1);
    u64::from(width / patch) * u64::from(height / patch)
}

/// Classify a reported budget for a `width × height` image with the default
/// [`VerifierPolicy`].
pub fn classify(width: u32, height: u32, patch_size: u32, actual_tokens: Option<u64>) -> Status {
    VerifierPolicy::default().classify(width, height, patch_size, actual_tokens)
}

/// Classify a reported budget against a precomputed expectation with the
/// default [`VerifierPolicy`].
pub fn classify_expected(expected: u64, actual_tokens: Option<u64>) -> Status {
    VerifierPolicy::default().classify_expected(expected, actual_tokens)
}

// ── Policy ───────────────────────────────────────────────────────────────────

/// Thresholds of the classification rule.
///
/// [`Default`] yields the published protocol: buckets 256/576/1024, 50 %
/// tolerance, tiny-image threshold 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifierPolicy {
    pub fixed_buckets: Vec<u64>,
    pub relative_tolerance: f64,
    pub tiny_image_tokens: u64,
}

impl Default for VerifierPolicy {
    fn default() -> Self {
        Self {
            fixed_buckets: FIXED_BUCKETS.to_vec(),
            relative_tolerance: RELATIVE_TOLERANCE,
            tiny_image_tokens: TINY_IMAGE_TOKENS,
        }
    }
}

impl VerifierPolicy {
    fn is_bucket(&self, tokens: u64) -> bool {
        self.fixed_buckets.contains(&tokens)
    }

    /// Classify `actual_tokens` for a `width × height` image.
    pub fn classify(
        &self,
        width: u32,
        height: u32,
        patch_size: u32,
        actual_tokens: Option<u64>,
    ) -> Status {
        self.classify_expected(expected_tokens(width, height, patch_size), actual_tokens)
    }

    /// Classify `actual_tokens` against `expected`.
    ///
    /// The bucket check runs before the tolerance check, so a small image
    /// whose reported budget lands on a bucket is FAIL, not exempted.
    pub fn classify_expected(&self, expected: u64, actual_tokens: Option<u64>) -> Status {
        let Some(actual) = actual_tokens else {
            return Status::NotApplicable;
        };

        if self.is_bucket(actual) && !self.is_bucket(expected) {
            return Status::Fail;
        }

        let deviation = actual.abs_diff(expected) as f64 / expected.max(1) as f64;
        if deviation < self.relative_tolerance {
            return Status::Pass;
        }

        if expected < self.tiny_image_tokens && !self.is_bucket(actual) {
            return Status::Pass;
        }

        Status::Check
    }
}

// ── Verification record ──────────────────────────────────────────────────────

/// One classified measurement. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub width: u32,
    pub height: u32,
    pub expected_tokens: u64,
    pub actual_tokens: Option<u64>,
    pub status: Status,
}

impl Verification {
    /// Measure and classify with the default policy.
    pub fn new(width: u32, height: u32, patch_size: u32, actual_tokens: Option<u64>) -> Self {
        Self::with_policy(&VerifierPolicy::default(), width, height, patch_size, actual_tokens)
    }

    /// Measure and classify with an explicit policy.
    pub fn with_policy(
        policy: &VerifierPolicy,
        width: u32,
        height: u32,
        patch_size: u32,
        actual_tokens: Option<u64>,
    ) -> Self {
        let expected_tokens = expected_tokens(width, height, patch_size);
        Self {
            width,
            height,
            expected_tokens,
            actual_tokens,
            status: policy.classify_expected(expected_tokens, actual_tokens),
        }
    }

    /// Record for a pair whose preprocessor failed before reporting.
    pub fn errored(width: u32, height: u32, patch_size: u32) -> Self {
        Self {
            width,
            height,
            expected_tokens: expected_tokens(width, height, patch_size),
            actual_tokens: None,
            status: Status::Error,
        }
    }

    /// Relative deviation of the reported budget, if one was reported.
    pub fn deviation(&self) -> Option<f64> {
        self.actual_tokens
            .map(|a| a.abs_diff(self.expected_tokens) as f64 / self.expected_tokens.max(1) as f64)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_is_floor_product() {
        assert_eq!(expected_tokens(100, 2800, 14), 7 * 200);
        assert_eq!(expected_tokens(2800, 100, 14), 200 * 7);
        assert_eq!(expected_tokens(595, 842, 14), 42 * 60);
        assert_eq!(expected_tokens(64, 64, 14), 16);
        assert_eq!(expected_tokens(13, 5000, 14), 0);
    }

    #[test]
    fn expected_is_monotone_in_both_sides() {
        for patch in [1, 7, 14, 16, 28] {
            for h in (1..300).step_by(13) {
                let mut prev = 0;
                for w in 1..300 {
                    let e = expected_tokens(w, h, patch);
                    assert!(e >= prev, "w={w} h={h} p={patch}");
                    assert_eq!(e, expected_tokens(h, w, patch), "symmetric");
                    prev = e;
                }
            }
        }
    }

    #[test]
    fn zero_patch_is_treated_as_one() {
        assert_eq!(expected_tokens(3, 4, 0), 12);
    }

    #[test]
    fn tall_receipt_outside_tolerance_is_check() {
        assert_eq!(classify(100, 2800, 14, Some(14 * 200)), Status::Check);
    }

    #[test]
    fn bucket_for_non_bucket_expectation_is_fail() {
        assert_eq!(classify(2800, 100, 14, Some(576)), Status::Fail);
    }

    #[test]
    fn bucket_rule_fires_before_tiny_exemption() {
        // expected = 16 (< 100) but 256 is a bucket, so the exemption never applies
        assert_eq!(classify(64, 64, 14, Some(256)), Status::Fail);
        // the same deviation without a bucket value is exempted
        assert_eq!(classify(64, 64, 14, Some(36)), Status::Pass);
    }

    #[test]
    fn a4_page_within_tolerance_passes() {
        assert_eq!(classify(595, 842, 14, Some(2550)), Status::Pass);
    }

    #[test]
    fn missing_grid_is_not_applicable() {
        assert_eq!(classify(512, 512, 14, None), Status::NotApplicable);
    }

    #[test]
    fn bucket_matching_bucket_expectation_goes_through_tolerance() {
        // 448 x 448 / 14 -> 32 x 32 = 1024 expected
        assert_eq!(expected_tokens(448, 448, 14), 1024);
        assert_eq!(classify(448, 448, 14, Some(1024)), Status::Pass);
        assert_eq!(classify(448, 448, 14, Some(256)), Status::Check);
    }

    #[test]
    fn tolerance_boundary_is_exclusive() {
        assert_eq!(classify_expected(1000, Some(1499)), Status::Pass);
        assert_eq!(classify_expected(1000, Some(1500)), Status::Check);
        assert_eq!(classify_expected(1000, Some(501)), Status::Pass);
        assert_eq!(classify_expected(1000, Some(500)), Status::Check);
    }

    #[test]
    fn zero_expectation_divides_by_one() {
        assert_eq!(classify_expected(0, Some(0)), Status::Pass);
        assert_eq!(classify_expected(0, Some(40)), Status::Pass); // tiny exemption
        assert_eq!(classify_expected(0, Some(576)), Status::Fail);
    }

    #[test]
    fn classification_is_idempotent() {
        let cases = [
            (100, 2800, Some(2800)),
            (2800, 100, Some(576)),
            (64, 64, Some(256)),
            (595, 842, Some(2550)),
            (512, 512, None),
        ];
        for (w, h, actual) in cases {
            assert_eq!(classify(w, h, 14, actual), classify(w, h, 14, actual));
        }
    }

    #[test]
    fn custom_policy_changes_thresholds() {
        let strict = VerifierPolicy {
            relative_tolerance: 0.05,
            ..VerifierPolicy::default()
        };
        assert_eq!(strict.classify(595, 842, 14, Some(2550)), Status::Pass);
        assert_eq!(strict.classify(595, 842, 14, Some(2800)), Status::Check);

        let no_buckets = VerifierPolicy {
            fixed_buckets: vec![],
            ..VerifierPolicy::default()
        };
        assert_eq!(no_buckets.classify(64, 64, 14, Some(256)), Status::Pass);
    }

    #[test]
    fn verification_record_carries_expectation() {
        let v = Verification::new(987, 610, 14, Some(3080));
        assert_eq!(v.expected_tokens, 70 * 43);
        assert_eq!(v.status, Status::Pass);
        assert!(v.deviation().unwrap() < 0.05);

        let e = Verification::errored(987, 610, 14);
        assert_eq!(e.status, Status::Error);
        assert_eq!(e.actual_tokens, None);
        assert_eq!(e.deviation(), None);
    }

    #[test]
    fn status_serialises_with_report_labels() {
        let json = serde_json::to_string(&[Status::Pass, Status::NotApplicable]).unwrap();
        assert_eq!(json, r#"["PASS","N/A"]"#);
        let back: Status = serde_json::from_str(r#""CHECK""#).unwrap();
        assert_eq!(back, Status::Check);
        assert_eq!(Status::Error.to_string(), "ERROR");
    }
}

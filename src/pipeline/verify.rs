//! Measurement stage: run an image through each model adapter and classify.

use crate::adapter::{load_preprocessor, ModelFamily, VisionPreprocessor};
use crate::config::ProbeConfig;
use crate::error::ItemError;
use crate::output::Measurement;
use image::DynamicImage;
use std::path::Path;
use token_budget::VerifierPolicy;
use tracing::{info, warn};

/// A model adapter, or the reason it could not be built.
pub struct ModelSlot {
    pub family: ModelFamily,
    pub processor: Result<Box<dyn VisionPreprocessor>, ItemError>,
}

impl ModelSlot {
    /// Measure `image` with this model. A missing processor yields ERROR.
    pub fn measure(
        &self,
        image: &DynamicImage,
        patch_size: u32,
        policy: &VerifierPolicy,
    ) -> Measurement {
        let (w, h) = (image.width(), image.height());
        match &self.processor {
            Ok(p) => measure(image, p.as_ref(), patch_size, policy),
            Err(e) => Measurement::from_error(w, h, patch_size, e),
        }
    }
}

/// Build one slot per selected family.
///
/// A processor that fails to load is kept as an error so every item of that
/// model is reported as ERROR while the other models still run.
pub fn load_models(config: &ProbeConfig) -> Vec<ModelSlot> {
    config
        .models
        .families()
        .into_iter()
        .map(|family| {
            let override_path: Option<&Path> = match family {
                ModelFamily::Glm => config.glm_preprocessor.as_deref(),
                ModelFamily::Qwen => config.qwen_preprocessor.as_deref(),
                ModelFamily::FixedCanvas => None,
            };
            let processor = load_preprocessor(family, override_path).map_err(|e| {
                warn!("{} processor unavailable: {}", family.label(), e);
                ItemError::ProcessorUnavailable {
                    model: family.key().to_string(),
                    detail: e.to_string(),
                }
            });
            if let Ok(p) = &processor {
                info!("{} processor: {}", family.label(), attribute_summary(p.as_ref()));
            }
            ModelSlot { family, processor }
        })
        .collect()
}

/// Measure `image` with every model.
pub fn measure_all(
    models: &[ModelSlot],
    image: &DynamicImage,
    patch_size: u32,
    policy: &VerifierPolicy,
) -> Vec<(ModelFamily, Measurement)> {
    models
        .iter()
        .map(|slot| (slot.family, slot.measure(image, patch_size, policy)))
        .collect()
}

/// One ERROR record per model for an item that never reached the adapters.
pub fn error_all(
    models: &[ModelSlot],
    width: u32,
    height: u32,
    patch_size: u32,
    error: &ItemError,
) -> Vec<(ModelFamily, Measurement)> {
    models
        .iter()
        .map(|slot| (slot.family, Measurement::from_error(width, height, patch_size, error)))
        .collect()
}

/// `"min_pixels=3136, max_pixels=12845056, ..."` for the load log.
pub fn attribute_summary(processor: &dyn VisionPreprocessor) -> String {
    processor
        .attributes()
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Classify what `processor` reports for `image`.
pub fn measure(
    image: &DynamicImage,
    processor: &dyn VisionPreprocessor,
    patch_size: u32,
    policy: &VerifierPolicy,
) -> Measurement {
    let (w, h) = (image.width(), image.height());
    match processor.preprocess(image) {
        Ok(output) => Measurement::from_output(w, h, patch_size, policy, &output),
        Err(e) => Measurement::from_error(
            w,
            h,
            patch_size,
            &ItemError::Preprocess {
                model: processor.family().key().to_string(),
                detail: e.to_string(),
            },
        ),
    }
}

/// `"glm PASS, qwen CHECK"` for progress output.
pub fn outcome_line<'a>(
    results: impl IntoIterator<Item = (ModelFamily, &'a Measurement)>,
) -> String {
    results
        .into_iter()
        .map(|(f, m)| format!("{} {}", f.key(), m.status))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{FixedCanvasAdapter, QwenVlAdapter};
    use crate::config::ModelSelection;
    use image::RgbImage;
    use token_budget::Status;

    fn blank(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::new(w, h))
    }

    fn policy() -> VerifierPolicy {
        VerifierPolicy::default()
    }

    #[test]
    fn qwen_receipt_passes() {
        let m = measure(&blank(100, 2800), &QwenVlAdapter::default(), 14, &policy());
        assert_eq!(m.status, Status::Pass);
        assert_eq!(m.actual_tokens, Some(1600));
    }

    #[test]
    fn fixed_canvas_fails() {
        let m = measure(&blank(595, 842), &FixedCanvasAdapter::default(), 14, &policy());
        assert_eq!(m.status, Status::Fail);
        assert_eq!(m.preprocessed_size.as_deref(), Some("336x336"));
    }

    #[test]
    fn adapter_error_becomes_error_record() {
        let m = measure(&blank(6000, 20), &QwenVlAdapter::default(), 14, &policy());
        assert_eq!(m.status, Status::Error);
        assert_eq!(m.actual_tokens, None);
        assert!(m.error.unwrap().starts_with("absolute aspect ratio"));
    }

    #[test]
    fn overflowing_override_is_recorded_not_raised() {
        let adapter = QwenVlAdapter {
            patch_size: 70_000,
            merge_size: 70_000,
            ..QwenVlAdapter::default()
        };
        let m = measure(&blank(512, 512), &adapter, 14, &VerifierPolicy::default());
        assert_eq!(m.status, Status::Error);
        assert_eq!(m.expected_tokens, 1296);
        assert!(m.error.unwrap().contains("overflows"));
    }

    #[test]
    fn broken_override_turns_every_item_into_error() {
        let config = ProbeConfig::builder()
            .models(ModelSelection::Both)
            .glm_preprocessor("/nonexistent/preprocessor_config.json")
            .build()
            .unwrap();
        let slots = load_models(&config);
        assert_eq!(slots.len(), 2);

        let img = blank(512, 512);
        let glm = slots[0].measure(&img, 14, &config.policy);
        let qwen = slots[1].measure(&img, 14, &config.policy);
        assert_eq!(glm.status, Status::Error);
        assert!(glm.error.unwrap().contains("processor unavailable"));
        assert_eq!(qwen.status, Status::Pass);
    }

    #[test]
    fn attribute_summary_lists_processor_settings() {
        let summary = attribute_summary(&QwenVlAdapter::default());
        assert!(summary.starts_with("min_pixels=3136, max_pixels=12845056"), "{summary}");
        assert!(summary.ends_with("temporal_patch_size=2"), "{summary}");
        assert_eq!(
            attribute_summary(&FixedCanvasAdapter::default()),
            "crop_size={height: 336, width: 336}"
        );
    }

    #[test]
    fn outcome_line_lists_models() {
        let img = blank(512, 512);
        let q = measure(&img, &QwenVlAdapter::default(), 14, &VerifierPolicy::default());
        let f = measure(&img, &FixedCanvasAdapter::default(), 14, &VerifierPolicy::default());
        assert_eq!(
            outcome_line([(ModelFamily::Qwen, &q), (ModelFamily::FixedCanvas, &f)]),
            "qwen PASS, fixed FAIL"
        );
    }
}

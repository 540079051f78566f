use super::resize::merge_factor;
use super::{
    smart_resize, ModelFamily, PreprocessError, PreprocessOutput, PreprocessorConfig,
    ResizeBounds, TokenGrid, VisionPreprocessor,
};
use image::DynamicImage;

/// GLM-OCR (Glm4v-style image processor).
///
/// The area check counts `temporal_patch_size` frames, and the pixel bounds
/// come from `size.shortest_edge` / `size.longest_edge`.
#[derive(Debug, Clone, PartialEq)]
pub struct GlmOcrAdapter {
    pub patch_size: u32,
    pub merge_size: u32,
    pub temporal_patch_size: u32,
    pub shortest_edge: u64,
    pub longest_edge: u64,
}

impl Default for GlmOcrAdapter {
    fn default() -> Self {
        Self {
            patch_size: 14,
            merge_size: 2,
            temporal_patch_size: 2,
            shortest_edge: 12_544,
            longest_edge: 9_633_792,
        }
    }
}

impl GlmOcrAdapter {
    pub fn from_config(cfg: &PreprocessorConfig) -> Self {
        let d = Self::default();
        Self {
            patch_size: cfg.patch_size.unwrap_or(d.patch_size),
            merge_size: cfg.merge_size.unwrap_or(d.merge_size),
            temporal_patch_size: cfg.temporal_patch_size.unwrap_or(d.temporal_patch_size),
            shortest_edge: cfg.min_pixels().unwrap_or(d.shortest_edge),
            longest_edge: cfg.max_pixels().unwrap_or(d.longest_edge),
        }
    }

    fn bounds(&self) -> Result<ResizeBounds, PreprocessError> {
        Ok(ResizeBounds {
            factor: merge_factor(self.patch_size, self.merge_size)?,
            min_pixels: self.shortest_edge,
            max_pixels: self.longest_edge,
            frames: self.temporal_patch_size,
        })
    }
}

impl VisionPreprocessor for GlmOcrAdapter {
    fn family(&self) -> ModelFamily {
        ModelFamily::Glm
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "size",
                format!(
                    "{{shortest_edge: {}, longest_edge: {}}}",
                    self.shortest_edge, self.longest_edge
                ),
            ),
            ("patch_size", self.patch_size.to_string()),
            ("merge_size", self.merge_size.to_string()),
            ("temporal_patch_size", self.temporal_patch_size.to_string()),
        ]
    }

    fn preprocess(&self, image: &DynamicImage) -> Result<PreprocessOutput, PreprocessError> {
        let (h, w) = smart_resize(image.height(), image.width(), &self.bounds()?)?;
        Ok(PreprocessOutput {
            resized_width: w,
            resized_height: h,
            grid: TokenGrid::Present {
                height_patches: h / self.patch_size,
                width_patches: w / self.patch_size,
            },
            pixel_shape: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn blank(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::new(w, h))
    }

    #[test]
    fn four_k_report_is_scaled_into_budget() {
        let out = GlmOcrAdapter::default().preprocess(&blank(3840, 2160)).unwrap();
        assert_eq!(out.grid_label().as_deref(), Some("116x208"));
        assert_eq!(out.actual_tokens(14), Some(24_128));
    }

    #[test]
    fn tiny_stamp_is_upscaled() {
        let out = GlmOcrAdapter::default().preprocess(&blank(64, 64)).unwrap();
        assert_eq!(out.actual_tokens(14), Some(36));
        assert_eq!(out.resized_width, 84);
    }

    #[test]
    fn a4_page_keeps_native_grid() {
        let out = GlmOcrAdapter::default().preprocess(&blank(595, 842)).unwrap();
        assert_eq!(out.grid_label().as_deref(), Some("60x42"));
    }

    #[test]
    fn override_changes_bounds() {
        let cfg = PreprocessorConfig::from_json(
            r#"{"size": {"shortest_edge": 100, "longest_edge": 400000}}"#,
        )
        .unwrap();
        let adapter = GlmOcrAdapter::from_config(&cfg);
        assert_eq!(adapter.longest_edge, 400_000);
        assert_eq!(adapter.patch_size, 14);
        let out = adapter.preprocess(&blank(595, 842)).unwrap();
        let tokens = out.actual_tokens(14).unwrap();
        assert!(tokens < 2520, "got {tokens}");
    }

    #[test]
    fn attributes_list_bounds() {
        let attrs = GlmOcrAdapter::default().attributes();
        let size = attrs.iter().find(|(k, _)| *k == "size").unwrap();
        assert!(size.1.contains("9633792"));
    }

    #[test]
    fn oversized_override_is_a_config_error() {
        let adapter = GlmOcrAdapter {
            patch_size: u32::MAX,
            merge_size: 2,
            ..GlmOcrAdapter::default()
        };
        let err = adapter.preprocess(&blank(512, 512)).unwrap_err();
        assert!(matches!(err, PreprocessError::InvalidConfig(_)), "{err}");
    }
}

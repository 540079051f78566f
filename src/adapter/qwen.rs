use super::resize::merge_factor;
use super::{
    smart_resize, ModelFamily, PreprocessError, PreprocessOutput, PreprocessorConfig,
    ResizeBounds, TokenGrid, VisionPreprocessor,
};
use image::DynamicImage;

/// Qwen2.5-VL (Qwen2-VL image processor).
#[derive(Debug, Clone, PartialEq)]
pub struct QwenVlAdapter {
    pub patch_size: u32,
    pub merge_size: u32,
    pub temporal_patch_size: u32,
    pub min_pixels: u64,
    pub max_pixels: u64,
}

impl Default for QwenVlAdapter {
    fn default() -> Self {
        Self {
            patch_size: 14,
            merge_size: 2,
            temporal_patch_size: 2,
            min_pixels: 3_136,
            max_pixels: 12_845_056,
        }
    }
}

impl QwenVlAdapter {
    pub fn from_config(cfg: &PreprocessorConfig) -> Self {
        let d = Self::default();
        Self {
            patch_size: cfg.patch_size.unwrap_or(d.patch_size),
            merge_size: cfg.merge_size.unwrap_or(d.merge_size),
            temporal_patch_size: cfg.temporal_patch_size.unwrap_or(d.temporal_patch_size),
            min_pixels: cfg.min_pixels().unwrap_or(d.min_pixels),
            max_pixels: cfg.max_pixels().unwrap_or(d.max_pixels),
        }
    }
}

impl VisionPreprocessor for QwenVlAdapter {
    fn family(&self) -> ModelFamily {
        ModelFamily::Qwen
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("min_pixels", self.min_pixels.to_string()),
            ("max_pixels", self.max_pixels.to_string()),
            ("patch_size", self.patch_size.to_string()),
            ("merge_size", self.merge_size.to_string()),
            ("temporal_patch_size", self.temporal_patch_size.to_string()),
        ]
    }

    fn preprocess(&self, image: &DynamicImage) -> Result<PreprocessOutput, PreprocessError> {
        let bounds = ResizeBounds {
            factor: merge_factor(self.patch_size, self.merge_size)?,
            min_pixels: self.min_pixels,
            max_pixels: self.max_pixels,
            frames: 1,
        };
        let (h, w) = smart_resize(image.height(), image.width(), &bounds)?;
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

use super::{
    ModelFamily, PreprocessError, PreprocessOutput, PreprocessorConfig, TokenGrid,
    VisionPreprocessor,
};
use image::DynamicImage;

/// Legacy fixed-canvas encoder (CLIP-style). Every image is resized to one
/// canvas and only the pixel tensor is reported, so its token count comes
/// from the tensor shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedCanvasAdapter {
    pub width: u32,
    pub height: u32,
}

impl Default for FixedCanvasAdapter {
    fn default() -> Self {
        Self {
            width: 336,
            height: 336,
        }
    }
}

impl FixedCanvasAdapter {
    pub fn from_config(cfg: &PreprocessorConfig) -> Self {
        let d = Self::default();
        let (width, height) = cfg.canvas().unwrap_or((d.width, d.height));
        Self { width, height }
    }
}

impl VisionPreprocessor for FixedCanvasAdapter {
    fn family(&self) -> ModelFamily {
        ModelFamily::FixedCanvas
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![(
            "crop_size",
            format!("{{height: {}, width: {}}}", self.height, self.width),
        )]
    }

    fn preprocess(&self, image: &DynamicImage) -> Result<PreprocessOutput, PreprocessError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(PreprocessError::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(PreprocessError::InvalidConfig("canvas must be non-empty".into()));
        }
        Ok(PreprocessOutput {
            resized_width: self.width,
            resized_height: self.height,
            grid: TokenGrid::Absent,
            pixel_shape: Some([1, 3, self.height as usize, self.width as usize]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;
    use token_budget::{classify, Status};

    #[test]
    fn every_image_lands_on_the_576_bucket() {
        let adapter = FixedCanvasAdapter::default();
        for (w, h) in [(100, 2800), (512, 512), (64, 64), (3840, 2160)] {
            let img = DynamicImage::ImageRgb8(RgbImage::new(w, h));
            let out = adapter.preprocess(&img).unwrap();
            assert_eq!(out.grid, TokenGrid::Absent);
            let actual = out.actual_tokens(14);
            assert_eq!(actual, Some(576));
            assert_eq!(classify(w, h, 14, actual), Status::Fail, "{w}x{h}");
        }
    }

    #[test]
    fn canvas_override() {
        let cfg =
            PreprocessorConfig::from_json(r#"{"crop_size": {"height": 224, "width": 224}}"#)
                .unwrap();
        let adapter = FixedCanvasAdapter::from_config(&cfg);
        let img = DynamicImage::ImageRgb8(RgbImage::new(10, 10));
        assert_eq!(adapter.preprocess(&img).unwrap().actual_tokens(14), Some(256));
    }

    #[test]
    fn attributes_describe_only_the_canvas() {
        let cfg =
            PreprocessorConfig::from_json(r#"{"size": {"shortest_edge": 448}, "patch_size": 32}"#)
                .unwrap();
        let attrs = FixedCanvasAdapter::from_config(&cfg).attributes();
        assert_eq!(attrs, vec![("crop_size", "{height: 448, width: 448}".to_string())]);
    }
}

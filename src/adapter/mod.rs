//! Model adapters: native emulation of each model's image preprocessor.
//!
//! An adapter answers one question: given a native image, what token grid
//! would this model's processor hand to its vision tower? The verifier then
//! compares that grid against the native budget.
//!
//! ```text
//!  DynamicImage ──► VisionPreprocessor::preprocess ──► PreprocessOutput
//!                                                        │
//!                          actual_tokens(patch) ◄────────┘
//!                          (grid, else 4-D tensor shape, else None)
//! ```

mod config;
mod fixed;
mod glm;
mod qwen;
mod resize;

pub use config::{PreprocessorConfig, PreprocessorSize};
pub use fixed::FixedCanvasAdapter;
pub use glm::GlmOcrAdapter;
pub use qwen::QwenVlAdapter;
pub use resize::{smart_resize, ResizeBounds, MAX_ASPECT_RATIO};

use crate::error::ProbeError;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

// ── Model families ───────────────────────────────────────────────────────

/// The model families a run can exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModelFamily {
    #[serde(rename = "glm")]
    Glm,
    #[serde(rename = "qwen")]
    Qwen,
    #[serde(rename = "fixed")]
    FixedCanvas,
}

impl ModelFamily {
    /// Every family, in report order.
    pub const ALL: [ModelFamily; 3] = [
        ModelFamily::Glm,
        ModelFamily::Qwen,
        ModelFamily::FixedCanvas,
    ];

    /// Key used in JSON results and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            ModelFamily::Glm => "glm",
            ModelFamily::Qwen => "qwen",
            ModelFamily::FixedCanvas => "fixed",
        }
    }

    /// Human-readable model name for tables.
    pub fn label(&self) -> &'static str {
        match self {
            ModelFamily::Glm => "GLM-OCR",
            ModelFamily::Qwen => "Qwen2.5-VL",
            ModelFamily::FixedCanvas => "Fixed 336px",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Preprocessor output ──────────────────────────────────────────────────

/// Errors raised by an adapter while planning an image.
///
/// Messages follow the wording of the upstream processors so that ERROR
/// records read the same.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreprocessError {
    #[error("image has zero area ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("absolute aspect ratio must be smaller than {limit}, got {ratio}")]
    AspectRatio { ratio: f64, limit: f64 },

    #[error("invalid preprocessor setting: {0}")]
    InvalidConfig(String),
}

/// Token grid reported by a preprocessor, before spatial merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TokenGrid {
    Present {
        height_patches: u32,
        width_patches: u32,
    },
    /// The processor produced pixels only.
    Absent,
}

/// What an adapter reports for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessOutput {
    pub resized_width: u32,
    pub resized_height: u32,
    pub grid: TokenGrid,
    /// `(n, c, h, w)` of the pixel tensor, when the processor exposes one.
    pub pixel_shape: Option<[usize; 4]>,
}

impl PreprocessOutput {
    /// Tokens the model would spend on this image, if that can be told.
    ///
    /// A reported grid wins. Without one, a 4-D pixel tensor is divided into
    /// `patch`-sized squares.
    pub fn actual_tokens(&self, patch: u32) -> Option<u64> {
        match self.grid {
            TokenGrid::Present {
                height_patches,
                width_patches,
                ..
            } => Some(u64::from(height_patches) * u64::from(width_patches)),
            TokenGrid::Absent => self.pixel_shape.map(|[_, _, h, w]| {
                let patch = patch.max(1) as usize;
                ((w / patch) * (h / patch)) as u64
            }),
        }
    }

    /// `"{h}x{w}"` patch grid.
    pub fn grid_label(&self) -> Option<String> {
        match self.grid {
            TokenGrid::Present {
                height_patches,
                width_patches,
                ..
            } => Some(format!("{height_patches}x{width_patches}")),
            TokenGrid::Absent => None,
        }
    }

    /// Signed difference between the grid's pixel footprint and the native
    /// size, e.g. `+12w,-300h`.
    pub fn padding_label(
        &self,
        native_width: u32,
        native_height: u32,
        patch: u32,
    ) -> Option<String> {
        match self.grid {
            TokenGrid::Present {
                height_patches,
                width_patches,
                ..
            } => {
                let dw = i64::from(width_patches) * i64::from(patch) - i64::from(native_width);
                let dh = i64::from(height_patches) * i64::from(patch) - i64::from(native_height);
                Some(format!("{dw:+}w,{dh:+}h"))
            }
            TokenGrid::Absent => None,
        }
    }

    /// `"{w}x{h} grid"` for grids, `"{w}x{h}"` for bare tensors.
    pub fn preprocessed_size(&self) -> Option<String> {
        match (self.grid, self.pixel_shape) {
            (
                TokenGrid::Present {
                    height_patches,
                    width_patches,
                    ..
                },
                _,
            ) => Some(format!("{width_patches}x{height_patches} grid")),
            (TokenGrid::Absent, Some([_, _, h, w])) => Some(format!("{w}x{h}")),
            (TokenGrid::Absent, None) => None,
        }
    }
}

// ── Adapter trait ────────────────────────────────────────────────────────

/// A model's image preprocessor, reduced to the part that decides tokens.
pub trait VisionPreprocessor: Send + Sync {
    fn family(&self) -> ModelFamily;

    /// Processor attributes as `(name, value)` pairs, for `inspect`.
    fn attributes(&self) -> Vec<(&'static str, String)>;

    /// Plan the resize and report the resulting grid.
    fn preprocess(&self, image: &DynamicImage) -> Result<PreprocessOutput, PreprocessError>;
}

/// Build the adapter for `family`, applying a `preprocessor_config.json`
/// override when one is given.
pub fn load_preprocessor(
    family: ModelFamily,
    override_path: Option<&Path>,
) -> Result<Box<dyn VisionPreprocessor>, ProbeError> {
    let file = override_path.map(PreprocessorConfig::from_path).transpose()?;

    let adapter: Box<dyn VisionPreprocessor> = match family {
        ModelFamily::Glm => Box::new(match file {
            Some(cfg) => GlmOcrAdapter::from_config(&cfg),
            None => GlmOcrAdapter::default(),
        }),
        ModelFamily::Qwen => Box::new(match file {
            Some(cfg) => QwenVlAdapter::from_config(&cfg),
            None => QwenVlAdapter::default(),
        }),
        ModelFamily::FixedCanvas => Box::new(match file {
            Some(cfg) => FixedCanvasAdapter::from_config(&cfg),
            None => FixedCanvasAdapter::default(),
        }),
    };

    if let Some(path) = override_path {
        tracing::debug!(
            model = family.key(),
            path = %path.display(),
            "Loaded preprocessor override"
        );
    }
    Ok(adapter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(h: u32, w: u32) -> PreprocessOutput {
        PreprocessOutput {
            resized_width: w * 14,
            resized_height: h * 14,
            grid: TokenGrid::Present {
                height_patches: h,
                width_patches: w,
            },
            pixel_shape: None,
        }
    }

    #[test]
    fn grid_counts_tokens_and_formats_labels() {
        let out = grid(200, 8);
        assert_eq!(out.actual_tokens(14), Some(1600));
        assert_eq!(out.grid_label().as_deref(), Some("200x8"));
        assert_eq!(out.preprocessed_size().as_deref(), Some("8x200 grid"));
        assert_eq!(out.padding_label(100, 2800, 14).as_deref(), Some("+12w,+0h"));
    }

    #[test]
    fn padding_can_be_negative() {
        let out = grid(116, 208);
        assert_eq!(
            out.padding_label(3840, 2160, 14).as_deref(),
            Some("-928w,-536h")
        );
    }

    #[test]
    fn tensor_shape_is_the_fallback() {
        let out = PreprocessOutput {
            resized_width: 336,
            resized_height: 336,
            grid: TokenGrid::Absent,
            pixel_shape: Some([1, 3, 336, 336]),
        };
        assert_eq!(out.actual_tokens(14), Some(576));
        assert_eq!(out.grid_label(), None);
        assert_eq!(out.padding_label(64, 64, 14), None);
        assert_eq!(out.preprocessed_size().as_deref(), Some("336x336"));
    }

    #[test]
    fn nothing_reported_means_no_tokens() {
        let out = PreprocessOutput {
            resized_width: 0,
            resized_height: 0,
            grid: TokenGrid::Absent,
            pixel_shape: None,
        };
        assert_eq!(out.actual_tokens(14), None);
        assert_eq!(out.preprocessed_size(), None);
    }

    #[test]
    fn grid_serialises_only_the_patch_counts() {
        let json = serde_json::to_value(grid(60, 42).grid).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "present", "height_patches": 60, "width_patches": 42})
        );
    }

    #[test]
    fn family_keys_and_labels() {
        assert_eq!(ModelFamily::Glm.key(), "glm");
        assert_eq!(ModelFamily::Qwen.label(), "Qwen2.5-VL");
        assert_eq!(ModelFamily::FixedCanvas.to_string(), "Fixed 336px");
    }

    #[test]
    fn load_without_override_uses_defaults() {
        let glm = load_preprocessor(ModelFamily::Glm, None).unwrap();
        assert_eq!(glm.family(), ModelFamily::Glm);
        let missing = load_preprocessor(ModelFamily::Qwen, Some(Path::new("/nonexistent/pp.json")));
        assert!(matches!(missing, Err(ProbeError::PreprocessorConfig { .. })));
    }
}

use crate::error::ProbeError;
use serde::Deserialize;
use std::path::Path;

/// `size` block of a Glm4v-style `preprocessor_config.json`.
///
/// Qwen2-VL configs sometimes repeat their pixel bounds here as
/// `min_pixels` / `max_pixels`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PreprocessorSize {
    #[serde(default)]
    pub shortest_edge: Option<u64>,
    #[serde(default)]
    pub longest_edge: Option<u64>,
    #[serde(default)]
    pub min_pixels: Option<u64>,
    #[serde(default)]
    pub max_pixels: Option<u64>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

/// The fields of a HuggingFace `preprocessor_config.json` that decide the
/// token grid. Unknown fields are ignored; missing ones fall back to the
/// adapter's defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PreprocessorConfig {
    #[serde(default)]
    pub patch_size: Option<u32>,
    #[serde(default, alias = "spatial_merge_size")]
    pub merge_size: Option<u32>,
    #[serde(default)]
    pub temporal_patch_size: Option<u32>,
    #[serde(default)]
    pub min_pixels: Option<u64>,
    #[serde(default)]
    pub max_pixels: Option<u64>,
    #[serde(default)]
    pub size: Option<PreprocessorSize>,
    #[serde(default)]
    pub crop_size: Option<PreprocessorSize>,
}

impl PreprocessorConfig {
    pub fn from_path(path: &Path) -> Result<Self, ProbeError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ProbeError::PreprocessorConfig {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        Self::from_json(&contents).map_err(|detail| ProbeError::PreprocessorConfig {
            path: path.to_path_buf(),
            detail,
        })
    }

    pub fn from_json(contents: &str) -> Result<Self, String> {
        serde_json::from_str(contents)
            .map_err(|e| format!("failed to parse preprocessor_config.json: {e}"))
    }

    /// Lower pixel bound: `min_pixels`, else `size.min_pixels`, else
    /// `size.shortest_edge` (Glm4v stores the area there).
    pub fn min_pixels(&self) -> Option<u64> {
        self.min_pixels.or_else(|| {
            self.size
                .as_ref()
                .and_then(|s| s.min_pixels.or(s.shortest_edge))
        })
    }

    /// Upper pixel bound, resolved like [`Self::min_pixels`].
    pub fn max_pixels(&self) -> Option<u64> {
        self.max_pixels.or_else(|| {
            self.size
                .as_ref()
                .and_then(|s| s.max_pixels.or(s.longest_edge))
        })
    }

    /// Fixed canvas `(width, height)` from `crop_size` or `size`.
    pub fn canvas(&self) -> Option<(u32, u32)> {
        [self.crop_size.as_ref(), self.size.as_ref()]
            .into_iter()
            .flatten()
            .find_map(|s| match (s.width, s.height, s.shortest_edge) {
                (Some(w), Some(h), _) => Some((w, h)),
                (_, _, Some(edge)) => u32::try_from(edge).ok().map(|e| (e, e)),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glm_style_size_block() {
        let cfg = PreprocessorConfig::from_json(
            r#"{
                "image_processor_type": "Glm46VImageProcessor",
                "size": {"shortest_edge": 12544, "longest_edge": 9633792},
                "patch_size": 14,
                "temporal_patch_size": 2,
                "merge_size": 2,
                "do_rescale": true
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.min_pixels(), Some(12544));
        assert_eq!(cfg.max_pixels(), Some(9633792));
        assert_eq!(cfg.merge_size, Some(2));
    }

    #[test]
    fn qwen_style_top_level_bounds_win() {
        let cfg = PreprocessorConfig::from_json(
            r#"{
                "min_pixels": 3136,
                "max_pixels": 12845056,
                "size": {"min_pixels": 1, "max_pixels": 2},
                "spatial_merge_size": 2
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.min_pixels(), Some(3136));
        assert_eq!(cfg.max_pixels(), Some(12845056));
        assert_eq!(cfg.merge_size, Some(2));
    }

    #[test]
    fn clip_style_canvas() {
        let cfg = PreprocessorConfig::from_json(
            r#"{"crop_size": {"height": 224, "width": 224}, "size": {"shortest_edge": 224}}"#,
        )
        .unwrap();
        assert_eq!(cfg.canvas(), Some((224, 224)));

        let edge_only =
            PreprocessorConfig::from_json(r#"{"size": {"shortest_edge": 448}}"#).unwrap();
        assert_eq!(edge_only.canvas(), Some((448, 448)));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = PreprocessorConfig::from_json("{not json").unwrap_err();
        assert!(err.contains("preprocessor_config.json"), "got: {err}");
    }
}

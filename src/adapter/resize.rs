//! `smart_resize`: the resize planner shared by Qwen2-VL-family processors.
//!
//! Both sides are snapped to multiples of `factor = patch * merge` while the
//! area stays inside `[min_pixels, max_pixels]`. Rounding is half-to-even, so
//! a 70 px side becomes 56 px at factor 28, as the upstream processors do.

use super::PreprocessError;

/// Largest `long / short` side ratio a processor accepts.
pub const MAX_ASPECT_RATIO: f64 = 200.0;

/// Pixel budget of a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeBounds {
    /// `patch_size * merge_size`.
    pub factor: u32,
    pub min_pixels: u64,
    pub max_pixels: u64,
    /// Frames the area is multiplied by before the bounds check. Images
    /// count as one frame for Qwen2-VL and `temporal_patch_size` frames for
    /// Glm4v.
    pub frames: u32,
}

/// `patch_size * merge_size`, the side every resized edge snaps to.
///
/// Both values may come from a user's `preprocessor_config.json`, so a zero
/// or overflowing product is reported as a config error.
pub fn merge_factor(patch_size: u32, merge_size: u32) -> Result<u32, PreprocessError> {
    match patch_size.checked_mul(merge_size) {
        Some(0) => Err(PreprocessError::InvalidConfig(
            "patch_size and merge_size must be > 0".into(),
        )),
        Some(factor) => Ok(factor),
        None => Err(PreprocessError::InvalidConfig(format!(
            "patch_size * merge_size overflows ({patch_size} * {merge_size})"
        ))),
    }
}

/// Plan `(height, width)` for a `height × width` image.
pub fn smart_resize(
    height: u32,
    width: u32,
    bounds: &ResizeBounds,
) -> Result<(u32, u32), PreprocessError> {
    if height == 0 || width == 0 {
        return Err(PreprocessError::EmptyImage { width, height });
    }
    if bounds.factor == 0 {
        return Err(PreprocessError::InvalidConfig("factor must be > 0".into()));
    }

    let factor = f64::from(bounds.factor);
    let frames = f64::from(bounds.frames.max(1));
    let mut height = f64::from(height);
    let mut width = f64::from(width);

    if height < factor {
        width = (width * factor / height).round_ties_even();
        height = factor;
    }
    if width < factor {
        height = (height * factor / width).round_ties_even();
        width = factor;
    }

    let ratio = height.max(width) / height.min(width);
    if ratio > MAX_ASPECT_RATIO {
        return Err(PreprocessError::AspectRatio {
            ratio,
            limit: MAX_ASPECT_RATIO,
        });
    }

    let mut h_bar = (height / factor).round_ties_even() * factor;
    let mut w_bar = (width / factor).round_ties_even() * factor;

    let volume = frames * h_bar * w_bar;
    if volume > bounds.max_pixels as f64 {
        let beta = (frames * height * width / bounds.max_pixels as f64).sqrt();
        h_bar = ((height / beta / factor).floor() * factor).max(factor);
        w_bar = ((width / beta / factor).floor() * factor).max(factor);
    } else if volume < bounds.min_pixels as f64 {
        let beta = (bounds.min_pixels as f64 / (frames * height * width)).sqrt();
        h_bar = (height * beta / factor).ceil() * factor;
        w_bar = (width * beta / factor).ceil() * factor;
    }

    Ok((h_bar as u32, w_bar as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    const QWEN: ResizeBounds = ResizeBounds {
        factor: 28,
        min_pixels: 3136,
        max_pixels: 12_845_056,
        frames: 1,
    };

    const GLM: ResizeBounds = ResizeBounds {
        factor: 28,
        min_pixels: 12_544,
        max_pixels: 9_633_792,
        frames: 2,
    };

    #[test]
    fn rounds_half_to_even() {
        // 70 / 28 = 2.5 -> 2
        assert_eq!(smart_resize(70, 3500, &QWEN).unwrap(), (56, 3500));
        // 98 / 28 = 3.5 -> 4
        assert_eq!(smart_resize(98, 980, &QWEN).unwrap(), (112, 980));
    }

    #[test]
    fn snaps_to_factor() {
        assert_eq!(smart_resize(842, 595, &QWEN).unwrap(), (840, 588));
        assert_eq!(smart_resize(2800, 100, &QWEN).unwrap(), (2800, 112));
    }

    #[test]
    fn scales_down_above_max() {
        // 2 * 2156 * 3836 exceeds the GLM ceiling
        let (h, w) = smart_resize(2160, 3840, &GLM).unwrap();
        assert_eq!((h, w), (1624, 2912));
        assert!(2 * u64::from(h) * u64::from(w) <= GLM.max_pixels);
    }

    #[test]
    fn scales_up_below_min() {
        assert_eq!(smart_resize(64, 64, &GLM).unwrap(), (84, 84));
        // exactly at the Qwen floor: untouched
        assert_eq!(smart_resize(64, 64, &QWEN).unwrap(), (56, 56));
    }

    #[test]
    fn short_side_is_lifted_to_factor() {
        let (h, w) = smart_resize(10, 500, &QWEN).unwrap();
        assert_eq!(h, 28);
        assert_eq!(w % 28, 0);
        assert_eq!(w, 1400);
    }

    #[test]
    fn extreme_aspect_ratio_is_rejected() {
        let err = smart_resize(28, 28 * 201, &QWEN).unwrap_err();
        assert!(matches!(err, PreprocessError::AspectRatio { .. }));
        assert!(err.to_string().starts_with("absolute aspect ratio must be smaller than 200"));
        assert!(smart_resize(28, 28 * 200, &QWEN).is_ok());
    }

    #[test]
    fn empty_and_misconfigured_inputs() {
        assert!(matches!(
            smart_resize(0, 10, &QWEN),
            Err(PreprocessError::EmptyImage { .. })
        ));
        let broken = ResizeBounds { factor: 0, ..QWEN };
        assert!(matches!(
            smart_resize(10, 10, &broken),
            Err(PreprocessError::InvalidConfig(_))
        ));
    }

    #[test]
    fn results_are_factor_multiples_within_bounds() {
        for (h, w) in [(100, 2800), (2100, 140), (812, 375), (610, 987), (4000, 3000)] {
            let (rh, rw) = smart_resize(h, w, &QWEN).unwrap();
            assert_eq!(rh % 28, 0, "{h}x{w}");
            assert_eq!(rw % 28, 0, "{h}x{w}");
            let area = u64::from(rh) * u64::from(rw);
            assert!(area >= QWEN.min_pixels && area <= QWEN.max_pixels, "{h}x{w}");
        }
    }

    #[test]
    fn merge_factor_rejects_zero_and_overflow() {
        assert_eq!(merge_factor(14, 2).unwrap(), 28);
        assert!(matches!(merge_factor(14, 0), Err(PreprocessError::InvalidConfig(_))));
        let err = merge_factor(70_000, 70_000).unwrap_err();
        assert!(err.to_string().contains("overflows"), "{err}");
    }
}

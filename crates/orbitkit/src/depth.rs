use serde::Serialize;

pub const MIN_OPACITY: f64 = 0.4;
pub const MAX_OPACITY: f64 = 1.0;
pub const HOVER_SCALE: f64 = 1.5;
pub const HOVER_STACKING: i32 = 1000;
pub const STACKING_BIAS: f64 = 200.0;

/// Cloud tiles never shrink below this many pixels.
pub const MIN_TILE_SIZE: f64 = 36.0;
pub const BASE_TILE_SIZE: f64 = 42.0;

/// Visual cues derived from how close a node is to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthCue {
    pub scale: f64,
    pub opacity: f64,
    pub stacking: i32,
}

impl DepthCue {
    /// Cue for a node at depth `z` in a scene of depth radius `radius`.
    pub fn at(z: f64, radius: f64) -> Self {
        let scale = depth_scale(z, radius);
        Self {
            scale,
            opacity: scale.clamp(MIN_OPACITY, MAX_OPACITY),
            stacking: (z + STACKING_BIAS).round() as i32,
        }
    }

    /// The hovered node is always drawn large, opaque and on top.
    pub fn hovered(hover_scale: f64) -> Self {
        Self {
            scale: hover_scale,
            opacity: MAX_OPACITY,
            stacking: HOVER_STACKING,
        }
    }

    pub fn resolve(z: f64, radius: f64, hovered: bool, hover_scale: f64) -> Self {
        if hovered {
            Self::hovered(hover_scale)
        } else {
            Self::at(z, radius)
        }
    }
}

/// Stacking for the hovered node: `HOVER_STACKING`, or above the highest of `others`
/// when a large radius pushes depth stacking past it.
pub fn hover_stacking(others: impl IntoIterator<Item = i32>) -> i32 {
    others
        .into_iter()
        .max()
        .map_or(HOVER_STACKING, |top| HOVER_STACKING.max(top.saturating_add(1)))
}

/// `(z + 1.25R) / 2.25R`: 1.0 at the front pole, about 0.11 at the back.
/// A degenerate radius maps everything to full size.
pub fn depth_scale(z: f64, radius: f64) -> f64 {
    if !(radius.is_finite() && radius > 0.0) {
        return 1.0;
    }
    (z + radius * 1.25) / (radius * 2.25)
}

pub fn tile_size(scale: f64) -> f64 {
    (BASE_TILE_SIZE * scale).max(MIN_TILE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_and_back_of_cloud() {
        let front = DepthCue::at(120.0, 120.0);
        assert!((front.scale - 1.0).abs() < 1e-9);
        assert_eq!(front.opacity, 1.0);
        assert_eq!(front.stacking, 320);

        let back = DepthCue::at(-120.0, 120.0);
        assert_eq!(back.opacity, MIN_OPACITY);
        assert_eq!(back.stacking, 80);
    }

    #[test]
    fn test_cues_are_monotonic_in_depth() {
        let radius = 120.0;
        let mut prev = DepthCue::at(-radius, radius);

        for step in 1..=240 {
            let z = -radius + step as f64;
            let cue = DepthCue::at(z, radius);
            assert!(cue.scale >= prev.scale);
            assert!(cue.opacity >= prev.opacity);
            assert!(cue.stacking >= prev.stacking);
            prev = cue;
        }
    }

    #[test]
    fn test_hover_overrides_depth() {
        for z in [-120.0, 0.0, 120.0] {
            let cue = DepthCue::resolve(z, 120.0, true, HOVER_SCALE);
            assert_eq!(cue.opacity, 1.0);
            assert_eq!(cue.scale, HOVER_SCALE);
            assert_eq!(cue.stacking, HOVER_STACKING);
        }
        assert_eq!(DepthCue::resolve(0.0, 120.0, false, 2.0), DepthCue::at(0.0, 120.0));
    }

    #[test]
    fn test_hover_stacking_stays_on_top() {
        assert_eq!(hover_stacking([80, 320]), HOVER_STACKING);
        assert_eq!(hover_stacking(Vec::new()), HOVER_STACKING);
        // a 1000px sphere puts its front pole at 1200
        assert_eq!(hover_stacking([-800, 1200]), 1201);
        assert_eq!(hover_stacking([i32::MAX]), i32::MAX);
    }

    #[test]
    fn test_tile_size_floor() {
        assert_eq!(tile_size(0.1), MIN_TILE_SIZE);
        assert_eq!(tile_size(1.0), BASE_TILE_SIZE);
    }

    #[test]
    fn test_zero_radius_is_full_size() {
        assert_eq!(depth_scale(5.0, 0.0), 1.0);
    }
}

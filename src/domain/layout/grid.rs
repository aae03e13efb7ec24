// SPDX-License-Identifier: MPL-2.0
//! Grid geometry.
//!
//! Turns a [`GridSpec`] plus what is known about its images into concrete
//! sizes a front end can lay out: column tracks, gap and the responsive
//! fallbacks used on narrow screens.

use super::newtypes::grid_bounds::{LANDSCAPE_IMAGE_SIZE, LANDSCAPE_OVERRIDE_LIMIT};
use super::template::GridSpec;

/// Gap used for grids of large images (above 800px).
pub const WIDE_GAP_PX: u32 = 24;
/// Gap used for every other grid.
pub const NARROW_GAP_PX: u32 = 16;
/// Image size cap on narrow screens.
pub const MOBILE_IMAGE_CAP_PX: u32 = 120;
/// Sizes up to this use fixed pixel tracks; above it tracks are flexible.
const FIXED_TRACK_LIMIT_PX: u32 = 400;

/// Width rule for one grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnTrack {
    /// Shares the available width equally with the other tracks.
    Fill,
    /// Exactly this many pixels.
    Fixed(u32),
    /// Shrinks freely, never wider than this many pixels.
    UpTo(u32),
}

/// Computed layout for one grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridGeometry {
    pub tracks: Vec<ColumnTrack>,
    pub gap_px: u32,
    /// Image size actually used for the cells.
    pub image_size_px: u32,
    /// Minimum grid width when centered with fixed tracks.
    pub min_width_px: Option<u32>,
    pub mobile_columns: u32,
    pub mobile_image_size_px: u32,
}

/// Image size a grid renders at.
///
/// Grids containing any landscape image drop to 300px cells, unless the
/// template explicitly asks for 200px or less.
#[must_use]
pub fn effective_image_size(spec: &GridSpec, has_landscape: bool) -> u32 {
    let requested = spec.image_size.value();
    if has_landscape && requested > LANDSCAPE_OVERRIDE_LIMIT {
        LANDSCAPE_IMAGE_SIZE
    } else {
        requested
    }
}

impl GridGeometry {
    /// Computes the geometry for `spec`.
    #[must_use]
    pub fn compute(spec: &GridSpec, has_landscape: bool) -> Self {
        let columns = spec.columns.value();
        let size = effective_image_size(spec, has_landscape);
        let gap_px = spec
            .gap
            .unwrap_or(if size > 800 { WIDE_GAP_PX } else { NARROW_GAP_PX });

        let tracks = if columns == 1 {
            vec![ColumnTrack::Fill]
        } else if size <= FIXED_TRACK_LIMIT_PX {
            if spec.center {
                vec![ColumnTrack::Fixed(size); columns as usize]
            } else if let (Some(first), 2) = (spec.first_image_size, columns) {
                vec![
                    ColumnTrack::UpTo(first.value()),
                    ColumnTrack::UpTo(spec.image_size.value()),
                ]
            } else {
                vec![ColumnTrack::UpTo(size); columns as usize]
            }
        } else {
            vec![ColumnTrack::Fill; columns as usize]
        };

        let min_width_px = (spec.center && size <= FIXED_TRACK_LIMIT_PX)
            .then(|| columns * size + (columns - 1) * gap_px);

        let mobile_columns = if columns >= 6 {
            3
        } else if columns >= 4 {
            2
        } else {
            columns
        };

        Self {
            tracks,
            gap_px,
            image_size_px: size,
            min_width_px,
            mobile_columns,
            mobile_image_size_px: size.min(MOBILE_IMAGE_CAP_PX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layout::{ColumnCount, ImageSize};

    fn spec(columns: u32, size: u32) -> GridSpec {
        GridSpec {
            columns: ColumnCount::new(columns),
            image_size: ImageSize::new(size),
            ..GridSpec::default()
        }
    }

    #[test]
    fn landscape_images_shrink_large_grids() {
        assert_eq!(effective_image_size(&spec(5, 800), true), 300);
        assert_eq!(effective_image_size(&spec(5, 800), false), 800);
    }

    #[test]
    fn explicit_small_sizes_win_over_landscape() {
        assert_eq!(effective_image_size(&spec(4, 200), true), 200);
    }

    #[test]
    fn single_column_fills() {
        let geometry = GridGeometry::compute(&spec(1, 800), false);
        assert_eq!(geometry.tracks, vec![ColumnTrack::Fill]);
        assert_eq!(geometry.gap_px, NARROW_GAP_PX);
    }

    #[test]
    fn large_images_use_flexible_tracks_and_wide_gap() {
        let geometry = GridGeometry::compute(&spec(3, 1200), false);
        assert_eq!(geometry.tracks, vec![ColumnTrack::Fill; 3]);
        assert_eq!(geometry.gap_px, WIDE_GAP_PX);
        assert_eq!(geometry.min_width_px, None);
    }

    #[test]
    fn centered_small_grid_has_fixed_tracks_and_min_width() {
        let mut s = spec(4, 200);
        s.center = true;
        let geometry = GridGeometry::compute(&s, false);
        assert_eq!(geometry.tracks, vec![ColumnTrack::Fixed(200); 4]);
        assert_eq!(geometry.min_width_px, Some(4 * 200 + 3 * 16));
        assert_eq!(geometry.mobile_columns, 2);
    }

    #[test]
    fn two_columns_with_first_size() {
        let mut s = spec(2, 300);
        s.first_image_size = Some(ImageSize::new(400));
        let geometry = GridGeometry::compute(&s, false);
        assert_eq!(
            geometry.tracks,
            vec![ColumnTrack::UpTo(400), ColumnTrack::UpTo(300)]
        );
    }

    #[test]
    fn explicit_gap_and_mobile_fallbacks() {
        let mut s = spec(6, 200);
        s.gap = Some(8);
        let geometry = GridGeometry::compute(&s, false);
        assert_eq!(geometry.gap_px, 8);
        assert_eq!(geometry.mobile_columns, 3);
        assert_eq!(geometry.mobile_image_size_px, 120);
    }
}

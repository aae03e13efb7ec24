// SPDX-License-Identifier: MPL-2.0
//! Layout newtypes.
//!
//! This module provides type-safe wrappers for gallery layout values,
//! ensuring they are always within valid ranges.

use serde::{Deserialize, Serialize};

// =============================================================================
// Grid Bounds
// =============================================================================

/// Grid layout bounds.
pub mod grid_bounds {
    /// Minimum number of grid columns.
    pub const MIN_COLUMNS: u32 = 1;
    /// Maximum number of grid columns.
    pub const MAX_COLUMNS: u32 = 8;
    /// Default number of grid columns.
    pub const DEFAULT_COLUMNS: u32 = 5;
    /// Image sizes the image-transformation endpoint is asked for.
    pub const IMAGE_SIZES: [u32; 8] = [200, 300, 400, 800, 1200, 1600, 2000, 2400];
    /// Default grid image size.
    pub const DEFAULT_IMAGE_SIZE: u32 = 800;
    /// Rendered size used for grids that contain landscape images.
    pub const LANDSCAPE_IMAGE_SIZE: u32 = 300;
    /// Explicit sizes at or below this keep precedence over the landscape size.
    pub const LANDSCAPE_OVERRIDE_LIMIT: u32 = 200;
}

// =============================================================================
// ColumnCount
// =============================================================================

/// Number of grid columns, guaranteed to be within 1–8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct ColumnCount(u32);

impl ColumnCount {
    /// Creates a new column count, clamping to the valid range.
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(grid_bounds::MIN_COLUMNS, grid_bounds::MAX_COLUMNS))
    }

    /// Returns the value as u32.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for ColumnCount {
    fn default() -> Self {
        Self(grid_bounds::DEFAULT_COLUMNS)
    }
}

impl From<u32> for ColumnCount {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<ColumnCount> for u32 {
    fn from(value: ColumnCount) -> Self {
        value.0
    }
}

// =============================================================================
// ImageSize
// =============================================================================

/// Requested image edge length in pixels, snapped to one of the supported
/// sizes (200, 300, 400, 800, 1200, 1600, 2000, 2400).
///
/// # Example
///
/// ```
/// use folio_lens::domain::layout::ImageSize;
///
/// assert_eq!(ImageSize::new(800).value(), 800);
/// assert_eq!(ImageSize::new(750).value(), 800); // nearest supported size
/// assert_eq!(ImageSize::new(10_000).value(), 2400);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct ImageSize(u32);

impl ImageSize {
    /// Creates a new image size, snapping to the nearest supported size.
    /// Ties go to the smaller size.
    #[must_use]
    pub fn new(value: u32) -> Self {
        let nearest = grid_bounds::IMAGE_SIZES
            .iter()
            .copied()
            .min_by_key(|size| size.abs_diff(value))
            .unwrap_or(grid_bounds::DEFAULT_IMAGE_SIZE);
        Self(nearest)
    }

    /// Returns the value in pixels.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        Self(grid_bounds::DEFAULT_IMAGE_SIZE)
    }
}

impl From<u32> for ImageSize {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<ImageSize> for u32 {
    fn from(value: ImageSize) -> Self {
        value.0
    }
}

// =============================================================================
// MaxWidth
// =============================================================================

/// Width preset of a sequential gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaxWidth {
    Xs,
    Sm,
    Md,
    #[default]
    Lg,
    Xl,
}

impl MaxWidth {
    /// Maximum width of the viewer container in pixels.
    #[must_use]
    pub fn container_px(self) -> u32 {
        match self {
            MaxWidth::Xs => 400,
            MaxWidth::Sm => 500,
            MaxWidth::Md => 600,
            MaxWidth::Lg => 700,
            MaxWidth::Xl => 800,
        }
    }

    /// Maximum width of the media element in pixels.
    #[must_use]
    pub fn media_px(self) -> u32 {
        self.container_px() - 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_count_clamps() {
        assert_eq!(ColumnCount::new(0).value(), 1);
        assert_eq!(ColumnCount::new(4).value(), 4);
        assert_eq!(ColumnCount::new(42).value(), 8);
        assert_eq!(ColumnCount::default().value(), 5);
    }

    #[test]
    fn image_size_snaps_to_supported_sizes() {
        assert_eq!(ImageSize::new(0).value(), 200);
        assert_eq!(ImageSize::new(250).value(), 200);
        assert_eq!(ImageSize::new(260).value(), 300);
        assert_eq!(ImageSize::new(1300).value(), 1200);
        assert_eq!(ImageSize::new(2400).value(), 2400);
    }

    #[test]
    fn max_width_presets() {
        assert_eq!(MaxWidth::Xs.container_px(), 400);
        assert_eq!(MaxWidth::Lg.media_px(), 600);
        assert_eq!(MaxWidth::Xl.media_px(), 700);
        assert_eq!(MaxWidth::default(), MaxWidth::Lg);
    }

    #[test]
    fn newtypes_deserialize_from_plain_numbers() {
        #[derive(Deserialize)]
        struct Probe {
            columns: ColumnCount,
            size: ImageSize,
        }
        let probe: Probe = toml::from_str("columns = 12\nsize = 790").expect("valid toml");
        assert_eq!(probe.columns.value(), 8);
        assert_eq!(probe.size.value(), 800);
    }
}

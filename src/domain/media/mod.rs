// SPDX-License-Identifier: MPL-2.0
//! Media domain types.
//!
//! This module contains core media types that are independent of any
//! network or presentation concerns.

pub mod filter;
pub mod types;

// Re-export commonly used types
pub use filter::MediaKindFilter;
pub use types::{Dimensions, GalleryAsset, MediaKind};

// SPDX-License-Identifier: MPL-2.0
//! Query services (read-side).
//!
//! # Available Services
//!
//! - [`sequence`]: Renderable gallery subsets (`GallerySequence`)
//! - [`navigation`]: Sequential viewer and lightbox (`GalleryViewer`)
//! - [`layout`]: Layout registry and page plans (`LayoutRegistry`, `LayoutPlan`)
//!
//! # Design Notes
//!
//! Nothing here performs I/O except [`LayoutRegistry::load`], which reads the
//! optional user layout file. Viewer state is owned by one viewer instance
//! and never shared.

pub mod layout;
pub mod navigation;
pub mod sequence;

// Re-export main types
pub use layout::{LayoutEntry, LayoutPlan, LayoutRegistry, PlannedSection, PlannedView};
pub use navigation::{
    GalleryViewer, MediaLoad, NavigationInfo, Playback, PlaybackPolicy, Surface, ViewerEvent,
    ViewerOptions, ViewerState,
};
pub use sequence::GallerySequence;

// SPDX-License-Identifier: MPL-2.0
//! Layout domain types.
//!
//! Sub-project pages used to special-case their look with long chains of
//! title checks. Here each page instead gets a [`LayoutTemplate`]: plain data
//! describing grids, sequential viewers and which slice of the gallery each
//! one shows.

pub mod grid;
pub mod newtypes;
pub mod template;

pub use grid::{effective_image_size, ColumnTrack, GridGeometry};
pub use newtypes::{ColumnCount, ImageSize, MaxWidth};
pub use template::{
    DescriptionPlacement, GridSpec, LayoutSection, LayoutTemplate, ParagraphRange, SectionView,
    Selectable, SelectStep, SequentialSpec,
};

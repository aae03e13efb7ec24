// SPDX-License-Identifier: MPL-2.0
//! Domain layer - core gallery types and rules.
//!
//! This module contains pure domain types, value objects, and business rules.
//! Apart from `serde` derives (layouts are read from TOML) it does no I/O and
//! depends on nothing outside `std`.
//!
//! # Modules
//!
//! - [`media`]: Media types ([`MediaKind`](media::MediaKind),
//!   [`GalleryAsset`](media::GalleryAsset), [`MediaKindFilter`](media::MediaKindFilter))
//! - [`layout`]: Declarative page layouts ([`LayoutTemplate`](layout::LayoutTemplate),
//!   [`GridGeometry`](layout::GridGeometry))
//! - [`slug`]: URL slugs and alias matching

pub mod layout;
pub mod media;
pub mod slug;

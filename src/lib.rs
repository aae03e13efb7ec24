// SPDX-License-Identifier: MPL-2.0
//! `folio_lens` is the media core of a CMS-backed portfolio site.
//!
//! It classifies gallery assets into images, videos and audio, resolves the
//! URL each one is displayed from, plans per-project page layouts and drives
//! the sequential viewer and its lightbox.

#![doc(html_root_url = "https://docs.rs/folio_lens/0.3.0")]

pub mod app;
pub mod application;
pub mod content;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod media;

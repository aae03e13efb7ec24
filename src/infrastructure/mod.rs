// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`sanity`]: CMS query API over HTTP (implements [`ContentSource`])
//! - [`export`]: JSON export file on disk (implements [`ContentSource`])
//!
//! [`ContentSource`]: crate::application::port::ContentSource

pub mod export;
pub mod sanity;

// Re-export main types for convenience
pub use export::ExportSource;
pub use sanity::{SanityClient, SanityEndpoint};

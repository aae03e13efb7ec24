// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! # Available Ports
//!
//! - [`content`]: Project documents from the CMS or an export
//!
//! # Design Notes
//!
//! - Traits use content-model types only (no HTTP types leak out)
//! - Traits are `Send + Sync` so sources can be shared across tasks
//! - Methods return `Result`; degrading failures is the caller's job

pub mod content;

pub use content::ContentSource;

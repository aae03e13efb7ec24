// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`query`]: Read-side services: sequences, the viewer, layout plans
//! - [`service`]: Content access with graceful degradation
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The CLI uses application layer services
//!
//! # Example
//!
//! ```ignore
//! use folio_lens::application::port::ContentSource;
//! use folio_lens::application::service::ContentService;
//! use folio_lens::infrastructure::ExportSource;
//!
//! let service = ContentService::new(ExportSource::open("export.json")?);
//! let projects = service.projects().await; // never fails
//! ```

pub mod port;
pub mod query;
pub mod service;

// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **CMS**: Query API coordinates and request timeout
//! - **Images**: Image CDN and default transformation
//! - **Logging**: Fallback log filter

// ==========================================================================
// CMS Defaults
// ==========================================================================

/// Query API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "2024-01-01";

/// Default request timeout for CMS queries (in seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Minimum request timeout (in seconds).
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_TIMEOUT_SECS: u64 = 120;

// ==========================================================================
// Image Defaults
// ==========================================================================

/// Base URL of the image CDN.
pub const DEFAULT_CDN_BASE: &str = "https://cdn.sanity.io";

/// Minimum encoding quality.
pub const MIN_IMAGE_QUALITY: u8 = 1;

/// Maximum encoding quality.
pub const MAX_IMAGE_QUALITY: u8 = 100;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Filter used when neither `RUST_LOG` nor a configured level is set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Filter used by `--verbose`.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Timeout validation
    assert!(MIN_TIMEOUT_SECS > 0);
    assert!(MAX_TIMEOUT_SECS >= MIN_TIMEOUT_SECS);
    assert!(DEFAULT_TIMEOUT_SECS >= MIN_TIMEOUT_SECS);
    assert!(DEFAULT_TIMEOUT_SECS <= MAX_TIMEOUT_SECS);

    // Quality validation
    assert!(MIN_IMAGE_QUALITY > 0);
    assert!(MAX_IMAGE_QUALITY >= MIN_IMAGE_QUALITY);

    assert!(!DEFAULT_API_VERSION.is_empty());
    assert!(!DEFAULT_CDN_BASE.is_empty());
};

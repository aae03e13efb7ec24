// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent pure data without any network or presentation
//! dependencies. A [`GalleryAsset`] never stores its [`MediaKind`]; the kind
//! is always derived from the asset's fields by the classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the kinds of media a gallery can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaKind {
    /// Raster image served through the image-transformation endpoint.
    Image,
    /// Video file played from its raw asset URL.
    Video,
    /// Audio file played from its raw asset URL.
    Audio,
    /// Nothing to render: no URL, no MIME type and no asset reference.
    Unknown,
}

impl MediaKind {
    /// Returns `true` for kinds that are played back (video and audio).
    #[must_use]
    pub fn is_playable(self) -> bool {
        matches!(self, MediaKind::Video | MediaKind::Audio)
    }

    /// Short lowercase label, used in logs and CLI output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pixel dimensions reported by the CMS for raster images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Creates a new `Dimensions`.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` when the image is wider than it is tall.
    #[must_use]
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// Returns the aspect ratio (width / height).
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            f64::from(self.width) / f64::from(self.height)
        }
    }
}

/// One CMS-hosted media file, as seen by the gallery.
///
/// # Example
///
/// ```
/// use folio_lens::domain::media::{Dimensions, GalleryAsset};
///
/// let asset = GalleryAsset::new()
///     .with_url("https://cdn.sanity.io/files/p/d/abc.mp4")
///     .with_mime_type("video/mp4");
///
/// assert_eq!(asset.url(), Some("https://cdn.sanity.io/files/p/d/abc.mp4"));
/// assert!(asset.dimensions().is_none());
///
/// let photo = GalleryAsset::new().with_dimensions(Dimensions::new(1200, 800));
/// assert!(photo.is_landscape_shape());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryAsset {
    /// Stable key of the gallery entry inside its CMS array.
    key: Option<String>,
    /// CMS asset document id (e.g. `image-<hash>-1200x800-jpg`).
    asset_id: Option<String>,
    mime_type: Option<String>,
    url: Option<String>,
    filename: Option<String>,
    dimensions: Option<Dimensions>,
    caption: Option<String>,
    alt_text: Option<String>,
}

impl GalleryAsset {
    /// Creates an empty asset record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_asset_id(mut self, asset_id: impl Into<String>) -> Self {
        self.asset_id = Some(asset_id.into());
        self
    }

    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    #[must_use]
    pub fn with_alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = Some(alt_text.into());
        self
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    #[must_use]
    pub fn asset_id(&self) -> Option<&str> {
        self.asset_id.as_deref()
    }

    /// MIME type as reported by the CMS; empty strings count as absent.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref().filter(|m| !m.is_empty())
    }

    /// Raw asset URL; empty strings count as absent.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }

    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    #[must_use]
    pub fn dimensions(&self) -> Option<Dimensions> {
        self.dimensions
    }

    #[must_use]
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    #[must_use]
    pub fn alt_text(&self) -> Option<&str> {
        self.alt_text.as_deref()
    }

    /// Returns `true` when the reported dimensions are landscape.
    ///
    /// This only looks at the shape. Callers that care about media kind
    /// should use [`crate::media::is_landscape_image`].
    #[must_use]
    pub fn is_landscape_shape(&self) -> bool {
        self.dimensions.is_some_and(|d| d.is_landscape())
    }

    /// A label for logs: key, then filename, then URL.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.key()
            .or(self.filename())
            .or(self.url())
            .unwrap_or("<unnamed>")
    }
}

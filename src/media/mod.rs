// SPDX-License-Identifier: MPL-2.0
//! Media classification for CMS gallery assets.
//!
//! This module decides whether a [`GalleryAsset`] is an image, a video or an
//! audio file, and resolves the URL a gallery should display for it. Both
//! are pure functions of the asset's fields: nothing is fetched or sniffed.
//!
//! # Precedence
//!
//! Highest first:
//!
//! 1. URL ends in an audio extension → audio (`.mov` is never audio).
//! 2. MIME type `audio/*` → audio, except `audio/quicktime` on a `.mov` URL,
//!    which is video (and logged as ambiguous CMS metadata).
//! 3. URL ends in a video extension → video.
//! 4. MIME type `video/*` → video.
//! 5. URL present but no raster dimensions → video.
//! 6. Otherwise → image.

pub mod embed;
pub mod image_url;
pub mod resolve;

use crate::domain::media::{GalleryAsset, MediaKind};

// Re-export commonly used types
pub use embed::embed_url;
pub use extensions::{AUDIO_EXTENSIONS, VIDEO_EXTENSIONS};
pub use image_url::{FitMode, ImageTransform, ImageUrlBuilder};
pub use resolve::{resolve_display_url, ResolvedAsset};

/// Supported media extensions
pub mod extensions {
    /// Audio file extensions
    pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "aac", "flac", "m4a", "wma", "opus"];

    /// Video file extensions
    pub const VIDEO_EXTENSIONS: &[&str] = &[
        "mp4", "mov", "webm", "avi", "wmv", "flv", "mkv", "m4v", "3gp", "mpg", "mpeg",
    ];

    /// QuickTime container extension. Always treated as video.
    pub const QUICKTIME_EXTENSION: &str = "mov";

    /// Returns the lowercase extension a URL ends with, if any.
    ///
    /// Only the final path segment counts: `https://host/a.d/file` has no
    /// extension.
    #[must_use]
    pub fn url_extension(url: &str) -> Option<String> {
        let (_, ext) = url.rsplit_once('.')?;
        if ext.is_empty() || ext.contains('/') {
            return None;
        }
        Some(ext.to_lowercase())
    }

    /// Checks if a URL ends in one of `extensions` (case-insensitive).
    #[must_use]
    pub fn url_has_extension(url: &str, extensions: &[&str]) -> bool {
        url_extension(url).is_some_and(|ext| extensions.contains(&ext.as_str()))
    }

    /// Checks if a URL ends in `.mov` (case-insensitive).
    #[must_use]
    pub fn is_quicktime_url(url: &str) -> bool {
        url_extension(url).is_some_and(|ext| ext == QUICKTIME_EXTENSION)
    }
}

/// The rule that decided an asset's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationRule {
    AudioExtension,
    AudioMimeType,
    QuicktimeContainer,
    VideoExtension,
    VideoMimeType,
    MissingDimensions,
    ImageDefault,
    NoSource,
}

/// CMS metadata that contradicts itself in a known way.
///
/// Classification still picks one kind; the ambiguity is reported so the
/// content can be corrected at the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ambiguity {
    /// `audio/quicktime` MIME type on a `.mov` file.
    QuicktimeAudioMimeOnMov,
}

/// Outcome of classifying one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub kind: MediaKind,
    pub rule: ClassificationRule,
    pub ambiguity: Option<Ambiguity>,
}

impl Classification {
    fn new(kind: MediaKind, rule: ClassificationRule) -> Self {
        Self {
            kind,
            rule,
            ambiguity: None,
        }
    }
}

/// Classifies an asset and reports which rule decided.
///
/// Pure: the same asset always yields the same classification.
#[must_use]
pub fn classify_detailed(asset: &GalleryAsset) -> Classification {
    use extensions::{is_quicktime_url, url_has_extension};

    let url = asset.url();
    let mime = asset.mime_type().map(str::to_ascii_lowercase);
    let mime = mime.as_deref();

    // 1. Audio extension. `.mov` is never in the audio set, but keep the
    //    guard explicit so the set can grow without breaking QuickTime.
    if let Some(url) = url {
        if url_has_extension(url, AUDIO_EXTENSIONS) && !is_quicktime_url(url) {
            return Classification::new(MediaKind::Audio, ClassificationRule::AudioExtension);
        }
    }

    // 2. Audio MIME type, with the QuickTime exception.
    if let Some(mime) = mime.filter(|m| m.starts_with("audio/")) {
        if mime == "audio/quicktime" && url.is_some_and(is_quicktime_url) {
            return Classification {
                kind: MediaKind::Video,
                rule: ClassificationRule::QuicktimeContainer,
                ambiguity: Some(Ambiguity::QuicktimeAudioMimeOnMov),
            };
        }
        return Classification::new(MediaKind::Audio, ClassificationRule::AudioMimeType);
    }

    // 3. Video extension.
    if url.is_some_and(|u| url_has_extension(u, VIDEO_EXTENSIONS)) {
        return Classification::new(MediaKind::Video, ClassificationRule::VideoExtension);
    }

    // 4. Video MIME type.
    if mime.is_some_and(|m| m.starts_with("video/")) {
        return Classification::new(MediaKind::Video, ClassificationRule::VideoMimeType);
    }

    // 5. Files without raster dimensions are assumed to be video.
    if url.is_some() && asset.dimensions().is_none() {
        return Classification::new(MediaKind::Video, ClassificationRule::MissingDimensions);
    }

    // 6. Image, as long as there is anything to build an image URL from.
    if url.is_some() || asset.asset_id().is_some() || mime.is_some() {
        Classification::new(MediaKind::Image, ClassificationRule::ImageDefault)
    } else {
        Classification::new(MediaKind::Unknown, ClassificationRule::NoSource)
    }
}

/// Classifies an asset as image, video or audio.
///
/// Ambiguous metadata is logged at `warn` level with the asset's label.
///
/// # Example
///
/// ```
/// use folio_lens::domain::media::{GalleryAsset, MediaKind};
/// use folio_lens::media::classify;
///
/// let song = GalleryAsset::new().with_url("https://cdn.example/track.MP3");
/// assert_eq!(classify(&song), MediaKind::Audio);
///
/// let clip = GalleryAsset::new()
///     .with_url("https://cdn.example/clip.mov")
///     .with_mime_type("audio/quicktime");
/// assert_eq!(classify(&clip), MediaKind::Video);
/// ```
#[must_use]
pub fn classify(asset: &GalleryAsset) -> MediaKind {
    let classification = classify_detailed(asset);

    if let Some(ambiguity) = classification.ambiguity {
        tracing::warn!(
            asset = asset.display_label(),
            ?ambiguity,
            kind = %classification.kind,
            "ambiguous CMS media metadata"
        );
    }
    tracing::debug!(
        asset = asset.display_label(),
        kind = %classification.kind,
        rule = ?classification.rule,
        "classified asset"
    );

    classification.kind
}

/// Returns `true` if `kind` is an image whose dimensions are landscape.
#[must_use]
pub fn is_landscape_image(asset: &GalleryAsset, kind: MediaKind) -> bool {
    kind == MediaKind::Image && asset.is_landscape_shape()
}

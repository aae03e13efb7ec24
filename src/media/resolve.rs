// SPDX-License-Identifier: MPL-2.0
//! Display URL resolution.

use super::image_url::ImageUrlBuilder;
use crate::domain::layout::Selectable;
use crate::domain::media::{GalleryAsset, MediaKind};

/// Resolves the URL a gallery displays for `asset`.
///
/// - Video and audio play from the raw asset URL.
/// - Images go through the transformation endpoint; when that URL cannot be
///   built the raw asset URL is used instead.
///
/// `None` means "skip rendering". Never panics, never errors.
#[must_use]
pub fn resolve_display_url(
    asset: &GalleryAsset,
    kind: MediaKind,
    images: &ImageUrlBuilder,
) -> Option<String> {
    match kind {
        MediaKind::Video | MediaKind::Audio => asset.url().map(str::to_string),
        MediaKind::Image => match images.url_for(asset) {
            Ok(url) => Some(url),
            Err(err) => {
                tracing::debug!(
                    asset = asset.display_label(),
                    %err,
                    "image URL not built, using raw asset URL"
                );
                asset.url().map(str::to_string)
            }
        },
        MediaKind::Unknown => None,
    }
}

/// An asset together with its classification and display URL.
///
/// Only assets with a display URL are ever turned into a `ResolvedAsset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    asset: GalleryAsset,
    kind: MediaKind,
    display_url: String,
}

impl ResolvedAsset {
    /// Classifies `asset` and resolves its display URL.
    ///
    /// Returns `None` when there is nothing to display.
    #[must_use]
    pub fn resolve(asset: GalleryAsset, images: &ImageUrlBuilder) -> Option<Self> {
        let kind = super::classify(&asset);
        let display_url = resolve_display_url(&asset, kind, images)?;
        Some(Self {
            asset,
            kind,
            display_url,
        })
    }

    #[must_use]
    pub fn asset(&self) -> &GalleryAsset {
        &self.asset
    }

    #[must_use]
    pub fn media_kind(&self) -> MediaKind {
        self.kind
    }

    #[must_use]
    pub fn display_url(&self) -> &str {
        &self.display_url
    }

    /// Returns `true` for images with landscape dimensions.
    #[must_use]
    pub fn is_landscape_image(&self) -> bool {
        super::is_landscape_image(&self.asset, self.kind)
    }
}

impl Selectable for ResolvedAsset {
    fn filename(&self) -> Option<&str> {
        self.asset.filename()
    }

    fn kind(&self) -> MediaKind {
        self.kind
    }

    fn caption(&self) -> Option<&str> {
        self.asset.caption()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::Dimensions;

    fn images() -> ImageUrlBuilder {
        ImageUrlBuilder::new("https://cdn.sanity.io", "p1", "production")
    }

    #[test]
    fn playable_media_uses_raw_url() {
        let asset = GalleryAsset::new().with_url("https://cdn.sanity.io/files/p1/production/a.mp3");
        assert_eq!(
            resolve_display_url(&asset, MediaKind::Audio, &images()).as_deref(),
            Some("https://cdn.sanity.io/files/p1/production/a.mp3")
        );
        assert_eq!(
            resolve_display_url(&GalleryAsset::new(), MediaKind::Video, &images()),
            None
        );
    }

    #[test]
    fn images_use_the_transformation_endpoint() {
        let asset = GalleryAsset::new()
            .with_asset_id("image-abc-100x50-png")
            .with_url("https://cdn.sanity.io/images/p1/production/abc-100x50.png")
            .with_dimensions(Dimensions::new(100, 50));
        let resolved = ResolvedAsset::resolve(asset, &images()).expect("resolved");
        assert_eq!(resolved.media_kind(), MediaKind::Image);
        assert!(resolved.is_landscape_image());
        assert_eq!(
            resolved.display_url(),
            "https://cdn.sanity.io/images/p1/production/abc-100x50.png"
        );
    }

    #[test]
    fn images_fall_back_to_raw_url() {
        let asset = GalleryAsset::new()
            .with_url("https://example.com/photo.jpg")
            .with_dimensions(Dimensions::new(10, 10));
        assert_eq!(
            resolve_display_url(&asset, MediaKind::Image, &images()).as_deref(),
            Some("https://example.com/photo.jpg")
        );
    }

    #[test]
    fn unrenderable_assets_are_not_resolved() {
        assert!(ResolvedAsset::resolve(GalleryAsset::new(), &images()).is_none());
        // An image reference that cannot be built and has no URL.
        let asset = GalleryAsset::new().with_asset_id("file-zzz-pdf");
        assert!(ResolvedAsset::resolve(asset, &images()).is_none());
    }
}

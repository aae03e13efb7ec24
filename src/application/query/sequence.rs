// SPDX-License-Identifier: MPL-2.0
//! Gallery sequences: the renderable subset of a gallery, in order.

use crate::domain::media::{GalleryAsset, MediaKind};
use crate::media::{ImageUrlBuilder, ResolvedAsset};

/// Non-empty, ordered list of assets that all have a display URL.
///
/// Built fresh from CMS data for each page view. Assets without a display
/// URL are dropped (and logged) while building, so every index in
/// `0..len()` is renderable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySequence {
    items: Vec<ResolvedAsset>,
}

impl GallerySequence {
    /// Classifies and resolves `assets`, keeping only renderable ones.
    ///
    /// Returns `None` when nothing is left: the viewer then renders nothing.
    #[must_use]
    pub fn from_assets<I>(assets: I, images: &ImageUrlBuilder) -> Option<Self>
    where
        I: IntoIterator<Item = GalleryAsset>,
    {
        let items = assets
            .into_iter()
            .enumerate()
            .filter_map(|(position, asset)| {
                let label = asset.display_label().to_string();
                let resolved = ResolvedAsset::resolve(asset, images);
                if resolved.is_none() {
                    tracing::debug!(position, asset = %label, "excluded asset without display URL");
                }
                resolved
            })
            .collect();
        Self::from_resolved(items)
    }

    /// Wraps already resolved assets. Returns `None` for an empty list.
    #[must_use]
    pub fn from_resolved(items: Vec<ResolvedAsset>) -> Option<Self> {
        (!items.is_empty()).then_some(Self { items })
    }

    /// Number of assets; always at least 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ResolvedAsset> {
        self.items.get(index)
    }

    #[must_use]
    pub fn items(&self) -> &[ResolvedAsset] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedAsset> {
        self.items.iter()
    }

    /// Returns `true` if any asset is a landscape image.
    #[must_use]
    pub fn has_landscape_image(&self) -> bool {
        self.items.iter().any(ResolvedAsset::is_landscape_image)
    }

    /// Counts assets of one kind.
    #[must_use]
    pub fn count_kind(&self, kind: MediaKind) -> usize {
        self.items.iter().filter(|a| a.media_kind() == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::media::Dimensions;

    fn images() -> ImageUrlBuilder {
        ImageUrlBuilder::new("https://cdn.sanity.io", "p", "production")
    }

    #[test]
    fn empty_gallery_has_no_sequence() {
        assert!(GallerySequence::from_assets(Vec::new(), &images()).is_none());
    }

    #[test]
    fn unrenderable_assets_are_dropped() {
        let assets = vec![
            GalleryAsset::new().with_key("nothing"),
            GalleryAsset::new().with_url("https://cdn.sanity.io/files/p/production/a.mp3"),
            GalleryAsset::new().with_key("also-nothing").with_caption("text"),
        ];
        let seq = GallerySequence::from_assets(assets, &images()).expect("one left");
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.count_kind(MediaKind::Audio), 1);
    }

    #[test]
    fn only_unrenderable_assets_gives_no_sequence() {
        let assets = vec![GalleryAsset::new(), GalleryAsset::new().with_caption("x")];
        assert!(GallerySequence::from_assets(assets, &images()).is_none());
    }

    #[test]
    fn detects_landscape_images() {
        let assets = vec![GalleryAsset::new()
            .with_asset_id("image-a-300x100-jpg")
            .with_dimensions(Dimensions::new(300, 100))];
        let seq = GallerySequence::from_assets(assets, &images()).expect("sequence");
        assert!(seq.has_landscape_image());
        assert!(!seq.is_empty());
    }
}

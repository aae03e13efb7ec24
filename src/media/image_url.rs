// SPDX-License-Identifier: MPL-2.0
//! Image-transformation CDN URLs.
//!
//! Images are never shown from their raw upload URL. The CMS serves them
//! through a transformation endpoint that resizes, crops and re-encodes on
//! the fly:
//!
//! ```text
//! {cdn_base}/images/{project}/{dataset}/{hash}-{w}x{h}.{format}?w=..&h=..&fit=..&q=..&auto=format
//! ```
//!
//! The builder derives the path from the asset id (`image-<hash>-<w>x<h>-<format>`)
//! or, when only a URL is known, from an existing CDN image URL.

use crate::domain::media::GalleryAsset;
use crate::error::ImageUrlError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Prefix of image asset ids.
const IMAGE_ID_PREFIX: &str = "image-";

/// How the endpoint fits an image into the requested box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    Clip,
    Crop,
    Fill,
    FillMax,
    #[default]
    Max,
    Scale,
    Min,
}

impl FitMode {
    /// Value of the `fit` query parameter.
    #[must_use]
    pub fn as_param(self) -> &'static str {
        match self {
            FitMode::Clip => "clip",
            FitMode::Crop => "crop",
            FitMode::Fill => "fill",
            FitMode::FillMax => "fillmax",
            FitMode::Max => "max",
            FitMode::Scale => "scale",
            FitMode::Min => "min",
        }
    }
}

/// Resize and encoding parameters for one image URL.
///
/// Every field is optional; an empty transform yields the plain CDN URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageTransform {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<FitMode>,
    /// Encoding quality, 1-100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
    /// Let the CDN pick the best format the client accepts.
    pub auto_format: bool,
}

impl ImageTransform {
    /// Transform that resizes to fit within `width` x `height`.
    #[must_use]
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_fit(mut self, fit: FitMode) -> Self {
        self.fit = Some(fit);
        self
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(w) = self.width {
            pairs.push(("w", w.to_string()));
        }
        if let Some(h) = self.height {
            pairs.push(("h", h.to_string()));
        }
        if let Some(fit) = self.fit {
            pairs.push(("fit", fit.as_param().to_string()));
        }
        if let Some(q) = self.quality {
            pairs.push(("q", q.clamp(1, 100).to_string()));
        }
        if self.auto_format {
            pairs.push(("auto", "format".to_string()));
        }
        pairs
    }
}

/// Parsed image asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAssetRef {
    pub hash: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

impl ImageAssetRef {
    /// Parses an asset id of the form `image-<hash>-<w>x<h>-<format>`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageUrlError::MalformedAssetId`] for anything else,
    /// including file (non-image) asset ids.
    pub fn parse_id(asset_id: &str) -> Result<Self, ImageUrlError> {
        let malformed = || ImageUrlError::MalformedAssetId(asset_id.to_string());

        let rest = asset_id.strip_prefix(IMAGE_ID_PREFIX).ok_or_else(malformed)?;
        let mut parts = rest.rsplitn(3, '-');
        let format = parts.next().ok_or_else(malformed)?;
        let dims = parts.next().ok_or_else(malformed)?;
        let hash = parts.next().ok_or_else(malformed)?;
        let (width, height) = parse_dims(dims).ok_or_else(malformed)?;

        if hash.is_empty() || format.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            hash: hash.to_string(),
            width,
            height,
            format: format.to_string(),
        })
    }

    /// Parses the file name of an existing CDN image URL
    /// (`.../images/<project>/<dataset>/<hash>-<w>x<h>.<format>`).
    ///
    /// Returns `None` when the URL does not point at the image endpoint.
    #[must_use]
    pub fn parse_cdn_url(raw: &str) -> Option<Self> {
        let parsed = Url::parse(raw).ok()?;
        let segments: Vec<&str> = parsed.path_segments()?.collect();
        let images_at = segments.iter().position(|s| *s == "images")?;
        // images / project / dataset / file
        let file = segments.get(images_at + 3)?;
        let (stem, format) = file.rsplit_once('.')?;
        let (hash, dims) = stem.rsplit_once('-')?;
        let (width, height) = parse_dims(dims)?;
        if hash.is_empty() || format.is_empty() {
            return None;
        }
        Some(Self {
            hash: hash.to_string(),
            width,
            height,
            format: format.to_string(),
        })
    }

    /// Asset id this reference corresponds to.
    #[must_use]
    pub fn asset_id(&self) -> String {
        format!(
            "{IMAGE_ID_PREFIX}{}-{}x{}-{}",
            self.hash, self.width, self.height, self.format
        )
    }

    fn file_name(&self) -> String {
        format!("{}-{}x{}.{}", self.hash, self.width, self.height, self.format)
    }
}

fn parse_dims(dims: &str) -> Option<(u32, u32)> {
    let (w, h) = dims.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

/// Builds transformation URLs for one CMS project/dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlBuilder {
    cdn_base: String,
    project_id: String,
    dataset: String,
    defaults: ImageTransform,
}

impl ImageUrlBuilder {
    /// Creates a builder for the given CDN base and CMS coordinates.
    #[must_use]
    pub fn new(
        cdn_base: impl Into<String>,
        project_id: impl Into<String>,
        dataset: impl Into<String>,
    ) -> Self {
        Self {
            cdn_base: cdn_base.into().trim_end_matches('/').to_string(),
            project_id: project_id.into().trim().to_string(),
            dataset: dataset.into().trim().to_string(),
            defaults: ImageTransform::default(),
        }
    }

    /// Sets the transform applied by [`url_for`](Self::url_for).
    #[must_use]
    pub fn with_defaults(mut self, defaults: ImageTransform) -> Self {
        self.defaults = defaults;
        self
    }

    #[must_use]
    pub fn defaults(&self) -> &ImageTransform {
        &self.defaults
    }

    /// Builds the URL for `asset` with the builder's default transform.
    ///
    /// # Errors
    ///
    /// See [`url_with`](Self::url_with).
    pub fn url_for(&self, asset: &GalleryAsset) -> Result<String, ImageUrlError> {
        self.url_with(asset, &self.defaults)
    }

    /// Builds the URL for `asset` with an explicit transform.
    ///
    /// The asset id is preferred; a CDN image URL is used when the id is
    /// missing.
    ///
    /// # Errors
    ///
    /// - [`ImageUrlError::MissingProject`] if no project id or dataset is set
    /// - [`ImageUrlError::MissingSource`] if the asset has neither id nor URL
    /// - [`ImageUrlError::MalformedAssetId`] if neither can be parsed
    pub fn url_with(
        &self,
        asset: &GalleryAsset,
        transform: &ImageTransform,
    ) -> Result<String, ImageUrlError> {
        if self.project_id.is_empty() || self.dataset.is_empty() {
            return Err(ImageUrlError::MissingProject);
        }

        let asset_ref = match (asset.asset_id(), asset.url()) {
            (Some(id), url) => match ImageAssetRef::parse_id(id) {
                Ok(asset_ref) => asset_ref,
                Err(err) => url.and_then(ImageAssetRef::parse_cdn_url).ok_or(err)?,
            },
            (None, Some(url)) => ImageAssetRef::parse_cdn_url(url)
                .ok_or_else(|| ImageUrlError::MalformedAssetId(url.to_string()))?,
            (None, None) => return Err(ImageUrlError::MissingSource),
        };

        self.build(&asset_ref, transform)
    }

    /// Builds the URL for an already parsed reference.
    ///
    /// # Errors
    ///
    /// Returns [`ImageUrlError::MissingProject`] when the CDN base cannot be
    /// parsed as a URL.
    pub fn build(
        &self,
        asset_ref: &ImageAssetRef,
        transform: &ImageTransform,
    ) -> Result<String, ImageUrlError> {
        let mut url = Url::parse(&self.cdn_base).map_err(|_| ImageUrlError::MissingProject)?;
        let file_name = asset_ref.file_name();
        url.path_segments_mut()
            .map_err(|()| ImageUrlError::MissingProject)?
            .pop_if_empty()
            .extend([
                "images",
                self.project_id.as_str(),
                self.dataset.as_str(),
                file_name.as_str(),
            ]);

        let pairs = transform.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url.into())
    }
}

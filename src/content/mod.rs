// SPDX-License-Identifier: MPL-2.0
//! CMS document model.
//!
//! Field names follow what the CMS emits (`_id`, `_key`, `originalFilename`,
//! ...). Everything except a project's id and title is optional: content is
//! edited by hand and any field may be missing.

pub mod queries;

use crate::domain::media::{Dimensions, GalleryAsset};
use crate::domain::slug::create_slug;
use serde::{Deserialize, Deserializer, Serialize};

/// Slug object as stored by the CMS (`{ "current": "..." }`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Slug {
    #[serde(default)]
    pub current: String,
}

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    /// Display number, e.g. `"03"`.
    #[serde(default, deserialize_with = "string_or_number")]
    pub number: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: Option<Slug>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub main_image: Option<GalleryItem>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub themes: Vec<String>,
    /// External video link (YouTube / Vimeo).
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub videos: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sub_projects: Vec<SubProject>,
}

impl Project {
    /// The project's URL slug, falling back to a slug of its title.
    #[must_use]
    pub fn slug(&self) -> String {
        match &self.slug {
            Some(slug) if !slug.current.is_empty() => slug.current.clone(),
            _ => create_slug(&self.title),
        }
    }

    /// Finds the sub-project a URL segment points at.
    ///
    /// The segment is percent-decoded first. Both the raw and decoded forms
    /// are tried, in order: exact title or `pv`, slug of the title (or `pv`),
    /// then case-insensitive title or `pv`.
    #[must_use]
    pub fn find_sub_project(&self, segment: &str) -> Option<&SubProject> {
        let decoded = urlencoding::decode(segment)
            .map(|d| d.into_owned())
            .unwrap_or_else(|_| segment.to_string());
        let candidates = [decoded.as_str(), segment];

        let exact = |sp: &&SubProject| {
            candidates
                .iter()
                .any(|c| sp.title.as_deref() == Some(*c) || sp.pv.as_deref() == Some(*c))
        };
        let by_slug = |sp: &&SubProject| {
            let slug = sp.slug();
            !slug.is_empty() && candidates.iter().any(|c| slug == *c)
        };
        let loose = |sp: &&SubProject| {
            candidates.iter().any(|c| {
                let c = c.to_lowercase();
                sp.title.as_deref().is_some_and(|t| t.to_lowercase() == c)
                    || sp.pv.as_deref().is_some_and(|p| p.to_lowercase() == c)
            })
        };

        self.sub_projects
            .iter()
            .find(exact)
            .or_else(|| self.sub_projects.iter().find(by_slug))
            .or_else(|| self.sub_projects.iter().find(loose))
    }
}

/// A sub-project: one page of a project, with its own gallery.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubProject {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    /// Short label shown in navigation.
    #[serde(default)]
    pub pv: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Cover image.
    #[serde(default)]
    pub image: Option<GalleryItem>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gallery: Vec<GalleryItem>,
}

impl SubProject {
    /// Human name: title, then `pv`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.title
            .as_deref()
            .or(self.pv.as_deref())
            .unwrap_or_default()
    }

    /// URL slug built from [`name`](Self::name).
    #[must_use]
    pub fn slug(&self) -> String {
        create_slug(self.name())
    }

    /// Gallery entries as domain assets, in CMS order.
    #[must_use]
    pub fn assets(&self) -> Vec<GalleryAsset> {
        self.gallery.iter().map(GalleryItem::to_asset).collect()
    }
}

/// One entry of a gallery array (an `image` or a `file`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(rename = "_type", default)]
    pub item_type: Option<String>,
    #[serde(rename = "_key", default)]
    pub key: Option<String>,
    #[serde(default)]
    pub asset: Option<AssetRecord>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

impl GalleryItem {
    /// Converts the CMS record into a [`GalleryAsset`].
    #[must_use]
    pub fn to_asset(&self) -> GalleryAsset {
        let mut asset = GalleryAsset::new();
        if let Some(key) = &self.key {
            asset = asset.with_key(key.as_str());
        }
        if let Some(caption) = &self.caption {
            asset = asset.with_caption(caption.as_str());
        }
        if let Some(alt) = &self.alt {
            asset = asset.with_alt_text(alt.as_str());
        }

        let Some(record) = &self.asset else {
            return asset;
        };
        if let Some(id) = &record.id {
            asset = asset.with_asset_id(id.as_str());
        }
        if let Some(url) = &record.url {
            asset = asset.with_url(url.as_str());
        }
        if let Some(name) = &record.original_filename {
            asset = asset.with_filename(name.as_str());
        }
        if let Some(mime) = &record.mime_type {
            asset = asset.with_mime_type(mime.as_str());
        }
        if let Some(dimensions) = record.dimensions() {
            asset = asset.with_dimensions(dimensions);
        }
        asset
    }
}

/// A dereferenced asset document, or a bare reference to one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    /// `_id` when dereferenced, `_ref` when not.
    #[serde(rename = "_id", alias = "_ref", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub original_filename: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub metadata: Option<AssetMetadata>,
}

impl AssetRecord {
    #[must_use]
    pub fn dimensions(&self) -> Option<Dimensions> {
        let d = self.metadata.as_ref()?.dimensions.as_ref()?;
        Some(Dimensions::new(d.width?, d.height?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssetMetadata {
    #[serde(default)]
    pub dimensions: Option<RawDimensions>,
}

/// Dimensions as emitted by the CMS; either side may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawDimensions {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT_JSON: &str = r#"{
        "_id": "p-1",
        "number": 3,
        "title": "Out of Sight",
        "slug": { "current": "out-of-sight" },
        "year": 2023,
        "tags": null,
        "subProjects": [
            {
                "_key": "a",
                "pv": "bts",
                "title": "Behind the scenes",
                "gallery": [
                    {
                        "_type": "image",
                        "_key": "g1",
                        "asset": {
                            "_id": "image-abc-800x600-jpg",
                            "url": "https://cdn.sanity.io/images/p/d/abc-800x600.jpg",
                            "originalFilename": "bts1.jpg",
                            "mimeType": "image/jpeg",
                            "metadata": { "dimensions": { "width": 800, "height": 600 } }
                        },
                        "caption": "first"
                    },
                    { "_type": "file", "_key": "g2", "asset": null }
                ]
            },
            { "_key": "b", "title": "東京ハーパー", "gallery": null },
            { "_key": "c", "title": "Les Mots Bleus" }
        ]
    }"#;

    fn project() -> Project {
        serde_json::from_str(PROJECT_JSON).expect("fixture parses")
    }

    #[test]
    fn deserializes_cms_shapes() {
        let p = project();
        assert_eq!(p.number.as_deref(), Some("3"));
        assert!(p.tags.is_empty());
        assert_eq!(p.sub_projects.len(), 3);
        assert!(p.sub_projects[1].gallery.is_empty());
        assert_eq!(p.slug(), "out-of-sight");
    }

    #[test]
    fn gallery_item_to_asset() {
        let p = project();
        let assets = p.sub_projects[0].assets();
        assert_eq!(assets.len(), 2);
        let first = &assets[0];
        assert_eq!(first.key(), Some("g1"));
        assert_eq!(first.filename(), Some("bts1.jpg"));
        assert_eq!(first.dimensions(), Some(Dimensions::new(800, 600)));
        assert_eq!(first.caption(), Some("first"));
        assert_eq!(assets[1].url(), None);
    }

    #[test]
    fn reference_ids_are_accepted() {
        let record: AssetRecord =
            serde_json::from_str(r#"{ "_ref": "image-x-1x1-png", "_type": "reference" }"#)
                .expect("reference parses");
        assert_eq!(record.id.as_deref(), Some("image-x-1x1-png"));
        assert_eq!(record.dimensions(), None);
    }

    #[test]
    fn finds_sub_project_by_title_slug_or_case() {
        let p = project();
        assert_eq!(p.find_sub_project("bts").and_then(|s| s.key.as_deref()), Some("a"));
        assert_eq!(
            p.find_sub_project("les-mots-bleus").and_then(|s| s.key.as_deref()),
            Some("c")
        );
        assert_eq!(
            p.find_sub_project("LES MOTS BLEUS").and_then(|s| s.key.as_deref()),
            Some("c")
        );
        assert!(p.find_sub_project("nope").is_none());
    }

    #[test]
    fn finds_percent_encoded_japanese_titles() {
        let p = project();
        let encoded = urlencoding::encode("東京ハーパー");
        assert_eq!(
            p.find_sub_project(&encoded).and_then(|s| s.key.as_deref()),
            Some("b")
        );
    }

    #[test]
    fn project_slug_falls_back_to_title() {
        let p = Project {
            id: "x".into(),
            title: "Palette&Formes".into(),
            ..Project::default()
        };
        assert_eq!(p.slug(), "palette-formes");
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Layout registry and page plans.
//!
//! The registry maps a (project, sub-project) pair to a [`LayoutEntry`].
//! Built-in entries ship with the crate; a user `layouts.toml` in the config
//! directory can add entries or shadow built-in ones.
//!
//! A [`LayoutPlan`] is the entry evaluated against one sub-project's gallery:
//! the concrete list of sections to render, each with its own
//! [`GallerySequence`].

use super::sequence::GallerySequence;
use crate::content::SubProject;
use crate::domain::layout::{
    DescriptionPlacement, GridGeometry, GridSpec, LayoutTemplate, SectionView, SequentialSpec,
};
use crate::domain::slug::{create_slug, slug_matches};
use crate::error::{Error, Result};
use crate::media::{ImageUrlBuilder, ResolvedAsset};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name of the user layout file inside the config directory.
pub const USER_LAYOUTS_FILE: &str = "layouts.toml";

const BUILTIN_LAYOUTS: &str = include_str!("builtin_layouts.toml");

fn default_true() -> bool {
    true
}

/// One named layout and the sub-projects it applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub name: String,
    /// Restricts the entry to one project slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Accept sub-projects whose slug merely contains an alias.
    #[serde(default)]
    pub contains: bool,
    #[serde(default)]
    pub template: LayoutTemplate,
    #[serde(default = "default_true")]
    pub show_cover_image: bool,
}

impl LayoutEntry {
    /// Entry used when nothing else matches.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            name: "default".to_string(),
            project: None,
            aliases: Vec::new(),
            contains: false,
            template: LayoutTemplate::default(),
            show_cover_image: true,
        }
    }

    /// Returns `true` if this entry applies.
    ///
    /// `names` are the sub-project's title, `pv` label and URL segment.
    #[must_use]
    pub fn matches(&self, project_slug: &str, names: &[&str]) -> bool {
        if let Some(project) = &self.project {
            if create_slug(project) != create_slug(project_slug) {
                return false;
            }
        }
        self.aliases.iter().any(|alias| {
            names
                .iter()
                .any(|name| slug_matches(alias, name, self.contains))
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct LayoutFile {
    #[serde(default, rename = "layout")]
    layouts: Vec<LayoutEntry>,
}

/// Ordered set of layout entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRegistry {
    entries: Vec<LayoutEntry>,
    fallback: LayoutEntry,
}

impl LayoutRegistry {
    /// Registry holding only the built-in entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Layout`] if the embedded layouts fail to parse.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_LAYOUTS)
    }

    /// Parses entries from TOML text in the `[[layout]]` format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Layout`] on malformed TOML or unknown variants.
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: LayoutFile =
            toml::from_str(text).map_err(|err| Error::Layout(err.to_string()))?;
        Ok(Self::from_entries(file.layouts))
    }

    /// Builds a registry from entries, keeping their order.
    #[must_use]
    pub fn from_entries(entries: Vec<LayoutEntry>) -> Self {
        Self {
            entries,
            fallback: LayoutEntry::fallback(),
        }
    }

    /// Built-in entries extended by `<config_dir>/layouts.toml`.
    ///
    /// A missing file is not an error. User entries are tried first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Layout`] if either the built-in or the user file is
    /// invalid, and [`Error::Io`] if the user file exists but cannot be read.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let mut registry = Self::builtin()?;
        let path = config_dir.join(USER_LAYOUTS_FILE);
        if !path.exists() {
            return Ok(registry);
        }

        let text = std::fs::read_to_string(&path)?;
        let user = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), count = user.len(), "loaded user layouts");
        registry.prepend(user);
        Ok(registry)
    }

    /// Puts `other`'s entries in front of this registry's.
    pub fn prepend(&mut self, other: LayoutRegistry) {
        let mut entries = other.entries;
        entries.append(&mut self.entries);
        self.entries = entries;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    /// Looks up an entry by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&LayoutEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Picks the layout for a sub-project.
    ///
    /// Project-specific entries win over generic ones; within each group
    /// the first match wins. Falls back to a plain grid.
    #[must_use]
    pub fn resolve(
        &self,
        project_slug: &str,
        sub_project: &SubProject,
        segment: Option<&str>,
    ) -> &LayoutEntry {
        let names: Vec<&str> = [
            sub_project.title.as_deref(),
            sub_project.pv.as_deref(),
            segment,
        ]
        .into_iter()
        .flatten()
        .filter(|n| !n.trim().is_empty())
        .collect();

        let specific = self
            .entries
            .iter()
            .filter(|e| e.project.is_some())
            .find(|e| e.matches(project_slug, &names));
        let generic = || {
            self.entries
                .iter()
                .filter(|e| e.project.is_none())
                .find(|e| e.matches(project_slug, &names))
        };

        let entry = specific.or_else(generic).unwrap_or(&self.fallback);
        tracing::debug!(
            project = project_slug,
            sub_project = sub_project.name(),
            layout = %entry.name,
            "resolved layout"
        );
        entry
    }
}

// =============================================================================
// Plans
// =============================================================================

/// A section view with its derived sizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedView {
    Grid {
        spec: GridSpec,
        geometry: GridGeometry,
    },
    Sequential {
        spec: SequentialSpec,
        media_width_px: u32,
        min_height_px: u32,
    },
}

impl PlannedView {
    fn new(view: &SectionView, sequence: &GallerySequence) -> Self {
        match view {
            SectionView::Grid(spec) => PlannedView::Grid {
                spec: spec.clone(),
                geometry: GridGeometry::compute(spec, sequence.has_landscape_image()),
            },
            SectionView::Sequential(spec) => PlannedView::Sequential {
                spec: spec.clone(),
                media_width_px: spec.media_width_px(),
                min_height_px: spec.container_min_height_px(),
            },
        }
    }

    #[must_use]
    pub fn is_sequential(&self) -> bool {
        matches!(self, PlannedView::Sequential { .. })
    }
}

/// One section ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSection {
    /// Position of the section in the template.
    pub template_index: usize,
    pub label: Option<String>,
    pub description: Option<String>,
    pub placement: DescriptionPlacement,
    pub view: PlannedView,
    pub sequence: GallerySequence,
}

/// A sub-project page, planned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub layout: String,
    pub cover: Option<ResolvedAsset>,
    pub sections: Vec<PlannedSection>,
}

impl LayoutPlan {
    /// Evaluates `entry` against a sub-project.
    ///
    /// Gallery assets are classified and resolved first; selectors then run
    /// over the renderable assets only. Sections whose selection comes out
    /// empty are dropped.
    #[must_use]
    pub fn build(entry: &LayoutEntry, sub_project: &SubProject, images: &ImageUrlBuilder) -> Self {
        let resolved: Vec<ResolvedAsset> = match GallerySequence::from_assets(
            sub_project.assets(),
            images,
        ) {
            Some(sequence) => sequence.items().to_vec(),
            None => Vec::new(),
        };

        let cover = if entry.show_cover_image {
            sub_project
                .image
                .as_ref()
                .and_then(|item| ResolvedAsset::resolve(item.to_asset(), images))
        } else {
            None
        };

        let sections = entry
            .template
            .sections()
            .iter()
            .enumerate()
            .filter_map(|(template_index, section)| {
                let picked: Vec<ResolvedAsset> = section
                    .select(&resolved)
                    .into_iter()
                    .map(|i| resolved[i].clone())
                    .collect();
                let Some(sequence) = GallerySequence::from_resolved(picked) else {
                    tracing::debug!(layout = %entry.name, template_index, "dropped empty section");
                    return None;
                };
                Some(PlannedSection {
                    template_index,
                    label: section.label.clone(),
                    description: section.description_text(sub_project.description.as_deref()),
                    placement: section.description,
                    view: PlannedView::new(&section.view, &sequence),
                    sequence,
                })
            })
            .collect();

        Self {
            layout: entry.name.clone(),
            cover,
            sections,
        }
    }

    /// The first section shown in a sequential viewer.
    #[must_use]
    pub fn first_sequential(&self) -> Option<&PlannedSection> {
        self.sections.iter().find(|s| s.view.is_sequential())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.cover.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{AssetRecord, GalleryItem};

    fn images() -> ImageUrlBuilder {
        ImageUrlBuilder::new("https://cdn.sanity.io", "p", "production")
    }

    fn item(i: usize, caption: &str) -> GalleryItem {
        GalleryItem {
            item_type: Some("file".into()),
            key: Some(format!("k{i}")),
            asset: Some(AssetRecord {
                id: Some(format!("file-{i}-mp4")),
                url: Some(format!("https://cdn.sanity.io/files/p/production/{i}.mp4")),
                original_filename: Some(format!("{i}.mp4")),
                mime_type: Some("video/mp4".into()),
                metadata: None,
            }),
            caption: Some(caption.into()),
            alt: None,
        }
    }

    fn sub_project(title: &str, n: usize) -> SubProject {
        SubProject {
            key: Some("s".into()),
            title: Some(title.into()),
            description: Some("title\n\nn°1\n\nn°2".into()),
            gallery: (0..n).map(|i| item(i, &format!("c{i}"))).collect(),
            ..SubProject::default()
        }
    }

    #[test]
    fn builtin_layouts_parse() {
        let registry = LayoutRegistry::builtin().expect("built-in layouts are valid");
        assert!(registry.get("bts").is_some());
        assert!(registry.get("0fr").is_some());
        assert!(registry.get("tokyo").is_some());
    }

    #[test]
    fn resolves_by_title_pv_or_segment() {
        let registry = LayoutRegistry::builtin().expect("valid");
        let sp = sub_project("BTS", 1);
        assert_eq!(registry.resolve("work", &sp, None).name, "bts");

        let sp = SubProject {
            pv: Some("les mots bleus".into()),
            ..SubProject::default()
        };
        assert_eq!(
            registry.resolve("print", &sp, None).name,
            "les-mots-bleus-print"
        );
        assert_eq!(
            registry.resolve("exhibitions", &sp, None).name,
            "les-mots-bleus-exhibitions"
        );

        let sp = SubProject::default();
        assert_eq!(registry.resolve("x", &sp, Some("0fr")).name, "0fr");
    }

    #[test]
    fn project_specific_entries_win() {
        let registry = LayoutRegistry::builtin().expect("valid");
        let sp = sub_project("東京ハーパー", 1);
        assert_eq!(
            registry.resolve("exhibitions", &sp, None).name,
            "tokyo-harper-exhibitions"
        );
        assert_eq!(registry.resolve("work", &sp, None).name, "tokyo-harper");
    }

    #[test]
    fn unknown_sub_projects_get_the_fallback() {
        let registry = LayoutRegistry::builtin().expect("valid");
        let sp = sub_project("something else", 1);
        let entry = registry.resolve("work", &sp, None);
        assert_eq!(entry.name, "default");
        assert_eq!(entry.template, LayoutTemplate::default());
    }

    #[test]
    fn user_entries_shadow_builtin_ones() {
        let mut registry = LayoutRegistry::builtin().expect("valid");
        let user = LayoutRegistry::from_toml(
            r#"
            [[layout]]
            name = "my-bts"
            aliases = ["bts"]
            template = { type = "grid", columns = 3 }
            "#,
        )
        .expect("user layouts parse");
        registry.prepend(user);
        assert_eq!(registry.resolve("work", &sub_project("bts", 1), None).name, "my-bts");
    }

    #[test]
    fn invalid_user_layouts_are_layout_errors() {
        let err = LayoutRegistry::from_toml("[[layout]]\nname = 3").unwrap_err();
        assert!(matches!(err, Error::Layout(_)));
    }

    #[test]
    fn bts_plan_splits_gallery_and_description() {
        let registry = LayoutRegistry::builtin().expect("valid");
        let sp = sub_project("bts", 20);
        let plan = LayoutPlan::build(registry.resolve("work", &sp, None), &sp, &images());

        assert_eq!(plan.layout, "bts");
        assert_eq!(plan.sections.len(), 2);
        assert_eq!(plan.sections[0].sequence.len(), 12);
        assert_eq!(plan.sections[1].sequence.len(), 13);
        assert_eq!(
            plan.sections[0].description.as_deref(),
            Some("title\n\nn°1")
        );
        assert_eq!(plan.sections[1].description.as_deref(), Some("n°2"));
        assert!(plan.first_sequential().is_some());
    }

    #[test]
    fn guarded_sections_are_dropped_for_small_galleries() {
        let registry = LayoutRegistry::builtin().expect("valid");
        let sp = sub_project("bts", 5);
        let plan = LayoutPlan::build(registry.resolve("work", &sp, None), &sp, &images());
        assert_eq!(plan.sections.len(), 1);
        assert_eq!(plan.sections[0].sequence.len(), 5);
    }

    #[test]
    fn short_selections_are_dropped() {
        let registry = LayoutRegistry::builtin().expect("valid");

        let mut palette = sub_project("palette&formes", 10);
        palette.gallery[0].caption = Some("expo1".into());
        let plan = LayoutPlan::build(
            registry.resolve("exhibitions", &palette, None),
            &palette,
            &images(),
        );
        assert_eq!(plan.layout, "palette-formes-exhibitions");
        assert!(
            plan.sections.iter().all(|s| s.template_index != 0),
            "a lone expo image is not a row"
        );
        let last6 = plan.sections.iter().find(|s| s.template_index == 3);
        assert_eq!(last6.map(|s| s.sequence.len()), Some(6));

        let mut tokyo = sub_project("東京ハーパー", 16);
        tokyo.gallery[0].caption = Some("first1".into());
        let plan = LayoutPlan::build(
            registry.resolve("exhibitions", &tokyo, None),
            &tokyo,
            &images(),
        );
        assert_eq!(plan.layout, "tokyo-harper-exhibitions");
        assert!(plan.sections.is_empty(), "{:?}", plan.sections);
    }

    #[test]
    fn empty_gallery_plans_nothing() {
        let sp = sub_project("anything", 0);
        let plan = LayoutPlan::build(&LayoutEntry::fallback(), &sp, &images());
        assert!(plan.sections.is_empty());
        assert!(plan.is_empty());
    }

    #[test]
    fn load_without_user_file_is_builtin() {
        let dir = tempfile::tempdir().expect("temp dir");
        let registry = LayoutRegistry::load(dir.path()).expect("load");
        assert_eq!(registry, LayoutRegistry::builtin().expect("valid"));
    }

    #[test]
    fn load_reads_user_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join(USER_LAYOUTS_FILE),
            "[[layout]]\nname = \"mine\"\naliases = [\"x\"]\n",
        )
        .expect("write");
        let registry = LayoutRegistry::load(dir.path()).expect("load");
        assert_eq!(registry.entries()[0].name, "mine");
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Declarative layout templates.
//!
//! A template describes how one sub-project page arranges its gallery: a
//! single grid, a single sequential viewer, or an ordered list of sections,
//! each selecting a slice of the gallery and showing it one way or the other.
//!
//! Templates are plain data. They deserialize from TOML (see the built-in
//! layouts shipped with the crate) and are evaluated against any list of
//! [`Selectable`] items.

use super::newtypes::{ColumnCount, ImageSize, MaxWidth};
use crate::domain::media::{MediaKind, MediaKindFilter};
use serde::{Deserialize, Serialize};

/// Anything a selection step can look at.
pub trait Selectable {
    /// Original upload filename, if known.
    fn filename(&self) -> Option<&str>;
    /// Classified media kind.
    fn kind(&self) -> MediaKind;
    /// Caption set by the editor, if any.
    fn caption(&self) -> Option<&str> {
        None
    }
}

// =============================================================================
// View specs
// =============================================================================

/// Grid of thumbnails, each opening the lightbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub columns: ColumnCount,
    pub image_size: ImageSize,
    /// Optional different size for the first column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_image_size: Option<ImageSize>,
    /// Gap between cells in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<u32>,
    /// Center the grid instead of stretching it to full width.
    pub center: bool,
    /// Index of an image rendered rotated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate_index: Option<usize>,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: ColumnCount::default(),
            image_size: ImageSize::default(),
            first_image_size: None,
            gap: None,
            center: false,
            rotate_index: None,
        }
    }
}

/// One-at-a-time viewer with prev/next arrows and a lightbox.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SequentialSpec {
    pub max_width: MaxWidth,
    /// Overrides `max_width` with an explicit media width in pixels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_max_width: Option<u32>,
    pub hide_captions: bool,
}

impl SequentialSpec {
    /// Width of the media element in pixels.
    #[must_use]
    pub fn media_width_px(&self) -> u32 {
        self.custom_max_width
            .unwrap_or_else(|| self.max_width.media_px())
    }

    /// Minimum height of the viewer container in pixels.
    #[must_use]
    pub fn container_min_height_px(&self) -> u32 {
        match self.custom_max_width {
            Some(width) => (width + 100).clamp(300, 450),
            None => 400,
        }
    }
}

/// How a section shows the assets it selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum SectionView {
    Grid(GridSpec),
    Sequential(SequentialSpec),
}

// =============================================================================
// Selection
// =============================================================================

/// One step of a section's selection pipeline.
///
/// Steps run in order, each narrowing the previous result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "kebab-case")]
pub enum SelectStep {
    /// Half-open index range; `end = None` runs to the end.
    Range {
        start: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<usize>,
    },
    /// Keep the first `count` items.
    Take { count: usize },
    /// Keep the last `count` items.
    Last { count: usize },
    /// Keep items whose filename starts with `prefix` (case-insensitive).
    FilenamePrefix { prefix: String },
    /// Keep items of the given kinds.
    Kind { kind: MediaKindFilter },
    /// Keep items whose filename equals or ends with one of `filenames`, in
    /// the order the filenames are listed. An exact name wins over a suffix
    /// match and no item is picked twice.
    Filenames { filenames: Vec<String> },
    /// Drop items whose filename equals or ends with one of `filenames`.
    ExcludeFilenames { filenames: Vec<String> },
    /// Keep items captioned with one of `captions` (case-insensitive), in
    /// the order the captions are listed.
    Captions { captions: Vec<String> },
    /// Drop items captioned with one of `captions` (case-insensitive).
    ExcludeCaptions { captions: Vec<String> },
}

impl SelectStep {
    fn apply<T: Selectable>(&self, items: &[T], indices: Vec<usize>) -> Vec<usize> {
        match self {
            SelectStep::Range { start, end } => {
                let end = end.unwrap_or(indices.len()).min(indices.len());
                let start = (*start).min(end);
                indices[start..end].to_vec()
            }
            SelectStep::Take { count } => indices.into_iter().take(*count).collect(),
            SelectStep::Last { count } => {
                let skip = indices.len().saturating_sub(*count);
                indices.into_iter().skip(skip).collect()
            }
            SelectStep::FilenamePrefix { prefix } => {
                let prefix = prefix.to_lowercase();
                indices
                    .into_iter()
                    .filter(|&i| {
                        items[i]
                            .filename()
                            .is_some_and(|name| name.to_lowercase().starts_with(&prefix))
                    })
                    .collect()
            }
            SelectStep::Kind { kind } => indices
                .into_iter()
                .filter(|&i| kind.matches_kind(items[i].kind()))
                .collect(),
            SelectStep::Filenames { filenames } => {
                let mut picked: Vec<usize> = Vec::with_capacity(filenames.len());
                for wanted in filenames {
                    let free = |i: &usize| !picked.contains(i);
                    let exact = indices
                        .iter()
                        .copied()
                        .filter(free)
                        .find(|&i| items[i].filename() == Some(wanted.as_str()));
                    let found = exact.or_else(|| {
                        indices
                            .iter()
                            .copied()
                            .filter(free)
                            .find(|&i| filename_is(&items[i], wanted))
                    });
                    if let Some(i) = found {
                        picked.push(i);
                    }
                }
                picked
            }
            SelectStep::ExcludeFilenames { filenames } => indices
                .into_iter()
                .filter(|&i| !filenames.iter().any(|f| filename_is(&items[i], f)))
                .collect(),
            SelectStep::Captions { captions } => captions
                .iter()
                .flat_map(|wanted| {
                    indices
                        .iter()
                        .copied()
                        .filter(move |&i| caption_is(&items[i], wanted))
                })
                .collect(),
            SelectStep::ExcludeCaptions { captions } => indices
                .into_iter()
                .filter(|&i| !captions.iter().any(|c| caption_is(&items[i], c)))
                .collect(),
        }
    }
}

fn filename_is<T: Selectable>(item: &T, wanted: &str) -> bool {
    item.filename()
        .is_some_and(|name| name == wanted || name.ends_with(wanted))
}

fn caption_is<T: Selectable>(item: &T, wanted: &str) -> bool {
    item.caption()
        .is_some_and(|caption| caption.trim().eq_ignore_ascii_case(wanted.trim()))
}

/// Which paragraphs of the sub-project description a section shows.
///
/// Paragraphs are separated by blank lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphRange {
    pub start: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
}

/// Where a section places the description text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DescriptionPlacement {
    #[default]
    Hidden,
    Above,
    Beside,
}

/// One block of a sub-project page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSection {
    /// Short text shown next to the section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Section renders only when the gallery has at least this many assets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_gallery_len: Option<usize>,
    #[serde(default)]
    pub select: Vec<SelectStep>,
    /// Section renders only when the selection has at least this many assets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selected: Option<usize>,
    pub view: SectionView,
    #[serde(default)]
    pub description: DescriptionPlacement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraphs: Option<ParagraphRange>,
}

impl LayoutSection {
    /// A section showing every asset with the given view.
    #[must_use]
    pub fn whole(view: SectionView) -> Self {
        Self {
            label: None,
            min_gallery_len: None,
            select: Vec::new(),
            min_selected: None,
            view,
            description: DescriptionPlacement::Above,
            paragraphs: None,
        }
    }

    /// Runs the selection pipeline and returns indices into `items`.
    ///
    /// Returns an empty selection when the `min_gallery_len` or
    /// `min_selected` guard fails.
    #[must_use]
    pub fn select<T: Selectable>(&self, items: &[T]) -> Vec<usize> {
        if self.min_gallery_len.is_some_and(|min| items.len() < min) {
            return Vec::new();
        }
        let selected: Vec<usize> = self
            .select
            .iter()
            .fold((0..items.len()).collect(), |indices, step| {
                step.apply(items, indices)
            });
        if self.min_selected.is_some_and(|min| selected.len() < min) {
            return Vec::new();
        }
        selected
    }

    /// The description text this section shows, if any.
    #[must_use]
    pub fn description_text(&self, description: Option<&str>) -> Option<String> {
        if self.description == DescriptionPlacement::Hidden {
            return None;
        }
        let description = description?.trim();
        if description.is_empty() {
            return None;
        }
        let Some(range) = self.paragraphs else {
            return Some(description.to_string());
        };
        let paragraphs: Vec<&str> = description.split("\n\n").collect();
        let end = range.end.unwrap_or(paragraphs.len()).min(paragraphs.len());
        let start = range.start.min(end);
        let text = paragraphs[start..end].join("\n\n");
        (!text.is_empty()).then_some(text)
    }
}

// =============================================================================
// Template
// =============================================================================

/// Layout of a sub-project page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LayoutTemplate {
    Grid(GridSpec),
    Sequential(SequentialSpec),
    Composite { sections: Vec<LayoutSection> },
}

impl Default for LayoutTemplate {
    fn default() -> Self {
        LayoutTemplate::Grid(GridSpec::default())
    }
}

impl LayoutTemplate {
    /// Normalizes the template into its list of sections.
    #[must_use]
    pub fn sections(&self) -> Vec<LayoutSection> {
        match self {
            LayoutTemplate::Grid(spec) => vec![LayoutSection::whole(SectionView::Grid(spec.clone()))],
            LayoutTemplate::Sequential(spec) => {
                vec![LayoutSection::whole(SectionView::Sequential(spec.clone()))]
            }
            LayoutTemplate::Composite { sections } => sections.clone(),
        }
    }
}

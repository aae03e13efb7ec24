// SPDX-License-Identifier: MPL-2.0
//! Plain-text rendering of command results.
//!
//! Every function returns the full text so commands stay testable without
//! capturing stdout.

use crate::application::query::{
    GalleryViewer, LayoutPlan, MediaLoad, PlannedSection, PlannedView, Surface,
};
use crate::content::Project;
use crate::domain::layout::{ColumnTrack, DescriptionPlacement};
use crate::media::{self, ImageUrlBuilder};

/// Every gallery asset of every sub-project with its kind and display URL.
#[must_use]
pub fn classification(project: &Project, images: &ImageUrlBuilder) -> String {
    let mut lines = vec![format!("{} ({})", project.title, project.slug())];
    if project.sub_projects.is_empty() {
        lines.push("  no sub-projects".to_string());
    }
    for sub_project in &project.sub_projects {
        lines.push(format!("  {} [{}]", sub_project.name(), sub_project.slug()));
        let assets = sub_project.assets();
        if assets.is_empty() {
            lines.push("    empty gallery".to_string());
        }
        for (index, asset) in assets.iter().enumerate() {
            let decided = media::classify_detailed(asset);
            let kind = decided.kind;
            let url = media::resolve_display_url(asset, kind, images);
            let mut line = format!(
                "    {index:>3}  {:<7} {:<60} {}",
                kind.label(),
                asset.display_label(),
                url.as_deref().unwrap_or("skipped"),
            );
            line.push_str(&format!("  ({:?})", decided.rule));
            if let Some(ambiguity) = decided.ambiguity {
                line.push_str(&format!(" ambiguous: {ambiguity:?}"));
            }
            lines.push(line);
        }
    }
    lines.join("\n")
}

fn track(track: &ColumnTrack) -> String {
    match track {
        ColumnTrack::Fill => "1fr".to_string(),
        ColumnTrack::Fixed(px) => format!("{px}px"),
        ColumnTrack::UpTo(px) => format!("minmax(0,{px}px)"),
    }
}

fn section(section: &PlannedSection) -> Vec<String> {
    let heading = match &section.label {
        Some(label) => format!("  section {} \"{label}\"", section.template_index),
        None => format!("  section {}", section.template_index),
    };
    let mut lines = vec![heading];

    match &section.view {
        PlannedView::Grid { spec, geometry } => {
            let tracks: Vec<String> = geometry.tracks.iter().map(track).collect();
            lines.push(format!(
                "    grid: {} columns [{}], image {}px, gap {}px{}",
                spec.columns.value(),
                tracks.join(" "),
                geometry.image_size_px,
                geometry.gap_px,
                if spec.center { ", centered" } else { "" },
            ));
        }
        PlannedView::Sequential {
            spec,
            media_width_px,
            min_height_px,
        } => {
            lines.push(format!(
                "    sequential: media {media_width_px}px, min height {min_height_px}px{}",
                if spec.hide_captions { ", no captions" } else { "" },
            ));
        }
    }

    if let Some(text) = &section.description {
        let placement = match section.placement {
            DescriptionPlacement::Above => "above",
            DescriptionPlacement::Beside => "beside",
            DescriptionPlacement::Hidden => "hidden",
        };
        let first_line = text.lines().next().unwrap_or_default();
        lines.push(format!("    description ({placement}): {first_line}"));
    }

    for (index, asset) in section.sequence.iter().enumerate() {
        lines.push(format!(
            "    {index:>3}  {:<7} {}",
            asset.media_kind().label(),
            asset.asset().display_label()
        ));
    }
    lines
}

/// A planned sub-project page.
#[must_use]
pub fn plan(plan: &LayoutPlan) -> String {
    let mut lines = vec![format!("layout: {}", plan.layout)];
    match &plan.cover {
        Some(cover) => lines.push(format!("cover: {}", cover.display_url())),
        None => lines.push("cover: none".to_string()),
    }
    if plan.sections.is_empty() {
        lines.push("no sections".to_string());
    }
    for planned in &plan.sections {
        lines.extend(section(planned));
    }
    lines.join("\n")
}

/// One media load request.
#[must_use]
pub fn load(load: &MediaLoad) -> String {
    let surface = match load.surface {
        Surface::Inline => "inline",
        Surface::Lightbox => "lightbox",
    };
    let playback = match load.playback {
        Some(p) => format!(
            " [{}{}]",
            if p.autoplay { "autoplay" } else { "paused" },
            if p.muted { ", muted" } else { "" }
        ),
        None => String::new(),
    };
    format!(
        "load {surface} #{} {} {}{playback}",
        load.index,
        load.kind.label(),
        load.url
    )
}

/// The viewer's position, e.g. `2/5` or `2/5 lightbox 4/5`.
#[must_use]
pub fn viewer_state(viewer: &GalleryViewer) -> String {
    let info = viewer.navigation_info();
    let mut text = format!("{}/{}", info.current_index + 1, info.total_count);
    if let Some(index) = info.lightbox_index {
        text.push_str(&format!(" lightbox {}/{}", index + 1, info.total_count));
    }
    text
}

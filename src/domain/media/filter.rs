// SPDX-License-Identifier: MPL-2.0
//! Media filtering types for the domain layer.
//!
//! Filters are pure checks over an already classified [`MediaKind`]; they
//! never look at URLs or MIME types themselves.

use super::MediaKind;
use serde::{Deserialize, Serialize};

/// Filter by media kind.
///
/// Used by layout sections to pick, for example, only the audio pieces of a
/// sub-project gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaKindFilter {
    /// Keep every kind.
    #[default]
    All,
    /// Keep only images.
    ImagesOnly,
    /// Keep only videos.
    VideosOnly,
    /// Keep only audio.
    AudioOnly,
    /// Keep videos and audio.
    PlayableOnly,
}

impl MediaKindFilter {
    /// Returns `true` if this filter matches the given media kind.
    #[must_use]
    pub fn matches_kind(&self, kind: MediaKind) -> bool {
        match self {
            Self::All => true,
            Self::ImagesOnly => kind == MediaKind::Image,
            Self::VideosOnly => kind == MediaKind::Video,
            Self::AudioOnly => kind == MediaKind::Audio,
            Self::PlayableOnly => kind.is_playable(),
        }
    }

    /// Returns `true` if this filter is active (not `All`).
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::All)
    }
}

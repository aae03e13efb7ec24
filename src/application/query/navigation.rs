// SPDX-License-Identifier: MPL-2.0
//! Sequential gallery viewer.
//!
//! This module provides [`GalleryViewer`], the state machine behind the
//! one-item-at-a-time gallery and its lightbox. The main cursor wraps around
//! at both ends; the lightbox cursor clamps. The two cursors are independent:
//! closing the lightbox returns to wherever the main cursor was, unless
//! [`ViewerOptions::sync_lightbox_on_close`] is set.
//!
//! Every transition that shows a different asset yields a [`MediaLoad`]
//! describing what the front end should mount.

use super::sequence::GallerySequence;
use crate::domain::media::MediaKind;
use crate::media::ResolvedAsset;
use serde::{Deserialize, Serialize};

// =============================================================================
// Playback
// =============================================================================

/// Where an asset is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// The inline sequential viewer.
    Inline,
    /// The modal lightbox.
    Lightbox,
}

/// How a playable asset starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playback {
    pub autoplay: bool,
    pub muted: bool,
}

/// Playback rules for video and audio.
///
/// Inline players autoplay muted (browsers refuse unmuted autoplay); inside
/// the lightbox the user has opted in, so sound is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackPolicy {
    pub autoplay: bool,
    pub muted_inline: bool,
}

impl Default for PlaybackPolicy {
    fn default() -> Self {
        Self {
            autoplay: true,
            muted_inline: true,
        }
    }
}

impl PlaybackPolicy {
    /// Playback settings for `kind` on `surface`; `None` for non-playable kinds.
    #[must_use]
    pub fn playback(&self, kind: MediaKind, surface: Surface) -> Option<Playback> {
        if !kind.is_playable() {
            return None;
        }
        Some(Playback {
            autoplay: self.autoplay,
            muted: match surface {
                Surface::Inline => self.muted_inline,
                Surface::Lightbox => false,
            },
        })
    }
}

/// Request to mount one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLoad {
    pub index: usize,
    pub url: String,
    pub kind: MediaKind,
    pub surface: Surface,
    /// `None` for images.
    pub playback: Option<Playback>,
}

// =============================================================================
// State machine
// =============================================================================

/// Viewer behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewerOptions {
    pub playback: PlaybackPolicy,
    /// Move the main cursor to the lightbox position when the lightbox closes.
    pub sync_lightbox_on_close: bool,
}

/// Viewer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    Viewing { index: usize },
    LightboxOpen { index: usize, lightbox_index: usize },
}

impl ViewerState {
    /// Main cursor position.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            ViewerState::Viewing { index } | ViewerState::LightboxOpen { index, .. } => index,
        }
    }

    /// Lightbox cursor position, when open.
    #[must_use]
    pub fn lightbox_index(self) -> Option<usize> {
        match self {
            ViewerState::Viewing { .. } => None,
            ViewerState::LightboxOpen { lightbox_index, .. } => Some(lightbox_index),
        }
    }
}

/// User input the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    Next,
    Previous,
    OpenLightbox(usize),
    LightboxNext,
    LightboxPrevious,
    CloseLightbox,
}

/// Navigation state information for UI rendering.
///
/// A snapshot: holds no reference to the sequence.
// Allow excessive bools: read-only UI snapshot with orthogonal flags.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationInfo {
    /// Whether prev/next arrows are shown (more than one asset).
    pub can_navigate: bool,
    pub current_index: usize,
    pub total_count: usize,
    pub lightbox_open: bool,
    pub lightbox_index: Option<usize>,
    pub lightbox_has_previous: bool,
    pub lightbox_has_next: bool,
}

/// One-item-at-a-time viewer over a [`GallerySequence`].
///
/// # Example
///
/// ```
/// use folio_lens::application::query::{GallerySequence, GalleryViewer, ViewerOptions};
/// use folio_lens::domain::media::GalleryAsset;
/// use folio_lens::media::ImageUrlBuilder;
///
/// let images = ImageUrlBuilder::new("https://cdn.sanity.io", "p", "production");
/// let assets = vec![
///     GalleryAsset::new().with_url("https://cdn.sanity.io/files/p/production/a.mp4"),
///     GalleryAsset::new().with_url("https://cdn.sanity.io/files/p/production/b.mp3"),
/// ];
/// let sequence = GallerySequence::from_assets(assets, &images).unwrap();
/// let mut viewer = GalleryViewer::new(sequence, ViewerOptions::default());
///
/// viewer.previous();
/// assert_eq!(viewer.current_index(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryViewer {
    sequence: GallerySequence,
    state: ViewerState,
    options: ViewerOptions,
}

impl GalleryViewer {
    /// Mounts a viewer on the first asset.
    #[must_use]
    pub fn new(sequence: GallerySequence, options: ViewerOptions) -> Self {
        Self {
            sequence,
            state: ViewerState::Viewing { index: 0 },
            options,
        }
    }

    /// The load request for the asset shown at mount time.
    #[must_use]
    pub fn initial_load(&self) -> MediaLoad {
        self.load(self.state.index(), Surface::Inline)
    }

    #[must_use]
    pub fn state(&self) -> ViewerState {
        self.state
    }

    #[must_use]
    pub fn sequence(&self) -> &GallerySequence {
        &self.sequence
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.state.index()
    }

    #[must_use]
    pub fn lightbox_index(&self) -> Option<usize> {
        self.state.lightbox_index()
    }

    #[must_use]
    pub fn is_lightbox_open(&self) -> bool {
        matches!(self.state, ViewerState::LightboxOpen { .. })
    }

    /// The asset under the main cursor.
    #[must_use]
    pub fn current(&self) -> &ResolvedAsset {
        &self.sequence.items()[self.state.index()]
    }

    /// The asset shown in the lightbox, when open.
    #[must_use]
    pub fn lightbox_current(&self) -> Option<&ResolvedAsset> {
        self.state
            .lightbox_index()
            .and_then(|i| self.sequence.get(i))
    }

    /// Advances the main cursor, wrapping to the first asset.
    ///
    /// Ignored while the lightbox is open.
    pub fn next(&mut self) -> Option<MediaLoad> {
        let ViewerState::Viewing { index } = self.state else {
            return None;
        };
        let next = (index + 1) % self.len();
        self.state = ViewerState::Viewing { index: next };
        Some(self.load(next, Surface::Inline))
    }

    /// Moves the main cursor back, wrapping to the last asset.
    ///
    /// Ignored while the lightbox is open.
    pub fn previous(&mut self) -> Option<MediaLoad> {
        let ViewerState::Viewing { index } = self.state else {
            return None;
        };
        let len = self.len();
        let previous = (index + len - 1) % len;
        self.state = ViewerState::Viewing { index: previous };
        Some(self.load(previous, Surface::Inline))
    }

    /// Opens the lightbox on `index`. Out-of-range indices are ignored.
    ///
    /// While already open this retargets the lightbox cursor.
    pub fn open_lightbox(&mut self, target: usize) -> Option<MediaLoad> {
        if target >= self.len() {
            return None;
        }
        self.state = ViewerState::LightboxOpen {
            index: self.state.index(),
            lightbox_index: target,
        };
        Some(self.load(target, Surface::Lightbox))
    }

    /// Moves the lightbox cursor forward; no-op on the last asset.
    pub fn lightbox_next(&mut self) -> Option<MediaLoad> {
        let ViewerState::LightboxOpen { lightbox_index, .. } = self.state else {
            return None;
        };
        if lightbox_index + 1 >= self.len() {
            return None;
        }
        self.open_lightbox(lightbox_index + 1)
    }

    /// Moves the lightbox cursor back; no-op on the first asset.
    pub fn lightbox_previous(&mut self) -> Option<MediaLoad> {
        let ViewerState::LightboxOpen { lightbox_index, .. } = self.state else {
            return None;
        };
        let previous = lightbox_index.checked_sub(1)?;
        self.open_lightbox(previous)
    }

    /// Closes the lightbox.
    ///
    /// Yields a load request only when syncing moved the main cursor.
    pub fn close_lightbox(&mut self) -> Option<MediaLoad> {
        let ViewerState::LightboxOpen {
            index,
            lightbox_index,
        } = self.state
        else {
            return None;
        };

        let index = if self.options.sync_lightbox_on_close {
            lightbox_index
        } else {
            index
        };
        let moved = index != self.state.index();
        self.state = ViewerState::Viewing { index };
        moved.then(|| self.load(index, Surface::Inline))
    }

    /// Applies one event.
    pub fn apply(&mut self, event: ViewerEvent) -> Option<MediaLoad> {
        match event {
            ViewerEvent::Next => self.next(),
            ViewerEvent::Previous => self.previous(),
            ViewerEvent::OpenLightbox(index) => self.open_lightbox(index),
            ViewerEvent::LightboxNext => self.lightbox_next(),
            ViewerEvent::LightboxPrevious => self.lightbox_previous(),
            ViewerEvent::CloseLightbox => self.close_lightbox(),
        }
    }

    /// Returns a snapshot of the current navigation state for UI rendering.
    #[must_use]
    pub fn navigation_info(&self) -> NavigationInfo {
        let lightbox_index = self.state.lightbox_index();
        NavigationInfo {
            can_navigate: self.len() > 1,
            current_index: self.state.index(),
            total_count: self.len(),
            lightbox_open: lightbox_index.is_some(),
            lightbox_index,
            lightbox_has_previous: lightbox_index.is_some_and(|i| i > 0),
            lightbox_has_next: lightbox_index.is_some_and(|i| i + 1 < self.len()),
        }
    }

    fn load(&self, index: usize, surface: Surface) -> MediaLoad {
        let asset = &self.sequence.items()[index];
        let kind = asset.media_kind();
        MediaLoad {
            index,
            url: asset.display_url().to_string(),
            kind,
            surface,
            playback: self.options.playback.playback(kind, surface),
        }
    }
}

// SPDX-License-Identifier: MPL-2.0
//! Embeddable player URLs for externally hosted videos.

use url::Url;

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";
const VIMEO_EMBED: &str = "https://player.vimeo.com/video/";

/// Converts a YouTube or Vimeo link into its embeddable player URL.
///
/// Recognized forms:
/// - `youtube.com/watch?v=ID`, `youtu.be/ID`, `youtube.com/embed/ID`
/// - `vimeo.com/ID`, `player.vimeo.com/video/ID`
///
/// Anything else is returned unchanged. Empty input yields `None`.
///
/// # Example
///
/// ```
/// use folio_lens::media::embed_url;
///
/// assert_eq!(
///     embed_url("https://youtu.be/dQw4w9WgXcQ").as_deref(),
///     Some("https://www.youtube.com/embed/dQw4w9WgXcQ")
/// );
/// assert_eq!(embed_url("  "), None);
/// ```
#[must_use]
pub fn embed_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let Ok(parsed) = Url::parse(raw) else {
        return Some(raw.to_string());
    };

    let embed = youtube_id(&parsed)
        .map(|id| format!("{YOUTUBE_EMBED}{id}"))
        .or_else(|| vimeo_id(&parsed).map(|id| format!("{VIMEO_EMBED}{id}")));

    Some(embed.unwrap_or_else(|| raw.to_string()))
}

fn host(url: &Url) -> Option<&str> {
    url.host_str().map(|h| h.strip_prefix("www.").unwrap_or(h))
}

/// Video ids are `[A-Za-z0-9_-]+`; anything after the first other char is
/// dropped.
fn youtube_id(url: &Url) -> Option<String> {
    let id = match host(url)? {
        "youtu.be" => url.path_segments()?.next()?.to_string(),
        "youtube.com" | "m.youtube.com" => {
            let mut segments = url.path_segments()?;
            match segments.next()? {
                "watch" => url
                    .query_pairs()
                    .find(|(k, _)| k == "v")
                    .map(|(_, v)| v.into_owned())?,
                "embed" => segments.next()?.to_string(),
                _ => return None,
            }
        }
        _ => return None,
    };

    let id: String = id
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    (!id.is_empty()).then_some(id)
}

fn vimeo_id(url: &Url) -> Option<String> {
    let mut segments = url.path_segments()?;
    let candidate = match host(url)? {
        "vimeo.com" => segments.next()?,
        "player.vimeo.com" => {
            if segments.next()? != "video" {
                return None;
            }
            segments.next()?
        }
        _ => return None,
    };

    let id: String = candidate.chars().take_while(char::is_ascii_digit).collect();
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_forms() {
        let expected = Some("https://www.youtube.com/embed/abc_DEF-12".to_string());
        assert_eq!(embed_url("https://www.youtube.com/watch?v=abc_DEF-12&t=3"), expected);
        assert_eq!(embed_url("https://youtu.be/abc_DEF-12"), expected);
        assert_eq!(embed_url("https://youtube.com/embed/abc_DEF-12?rel=0"), expected);
    }

    #[test]
    fn vimeo_forms() {
        let expected = Some("https://player.vimeo.com/video/76979871".to_string());
        assert_eq!(embed_url("https://vimeo.com/76979871"), expected);
        assert_eq!(embed_url("https://player.vimeo.com/video/76979871"), expected);
        assert_eq!(embed_url("https://vimeo.com/channels/staffpicks"), Some("https://vimeo.com/channels/staffpicks".into()));
    }

    #[test]
    fn unknown_links_pass_through() {
        assert_eq!(
            embed_url("https://example.com/video.mp4").as_deref(),
            Some("https://example.com/video.mp4")
        );
        assert_eq!(embed_url("not a url").as_deref(), Some("not a url"));
        assert_eq!(embed_url(""), None);
    }
}

//! External clip references.
//!
//! A clip visual points at a third-party video and, optionally, at a sub-range
//! of that video. This module turns the loosely shaped `source` field into
//! something a rendering surface can use: the playable URL, the provider's
//! video id, an embed URL with a start offset, and a thumbnail. Nothing here
//! fetches or plays video.
//!
//! Every function is total. A source that cannot be resolved makes the visual
//! render as a plain concept, so a storyboard with broken clip references is
//! still fully viewable.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{ClipSource, Visual, VisualKind};
use crate::timecode::{self, RangeSeparator, Seconds};

/// Base of the derived embed URL; the provider id is appended as a path segment.
pub const EMBED_BASE: &str = "https://www.youtube.com/embed";

/// Returned by [`thumbnail_url`] when the URL has no recognisable provider id.
pub const PLACEHOLDER_THUMBNAIL: &str = "/placeholder.svg?height=180&width=320";

/// Long form `youtube.com/watch?v=ID` and short form `youtu.be/ID`.
static PROVIDER_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\n?#]+)")
        .expect("provider id pattern is valid")
});

/// The playable URL of a source: a bare string as-is, the `url` field of the
/// structured form, `None` for anything else (including empty URLs).
pub fn resolve_url(source: &ClipSource) -> Option<&str> {
    let url = match source {
        ClipSource::Url(url) => url.as_str(),
        ClipSource::Structured(s) => s.url.as_deref()?,
        ClipSource::Unrecognised(_) => return None,
    };
    (!url.trim().is_empty()).then_some(url)
}

/// Extracts the provider's video id from a known URL shape.
pub fn resolve_provider_id(url: &str) -> Option<&str> {
    PROVIDER_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Provider id plus the offset into the source video where playback starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedReference {
    pub provider_id: String,
    pub start_seconds: Seconds,
}

impl EmbedReference {
    /// `<embed-base>/<id>?start=<s>&autoplay=0&rel=0`
    pub fn embed_url(&self) -> String {
        format!(
            "{EMBED_BASE}/{}?start={}&autoplay=0&rel=0",
            self.provider_id, self.start_seconds
        )
    }
}

/// Builds the embed reference for `url`.
///
/// `source_sub_range` is the source video's range (`"HH:MM:SS - HH:MM:SS"`);
/// its first half becomes the start offset. Without it playback starts at 0.
pub fn embed_reference(url: &str, source_sub_range: Option<&str>) -> Option<EmbedReference> {
    let provider_id = resolve_provider_id(url)?;
    let start_seconds = source_sub_range
        .map(|range| timecode::range_start(range, RangeSeparator::Source))
        .unwrap_or(0);
    Some(EmbedReference {
        provider_id: provider_id.to_owned(),
        start_seconds,
    })
}

/// Best-effort thumbnail URL; never fails.
pub fn thumbnail_url(url: &str) -> String {
    match resolve_provider_id(url) {
        Some(id) => format!("https://img.youtube.com/vi/{id}/maxresdefault.jpg"),
        None => PLACEHOLDER_THUMBNAIL.to_owned(),
    }
}

/// Everything needed to draw a clip visual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipPresentation {
    /// The original playable URL (what copy-link and open-link use).
    pub url: String,
    pub embed: EmbedReference,
    pub thumbnail: String,
    /// The source video's sub-clip range, shown alongside the timeline range.
    pub source_range: Option<String>,
    pub platform: Option<String>,
}

/// How a visual is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    Clip(ClipPresentation),
    Concept,
}

impl Presentation {
    pub fn as_clip(&self) -> Option<&ClipPresentation> {
        match self {
            Presentation::Clip(clip) => Some(clip),
            Presentation::Concept => None,
        }
    }
}

/// Decides how `visual` is presented.
///
/// Only a `clip` visual whose source resolves to an embeddable URL is a clip;
/// every other visual, including clips with missing or unrecognised sources,
/// is presented as a concept.
pub fn present(visual: &Visual) -> Presentation {
    if visual.kind != VisualKind::Clip {
        return Presentation::Concept;
    }
    let Some(source) = visual.source.as_ref() else {
        return Presentation::Concept;
    };
    let Some(url) = resolve_url(source) else {
        return Presentation::Concept;
    };
    let source_range = source.source_time_range();
    match embed_reference(url, source_range) {
        Some(embed) => Presentation::Clip(ClipPresentation {
            url: url.to_owned(),
            thumbnail: thumbnail_url(url),
            embed,
            source_range: source_range.map(str::to_owned),
            platform: source.platform().map(str::to_owned),
        }),
        None => Presentation::Concept,
    }
}

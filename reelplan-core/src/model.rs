//! Storyboard data model: Storyboard → Segment → Visual.
//!
//! The model is immutable once built. Segments and visuals carry synthetic ids
//! assigned exactly once when the storyboard is constructed (from a payload or
//! through [`Storyboard::new`]). The ids are arena indices into the owning
//! storyboard, so they stay valid for as long as that storyboard lives, and all
//! derived UI state (disclosure, focus) is keyed by them.

use std::fmt;

use serde::Deserialize;

use crate::payload::{lenient_kind, lenient_opt_string, lenient_seq, lenient_string, lenient_strings};
use crate::timecode::{self, RangeSeparator, Seconds};

/// Total duration reported for a storyboard with no usable segments.
///
/// Keeps proportional layout free of divisions by zero.
pub const FALLBACK_TOTAL_SECONDS: Seconds = 60;

/// Minimum width fraction given to any segment on the timeline.
pub const MIN_WIDTH_FRACTION: f64 = 0.05;

/// Arena index of a segment within its storyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SegmentId(u32);

impl SegmentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Arena index of a visual: its segment plus its position inside that segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct VisualId {
    pub segment: SegmentId,
    index: u32,
}

impl VisualId {
    pub fn index(self) -> usize {
        self.index as usize
    }
}

/// Whether a visual references an external clip or is a textual concept note.
///
/// Anything other than `"clip"` or `"concept"` on the wire (including a missing
/// or non-string `type`) decodes as `Other`, which renders like a concept but is
/// not collapsed by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualKind {
    Clip,
    Concept,
    #[default]
    Other,
}

/// Structured clip source: the platform, the video URL, and the sub-clip of
/// the source video (`"HH:MM:SS - HH:MM:SS"`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct StructuredSource {
    #[serde(deserialize_with = "lenient_opt_string")]
    pub platform: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub time_range: Option<String>,
}

/// A visual's `source` field.
///
/// Producers emit either a bare URL string or a structured object. Any other
/// JSON shape is kept as `Unrecognised` so one odd visual cannot fail the
/// whole load; it simply never resolves to a URL. Every object decodes as
/// `Structured`, so a usable `url` survives mistyped sibling fields.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ClipSource {
    Url(String),
    Structured(StructuredSource),
    Unrecognised(serde_json::Value),
}

impl ClipSource {
    /// The source video's sub-clip range, present only in the structured form.
    pub fn source_time_range(&self) -> Option<&str> {
        match self {
            ClipSource::Structured(s) => s.time_range.as_deref().filter(|r| !r.is_empty()),
            _ => None,
        }
    }

    pub fn platform(&self) -> Option<&str> {
        match self {
            ClipSource::Structured(s) => s.platform.as_deref(),
            _ => None,
        }
    }
}

/// One on-screen element within a segment's time slice.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Visual {
    #[serde(skip)]
    id: VisualId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sub_time_range: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_kind")]
    pub kind: VisualKind,
    #[serde(default)]
    pub source: Option<ClipSource>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
}

impl Visual {
    /// A concept visual with no source.
    pub fn concept(sub_time_range: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: VisualId::default(),
            sub_time_range: sub_time_range.into(),
            kind: VisualKind::Concept,
            source: None,
            description: description.into(),
        }
    }

    /// A clip visual referencing `source`.
    pub fn clip(
        sub_time_range: impl Into<String>,
        source: ClipSource,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: VisualId::default(),
            sub_time_range: sub_time_range.into(),
            kind: VisualKind::Clip,
            source: Some(source),
            description: description.into(),
        }
    }

    pub fn id(&self) -> VisualId {
        self.id
    }

    pub fn is_concept(&self) -> bool {
        self.kind == VisualKind::Concept
    }
}

/// One time-boxed unit of the storyboard's timeline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Segment {
    #[serde(skip)]
    id: SegmentId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub time_range: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_seq")]
    visual: Vec<Visual>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub audio: String,
}

impl Segment {
    pub fn new(
        time_range: impl Into<String>,
        title: impl Into<String>,
        visuals: Vec<Visual>,
        audio: impl Into<String>,
    ) -> Self {
        Self {
            id: SegmentId::default(),
            time_range: time_range.into(),
            title: title.into(),
            visual: visuals,
            audio: audio.into(),
        }
    }

    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn visuals(&self) -> &[Visual] {
        &self.visual
    }

    /// Seconds covered by `time_range`; zero or negative when malformed.
    pub fn duration(&self) -> i64 {
        timecode::duration(&self.time_range)
    }

    /// End of `time_range` in seconds, `0` when malformed.
    pub fn end_seconds(&self) -> Seconds {
        match self.time_range.split_once(RangeSeparator::Timeline.as_str()) {
            Some((_, end)) => timecode::parse_lenient(end),
            None => 0,
        }
    }

    pub fn start_seconds(&self) -> Seconds {
        timecode::range_start(&self.time_range, RangeSeparator::Timeline)
    }
}

/// A complete storyboard as produced upstream.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Storyboard {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub goal: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub style: Vec<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    segments: Vec<Segment>,
}

impl Storyboard {
    /// Builds a storyboard and assigns segment and visual ids.
    pub fn new(
        title: impl Into<String>,
        goal: impl Into<String>,
        style: Vec<String>,
        segments: Vec<Segment>,
    ) -> Self {
        let mut storyboard = Self {
            title: title.into(),
            goal: goal.into(),
            style,
            segments,
        };
        storyboard.assign_ids();
        storyboard
    }

    /// Assigns arena ids in document order. Called once per construction path.
    pub(crate) fn assign_ids(&mut self) {
        for (si, segment) in self.segments.iter_mut().enumerate() {
            let segment_id = SegmentId(si as u32);
            segment.id = segment_id;
            for (vi, visual) in segment.visual.iter_mut().enumerate() {
                visual.id = VisualId {
                    segment: segment_id,
                    index: vi as u32,
                };
            }
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment> {
        self.segments.get(id.index())
    }

    pub fn visual(&self, id: VisualId) -> Option<&Visual> {
        self.segment(id.segment)?.visual.get(id.index())
    }

    /// Id of the segment at `position`, if any. Used to translate UI positions.
    pub fn segment_id_at(&self, position: usize) -> Option<SegmentId> {
        self.segments.get(position).map(Segment::id)
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// All visuals in document order.
    pub fn visuals(&self) -> impl Iterator<Item = &Visual> {
        self.segments.iter().flat_map(|s| s.visual.iter())
    }

    /// End time of the last segment.
    ///
    /// Falls back to [`FALLBACK_TOTAL_SECONDS`] when there are no segments or
    /// the last end does not parse to a positive value.
    pub fn total_duration(&self) -> Seconds {
        match self.segments.last().map(Segment::end_seconds) {
            Some(end) if end > 0 => end,
            _ => FALLBACK_TOTAL_SECONDS,
        }
    }

    /// Share of the timeline taken by `segment`, in `[0.05, 1.0]`.
    ///
    /// Very short (or degenerate) segments are floored at
    /// [`MIN_WIDTH_FRACTION`], so the fractions of a storyboard need not sum
    /// to exactly `1.0`.
    pub fn segment_width_fraction(&self, segment: &Segment) -> f64 {
        let total = f64::from(self.total_duration());
        let share = segment.duration() as f64 / total;
        share.clamp(MIN_WIDTH_FRACTION, 1.0)
    }

    /// Where `segment` starts along the whole timeline, in `[0.0, 1.0]`.
    pub fn segment_start_fraction(&self, segment: &Segment) -> f64 {
        timecode::position_fraction(segment.start_seconds(), 0, self.total_duration())
    }

    /// Width fractions of every segment in order.
    pub fn width_fractions(&self) -> Vec<f64> {
        self.segments
            .iter()
            .map(|s| self.segment_width_fraction(s))
            .collect()
    }
}

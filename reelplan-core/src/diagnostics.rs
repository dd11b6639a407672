//! Structured warnings about malformed producer data.
//!
//! The rendering path never fails on bad data: malformed times become zero
//! offsets and broken clip sources render as concepts. This module reports the
//! same problems explicitly so they can be logged and shown to the user instead
//! of disappearing silently. Rendering never depends on its output.

use std::fmt;

use crate::clip;
use crate::model::{SegmentId, Storyboard, VisualId, VisualKind};
use crate::timecode::{RangeSeparator, TimeRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
}

/// Where in the storyboard a problem was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Storyboard,
    Segment(SegmentId),
    Visual(VisualId),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Storyboard => write!(f, "storyboard"),
            Location::Segment(id) => write!(f, "segment {}", id.index() + 1),
            Location::Visual(id) => {
                write!(f, "segment {} visual {}", id.segment.index() + 1, id.index() + 1)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    NoSegments,
    MalformedSegmentRange { range: String },
    EmptySegmentRange { range: String },
    /// The segment does not start where the previous one ended.
    Discontinuity { previous_end: u32, start: u32 },
    MalformedVisualRange { range: String },
    VisualOutsideSegment { range: String, segment_range: String },
    ClipWithoutUrl,
    NonEmbeddableUrl { url: String },
    MalformedSourceRange { range: String },
    UnknownVisualType,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::NoSegments => write!(f, "storyboard has no segments"),
            DiagnosticKind::MalformedSegmentRange { range } => {
                write!(f, "time range {range:?} is not START-END")
            }
            DiagnosticKind::EmptySegmentRange { range } => {
                write!(f, "time range {range:?} does not end after it starts")
            }
            DiagnosticKind::Discontinuity {
                previous_end,
                start,
            } => {
                let what = if start > previous_end { "gap" } else { "overlap" };
                write!(
                    f,
                    "{what}: starts at {} but previous segment ends at {}",
                    crate::timecode::format(*start),
                    crate::timecode::format(*previous_end)
                )
            }
            DiagnosticKind::MalformedVisualRange { range } => {
                write!(f, "sub time range {range:?} is not START-END")
            }
            DiagnosticKind::VisualOutsideSegment {
                range,
                segment_range,
            } => write!(f, "sub time range {range} lies outside segment {segment_range}"),
            DiagnosticKind::ClipWithoutUrl => {
                write!(f, "clip has no usable source URL; shown as a concept")
            }
            DiagnosticKind::NonEmbeddableUrl { url } => {
                write!(f, "clip URL {url} is not embeddable; shown as a concept")
            }
            DiagnosticKind::MalformedSourceRange { range } => {
                write!(f, "source time range {range:?} is not HH:MM:SS - HH:MM:SS; playback starts at 0")
            }
            DiagnosticKind::UnknownVisualType => {
                write!(f, "visual type is neither clip nor concept; shown as a concept")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: Location,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.kind)
    }
}

/// Collects every data problem in `storyboard`, in document order.
pub fn diagnose(storyboard: &Storyboard) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let mut push = |severity, location, kind| {
        out.push(Diagnostic {
            severity,
            location,
            kind,
        })
    };

    if storyboard.is_empty() {
        push(Severity::Info, Location::Storyboard, DiagnosticKind::NoSegments);
    }

    let mut previous_end: Option<u32> = None;
    for segment in storyboard.segments() {
        let at = Location::Segment(segment.id());
        let segment_range = TimeRange::parse(&segment.time_range, RangeSeparator::Timeline);
        match &segment_range {
            Ok(range) => {
                if range.duration() <= 0 {
                    push(
                        Severity::Warning,
                        at,
                        DiagnosticKind::EmptySegmentRange {
                            range: segment.time_range.clone(),
                        },
                    );
                }
                if let Some(end) = previous_end {
                    if range.start != end {
                        push(
                            Severity::Info,
                            at,
                            DiagnosticKind::Discontinuity {
                                previous_end: end,
                                start: range.start,
                            },
                        );
                    }
                }
                previous_end = Some(range.end);
            }
            Err(_) => {
                push(
                    Severity::Warning,
                    at,
                    DiagnosticKind::MalformedSegmentRange {
                        range: segment.time_range.clone(),
                    },
                );
                previous_end = None;
            }
        }

        for visual in segment.visuals() {
            let at = Location::Visual(visual.id());
            match TimeRange::parse(&visual.sub_time_range, RangeSeparator::Timeline) {
                Ok(sub) => {
                    if let Ok(parent) = &segment_range {
                        if !parent.contains(&sub) {
                            push(
                                Severity::Info,
                                at,
                                DiagnosticKind::VisualOutsideSegment {
                                    range: visual.sub_time_range.clone(),
                                    segment_range: segment.time_range.clone(),
                                },
                            );
                        }
                    }
                }
                Err(_) => push(
                    Severity::Warning,
                    at,
                    DiagnosticKind::MalformedVisualRange {
                        range: visual.sub_time_range.clone(),
                    },
                ),
            }

            match visual.kind {
                VisualKind::Clip => {
                    let url = visual.source.as_ref().and_then(clip::resolve_url);
                    match url {
                        None => push(Severity::Warning, at, DiagnosticKind::ClipWithoutUrl),
                        Some(url) if clip::resolve_provider_id(url).is_none() => push(
                            Severity::Warning,
                            at,
                            DiagnosticKind::NonEmbeddableUrl {
                                url: url.to_owned(),
                            },
                        ),
                        Some(_) => {}
                    }
                    let source_range = visual.source.as_ref().and_then(|s| s.source_time_range());
                    if let Some(range) = source_range {
                        if TimeRange::parse(range, RangeSeparator::Source).is_err() {
                            push(
                                Severity::Warning,
                                at,
                                DiagnosticKind::MalformedSourceRange {
                                    range: range.to_owned(),
                                },
                            );
                        }
                    }
                }
                VisualKind::Concept => {}
                VisualKind::Other => {
                    push(Severity::Info, at, DiagnosticKind::UnknownVisualType)
                }
            }
        }
    }

    out
}

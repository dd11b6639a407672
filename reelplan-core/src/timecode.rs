//! Timecode parsing and formatting for storyboard ranges.
//!
//! Storyboard payloads carry two kinds of ranges:
//!
//! - timeline ranges such as `"0:03-0:10"` (segment `time_range`, visual
//!   `sub_time_range`), separated by a bare `-`;
//! - source sub-clip ranges such as `"00:16:14 - 00:16:36"`, separated by ` - `.
//!
//! Each side is either `M:SS` or `H:MM:SS`. The strict [`parse`] reports bad
//! input as a [`TimeCodeError`]; the rendering path uses [`parse_lenient`],
//! which maps malformed input to a zero offset so layout never fails.

use std::fmt;

use thiserror::Error;

/// Seconds from the start of a timeline or source video.
pub type Seconds = u32;

/// Errors produced by the strict timecode parsers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeCodeError {
    /// The string does not have two or three `:`-separated parts.
    #[error("timecode {input:?} must be M:SS or H:MM:SS")]
    Shape { input: String },
    /// One of the parts is not a non-negative integer.
    #[error("timecode {input:?} has a non-numeric component {part:?}")]
    Component { input: String, part: String },
    /// A range has no separator between start and end.
    #[error("time range {input:?} has no {separator:?} separator")]
    MissingSeparator {
        input: String,
        separator: &'static str,
    },
}

/// The separator used between the start and end of a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSeparator {
    /// `-`, used by segment and visual timeline ranges.
    Timeline,
    /// ` - `, used by the source video's sub-clip range.
    Source,
}

impl RangeSeparator {
    pub fn as_str(self) -> &'static str {
        match self {
            RangeSeparator::Timeline => "-",
            RangeSeparator::Source => " - ",
        }
    }
}

/// Parses `M:SS` or `H:MM:SS` into seconds.
///
/// Whitespace around each component is ignored, so `" 0:03"` and `"00:16:14 "`
/// both parse. Components are not range-checked (`"0:75"` is 75 seconds),
/// matching what producers emit in practice.
///
/// # Errors
///
/// Returns [`TimeCodeError::Shape`] for any other number of parts and
/// [`TimeCodeError::Component`] when a part is empty or not a decimal integer.
pub fn parse(input: &str) -> Result<Seconds, TimeCodeError> {
    let parts: Vec<&str> = input.split(':').collect();
    let component = |part: &str| -> Result<Seconds, TimeCodeError> {
        let trimmed = part.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeCodeError::Component {
                input: input.to_owned(),
                part: part.to_owned(),
            });
        }
        trimmed.parse::<Seconds>().map_err(|_| TimeCodeError::Component {
            input: input.to_owned(),
            part: part.to_owned(),
        })
    };

    match parts.as_slice() {
        [m, s] => Ok(component(m)?
            .saturating_mul(60)
            .saturating_add(component(s)?)),
        [h, m, s] => Ok(component(h)?
            .saturating_mul(3600)
            .saturating_add(component(m)?.saturating_mul(60))
            .saturating_add(component(s)?)),
        _ => Err(TimeCodeError::Shape {
            input: input.to_owned(),
        }),
    }
}

/// Rendering-path parse: malformed input degrades to `0`.
pub fn parse_lenient(input: &str) -> Seconds {
    parse(input).unwrap_or(0)
}

/// Formats seconds as `M:SS` below one hour and `H:MM:SS` from one hour on.
///
/// The output always parses back to the same value with [`parse`].
pub fn format(seconds: Seconds) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

/// Splits a range into its raw start and end halves.
///
/// Returns `None` when the separator does not occur. Only the first occurrence
/// is used, so `"0:00-0:03"` splits into `"0:00"` and `"0:03"`.
fn split_range(range: &str, separator: RangeSeparator) -> Option<(&str, &str)> {
    range.split_once(separator.as_str())
}

/// Seconds between the start and end of a timeline range (`START-END`).
///
/// Both ends are parsed leniently, so the result may be zero or negative for
/// malformed or inverted input. Callers treat non-positive durations as
/// degenerate.
pub fn duration(range: &str) -> i64 {
    match split_range(range, RangeSeparator::Timeline) {
        Some((start, end)) => i64::from(parse_lenient(end)) - i64::from(parse_lenient(start)),
        None => 0,
    }
}

/// Start offset of a range.
///
/// When the separator is absent the whole string is treated as the start,
/// which lets a bare `"00:16:14"` act as a source offset.
pub fn range_start(range: &str, separator: RangeSeparator) -> Seconds {
    let start = split_range(range, separator)
        .map(|(start, _)| start)
        .unwrap_or(range);
    parse_lenient(start)
}

/// Position of `at` within `[start, end]` as a fraction, clamped to `0.0..=1.0`.
///
/// Degenerate ranges (`end <= start`) report `0.0`.
pub fn position_fraction(at: Seconds, start: Seconds, end: Seconds) -> f64 {
    if end <= start {
        return 0.0;
    }
    let offset = f64::from(at.saturating_sub(start));
    (offset / f64::from(end - start)).clamp(0.0, 1.0)
}

/// A strictly parsed `START<sep>END` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Seconds,
    pub end: Seconds,
}

impl TimeRange {
    /// Parses a range with the given separator, rejecting malformed ends.
    ///
    /// # Errors
    ///
    /// Returns [`TimeCodeError::MissingSeparator`] when the separator is absent,
    /// otherwise the error from parsing whichever end is malformed.
    pub fn parse(range: &str, separator: RangeSeparator) -> Result<Self, TimeCodeError> {
        let (start, end) =
            split_range(range, separator).ok_or_else(|| TimeCodeError::MissingSeparator {
                input: range.to_owned(),
                separator: separator.as_str(),
            })?;
        Ok(Self {
            start: parse(start)?,
            end: parse(end)?,
        })
    }

    /// `end - start`, negative for inverted ranges.
    pub fn duration(&self) -> i64 {
        i64::from(self.end) - i64::from(self.start)
    }

    /// True when `other` lies entirely inside this range (inclusive ends).
    pub fn contains(&self, other: &TimeRange) -> bool {
        other.start >= self.start && other.end <= self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", format(self.start), format(self.end))
    }
}

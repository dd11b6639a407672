//! Timecode parsing, formatting and range arithmetic.

use reelplan_core::timecode::{self, RangeSeparator, TimeCodeError, TimeRange};

#[test]
fn parses_minutes_and_hours_forms() {
    assert_eq!(timecode::parse("0:03").unwrap(), 3);
    assert_eq!(timecode::parse("2:05").unwrap(), 125);
    assert_eq!(timecode::parse("00:16:14").unwrap(), 974);
    assert_eq!(timecode::parse(" 1:00:00 ").unwrap(), 3600);
}

#[test]
fn rejects_bad_shapes_and_components() {
    assert!(matches!(
        timecode::parse("42"),
        Err(TimeCodeError::Shape { .. })
    ));
    assert!(matches!(
        timecode::parse("1:2:3:4"),
        Err(TimeCodeError::Shape { .. })
    ));
    assert!(matches!(
        timecode::parse("a:10"),
        Err(TimeCodeError::Component { .. })
    ));
    assert!(matches!(
        timecode::parse("1:"),
        Err(TimeCodeError::Component { .. })
    ));
    assert!(matches!(
        timecode::parse("-1:00"),
        Err(TimeCodeError::Component { .. })
    ));
}

#[test]
fn lenient_parse_maps_garbage_to_zero() {
    assert_eq!(timecode::parse_lenient("soon"), 0);
    assert_eq!(timecode::parse_lenient(""), 0);
    assert_eq!(timecode::parse_lenient("0:45"), 45);
}

#[test]
fn format_round_trips_through_parse() {
    for seconds in [0, 1, 59, 60, 61, 599, 3599, 3600, 3661, 86_399, 360_000] {
        let text = timecode::format(seconds);
        assert_eq!(timecode::parse(&text).unwrap(), seconds, "via {text}");
    }
    assert_eq!(timecode::format(65), "1:05");
    assert_eq!(timecode::format(3725), "1:02:05");
}

#[test]
fn duration_of_timeline_ranges() {
    assert_eq!(timecode::duration("0:03-0:10"), 7);
    assert_eq!(timecode::duration("0:00-0:00"), 0);
    assert_eq!(timecode::duration("0:10-0:03"), -7);
    assert_eq!(timecode::duration("0:10"), 0);
    assert_eq!(timecode::duration("x-0:10"), 10);
}

#[test]
fn range_start_uses_whole_string_without_separator() {
    assert_eq!(
        timecode::range_start("00:16:14 - 00:16:36", RangeSeparator::Source),
        974
    );
    assert_eq!(timecode::range_start("00:16:14", RangeSeparator::Source), 974);
    assert_eq!(timecode::range_start("nonsense", RangeSeparator::Source), 0);
}

#[test]
fn strict_range_parse_reports_missing_separator() {
    let err = TimeRange::parse("0:03 0:10", RangeSeparator::Timeline).unwrap_err();
    assert!(matches!(err, TimeCodeError::MissingSeparator { separator: "-", .. }));

    let range = TimeRange::parse("00:16:14 - 00:16:36", RangeSeparator::Source).unwrap();
    assert_eq!(range, TimeRange { start: 974, end: 996 });
    assert_eq!(range.duration(), 22);
    assert_eq!(range.to_string(), "16:14-16:36");
}

#[test]
fn containment_is_inclusive() {
    let outer = TimeRange { start: 3, end: 10 };
    assert!(outer.contains(&TimeRange { start: 3, end: 10 }));
    assert!(outer.contains(&TimeRange { start: 4, end: 7 }));
    assert!(!outer.contains(&TimeRange { start: 2, end: 7 }));
    assert!(!outer.contains(&TimeRange { start: 4, end: 11 }));
}

#[test]
fn position_fraction_is_clamped() {
    assert_eq!(timecode::position_fraction(5, 0, 10), 0.5);
    assert_eq!(timecode::position_fraction(20, 0, 10), 1.0);
    assert_eq!(timecode::position_fraction(0, 5, 10), 0.0);
    assert_eq!(timecode::position_fraction(5, 10, 10), 0.0);
}

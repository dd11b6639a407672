//! Storyboard model: ids, total duration, width fractions, payload decoding
//! and data diagnostics.

use std::io::Write;

use reelplan_core::diagnostics::{self, DiagnosticKind, Location, Severity};
use reelplan_core::layout::{proportional_spans, CardStrip, ColumnSpan};
use reelplan_core::model::{FALLBACK_TOTAL_SECONDS, MIN_WIDTH_FRACTION};
use reelplan_core::{ClipSource, PayloadError, Segment, SegmentId, Storyboard, Visual, VisualKind};

fn two_segments() -> Storyboard {
    Storyboard::new(
        "Hooks",
        "Explain hooks",
        vec!["fast".into()],
        vec![
            Segment::new(
                "0:00-0:03",
                "Cold open",
                vec![Visual::concept("0:00-0:03", "Black screen, then a title card")],
                "Did you know?",
            ),
            Segment::new(
                "0:03-0:10",
                "Payoff",
                vec![
                    Visual::clip(
                        "0:03-0:07",
                        ClipSource::Url("https://youtu.be/G8MCrOg0j4o".into()),
                        "Reaction shot",
                    ),
                    Visual::concept("0:07-0:10", "Outro text"),
                ],
                "",
            ),
        ],
    )
}

#[test]
fn total_duration_is_end_of_last_segment() {
    let storyboard = two_segments();
    assert_eq!(storyboard.total_duration(), 10);

    let fractions = storyboard.width_fractions();
    assert!((fractions[0] - 0.3).abs() < 1e-9);
    assert!((fractions[1] - 0.7).abs() < 1e-9);
}

#[test]
fn empty_storyboard_uses_fallback_total() {
    let storyboard = Storyboard::default();
    assert!(storyboard.is_empty());
    assert_eq!(storyboard.total_duration(), FALLBACK_TOTAL_SECONDS);
    assert_eq!(storyboard.total_duration(), 60);
}

#[test]
fn unparsable_last_end_uses_fallback_total() {
    let storyboard = Storyboard::new(
        "",
        "",
        vec![],
        vec![Segment::new("0:00-later", "", vec![], "")],
    );
    assert_eq!(storyboard.total_duration(), 60);
}

#[test]
fn segment_start_fraction_is_position_on_the_timeline() {
    let storyboard = two_segments();
    let segments = storyboard.segments();
    assert_eq!(storyboard.segment_start_fraction(&segments[0]), 0.0);
    assert!((storyboard.segment_start_fraction(&segments[1]) - 0.3).abs() < 1e-9);
}

#[test]
fn width_fraction_never_drops_below_floor() {
    let storyboard = Storyboard::new(
        "",
        "",
        vec![],
        vec![
            Segment::new("0:00-0:01", "tiny", vec![], ""),
            Segment::new("0:01-0:01", "empty", vec![], ""),
            Segment::new("0:05-0:02", "inverted", vec![], ""),
            Segment::new("garbage", "malformed", vec![], ""),
            Segment::new("0:02-10:00", "long", vec![], ""),
        ],
    );
    for fraction in storyboard.width_fractions() {
        assert!(fraction >= MIN_WIDTH_FRACTION, "{fraction}");
        assert!(fraction <= 1.0, "{fraction}");
    }
}

#[test]
fn ids_follow_document_order() {
    let storyboard = two_segments();
    let ids: Vec<_> = storyboard.segments().iter().map(Segment::id).collect();
    assert_eq!(ids[0].index(), 0);
    assert_eq!(ids[1].index(), 1);
    assert_eq!(storyboard.segment_id_at(1), Some(ids[1]));
    assert_eq!(storyboard.segment_id_at(2), None);

    let second = &storyboard.segments()[1].visuals()[1];
    assert_eq!(second.id().segment, ids[1]);
    assert_eq!(second.id().index(), 1);
    assert_eq!(storyboard.visual(second.id()), Some(second));
    assert_eq!(storyboard.visuals().count(), 3);
}

#[test]
fn decodes_structured_and_bare_sources() {
    let json = r#"{
        "title": "T",
        "goal": "G",
        "style": ["calm", 3, null],
        "segments": [{
            "time_range": "0:00-0:05",
            "title": "One",
            "visual": [
                {"sub_time_range": "0:00-0:02", "type": "clip",
                 "source": {"platform": "youtube",
                            "url": "https://www.youtube.com/watch?v=G8MCrOg0j4o",
                            "time_range": "00:16:14 - 00:16:36"},
                 "description": "Structured"},
                {"sub_time_range": "0:02-0:05", "type": "clip",
                 "source": "https://youtu.be/abc123", "description": "Bare"}
            ],
            "audio": "VO"
        }]
    }"#;
    let storyboard = Storyboard::from_json_str(json).unwrap();
    assert_eq!(storyboard.style, vec!["calm".to_string()]);

    let visuals = storyboard.segments()[0].visuals();
    assert_eq!(visuals[0].kind, VisualKind::Clip);
    let source = visuals[0].source.as_ref().unwrap();
    assert_eq!(source.platform(), Some("youtube"));
    assert_eq!(source.source_time_range(), Some("00:16:14 - 00:16:36"));
    assert_eq!(
        visuals[1].source,
        Some(ClipSource::Url("https://youtu.be/abc123".into()))
    );
}

#[test]
fn decoding_tolerates_missing_and_mistyped_fields() {
    let json = r#"{
        "title": null,
        "segments": [
            {"time_range": 5, "visual": null},
            {"visual": [{"type": 7, "source": 12, "description": ["x"]}]}
        ]
    }"#;
    let storyboard = Storyboard::from_json_str(json).unwrap();
    assert_eq!(storyboard.title, "");
    assert!(storyboard.style.is_empty());
    assert_eq!(storyboard.segments().len(), 2);
    assert_eq!(storyboard.segments()[0].time_range, "5");
    assert!(storyboard.segments()[0].visuals().is_empty());

    let odd = &storyboard.segments()[1].visuals()[0];
    assert_eq!(odd.kind, VisualKind::Other);
    assert!(matches!(odd.source, Some(ClipSource::Unrecognised(_))));
    assert_eq!(odd.description, "");
}

#[test]
fn rejects_non_object_payloads() {
    assert!(matches!(
        Storyboard::from_json_str("[1, 2]"),
        Err(PayloadError::NotAnObject { found: "an array" })
    ));
    assert!(matches!(
        Storyboard::from_json_str("{not json"),
        Err(PayloadError::Syntax(_))
    ));
}

#[test]
fn undecodable_list_entries_are_dropped() {
    let storyboard = Storyboard::from_json_str(r#"{"segments": [5]}"#).unwrap();
    assert!(storyboard.is_empty());
    assert_eq!(storyboard.total_duration(), FALLBACK_TOTAL_SECONDS);

    let storyboard = Storyboard::from_json_str(r#"{"segments": "none"}"#).unwrap();
    assert!(storyboard.is_empty());

    let storyboard = Storyboard::from_json_str(
        r#"{"segments": [true, {"time_range": "0:00-0:08"}, null]}"#,
    )
    .unwrap();
    assert_eq!(storyboard.segments().len(), 1);
    assert_eq!(storyboard.segments()[0].id(), SegmentId::default());
    assert_eq!(storyboard.total_duration(), 8);
}

#[test]
fn mistyped_visual_lists_become_empty() {
    let storyboard =
        Storyboard::from_json_str(r#"{"segments": [{"visual": "none"}]}"#).unwrap();
    assert!(storyboard.segments()[0].visuals().is_empty());

    let storyboard = Storyboard::from_json_str(
        r#"{"segments": [{"visual": [null, {"type": "concept", "description": "kept"}]}]}"#,
    )
    .unwrap();
    let visuals = storyboard.segments()[0].visuals();
    assert_eq!(visuals.len(), 1);
    assert_eq!(visuals[0].description, "kept");
    assert_eq!(visuals[0].id().index(), 0);
}

#[test]
fn structured_source_keeps_url_despite_mistyped_fields() {
    let json = r#"{"segments": [{"time_range": "0:00-0:05", "visual": [{
        "type": "clip",
        "source": {"platform": 3, "url": "https://youtu.be/G8MCrOg0j4o", "time_range": [1, 2]}
    }]}]}"#;
    let storyboard = Storyboard::from_json_str(json).unwrap();
    let visual = &storyboard.segments()[0].visuals()[0];
    let source = visual.source.as_ref().unwrap();
    assert!(matches!(source, ClipSource::Structured(_)));
    assert_eq!(source.platform(), Some("3"));
    assert_eq!(source.source_time_range(), None);
    assert!(reelplan_core::clip::present(visual).as_clip().is_some());
}

#[test]
fn reads_payload_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"title": "From disk", "segments": [{{"time_range": "0:00-0:04"}}]}}"#
    )
    .unwrap();
    let storyboard = Storyboard::from_path(file.path()).unwrap();
    assert_eq!(storyboard.title, "From disk");
    assert_eq!(storyboard.total_duration(), 4);

    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        Storyboard::from_path(&missing),
        Err(PayloadError::Io { .. })
    ));
}

#[test]
fn diagnostics_report_data_problems() {
    let storyboard = Storyboard::new(
        "",
        "",
        vec![],
        vec![
            Segment::new(
                "0:00-0:05",
                "",
                vec![
                    Visual::clip("0:00-0:02", ClipSource::Url("https://vimeo.com/1".into()), ""),
                    Visual::concept("0:04-0:09", ""),
                ],
                "",
            ),
            Segment::new("0:07-0:07", "", vec![Visual::concept("soon", "")], ""),
        ],
    );
    let found = diagnostics::diagnose(&storyboard);
    let kinds: Vec<_> = found.iter().map(|d| &d.kind).collect();

    assert!(kinds.contains(&&DiagnosticKind::NonEmbeddableUrl {
        url: "https://vimeo.com/1".into()
    }));
    assert!(kinds.contains(&&DiagnosticKind::VisualOutsideSegment {
        range: "0:04-0:09".into(),
        segment_range: "0:00-0:05".into()
    }));
    assert!(kinds.contains(&&DiagnosticKind::Discontinuity {
        previous_end: 5,
        start: 7
    }));
    assert!(kinds.contains(&&DiagnosticKind::EmptySegmentRange {
        range: "0:07-0:07".into()
    }));
    assert!(kinds.contains(&&DiagnosticKind::MalformedVisualRange {
        range: "soon".into()
    }));

    let bad_url = found
        .iter()
        .find(|d| matches!(d.kind, DiagnosticKind::NonEmbeddableUrl { .. }))
        .unwrap();
    assert_eq!(bad_url.severity, Severity::Warning);
    assert_eq!(bad_url.location.to_string(), "segment 1 visual 1");
}

#[test]
fn diagnostics_are_quiet_for_clean_data() {
    assert!(diagnostics::diagnose(&two_segments()).is_empty());

    let empty = diagnostics::diagnose(&Storyboard::default());
    assert_eq!(empty.len(), 1);
    assert_eq!(empty[0].location, Location::Storyboard);
    assert_eq!(empty[0].kind, DiagnosticKind::NoSegments);
}

#[test]
fn proportional_spans_fill_without_overflow() {
    let spans = proportional_spans(&[0.3, 0.7], 100);
    assert_eq!(
        spans,
        vec![ColumnSpan { x: 0, width: 30 }, ColumnSpan { x: 30, width: 70 }]
    );

    let crowded = proportional_spans(&[0.05, 0.05, 1.0], 20);
    assert_eq!(crowded[0], ColumnSpan { x: 0, width: 1 });
    assert_eq!(crowded[1], ColumnSpan { x: 1, width: 1 });
    assert_eq!(crowded[2], ColumnSpan { x: 2, width: 18 });
    assert!(crowded.iter().all(|s| s.end() <= 20));
}

#[test]
fn card_strip_hit_testing_and_reveal() {
    let strip = CardStrip::new(10, 2);
    assert_eq!(strip.extent(0), 0);
    assert_eq!(strip.extent(3), 34);
    assert_eq!(strip.card_x(2), 24);

    assert_eq!(strip.card_at(0, 3), Some(0));
    assert_eq!(strip.card_at(10, 3), None);
    assert_eq!(strip.card_at(12, 3), Some(1));
    assert_eq!(strip.card_at(40, 3), None);

    assert_eq!(strip.reveal_offset(2, 0, 20), 14);
    assert_eq!(strip.reveal_offset(0, 14, 20), 0);
    assert_eq!(strip.reveal_offset(1, 5, 20), 5);
}

#[test]
fn segment_ids_display_as_indices() {
    let storyboard = two_segments();
    let id: SegmentId = storyboard.segments()[1].id();
    assert_eq!(id.to_string(), "1");
}

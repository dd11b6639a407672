//! Interaction state: concept disclosure, focus, the scroll affordance and the
//! session store that ties them to one storyboard.

use reelplan_core::scroll::{ScrollBehavior, ScrollCommand, ScrollViewport, ViewportSource};
use reelplan_core::{
    ClipSource, ConceptDisclosureState, DisclosureKey, FocusState, ScrollAffordance,
    ScrollDirection, ScrollGeometry, ScrollOptions, Segment, SessionMsg, Storyboard,
    StoryboardSession, Visual,
};

fn storyboard() -> Storyboard {
    Storyboard::new(
        "Demo",
        "",
        vec![],
        vec![
            Segment::new(
                "0:00-0:04",
                "Intro",
                vec![
                    Visual::concept("0:00-0:02", "Wide establishing shot"),
                    Visual::clip(
                        "0:02-0:04",
                        ClipSource::Url("https://www.youtube.com/watch?v=G8MCrOg0j4o".into()),
                        "Clip",
                    ),
                ],
                "",
            ),
            Segment::new(
                "0:04-0:09",
                "Body",
                vec![Visual::concept("0:04-0:09", "Diagram")],
                "",
            ),
        ],
    )
}

/// Records commands instead of scrolling anything.
#[derive(Default)]
struct RecordingViewport {
    commands: Vec<ScrollCommand>,
}

impl ScrollViewport for RecordingViewport {
    fn scroll_by(&mut self, command: ScrollCommand) {
        self.commands.push(command);
    }
}

#[test]
fn concepts_start_collapsed_and_clips_do_not() {
    let storyboard = storyboard();
    let state = ConceptDisclosureState::seed_defaults(&storyboard);
    let first = storyboard.segments()[0].visuals();
    assert!(state.is_collapsed(DisclosureKey::from(first[0].id())));
    assert!(!state.is_collapsed(DisclosureKey::from(first[1].id())));
    assert_eq!(state.len(), 2);
}

#[test]
fn toggling_twice_restores_state_and_leaves_other_keys_alone() {
    let storyboard = storyboard();
    let mut state = ConceptDisclosureState::seed_defaults(&storyboard);
    let original = state.clone();
    let target = DisclosureKey::from(storyboard.segments()[0].visuals()[0].id());
    let other = DisclosureKey::from(storyboard.segments()[1].visuals()[0].id());

    state.toggle(target);
    assert!(!state.is_collapsed(target));
    assert!(state.is_collapsed(other));

    state.toggle(target);
    assert_eq!(state, original);
}

#[test]
fn disclosure_key_displays_as_composite() {
    let storyboard = storyboard();
    let key = DisclosureKey::from(storyboard.segments()[1].visuals()[0].id());
    assert_eq!(key.to_string(), "1-0");
    assert_eq!(key.segment(), storyboard.segments()[1].id());
}

#[test]
fn focus_toggles_on_repeat_and_switches_between_segments() {
    let storyboard = storyboard();
    let a = storyboard.segments()[0].id();
    let b = storyboard.segments()[1].id();

    let mut focus = FocusState::default();
    focus.click(a);
    assert_eq!(focus, FocusState::Focused(a));
    focus.click(a);
    assert_eq!(focus, FocusState::Unfocused);

    focus.click(a);
    focus.click(b);
    assert_eq!(focus, FocusState::Focused(b));
    assert!(focus.is_focused(b));

    focus.close();
    assert_eq!(focus.focused(), None);
    focus.click(b);
    focus.reset();
    assert_eq!(focus, FocusState::Unfocused);
}

#[test]
fn scroll_edges() {
    assert!(!ScrollGeometry::new(0.0, 800.0, 800.0).can_scroll_right());
    assert!(!ScrollGeometry::new(0.0, 800.0, 800.0).can_scroll_left());
    assert!(ScrollGeometry::new(0.0, 1200.0, 800.0).can_scroll_right());
    assert!(!ScrollGeometry::new(399.5, 1200.0, 800.0).can_scroll_right());
    assert!(ScrollGeometry::new(1.0, 1200.0, 800.0).can_scroll_left());
    assert_eq!(ScrollGeometry::new(0.0, 500.0, 800.0).max_offset(), 0.0);
}

#[test]
fn affordance_only_listens_while_mounted() {
    let mut scroll = ScrollAffordance::default();
    assert!(!scroll.is_mounted());
    assert!(!scroll.on_scroll(ScrollGeometry::new(10.0, 1200.0, 800.0)));
    assert!(!scroll.can_scroll_left());

    scroll.mount(ScrollGeometry::new(0.0, 1200.0, 800.0));
    assert!(scroll.is_subscribed(ViewportSource::Scroll));
    assert!(scroll.is_subscribed(ViewportSource::Resize));
    assert!(!scroll.can_scroll_left());
    assert!(scroll.can_scroll_right());

    assert!(scroll.on_scroll(ScrollGeometry::new(400.0, 1200.0, 800.0)));
    assert!(scroll.can_scroll_left());
    assert!(!scroll.can_scroll_right());

    assert!(scroll.on_resize(ScrollGeometry::new(400.0, 1200.0, 1200.0)));
    assert!(!scroll.can_scroll_right());

    scroll.unmount();
    assert!(!scroll.is_subscribed(ViewportSource::Scroll));
    assert!(!scroll.is_subscribed(ViewportSource::Resize));
    assert!(!scroll.on_resize(ScrollGeometry::new(0.0, 2000.0, 100.0)));
    assert!(!scroll.can_scroll_right());
    assert_eq!(scroll.geometry(), None);
}

#[test]
fn scroll_commands_use_configured_step_and_behavior() {
    let scroll = ScrollAffordance::default();
    let mut viewport = RecordingViewport::default();
    scroll.scroll_by(&mut viewport, ScrollDirection::Right);
    scroll.scroll_by(&mut viewport, ScrollDirection::Left);
    assert_eq!(
        viewport.commands,
        vec![
            ScrollCommand {
                delta: 400.0,
                behavior: ScrollBehavior::Smooth
            },
            ScrollCommand {
                delta: -400.0,
                behavior: ScrollBehavior::Smooth
            },
        ]
    );

    let instant = ScrollAffordance::new(ScrollOptions {
        step: 12.0,
        smooth: false,
    });
    let mut viewport = RecordingViewport::default();
    instant.scroll_by(&mut viewport, ScrollDirection::Left);
    assert_eq!(viewport.commands[0].delta, -12.0);
    assert_eq!(viewport.commands[0].behavior, ScrollBehavior::Instant);
}

#[test]
fn session_applies_messages() {
    let mut session = StoryboardSession::new(storyboard(), ScrollOptions::default());
    let body = session.storyboard().segments()[1].id();
    let concept = session.storyboard().segments()[0].visuals()[0].id();

    assert!(session.is_collapsed(concept));
    assert!(session.apply(SessionMsg::ToggleConcept(concept.into())));
    assert!(!session.is_collapsed(concept));

    assert!(session.apply(SessionMsg::SelectSegment(body)));
    assert_eq!(session.focused_segment().map(|s| s.title.as_str()), Some("Body"));
    assert!(session.apply(SessionMsg::CloseFocus));
    assert!(!session.apply(SessionMsg::CloseFocus));
    assert_eq!(session.focus(), FocusState::Unfocused);

    assert!(!session.apply(SessionMsg::ViewportScrolled(ScrollGeometry::new(
        10.0, 1200.0, 800.0
    ))));
    assert!(session.apply(SessionMsg::Mount(ScrollGeometry::new(0.0, 1200.0, 800.0))));
    assert!(session.scroll().can_scroll_right());
    assert!(session.apply(SessionMsg::Unmount));
    assert!(!session.scroll().is_mounted());
}

#[test]
fn session_ignores_unknown_ids() {
    let other = Storyboard::new(
        "",
        "",
        vec![],
        (0..5)
            .map(|_| Segment::new("0:00-0:01", "", vec![Visual::concept("", ""); 3], ""))
            .collect(),
    );
    let foreign_segment = other.segments()[4].id();
    let foreign_visual = other.segments()[4].visuals()[2].id();

    let mut session = StoryboardSession::new(storyboard(), ScrollOptions::default());
    assert!(!session.apply(SessionMsg::SelectSegment(foreign_segment)));
    assert!(!session.apply(SessionMsg::ToggleConcept(foreign_visual.into())));
    assert_eq!(session.focus(), FocusState::Unfocused);
}

#[test]
fn clip_url_only_for_clip_presentations() {
    let session = StoryboardSession::new(storyboard(), ScrollOptions::default());
    let visuals = session.storyboard().segments()[0].visuals();
    assert_eq!(
        session.clip_url(visuals[1].id()).as_deref(),
        Some("https://www.youtube.com/watch?v=G8MCrOg0j4o")
    );
    assert_eq!(session.clip_url(visuals[0].id()), None);
    assert!(session.presentation(&visuals[1]).as_clip().is_some());
}

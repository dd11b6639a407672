//! Per-storyboard UI state store.
//!
//! A [`StoryboardSession`] owns one loaded storyboard together with all state
//! derived from it: the concept disclosure set, the focus selection and the
//! scroll affordance. It is the single writer of that state; callers describe
//! what happened with a [`SessionMsg`] and the session applies it. Dropping a
//! session unmounts its scroll affordance, so replacing a storyboard never
//! leaves event subscriptions behind.

use crate::clip::{self, Presentation};
use crate::diagnostics::{self, Diagnostic, Severity};
use crate::disclosure::{ConceptDisclosureState, DisclosureKey};
use crate::focus::FocusState;
use crate::model::{Segment, SegmentId, Storyboard, Visual, VisualId};
use crate::scroll::{
    ScrollAffordance, ScrollDirection, ScrollGeometry, ScrollOptions, ScrollViewport,
};

/// State transitions a session understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionMsg {
    /// A segment card was clicked (focus toggles on repeat).
    SelectSegment(SegmentId),
    /// The focus overlay's close control was used.
    CloseFocus,
    ToggleConcept(DisclosureKey),
    /// The timeline viewport was laid out for the first time.
    Mount(ScrollGeometry),
    /// The timeline viewport reported a new scroll offset.
    ViewportScrolled(ScrollGeometry),
    /// The window was resized.
    ViewportResized(ScrollGeometry),
    /// The timeline view is going away.
    Unmount,
}

#[derive(Debug)]
pub struct StoryboardSession {
    storyboard: Storyboard,
    disclosure: ConceptDisclosureState,
    focus: FocusState,
    scroll: ScrollAffordance,
    diagnostics: Vec<Diagnostic>,
}

impl StoryboardSession {
    /// Starts a session: concepts collapsed, nothing focused, scroll
    /// affordance created but not yet mounted.
    pub fn new(storyboard: Storyboard, scroll_options: ScrollOptions) -> Self {
        let diagnostics = diagnostics::diagnose(&storyboard);
        for diagnostic in &diagnostics {
            match diagnostic.severity {
                Severity::Warning => tracing::warn!(%diagnostic, "storyboard data problem"),
                Severity::Info => tracing::info!(%diagnostic, "storyboard data note"),
            }
        }
        Self {
            disclosure: ConceptDisclosureState::seed_defaults(&storyboard),
            focus: FocusState::default(),
            scroll: ScrollAffordance::new(scroll_options),
            diagnostics,
            storyboard,
        }
    }

    /// Applies one message. Returns `true` if any state changed.
    pub fn apply(&mut self, msg: SessionMsg) -> bool {
        match msg {
            SessionMsg::SelectSegment(id) => {
                if self.storyboard.segment(id).is_none() {
                    return false;
                }
                self.focus.click(id);
                tracing::debug!(segment = %id, focus = ?self.focus, "segment clicked");
                true
            }
            SessionMsg::CloseFocus => {
                let was_focused = self.focus.focused().is_some();
                self.focus.close();
                was_focused
            }
            SessionMsg::ToggleConcept(key) => {
                if self.storyboard.visual(key.visual()).is_none() {
                    return false;
                }
                self.disclosure.toggle(key);
                true
            }
            SessionMsg::Mount(geometry) => {
                self.scroll.mount(geometry);
                true
            }
            SessionMsg::ViewportScrolled(geometry) => self.scroll.on_scroll(geometry),
            SessionMsg::ViewportResized(geometry) => self.scroll.on_resize(geometry),
            SessionMsg::Unmount => {
                let was_mounted = self.scroll.is_mounted();
                self.scroll.unmount();
                was_mounted
            }
        }
    }

    /// Issues a one-step scroll command to `viewport`.
    pub fn scroll_by<V: ScrollViewport + ?Sized>(&self, viewport: &mut V, direction: ScrollDirection) {
        self.scroll.scroll_by(viewport, direction);
    }

    pub fn storyboard(&self) -> &Storyboard {
        &self.storyboard
    }

    pub fn focus(&self) -> FocusState {
        self.focus
    }

    /// The focused segment, if the overlay is open.
    pub fn focused_segment(&self) -> Option<&Segment> {
        self.focus.focused().and_then(|id| self.storyboard.segment(id))
    }

    pub fn disclosure(&self) -> &ConceptDisclosureState {
        &self.disclosure
    }

    pub fn is_collapsed(&self, id: VisualId) -> bool {
        self.disclosure.is_collapsed(DisclosureKey::from(id))
    }

    pub fn scroll(&self) -> &ScrollAffordance {
        &self.scroll
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Presentation of a visual, resolved on demand.
    pub fn presentation(&self, visual: &Visual) -> Presentation {
        clip::present(visual)
    }

    /// URL for copy/open actions: only clip presentations have one.
    pub fn clip_url(&self, id: VisualId) -> Option<String> {
        let visual = self.storyboard.visual(id)?;
        match clip::present(visual) {
            Presentation::Clip(clip) => Some(clip.url),
            Presentation::Concept => None,
        }
    }
}

impl Drop for StoryboardSession {
    fn drop(&mut self) {
        self.scroll.unmount();
    }
}

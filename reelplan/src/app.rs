//! Central application state for reelplan.
//!
//! `AppState` owns the plan (and through it the loaded storyboard session),
//! the terminal-side timeline viewport, cursors, overlay scroll offsets and the
//! status line. No ratatui rendering lives here: the render module reads this
//! state and caches layout rects back into it, and the keybinding dispatcher
//! mutates it.

use std::path::PathBuf;

use crossbeam_channel::Sender;
use ratatui::layout::Rect;
use reelplan_core::clip;
use reelplan_core::layout::CardStrip;
use reelplan_core::scroll::{ScrollBehavior, ScrollCommand, ScrollViewport};
use reelplan_core::{
    CompletionOutcome, PlanState, Presentation, ScrollDirection, ScrollGeometry, SegmentId,
    SessionMsg, StoryboardSession, Visual, VisualId,
};

use crate::config::TimelineConfig;
use crate::platform::{self, Clipboard};
use crate::producer::types::{LoadError, LoadRequest, LoadResponse};

/// How long a status message stays up, in 250 ms ticks.
const STATUS_TICKS: u8 = 16;

/// Which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigation and commands.
    #[default]
    Normal,
    /// Typing the plan topic.
    Insert,
    /// Help overlay above everything else.
    HelpOverlay,
    /// Storyboard data problems overlay.
    Diagnostics,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    ticks_left: u8,
}

/// The horizontally scrolling card strip as the terminal sees it.
///
/// Smooth scroll commands set a target that [`TimelineViewport::step`] moves
/// toward one render frame at a time; instant commands jump directly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimelineViewport {
    offset: f32,
    target: f32,
    extent: f32,
    width: f32,
}

impl TimelineViewport {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// First visible content column.
    pub fn offset_columns(&self) -> u32 {
        self.offset.round().max(0.0) as u32
    }

    pub fn geometry(&self) -> ScrollGeometry {
        ScrollGeometry::new(self.offset, self.extent, self.width)
    }

    fn max_offset(&self) -> f32 {
        self.geometry().max_offset()
    }

    /// Updates content and viewport widths, clamping the offset.
    /// Returns `true` if anything changed.
    pub fn set_bounds(&mut self, extent: f32, width: f32) -> bool {
        if self.extent == extent && self.width == width {
            return false;
        }
        self.extent = extent;
        self.width = width;
        let max = self.max_offset();
        self.offset = self.offset.min(max);
        self.target = self.target.min(max);
        true
    }

    /// Moves toward `x` (clamped) with the given behaviour.
    pub fn scroll_to(&mut self, x: f32, behavior: ScrollBehavior) {
        self.target = x.clamp(0.0, self.max_offset());
        if behavior == ScrollBehavior::Instant {
            self.offset = self.target;
        }
    }

    /// Advances one animation frame. Returns `true` if the offset moved.
    pub fn step(&mut self) -> bool {
        let remaining = self.target - self.offset;
        if remaining == 0.0 {
            return false;
        }
        let stride = (remaining.abs() * 0.35).ceil().max(1.0);
        if remaining.abs() <= stride {
            self.offset = self.target;
        } else {
            self.offset += stride * remaining.signum();
        }
        true
    }
}

impl ScrollViewport for TimelineViewport {
    fn scroll_by(&mut self, command: ScrollCommand) {
        self.scroll_to(self.target + command.delta, command.behavior);
    }
}

/// All mutable UI state passed through every render cycle.
pub struct AppState {
    pub mode: Mode,
    pub plan: PlanState,
    /// Request side of the producer thread.
    pub load_tx: Option<Sender<LoadRequest>>,

    pub strip: CardStrip,
    pub timeline: TimelineViewport,
    /// Last offset reported to the session's scroll affordance.
    reported_offset: f32,
    /// Set by a terminal resize; consumed by the next layout pass.
    pending_resize: bool,

    /// Segment under the keyboard cursor.
    pub cursor: usize,
    /// Selected visual within the cursor segment (or the focused segment).
    pub visual_cursor: usize,

    pub help_scroll: u16,
    pub diagnostics_scroll: u16,
    pub focus_scroll: u16,

    /// Card area of the timeline after the last render, for mouse hits.
    pub timeline_rect: Rect,
    /// Scroll arrow gutters after the last render.
    pub arrow_rects: [Rect; 2],
    /// Focus overlay area after the last render.
    pub focus_rect: Rect,

    pub status: Option<StatusMessage>,
    /// Loading spinner frame, advanced on ticks.
    pub spinner: usize,
    pub log_path: Option<PathBuf>,
    clipboard: Box<dyn Clipboard>,
}

impl AppState {
    pub fn new(timeline: &TimelineConfig, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            mode: Mode::Insert,
            plan: PlanState::new(timeline.scroll_options()),
            load_tx: None,
            strip: CardStrip::new(timeline.card_width, timeline.gap),
            timeline: TimelineViewport::default(),
            reported_offset: 0.0,
            pending_resize: false,
            cursor: 0,
            visual_cursor: 0,
            help_scroll: 0,
            diagnostics_scroll: 0,
            focus_scroll: 0,
            timeline_rect: Rect::default(),
            arrow_rects: [Rect::default(); 2],
            focus_rect: Rect::default(),
            status: None,
            spinner: 0,
            log_path: None,
            clipboard,
        }
    }

    pub fn session(&self) -> Option<&StoryboardSession> {
        self.plan.session()
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
            ticks_left: STATUS_TICKS,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
            ticks_left: STATUS_TICKS * 2,
        });
    }

    /// Logic tick: spinner frame and status expiry.
    pub fn on_tick(&mut self) {
        if self.plan.is_loading() {
            self.spinner = self.spinner.wrapping_add(1);
        }
        if let Some(status) = &mut self.status {
            status.ticks_left = status.ticks_left.saturating_sub(1);
            if status.ticks_left == 0 {
                self.status = None;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Plan lifecycle
    // -----------------------------------------------------------------------

    /// Starts generating a storyboard for the current topic.
    pub fn generate(&mut self) {
        let Some(ticket) = self.plan.begin() else {
            if self.plan.is_loading() {
                self.set_status("A plan is already being generated");
            } else if self.plan.topic().trim().is_empty() {
                self.set_error("Enter a topic first");
            }
            return;
        };
        self.mode = Mode::Normal;
        let request = LoadRequest::from(&ticket);
        let sent = self
            .load_tx
            .as_ref()
            .is_some_and(|tx| tx.send(request).is_ok());
        if !sent {
            self.apply_load_response(LoadResponse {
                ticket_id: ticket.id,
                result: Err(LoadError::WorkerGone),
            });
        }
    }

    /// Applies a producer result. Stale results are ignored.
    pub fn apply_load_response(&mut self, response: LoadResponse) {
        match self.plan.complete(response.ticket_id, response.result) {
            CompletionOutcome::Loaded => {
                self.reset_view();
                self.mode = Mode::Normal;
                if let Some(session) = self.plan.session() {
                    let segments = session.storyboard().segments().len();
                    let problems = session.diagnostics().len();
                    if problems > 0 {
                        self.set_status(format!(
                            "Loaded {segments} segments, {problems} data notes (D to view)"
                        ));
                    } else {
                        self.set_status(format!("Loaded {segments} segments"));
                    }
                }
            }
            CompletionOutcome::Failed(message) => {
                self.mode = Mode::Insert;
                self.set_error(format!("Generation failed: {message}"));
            }
            CompletionOutcome::Stale => {}
        }
    }

    /// Discards the current plan, cancelling any in-flight load.
    pub fn new_plan(&mut self) {
        if let Some(session) = self.plan.session_mut() {
            session.apply(SessionMsg::Unmount);
        }
        self.plan.new_plan();
        self.reset_view();
        self.mode = Mode::Insert;
        self.status = None;
    }

    fn reset_view(&mut self) {
        self.timeline = TimelineViewport::default();
        self.reported_offset = 0.0;
        self.pending_resize = false;
        self.cursor = 0;
        self.visual_cursor = 0;
        self.focus_scroll = 0;
        self.diagnostics_scroll = 0;
    }

    // -----------------------------------------------------------------------
    // Timeline viewport
    // -----------------------------------------------------------------------

    /// Called by the renderer with the card area of this frame.
    ///
    /// Mounts the scroll affordance on the first layout after a load and
    /// reports new geometry after a terminal resize.
    pub fn layout_timeline(&mut self, cards: Rect) {
        self.timeline_rect = cards;
        let Some(session) = self.plan.session_mut() else {
            return;
        };
        let count = session.storyboard().segments().len();
        let extent = self.strip.extent(count) as f32;
        let changed = self.timeline.set_bounds(extent, f32::from(cards.width));
        let geometry = self.timeline.geometry();
        if !session.scroll().is_mounted() {
            session.apply(SessionMsg::Mount(geometry));
        } else if self.pending_resize || changed {
            session.apply(SessionMsg::ViewportResized(geometry));
        }
        self.pending_resize = false;
        self.reported_offset = self.timeline.offset();
    }

    pub fn on_resize(&mut self) {
        self.pending_resize = true;
    }

    /// Render tick: advances smooth scrolling and reports the new offset.
    pub fn on_render_tick(&mut self) {
        if self.timeline.step() {
            self.report_scroll();
        }
    }

    fn report_scroll(&mut self) {
        if self.timeline.offset() == self.reported_offset {
            return;
        }
        self.reported_offset = self.timeline.offset();
        let geometry = self.timeline.geometry();
        if let Some(session) = self.plan.session_mut() {
            session.apply(SessionMsg::ViewportScrolled(geometry));
        }
    }

    /// One scroll-left / scroll-right command.
    pub fn scroll(&mut self, direction: ScrollDirection) {
        if let Some(session) = self.plan.session() {
            session.scroll_by(&mut self.timeline, direction);
        }
        self.report_scroll();
    }

    fn scroll_behavior(&self) -> ScrollBehavior {
        let smooth = self
            .plan
            .session()
            .is_some_and(|s| s.scroll().options().smooth);
        if smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        }
    }

    fn reveal_cursor(&mut self) {
        let width = self.timeline.geometry().viewport.max(0.0) as u32;
        let current = self.timeline.target.round().max(0.0) as u32;
        let x = self.strip.reveal_offset(self.cursor, current, width);
        self.timeline.scroll_to(x as f32, self.scroll_behavior());
        self.report_scroll();
    }

    // -----------------------------------------------------------------------
    // Cursor and selection
    // -----------------------------------------------------------------------

    fn segment_count(&self) -> usize {
        self.session()
            .map_or(0, |s| s.storyboard().segments().len())
    }

    pub fn cursor_segment(&self) -> Option<SegmentId> {
        self.session()?.storyboard().segment_id_at(self.cursor)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let count = self.segment_count();
        if count == 0 {
            return;
        }
        let next = self.cursor.saturating_add_signed(delta).min(count - 1);
        self.set_cursor(next);
    }

    pub fn set_cursor(&mut self, index: usize) {
        let count = self.segment_count();
        if count == 0 {
            return;
        }
        let index = index.min(count - 1);
        if index != self.cursor {
            self.visual_cursor = 0;
        }
        self.cursor = index;
        self.reveal_cursor();
    }

    /// The segment whose visuals `j`/`k` walk: the focused one if the overlay
    /// is open, otherwise the one under the cursor.
    fn active_segment(&self) -> Option<SegmentId> {
        let session = self.session()?;
        session.focus().focused().or_else(|| self.cursor_segment())
    }

    pub fn selected_visual(&self) -> Option<&Visual> {
        let session = self.session()?;
        let segment = session.storyboard().segment(self.active_segment()?)?;
        segment.visuals().get(self.visual_cursor)
    }

    pub fn selected_visual_id(&self) -> Option<VisualId> {
        self.selected_visual().map(Visual::id)
    }

    pub fn move_visual(&mut self, delta: isize) {
        let count = self
            .active_segment()
            .and_then(|id| self.session()?.storyboard().segment(id))
            .map_or(0, |s| s.visuals().len());
        if count == 0 {
            return;
        }
        self.visual_cursor = self
            .visual_cursor
            .saturating_add_signed(delta)
            .min(count - 1);
    }

    /// Clicks the segment under the cursor: focus toggles on repeat.
    pub fn select_cursor_segment(&mut self) {
        if let Some(id) = self.cursor_segment() {
            self.select_segment(id);
        }
    }

    /// Clicks segment `id`, switching focus to it or closing it on repeat.
    pub fn select_segment(&mut self, id: SegmentId) {
        let Some(session) = self.plan.session_mut() else {
            return;
        };
        let previous = session.focus();
        if session.apply(SessionMsg::SelectSegment(id)) {
            if previous.focused() != Some(id) {
                self.visual_cursor = 0;
                self.focus_scroll = 0;
            }
            if self.cursor != id.index() {
                self.set_cursor(id.index());
            }
        }
    }

    pub fn close_focus(&mut self) {
        if let Some(session) = self.plan.session_mut() {
            session.apply(SessionMsg::CloseFocus);
        }
    }

    /// Moves the open focus overlay to the previous/next segment.
    pub fn cycle_focus(&mut self, delta: isize) {
        let Some(current) = self.session().and_then(|s| s.focus().focused()) else {
            return;
        };
        let count = self.segment_count();
        let next = current.index().saturating_add_signed(delta).min(count.saturating_sub(1));
        if next == current.index() {
            return;
        }
        if let Some(id) = self.session().and_then(|s| s.storyboard().segment_id_at(next)) {
            self.select_segment(id);
        }
    }

    /// Expands or collapses the selected visual if it is shown as a concept.
    pub fn toggle_selected_concept(&mut self) {
        let Some(visual) = self.selected_visual() else {
            return;
        };
        if matches!(clip::present(visual), Presentation::Clip(_)) {
            self.set_status("Clips are always expanded");
            return;
        }
        let id = visual.id();
        if let Some(session) = self.plan.session_mut() {
            session.apply(SessionMsg::ToggleConcept(id.into()));
        }
    }

    fn selected_clip_url(&self) -> Option<String> {
        let id = self.selected_visual_id()?;
        self.session()?.clip_url(id)
    }

    pub fn copy_selected_link(&mut self) {
        let Some(url) = self.selected_clip_url() else {
            self.set_error("Selected visual has no clip link");
            return;
        };
        match self.clipboard.copy(&url) {
            Ok(how) => {
                tracing::info!(%url, mechanism = how, "clip link copied");
                self.set_status(format!("Copied {url}"));
            }
            Err(err) => {
                tracing::warn!(error = %err, "clipboard write failed");
                self.set_error(format!("Copy failed: {err}"));
            }
        }
    }

    pub fn open_selected_link(&mut self) {
        let Some(url) = self.selected_clip_url() else {
            self.set_error("Selected visual has no clip link");
            return;
        };
        match platform::open_link(&url) {
            Ok(()) => self.set_status(format!("Opened {url}")),
            Err(err) => {
                tracing::warn!(%url, error = %err, "cannot open clip link");
                self.set_error(format!("Cannot open link: {err}"));
            }
        }
    }
}

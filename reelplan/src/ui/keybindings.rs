//! Keybinding dispatcher for reelplan.
//!
//! Translates raw crossterm key and mouse events into `AppState` operations
//! and returns a `KeyAction` telling the event loop whether to continue or
//! quit. Dispatch branches first on `state.mode`, then on whether the focus
//! overlay is open, so each context has its own handler.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use reelplan_core::{PlanPhase, ScrollDirection};

use crate::app::{AppState, Mode};

/// Control-flow signal returned from the dispatchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Dispatches a key event to the handler for the current mode.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::Diagnostics => handle_diagnostics(key, state),
        Mode::Insert => handle_insert(key, state),
        Mode::Normal if focus_open(state) => handle_focus(key, state),
        Mode::Normal => handle_normal(key, state),
    }
}

fn focus_open(state: &AppState) -> bool {
    state
        .session()
        .is_some_and(|s| s.focus().focused().is_some())
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

/// Keys shared by every Normal-mode screen, then the per-phase handlers.
fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            return KeyAction::Continue;
        }
        KeyCode::Char('n') => {
            state.new_plan();
            return KeyAction::Continue;
        }
        _ => {}
    }

    match state.plan.phase() {
        PlanPhase::Idle => handle_idle_key(key, state),
        PlanPhase::Loading(_) => {}
        PlanPhase::Loaded(_) => handle_timeline_key(key, state),
    }
    KeyAction::Continue
}

fn handle_idle_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('i') | KeyCode::Char('a') => state.mode = Mode::Insert,
        KeyCode::Enter => state.generate(),
        _ => {}
    }
}

fn handle_timeline_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => state.move_cursor(-1),
        KeyCode::Char('l') | KeyCode::Right => state.move_cursor(1),
        KeyCode::Char('g') | KeyCode::Home => state.set_cursor(0),
        KeyCode::Char('G') | KeyCode::End => state.set_cursor(usize::MAX),
        KeyCode::Char('[') | KeyCode::Char('H') => state.scroll(ScrollDirection::Left),
        KeyCode::Char(']') | KeyCode::Char('L') => state.scroll(ScrollDirection::Right),
        KeyCode::Char('j') | KeyCode::Down => state.move_visual(1),
        KeyCode::Char('k') | KeyCode::Up => state.move_visual(-1),
        KeyCode::Enter => state.select_cursor_segment(),
        KeyCode::Char(' ') => state.toggle_selected_concept(),
        KeyCode::Char('y') => state.copy_selected_link(),
        KeyCode::Char('o') => state.open_selected_link(),
        KeyCode::Char('D') => {
            state.diagnostics_scroll = 0;
            state.mode = Mode::Diagnostics;
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Focus overlay
// ---------------------------------------------------------------------------

fn handle_focus(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Esc | KeyCode::Char('x') => state.close_focus(),
        KeyCode::Enter => state.select_cursor_segment(),
        KeyCode::Char('h') | KeyCode::Left => state.cycle_focus(-1),
        KeyCode::Char('l') | KeyCode::Right => state.cycle_focus(1),
        KeyCode::Char('j') | KeyCode::Down => state.move_visual(1),
        KeyCode::Char('k') | KeyCode::Up => state.move_visual(-1),
        KeyCode::Char('J') => state.focus_scroll = state.focus_scroll.saturating_add(1),
        KeyCode::Char('K') => state.focus_scroll = state.focus_scroll.saturating_sub(1),
        KeyCode::Char(' ') => state.toggle_selected_concept(),
        KeyCode::Char('y') => state.copy_selected_link(),
        KeyCode::Char('o') => state.open_selected_link(),
        KeyCode::Char('n') => state.new_plan(),
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
        }
        KeyCode::Char('q') => return KeyAction::Quit,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Insert mode (topic editing)
// ---------------------------------------------------------------------------

fn handle_insert(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Esc => state.mode = Mode::Normal,
        KeyCode::Enter => state.generate(),
        KeyCode::Backspace => {
            if let Some(topic) = state.plan.topic_mut() {
                topic.pop();
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(topic) = state.plan.topic_mut() {
                topic.clear();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(topic) = state.plan.topic_mut() {
                topic.push(c);
            }
        }
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1)
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1)
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

fn handle_diagnostics(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.diagnostics_scroll = state.diagnostics_scroll.saturating_add(1)
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.diagnostics_scroll = state.diagnostics_scroll.saturating_sub(1)
        }
        KeyCode::Char('D') | KeyCode::Esc | KeyCode::Char('q') => state.mode = Mode::Normal,
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Handles clicks and the wheel.
///
/// On the timeline a left click on a card selects that segment and a click on
/// an arrow scrolls one step; the wheel scrolls horizontally. While the focus
/// overlay is open, clicks outside it close focus mode and the wheel scrolls
/// the details.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    let pos = Position { x: mouse.column, y: mouse.row };
    match state.mode {
        Mode::HelpOverlay => {
            match mouse.kind {
                MouseEventKind::ScrollUp => state.help_scroll = state.help_scroll.saturating_sub(3),
                MouseEventKind::ScrollDown => {
                    state.help_scroll = state.help_scroll.saturating_add(3)
                }
                _ => {}
            }
            return KeyAction::Continue;
        }
        Mode::Diagnostics | Mode::Insert => return KeyAction::Continue,
        Mode::Normal => {}
    }

    if focus_open(state) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if !state.focus_rect.contains(pos) => {
                state.close_focus()
            }
            MouseEventKind::ScrollUp => state.focus_scroll = state.focus_scroll.saturating_sub(3),
            MouseEventKind::ScrollDown => {
                state.focus_scroll = state.focus_scroll.saturating_add(3)
            }
            _ => {}
        }
        return KeyAction::Continue;
    }

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_timeline_click(pos, state),
        MouseEventKind::ScrollUp | MouseEventKind::ScrollLeft => {
            state.scroll(ScrollDirection::Left)
        }
        MouseEventKind::ScrollDown | MouseEventKind::ScrollRight => {
            state.scroll(ScrollDirection::Right)
        }
        _ => {}
    }
    KeyAction::Continue
}

fn handle_timeline_click(pos: Position, state: &mut AppState) {
    let [left_arrow, right_arrow] = state.arrow_rects;
    if left_arrow.contains(pos) {
        state.scroll(ScrollDirection::Left);
        return;
    }
    if right_arrow.contains(pos) {
        state.scroll(ScrollDirection::Right);
        return;
    }
    let rect = state.timeline_rect;
    if !rect.contains(pos) {
        return;
    }
    let Some(session) = state.session() else {
        return;
    };
    let count = session.storyboard().segments().len();
    let x = state.timeline.offset_columns() + u32::from(pos.x - rect.x);
    let Some(index) = state.strip.card_at(x, count) else {
        return;
    };
    if let Some(id) = session.storyboard().segment_id_at(index) {
        state.select_segment(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{loaded_state, MemoryClipboard};
    use crate::config::TimelineConfig;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn focused_index(state: &AppState) -> Option<usize> {
        state.session()?.focus().focused().map(|id| id.index())
    }

    #[test]
    fn typing_a_topic_and_pressing_enter_starts_a_load() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut state = AppState::new(&TimelineConfig::default(), Box::new(MemoryClipboard::default()));
        state.load_tx = Some(tx);
        for c in "bees".chars() {
            handle_key(key(KeyCode::Char(c)), &mut state);
        }
        handle_key(key(KeyCode::Backspace), &mut state);
        assert_eq!(state.plan.topic(), "bee");

        handle_key(key(KeyCode::Enter), &mut state);
        assert!(state.plan.is_loading());
        assert_eq!(rx.try_recv().unwrap().topic, "bee");

        // no editing while loading
        handle_key(key(KeyCode::Char('x')), &mut state);
        assert_eq!(state.plan.topic(), "bee");
    }

    #[test]
    fn q_in_insert_mode_is_text() {
        let mut state = AppState::new(&TimelineConfig::default(), Box::new(MemoryClipboard::default()));
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), KeyAction::Continue);
        assert_eq!(state.plan.topic(), "q");
        handle_key(key(KeyCode::Esc), &mut state);
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), KeyAction::Quit);
    }

    #[test]
    fn enter_toggles_focus_and_esc_closes() {
        let (mut state, _) = loaded_state();
        handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(focused_index(&state), Some(0));
        handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(focused_index(&state), None);

        handle_key(key(KeyCode::Char('l')), &mut state);
        handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(focused_index(&state), Some(1));
        handle_key(key(KeyCode::Char('l')), &mut state);
        assert_eq!(focused_index(&state), Some(2));
        handle_key(key(KeyCode::Esc), &mut state);
        assert_eq!(focused_index(&state), None);
    }

    #[test]
    fn space_toggles_the_selected_concept() {
        let (mut state, _) = loaded_state();
        let concept = state.selected_visual_id().unwrap();
        handle_key(key(KeyCode::Char(' ')), &mut state);
        assert!(!state.session().unwrap().is_collapsed(concept));
        handle_key(key(KeyCode::Char(' ')), &mut state);
        assert!(state.session().unwrap().is_collapsed(concept));
    }

    #[test]
    fn clicking_cards_focuses_and_switches() {
        let (mut state, _) = loaded_state();
        // timeline rect starts at x=1; cards are 20 wide with a 2 column gap
        handle_mouse(click(5, 6), &mut state);
        assert_eq!(focused_index(&state), Some(0));

        state.focus_rect = ratatui::layout::Rect::new(30, 0, 10, 10);
        handle_mouse(click(0, 20), &mut state);
        assert_eq!(focused_index(&state), None);

        handle_mouse(click(1 + 22 + 3, 6), &mut state);
        assert_eq!(focused_index(&state), Some(1));
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn clicking_a_gap_does_nothing() {
        let (mut state, _) = loaded_state();
        handle_mouse(click(1 + 20, 6), &mut state);
        assert_eq!(focused_index(&state), None);
    }

    #[test]
    fn wheel_scrolls_the_timeline() {
        let (mut state, _) = loaded_state();
        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 10,
            row: 6,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(wheel, &mut state);
        assert_eq!(state.timeline.offset(), 10.0);
        assert!(state.session().unwrap().scroll().can_scroll_left());
    }

    #[test]
    fn new_plan_from_the_timeline_returns_to_the_prompt() {
        let (mut state, _) = loaded_state();
        handle_key(key(KeyCode::Enter), &mut state);
        handle_key(key(KeyCode::Char('n')), &mut state);
        assert!(state.session().is_none());
        assert_eq!(state.mode, Mode::Insert);
        assert_eq!(state.plan.topic(), "");
    }

    #[test]
    fn diagnostics_overlay_opens_and_closes() {
        let (mut state, _) = loaded_state();
        handle_key(key(KeyCode::Char('D')), &mut state);
        assert_eq!(state.mode, Mode::Diagnostics);
        handle_key(key(KeyCode::Esc), &mut state);
        assert_eq!(state.mode, Mode::Normal);
    }
}

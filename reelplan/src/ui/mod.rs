//! UI rendering module for reelplan.
//!
//! `render()` is the single entry point called by the event loop's
//! `terminal.draw()` closure. Layout arithmetic lives in `layout.rs`; each
//! screen and overlay has its own module.

mod diagnostics;
mod focus_view;
mod help;
mod input;
pub mod keybindings;
mod layout;
mod timeline;

use ratatui::Frame;
use reelplan_core::PlanPhase;

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use layout::{compute_layout, render_status_bar};

/// Which main screen the plan phase calls for.
#[derive(Clone, Copy)]
enum Screen {
    Input,
    Loading,
    Storyboard,
}

/// Renders one complete frame.
///
/// Called exactly once per `AppEvent::Render`. The timeline and focus overlay
/// write their rects back into `state` so the next mouse event can hit-test
/// against what is actually on screen.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let [main, status_bar] = compute_layout(frame.area());

    let screen = match state.plan.phase() {
        PlanPhase::Idle => Screen::Input,
        PlanPhase::Loading(_) => Screen::Loading,
        PlanPhase::Loaded(_) => Screen::Storyboard,
    };
    match screen {
        Screen::Input => input::render_input(frame, main, state, theme),
        Screen::Loading => input::render_loading(frame, main, state, theme),
        Screen::Storyboard => timeline::render_storyboard(frame, main, state, theme),
    }

    render_status_bar(frame, status_bar, state, theme);

    let focus_open = state
        .session()
        .is_some_and(|s| s.focus().focused().is_some());
    if focus_open {
        focus_view::render_focus_overlay(frame, state, theme);
    }
    match state.mode {
        Mode::Diagnostics => diagnostics::render_diagnostics_overlay(frame, state, theme),
        Mode::HelpOverlay => {
            help::render_help_overlay(frame, theme, state.help_scroll, state.log_path.as_deref())
        }
        Mode::Normal | Mode::Insert => {}
    }
}

//! Screen layout for reelplan.
//!
//! Pure layout arithmetic plus the shared status bar. Called inside
//! `terminal.draw()` on every render, so every frame reflects the current
//! terminal size. The returned rects are valid only for the current frame;
//! the renderer caches the few that mouse handling needs in `AppState`.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};
use reelplan_core::PlanPhase;

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Rows taken by the storyboard header (title, goal, style badges).
const HEADER_HEIGHT: u16 = 3;
/// Rows taken by the proportional ruler (bar, timecodes, spacer).
const RULER_HEIGHT: u16 = 3;

/// Returns `[main, status_bar]` for the current frame.
pub fn compute_layout(area: Rect) -> [Rect; 2] {
    area.layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]))
}

/// Splits the storyboard screen into `[header, ruler, strip]`.
pub fn storyboard_layout(main: Rect) -> [Rect; 3] {
    main.layout(&Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(RULER_HEIGHT),
        Constraint::Fill(1),
    ]))
}

/// Splits the card strip into `[left_arrow, cards, right_arrow]` gutters.
pub fn strip_layout(strip: Rect) -> [Rect; 3] {
    strip.layout(&Layout::horizontal([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]))
}

/// The area of a centred modal overlay, or `None` when the terminal is too
/// small to show one without a zero-height rect.
pub fn overlay_area(area: Rect) -> Option<Rect> {
    if area.width < 40 || area.height < 10 {
        return None;
    }
    Some(area.centered(Constraint::Percentage(85), Constraint::Percentage(85)))
}

/// Returns the inner `Rect` of a bordered block.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// Builds a bordered `Block`.
///
/// Active blocks get `BorderType::Thick` and the `border_active` color.
/// `MergeStrategy::Fuzzy` keeps junctions correct when thick and plain borders
/// touch.
pub fn panel_block<'a>(title: Line<'a>, is_active: bool, theme: &Theme) -> Block<'a> {
    let border_style = if is_active {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_active { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row status bar: mode indicator, plan position, and either
/// the current status message or a short key hint.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (mode_text, mode_fg) = match state.mode {
        Mode::Insert => (" INSERT ", theme.status_mode_insert),
        Mode::Normal | Mode::HelpOverlay | Mode::Diagnostics => {
            (" NORMAL ", theme.status_mode_normal)
        }
    };

    let mut spans = vec![Span::styled(
        mode_text,
        Style::default().fg(mode_fg).add_modifier(Modifier::BOLD),
    )];

    let position = match state.plan.phase() {
        PlanPhase::Idle => " new plan ".to_owned(),
        PlanPhase::Loading(_) => " generating ".to_owned(),
        PlanPhase::Loaded(session) => {
            let count = session.storyboard().segments().len();
            match session.focus().focused() {
                Some(id) => format!(" segment {}/{count} (focused) ", id.index() + 1),
                None if count > 0 => format!(" segment {}/{count} ", state.cursor + 1),
                None => " empty storyboard ".to_owned(),
            }
        }
    };
    spans.push(Span::raw(position));
    spans.push(Span::raw("│ "));

    match &state.status {
        Some(status) => {
            let style = if status.is_error {
                Style::default().fg(theme.status_error).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            spans.push(Span::styled(status.text.clone(), style));
        }
        None => spans.push(Span::styled(hint(state), Style::default().fg(theme.muted))),
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}

fn hint(state: &AppState) -> &'static str {
    match (state.mode, state.plan.phase()) {
        (Mode::Insert, _) => "Enter generate  Esc normal mode",
        (_, PlanPhase::Idle) => "i edit topic  Enter generate  ? help  q quit",
        (_, PlanPhase::Loading(_)) => "n cancel  q quit",
        (_, PlanPhase::Loaded(_)) => {
            "h/l segment  Enter focus  j/k visual  Space expand  [/] scroll  ? help"
        }
    }
}

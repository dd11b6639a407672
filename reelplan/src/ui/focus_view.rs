//! Focus overlay: one segment shown in full on top of the timeline.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};
use reelplan_core::timecode;

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, overlay_area, panel_block};
use crate::ui::timeline::segment_text;

/// Draws the focused segment, if any, and caches the overlay rect so clicks
/// outside it can close focus mode.
pub fn render_focus_overlay(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let Some(area) = overlay_area(frame.area()) else {
        state.focus_rect = Rect::default();
        return;
    };
    state.focus_rect = area;

    let state: &AppState = state;
    let Some(session) = state.session() else {
        return;
    };
    let Some(segment) = session.focused_segment() else {
        return;
    };

    let storyboard = session.storyboard();
    let share = storyboard.segment_width_fraction(segment) * 100.0;
    let starts_at = storyboard.segment_start_fraction(segment) * 100.0;
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", segment.title),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "· {} · {}s · {share:.0}% of {} from {starts_at:.0}% ",
            segment.time_range,
            segment.duration().max(0),
            timecode::format(storyboard.total_duration()),
        )),
    ]);
    let block = panel_block(title, true, theme)
        .title_bottom(" Esc close  h/l prev/next  j/k visual  Space expand  y copy  o open ");

    frame.render_widget(Clear, area);
    let inner = inner_rect(area);
    let text = segment_text(
        segment,
        session,
        Some(state.visual_cursor),
        usize::from(inner.width),
        false,
        theme,
    );
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .wrap(Wrap { trim: true })
            .scroll((state.focus_scroll, 0)),
        area,
    );
}

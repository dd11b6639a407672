//! The topic prompt shown before a storyboard exists, and the loading screen.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Topic entry. The cursor is shown only while editing.
pub fn render_input(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let [_, heading, field, help, _] = area.layout(&Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Fill(1),
    ]));
    let field = field.centered(Constraint::Max(72), Constraint::Length(3));

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "What should the video be about?",
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        )))
        .centered(),
        heading,
    );

    let editing = state.mode == Mode::Insert;
    let block = panel_block(Line::from(" Topic "), editing, theme);
    let inner = inner_rect(field);
    let topic = state.plan.topic();
    let placeholder = topic.is_empty() && !editing;
    let text = if placeholder {
        Span::styled("e.g. how honeybees communicate", Style::default().fg(theme.muted))
    } else {
        Span::raw(visible_tail(topic, usize::from(inner.width.saturating_sub(1))))
    };
    frame.render_widget(Paragraph::new(Line::from(text)).block(block), field);

    if editing {
        let shown = visible_tail(topic, usize::from(inner.width.saturating_sub(1)));
        let x = inner.x + shown.chars().count() as u16;
        frame.set_cursor_position((x.min(inner.right().saturating_sub(1)), inner.y));
    }

    let hint = if state.plan.can_generate() {
        "Enter to generate the storyboard"
    } else {
        "Type a topic, then press Enter"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(theme.muted))).centered(),
        help,
    );
}

/// The last `width` characters of `text`, so the end being typed stays visible.
fn visible_tail(text: &str, width: usize) -> String {
    let count = text.chars().count();
    text.chars().skip(count.saturating_sub(width)).collect()
}

/// Spinner and topic while the producer works.
pub fn render_loading(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let [_, body, _] = area.layout(&Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ]));
    let frame_symbol = SPINNER[state.spinner % SPINNER.len()];
    let lines = vec![
        Line::from(Span::styled(
            format!("{frame_symbol} Hunting for clips..."),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("\"{}\"", state.plan.topic().trim()),
            Style::default().fg(theme.muted),
        )),
        Line::from(Span::styled("n to cancel", Style::default().fg(theme.muted))),
    ];
    frame.render_widget(Paragraph::new(lines).centered(), body);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_topics_keep_their_end_visible() {
        assert_eq!(visible_tail("abcdef", 3), "def");
        assert_eq!(visible_tail("ab", 3), "ab");
    }
}

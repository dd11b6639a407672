//! Overlay listing storyboard data problems found at load time.

use ratatui::{
    Frame,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
};
use reelplan_core::diagnostics::Severity;

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::{overlay_area, panel_block};

pub fn render_diagnostics_overlay(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let Some(overlay) = overlay_area(frame.area()) else {
        return;
    };
    let diagnostics = state.session().map(|s| s.diagnostics()).unwrap_or_default();

    let lines: Vec<Line> = if diagnostics.is_empty() {
        vec![Line::from(Span::styled(
            "No data problems in this storyboard.",
            Style::default().fg(theme.muted),
        ))]
    } else {
        diagnostics
            .iter()
            .map(|d| {
                let (label, color) = match d.severity {
                    Severity::Warning => ("warn ", theme.warning),
                    Severity::Info => ("info ", theme.info),
                };
                Line::from(vec![
                    Span::styled(label, Style::default().fg(color)),
                    Span::styled(format!("{}: ", d.location), Style::default().fg(theme.muted)),
                    Span::raw(d.kind.to_string()),
                ])
            })
            .collect()
    };

    let title = Line::from(format!(" Data notes ({})  Esc to dismiss ", diagnostics.len()));
    frame.render_widget(Clear, overlay);
    frame.render_widget(
        Paragraph::new(lines)
            .block(panel_block(title, true, theme))
            .wrap(Wrap { trim: false })
            .scroll((state.diagnostics_scroll, 0)),
        overlay,
    );
}

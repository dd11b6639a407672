//! Help overlay renderer for reelplan.
//!
//! Draws a centred modal over the current screen. `Clear` erases the area
//! first, inside the same `terminal.draw()` closure as everything else.

use std::path::Path;

use ratatui::{
    Frame,
    text::{Line, Text},
    widgets::{Clear, Paragraph, Wrap},
};

use crate::theme::Theme;
use crate::ui::layout::{overlay_area, panel_block};

/// Renders the help overlay. `help_scroll` is driven by j/k while it is open.
///
/// Skipped on terminals too small to hold it.
pub fn render_help_overlay(
    frame: &mut Frame,
    theme: &Theme,
    help_scroll: u16,
    log_path: Option<&Path>,
) {
    let Some(overlay) = overlay_area(frame.area()) else {
        return;
    };
    frame.render_widget(Clear, overlay);

    let block = panel_block(Line::from(" Help  j/k scroll, ? or Esc to dismiss "), true, theme);
    frame.render_widget(
        Paragraph::new(build_help_text(log_path))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        overlay,
    );
}

fn build_help_text(log_path: Option<&Path>) -> Text<'static> {
    let mut lines = vec![
        Line::from("Topic"),
        Line::from("  type          Edit the topic (INSERT mode)"),
        Line::from("  Enter         Generate the storyboard"),
        Line::from("  Esc / i       Leave / re-enter INSERT mode"),
        Line::from(""),
        Line::from("Timeline"),
        Line::from("  h / l         Previous / next segment"),
        Line::from("  g / G         First / last segment"),
        Line::from("  [ / ]         Scroll the timeline left / right"),
        Line::from("  wheel         Scroll the timeline; click a card to focus it"),
        Line::from("  Enter         Focus the segment (again to close)"),
        Line::from("  j / k         Select next / previous visual"),
        Line::from("  Space         Expand / collapse the selected concept"),
        Line::from("  y             Copy the selected clip's link"),
        Line::from("  o             Open the selected clip in the browser"),
        Line::from(""),
        Line::from("Focus mode"),
        Line::from("  Esc / x       Close"),
        Line::from("  h / l         Focus previous / next segment"),
        Line::from("  J / K         Scroll the segment details"),
        Line::from(""),
        Line::from("General"),
        Line::from("  n             New plan (cancels a running generation)"),
        Line::from("  D             Storyboard data notes"),
        Line::from("  ?             Open / close this help overlay"),
        Line::from("  q             Quit"),
    ];
    if let Some(path) = log_path {
        lines.push(Line::from(""));
        lines.push(Line::from(format!("Log file: {}", path.display())));
    }
    Text::from(lines)
}

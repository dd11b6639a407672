//! Storyboard screen: header, proportional ruler, and the scrolling card strip.
//!
//! Cards are drawn onto an off-screen `Buffer` as wide as the whole strip and
//! the visible window `[offset, offset + width)` is copied into the frame.
//! This lets a card be cut at either edge the way a scrolled web view would
//! cut it, without each widget knowing about the scroll offset.

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget, Wrap},
};
use reelplan_core::layout::proportional_spans;
use reelplan_core::{timecode, Presentation, Segment, StoryboardSession, Visual};

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block, storyboard_layout, strip_layout};

/// Lines a clip description may take on a card.
const CARD_CLIP_LINES: usize = 3;
/// Lines a collapsed concept preview may take.
const COLLAPSED_CONCEPT_LINES: usize = 2;

/// Renders the loaded storyboard into `area`.
///
/// Lays out the strip first so the scroll affordance is mounted (or told
/// about a resize) before anything reads it this frame.
pub fn render_storyboard(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let [header, ruler, strip] = storyboard_layout(area);
    let [left_arrow, cards, right_arrow] = strip_layout(strip);
    state.layout_timeline(cards);
    state.arrow_rects = [left_arrow, right_arrow];

    let state: &AppState = state;
    let Some(session) = state.session() else {
        return;
    };

    render_header(frame, header, session, theme);
    render_ruler(frame, ruler, state, session, theme);

    if session.storyboard().is_empty() {
        frame.render_widget(
            Paragraph::new("This storyboard has no segments. Press n for a new plan.")
                .style(Style::default().fg(theme.muted)),
            cards,
        );
        return;
    }

    render_cards(frame, cards, state, session, theme);
    render_arrows(frame, left_arrow, right_arrow, session, theme);
}

fn render_header(frame: &mut Frame, area: Rect, session: &StoryboardSession, theme: &Theme) {
    let storyboard = session.storyboard();
    let title = if storyboard.title.is_empty() {
        "Untitled storyboard"
    } else {
        storyboard.title.as_str()
    };
    let total = timecode::format(storyboard.total_duration());

    let mut badges = vec![Span::styled(
        format!("{total} total"),
        Style::default().fg(theme.muted),
    )];
    for style in &storyboard.style {
        badges.push(Span::raw(" "));
        badges.push(Span::styled(
            format!(" {style} "),
            Style::default().bg(theme.badge_bg).fg(theme.badge_fg),
        ));
    }
    let notes = session.diagnostics().len();
    if notes > 0 {
        badges.push(Span::styled(
            format!("  ⚠ {notes} data notes (D)"),
            Style::default().fg(theme.warning),
        ));
    }

    let lines = vec![
        Line::from(Span::styled(
            title.to_owned(),
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            storyboard.goal.clone(),
            Style::default().fg(theme.muted),
        )),
        Line::from(badges),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// One row of proportional segment spans, then start timecodes under them.
fn render_ruler(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &StoryboardSession,
    theme: &Theme,
) {
    if area.height < 2 || area.width == 0 {
        return;
    }
    let storyboard = session.storyboard();
    let spans = proportional_spans(&storyboard.width_fractions(), area.width);
    let focused = session.focus().focused();
    let buf = frame.buffer_mut();

    for (index, (segment, span)) in storyboard.segments().iter().zip(&spans).enumerate() {
        if span.width == 0 {
            continue;
        }
        let color = if focused == Some(segment.id()) {
            theme.ruler_focused
        } else if index % 2 == 0 {
            theme.ruler_a
        } else {
            theme.ruler_b
        };
        let mut style = Style::default().bg(color).fg(theme.background);
        if index == state.cursor {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        let bar = Rect::new(area.x + span.x, area.y, span.width, 1);
        buf.set_style(bar, style);
        let label = format!("{}", index + 1);
        buf.set_stringn(bar.x, bar.y, &label, usize::from(span.width), style);

        let start = timecode::format(segment.start_seconds());
        if start.len() < usize::from(span.width) {
            buf.set_stringn(
                bar.x,
                area.y + 1,
                &start,
                usize::from(span.width),
                Style::default().fg(theme.muted),
            );
        }
    }

    let total = timecode::format(storyboard.total_duration());
    let width = total.len() as u16;
    if width < area.width {
        buf.set_string(
            area.x + area.width - width,
            area.y + 1,
            &total,
            Style::default().fg(theme.muted),
        );
    }
}

fn render_cards(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    session: &StoryboardSession,
    theme: &Theme,
) {
    let segments = session.storyboard().segments();
    let extent = state.strip.extent(segments.len()).min(u32::from(u16::MAX)) as u16;
    if extent == 0 || area.width == 0 || area.height == 0 {
        return;
    }

    let mut canvas = Buffer::empty(Rect::new(0, 0, extent, area.height));
    for (index, segment) in segments.iter().enumerate() {
        let x = state.strip.card_x(index);
        let Ok(x) = u16::try_from(x) else {
            break;
        };
        if x >= extent {
            break;
        }
        let card = Rect::new(x, 0, state.strip.card_width.min(extent - x), area.height);
        render_card(&mut canvas, card, segment, index, state, session, theme);
    }

    blit(&canvas, state.timeline.offset_columns(), frame.buffer_mut(), area);
}

/// Copies columns `[offset, offset + area.width)` of `src` into `area`.
fn blit(src: &Buffer, offset: u32, dst: &mut Buffer, area: Rect) {
    for dy in 0..area.height {
        for dx in 0..area.width {
            let Ok(sx) = u16::try_from(offset + u32::from(dx)) else {
                break;
            };
            let Some(cell) = src.cell((sx, dy)) else {
                break;
            };
            if let Some(target) = dst.cell_mut((area.x + dx, area.y + dy)) {
                *target = cell.clone();
            }
        }
    }
}

fn render_card(
    buf: &mut Buffer,
    area: Rect,
    segment: &Segment,
    index: usize,
    state: &AppState,
    session: &StoryboardSession,
    theme: &Theme,
) {
    let is_cursor = index == state.cursor;
    let is_focused = session.focus().is_focused(segment.id());

    let title = Line::from(format!(" {} · {} ", index + 1, segment.time_range));
    let mut block = panel_block(title, is_cursor, theme);
    if is_focused {
        block = block.border_style(Style::default().fg(theme.card_focused));
    }
    let inner = inner_rect(area);
    block.render(area, buf);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let selected = is_cursor.then_some(state.visual_cursor);
    let text = segment_text(segment, session, selected, usize::from(inner.width), true, theme);
    Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

/// The body of a segment: title, visuals, and audio direction.
///
/// `compact` clamps clip descriptions for cards; the focus overlay passes
/// `false` to show them in full. Concepts follow the disclosure state in both.
pub fn segment_text(
    segment: &Segment,
    session: &StoryboardSession,
    selected: Option<usize>,
    width: usize,
    compact: bool,
    theme: &Theme,
) -> Text<'static> {
    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        segment.title.clone(),
        Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        format!("{}s", segment.duration().max(0)),
        Style::default().fg(theme.muted),
    )));
    lines.push(Line::default());

    for (vi, visual) in segment.visuals().iter().enumerate() {
        let is_selected = selected == Some(vi);
        visual_lines(&mut lines, visual, session, is_selected, width, compact, theme);
        lines.push(Line::default());
    }

    if !segment.audio.is_empty() {
        lines.push(Line::from(Span::styled(
            "♪ Audio direction",
            Style::default().fg(theme.audio).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            segment.audio.clone(),
            Style::default().fg(theme.audio),
        )));
    }
    Text::from(lines)
}

fn visual_lines(
    lines: &mut Vec<Line<'static>>,
    visual: &Visual,
    session: &StoryboardSession,
    is_selected: bool,
    width: usize,
    compact: bool,
    theme: &Theme,
) {
    let cursor = if is_selected { "› " } else { "  " };
    let header_style = |color| {
        let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
        if is_selected {
            style.bg(theme.visual_selected).fg(theme.background)
        } else {
            style
        }
    };

    match session.presentation(visual) {
        Presentation::Clip(clip) => {
            lines.push(Line::from(vec![
                Span::raw(cursor),
                Span::styled(format!("▶ CLIP {}", visual.sub_time_range), header_style(theme.clip)),
                Span::styled(" YouTube Clip", Style::default().fg(theme.clip)),
            ]));
            let description = if compact {
                preview(&visual.description, CARD_CLIP_LINES * width)
            } else {
                visual.description.clone()
            };
            lines.push(Line::from(description));
            if let Some(range) = &clip.source_range {
                lines.push(Line::from(Span::styled(
                    format!("source {range}"),
                    Style::default().fg(theme.muted),
                )));
            }
            lines.push(Line::from(Span::styled(
                clip.url.clone(),
                Style::default().fg(theme.link).add_modifier(Modifier::UNDERLINED),
            )));
            if !compact {
                lines.push(Line::from(Span::styled(
                    format!("embed {}", clip.embed.embed_url()),
                    Style::default().fg(theme.muted),
                )));
                lines.push(Line::from(Span::styled(
                    format!("thumbnail {}", clip.thumbnail),
                    Style::default().fg(theme.muted),
                )));
                if let Some(platform) = &clip.platform {
                    lines.push(Line::from(Span::styled(
                        format!("platform {platform}"),
                        Style::default().fg(theme.muted),
                    )));
                }
            }
        }
        Presentation::Concept => {
            let collapsed = session.is_collapsed(visual.id());
            let marker = if collapsed { "▸" } else { "▾" };
            lines.push(Line::from(vec![
                Span::raw(cursor),
                Span::styled(
                    format!("{marker} CONCEPT {}", visual.sub_time_range),
                    header_style(theme.concept),
                ),
            ]));
            let body = if collapsed {
                preview(&visual.description, COLLAPSED_CONCEPT_LINES * width)
            } else {
                visual.description.clone()
            };
            lines.push(Line::from(body));
        }
    }
}

/// Truncates `text` to at most `max_chars` characters, ending in `…` when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn render_arrows(
    frame: &mut Frame,
    left: Rect,
    right: Rect,
    session: &StoryboardSession,
    theme: &Theme,
) {
    let scroll = session.scroll();
    let style = Style::default().fg(theme.scroll_arrow).add_modifier(Modifier::BOLD);
    let buf = frame.buffer_mut();
    if scroll.can_scroll_left() && left.width > 0 && left.height > 0 {
        buf.set_string(left.x, left.y + left.height / 2, "◀", style);
    }
    if scroll.can_scroll_right() && right.width > 0 && right.height > 0 {
        buf.set_string(right.x, right.y + right.height / 2, "▶", style);
    }
}

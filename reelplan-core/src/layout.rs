//! Integer layout for the timeline.
//!
//! Two layouts are needed: a proportional ruler where each segment's width
//! follows its width fraction, and a strip of fixed-width cards that scrolls
//! horizontally. Both are pure arithmetic over column counts.

/// A half-open column interval `[x, x + width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub x: u16,
    pub width: u16,
}

impl ColumnSpan {
    pub fn end(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub fn contains(&self, column: u16) -> bool {
        column >= self.x && column < self.end()
    }
}

/// Lays out `fractions` left to right across `width` columns.
///
/// Each span gets `round(fraction * width)` columns but at least one, so even
/// floored segments stay visible. Because floored fractions can sum past 1.0
/// the running position is clipped at `width`: trailing spans shrink, and spans
/// that start at or past the edge get zero width. No span ever extends past
/// `width`.
pub fn proportional_spans(fractions: &[f64], width: u16) -> Vec<ColumnSpan> {
    let mut spans = Vec::with_capacity(fractions.len());
    let mut x: u16 = 0;
    for &fraction in fractions {
        let wanted = (fraction.max(0.0) * f64::from(width)).round().max(1.0);
        let wanted = wanted.min(f64::from(u16::MAX)) as u16;
        let available = width.saturating_sub(x);
        let span_width = wanted.min(available);
        spans.push(ColumnSpan { x, width: span_width });
        x = x.saturating_add(span_width);
    }
    spans
}

/// A horizontal strip of equally sized cards separated by `gap` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStrip {
    pub card_width: u16,
    pub gap: u16,
}

impl CardStrip {
    pub fn new(card_width: u16, gap: u16) -> Self {
        Self {
            card_width: card_width.max(1),
            gap,
        }
    }

    /// Total width of `count` cards including the gaps between them.
    pub fn extent(&self, count: usize) -> u32 {
        if count == 0 {
            return 0;
        }
        let count = count as u32;
        count * u32::from(self.card_width) + (count - 1) * u32::from(self.gap)
    }

    /// Left edge of card `index` in content coordinates.
    pub fn card_x(&self, index: usize) -> u32 {
        index as u32 * (u32::from(self.card_width) + u32::from(self.gap))
    }

    /// The card under content column `x`, or `None` for a gap or past the end.
    pub fn card_at(&self, x: u32, count: usize) -> Option<usize> {
        let pitch = u32::from(self.card_width) + u32::from(self.gap);
        let index = (x / pitch) as usize;
        let within = x % pitch;
        (index < count && within < u32::from(self.card_width)).then_some(index)
    }

    /// Offset that brings card `index` fully into a viewport of `viewport`
    /// columns currently scrolled to `offset`, moving as little as possible.
    pub fn reveal_offset(&self, index: usize, offset: u32, viewport: u32) -> u32 {
        let left = self.card_x(index);
        let right = left + u32::from(self.card_width);
        if left < offset {
            left
        } else if right > offset + viewport {
            right.saturating_sub(viewport)
        } else {
            offset
        }
    }
}

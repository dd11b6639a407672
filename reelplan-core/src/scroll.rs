//! Horizontal-scroll affordance for the segment timeline.
//!
//! The affordance never polls. It recomputes `can_scroll_left` /
//! `can_scroll_right` only when one of its two event sources fires: the
//! viewport reporting a new scroll offset, or the surrounding window being
//! resized. Both sources are subscribed by [`ScrollAffordance::mount`] and
//! released together by [`ScrollAffordance::unmount`]; events arriving while
//! unmounted are dropped so nothing leaks across storyboard reloads.
//!
//! Scroll commands are fire-and-forget: [`ScrollAffordance::scroll_by`] hands
//! a relative [`ScrollCommand`] to a [`ScrollViewport`] and returns nothing.
//! The viewport later reports its new offset through
//! [`ScrollAffordance::on_scroll`].

/// Default distance of one scroll-left/right command, in viewport units.
pub const DEFAULT_SCROLL_STEP: f32 = 400.0;

/// Slack at the right edge that absorbs sub-unit rounding of the offset.
pub const RIGHT_EDGE_EPSILON: f32 = 1.0;

/// Measurements of a scrollable viewport. All values are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollGeometry {
    /// Current scroll offset from the left edge of the content.
    pub offset: f32,
    /// Full width of the scrollable content.
    pub extent: f32,
    /// Visible width.
    pub viewport: f32,
}

impl ScrollGeometry {
    pub fn new(offset: f32, extent: f32, viewport: f32) -> Self {
        Self {
            offset,
            extent,
            viewport,
        }
    }

    pub fn can_scroll_left(&self) -> bool {
        self.offset > 0.0
    }

    pub fn can_scroll_right(&self) -> bool {
        self.offset < self.extent - self.viewport - RIGHT_EDGE_EPSILON
    }

    /// Largest meaningful offset for this content and viewport.
    pub fn max_offset(&self) -> f32 {
        (self.extent - self.viewport).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

impl ScrollDirection {
    fn sign(self) -> f32 {
        match self {
            ScrollDirection::Left => -1.0,
            ScrollDirection::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// A relative scroll request handed to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    /// Signed distance; negative scrolls left.
    pub delta: f32,
    pub behavior: ScrollBehavior,
}

/// Step size and smoothness of scroll commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollOptions {
    pub step: f32,
    pub smooth: bool,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            step: DEFAULT_SCROLL_STEP,
            smooth: true,
        }
    }
}

/// Anything that can execute a relative scroll command.
pub trait ScrollViewport {
    fn scroll_by(&mut self, command: ScrollCommand);
}

/// The two independent event sources the affordance listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportSource {
    Scroll,
    Resize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Subscriptions {
    scroll: bool,
    resize: bool,
}

/// Derived left/right scroll availability for one mounted storyboard view.
#[derive(Debug, Clone, Default)]
pub struct ScrollAffordance {
    options: ScrollOptions,
    subscriptions: Subscriptions,
    geometry: Option<ScrollGeometry>,
    can_scroll_left: bool,
    can_scroll_right: bool,
}

impl ScrollAffordance {
    pub fn new(options: ScrollOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Subscribes to both event sources and computes the initial state.
    pub fn mount(&mut self, geometry: ScrollGeometry) {
        self.subscriptions = Subscriptions {
            scroll: true,
            resize: true,
        };
        self.recompute(geometry);
    }

    /// Releases both event sources and resets to "cannot scroll".
    pub fn unmount(&mut self) {
        self.subscriptions = Subscriptions::default();
        self.geometry = None;
        self.can_scroll_left = false;
        self.can_scroll_right = false;
    }

    pub fn is_mounted(&self) -> bool {
        self.subscriptions.scroll || self.subscriptions.resize
    }

    pub fn is_subscribed(&self, source: ViewportSource) -> bool {
        match source {
            ViewportSource::Scroll => self.subscriptions.scroll,
            ViewportSource::Resize => self.subscriptions.resize,
        }
    }

    /// The viewport reported a new scroll offset.
    ///
    /// Returns `true` when the event was accepted and the state recomputed.
    pub fn on_scroll(&mut self, geometry: ScrollGeometry) -> bool {
        self.deliver(ViewportSource::Scroll, geometry)
    }

    /// The window was resized; the viewport width may have changed.
    pub fn on_resize(&mut self, geometry: ScrollGeometry) -> bool {
        self.deliver(ViewportSource::Resize, geometry)
    }

    fn deliver(&mut self, source: ViewportSource, geometry: ScrollGeometry) -> bool {
        if !self.is_subscribed(source) {
            return false;
        }
        self.recompute(geometry);
        true
    }

    fn recompute(&mut self, geometry: ScrollGeometry) {
        let (left, right) = (geometry.can_scroll_left(), geometry.can_scroll_right());
        if left != self.can_scroll_left || right != self.can_scroll_right {
            tracing::trace!(left, right, offset = geometry.offset, "scroll affordance changed");
        }
        self.geometry = Some(geometry);
        self.can_scroll_left = left;
        self.can_scroll_right = right;
    }

    /// Issues a relative scroll of one step in `direction`.
    ///
    /// Has no immediate effect on the affordance itself; the new availability
    /// is computed when the viewport reports its offset via [`Self::on_scroll`].
    pub fn scroll_by<V: ScrollViewport + ?Sized>(&self, viewport: &mut V, direction: ScrollDirection) {
        let behavior = if self.options.smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        };
        viewport.scroll_by(ScrollCommand {
            delta: direction.sign() * self.options.step,
            behavior,
        });
    }

    pub fn can_scroll_left(&self) -> bool {
        self.can_scroll_left
    }

    pub fn can_scroll_right(&self) -> bool {
        self.can_scroll_right
    }

    /// Last geometry observed while mounted.
    pub fn geometry(&self) -> Option<ScrollGeometry> {
        self.geometry
    }

    pub fn options(&self) -> ScrollOptions {
        self.options
    }
}

//! Viewport and scroll offset management.

/// Fraction of the remaining distance covered by each smooth-scroll tick.
const EASING: f64 = 0.35;

/// Remaining distance below which a smooth scroll snaps to its target.
const SNAP_EPSILON: f64 = 0.5;

/// Upper bound on ticks [`Viewport::settle`] will run.
const MAX_SETTLE_TICKS: usize = 256;

/// Scroll state of a page viewport.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Current vertical scroll offset in pixels.
    pub scroll_y: f64,
    /// Total document height (from layout).
    pub content_height: f64,
    /// Visible viewport width.
    pub width: f64,
    /// Visible viewport height.
    pub height: f64,
    /// Destination of an in-flight smooth scroll.
    target: Option<f64>,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_y: 0.0,
            content_height: 0.0,
            width,
            height,
            target: None,
        }
    }

    /// Jump to an absolute position. Cancels any animation in flight.
    pub fn scroll_to(&mut self, y: f64) {
        self.target = None;
        self.scroll_y = y;
        self.clamp();
    }

    /// Scroll relative to the current position, as a user wheel would.
    pub fn scroll_by(&mut self, dy: f64) {
        self.scroll_to(self.scroll_y + dy);
    }

    /// Start (or retarget) a smooth scroll. A new request supersedes the
    /// previous one.
    pub fn smooth_scroll_to(&mut self, y: f64) {
        self.target = Some(y.clamp(0.0, self.max_scroll()));
    }

    /// Advance the smooth scroll animation. Returns true if still
    /// animating.
    pub fn tick(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let remaining = target - self.scroll_y;
        if remaining.abs() < SNAP_EPSILON {
            self.scroll_y = target;
            self.target = None;
            return false;
        }
        self.scroll_y += remaining * EASING;
        self.clamp();
        true
    }

    /// Run the animation to completion.
    pub fn settle(&mut self) {
        for _ in 0..MAX_SETTLE_TICKS {
            if !self.tick() {
                return;
            }
        }
        if let Some(target) = self.target.take() {
            self.scroll_y = target;
        }
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Destination of the in-flight smooth scroll, if any.
    pub fn pending_target(&self) -> Option<f64> {
        self.target
    }

    /// Update content height (after layout).
    pub fn set_content_height(&mut self, height: f64) {
        self.content_height = height;
        self.clamp();
    }

    /// Get the maximum scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.content_height - self.height).max(0.0)
    }

    /// Clamp scroll_y to valid range [0, max_scroll].
    fn clamp(&mut self) {
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }
}

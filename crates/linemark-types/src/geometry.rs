//! Viewport geometry.
//!
//! All coordinates are CSS pixels. A [`Rect`] returned by a page host is
//! viewport-relative unless a field name says otherwise (`page_top`).

/// An axis-aligned rectangle, as reported by `getClientRects()`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Vertical midpoint.
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Whether `y` lies within `[top, bottom]` (edges inclusive).
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.top && y <= self.bottom()
    }

    /// Whether `x` lies within `[left, right]` (edges inclusive).
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.left && x <= self.right()
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        self.contains_x(x) && self.contains_y(y)
    }

    /// Return the same rectangle moved vertically by `dy`.
    pub fn offset_y(self, dy: f64) -> Self {
        Self {
            top: self.top + dy,
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

//! Geometry probe: which rendered text line is under a click.

use linemark_types::geometry::Rect;
use linemark_types::input::PointerHit;
use linemark_types::page::PageHost;

/// Farthest a line's vertical center may sit from the click in the
/// element fallback.
pub const FALLBACK_MAX_DISTANCE: f64 = 50.0;

/// One rendered line of text.
///
/// `rect` is viewport-relative as measured at detection time;
/// `page_top` is page-absolute and is what the overlay and navigation
/// work with. Node handles are only trusted for the current operation.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRef<N> {
    pub rect: Rect,
    pub page_top: f64,
    /// Text node (or, in the fallback, element) the line came from.
    pub source: N,
    /// Nearest element ancestor of `source`.
    pub owner: Option<N>,
}

impl<N> LineRef<N> {
    pub fn height(&self) -> f64 {
        self.rect.height
    }

    pub fn page_bottom(&self) -> f64 {
        self.page_top + self.rect.height
    }

    pub fn page_center(&self) -> f64 {
        self.page_top + self.rect.height / 2.0
    }
}

/// Resolve the line under a click.
///
/// Tries the caret position first and picks the line box of that text
/// node that contains the point. Failing that, takes the element under
/// the point and its line box whose center is nearest the click, within
/// [`FALLBACK_MAX_DISTANCE`].
pub fn resolve_line_at_point<P: PageHost>(page: &P, hit: &PointerHit) -> Option<LineRef<P::Node>> {
    let offset = hit.scroll_offset_y();

    if let Some(node) = page.caret_node_from_point(hit.client_x, hit.client_y)
        && page.is_text(&node)
        && let Some(rect) = page
            .client_rects(&node)
            .into_iter()
            .find(|r| r.contains_point(hit.client_x, hit.client_y))
    {
        let owner = page.parent_element(&node);
        return Some(LineRef {
            rect,
            page_top: offset + rect.top,
            source: node,
            owner,
        });
    }

    let Some(element) = page.element_from_point(hit.client_x, hit.client_y) else {
        log::trace!("No element at ({}, {})", hit.client_x, hit.client_y);
        return None;
    };
    if page.text_content(&element).trim().is_empty() {
        log::trace!("Element at ({}, {}) has no text", hit.client_x, hit.client_y);
        return None;
    }

    let nearest = page
        .client_rects(&element)
        .into_iter()
        .map(|r| ((r.center_y() - hit.client_y).abs(), r))
        .min_by(|a, b| a.0.total_cmp(&b.0));
    match nearest {
        Some((distance, rect)) if distance < FALLBACK_MAX_DISTANCE => Some(LineRef {
            rect,
            page_top: offset + rect.top,
            source: element.clone(),
            owner: Some(element),
        }),
        _ => {
            log::trace!("No line within {FALLBACK_MAX_DISTANCE}px of y={}", hit.client_y);
            None
        },
    }
}

//! Page host trait definitions.
//!
//! Every page backend (the live browser document, the offline fixture
//! page) implements [`PageHost`]. The engine dispatches all geometry,
//! tree, viewport and overlay access through this trait -- it never
//! calls platform-specific APIs.
//!
//! Node handles are non-owning: a backend may hand out handles that go
//! stale after the page reflows or mutates, and every query must degrade
//! (empty vectors, `None`, `false`) instead of failing when that happens.

use std::fmt::Debug;

use crate::color::Color;
use crate::error::Result;
use crate::geometry::Rect;
use crate::tag::TagName;

/// How a programmatic scroll should be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Jump immediately.
    Instant,
    /// Animate; fire-and-forget. A later request supersedes this one.
    Smooth,
}

/// How the overlay fill combines with the page beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Plain alpha compositing.
    Normal,
    /// `mix-blend-mode: multiply`; dark text stays legible through the
    /// fill.
    #[default]
    Multiply,
}

impl BlendMode {
    /// CSS `mix-blend-mode` keyword.
    pub fn css_keyword(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Multiply => "multiply",
        }
    }
}

/// Everything a backend needs to paint the overlay.
///
/// `page_top` is page-absolute: the overlay is positioned against the
/// document, not the viewport, so it tracks its line while scrolling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayFrame {
    pub page_top: f64,
    pub height: f64,
    pub visible: bool,
    pub color: Color,
    pub opacity: f64,
    pub blend: BlendMode,
}

/// The page the engine operates on.
pub trait PageHost {
    /// Handle to a node of the page (text node or element).
    type Node: Clone + PartialEq + Debug;

    // -- Geometry ---------------------------------------------------------

    /// Node under the text caret at a viewport point, if the host can
    /// resolve one (`caretPositionFromPoint`). May be an element when the
    /// caret sits between children.
    fn caret_node_from_point(&self, x: f64, y: f64) -> Option<Self::Node>;

    /// Topmost element at a viewport point. Must never return the
    /// overlay.
    fn element_from_point(&self, x: f64, y: f64) -> Option<Self::Node>;

    /// Viewport-relative rectangles of every rendered line box of the
    /// node's full contents (`range.selectNodeContents(node)` followed by
    /// `getClientRects()`).
    fn client_rects(&self, node: &Self::Node) -> Vec<Rect>;

    // -- Tree -------------------------------------------------------------

    fn is_text(&self, node: &Self::Node) -> bool;

    fn parent_element(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Tag of an element; `None` for non-elements.
    fn tag_name(&self, node: &Self::Node) -> Option<TagName>;

    /// Concatenated text of the node and its descendants.
    fn text_content(&self, node: &Self::Node) -> String;

    /// All text nodes under `scope`, in document order.
    fn text_nodes_within(&self, scope: &Self::Node) -> Vec<Self::Node>;

    /// Whether an element is laid out and visible (not `display: none`,
    /// not `visibility: hidden`).
    fn is_rendered(&self, element: &Self::Node) -> bool;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool {
        if ancestor == node {
            return true;
        }
        let mut cursor = self.parent_element(node);
        while let Some(current) = cursor {
            if current == *ancestor {
                return true;
            }
            cursor = self.parent_element(&current);
        }
        false
    }

    // -- Viewport ---------------------------------------------------------

    /// Current vertical scroll offset of the document.
    fn scroll_y(&self) -> f64;

    /// Height of the visible viewport.
    fn viewport_height(&self) -> f64;

    /// Request a vertical scroll to `top` (page-absolute).
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);

    // -- Overlay ----------------------------------------------------------

    /// Create the overlay element (hidden). Idempotent.
    fn mount_overlay(&mut self) -> Result<()>;

    /// Apply a frame to the mounted overlay.
    fn paint_overlay(&mut self, frame: &OverlayFrame) -> Result<()>;

    /// Remove the overlay element from the page entirely.
    fn unmount_overlay(&mut self);

    /// Whether `node` is the overlay or lies inside it.
    fn is_overlay(&self, node: &Self::Node) -> bool;
}

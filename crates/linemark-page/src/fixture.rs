//! [`FixturePage`]: a [`PageHost`] over an arena document.
//!
//! The fixture lays the document out once (and again on [`relayout`]),
//! keeps page-absolute line boxes, and answers every host query in
//! viewport coordinates derived from its [`Viewport`]. The overlay is a
//! real element appended to `<body>`, so tests can check whether it
//! exists in the document.
//!
//! [`relayout`]: FixturePage::relayout

use linemark_types::error::{LinemarkError, Result};
use linemark_types::geometry::Rect;
use linemark_types::input::PointerHit;
use linemark_types::page::{OverlayFrame, PageHost, ScrollBehavior};
use linemark_types::tag::TagName;

use crate::dom::{Document, ElementData, NodeId};
use crate::layout::{LayoutMetrics, MonospaceMeasurer, PageLayout, layout_document};
use crate::viewport::Viewport;

/// DOM id given to the overlay element.
pub const OVERLAY_ELEMENT_ID: &str = "line-highlighter-marker";

/// A scroll request the engine issued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

/// An offline page: document, layout, viewport and overlay.
pub struct FixturePage {
    doc: Document,
    layout: PageLayout,
    metrics: LayoutMetrics,
    measurer: MonospaceMeasurer,
    viewport: Viewport,
    overlay: Option<NodeId>,
    overlay_frame: Option<OverlayFrame>,
    paint_count: usize,
    scroll_requests: Vec<ScrollRequest>,
    fail_paints: bool,
}

impl FixturePage {
    /// Lay out `doc` in a viewport of the given size.
    pub fn new(doc: Document, width: f64, height: f64) -> Self {
        let mut page = Self {
            doc,
            layout: PageLayout::default(),
            metrics: LayoutMetrics::default(),
            measurer: MonospaceMeasurer::default(),
            viewport: Viewport::new(width, height),
            overlay: None,
            overlay_frame: None,
            paint_count: 0,
            scroll_requests: Vec::new(),
            fail_paints: false,
        };
        page.relayout();
        page
    }

    /// Recompute geometry after the document changed.
    pub fn relayout(&mut self) {
        self.layout = layout_document(
            &self.doc,
            self.viewport.width,
            &self.metrics,
            &self.measurer,
        );
        self.viewport
            .set_content_height(self.layout.document_height);
        log::trace!(
            "fixture layout: {} text nodes, document height {}",
            self.layout.text_lines.len(),
            self.layout.document_height
        );
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Mutable document access. Call [`relayout`](Self::relayout) after
    /// changing anything that affects geometry.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Simulate a user scroll by `dy` pixels.
    pub fn scroll_by(&mut self, dy: f64) {
        self.viewport.scroll_by(dy);
    }

    /// Finish any smooth scroll in flight.
    pub fn settle_scroll(&mut self) {
        self.viewport.settle();
    }

    /// Every scroll the engine requested, oldest first.
    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }

    /// The last frame painted onto the mounted overlay.
    pub fn overlay_frame(&self) -> Option<&OverlayFrame> {
        self.overlay_frame.as_ref()
    }

    pub fn paint_count(&self) -> usize {
        self.paint_count
    }

    /// Whether an overlay element is currently part of the document.
    pub fn overlay_in_document(&self) -> bool {
        self.doc.get_element_by_id(OVERLAY_ELEMENT_ID).is_some()
    }

    /// Make every subsequent overlay paint fail.
    pub fn fail_overlay_paints(&mut self, fail: bool) {
        self.fail_paints = fail;
    }

    /// A click at the centre of line `line` of a text node, in the
    /// current scroll position.
    pub fn hit_on_line(&self, text: NodeId, line: usize) -> Option<PointerHit> {
        let rect = self.layout.lines_of(text).get(line)?;
        let page_x = rect.left + rect.width / 2.0;
        let page_y = rect.center_y();
        Some(PointerHit::new(
            page_x,
            page_y - self.viewport.scroll_y,
            page_x,
            page_y,
        ))
    }

    /// A click at a viewport point.
    pub fn hit_at(&self, client_x: f64, client_y: f64) -> PointerHit {
        PointerHit::new(
            client_x,
            client_y,
            client_x,
            client_y + self.viewport.scroll_y,
        )
    }

    fn to_viewport(&self, rect: &Rect) -> Rect {
        rect.offset_y(-self.viewport.scroll_y)
    }

    fn overlay_parent(&self) -> NodeId {
        self.doc.body().unwrap_or(self.doc.root)
    }
}

impl PageHost for FixturePage {
    type Node = NodeId;

    fn caret_node_from_point(&self, x: f64, y: f64) -> Option<NodeId> {
        let page_y = y + self.viewport.scroll_y;
        // Stacked lines share an edge; the lower line wins.
        self.layout
            .text_lines
            .iter()
            .filter(|&(&id, _)| self.doc.is_attached(id))
            .filter_map(|(&id, rects)| {
                rects
                    .iter()
                    .filter(|r| r.contains_point(x, page_y))
                    .map(|r| r.top)
                    .reduce(f64::max)
                    .map(|top| (id, top))
            })
            .max_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
            .map(|(id, _)| id)
    }

    fn element_from_point(&self, x: f64, y: f64) -> Option<NodeId> {
        let page_y = y + self.viewport.scroll_y;
        self.layout
            .block_at(x, page_y)
            .filter(|&id| self.doc.is_attached(id) && !self.is_overlay(&id))
    }

    fn client_rects(&self, node: &NodeId) -> Vec<Rect> {
        if !self.doc.is_attached(*node) {
            return Vec::new();
        }
        self.doc
            .descendants(*node)
            .into_iter()
            .flat_map(|id| self.layout.lines_of(id).iter())
            .map(|r| self.to_viewport(r))
            .collect()
    }

    fn is_text(&self, node: &NodeId) -> bool {
        self.doc.text(*node).is_some()
    }

    fn parent_element(&self, node: &NodeId) -> Option<NodeId> {
        self.doc.parent_element(*node)
    }

    fn tag_name(&self, node: &NodeId) -> Option<TagName> {
        self.doc.element(*node).map(|e| e.tag.clone())
    }

    fn text_content(&self, node: &NodeId) -> String {
        self.doc.text_content(*node)
    }

    fn text_nodes_within(&self, scope: &NodeId) -> Vec<NodeId> {
        self.doc
            .descendants(*scope)
            .into_iter()
            .filter(|&id| self.doc.text(id).is_some())
            .collect()
    }

    fn is_rendered(&self, element: &NodeId) -> bool {
        let Some(data) = self.doc.element(*element) else {
            return false;
        };
        if data.is_display_none() {
            return false;
        }
        // `visibility` inherits: the nearest explicit value wins.
        let mut cursor = Some(*element);
        while let Some(id) = cursor {
            if let Some(visibility) = self.doc.element(id).and_then(ElementData::visibility) {
                return visibility != "hidden" && visibility != "collapse";
            }
            cursor = self.doc.parent_element(id);
        }
        true
    }

    fn scroll_y(&self) -> f64 {
        self.viewport.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport.height
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.scroll_requests.push(ScrollRequest { top, behavior });
        match behavior {
            ScrollBehavior::Instant => self.viewport.scroll_to(top),
            ScrollBehavior::Smooth => self.viewport.smooth_scroll_to(top),
        }
    }

    fn mount_overlay(&mut self) -> Result<()> {
        if let Some(id) = self.overlay
            && self.doc.is_attached(id)
        {
            return Ok(());
        }
        let parent = self.overlay_parent();
        let marker = ElementData::new(TagName::Div)
            .with_attribute("id", OVERLAY_ELEMENT_ID)
            .with_attribute("style", "position: absolute; pointer-events: none");
        self.overlay = Some(self.doc.append_element(parent, marker));
        self.overlay_frame = None;
        Ok(())
    }

    fn paint_overlay(&mut self, frame: &OverlayFrame) -> Result<()> {
        if self.fail_paints {
            return Err(LinemarkError::Host("overlay paint rejected".into()));
        }
        if self.overlay.is_none() {
            return Err(LinemarkError::Host("overlay is not mounted".into()));
        }
        self.overlay_frame = Some(*frame);
        self.paint_count += 1;
        Ok(())
    }

    fn unmount_overlay(&mut self) {
        if let Some(id) = self.overlay.take() {
            self.doc.detach(id);
        }
        self.overlay_frame = None;
    }

    fn is_overlay(&self, node: &NodeId) -> bool {
        let Some(overlay) = self.overlay else {
            return false;
        };
        let mut cursor = Some(*node);
        while let Some(id) = cursor {
            if id == overlay {
                return true;
            }
            cursor = self.doc.get(id).and_then(|n| n.parent);
        }
        false
    }
}

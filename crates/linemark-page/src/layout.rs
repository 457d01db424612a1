//! Deterministic line-box layout.
//!
//! A deliberately small normal-flow layout: block elements stack
//! vertically, inline content flows left to right and wraps at word
//! boundaries. Every text node ends up with one page-absolute rectangle
//! per line it occupies -- the same shape `getClientRects()` reports for
//! a range over that node in a browser.

use std::collections::HashMap;

use linemark_types::geometry::Rect;
use linemark_types::tag::TagName;

use crate::dom::{Document, NodeId, NodeKind};

// -------------------------------------------------------------------
// Text measurement
// -------------------------------------------------------------------

/// Measures the advance width of a run of text.
pub trait TextMeasurer {
    fn measure_text(&self, text: &str) -> f64;
}

/// Approximates every glyph as the same width.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasurer {
    pub glyph_width: f64,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { glyph_width: 8.0 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.glyph_width
    }
}

// -------------------------------------------------------------------
// Metrics
// -------------------------------------------------------------------

/// Box metrics used by the layout pass.
#[derive(Debug, Clone)]
pub struct LayoutMetrics {
    /// Line height for body text.
    pub line_height: f64,
    /// Line height for `h1`-`h3`.
    pub heading_line_height: f64,
    /// Vertical gap after paragraphs, headings and list items.
    pub block_gap: f64,
    /// Left indent of lists and block quotes.
    pub indent: f64,
    /// Margin around the body on all sides.
    pub page_margin: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            line_height: 20.0,
            heading_line_height: 32.0,
            block_gap: 10.0,
            indent: 24.0,
            page_margin: 8.0,
        }
    }
}

impl LayoutMetrics {
    fn line_height_for(&self, tag: &TagName, inherited: f64) -> f64 {
        match tag {
            TagName::H1 | TagName::H2 | TagName::H3 => self.heading_line_height,
            TagName::H4 | TagName::H5 | TagName::H6 | TagName::P | TagName::Li => self.line_height,
            _ => inherited,
        }
    }

    fn gap_after(&self, tag: &TagName) -> f64 {
        match tag {
            TagName::P
            | TagName::H1
            | TagName::H2
            | TagName::H3
            | TagName::H4
            | TagName::H5
            | TagName::H6
            | TagName::Li
            | TagName::Pre
            | TagName::Blockquote => self.block_gap,
            _ => 0.0,
        }
    }

    fn indent_for(&self, tag: &TagName) -> f64 {
        match tag {
            TagName::Ul | TagName::Ol | TagName::Blockquote => self.indent,
            _ => 0.0,
        }
    }
}

// -------------------------------------------------------------------
// Layout result
// -------------------------------------------------------------------

/// Page-absolute geometry of a laid-out document.
#[derive(Debug, Clone, Default)]
pub struct PageLayout {
    /// Line rectangles of every text node that produced visible glyphs.
    pub text_lines: HashMap<NodeId, Vec<Rect>>,
    /// Block element boxes in document (pre-)order.
    pub blocks: Vec<(NodeId, Rect)>,
    /// Height of the whole document including the bottom margin.
    pub document_height: f64,
}

impl PageLayout {
    /// Line rectangles of a single text node.
    pub fn lines_of(&self, id: NodeId) -> &[Rect] {
        self.text_lines.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Deepest block whose box contains the page point.
    pub fn block_at(&self, x: f64, page_y: f64) -> Option<NodeId> {
        self.blocks
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains_point(x, page_y))
            .map(|&(id, _)| id)
    }
}

/// Running state of the flow.
struct Flow<'a> {
    metrics: &'a LayoutMetrics,
    measurer: &'a dyn TextMeasurer,
    out: PageLayout,
    /// Top of the current line.
    y: f64,
    /// Pen position on the current line.
    x: f64,
    /// Whether anything has been placed on the current line.
    line_open: bool,
    /// Height of the current line once open.
    open_line_height: f64,
}

/// Horizontal extent and line height of the enclosing block.
#[derive(Clone, Copy)]
struct BlockContext {
    left: f64,
    right: f64,
    line_height: f64,
}

impl Flow<'_> {
    fn close_line(&mut self) {
        if self.line_open {
            self.y += self.open_line_height;
            self.line_open = false;
        }
    }

    fn layout_children(&mut self, doc: &Document, id: NodeId, ctx: BlockContext) {
        let Some(node) = doc.get(id) else {
            return;
        };
        for &child in &node.children {
            self.layout_node(doc, child, ctx);
        }
    }

    fn layout_node(&mut self, doc: &Document, id: NodeId, ctx: BlockContext) {
        let Some(node) = doc.get(id) else {
            return;
        };
        match &node.kind {
            NodeKind::Document => self.layout_children(doc, id, ctx),
            NodeKind::Text(text) => self.layout_text(id, text, ctx),
            NodeKind::Element(data) => {
                if data.is_display_none() || is_out_of_flow(data.style_property("position")) {
                    return;
                }
                if data.tag == TagName::Br {
                    if self.line_open {
                        self.close_line();
                    } else {
                        self.y += ctx.line_height;
                    }
                    return;
                }
                if !data.tag.is_block_level() {
                    self.layout_children(doc, id, ctx);
                    return;
                }

                self.close_line();
                let top = self.y;
                // Reserve the slot so blocks stay in pre-order.
                let slot = self.out.blocks.len();
                self.out.blocks.push((id, Rect::default()));
                let inner = BlockContext {
                    left: ctx.left + self.metrics.indent_for(&data.tag),
                    right: ctx.right,
                    line_height: self.metrics.line_height_for(&data.tag, ctx.line_height),
                };
                self.layout_children(doc, id, inner);
                self.close_line();
                self.out.blocks[slot].1 =
                    Rect::new(ctx.left, top, ctx.right - ctx.left, self.y - top);
                self.y += self.metrics.gap_after(&data.tag);
            },
        }
    }

    fn layout_text(&mut self, id: NodeId, text: &str, ctx: BlockContext) {
        let space = self.measurer.measure_text(" ");
        let mut rects = Vec::new();
        // Start x of the segment this node occupies on the open line.
        let mut segment: Option<f64> = None;

        for word in text.split_ascii_whitespace() {
            let width = self.measurer.measure_text(word);
            if self.line_open && self.x + space + width > ctx.right {
                if let Some(start) = segment.take() {
                    rects.push(Rect::new(start, self.y, self.x - start, self.open_line_height));
                }
                self.close_line();
            }
            if self.line_open {
                self.x += space;
            } else {
                self.x = ctx.left;
                self.line_open = true;
                self.open_line_height = ctx.line_height;
            }
            if segment.is_none() {
                segment = Some(self.x);
            }
            self.x += width;
        }

        if let Some(start) = segment {
            rects.push(Rect::new(start, self.y, self.x - start, self.open_line_height));
        }
        if !rects.is_empty() {
            self.out.text_lines.insert(id, rects);
        }
    }
}

fn is_out_of_flow(position: Option<&str>) -> bool {
    matches!(position, Some("absolute" | "fixed"))
}

/// Lay out a document into a viewport of the given width.
pub fn layout_document(
    doc: &Document,
    viewport_width: f64,
    metrics: &LayoutMetrics,
    measurer: &dyn TextMeasurer,
) -> PageLayout {
    let mut flow = Flow {
        metrics,
        measurer,
        out: PageLayout::default(),
        y: metrics.page_margin,
        x: metrics.page_margin,
        line_open: false,
        open_line_height: metrics.line_height,
    };
    let ctx = BlockContext {
        left: metrics.page_margin,
        right: (viewport_width - metrics.page_margin).max(metrics.page_margin),
        line_height: metrics.line_height,
    };
    flow.layout_node(doc, doc.root, ctx);
    flow.close_line();
    flow.out.document_height = flow.y + metrics.page_margin;
    flow.out
}

// -------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------

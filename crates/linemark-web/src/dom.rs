//! [`PageHost`] over the live browser document.

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    CaretPosition, CssStyleDeclaration, Document, Element, HtmlElement, Node, Range,
    ScrollToOptions, Window,
};

use linemark_types::error::{LinemarkError, Result};
use linemark_types::geometry::Rect;
use linemark_types::page::{OverlayFrame, PageHost, ScrollBehavior};
use linemark_types::tag::TagName;

use crate::caret::{CARET_POSITION, CARET_RANGE, CaretApi, candidates};
use crate::style::{OVERLAY_ID, overlay_css};

/// `NodeFilter.SHOW_TEXT`.
const SHOW_TEXT: u32 = 0x4;

pub(crate) fn host_error(context: &str, err: JsValue) -> LinemarkError {
    LinemarkError::Host(format!("{context}: {err:?}"))
}

/// The page the content script runs in.
pub struct DomPage {
    window: Window,
    document: Document,
    overlay: Option<HtmlElement>,
}

impl DomPage {
    pub fn new(window: Window) -> Result<Self> {
        let document = window
            .document()
            .ok_or_else(|| LinemarkError::Host("window has no document".into()))?;
        Ok(Self {
            window,
            document,
            overlay: None,
        })
    }

    fn range_over(&self, node: &Node) -> Option<Range> {
        let range = self.document.create_range().ok()?;
        range.select_node_contents(node).ok()?;
        Some(range)
    }

    fn computed_style(&self, element: &Element) -> Option<CssStyleDeclaration> {
        self.window.get_computed_style(element).ok().flatten()
    }

    /// A document method, if this engine has it.
    fn document_method(&self, name: &str) -> Option<Function> {
        Reflect::get(&self.document, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }

    /// Caret container and offset at a viewport point, through whichever
    /// caret API exists. Missing methods are never called.
    fn caret_at(&self, x: f64, y: f64) -> Option<(Node, u32)> {
        let position = self.document_method(CARET_POSITION);
        let range = self.document_method(CARET_RANGE);
        let (x, y) = (JsValue::from_f64(x), JsValue::from_f64(y));
        for api in candidates(position.is_some(), range.is_some()) {
            let method = match api {
                CaretApi::Position => position.as_ref(),
                CaretApi::Range => range.as_ref(),
            }?;
            let Ok(result) = method.call2(&self.document, &x, &y) else {
                log::trace!("{} threw", api.method_name());
                continue;
            };
            let found = match api {
                CaretApi::Position => result
                    .dyn_into::<CaretPosition>()
                    .ok()
                    .and_then(|caret| Some((caret.offset_node()?, caret.offset()))),
                CaretApi::Range => result.dyn_into::<Range>().ok().and_then(|range| {
                    Some((range.start_container().ok()?, range.start_offset().ok()?))
                }),
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }
}

impl PageHost for DomPage {
    type Node = Node;

    fn caret_node_from_point(&self, x: f64, y: f64) -> Option<Node> {
        let (node, offset) = self.caret_at(x, y)?;
        if node.node_type() == Node::TEXT_NODE {
            Some(node)
        } else {
            node.child_nodes().item(offset)
        }
    }

    fn element_from_point(&self, x: f64, y: f64) -> Option<Node> {
        let element = self.document.element_from_point(x as f32, y as f32)?;
        let node = Node::from(element);
        (!self.is_overlay(&node)).then_some(node)
    }

    fn client_rects(&self, node: &Node) -> Vec<Rect> {
        let Some(list) = self.range_over(node).and_then(|r| r.get_client_rects()) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .map(|r| Rect::new(r.left(), r.top(), r.width(), r.height()))
            .collect()
    }

    fn is_text(&self, node: &Node) -> bool {
        node.node_type() == Node::TEXT_NODE
    }

    fn parent_element(&self, node: &Node) -> Option<Node> {
        node.parent_element().map(Node::from)
    }

    fn tag_name(&self, node: &Node) -> Option<TagName> {
        node.dyn_ref::<Element>()
            .map(|element| TagName::from_str(&element.tag_name()))
    }

    fn text_content(&self, node: &Node) -> String {
        node.text_content().unwrap_or_default()
    }

    fn text_nodes_within(&self, scope: &Node) -> Vec<Node> {
        let Ok(walker) = self
            .document
            .create_tree_walker_with_what_to_show(scope, SHOW_TEXT)
        else {
            return Vec::new();
        };
        let mut out = Vec::new();
        while let Ok(Some(node)) = walker.next_node() {
            out.push(node);
        }
        out
    }

    fn is_rendered(&self, element: &Node) -> bool {
        let Some(element) = element.dyn_ref::<Element>() else {
            return false;
        };
        let Some(style) = self.computed_style(element) else {
            return false;
        };
        let display = style.get_property_value("display").unwrap_or_default();
        let visibility = style.get_property_value("visibility").unwrap_or_default();
        display != "none" && visibility != "hidden"
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn mount_overlay(&mut self) -> Result<()> {
        if let Some(overlay) = &self.overlay
            && overlay.is_connected()
        {
            return Ok(());
        }
        let body = self
            .document
            .body()
            .ok_or_else(|| LinemarkError::Host("document has no body".into()))?;
        let element = self
            .document
            .create_element("div")
            .map_err(|e| host_error("create overlay", e))?;
        element.set_id(OVERLAY_ID);
        let overlay = element
            .dyn_into::<HtmlElement>()
            .map_err(|e| host_error("overlay is not an HTML element", e.into()))?;
        body.append_child(&overlay)
            .map_err(|e| host_error("attach overlay", e))?;
        self.overlay = Some(overlay);
        Ok(())
    }

    fn paint_overlay(&mut self, frame: &OverlayFrame) -> Result<()> {
        let overlay = self
            .overlay
            .as_ref()
            .ok_or_else(|| LinemarkError::Host("overlay is not mounted".into()))?;
        overlay
            .style()
            .set_css_text(&overlay_css(frame));
        Ok(())
    }

    fn unmount_overlay(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            overlay.remove();
        }
    }

    fn is_overlay(&self, node: &Node) -> bool {
        self.overlay
            .as_ref()
            .is_some_and(|overlay| overlay.contains(Some(node)))
    }
}

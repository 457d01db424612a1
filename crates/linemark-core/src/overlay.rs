//! Highlight overlay controller.
//!
//! The overlay is a single full-width band positioned in page
//! coordinates. Because it is anchored to the document rather than the
//! viewport, scrolling never moves it off its line; [`on_scroll`] only
//! repaints the same frame.
//!
//! [`on_scroll`]: OverlayController::on_scroll

use linemark_types::color::{Color, HighlightColor};
use linemark_types::page::{BlendMode, OverlayFrame, PageHost};

use crate::probe::LineRef;

/// Fill of the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    pub color: Color,
    pub opacity: f64,
    pub blend: BlendMode,
}

impl OverlayStyle {
    /// Opaque multiply fill in a palette color.
    pub fn from_highlight(color: HighlightColor) -> Self {
        Self {
            color: color.color(),
            opacity: 1.0,
            blend: BlendMode::Multiply,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::from_highlight(HighlightColor::default())
    }
}

/// Owns the overlay frame and pushes it to the page.
#[derive(Debug, Clone)]
pub struct OverlayController {
    frame: OverlayFrame,
    mounted: bool,
}

impl OverlayController {
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            frame: OverlayFrame {
                page_top: 0.0,
                height: 0.0,
                visible: false,
                color: style.color,
                opacity: style.opacity,
                blend: style.blend,
            },
            mounted: false,
        }
    }

    pub fn frame(&self) -> &OverlayFrame {
        &self.frame
    }

    pub fn style(&self) -> OverlayStyle {
        OverlayStyle {
            color: self.frame.color,
            opacity: self.frame.opacity,
            blend: self.frame.blend,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_visible(&self) -> bool {
        self.mounted && self.frame.visible
    }

    /// Create the overlay element, hidden. Does nothing if it exists.
    pub fn mount<P: PageHost>(&mut self, page: &mut P) {
        if self.mounted {
            return;
        }
        match page.mount_overlay() {
            Ok(()) => {
                self.mounted = true;
                self.frame.visible = false;
                self.paint(page);
            },
            Err(e) => log::warn!("Failed to mount overlay: {e}"),
        }
    }

    /// Cover `line` and make the overlay visible.
    pub fn show<P: PageHost>(&mut self, page: &mut P, line: &LineRef<P::Node>) {
        self.mount(page);
        self.frame.page_top = line.page_top;
        self.frame.height = line.height();
        self.frame.visible = true;
        if self.mounted {
            self.paint(page);
        }
    }

    /// Hide the overlay but keep the element.
    pub fn hide<P: PageHost>(&mut self, page: &mut P) {
        self.frame.visible = false;
        if self.mounted {
            self.paint(page);
        }
    }

    /// Remove the overlay element from the page.
    pub fn destroy<P: PageHost>(&mut self, page: &mut P) {
        if self.mounted {
            page.unmount_overlay();
        }
        self.mounted = false;
        self.frame.visible = false;
    }

    /// Swap the fill. Takes effect immediately if mounted.
    pub fn restyle<P: PageHost>(&mut self, page: &mut P, style: OverlayStyle) {
        self.frame.color = style.color;
        self.frame.opacity = style.opacity;
        self.frame.blend = style.blend;
        if self.mounted {
            self.paint(page);
        }
    }

    /// Repaint after the page scrolled. The frame is page-absolute, so
    /// nothing is recomputed.
    pub fn on_scroll<P: PageHost>(&mut self, page: &mut P) {
        if self.is_visible() {
            self.paint(page);
        }
    }

    /// Top of the overlay relative to the viewport at `scroll_y`.
    pub fn viewport_top(&self, scroll_y: f64) -> f64 {
        self.frame.page_top - scroll_y
    }

    fn paint<P: PageHost>(&self, page: &mut P) {
        if let Err(e) = page.paint_overlay(&self.frame) {
            log::warn!("Failed to paint overlay: {e}");
        }
    }
}

impl Default for OverlayController {
    fn default() -> Self {
        Self::new(OverlayStyle::default())
    }
}

//! Inline CSS for the overlay element.

use std::fmt::Write as _;

use linemark_types::page::OverlayFrame;

/// DOM id of the overlay element.
pub const OVERLAY_ID: &str = "line-highlighter-marker";

/// Above anything a page is likely to stack.
const Z_INDEX: i32 = i32::MAX;

/// `style.cssText` for the overlay showing `frame`.
///
/// The band spans the full document width, ignores pointer events so it
/// never becomes a click target, and is positioned in page coordinates.
pub fn overlay_css(frame: &OverlayFrame) -> String {
    let mut css = String::with_capacity(256);
    let _ = write!(
        css,
        "position: absolute; left: 0; width: 100%; top: {}px; height: {}px; \
         background-color: {}; opacity: {}; mix-blend-mode: {}; \
         pointer-events: none; z-index: {Z_INDEX}; display: {}; \
         transition: top 0.1s ease-out;",
        px(frame.page_top),
        px(frame.height),
        frame.color.to_hex(),
        frame.opacity.clamp(0.0, 1.0),
        frame.blend.css_keyword(),
        if frame.visible { "block" } else { "none" },
    );
    css
}

/// Pixel values rounded to a hundredth, without trailing zeros.
fn px(value: f64) -> f64 {
    if value.is_finite() {
        (value * 100.0).round() / 100.0
    } else {
        0.0
    }
}

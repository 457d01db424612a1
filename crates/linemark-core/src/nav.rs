//! Navigation engine: step the highlight one line up or down.

use linemark_types::page::{PageHost, ScrollBehavior};

use crate::index::LineIndex;
use crate::overlay::OverlayController;
use crate::probe::LineRef;

/// Lines closer than this to a viewport edge trigger a scroll.
pub const SAFE_BAND: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Result of a [`step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// At a boundary, or nothing to navigate.
    Unchanged,
    /// The current line moved to `index`; `scrolled_to` is the smooth
    /// scroll requested to keep it in view, if any.
    Moved {
        index: usize,
        scrolled_to: Option<f64>,
    },
}

impl StepOutcome {
    pub fn moved(self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Move the current line one step in `direction`.
///
/// There is no wraparound: stepping past either end leaves everything
/// untouched.
pub fn step<P: PageHost>(
    page: &mut P,
    index: &mut LineIndex<P::Node>,
    overlay: &mut OverlayController,
    direction: Direction,
) -> StepOutcome {
    let Some(target) = target_position(index, direction) else {
        return StepOutcome::Unchanged;
    };
    if !index.set_current(target) {
        return StepOutcome::Unchanged;
    }
    let Some(line) = index.get(target) else {
        return StepOutcome::Unchanged;
    };

    overlay.show(page, line);
    let scrolled_to = scroll_target(line, page.scroll_y(), page.viewport_height());
    if let Some(top) = scrolled_to {
        page.scroll_to(top, ScrollBehavior::Smooth);
    }
    StepOutcome::Moved {
        index: target,
        scrolled_to,
    }
}

fn target_position<N>(index: &LineIndex<N>, direction: Direction) -> Option<usize> {
    if index.is_empty() {
        return None;
    }
    match (index.current(), direction) {
        (None, _) => Some(0),
        (Some(i), Direction::Up) => i.checked_sub(1),
        (Some(i), Direction::Down) => (i + 1 < index.len()).then_some(i + 1),
    }
}

/// Scroll position that re-centers `line`, or `None` when the line
/// already sits inside the viewport's safe band.
pub fn scroll_target<N>(line: &LineRef<N>, scroll_y: f64, viewport_height: f64) -> Option<f64> {
    let band_top = scroll_y + SAFE_BAND;
    let band_bottom = scroll_y + viewport_height - SAFE_BAND;
    if line.page_top >= band_top && line.page_bottom() <= band_bottom {
        return None;
    }
    Some((line.page_center() - viewport_height / 2.0).max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{ScopePolicy, build_line_index};
    use crate::probe::resolve_line_at_point;
    use linemark_page::{Document, ElementData, FixturePage, NodeId};
    use linemark_types::geometry::Rect;
    use linemark_types::tag::TagName;

    struct Setup {
        page: FixturePage,
        index: LineIndex<NodeId>,
        overlay: OverlayController,
    }

    /// `count` one-line paragraphs, 30px apart, starting at y = 8, with
    /// the line in paragraph `seed` selected.
    fn setup(count: usize, seed: usize, viewport_height: f64) -> Setup {
        let mut doc = Document::new();
        let body = doc.append_element(doc.root, ElementData::new(TagName::Body));
        let texts: Vec<NodeId> = (0..count)
            .map(|i| {
                let p = doc.append_element(body, ElementData::new(TagName::P));
                doc.append_text(p, &format!("paragraph number {i}"))
            })
            .collect();
        let page = FixturePage::new(doc, 800.0, viewport_height);
        let hit = page.hit_on_line(texts[seed], 0).unwrap();
        let line = resolve_line_at_point(&page, &hit).unwrap();
        let index = build_line_index(&page, &line, &ScopePolicy::default());
        Setup {
            page,
            index,
            overlay: OverlayController::default(),
        }
    }

    fn line(page_top: f64, height: f64) -> LineRef<usize> {
        LineRef {
            rect: Rect::new(0.0, page_top, 100.0, height),
            page_top,
            source: 0,
            owner: None,
        }
    }

    #[test]
    fn scroll_target_inside_band_is_none() {
        assert_eq!(scroll_target(&line(100.0, 20.0), 0.0, 600.0), None);
        assert_eq!(scroll_target(&line(50.0, 20.0), 0.0, 600.0), None);
        assert_eq!(scroll_target(&line(530.0, 20.0), 0.0, 600.0), None);
    }

    #[test]
    fn scroll_target_recenters() {
        // Bottom 560 is past the lower band edge at 550.
        assert_eq!(scroll_target(&line(540.0, 20.0), 0.0, 600.0), Some(250.0));
        // Above the top band after scrolling.
        assert_eq!(scroll_target(&line(1000.0, 20.0), 980.0, 600.0), Some(710.0));
    }

    #[test]
    fn scroll_target_clamps_at_zero() {
        assert_eq!(scroll_target(&line(10.0, 20.0), 0.0, 600.0), Some(0.0));
    }

    #[test]
    fn step_down_then_up_is_identity() {
        let mut s = setup(10, 4, 800.0);
        assert_eq!(s.index.current(), Some(4));
        let down = step(&mut s.page, &mut s.index, &mut s.overlay, Direction::Down);
        assert_eq!(
            down,
            StepOutcome::Moved {
                index: 5,
                scrolled_to: None
            }
        );
        let up = step(&mut s.page, &mut s.index, &mut s.overlay, Direction::Up);
        assert!(up.moved());
        assert_eq!(s.index.current(), Some(4));
        let frame = s.page.overlay_frame().unwrap();
        assert_eq!(frame.page_top, s.index.current_line().unwrap().page_top);
    }

    #[test]
    fn boundaries_are_no_ops() {
        let mut s = setup(3, 0, 800.0);
        let outcome = step(&mut s.page, &mut s.index, &mut s.overlay, Direction::Up);
        assert_eq!(outcome, StepOutcome::Unchanged);
        assert_eq!(s.index.current(), Some(0));
        assert_eq!(s.page.paint_count(), 0);

        s.index.set_current(2);
        let outcome = step(&mut s.page, &mut s.index, &mut s.overlay, Direction::Down);
        assert_eq!(outcome, StepOutcome::Unchanged);
        assert_eq!(s.index.current(), Some(2));
    }

    #[test]
    fn empty_index_is_a_no_op() {
        let mut s = setup(3, 0, 800.0);
        s.index.clear();
        for direction in [Direction::Up, Direction::Down] {
            let outcome = step(&mut s.page, &mut s.index, &mut s.overlay, direction);
            assert_eq!(outcome, StepOutcome::Unchanged);
        }
        assert!(s.page.scroll_requests().is_empty());
    }

    #[test]
    fn leaving_the_band_scrolls_smoothly() {
        // Viewport 300px: the lower band edge is at 250. Paragraph 7 sits
        // at 218..238, paragraph 8 at 248..268.
        let mut s = setup(40, 7, 300.0);
        let outcome = step(&mut s.page, &mut s.index, &mut s.overlay, Direction::Down);
        assert_eq!(
            outcome,
            StepOutcome::Moved {
                index: 8,
                scrolled_to: Some(108.0)
            }
        );
        let request = s.page.scroll_requests()[0];
        assert_eq!(request.top, 108.0);
        assert_eq!(request.behavior, ScrollBehavior::Smooth);
        s.page.settle_scroll();
        assert_eq!(s.page.viewport().scroll_y, 108.0);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn down_up_round_trips(count in 3usize..30, seed_frac in 0.0f64..1.0) {
                let seed = 1 + ((count - 2) as f64 * seed_frac) as usize % (count - 2);
                let mut s = setup(count, seed, 600.0);
                let start = s.index.current();
                prop_assert!(step(&mut s.page, &mut s.index, &mut s.overlay, Direction::Down).moved());
                prop_assert!(step(&mut s.page, &mut s.index, &mut s.overlay, Direction::Up).moved());
                prop_assert_eq!(s.index.current(), start);
            }

            #[test]
            fn scroll_target_never_negative(top in 0.0f64..5000.0, scroll in 0.0f64..5000.0, vh in 100.0f64..1500.0) {
                if let Some(t) = scroll_target(&line(top, 20.0), scroll, vh) {
                    prop_assert!(t >= 0.0);
                }
            }
        }
    }
}

//! Line index: the ordered set of navigable lines around a click.

use linemark_types::page::PageHost;
use linemark_types::tag::TagName;

use crate::probe::LineRef;

/// Shortest trimmed text a node needs to contribute lines.
pub const MIN_TEXT_CHARS: usize = 2;

/// Line boxes at most this far apart (vertically) collapse into one.
pub const DEDUP_TOLERANCE: f64 = 2.0;

/// Distance within which a line counts as the clicked one.
pub const SEED_MATCH_TOLERANCE: f64 = 5.0;

/// Accepted line-box heights, exclusive on both ends.
const MIN_LINE_HEIGHT: f64 = 5.0;
const MAX_LINE_HEIGHT: f64 = 100.0;

/// Narrowest accepted line box, exclusive.
const MIN_LINE_WIDTH: f64 = 20.0;

/// How far the index reaches from the clicked line.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopePolicy {
    /// Treat `<div>` as a content container when walking up.
    pub include_div: bool,
    /// Upper bound on parent hops while looking for a container.
    pub max_hops: usize,
    /// After the walk, widen to the closest enclosing `<article>`.
    pub widen_to_article: bool,
}

impl Default for ScopePolicy {
    fn default() -> Self {
        Self {
            include_div: false,
            max_hops: 10,
            widen_to_article: true,
        }
    }
}

/// Lines sorted top to bottom, plus which of them is current.
#[derive(Debug, Clone)]
pub struct LineIndex<N> {
    lines: Vec<LineRef<N>>,
    current: Option<usize>,
    scope: Option<N>,
}

impl<N> Default for LineIndex<N> {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            current: None,
            scope: None,
        }
    }
}

impl<N> LineIndex<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[LineRef<N>] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LineRef<N>> {
        self.lines.get(index)
    }

    /// Position of the current line. `None` iff the index is empty.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_line(&self) -> Option<&LineRef<N>> {
        self.current.and_then(|i| self.lines.get(i))
    }

    /// Container the index was built from.
    pub fn scope(&self) -> Option<&N> {
        self.scope.as_ref()
    }

    /// Move the current pointer. Out-of-range positions are ignored.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.lines.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.current = None;
        self.scope = None;
    }
}

/// Build the index of lines surrounding `seed`.
///
/// The seed's owner is widened to a content container per `policy`; every
/// visible text node inside contributes its line boxes. Never mutates the
/// page.
pub fn build_line_index<P: PageHost>(
    page: &P,
    seed: &LineRef<P::Node>,
    policy: &ScopePolicy,
) -> LineIndex<P::Node> {
    let Some(owner) = &seed.owner else {
        log::debug!("Line index: seed has no owner element");
        return LineIndex::new();
    };
    let scope = resolve_scope(page, owner, policy);
    let scroll_y = page.scroll_y();

    let mut lines = Vec::new();
    for node in page.text_nodes_within(&scope) {
        if !accepts_text_node(page, &node) {
            continue;
        }
        let owner = page.parent_element(&node);
        for rect in page.client_rects(&node) {
            if rect.height > MIN_LINE_HEIGHT
                && rect.height < MAX_LINE_HEIGHT
                && rect.width > MIN_LINE_WIDTH
            {
                lines.push(LineRef {
                    rect,
                    page_top: scroll_y + rect.top,
                    source: node.clone(),
                    owner: owner.clone(),
                });
            }
        }
    }

    let lines = sort_and_collapse(lines);
    let current = nearest_line(&lines, seed.page_top);
    let scope_tag = page.tag_name(&scope);
    log::debug!(
        "Line index: {} lines in <{}>, current {:?}",
        lines.len(),
        scope_tag.as_ref().map_or("?", TagName::as_str),
        current
    );
    LineIndex {
        lines,
        current,
        scope: Some(scope),
    }
}

/// Walk up from `start` to the container lines are gathered from.
pub fn resolve_scope<P: PageHost>(page: &P, start: &P::Node, policy: &ScopePolicy) -> P::Node {
    let mut container = start.clone();
    let mut hops = 0;
    while hops < policy.max_hops && !is_container(page, &container, policy) {
        let Some(parent) = page.parent_element(&container) else {
            break;
        };
        container = parent;
        hops += 1;
    }
    if policy.widen_to_article
        && let Some(article) = closest(page, &container, &TagName::Article)
    {
        container = article;
    }
    container
}

fn is_container<P: PageHost>(page: &P, node: &P::Node, policy: &ScopePolicy) -> bool {
    page.tag_name(node)
        .is_some_and(|tag| tag.is_main_content(policy.include_div))
}

/// `node` or its nearest ancestor with the given tag.
fn closest<P: PageHost>(page: &P, node: &P::Node, tag: &TagName) -> Option<P::Node> {
    let mut cursor = Some(node.clone());
    while let Some(current) = cursor {
        if page.tag_name(&current).as_ref() == Some(tag) {
            return Some(current);
        }
        cursor = page.parent_element(&current);
    }
    None
}

fn accepts_text_node<P: PageHost>(page: &P, node: &P::Node) -> bool {
    if page.text_content(node).trim().chars().count() < MIN_TEXT_CHARS {
        return false;
    }
    let Some(parent) = page.parent_element(node) else {
        return false;
    };
    page.is_rendered(&parent)
        && !page
            .tag_name(&parent)
            .is_some_and(|tag| tag.is_raw_text())
}

/// Stable-sort by page top, then drop every line within
/// [`DEDUP_TOLERANCE`] of its predecessor in sorted order.
pub fn sort_and_collapse<N>(mut lines: Vec<LineRef<N>>) -> Vec<LineRef<N>> {
    lines.sort_by(|a, b| a.page_top.total_cmp(&b.page_top));
    let mut previous: Option<f64> = None;
    lines.retain(|line| {
        let keep = previous.is_none_or(|top| (line.page_top - top).abs() > DEDUP_TOLERANCE);
        previous = Some(line.page_top);
        keep
    });
    lines
}

/// First line within [`SEED_MATCH_TOLERANCE`] of `page_top`, else the
/// nearest one.
pub fn nearest_line<N>(lines: &[LineRef<N>], page_top: f64) -> Option<usize> {
    lines
        .iter()
        .position(|l| (l.page_top - page_top).abs() < SEED_MATCH_TOLERANCE)
        .or_else(|| {
            lines
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    (a.page_top - page_top)
                        .abs()
                        .total_cmp(&(b.page_top - page_top).abs())
                })
                .map(|(i, _)| i)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::resolve_line_at_point;
    use linemark_page::{Document, ElementData, FixturePage, NodeId};
    use linemark_types::geometry::Rect;

    fn line(top: f64) -> LineRef<usize> {
        LineRef {
            rect: Rect::new(0.0, top, 100.0, 18.0),
            page_top: top,
            source: 0,
            owner: None,
        }
    }

    fn tops<N>(lines: &[LineRef<N>]) -> Vec<f64> {
        lines.iter().map(|l| l.page_top).collect()
    }

    fn seed_for(page: &FixturePage, text: NodeId) -> LineRef<NodeId> {
        let hit = page.hit_on_line(text, 0).unwrap();
        resolve_line_at_point(page, &hit).unwrap()
    }

    #[test]
    fn collapse_keeps_first_of_each_run() {
        let lines = vec![line(10.0), line(11.5), line(13.0), line(40.0), line(20.0)];
        // 10 → 11.5 → 13 is one run: each step is ≤ 2px.
        assert_eq!(tops(&sort_and_collapse(lines)), vec![10.0, 20.0, 40.0]);
    }

    #[test]
    fn collapse_is_stable() {
        let mut a = line(10.0);
        a.source = 1;
        let mut b = line(10.0);
        b.source = 2;
        let kept = sort_and_collapse(vec![a, b]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].source, 1);
    }

    #[test]
    fn nearest_prefers_first_within_tolerance() {
        let lines = vec![line(0.0), line(30.0), line(33.0), line(60.0)];
        assert_eq!(nearest_line(&lines, 32.0), Some(1));
        assert_eq!(nearest_line(&lines, 50.0), Some(3));
        assert_eq!(nearest_line::<usize>(&[], 50.0), None);
    }

    #[test]
    fn set_current_bounds() {
        let mut index = LineIndex {
            lines: vec![line(0.0), line(30.0)],
            current: Some(0),
            scope: None,
        };
        assert!(index.set_current(1));
        assert!(!index.set_current(2));
        assert_eq!(index.current(), Some(1));
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.current(), None);
    }

    #[test]
    fn filters_short_hidden_and_raw_text() {
        let mut doc = Document::new();
        let body = doc.append_element(doc.root, ElementData::new(TagName::Body));
        let p1 = doc.append_element(body, ElementData::new(TagName::P));
        let first = doc.append_text(p1, "A normal readable paragraph");
        let p2 = doc.append_element(body, ElementData::new(TagName::P));
        doc.append_text(p2, "x");
        let ghost = doc.append_element(
            body,
            ElementData::new(TagName::P).with_attribute("style", "visibility: hidden"),
        );
        doc.append_text(ghost, "takes space but is invisible");
        let script = doc.append_element(body, ElementData::new(TagName::Script));
        doc.append_text(script, "console.log('hi')");
        let p3 = doc.append_element(body, ElementData::new(TagName::P));
        let last = doc.append_text(p3, "Another visible paragraph");

        let page = FixturePage::new(doc, 800.0, 600.0);
        let seed = seed_for(&page, first);
        let index = build_line_index(&page, &seed, &ScopePolicy::default());

        let sources: Vec<NodeId> = index.lines().iter().map(|l| l.source).collect();
        assert_eq!(sources, vec![first, last]);
        assert_eq!(index.current(), Some(0));
        assert_eq!(index.scope(), Some(&body));
    }

    #[test]
    fn narrow_rects_are_skipped() {
        let mut doc = Document::new();
        let body = doc.append_element(doc.root, ElementData::new(TagName::Body));
        let p1 = doc.append_element(body, ElementData::new(TagName::P));
        let wide = doc.append_text(p1, "wide enough line");
        let p2 = doc.append_element(body, ElementData::new(TagName::P));
        // Two glyphs are 16px: kept by the text filter, dropped by width.
        doc.append_text(p2, "ok");

        let page = FixturePage::new(doc, 800.0, 600.0);
        let index = build_line_index(&page, &seed_for(&page, wide), &ScopePolicy::default());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn scope_widens_to_article() {
        let mut doc = Document::new();
        let body = doc.append_element(doc.root, ElementData::new(TagName::Body));
        let article = doc.append_element(body, ElementData::new(TagName::Article));
        let section = doc.append_element(article, ElementData::new(TagName::Section));
        let p = doc.append_element(section, ElementData::new(TagName::P));
        let inner = doc.append_text(p, "inside the section");
        let p2 = doc.append_element(article, ElementData::new(TagName::P));
        doc.append_text(p2, "directly in the article");
        let outside = doc.append_element(body, ElementData::new(TagName::P));
        doc.append_text(outside, "outside of the article");

        let page = FixturePage::new(doc, 800.0, 600.0);
        let seed = seed_for(&page, inner);

        let widened = build_line_index(&page, &seed, &ScopePolicy::default());
        assert_eq!(widened.scope(), Some(&article));
        assert_eq!(widened.len(), 2);

        let narrow = ScopePolicy {
            widen_to_article: false,
            ..ScopePolicy::default()
        };
        let index = build_line_index(&page, &seed, &narrow);
        assert_eq!(index.scope(), Some(&section));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn div_containers_are_opt_in() {
        let mut doc = Document::new();
        let body = doc.append_element(doc.root, ElementData::new(TagName::Body));
        let div = doc.append_element(body, ElementData::new(TagName::Div));
        let p = doc.append_element(div, ElementData::new(TagName::P));
        let text = doc.append_text(p, "in a div");
        let page = FixturePage::new(doc, 800.0, 600.0);
        let seed = seed_for(&page, text);

        assert_eq!(resolve_scope(&page, &p, &ScopePolicy::default()), body);
        let with_div = ScopePolicy {
            include_div: true,
            ..ScopePolicy::default()
        };
        assert_eq!(resolve_scope(&page, &p, &with_div), div);
        assert_eq!(seed.owner, Some(p));
    }

    #[test]
    fn hop_limit_stops_the_walk() {
        let mut doc = Document::new();
        let body = doc.append_element(doc.root, ElementData::new(TagName::Body));
        let mut parent = body;
        for _ in 0..12 {
            parent = doc.append_element(parent, ElementData::new(TagName::Span));
        }
        let page = FixturePage::new(doc, 800.0, 600.0);
        let policy = ScopePolicy {
            max_hops: 3,
            ..ScopePolicy::default()
        };
        let scope = resolve_scope(&page, &parent, &policy);
        assert_eq!(page.tag_name(&scope), Some(TagName::Span));
        assert_eq!(resolve_scope(&page, &parent, &ScopePolicy::default()), parent - 10);
    }

    #[test]
    fn ownerless_seed_gives_empty_index() {
        let page = FixturePage::new(Document::new(), 800.0, 600.0);
        let seed = LineRef {
            rect: Rect::new(0.0, 0.0, 100.0, 20.0),
            page_top: 0.0,
            source: 0,
            owner: None,
        };
        let index = build_line_index(&page, &seed, &ScopePolicy::default());
        assert!(index.is_empty());
        assert_eq!(index.current(), None);
        assert_eq!(index.scope(), None);
    }

    #[test]
    fn page_tops_include_scroll() {
        let mut doc = Document::new();
        let body = doc.append_element(doc.root, ElementData::new(TagName::Body));
        let mut texts = Vec::new();
        for i in 0..50 {
            let p = doc.append_element(body, ElementData::new(TagName::P));
            texts.push(doc.append_text(p, &format!("paragraph number {i}")));
        }
        let mut page = FixturePage::new(doc, 800.0, 400.0);
        page.scroll_by(300.0);
        let seed = seed_for(&page, texts[20]);
        let index = build_line_index(&page, &seed, &ScopePolicy::default());
        assert_eq!(index.len(), 50);
        let current = index.current_line().unwrap();
        assert_eq!(current.source, texts[20]);
        assert_eq!(current.page_top, page.layout().lines_of(texts[20])[0].top);
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn collapsed_lines_are_sorted_and_spaced(tops in proptest::collection::vec(0.0f64..2000.0, 0..64)) {
                let lines: Vec<LineRef<usize>> = tops.iter().map(|&t| line(t)).collect();
                let kept = sort_and_collapse(lines);
                for pair in kept.windows(2) {
                    prop_assert!(pair[1].page_top - pair[0].page_top > DEDUP_TOLERANCE);
                }
                prop_assert_eq!(kept.is_empty(), tops.is_empty());
            }

            #[test]
            fn built_index_is_sorted_and_spaced(
                texts in proptest::collection::vec("[a-z]{3,9}( [a-z]{3,9}){0,20}", 1..16),
                width in 160.0f64..900.0,
            ) {
                let mut doc = Document::new();
                let body = doc.append_element(doc.root, ElementData::new(TagName::Body));
                let ids: Vec<NodeId> = texts
                    .iter()
                    .map(|t| {
                        let p = doc.append_element(body, ElementData::new(TagName::P));
                        doc.append_text(p, t)
                    })
                    .collect();
                let page = FixturePage::new(doc, width, 600.0);
                let seed = seed_for(&page, ids[0]);
                let index = build_line_index(&page, &seed, &ScopePolicy::default());
                for pair in index.lines().windows(2) {
                    prop_assert!(pair[1].page_top - pair[0].page_top > DEDUP_TOLERANCE);
                }
                prop_assert_eq!(index.current(), Some(0));
            }
        }
    }
}

//! End-to-end behavior over the fixture page.

use linemark_page::{Document, ElementData, FixturePage, NodeId};
use linemark_types::color::HighlightColor;
use linemark_types::input::{InputEvent, KeyPress};
use linemark_types::page::PageHost;
use linemark_types::tag::TagName;

use crate::nav::{Direction, StepOutcome};
use crate::session::{Mode, Response, Session};
use crate::settings::{MemoryStore, Modifier, Settings, Shortcut, load_settings, save_settings};

fn toggle() -> InputEvent<NodeId> {
    InputEvent::Key(KeyPress::plain(";").with_ctrl())
}

fn down() -> InputEvent<NodeId> {
    InputEvent::Key(KeyPress::plain("v"))
}

fn click_line(session: &mut Session<FixturePage>, text: NodeId) -> Response {
    let hit = session.page().hit_on_line(text, 0).unwrap();
    let target = session.page().parent_element(&text);
    session.handle(InputEvent::Click { hit, target })
}

fn overlay_top(session: &Session<FixturePage>) -> f64 {
    session.page().overlay_frame().unwrap().page_top
}

fn paragraphs(count: usize, viewport_height: f64) -> (FixturePage, Vec<NodeId>) {
    let mut doc = Document::new();
    let body = doc.append_element(doc.root, ElementData::new(TagName::Body));
    let texts = (0..count)
        .map(|i| {
            let p = doc.append_element(body, ElementData::new(TagName::P));
            doc.append_text(p, &format!("This is paragraph number {}", i + 1))
        })
        .collect();
    (FixturePage::new(doc, 800.0, viewport_height), texts)
}

#[test]
fn stepping_through_paragraphs() {
    let (page, texts) = paragraphs(5, 600.0);
    let mut session = Session::new(page, Settings::default());
    assert_eq!(session.handle(toggle()), Response::Toggled(true));

    click_line(&mut session, texts[1]);
    let frame = *session.page().overlay_frame().unwrap();
    assert!(frame.visible);
    assert_eq!(frame.page_top, session.page().layout().lines_of(texts[1])[0].top);
    assert_eq!(session.index().current(), Some(1));

    let mut last_top = overlay_top(&session);
    for expected in 2..=4 {
        assert_eq!(session.handle(down()), Response::Handled);
        assert_eq!(session.index().current(), Some(expected));
        let top = overlay_top(&session);
        assert!(top > last_top);
        last_top = top;
    }

    // Clamped at the last line.
    assert_eq!(session.handle(down()), Response::Handled);
    assert_eq!(session.index().current(), Some(4));
    assert_eq!(overlay_top(&session), last_top);
}

#[test]
fn aside_lines_are_never_selected() {
    let mut doc = Document::new();
    let body = doc.append_element(doc.root, ElementData::new(TagName::Body));
    let article = doc.append_element(body, ElementData::new(TagName::Article));
    let mut article_texts = Vec::new();
    for i in 0..4 {
        let p = doc.append_element(article, ElementData::new(TagName::P));
        article_texts.push(doc.append_text(p, &format!("Article paragraph {i}")));
    }
    let aside = doc.append_element(body, ElementData::new(TagName::Aside));
    let ul = doc.append_element(aside, ElementData::new(TagName::Ul));
    for i in 0..3 {
        let li = doc.append_element(ul, ElementData::new(TagName::Li));
        doc.append_text(li, &format!("Related link {i}"));
    }
    let page = FixturePage::new(doc, 800.0, 600.0);

    let mut session = Session::new(page, Settings::default());
    session.handle(toggle());
    click_line(&mut session, article_texts[0]);
    assert_eq!(session.index().scope(), Some(&article));

    let mut steps = 0;
    while session.step(Direction::Down) != StepOutcome::Unchanged {
        steps += 1;
        let line = session.current_line().unwrap();
        let owner = line.owner.unwrap();
        assert!(!session.page().contains(&aside, &owner));
        assert!(session.page().contains(&article, &owner));
    }
    assert_eq!(steps, 3);
}

#[test]
fn toggling_off_removes_the_overlay() {
    let (page, texts) = paragraphs(5, 600.0);
    let mut session = Session::new(page, Settings::default());
    session.handle(toggle());
    click_line(&mut session, texts[2]);
    assert!(session.overlay().is_visible());

    assert_eq!(session.handle(toggle()), Response::Toggled(false));
    assert!(!session.page().overlay_in_document());
    assert_eq!(session.mode(), Mode::Disabled);

    assert_eq!(session.handle(toggle()), Response::Toggled(true));
    assert!(session.page().overlay_in_document());
    assert!(!session.page().overlay_frame().unwrap().visible);
    assert_eq!(session.mode(), Mode::Idle);

    click_line(&mut session, texts[3]);
    assert!(session.page().overlay_frame().unwrap().visible);
}

#[test]
fn highlight_stays_on_its_line_while_scrolling() {
    let (page, texts) = paragraphs(60, 400.0);
    let mut session = Session::new(page, Settings::default());
    session.handle(toggle());
    click_line(&mut session, texts[5]);
    let anchored = overlay_top(&session);

    for delta in [120.0, 333.0, -80.0] {
        session.page_mut().scroll_by(delta);
        assert_eq!(session.handle(InputEvent::Scroll), Response::Ignored);
        let top = overlay_top(&session);
        assert!((top - anchored).abs() <= 5.0);
        let line = session.page().layout().lines_of(texts[5])[0];
        let viewport_top = session.overlay().viewport_top(session.page().scroll_y());
        assert!((viewport_top - (line.top - session.page().scroll_y())).abs() <= 5.0);
    }
}

#[test]
fn stepping_off_screen_scrolls_into_view() {
    let (page, texts) = paragraphs(60, 300.0);
    let mut session = Session::new(page, Settings::default());
    session.handle(toggle());
    click_line(&mut session, texts[3]);

    for _ in 0..20 {
        session.handle(down());
        session.page_mut().settle_scroll();
        let frame = *session.page().overlay_frame().unwrap();
        let scroll_y = session.page().scroll_y();
        assert!(frame.page_top >= scroll_y);
        assert!(frame.page_top + frame.height <= scroll_y + 300.0);
    }
    assert!(!session.page().scroll_requests().is_empty());
}

#[test]
fn click_after_mutation_rebuilds_the_index() {
    let (page, texts) = paragraphs(3, 600.0);
    let mut session = Session::new(page, Settings::default());
    session.handle(toggle());
    click_line(&mut session, texts[0]);
    assert_eq!(session.index().len(), 3);

    let page = session.page_mut();
    let body = page.document().body().unwrap();
    let p = page
        .document_mut()
        .append_element(body, ElementData::new(TagName::P));
    let added = page.document_mut().append_text(p, "Loaded later by a script");
    page.relayout();

    click_line(&mut session, added);
    assert_eq!(session.index().len(), 4);
    assert_eq!(session.index().current(), Some(3));
}

#[test]
fn saved_settings_behave_the_same_after_reload() {
    let mut settings = Settings::default();
    settings.color = HighlightColor::Purple;
    settings.shortcuts.toggle = Shortcut::new("h", &[Modifier::Alt, Modifier::Shift]);
    settings.shortcuts.down = Shortcut::new("down", &[]);

    let mut store = MemoryStore::new();
    save_settings(&mut store, &settings).unwrap();
    let reloaded = load_settings(&store);
    assert_eq!(reloaded, settings);

    let (page, texts) = paragraphs(4, 600.0);
    let mut session = Session::new(page, reloaded);
    let chord = KeyPress {
        key: "H".into(),
        code: "KeyH".into(),
        alt: true,
        shift: true,
        ..KeyPress::default()
    };
    assert_eq!(session.handle(InputEvent::Key(chord)), Response::Toggled(true));
    click_line(&mut session, texts[0]);
    assert_eq!(
        session.page().overlay_frame().unwrap().color,
        HighlightColor::Purple.color()
    );

    let arrow = KeyPress {
        key: "ArrowDown".into(),
        code: "ArrowDown".into(),
        ..KeyPress::default()
    };
    assert_eq!(session.handle(InputEvent::Key(arrow)), Response::Handled);
    assert_eq!(session.index().current(), Some(1));
}

#[test]
fn background_command_matches_toggle() {
    let (page, texts) = paragraphs(3, 600.0);
    let mut session = Session::new(page, Settings::default());
    assert!(session.set_enabled(true));
    click_line(&mut session, texts[1]);
    assert!(session.set_enabled(false));
    assert!(!session.page().overlay_in_document());
    assert!(session.index().is_empty());
    assert_eq!(session.mode(), Mode::Disabled);
}

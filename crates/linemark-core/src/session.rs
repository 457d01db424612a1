//! Input/session controller.
//!
//! A [`Session`] is the whole per-page state: the page host, the
//! settings, the overlay and the current line index. Hosts feed it
//! [`InputEvent`]s and act on the returned [`Response`].
//!
//! ```text
//!             toggle                    click on a line
//!  Disabled ─────────▶ Idle ─────────────────────────▶ LineSelected
//!     ▲                  │                                 │  ▲
//!     └──── toggle ──────┴──────────── toggle ─────────────┘  │ click / up / down
//!                                                             └─┘
//! ```

use linemark_types::input::{InputEvent, KeyPress, PointerHit};
use linemark_types::page::PageHost;

use crate::index::{LineIndex, ScopePolicy, build_line_index};
use crate::nav::{self, Direction, StepOutcome};
use crate::overlay::{OverlayController, OverlayStyle};
use crate::probe::{LineRef, resolve_line_at_point};
use crate::settings::{Settings, ShortcutAction};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Disabled,
    /// Enabled, nothing selected yet.
    Idle,
    LineSelected,
}

impl Mode {
    pub fn is_enabled(self) -> bool {
        self != Self::Disabled
    }
}

/// What the host should do with the event it delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Let the page handle it.
    Ignored,
    /// Consumed; prevent the default action.
    Handled,
    /// Consumed, and the enabled state changed to the given value.
    Toggled(bool),
}

impl Response {
    pub fn is_consumed(self) -> bool {
        self != Self::Ignored
    }
}

/// Per-page highlighter state.
pub struct Session<P: PageHost> {
    page: P,
    settings: Settings,
    policy: ScopePolicy,
    overlay: OverlayController,
    index: LineIndex<P::Node>,
    current_line: Option<LineRef<P::Node>>,
    mode: Mode,
}

impl<P: PageHost> Session<P> {
    /// A disabled session over `page`.
    pub fn new(page: P, settings: Settings) -> Self {
        let overlay = OverlayController::new(OverlayStyle::from_highlight(settings.color));
        Self {
            page,
            settings,
            policy: ScopePolicy::default(),
            overlay,
            index: LineIndex::new(),
            current_line: None,
            mode: Mode::Disabled,
        }
    }

    /// Change how the navigable scope is chosen. Takes effect on the
    /// next click.
    pub fn set_scope_policy(&mut self, policy: ScopePolicy) {
        self.policy = policy;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_enabled(&self) -> bool {
        self.mode.is_enabled()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn index(&self) -> &LineIndex<P::Node> {
        &self.index
    }

    pub fn current_line(&self) -> Option<&LineRef<P::Node>> {
        self.current_line.as_ref()
    }

    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    /// Dispatch one input event.
    pub fn handle(&mut self, event: InputEvent<P::Node>) -> Response {
        match event {
            InputEvent::Key(press) => self.handle_key(&press),
            InputEvent::Click { hit, target } => self.handle_click(&hit, target.as_ref()),
            InputEvent::Scroll => {
                self.overlay.on_scroll(&mut self.page);
                Response::Ignored
            },
        }
    }

    fn handle_key(&mut self, press: &KeyPress) -> Response {
        let action = self.settings.shortcuts.action_for(press);
        if action == Some(ShortcutAction::Toggle) {
            return Response::Toggled(self.toggle());
        }
        if !self.is_enabled() {
            return Response::Ignored;
        }
        if press.in_text_field {
            return Response::Ignored;
        }
        let direction = match action {
            Some(ShortcutAction::Up) => Direction::Up,
            Some(ShortcutAction::Down) => Direction::Down,
            _ => return Response::Ignored,
        };
        if self.index.is_empty() {
            log::trace!("Navigation key with no lines indexed");
            return Response::Ignored;
        }
        self.step(direction);
        Response::Handled
    }

    /// Clicks are observed, never consumed: links and controls keep
    /// working while the highlighter is on.
    fn handle_click(&mut self, hit: &PointerHit, target: Option<&P::Node>) -> Response {
        if !self.is_enabled() {
            return Response::Ignored;
        }
        if target.is_some_and(|t| self.page.is_overlay(t)) {
            log::trace!("Ignoring click on the overlay");
            return Response::Ignored;
        }
        self.select_at(hit);
        Response::Ignored
    }

    /// Highlight the line under `hit` and index its surroundings.
    /// Returns whether a line was found; on a miss nothing changes.
    pub fn select_at(&mut self, hit: &PointerHit) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let Some(line) = resolve_line_at_point(&self.page, hit) else {
            return false;
        };
        self.index = build_line_index(&self.page, &line, &self.policy);
        self.overlay.show(&mut self.page, &line);
        self.current_line = Some(line);
        self.mode = Mode::LineSelected;
        true
    }

    /// Move the highlight one line. No-op while disabled.
    pub fn step(&mut self, direction: Direction) -> StepOutcome {
        if !self.is_enabled() {
            return StepOutcome::Unchanged;
        }
        let outcome = nav::step(&mut self.page, &mut self.index, &mut self.overlay, direction);
        if outcome.moved() {
            self.current_line = self.index.current_line().cloned();
            self.mode = Mode::LineSelected;
        }
        outcome
    }

    /// Flip enabled state. Returns the new state.
    pub fn toggle(&mut self) -> bool {
        let enable = !self.is_enabled();
        self.set_enabled(enable);
        enable
    }

    /// Force the enabled state. Returns whether anything changed.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        if enabled == self.is_enabled() {
            return false;
        }
        if enabled {
            self.mode = Mode::Idle;
            self.overlay.mount(&mut self.page);
            log::info!("Line highlighter enabled");
        } else {
            self.overlay.destroy(&mut self.page);
            self.index.clear();
            self.current_line = None;
            self.mode = Mode::Disabled;
            log::info!("Line highlighter disabled");
        }
        true
    }

    /// Swap in new settings. Shortcuts apply to the next key press; the
    /// color applies immediately.
    pub fn apply_settings(&mut self, settings: Settings) {
        if settings.color != self.settings.color {
            let style = OverlayStyle::from_highlight(settings.color)
                .with_opacity(self.overlay.style().opacity);
            self.overlay.restyle(&mut self.page, style);
        }
        log::debug!("Settings applied: color {}", settings.color.key());
        self.settings = settings;
    }
}

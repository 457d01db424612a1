//! Line detection and navigation engine.
//!
//! Everything here is generic over [`linemark_types::page::PageHost`]:
//!
//! - [`probe`] resolves the rendered line under a click.
//! - [`index`] collects the navigable lines around it.
//! - [`overlay`] keeps the highlight band on the current line.
//! - [`nav`] steps between lines and keeps them in view.
//! - [`session`] is the per-page state machine tying them together.
//! - [`settings`] holds the validated shortcuts and color.
//! - [`message`] carries the background coordinator's messages.

pub mod index;
pub mod message;
pub mod nav;
pub mod overlay;
pub mod probe;
pub mod session;
pub mod settings;

#[cfg(test)]
mod scenarios;

pub use index::{LineIndex, ScopePolicy, build_line_index};
pub use message::Message;
pub use nav::{Direction, StepOutcome};
pub use overlay::{OverlayController, OverlayStyle};
pub use probe::{LineRef, resolve_line_at_point};
pub use session::{Mode, Response, Session};
pub use settings::{Settings, SettingsStore};

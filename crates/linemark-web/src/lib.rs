//! Browser backend for the line highlighter.
//!
//! Provides [`LineHighlighter`], a `wasm-bindgen`-exported struct the
//! content script drives: it forwards `keydown`, `click` and `scroll`
//! events and relays runtime messages. Page access goes through a
//! [`PageHost`](linemark_types::page::PageHost) over `web-sys`.
//!
//! Only [`caret`] and [`style`] compile natively; everything touching
//! the DOM is gated on `wasm32`.

pub mod caret;
pub mod style;

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::LineHighlighter;

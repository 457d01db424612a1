//! Offline page backend for linemark.
//!
//! Builds a page without a browser: an arena [`dom::Document`], a
//! deterministic normal-flow [`layout`], a scrollable [`viewport`], and
//! [`fixture::FixturePage`] tying them together behind
//! [`linemark_types::page::PageHost`].

pub mod dom;
pub mod fixture;
pub mod layout;
pub mod viewport;

pub use dom::{Document, ElementData, NodeId};
pub use fixture::{FixturePage, OVERLAY_ELEMENT_ID, ScrollRequest};

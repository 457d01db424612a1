//! Foundation types and traits for linemark.
//!
//! This crate contains the host-agnostic types shared by all linemark
//! crates: viewport geometry, highlight colors, input events, tag names,
//! the [`page::PageHost`] trait every page backend implements, and the
//! error type.

pub mod color;
pub mod error;
pub mod geometry;
pub mod input;
pub mod page;
pub mod tag;

//! Which caret-from-point API to ask, and in what order.
//!
//! Neither `caretPositionFromPoint` nor `caretRangeFromPoint` exists in
//! every engine, and calling a missing method through its binding throws.
//! The backend looks both up on the document first and only calls what
//! is there.

/// `document.caretPositionFromPoint` (standard).
pub const CARET_POSITION: &str = "caretPositionFromPoint";

/// `document.caretRangeFromPoint` (WebKit/Blink legacy).
pub const CARET_RANGE: &str = "caretRangeFromPoint";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretApi {
    Position,
    Range,
}

impl CaretApi {
    pub fn method_name(self) -> &'static str {
        match self {
            Self::Position => CARET_POSITION,
            Self::Range => CARET_RANGE,
        }
    }
}

/// APIs to try, most preferred first. A later entry is still tried when
/// an earlier one resolves nothing.
pub fn candidates(has_position: bool, has_range: bool) -> Vec<CaretApi> {
    let mut out = Vec::with_capacity(2);
    if has_position {
        out.push(CaretApi::Position);
    }
    if has_range {
        out.push(CaretApi::Range);
    }
    out
}

//! Host-agnostic input event types.
//!
//! Every page backend maps its native pointer, keyboard and scroll events
//! to these types. The engine never sees raw platform events.

/// A pointer click in both coordinate systems the page reports.
///
/// `page_y - client_y` is the document scroll offset at the moment of the
/// click; the probe derives page-absolute positions from that delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerHit {
    pub client_x: f64,
    pub client_y: f64,
    pub page_x: f64,
    pub page_y: f64,
}

impl PointerHit {
    pub fn new(client_x: f64, client_y: f64, page_x: f64, page_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            page_x,
            page_y,
        }
    }

    /// Vertical scroll offset implied by the click.
    pub fn scroll_offset_y(&self) -> f64 {
        self.page_y - self.client_y
    }
}

/// A key press, carrying both the produced `key` and the physical `code`
/// (`KeyboardEvent.key` / `KeyboardEvent.code`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPress {
    pub key: String,
    pub code: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
    /// The event target accepts typed text (form field or
    /// `contenteditable`).
    pub in_text_field: bool,
}

impl KeyPress {
    /// An unmodified press with `key` as both key and (derived) code.
    pub fn plain(key: &str) -> Self {
        Self {
            key: key.to_string(),
            code: code_for_key(key),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn typed_into_field(mut self) -> Self {
        self.in_text_field = true;
        self
    }

    /// Whether this press is a bare modifier key.
    pub fn is_modifier_only(&self) -> bool {
        matches!(self.key.as_str(), "Control" | "Alt" | "Shift" | "Meta")
    }

    /// The key name shortcuts are recorded with.
    ///
    /// Derived from the physical code so that layouts and held modifiers
    /// do not change the name (`Shift+;` still reads `;`). Falls back to
    /// the lowercased produced key for codes without a mapping.
    pub fn normalized_key(&self) -> String {
        let code = self.code.as_str();
        if let Some(rest) = code.strip_prefix("Key")
            && !rest.is_empty()
        {
            return rest.to_lowercase();
        }
        if let Some(rest) = code.strip_prefix("Digit")
            && !rest.is_empty()
        {
            return rest.to_string();
        }
        if let Some(rest) = code.strip_prefix("Numpad")
            && !rest.is_empty()
        {
            return rest.to_lowercase();
        }
        let named = match code {
            "Space" => "space",
            "Enter" => "enter",
            "Tab" => "tab",
            "Backspace" => "backspace",
            "Delete" => "delete",
            "ArrowUp" => "up",
            "ArrowDown" => "down",
            "ArrowLeft" => "left",
            "ArrowRight" => "right",
            "Minus" => "-",
            "Equal" => "=",
            "BracketLeft" => "[",
            "BracketRight" => "]",
            "Semicolon" => ";",
            "Quote" => "'",
            "Backquote" => "`",
            "Backslash" => "\\",
            "Comma" => ",",
            "Period" => ".",
            "Slash" => "/",
            _ => return self.key.to_lowercase(),
        };
        named.to_string()
    }
}

/// Best-effort physical code for a US-layout key, used to build
/// synthetic presses.
fn code_for_key(key: &str) -> String {
    let mut chars = key.chars();
    let (Some(ch), None) = (chars.next(), chars.next()) else {
        return String::new();
    };
    if ch.is_ascii_alphabetic() {
        return format!("Key{}", ch.to_ascii_uppercase());
    }
    if ch.is_ascii_digit() {
        return format!("Digit{ch}");
    }
    let code = match ch {
        ' ' => "Space",
        '-' => "Minus",
        '=' => "Equal",
        '[' => "BracketLeft",
        ']' => "BracketRight",
        ';' => "Semicolon",
        '\'' => "Quote",
        '`' => "Backquote",
        '\\' => "Backslash",
        ',' => "Comma",
        '.' => "Period",
        '/' => "Slash",
        _ => "",
    };
    code.to_string()
}

/// An input event delivered to the session, generic over the host's
/// node handle so click targets can be compared with the overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent<N> {
    /// Pointer click; `target` is the node the host dispatched it to.
    Click { hit: PointerHit, target: Option<N> },
    /// Key pressed.
    Key(KeyPress),
    /// The document scrolled.
    Scroll,
}

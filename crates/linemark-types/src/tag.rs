//! HTML tag names.

/// Tag names the engine and the page backends dispatch on.
///
/// Tags not in this list are stored as `Unknown(String)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagName {
    // Document structure
    Html,
    Head,
    Body,
    Title,
    Meta,
    Link,
    Style,
    Script,
    Noscript,
    // Generic containers
    Div,
    Span,
    P,
    A,
    Br,
    // Headings
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    // Lists
    Ul,
    Ol,
    Li,
    // Tables
    Table,
    Tr,
    Td,
    // Pre-formatted / quotes
    Pre,
    Code,
    Blockquote,
    // Inline formatting
    Em,
    Strong,
    B,
    I,
    Mark,
    // Sectioning
    Nav,
    Header,
    Footer,
    Main,
    Section,
    Article,
    Aside,
    Figure,
    Figcaption,
    // Anything else
    Unknown(String),
}

impl TagName {
    /// Parse a tag name; matching is ASCII case-insensitive so DOM
    /// `tagName` values (`"ARTICLE"`) can be passed straight through.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "html" => Self::Html,
            "head" => Self::Head,
            "body" => Self::Body,
            "title" => Self::Title,
            "meta" => Self::Meta,
            "link" => Self::Link,
            "style" => Self::Style,
            "script" => Self::Script,
            "noscript" => Self::Noscript,
            "div" => Self::Div,
            "span" => Self::Span,
            "p" => Self::P,
            "a" => Self::A,
            "br" => Self::Br,
            "h1" => Self::H1,
            "h2" => Self::H2,
            "h3" => Self::H3,
            "h4" => Self::H4,
            "h5" => Self::H5,
            "h6" => Self::H6,
            "ul" => Self::Ul,
            "ol" => Self::Ol,
            "li" => Self::Li,
            "table" => Self::Table,
            "tr" => Self::Tr,
            "td" => Self::Td,
            "pre" => Self::Pre,
            "code" => Self::Code,
            "blockquote" => Self::Blockquote,
            "em" => Self::Em,
            "strong" => Self::Strong,
            "b" => Self::B,
            "i" => Self::I,
            "mark" => Self::Mark,
            "nav" => Self::Nav,
            "header" => Self::Header,
            "footer" => Self::Footer,
            "main" => Self::Main,
            "section" => Self::Section,
            "article" => Self::Article,
            "aside" => Self::Aside,
            "figure" => Self::Figure,
            "figcaption" => Self::Figcaption,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Get the lowercase string representation of this tag name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Html => "html",
            Self::Head => "head",
            Self::Body => "body",
            Self::Title => "title",
            Self::Meta => "meta",
            Self::Link => "link",
            Self::Style => "style",
            Self::Script => "script",
            Self::Noscript => "noscript",
            Self::Div => "div",
            Self::Span => "span",
            Self::P => "p",
            Self::A => "a",
            Self::Br => "br",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
            Self::Ul => "ul",
            Self::Ol => "ol",
            Self::Li => "li",
            Self::Table => "table",
            Self::Tr => "tr",
            Self::Td => "td",
            Self::Pre => "pre",
            Self::Code => "code",
            Self::Blockquote => "blockquote",
            Self::Em => "em",
            Self::Strong => "strong",
            Self::B => "b",
            Self::I => "i",
            Self::Mark => "mark",
            Self::Nav => "nav",
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Main => "main",
            Self::Section => "section",
            Self::Article => "article",
            Self::Aside => "aside",
            Self::Figure => "figure",
            Self::Figcaption => "figcaption",
            Self::Unknown(s) => s.as_str(),
        }
    }

    /// Returns `true` for the sectioning tags treated as the boundary of
    /// navigable content (`article`, `main`, `body`, `section`, and
    /// `div` when `include_div` is set).
    pub fn is_main_content(&self, include_div: bool) -> bool {
        match self {
            Self::Article | Self::Main | Self::Body | Self::Section => true,
            Self::Div => include_div,
            _ => false,
        }
    }

    /// Returns `true` for elements whose text is never rendered
    /// (`script`, `style`).
    pub fn is_raw_text(&self) -> bool {
        matches!(self, Self::Script | Self::Style)
    }

    /// Returns `true` for elements that are `display: none` in the user
    /// agent stylesheet.
    pub fn is_hidden_by_default(&self) -> bool {
        matches!(
            self,
            Self::Head
                | Self::Title
                | Self::Meta
                | Self::Link
                | Self::Style
                | Self::Script
                | Self::Noscript
        )
    }

    /// Returns `true` if this is a block-level element by default.
    pub fn is_block_level(&self) -> bool {
        matches!(
            self,
            Self::Html
                | Self::Body
                | Self::Div
                | Self::P
                | Self::H1
                | Self::H2
                | Self::H3
                | Self::H4
                | Self::H5
                | Self::H6
                | Self::Ul
                | Self::Ol
                | Self::Li
                | Self::Table
                | Self::Tr
                | Self::Td
                | Self::Pre
                | Self::Blockquote
                | Self::Nav
                | Self::Header
                | Self::Footer
                | Self::Main
                | Self::Section
                | Self::Article
                | Self::Aside
                | Self::Figure
                | Self::Figcaption
        )
    }
}

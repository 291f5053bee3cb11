//! Style types for text rendering
//!
//! A rendering surface looks up each character's [`StyleTag`] in a
//! [`StyleTable`] to decide its color, font and size.

use super::tokens::StyleTag;

/// Display colors: the ANSI 16-color palette plus true color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color from a config value: a palette name or `#rrggbb`
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(hex) = value.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return None;
            }
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        }

        let name: String = value
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match name.as_str() {
            "default" => Some(Color::Default),
            "black" => Some(Color::Black),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "blue" => Some(Color::Blue),
            "magenta" => Some(Color::Magenta),
            "cyan" => Some(Color::Cyan),
            "white" => Some(Color::White),
            "brightblack" | "gray" | "grey" => Some(Color::BrightBlack),
            "brightred" => Some(Color::BrightRed),
            "brightgreen" => Some(Color::BrightGreen),
            "brightyellow" => Some(Color::BrightYellow),
            "brightblue" => Some(Color::BrightBlue),
            "brightmagenta" => Some(Color::BrightMagenta),
            "brightcyan" => Some(Color::BrightCyan),
            "brightwhite" => Some(Color::BrightWhite),
            _ => None,
        }
    }

    /// Convert to the crossterm color used when painting
    pub fn to_crossterm(self) -> crossterm::style::Color {
        use crossterm::style::Color as Ct;
        match self {
            Color::Default => Ct::Reset,
            Color::Black => Ct::Black,
            Color::Red => Ct::DarkRed,
            Color::Green => Ct::DarkGreen,
            Color::Yellow => Ct::DarkYellow,
            Color::Blue => Ct::DarkBlue,
            Color::Magenta => Ct::DarkMagenta,
            Color::Cyan => Ct::DarkCyan,
            Color::White => Ct::Grey,
            Color::BrightBlack => Ct::DarkGrey,
            Color::BrightRed => Ct::Red,
            Color::BrightGreen => Ct::Green,
            Color::BrightYellow => Ct::Yellow,
            Color::BrightBlue => Ct::Blue,
            Color::BrightMagenta => Ct::Magenta,
            Color::BrightCyan => Ct::Cyan,
            Color::BrightWhite => Ct::White,
            Color::Rgb(r, g, b) => Ct::Rgb { r, g, b },
        }
    }
}

/// Font family of a style entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    #[default]
    Courier,
    CourierBold,
}

impl Font {
    /// Parse a font from a config value
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "courier" => Some(Font::Courier),
            "courier-bold" | "courier_bold" | "bold" => Some(Font::CourierBold),
            _ => None,
        }
    }

    pub fn is_bold(self) -> bool {
        self == Font::CourierBold
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Font family
    pub font: Font,
    /// Font size in points (ignored by the terminal surface)
    pub size: u8,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: Color::Default,
            font: Font::Courier,
            size: 14,
        }
    }
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: use the bold font
    pub fn with_bold(mut self) -> Self {
        self.font = Font::CourierBold;
        self
    }

    /// Builder: set font size
    pub fn with_size(mut self, size: u8) -> Self {
        self.size = size;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Fixed mapping from style tag to display attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTable {
    entries: [Style; StyleTag::COUNT],
}

impl Default for StyleTable {
    fn default() -> Self {
        let mut entries = [Style::default(); StyleTag::COUNT];
        for tag in StyleTag::ALL {
            entries[tag.index()] = tag.default_style();
        }
        Self { entries }
    }
}

impl StyleTable {
    /// Look up the style for a tag
    pub fn get(&self, tag: StyleTag) -> Style {
        self.entries[tag.index()]
    }

    /// Replace the style for a tag
    pub fn set(&mut self, tag: StyleTag, style: Style) {
        self.entries[tag.index()] = style;
    }
}

/// A run of equally tagged characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Character position where this span starts (inclusive)
    pub start: usize,
    /// Character position where this span ends (exclusive)
    pub end: usize,
    /// Tag shared by every character in the span
    pub tag: StyleTag,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, tag: StyleTag) -> Self {
        Self { start, end, tag }
    }
}

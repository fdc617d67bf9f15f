// Theme support for the TUI
//
// One enumerated palette resolved by name at startup. Stages read colors
// from the struct; there are no string-keyed style lookups at render time.

use ratatui::style::Color;

/// Color palette for the experience
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Base surfaces
    pub background: Color,
    pub surface: Color,

    // Text
    pub text: Color,
    pub text_dim: Color,

    // Accents
    pub rose: Color,
    pub rose_deep: Color,
    pub gold: Color,

    // Chrome
    pub border: Color,
    pub highlight: Color,

    // Effects
    pub petal: Color,
    pub heart: Color,
    pub sparkle: Color,
    pub trail: Color,
}

impl Theme {
    /// Load theme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "blush" => Self::blush(),
            _ => Self::dusk(), // "dusk" or unknown
        }
    }

    /// Dusk - coffee browns and rose for dark terminals
    pub fn dusk() -> Self {
        Self {
            name: "dusk".to_string(),
            background: Color::Rgb(0x2f, 0x21, 0x1e), // coffee brown
            surface: Color::Rgb(0x3c, 0x2b, 0x27),
            text: Color::Rgb(0xf2, 0xec, 0xdf), // warm cream
            text_dim: Color::Rgb(0xb5, 0xa8, 0x97),
            rose: Color::Rgb(0xf4, 0xc2, 0xc9), // soft pink
            rose_deep: Color::Rgb(0xd4, 0x8a, 0x96),
            gold: Color::Rgb(0xd9, 0xb3, 0x70),
            border: Color::Rgb(0x6b, 0x52, 0x48),
            highlight: Color::Rgb(0xf4, 0xc2, 0xc9),
            petal: Color::Rgb(0xe8, 0xa9, 0xb4),
            heart: Color::Rgb(0xf4, 0xc2, 0xc9),
            sparkle: Color::Rgb(0xe0, 0xc2, 0x85),
            trail: Color::Rgb(0xc9, 0x8f, 0x9b),
        }
    }

    /// Blush - cream and rose for light terminals
    pub fn blush() -> Self {
        Self {
            name: "blush".to_string(),
            background: Color::Rgb(0xf6, 0xef, 0xe4),
            surface: Color::Rgb(0xef, 0xe2, 0xd8),
            text: Color::Rgb(0x4a, 0x32, 0x2c),
            text_dim: Color::Rgb(0x8a, 0x6f, 0x64),
            rose: Color::Rgb(0xd8, 0x7f, 0x92),
            rose_deep: Color::Rgb(0xb4, 0x5a, 0x6e),
            gold: Color::Rgb(0xab, 0x82, 0x3f),
            border: Color::Rgb(0xc9, 0xb2, 0xa4),
            highlight: Color::Rgb(0xb4, 0x5a, 0x6e),
            petal: Color::Rgb(0xd8, 0x7f, 0x92),
            heart: Color::Rgb(0xc4, 0x5d, 0x72),
            sparkle: Color::Rgb(0xab, 0x82, 0x3f),
            trail: Color::Rgb(0xd8, 0x9f, 0xab),
        }
    }
}

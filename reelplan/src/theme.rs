//! Color theme system for reelplan.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every surface
//! the storyboard view draws. Two built-in themes are provided:
//!
//! - `dark` uses ANSI 16 colors so it works on any terminal, including
//!   256-color SSH sessions without truecolor support.
//! - `catppuccin_mocha` uses the Catppuccin Mocha palette in RGB and needs a
//!   truecolor terminal.

use ratatui::style::Color;

/// All color values used across reelplan's UI surfaces.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border of the card under the cursor and of overlays.
    pub border_active: Color,
    pub border_inactive: Color,

    // Header
    pub title: Color,
    /// Muted secondary text (goal line, timecodes, hints).
    pub muted: Color,
    /// Background of style badges in the header.
    pub badge_bg: Color,
    pub badge_fg: Color,

    // Timeline
    /// Alternating fills of the proportional ruler.
    pub ruler_a: Color,
    pub ruler_b: Color,
    /// Ruler span of the focused segment.
    pub ruler_focused: Color,
    /// Scroll arrows shown when more cards lie off-screen.
    pub scroll_arrow: Color,
    /// Border of the focused segment's card.
    pub card_focused: Color,

    // Visuals
    /// Marker and badge for clip visuals.
    pub clip: Color,
    /// Marker for concept visuals.
    pub concept: Color,
    /// Highlight of the selected visual inside a card.
    pub visual_selected: Color,
    /// Audio direction text.
    pub audio: Color,
    pub link: Color,

    // Diagnostics
    pub warning: Color,
    pub info: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    /// Mode indicator color in NORMAL mode.
    pub status_mode_normal: Color,
    /// Mode indicator color while editing the topic.
    pub status_mode_insert: Color,
    /// Status messages reporting a failure.
    pub status_error: Color,

    // General
    pub background: Color,
}

impl Theme {
    /// The built-in dark theme using ANSI 16 colors. Also the fallback for
    /// unknown theme names.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            title: Color::White,
            muted: Color::DarkGray,
            badge_bg: Color::Blue,
            badge_fg: Color::White,

            ruler_a: Color::Blue,
            ruler_b: Color::Cyan,
            ruler_focused: Color::Yellow,
            scroll_arrow: Color::Yellow,
            card_focused: Color::Yellow,

            clip: Color::Red,
            concept: Color::Magenta,
            visual_selected: Color::Cyan,
            audio: Color::Green,
            link: Color::Blue,

            warning: Color::Yellow,
            info: Color::DarkGray,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_insert: Color::Green,
            status_error: Color::Red,

            background: Color::Reset,
        }
    }

    /// The Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let sapphire = Color::Rgb(116, 199, 236); // #74c7ec
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let teal = Color::Rgb(148, 226, 213); // #94e2d5
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface0 = Color::Rgb(49, 50, 68); // #313244
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let base = Color::Rgb(30, 30, 46); // #1e1e2e
        let text = Color::Rgb(205, 214, 244); // #cdd6f4
        let peach = Color::Rgb(250, 179, 135); // #fab387

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            title: text,
            muted: overlay1,
            badge_bg: surface1,
            badge_fg: lavender,

            ruler_a: blue,
            ruler_b: sapphire,
            ruler_focused: peach,
            scroll_arrow: yellow,
            card_focused: peach,

            clip: red,
            concept: mauve,
            visual_selected: teal,
            audio: green,
            link: blue,

            warning: yellow,
            info: overlay1,

            status_bar_bg: surface0,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_insert: green,
            status_error: red,

            background: base,
        }
    }

    /// Resolves a theme name from config. Unknown names fall back to `dark()`
    /// with a logged warning so a typo never prevents startup.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}

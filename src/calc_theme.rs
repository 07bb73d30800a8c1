use ratatui::style::Color;

/// The ten semantic color roles used by the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub bg: Color,
    pub display_bg: Color,
    pub display_fg: Color,
    pub text: Color,
    pub button_regular: Color,
    pub button_special: Color,
    pub button_equals: Color,
    pub mode_bg: Color,
    pub mode_selected: Color,
    pub mode_hover: Color,
}

impl ThemePalette {
    pub fn dark() -> Self {
        ThemePalette {
            bg: Color::Rgb(0x22, 0x22, 0x3b),
            display_bg: Color::Rgb(0xf2, 0xe9, 0xe4),
            display_fg: Color::Rgb(0x22, 0x22, 0x3b),
            text: Color::Rgb(0xf2, 0xe9, 0xe4),
            button_regular: Color::Rgb(0x9a, 0x8c, 0x98),
            button_special: Color::Rgb(0x4a, 0x4e, 0x69),
            button_equals: Color::Rgb(0xc9, 0xad, 0xa7),
            mode_bg: Color::Rgb(0x4a, 0x4e, 0x69),
            mode_selected: Color::Rgb(0xc9, 0xad, 0xa7),
            mode_hover: Color::Rgb(0x9a, 0x8c, 0x98),
        }
    }

    pub fn light() -> Self {
        ThemePalette {
            bg: Color::Rgb(0xf0, 0xf0, 0xf0),
            display_bg: Color::Rgb(0xff, 0xff, 0xff),
            display_fg: Color::Rgb(0x00, 0x00, 0x00),
            text: Color::Rgb(0x00, 0x00, 0x00),
            button_regular: Color::Rgb(0xe0, 0xe0, 0xe0),
            button_special: Color::Rgb(0xa0, 0xa0, 0xa0),
            button_equals: Color::Rgb(0x87, 0xce, 0xeb),
            mode_bg: Color::Rgb(0xd0, 0xd0, 0xd0),
            mode_selected: Color::Rgb(0x87, 0xce, 0xeb),
            mode_hover: Color::Rgb(0xc0, 0xc0, 0xc0),
        }
    }
}

/// Theme selection is a single flag; exactly two variants exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    dark: bool,
}

impl Theme {
    pub fn new(dark: bool) -> Self {
        Theme { dark }
    }

    pub fn toggle(&mut self) {
        self.dark = !self.dark;
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn label(&self) -> &'static str {
        if self.dark {
            "Dark"
        } else {
            "Light"
        }
    }

    pub fn palette(&self) -> ThemePalette {
        if self.dark {
            ThemePalette::dark()
        } else {
            ThemePalette::light()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme { dark: true }
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

/// Palette and typography derived from the selected mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub mode: ThemeMode,
    pub primary: &'static str,
    pub background: &'static str,
    pub text: &'static str,
    pub font_family: &'static str,
}

pub const PRIMARY_MAIN: &str = "#1976d2";
pub const FONT_FAMILY: &str = "Roboto, Arial";

impl Theme {
    pub fn new(mode: ThemeMode) -> Self {
        let (background, text) = match mode {
            ThemeMode::Light => ("#ffffff", "#212121"),
            ThemeMode::Dark => ("#121212", "#ffffff"),
        };
        Self {
            mode,
            primary: PRIMARY_MAIN,
            background,
            text,
            font_family: FONT_FAMILY,
        }
    }

    /// Primary colour as an RGB triple, for terminals with true colour.
    pub fn primary_rgb(&self) -> (u8, u8, u8) {
        hex_rgb(self.primary)
    }

    pub fn text_rgb(&self) -> (u8, u8, u8) {
        hex_rgb(self.text)
    }
}

// Palette constants are always "#rrggbb".
fn hex_rgb(hex: &str) -> (u8, u8, u8) {
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .unwrap_or(0)
    };
    (channel(1), channel(3), channel(5))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
        assert!(!ThemeMode::default().is_dark());
    }

    #[test]
    fn test_primary_shared_across_modes() {
        let light = Theme::new(ThemeMode::Light);
        let dark = Theme::new(ThemeMode::Dark);
        assert_eq!(light.primary, dark.primary);
        assert_ne!(light.background, dark.background);
        assert_eq!(light.primary_rgb(), (0x19, 0x76, 0xd2));
        assert_eq!(dark.text_rgb(), (255, 255, 255));
    }
}

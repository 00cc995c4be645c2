use serde::{Deserialize, Serialize};
use std::fmt;

const LIGHT_STYLESHEET: &str = "style/lightTheme.css";
const DARK_STYLESHEET: &str = "style/darkTheme.css";

/// Known visual themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Resolves a stored theme name. Anything unrecognized is the light theme.
    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Maps the settings screen toggle to a theme.
    pub fn from_toggle(checked: bool) -> Self {
        if checked {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn stylesheet(&self) -> Stylesheet {
        match self {
            Theme::Light => Stylesheet(LIGHT_STYLESHEET),
            Theme::Dark => Stylesheet(DARK_STYLESHEET),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to the stylesheet resource backing a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stylesheet(&'static str);

impl Stylesheet {
    pub fn href(&self) -> &'static str {
        self.0
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Theme::default().stylesheet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_known_themes() {
        assert_eq!(Theme::from_name("light"), Theme::Light);
        assert_eq!(Theme::from_name("dark"), Theme::Dark);
    }

    #[test]
    fn test_unrecognized_name_falls_back_to_light() {
        for name in ["", "Dark", "solarized", " dark"] {
            let theme = Theme::from_name(name);
            assert_eq!(theme, Theme::Light, "name {:?}", name);
            assert_eq!(theme.stylesheet().href(), "style/lightTheme.css");
        }
    }

    #[test]
    fn test_from_toggle() {
        assert_eq!(Theme::from_toggle(true), Theme::Dark);
        assert_eq!(Theme::from_toggle(false), Theme::Light);
    }

    #[test]
    fn test_stylesheets() {
        assert_eq!(Theme::Dark.stylesheet().href(), "style/darkTheme.css");
        assert_eq!(Stylesheet::default(), Theme::Light.stylesheet());
    }

    #[test]
    fn test_name_round_trip() {
        for theme in [Theme::Light, Theme::Dark] {
            assert_eq!(Theme::from_name(theme.as_str()), theme);
        }
    }
}

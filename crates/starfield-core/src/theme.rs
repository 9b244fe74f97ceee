use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Read a `data-theme` attribute value; anything unknown is dark.
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// An explicitly saved choice wins; otherwise follow the system preference.
pub fn resolve_theme(saved: Option<&str>, system_prefers_dark: bool) -> Theme {
    match saved {
        Some(s) if !s.trim().is_empty() => Theme::from_attr(Some(s)),
        _ if system_prefers_dark => Theme::Dark,
        _ => Theme::Light,
    }
}

use crate::foundation::error::{LayerError, LayerResult};

/// Page rendering mode selecting which half of a theme applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Light palette.
    #[default]
    Light,
    /// Dark palette.
    Dark,
}

impl ColorMode {
    /// Parse a page `mode` prop; anything but `"dark"` is light.
    pub fn from_prop(value: Option<&serde_json::Value>) -> Self {
        match value.and_then(|v| v.as_str()) {
            Some("dark") => ColorMode::Dark,
            _ => ColorMode::Light,
        }
    }
}

/// HSL triplets (`"222.2 84% 4.9%"`) for one mode.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ThemeColors {
    /// Page background.
    pub background: String,
    /// Default text color.
    pub foreground: String,
    /// Default border color.
    pub border: String,
}

/// Light and dark palettes of a theme.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ThemeVars {
    /// Palette used for [`ColorMode::Light`].
    pub light: ThemeColors,
    /// Palette used for [`ColorMode::Dark`].
    pub dark: ThemeColors,
}

/// Named color theme.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ColorTheme {
    /// Lookup key, matched exactly against a page's `colorTheme` prop.
    pub name: String,
    /// Palettes.
    #[serde(rename = "cssVars")]
    pub css_vars: ThemeVars,
}

impl ColorTheme {
    /// Palette for a mode.
    pub fn colors(&self, mode: ColorMode) -> &ThemeColors {
        match mode {
            ColorMode::Light => &self.css_vars.light,
            ColorMode::Dark => &self.css_vars.dark,
        }
    }

    /// Style values a page inherits from this theme, in merge order.
    pub fn style_overrides(&self, mode: ColorMode) -> [(&'static str, String); 3] {
        let c = self.colors(mode);
        [
            ("backgroundColor", format!("hsl({})", c.background)),
            ("color", format!("hsl({})", c.foreground)),
            ("borderColor", format!("hsl({})", c.border)),
        ]
    }
}

/// Ordered theme list, looked up by exact name.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ThemeTable {
    themes: Vec<ColorTheme>,
}

impl ThemeTable {
    /// Build a table, rejecting empty or duplicate names.
    pub fn new(themes: Vec<ColorTheme>) -> LayerResult<Self> {
        let table = Self { themes };
        table.validate()?;
        Ok(table)
    }

    /// Check names are non-empty and unique.
    pub fn validate(&self) -> LayerResult<()> {
        for (idx, theme) in self.themes.iter().enumerate() {
            if theme.name.is_empty() {
                return Err(LayerError::validation("theme name must be non-empty"));
            }
            if self.themes[..idx].iter().any(|t| t.name == theme.name) {
                return Err(LayerError::validation(format!(
                    "duplicate theme name '{}'",
                    theme.name
                )));
            }
        }
        Ok(())
    }

    /// First theme with this exact name.
    pub fn find(&self, name: &str) -> Option<&ColorTheme> {
        self.themes.iter().find(|t| t.name == name)
    }

    /// Themes in table order.
    pub fn themes(&self) -> &[ColorTheme] {
        &self.themes
    }

    /// Theme names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|t| t.name.as_str())
    }

    /// Built-in neutral palettes.
    pub fn builtin() -> Self {
        fn theme(name: &str, light: [&str; 3], dark: [&str; 3]) -> ColorTheme {
            let colors = |[background, foreground, border]: [&str; 3]| ThemeColors {
                background: background.to_owned(),
                foreground: foreground.to_owned(),
                border: border.to_owned(),
            };
            ColorTheme {
                name: name.to_owned(),
                css_vars: ThemeVars {
                    light: colors(light),
                    dark: colors(dark),
                },
            }
        }

        Self {
            themes: vec![
                theme(
                    "zinc",
                    ["0 0% 100%", "240 10% 3.9%", "240 5.9% 90%"],
                    ["240 10% 3.9%", "0 0% 98%", "240 3.7% 15.9%"],
                ),
                theme(
                    "slate",
                    ["0 0% 100%", "222.2 84% 4.9%", "214.3 31.8% 91.4%"],
                    ["222.2 84% 4.9%", "210 40% 98%", "217.2 32.6% 17.5%"],
                ),
                theme(
                    "stone",
                    ["0 0% 100%", "20 14.3% 4.1%", "20 5.9% 90%"],
                    ["20 14.3% 4.1%", "60 9.1% 97.8%", "12 6.5% 15.1%"],
                ),
                theme(
                    "gray",
                    ["0 0% 100%", "224 71.4% 4.1%", "220 13% 91%"],
                    ["224 71.4% 4.1%", "210 20% 98%", "215 27.9% 16.9%"],
                ),
                theme(
                    "neutral",
                    ["0 0% 100%", "0 0% 3.9%", "0 0% 89.8%"],
                    ["0 0% 3.9%", "0 0% 98%", "0 0% 14.9%"],
                ),
            ],
        }
    }
}

impl Default for ThemeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/table.rs"]
mod tests;

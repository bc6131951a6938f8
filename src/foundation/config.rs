use std::{path::Path, sync::Arc};

use anyhow::Context as _;

use crate::{
    foundation::error::{LayerError, LayerResult},
    foundation::ids::IdGenerator,
    model::layer::Props,
    registry::component::ComponentRegistry,
    store::layer_store::LayerStore,
    theme::table::{ColorMode, ThemeTable},
};

/// Builder settings, usually read from a JSON file.
///
/// Every field is optional in JSON; missing fields take the defaults below.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderConfig {
    /// Seed for layer id generation.
    pub id_seed: u64,
    /// Color themes available to pages.
    pub themes: ThemeTable,
    /// Props for the first page of a new store.
    pub page: PageDefaults,
}

/// Initial page settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageDefaults {
    /// Page name.
    pub name: String,
    /// Light or dark.
    pub mode: ColorMode,
    /// Theme name; must exist in [`BuilderConfig::themes`].
    pub color_theme: Option<String>,
    /// Root CSS class.
    pub class_name: Option<String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            id_seed: 0x9E37_79B9_7F4A_7C15,
            themes: ThemeTable::builtin(),
            page: PageDefaults::default(),
        }
    }
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            name: "Page 1".to_owned(),
            mode: ColorMode::Light,
            color_theme: None,
            class_name: None,
        }
    }
}

impl BuilderConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(raw: &str) -> LayerResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: &Path) -> LayerResult<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&raw)
    }

    /// Check theme names and the default page.
    pub fn validate(&self) -> LayerResult<()> {
        self.themes.validate()?;
        if self.page.name.is_empty() {
            return Err(LayerError::validation("page.name must be non-empty"));
        }
        if let Some(theme) = &self.page.color_theme {
            if self.themes.find(theme).is_none() {
                return Err(LayerError::validation(format!(
                    "page.colorTheme '{theme}' is not in the theme table"
                )));
            }
        }
        Ok(())
    }

    /// Page props derived from [`BuilderConfig::page`].
    pub fn page_props(&self) -> Props {
        let mut props = Props::new();
        let mode = match self.page.mode {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        };
        props.insert("mode".to_owned(), mode.into());
        if let Some(theme) = &self.page.color_theme {
            props.insert("colorTheme".to_owned(), theme.as_str().into());
        }
        if let Some(class) = &self.page.class_name {
            props.insert("className".to_owned(), class.as_str().into());
        }
        props
    }

    /// Id generator seeded from [`BuilderConfig::id_seed`].
    pub fn id_generator(&self) -> IdGenerator {
        IdGenerator::new(self.id_seed)
    }

    /// Fresh store with one page built from these settings.
    pub fn create_store(&self, registry: Arc<ComponentRegistry>) -> LayerStore {
        LayerStore::with_first_page(
            registry,
            self.id_generator(),
            &self.page.name,
            self.page_props(),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;

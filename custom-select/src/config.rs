//! Select configuration.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::item::SelectItem;

/// Called with the newly active item on every selection.
pub type SelectCallback = Box<dyn FnMut(&SelectItem)>;

/// Colour scheme class applied to the select root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub fn class_name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

/// Open/close animation class applied to the root and the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    #[default]
    Default,
    Opacity,
    Slide,
    Scale,
}

impl Animation {
    pub fn class_name(self) -> &'static str {
        match self {
            Animation::Default => "default",
            Animation::Opacity => "opacity",
            Animation::Slide => "slide",
            Animation::Scale => "scale",
        }
    }
}

/// Everything needed to mount a select.
///
/// Build it in code with [`SelectOptions::new`] and the chained setters, or
/// load it from TOML with [`SelectOptions::from_toml_str`]:
///
/// ```toml
/// selector = "#country"
/// image-path = "img/arrow.svg"
/// theme = "dark"
/// animation = "slide"
/// selected-id = 2
/// placeholder = "Choose a country"
///
/// [[items]]
/// id = 1
/// value = "us"
/// text = "United States"
///
/// [[items]]
/// id = 2
/// value = "de"
/// text = "Germany"
/// ```
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SelectOptions {
    /// Selector of the element the select is appended to.
    pub selector: String,
    pub items: Vec<SelectItem>,
    /// Source of the header's toggle icon.
    pub image_path: String,
    #[serde(default)]
    pub animation: Animation,
    #[serde(default)]
    pub theme: Theme,
    /// Item selected right after mounting. Id 0 is a valid choice.
    #[serde(default)]
    pub selected_id: Option<i64>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(skip)]
    pub on_select: Option<SelectCallback>,
}

impl std::fmt::Debug for SelectOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectOptions")
            .field("selector", &self.selector)
            .field("items", &self.items)
            .field("image_path", &self.image_path)
            .field("animation", &self.animation)
            .field("theme", &self.theme)
            .field("selected_id", &self.selected_id)
            .field("placeholder", &self.placeholder)
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

impl SelectOptions {
    pub fn new(
        selector: impl Into<String>,
        items: Vec<SelectItem>,
        image_path: impl Into<String>,
    ) -> Self {
        Self {
            selector: selector.into(),
            items,
            image_path: image_path.into(),
            animation: Animation::default(),
            theme: Theme::default(),
            selected_id: None,
            placeholder: None,
            on_select: None,
        }
    }

    /// Parse options from TOML. The callback is attached afterwards with
    /// [`SelectOptions::on_select`].
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }

    pub fn animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn selected_id(mut self, id: i64) -> Self {
        self.selected_id = Some(id);
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn on_select(mut self, callback: impl FnMut(&SelectItem) + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    /// Check the options before anything touches the document.
    ///
    /// Order: empty list, duplicate ids, initial selection. The mount
    /// selector is checked against the document by the caller.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.items.is_empty() {
            return Err(ConfigError::EmptyItemList);
        }
        if let Some(id) = crate::item::first_duplicate_id(&self.items) {
            return Err(ConfigError::DuplicateId(id));
        }
        if let Some(id) = self.selected_id {
            if crate::item::position_of(&self.items, id).is_none() {
                return Err(ConfigError::InvalidInitialSelection(id));
            }
        }
        Ok(())
    }
}

//! Structure of a select, as detached [`ElementSpec`]s.

use pagedom::ElementSpec;

use crate::item::SelectItem;

pub const ROOT_CLASS: &str = "custom-select";
pub const HEADER_CLASS: &str = "custom-select-header";
pub const TITLE_CLASS: &str = "custom-select-header-title";
pub const ICON_CLASS: &str = "custom-select-header-img";
pub const BODY_CLASS: &str = "custom-select-body";
pub const ITEM_CLASS: &str = "custom-select-body-item";

/// Present on the root while the list is open.
pub const OPEN_CLASS: &str = "show";
/// Present on the item element of the active option.
pub const ACTIVE_CLASS: &str = "active";

/// Root attribute carrying the instance tag.
pub const TAG_ATTR: &str = "data-select";
/// Item attribute carrying the option id.
pub const ID_ATTR: &str = "data-id";

/// Header title used when no usable placeholder is configured.
pub const DEFAULT_PLACEHOLDER: &str = "Select a value";

/// Header and body of a freshly generated select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectMarkup {
    pub header: ElementSpec,
    pub body: ElementSpec,
}

/// Generate the header and body for `items`.
pub fn generate(items: &[SelectItem], placeholder: Option<&str>, image_path: &str) -> SelectMarkup {
    let header = ElementSpec::new("button")
        .class(HEADER_CLASS)
        .child(
            ElementSpec::new("div")
                .class(TITLE_CLASS)
                .text(initial_title(placeholder)),
        )
        .child(
            ElementSpec::new("img")
                .class(ICON_CLASS)
                .attr("src", image_path)
                .attr("alt", "arrow"),
        );

    let body = ElementSpec::new("div")
        .class(BODY_CLASS)
        .children(items.iter().map(item_spec));

    SelectMarkup { header, body }
}

/// Element for one option. Items stay out of the page's tab sequence; they
/// are reached with the arrow keys while the list is open.
pub fn item_spec(item: &SelectItem) -> ElementSpec {
    ElementSpec::new("button")
        .class(ITEM_CLASS)
        .attr(ID_ATTR, item.id.to_string())
        .attr("tabindex", "-1")
        .text(item.text.clone())
}

/// The placeholder if it has visible content, else [`DEFAULT_PLACEHOLDER`].
pub fn initial_title(placeholder: Option<&str>) -> String {
    match placeholder {
        Some(p) if !p.trim().is_empty() => p.to_string(),
        _ => DEFAULT_PLACEHOLDER.to_string(),
    }
}

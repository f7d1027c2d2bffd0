use std::collections::BTreeMap;

/// Handle to an element owned by a [`crate::Document`].
///
/// Slots are never reused, so a handle to a removed element stays invalid
/// instead of silently pointing at a newer element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    // Identity
    pub(crate) tag: String,

    // Styling hooks
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: BTreeMap<String, String>,

    // Content
    pub(crate) text: Option<String>,

    // Tree links
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Element {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Own text, not including descendants.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parsed `tabindex` attribute, if present and numeric.
    pub fn tab_index(&self) -> Option<i32> {
        self.attribute("tabindex")
            .and_then(|v| v.trim().parse::<i32>().ok())
    }

    /// Whether the element takes focus without an explicit `tabindex`.
    pub fn is_natively_focusable(&self) -> bool {
        match self.tag.as_str() {
            "button" | "input" | "select" | "textarea" => true,
            "a" => self.attributes.contains_key("href"),
            _ => false,
        }
    }

    pub(crate) fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        true
    }

    pub(crate) fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        before != self.classes.len()
    }
}

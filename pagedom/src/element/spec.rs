use std::fmt;

/// Elements that never carry children or a closing tag.
const VOID_TAGS: &[&str] = &["img", "input", "br", "hr", "meta", "link"];

/// A detached element description.
///
/// Specs are plain values: building them touches no document. Pass one to
/// [`crate::Document::build`] to materialise it, or format it with `{}` to
/// get HTML-like markup.
///
/// # Example
///
/// ```
/// use pagedom::ElementSpec;
///
/// let spec = ElementSpec::new("button")
///     .class("primary")
///     .attr("data-id", "7")
///     .text("Save");
///
/// assert_eq!(spec.to_string(), r#"<button class="primary" data-id="7">Save</button>"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSpec {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Set an attribute, replacing an earlier value with the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementSpec>) -> Self {
        self.children.extend(children);
        self
    }
}

fn escape(s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for ch in s.chars() {
        match ch {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '"' => f.write_str("&quot;")?,
            _ => write!(f, "{ch}")?,
        }
    }
    Ok(())
}

impl fmt::Display for ElementSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        if !self.classes.is_empty() {
            f.write_str(" class=\"")?;
            escape(&self.classes.join(" "), f)?;
            f.write_str("\"")?;
        }
        for (name, value) in &self.attributes {
            write!(f, " {name}=\"")?;
            escape(value, f)?;
            f.write_str("\"")?;
        }
        f.write_str(">")?;

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return Ok(());
        }

        if let Some(text) = &self.text {
            escape(text, f)?;
        }
        for child in &self.children {
            write!(f, "{child}")?;
        }
        write!(f, "</{}>", self.tag)
    }
}

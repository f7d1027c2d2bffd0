//! CSS selectors over the document tree.
//!
//! Compound parts: `tag`, `*`, `#id`, `.class`, `[attr]`, `[attr=value]`,
//! `[attr="value"]`, `[attr='value']`, in any concatenation
//! (`button.item[data-id="3"]`). Compounds join with the descendant
//! (` `) and child (`>`) combinators, and a comma separates alternatives
//! (`#app .slot, main > div`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::document::Document;
use crate::element::{Element, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected character {found:?} at position {position}")]
    UnexpectedChar { found: char, position: usize },
    #[error("missing name after {0:?}")]
    MissingName(char),
    #[error("unterminated attribute selector")]
    UnterminatedAttribute,
    #[error("expected a selector at position {0}")]
    ExpectedCompound(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrTest {
    Exists,
    Equals(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrPart {
    name: String,
    test: AttrTest,
}

/// One element test, e.g. `button.item[data-id="3"]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttrPart>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// Compounds joined by combinators. `combinators[i]` sits between
/// `compounds[i]` and `compounds[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    compounds: Vec<Compound>,
    combinators: Vec<Combinator>,
}

/// A parsed selector list. Parse once with [`Selector::parse`] and reuse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    alternatives: Vec<Complex>,
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

struct Parser {
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl Parser {
    fn new(src: &str) -> Self {
        Self {
            chars: src.char_indices().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<(usize, char)> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.peek();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    /// Byte offset of the next char, or the input length at the end.
    fn offset(&self) -> usize {
        match self.peek() {
            Some((position, _)) => position,
            None => self.chars.last().map(|(i, ch)| i + ch.len_utf8()).unwrap_or(0),
        }
    }

    /// Skip whitespace, returning whether any was skipped.
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while matches!(self.peek(), Some((_, ch)) if ch.is_whitespace()) {
            self.pos += 1;
        }
        self.pos != start
    }

    fn name(&mut self) -> String {
        let mut out = String::new();
        while let Some((_, ch)) = self.peek() {
            if !is_name_char(ch) {
                break;
            }
            out.push(ch);
            self.pos += 1;
        }
        out
    }

    fn required_name(&mut self, after: char) -> Result<String, SelectorError> {
        let name = self.name();
        if name.is_empty() {
            return Err(SelectorError::MissingName(after));
        }
        Ok(name)
    }

    fn attribute(&mut self) -> Result<AttrPart, SelectorError> {
        let name = self.required_name('[')?;
        match self.bump() {
            Some((_, ']')) => Ok(AttrPart {
                name,
                test: AttrTest::Exists,
            }),
            Some((_, '=')) => {
                let value = self.attr_value()?;
                match self.bump() {
                    Some((_, ']')) => Ok(AttrPart {
                        name,
                        test: AttrTest::Equals(value),
                    }),
                    Some((position, found)) => {
                        Err(SelectorError::UnexpectedChar { found, position })
                    }
                    None => Err(SelectorError::UnterminatedAttribute),
                }
            }
            Some((position, found)) => Err(SelectorError::UnexpectedChar { found, position }),
            None => Err(SelectorError::UnterminatedAttribute),
        }
    }

    fn attr_value(&mut self) -> Result<String, SelectorError> {
        match self.peek() {
            Some((_, quote @ ('"' | '\''))) => {
                self.pos += 1;
                let mut out = String::new();
                loop {
                    match self.bump() {
                        Some((_, ch)) if ch == quote => return Ok(out),
                        Some((_, ch)) => out.push(ch),
                        None => return Err(SelectorError::UnterminatedAttribute),
                    }
                }
            }
            _ => Ok(self.name()),
        }
    }

    /// Parse one compound. Stops before whitespace, `>`, `,` or the end.
    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let start = self.pos;
        let mut compound = Compound::default();

        match self.peek() {
            Some((_, '*')) => self.pos += 1,
            Some((_, ch)) if ch.is_ascii_alphabetic() => {
                compound.tag = Some(self.name().to_ascii_lowercase());
            }
            _ => {}
        }

        while let Some((position, ch)) = self.peek() {
            match ch {
                '#' => {
                    self.pos += 1;
                    compound.id = Some(self.required_name('#')?);
                }
                '.' => {
                    self.pos += 1;
                    compound.classes.push(self.required_name('.')?);
                }
                '[' => {
                    self.pos += 1;
                    compound.attributes.push(self.attribute()?);
                }
                ',' | '>' => break,
                ch if ch.is_whitespace() => break,
                found => return Err(SelectorError::UnexpectedChar { found, position }),
            }
        }

        if self.pos == start {
            return Err(SelectorError::ExpectedCompound(self.offset()));
        }
        Ok(compound)
    }

    /// Parse compounds and combinators up to a `,` or the end.
    fn complex(&mut self) -> Result<Complex, SelectorError> {
        let mut complex = Complex {
            compounds: vec![self.compound()?],
            combinators: Vec::new(),
        };

        loop {
            let spaced = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some((_, ',')) => return Ok(complex),
                Some((_, '>')) => {
                    self.pos += 1;
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(_) if spaced => Combinator::Descendant,
                Some((position, found)) => {
                    return Err(SelectorError::UnexpectedChar { found, position })
                }
            };
            complex.combinators.push(combinator);
            complex.compounds.push(self.compound()?);
        }
    }
}

impl Compound {
    fn matches(&self, el: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if el.tag() != tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attribute("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| el.has_class(c)) {
            return false;
        }
        self.attributes.iter().all(|part| match &part.test {
            AttrTest::Exists => el.attribute(&part.name).is_some(),
            AttrTest::Equals(v) => el.attribute(&part.name) == Some(v.as_str()),
        })
    }
}

impl Complex {
    /// Match right to left: `compounds[idx]` against `node`, then the
    /// combinator to its left against the ancestor chain.
    fn matches_at(&self, doc: &Document, node: NodeId, idx: usize) -> bool {
        let Some(el) = doc.element(node) else {
            return false;
        };
        if !self.compounds[idx].matches(el) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        match self.combinators[idx - 1] {
            Combinator::Child => el
                .parent()
                .is_some_and(|parent| self.matches_at(doc, parent, idx - 1)),
            Combinator::Descendant => {
                let mut current = el.parent();
                while let Some(ancestor) = current {
                    if self.matches_at(doc, ancestor, idx - 1) {
                        return true;
                    }
                    current = doc.parent(ancestor);
                }
                false
            }
        }
    }
}

impl Selector {
    pub fn parse(src: &str) -> Result<Self, SelectorError> {
        if src.trim().is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut parser = Parser::new(src);
        let mut alternatives = Vec::new();
        loop {
            parser.skip_whitespace();
            alternatives.push(parser.complex()?);
            match parser.bump() {
                Some((_, ',')) => continue,
                Some((position, found)) => {
                    return Err(SelectorError::UnexpectedChar { found, position })
                }
                None => return Ok(Self { alternatives }),
            }
        }
    }

    /// Selector matching a single class name.
    pub fn class(name: impl Into<String>) -> Self {
        let compound = Compound {
            classes: vec![name.into()],
            ..Default::default()
        };
        Self {
            alternatives: vec![Complex {
                compounds: vec![compound],
                combinators: Vec::new(),
            }],
        }
    }

    /// Whether `node` matches any alternative. Combinators are checked
    /// against the node's ancestors in `doc`.
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        self.alternatives.iter().any(|complex| {
            complex
                .compounds
                .len()
                .checked_sub(1)
                .is_some_and(|last| complex.matches_at(doc, node, last))
        })
    }
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bare = self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty();
        if bare {
            return f.write_str("*");
        }
        if let Some(tag) = &self.tag {
            f.write_str(tag)?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{id}")?;
        }
        for class in &self.classes {
            write!(f, ".{class}")?;
        }
        for part in &self.attributes {
            match &part.test {
                AttrTest::Exists => write!(f, "[{}]", part.name)?,
                AttrTest::Equals(v) => write!(f, "[{}=\"{}\"]", part.name, v)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, compound) in self.compounds.iter().enumerate() {
            if i > 0 {
                match self.combinators[i - 1] {
                    Combinator::Descendant => f.write_str(" ")?,
                    Combinator::Child => f.write_str(" > ")?,
                }
            }
            write!(f, "{compound}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, complex) in self.alternatives.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{complex}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(sel: &Selector) -> &Compound {
        &sel.alternatives[0].compounds[0]
    }

    #[test]
    fn test_parse_compound() {
        let sel = Selector::parse(r#"button.item.active[data-id="3"]"#).unwrap();
        assert_eq!(single(&sel).tag.as_deref(), Some("button"));
        assert_eq!(single(&sel).classes, vec!["item", "active"]);
        assert_eq!(sel.to_string(), r#"button.item.active[data-id="3"]"#);
    }

    #[test]
    fn test_parse_id_and_bare_attribute() {
        let sel = Selector::parse("#app[hidden]").unwrap();
        assert_eq!(single(&sel).id.as_deref(), Some("app"));
        assert_eq!(single(&sel).attributes.len(), 1);
        assert_eq!(single(&sel).attributes[0].test, AttrTest::Exists);
    }

    #[test]
    fn test_parse_unquoted_and_single_quoted_values() {
        let a = Selector::parse("[data-id=3]").unwrap();
        let b = Selector::parse("[data-id='3']").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_combinators() {
        let sel = Selector::parse("  #app   .slot>button  ").unwrap();
        let complex = &sel.alternatives[0];
        assert_eq!(complex.compounds.len(), 3);
        assert_eq!(
            complex.combinators,
            vec![Combinator::Descendant, Combinator::Child]
        );
        assert_eq!(sel.to_string(), "#app .slot > button");
    }

    #[test]
    fn test_parse_selector_list() {
        let sel = Selector::parse(r#"main > div,[data-id="a,b"] , .x"#).unwrap();
        assert_eq!(sel.alternatives.len(), 3);
        assert_eq!(sel.to_string(), r#"main > div, [data-id="a,b"], .x"#);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Selector::parse("   "), Err(SelectorError::Empty));
        assert_eq!(Selector::parse("."), Err(SelectorError::MissingName('.')));
        assert_eq!(
            Selector::parse("[data-id=\"3"),
            Err(SelectorError::UnterminatedAttribute)
        );
        assert_eq!(
            Selector::parse("div!"),
            Err(SelectorError::UnexpectedChar {
                found: '!',
                position: 3
            })
        );
        assert_eq!(
            Selector::parse("div >"),
            Err(SelectorError::ExpectedCompound(5))
        );
        assert_eq!(
            Selector::parse("a,,b"),
            Err(SelectorError::ExpectedCompound(2))
        );
        assert_eq!(
            Selector::parse("> a"),
            Err(SelectorError::ExpectedCompound(0))
        );
    }

    #[test]
    fn test_universal_selector_displays_as_star() {
        assert_eq!(Selector::parse("*").unwrap().to_string(), "*");
    }
}

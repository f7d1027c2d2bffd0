use serde::Deserialize;

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectItem {
    /// Caller-assigned id, unique within one select.
    pub id: i64,
    /// Machine value.
    pub value: String,
    /// Label shown to the user.
    pub text: String,
}

impl SelectItem {
    pub fn new(id: i64, value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
            text: text.into(),
        }
    }
}

/// Position of the item with `id`. `Some(0)` is a hit like any other.
pub fn position_of<'a, I>(items: I, id: i64) -> Option<usize>
where
    I: IntoIterator<Item = &'a SelectItem>,
{
    items.into_iter().position(|item| item.id == id)
}

/// First id that appears more than once, if any.
pub fn first_duplicate_id(items: &[SelectItem]) -> Option<i64> {
    let mut seen = std::collections::HashSet::with_capacity(items.len());
    items
        .iter()
        .map(|item| item.id)
        .find(|id| !seen.insert(*id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<SelectItem> {
        vec![
            SelectItem::new(10, "a", "A"),
            SelectItem::new(20, "b", "B"),
            SelectItem::new(30, "c", "C"),
        ]
    }

    #[test]
    fn test_position_of_first_item_is_found() {
        assert_eq!(position_of(&items(), 10), Some(0));
        assert_eq!(position_of(&items(), 30), Some(2));
        assert_eq!(position_of(&items(), 99), None);
    }

    #[test]
    fn test_first_duplicate_id() {
        let mut list = items();
        assert_eq!(first_duplicate_id(&list), None);
        list.push(SelectItem::new(20, "dup", "Dup"));
        assert_eq!(first_duplicate_id(&list), Some(20));
    }
}

use crate::element::NodeId;

/// Input events delivered to a [`crate::Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Primary-button click on an element
    Click { target: NodeId },
    /// Key press, targeted at the focused element (or the root)
    KeyDown { target: NodeId, key: Key },
}

/// Event type used when registering listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
}

impl Event {
    pub fn click(target: NodeId) -> Self {
        Event::Click { target }
    }

    pub fn key_down(target: NodeId, key: Key) -> Self {
        Event::KeyDown { target, key }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::Click { .. } => EventKind::Click,
            Event::KeyDown { .. } => EventKind::KeyDown,
        }
    }

    pub fn target(&self) -> NodeId {
        match self {
            Event::Click { target, .. } | Event::KeyDown { target, .. } => *target,
        }
    }

    /// The pressed key, for key events.
    pub fn key(&self) -> Option<Key> {
        match self {
            Event::KeyDown { key, .. } => Some(*key),
            Event::Click { .. } => None,
        }
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Keys without a [`Key`] counterpart (media keys, bare modifiers, ...)
/// are handed back unchanged.
impl TryFrom<crossterm::event::KeyCode> for Key {
    type Error = crossterm::event::KeyCode;

    fn try_from(code: crossterm::event::KeyCode) -> Result<Self, Self::Error> {
        use crossterm::event::KeyCode;
        let key = match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            other => return Err(other),
        };
        Ok(key)
    }
}

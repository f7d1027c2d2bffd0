pub mod document;
pub mod element;
pub mod event;
pub mod focus;
pub mod listener;
pub mod outline;
pub mod selector;
pub mod terminal;

mod dispatch;

pub use document::Document;
pub use element::{Element, ElementSpec, NodeId};
pub use event::{Event, EventKind, Key};
pub use focus::{collect_tabbable, FocusState};
pub use listener::{Listener, ListenerId, ListenerTarget};
pub use outline::{hit_test, outline, OutlineRow};
pub use selector::{Selector, SelectorError};
pub use terminal::{StyledLine, Terminal};

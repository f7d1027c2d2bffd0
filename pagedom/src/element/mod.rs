mod node;
mod spec;

pub use node::{Element, NodeId};
pub use spec::ElementSpec;

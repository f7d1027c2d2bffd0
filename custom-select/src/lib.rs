//! A dropdown select widget mounted into a [`pagedom::Document`].
//!
//! The widget builds its own subtree under a mount point, listens for clicks
//! and arrow keys, and reports every selection through a callback.
//!
//! ```
//! use custom_select::{CustomSelect, SelectItem, SelectOptions};
//! use pagedom::{Document, ElementSpec};
//!
//! let mut doc = Document::new();
//! let mount = doc.build(&ElementSpec::new("div").attr("id", "app"));
//! let body = doc.body();
//! doc.append_child(body, mount);
//!
//! let select = CustomSelect::mount(
//!     &mut doc,
//!     SelectOptions::new(
//!         "#app",
//!         vec![SelectItem::new(1, "us", "United States"), SelectItem::new(2, "de", "Germany")],
//!         "arrow.svg",
//!     )
//!     .selected_id(2),
//! )?;
//!
//! assert_eq!(select.get_active_option().map(|item| item.id), Some(2));
//! # Ok::<(), custom_select::ConfigError>(())
//! ```

pub mod config;
pub mod error;
pub mod item;
pub mod markup;
pub mod select;
pub mod tag;

pub use config::{Animation, SelectCallback, SelectOptions, Theme};
pub use error::{ConfigError, OptionError};
pub use item::SelectItem;
pub use select::CustomSelect;
pub use tag::InstanceTag;

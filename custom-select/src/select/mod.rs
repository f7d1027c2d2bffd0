//! The select widget and its control surface.

mod events;
mod state;

use std::cell::RefCell;
use std::rc::Rc;

use pagedom::{Document, ElementSpec, NodeId, Selector};

use crate::config::{SelectCallback, SelectOptions};
use crate::error::{ConfigError, OptionError};
use crate::item::SelectItem;
use crate::markup::{self, BODY_CLASS, HEADER_CLASS, ITEM_CLASS, ROOT_CLASS, TAG_ATTR, TITLE_CLASS};
use crate::tag::InstanceTag;

use state::{SelectParts, SelectState, Visibility};

/// State and callback shared between the handle and its listeners.
pub(crate) struct Shared {
    state: RefCell<SelectState>,
    on_select: RefCell<Option<SelectCallback>>,
}

impl Shared {
    /// The single path through which the active option changes.
    fn select(&self, doc: &mut Document, id: i64) {
        let chosen = self.state.borrow_mut().select_item(doc, id);
        if let Some(item) = chosen {
            self.notify(&item);
        }
    }

    fn notify(&self, item: &SelectItem) {
        // Taken out for the call so the callback may use the select again.
        let taken = self.on_select.borrow_mut().take();
        let Some(mut callback) = taken else {
            return;
        };
        callback(item);
        let mut slot = self.on_select.borrow_mut();
        if slot.is_none() && !self.state.borrow().destroyed {
            *slot = Some(callback);
        }
    }
}

/// A dropdown select mounted into a [`Document`].
///
/// Handles are cheap to clone and all refer to the same instance. Every
/// call that changes the select takes the document it lives in.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use custom_select::{CustomSelect, SelectItem, SelectOptions, Theme};
/// use pagedom::{Document, ElementSpec};
///
/// let mut doc = Document::new();
/// let mount = doc.build(&ElementSpec::new("div").attr("id", "priority"));
/// let body = doc.body();
/// doc.append_child(body, mount);
///
/// let chosen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&chosen);
///
/// let select = CustomSelect::mount(
///     &mut doc,
///     SelectOptions::new(
///         "#priority",
///         vec![SelectItem::new(1, "low", "Low"), SelectItem::new(2, "high", "High")],
///         "arrow.svg",
///     )
///     .theme(Theme::Dark)
///     .on_select(move |item| sink.borrow_mut().push(item.value.clone())),
/// )?;
///
/// select.show_select(&mut doc);
/// select.set_active_option(&mut doc, 2);
///
/// assert!(!select.is_open());
/// assert_eq!(*chosen.borrow(), vec!["high".to_string()]);
/// # Ok::<(), custom_select::ConfigError>(())
/// ```
#[derive(Clone)]
pub struct CustomSelect {
    shared: Rc<Shared>,
}

impl std::fmt::Debug for CustomSelect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomSelect")
            .field("state", &self.shared.state)
            .finish()
    }
}

impl CustomSelect {
    /// Validate `options`, build the select under its mount point, apply the
    /// initial selection and start listening for input.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] for an empty item list, duplicate ids, an initial
    /// selection that names no item, or a selector that matches nothing.
    pub fn mount(doc: &mut Document, options: SelectOptions) -> Result<Self, ConfigError> {
        options.validate()?;

        let mount_point = Selector::parse(&options.selector)
            .ok()
            .and_then(|selector| doc.query(&selector, None))
            .ok_or_else(|| ConfigError::InvalidMountSelector(options.selector.clone()))?;

        let SelectOptions {
            items,
            image_path,
            animation,
            theme,
            selected_id,
            placeholder,
            on_select,
            ..
        } = options;

        let tag = InstanceTag::new();
        let markup = markup::generate(&items, placeholder.as_deref(), &image_path);
        let root = doc.build(
            &ElementSpec::new("div")
                .class(ROOT_CLASS)
                .class(theme.class_name())
                .class(animation.class_name())
                .attr(TAG_ATTR, tag.as_str())
                .child(markup.header)
                .child(markup.body),
        );

        let parts = match locate_parts(doc, root) {
            Ok(parts) => parts,
            Err(e) => {
                doc.remove(root);
                return Err(e);
            }
        };
        doc.add_class(parts.body, animation.class_name());
        let item_nodes = doc.query_all(&Selector::class(ITEM_CLASS), Some(parts.body));

        doc.append_child(mount_point, root);

        let state = SelectState::new(
            tag,
            parts,
            items,
            item_nodes,
            markup::initial_title(placeholder.as_deref()),
        );
        let select = Self {
            shared: Rc::new(Shared {
                state: RefCell::new(state),
                on_select: RefCell::new(on_select),
            }),
        };

        if let Some(id) = selected_id {
            select.shared.select(doc, id);
        }

        events::register(&select.shared, doc);

        log::debug!(
            "mounted select {} under {} with {} options",
            select.tag(),
            mount_point,
            select.items().len()
        );
        Ok(select)
    }

    // -------------------------------------------------------------------------
    // Visibility
    // -------------------------------------------------------------------------

    pub fn show_select(&self, doc: &mut Document) {
        self.set_visibility(doc, Visibility::Shown);
    }

    pub fn hide_select(&self, doc: &mut Document) {
        self.set_visibility(doc, Visibility::Hidden);
    }

    fn set_visibility(&self, doc: &mut Document, visibility: Visibility) {
        let mut state = self.shared.state.borrow_mut();
        if state.destroyed {
            log::warn!("select {} is deleted; ignoring {:?}", state.tag, visibility);
            return;
        }
        state.set_visibility(doc, visibility);
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// The active option, or None before the first selection.
    pub fn get_active_option(&self) -> Option<SelectItem> {
        self.shared.state.borrow().active().cloned()
    }

    /// Select the option with `id` as if it had been clicked.
    ///
    /// Unknown ids are ignored: nothing changes and the callback does not
    /// run.
    pub fn set_active_option(&self, doc: &mut Document, id: i64) {
        {
            let state = self.shared.state.borrow();
            if state.destroyed {
                log::warn!("select {} is deleted; ignoring selection of {}", state.tag, id);
                return;
            }
        }
        self.shared.select(doc, id);
    }

    // -------------------------------------------------------------------------
    // Option list
    // -------------------------------------------------------------------------

    /// Append an option.
    ///
    /// # Errors
    ///
    /// [`OptionError::DuplicateId`] if the id is already in use.
    pub fn add_select_option(
        &self,
        doc: &mut Document,
        item: SelectItem,
    ) -> Result<(), OptionError> {
        let mut state = self.shared.state.borrow_mut();
        if state.destroyed {
            return Err(OptionError::Destroyed);
        }
        state.add_item(doc, item)
    }

    /// Remove an option. Removing the active option clears the selection and
    /// puts the placeholder back in the header.
    ///
    /// # Errors
    ///
    /// [`OptionError::EmptyList`] if it is the last option,
    /// [`OptionError::NotFound`] if no option has this id.
    pub fn delete_select_option(&self, doc: &mut Document, id: i64) -> Result<(), OptionError> {
        let mut state = self.shared.state.borrow_mut();
        if state.destroyed {
            return Err(OptionError::Destroyed);
        }
        state.delete_item(doc, id)
    }

    // -------------------------------------------------------------------------
    // Teardown
    // -------------------------------------------------------------------------

    /// Remove this select's listeners and elements.
    ///
    /// Only the three listeners registered by this instance are removed.
    /// Other clones of the handle stay valid but inert.
    pub fn delete_select(self, doc: &mut Document) {
        let mut state = self.shared.state.borrow_mut();
        if state.destroyed {
            return;
        }

        for id in std::mem::take(&mut state.listeners) {
            doc.remove_event_listener(id);
        }
        doc.remove(state.parts.root);
        state.destroyed = true;
        drop(state);

        self.shared.on_select.borrow_mut().take();
        log::debug!("deleted select {}", self.tag());
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.shared.state.borrow().is_open()
    }

    pub fn is_deleted(&self) -> bool {
        self.shared.state.borrow().destroyed
    }

    /// Current options in display order.
    pub fn items(&self) -> Vec<SelectItem> {
        self.shared.state.borrow().items()
    }

    /// Number of elements arrow keys cycle through: header plus options.
    pub fn focus_order_len(&self) -> usize {
        self.shared.state.borrow().focus_order_len()
    }

    pub fn focus_cursor(&self) -> usize {
        self.shared.state.borrow().focus_cursor()
    }

    pub fn tag(&self) -> InstanceTag {
        self.shared.state.borrow().tag.clone()
    }

    /// Root element of the select.
    pub fn root(&self) -> NodeId {
        self.shared.state.borrow().parts.root
    }

    pub fn header(&self) -> NodeId {
        self.shared.state.borrow().parts.header
    }
}

fn locate_parts(doc: &Document, root: NodeId) -> Result<SelectParts, ConfigError> {
    let find = |class: &'static str| {
        doc.query(&Selector::class(class), Some(root))
            .ok_or(ConfigError::MalformedMarkup(class))
    };

    Ok(SelectParts {
        root,
        header: find(HEADER_CLASS)?,
        title: find(TITLE_CLASS)?,
        body: find(BODY_CLASS)?,
    })
}

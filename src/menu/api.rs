//! Public operations of [`ContextMenu`].

use std::rc::Rc;

use egui::Pos2;
use log::debug;

use super::{ContextMenu, MenuState};
use crate::host::{ActiveMenu, MenuHost, MenuId};
use crate::menu::items::MenuItem;
use crate::menu::options::MenuOptions;

impl<D: 'static> ContextMenu<D> {
    /// Create a closed menu without items
    ///
    /// Initial payload and width are taken from `options`.
    ///
    /// # Arguments
    /// * `host` - Host the menu is drawn on
    /// * `options` - Callbacks, payload and width
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let menu = ContextMenu::new(&host, MenuOptions::new().data("A").width(200.0));
    /// ```
    pub fn new(host: &MenuHost, options: MenuOptions<D>) -> Self
    where
        D: Clone,
    {
        Self {
            state: Rc::new(MenuState::new(host, options)),
        }
    }

    /// Create a closed menu with default options
    pub fn with_defaults(host: &MenuHost) -> Self
    where
        D: Clone,
    {
        Self::new(host, MenuOptions::default())
    }

    /// Merge `options` over the current options
    ///
    /// Fields set in `options` win. When the merged width or payload differ
    /// from the stored ones, [`set_width`](Self::set_width) or
    /// [`set_data`](Self::set_data) runs with the new value.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// menu.set_options(MenuOptions::new().on_hide(|| println!("closed")));
    /// ```
    pub fn set_options(&self, options: MenuOptions<D>) -> &Self
    where
        D: Clone + PartialEq,
    {
        let (width, data) = {
            let mut current = self.state.options.borrow_mut();
            current.merge(options);
            (current.width, current.data.clone())
        };

        if self.state.width.get() != width {
            self.set_width(width);
        }
        if *self.state.data.borrow() != data {
            self.set_data(data);
        }
        self
    }

    /// Replace the payload and fire `on_data_change` with the previous one
    ///
    /// The payload is replaced even when it equals the current one.
    ///
    /// # Arguments
    /// * `data` - New payload, `None` clears it
    pub fn set_data(&self, data: impl Into<Option<D>>) -> &Self {
        let previous = self.state.data.replace(data.into());
        let callback = self.state.options.borrow().on_data_change.clone();
        if let Some(callback) = callback {
            callback(previous.as_ref());
        }
        self
    }

    /// Force the menu width and re-layout if the menu is open
    ///
    /// # Arguments
    /// * `width` - Width in points, `None` sizes the menu to its content
    pub fn set_width(&self, width: impl Into<Option<f32>>) -> &Self {
        self.state.width.set(width.into());
        self.state.update_view();
        self
    }

    /// Append an item and re-layout if the menu is open
    ///
    /// # Examples
    ///
    /// ```ignore
    /// menu.add_item(MenuItem::text("One"))
    ///     .add_item(MenuItem::html("<b>Two</b>"));
    /// ```
    pub fn add_item(&self, item: MenuItem) -> &Self {
        self.state.items.borrow_mut().push(Rc::new(item));
        self.state.update_view();
        self
    }

    /// Open the menu with its upper-left corner near `(x, y)`
    ///
    /// The open menu of the host, this one included, is hidden first through
    /// the normal path, so its cancel and hide callbacks fire. Outside clicks
    /// are ignored until the end of the current turn so the click that opened
    /// the menu does not close it.
    ///
    /// # Arguments
    /// * `x`, `y` - Requested position, adjusted to keep the menu on screen
    pub fn show(&self, x: f32, y: f32) -> &Self {
        let host = &self.state.host;
        if let Some(previous) = host.current_menu() {
            debug!("menu {:?} replaces {:?}", self.state.id, previous.id());
            previous.hide(false);
        }
        host.open(self.state.clone());

        self.state.anchor.set(Pos2::new(x, y));
        let container = host.with_surface(|surface| surface.create_container());
        self.state.container.set(Some(container));
        self.state.update_view();

        let timer = host.arm_suppression();
        if let Some(stale) = self.state.suppression.replace(Some(timer)) {
            stale.cancel();
        }

        self.state.fire(|options| options.on_show.clone());
        self
    }

    /// Open the menu at `position`
    pub fn show_at(&self, position: Pos2) -> &Self {
        self.show(position.x, position.y)
    }

    /// Close the menu
    ///
    /// Does nothing if the menu is closed. Fires `on_cancel` unless
    /// `suppress_cancel` is set, then always fires `on_hide`.
    pub fn hide(&self, suppress_cancel: bool) -> &Self {
        self.state.hide(suppress_cancel);
        self
    }

    /// Identifier of this menu within its host
    pub fn id(&self) -> MenuId {
        self.state.id
    }

    /// Whether the menu currently owns a container on the surface
    pub fn is_open(&self) -> bool {
        self.state.container.get().is_some()
    }

    /// Current payload
    pub fn data(&self) -> Option<D>
    where
        D: Clone,
    {
        self.state.data.borrow().clone()
    }

    /// Forced width, `None` when the menu sizes to its content
    pub fn width(&self) -> Option<f32> {
        self.state.width.get()
    }

    /// Requested position of the last [`show`](Self::show), before clamping
    pub fn anchor(&self) -> Pos2 {
        self.state.anchor.get()
    }

    /// Number of items added so far
    pub fn item_count(&self) -> usize {
        self.state.items.borrow().len()
    }

    /// Item at `index`, in insertion order
    pub fn item(&self, index: usize) -> Option<Rc<MenuItem>> {
        self.state.item(index)
    }
}

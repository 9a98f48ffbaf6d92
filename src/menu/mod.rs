//! The context menu widget and its building blocks.

pub mod api;
pub mod event;
pub mod items;
pub mod options;
mod routing;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use egui::Pos2;
use log::{debug, trace};

use crate::host::{ActiveMenu, MenuHost, MenuId};
use crate::menu::event::MenuEvent;
use crate::menu::items::MenuItem;
use crate::menu::options::{Callback, MenuOptions};
use crate::surface::ContainerId;
use crate::timer::TimerHandle;
use crate::utils::placement::clamp_to_viewport;

/// A popup menu shown at a screen position.
///
/// `ContextMenu` is a handle: clones refer to the same menu. A menu is created
/// closed, can be configured and filled at any time, and opened with
/// [`show`](ContextMenu::show) as often as needed. At most one menu of a
/// [`MenuHost`] is open at a time.
///
/// `D` is the payload type attached to the menu, see
/// [`set_data`](ContextMenu::set_data).
pub struct ContextMenu<D: 'static = ()> {
    pub(crate) state: Rc<MenuState<D>>,
}

impl<D: 'static> Clone for ContextMenu<D> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<D: fmt::Debug + 'static> fmt::Debug for ContextMenu<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMenu")
            .field("id", &self.state.id)
            .field("data", &self.state.data.borrow())
            .field("width", &self.state.width.get())
            .field("items", &self.state.items.borrow().len())
            .field("open", &self.state.container.get().is_some())
            .finish()
    }
}

pub(crate) struct MenuState<D> {
    pub(crate) id: MenuId,
    pub(crate) host: MenuHost,
    pub(crate) options: RefCell<MenuOptions<D>>,
    pub(crate) data: RefCell<Option<D>>,
    pub(crate) width: Cell<Option<f32>>,
    pub(crate) items: RefCell<Vec<Rc<MenuItem>>>,
    pub(crate) anchor: Cell<Pos2>,
    pub(crate) container: Cell<Option<ContainerId>>,
    pub(crate) suppression: RefCell<Option<TimerHandle>>,
}

impl<D> MenuState<D> {
    pub(crate) fn new(host: &MenuHost, options: MenuOptions<D>) -> Self
    where
        D: Clone,
    {
        Self {
            id: host.next_menu_id(),
            host: host.clone(),
            data: RefCell::new(options.data.clone()),
            width: Cell::new(options.width),
            options: RefCell::new(options),
            items: RefCell::new(Vec::new()),
            anchor: Cell::new(Pos2::ZERO),
            container: Cell::new(None),
            suppression: RefCell::new(None),
        }
    }

    pub(crate) fn item(&self, index: usize) -> Option<Rc<MenuItem>> {
        self.items.borrow().get(index).cloned()
    }

    /// Fire a no-argument callback picked from the options, with no borrow held.
    fn fire(&self, pick: impl FnOnce(&MenuOptions<D>) -> Option<Callback>) {
        let callback = pick(&self.options.borrow());
        if let Some(callback) = callback {
            callback();
        }
    }
}

impl<D> ActiveMenu for MenuState<D> {
    fn id(&self) -> MenuId {
        self.id
    }

    fn container(&self) -> Option<ContainerId> {
        self.container.get()
    }

    fn hide(&self, suppress_cancel: bool) {
        let Some(container) = self.container.take() else {
            return;
        };

        self.host.with_surface(|surface| surface.destroy_container(container));
        self.host.clear(self.id);

        if let Some(timer) = self.suppression.borrow_mut().take() {
            if timer.is_pending() {
                timer.cancel();
                self.host.release_suppression();
            }
        }

        debug!("menu {:?} hidden (cancel suppressed: {suppress_cancel})", self.id);

        if !suppress_cancel {
            self.fire(|options| options.on_cancel.clone());
        }
        self.fire(|options| options.on_hide.clone());
    }

    fn update_view(&self) {
        let Some(container) = self.container.get() else {
            return;
        };

        let items = self.items.borrow().clone();
        let width = self.width.get();
        let anchor = self.anchor.get();
        let margin = self.host.margin();

        let position = self.host.with_surface(|surface| {
            surface.clear_rows(container);
            for item in &items {
                surface.append_row(container, item.content());
            }
            surface.set_width(container, width);

            let extent = surface.extent(container);
            let position = clamp_to_viewport(anchor, extent, surface.viewport_size(), margin);
            surface.set_position(container, position);
            position
        });

        trace!(
            "menu {:?} laid out {} row(s) at {:?} (anchor {:?})",
            self.id,
            items.len(),
            position,
            anchor
        );
    }

    fn route(&self, event: &MenuEvent) {
        routing::route(self, event);
    }
}

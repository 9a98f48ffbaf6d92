//! Shared registry of the open menu and the outside-click rule.

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, trace, warn};

use crate::config::MenuStyle;
use crate::menu::event::{MenuEvent, MenuEventKind};
use crate::surface::{ContainerId, Surface, SurfaceEvent};
use crate::timer::{Deferred, TimerHandle};

/// Identifier of a menu, unique within its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(pub u64);

/// The part of a menu the host needs once it is open.
pub(crate) trait ActiveMenu {
    fn id(&self) -> MenuId;
    fn container(&self) -> Option<ContainerId>;
    fn hide(&self, suppress_cancel: bool);
    fn update_view(&self);
    fn route(&self, event: &MenuEvent);
}

struct HostState {
    surface: RefCell<Box<dyn Surface>>,
    current: RefCell<Option<Rc<dyn ActiveMenu>>>,
    ignore_global_click: Cell<bool>,
    deferred: Deferred,
    style: RefCell<MenuStyle>,
    next_menu_id: Cell<u64>,
}

/// Shared state of every menu drawn on one surface.
///
/// The host keeps track of the single open menu, installs the outside-click
/// rule and owns the surface. Cloning a host is cheap, clones share state.
///
/// # Examples
///
/// ```ignore
/// let (host, layer) = EguiSurface::host(MenuStyle::default());
/// let menu = ContextMenu::new(&host, MenuOptions::<()>::new());
/// menu.add_item(MenuItem::text("Copy")).show(120.0, 80.0);
///
/// // once per frame, after the application UI
/// layer.show(ctx, &host);
/// ```
#[derive(Clone)]
pub struct MenuHost {
    state: Rc<HostState>,
}

impl MenuHost {
    /// Create a host drawing on `surface` with the default style.
    pub fn new(surface: impl Surface + 'static) -> Self {
        Self::with_style(surface, MenuStyle::default())
    }

    /// Create a host drawing on `surface` with `style`.
    pub fn with_style(surface: impl Surface + 'static, style: MenuStyle) -> Self {
        Self {
            state: Rc::new(HostState {
                surface: RefCell::new(Box::new(surface)),
                current: RefCell::new(None),
                ignore_global_click: Cell::new(false),
                deferred: Deferred::new(),
                style: RefCell::new(style),
                next_menu_id: Cell::new(0),
            }),
        }
    }

    /// Current style shared by every menu of this host.
    pub fn style(&self) -> Ref<'_, MenuStyle> {
        self.state.style.borrow()
    }

    /// Replace the style and re-layout the open menu.
    pub fn set_style(&self, style: MenuStyle) {
        *self.state.style.borrow_mut() = style;
        self.refresh();
    }

    pub(crate) fn margin(&self) -> f32 {
        self.state.style.borrow().margin
    }

    pub(crate) fn next_menu_id(&self) -> MenuId {
        let id = self.state.next_menu_id.get() + 1;
        self.state.next_menu_id.set(id);
        MenuId(id)
    }

    /// Register `menu` as the open menu.
    pub(crate) fn open(&self, menu: Rc<dyn ActiveMenu>) {
        debug!("menu {:?} is now open", menu.id());
        *self.state.current.borrow_mut() = Some(menu);
    }

    pub(crate) fn current_menu(&self) -> Option<Rc<dyn ActiveMenu>> {
        self.state.current.borrow().clone()
    }

    /// Forget the open menu if it is `id`.
    pub(crate) fn clear(&self, id: MenuId) {
        let mut current = self.state.current.borrow_mut();
        if current.as_ref().is_some_and(|menu| menu.id() == id) {
            *current = None;
        }
    }

    /// Identifier of the open menu.
    pub fn current(&self) -> Option<MenuId> {
        self.state.current.borrow().as_ref().map(|menu| menu.id())
    }

    /// Whether one of this host's menus is open.
    pub fn has_open_menu(&self) -> bool {
        self.state.current.borrow().is_some()
    }

    /// Hide the open menu, if any.
    pub fn hide_current(&self, suppress_cancel: bool) {
        if let Some(menu) = self.current_menu() {
            menu.hide(suppress_cancel);
        }
    }

    /// Run `f` with the surface borrowed. `f` must not call back into menus.
    pub(crate) fn with_surface<R>(&self, f: impl FnOnce(&mut dyn Surface) -> R) -> R {
        let mut surface = self.state.surface.borrow_mut();
        f(&mut **surface)
    }

    /// Ignore outside clicks until the end of the current turn.
    pub(crate) fn arm_suppression(&self) -> TimerHandle {
        self.state.ignore_global_click.set(true);
        let state: Weak<HostState> = Rc::downgrade(&self.state);
        self.state.deferred.schedule(move || {
            if let Some(state) = state.upgrade() {
                state.ignore_global_click.set(false);
            }
        })
    }

    pub(crate) fn release_suppression(&self) {
        self.state.ignore_global_click.set(false);
    }

    /// Whether outside clicks are currently ignored.
    pub fn is_suppressing_clicks(&self) -> bool {
        self.state.ignore_global_click.get()
    }

    /// Run deferred work queued during the current turn.
    ///
    /// Call once after every batch of input has been dispatched. The egui layer
    /// does this at the end of each frame.
    pub fn end_turn(&self) {
        let ran = self.state.deferred.run_pending();
        if ran > 0 {
            trace!("ran {ran} deferred task(s)");
        }
    }

    /// Outside-click rule: hide the open menu unless it just opened.
    pub fn handle_global_click(&self) {
        if self.state.ignore_global_click.get() {
            trace!("outside click ignored, menu just opened");
            return;
        }
        if let Some(menu) = self.current_menu() {
            debug!("outside click closes menu {:?}", menu.id());
            menu.hide(false);
        }
    }

    /// Route pointer input from the surface.
    ///
    /// Container events go to the open menu first. Clicks whose propagation was
    /// not stopped then reach the outside-click rule.
    pub fn dispatch(&self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Container { container, event } => {
                match self.current_menu() {
                    Some(menu) if menu.container() == Some(container) => menu.route(&event),
                    _ => warn!("event for container {container:?} which is not the open menu"),
                }
                if event.kind() == MenuEventKind::Click && !event.is_propagation_stopped() {
                    self.handle_global_click();
                }
            }
            SurfaceEvent::Outside(event) => {
                if event.kind() == MenuEventKind::Click {
                    self.handle_global_click();
                }
            }
        }
    }

    /// Re-run the layout pass of the open menu.
    pub fn refresh(&self) {
        if let Some(menu) = self.current_menu() {
            menu.update_view();
        }
    }
}

impl fmt::Debug for MenuHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuHost")
            .field("current", &self.current())
            .field("ignore_global_click", &self.state.ignore_global_click.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use egui::{Pos2, Vec2};

    use super::*;
    use crate::surface::recording::RecordingSurface;
    use crate::{ContextMenu, MenuOptions};

    fn host() -> MenuHost {
        MenuHost::new(RecordingSurface::new(
            Vec2::new(640.0, 480.0),
            Vec2::new(80.0, 40.0),
        ))
    }

    #[test]
    fn test_menu_ids_are_unique() {
        let host = host();
        let a = host.next_menu_id();
        let b = host.next_menu_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_event_for_stale_container_still_reaches_outside_rule() {
        let host = host();
        let cancelled = Rc::new(RefCell::new(false));
        let flag = cancelled.clone();
        let menu: ContextMenu<()> = ContextMenu::new(
            &host,
            MenuOptions::new().on_cancel(move || *flag.borrow_mut() = true),
        );
        menu.show(10.0, 10.0);
        host.end_turn();

        host.dispatch(SurfaceEvent::Container {
            container: ContainerId(9999),
            event: MenuEvent::click(Pos2::ZERO).on_row(0),
        });

        assert!(*cancelled.borrow());
        assert!(!host.has_open_menu());
    }

    #[test]
    fn test_hover_outside_menus_is_not_a_click() {
        let host = host();
        let menu: ContextMenu<()> = ContextMenu::with_defaults(&host);
        menu.show(10.0, 10.0);
        host.end_turn();

        host.dispatch(SurfaceEvent::Outside(MenuEvent::new(
            MenuEventKind::RowEnter,
            Pos2::ZERO,
        )));

        assert!(menu.is_open());
    }

    #[test]
    fn test_set_style_relayouts_open_menu() {
        let surface = RecordingSurface::new(Vec2::new(640.0, 480.0), Vec2::new(80.0, 40.0));
        let host = MenuHost::new(surface.clone());
        let menu: ContextMenu<()> = ContextMenu::with_defaults(&host);
        menu.show(0.0, 0.0);
        assert_eq!(surface.single().1.position, Some(Pos2::new(32.0, 32.0)));

        host.set_style(MenuStyle::default().with_margin(8.0));

        assert_eq!(surface.single().1.position, Some(Pos2::new(8.0, 8.0)));
    }
}

use log::trace;

use super::MenuState;
use crate::host::ActiveMenu;
use crate::menu::event::{MenuEvent, MenuEventKind};
use crate::menu::items::{ItemCallback, MenuItem};
use crate::menu::options::MenuOptions;

pub(super) fn route<D>(menu: &MenuState<D>, event: &MenuEvent) {
    match event.kind() {
        MenuEventKind::Click => on_click(menu, event),
        MenuEventKind::RowEnter => on_hover(
            menu,
            event,
            |item| item.on_over.clone(),
            |options| options.on_over.clone(),
        ),
        MenuEventKind::RowLeave => on_hover(
            menu,
            event,
            |item| item.on_out.clone(),
            |options| options.on_out.clone(),
        ),
    }
}

fn on_click<D>(menu: &MenuState<D>, event: &MenuEvent) {
    // Links inside rows handle the click themselves
    if event.is_in_link() {
        trace!("click inside a link, left to the link");
        return;
    }

    event.stop_propagation();
    event.prevent_default();

    let Some(item) = event.row().and_then(|row| menu.item(row)) else {
        return;
    };

    trace!("menu {:?} row {:?} clicked", menu.id, event.row());

    if let Some(callback) = item.on_click.clone() {
        callback(&item, event);
    }
    let callback = menu.options.borrow().on_click.clone();
    if let Some(callback) = callback {
        callback(&item, event);
    }

    menu.hide(true);
}

fn on_hover<D>(
    menu: &MenuState<D>,
    event: &MenuEvent,
    item_callback: impl Fn(&MenuItem) -> Option<ItemCallback>,
    menu_callback: impl Fn(&MenuOptions<D>) -> Option<ItemCallback>,
) {
    let Some(item) = event.row().and_then(|row| menu.item(row)) else {
        return;
    };

    if let Some(callback) = item_callback(&item) {
        callback(&item, event);
    }
    let callback = menu_callback(&menu.options.borrow());
    if let Some(callback) = callback {
        callback(&item, event);
    }
}

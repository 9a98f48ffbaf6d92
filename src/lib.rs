//! Contextual popup menus for egui applications.
//!
//! A [`ContextMenu`] shows a list of [`MenuItem`]s at a screen position, keeps
//! itself inside the viewport and reports clicks and hovers through callbacks.
//! Menus belong to a [`MenuHost`], which makes sure only one of them is open at
//! a time and closes it when the user clicks anywhere else.
//!
//! ```ignore
//! use egui_context_menu::{ContextMenu, EguiSurface, MenuItem, MenuOptions, MenuStyle};
//!
//! let (host, layer) = EguiSurface::host(MenuStyle::default());
//! let menu = ContextMenu::new(
//!     &host,
//!     MenuOptions::new()
//!         .data(42)
//!         .on_click(|item, _event| println!("clicked {:?}", item.content())),
//! );
//! menu.add_item(MenuItem::text("Copy"))
//!     .add_item(MenuItem::html("<b>Paste</b>"));
//!
//! // inside eframe::App::update
//! if response.secondary_clicked() {
//!     let pos = ctx.pointer_interact_pos().unwrap_or_default();
//!     menu.show(pos.x, pos.y);
//! }
//! layer.show(ctx, &host);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod host;
pub mod menu;
pub mod surface;
pub mod timer;
pub mod utils;

pub use config::{MenuStyle, StyleError};
pub use host::{MenuHost, MenuId};
pub use menu::ContextMenu;
pub use menu::event::{MenuEvent, MenuEventKind};
pub use menu::items::{ItemContent, MenuItem};
pub use menu::options::MenuOptions;
pub use surface::egui_surface::{EguiMenuLayer, EguiSurface};
pub use surface::{ContainerId, Surface, SurfaceEvent};

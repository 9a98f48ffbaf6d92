//! Presentation surfaces a menu renders into.
//!
//! A [`Surface`] owns the visual containers of open menus. Menus only talk to
//! it through this trait, which keeps placement and event routing independent
//! from egui. Surfaces report pointer input back as [`SurfaceEvent`]s through
//! [`MenuHost::dispatch`](crate::MenuHost::dispatch).

pub mod egui_surface;
#[cfg(test)]
pub(crate) mod recording;

use egui::{Pos2, Vec2};

use crate::menu::event::MenuEvent;
use crate::menu::items::ItemContent;

/// Class of the container element holding a menu.
pub const CONTAINER_CLASS: &str = "context-menu";
/// Class of each row element inside a container.
pub const ITEM_CLASS: &str = "context-menu-item";

/// Identifier of a container created by a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContainerId(pub u64);

/// Rendering backend for menus.
pub trait Surface {
    /// Create an empty container and attach it to the viewport.
    fn create_container(&mut self) -> ContainerId;

    /// Detach and discard a container with all its rows.
    fn destroy_container(&mut self, container: ContainerId);

    /// Remove every row of a container.
    fn clear_rows(&mut self, container: ContainerId);

    /// Append a row showing `content` at the end of a container.
    fn append_row(&mut self, container: ContainerId, content: ItemContent<'_>);

    /// Force the container width, `None` sizes it to its rows.
    fn set_width(&mut self, container: ContainerId, width: Option<f32>);

    /// Move the upper-left corner of the container.
    fn set_position(&mut self, container: ContainerId, position: Pos2);

    /// Rendered size of the container.
    fn extent(&self, container: ContainerId) -> Vec2;

    /// Size of the area menus are placed in.
    fn viewport_size(&self) -> Vec2;
}

/// Pointer input reported by a surface.
#[derive(Debug)]
pub enum SurfaceEvent {
    /// Interaction inside a menu container.
    Container {
        /// Container the pointer interacted with
        container: ContainerId,
        /// The interaction itself
        event: MenuEvent,
    },
    /// Primary click outside every container.
    Outside(MenuEvent),
}

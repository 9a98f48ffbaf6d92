//! Pointer events delivered to menu callbacks.

use std::cell::Cell;

use egui::Pos2;

/// Kind of pointer interaction reported by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEventKind {
    /// Primary click.
    Click,
    /// Pointer entered a row.
    RowEnter,
    /// Pointer left a row.
    RowLeave,
}

/// Pointer event passed to menu and item callbacks.
///
/// Handlers can mark the event as handled through
/// [`prevent_default`](MenuEvent::prevent_default) and
/// [`stop_propagation`](MenuEvent::stop_propagation). A click whose
/// propagation was not stopped continues to the host's outside-click rule.
#[derive(Debug)]
pub struct MenuEvent {
    kind: MenuEventKind,
    position: Pos2,
    row: Option<usize>,
    in_link: bool,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl MenuEvent {
    /// An event of `kind` at `position`, not targeting any row.
    pub fn new(kind: MenuEventKind, position: Pos2) -> Self {
        Self {
            kind,
            position,
            row: None,
            in_link: false,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    /// A primary click at `position`.
    pub fn click(position: Pos2) -> Self {
        Self::new(MenuEventKind::Click, position)
    }

    /// Attach the index of the row under the pointer.
    pub fn on_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    /// Mark the target as being inside a hyperlink.
    pub fn in_link(mut self) -> Self {
        self.in_link = true;
        self
    }

    /// What happened.
    pub fn kind(&self) -> MenuEventKind {
        self.kind
    }

    /// Pointer position in screen coordinates.
    pub fn position(&self) -> Pos2 {
        self.position
    }

    /// Index of the row the event targets, `None` for the container itself.
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Whether the target is inside a hyperlink.
    pub fn is_in_link(&self) -> bool {
        self.in_link
    }

    /// Mark the default action of the event as handled.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Keep the event from reaching the outside-click rule.
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    /// Whether [`prevent_default`](Self::prevent_default) was called.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// Whether [`stop_propagation`](Self::stop_propagation) was called.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

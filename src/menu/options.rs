//! Menu configuration and partial updates.

use std::fmt;
use std::rc::Rc;

use crate::menu::event::MenuEvent;
use crate::menu::items::{ItemCallback, MenuItem};

/// Callback without arguments (show, hide, cancel).
pub type Callback = Rc<dyn Fn()>;

/// Callback receiving the payload that was just replaced.
pub type DataChangeCallback<D> = Rc<dyn Fn(Option<&D>)>;

/// Options of a [`ContextMenu`](crate::ContextMenu).
///
/// Every field is optional. The same type is used for the full configuration
/// and for partial updates through
/// [`ContextMenu::set_options`](crate::ContextMenu::set_options), where only
/// the fields that are set override the current ones.
///
/// # Examples
///
/// ```ignore
/// let options = MenuOptions::new()
///     .data("row-42")
///     .width(200.0)
///     .on_click(|item, _event| println!("picked {:?}", item))
///     .on_cancel(|| println!("dismissed"));
/// ```
pub struct MenuOptions<D> {
    /// See [`MenuOptions::on_data_change()`]
    pub on_data_change: Option<DataChangeCallback<D>>,
    /// See [`MenuOptions::on_click()`]
    pub on_click: Option<ItemCallback>,
    /// See [`MenuOptions::on_cancel()`]
    pub on_cancel: Option<Callback>,
    /// See [`MenuOptions::on_show()`]
    pub on_show: Option<Callback>,
    /// See [`MenuOptions::on_hide()`]
    pub on_hide: Option<Callback>,
    /// See [`MenuOptions::on_over()`]
    pub on_over: Option<ItemCallback>,
    /// See [`MenuOptions::on_out()`]
    pub on_out: Option<ItemCallback>,
    /// Initial payload
    pub data: Option<D>,
    /// Fixed width, `None` sizes the menu to its content
    pub width: Option<f32>,
}

impl<D> Default for MenuOptions<D> {
    fn default() -> Self {
        Self {
            on_data_change: None,
            on_click: None,
            on_cancel: None,
            on_show: None,
            on_hide: None,
            on_over: None,
            on_out: None,
            data: None,
            width: None,
        }
    }
}

impl<D: Clone> Clone for MenuOptions<D> {
    fn clone(&self) -> Self {
        Self {
            on_data_change: self.on_data_change.clone(),
            on_click: self.on_click.clone(),
            on_cancel: self.on_cancel.clone(),
            on_show: self.on_show.clone(),
            on_hide: self.on_hide.clone(),
            on_over: self.on_over.clone(),
            on_out: self.on_out.clone(),
            data: self.data.clone(),
            width: self.width,
        }
    }
}

impl<D> MenuOptions<D> {
    /// Options with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    /// Shallow merge: every field set in `partial` replaces the current one.
    pub fn merge(&mut self, partial: MenuOptions<D>) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(
                    if partial.$field.is_some() {
                        self.$field = partial.$field;
                    }
                )*
            };
        }
        take!(
            on_data_change,
            on_click,
            on_cancel,
            on_show,
            on_hide,
            on_over,
            on_out,
            data,
            width
        );
    }

    /// Set the initial payload
    pub fn data(mut self, data: D) -> Self {
        self.data = Some(data);
        self
    }

    /// Force the menu width in points
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Fired with the previous payload whenever the payload is replaced
    pub fn on_data_change(mut self, callback: impl Fn(Option<&D>) + 'static) -> Self {
        self.on_data_change = Some(Rc::new(callback));
        self
    }

    /// Fired after the clicked item's own callback
    pub fn on_click(mut self, callback: impl Fn(&MenuItem, &MenuEvent) + 'static) -> Self {
        self.on_click = Some(Rc::new(callback));
        self
    }

    /// Fired when the menu closes without a confirmed item click
    pub fn on_cancel(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_cancel = Some(Rc::new(callback));
        self
    }

    /// Fired every time the menu opens
    pub fn on_show(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_show = Some(Rc::new(callback));
        self
    }

    /// Fired every time the menu closes, including after an item click
    pub fn on_hide(mut self, callback: impl Fn() + 'static) -> Self {
        self.on_hide = Some(Rc::new(callback));
        self
    }

    /// Fired after the hovered item's own callback when the pointer enters a row
    pub fn on_over(mut self, callback: impl Fn(&MenuItem, &MenuEvent) + 'static) -> Self {
        self.on_over = Some(Rc::new(callback));
        self
    }

    /// Fired after the item's own callback when the pointer leaves a row
    pub fn on_out(mut self, callback: impl Fn(&MenuItem, &MenuEvent) + 'static) -> Self {
        self.on_out = Some(Rc::new(callback));
        self
    }
}

impl<D: fmt::Debug> fmt::Debug for MenuOptions<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuOptions")
            .field("data", &self.data)
            .field("width", &self.width)
            .field("on_click", &self.on_click.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .field("on_show", &self.on_show.is_some())
            .field("on_hide", &self.on_hide.is_some())
            .finish_non_exhaustive()
    }
}

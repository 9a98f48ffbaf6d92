//! Menu rows.

use std::fmt;
use std::rc::Rc;

use crate::menu::event::MenuEvent;

/// Placeholder shown by rows without html or text, a non-breaking space.
pub const BLANK_LABEL: &str = "\u{a0}";

/// Callback receiving the item that was hovered or clicked and the event.
pub type ItemCallback = Rc<dyn Fn(&MenuItem, &MenuEvent)>;

/// What a row displays, resolved from the item's html and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemContent<'a> {
    /// Inline markup, see [`crate::utils::markup`].
    Html(&'a str),
    /// Plain label, shown exactly as given.
    Text(&'a str),
    /// Neither html nor text was set.
    Blank,
}

impl ItemContent<'_> {
    /// Text a row shows when markup is not interpreted.
    pub fn display_text(&self) -> &str {
        match self {
            ItemContent::Html(markup) => markup,
            ItemContent::Text(text) => text,
            ItemContent::Blank => BLANK_LABEL,
        }
    }
}

/// A single selectable row of a [`ContextMenu`](crate::ContextMenu).
///
/// When both html and text are set the html wins.
///
/// # Examples
///
/// ```ignore
/// let item = MenuItem::text("Rename")
///     .on_click(|item, _event| println!("{} clicked", item.content().display_text()));
/// ```
#[derive(Clone, Default)]
pub struct MenuItem {
    html: Option<String>,
    text: Option<String>,
    pub(crate) on_click: Option<ItemCallback>,
    pub(crate) on_over: Option<ItemCallback>,
    pub(crate) on_out: Option<ItemCallback>,
}

impl MenuItem {
    /// Create an item showing a plain label.
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            text: Some(label.into()),
            ..Self::default()
        }
    }

    /// Create an item showing inline markup.
    pub fn html(markup: impl Into<String>) -> Self {
        Self {
            html: Some(markup.into()),
            ..Self::default()
        }
    }

    /// Create a space-holding item without content.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Set the markup of this item. Markup takes precedence over text.
    pub fn with_html(mut self, markup: impl Into<String>) -> Self {
        self.html = Some(markup.into());
        self
    }

    /// Set the plain label of this item.
    pub fn with_text(mut self, label: impl Into<String>) -> Self {
        self.text = Some(label.into());
        self
    }

    /// Callback fired first when this item is clicked, before the menu's own.
    pub fn on_click(mut self, callback: impl Fn(&MenuItem, &MenuEvent) + 'static) -> Self {
        self.on_click = Some(Rc::new(callback));
        self
    }

    /// Callback fired when the pointer enters this row.
    pub fn on_over(mut self, callback: impl Fn(&MenuItem, &MenuEvent) + 'static) -> Self {
        self.on_over = Some(Rc::new(callback));
        self
    }

    /// Callback fired when the pointer leaves this row.
    pub fn on_out(mut self, callback: impl Fn(&MenuItem, &MenuEvent) + 'static) -> Self {
        self.on_out = Some(Rc::new(callback));
        self
    }

    /// Resolve what the row shows.
    pub fn content(&self) -> ItemContent<'_> {
        match (&self.html, &self.text) {
            (Some(html), _) => ItemContent::Html(html),
            (None, Some(text)) => ItemContent::Text(text),
            (None, None) => ItemContent::Blank,
        }
    }

    /// Markup given to this item, if any.
    pub fn html_source(&self) -> Option<&str> {
        self.html.as_deref()
    }

    /// Plain label given to this item, if any.
    pub fn text_source(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("html", &self.html)
            .field("text", &self.text)
            .field("on_click", &self.on_click.is_some())
            .field("on_over", &self.on_over.is_some())
            .field("on_out", &self.on_out.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_wins_over_text() {
        let item = MenuItem::text("plain").with_html("<b>rich</b>");
        assert_eq!(item.content(), ItemContent::Html("<b>rich</b>"));

        let item = MenuItem::html("<i>rich</i>").with_text("plain");
        assert_eq!(item.content(), ItemContent::Html("<i>rich</i>"));
    }

    #[test]
    fn test_blank_item_has_non_empty_placeholder() {
        let item = MenuItem::blank();
        assert_eq!(item.content(), ItemContent::Blank);
        assert!(!item.content().display_text().is_empty());
    }

    #[test]
    fn test_empty_text_is_still_text() {
        assert_eq!(MenuItem::text("").content(), ItemContent::Text(""));
    }
}

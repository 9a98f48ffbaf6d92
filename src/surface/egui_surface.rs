//! Menus drawn as egui foreground areas.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use egui::text::{LayoutJob, TextFormat};
use egui::{
    Area, Context, CornerRadius, CursorIcon, FontId, Galley, Id, LayerId, OpenUrl, Order, Painter,
    Pos2, Rect, Sense, Stroke, StrokeKind, Ui, Vec2,
};
use log::trace;

use super::{CONTAINER_CLASS, ContainerId, ITEM_CLASS, Surface, SurfaceEvent};
use crate::config::MenuStyle;
use crate::host::MenuHost;
use crate::menu::event::{MenuEvent, MenuEventKind};
use crate::menu::items::{BLANK_LABEL, ItemContent};
use crate::utils::markup::{self, Span};

/// Line height relative to the font size, used before real measurements exist.
const LINE_SPACING: f32 = 1.2;

/// A row as the egui surface keeps it between frames.
#[derive(Debug, Clone, PartialEq)]
enum Row {
    Text(String),
    Html(Vec<Span>),
    Blank,
}

impl Row {
    fn from_content(content: ItemContent<'_>) -> Self {
        match content {
            ItemContent::Text(text) => Row::Text(text.to_string()),
            ItemContent::Html(source) => Row::Html(markup::parse(source)),
            ItemContent::Blank => Row::Blank,
        }
    }

    /// Length of the longest line, used before the first real measurement
    fn approximate_len(&self) -> usize {
        match self {
            Row::Text(text) => text.chars().count(),
            Row::Html(spans) => {
                let text: String = spans.iter().map(|s| s.text.as_str()).collect();
                text.lines().map(|line| line.chars().count()).max().unwrap_or(0)
            }
            Row::Blank => 1,
        }
    }

    fn approximate_lines(&self) -> usize {
        match self {
            Row::Html(spans) => 1 + spans.iter().map(|s| s.text.matches('\n').count()).sum::<usize>(),
            Row::Text(_) | Row::Blank => 1,
        }
    }

    fn layout(&self, painter: &Painter, style: &MenuStyle) -> Arc<Galley> {
        let font_id = FontId::proportional(style.text_size);
        match self {
            Row::Text(text) => painter.layout_no_wrap(text.clone(), font_id, style.text),
            Row::Blank => painter.layout_no_wrap(BLANK_LABEL.to_string(), font_id, style.text),
            Row::Html(spans) => {
                let mut job = LayoutJob::default();
                for span in spans {
                    let color = if span.anchor {
                        style.link
                    } else if span.bold {
                        style.strong_text
                    } else {
                        style.text
                    };
                    let underline = if span.underline {
                        Stroke::new(1.0, color)
                    } else {
                        Stroke::NONE
                    };
                    job.append(
                        &span.text,
                        0.0,
                        TextFormat {
                            font_id: font_id.clone(),
                            color,
                            italics: span.italic,
                            underline,
                            ..Default::default()
                        },
                    );
                }
                painter.layout_job(job)
            }
        }
    }

    /// Span under `local`, a position relative to the top-left of this row's galley.
    fn span_under(&self, galley: &Galley, local: Vec2) -> Option<&Span> {
        let Row::Html(spans) = self else {
            return None;
        };
        markup::span_at(spans, glyph_index_at(galley, local)?)
    }
}

/// Character index of the glyph covering `local`, if any.
fn glyph_index_at(galley: &Galley, local: Vec2) -> Option<usize> {
    let mut offset = 0;
    for row in &galley.rows {
        let rect = row.rect();
        if (rect.min.y..=rect.max.y).contains(&local.y) {
            return row
                .glyphs
                .iter()
                .position(|glyph| {
                    let left = row.pos.x + glyph.pos.x;
                    (left..left + glyph.advance_width).contains(&local.x)
                })
                .map(|column| offset + column);
        }
        offset += row.char_count_including_newline();
    }
    None
}

#[derive(Debug, Clone)]
struct Measured {
    rows: Vec<Row>,
    size: Vec2,
}

#[derive(Debug)]
struct Container {
    rows: Vec<Row>,
    width: Option<f32>,
    position: Pos2,
    measured: Option<Measured>,
}

impl Container {
    fn content_size(&self, style: &MenuStyle) -> Vec2 {
        match &self.measured {
            Some(measured) if measured.rows == self.rows => measured.size,
            _ => estimate(&self.rows, style),
        }
    }

    fn extent(&self, style: &MenuStyle) -> Vec2 {
        let content = self.content_size(style);
        Vec2::new(self.width.unwrap_or(content.x), content.y)
    }

    fn rect(&self, style: &MenuStyle) -> Rect {
        Rect::from_min_size(self.position, self.extent(style))
    }
}

struct Canvas {
    containers: BTreeMap<ContainerId, Container>,
    next_id: u64,
    viewport: Vec2,
    style: MenuStyle,
    hovered: Option<(ContainerId, usize)>,
}

/// Height of a row whose text is `text_height` tall. Never below `item_height`.
fn row_height(text_height: f32, style: &MenuStyle) -> f32 {
    style.item_height.max(text_height + style.padding / 2.0)
}

fn estimate(rows: &[Row], style: &MenuStyle) -> Vec2 {
    let widest = rows.iter().map(Row::approximate_len).max().unwrap_or(0);
    let width = widest as f32 * (style.text_size * 0.6) + style.padding * 2.0;
    let height: f32 = rows
        .iter()
        .map(|row| row_height(row.approximate_lines() as f32 * style.text_size * LINE_SPACING, style))
        .sum();
    Vec2::new(width.max(style.min_width), height + style.padding)
}

fn measure(galleys: &[Arc<Galley>], style: &MenuStyle) -> Vec2 {
    let widest = galleys.iter().map(|g| g.size().x).fold(0.0, f32::max);
    let width = widest + style.padding * 2.0;
    let height: f32 = galleys.iter().map(|g| row_height(g.size().y, style)).sum();
    Vec2::new(width.max(style.min_width), height + style.padding)
}

/// [`Surface`] drawing menus as egui foreground areas.
///
/// The surface is owned by a [`MenuHost`]; the paired [`EguiMenuLayer`] shares
/// its state and drives it once per frame.
pub struct EguiSurface {
    canvas: Rc<RefCell<Canvas>>,
}

/// Per-frame driver of an [`EguiSurface`].
#[derive(Clone)]
pub struct EguiMenuLayer {
    canvas: Rc<RefCell<Canvas>>,
}

impl EguiSurface {
    /// Create a surface and the layer that paints it.
    pub fn new(style: MenuStyle) -> (Self, EguiMenuLayer) {
        let canvas = Rc::new(RefCell::new(Canvas {
            containers: BTreeMap::new(),
            next_id: 0,
            viewport: Vec2::splat(f32::INFINITY),
            style,
            hovered: None,
        }));
        (
            Self {
                canvas: canvas.clone(),
            },
            EguiMenuLayer { canvas },
        )
    }

    /// Create a host drawing on a new egui surface.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let (host, layer) = EguiSurface::host(MenuStyle::default());
    /// ```
    pub fn host(style: MenuStyle) -> (MenuHost, EguiMenuLayer) {
        let (surface, layer) = Self::new(style.clone());
        (MenuHost::with_style(surface, style), layer)
    }
}

impl Surface for EguiSurface {
    fn create_container(&mut self) -> ContainerId {
        let mut canvas = self.canvas.borrow_mut();
        canvas.next_id += 1;
        let id = ContainerId(canvas.next_id);
        canvas.containers.insert(
            id,
            Container {
                rows: Vec::new(),
                width: None,
                position: Pos2::ZERO,
                measured: None,
            },
        );
        id
    }

    fn destroy_container(&mut self, container: ContainerId) {
        let mut canvas = self.canvas.borrow_mut();
        canvas.containers.remove(&container);
        if canvas.hovered.is_some_and(|(id, _)| id == container) {
            canvas.hovered = None;
        }
    }

    fn clear_rows(&mut self, container: ContainerId) {
        if let Some(c) = self.canvas.borrow_mut().containers.get_mut(&container) {
            c.rows.clear();
        }
    }

    fn append_row(&mut self, container: ContainerId, content: ItemContent<'_>) {
        if let Some(c) = self.canvas.borrow_mut().containers.get_mut(&container) {
            c.rows.push(Row::from_content(content));
        }
    }

    fn set_width(&mut self, container: ContainerId, width: Option<f32>) {
        if let Some(c) = self.canvas.borrow_mut().containers.get_mut(&container) {
            c.width = width;
        }
    }

    fn set_position(&mut self, container: ContainerId, position: Pos2) {
        if let Some(c) = self.canvas.borrow_mut().containers.get_mut(&container) {
            c.position = position;
        }
    }

    fn extent(&self, container: ContainerId) -> Vec2 {
        let canvas = self.canvas.borrow();
        canvas
            .containers
            .get(&container)
            .map(|c| c.extent(&canvas.style))
            .unwrap_or(Vec2::ZERO)
    }

    fn viewport_size(&self) -> Vec2 {
        self.canvas.borrow().viewport
    }
}

impl EguiMenuLayer {
    /// Paint open menus and route this frame's pointer input to `host`
    ///
    /// Call once per frame after the application UI. This also ends the
    /// host's turn, which closes the outside-click suppression window of a
    /// menu opened during the frame.
    ///
    /// # Arguments
    /// * `ctx` - The egui context
    /// * `host` - Host owning the surface of this layer
    pub fn show(&self, ctx: &Context, host: &MenuHost) {
        if self.measure(ctx, host) {
            host.refresh();
        }

        let (mut events, hovered) = self.paint(ctx);
        events.extend(self.outside_click(ctx));
        self.dispatch(ctx, host, events);

        // Clicks may have closed a menu, hover is resolved against what is left
        let pointer = ctx.input(|i| i.pointer.hover_pos()).unwrap_or_default();
        let transitions = self.hover_transitions(pointer, hovered);
        self.dispatch(ctx, host, transitions);

        host.end_turn();
    }

    /// Number of live menu containers
    pub fn container_count(&self) -> usize {
        self.canvas.borrow().containers.len()
    }

    /// On-screen rectangle of a container
    pub fn container_rect(&self, container: ContainerId) -> Option<Rect> {
        let canvas = self.canvas.borrow();
        canvas
            .containers
            .get(&container)
            .map(|c| c.rect(&canvas.style))
    }

    fn dispatch(&self, ctx: &Context, host: &MenuHost, events: Vec<SurfaceEvent>) {
        if events.is_empty() {
            return;
        }
        trace!("dispatching {} menu event(s)", events.len());
        ctx.request_repaint();
        for event in events {
            host.dispatch(event);
        }
    }

    /// Refresh viewport and row measurements. Returns whether a re-layout is needed.
    fn measure(&self, ctx: &Context, host: &MenuHost) -> bool {
        let viewport = ctx.content_rect().size();
        let style = host.style().clone();
        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new(CONTAINER_CLASS)));

        let mut canvas = self.canvas.borrow_mut();
        let mut changed = canvas.viewport != viewport || canvas.style != style;
        canvas.viewport = viewport;

        for container in canvas.containers.values_mut() {
            let galleys: Vec<_> = container
                .rows
                .iter()
                .map(|row| row.layout(&painter, &style))
                .collect();
            let size = measure(&galleys, &style);

            let stale = container
                .measured
                .as_ref()
                .is_none_or(|m| m.size != size || m.rows != container.rows);
            if stale {
                changed = true;
                container.measured = Some(Measured {
                    rows: container.rows.clone(),
                    size,
                });
            }
        }

        canvas.style = style;
        changed
    }

    fn paint(&self, ctx: &Context) -> (Vec<SurfaceEvent>, Option<(ContainerId, usize)>) {
        let canvas = self.canvas.borrow();
        let mut events = Vec::new();
        let mut hovered = None;

        for (&id, container) in &canvas.containers {
            let size = container.extent(&canvas.style);
            Area::new(Id::new((CONTAINER_CLASS, id.0)))
                .order(Order::Foreground)
                .fixed_pos(container.position)
                .show(ctx, |ui| {
                    paint_container(ui, id, container, size, &canvas.style, &mut hovered, &mut events);
                });
        }

        (events, hovered)
    }

    /// A primary click outside every container, if one happened this frame.
    fn outside_click(&self, ctx: &Context) -> Option<SurfaceEvent> {
        if !ctx.input(|i| i.pointer.primary_clicked()) {
            return None;
        }
        let pointer = ctx.input(|i| i.pointer.interact_pos());
        let canvas = self.canvas.borrow();
        let inside = pointer.is_some_and(|p| {
            canvas
                .containers
                .values()
                .any(|c| c.rect(&canvas.style).contains(p))
        });
        (!inside).then(|| SurfaceEvent::Outside(MenuEvent::click(pointer.unwrap_or_default())))
    }

    /// Turn a change of the hovered row into leave and enter events.
    ///
    /// Rows of containers destroyed since they were painted produce no events.
    fn hover_transitions(
        &self,
        pointer: Pos2,
        current: Option<(ContainerId, usize)>,
    ) -> Vec<SurfaceEvent> {
        let mut canvas = self.canvas.borrow_mut();
        let current = current.filter(|(container, _)| canvas.containers.contains_key(container));
        let previous = std::mem::replace(&mut canvas.hovered, current);
        if previous == current {
            return Vec::new();
        }

        let mut events = Vec::new();
        if let Some((container, row)) = previous
            && canvas.containers.contains_key(&container)
        {
            events.push(SurfaceEvent::Container {
                container,
                event: MenuEvent::new(MenuEventKind::RowLeave, pointer).on_row(row),
            });
        }
        if let Some((container, row)) = current {
            events.push(SurfaceEvent::Container {
                container,
                event: MenuEvent::new(MenuEventKind::RowEnter, pointer).on_row(row),
            });
        }
        events
    }
}

fn paint_container(
    ui: &mut Ui,
    id: ContainerId,
    container: &Container,
    size: Vec2,
    style: &MenuStyle,
    hovered: &mut Option<(ContainerId, usize)>,
    events: &mut Vec<SurfaceEvent>,
) {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    ui.painter()
        .rect_filled(rect, CornerRadius::same(4), style.background);
    ui.painter().rect_stroke(
        rect,
        CornerRadius::same(4),
        Stroke::new(1.0, style.border),
        StrokeKind::Outside,
    );

    let mut row_clicked = false;
    let mut current_y = rect.min.y + style.padding / 2.0;
    for (index, row) in container.rows.iter().enumerate() {
        let galley = row.layout(ui.painter(), style);
        let row_rect = Rect::from_min_size(
            Pos2::new(rect.min.x, current_y),
            Vec2::new(rect.width(), row_height(galley.size().y, style)),
        );
        let row_response = ui.interact(row_rect, Id::new((ITEM_CLASS, id.0, index)), Sense::click());

        if row_response.hovered() {
            ui.painter()
                .rect_filled(row_rect, CornerRadius::same(2), style.hover);
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
            *hovered = Some((id, index));
        }

        let text_pos = Pos2::new(
            row_rect.min.x + style.padding,
            row_rect.center().y - galley.size().y / 2.0,
        );
        ui.painter().galley(text_pos, galley.clone(), style.text);

        if row_response.clicked() {
            row_clicked = true;
            let pos = row_response
                .interact_pointer_pos()
                .unwrap_or(row_rect.center());
            let mut event = MenuEvent::click(pos).on_row(index);
            if let Some(span) = row.span_under(&galley, pos - text_pos)
                && span.anchor
            {
                if let Some(url) = &span.link {
                    ui.ctx().open_url(OpenUrl::new_tab(url));
                }
                event = event.in_link();
            }
            events.push(SurfaceEvent::Container {
                container: id,
                event,
            });
        }

        current_y = row_rect.max.y;
    }

    if response.clicked() && !row_clicked {
        let pos = response.interact_pointer_pos().unwrap_or(rect.center());
        events.push(SurfaceEvent::Container {
            container: id,
            event: MenuEvent::click(pos),
        });
    }
}

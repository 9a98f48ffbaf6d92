use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use egui::{Pos2, Vec2};

use super::{ContainerId, Surface};
use crate::menu::items::ItemContent;

/// A row as the recording surface stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedRow {
    Html(String),
    Text(String),
    Blank,
}

impl RecordedRow {
    pub fn shown(&self) -> &str {
        match self {
            RecordedRow::Html(s) | RecordedRow::Text(s) => s,
            RecordedRow::Blank => crate::menu::items::BLANK_LABEL,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordedContainer {
    pub rows: Vec<RecordedRow>,
    pub width: Option<f32>,
    pub position: Option<Pos2>,
}

#[derive(Debug)]
pub struct Recording {
    pub containers: BTreeMap<ContainerId, RecordedContainer>,
    pub destroyed: Vec<ContainerId>,
    pub viewport: Vec2,
    /// Size reported for containers without a forced width
    pub content_size: Vec2,
    next_id: u64,
}

/// In-memory surface for tests. Clones share the same recording.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    inner: Rc<RefCell<Recording>>,
}

impl RecordingSurface {
    pub fn new(viewport: Vec2, content_size: Vec2) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Recording {
                containers: BTreeMap::new(),
                destroyed: Vec::new(),
                viewport,
                content_size,
                next_id: 0,
            })),
        }
    }

    pub fn recording(&self) -> std::cell::Ref<'_, Recording> {
        self.inner.borrow()
    }

    pub fn set_viewport(&self, viewport: Vec2) {
        self.inner.borrow_mut().viewport = viewport;
    }

    pub fn live(&self) -> Vec<ContainerId> {
        self.inner.borrow().containers.keys().copied().collect()
    }

    /// The only live container, panics if there is not exactly one.
    pub fn single(&self) -> (ContainerId, RecordedContainer) {
        let recording = self.inner.borrow();
        assert_eq!(recording.containers.len(), 1, "expected one live container");
        let (id, container) = recording.containers.iter().next().unwrap();
        (*id, container.clone())
    }
}

impl Surface for RecordingSurface {
    fn create_container(&mut self) -> ContainerId {
        let mut recording = self.inner.borrow_mut();
        recording.next_id += 1;
        let id = ContainerId(recording.next_id);
        recording
            .containers
            .insert(id, RecordedContainer::default());
        id
    }

    fn destroy_container(&mut self, container: ContainerId) {
        let mut recording = self.inner.borrow_mut();
        recording.containers.remove(&container);
        recording.destroyed.push(container);
    }

    fn clear_rows(&mut self, container: ContainerId) {
        if let Some(c) = self.inner.borrow_mut().containers.get_mut(&container) {
            c.rows.clear();
        }
    }

    fn append_row(&mut self, container: ContainerId, content: ItemContent<'_>) {
        let row = match content {
            ItemContent::Html(s) => RecordedRow::Html(s.to_string()),
            ItemContent::Text(s) => RecordedRow::Text(s.to_string()),
            ItemContent::Blank => RecordedRow::Blank,
        };
        if let Some(c) = self.inner.borrow_mut().containers.get_mut(&container) {
            c.rows.push(row);
        }
    }

    fn set_width(&mut self, container: ContainerId, width: Option<f32>) {
        if let Some(c) = self.inner.borrow_mut().containers.get_mut(&container) {
            c.width = width;
        }
    }

    fn set_position(&mut self, container: ContainerId, position: Pos2) {
        if let Some(c) = self.inner.borrow_mut().containers.get_mut(&container) {
            c.position = Some(position);
        }
    }

    fn extent(&self, container: ContainerId) -> Vec2 {
        let recording = self.inner.borrow();
        let width = recording
            .containers
            .get(&container)
            .and_then(|c| c.width)
            .unwrap_or(recording.content_size.x);
        Vec2::new(width, recording.content_size.y)
    }

    fn viewport_size(&self) -> Vec2 {
        self.inner.borrow().viewport
    }
}

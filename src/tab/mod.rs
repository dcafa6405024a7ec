//! Tab infrastructure for the multi-tab shell
//!
//! This module provides the per-tab building blocks:
//! - `TabRecord`: one tab's view, fields and optional background task
//! - `TabRegistry` / `TabStrip`: the id → record map and the visible ordering
//! - `TabIdAllocator`: unique, never-reused identifiers

mod background_task;
pub mod fields;
pub mod id_allocator;
pub mod layout;
pub mod registry;
pub mod strip;
pub mod view;

pub use background_task::{BackgroundTask, TaskContext, TaskFuture};
pub use fields::{FieldKey, FieldValue, TabFields};
pub use id_allocator::TabIdAllocator;
pub use layout::{LayoutDescriptor, LayoutError};
pub use registry::TabRegistry;
pub use strip::{StripEntry, TabStrip};
pub use view::{RenderSurface, TabView, Widget};

pub use tabshell_config::{TabId, TabKind};

/// Where a tab is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabState {
    #[default]
    Active,
    /// A save is in progress; further saves are refused
    Saving,
    /// Teardown has started
    Closing,
}

/// A single tab: everything the shell owns on its behalf
#[derive(Debug)]
pub struct TabRecord {
    id: TabId,
    kind: TabKind,
    view: TabView,
    fields: TabFields,
    task: Option<BackgroundTask>,
    state: TabState,
}

impl TabRecord {
    /// Create a record; the kind is taken from `fields`
    pub fn new(id: TabId, view: TabView, fields: TabFields) -> Self {
        Self {
            id,
            kind: fields.kind(),
            view,
            fields,
            task: None,
            state: TabState::Active,
        }
    }

    pub fn with_task(mut self, task: BackgroundTask) -> Self {
        self.task = Some(task);
        self
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn kind(&self) -> TabKind {
        self.kind
    }

    pub fn state(&self) -> TabState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: TabState) {
        self.state = state;
    }

    pub fn view(&self) -> &TabView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut TabView {
        &mut self.view
    }

    pub fn fields(&self) -> &TabFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut TabFields {
        &mut self.fields
    }

    /// Borrow the view and fields together, for rendering editable widgets
    pub fn view_and_fields_mut(&mut self) -> (&TabView, &mut TabFields) {
        (&self.view, &mut self.fields)
    }

    pub fn task(&self) -> Option<&BackgroundTask> {
        self.task.as_ref()
    }

    pub fn task_mut(&mut self) -> Option<&mut BackgroundTask> {
        self.task.as_mut()
    }

    /// Check if the tab's background task is running
    pub fn is_task_running(&self) -> bool {
        self.task.as_ref().is_some_and(BackgroundTask::is_running)
    }

    /// Signal the background task to stop. Returns true if a running task
    /// received the signal.
    pub fn cancel_task(&mut self) -> bool {
        let cancelled = self.task.as_mut().is_some_and(BackgroundTask::cancel);
        if cancelled && let TabFields::Processor(p) = &mut self.fields {
            p.is_processing = false;
        }
        cancelled
    }

    /// Release view surfaces and stop background work. Returns
    /// `(surfaces_released, task_cancelled)`.
    pub fn release_resources(&mut self) -> (usize, bool) {
        let surfaces = self.view.release_surfaces();
        let cancelled = self.cancel_task();
        (surfaces, cancelled)
    }
}

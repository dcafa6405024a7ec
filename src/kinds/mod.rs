//! Per-kind behavior: what a tab of each kind looks like, how it saves, and
//! what background work it runs.
//!
//! The shell never matches on [`TabKind`] itself; it looks up the kind's
//! [`TabKindHandler`] in a [`HandlerSet`] and delegates.

mod editor;
mod generic;
mod processor;

pub use editor::EditorHandler;
pub use generic::GenericHandler;
pub use processor::ProcessorHandler;

use crate::config::Config;
use crate::shell::SaveTarget;
use crate::tab::layout::LayoutDescriptor;
use crate::tab::view::{RenderSurface, TabTheme, Widget};
use crate::tab::{TabFields, TabId, TabKind, TabRecord, TaskContext, TaskFuture};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What a handler gets to build a new tab
pub struct BuildContext<'a> {
    pub id: TabId,
    pub config: &'a Config,
}

/// Everything a handler produces for a new tab. The shell validates the
/// layout and assembles the record.
pub struct TabParts {
    pub widgets: Vec<Widget>,
    pub layout: LayoutDescriptor,
    pub surfaces: Vec<RenderSurface>,
    pub theme: TabTheme,
    pub fields: TabFields,
    /// Attach an idle background task slot
    pub background: bool,
}

impl TabParts {
    pub fn new(widgets: Vec<Widget>, layout: LayoutDescriptor, fields: TabFields) -> Self {
        Self {
            widgets,
            layout,
            surfaces: Vec::new(),
            theme: TabTheme::default(),
            fields,
            background: false,
        }
    }

    pub fn with_surface(mut self, surface: RenderSurface) -> Self {
        self.surfaces.push(surface);
        self
    }

    pub fn with_background_task(mut self) -> Self {
        self.background = true;
        self
    }
}

pub trait TabKindHandler {
    fn kind(&self) -> TabKind;

    /// Describe a freshly created tab with default fields
    fn build(&self, ctx: &BuildContext<'_>) -> anyhow::Result<TabParts>;

    /// Release kind-owned resources before the record is dropped. Returns the
    /// number of render surfaces released. The shell cancels the background
    /// task itself.
    fn teardown(&self, record: &mut TabRecord) -> usize {
        record.view_mut().release_surfaces()
    }

    /// Kind of destination the save dialog should ask for
    fn save_target(&self, id: TabId, fields: &TabFields) -> SaveTarget;

    /// Write `fields` to `destination`, returning the file actually written
    fn serialize(
        &self,
        id: TabId,
        fields: &TabFields,
        destination: &Path,
    ) -> anyhow::Result<PathBuf>;

    /// File a directory save would produce, so the shell can ask before
    /// overwriting it. `None` when the kind cannot tell in advance.
    fn output_path(&self, _id: TabId, _destination: &Path) -> Option<PathBuf> {
        None
    }

    /// Future for one background run, `None` for kinds without background work
    fn run_task(
        &self,
        _fields: &TabFields,
        _ctx: TaskContext,
        _tick: Duration,
    ) -> Option<TaskFuture> {
        None
    }
}

/// Maps each kind to its handler
pub struct HandlerSet {
    handlers: HashMap<TabKind, Box<dyn TabKindHandler>>,
}

impl HandlerSet {
    /// An empty set; creating a tab of an unregistered kind fails
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// The three built-in kinds
    pub fn with_defaults() -> Self {
        Self::empty()
            .with(GenericHandler)
            .with(EditorHandler)
            .with(ProcessorHandler)
    }

    pub fn with(mut self, handler: impl TabKindHandler + 'static) -> Self {
        self.register(Box::new(handler));
        self
    }

    /// Register a handler, replacing any existing one for the same kind
    pub fn register(&mut self, handler: Box<dyn TabKindHandler>) {
        let kind = handler.kind();
        if self.handlers.insert(kind, handler).is_some() {
            log::debug!("Replaced handler for {} tabs", kind);
        }
    }

    pub fn get(&self, kind: TabKind) -> Option<&dyn TabKindHandler> {
        self.handlers.get(&kind).map(|h| h.as_ref())
    }
}

impl Default for HandlerSet {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Shared YAML writer for kinds that save their settings as a document
pub(crate) fn write_yaml<T: serde::Serialize>(value: &T, path: &Path) -> anyhow::Result<PathBuf> {
    use anyhow::Context;

    let yaml = serde_yaml_ng::to_string(value).context("failed to serialize tab state")?;
    std::fs::write(path, yaml).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path.to_path_buf())
}

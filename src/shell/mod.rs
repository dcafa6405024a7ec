//! The tab shell: owns every tab and keeps the registry and the visible strip
//! in lock-step.
//!
//! `TabShell` is driven from the UI thread. Every inbound operation completes
//! its registry and strip updates before returning; only per-tab background
//! work runs elsewhere, on the tokio runtime handed in with
//! [`TabShell::with_runtime`].

mod controller;
mod error;
mod factory;
mod shutdown;
mod ui;

pub use error::ShellError;
pub use ui::{BusyGuard, ConfirmChoice, SaveTarget, ShellUi};

pub(crate) use error::panic_reason;

use crate::config::Config;
use crate::kinds::HandlerSet;
use crate::tab::{TabFields, TabId, TabIdAllocator, TabRecord, TabRegistry, TabState, TabStrip};
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Handle;

/// Result of a rename request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed(String),
    /// Empty or whitespace-only input; the label was kept
    Ignored,
    Cancelled,
    NoActiveTab,
    Failed,
}

/// Result of a close request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed(TabId),
    Cancelled,
    NoActiveTab,
    /// The tab could not be found; nothing changed
    Failed,
}

/// Result of a save request
#[derive(Debug)]
pub enum SaveOutcome {
    Saved(PathBuf),
    /// No destination was chosen, or the overwrite prompt was cancelled
    Cancelled,
    /// A save is already running or the background task is busy
    Refused,
    Failed(ShellError),
    NoActiveTab,
}

/// What a shutdown sweep released
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShutdownReport {
    pub tabs_released: usize,
    pub tasks_cancelled: usize,
    pub surfaces_released: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    Completed(ShutdownReport),
    Aborted,
}

/// What tearing down one tab released
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Teardown {
    pub surfaces_released: usize,
    pub task_cancelled: bool,
}

pub struct TabShell {
    config: Config,
    handlers: HandlerSet,
    ids: TabIdAllocator,
    registry: TabRegistry,
    strip: TabStrip,
    runtime: Option<Handle>,
    shut_down: bool,
}

impl TabShell {
    pub fn new(config: Config, handlers: HandlerSet) -> Self {
        Self {
            config,
            handlers,
            ids: TabIdAllocator::new(),
            registry: TabRegistry::new(),
            strip: TabStrip::new(),
            runtime: None,
            shut_down: false,
        }
    }

    /// Run background tasks on `runtime`. Without one, starting a task is refused.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn strip(&self) -> &TabStrip {
        &self.strip
    }

    pub fn tab_count(&self) -> usize {
        self.registry.len()
    }

    /// Id the next successful or failed creation will consume
    pub fn peek_next_id(&self) -> TabId {
        self.ids.peek()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn active_tab_id(&self) -> Option<TabId> {
        self.strip.active_tab_id()
    }

    pub fn active_record(&self) -> Option<&TabRecord> {
        let id = self.strip.active_tab_id()?;
        self.registry.get(id).ok()
    }

    pub fn active_record_mut(&mut self) -> Option<&mut TabRecord> {
        let id = self.strip.active_tab_id()?;
        self.registry.get_mut(id).ok()
    }

    pub fn record(&self, id: TabId) -> Result<&TabRecord, ShellError> {
        self.registry.get(id)
    }

    /// Mutable access for editing a tab's fields from the frontend
    pub fn record_mut(&mut self, id: TabId) -> Result<&mut TabRecord, ShellError> {
        self.registry.get_mut(id)
    }

    pub fn switch_to(&mut self, id: TabId) -> bool {
        self.strip.switch_to(id)
    }

    pub fn next_tab(&mut self) {
        self.strip.next_tab();
    }

    pub fn prev_tab(&mut self) {
        self.strip.prev_tab();
    }

    /// Reorder a tab in the strip (tab bar drag-and-drop)
    pub fn move_tab_to_index(&mut self, id: TabId, index: usize) -> bool {
        self.strip.move_tab_to_index(id, index)
    }

    /// Verify that strip and registry describe the same set of tabs and that
    /// every record's fields match its kind. Violations are logged.
    pub fn check_invariants(&self) -> bool {
        let mut ok = true;

        let strip_ids = self.strip.ids();
        let mut seen = std::collections::HashSet::new();
        for id in &strip_ids {
            if !seen.insert(*id) {
                log::error!("Tab {} appears more than once in the strip", id);
                ok = false;
            }
            if !self.registry.contains(*id) {
                log::error!("Strip entry {} has no registry record", id);
                ok = false;
            }
        }
        for record in self.registry.iter() {
            if !seen.contains(&record.id()) {
                log::error!("Registry record {} is not shown in the strip", record.id());
                ok = false;
            }
            if record.fields().kind() != record.kind() {
                log::error!(
                    "Tab {} is a {} tab holding {} fields",
                    record.id(),
                    record.kind(),
                    record.fields().kind()
                );
                ok = false;
            }
        }
        if let Some(active) = self.strip.active_tab_id()
            && !self.strip.contains(active)
        {
            log::error!("Active tab {} is not in the strip", active);
            ok = false;
        }
        if self.strip.active_tab_id().is_none() != self.strip.is_empty() {
            log::error!("Active selection does not match strip contents");
            ok = false;
        }

        ok
    }

    /// Start the active tab's background work
    pub fn start_background_task(&mut self, ui: &dyn ShellUi) -> bool {
        let Some(id) = self.strip.active_tab_id() else {
            return false;
        };
        let Some(runtime) = self.runtime.clone() else {
            log::warn!("No runtime available for background work in tab {}", id);
            ui.warn("Warning", "Background processing is not available");
            return false;
        };
        let tick = Duration::from_millis(self.config.processor_tick_ms.max(1));

        let record = match self.registry.get_mut(id) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Cannot start background work: {}", e);
                return false;
            }
        };
        if record.state() != TabState::Active {
            return false;
        }
        let Some(handler) = self.handlers.get(record.kind()) else {
            return false;
        };
        let Some(task) = record.task_mut() else {
            log::debug!("Tab {} has no background work", id);
            return false;
        };
        let Some(ctx) = task.prepare() else {
            ui.warn("Warning", "Processing is already running in this tab");
            return false;
        };
        let Some(future) = handler.run_task(record.fields(), ctx, tick) else {
            return false;
        };

        let started = record
            .task_mut()
            .is_some_and(|task| task.spawn(&runtime, future));
        if !started {
            log::warn!("Background work in tab {} was refused by its task slot", id);
            ui.warn("Warning", "Failed to start processing");
            return false;
        }
        if let TabFields::Processor(p) = record.fields_mut() {
            p.frames_processed = 0;
            p.is_processing = true;
        }
        log::info!("Started background work in tab {}", id);
        true
    }

    /// Signal the active tab's background work to stop
    pub fn stop_background_task(&mut self) -> bool {
        let Some(record) = self.active_record_mut() else {
            return false;
        };
        let id = record.id();
        let cancelled = record.cancel_task();
        if cancelled {
            log::info!("Stopped background work in tab {}", id);
        }
        cancelled
    }

    /// Copy background progress into each tab's fields
    pub fn sync_task_state(&mut self) {
        for record in self.registry.iter_mut() {
            let Some((progress, running)) = record
                .task()
                .map(|task| (task.progress(), task.is_running()))
            else {
                continue;
            };
            if let TabFields::Processor(p) = record.fields_mut() {
                p.frames_processed = progress.min(p.total_frames());
                p.is_processing = running;
            }
        }
    }
}

impl Drop for TabShell {
    fn drop(&mut self) {
        if !self.registry.is_empty() {
            log::debug!(
                "Shell dropped with {} open tab(s); releasing",
                self.registry.len()
            );
            self.shutdown_sweep();
        }
    }
}

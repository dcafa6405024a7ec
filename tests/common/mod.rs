//! Shared integration test helpers for tabshell.
//!
//! Provides a scripted [`MockUi`] that answers the shell's questions from
//! queues and records every notification and busy transition, plus a
//! configurable [`StubHandler`] standing in for a tab kind.
//!
//! Include with `mod common;` at the top of each test file. The
//! `#[allow(dead_code)]` suppresses warnings when a file uses only a subset.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tabshell::config::{Config, TabId, TabKind};
use tabshell::kinds::{BuildContext, HandlerSet, TabKindHandler, TabParts};
use tabshell::shell::{ConfirmChoice, SaveTarget, ShellUi, TabShell};
use tabshell::tab::layout::LayoutDescriptor;
use tabshell::tab::view::{RenderSurface, Widget};
use tabshell::tab::{TabFields, TabRecord, TaskContext, TaskFuture};

/// A notification shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Warn(String),
    Error(String),
    Info(String),
}

/// Scripted user. Unanswered questions fall back to: confirm → yes,
/// yes/no/cancel → cancel, text prompt → cancelled, destination → none.
#[derive(Default)]
pub struct MockUi {
    confirms: RefCell<VecDeque<bool>>,
    choices: RefCell<VecDeque<ConfirmChoice>>,
    prompts: RefCell<VecDeque<Option<String>>>,
    destinations: RefCell<VecDeque<Option<PathBuf>>>,
    notices: RefCell<Vec<Notice>>,
    busy_log: RefCell<Vec<bool>>,
    busy: Cell<bool>,
    questions: Cell<usize>,
}

impl MockUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer_confirm(self, yes: bool) -> Self {
        self.confirms.borrow_mut().push_back(yes);
        self
    }

    pub fn answer_choice(self, choice: ConfirmChoice) -> Self {
        self.choices.borrow_mut().push_back(choice);
        self
    }

    pub fn answer_prompt(self, text: Option<&str>) -> Self {
        self.prompts.borrow_mut().push_back(text.map(str::to_string));
        self
    }

    pub fn answer_destination(self, path: Option<&Path>) -> Self {
        self.destinations
            .borrow_mut()
            .push_back(path.map(Path::to_path_buf));
        self
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.filter(|n| match n {
            Notice::Error(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<String> {
        self.filter(|n| match n {
            Notice::Warn(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn infos(&self) -> Vec<String> {
        self.filter(|n| match n {
            Notice::Info(m) => Some(m.clone()),
            _ => None,
        })
    }

    /// Every `set_busy` call in order
    pub fn busy_transitions(&self) -> Vec<bool> {
        self.busy_log.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Number of modal questions asked (confirmations, prompts, pickers)
    pub fn questions_asked(&self) -> usize {
        self.questions.get()
    }

    fn filter(&self, f: impl Fn(&Notice) -> Option<String>) -> Vec<String> {
        self.notices.borrow().iter().filter_map(f).collect()
    }

    fn asked(&self) {
        self.questions.set(self.questions.get() + 1);
    }
}

impl ShellUi for MockUi {
    fn warn(&self, _title: &str, message: &str) {
        self.notices
            .borrow_mut()
            .push(Notice::Warn(message.to_string()));
    }

    fn error(&self, _title: &str, message: &str) {
        self.notices
            .borrow_mut()
            .push(Notice::Error(message.to_string()));
    }

    fn info(&self, _title: &str, message: &str) {
        self.notices
            .borrow_mut()
            .push(Notice::Info(message.to_string()));
    }

    fn confirm(&self, _title: &str, _message: &str) -> bool {
        self.asked();
        self.confirms.borrow_mut().pop_front().unwrap_or(true)
    }

    fn confirm_with_cancel(&self, _title: &str, _message: &str) -> ConfirmChoice {
        self.asked();
        self.choices
            .borrow_mut()
            .pop_front()
            .unwrap_or(ConfirmChoice::Cancel)
    }

    fn prompt_text(&self, _title: &str, _message: &str, _default: &str) -> Option<String> {
        self.asked();
        self.prompts.borrow_mut().pop_front().flatten()
    }

    fn choose_destination(&self, _target: &SaveTarget) -> Option<PathBuf> {
        self.asked();
        self.destinations.borrow_mut().pop_front().flatten()
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
        self.busy_log.borrow_mut().push(busy);
    }
}

/// How a [`StubHandler`] builds its tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    #[default]
    Ok,
    Fail,
    Panic,
    /// Two widgets on the same slot
    OverlappingLayout,
    /// A widget placed at the far end of the index range
    OutOfRangeLayout,
    /// Fields of a different kind than the handler's
    WrongFields,
}

/// How a [`StubHandler`] saves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveMode {
    #[default]
    Ok,
    Fail,
    Panic,
}

/// Stand-in kind handler with scripted behavior
pub struct StubHandler {
    pub kind: TabKind,
    pub build: BuildMode,
    pub save: SaveMode,
    pub surfaces: usize,
    pub background: bool,
    pub teardowns: Arc<AtomicUsize>,
}

impl StubHandler {
    pub fn new(kind: TabKind) -> Self {
        Self {
            kind,
            build: BuildMode::Ok,
            save: SaveMode::Ok,
            surfaces: 0,
            background: false,
            teardowns: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn build_mode(mut self, mode: BuildMode) -> Self {
        self.build = mode;
        self
    }

    pub fn save_mode(mut self, mode: SaveMode) -> Self {
        self.save = mode;
        self
    }

    pub fn with_surfaces(mut self, count: usize) -> Self {
        self.surfaces = count;
        self
    }

    pub fn with_background(mut self) -> Self {
        self.background = true;
        self
    }

    pub fn file_name(id: TabId) -> String {
        format!("stub-{id}.txt")
    }
}

impl TabKindHandler for StubHandler {
    fn kind(&self) -> TabKind {
        self.kind
    }

    fn build(&self, _ctx: &BuildContext<'_>) -> anyhow::Result<TabParts> {
        let mut layout = LayoutDescriptor::new().place("title", 0, 0);
        let mut fields = TabFields::defaults(self.kind);
        match self.build {
            BuildMode::Ok => {}
            BuildMode::Fail => anyhow::bail!("stub refused to build"),
            BuildMode::Panic => panic!("stub build exploded"),
            BuildMode::OverlappingLayout => layout = layout.place("other", 0, 0),
            BuildMode::OutOfRangeLayout => layout = layout.place("other", usize::MAX, 0),
            BuildMode::WrongFields => {
                let other = TabKind::all()
                    .iter()
                    .copied()
                    .find(|k| *k != self.kind)
                    .unwrap();
                fields = TabFields::defaults(other);
            }
        }

        let widgets = vec![Widget::label("title", "Stub"), Widget::label("other", "Other")];
        let mut parts = TabParts::new(widgets, layout, fields);
        for _ in 0..self.surfaces {
            parts = parts.with_surface(RenderSurface::new("stub", [8, 8]));
        }
        if self.background {
            parts = parts.with_background_task();
        }
        Ok(parts)
    }

    fn teardown(&self, record: &mut TabRecord) -> usize {
        self.teardowns.fetch_add(1, Ordering::SeqCst);
        record.view_mut().release_surfaces()
    }

    fn save_target(&self, _id: TabId, _fields: &TabFields) -> SaveTarget {
        SaveTarget::Directory {
            title: "Pick a folder".to_string(),
        }
    }

    fn output_path(&self, id: TabId, destination: &Path) -> Option<PathBuf> {
        Some(destination.join(Self::file_name(id)))
    }

    fn serialize(
        &self,
        id: TabId,
        _fields: &TabFields,
        destination: &Path,
    ) -> anyhow::Result<PathBuf> {
        match self.save {
            SaveMode::Ok => {
                let path = destination.join(Self::file_name(id));
                std::fs::write(&path, format!("tab {id}"))?;
                Ok(path)
            }
            SaveMode::Fail => anyhow::bail!("disk full"),
            SaveMode::Panic => panic!("serializer exploded"),
        }
    }

    fn run_task(&self, _fields: &TabFields, ctx: TaskContext, tick: Duration) -> Option<TaskFuture> {
        if !self.background {
            return None;
        }
        Some(Box::pin(async move {
            while !ctx.is_cancelled() {
                ctx.add_progress(1);
                tokio::time::sleep(tick).await;
            }
        }))
    }
}

/// Config with close confirmation on and save notifications on
pub fn test_config() -> Config {
    Config {
        initial_tab_kind: None,
        ..Config::default()
    }
}

/// Shell with the built-in kinds
pub fn default_shell() -> TabShell {
    TabShell::new(test_config(), HandlerSet::with_defaults())
}

/// Shell whose only handler is `handler`
pub fn shell_with(handler: StubHandler) -> TabShell {
    TabShell::new(test_config(), HandlerSet::empty().with(handler))
}

/// Create `count` tabs of `kind`, panicking on failure
pub fn create_tabs(shell: &mut TabShell, kind: TabKind, count: usize) -> Vec<TabId> {
    (0..count)
        .map(|_| shell.create(kind, None).expect("tab creation failed"))
        .collect()
}

/// Mark a tab's background task as running without spawning anything
pub fn mark_task_running(shell: &mut TabShell, id: TabId) {
    shell
        .record_mut(id)
        .expect("tab exists")
        .task_mut()
        .expect("tab has a task slot")
        .mark_running();
}

/// Poll `condition` until it holds or `timeout` expires
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = std::time::Instant::now() + timeout;
    while std::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}

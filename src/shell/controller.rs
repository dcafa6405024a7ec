//! Rename, close and save, all resolved through the strip's active tab

use super::{
    BusyGuard, CloseOutcome, ConfirmChoice, RenameOutcome, SaveOutcome, SaveTarget, ShellError,
    ShellUi, TabShell, Teardown, panic_reason,
};
use crate::tab::{TabId, TabState};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};

impl TabShell {
    /// Prompt for a new label for the active tab
    pub fn rename_active_tab(&mut self, ui: &dyn ShellUi) -> RenameOutcome {
        match self.strip.active_tab_id() {
            Some(id) => self.rename_tab_with_prompt(id, ui),
            None => RenameOutcome::NoActiveTab,
        }
    }

    /// Prompt for a new label for `id`. The target is fixed before the
    /// prompt opens, so switching tabs meanwhile does not move the rename.
    pub fn rename_tab_with_prompt(&mut self, id: TabId, ui: &dyn ShellUi) -> RenameOutcome {
        if !self.registry.contains(id) {
            log::warn!("Rename requested for unknown tab {}", id);
            ui.warn("Warning", "Failed to rename the current tab");
            return RenameOutcome::Failed;
        }
        let current = self.strip.label(id).unwrap_or_default().to_string();

        let Some(name) = ui.prompt_text("Rename Current Tab", "Enter new tab name:", &current)
        else {
            return RenameOutcome::Cancelled;
        };

        match self.rename_tab(id, &name) {
            Ok(true) => RenameOutcome::Renamed(name.trim().to_string()),
            Ok(false) => RenameOutcome::Ignored,
            Err(e) => {
                log::warn!("Failed to rename the current tab: {}", e);
                ui.warn("Warning", "Failed to rename the current tab");
                RenameOutcome::Failed
            }
        }
    }

    /// Set a tab's visible label. Returns `Ok(false)` for a blank label,
    /// which is ignored. Only the strip changes; the tab's fields do not.
    pub fn rename_tab(&mut self, id: TabId, label: &str) -> Result<bool, ShellError> {
        if !self.registry.contains(id) {
            return Err(ShellError::UnknownTab(id));
        }
        let label = label.trim();
        if label.is_empty() {
            return Ok(false);
        }
        if !self.strip.set_label(id, label) {
            log::error!("Tab {} is registered but missing from the strip", id);
            return Err(ShellError::UnknownTab(id));
        }
        log::info!("Renamed tab {} to '{}'", id, label);
        Ok(true)
    }

    /// Close the active tab after confirmation
    pub fn close_active_tab(&mut self, ui: &dyn ShellUi) -> CloseOutcome {
        match self.strip.active_tab_id() {
            Some(id) => self.close_tab(id, ui),
            None => CloseOutcome::NoActiveTab,
        }
    }

    /// Close a specific tab after confirmation
    pub fn close_tab(&mut self, id: TabId, ui: &dyn ShellUi) -> CloseOutcome {
        if !self.registry.contains(id) {
            log::warn!("Close requested for unknown tab {}", id);
            ui.warn("Warning", "Failed to close the current tab");
            return CloseOutcome::Failed;
        }
        if self.config.confirm_close_tab
            && !ui.confirm("Message", "Are you sure to close the current tab?")
        {
            return CloseOutcome::Cancelled;
        }

        match self.destroy_tab(id) {
            Ok(_) => CloseOutcome::Closed(id),
            Err(e) => {
                log::warn!("Failed to close tab {}: {}", id, e);
                ui.warn("Warning", "Failed to close the current tab");
                CloseOutcome::Failed
            }
        }
    }

    /// Tear down and remove a tab without asking. Releases its surfaces,
    /// signals its background task, then removes it from registry and strip.
    pub fn destroy_tab(&mut self, id: TabId) -> Result<Teardown, ShellError> {
        let record = self.registry.get_mut(id)?;
        record.set_state(TabState::Closing);

        let mut surfaces_released = match self.handlers.get(record.kind()) {
            Some(handler) => catch_unwind(AssertUnwindSafe(|| handler.teardown(record)))
                .unwrap_or_else(|payload| {
                    log::error!(
                        "Teardown of tab {} failed: {}",
                        id,
                        panic_reason(payload.as_ref())
                    );
                    0
                }),
            None => 0,
        };
        // Whatever the kind's teardown left behind
        let (leftover, task_cancelled) = record.release_resources();
        surfaces_released += leftover;

        self.registry.remove(id)?;
        if self.strip.remove(id).is_none() {
            log::error!("Tab {} was registered but missing from the strip", id);
        }
        log::info!(
            "Closed tab {} ({} surface(s) released, task cancelled: {})",
            id,
            surfaces_released,
            task_cancelled
        );

        Ok(Teardown {
            surfaces_released,
            task_cancelled,
        })
    }

    /// Save the active tab
    pub fn save_active_tab(&mut self, ui: &dyn ShellUi) -> SaveOutcome {
        match self.strip.active_tab_id() {
            Some(id) => self.save_tab(id, ui),
            None => SaveOutcome::NoActiveTab,
        }
    }

    /// Ask for a destination and hand the tab's fields to its kind's serializer.
    ///
    /// The busy indicator is raised only while the serializer runs and is
    /// lowered before any result dialog, including when the serializer panics.
    pub fn save_tab(&mut self, id: TabId, ui: &dyn ShellUi) -> SaveOutcome {
        let record = match self.registry.get(id) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Save requested for unknown tab {}", id);
                ui.warn("Warning", "The selected tab no longer exists");
                return SaveOutcome::Failed(e);
            }
        };
        if record.state() == TabState::Saving {
            log::warn!("Tab {} is already saving", id);
            ui.warn("Warning", "A save is already in progress for this tab");
            return SaveOutcome::Refused;
        }
        if record.is_task_running() {
            log::warn!("Refusing to save tab {} while processing", id);
            ui.warn("Warning", "Stop processing before saving this tab");
            return SaveOutcome::Refused;
        }
        let kind = record.kind();
        let Some(handler) = self.handlers.get(kind) else {
            let err = ShellError::SaveFailure {
                id,
                reason: format!("no handler registered for {kind} tabs"),
            };
            log::error!("{}", err);
            ui.error("Error", "Failed to save files");
            return SaveOutcome::Failed(err);
        };

        let target = handler.save_target(id, record.fields());
        let Some(destination) = Self::choose_destination(ui, &target, |chosen| match &target {
            SaveTarget::File { .. } => Some(chosen.to_path_buf()),
            SaveTarget::Directory { .. } => handler.output_path(id, chosen),
        }) else {
            log::info!("Save of tab {} cancelled", id);
            return SaveOutcome::Cancelled;
        };

        let result = {
            let Ok(record) = self.registry.get_mut(id) else {
                return SaveOutcome::Failed(ShellError::UnknownTab(id));
            };
            record.set_state(TabState::Saving);
            let result = {
                let _busy = BusyGuard::new(ui);
                catch_unwind(AssertUnwindSafe(|| {
                    handler.serialize(id, record.fields(), &destination)
                }))
            };
            record.set_state(TabState::Active);

            match result {
                Ok(Ok(path)) => {
                    record.fields_mut().mark_saved(&path);
                    Ok(path)
                }
                Ok(Err(e)) => Err(format!("{e:#}")),
                Err(payload) => Err(panic_reason(payload.as_ref())),
            }
        };

        match result {
            Ok(path) => {
                log::info!("Saved tab {} to {}", id, path.display());
                if self.config.notify_on_save {
                    ui.info("Saved", &format!("Saved to {}", path.display()));
                }
                SaveOutcome::Saved(path)
            }
            Err(reason) => {
                let err = ShellError::SaveFailure { id, reason };
                log::error!("{}", err);
                ui.error("Error", &format!("Failed to save files\n\n{err}"));
                SaveOutcome::Failed(err)
            }
        }
    }

    /// Prompt until the user picks a destination that does not clobber an
    /// existing file, agrees to overwrite, or gives up
    fn choose_destination(
        ui: &dyn ShellUi,
        target: &SaveTarget,
        existing_output: impl Fn(&Path) -> Option<PathBuf>,
    ) -> Option<PathBuf> {
        loop {
            let chosen = ui.choose_destination(target)?;
            let Some(existing) = existing_output(chosen.as_path()).filter(|p| p.exists()) else {
                return Some(chosen);
            };
            let message = format!("{} already exists. Overwrite it?", existing.display());
            match ui.confirm_with_cancel("Warning", &message) {
                ConfirmChoice::Yes => return Some(chosen),
                ConfirmChoice::No => continue,
                ConfirmChoice::Cancel => return None,
            }
        }
    }
}

//! Application shutdown: confirm, then release every tab before the window closes

use super::{ShellUi, ShutdownOutcome, ShutdownReport, TabShell};

impl TabShell {
    /// Ask to quit and, if confirmed, sweep every tab.
    ///
    /// The window may close only after this returns `Completed`.
    pub fn request_shutdown(&mut self, ui: &dyn ShellUi) -> ShutdownOutcome {
        if self.shut_down {
            return ShutdownOutcome::Completed(ShutdownReport::default());
        }
        if self.config.confirm_quit
            && !self.registry.is_empty()
            && !ui.confirm(
                "Message",
                "Are you sure to close the application?\nAll unsaved work will be lost!",
            )
        {
            log::info!("Shutdown aborted by user");
            return ShutdownOutcome::Aborted;
        }
        ShutdownOutcome::Completed(self.shutdown_sweep())
    }

    /// Tear down every tab in registry order without asking. Background tasks
    /// are signalled, not joined. Leaves the shell refusing new tabs.
    pub fn shutdown_sweep(&mut self) -> ShutdownReport {
        let mut report = ShutdownReport::default();

        for id in self.registry.all() {
            match self.destroy_tab(id) {
                Ok(teardown) => {
                    report.tabs_released += 1;
                    report.surfaces_released += teardown.surfaces_released;
                    if teardown.task_cancelled {
                        report.tasks_cancelled += 1;
                    }
                }
                Err(e) => log::error!("Shutdown could not release tab {}: {}", id, e),
            }
        }
        for orphan in self.strip.clear() {
            log::error!("Dropped strip entry {} with no registry record", orphan.id);
        }

        self.shut_down = true;
        log::info!(
            "Shutdown complete: {} tab(s) released, {} task(s) cancelled, {} surface(s) released",
            report.tabs_released,
            report.tasks_cancelled,
            report.surfaces_released
        );
        report
    }
}

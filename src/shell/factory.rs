//! Tab creation

use super::{ShellError, ShellUi, TabShell, panic_reason};
use crate::kinds::{BuildContext, TabParts};
use crate::tab::view::RenderSurface;
use crate::tab::{BackgroundTask, TabId, TabKind, TabRecord, TabView};
use std::panic::{AssertUnwindSafe, catch_unwind};

fn release_all(surfaces: &mut [RenderSurface]) {
    for surface in surfaces {
        surface.release();
    }
}

/// Validate the handler's layout and turn its parts into a record
fn assemble(id: TabId, parts: TabParts) -> Result<TabRecord, ShellError> {
    let TabParts {
        widgets,
        layout,
        mut surfaces,
        theme,
        fields,
        background,
    } = parts;

    let mut view = match TabView::new(widgets, layout) {
        Ok(view) => view,
        Err(e) => {
            release_all(&mut surfaces);
            return Err(e.into());
        }
    };
    view.theme = theme;
    for surface in surfaces {
        view = view.with_surface(surface);
    }

    let record = TabRecord::new(id, view, fields);
    Ok(if background {
        record.with_task(BackgroundTask::idle())
    } else {
        record
    })
}

impl TabShell {
    /// Create a tab and report any failure to the user
    pub fn create_tab(
        &mut self,
        kind: TabKind,
        label: Option<&str>,
        ui: &dyn ShellUi,
    ) -> Option<TabId> {
        match self.create(kind, label) {
            Ok(id) => Some(id),
            Err(ShellError::TabLimit(max)) => {
                ui.warn("Warning", &format!("Cannot open more than {max} tabs"));
                None
            }
            Err(ShellError::ShutDown) => None,
            Err(e) => {
                log::error!("Failed to create new tab: {}", e);
                ui.error("Error", &format!("Failed to build new tab\n\n{e}"));
                None
            }
        }
    }

    /// Create a tab of `kind`, labelled `label` or the configured template.
    ///
    /// On error nothing is left in the registry or the strip. The id drawn for
    /// a failed attempt is not reissued.
    pub fn create(&mut self, kind: TabKind, label: Option<&str>) -> Result<TabId, ShellError> {
        if self.shut_down {
            log::warn!("Refusing to create a {} tab after shutdown", kind);
            return Err(ShellError::ShutDown);
        }
        if !self.config.allows_another_tab(self.registry.len()) {
            log::warn!(
                "Cannot create new tab: max_tabs limit ({}) reached",
                self.config.max_tabs
            );
            return Err(ShellError::TabLimit(self.config.max_tabs));
        }
        let Some(handler) = self.handlers.get(kind) else {
            return Err(ShellError::ConstructionFailure {
                kind,
                reason: "no handler registered".to_string(),
            });
        };

        let id = self.ids.next_id();
        let ctx = BuildContext {
            id,
            config: &self.config,
        };
        let mut parts = catch_unwind(AssertUnwindSafe(|| handler.build(&ctx)))
            .map_err(|payload| ShellError::ConstructionFailure {
                kind,
                reason: panic_reason(payload.as_ref()),
            })?
            .map_err(|e| ShellError::ConstructionFailure {
                kind,
                reason: format!("{e:#}"),
            })?;

        if parts.fields.kind() != kind {
            release_all(&mut parts.surfaces);
            return Err(ShellError::ConstructionFailure {
                kind,
                reason: format!("handler produced {} fields", parts.fields.kind()),
            });
        }

        let record = assemble(id, parts)?;
        let label = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.config.label_for(id));

        self.registry.insert(record)?;
        log::info!("Created {} tab {} ('{}')", kind, id, label);
        self.strip.push(id, label);
        Ok(id)
    }
}

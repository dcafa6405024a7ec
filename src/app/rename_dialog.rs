//! Rename prompt for the active tab.
//!
//! Opened from the menu or Ctrl+R. The dialog remembers which tab it was
//! opened for; the answer is handed to `DesktopUi`, which gives it back when
//! the shell asks for that tab's new name.

use crate::tab::TabId;

/// Action returned by the rename dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameAction {
    /// User confirmed with this text for this tab
    Rename(TabId, String),
    Cancel(TabId),
    /// Dialog still showing (or hidden)
    None,
}

#[derive(Default)]
pub struct RenameDialog {
    visible: bool,
    target: Option<TabId>,
    text: String,
    focus_requested: bool,
}

impl RenameDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the dialog for `id`, prefilled with its current label
    pub fn open(&mut self, id: TabId, current_label: &str) {
        self.visible = true;
        self.target = Some(id);
        self.text = current_label.to_string();
        self.focus_requested = true;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.target = None;
        self.text.clear();
    }

    /// Render the dialog and return any action
    pub fn show(&mut self, ctx: &egui::Context) -> RenameAction {
        let Some(id) = self.target.filter(|_| self.visible) else {
            return RenameAction::None;
        };

        let mut action = RenameAction::None;

        egui::Modal::new(egui::Id::new("rename_dialog")).show(ctx, |ui| {
            ui.heading("Rename Current Tab");
            ui.label("Enter new tab name:");
            let response = ui.text_edit_singleline(&mut self.text);
            if self.focus_requested {
                response.request_focus();
                self.focus_requested = false;
            }
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                action = RenameAction::Rename(id, self.text.clone());
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    action = RenameAction::Rename(id, self.text.clone());
                }
                if ui.button("Cancel").clicked() {
                    action = RenameAction::Cancel(id);
                }
            });
        });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            action = RenameAction::Cancel(id);
        }

        if !matches!(action, RenameAction::None) {
            self.hide();
        }

        action
    }
}

//! Tab bar UI using egui
//!
//! Draws the strip: click to switch, × to close, double-click to rename in place.

use crate::tab::{TabId, TabStrip};

/// Actions that can be triggered from the tab bar
#[derive(Debug, Clone, PartialEq)]
pub enum TabBarAction {
    None,
    SwitchTo(TabId),
    Close(TabId),
    /// Inline rename committed with Enter
    Rename(TabId, String),
    /// Reorder a tab to a new position
    Reorder(TabId, usize),
}

/// Tab bar UI state
#[derive(Default)]
pub struct TabBarUI {
    /// Tab being renamed in place, with the text typed so far
    editing: Option<(TabId, String)>,
}

impl TabBarUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Render the tab bar and return any action triggered
    pub fn render(&mut self, ctx: &egui::Context, strip: &TabStrip) -> TabBarAction {
        let mut action = TabBarAction::None;
        let active = strip.active_tab_id();
        let count = strip.len();

        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                for (index, entry) in strip.entries().iter().enumerate() {
                    if let Some((editing_id, text)) = self.editing.as_mut()
                        && *editing_id == entry.id
                    {
                        let response = ui.add(
                            egui::TextEdit::singleline(text).desired_width(120.0),
                        );
                        response.request_focus();
                        if response.lost_focus() {
                            if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                                action = TabBarAction::Rename(entry.id, text.clone());
                            }
                            self.editing = None;
                        }
                        continue;
                    }

                    ui.group(|ui| {
                        let tab = ui.selectable_label(Some(entry.id) == active, &entry.label);
                        if tab.double_clicked() {
                            self.editing = Some((entry.id, entry.label.clone()));
                        } else if tab.clicked() {
                            action = TabBarAction::SwitchTo(entry.id);
                        }
                        tab.context_menu(|ui| {
                            if index > 0 && ui.button("Move left").clicked() {
                                action = TabBarAction::Reorder(entry.id, index - 1);
                                ui.close();
                            }
                            if index + 1 < count && ui.button("Move right").clicked() {
                                action = TabBarAction::Reorder(entry.id, index + 1);
                                ui.close();
                            }
                        });

                        if ui.small_button("×").on_hover_text("Close tab").clicked() {
                            action = TabBarAction::Close(entry.id);
                        }
                    });
                }
            });
        });

        action
    }
}

//! Desktop frontend: an eframe window around a [`TabShell`].
//!
//! The frontend owns no tab state. It draws the strip and the active tab's
//! view, turns menu items, shortcuts and tab bar clicks into shell calls, and
//! routes the window's close button through `request_shutdown`.

mod desktop_ui;
mod rename_dialog;
mod tab_bar;
mod tab_view;

pub use desktop_ui::DesktopUi;
pub use rename_dialog::{RenameAction, RenameDialog};
pub use tab_bar::{TabBarAction, TabBarUI};

use crate::cli::RuntimeOptions;
use crate::config::{Config, TabKind};
use crate::kinds::HandlerSet;
use crate::shell::{ShutdownOutcome, TabShell};
use crate::tab::view::ButtonAction;
use anyhow::anyhow;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Menu and shortcut commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    NewTab(TabKind),
    Rename,
    Close,
    Save,
}

pub struct ShellApp {
    shell: TabShell,
    ui: DesktopUi,
    tab_bar: TabBarUI,
    rename_dialog: RenameDialog,
    /// Set once shutdown completed; lets the next close request through
    allow_close: bool,
}

impl ShellApp {
    pub fn new(
        ctx: &egui::Context,
        config: Config,
        runtime: &Runtime,
        options: &RuntimeOptions,
    ) -> Self {
        let initial_kind = options.initial_tab_kind(&config);
        let shell =
            TabShell::new(config, HandlerSet::with_defaults()).with_runtime(runtime.handle().clone());
        let mut app = Self {
            shell,
            ui: DesktopUi::new(ctx.clone()),
            tab_bar: TabBarUI::new(),
            rename_dialog: RenameDialog::new(),
            allow_close: false,
        };

        if let Some(kind) = initial_kind {
            // Failure is reported by the shell; the window still opens
            app.shell.create_tab(kind, None, &app.ui);
        }
        app
    }

    fn run_command(&mut self, command: Command) {
        match command {
            Command::NewTab(kind) => {
                self.shell.create_tab(kind, None, &self.ui);
            }
            Command::Rename => {
                if let Some(id) = self.shell.active_tab_id() {
                    let label = self.shell.strip().label(id).unwrap_or_default().to_string();
                    self.rename_dialog.open(id, &label);
                }
            }
            Command::Close => {
                self.shell.close_active_tab(&self.ui);
            }
            Command::Save => {
                self.shell.save_active_tab(&self.ui);
            }
        }
    }

    fn shortcut_commands(&self, ctx: &egui::Context) -> Vec<Command> {
        if self.rename_dialog.is_visible() || self.tab_bar.is_editing() {
            return Vec::new();
        }
        let shortcuts = [
            (egui::Key::N, Command::NewTab(TabKind::Generic)),
            (egui::Key::R, Command::Rename),
            (egui::Key::W, Command::Close),
            (egui::Key::S, Command::Save),
        ];
        ctx.input_mut(|i| {
            shortcuts
                .into_iter()
                .filter(|(key, _)| {
                    i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, *key))
                })
                .map(|(_, command)| command)
                .collect()
        })
    }

    fn menu_bar(&mut self, ctx: &egui::Context) -> Option<Command> {
        let mut command = None;
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button("Options", |ui| {
                    for kind in TabKind::all() {
                        if ui
                            .button(format!("New {} Tab", kind.display_name()))
                            .clicked()
                        {
                            command = Some(Command::NewTab(*kind));
                        }
                    }
                    ui.separator();
                    if ui.button("Rename Current Tab").clicked() {
                        command = Some(Command::Rename);
                    }
                    if ui.button("Close Current Tab").clicked() {
                        command = Some(Command::Close);
                    }
                    if ui.button("Save Current Tab").clicked() {
                        command = Some(Command::Save);
                    }
                });
            });
        });
        command
    }

    fn handle_tab_bar(&mut self, action: TabBarAction) {
        match action {
            TabBarAction::None => {}
            TabBarAction::SwitchTo(id) => {
                self.shell.switch_to(id);
            }
            TabBarAction::Close(id) => {
                self.shell.close_tab(id, &self.ui);
            }
            TabBarAction::Rename(id, label) => {
                if let Err(e) = self.shell.rename_tab(id, &label) {
                    log::warn!("Inline rename failed: {}", e);
                }
            }
            TabBarAction::Reorder(id, index) => {
                self.shell.move_tab_to_index(id, index);
            }
        }
    }

    fn handle_button(&mut self, action: ButtonAction) {
        match action {
            ButtonAction::Noop => {}
            ButtonAction::StartTask => {
                self.shell.start_background_task(&self.ui);
            }
            ButtonAction::StopTask => {
                self.shell.stop_background_task();
            }
            ButtonAction::Save => {
                self.shell.save_active_tab(&self.ui);
            }
        }
    }

    fn handle_close_request(&mut self, ctx: &egui::Context) {
        if !ctx.input(|i| i.viewport().close_requested()) || self.allow_close {
            return;
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        if let ShutdownOutcome::Completed(report) = self.shell.request_shutdown(&self.ui) {
            log::info!("Closing window after releasing {} tab(s)", report.tabs_released);
            self.allow_close = true;
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl eframe::App for ShellApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_close_request(ctx);
        self.shell.sync_task_state();

        // Input outside the rename prompt is dropped while it is open
        let modal = self.rename_dialog.is_visible();
        let mut commands = self.shortcut_commands(ctx);
        commands.extend(self.menu_bar(ctx));
        let action = self.tab_bar.render(ctx, self.shell.strip());
        if !modal {
            for command in commands {
                self.run_command(command);
            }
            self.handle_tab_bar(action);
        }

        match self.rename_dialog.show(ctx) {
            RenameAction::None => {}
            RenameAction::Rename(id, text) => {
                self.ui.stage_prompt_answer(Some(text));
                self.shell.rename_tab_with_prompt(id, &self.ui);
            }
            RenameAction::Cancel(id) => {
                self.ui.stage_prompt_answer(None);
                self.shell.rename_tab_with_prompt(id, &self.ui);
            }
        }

        let mut buttons = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| match self.shell.active_record_mut() {
            Some(record) => {
                let (view, fields) = record.view_and_fields_mut();
                buttons = tab_view::render(ui, view, fields);
            }
            None => {
                ui.centered_and_justified(|ui| ui.weak("No tabs open"));
            }
        });
        for action in buttons {
            self.handle_button(action);
        }

        if self.ui.is_busy() {
            ctx.set_cursor_icon(egui::CursorIcon::Progress);
        }
        if self
            .shell
            .active_record()
            .is_some_and(|record| record.is_task_running())
        {
            ctx.request_repaint_after(std::time::Duration::from_millis(
                self.shell.config().processor_tick_ms.max(16),
            ));
        }
    }
}

/// Open the main window and run until it closes
pub fn run(config: Config, options: RuntimeOptions, runtime: Arc<Runtime>) -> anyhow::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&config.window_title)
            .with_inner_size(config.window_size),
        ..Default::default()
    };
    let title = config.window_title.clone();

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(ShellApp::new(
                &cc.egui_ctx,
                config,
                &runtime,
                &options,
            )))
        }),
    )
    .map_err(|err| anyhow!("failed to launch eframe app: {err}"))
}

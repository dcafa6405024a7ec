//! `ShellUi` backed by native dialogs.
//!
//! Messages, confirmations and file pickers use `rfd`'s blocking dialogs. The
//! text prompt is answered by the egui rename dialog: its result is staged
//! here before the shell is asked to rename.

use crate::shell::{ConfirmChoice, SaveTarget, ShellUi};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

pub struct DesktopUi {
    ctx: egui::Context,
    /// Answer for the next `prompt_text` call; `Some(None)` means cancelled
    staged_prompt: RefCell<Option<Option<String>>>,
    busy: Cell<bool>,
}

impl DesktopUi {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            staged_prompt: RefCell::new(None),
            busy: Cell::new(false),
        }
    }

    /// Stage the rename dialog's answer for the shell's next prompt
    pub fn stage_prompt_answer(&self, answer: Option<String>) {
        *self.staged_prompt.borrow_mut() = Some(answer);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    fn message(
        &self,
        level: MessageLevel,
        title: &str,
        message: &str,
        buttons: MessageButtons,
    ) -> MessageDialogResult {
        MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(message)
            .set_buttons(buttons)
            .show()
    }
}

impl ShellUi for DesktopUi {
    fn warn(&self, title: &str, message: &str) {
        self.message(MessageLevel::Warning, title, message, MessageButtons::Ok);
    }

    fn error(&self, title: &str, message: &str) {
        self.message(MessageLevel::Error, title, message, MessageButtons::Ok);
    }

    fn info(&self, title: &str, message: &str) {
        self.message(MessageLevel::Info, title, message, MessageButtons::Ok);
    }

    fn confirm(&self, title: &str, message: &str) -> bool {
        matches!(
            self.message(MessageLevel::Info, title, message, MessageButtons::YesNo),
            MessageDialogResult::Yes
        )
    }

    fn confirm_with_cancel(&self, title: &str, message: &str) -> ConfirmChoice {
        match self.message(
            MessageLevel::Warning,
            title,
            message,
            MessageButtons::YesNoCancel,
        ) {
            MessageDialogResult::Yes => ConfirmChoice::Yes,
            MessageDialogResult::No => ConfirmChoice::No,
            _ => ConfirmChoice::Cancel,
        }
    }

    fn prompt_text(&self, _title: &str, _message: &str, _default: &str) -> Option<String> {
        // Nothing staged means the dialog never produced an answer
        self.staged_prompt.borrow_mut().take().flatten()
    }

    fn choose_destination(&self, target: &SaveTarget) -> Option<PathBuf> {
        match target {
            SaveTarget::Directory { title } => FileDialog::new().set_title(title).pick_folder(),
            SaveTarget::File {
                title,
                suggested_name,
                extension,
            } => FileDialog::new()
                .set_title(title)
                .set_file_name(suggested_name)
                .add_filter(*extension, &[*extension])
                .save_file(),
        }
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
        if busy {
            self.ctx.set_cursor_icon(egui::CursorIcon::Progress);
        }
        self.ctx.request_repaint();
    }
}

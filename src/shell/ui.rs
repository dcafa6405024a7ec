//! The port through which the shell talks to the user.
//!
//! Every call is modal: it returns only once the user has answered. The
//! desktop frontend implements this with native dialogs; tests script it.

use std::path::PathBuf;

/// Answer to a yes/no/cancel question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmChoice {
    Yes,
    No,
    Cancel,
}

/// What kind of destination a save needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveTarget {
    /// A folder the kind writes its own file(s) into
    Directory { title: String },
    /// A single file chosen by the user
    File {
        title: String,
        suggested_name: String,
        extension: &'static str,
    },
}

impl SaveTarget {
    pub fn title(&self) -> &str {
        match self {
            SaveTarget::Directory { title } | SaveTarget::File { title, .. } => title,
        }
    }
}

pub trait ShellUi {
    fn warn(&self, title: &str, message: &str);
    fn error(&self, title: &str, message: &str);
    fn info(&self, title: &str, message: &str);

    /// Yes/no question; true means yes
    fn confirm(&self, title: &str, message: &str) -> bool;

    /// Yes/no/cancel question
    fn confirm_with_cancel(&self, title: &str, message: &str) -> ConfirmChoice;

    /// Ask for a line of text. `None` when the user cancelled.
    fn prompt_text(&self, title: &str, message: &str, default: &str) -> Option<String>;

    /// Ask where to save. `None` when no destination was chosen.
    fn choose_destination(&self, target: &SaveTarget) -> Option<PathBuf>;

    fn set_busy(&self, busy: bool);
}

/// Holds the busy indicator up for as long as it lives
pub struct BusyGuard<'a> {
    ui: &'a dyn ShellUi,
}

impl<'a> BusyGuard<'a> {
    pub fn new(ui: &'a dyn ShellUi) -> Self {
        ui.set_busy(true);
        Self { ui }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.ui.set_busy(false);
    }
}

//! Shell-level errors

use crate::tab::{LayoutError, TabId, TabKind};

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("no tab with id {0}")]
    UnknownTab(TabId),

    #[error("tab id {0} is already registered")]
    DuplicateIdentifier(TabId),

    #[error("could not create {kind} tab: {reason}")]
    ConstructionFailure { kind: TabKind, reason: String },

    #[error("could not save tab {id}: {reason}")]
    SaveFailure { id: TabId, reason: String },

    #[error("invalid tab layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("the shell has already shut down")]
    ShutDown,

    #[error("tab limit of {0} reached")]
    TabLimit(usize),
}

/// Turn a caught panic payload into a readable reason
pub(crate) fn panic_reason(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

//! Visual tab strip model: ordered `{id, label}` entries plus the active tab.
//!
//! The strip is the position → id mapping the frontend draws. It holds no tab
//! state of its own; every entry must have a matching registry record.

use super::TabId;

/// One visible tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripEntry {
    pub id: TabId,
    pub label: String,
}

#[derive(Debug, Default)]
pub struct TabStrip {
    entries: Vec<StripEntry>,
    active_tab_id: Option<TabId>,
}

impl TabStrip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tab and make it active
    pub fn push(&mut self, id: TabId, label: impl Into<String>) {
        self.entries.push(StripEntry {
            id,
            label: label.into(),
        });
        self.active_tab_id = Some(id);
    }

    /// Remove a tab, moving the selection to its neighbour when it was active
    pub fn remove(&mut self, id: TabId) -> Option<StripEntry> {
        let idx = self.position(id)?;
        let entry = self.entries.remove(idx);

        if self.active_tab_id == Some(id) {
            self.active_tab_id = if self.entries.is_empty() {
                None
            } else {
                // Prefer the tab at the same index (or previous if at end)
                let new_idx = idx.min(self.entries.len() - 1);
                Some(self.entries[new_idx].id)
            };
        }

        Some(entry)
    }

    pub fn clear(&mut self) -> Vec<StripEntry> {
        self.active_tab_id = None;
        std::mem::take(&mut self.entries)
    }

    pub fn label(&self, id: TabId) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.label.as_str())
    }

    /// Change a tab's visible label. Returns false for an unknown id.
    pub fn set_label(&mut self, id: TabId, label: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.label = label.into();
                true
            }
            None => false,
        }
    }

    pub fn active_tab_id(&self) -> Option<TabId> {
        self.active_tab_id
    }

    /// Index of the active tab (0-based)
    pub fn active_index(&self) -> Option<usize> {
        self.active_tab_id.and_then(|id| self.position(id))
    }

    /// Switch to a tab by id. Returns false for an unknown id.
    pub fn switch_to(&mut self, id: TabId) -> bool {
        if self.contains(id) {
            self.active_tab_id = Some(id);
            log::debug!("Switched to tab {}", id);
            true
        } else {
            false
        }
    }

    /// Switch to the next tab (wraps around)
    pub fn next_tab(&mut self) {
        if let Some(current_idx) = self.active_index()
            && self.entries.len() > 1
        {
            let next_idx = (current_idx + 1) % self.entries.len();
            self.active_tab_id = Some(self.entries[next_idx].id);
        }
    }

    /// Switch to the previous tab (wraps around)
    pub fn prev_tab(&mut self) {
        if let Some(current_idx) = self.active_index()
            && self.entries.len() > 1
        {
            let prev_idx = if current_idx == 0 {
                self.entries.len() - 1
            } else {
                current_idx - 1
            };
            self.active_tab_id = Some(self.entries[prev_idx].id);
        }
    }

    /// Move a tab to a specific index (drag-and-drop reordering).
    /// Returns true if the tab was actually moved.
    pub fn move_tab_to_index(&mut self, id: TabId, target_index: usize) -> bool {
        let Some(current_idx) = self.position(id) else {
            return false;
        };

        let clamped_target = target_index.min(self.entries.len().saturating_sub(1));
        if clamped_target == current_idx {
            return false;
        }

        let entry = self.entries.remove(current_idx);
        self.entries.insert(clamped_target, entry);
        log::debug!(
            "Moved tab {} from index {} to {}",
            id,
            current_idx,
            clamped_target
        );
        true
    }

    pub fn entries(&self) -> &[StripEntry] {
        &self.entries
    }

    pub fn ids(&self) -> Vec<TabId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: TabId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}

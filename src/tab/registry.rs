//! The tab state registry: the single source of truth for which tabs exist.
//!
//! Records are kept in insertion order. Keeping the visual strip in step is
//! the caller's responsibility; the registry only owns the records.

use super::{TabId, TabRecord};
use crate::shell::ShellError;

#[derive(Debug, Default)]
pub struct TabRegistry {
    records: Vec<TabRecord>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its own id
    pub fn insert(&mut self, record: TabRecord) -> Result<(), ShellError> {
        let id = record.id();
        if self.contains(id) {
            log::error!("Refusing to register tab {}: id already present", id);
            return Err(ShellError::DuplicateIdentifier(id));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn get(&self, id: TabId) -> Result<&TabRecord, ShellError> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .ok_or(ShellError::UnknownTab(id))
    }

    pub fn get_mut(&mut self, id: TabId) -> Result<&mut TabRecord, ShellError> {
        self.records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(ShellError::UnknownTab(id))
    }

    /// Remove a record and hand it back so the caller can release its resources
    pub fn remove(&mut self, id: TabId) -> Result<TabRecord, ShellError> {
        let index = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(ShellError::UnknownTab(id))?;
        Ok(self.records.remove(index))
    }

    /// Snapshot of all ids in insertion order
    pub fn all(&self) -> Vec<TabId> {
        self.records.iter().map(|r| r.id()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TabRecord> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TabRecord> {
        self.records.iter_mut()
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.records.iter().any(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab::{TabFields, TabKind, TabView};

    fn record(id: TabId) -> TabRecord {
        TabRecord::new(id, TabView::empty(), TabFields::defaults(TabKind::Generic))
    }

    #[test]
    fn insert_get_remove() {
        let mut registry = TabRegistry::new();
        registry.insert(record(1)).unwrap();
        registry.insert(record(2)).unwrap();

        assert_eq!(registry.get(2).unwrap().id(), 2);
        assert_eq!(registry.remove(1).unwrap().id(), 1);
        assert!(matches!(registry.get(1), Err(ShellError::UnknownTab(1))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut registry = TabRegistry::new();
        registry.insert(record(5)).unwrap();
        assert!(matches!(
            registry.insert(record(5)),
            Err(ShellError::DuplicateIdentifier(5))
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn remove_unknown_reports_unknown_tab() {
        let mut registry = TabRegistry::new();
        assert!(matches!(registry.remove(9), Err(ShellError::UnknownTab(9))));
    }

    #[test]
    fn all_preserves_insertion_order() {
        let mut registry = TabRegistry::new();
        for id in [3, 1, 2] {
            registry.insert(record(id)).unwrap();
        }
        assert_eq!(registry.all(), vec![3, 1, 2]);
    }
}

use super::entry::{NameEntry, NameSnapshot, RegistrySummary, normalize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

pub type SharedNameRegistry = Arc<Mutex<NameRegistry>>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Name '{0}' already exists in the list")]
    DuplicateName(String),
    #[error("Name '{0}' not found in the list")]
    NotFound(String),
}

#[derive(Debug, Default)]
pub struct NameRegistry {
    entries: Vec<NameEntry>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared(self) -> SharedNameRegistry {
        Arc::new(Mutex::new(self))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&NameEntry> {
        let key = normalize(name);
        self.entries.iter().find(|e| e.key() == key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key() == key)
    }

    pub fn insert(&mut self, name: &str) -> Result<&NameEntry, RegistryError> {
        let key = normalize(name);
        if self.position(&key).is_some() {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }

        self.entries.push(NameEntry::new(name));
        let idx = self.entries.len() - 1;
        Ok(&self.entries[idx])
    }

    pub fn delete(&mut self, name: &str) -> Result<NameEntry, RegistryError> {
        let idx = self
            .position(&normalize(name))
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        Ok(self.entries.remove(idx))
    }

    /// Moves the entry for `current_name` to the key of `new_name`.
    pub fn update(&mut self, current_name: &str, new_name: &str) -> Result<&NameEntry, RegistryError> {
        let current_key = normalize(current_name);
        let new_key = normalize(new_name);

        let idx = self
            .position(&current_key)
            .ok_or_else(|| RegistryError::NotFound(current_name.to_string()))?;

        if new_key != current_key && self.position(&new_key).is_some() {
            return Err(RegistryError::DuplicateName(new_name.to_string()));
        }

        let mut entry = self.entries.remove(idx);
        entry.rename(new_name);
        self.entries.push(entry);
        let idx = self.entries.len() - 1;
        Ok(&self.entries[idx])
    }

    pub fn confirm(&mut self, name: &str) -> Result<&NameEntry, RegistryError> {
        let idx = self
            .position(&normalize(name))
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        self.entries[idx].confirm();
        Ok(&self.entries[idx])
    }

    pub fn list(&self) -> Vec<NameSnapshot> {
        self.entries.iter().map(NameEntry::snapshot).collect()
    }

    pub fn summarize(&self) -> RegistrySummary {
        let confirmed = self.entries.iter().filter(|e| e.is_confirmed()).count();
        RegistrySummary {
            total: self.entries.len(),
            confirmed,
            unconfirmed: self.entries.len() - confirmed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_adds_unconfirmed_entry() {
        let mut registry = NameRegistry::new();
        registry.insert("Ana").unwrap();

        let names = registry.list();
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].name, "ana");
        assert_eq!(names[0].display_name, "Ana");
        assert!(!names[0].confirmed);
    }

    #[test]
    fn insert_rejects_duplicate_in_any_casing() {
        let mut registry = NameRegistry::new();
        registry.insert("Lee").unwrap();

        assert_eq!(
            registry.insert("lee").unwrap_err(),
            RegistryError::DuplicateName("lee".into())
        );
        assert_eq!(
            registry.insert("LEE").unwrap_err(),
            RegistryError::DuplicateName("LEE".into())
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn insert_rejects_duplicate_of_confirmed_entry() {
        let mut registry = NameRegistry::new();
        registry.insert("Lee").unwrap();
        registry.confirm("Lee").unwrap();

        assert!(registry.insert("Lee").is_err());
        assert_eq!(registry.len(), 1);
        assert!(registry.get("lee").unwrap().is_confirmed());
    }

    #[test]
    fn confirm_is_case_insensitive() {
        let mut registry = NameRegistry::new();
        registry.insert("Ana").unwrap();
        registry.confirm("ana").unwrap();

        assert!(registry.list()[0].confirmed);
    }

    #[test]
    fn confirm_twice_stays_confirmed() {
        let mut registry = NameRegistry::new();
        registry.insert("Ana").unwrap();
        let first = registry.confirm("Ana").unwrap().last_updated();
        let second = registry.confirm("ANA").unwrap().last_updated();

        assert!(second >= first);
        assert!(registry.get("ana").unwrap().is_confirmed());
        assert_eq!(registry.summarize().confirmed, 1);
    }

    #[test]
    fn confirm_missing_does_not_create() {
        let mut registry = NameRegistry::new();
        assert_eq!(
            registry.confirm("ghost").unwrap_err(),
            RegistryError::NotFound("ghost".into())
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn delete_removes_entry() {
        let mut registry = NameRegistry::new();
        registry.insert("Ana").unwrap();
        registry.insert("Lee").unwrap();

        let removed = registry.delete("ANA").unwrap();
        assert_eq!(removed.display_name(), "Ana");
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains("ana"));
        assert!(registry.contains("lee"));
    }

    #[test]
    fn delete_missing_fails() {
        let mut registry = NameRegistry::new();
        registry.insert("Ana").unwrap();

        assert_eq!(
            registry.delete("Bob").unwrap_err(),
            RegistryError::NotFound("Bob".into())
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn update_relocates_and_keeps_confirmation() {
        let mut registry = NameRegistry::new();
        registry.insert("Ana").unwrap();
        registry.confirm("Ana").unwrap();
        registry.update("ana", "Ana María").unwrap();

        assert!(!registry.contains("ana"));
        let entry = registry.get("ana maría").unwrap();
        assert_eq!(entry.display_name(), "Ana María");
        assert!(entry.is_confirmed());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn update_then_confirm_by_new_name() {
        let mut registry = NameRegistry::new();
        registry.insert("Ana").unwrap();
        registry.update("ana", "Ana María").unwrap();
        registry.confirm("ANA MARÍA").unwrap();

        let names = registry.list();
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].name, "ana maría");
        assert!(names[0].confirmed);
        assert!(registry.get("ana").is_none());
    }

    #[test]
    fn update_missing_fails() {
        let mut registry = NameRegistry::new();
        assert_eq!(
            registry.update("Ghost", "Casper").unwrap_err(),
            RegistryError::NotFound("Ghost".into())
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn update_onto_other_existing_name_fails() {
        let mut registry = NameRegistry::new();
        registry.insert("Ana").unwrap();
        registry.insert("Lee").unwrap();

        assert_eq!(
            registry.update("Ana", "LEE").unwrap_err(),
            RegistryError::DuplicateName("LEE".into())
        );
        assert_eq!(registry.get("ana").unwrap().display_name(), "Ana");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn update_onto_same_key_changes_spelling() {
        let mut registry = NameRegistry::new();
        registry.insert("ana").unwrap();
        let before = registry.get("ana").unwrap().last_updated();
        let entry = registry.update("ana", "ANA").unwrap();

        assert_eq!(entry.display_name(), "ANA");
        assert!(entry.last_updated() >= before);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn list_keeps_insertion_order_and_moves_renamed_to_end() {
        let mut registry = NameRegistry::new();
        registry.insert("A").unwrap();
        registry.insert("B").unwrap();
        registry.insert("C").unwrap();
        registry.update("a", "Z").unwrap();

        let order: Vec<_> = registry.list().into_iter().map(|n| n.name).collect();
        assert_eq!(order, vec!["b", "c", "z"]);
    }

    #[test]
    fn summarize_counts_states() {
        let mut registry = NameRegistry::new();
        registry.insert("A").unwrap();
        registry.insert("B").unwrap();
        registry.confirm("A").unwrap();

        assert_eq!(
            registry.summarize(),
            RegistrySummary {
                total: 2,
                confirmed: 1,
                unconfirmed: 1
            }
        );
    }

    #[test]
    fn mutations_only_touch_their_entry() {
        let mut registry = NameRegistry::new();
        registry.insert("A").unwrap();
        registry.insert("B").unwrap();
        let b_before = registry.get("b").unwrap().clone();

        registry.confirm("A").unwrap();
        registry.update("A", "Aa").unwrap();
        registry.insert("C").unwrap();
        registry.delete("C").unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("b").unwrap(), &b_before);
    }
}

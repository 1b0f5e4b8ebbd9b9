//! # Directory
//!
//! The ordered contact list shown in the side panel.
//!
//! Seeded contacts keep their seed order; contacts created during the session
//! are prepended. Identifiers come from a counter that only goes up, so no two
//! contacts ever share one. Filtering is a read-only projection.

use log::debug;

use crate::core::types::{Contact, ContactId, NEW_CONTACT_PREVIEW, avatar_glyph};

/// Startup description of a contact (from config or the demo set).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactSeed {
    pub name: String,
    pub preview: Option<String>,
    pub time: Option<String>,
    pub online: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct Directory {
    contacts: Vec<Contact>,
    next_id: u64,
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory {
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> ContactId {
        let id = ContactId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a seeded contact at the end. Blank names are skipped.
    pub fn seed(&mut self, seed: &ContactSeed, default_time: &str) -> Option<ContactId> {
        let name = seed.name.trim();
        if name.is_empty() {
            return None;
        }
        let id = self.allocate_id();
        self.contacts.push(Contact {
            id,
            name: name.to_string(),
            preview: seed
                .preview
                .clone()
                .unwrap_or_else(|| NEW_CONTACT_PREVIEW.to_string()),
            avatar: avatar_glyph(name),
            time: seed.time.clone().unwrap_or_else(|| default_time.to_string()),
            online: seed.online,
        });
        Some(id)
    }

    /// Create a contact from user input and put it at the front.
    ///
    /// Returns `None` (and changes nothing) when the trimmed name is empty.
    pub fn create(&mut self, name: &str, time: String, online: bool) -> Option<ContactId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = self.allocate_id();
        debug!("Creating contact {} ({:?})", id, name);
        self.contacts.insert(
            0,
            Contact {
                id,
                name: name.to_string(),
                preview: NEW_CONTACT_PREVIEW.to_string(),
                avatar: avatar_glyph(name),
                time,
                online: Some(online),
            },
        );
        Some(id)
    }

    /// Contacts whose name contains `query`, ignoring case, in directory order.
    pub fn filter(&self, query: &str) -> Vec<&Contact> {
        self.contacts
            .iter()
            .filter(|c| name_matches(&c.name, query))
            .collect()
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.get(id).is_some()
    }

    /// Update preview and last-activity time after a message lands. Order is untouched.
    pub fn record_activity(&mut self, id: ContactId, preview: &str, time: &str) {
        if let Some(contact) = self.contacts.iter_mut().find(|c| c.id == id) {
            contact.preview = preview.to_string();
            contact.time = time.to_string();
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

/// The match rule behind [`Directory::filter`].
pub fn name_matches(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(names: &[&str]) -> Directory {
        let mut dir = Directory::new();
        for name in names {
            dir.seed(
                &ContactSeed {
                    name: name.to_string(),
                    ..Default::default()
                },
                "10:00",
            );
        }
        dir
    }

    fn names(contacts: &[&Contact]) -> Vec<String> {
        contacts.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_seed_keeps_order() {
        let dir = seeded(&["Анна", "Борис", "Вера"]);
        assert_eq!(names(&dir.filter("")), vec!["Анна", "Борис", "Вера"]);
        assert_eq!(dir.contacts()[0].id, ContactId(1));
        assert_eq!(dir.contacts()[2].id, ContactId(3));
    }

    #[test]
    fn test_seed_uses_defaults() {
        let dir = seeded(&["  Вера  "]);
        let c = &dir.contacts()[0];
        assert_eq!(c.name, "Вера");
        assert_eq!(c.preview, NEW_CONTACT_PREVIEW);
        assert_eq!(c.time, "10:00");
        assert_eq!(c.online, None);
    }

    #[test]
    fn test_seed_skips_blank_names() {
        let mut dir = Directory::new();
        let id = dir.seed(&ContactSeed::default(), "10:00");
        assert!(id.is_none());
        assert!(dir.is_empty());
    }

    #[test]
    fn test_create_trims_and_prepends() {
        let mut dir = seeded(&["Анна"]);
        let id = dir.create("Dana ", "12:30".into(), true).unwrap();
        let first = &dir.contacts()[0];
        assert_eq!(first.id, id);
        assert_eq!(first.name, "Dana");
        assert_eq!(first.avatar, "D");
        assert_eq!(first.time, "12:30");
        assert_eq!(first.online, Some(true));
        // Existing contact keeps its identifier
        assert_eq!(dir.contacts()[1].id, ContactId(1));
    }

    #[test]
    fn test_create_blank_is_noop() {
        let mut dir = seeded(&["Анна"]);
        assert!(dir.create("   \t", "12:30".into(), true).is_none());
        assert!(dir.create("", "12:30".into(), false).is_none());
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut dir = seeded(&["a", "b"]);
        let c = dir.create("c", "00:00".into(), false).unwrap();
        let d = dir.create("d", "00:00".into(), false).unwrap();
        assert!(d > c);
        let mut ids: Vec<_> = dir.contacts().iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_filter_is_case_insensitive_and_ordered() {
        let dir = seeded(&["Анна", "Борис", "Жанна", "anna"]);
        assert_eq!(names(&dir.filter("АН")), vec!["Анна", "Жанна"]);
        assert_eq!(names(&dir.filter("ANN")), vec!["anna"]);
        assert!(dir.filter("zzz").is_empty());
    }

    #[test]
    fn test_filter_does_not_mutate() {
        let dir = seeded(&["Анна", "Борис"]);
        let before = dir.contacts().to_vec();
        let _ = dir.filter("бор");
        assert_eq!(dir.contacts(), before.as_slice());
    }

    #[test]
    fn test_record_activity_updates_preview_not_order() {
        let mut dir = seeded(&["Анна", "Борис"]);
        dir.record_activity(ContactId(2), "Привет", "13:37");
        assert_eq!(dir.contacts()[1].preview, "Привет");
        assert_eq!(dir.contacts()[1].time, "13:37");
        assert_eq!(dir.contacts()[0].name, "Анна");
    }
}

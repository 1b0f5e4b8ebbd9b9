//! # Application State
//!
//! Core business state for NikMessenger. This module contains domain logic only,
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── gate: Gate                          // login overlay
//! ├── directory: Directory                // ordered contacts
//! ├── timelines: HashMap<ContactId, ..>   // one history per contact
//! ├── selected: Option<ContactId>         // active conversation
//! ├── search_query: String                // directory filter
//! ├── status_message: String              // status bar text
//! ├── auto_reply: Option<Duration>        // synthetic reply delay
//! ├── clock: Arc<dyn Clock>               // HH:MM source
//! └── presence: Box<dyn PresenceSource>   // online flag for new contacts
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::core::clock::{Clock, LocalClock};
use crate::core::config::ResolvedConfig;
use crate::core::directory::{ContactSeed, Directory};
use crate::core::gate::Gate;
use crate::core::presence::{PresenceSource, SeededPresence};
use crate::core::timeline::Timeline;
use crate::core::types::{Contact, ContactId};

pub const WELCOME_STATUS: &str = "Добро пожаловать в NikMessenger";

pub struct App {
    pub gate: Gate,
    pub directory: Directory,
    pub timelines: HashMap<ContactId, Timeline>,
    pub selected: Option<ContactId>,
    pub search_query: String,
    pub status_message: String,
    pub auto_reply: Option<Duration>,
    pub clock: Arc<dyn Clock>,
    pub presence: Box<dyn PresenceSource>,
}

impl App {
    pub fn new(
        clock: Arc<dyn Clock>,
        presence: Box<dyn PresenceSource>,
        auto_reply: Option<Duration>,
    ) -> Self {
        Self {
            gate: Gate::new(),
            directory: Directory::new(),
            timelines: HashMap::new(),
            selected: None,
            search_query: String::new(),
            status_message: String::from(WELCOME_STATUS),
            auto_reply,
            clock,
            presence,
        }
    }

    /// Build the production app: local clock, seeded presence, config contacts.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new(
            Arc::new(LocalClock),
            Box::new(SeededPresence::new(config.presence_seed)),
            config.auto_reply,
        );
        app.seed_contacts(&config.contacts);
        app
    }

    pub fn seed_contacts(&mut self, seeds: &[ContactSeed]) {
        let now = self.clock.stamp();
        for seed in seeds {
            if self.directory.seed(seed, &now).is_none() {
                log::warn!("Skipping seed contact with blank name");
            }
        }
    }

    /// Directory filtered by the current search query.
    pub fn visible_contacts(&self) -> Vec<&Contact> {
        self.directory.filter(&self.search_query)
    }

    pub fn selected_contact(&self) -> Option<&Contact> {
        self.selected.and_then(|id| self.directory.get(id))
    }

    pub fn timeline(&self, id: ContactId) -> Option<&Timeline> {
        self.timelines.get(&id)
    }

    pub fn selected_timeline(&self) -> Option<&Timeline> {
        self.selected.and_then(|id| self.timeline(id))
    }

    pub fn timeline_mut(&mut self, id: ContactId) -> &mut Timeline {
        self.timelines.entry(id).or_default()
    }
}

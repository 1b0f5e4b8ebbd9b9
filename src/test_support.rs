//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::time::Duration;

use crate::core::action::{Action, update};
use crate::core::clock::ManualClock;
use crate::core::directory::ContactSeed;
use crate::core::gate::AuthMethod;
use crate::core::presence::FixedPresence;
use crate::core::state::App;

pub const TEST_REPLY_DELAY: Duration = Duration::from_millis(500);

/// Creates a test App: clock frozen at 12:30, every new contact online.
pub fn test_app() -> App {
    App::new(
        Arc::new(ManualClock::at(12, 30)),
        Box::new(FixedPresence(true)),
        Some(TEST_REPLY_DELAY),
    )
}

/// Test App with the given names seeded in order. Gate still open.
pub fn seeded_app(names: &[&str]) -> App {
    let mut app = test_app();
    let seeds: Vec<ContactSeed> = names
        .iter()
        .map(|name| ContactSeed {
            name: name.to_string(),
            ..Default::default()
        })
        .collect();
    app.seed_contacts(&seeds);
    app
}

/// Seeded test App past the login gate.
pub fn logged_in_app(names: &[&str]) -> App {
    let mut app = seeded_app(names);
    update(&mut app, Action::SetAuthMethod(AuthMethod::Google));
    update(&mut app, Action::Login(String::new()));
    app
}

//! # Core Application Logic
//!
//! This module contains NikMessenger's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐               ┌──────────────┐
//!          │    TUI     │               │  Scheduler   │
//!          │  Adapter   │               │ (auto-reply) │
//!          │ (ratatui)  │               │   (tokio)    │
//!          └────────────┘               └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`gate`], [`directory`], [`timeline`]: the pieces `App` is made of
//! - [`clock`], [`presence`]: injected capabilities (time, randomness)
//! - [`config`]: layered settings

pub mod action;
pub mod clock;
pub mod config;
pub mod directory;
pub mod gate;
pub mod presence;
pub mod state;
pub mod timeline;
pub mod types;

//! # TUI Components
//!
//! All widgets of the messenger screen.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display-only components built fresh each frame from core data:
//! - `TitleBar`: app name, status message, typing indicator
//! - `ChatHeader`: avatar, name and presence of the open chat
//! - `Bubble`: a single message
//! - `EmptyState`: centered placeholder text
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components whose state lives in `TuiState` across frames and which turn
//! `TuiEvent`s into their own higher-level events:
//! - `TextField`: single-line editor (composer, search, gate, prompt)
//! - `ContactListState`: highlight, hit testing
//! - `MessageListState`: scroll offset, layout cache
//! - `LoginGateState`: per-method fields
//! - `ContactPrompt`: new-contact modal
//!
//! Stateful list components come in pairs: the persistent `...State` and a
//! transient wrapper holding `&mut State` plus props, rebuilt every frame.
//! None of them touch core `App`; the event router in `tui/mod.rs` turns
//! their events into core `Action`s.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (top status bar)
//! ├── text_field.rs      (single-line input)
//! ├── contact_list.rs    (sidebar directory)
//! ├── chat_header.rs     (open chat header)
//! ├── message.rs         (single bubble)
//! ├── message_list.rs    (scrollable timeline)
//! ├── empty_state.rs     (placeholders)
//! ├── overlay.rs         (modal frame helpers)
//! ├── login_gate.rs      (session gate modal)
//! └── contact_prompt.rs  (new contact modal)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod chat_header;
pub mod contact_list;
pub mod contact_prompt;
pub mod empty_state;
pub mod login_gate;
pub mod message;
pub mod message_list;
pub mod overlay;
pub mod text_field;

pub use chat_header::ChatHeader;
pub use contact_list::{ContactList, ContactListEvent, ContactListState};
pub use contact_prompt::{ContactPrompt, PromptEvent};
pub use empty_state::EmptyState;
pub use login_gate::{GateEvent, LoginGate, LoginGateState};
pub use message_list::{MessageList, MessageListState};
pub use text_field::{FieldEvent, TextField};

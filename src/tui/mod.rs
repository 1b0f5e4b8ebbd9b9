//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Flow
//!
//! ```text
//! crossterm Event → TuiEvent → route_event() → Action → update() → Effect
//!                                                            │
//!                       ReplyScheduler ◄── ScheduleReply ────┘
//!                             │
//!                     mpsc  ReplyDue ──► drained each loop iteration
//! ```
//!
//! Routing depends on what owns the keyboard: the login gate while it is
//! open, then the contact prompt if shown, otherwise the focused pane
//! (directory, search, or composer).
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop only redraws after input or a delivered
//! reply. It polls every 50ms while replies are pending so they show up
//! promptly, and sleeps up to 250ms otherwise.

mod component;
mod components;
mod event;
mod theme;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::directory::name_matches;
use crate::core::state::App;
use crate::core::types::ContactId;
use crate::scheduler::ReplyScheduler;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    ContactListEvent, ContactListState, ContactPrompt, FieldEvent, GateEvent, LoginGateState,
    MessageListState, PromptEvent, TextField,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const REPLY_POLL: Duration = Duration::from_millis(50);
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Which pane receives keyboard input when no modal is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Directory,
    Search,
    Composer,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub contacts: ContactListState,
    pub message_list: MessageListState,
    pub search: TextField,
    pub composer: TextField,
    pub gate: LoginGateState,
    /// New-contact modal (None = hidden)
    pub prompt: Option<ContactPrompt>,
    pub focus: Focus,
    /// Replies scheduled but not yet delivered
    pub pending_replies: usize,
    /// Contact whose timeline the message list last showed
    shown_contact: Option<ContactId>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            contacts: ContactListState::new(),
            message_list: MessageListState::new(),
            search: TextField::new("Поиск", "Поиск"),
            composer: TextField::new("", "Сообщение"),
            gate: LoginGateState::new(),
            prompt: None,
            focus: Focus::Directory,
            pending_replies: 0,
            shown_contact: None,
        }
    }

    /// Align component props with core state before routing or drawing.
    pub fn sync(&mut self, app: &App) {
        let modal = app.gate.is_open() || self.prompt.is_some();
        self.search.focused = !modal && self.focus == Focus::Search;
        self.composer.focused = !modal && self.focus == Focus::Composer;
        self.gate.sync(app.gate.method());
        self.contacts.sync(app.visible_contacts().len());

        if self.shown_contact != app.selected {
            self.message_list.reset();
            self.shown_contact = app.selected;
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is harmlessly ignored by terminals without it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Run the messenger until the user quits. Must be called inside a tokio runtime.
pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let scheduler = ReplyScheduler::current(tx);

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new().and_then(|_guard| {
        event_loop(&mut terminal, &mut app, &mut tui, &scheduler, &rx)
    });
    ratatui::restore();

    info!("NikMessenger shutting down");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    scheduler: &ReplyScheduler,
    rx: &mpsc::Receiver<Action>,
) -> std::io::Result<()> {
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            tui.sync(app);
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
            needs_redraw = false;
        }

        let timeout = if tui.pending_replies > 0 {
            REPLY_POLL
        } else {
            IDLE_POLL
        };

        // Process first event + drain everything already queued before the next draw
        let mut next = poll_event_timeout(timeout)?;
        while let Some(event) = next {
            needs_redraw = true;
            if let Some(action) = route_event(app, tui, &event)
                && dispatch(app, tui, scheduler, action)
            {
                return Ok(());
            }
            next = poll_event_immediate()?;
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(app, tui, scheduler, action) {
                return Ok(());
            }
        }
    }
}

/// Apply one action and perform its effect. Returns true when the app should quit.
fn dispatch(app: &mut App, tui: &mut TuiState, scheduler: &ReplyScheduler, action: Action) -> bool {
    if matches!(action, Action::ReplyDue { .. }) {
        tui.pending_replies = tui.pending_replies.saturating_sub(1);
    }
    match update(app, action) {
        Effect::Quit => true,
        Effect::ScheduleReply(reply) => {
            tui.pending_replies += 1;
            scheduler.schedule(reply);
            false
        }
        Effect::None => false,
    }
}

/// Translate one input event into at most one core action, updating
/// presentation state (focus, fields, highlight, modals) along the way.
pub fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        _ => {}
    }
    tui.sync(app);

    // The gate owns the keyboard until login succeeds
    if app.gate.is_open() {
        return match tui.gate.handle_event(event)? {
            GateEvent::SelectMethod(method) => Some(Action::SetAuthMethod(method)),
            GateEvent::Login(credential) => Some(Action::Login(credential)),
        };
    }

    if let Some(prompt) = tui.prompt.as_mut() {
        let outcome = prompt.handle_event(event)?;
        tui.prompt = None;
        return match outcome {
            PromptEvent::Submit(name) => {
                // New contacts are prepended; follow one only if the filter shows it
                let trimmed = name.trim();
                if !trimmed.is_empty() && name_matches(trimmed, &app.search_query) {
                    tui.contacts.highlight(0);
                }
                Some(Action::CreateContact(name))
            }
            PromptEvent::Cancel => {
                debug!("Contact prompt cancelled");
                None
            }
        };
    }

    match event {
        TuiEvent::NewContact => {
            tui.prompt = Some(ContactPrompt::new());
            return None;
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.message_list.handle_event(event);
            return None;
        }
        TuiEvent::MouseClick(..) => {
            let ContactListEvent::Open(index) = tui.contacts.handle_event(event)?;
            return open_contact(app, tui, index);
        }
        _ => {}
    }

    match tui.focus {
        Focus::Directory => route_directory(app, tui, event),
        Focus::Search => route_search(tui, event),
        Focus::Composer => route_composer(app, tui, event),
    }
}

fn route_directory(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::InputChar('q') => Some(Action::Quit),
        TuiEvent::InputChar('/') | TuiEvent::BackTab => {
            tui.focus = Focus::Search;
            None
        }
        TuiEvent::InputChar('n') => {
            tui.prompt = Some(ContactPrompt::new());
            None
        }
        TuiEvent::Tab => {
            tui.focus = Focus::Composer;
            None
        }
        _ => {
            let ContactListEvent::Open(index) = tui.contacts.handle_event(event)?;
            open_contact(app, tui, index)
        }
    }
}

fn route_search(tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Submit | TuiEvent::Escape | TuiEvent::Tab | TuiEvent::BackTab => {
            tui.focus = Focus::Directory;
            None
        }
        // Highlight can still move while the query is being typed
        TuiEvent::CursorUp | TuiEvent::CursorDown => {
            tui.contacts.handle_event(event);
            None
        }
        _ => match tui.search.handle_event(event)? {
            FieldEvent::Changed => Some(Action::SetSearchQuery(tui.search.text().to_string())),
            FieldEvent::Submit => None,
        },
    }
}

fn route_composer(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Escape | TuiEvent::BackTab => {
            tui.focus = Focus::Directory;
            None
        }
        TuiEvent::Tab => {
            tui.focus = Focus::Search;
            None
        }
        TuiEvent::CursorUp | TuiEvent::CursorDown => {
            tui.message_list.handle_event(event);
            None
        }
        _ => match tui.composer.handle_event(event)? {
            FieldEvent::Changed => None,
            FieldEvent::Submit => {
                if app.selected.is_none() {
                    debug!("Composer submit with no open chat ignored");
                    return None;
                }
                // Blank input stays in the field and produces no action
                tui.composer.take_nonblank().map(Action::Submit)
            }
        },
    }
}

/// Select the visible row at `index` and move focus to the composer.
fn open_contact(app: &App, tui: &mut TuiState, index: usize) -> Option<Action> {
    let id = app.visible_contacts().get(index)?.id;
    tui.focus = Focus::Composer;
    Some(Action::SelectContact(id))
}

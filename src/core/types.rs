//! Domain types shared by the directory, timelines, and the TUI adapter.

use std::fmt;

/// Preview shown for a contact that has no messages yet.
pub const NEW_CONTACT_PREVIEW: &str = "Начните диалог";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContactId(pub u64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

/// A conversation endpoint in the directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    /// Body of the most recent message (or the new-contact placeholder)
    pub preview: String,
    /// First character of the name, upper-cased
    pub avatar: String,
    /// Last activity as `HH:MM`
    pub time: String,
    pub online: Option<bool>,
}

impl Contact {
    pub fn is_online(&self) -> bool {
        self.online.unwrap_or(false)
    }

    pub fn presence_label(&self) -> &'static str {
        if self.is_online() {
            "в сети"
        } else {
            "был(а) недавно"
        }
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Written by the local user
    Outgoing,
    /// Received from the contact (synthesized locally)
    Incoming,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub body: String,
    pub direction: Direction,
    /// Append time as `HH:MM`
    pub time: String,
}

/// Avatar glyph for a display name: its first character, upper-cased.
///
/// Some characters upper-case to more than one (`ß` → `SS`); all of them are kept.
pub fn avatar_glyph(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_glyph_uppercases_first_char() {
        assert_eq!(avatar_glyph("dana"), "D");
        assert_eq!(avatar_glyph("анна"), "А");
    }

    #[test]
    fn test_avatar_glyph_empty_name() {
        assert_eq!(avatar_glyph(""), "");
    }

    #[test]
    fn test_avatar_glyph_multi_char_uppercase() {
        assert_eq!(avatar_glyph("ßeta"), "SS");
    }

    #[test]
    fn test_presence_label() {
        let mut contact = Contact {
            id: ContactId(1),
            name: "Dana".into(),
            preview: NEW_CONTACT_PREVIEW.into(),
            avatar: "D".into(),
            time: "12:00".into(),
            online: None,
        };
        assert_eq!(contact.presence_label(), "был(а) недавно");
        contact.online = Some(true);
        assert_eq!(contact.presence_label(), "в сети");
    }
}

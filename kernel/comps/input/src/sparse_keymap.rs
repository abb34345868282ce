// SPDX-License-Identifier: MPL-2.0

//! Sparse keymaps.
//!
//! Many platform drivers receive events as vendor-defined scancodes that
//! map onto only a handful of keys. A sparse keymap is a static table of
//! such scancodes, terminated by an [`KeyEntryKind::End`] entry. Attaching
//! the keymap to an input device lets the input core derive the device's
//! capability set from the table.
//!
//! Reference: <https://elixir.bootlin.com/linux/v6.17/source/drivers/input/sparse-keymap.c>

use alloc::vec::Vec;

use crate::{
    event_type_codes::{KeyCode, KeyStatus, SynEvent},
    input_dev::{InputCapability, InputEvent},
};

/// The kind of a keymap entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEntryKind {
    /// The scancode reports a key.
    Key(KeyCode),
    /// The scancode is known but reports nothing.
    Ignore,
    /// Terminates the keymap.
    End,
}

/// An entry of a sparse keymap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEntry {
    pub kind: KeyEntryKind,
    pub code: u32,
}

impl KeyEntry {
    /// The sentinel that ends a keymap.
    pub const END: Self = Self {
        kind: KeyEntryKind::End,
        code: 0,
    };

    pub const fn key(code: u32, keycode: KeyCode) -> Self {
        Self {
            kind: KeyEntryKind::Key(keycode),
            code,
        }
    }

    pub const fn ignore(code: u32) -> Self {
        Self {
            kind: KeyEntryKind::Ignore,
            code,
        }
    }

    /// Returns the key code if this entry reports a key.
    pub const fn keycode(&self) -> Option<KeyCode> {
        match self.kind {
            KeyEntryKind::Key(keycode) => Some(keycode),
            KeyEntryKind::Ignore | KeyEntryKind::End => None,
        }
    }
}

/// A sparse keymap backed by a static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SparseKeymap {
    entries: &'static [KeyEntry],
}

impl SparseKeymap {
    /// Creates a keymap from a table.
    ///
    /// Entries after the first [`KeyEntry::END`] are not part of the keymap.
    /// A table without the sentinel is used in full.
    pub fn new(table: &'static [KeyEntry]) -> Self {
        let len = table
            .iter()
            .position(|entry| entry.kind == KeyEntryKind::End)
            .unwrap_or(table.len());
        Self {
            entries: &table[..len],
        }
    }

    /// Returns the entries, without the sentinel.
    pub fn entries(&self) -> &'static [KeyEntry] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up the first entry with the given scancode.
    pub fn entry_from_scancode(&self, code: u32) -> Option<&'static KeyEntry> {
        self.entries.iter().find(|entry| entry.code == code)
    }

    /// Derives the capability set of a device using this keymap.
    pub fn capabilities(&self) -> InputCapability {
        let mut capability = InputCapability::new();
        for keycode in self.entries.iter().filter_map(KeyEntry::keycode) {
            capability.set_key(keycode);
        }
        capability
    }
}

/// Builds the events that report a keymap entry.
///
/// A key entry is reported with `value`, followed by a sync. When `value`
/// is non-zero and `autorelease` is set, a release and another sync follow,
/// so that the key reads as a single momentary press.
pub fn report_entry(entry: &KeyEntry, value: i32, autorelease: bool) -> Vec<InputEvent> {
    let Some(keycode) = entry.keycode() else {
        return Vec::new();
    };

    let mut events = Vec::with_capacity(4);
    events.push(InputEvent::from_key_and_status(
        keycode,
        KeyStatus::from_value(value),
    ));
    events.push(InputEvent::from_sync_event(SynEvent::Report));

    if value != 0 && autorelease {
        events.push(InputEvent::from_key_and_status(keycode, KeyStatus::Released));
        events.push(InputEvent::from_sync_event(SynEvent::Report));
    }
    events
}

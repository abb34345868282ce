// SPDX-License-Identifier: MPL-2.0

use aster_input::{
    event_type_codes::KeyCode,
    sparse_keymap::{KeyEntry, SparseKeymap},
};

/// Scancodes reported through the WMI event block.
pub static GB_WMI_KEYMAP: &[KeyEntry] = &[KeyEntry::key(0xcf, KeyCode::Front), KeyEntry::END];

pub fn keymap() -> SparseKeymap {
    SparseKeymap::new(GB_WMI_KEYMAP)
}

// SPDX-License-Identifier: MPL-2.0

//! The virtual input device that reports the hotkeys.
//!
//! Each resource taken from the input subsystem is held by a guard that
//! gives it back when dropped. A half-built device therefore releases
//! exactly what it acquired, and a complete one is torn down in the reverse
//! order of setup: unregister, free keymap, free device.

use alloc::sync::Arc;

use aster_input::{
    InputDevId, InputSubsystem,
    event_type_codes::KeyCode,
    sparse_keymap::{self, SparseKeymap},
};

use crate::{config::InputDeviceConfig, error::Error};

/// An allocated, unregistered input device.
struct AllocatedDevice<S: InputSubsystem> {
    input: Arc<S>,
    id: InputDevId,
}

impl<S: InputSubsystem> Drop for AllocatedDevice<S> {
    fn drop(&mut self) {
        self.input.free_device(self.id);
    }
}

/// An input device with the keymap attached.
struct KeymapAttached<S: InputSubsystem> {
    dev: AllocatedDevice<S>,
}

impl<S: InputSubsystem> Drop for KeymapAttached<S> {
    fn drop(&mut self) {
        self.dev.input.free_keymap(self.dev.id);
    }
}

/// The registered hotkey input device.
pub struct GbInputDevice<S: InputSubsystem> {
    inner: KeymapAttached<S>,
    keymap: SparseKeymap,
}

impl<S: InputSubsystem> GbInputDevice<S> {
    pub fn id(&self) -> InputDevId {
        self.inner.dev.id
    }

    pub fn keymap(&self) -> &SparseKeymap {
        &self.keymap
    }

    /// Reports a momentary press of the key mapped to `scancode`.
    ///
    /// Returns the reported key, or `None` if the scancode is not mapped.
    pub fn report_scancode(&self, scancode: u8) -> Option<KeyCode> {
        let entry = self.keymap.entry_from_scancode(scancode as u32)?;
        let events = sparse_keymap::report_entry(entry, 1, true);
        if events.is_empty() {
            return None;
        }

        let dev = &self.inner.dev;
        dev.input.report_events(dev.id, &events);
        entry.keycode()
    }
}

impl<S: InputSubsystem> Drop for GbInputDevice<S> {
    fn drop(&mut self) {
        let dev = &self.inner.dev;
        dev.input.unregister_device(dev.id);
    }
}

/// Creates and registers the input device.
///
/// On failure, everything acquired so far has been released.
pub fn setup_input_device<S: InputSubsystem>(
    input: Arc<S>,
    config: &InputDeviceConfig,
    keymap: SparseKeymap,
) -> Result<GbInputDevice<S>, Error> {
    let id = input.allocate_device().map_err(Error::AllocationFailure)?;
    let dev = AllocatedDevice { input, id };

    dev.input.set_metadata(id, config.to_meta());
    dev.input
        .attach_keymap(id, keymap)
        .map_err(Error::KeymapAttachFailure)?;
    let inner = KeymapAttached { dev };

    inner
        .dev
        .input
        .register_device(id)
        .map_err(Error::RegistrationFailure)?;

    Ok(GbInputDevice { inner, keymap })
}

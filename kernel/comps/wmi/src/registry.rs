// SPDX-License-Identifier: MPL-2.0

//! The in-kernel WMI block registry.
//!
//! The registry records the WMI blocks that the firmware describes, the
//! notification handlers that drivers install on event blocks, and the event
//! data that the firmware has made available for each notification.

use alloc::{
    boxed::Box,
    collections::{BTreeMap, VecDeque},
    vec::Vec,
};

use spin::Mutex;

use crate::{
    acpi::{AcpiObject, AcpiStatus},
    bus::{WmiBus, WmiNotifyHandler},
    guid::Guid,
};

/// A WMI block described by the firmware.
struct WmiBlock {
    /// The notification value the firmware uses for events of this block.
    notify_id: u32,
    handler: Option<WmiNotifyHandler>,
    /// Event data waiting to be fetched, oldest first.
    pending: VecDeque<AcpiObject>,
}

/// A WMI bus backed by an in-memory block table.
pub struct WmiRegistry {
    blocks: Mutex<BTreeMap<Guid, WmiBlock>>,
}

impl WmiRegistry {
    pub const fn new() -> Self {
        Self {
            blocks: Mutex::new(BTreeMap::new()),
        }
    }

    /// Adds a block with the given notification value.
    pub fn register_block(&self, guid: Guid, notify_id: u32) -> Result<(), AcpiStatus> {
        let mut blocks = self.blocks.lock();
        if blocks.contains_key(&guid) {
            return Err(AcpiStatus::AE_ALREADY_EXISTS);
        }
        if blocks.values().any(|block| block.notify_id == notify_id) {
            return Err(AcpiStatus::AE_ALREADY_EXISTS);
        }

        blocks.insert(
            guid,
            WmiBlock {
                notify_id,
                handler: None,
                pending: VecDeque::new(),
            },
        );
        Ok(())
    }

    /// Removes a block, together with its handler and pending data.
    pub fn unregister_block(&self, guid: &Guid) -> Result<(), AcpiStatus> {
        self.blocks
            .lock()
            .remove(guid)
            .map(|_| ())
            .ok_or(AcpiStatus::AE_NOT_EXIST)
    }

    /// Makes event data available for the next query of `notify_id`.
    pub fn push_event_data(&self, notify_id: u32, data: AcpiObject) -> Result<(), AcpiStatus> {
        let mut blocks = self.blocks.lock();
        let block = blocks
            .values_mut()
            .find(|block| block.notify_id == notify_id)
            .ok_or(AcpiStatus::AE_NOT_FOUND)?;
        block.pending.push_back(data);
        Ok(())
    }

    /// Delivers an event notification to the handler of the matching block.
    ///
    /// Returns whether a handler was called.
    pub fn notify(&self, notify_id: u32) -> bool {
        let handler = {
            let blocks = self.blocks.lock();
            blocks
                .values()
                .find(|block| block.notify_id == notify_id)
                .and_then(|block| block.handler.clone())
        };

        // The handler may query the registry, so the lock must be released.
        match handler {
            Some(handler) => {
                handler(notify_id);
                true
            }
            None => {
                log::debug!("wmi: unhandled notification {:#x}", notify_id);
                false
            }
        }
    }

    /// Returns the GUIDs of the blocks that have a handler installed.
    pub fn handled_guids(&self) -> Vec<Guid> {
        self.blocks
            .lock()
            .iter()
            .filter(|(_, block)| block.handler.is_some())
            .map(|(guid, _)| *guid)
            .collect()
    }
}

impl Default for WmiRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WmiBus for WmiRegistry {
    type EventData = Box<AcpiObject>;

    fn has_guid(&self, guid: &Guid) -> bool {
        self.blocks.lock().contains_key(guid)
    }

    fn get_event_data(&self, value: u32) -> Result<Option<Box<AcpiObject>>, AcpiStatus> {
        let mut blocks = self.blocks.lock();
        let block = blocks
            .values_mut()
            .find(|block| block.notify_id == value)
            .ok_or(AcpiStatus::AE_NOT_FOUND)?;
        Ok(block.pending.pop_front().map(Box::new))
    }

    fn install_notify_handler(
        &self,
        guid: &Guid,
        handler: WmiNotifyHandler,
    ) -> Result<(), AcpiStatus> {
        let mut blocks = self.blocks.lock();
        let block = blocks.get_mut(guid).ok_or(AcpiStatus::AE_NOT_EXIST)?;
        if block.handler.is_some() {
            return Err(AcpiStatus::AE_ALREADY_ACQUIRED);
        }
        block.handler = Some(handler);
        Ok(())
    }

    fn remove_notify_handler(&self, guid: &Guid) -> Result<(), AcpiStatus> {
        let mut blocks = self.blocks.lock();
        let block = blocks.get_mut(guid).ok_or(AcpiStatus::AE_NOT_EXIST)?;
        block
            .handler
            .take()
            .map(|_| ())
            .ok_or(AcpiStatus::AE_BAD_PARAMETER)
    }
}

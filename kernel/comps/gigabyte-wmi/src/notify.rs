// SPDX-License-Identifier: MPL-2.0

//! Handling of WMI event notifications.

use alloc::sync::{Arc, Weak};

use aster_input::{InputSubsystem, event_type_codes::KeyCode};
use aster_wmi::{AcpiObject, WmiBus};

use crate::{error::NotifyError, input::GbInputDevice};

/// The state the notify handler works on.
///
/// The driver owns the input device. The handler only refers to it, so a
/// handler that outlives the driver reports nothing.
pub(crate) struct NotifyContext<B: WmiBus, S: InputSubsystem> {
    pub(crate) bus: Arc<B>,
    pub(crate) device: Weak<GbInputDevice<S>>,
}

impl<B: WmiBus, S: InputSubsystem> NotifyContext<B, S> {
    /// Handles one notification. Failures are logged and dropped.
    pub(crate) fn handle(&self, value: u32) {
        match self.process(value) {
            Ok(Some(key)) => log::debug!("Reported key {:?}", key),
            Ok(None) => {}
            Err(err) => err.log(),
        }
    }

    /// Fetches the event data, decodes the scancode and reports its key.
    ///
    /// The event data is released on return, whatever the outcome.
    pub(crate) fn process(&self, value: u32) -> Result<Option<KeyCode>, NotifyError> {
        let Some(device) = self.device.upgrade() else {
            log::debug!("Notification {:#x} after the input device is gone", value);
            return Ok(None);
        };

        let data = self
            .bus
            .get_event_data(value)
            .map_err(NotifyError::FirmwareQuery)?
            .ok_or(NotifyError::MissingPayload)?;

        let scancode = decode_scancode(&data)?;
        let key = device.report_scancode(scancode);
        if key.is_none() {
            log::trace!("Unmapped scancode {:#x}", scancode);
        }
        Ok(key)
    }
}

/// Extracts the scancode, which is the first byte of a buffer object.
pub(crate) fn decode_scancode(data: &AcpiObject) -> Result<u8, NotifyError> {
    let Some(buffer) = data.as_buffer() else {
        return Err(NotifyError::UnrecognizedPayloadType(data.object_type()));
    };

    let shown = &buffer[..buffer.len().min(2)];
    log::debug!("Buffer received: length {} data {:02x?}", buffer.len(), shown);

    buffer.first().copied().ok_or(NotifyError::MalformedPayload)
}

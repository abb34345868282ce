// SPDX-License-Identifier: MPL-2.0

use alloc::sync::Arc;
use core::ops::Deref;

use crate::{
    acpi::{AcpiObject, AcpiStatus},
    guid::Guid,
};

/// A handler of WMI event notifications.
///
/// It is called with the notification value that the firmware assigned to
/// the event. The handler has no way to report failures back to the bus.
pub type WmiNotifyHandler = Arc<dyn Fn(u32) + Send + Sync>;

/// The WMI operations available to drivers.
pub trait WmiBus: Send + Sync {
    /// The event data handed out by [`get_event_data`].
    ///
    /// The data belongs to the caller and is released when dropped.
    ///
    /// [`get_event_data`]: Self::get_event_data
    type EventData: Deref<Target = AcpiObject>;

    /// Checks whether the firmware exposes a WMI block with the GUID.
    fn has_guid(&self, guid: &Guid) -> bool;

    /// Fetches the data associated with an event notification.
    ///
    /// `Ok(None)` means that the firmware completed the query without
    /// returning an object.
    fn get_event_data(&self, value: u32) -> Result<Option<Self::EventData>, AcpiStatus>;

    /// Installs the notification handler of an event GUID.
    fn install_notify_handler(
        &self,
        guid: &Guid,
        handler: WmiNotifyHandler,
    ) -> Result<(), AcpiStatus>;

    /// Removes the notification handler of an event GUID.
    fn remove_notify_handler(&self, guid: &Guid) -> Result<(), AcpiStatus>;
}

// SPDX-License-Identifier: MPL-2.0

use alloc::string::String;
use core::fmt::Debug;

use bitvec::{BitArr, array::BitArray, order::Lsb0};
use int_to_c_enum::TryFromInt;

use crate::event_type_codes::{EventTypes, KEY_COUNT, KeyCode, KeyStatus, SynEvent};

/// An input event, in the `(type, code, value)` form of the Linux input ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    type_: u16,
    code: u16,
    value: i32,
}

impl InputEvent {
    /// Creates a synchronization event.
    pub const fn from_sync_event(event: SynEvent) -> Self {
        Self {
            type_: EventTypes::SYN.as_index(),
            code: event as u16,
            value: 0,
        }
    }

    /// Creates a key event.
    pub const fn from_key_and_status(key: KeyCode, status: KeyStatus) -> Self {
        Self {
            type_: EventTypes::KEY.as_index(),
            code: key as u16,
            value: status.as_value(),
        }
    }

    /// Returns the raw `(type, code, value)` triple.
    pub const fn to_raw(&self) -> (u16, u16, i32) {
        (self.type_, self.code, self.value)
    }

    pub fn event_type(&self) -> Option<EventTypes> {
        EventTypes::from_index(self.type_)
    }

    pub fn is_sync_report(&self) -> bool {
        self.type_ == EventTypes::SYN.as_index() && self.code == SynEvent::Report as u16
    }
}

/// Bus types.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromInt)]
pub enum BusType {
    Pci = 0x01,
    IsaPnp = 0x02,
    Usb = 0x03,
    Hil = 0x04,
    Bluetooth = 0x05,
    Virtual = 0x06,
    Isa = 0x10,
    I8042 = 0x11,
    XtKbd = 0x12,
    Rs232 = 0x13,
    Gameport = 0x14,
    ParPort = 0x15,
    Amiga = 0x16,
    Adb = 0x17,
    I2c = 0x18,
    Host = 0x19,
    Gsc = 0x1a,
    Atari = 0x1b,
    Spi = 0x1c,
    Rmi = 0x1d,
    Cec = 0x1e,
    IntelIshtp = 0x1f,
}

/// The identity of an input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputId {
    pub bustype: BusType,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
}

impl InputId {
    /// Creates an ID that carries only a bus type.
    pub const fn from_bus(bustype: BusType) -> Self {
        Self {
            bustype,
            vendor: 0,
            product: 0,
            version: 0,
        }
    }
}

/// Identification metadata of an input device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDeviceMeta {
    /// The human-readable name.
    pub name: String,
    /// The physical path of the device in the system hierarchy.
    pub phys: String,
    pub id: InputId,
}

/// A bitmap with one bit per key code.
pub type KeyBitmap = BitArr!(for KEY_COUNT, in u64, Lsb0);

/// The set of events an input device can emit.
#[derive(Clone, PartialEq, Eq)]
pub struct InputCapability {
    event_types: EventTypes,
    keys: KeyBitmap,
}

impl InputCapability {
    /// Creates an empty capability set.
    ///
    /// Every input device can emit synchronization events.
    pub fn new() -> Self {
        Self {
            event_types: EventTypes::SYN,
            keys: BitArray::ZERO,
        }
    }

    /// Marks the key as supported, which implies `EV_KEY`.
    pub fn set_key(&mut self, key: KeyCode) {
        self.event_types |= EventTypes::KEY;
        self.keys.set(key.as_index(), true);
    }

    pub fn event_types(&self) -> EventTypes {
        self.event_types
    }

    pub fn supports_key(&self, key: KeyCode) -> bool {
        self.keys[key.as_index()]
    }

    /// Returns the supported key codes in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = u16> + '_ {
        self.keys.iter_ones().map(|index| index as u16)
    }

    /// Checks whether a device with this capability set may emit the event.
    pub fn supports_event(&self, event: &InputEvent) -> bool {
        let Some(event_type) = event.event_type() else {
            return false;
        };
        if !self.event_types.contains(event_type) {
            return false;
        }

        let (_, code, _) = event.to_raw();
        if event_type == EventTypes::KEY {
            return (code as usize) < KEY_COUNT && self.keys[code as usize];
        }
        true
    }
}

impl Default for InputCapability {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for InputCapability {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("InputCapability")
            .field("event_types", &self.event_types)
            .field("keys", &self.keys.count_ones())
            .finish()
    }
}

/// A registered input device, as seen by input handlers.
pub trait InputDevice: Send + Sync + Debug {
    fn name(&self) -> &str;

    fn phys(&self) -> &str;

    fn id(&self) -> InputId;

    fn capability(&self) -> &InputCapability;
}

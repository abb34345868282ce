// SPDX-License-Identifier: MPL-2.0

//! Compile-time configuration of the driver.

use alloc::string::ToString;

use aster_input::{BusType, InputDeviceMeta, InputId};
use aster_wmi::Guid;

/// The GUID of the WMI event block that carries hotkey scancodes.
pub const GB_WMI_EVENT_GUID_STR: &str = "ABBC0F72-8EA1-11D1-00A0-C90629100000";

pub const GB_WMI_EVENT_GUID: Guid = Guid::parse_or_panic(GB_WMI_EVENT_GUID_STR);

pub const INPUT_DEVICE_NAME: &str = "GB WMI input device";

pub const INPUT_DEVICE_PHYS: &str = "wmi/input0";

/// How the virtual input device identifies itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDeviceConfig {
    pub name: &'static str,
    pub phys: &'static str,
    pub bustype: BusType,
}

impl InputDeviceConfig {
    pub fn to_meta(&self) -> InputDeviceMeta {
        InputDeviceMeta {
            name: self.name.to_string(),
            phys: self.phys.to_string(),
            id: InputId::from_bus(self.bustype),
        }
    }
}

impl Default for InputDeviceConfig {
    fn default() -> Self {
        Self {
            name: INPUT_DEVICE_NAME,
            phys: INPUT_DEVICE_PHYS,
            bustype: BusType::Host,
        }
    }
}

// SPDX-License-Identifier: MPL-2.0

//! ACPI-WMI support.
//!
//! WMI (Windows Management Instrumentation) lets firmware expose data
//! blocks, methods and events that are identified by GUIDs. Platform drivers
//! use the [`WmiBus`] to find out whether a GUID is present, to receive event
//! notifications and to fetch the data attached to each notification.
#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod acpi;
mod bus;
pub mod guid;
mod registry;

pub use acpi::{AcpiObject, AcpiObjectType, AcpiStatus};
pub use bus::{WmiBus, WmiNotifyHandler};
pub use guid::{Guid, GuidParseError};
pub use registry::WmiRegistry;

/// Returns the module alias that matches drivers of a WMI GUID.
pub fn modalias(guid: &Guid) -> alloc::string::String {
    alloc::format!("wmi:{}", guid)
}

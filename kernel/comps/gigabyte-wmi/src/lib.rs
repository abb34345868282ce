// SPDX-License-Identifier: MPL-2.0

//! Gigabyte notebook WMI hotkey driver.
//!
//! Some Gigabyte notebooks report a few hotkeys through a WMI event block
//! instead of the keyboard controller. Every event carries a buffer whose
//! first byte is a scancode. This driver maps the scancodes through a sparse
//! keymap and reports them as key presses on a virtual input device.
#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod error;
mod input;
pub mod keymap;
mod notify;

use alloc::sync::Arc;

use aster_input::{InputDevId, InputSubsystem};
use aster_wmi::{WmiBus, WmiNotifyHandler};
use const_format::concatcp;

pub use self::{
    config::{GB_WMI_EVENT_GUID, InputDeviceConfig},
    error::{Errno, Error, NotifyError},
    input::GbInputDevice,
};
use self::{config::GB_WMI_EVENT_GUID_STR, input::setup_input_device, notify::NotifyContext};

/// Static information about the driver module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub license: &'static str,
    /// The alias that makes the module load when the GUID shows up.
    pub alias: &'static str,
}

pub const MODULE_INFO: ModuleInfo = ModuleInfo {
    name: "gigabyte_wmi",
    description: "Gigabyte Notebook WMI driver",
    license: "MPL-2.0",
    alias: concatcp!("wmi:", GB_WMI_EVENT_GUID_STR),
};

/// A loaded instance of the driver.
///
/// Dropping it detaches the notify handler and then releases the input
/// device. The driver holds the only strong reference to the device.
pub struct GbWmi<B, S>
where
    B: WmiBus + 'static,
    S: InputSubsystem + 'static,
{
    bus: Arc<B>,
    device: Arc<GbInputDevice<S>>,
}

impl<B, S> GbWmi<B, S>
where
    B: WmiBus + 'static,
    S: InputSubsystem + 'static,
{
    /// Loads the driver with the default device configuration.
    pub fn init(bus: Arc<B>, input: Arc<S>) -> Result<Self, Error> {
        Self::init_with_config(bus, input, &InputDeviceConfig::default())
    }

    pub fn init_with_config(
        bus: Arc<B>,
        input: Arc<S>,
        config: &InputDeviceConfig,
    ) -> Result<Self, Error> {
        if !bus.has_guid(&GB_WMI_EVENT_GUID) {
            log::info!("This machine doesn't have GB input through WMI");
            return Err(Error::NoSuchDevice);
        }

        let device = Arc::new(setup_input_device(input, config, keymap::keymap())?);

        let context = NotifyContext {
            bus: bus.clone(),
            device: Arc::downgrade(&device),
        };
        let handler: WmiNotifyHandler = Arc::new(move |value| context.handle(value));
        if let Err(status) = bus.install_notify_handler(&GB_WMI_EVENT_GUID, handler) {
            // Dropping `device` tears the input device down.
            log::error!("Cannot install WMI notify handler: {:?}", status);
            return Err(Error::NotifyInstallFailure(status));
        }

        log::info!("GB WMI driver loaded");
        Ok(Self { bus, device })
    }

    /// Unloads the driver.
    pub fn exit(self) {
        drop(self);
    }

    pub fn input_device_id(&self) -> InputDevId {
        self.device.id()
    }
}

impl<B, S> Drop for GbWmi<B, S>
where
    B: WmiBus + 'static,
    S: InputSubsystem + 'static,
{
    fn drop(&mut self) {
        if self.bus.has_guid(&GB_WMI_EVENT_GUID) {
            if let Err(status) = self.bus.remove_notify_handler(&GB_WMI_EVENT_GUID) {
                log::warn!("Cannot remove WMI notify handler: {:?}", status);
            }
        }
        // `self.device` drops right after this, which unregisters and frees
        // the input device.
    }
}

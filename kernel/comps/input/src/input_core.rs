// SPDX-License-Identifier: MPL-2.0

//! The input core.
//!
//! Input drivers go through [`InputSubsystem`] to create devices and report
//! events. [`InputCore`] is the in-kernel implementation: it owns the device
//! slots and forwards reported events to the handlers that input handler
//! classes attach to registered devices.

use alloc::{
    collections::BTreeMap,
    sync::{Arc, Weak},
    vec::Vec,
};
use core::fmt::Debug;

use spin::Mutex;

use crate::{
    input_dev::{InputCapability, InputDevice, InputDeviceMeta, InputEvent, InputId},
    input_handler::{BoundInputHandler, InputHandlerClass, RegisteredInputHandlerClass},
    sparse_keymap::SparseKeymap,
};

/// The identifier of an allocated input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct InputDevId(u32);

impl InputDevId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

/// Errors reported by the input subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// No memory is available for a new device.
    OutOfMemory,
    /// The device ID does not name an allocated device.
    InvalidDevice,
    /// A keymap is already attached to the device.
    KeymapAlreadyAttached,
    /// The keymap reports no keys.
    EmptyKeymap,
    /// The device has no identification metadata.
    MissingMetadata,
    /// The device is already registered.
    AlreadyRegistered,
}

/// The operations an input driver needs from the input subsystem.
///
/// A device goes through allocate, set metadata, attach keymap and
/// register, and is released in the reverse order: unregister, free keymap,
/// free device.
pub trait InputSubsystem: Send + Sync {
    fn allocate_device(&self) -> Result<InputDevId, InputError>;

    fn set_metadata(&self, dev: InputDevId, meta: InputDeviceMeta);

    /// Attaches a sparse keymap and derives the device capabilities from it.
    fn attach_keymap(&self, dev: InputDevId, keymap: SparseKeymap) -> Result<(), InputError>;

    fn free_keymap(&self, dev: InputDevId);

    /// Makes the device visible to input handlers.
    fn register_device(&self, dev: InputDevId) -> Result<(), InputError>;

    /// Reports a batch of events from the device.
    fn report_events(&self, dev: InputDevId, events: &[InputEvent]);

    fn unregister_device(&self, dev: InputDevId);

    fn free_device(&self, dev: InputDevId);
}

/// The in-kernel input core.
#[derive(Debug)]
pub struct InputCore {
    inner: Mutex<CoreInner>,
    max_devices: usize,
    this: Weak<InputCore>,
}

#[derive(Debug)]
struct CoreInner {
    next_id: u32,
    devices: BTreeMap<InputDevId, DeviceSlot>,
    handler_classes: Vec<Arc<dyn InputHandlerClass>>,
}

#[derive(Debug, Default)]
struct DeviceSlot {
    meta: Option<InputDeviceMeta>,
    keymap: Option<SparseKeymap>,
    capability: InputCapability,
    registered: Option<Arc<RegisteredDevice>>,
    handlers: Vec<BoundInputHandler>,
}

/// The view of a registered device handed to input handler classes.
#[derive(Debug)]
struct RegisteredDevice {
    meta: InputDeviceMeta,
    capability: InputCapability,
}

impl InputDevice for RegisteredDevice {
    fn name(&self) -> &str {
        &self.meta.name
    }

    fn phys(&self) -> &str {
        &self.meta.phys
    }

    fn id(&self) -> InputId {
        self.meta.id
    }

    fn capability(&self) -> &InputCapability {
        &self.capability
    }
}

impl InputCore {
    /// Creates an input core without a limit on the number of devices.
    pub fn new() -> Arc<Self> {
        Self::with_max_devices(usize::MAX)
    }

    /// Creates an input core that holds at most `max_devices` devices.
    pub fn with_max_devices(max_devices: usize) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            inner: Mutex::new(CoreInner {
                next_id: 0,
                devices: BTreeMap::new(),
                handler_classes: Vec::new(),
            }),
            max_devices,
            this: this.clone(),
        })
    }

    /// Returns the number of allocated devices.
    pub fn num_devices(&self) -> usize {
        self.inner.lock().devices.len()
    }

    /// Returns the number of registered devices.
    pub fn num_registered(&self) -> usize {
        self.inner
            .lock()
            .devices
            .values()
            .filter(|slot| slot.registered.is_some())
            .count()
    }

    /// Returns the number of devices with an attached keymap.
    pub fn num_keymaps(&self) -> usize {
        self.inner
            .lock()
            .devices
            .values()
            .filter(|slot| slot.keymap.is_some())
            .count()
    }

    /// Returns the metadata of a device.
    pub fn metadata(&self, dev: InputDevId) -> Option<InputDeviceMeta> {
        self.inner.lock().devices.get(&dev)?.meta.clone()
    }

    /// Returns the capability set of a device.
    pub fn capability(&self, dev: InputDevId) -> Option<InputCapability> {
        Some(self.inner.lock().devices.get(&dev)?.capability.clone())
    }

    /// Registers an input handler class.
    ///
    /// The class is connected to every device that is already registered.
    pub fn register_handler_class(
        &self,
        class: Arc<dyn InputHandlerClass>,
    ) -> RegisteredInputHandlerClass {
        let devices: Vec<_> = {
            let mut inner = self.inner.lock();
            inner.handler_classes.push(class.clone());
            inner
                .devices
                .iter()
                .filter_map(|(id, slot)| Some((*id, slot.registered.clone()?)))
                .collect()
        };

        for (id, device) in devices {
            self.connect(id, &class, device);
        }

        RegisteredInputHandlerClass {
            class,
            core: self.this.clone(),
        }
    }

    pub(crate) fn unregister_handler_class(&self, class: &Arc<dyn InputHandlerClass>) {
        let mut disconnected = Vec::new();
        {
            let mut inner = self.inner.lock();
            inner
                .handler_classes
                .retain(|registered| !Arc::ptr_eq(registered, class));

            for slot in inner.devices.values_mut() {
                let before = slot.handlers.len();
                slot.handlers
                    .retain(|bound| !Arc::ptr_eq(&bound.handler_class, class));
                if slot.handlers.len() != before {
                    if let Some(device) = slot.registered.clone() {
                        disconnected.push(device);
                    }
                }
            }
        }

        for device in disconnected {
            let device: Arc<dyn InputDevice> = device;
            class.disconnect(&device);
        }
    }

    fn connect(
        &self,
        id: InputDevId,
        class: &Arc<dyn InputHandlerClass>,
        device: Arc<RegisteredDevice>,
    ) {
        let handler = match class.connect(device.clone()) {
            Ok(handler) => handler,
            Err(err) => {
                log::debug!(
                    "input handler class {} skipped device {}: {:?}",
                    class.name(),
                    device.name(),
                    err
                );
                return;
            }
        };

        let mut inner = self.inner.lock();
        let Some(slot) = inner.devices.get_mut(&id) else {
            return;
        };
        // The device may have been unregistered while the lock was released.
        if !slot
            .registered
            .as_ref()
            .is_some_and(|registered| Arc::ptr_eq(registered, &device))
        {
            return;
        }
        slot.handlers.push(BoundInputHandler {
            handler,
            handler_class: class.clone(),
        });
    }
}

impl InputSubsystem for InputCore {
    fn allocate_device(&self) -> Result<InputDevId, InputError> {
        let mut inner = self.inner.lock();
        if inner.devices.len() >= self.max_devices {
            return Err(InputError::OutOfMemory);
        }

        let id = InputDevId::new(inner.next_id);
        inner.next_id = inner.next_id.wrapping_add(1);
        inner.devices.insert(id, DeviceSlot::default());
        Ok(id)
    }

    fn set_metadata(&self, dev: InputDevId, meta: InputDeviceMeta) {
        match self.inner.lock().devices.get_mut(&dev) {
            Some(slot) => slot.meta = Some(meta),
            None => log::warn!("set metadata of unknown input device {:?}", dev),
        }
    }

    fn attach_keymap(&self, dev: InputDevId, keymap: SparseKeymap) -> Result<(), InputError> {
        let mut inner = self.inner.lock();
        let slot = inner
            .devices
            .get_mut(&dev)
            .ok_or(InputError::InvalidDevice)?;
        if slot.keymap.is_some() {
            return Err(InputError::KeymapAlreadyAttached);
        }
        if keymap.entries().iter().all(|entry| entry.keycode().is_none()) {
            return Err(InputError::EmptyKeymap);
        }

        slot.capability = keymap.capabilities();
        slot.keymap = Some(keymap);
        Ok(())
    }

    fn free_keymap(&self, dev: InputDevId) {
        if let Some(slot) = self.inner.lock().devices.get_mut(&dev) {
            slot.keymap = None;
        }
    }

    fn register_device(&self, dev: InputDevId) -> Result<(), InputError> {
        let (device, classes) = {
            let mut inner = self.inner.lock();
            let classes = inner.handler_classes.clone();
            let slot = inner
                .devices
                .get_mut(&dev)
                .ok_or(InputError::InvalidDevice)?;
            if slot.registered.is_some() {
                return Err(InputError::AlreadyRegistered);
            }
            let meta = slot.meta.clone().ok_or(InputError::MissingMetadata)?;

            let device = Arc::new(RegisteredDevice {
                meta,
                capability: slot.capability.clone(),
            });
            slot.registered = Some(device.clone());
            (device, classes)
        };

        log::info!("input: {} as {}", device.name(), device.phys());
        for class in classes.iter() {
            self.connect(dev, class, device.clone());
        }
        Ok(())
    }

    fn report_events(&self, dev: InputDevId, events: &[InputEvent]) {
        let (handlers, events) = {
            let inner = self.inner.lock();
            let Some(slot) = inner.devices.get(&dev) else {
                log::warn!("events reported on unknown input device {:?}", dev);
                return;
            };
            let Some(device) = slot.registered.as_ref() else {
                log::warn!("events reported on unregistered input device {:?}", dev);
                return;
            };

            let events: Vec<InputEvent> = events
                .iter()
                .filter(|event| device.capability.supports_event(event))
                .copied()
                .collect();
            let handlers: Vec<_> = slot
                .handlers
                .iter()
                .map(|bound| bound.handler.clone())
                .collect();
            (handlers, events)
        };

        if events.iter().all(InputEvent::is_sync_report) {
            return;
        }
        for handler in handlers {
            handler.handle_events(&events);
        }
    }

    fn unregister_device(&self, dev: InputDevId) {
        let (device, handlers) = {
            let mut inner = self.inner.lock();
            let Some(slot) = inner.devices.get_mut(&dev) else {
                return;
            };
            let Some(device) = slot.registered.take() else {
                return;
            };
            (device, core::mem::take(&mut slot.handlers))
        };

        let device: Arc<dyn InputDevice> = device;
        for bound in handlers {
            bound.handler_class.disconnect(&device);
        }
    }

    fn free_device(&self, dev: InputDevId) {
        let Some(slot) = self.inner.lock().devices.remove(&dev) else {
            return;
        };
        let Some(device) = slot.registered else {
            return;
        };

        log::warn!("input device {:?} freed while still registered", dev);
        let device: Arc<dyn InputDevice> = device;
        for bound in slot.handlers {
            bound.handler_class.disconnect(&device);
        }
    }
}

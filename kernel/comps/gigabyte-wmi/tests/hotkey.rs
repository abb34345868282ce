// SPDX-License-Identifier: MPL-2.0

//! Drives the driver through the in-kernel WMI registry and input core.

use std::sync::Arc;

use aster_gigabyte_wmi::{Error, GB_WMI_EVENT_GUID, GbWmi};
use aster_input::{
    ConnectError, InputCore, InputDevice, InputEvent, InputHandler, InputHandlerClass,
};
use aster_wmi::{AcpiObject, Guid, WmiBus, WmiRegistry};
use spin::Mutex;

const NOTIFY_ID: u32 = 0xd0;

#[derive(Debug, Default)]
struct Keyboard {
    events: Mutex<Vec<(u16, u16, i32)>>,
    devices: Mutex<Vec<String>>,
}

#[derive(Debug)]
struct KeyboardHandler(Arc<Keyboard>);

impl InputHandler for KeyboardHandler {
    fn handle_events(&self, events: &[InputEvent]) {
        self.0
            .events
            .lock()
            .extend(events.iter().map(InputEvent::to_raw));
    }
}

#[derive(Debug)]
struct KeyboardClass(Arc<Keyboard>);

impl InputHandlerClass for KeyboardClass {
    fn name(&self) -> &str {
        "keyboard"
    }

    fn connect(&self, dev: Arc<dyn InputDevice>) -> Result<Arc<dyn InputHandler>, ConnectError> {
        self.0.devices.lock().push(dev.name().to_string());
        Ok(Arc::new(KeyboardHandler(self.0.clone())))
    }

    fn disconnect(&self, dev: &Arc<dyn InputDevice>) {
        self.0.devices.lock().retain(|name| name != dev.name());
    }
}

fn firmware() -> Arc<WmiRegistry> {
    let registry = Arc::new(WmiRegistry::new());
    registry.register_block(GB_WMI_EVENT_GUID, NOTIFY_ID).unwrap();
    registry
}

#[test]
fn front_key_reaches_keyboard() {
    let wmi = firmware();
    let core = InputCore::new();
    let keyboard = Arc::new(Keyboard::default());
    let _class = core.register_handler_class(Arc::new(KeyboardClass(keyboard.clone())));

    let driver = GbWmi::init(wmi.clone(), core.clone()).unwrap();
    assert_eq!(*keyboard.devices.lock(), ["GB WMI input device"]);
    assert_eq!(wmi.handled_guids(), [GB_WMI_EVENT_GUID]);

    let meta = core.metadata(driver.input_device_id()).unwrap();
    assert_eq!(meta.phys, "wmi/input0");

    wmi.push_event_data(NOTIFY_ID, AcpiObject::Buffer(vec![0xcf, 0x00]))
        .unwrap();
    assert!(wmi.notify(NOTIFY_ID));
    assert_eq!(
        *keyboard.events.lock(),
        [(1, 132, 1), (0, 0, 0), (1, 132, 0), (0, 0, 0)]
    );

    // Neither an unmapped scancode nor a notification without data reports.
    keyboard.events.lock().clear();
    wmi.push_event_data(NOTIFY_ID, AcpiObject::Buffer(vec![0x01]))
        .unwrap();
    assert!(wmi.notify(NOTIFY_ID));
    assert!(wmi.notify(NOTIFY_ID));
    assert!(keyboard.events.lock().is_empty());

    driver.exit();
    assert!(wmi.handled_guids().is_empty());
    assert!(!wmi.notify(NOTIFY_ID));
    assert!(keyboard.devices.lock().is_empty());
    assert_eq!(core.num_registered(), 0);
    assert_eq!(core.num_keymaps(), 0);
    assert_eq!(core.num_devices(), 0);
}

#[test]
fn machine_without_hotkeys() {
    let wmi = Arc::new(WmiRegistry::new());
    let other = Guid::parse_or_panic("8D9DDCBC-A997-11DA-B012-B622A1EF5492");
    wmi.register_block(other, NOTIFY_ID).unwrap();
    let core = InputCore::new();

    let err = GbWmi::init(wmi.clone(), core.clone()).err().unwrap();
    assert_eq!(err, Error::NoSuchDevice);
    assert_eq!(err.errno().as_return_value(), -19);
    assert_eq!(core.num_devices(), 0);
    assert!(!wmi.has_guid(&GB_WMI_EVENT_GUID));
}

#[test]
fn handler_already_taken() {
    let wmi = firmware();
    let core = InputCore::new();
    wmi.install_notify_handler(&GB_WMI_EVENT_GUID, Arc::new(|_: u32| {}))
        .unwrap();

    let err = GbWmi::init(wmi.clone(), core.clone()).err().unwrap();
    assert!(matches!(err, Error::NotifyInstallFailure(_)));
    assert_eq!(core.num_registered(), 0);
    assert_eq!(core.num_keymaps(), 0);
    assert_eq!(core.num_devices(), 0);
}

#[test]
fn reload_after_exit() {
    let wmi = firmware();
    let core = InputCore::new();

    GbWmi::init(wmi.clone(), core.clone()).unwrap().exit();
    let driver = GbWmi::init(wmi.clone(), core.clone()).unwrap();
    assert_eq!(core.num_registered(), 1);
    drop(driver);
    assert_eq!(core.num_devices(), 0);
}

#[test]
fn block_removed_before_exit() {
    let wmi = firmware();
    let core = InputCore::new();
    let driver = GbWmi::init(wmi.clone(), core.clone()).unwrap();

    wmi.unregister_block(&GB_WMI_EVENT_GUID).unwrap();
    driver.exit();
    assert_eq!(core.num_devices(), 0);
}

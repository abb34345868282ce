// SPDX-License-Identifier: MPL-2.0

use alloc::sync::{Arc, Weak};
use core::{any::Any, fmt::Debug};

use crate::{InputDevice, input_core::InputCore, input_dev::InputEvent};

/// Errors that can occur when connecting to an input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectError {
    /// Device is not compatible with this handler class.
    IncompatibleDevice,
    /// Device is already connected.
    AlreadyConnected,
    /// Other internal error.
    InternalError,
}

/// A trait that represents an input handler class.
///
/// Once registered to the input core (via [`register_handler_class`]), the
/// input handler class will try to connect to each registered input device
/// (via [`connect`]). If it succeeds, an [`InputHandler`] will be created to
/// handle the input events from that device.
///
/// [`register_handler_class`]: InputCore::register_handler_class
/// [`connect`]: Self::connect
pub trait InputHandlerClass: Send + Sync + Any + Debug {
    /// Returns the class name of the handler class.
    fn name(&self) -> &str;

    /// Tries to connect to the input device.
    fn connect(&self, dev: Arc<dyn InputDevice>) -> Result<Arc<dyn InputHandler>, ConnectError>;

    /// Disconnects from a device.
    fn disconnect(&self, dev: &Arc<dyn InputDevice>);
}

/// An individual input handler instance for a specific device.
pub trait InputHandler: Send + Sync + Debug {
    /// Handles a batch of input events from the device.
    ///
    /// A batch ends with a `SYN_REPORT` event.
    fn handle_events(&self, events: &[InputEvent]);
}

/// An input handler bound with the class that created it.
#[derive(Debug, Clone)]
pub(crate) struct BoundInputHandler {
    pub(crate) handler: Arc<dyn InputHandler>,
    pub(crate) handler_class: Arc<dyn InputHandlerClass>,
}

/// Registered input handler class that can create handlers.
///
/// Dropping it unregisters the class and disconnects its handlers.
#[derive(Debug)]
pub struct RegisteredInputHandlerClass {
    pub(crate) class: Arc<dyn InputHandlerClass>,
    pub(crate) core: Weak<InputCore>,
}

impl Drop for RegisteredInputHandlerClass {
    fn drop(&mut self) {
        if let Some(core) = self.core.upgrade() {
            core.unregister_handler_class(&self.class);
        }
    }
}

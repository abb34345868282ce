// SPDX-License-Identifier: MPL-2.0

//! The input subsystem.
//!
//! Input drivers allocate devices through an [`InputSubsystem`], describe
//! them with metadata and a capability set, and report [`InputEvent`]s.
//! Input handler classes registered to the [`InputCore`] connect to the
//! registered devices and receive their events.
#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod event_type_codes;
pub mod input_core;
pub mod input_dev;
pub mod input_handler;
pub mod sparse_keymap;

pub use input_core::{InputCore, InputDevId, InputError, InputSubsystem};
pub use input_dev::{BusType, InputCapability, InputDevice, InputDeviceMeta, InputEvent, InputId};
pub use input_handler::{
    ConnectError, InputHandler, InputHandlerClass, RegisteredInputHandlerClass,
};

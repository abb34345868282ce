// SPDX-License-Identifier: MPL-2.0

use core::fmt;

use aster_input::InputError;
use aster_wmi::{AcpiObjectType, AcpiStatus};

/// Error numbers reported to the module loader.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Errno {
    EIO = 5,     /* I/O error */
    ENOMEM = 12, /* Out of memory */
    EBUSY = 16,  /* Device or resource busy */
    EEXIST = 17, /* File exists */
    ENODEV = 19, /* No such device */
    EINVAL = 22, /* Invalid argument */
}

impl Errno {
    /// Returns the negative value that a failed module init returns.
    pub const fn as_return_value(&self) -> i32 {
        -(*self as i32)
    }
}

impl From<InputError> for Errno {
    fn from(err: InputError) -> Self {
        match err {
            InputError::OutOfMemory => Errno::ENOMEM,
            InputError::InvalidDevice => Errno::ENODEV,
            InputError::KeymapAlreadyAttached => Errno::EEXIST,
            InputError::EmptyKeymap | InputError::MissingMetadata => Errno::EINVAL,
            InputError::AlreadyRegistered => Errno::EBUSY,
        }
    }
}

/// Errors that abort the driver initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The firmware has no event block with the driver's GUID.
    NoSuchDevice,
    /// The input device could not be allocated.
    AllocationFailure(InputError),
    /// The keymap could not be attached to the input device.
    KeymapAttachFailure(InputError),
    /// The input device could not be registered.
    RegistrationFailure(InputError),
    /// The WMI notification handler could not be installed.
    NotifyInstallFailure(AcpiStatus),
}

impl Error {
    pub fn errno(&self) -> Errno {
        match self {
            Error::NoSuchDevice | Error::NotifyInstallFailure(_) => Errno::ENODEV,
            Error::AllocationFailure(_) => Errno::ENOMEM,
            Error::KeymapAttachFailure(err) | Error::RegistrationFailure(err) => (*err).into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoSuchDevice => f.write_str("no GB input through WMI"),
            Error::AllocationFailure(err) => write!(f, "cannot allocate input device: {:?}", err),
            Error::KeymapAttachFailure(err) => write!(f, "cannot set up keymap: {:?}", err),
            Error::RegistrationFailure(err) => {
                write!(f, "cannot register input device: {:?}", err)
            }
            Error::NotifyInstallFailure(status) => {
                write!(f, "cannot install notify handler: {:?}", status)
            }
        }
    }
}

/// Errors that end the handling of a single notification.
///
/// These never leave the notify handler; they are only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyError {
    /// The firmware failed to return the event data.
    FirmwareQuery(AcpiStatus),
    /// The firmware returned no event data.
    MissingPayload,
    /// The event data is a buffer too short to hold a scancode.
    MalformedPayload,
    /// The event data is not a buffer.
    UnrecognizedPayloadType(AcpiObjectType),
}

impl NotifyError {
    pub(crate) fn log(&self) {
        match self {
            NotifyError::FirmwareQuery(status) => log::error!("Bad event status {}", status),
            NotifyError::MissingPayload => log::info!("Could not get response pointer"),
            NotifyError::MalformedPayload => log::info!("Empty event buffer"),
            NotifyError::UnrecognizedPayloadType(type_) => {
                log::info!("Unknown event (type {:?})", type_)
            }
        }
    }
}

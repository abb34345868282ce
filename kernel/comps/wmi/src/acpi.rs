// SPDX-License-Identifier: MPL-2.0

//! The subset of the ACPI object model that WMI drivers deal with.

use alloc::{string::String, vec::Vec};
use core::fmt;

use int_to_c_enum::TryFromInt;

/// An ACPI status code.
///
/// Reference: <https://elixir.bootlin.com/linux/v6.17/source/include/acpi/acexcep.h>
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AcpiStatus(u32);

const AE_CODE_PROGRAMMER: u32 = 0x1000;

impl AcpiStatus {
    pub const AE_OK: Self = Self(0x0000);
    pub const AE_ERROR: Self = Self(0x0001);
    pub const AE_NO_MEMORY: Self = Self(0x0004);
    pub const AE_NOT_FOUND: Self = Self(0x0005);
    pub const AE_NOT_EXIST: Self = Self(0x0006);
    pub const AE_ALREADY_EXISTS: Self = Self(0x0007);
    pub const AE_TYPE: Self = Self(0x0008);
    pub const AE_NULL_OBJECT: Self = Self(0x0009);
    pub const AE_BUFFER_OVERFLOW: Self = Self(0x000b);
    pub const AE_NOT_IMPLEMENTED: Self = Self(0x000e);
    pub const AE_SUPPORT: Self = Self(0x000f);
    pub const AE_TIME: Self = Self(0x0011);
    pub const AE_NOT_ACQUIRED: Self = Self(0x0014);
    pub const AE_ALREADY_ACQUIRED: Self = Self(0x0015);
    pub const AE_BAD_PARAMETER: Self = Self(AE_CODE_PROGRAMMER | 0x0001);
    pub const AE_BAD_CHARACTER: Self = Self(AE_CODE_PROGRAMMER | 0x0002);

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    fn name(&self) -> Option<&'static str> {
        let name = match *self {
            Self::AE_OK => "AE_OK",
            Self::AE_ERROR => "AE_ERROR",
            Self::AE_NO_MEMORY => "AE_NO_MEMORY",
            Self::AE_NOT_FOUND => "AE_NOT_FOUND",
            Self::AE_NOT_EXIST => "AE_NOT_EXIST",
            Self::AE_ALREADY_EXISTS => "AE_ALREADY_EXISTS",
            Self::AE_TYPE => "AE_TYPE",
            Self::AE_NULL_OBJECT => "AE_NULL_OBJECT",
            Self::AE_BUFFER_OVERFLOW => "AE_BUFFER_OVERFLOW",
            Self::AE_NOT_IMPLEMENTED => "AE_NOT_IMPLEMENTED",
            Self::AE_SUPPORT => "AE_SUPPORT",
            Self::AE_TIME => "AE_TIME",
            Self::AE_NOT_ACQUIRED => "AE_NOT_ACQUIRED",
            Self::AE_ALREADY_ACQUIRED => "AE_ALREADY_ACQUIRED",
            Self::AE_BAD_PARAMETER => "AE_BAD_PARAMETER",
            Self::AE_BAD_CHARACTER => "AE_BAD_CHARACTER",
            _ => return None,
        };
        Some(name)
    }
}

/// Prints the raw code in hexadecimal, e.g. `0x5`.
impl fmt::Display for AcpiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::Debug for AcpiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "AcpiStatus({:#x})", self.0),
        }
    }
}

/// ACPI object types.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromInt)]
pub enum AcpiObjectType {
    Any = 0x00,
    Integer = 0x01,
    String = 0x02,
    Buffer = 0x03,
    Package = 0x04,
    FieldUnit = 0x05,
    Device = 0x06,
    Event = 0x07,
    Method = 0x08,
    Mutex = 0x09,
    Region = 0x0a,
    Power = 0x0b,
    Processor = 0x0c,
    Thermal = 0x0d,
    BufferField = 0x0e,
    DdbHandle = 0x0f,
    DebugObject = 0x10,
    LocalReference = 0x14,
}

/// An ACPI object returned by firmware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcpiObject {
    Integer(u64),
    String(String),
    Buffer(Vec<u8>),
    Package(Vec<AcpiObject>),
    /// An object whose contents WMI drivers never inspect.
    Other(AcpiObjectType),
}

impl AcpiObject {
    pub fn object_type(&self) -> AcpiObjectType {
        match self {
            AcpiObject::Integer(_) => AcpiObjectType::Integer,
            AcpiObject::String(_) => AcpiObjectType::String,
            AcpiObject::Buffer(_) => AcpiObjectType::Buffer,
            AcpiObject::Package(_) => AcpiObjectType::Package,
            AcpiObject::Other(type_) => *type_,
        }
    }

    /// Returns the contents if this is a buffer object.
    pub fn as_buffer(&self) -> Option<&[u8]> {
        match self {
            AcpiObject::Buffer(buffer) => Some(buffer.as_slice()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use alloc::{format, vec};

    use super::*;

    #[test]
    fn status_formatting() {
        assert_eq!(format!("{}", AcpiStatus::AE_NOT_FOUND), "0x5");
        assert_eq!(format!("{:?}", AcpiStatus::AE_BAD_PARAMETER), "AE_BAD_PARAMETER");
        assert_eq!(format!("{:?}", AcpiStatus::from_raw(0x42)), "AcpiStatus(0x42)");
        assert_eq!(AcpiStatus::AE_BAD_PARAMETER.as_raw(), 0x1001);
    }

    #[test]
    fn object_types() {
        assert_eq!(
            AcpiObject::Buffer(vec![0xcf]).object_type(),
            AcpiObjectType::Buffer
        );
        assert_eq!(AcpiObject::Integer(7).object_type(), AcpiObjectType::Integer);
        assert_eq!(
            AcpiObject::Other(AcpiObjectType::Device).object_type(),
            AcpiObjectType::Device
        );
        assert_eq!(AcpiObjectType::try_from(3u32).ok(), Some(AcpiObjectType::Buffer));
        assert!(AcpiObjectType::try_from(0x11u32).is_err());
    }

    #[test]
    fn buffer_contents() {
        let object = AcpiObject::Buffer(vec![0xcf, 0x01]);
        assert_eq!(object.as_buffer(), Some(&[0xcf, 0x01][..]));
        assert_eq!(AcpiObject::Integer(0xcf).as_buffer(), None);
    }
}

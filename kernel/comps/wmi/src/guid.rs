// SPDX-License-Identifier: MPL-2.0

//! WMI GUIDs.

use core::{fmt, str::FromStr};

/// The length of a GUID in its text form, e.g.
/// `ABBC0F72-8EA1-11D1-00A0-C90629100000`.
pub const GUID_STRING_LEN: usize = 36;

const DASH_POSITIONS: [usize; 4] = [8, 13, 18, 23];

/// A GUID that identifies a WMI data block, method or event.
///
/// The bytes are kept in the order in which they appear in the text form.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Guid([u8; 16]);

/// Errors that can occur when parsing a [`Guid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidParseError {
    /// The text is not 36 bytes long.
    InvalidLength(usize),
    /// A dash is missing or misplaced at the given position.
    MisplacedDash(usize),
    /// A non-hexadecimal character at the given position.
    InvalidDigit(usize),
}

impl Guid {
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Parses the text form of a GUID.
    ///
    /// Hexadecimal digits may be in either case.
    pub const fn parse(text: &str) -> Result<Self, GuidParseError> {
        let text = text.as_bytes();
        if text.len() != GUID_STRING_LEN {
            return Err(GuidParseError::InvalidLength(text.len()));
        }

        let mut bytes = [0u8; 16];
        let mut pos = 0;
        let mut nibble = 0;
        while pos < GUID_STRING_LEN {
            if is_dash_position(pos) {
                if text[pos] != b'-' {
                    return Err(GuidParseError::MisplacedDash(pos));
                }
                pos += 1;
                continue;
            }

            let Some(value) = hex_value(text[pos]) else {
                return Err(GuidParseError::InvalidDigit(pos));
            };
            bytes[nibble / 2] |= if nibble % 2 == 0 { value << 4 } else { value };
            nibble += 1;
            pos += 1;
        }

        Ok(Self(bytes))
    }

    /// Parses a GUID that is known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if `text` is not a valid GUID. In a `const` context the panic
    /// becomes a compile-time error.
    pub const fn parse_or_panic(text: &str) -> Self {
        match Self::parse(text) {
            Ok(guid) => guid,
            Err(_) => panic!("invalid GUID"),
        }
    }

    /// Returns the bytes in text order.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

const fn is_dash_position(pos: usize) -> bool {
    let mut i = 0;
    while i < DASH_POSITIONS.len() {
        if DASH_POSITIONS[i] == pos {
            return true;
        }
        i += 1;
    }
    false
}

const fn hex_value(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl FromStr for Guid {
    type Err = GuidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                f.write_str("-")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({})", self)
    }
}

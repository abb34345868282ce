// SPDX-License-Identifier: MPL-2.0

//! Input event types and codes.
//!
//! The numeric values follow the Linux input ABI.
//!
//! Reference: <https://elixir.bootlin.com/linux/v6.17/source/include/uapi/linux/input-event-codes.h>

use bitflags::bitflags;
use int_to_c_enum::TryFromInt;

bitflags! {
    /// A set of input event types.
    ///
    /// Bit `n` is set if the event type with index `n` is present.
    pub struct EventTypes: u32 {
        /// Synchronization events.
        const SYN = 1 << 0x00;
        /// Key press/release events.
        const KEY = 1 << 0x01;
        /// Relative movement events.
        const REL = 1 << 0x02;
        /// Absolute position events.
        const ABS = 1 << 0x03;
        /// Miscellaneous events.
        const MSC = 1 << 0x04;
        /// Switch events.
        const SW = 1 << 0x05;
        /// LED events.
        const LED = 1 << 0x11;
        /// Sound events.
        const SND = 1 << 0x12;
        /// Repeat events.
        const REP = 1 << 0x14;
    }
}

impl EventTypes {
    /// Returns the index of a single event type.
    ///
    /// The set must contain exactly one event type.
    pub const fn as_index(&self) -> u16 {
        debug_assert!(self.bits().count_ones() == 1);
        self.bits().trailing_zeros() as u16
    }

    /// Returns the event type with the given index, if it is known.
    pub fn from_index(index: u16) -> Option<Self> {
        if index >= EV_COUNT as u16 {
            return None;
        }
        Self::from_bits(1 << index)
    }
}

// Maximum value for event types
const EV_MAX: usize = 0x1f;
pub const EV_COUNT: usize = EV_MAX + 1;

/// Synchronization events.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromInt)]
pub enum SynEvent {
    Report = 0x00,
    Config = 0x01,
    MtReport = 0x02,
    Dropped = 0x03,
}

/// The value carried by a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStatus {
    Released,
    Pressed,
    Repeated,
}

impl KeyStatus {
    pub const fn as_value(&self) -> i32 {
        match self {
            KeyStatus::Released => 0,
            KeyStatus::Pressed => 1,
            KeyStatus::Repeated => 2,
        }
    }

    /// Interprets a raw event value; any non-zero value other than 2 is a press.
    pub const fn from_value(value: i32) -> Self {
        match value {
            0 => KeyStatus::Released,
            2 => KeyStatus::Repeated,
            _ => KeyStatus::Pressed,
        }
    }
}

/// Key codes.
///
/// Only the keys reported by platform and hotkey drivers are listed here.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, TryFromInt)]
pub enum KeyCode {
    Reserved = 0,
    Esc = 1,

    Mute = 113,
    VolumeDown = 114,
    VolumeUp = 115,
    Power = 116,
    KpEqual = 117,
    KpPlusMinus = 118,
    Pause = 119,
    Scale = 120,

    Stop = 128,
    Again = 129,
    Props = 130,
    Undo = 131,
    Front = 132,
    Copy = 133,
    Open = 134,
    Paste = 135,
    Find = 136,
    Cut = 137,
    Help = 138,
    Menu = 139,
    Calc = 140,
    Setup = 141,
    Sleep = 142,
    WakeUp = 143,
    File = 144,
    SendFile = 145,
    DeleteFile = 146,
    Xfer = 147,
    Prog1 = 148,
    Prog2 = 149,
    Www = 150,
    MsDos = 151,
    ScreenLock = 152,
    RotateDisplay = 153,
    CycleWindows = 154,
    Mail = 155,
    Bookmarks = 156,
    Computer = 157,
    Back = 158,
    Forward = 159,

    NextSong = 163,
    PlayPause = 164,
    PreviousSong = 165,
    StopCd = 166,

    Homepage = 172,
    Refresh = 173,

    Prog3 = 202,
    Prog4 = 203,
    Suspend = 205,

    Camera = 212,

    BrightnessDown = 224,
    BrightnessUp = 225,
    SwitchVideoMode = 227,
    KbdIllumToggle = 228,
    KbdIllumDown = 229,
    KbdIllumUp = 230,

    Battery = 236,
    Bluetooth = 237,
    Wlan = 238,
    Uwb = 239,
    Unknown = 240,

    DisplayOff = 245,
    Wwan = 246,
    RfKill = 247,
    MicMute = 248,

    TouchpadToggle = 0x212,
    TouchpadOn = 0x213,
    TouchpadOff = 0x214,
}

impl KeyCode {
    pub const fn as_index(&self) -> usize {
        *self as usize
    }
}

// Maximum value for key codes
const KEY_MAX: usize = 0x2ff;
pub const KEY_COUNT: usize = KEY_MAX + 1;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn event_type_index() {
        assert_eq!(EventTypes::SYN.as_index(), 0);
        assert_eq!(EventTypes::KEY.as_index(), 1);
        assert_eq!(EventTypes::LED.as_index(), 0x11);

        assert_eq!(EventTypes::from_index(1), Some(EventTypes::KEY));
        assert_eq!(EventTypes::from_index(0x10), None);
        assert_eq!(EventTypes::from_index(0x40), None);
    }

    #[test]
    fn key_code_from_raw() {
        assert_eq!(KeyCode::try_from(132u16).ok(), Some(KeyCode::Front));
        assert_eq!(KeyCode::try_from(0x212u16).ok(), Some(KeyCode::TouchpadToggle));
        assert!(KeyCode::try_from(2u16).is_err());
        assert!(KeyCode::Front.as_index() < KEY_COUNT);
    }

    #[test]
    fn key_status_values() {
        assert_eq!(KeyStatus::from_value(0), KeyStatus::Released);
        assert_eq!(KeyStatus::from_value(1), KeyStatus::Pressed);
        assert_eq!(KeyStatus::from_value(2), KeyStatus::Repeated);
        assert_eq!(KeyStatus::from_value(-1), KeyStatus::Pressed);
        assert_eq!(KeyStatus::Pressed.as_value(), 1);
    }
}

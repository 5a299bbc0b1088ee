//! Normalized input events, as forwarded by the window server hook.

use crate::Vec2;

/// Window-server event codes. The discriminants are the raw wire values.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseEventType {
    Null = 0,
    LeftMouseDown = 1,
    LeftMouseUp = 2,
    RightMouseDown = 3,
    RightMouseUp = 4,
    MouseMoved = 5,
    LeftMouseDragged = 6,
    RightMouseDragged = 7,
    MouseEntered = 8,
    MouseExited = 9,
    KeyDown = 10,
    KeyUp = 11,
    FlagsChanged = 12,
    ScrollWheel = 22,
    OtherMouseDown = 25,
    OtherMouseUp = 26,
    OtherMouseDragged = 27,
}

impl MouseEventType {
    pub fn from_raw(raw: u32) -> Option<Self> {
        use MouseEventType::*;
        Some(match raw {
            0 => Null,
            1 => LeftMouseDown,
            2 => LeftMouseUp,
            3 => RightMouseDown,
            4 => RightMouseUp,
            5 => MouseMoved,
            6 => LeftMouseDragged,
            7 => RightMouseDragged,
            8 => MouseEntered,
            9 => MouseExited,
            10 => KeyDown,
            11 => KeyUp,
            12 => FlagsChanged,
            22 => ScrollWheel,
            25 => OtherMouseDown,
            26 => OtherMouseUp,
            27 => OtherMouseDragged,
            _ => return None,
        })
    }

    pub fn raw(self) -> u32 {
        self as u32
    }

    pub fn is_mouse_down(self) -> bool {
        matches!(
            self,
            Self::LeftMouseDown | Self::RightMouseDown | Self::OtherMouseDown
        )
    }

    pub fn is_mouse_up(self) -> bool {
        matches!(
            self,
            Self::LeftMouseUp | Self::RightMouseUp | Self::OtherMouseUp
        )
    }

    pub fn is_mouse_drag(self) -> bool {
        matches!(
            self,
            Self::LeftMouseDragged | Self::RightMouseDragged | Self::OtherMouseDragged
        )
    }

    /// Down, up or drag for any button.
    pub fn is_mouse_click_event(self) -> bool {
        self.is_mouse_down() || self.is_mouse_up() || self.is_mouse_drag()
    }

    /// Which button a click-related type belongs to.
    pub fn button(self) -> Option<MouseButton> {
        match self {
            Self::LeftMouseDown | Self::LeftMouseUp | Self::LeftMouseDragged => {
                Some(MouseButton::Left)
            }
            Self::RightMouseDown | Self::RightMouseUp | Self::RightMouseDragged => {
                Some(MouseButton::Right)
            }
            Self::OtherMouseDown | Self::OtherMouseUp | Self::OtherMouseDragged => {
                Some(MouseButton::Other)
            }
            _ => None,
        }
    }
}

pub fn is_mouse_down(t: MouseEventType) -> bool {
    t.is_mouse_down()
}

pub fn is_mouse_up(t: MouseEventType) -> bool {
    t.is_mouse_up()
}

pub fn is_mouse_drag(t: MouseEventType) -> bool {
    t.is_mouse_drag()
}

pub fn is_mouse_click_event(t: MouseEventType) -> bool {
    t.is_mouse_click_event()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseEvent {
    pub event_type: MouseEventType,
    pub screen_location: Vec2,
    /// Relative to the window origin; this is what hit testing uses.
    pub window_location: Vec2,
    pub button_number: i32,
    pub click_count: i32,
}

bitflags::bitflags! {
    /// Device-independent modifier masks, as carried in the window server's
    /// event flags word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u32 {
        const CAPS_LOCK = 0x0001_0000;
        const SHIFT = 0x0002_0000;
        const CONTROL = 0x0004_0000;
        const OPTION = 0x0008_0000;
        const COMMAND = 0x0010_0000;
        const NUMERIC_PAD = 0x0020_0000;
        const HELP = 0x0040_0000;
        const FUNCTION = 0x0080_0000;
    }
}

impl ModifierFlags {
    /// Unknown and device-dependent bits are dropped.
    pub fn from_raw(raw: i32) -> Self {
        Self::from_bits_truncate(raw as u32)
    }

    /// Command or Control: the key is a shortcut, not text.
    pub fn is_shortcut(self) -> bool {
        self.intersects(Self::COMMAND | Self::CONTROL)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key_code: u16,
    pub is_down: bool,
    pub is_repeat: bool,
    pub flags: ModifierFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [MouseEventType; 17] = [
        MouseEventType::Null,
        MouseEventType::LeftMouseDown,
        MouseEventType::LeftMouseUp,
        MouseEventType::RightMouseDown,
        MouseEventType::RightMouseUp,
        MouseEventType::MouseMoved,
        MouseEventType::LeftMouseDragged,
        MouseEventType::RightMouseDragged,
        MouseEventType::MouseEntered,
        MouseEventType::MouseExited,
        MouseEventType::KeyDown,
        MouseEventType::KeyUp,
        MouseEventType::FlagsChanged,
        MouseEventType::ScrollWheel,
        MouseEventType::OtherMouseDown,
        MouseEventType::OtherMouseUp,
        MouseEventType::OtherMouseDragged,
    ];

    #[test]
    fn test_raw_codes() {
        for t in ALL {
            assert_eq!(MouseEventType::from_raw(t.raw()), Some(t));
        }
        assert_eq!(MouseEventType::ScrollWheel.raw(), 22);
        assert_eq!(MouseEventType::from_raw(13), None);
        assert_eq!(MouseEventType::from_raw(28), None);
    }

    #[test]
    fn test_classification_groups() {
        let downs: Vec<_> = ALL.iter().copied().filter(|t| is_mouse_down(*t)).collect();
        let ups: Vec<_> = ALL.iter().copied().filter(|t| is_mouse_up(*t)).collect();
        let drags: Vec<_> = ALL.iter().copied().filter(|t| is_mouse_drag(*t)).collect();
        assert_eq!(downs.len(), 3);
        assert_eq!(ups.len(), 3);
        assert_eq!(drags.len(), 3);

        let clicks = ALL.iter().filter(|t| is_mouse_click_event(**t)).count();
        assert_eq!(clicks, 9);

        assert!(!is_mouse_click_event(MouseEventType::MouseMoved));
        assert!(!is_mouse_click_event(MouseEventType::ScrollWheel));
        assert_eq!(
            MouseEventType::OtherMouseDragged.button(),
            Some(MouseButton::Other)
        );
        assert_eq!(MouseEventType::MouseMoved.button(), None);
    }

    #[test]
    fn test_modifier_flags_from_raw() {
        // Low bits are device-dependent and must be ignored.
        let flags = ModifierFlags::from_raw(0x0012_0102);
        assert_eq!(flags, ModifierFlags::SHIFT | ModifierFlags::COMMAND);
        assert!(flags.is_shortcut());
        assert!(!ModifierFlags::OPTION.is_shortcut());
    }
}

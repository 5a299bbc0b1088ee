//! Virtual key codes (ANSI layout) and their printable characters.
//!
//! Codes are the hardware-independent virtual key numbers the window server
//! reports; they name physical key positions, so the mapping assumes a US
//! layout.

use crate::input::ModifierFlags;

pub const KEY_RETURN: u16 = 0x24;
pub const KEY_TAB: u16 = 0x30;
pub const KEY_SPACE: u16 = 0x31;
pub const KEY_DELETE: u16 = 0x33;
pub const KEY_KEYPAD_ENTER: u16 = 0x4C;

/// Return and keypad Enter both commit a text field.
pub fn is_commit_key(code: u16) -> bool {
    code == KEY_RETURN || code == KEY_KEYPAD_ENTER
}

pub fn is_delete_key(code: u16) -> bool {
    code == KEY_DELETE
}

/// Command, Shift, Caps Lock, Option, Control (both sides) and Fn.
pub fn is_modifier_key(code: u16) -> bool {
    (0x36..=0x3F).contains(&code)
}

/// (unshifted, shifted) glyphs for the main block.
fn main_block(code: u16) -> Option<(char, char)> {
    Some(match code {
        0x00 => ('a', 'A'),
        0x01 => ('s', 'S'),
        0x02 => ('d', 'D'),
        0x03 => ('f', 'F'),
        0x04 => ('h', 'H'),
        0x05 => ('g', 'G'),
        0x06 => ('z', 'Z'),
        0x07 => ('x', 'X'),
        0x08 => ('c', 'C'),
        0x09 => ('v', 'V'),
        0x0B => ('b', 'B'),
        0x0C => ('q', 'Q'),
        0x0D => ('w', 'W'),
        0x0E => ('e', 'E'),
        0x0F => ('r', 'R'),
        0x10 => ('y', 'Y'),
        0x11 => ('t', 'T'),
        0x12 => ('1', '!'),
        0x13 => ('2', '@'),
        0x14 => ('3', '#'),
        0x15 => ('4', '$'),
        0x16 => ('6', '^'),
        0x17 => ('5', '%'),
        0x18 => ('=', '+'),
        0x19 => ('9', '('),
        0x1A => ('7', '&'),
        0x1B => ('-', '_'),
        0x1C => ('8', '*'),
        0x1D => ('0', ')'),
        0x1E => (']', '}'),
        0x1F => ('o', 'O'),
        0x20 => ('u', 'U'),
        0x21 => ('[', '{'),
        0x22 => ('i', 'I'),
        0x23 => ('p', 'P'),
        0x25 => ('l', 'L'),
        0x26 => ('j', 'J'),
        0x27 => ('\'', '"'),
        0x28 => ('k', 'K'),
        0x29 => (';', ':'),
        0x2A => ('\\', '|'),
        0x2B => (',', '<'),
        0x2C => ('/', '?'),
        0x2D => ('n', 'N'),
        0x2E => ('m', 'M'),
        0x2F => ('.', '>'),
        0x31 => (' ', ' '),
        0x32 => ('`', '~'),
        _ => return None,
    })
}

fn keypad(code: u16) -> Option<char> {
    Some(match code {
        0x41 => '.',
        0x43 => '*',
        0x45 => '+',
        0x4B => '/',
        0x4E => '-',
        0x51 => '=',
        0x52 => '0',
        0x53 => '1',
        0x54 => '2',
        0x55 => '3',
        0x56 => '4',
        0x57 => '5',
        0x58 => '6',
        0x59 => '7',
        0x5B => '8',
        0x5C => '9',
        _ => return None,
    })
}

/// The character a key produces under `flags`, or `None` for keys with no
/// printable output (arrows, function keys, modifiers, Return, Delete...).
///
/// Caps Lock only affects letters. Option is ignored; its dead-key and
/// symbol layer is left to the system input method.
pub fn character_for(code: u16, flags: ModifierFlags) -> Option<char> {
    if let Some(c) = keypad(code) {
        return Some(c);
    }
    let (lower, upper) = main_block(code)?;
    let shift = flags.contains(ModifierFlags::SHIFT);
    if lower.is_ascii_alphabetic() {
        let caps = flags.contains(ModifierFlags::CAPS_LOCK);
        Some(if shift != caps { upper } else { lower })
    } else {
        Some(if shift { upper } else { lower })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_shift() {
        let none = ModifierFlags::empty();
        assert_eq!(character_for(0x00, none), Some('a'));
        assert_eq!(character_for(0x00, ModifierFlags::SHIFT), Some('A'));
        assert_eq!(character_for(0x00, ModifierFlags::CAPS_LOCK), Some('A'));
        assert_eq!(
            character_for(0x00, ModifierFlags::CAPS_LOCK | ModifierFlags::SHIFT),
            Some('a')
        );
    }

    #[test]
    fn test_digits_and_punctuation() {
        let none = ModifierFlags::empty();
        assert_eq!(character_for(0x12, none), Some('1'));
        assert_eq!(character_for(0x12, ModifierFlags::SHIFT), Some('!'));
        // Caps Lock leaves digits alone.
        assert_eq!(character_for(0x12, ModifierFlags::CAPS_LOCK), Some('1'));
        assert_eq!(character_for(0x2C, ModifierFlags::SHIFT), Some('?'));
        assert_eq!(character_for(KEY_SPACE, none), Some(' '));
        assert_eq!(character_for(0x5C, none), Some('9'));
    }

    #[test]
    fn test_non_printing_keys() {
        let none = ModifierFlags::empty();
        for code in [KEY_RETURN, KEY_TAB, KEY_DELETE, 0x35, KEY_KEYPAD_ENTER, 0x7B, 0x38] {
            assert_eq!(character_for(code, none), None, "code {code:#x}");
        }
        assert!(is_commit_key(KEY_KEYPAD_ENTER));
        assert!(is_delete_key(KEY_DELETE));
        assert!(is_modifier_key(0x38));
        assert!(!is_modifier_key(KEY_DELETE));
    }
}

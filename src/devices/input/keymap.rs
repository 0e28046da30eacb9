//! # Scan Code Set 2 Keymap
//!
//! Read-only table from keycode to [`KeyDescriptor`]. The `0xE0` prefix is
//! not part of the lookup: extended keys share an entry with the keypad key
//! that has the same code, so `E0 75` and `75` both resolve to
//! [`ARROW_UP`](special::ARROW_UP).
//!
//! Printing keys resolve to ASCII. Everything else resolves to a value from
//! [`special`]; unmapped codes resolve to [`special::NONE`].

/// Character values for keys that do not print.
pub mod special {
    pub const NONE: u8 = 0x00;
    pub const BACKSPACE: u8 = 0x08;
    pub const TAB: u8 = 0x09;
    pub const ENTER: u8 = 0x0A;
    pub const ESC: u8 = 0x1B;
    pub const DELETE: u8 = 0x7F;

    pub const SHIFT: u8 = 0x90;
    pub const ALT: u8 = 0x91;
    pub const CTRL: u8 = 0x92;
    pub const CAPS_LOCK: u8 = 0x93;

    pub const F1: u8 = 0xA1;
    pub const F2: u8 = 0xA2;
    pub const F3: u8 = 0xA3;
    pub const F4: u8 = 0xA4;
    pub const F5: u8 = 0xA5;
    pub const F6: u8 = 0xA6;
    pub const F7: u8 = 0xA7;
    pub const F8: u8 = 0xA8;
    pub const F9: u8 = 0xA9;
    pub const F10: u8 = 0xAA;
    pub const F11: u8 = 0xAB;
    pub const F12: u8 = 0xAC;

    pub const HOME: u8 = 0xB0;
    pub const END: u8 = 0xB1;
    pub const PAGE_UP: u8 = 0xB2;
    pub const PAGE_DOWN: u8 = 0xB3;
    pub const INSERT: u8 = 0xB4;
    pub const ARROW_LEFT: u8 = 0xB8;
    pub const ARROW_RIGHT: u8 = 0xB9;
    pub const ARROW_UP: u8 = 0xBA;
    pub const ARROW_DOWN: u8 = 0xBB;
    pub const NUM_LOCK: u8 = 0xBC;
    pub const SCROLL_LOCK: u8 = 0xBD;
}

/// Protocol prefix announcing a key release.
pub const RELEASE_PREFIX: u8 = 0xF0;
/// Protocol prefix announcing an extended key.
pub const EXTENDED_PREFIX: u8 = 0xE0;

/// What a key does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Ordinary,
    Shift,
    Ctrl,
    Alt,
    CapsLock,
}

impl KeyRole {
    #[inline]
    pub const fn is_modifier(self) -> bool {
        !matches!(self, KeyRole::Ordinary)
    }
}

/// Static description of one keycode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDescriptor {
    /// Character with no modifiers
    pub ch: u8,
    /// Character with shift held
    pub shifted: u8,
    pub role: KeyRole,
}

impl KeyDescriptor {
    pub const NONE: KeyDescriptor = KeyDescriptor::key(special::NONE, special::NONE);

    const fn key(ch: u8, shifted: u8) -> Self {
        Self {
            ch,
            shifted,
            role: KeyRole::Ordinary,
        }
    }

    const fn same(ch: u8) -> Self {
        Self::key(ch, ch)
    }

    const fn letter(lower: u8) -> Self {
        Self::key(lower, lower.to_ascii_uppercase())
    }

    const fn modifier(role: KeyRole, marker: u8) -> Self {
        Self {
            ch: marker,
            shifted: marker,
            role,
        }
    }

    #[inline]
    pub const fn is_modifier(&self) -> bool {
        self.role.is_modifier()
    }
}

const fn entry(code: u8) -> KeyDescriptor {
    use self::special::*;
    match code {
        // function row
        0x76 => KeyDescriptor::same(ESC),
        0x05 => KeyDescriptor::same(F1),
        0x06 => KeyDescriptor::same(F2),
        0x04 => KeyDescriptor::same(F3),
        0x0C => KeyDescriptor::same(F4),
        0x03 => KeyDescriptor::same(F5),
        0x0B => KeyDescriptor::same(F6),
        0x83 => KeyDescriptor::same(F7),
        0x0A => KeyDescriptor::same(F8),
        0x01 => KeyDescriptor::same(F9),
        0x09 => KeyDescriptor::same(F10),
        0x78 => KeyDescriptor::same(F11),
        0x07 => KeyDescriptor::same(F12),

        // number row
        0x0E => KeyDescriptor::key(b'`', b'~'),
        0x16 => KeyDescriptor::key(b'1', b'!'),
        0x1E => KeyDescriptor::key(b'2', b'@'),
        0x26 => KeyDescriptor::key(b'3', b'#'),
        0x25 => KeyDescriptor::key(b'4', b'$'),
        0x2E => KeyDescriptor::key(b'5', b'%'),
        0x36 => KeyDescriptor::key(b'6', b'^'),
        0x3D => KeyDescriptor::key(b'7', b'&'),
        0x3E => KeyDescriptor::key(b'8', b'*'),
        0x46 => KeyDescriptor::key(b'9', b'('),
        0x45 => KeyDescriptor::key(b'0', b')'),
        0x4E => KeyDescriptor::key(b'-', b'_'),
        0x55 => KeyDescriptor::key(b'=', b'+'),
        0x66 => KeyDescriptor::same(BACKSPACE),

        // top row
        0x0D => KeyDescriptor::same(TAB),
        0x15 => KeyDescriptor::letter(b'q'),
        0x1D => KeyDescriptor::letter(b'w'),
        0x24 => KeyDescriptor::letter(b'e'),
        0x2D => KeyDescriptor::letter(b'r'),
        0x2C => KeyDescriptor::letter(b't'),
        0x35 => KeyDescriptor::letter(b'y'),
        0x3C => KeyDescriptor::letter(b'u'),
        0x43 => KeyDescriptor::letter(b'i'),
        0x44 => KeyDescriptor::letter(b'o'),
        0x4D => KeyDescriptor::letter(b'p'),
        0x54 => KeyDescriptor::key(b'[', b'{'),
        0x5B => KeyDescriptor::key(b']', b'}'),
        0x5D => KeyDescriptor::key(b'\\', b'|'),

        // home row
        0x58 => KeyDescriptor::modifier(KeyRole::CapsLock, CAPS_LOCK),
        0x1C => KeyDescriptor::letter(b'a'),
        0x1B => KeyDescriptor::letter(b's'),
        0x23 => KeyDescriptor::letter(b'd'),
        0x2B => KeyDescriptor::letter(b'f'),
        0x34 => KeyDescriptor::letter(b'g'),
        0x33 => KeyDescriptor::letter(b'h'),
        0x3B => KeyDescriptor::letter(b'j'),
        0x42 => KeyDescriptor::letter(b'k'),
        0x4B => KeyDescriptor::letter(b'l'),
        0x4C => KeyDescriptor::key(b';', b':'),
        0x52 => KeyDescriptor::key(b'\'', b'"'),
        0x5A => KeyDescriptor::same(ENTER),

        // bottom row
        0x12 | 0x59 => KeyDescriptor::modifier(KeyRole::Shift, SHIFT),
        0x1A => KeyDescriptor::letter(b'z'),
        0x22 => KeyDescriptor::letter(b'x'),
        0x21 => KeyDescriptor::letter(b'c'),
        0x2A => KeyDescriptor::letter(b'v'),
        0x32 => KeyDescriptor::letter(b'b'),
        0x31 => KeyDescriptor::letter(b'n'),
        0x3A => KeyDescriptor::letter(b'm'),
        0x41 => KeyDescriptor::key(b',', b'<'),
        0x49 => KeyDescriptor::key(b'.', b'>'),
        0x4A => KeyDescriptor::key(b'/', b'?'),

        // space bar row; right ctrl/alt arrive as E0 14 / E0 11
        0x14 => KeyDescriptor::modifier(KeyRole::Ctrl, CTRL),
        0x11 => KeyDescriptor::modifier(KeyRole::Alt, ALT),
        0x29 => KeyDescriptor::same(b' '),

        // navigation cluster (E0-prefixed) sharing codes with the keypad
        0x70 => KeyDescriptor::same(INSERT),
        0x71 => KeyDescriptor::same(DELETE),
        0x6C => KeyDescriptor::same(HOME),
        0x69 => KeyDescriptor::same(END),
        0x7D => KeyDescriptor::same(PAGE_UP),
        0x7A => KeyDescriptor::same(PAGE_DOWN),
        0x75 => KeyDescriptor::same(ARROW_UP),
        0x72 => KeyDescriptor::same(ARROW_DOWN),
        0x6B => KeyDescriptor::same(ARROW_LEFT),
        0x74 => KeyDescriptor::same(ARROW_RIGHT),

        // remaining keypad
        0x77 => KeyDescriptor::same(NUM_LOCK),
        0x7E => KeyDescriptor::same(SCROLL_LOCK),
        0x73 => KeyDescriptor::same(b'5'),
        0x7C => KeyDescriptor::same(b'*'),
        0x7B => KeyDescriptor::same(b'-'),
        0x79 => KeyDescriptor::same(b'+'),

        _ => KeyDescriptor::NONE,
    }
}

const fn build() -> [KeyDescriptor; 256] {
    let mut table = [KeyDescriptor::NONE; 256];
    let mut code = 0;
    while code < 256 {
        table[code] = entry(code as u8);
        code += 1;
    }
    table
}

pub static KEYMAP: [KeyDescriptor; 256] = build();

#[inline]
pub fn lookup(keycode: u8) -> &'static KeyDescriptor {
    &KEYMAP[keycode as usize]
}

//! # Keymap Module
//!
//! Translates [`OutputKey`] identifiers to Linux evdev key codes.
//!
//! Printable characters are matched case-insensitively against the letter
//! and digit rows; navigation keys map to the arrow cluster. Characters
//! with no key code are rejected with `InvalidInput` so the sink surfaces
//! them as ordinary injection failures.

use evdev::Key;
use std::io;

use crate::mapper::OutputKey;

/// Resolves an output key to its evdev key code.
///
/// # Errors
///
/// Returns `InvalidInput` for characters outside the letter and digit
/// rows.
///
/// # Examples
///
/// ```
/// use evdev::Key;
/// use joykey_bridge::keyboard::keymap::evdev_key;
/// use joykey_bridge::mapper::OutputKey;
///
/// assert_eq!(evdev_key(OutputKey::Char('w')).unwrap(), Key::KEY_W);
/// assert_eq!(evdev_key(OutputKey::ArrowUp).unwrap(), Key::KEY_UP);
/// assert!(evdev_key(OutputKey::Char('!')).is_err());
/// ```
pub fn evdev_key(key: OutputKey) -> io::Result<Key> {
    match key {
        OutputKey::ArrowUp => Ok(Key::KEY_UP),
        OutputKey::ArrowDown => Ok(Key::KEY_DOWN),
        OutputKey::ArrowLeft => Ok(Key::KEY_LEFT),
        OutputKey::ArrowRight => Ok(Key::KEY_RIGHT),
        OutputKey::Char(c) => char_key(c),
    }
}

/// Resolves a printable character to its evdev key code.
fn char_key(c: char) -> io::Result<Key> {
    let key = match c.to_ascii_lowercase() {
        'a' => Key::KEY_A,
        'b' => Key::KEY_B,
        'c' => Key::KEY_C,
        'd' => Key::KEY_D,
        'e' => Key::KEY_E,
        'f' => Key::KEY_F,
        'g' => Key::KEY_G,
        'h' => Key::KEY_H,
        'i' => Key::KEY_I,
        'j' => Key::KEY_J,
        'k' => Key::KEY_K,
        'l' => Key::KEY_L,
        'm' => Key::KEY_M,
        'n' => Key::KEY_N,
        'o' => Key::KEY_O,
        'p' => Key::KEY_P,
        'q' => Key::KEY_Q,
        'r' => Key::KEY_R,
        's' => Key::KEY_S,
        't' => Key::KEY_T,
        'u' => Key::KEY_U,
        'v' => Key::KEY_V,
        'w' => Key::KEY_W,
        'x' => Key::KEY_X,
        'y' => Key::KEY_Y,
        'z' => Key::KEY_Z,
        '0' => Key::KEY_0,
        '1' => Key::KEY_1,
        '2' => Key::KEY_2,
        '3' => Key::KEY_3,
        '4' => Key::KEY_4,
        '5' => Key::KEY_5,
        '6' => Key::KEY_6,
        '7' => Key::KEY_7,
        '8' => Key::KEY_8,
        '9' => Key::KEY_9,
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("No key code for character '{}'", c),
            ))
        }
    };
    Ok(key)
}

/// Returns every key code the keymap can emit.
///
/// Used to register the virtual device's key capabilities, so the kernel
/// accepts exactly the events this keymap can produce.
#[must_use]
pub fn registered_keys() -> Vec<Key> {
    let mut keys: Vec<Key> = ('a'..='z')
        .chain('0'..='9')
        .map(|c| char_key(c).expect("letter and digit rows are always mapped"))
        .collect();
    keys.extend([Key::KEY_UP, Key::KEY_DOWN, Key::KEY_LEFT, Key::KEY_RIGHT]);
    keys
}

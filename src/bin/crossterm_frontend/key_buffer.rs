use std::sync::Mutex;
use std::time::{Duration, Instant};

use schip_8::emulator::state::NUM_KEYS;

/// A thread-safe record of which keypad keys were pressed recently.
///
/// Terminals only report key presses, never releases, so a key counts as
/// held until `timeout` has passed since its last press. Holding a key down
/// makes the terminal repeat it, which keeps it held.
/// Wrap it in an `std::sync::Arc` and share it between the listener and the emulator.
pub struct KeyBuffer {
    timeout: Duration,
    pressed: Mutex<[Option<Instant>; NUM_KEYS]>,
}

impl KeyBuffer {

    /// Create a new `KeyBuffer` where keys are released after `timeout`.
    pub fn new(timeout: Duration) -> KeyBuffer {
        KeyBuffer {
            timeout,
            pressed: Mutex::new([None; NUM_KEYS]),
        }
    }

    /// Record a press of a keypad key. Keys above 0xF are ignored.
    pub fn press(&self, key: u8) {
        self.press_at(key, Instant::now());
    }

    fn press_at(&self, key: u8, at: Instant) {
        let mut guard = match self.pressed.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(slot) = guard.get_mut(key as usize) {
            *slot = Some(at);
        }
    }

    /// Which keys are held right now.
    pub fn held(&self) -> [bool; NUM_KEYS] {
        let guard = match self.pressed.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut held = [false; NUM_KEYS];
        for (held, pressed) in held.iter_mut().zip(guard.iter()) {
            *held = pressed.map_or(false, |at| at.elapsed() < self.timeout);
        }
        held
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::{sync::Arc, thread};

    #[test]
    fn press_from_other_thread() {
        let kb = Arc::new(KeyBuffer::new(Duration::from_secs(60)));

        let kb_c = kb.clone();
        let producer = thread::spawn(move || {
            kb_c.press(0xA)
        });

        producer.join().unwrap(); // Ensure the press has been done
        let held = kb.held();
        assert!(held[0xA]);
        assert_eq!(held.iter().filter(|&&h| h).count(), 1);
    }

    #[test]
    fn old_presses_are_released() {
        let kb = KeyBuffer::new(Duration::from_millis(100));
        kb.press_at(0x3, Instant::now() - Duration::from_secs(1));
        kb.press(0x4);
        let held = kb.held();
        assert!(!held[0x3]);
        assert!(held[0x4]);
    }

    #[test]
    fn keys_outside_keypad_are_ignored() {
        let kb = KeyBuffer::new(Duration::from_secs(60));
        kb.press(0x10);
        assert_eq!(kb.held(), [false; NUM_KEYS]);
    }
}

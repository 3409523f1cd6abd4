use super::key_buffer::KeyBuffer;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use schip_8::emulator::state::NUM_KEYS;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How long a key stays held after the terminal last reported it.
const KEY_TIMEOUT: Duration = Duration::from_millis(150);

/// How often the listener checks whether it should stop.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A struct for managing keypresses that will automatically
/// start a thread that grabs keypresses.
pub struct KeyManager {
    stop: Arc<AtomicBool>,
    quit: Arc<AtomicBool>,
    key_buffer: Arc<KeyBuffer>,
    event_listener: Option<JoinHandle<()>>,
}

impl KeyManager {

    // Start event listener thread
    pub fn new() -> KeyManager {
        let stop = Arc::new(AtomicBool::new(false));
        let quit = Arc::new(AtomicBool::new(false));
        let key_buffer = Arc::new(KeyBuffer::new(KEY_TIMEOUT));
        let event_listener = event_listener(stop.clone(), quit.clone(), key_buffer.clone());
        KeyManager {
            stop,
            quit,
            key_buffer,
            event_listener: Some(event_listener),
        }
    }

    /// The keypad keys that are currently held
    pub fn held(&self) -> [bool; NUM_KEYS] {
        self.key_buffer.held()
    }

    /// Whether the user asked to quit with escape or ctrl-c
    pub fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::Relaxed)
    }
}

impl Drop for KeyManager {
    fn drop(&mut self) {
        // Tell the event listener to stop, and wait for it
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.event_listener.take() {
            if handle.join().is_err() {
                log::error!("Key listener panicked");
            }
        }
    }
}

/// Starts a thread that listens for key events and pushes them to the key buffer.
fn event_listener(
    stop: Arc<AtomicBool>,
    quit: Arc<AtomicBool>,
    key_buffer: Arc<KeyBuffer>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            let event = match event::poll(POLL_INTERVAL).and_then(|ready| {
                if ready { event::read().map(Some) } else { Ok(None) }
            }) {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(e) => {
                    log::error!("Could not read terminal events: {}", e);
                    quit.store(true, Ordering::Relaxed);
                    break;
                }
            };
            log::trace!("Got event {:?}", event);

            // Investigate the event
            if let Event::Key(key_event) = event {
                if is_quit(key_event) {
                    quit.store(true, Ordering::Relaxed);
                } else if let Some(key) = keypad(key_event.code) {
                    key_buffer.press(key);
                }
            }
        }
    })
}

fn is_quit(key_event: KeyEvent) -> bool {
    match key_event.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key_event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Map the left side of a QWERTY keyboard onto the hex keypad.
///
/// ```text
/// 1 2 3 4        1 2 3 C
/// Q W E R   ->   4 5 6 D
/// A S D F        7 8 9 E
/// Z X C V        A 0 B F
/// ```
fn keypad(code: KeyCode) -> Option<u8> {
    let c = match code {
        KeyCode::Char(c) => c.to_ascii_lowercase(),
        _ => return None,
    };
    let key = match c {
        '1' => 0x1, '2' => 0x2, '3' => 0x3, '4' => 0xC,
        'q' => 0x4, 'w' => 0x5, 'e' => 0x6, 'r' => 0xD,
        'a' => 0x7, 's' => 0x8, 'd' => 0x9, 'f' => 0xE,
        'z' => 0xA, 'x' => 0x0, 'c' => 0xB, 'v' => 0xF,
        _ => return None,
    };
    Some(key)
}

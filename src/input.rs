/// Keyboard input as scenes see it, plus the held-key bookkeeping the
/// driver needs on terminals that never report key releases.

use std::collections::HashMap;

use crossterm::event::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Escape,
    /// Any other printable key, lower-cased.
    Char(char),
}

impl Key {
    /// Translate a terminal key code.  Keys no scene cares about map to
    /// `None`.
    pub fn from_code(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Esc => Some(Key::Escape),
            KeyCode::Char(' ') => Some(Key::Space),
            KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
}

/// What the player is asking for during one update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl Controls {
    /// -1, 0 or +1.  Holding both directions cancels out.
    pub fn direction(&self) -> f32 {
        let mut direction = 0.0;
        if self.left {
            direction -= 1.0;
        }
        if self.right {
            direction += 1.0;
        }
        direction
    }
}

// ── Held-key tracking ────────────────────────────────────────────────────────

/// Turns raw press / repeat / release notifications into `KeyDown` and
/// `KeyUp` events.
///
/// Terminals with keyboard enhancement report releases, so a key stays held
/// until its release arrives.  Classic terminals only send repeated presses
/// while a key is down; with a `hold_window` set, a key that has not been
/// refreshed for that many frames is treated as released.
#[derive(Debug, Default)]
pub struct KeyTracker {
    last_seen: HashMap<Key, u64>,
    hold_window: Option<u64>,
}

impl KeyTracker {
    pub fn new(hold_window: Option<u64>) -> Self {
        Self {
            last_seen: HashMap::new(),
            hold_window,
        }
    }

    /// Record a press.  Only the first press of a held key yields `KeyDown`;
    /// auto-repeat presses just keep it alive.
    pub fn press(&mut self, key: Key, frame: u64) -> Option<InputEvent> {
        match self.last_seen.insert(key, frame) {
            Some(_) => None,
            None => Some(InputEvent::KeyDown(key)),
        }
    }

    /// Record a repeat.  An untracked key is treated as a fresh press.
    pub fn repeat(&mut self, key: Key, frame: u64) -> Option<InputEvent> {
        self.press(key, frame)
    }

    pub fn release(&mut self, key: Key) -> Option<InputEvent> {
        self.last_seen.remove(&key).map(|_| InputEvent::KeyUp(key))
    }

    /// Release every key whose last sighting is older than the hold window.
    pub fn expire(&mut self, frame: u64) -> Vec<InputEvent> {
        let Some(window) = self.hold_window else {
            return Vec::new();
        };
        let mut stale: Vec<Key> = self
            .last_seen
            .iter()
            .filter(|&(_, &last)| frame.saturating_sub(last) > window)
            .map(|(&key, _)| key)
            .collect();
        // HashMap order is arbitrary; keep the output stable.
        stale.sort();
        stale
            .into_iter()
            .filter_map(|key| self.release(key))
            .collect()
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.last_seen.contains_key(&key)
    }
}

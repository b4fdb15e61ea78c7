/// Keyboard state tracker and the per-frame joypad sample.
///
/// Terminals report key presses and repeats but rarely releases, so a key
/// counts as held until it has been silent for a short timeout. Fresh
/// presses (edge triggers) are tracked separately for the screens that
/// act once per press.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, poll, Event, KeyCode, KeyEventKind, KeyModifiers};

/// After this duration without a Press/Repeat event, consider the key
/// released. Covers terminals that never report Release events.
const HOLD_TIMEOUT: Duration = Duration::from_millis(160);

/// One frame's joypad sample: independent bits for the eight buttons.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Joypad {
    bits: u8,
}

impl Joypad {
    pub const LEFT: u8 = 1 << 0;
    pub const RIGHT: u8 = 1 << 1;
    pub const UP: u8 = 1 << 2;
    pub const DOWN: u8 = 1 << 3;
    pub const A: u8 = 1 << 4;
    pub const B: u8 = 1 << 5;
    pub const START: u8 = 1 << 6;
    pub const SELECT: u8 = 1 << 7;

    pub fn none() -> Joypad {
        Joypad { bits: 0 }
    }

    pub fn set(&mut self, button: u8, down: bool) {
        if down {
            self.bits |= button;
        } else {
            self.bits &= !button;
        }
    }

    /// Builder-style press, handy in tests.
    #[allow(dead_code)]
    pub fn press(mut self, button: u8) -> Joypad {
        self.bits |= button;
        self
    }

    pub fn left(self) -> bool { self.bits & Self::LEFT != 0 }
    pub fn right(self) -> bool { self.bits & Self::RIGHT != 0 }
    pub fn up(self) -> bool { self.bits & Self::UP != 0 }
    pub fn down(self) -> bool { self.bits & Self::DOWN != 0 }
    pub fn a(self) -> bool { self.bits & Self::A != 0 }
    pub fn b(self) -> bool { self.bits & Self::B != 0 }
    pub fn start(self) -> bool { self.bits & Self::START != 0 }
    pub fn select(self) -> bool { self.bits & Self::SELECT != 0 }
}

pub struct InputState {
    /// Timestamp of the last Press/Repeat event for each key.
    last_active: HashMap<KeyCode, Instant>,
    /// Keys that transitioned "not held" → "held" during the most recent
    /// drain_events() call.
    fresh: Vec<KeyCode>,
    ctrl_c: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            last_active: HashMap::with_capacity(16),
            fresh: Vec::with_capacity(8),
            ctrl_c: false,
        }
    }

    /// Drain all pending terminal events and update key states.
    /// Call once per frame, before the screen step.
    pub fn drain_events(&mut self) {
        self.fresh.clear();
        self.ctrl_c = false;

        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
                {
                    self.ctrl_c = true;
                }
                match key.kind {
                    KeyEventKind::Release => {
                        self.last_active.remove(&key.code);
                    }
                    _ => {
                        let was_held = self.held(key.code);
                        self.last_active.insert(key.code, Instant::now());
                        if !was_held {
                            self.fresh.push(key.code);
                        }
                    }
                }
            }
        }

        // Expire keys that have timed out.
        let now = Instant::now();
        self.last_active
            .retain(|_, t| now.duration_since(*t) < HOLD_TIMEOUT);
    }

    fn held(&self, code: KeyCode) -> bool {
        self.last_active
            .get(&code)
            .map(|t| t.elapsed() < HOLD_TIMEOUT)
            .unwrap_or(false)
    }

    fn pressed(&self, code: KeyCode) -> bool {
        self.fresh.contains(&code)
    }

    /// Is any of these keys currently down? (continuous sampling)
    pub fn any_down(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|&c| self.held(c))
    }

    /// Was any of these keys freshly pressed this frame? (edge trigger)
    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|&c| self.pressed(c))
    }

    pub fn ctrl_c(&self) -> bool {
        self.ctrl_c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joypad_bits_are_independent() {
        let mut pad = Joypad::none();
        pad.set(Joypad::LEFT, true);
        pad.set(Joypad::A, true);
        assert!(pad.left() && pad.a());
        assert!(!pad.right() && !pad.b() && !pad.start() && !pad.select());

        pad.set(Joypad::LEFT, false);
        assert!(!pad.left() && pad.a());
    }

    #[test]
    fn joypad_press_builder() {
        let pad = Joypad::none().press(Joypad::B).press(Joypad::DOWN);
        assert!(pad.b() && pad.down());
        assert!(!pad.a() && !pad.up());
    }
}

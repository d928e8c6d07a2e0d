use std::collections::HashMap;

// pointer
// ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// equivalent to left mouse button
    Primary,
    /// equivalent to right mouse button
    Secondary,
    /// equivalent to middle mouse button
    Tertiary,
}

impl Button {
    /// NOTE: this is useful for feeding StateTracker's any_down.
    pub fn all() -> [Self; 3] {
        use Button::*;
        [Primary, Secondary, Tertiary]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Clone)]
pub enum PointerEventKind {
    Enter {
        // NOTE: winit (v 0.30) does not provide enter position.
        position: Option<(f64, f64)>,
    },
    Leave,
    Move {
        position: (f64, f64),
    },
    Button {
        state: ButtonState,
        button: Button,
    },
    Scroll {
        delta: (f64, f64),
    },
}

#[derive(Debug, Clone)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
}

// keyboard
// ----

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawKey {
    /// linux evdev code; see
    /// https://github.com/torvalds/linux/blob/master/include/uapi/linux/input-event-codes.h
    Unix(u32),
    Unidentified,
}

/// Scancode identifies the physical key position regardless of the active
/// keyboard layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scancode {
    Esc,
    Tab,
    Enter,
    Space,
    Backspace,
    Q,
    W,
    A,
    S,
    D,
    CtrlLeft,
    CtrlRight,
    ShiftLeft,
    ShiftRight,
    AltLeft,
    AltRight,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Unidentified(RawKey),
}

/// Keycode is the symbol the key maps to under the active layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keycode {
    Char(char),
    Unidentified(RawKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Clone)]
pub enum KeyboardEventKind {
    Key {
        state: KeyState,
        scancode: Scancode,
        keycode: Keycode,
        /// true if this is a key repeat
        repeat: bool,
    },
}

#[derive(Debug, Clone)]
pub struct KeyboardEvent {
    pub kind: KeyboardEventKind,
}

// states
// ----

// NOTE: a button may carry multiple flags at once (down + just pressed).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StateFlags(u8);

impl StateFlags {
    pub const JUST_PRESSED: Self = Self(1 << 0);
    pub const JUST_RELEASED: Self = Self(1 << 1);
    pub const DOWN: Self = Self(1 << 2);
    pub const REPEAT: Self = Self(1 << 3);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl std::ops::BitOr for StateFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// NOTE: this was originally inspired by bevy's ButtonInput thing.
#[derive(Debug)]
pub struct StateTracker<B> {
    map: HashMap<B, StateFlags>,
}

// @BlindDerive
impl<B> Default for StateTracker<B> {
    fn default() -> Self {
        Self {
            map: HashMap::default(),
        }
    }
}

impl<B> StateTracker<B>
where
    B: Copy + Eq + std::hash::Hash,
{
    /// transient flags live for exactly one iteration.
    pub fn clear_transient_flags(&mut self) {
        for flags in self.map.values_mut() {
            flags.remove(StateFlags::JUST_PRESSED);
            flags.remove(StateFlags::JUST_RELEASED);
            flags.remove(StateFlags::REPEAT);
        }
    }

    pub fn press(&mut self, button: B, repeat: bool) {
        let mut flags = StateFlags::JUST_PRESSED | StateFlags::DOWN;
        if repeat {
            flags = flags | StateFlags::REPEAT;
        }
        self.map.insert(button, flags);
    }

    pub fn release(&mut self, button: B) {
        self.map.insert(button, StateFlags::JUST_RELEASED);
    }

    pub fn flags(&self, button: B) -> StateFlags {
        self.map.get(&button).copied().unwrap_or_default()
    }

    pub fn just_pressed(&self, button: B) -> bool {
        self.flags(button).contains(StateFlags::JUST_PRESSED)
    }

    pub fn just_released(&self, button: B) -> bool {
        self.flags(button).contains(StateFlags::JUST_RELEASED)
    }

    pub fn down(&self, button: B) -> bool {
        self.flags(button).contains(StateFlags::DOWN)
    }

    pub fn repeated(&self, button: B) -> bool {
        self.flags(button).contains(StateFlags::REPEAT)
    }

    pub fn any_down(&self, buttons: impl IntoIterator<Item = B>) -> bool {
        buttons.into_iter().any(|button| self.down(button))
    }
}

#[derive(Debug, Default)]
pub struct PointerState {
    pub position: Option<(f64, f64)>,
    // NOTE: prev_position is needed to compute position_delta.
    //   a single iteration (of an event loop) may accumulate multiple move
    //   events thus to compute correct deltas we need to diff against prev
    //   frame and not against prev value.
    prev_position: Option<(f64, f64)>,
    pub position_delta: Option<(f64, f64)>,

    // NOTE: scroll_delta accumulates across the events of one iteration and
    // is reset on the next.
    pub scroll_delta: Option<(f64, f64)>,

    pub buttons: StateTracker<Button>,
}

impl PointerState {
    #[inline]
    pub fn reset_deltas(&mut self) {
        self.prev_position = self.position;
        self.position_delta = None;
        self.scroll_delta = None;
    }

    #[inline]
    pub fn clear_transient_flags(&mut self) {
        self.buttons.clear_transient_flags();
    }

    #[inline]
    pub fn handle_event(&mut self, ev: PointerEvent) {
        use PointerEventKind::*;
        match ev.kind {
            // NOTE: (on Enter) when window spawns right under the cursor doing
            // this helps to compute correct deltas.
            Enter {
                position: Some(position),
            }
            | Move { position } => {
                if let Some(prev) = self.prev_position {
                    let delta = (position.0 - prev.0, position.1 - prev.1);
                    self.position_delta = (delta != (0.0, 0.0)).then_some(delta);
                }
                self.position = Some(position);
            }
            Enter { position: None } | Leave => {}
            Scroll { delta } => {
                let (acc_x, acc_y) = self.scroll_delta.unwrap_or((0.0, 0.0));
                self.scroll_delta = Some((acc_x + delta.0, acc_y + delta.1));
            }
            Button { state, button } => match state {
                ButtonState::Pressed => self.buttons.press(button, false),
                ButtonState::Released => self.buttons.release(button),
            },
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ModifierFlags(u16);

impl ModifierFlags {
    const CTRL_LEFT: u16 = 1 << 0;
    const CTRL_RIGHT: u16 = 1 << 1;
    const SHIFT_LEFT: u16 = 1 << 2;
    const SHIFT_RIGHT: u16 = 1 << 3;
    const ALT_LEFT: u16 = 1 << 4;
    const ALT_RIGHT: u16 = 1 << 5;

    fn try_from_scancode(scancode: Scancode) -> Option<Self> {
        let bit = match scancode {
            Scancode::CtrlLeft => Self::CTRL_LEFT,
            Scancode::CtrlRight => Self::CTRL_RIGHT,
            Scancode::ShiftLeft => Self::SHIFT_LEFT,
            Scancode::ShiftRight => Self::SHIFT_RIGHT,
            Scancode::AltLeft => Self::ALT_LEFT,
            Scancode::AltRight => Self::ALT_RIGHT,
            _ => return None,
        };
        Some(Self(bit))
    }

    pub fn ctrl(&self) -> bool {
        self.0 & (Self::CTRL_LEFT | Self::CTRL_RIGHT) != 0
    }

    pub fn shift(&self) -> bool {
        self.0 & (Self::SHIFT_LEFT | Self::SHIFT_RIGHT) != 0
    }

    pub fn alt(&self) -> bool {
        self.0 & (Self::ALT_LEFT | Self::ALT_RIGHT) != 0
    }
}

#[derive(Debug, Default)]
pub struct KeyboardState {
    pub scancodes: StateTracker<Scancode>,
    pub keycodes: StateTracker<Keycode>,
    pub modifiers: ModifierFlags,
}

impl KeyboardState {
    #[inline]
    pub fn clear_transient_flags(&mut self) {
        self.scancodes.clear_transient_flags();
        self.keycodes.clear_transient_flags();
    }

    #[inline]
    pub fn handle_event(&mut self, ev: KeyboardEvent) {
        let KeyboardEventKind::Key {
            state,
            scancode,
            keycode,
            repeat,
        } = ev.kind;

        let modifier = ModifierFlags::try_from_scancode(scancode);
        match state {
            KeyState::Pressed => {
                self.scancodes.press(scancode, repeat);
                self.keycodes.press(keycode, repeat);
                if let Some(modifier) = modifier {
                    self.modifiers.0 |= modifier.0;
                }
            }
            KeyState::Released => {
                self.scancodes.release(scancode);
                self.keycodes.release(keycode);
                if let Some(modifier) = modifier {
                    self.modifiers.0 &= !modifier.0;
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    Pointer(PointerEvent),
    Keyboard(KeyboardEvent),
}

#[derive(Debug, Default)]
pub struct State {
    pub pointer: PointerState,
    pub keyboard: KeyboardState,
    /// event accumulator.
    ///
    /// NOTE: do not rely on `PointerState`/`KeyboardState` while iterating
    /// over `events` because states reflect the latest values while events
    /// preserve historical sequence.
    pub events: Vec<Event>,
}

impl State {
    pub fn handle_events(&mut self, events: impl Iterator<Item = Event>) {
        self.pointer.reset_deltas();
        self.pointer.clear_transient_flags();
        self.keyboard.clear_transient_flags();

        self.events.clear();
        self.events.extend(events);

        for event in self.events.iter() {
            match event {
                Event::Pointer(ev) => self.pointer.handle_event(ev.clone()),
                Event::Keyboard(ev) => self.keyboard.handle_event(ev.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_tracker_transitions() {
        let mut tracker = StateTracker::<Button>::default();

        tracker.press(Button::Primary, false);
        assert!(tracker.just_pressed(Button::Primary));
        assert!(tracker.down(Button::Primary));
        assert!(!tracker.repeated(Button::Primary));

        tracker.clear_transient_flags();
        assert!(!tracker.just_pressed(Button::Primary));
        assert!(tracker.down(Button::Primary));

        tracker.release(Button::Primary);
        assert!(tracker.just_released(Button::Primary));
        assert!(!tracker.down(Button::Primary));

        tracker.clear_transient_flags();
        assert!(!tracker.just_released(Button::Primary));
    }

    #[test]
    fn test_state_tracker_repeat() {
        let mut tracker = StateTracker::<Scancode>::default();

        tracker.press(Scancode::Esc, true);
        assert!(tracker.just_pressed(Scancode::Esc));
        assert!(tracker.repeated(Scancode::Esc));

        tracker.clear_transient_flags();
        assert!(!tracker.repeated(Scancode::Esc));
        assert!(tracker.down(Scancode::Esc));
    }

    #[test]
    fn test_keyboard_state_modifiers() {
        let mut keyboard = KeyboardState::default();

        keyboard.handle_event(KeyboardEvent {
            kind: KeyboardEventKind::Key {
                state: KeyState::Pressed,
                scancode: Scancode::ShiftLeft,
                keycode: Keycode::Unidentified(RawKey::Unidentified),
                repeat: false,
            },
        });
        assert!(keyboard.modifiers.shift());
        assert!(!keyboard.modifiers.ctrl());

        keyboard.handle_event(KeyboardEvent {
            kind: KeyboardEventKind::Key {
                state: KeyState::Released,
                scancode: Scancode::ShiftLeft,
                keycode: Keycode::Unidentified(RawKey::Unidentified),
                repeat: false,
            },
        });
        assert!(!keyboard.modifiers.shift());
    }

    #[test]
    fn test_pointer_state_deltas() {
        let mut pointer = PointerState::default();

        pointer.handle_event(PointerEvent {
            kind: PointerEventKind::Move {
                position: (10.0, 10.0),
            },
        });
        // no prev frame position yet, no delta.
        assert_eq!(pointer.position, Some((10.0, 10.0)));
        assert_eq!(pointer.position_delta, None);

        pointer.reset_deltas();
        pointer.handle_event(PointerEvent {
            kind: PointerEventKind::Move {
                position: (14.0, 7.0),
            },
        });
        assert_eq!(pointer.position_delta, Some((4.0, -3.0)));
    }
}

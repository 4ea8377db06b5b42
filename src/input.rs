//! Semantic input actions and the default key table that produces them.

use std::collections::HashMap;

use crossterm::event::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Fullscreen,
    Quit,
    Pause,
    /// Thrust multiplier, 2 through 8.
    Multiplier(u8),
    ToggleMusic,
    ToggleSound,
    Suicide,
}

impl Action {
    /// Held actions stay in effect from press to release; the rest fire
    /// once per press.
    pub fn is_held(&self) -> bool {
        matches!(
            self,
            Action::Left | Action::Right | Action::Up | Action::Down | Action::Fire
        )
    }
}

/// Currently held controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub multiplier: i32,
}

impl Default for Controls {
    fn default() -> Self {
        Controls {
            left: false,
            right: false,
            up: false,
            down: false,
            fire: false,
            multiplier: 1,
        }
    }
}

impl Controls {
    /// Record a press or release of a held action.  Returns false for
    /// actions that are not held.
    pub fn set(&mut self, action: Action, pressed: bool) -> bool {
        let flag = match action {
            Action::Left => &mut self.left,
            Action::Right => &mut self.right,
            Action::Up => &mut self.up,
            Action::Down => &mut self.down,
            Action::Fire => &mut self.fire,
            _ => return false,
        };
        *flag = pressed;
        true
    }

    pub fn release_all(&mut self) {
        let multiplier = self.multiplier;
        *self = Controls {
            multiplier,
            ..Controls::default()
        };
    }
}

// ── Keymap ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Keymap {
    keys: HashMap<KeyCode, Action>,
}

impl Keymap {
    pub fn empty() -> Self {
        Keymap {
            keys: HashMap::new(),
        }
    }

    pub fn bind(&mut self, key: KeyCode, action: Action) {
        self.keys.insert(key, action);
    }

    /// Letter keys are matched case-insensitively.
    pub fn lookup(&self, key: &KeyCode) -> Option<Action> {
        match key {
            KeyCode::Char(c) => self
                .keys
                .get(&KeyCode::Char(c.to_ascii_lowercase()))
                .copied(),
            other => self.keys.get(other).copied(),
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let mut map = Keymap::empty();
        map.bind(KeyCode::Left, Action::Left);
        map.bind(KeyCode::Right, Action::Right);
        map.bind(KeyCode::Up, Action::Up);
        map.bind(KeyCode::Down, Action::Down);
        map.bind(KeyCode::Char('a'), Action::Left);
        map.bind(KeyCode::Char('d'), Action::Right);
        map.bind(KeyCode::Char('w'), Action::Up);
        map.bind(KeyCode::Char('s'), Action::Down);
        map.bind(KeyCode::Char(' '), Action::Fire);
        map.bind(KeyCode::Char('z'), Action::Fire);
        map.bind(KeyCode::Char('f'), Action::Fullscreen);
        map.bind(KeyCode::Char('q'), Action::Quit);
        map.bind(KeyCode::Esc, Action::Quit);
        map.bind(KeyCode::Char('p'), Action::Pause);
        map.bind(KeyCode::Char('m'), Action::ToggleMusic);
        map.bind(KeyCode::Char('n'), Action::ToggleSound);
        map.bind(KeyCode::Char('k'), Action::Suicide);
        for n in 2..=8u8 {
            map.bind(KeyCode::Char((b'0' + n) as char), Action::Multiplier(n));
        }
        map
    }
}

use crate::model::ButtonRole;
use crate::render::Layout;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use std::{collections::BTreeMap, time::Duration};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum InputEvent {
    Key { key: KeyCode, mods: KeyModifiers },
    Click { col: u16, row: u16 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Press(ButtonRole),
    ToggleVisibility,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct KeyBindings {
    keys: BTreeMap<char, ButtonRole>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = BTreeMap::new();
        for (i, role) in ButtonRole::ALL.into_iter().enumerate() {
            keys.insert(role.hotkey(), role);
            keys.insert(char::from(b'1' + i as u8), role);
        }
        Self { keys }
    }
}

impl KeyBindings {
    /// Multi-character keys and unknown roles are skipped.
    pub(crate) fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut bindings = Self::default();
        for (key, role) in overrides {
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                tracing::warn!(key = %key, "key binding must be a single character");
                continue;
            };
            match role.parse::<ButtonRole>() {
                Ok(role) => {
                    bindings.keys.insert(ch.to_ascii_lowercase(), role);
                }
                Err(e) => tracing::warn!(key = %key, %e, "ignoring key binding"),
            }
        }
        bindings
    }

    pub(crate) fn role_for(&self, ch: char) -> Option<ButtonRole> {
        self.keys.get(&ch.to_ascii_lowercase()).copied()
    }
}

pub(crate) fn collect_input_nonblocking(max_frame_time: Duration) -> anyhow::Result<Vec<InputEvent>> {
    let mut out = Vec::new();

    // poll with a tiny timeout so we stay responsive
    let timeout = std::cmp::min(Duration::from_millis(1), max_frame_time);
    while event::poll(timeout)? {
        match event::read()? {
            Event::Key(k) if k.kind == KeyEventKind::Press => out.push(InputEvent::Key {
                key: k.code,
                mods: k.modifiers,
            }),
            Event::Mouse(m) if m.kind == MouseEventKind::Down(MouseButton::Left) => {
                out.push(InputEvent::Click {
                    col: m.column,
                    row: m.row,
                })
            }
            _ => {}
        }
        if out.len() >= 32 {
            break;
        }
    }
    Ok(out)
}

pub(crate) fn map_event_to_command(
    ev: &InputEvent,
    layout: &Layout,
    bindings: &KeyBindings,
) -> Option<Command> {
    match *ev {
        InputEvent::Click { col, row } => layout.button_at(col, row).map(Command::Press),
        InputEvent::Key { key, mods } => {
            if mods.contains(KeyModifiers::CONTROL) && matches!(key, KeyCode::Char('c')) {
                return Some(Command::Quit);
            }
            if mods.contains(KeyModifiers::ALT) && matches!(key, KeyCode::Char('p' | 'P')) {
                return Some(Command::ToggleVisibility);
            }
            match key {
                KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(Command::Quit),
                KeyCode::Char('v' | 'V') => Some(Command::ToggleVisibility),
                KeyCode::Char(ch) => bindings.role_for(ch).map(Command::Press),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key {
            key: code,
            mods: KeyModifiers::NONE,
        }
    }

    fn layout() -> Layout {
        Layout::for_size(80, 24)
    }

    fn map(ev: &InputEvent) -> Option<Command> {
        map_event_to_command(ev, &layout(), &KeyBindings::default())
    }

    #[test]
    fn test_hotkeys_map_to_buttons() {
        for role in ButtonRole::ALL {
            assert_eq!(
                map(&key(KeyCode::Char(role.hotkey()))),
                Some(Command::Press(role))
            );
        }
        assert_eq!(
            map(&key(KeyCode::Char('T'))),
            Some(Command::Press(ButtonRole::Treat))
        );
        assert_eq!(
            map(&key(KeyCode::Char('3'))),
            Some(Command::Press(ButtonRole::Love))
        );
    }

    #[test]
    fn test_global_keys() {
        assert_eq!(map(&key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(
            map(&InputEvent::Key {
                key: KeyCode::Char('c'),
                mods: KeyModifiers::CONTROL
            }),
            Some(Command::Quit)
        );
        assert_eq!(
            map(&InputEvent::Key {
                key: KeyCode::Char('p'),
                mods: KeyModifiers::ALT
            }),
            Some(Command::ToggleVisibility)
        );
        assert_eq!(map(&key(KeyCode::Char('x'))), None);
        assert_eq!(map(&key(KeyCode::Char('7'))), None);
        assert_eq!(map(&key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_clicks_hit_buttons() {
        let l = layout();
        let (x, y) = l.button_origin(ButtonRole::Sleep);
        assert_eq!(
            map(&InputEvent::Click { col: x + 1, row: y }),
            Some(Command::Press(ButtonRole::Sleep))
        );
        assert_eq!(map(&InputEvent::Click { col: 0, row: 0 }), None);
    }

    #[test]
    fn test_custom_bindings_skip_unknown_roles() {
        let mut overrides = BTreeMap::new();
        overrides.insert("x".to_string(), "treat".to_string());
        overrides.insert("y".to_string(), "tickle".to_string());
        overrides.insert("zz".to_string(), "food".to_string());
        let b = KeyBindings::with_overrides(&overrides);
        assert_eq!(b.role_for('X'), Some(ButtonRole::Treat));
        assert_eq!(b.role_for('y'), None);
        assert_eq!(b.role_for('z'), None);
        // defaults survive
        assert_eq!(b.role_for('f'), Some(ButtonRole::Food));
        assert_eq!(b.role_for('6'), Some(ButtonRole::Treat));
    }

    #[test]
    fn test_reserved_keys_beat_bindings() {
        let mut overrides = BTreeMap::new();
        overrides.insert("q".to_string(), "food".to_string());
        let b = KeyBindings::with_overrides(&overrides);
        assert_eq!(
            map_event_to_command(&key(KeyCode::Char('q')), &layout(), &b),
            Some(Command::Quit)
        );
    }
}

//! Input handling - translating terminal events

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::mirror::ScrollEvent;

/// Key modifier flags
pub mod key_flags {
    pub const CONTROL: u32 = 0x1000_0000;
    pub const META: u32 = 0x2000_0000;
    pub const SPEC: u32 = 0x8000_0000;
}

/// Codes for non-character keys (combined with `SPEC`)
pub mod special {
    pub const UP: u32 = 0x01;
    pub const DOWN: u32 = 0x02;
    pub const LEFT: u32 = 0x03;
    pub const RIGHT: u32 = 0x04;
    pub const HOME: u32 = 0x05;
    pub const END: u32 = 0x06;
    pub const PAGE_UP: u32 = 0x07;
    pub const PAGE_DOWN: u32 = 0x08;
    pub const DELETE: u32 = 0x09;
    pub const BACKSPACE: u32 = 0x0a;
    pub const ENTER: u32 = 0x0b;
    pub const TAB: u32 = 0x0c;
    pub const ESCAPE: u32 = 0x0d;
    /// F1 is `F_BASE + 1`
    pub const F_BASE: u32 = 0x40;
}

/// A key press with modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(pub u32);

impl Key {
    /// Create a key from a character
    pub fn char(ch: char) -> Self {
        Key(ch as u32)
    }

    /// Create a control key (C-x)
    pub fn ctrl(ch: char) -> Self {
        Key(key_flags::CONTROL | ch.to_ascii_lowercase() as u32)
    }

    /// Create a meta key (M-x)
    pub fn meta(ch: char) -> Self {
        Key(key_flags::META | ch.to_ascii_lowercase() as u32)
    }

    /// Create a special key
    pub fn special(code: u32) -> Self {
        Key(key_flags::SPEC | code)
    }

    /// Create a function key
    pub fn function(n: u8) -> Self {
        Key::special(special::F_BASE + n as u32)
    }

    /// Add the control modifier
    pub fn with_ctrl(self) -> Self {
        Key(self.0 | key_flags::CONTROL)
    }

    /// Get the raw key code
    pub fn code(&self) -> u32 {
        self.0
    }

    /// Check if this is a control key
    pub fn is_ctrl(&self) -> bool {
        self.0 & key_flags::CONTROL != 0
    }

    /// Check if this is a meta key
    pub fn is_meta(&self) -> bool {
        self.0 & key_flags::META != 0
    }

    /// Check if this is a special key
    pub fn is_special(&self) -> bool {
        self.0 & key_flags::SPEC != 0
    }

    /// The character typed, for printable unmodified keys
    pub fn self_insert(&self) -> Option<char> {
        if self.0 & 0xF000_0000 != 0 {
            return None;
        }
        char::from_u32(self.0).filter(|&ch| ch >= ' ' && ch != '\x7f')
    }

    /// Human-readable name (e.g. "C-f", "M-t", "F1")
    pub fn display_name(&self) -> String {
        let mut result = String::new();
        if self.is_meta() {
            result.push_str("M-");
        }
        if self.is_ctrl() {
            result.push_str("C-");
        }

        let base = self.0 & 0x00FF_FFFF;
        if self.is_special() {
            let name = match base {
                special::UP => "Up",
                special::DOWN => "Down",
                special::LEFT => "Left",
                special::RIGHT => "Right",
                special::HOME => "Home",
                special::END => "End",
                special::PAGE_UP => "PageUp",
                special::PAGE_DOWN => "PageDown",
                special::DELETE => "Delete",
                special::BACKSPACE => "Backspace",
                special::ENTER => "Enter",
                special::TAB => "Tab",
                special::ESCAPE => "Esc",
                n if n > special::F_BASE => return format!("{}F{}", result, n - special::F_BASE),
                n => return format!("{}special-0x{:02x}", result, n),
            };
            result.push_str(name);
        } else if base == 0x20 {
            result.push_str("SPC");
        } else if let Some(ch) = char::from_u32(base) {
            result.push(ch);
        }
        result
    }

    /// Parse a key name as written by `display_name` ("C-k", "M-t", "F1", "C-Home")
    pub fn parse(name: &str) -> Option<Self> {
        let mut rest = name;
        let mut flags = 0;
        loop {
            if let Some(r) = rest.strip_prefix("C-") {
                flags |= key_flags::CONTROL;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("M-") {
                flags |= key_flags::META;
                rest = r;
            } else {
                break;
            }
        }

        let base = match rest {
            "Up" => Key::special(special::UP),
            "Down" => Key::special(special::DOWN),
            "Left" => Key::special(special::LEFT),
            "Right" => Key::special(special::RIGHT),
            "Home" => Key::special(special::HOME),
            "End" => Key::special(special::END),
            "PageUp" => Key::special(special::PAGE_UP),
            "PageDown" => Key::special(special::PAGE_DOWN),
            "Delete" => Key::special(special::DELETE),
            "Backspace" => Key::special(special::BACKSPACE),
            "Enter" => Key::special(special::ENTER),
            "Tab" => Key::special(special::TAB),
            "Esc" => Key::special(special::ESCAPE),
            "SPC" => Key::char(' '),
            f if f.len() > 1 && f.starts_with('F') => Key::function(f[1..].parse().ok()?),
            other => {
                let mut chars = other.chars();
                let ch = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                if flags != 0 {
                    Key::char(ch.to_ascii_lowercase())
                } else {
                    Key::char(ch)
                }
            }
        };
        Some(Key(base.0 | flags))
    }
}

/// An input event the editor acts on
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(Key),
    /// Bracketed paste
    Paste(String),
    Scroll(ScrollEvent),
    /// Left click at a screen cell
    Click { row: u16, col: u16 },
    Resize { cols: u16, rows: u16 },
}

/// Translate a crossterm event; events the editor ignores map to None
pub fn translate_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => translate_key(key).map(InputEvent::Key),
        Event::Paste(text) => Some(InputEvent::Paste(text)),
        Event::Mouse(mouse) => translate_mouse(mouse),
        Event::Resize(cols, rows) => Some(InputEvent::Resize { cols, rows }),
        _ => None,
    }
}

fn translate_mouse(mouse: MouseEvent) -> Option<InputEvent> {
    // one wheel notch is 120 platform units
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(InputEvent::Scroll(ScrollEvent::Wheel { delta: 120 })),
        MouseEventKind::ScrollDown => Some(InputEvent::Scroll(ScrollEvent::Wheel { delta: -120 })),
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::Click {
            row: mouse.row,
            col: mouse.column,
        }),
        _ => None,
    }
}

/// Translate a key press
pub fn translate_key(event: KeyEvent) -> Option<Key> {
    let KeyEvent {
        code, modifiers, kind, ..
    } = event;

    // Only key presses; Windows also reports releases and repeats
    if kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let alt = modifiers.contains(KeyModifiers::ALT);

    let key = match code {
        KeyCode::Char(ch) => {
            if ctrl && alt {
                Key(key_flags::META | key_flags::CONTROL | ch.to_ascii_lowercase() as u32)
            } else if ctrl {
                Key::ctrl(ch)
            } else if alt {
                Key::meta(ch)
            } else {
                Key::char(ch)
            }
        }
        KeyCode::Enter => Key::special(special::ENTER),
        KeyCode::Tab => Key::special(special::TAB),
        KeyCode::Backspace => Key::special(special::BACKSPACE),
        KeyCode::Delete => Key::special(special::DELETE),
        KeyCode::Home => Key::special(special::HOME),
        KeyCode::End => Key::special(special::END),
        KeyCode::PageUp => Key::special(special::PAGE_UP),
        KeyCode::PageDown => Key::special(special::PAGE_DOWN),
        KeyCode::Up => Key::special(special::UP),
        KeyCode::Down => Key::special(special::DOWN),
        KeyCode::Left => Key::special(special::LEFT),
        KeyCode::Right => Key::special(special::RIGHT),
        KeyCode::Esc => Key::special(special::ESCAPE),
        KeyCode::F(n) => Key::function(n),
        _ => return None,
    };

    if ctrl && !matches!(code, KeyCode::Char(_)) {
        return Some(key.with_ctrl());
    }
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_translate_chars() {
        assert_eq!(translate_key(press(KeyCode::Char('a'), KeyModifiers::NONE)), Some(Key::char('a')));
        assert_eq!(translate_key(press(KeyCode::Char('S'), KeyModifiers::CONTROL)), Some(Key::ctrl('s')));
        assert_eq!(translate_key(press(KeyCode::Char('t'), KeyModifiers::ALT)), Some(Key::meta('t')));
    }

    #[test]
    fn test_translate_special() {
        assert_eq!(
            translate_key(press(KeyCode::Home, KeyModifiers::CONTROL)),
            Some(Key::special(special::HOME).with_ctrl())
        );
        assert_eq!(translate_key(press(KeyCode::F(1), KeyModifiers::NONE)), Some(Key::function(1)));
    }

    #[test]
    fn test_release_ignored() {
        let mut event = press(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(translate_key(event), None);
    }

    #[test]
    fn test_self_insert() {
        assert_eq!(Key::char('x').self_insert(), Some('x'));
        assert_eq!(Key::char('é').self_insert(), Some('é'));
        assert_eq!(Key::ctrl('x').self_insert(), None);
        assert_eq!(Key::special(special::ENTER).self_insert(), None);
        assert_eq!(Key::char('\x07').self_insert(), None);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Key::ctrl('f').display_name(), "C-f");
        assert_eq!(Key::meta('l').display_name(), "M-l");
        assert_eq!(Key::function(1).display_name(), "F1");
        assert_eq!(Key::special(special::HOME).with_ctrl().display_name(), "C-Home");
    }

    #[test]
    fn test_parse_names() {
        for key in [
            Key::ctrl('k'),
            Key::meta('t'),
            Key::function(12),
            Key::special(special::END).with_ctrl(),
            Key::char('q'),
        ] {
            assert_eq!(Key::parse(&key.display_name()), Some(key));
        }
        assert_eq!(Key::parse("C-X"), Some(Key::ctrl('x')));
        assert_eq!(Key::parse("Hyper-x"), None);
        assert_eq!(Key::parse("Fx"), None);
        assert_eq!(Key::parse(""), None);
    }

    #[test]
    fn test_translate_events() {
        assert_eq!(
            translate_event(Event::Paste("x\ny".into())),
            Some(InputEvent::Paste("x\ny".into()))
        );
        assert_eq!(
            translate_event(Event::Resize(80, 24)),
            Some(InputEvent::Resize { cols: 80, rows: 24 })
        );
        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(
            translate_event(Event::Mouse(wheel)),
            Some(InputEvent::Scroll(ScrollEvent::Wheel { delta: -120 }))
        );
    }
}

use std::str::FromStr;

/// Events delivered to listeners on the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Key pressed while `target` (if any) held focus.
    KeyDown(KeyEvent),
    /// `target` gained focus; `related` is the element that lost it.
    FocusIn {
        target: String,
        related: Option<String>,
    },
    /// `target` lost focus; `related` is the element receiving it.
    FocusOut {
        target: String,
        related: Option<String>,
    },
}

impl DomEvent {
    /// The element the event was dispatched to.
    pub fn target(&self) -> Option<&str> {
        match self {
            DomEvent::KeyDown(event) => event.target.as_deref(),
            DomEvent::FocusIn { target, .. } | DomEvent::FocusOut { target, .. } => Some(target),
        }
    }
}

/// A key press with its modifiers and target element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub target: Option<String>,
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            target: None,
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn on(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
    Unidentified,
}

impl Key {
    pub const SPACE: Key = Key::Char(' ');
}

/// Error returned when a key name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError(pub String);

impl std::fmt::Display for ParseKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key name: {}", self.0)
    }
}

impl std::error::Error for ParseKeyError {}

impl FromStr for Key {
    type Err = ParseKeyError;

    /// Accepts both DOM names (`ArrowDown`) and short names (`down`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.to_ascii_lowercase().as_str() {
            "arrowdown" | "down" => Key::Down,
            "arrowup" | "up" => Key::Up,
            "arrowleft" | "left" => Key::Left,
            "arrowright" | "right" => Key::Right,
            "home" => Key::Home,
            "end" => Key::End,
            "pagedown" | "pgdn" => Key::PageDown,
            "pageup" | "pgup" => Key::PageUp,
            "space" | " " => Key::SPACE,
            "enter" | "return" => Key::Enter,
            "escape" | "esc" => Key::Escape,
            "tab" => Key::Tab,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "insert" => Key::Insert,
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return Err(ParseKeyError(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Tab => Key::Tab,
            KeyCode::BackTab => Key::BackTab,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::F(n) => Key::F(n),
            _ => Key::Unidentified,
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            // Command on macOS terminals arrives as SUPER
            ctrl: mods.contains(KeyModifiers::CONTROL) || mods.contains(KeyModifiers::SUPER),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        Self {
            target: None,
            key: event.code.into(),
            modifiers: event.modifiers.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_parse_dom_and_short_names() {
        assert_eq!("ArrowDown".parse::<Key>(), Ok(Key::Down));
        assert_eq!("pgup".parse::<Key>(), Ok(Key::PageUp));
        assert_eq!("Space".parse::<Key>(), Ok(Key::SPACE));
        assert_eq!("Esc".parse::<Key>(), Ok(Key::Escape));
        assert_eq!("x".parse::<Key>(), Ok(Key::Char('x')));
        assert_eq!("A".parse::<Key>(), Ok(Key::Char('A')));
        assert!("Hyper".parse::<Key>().is_err());
    }

    #[test]
    fn test_crossterm_conversion() {
        let event = crossterm::event::KeyEvent::new(KeyCode::PageDown, KeyModifiers::CONTROL);
        let converted = KeyEvent::from(event);
        assert_eq!(converted.key, Key::PageDown);
        assert!(converted.modifiers.ctrl);
        assert_eq!(Key::from(KeyCode::Null), Key::Unidentified);
    }
}

//! Key bindings.
//!
//! Widgets in this crate only react to keys pressed without Ctrl, Alt,
//! Shift or Meta unless a binding asks for a modifier explicitly, so a
//! binding matches when the modifiers are exactly the ones it names.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// One or more key combinations mapped to a described action.
#[derive(Debug, Clone)]
pub struct Binding {
    pub keys: Vec<KeyCombination>,
    pub description: String,
    /// Disabled bindings never match.
    pub enabled: bool,
}

/// A key plus the exact set of modifiers that must be held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Binding {
    pub fn new(key: KeyCombination, description: impl Into<String>) -> Self {
        Self::with_keys(vec![key], description)
    }

    pub fn with_keys(keys: Vec<KeyCombination>, description: impl Into<String>) -> Self {
        Self {
            keys,
            description: description.into(),
            enabled: true,
        }
    }

    /// Whether `event` is a press (or repeat) of one of the combinations.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.enabled
            && event.kind != KeyEventKind::Release
            && self
                .keys
                .iter()
                .any(|k| k.code == event.code && k.modifiers == event.modifiers)
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl KeyCombination {
    /// No modifiers.
    pub fn new(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::CONTROL)
    }

    pub fn alt(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::ALT)
    }

    pub fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }
}

/// Whether any of Ctrl, Alt, Shift, Super, Hyper or Meta is held.
pub fn has_modifier(event: &KeyEvent) -> bool {
    !event.modifiers.is_empty()
}

/// Printable character typed without Ctrl/Alt. Shift is allowed because
/// it is how uppercase letters arrive.
pub fn typed_char(event: &KeyEvent) -> Option<char> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    match event.code {
        KeyCode::Char(c)
            if !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
        {
            Some(c)
        }
        _ => None,
    }
}

/// Keys driving an expanded [`Select`](crate::select::Select).
#[derive(Debug, Clone)]
pub struct SelectKeyMap {
    pub previous: Binding,
    pub next: Binding,
    pub close: Binding,
    pub confirm: Binding,
    /// Commits when the list is open without autocomplete, opens it otherwise.
    pub space: Binding,
    pub leave: Binding,
    pub erase: Binding,
}

impl Default for SelectKeyMap {
    fn default() -> Self {
        Self {
            previous: Binding::new(KeyCombination::new(KeyCode::Up), "previous option"),
            next: Binding::new(KeyCombination::new(KeyCode::Down), "next option"),
            close: Binding::new(KeyCombination::new(KeyCode::Esc), "close"),
            confirm: Binding::new(KeyCombination::new(KeyCode::Enter), "choose"),
            space: Binding::new(KeyCombination::new(KeyCode::Char(' ')), "open / choose"),
            leave: Binding::new(KeyCombination::new(KeyCode::Tab), "next field"),
            erase: Binding::new(KeyCombination::new(KeyCode::Backspace), "erase filter"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn modifiers_must_match_exactly() {
        let up = Binding::new(KeyCombination::new(KeyCode::Up), "up");
        assert!(up.matches(&event(KeyCode::Up, KeyModifiers::NONE)));
        assert!(!up.matches(&event(KeyCode::Up, KeyModifiers::SHIFT)));
        assert!(!up.matches(&event(KeyCode::Up, KeyModifiers::CONTROL)));

        let submit = Binding::new(KeyCombination::ctrl(KeyCode::Enter), "submit");
        assert!(submit.matches(&event(KeyCode::Enter, KeyModifiers::CONTROL)));
        assert!(!submit.matches(&event(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn release_never_matches() {
        let enter = Binding::new(KeyCombination::new(KeyCode::Enter), "enter");
        let mut ev = event(KeyCode::Enter, KeyModifiers::NONE);
        ev.kind = KeyEventKind::Release;
        assert!(!enter.matches(&ev));
    }

    #[test]
    fn disabled_binding() {
        let b = Binding::new(KeyCombination::new(KeyCode::Esc), "close").enabled(false);
        assert!(!b.matches(&event(KeyCode::Esc, KeyModifiers::NONE)));
    }

    #[test]
    fn typed_char_allows_shift_only() {
        assert_eq!(typed_char(&event(KeyCode::Char('A'), KeyModifiers::SHIFT)), Some('A'));
        assert_eq!(typed_char(&event(KeyCode::Char('a'), KeyModifiers::CONTROL)), None);
        assert_eq!(typed_char(&event(KeyCode::Enter, KeyModifiers::NONE)), None);
    }

    #[test]
    fn has_modifier_detects_any() {
        assert!(!has_modifier(&event(KeyCode::Up, KeyModifiers::NONE)));
        assert!(has_modifier(&event(KeyCode::Up, KeyModifiers::META)));
    }
}

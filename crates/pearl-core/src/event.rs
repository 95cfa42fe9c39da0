use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};

/// Terminal events produced by the runtime's event loop.
///
/// Delivered through the [`terminal_events`](crate::subscriptions::terminal_events)
/// subscription, which maps each event into the application's message type.
/// Left-button presses are additionally published on the
/// [`ClickBus`](crate::pointer::ClickBus) so widgets can detect clicks that
/// land outside them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Terminal window gained focus.
    FocusGained,
    /// Terminal window lost focus.
    FocusLost,
    /// Bracketed paste content.
    Paste(String),
}

impl TerminalEvent {
    /// The primary-button press carried by this event, if any.
    pub fn click(&self) -> Option<Click> {
        match self {
            TerminalEvent::Mouse(m) => Click::from_mouse(m),
            _ => None,
        }
    }
}

impl From<crossterm::event::Event> for TerminalEvent {
    fn from(event: crossterm::event::Event) -> Self {
        match event {
            crossterm::event::Event::Key(k) => TerminalEvent::Key(k),
            crossterm::event::Event::Mouse(m) => TerminalEvent::Mouse(m),
            crossterm::event::Event::Resize(w, h) => TerminalEvent::Resize(w, h),
            crossterm::event::Event::FocusGained => TerminalEvent::FocusGained,
            crossterm::event::Event::FocusLost => TerminalEvent::FocusLost,
            crossterm::event::Event::Paste(s) => TerminalEvent::Paste(s),
        }
    }
}

/// A primary-button press at a screen cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Click {
    pub column: u16,
    pub row: u16,
}

impl Click {
    pub fn new(column: u16, row: u16) -> Self {
        Self { column, row }
    }

    /// Convert a crossterm mouse event; only left-button presses count.
    pub fn from_mouse(event: &MouseEvent) -> Option<Self> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Self::new(event.column, event.row)),
            _ => None,
        }
    }

    /// Whether the click landed inside `area`.
    pub fn within(&self, area: ratatui::layout::Rect) -> bool {
        area.contains(ratatui::layout::Position::new(self.column, self.row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn only_left_press_is_a_click() {
        let down = mouse(MouseEventKind::Down(MouseButton::Left), 3, 4);
        assert_eq!(Click::from_mouse(&down), Some(Click::new(3, 4)));

        let up = mouse(MouseEventKind::Up(MouseButton::Left), 3, 4);
        assert_eq!(Click::from_mouse(&up), None);

        let right = mouse(MouseEventKind::Down(MouseButton::Right), 3, 4);
        assert_eq!(Click::from_mouse(&right), None);
    }

    #[test]
    fn within_uses_half_open_bounds() {
        let area = Rect::new(2, 2, 4, 2);
        assert!(Click::new(2, 2).within(area));
        assert!(Click::new(5, 3).within(area));
        assert!(!Click::new(6, 3).within(area));
        assert!(!Click::new(5, 4).within(area));
    }

    #[test]
    fn terminal_event_click() {
        let ev = TerminalEvent::Mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        assert_eq!(ev.click(), Some(Click::new(1, 1)));
        assert_eq!(TerminalEvent::FocusLost.click(), None);
    }
}

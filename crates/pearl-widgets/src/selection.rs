//! Cursor and scroll window over a list that may be empty.
//!
//! The cursor never wraps: moving past either end leaves it where it is.
//! An empty list has no cursor at all.

/// Cursor position and scroll offset for `count` items of which `visible`
/// fit on screen.
#[derive(Debug, Clone)]
pub struct SelectionState {
    cursor: Option<usize>,
    offset: usize,
    count: usize,
    visible: usize,
}

impl SelectionState {
    pub fn new(count: usize, visible: usize) -> Self {
        Self {
            cursor: None,
            offset: 0,
            count,
            visible,
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }
    pub fn offset(&self) -> usize {
        self.offset
    }
    pub fn count(&self) -> usize {
        self.count
    }
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Range of item indices currently in the scroll window.
    pub fn window(&self) -> std::ops::Range<usize> {
        let end = (self.offset + self.visible).min(self.count);
        self.offset.min(end)..end
    }

    /// Change the item count, keeping the cursor on a valid item.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        self.cursor = match self.cursor {
            _ if count == 0 => None,
            Some(c) if c >= count => Some(count - 1),
            other => other,
        };
        self.offset = self.offset.min(count.saturating_sub(self.visible));
        self.ensure_visible();
    }

    /// Move to the previous item. No-op at the first item or without a cursor.
    pub fn move_up(&mut self) -> bool {
        match self.cursor {
            Some(c) if c > 0 => {
                self.cursor = Some(c - 1);
                self.ensure_visible();
                true
            }
            _ => false,
        }
    }

    /// Move to the next item. No-op at the last item or without a cursor.
    pub fn move_down(&mut self) -> bool {
        match self.cursor {
            Some(c) if c + 1 < self.count => {
                self.cursor = Some(c + 1);
                self.ensure_visible();
                true
            }
            _ => false,
        }
    }

    /// Put the cursor on `index`, clamped to the last item.
    pub fn select(&mut self, index: usize) {
        if self.count == 0 {
            self.cursor = None;
            return;
        }
        self.cursor = Some(index.min(self.count - 1));
        self.ensure_visible();
    }

    pub fn clear(&mut self) {
        self.cursor = None;
        self.offset = 0;
    }

    fn ensure_visible(&mut self) {
        let Some(cursor) = self.cursor else {
            return;
        };
        if self.visible == 0 {
            return;
        }
        if cursor < self.offset {
            self.offset = cursor;
        } else if cursor >= self.offset + self.visible {
            self.offset = cursor + 1 - self.visible;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_cursor() {
        let s = SelectionState::new(5, 3);
        assert_eq!(s.cursor(), None);
        assert_eq!(s.window(), 0..3);
    }

    #[test]
    fn move_down_stops_at_last() {
        let mut s = SelectionState::new(3, 10);
        s.select(0);
        assert!(s.move_down());
        assert!(s.move_down());
        assert!(!s.move_down());
        assert!(!s.move_down());
        assert_eq!(s.cursor(), Some(2));
    }

    #[test]
    fn move_up_stops_at_first() {
        let mut s = SelectionState::new(3, 10);
        s.select(1);
        assert!(s.move_up());
        assert!(!s.move_up());
        assert_eq!(s.cursor(), Some(0));
    }

    #[test]
    fn down_then_up_is_identity_inside() {
        for start in 1..4 {
            let mut s = SelectionState::new(5, 2);
            s.select(start);
            s.move_down();
            s.move_up();
            assert_eq!(s.cursor(), Some(start));
        }
    }

    #[test]
    fn empty_list_has_no_cursor() {
        let mut s = SelectionState::new(0, 5);
        s.select(3);
        assert_eq!(s.cursor(), None);
        assert!(!s.move_down());
        assert!(!s.move_up());
    }

    #[test]
    fn window_follows_cursor() {
        let mut s = SelectionState::new(10, 3);
        s.select(0);
        s.move_down();
        s.move_down();
        assert_eq!(s.window(), 0..3);
        s.move_down();
        assert_eq!(s.window(), 1..4);
        s.select(9);
        assert_eq!(s.window(), 7..10);
        s.select(2);
        assert_eq!(s.window(), 2..5);
    }

    #[test]
    fn set_count_clamps_cursor_and_offset() {
        let mut s = SelectionState::new(10, 3);
        s.select(8);
        s.set_count(4);
        assert_eq!(s.cursor(), Some(3));
        assert_eq!(s.window(), 1..4);
        s.set_count(0);
        assert_eq!(s.cursor(), None);
        assert_eq!(s.window(), 0..0);
    }
}

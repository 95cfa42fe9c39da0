//! Overlay placement and rendering.
//!
//! Dropdown lists are anchored to their trigger, dialogs are centered. Both
//! clear what is underneath before drawing.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Clear};
use ratatui::Frame;

/// Which trigger edge an anchored overlay lines up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// Place a `width` × `height` overlay next to `anchor`, inside `bounds`.
///
/// The overlay opens below the anchor, or above it when `upward` is set.
/// When there is not enough room on the requested side the height is cut
/// to what fits; the overlay never covers the anchor itself.
pub fn anchored_rect(
    anchor: Rect,
    width: u16,
    height: u16,
    align: Align,
    upward: bool,
    bounds: Rect,
) -> Rect {
    let width = width.min(bounds.width);
    let x = match align {
        Align::Left => anchor.x,
        Align::Right => anchor.right().saturating_sub(width),
    };
    let x = x.clamp(bounds.x, bounds.right().saturating_sub(width));

    if upward {
        let room = anchor.y.saturating_sub(bounds.y);
        let h = height.min(room);
        Rect::new(x, anchor.y - h, width, h)
    } else {
        let top = anchor.bottom().min(bounds.bottom());
        let room = bounds.bottom() - top;
        Rect::new(x, top, width, height.min(room))
    }
}

/// A centered sub-rect using percentage dimensions.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let v_margin = ((100u16.saturating_sub(percent_y)) / 2).max(1);
    let h_margin = ((100u16.saturating_sub(percent_x)) / 2).max(1);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(v_margin),
            Constraint::Percentage(percent_y),
            Constraint::Percentage(v_margin),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(h_margin),
            Constraint::Percentage(percent_x),
            Constraint::Percentage(h_margin),
        ])
        .split(vertical[1]);
    horizontal[1]
}

/// A centered sub-rect with fixed dimensions, clamped to `area`.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

/// Clear `area`, draw `block` if given, and return the inner area.
pub fn render_overlay(frame: &mut Frame, area: Rect, block: Option<&Block>) -> Rect {
    frame.render_widget(Clear, area);
    if let Some(block) = block {
        let inner = block.inner(area);
        frame.render_widget(block.clone(), area);
        inner
    } else {
        area
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    #[test]
    fn below_left_aligned() {
        let anchor = Rect::new(10, 5, 20, 1);
        let r = anchored_rect(anchor, 30, 8, Align::Left, false, SCREEN);
        assert_eq!(r, Rect::new(10, 6, 30, 8));
    }

    #[test]
    fn right_aligned_ends_with_anchor() {
        let anchor = Rect::new(40, 5, 20, 1);
        let r = anchored_rect(anchor, 30, 4, Align::Right, false, SCREEN);
        assert_eq!(r.right(), anchor.right());
        assert_eq!(r.x, 30);
    }

    #[test]
    fn upward_sits_above_anchor() {
        let anchor = Rect::new(0, 10, 20, 1);
        let r = anchored_rect(anchor, 20, 4, Align::Left, true, SCREEN);
        assert_eq!(r, Rect::new(0, 6, 20, 4));
    }

    #[test]
    fn height_cut_to_available_room() {
        let anchor = Rect::new(0, 20, 20, 1);
        let r = anchored_rect(anchor, 20, 10, Align::Left, false, SCREEN);
        assert_eq!(r.height, 3);
        let r = anchored_rect(Rect::new(0, 2, 20, 1), 20, 10, Align::Left, true, SCREEN);
        assert_eq!(r, Rect::new(0, 0, 20, 2));
    }

    #[test]
    fn clamped_inside_bounds_horizontally() {
        let anchor = Rect::new(70, 0, 10, 1);
        let r = anchored_rect(anchor, 30, 3, Align::Left, false, SCREEN);
        assert_eq!(r.right(), 80);
    }

    #[test]
    fn centered_fixed_basic() {
        let area = Rect::new(10, 5, 80, 40);
        let result = centered_fixed(40, 20, area);
        assert_eq!(result, Rect::new(30, 15, 40, 20));
    }

    #[test]
    fn centered_fixed_clamps_to_area() {
        let result = centered_fixed(100, 50, Rect::new(0, 0, 20, 10));
        assert_eq!(result, Rect::new(0, 0, 20, 10));
    }
}

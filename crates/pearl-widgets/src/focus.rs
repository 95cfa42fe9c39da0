//! Focus helpers: cycling focus between form fields, and the select's
//! rule for where focus goes after it opens or closes.

/// Routes keyboard input to one of `N` focusable slots.
pub struct FocusGroup<const N: usize> {
    focused: usize,
}

impl<const N: usize> FocusGroup<N> {
    pub fn new() -> Self {
        Self { focused: 0 }
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Move focus to the next slot, wrapping around after the last.
    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % N;
    }

    /// Move focus to the previous slot, wrapping around before the first.
    pub fn focus_prev(&mut self) {
        self.focused = (self.focused + N - 1) % N;
    }

    /// Focus the given slot, clamped to the valid range.
    pub fn focus(&mut self, index: usize) {
        self.focused = index.min(N - 1);
    }

    pub fn is_focused(&self, index: usize) -> bool {
        self.focused == index
    }
}

impl<const N: usize> Default for FocusGroup<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// The part of a select that holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// The text field shown in autocomplete mode while open.
    FilterInput,
    /// The open option list.
    OptionList,
    /// The collapsed trigger.
    Toggle,
}

/// Why a select changed its expansion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Expanded,
    /// Closed by clicking (or toggling) the trigger again.
    ClosedFromTrigger,
    Committed,
    Escaped,
    OutsideClick,
    TabbedAway,
}

/// Where focus should be moved after `transition`, if anywhere.
///
/// Opening without autocomplete needs no transfer: the list is reachable
/// from the trigger that already has focus. Tabbing away leaves focus to
/// the parent's own field cycling.
pub fn focus_after(transition: Transition, autocomplete: bool) -> Option<FocusTarget> {
    match transition {
        Transition::Expanded if autocomplete => Some(FocusTarget::FilterInput),
        Transition::Expanded => None,
        Transition::ClosedFromTrigger | Transition::Committed | Transition::Escaped => {
            Some(FocusTarget::Toggle)
        }
        Transition::OutsideClick | Transition::TabbedAway => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_wraps_both_ways() {
        let mut fg = FocusGroup::<3>::new();
        fg.focus_prev();
        assert_eq!(fg.focused(), 2);
        fg.focus_next();
        assert!(fg.is_focused(0));
        fg.focus(10);
        assert_eq!(fg.focused(), 2);
    }

    #[test]
    fn focus_rules() {
        assert_eq!(focus_after(Transition::Expanded, true), Some(FocusTarget::FilterInput));
        assert_eq!(focus_after(Transition::Expanded, false), None);
        for autocomplete in [true, false] {
            assert_eq!(focus_after(Transition::Committed, autocomplete), Some(FocusTarget::Toggle));
            assert_eq!(
                focus_after(Transition::ClosedFromTrigger, autocomplete),
                Some(FocusTarget::Toggle)
            );
            assert_eq!(focus_after(Transition::Escaped, autocomplete), Some(FocusTarget::Toggle));
            assert_eq!(focus_after(Transition::OutsideClick, autocomplete), None);
            assert_eq!(focus_after(Transition::TabbedAway, autocomplete), None);
        }
    }
}

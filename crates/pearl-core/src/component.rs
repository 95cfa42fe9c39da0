use crate::command::Command;
use crate::subscription::Subscription;
use ratatui::{layout::Rect, Frame};

/// A reusable sub-model that renders into a given [`Rect`].
///
/// Like [`Model`](crate::Model), but [`view`](Component::view) receives the
/// area chosen by the parent. A parent wraps the component's messages in one
/// of its own variants and lifts commands and subscriptions with `map`:
///
/// ```rust,ignore
/// Msg::Country(m) => self.country.update(m).map(Msg::Country),
/// // ...
/// subs.extend(self.country.subscriptions().into_iter().map(|s| s.map(Msg::Country)));
/// ```
///
/// Components that draw overlays outside `area` (dropdown lists, modals)
/// are rendered last by the parent so they sit on top.
pub trait Component: Send + 'static {
    type Message: Send + 'static;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render into `area` of the frame.
    fn view(&self, frame: &mut Frame, area: Rect);

    /// Subscriptions this component needs right now. The parent collects
    /// them into its own [`Model::subscriptions`](crate::Model::subscriptions).
    fn subscriptions(&self) -> Vec<Subscription<Self::Message>> {
        vec![]
    }

    /// Whether this component currently has keyboard focus. Parents use it
    /// to route key events.
    fn focused(&self) -> bool {
        false
    }
}

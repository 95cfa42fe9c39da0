//! Busy indicator: a spinning ring with an optional caption.

use pearl_core::pointer::next_listener_id;
use pearl_core::subscription::subscribe;
use pearl_core::subscriptions::Every;
use pearl_core::{Command, Component, Subscription};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::Duration;

/// Quarter-circle frames that read as a rotating ring.
pub const RING: &[&str] = &["◜", "◠", "◝", "◞", "◡", "◟"];

/// Messages for the activity indicator.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Advance to the next frame.
    Frame,
}

/// A ring that spins while shown and renders nothing while stopped.
pub struct ActivityIndicator {
    frames: &'static [&'static str],
    index: usize,
    caption: Option<String>,
    style: Style,
    caption_style: Style,
    interval: Duration,
    shown: bool,
    instance: u64,
}

impl ActivityIndicator {
    /// A stopped indicator using [`RING`] at 80 ms per frame.
    pub fn new() -> Self {
        Self {
            frames: RING,
            index: 0,
            caption: None,
            style: Style::default().fg(Color::Cyan),
            caption_style: Style::default().fg(Color::Gray),
            interval: Duration::from_millis(80),
            shown: false,
            instance: next_listener_id(),
        }
    }

    pub fn with_frames(mut self, frames: &'static [&'static str]) -> Self {
        self.frames = frames;
        self.index = 0;
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn start(&mut self) {
        if !self.shown {
            tracing::debug!(instance = self.instance, "activity started");
        }
        self.shown = true;
    }

    /// Stop and rewind to the first frame.
    pub fn stop(&mut self) {
        if self.shown {
            tracing::debug!(instance = self.instance, "activity stopped");
        }
        self.shown = false;
        self.index = 0;
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn current_frame(&self) -> Option<&'static str> {
        self.frames.get(self.index).copied()
    }
}

impl Default for ActivityIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ActivityIndicator {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Frame => {
                if self.shown && !self.frames.is_empty() {
                    self.index = (self.index + 1) % self.frames.len();
                }
                Command::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if !self.shown || area.is_empty() {
            return;
        }
        let Some(glyph) = self.current_frame() else {
            return;
        };
        let mut spans = vec![Span::styled(glyph, self.style)];
        if let Some(caption) = &self.caption {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(caption.as_str(), self.caption_style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if !self.shown {
            return vec![];
        }
        vec![subscribe(Every::for_instance(self.interval, self.instance)).map(|_| Message::Frame)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pearl_core::testing::TestComponent;

    #[test]
    fn stopped_renders_nothing_and_has_no_timer() {
        let t = TestComponent::new(ActivityIndicator::new().with_caption("Loading"));
        assert_eq!(t.render_string(12, 1).trim(), "");
        assert!(t.component().subscriptions().is_empty());
    }

    #[test]
    fn frames_advance_and_wrap_while_shown() {
        let mut indicator = ActivityIndicator::new();
        indicator.start();
        let mut t = TestComponent::new(indicator);
        assert_eq!(t.component().current_frame(), Some("◜"));
        for _ in 0..RING.len() - 1 {
            t.dispatch(Message::Frame);
        }
        assert_eq!(t.component().current_frame(), Some("◟"));
        t.dispatch(Message::Frame);
        assert_eq!(t.component().current_frame(), Some("◜"));
        assert_eq!(t.component().subscriptions().len(), 1);
    }

    #[test]
    fn frames_ignored_while_stopped() {
        let mut t = TestComponent::new(ActivityIndicator::new());
        t.dispatch(Message::Frame);
        assert_eq!(t.component().current_frame(), Some("◜"));
    }

    #[test]
    fn renders_glyph_and_caption() {
        let mut indicator = ActivityIndicator::new().with_caption("Saving");
        indicator.start();
        let t = TestComponent::new(indicator);
        assert_eq!(t.render_string(10, 1), "◜ Saving  ");
    }

    #[test]
    fn stop_rewinds() {
        let mut indicator = ActivityIndicator::new();
        indicator.start();
        indicator.update(Message::Frame);
        indicator.stop();
        assert!(!indicator.is_shown());
        assert_eq!(indicator.current_frame(), Some("◜"));
    }

    #[test]
    fn instances_use_distinct_timers() {
        let mut a = ActivityIndicator::new();
        let mut b = ActivityIndicator::new();
        a.start();
        b.start();
        let (sa, sb) = (a.subscriptions(), b.subscriptions());
        assert_ne!(sa[0].id(), sb[0].id());
    }
}

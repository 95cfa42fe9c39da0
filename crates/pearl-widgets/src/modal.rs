//! Modal dialog with a caller-controlled open flag.
//!
//! The modal never closes itself. Esc, an outside click, the close glyph or
//! the cancel button all end in [`Message::CloseRequested`]; the caller
//! decides and calls [`Modal::close`]. While the caller marks the modal
//! busy, close requests are refused and the dialog flashes a "busy"
//! indication instead.
//!
//! ```rust,ignore
//! let mut dialog = Modal::new("Delete account")
//!     .body("This cannot be undone.")
//!     .action(Action::new("Delete").with_shortcut('d'))
//!     .with_cancel_label("Cancel");
//! let cmd = dialog.open();
//! ```

use crate::overlay::{centered_fixed, centered_rect, render_overlay};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pearl_core::event::Click;
use pearl_core::pointer;
use pearl_core::{Command, Component, Subscription};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;
use std::cell::Cell;
use std::time::Duration;

/// A button in the dialog's action row.
#[derive(Debug, Clone)]
pub struct Action {
    pub label: String,
    /// Pressing this key selects the action.
    pub shortcut: Option<char>,
}

impl Action {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            shortcut: None,
        }
    }

    pub fn with_shortcut(mut self, key: char) -> Self {
        self.shortcut = Some(key.to_ascii_lowercase());
        self
    }
}

/// Messages for the modal.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Key(KeyEvent),
    /// A click anywhere, from the click bus, while open.
    Pointer(Click),

    /// Internal: the close timeout of the close with this generation ran out.
    CloseElapsed { generation: u64 },
    /// Internal: the busy indication with this generation is over.
    IndicationElapsed { generation: u64 },

    /// Emitted: the user asked to close; call [`Modal::close`] to agree.
    CloseRequested,
    /// Emitted: an action button was chosen.
    Selected(usize),
    /// Emitted by [`Modal::open`].
    AfterOpen,
    /// Emitted once the close timeout has passed.
    AfterClose,
    /// Emitted before `AfterClose` when the modal resets on close.
    Reset,
}

#[derive(Debug, Clone)]
pub struct ModalStyle {
    pub border: Style,
    pub busy_border: Style,
    pub title: Style,
    pub body: Style,
    pub action: Style,
    pub focused_action: Style,
}

impl Default for ModalStyle {
    fn default() -> Self {
        Self {
            border: Style::default().fg(Color::Cyan),
            busy_border: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            title: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            body: Style::default(),
            action: Style::default().fg(Color::DarkGray),
            focused_action: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Size {
    Percent(u16, u16),
    Fixed(u16, u16),
    Fullscreen,
}

/// A centered dialog overlay.
pub struct Modal {
    title: String,
    body: Vec<Line<'static>>,
    actions: Vec<Action>,
    cancel_label: Option<String>,
    close_button: Option<String>,
    focused_action: usize,
    style: ModalStyle,
    size: Size,
    close_timeout: Duration,
    busy_indication: Duration,
    reset_on_close: bool,

    open: bool,
    busy: bool,
    indicating_busy: bool,
    generation: u64,
    listener: u64,
    area: Cell<Rect>,
    close_glyph: Cell<Rect>,
}

impl Modal {
    /// A closed modal with a 150 ms close timeout.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: Vec::new(),
            actions: Vec::new(),
            cancel_label: None,
            close_button: None,
            focused_action: 0,
            style: ModalStyle::default(),
            size: Size::Percent(50, 40),
            close_timeout: Duration::from_millis(150),
            busy_indication: Duration::from_millis(1500),
            reset_on_close: false,
            open: false,
            busy: false,
            indicating_busy: false,
            generation: 0,
            listener: pointer::next_listener_id(),
            area: Cell::new(Rect::default()),
            close_glyph: Cell::new(Rect::default()),
        }
    }

    pub fn body(mut self, text: impl Into<String>) -> Self {
        self.body = text.into().lines().map(|l| Line::raw(l.to_string())).collect();
        self
    }

    pub fn body_lines(mut self, lines: Vec<Line<'static>>) -> Self {
        self.body = lines;
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Add a cancel button. With one present an outside click no longer
    /// asks to close; Esc still does.
    pub fn with_cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = Some(label.into());
        self
    }

    /// Show `glyph` (e.g. "✕") in the title bar as a close button.
    pub fn with_close_button(mut self, glyph: impl Into<String>) -> Self {
        self.close_button = Some(glyph.into());
        self
    }

    pub fn with_style(mut self, style: ModalStyle) -> Self {
        self.style = style;
        self
    }

    /// Size as a percentage of the screen.
    pub fn with_size(mut self, width_percent: u16, height_percent: u16) -> Self {
        self.size = Size::Percent(width_percent.min(100), height_percent.min(100));
        self
    }

    pub fn with_fixed_size(mut self, width: u16, height: u16) -> Self {
        self.size = Size::Fixed(width, height);
        self
    }

    /// Fill the whole area instead of floating in the middle.
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        if fullscreen {
            self.size = Size::Fullscreen;
        }
        self
    }

    pub fn with_close_timeout(mut self, timeout: Duration) -> Self {
        self.close_timeout = timeout;
        self
    }

    /// How long the busy indication is shown (plus a tenth).
    pub fn with_busy_indication(mut self, duration: Duration) -> Self {
        self.busy_indication = duration;
        self
    }

    /// Emit [`Message::Reset`] after closing, e.g. to clear a form.
    pub fn with_reset(mut self, reset: bool) -> Self {
        self.reset_on_close = reset;
        self
    }

    /// Show the dialog.
    pub fn open(&mut self) -> Command<Message> {
        if self.open {
            return Command::none();
        }
        self.open = true;
        self.generation += 1;
        self.focused_action = 0;
        tracing::debug!(title = %self.title, "modal opened");
        Command::message(Message::AfterOpen)
    }

    /// Hide the dialog. `AfterClose` follows once the close timeout passed,
    /// unless the modal was reopened in between.
    pub fn close(&mut self) -> Command<Message> {
        if !self.open {
            return Command::none();
        }
        self.open = false;
        self.indicating_busy = false;
        self.generation += 1;
        let generation = self.generation;
        tracing::debug!(title = %self.title, "modal closed");
        Command::tick(self.close_timeout, move |_| Message::CloseElapsed { generation })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether the "could not close because busy" indication is showing.
    pub fn is_indicating_busy(&self) -> bool {
        self.indicating_busy
    }

    pub fn focused_action(&self) -> usize {
        self.focused_action
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    fn button_count(&self) -> usize {
        self.actions.len() + usize::from(self.cancel_label.is_some())
    }

    fn is_cancel(&self, index: usize) -> bool {
        self.cancel_label.is_some() && index == self.actions.len()
    }

    /// Esc and outside clicks. With a cancel button only Esc counts.
    fn request_close(&mut self, from_keyboard: bool) -> Command<Message> {
        if self.cancel_label.is_some() && !from_keyboard {
            return self.indicate_busy();
        }
        self.close_if_not_busy()
    }

    fn close_if_not_busy(&mut self) -> Command<Message> {
        if self.busy {
            return self.indicate_busy();
        }
        self.indicating_busy = false;
        Command::message(Message::CloseRequested)
    }

    fn indicate_busy(&mut self) -> Command<Message> {
        if self.indicating_busy {
            return Command::none();
        }
        self.indicating_busy = true;
        let generation = self.generation;
        tracing::debug!(title = %self.title, "close refused");
        Command::tick(self.busy_indication.mul_f64(1.1), move |_| {
            Message::IndicationElapsed { generation }
        })
    }

    fn choose(&mut self, index: usize) -> Command<Message> {
        if self.is_cancel(index) {
            self.close_if_not_busy()
        } else {
            Command::message(Message::Selected(index))
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        let count = self.button_count();
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => self.request_close(true),
            (KeyCode::Left | KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) => {
                if count > 0 {
                    self.focused_action = (self.focused_action + count - 1) % count;
                }
                Command::none()
            }
            (KeyCode::Right | KeyCode::Tab, _) => {
                if count > 0 {
                    self.focused_action = (self.focused_action + 1) % count;
                }
                Command::none()
            }
            (KeyCode::Enter, KeyModifiers::NONE) if count > 0 => self.choose(self.focused_action),
            (KeyCode::Enter, KeyModifiers::NONE) => self.close_if_not_busy(),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                let c = c.to_ascii_lowercase();
                match self.actions.iter().position(|a| a.shortcut == Some(c)) {
                    Some(index) => self.choose(index),
                    None => Command::none(),
                }
            }
            _ => Command::none(),
        }
    }

    fn handle_click(&mut self, click: Click) -> Command<Message> {
        if click.within(self.close_glyph.get()) {
            return self.close_if_not_busy();
        }
        if click.within(self.area.get()) {
            return Command::none();
        }
        self.request_close(false)
    }

    fn modal_area(&self, area: Rect) -> Rect {
        match self.size {
            Size::Percent(w, h) => centered_rect(w, h, area),
            Size::Fixed(w, h) => centered_fixed(w, h, area),
            Size::Fullscreen => area,
        }
    }

    fn render_actions(&self, frame: &mut Frame, area: Rect) {
        let labels = self
            .actions
            .iter()
            .map(|a| match a.shortcut {
                Some(key) => format!("[{key}] {}", a.label),
                None => a.label.clone(),
            })
            .chain(self.cancel_label.clone());

        let mut spans = Vec::new();
        for (i, label) in labels.enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let (prefix, style) = if i == self.focused_action {
                ("▸ ", self.style.focused_action)
            } else {
                ("  ", self.style.action)
            };
            spans.push(Span::styled(format!("{prefix}{label}"), style));
        }
        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
            area,
        );
    }
}

impl Component for Modal {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Key(key) if self.open => self.handle_key(key),
            Message::Pointer(click) if self.open => self.handle_click(click),
            Message::Key(_) | Message::Pointer(_) => Command::none(),
            Message::CloseElapsed { generation } => {
                if generation != self.generation || self.open {
                    tracing::trace!(generation, "stale close timeout dropped");
                    return Command::none();
                }
                let after = Command::message(Message::AfterClose);
                if self.reset_on_close {
                    Command::batch([Command::message(Message::Reset), after])
                } else {
                    after
                }
            }
            Message::IndicationElapsed { generation } => {
                if generation == self.generation {
                    self.indicating_busy = false;
                }
                Command::none()
            }
            Message::CloseRequested
            | Message::Selected(_)
            | Message::AfterOpen
            | Message::AfterClose
            | Message::Reset => Command::none(),
        }
    }

    /// Draws nothing while closed. Render after everything it covers.
    fn view(&self, frame: &mut Frame, area: Rect) {
        if !self.open {
            self.area.set(Rect::default());
            self.close_glyph.set(Rect::default());
            return;
        }
        let modal_area = self.modal_area(area);
        self.area.set(modal_area);

        let border = if self.indicating_busy {
            self.style.busy_border
        } else {
            self.style.border
        };
        let mut block = Block::bordered()
            .title(Span::styled(self.title.as_str(), self.style.title))
            .border_style(border);
        if let Some(glyph) = &self.close_button {
            block = block.title_top(Line::from(glyph.as_str()).right_aligned());
            let width = crate::text::display_width(glyph) as u16;
            self.close_glyph.set(Rect::new(
                modal_area.right().saturating_sub(width + 1),
                modal_area.y,
                width,
                1,
            ));
        } else {
            self.close_glyph.set(Rect::default());
        }
        if self.indicating_busy {
            block = block.title_bottom(Line::from(" busy ").right_aligned());
        }
        let inner = render_overlay(frame, modal_area, Some(&block));

        let button_rows = if self.button_count() > 0 { 2 } else { 0 };
        let body_area = Rect {
            height: inner.height.saturating_sub(button_rows),
            ..inner
        };
        if !self.body.is_empty() {
            frame.render_widget(
                Paragraph::new(self.body.clone())
                    .style(self.style.body)
                    .wrap(Wrap { trim: false }),
                body_area,
            );
        }
        if button_rows > 0 && inner.height >= button_rows {
            let row = Rect {
                y: inner.bottom() - 1,
                height: 1,
                ..inner
            };
            self.render_actions(frame, row);
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if !self.open {
            return vec![];
        }
        vec![pointer::clicks(self.listener).map(Message::Pointer)]
    }

    fn focused(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use pearl_core::testing::TestComponent;

    fn key(code: KeyCode) -> Message {
        Message::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn opened(modal: Modal) -> TestComponent<Modal> {
        let mut modal = modal;
        let cmd = modal.open();
        assert_eq!(cmd.into_message(), Some(Message::AfterOpen));
        TestComponent::new(modal)
    }

    fn confirm() -> Modal {
        Modal::new("Confirm")
            .body("Really?")
            .action(Action::new("Yes").with_shortcut('y'))
            .action(Action::new("No").with_shortcut('n'))
    }

    #[test]
    fn escape_requests_close() {
        let mut t = opened(confirm());
        t.dispatch(key(KeyCode::Esc));
        assert_eq!(t.emitted(), &[Message::CloseRequested]);
        // Still open: closing is the caller's call.
        assert!(t.component().is_open());
    }

    #[test]
    fn keys_ignored_while_closed() {
        let mut t = TestComponent::new(confirm());
        t.dispatch(key(KeyCode::Esc));
        assert!(t.emitted().is_empty());
    }

    #[test]
    fn busy_refuses_and_indicates() {
        let mut t = opened(confirm());
        t.component_mut().set_busy(true);
        t.dispatch(key(KeyCode::Esc));
        assert!(t.emitted().is_empty());
        assert!(t.component().is_indicating_busy());

        let generation = t.component().generation;
        t.dispatch(Message::IndicationElapsed { generation });
        assert!(!t.component().is_indicating_busy());
    }

    #[test]
    fn indication_lasts_a_tenth_longer() {
        let mut modal = confirm().with_busy_indication(Duration::from_millis(1000));
        let _ = modal.open();
        modal.set_busy(true);
        let cmd = modal.update(key(KeyCode::Esc));
        assert!(!cmd.is_none());
        // A second refusal while indicating schedules nothing new.
        assert!(modal.update(key(KeyCode::Esc)).is_none());
        assert_eq!(Duration::from_millis(1000).mul_f64(1.1), Duration::from_millis(1100));
    }

    #[test]
    fn outside_click_requests_close() {
        let mut t = opened(confirm().with_fixed_size(20, 6));
        t.render(40, 12);
        t.dispatch(Message::Pointer(Click::new(0, 0)));
        assert_eq!(t.emitted(), &[Message::CloseRequested]);
    }

    #[test]
    fn inside_click_is_ignored() {
        let mut t = opened(confirm().with_fixed_size(20, 6));
        t.render(40, 12);
        t.dispatch(Message::Pointer(Click::new(20, 6)));
        assert!(t.emitted().is_empty());
    }

    #[test]
    fn cancel_button_blocks_outside_click_but_not_escape() {
        let mut t = opened(confirm().with_cancel_label("Cancel").with_fixed_size(30, 6));
        t.render(40, 12);
        t.dispatch(Message::Pointer(Click::new(0, 0)));
        assert!(t.emitted().is_empty());
        assert!(t.component().is_indicating_busy());

        t.dispatch(key(KeyCode::Esc));
        assert_eq!(t.emitted(), &[Message::CloseRequested]);
        assert!(!t.component().is_indicating_busy());
    }

    #[test]
    fn cancel_button_requests_close() {
        let mut t = opened(confirm().with_cancel_label("Cancel"));
        t.dispatch(key(KeyCode::Left));
        assert_eq!(t.component().focused_action(), 2);
        t.dispatch(key(KeyCode::Enter));
        assert_eq!(t.emitted(), &[Message::CloseRequested]);
    }

    #[test]
    fn close_glyph_click_requests_close() {
        let mut t = opened(confirm().with_close_button("x").with_fixed_size(20, 6));
        t.render(40, 12);
        // Box spans columns 10..30, the glyph sits left of the corner.
        t.dispatch(Message::Pointer(Click::new(28, 3)));
        assert_eq!(t.emitted(), &[Message::CloseRequested]);
    }

    #[test]
    fn actions_cycle_and_select() {
        let mut t = opened(confirm());
        t.dispatch(key(KeyCode::Right));
        t.dispatch(key(KeyCode::Enter));
        assert_eq!(t.take_emitted(), vec![Message::Selected(1)]);
        t.dispatch(key(KeyCode::Right));
        assert_eq!(t.component().focused_action(), 0);
        t.dispatch(key(KeyCode::Char('N')));
        assert_eq!(t.take_emitted(), vec![Message::Selected(1)]);
    }

    #[test]
    fn enter_without_buttons_requests_close() {
        let mut t = opened(Modal::new("Info"));
        t.dispatch(key(KeyCode::Enter));
        assert_eq!(t.emitted(), &[Message::CloseRequested]);
    }

    #[test]
    fn after_close_follows_timeout() {
        let mut modal = confirm().with_reset(true);
        let _ = modal.open();
        let cmd = modal.close();
        assert!(!cmd.is_none());
        assert!(!modal.is_open());

        let generation = modal.generation;
        let mut t = TestComponent::new(modal);
        t.dispatch(Message::CloseElapsed { generation });
        assert_eq!(t.emitted(), &[Message::Reset, Message::AfterClose]);
    }

    #[test]
    fn reopen_cancels_pending_after_close() {
        let mut modal = confirm();
        let _ = modal.open();
        let _ = modal.close();
        let stale = modal.generation;
        let _ = modal.open();
        let mut t = TestComponent::new(modal);
        t.dispatch(Message::CloseElapsed { generation: stale });
        assert!(t.emitted().is_empty());
    }

    #[test]
    fn renders_title_body_and_buttons() {
        let t = opened(confirm().with_fixed_size(30, 7));
        let screen = t.render_string(40, 9);
        assert!(screen.contains("Confirm"));
        assert!(screen.contains("Really?"));
        assert!(screen.contains("▸ [y] Yes"));
        assert!(screen.contains("[n] No"));
    }

    #[test]
    fn fullscreen_fills_area() {
        let t = opened(confirm().with_fullscreen(true));
        let screen = t.render_string(20, 5);
        assert!(screen.starts_with('┌'));
        assert!(screen.lines().next().unwrap().ends_with('┐'));
    }

    #[test]
    fn closed_renders_nothing_and_subscribes_nothing() {
        let t = TestComponent::new(confirm());
        assert_eq!(t.render_string(10, 2).trim(), "");
        assert!(t.component().subscriptions().is_empty());
    }
}

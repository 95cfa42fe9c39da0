//! Text field with a floating label, optional description and error line.
//!
//! The value is controlled by the caller: every edit is reported as
//! [`Message::Changed`] with the would-be value, and the field only shows it
//! after [`TextInput::set_value`]. The caret is kept locally and clamped to
//! whatever value the caller settles on.

use crate::text::{display_width, is_blank, truncate};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pearl_core::{Command, Component};
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

/// What kind of value the field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    #[default]
    Text,
    Email,
    /// Rendered masked.
    Password,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Key(KeyEvent),
    Paste(String),

    /// Emitted: the user edited the value. Apply it with
    /// [`TextInput::set_value`].
    Changed(String),
    /// Emitted: Enter on a single-line field, Ctrl+Enter or Alt+Enter on a
    /// multiline one.
    SubmitForm,
}

#[derive(Debug, Clone)]
pub struct TextInputStyle {
    pub text: Style,
    pub label: Style,
    pub floating_label: Style,
    pub description: Style,
    pub border: Style,
    pub focused_border: Style,
    pub invalid: Style,
    pub disabled: Style,
}

impl Default for TextInputStyle {
    fn default() -> Self {
        Self {
            text: Style::default(),
            label: Style::default().fg(Color::DarkGray),
            floating_label: Style::default().fg(Color::Cyan),
            description: Style::default().fg(Color::Gray),
            border: Style::default().fg(Color::DarkGray),
            focused_border: Style::default().fg(Color::Cyan),
            invalid: Style::default().fg(Color::Red),
            disabled: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        }
    }
}

/// A bordered text field.
pub struct TextInput {
    value: String,
    /// Caret position in chars.
    cursor: usize,
    label: Option<String>,
    description: Option<String>,
    error: Option<String>,
    indicate_invalid: bool,
    kind: InputKind,
    multiline: Option<usize>,
    disabled: bool,
    focused: bool,
    style: TextInputStyle,
}

const MASK: char = '•';

impl TextInput {
    pub fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            label: None,
            description: None,
            error: None,
            indicate_invalid: false,
            kind: InputKind::Text,
            multiline: None,
            disabled: false,
            focused: false,
            style: TextInputStyle::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Text shown above the field. A field with a description shows no
    /// floating label.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    /// A text area at least `rows` lines tall, growing with its content.
    pub fn multiline(mut self, rows: usize) -> Self {
        self.multiline = Some(rows.max(1));
        self
    }

    pub fn with_style(mut self, style: TextInputStyle) -> Self {
        self.style = style;
        self
    }

    /// Apply a value, usually the one from the last `Changed`.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.cursor.min(self.value.chars().count());
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Empty or whitespace only.
    pub fn is_empty(&self) -> bool {
        is_blank(&self.value)
    }

    /// The error is only shown while [`set_indicate_invalid`] is on.
    ///
    /// [`set_indicate_invalid`]: TextInput::set_indicate_invalid
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn set_indicate_invalid(&mut self, indicate: bool) {
        self.indicate_invalid = indicate;
    }

    pub fn shows_error(&self) -> bool {
        self.indicate_invalid && self.error.is_some()
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the label sits in the border rather than inside the field.
    pub fn label_floats(&self) -> bool {
        self.focused || !self.is_empty()
    }

    /// Rows needed to render the field with its description and error.
    pub fn height(&self) -> u16 {
        let field = match self.multiline {
            Some(rows) => rows.max(self.value.split('\n').count()),
            None => 1,
        } as u16;
        u16::from(self.description.is_some()) + field + 2 + u16::from(self.shows_error())
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Report `value` with the caret moved to `cursor`.
    fn edit(&mut self, value: String, cursor: usize) -> Command<Message> {
        self.cursor = cursor;
        Command::message(Message::Changed(value))
    }

    fn insert(&mut self, text: &str) -> Command<Message> {
        let text = if self.multiline.is_some() {
            text.replace("\r\n", "\n")
        } else {
            text.replace(['\r', '\n'], " ")
        };
        if text.is_empty() {
            return Command::none();
        }
        let mut value = self.value.clone();
        value.insert_str(self.byte_index(self.cursor), &text);
        let cursor = self.cursor + text.chars().count();
        self.edit(value, cursor)
    }

    fn delete_backward(&mut self) -> Command<Message> {
        if self.cursor == 0 {
            return Command::none();
        }
        let mut value = self.value.clone();
        value.remove(self.byte_index(self.cursor - 1));
        let cursor = self.cursor - 1;
        self.edit(value, cursor)
    }

    fn delete_forward(&mut self) -> Command<Message> {
        if self.cursor >= self.value.chars().count() {
            return Command::none();
        }
        let mut value = self.value.clone();
        value.remove(self.byte_index(self.cursor));
        let cursor = self.cursor;
        self.edit(value, cursor)
    }

    /// Start of the line holding the caret, in chars.
    fn line_start(&self) -> usize {
        self.value
            .chars()
            .take(self.cursor)
            .collect::<Vec<_>>()
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1)
    }

    fn line_end(&self) -> usize {
        self.value
            .chars()
            .skip(self.cursor)
            .position(|c| c == '\n')
            .map_or(self.value.chars().count(), |i| self.cursor + i)
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if key.kind == KeyEventKind::Release {
            return Command::none();
        }
        let len = self.value.chars().count();
        match (key.code, key.modifiers) {
            (KeyCode::Enter, m) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                Command::message(Message::SubmitForm)
            }
            (KeyCode::Enter, KeyModifiers::NONE) if self.multiline.is_some() => self.insert("\n"),
            (KeyCode::Enter, KeyModifiers::NONE) => Command::message(Message::SubmitForm),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert(c.encode_utf8(&mut [0; 4]))
            }
            (KeyCode::Backspace, KeyModifiers::NONE) => self.delete_backward(),
            (KeyCode::Delete, KeyModifiers::NONE) => self.delete_forward(),
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.cursor = self.cursor.saturating_sub(1);
                Command::none()
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                self.cursor = (self.cursor + 1).min(len);
                Command::none()
            }
            (KeyCode::Home, _) => {
                self.cursor = self.line_start();
                Command::none()
            }
            (KeyCode::End, _) => {
                self.cursor = self.line_end();
                Command::none()
            }
            _ => Command::none(),
        }
    }

    fn display_value(&self) -> String {
        match self.kind {
            InputKind::Password => self
                .value
                .chars()
                .map(|c| if c == '\n' { c } else { MASK })
                .collect(),
            InputKind::Text | InputKind::Email => self.value.clone(),
        }
    }

    /// Caret as (line, column in cells) within the displayed text.
    fn caret(&self, shown: &str) -> (u16, u16) {
        let before: String = shown.chars().take(self.cursor).collect();
        let line = before.matches('\n').count();
        let column = before.rsplit('\n').next().map_or(0, display_width);
        (line as u16, column as u16)
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TextInput {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        if self.disabled || !self.focused {
            return Command::none();
        }
        match msg {
            Message::Key(key) => self.handle_key(key),
            Message::Paste(text) => self.insert(&text),
            Message::Changed(_) | Message::SubmitForm => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let mut area = area;
        if let Some(description) = &self.description {
            let line = Rect { height: 1, ..area };
            frame.render_widget(
                Paragraph::new(Span::styled(
                    truncate(description, area.width as usize, "…"),
                    self.style.description,
                )),
                line,
            );
            area.y += 1;
            area.height = area.height.saturating_sub(1);
        }

        let error_rows = u16::from(self.shows_error());
        let field_height = (self.height() - u16::from(self.description.is_some()) - error_rows)
            .min(area.height.saturating_sub(error_rows));
        let field = Rect {
            height: field_height,
            ..area
        };

        let border = if self.disabled {
            self.style.disabled
        } else if self.shows_error() {
            self.style.invalid
        } else if self.focused {
            self.style.focused_border
        } else {
            self.style.border
        };
        let floating = self.description.is_none() && self.label_floats();
        let mut block = Block::bordered().border_style(border);
        if let (Some(label), true) = (&self.label, floating) {
            let style = if self.shows_error() {
                self.style.invalid
            } else {
                self.style.floating_label
            };
            block = block.title(Span::styled(format!(" {label} "), style));
        }
        let inner = block.inner(field);
        frame.render_widget(block, field);

        let shown = self.display_value();
        let text_style = if self.disabled {
            self.style.disabled
        } else {
            self.style.text
        };
        let label_inside = self.description.is_none() && !floating;
        let (caret_line, caret_col) = self.caret(&shown);
        match (&self.label, label_inside) {
            (Some(label), true) => frame.render_widget(
                Paragraph::new(Span::styled(label.as_str(), self.style.label)),
                inner,
            ),
            _ if self.multiline.is_some() => {
                let scroll = caret_line.saturating_sub(inner.height.saturating_sub(1));
                let lines: Vec<Line> = shown
                    .split('\n')
                    .map(|l| Line::styled(l.to_string(), text_style))
                    .collect();
                frame.render_widget(
                    Paragraph::new(lines).scroll((scroll, 0)).wrap(Wrap { trim: false }),
                    inner,
                );
            }
            _ => {
                let scroll = caret_col.saturating_sub(inner.width.saturating_sub(1));
                frame.render_widget(
                    Paragraph::new(Span::styled(shown.clone(), text_style)).scroll((0, scroll)),
                    inner,
                );
            }
        }

        if self.focused && !self.disabled && !inner.is_empty() {
            let (x, y) = if self.multiline.is_some() {
                let scroll = caret_line.saturating_sub(inner.height.saturating_sub(1));
                (caret_col, caret_line - scroll)
            } else {
                (caret_col.min(inner.width.saturating_sub(1)), 0)
            };
            frame.set_cursor_position(Position::new(
                inner.x + x.min(inner.width.saturating_sub(1)),
                inner.y + y,
            ));
        }

        if let (Some(error), true) = (&self.error, self.shows_error()) {
            let y = field.bottom();
            if y < area.bottom() {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        truncate(error, area.width as usize, "…"),
                        self.style.invalid,
                    )),
                    Rect {
                        y,
                        height: 1,
                        ..area
                    },
                );
            }
        }
    }

    fn focused(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use pearl_core::testing::TestComponent;

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> Message {
        Message::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn key(code: KeyCode) -> Message {
        key_with(code, KeyModifiers::NONE)
    }

    /// Send `msg` and apply the value it reports, as a parent would.
    fn apply(t: &mut TestComponent<TextInput>, msg: Message) {
        t.dispatch(msg);
        let changed = t.take_emitted().into_iter().rev().find_map(|m| match m {
            Message::Changed(v) => Some(v),
            _ => None,
        });
        if let Some(value) = changed {
            t.component_mut().set_value(value);
        }
    }

    fn typed(t: &mut TestComponent<TextInput>, text: &str) {
        for c in text.chars() {
            apply(t, key(KeyCode::Char(c)));
        }
    }

    fn focused(input: TextInput) -> TestComponent<TextInput> {
        let mut input = input;
        input.focus();
        TestComponent::new(input)
    }

    #[test]
    fn typing_reports_but_does_not_apply() {
        let mut t = focused(TextInput::new());
        t.dispatch(key(KeyCode::Char('h')));
        assert_eq!(t.emitted(), &[Message::Changed("h".into())]);
        assert_eq!(t.component().value(), "");
    }

    #[test]
    fn editing_keys() {
        let mut t = focused(TextInput::new());
        typed(&mut t, "abc");
        apply(&mut t, key(KeyCode::Left));
        apply(&mut t, key(KeyCode::Left));
        typed(&mut t, "X");
        assert_eq!(t.component().value(), "aXbc");
        apply(&mut t, key(KeyCode::Delete));
        assert_eq!(t.component().value(), "aXc");
        apply(&mut t, key(KeyCode::Backspace));
        assert_eq!(t.component().value(), "ac");
        apply(&mut t, key(KeyCode::Home));
        apply(&mut t, key(KeyCode::Backspace));
        assert_eq!(t.component().value(), "ac");
        apply(&mut t, key(KeyCode::End));
        typed(&mut t, "!");
        assert_eq!(t.component().value(), "ac!");
    }

    #[test]
    fn multibyte_editing() {
        let mut t = focused(TextInput::new());
        typed(&mut t, "añb");
        apply(&mut t, key(KeyCode::Left));
        apply(&mut t, key(KeyCode::Backspace));
        assert_eq!(t.component().value(), "ab");
    }

    #[test]
    fn paste_inserts_at_caret() {
        let mut t = focused(TextInput::new());
        typed(&mut t, "ad");
        apply(&mut t, key(KeyCode::Left));
        apply(&mut t, Message::Paste("bc".into()));
        assert_eq!(t.component().value(), "abcd");
        assert_eq!(t.component().cursor(), 3);
    }

    #[test]
    fn single_line_paste_flattens_newlines() {
        let mut t = focused(TextInput::new());
        apply(&mut t, Message::Paste("a\nb".into()));
        assert_eq!(t.component().value(), "a b");
    }

    #[test]
    fn enter_submits_single_line() {
        let mut t = focused(TextInput::new());
        t.dispatch(key(KeyCode::Enter));
        assert_eq!(t.emitted(), &[Message::SubmitForm]);
    }

    #[test]
    fn multiline_enter_inserts_newline_and_grows() {
        let mut t = focused(TextInput::new().multiline(2));
        assert_eq!(t.component().height(), 4);
        typed(&mut t, "a");
        apply(&mut t, key(KeyCode::Enter));
        typed(&mut t, "b");
        apply(&mut t, key(KeyCode::Enter));
        typed(&mut t, "c");
        assert_eq!(t.component().value(), "a\nb\nc");
        assert_eq!(t.component().height(), 5);

        t.dispatch(key_with(KeyCode::Enter, KeyModifiers::CONTROL));
        assert_eq!(t.emitted(), &[Message::SubmitForm]);
        t.take_emitted();
        t.dispatch(key_with(KeyCode::Enter, KeyModifiers::ALT));
        assert_eq!(t.emitted(), &[Message::SubmitForm]);
    }

    #[test]
    fn home_and_end_are_line_based_in_multiline() {
        let mut t = focused(TextInput::new().multiline(2));
        t.component_mut().set_value("ab\ncd");
        assert_eq!(t.component().cursor(), 0);
        apply(&mut t, key(KeyCode::End));
        assert_eq!(t.component().cursor(), 2);
        apply(&mut t, key(KeyCode::Right));
        apply(&mut t, key(KeyCode::End));
        assert_eq!(t.component().cursor(), 5);
        apply(&mut t, key(KeyCode::Home));
        assert_eq!(t.component().cursor(), 3);
        apply(&mut t, key(KeyCode::Left));
        apply(&mut t, key(KeyCode::Home));
        assert_eq!(t.component().cursor(), 0);
    }

    #[test]
    fn disabled_and_unfocused_ignore_input() {
        let mut t = TestComponent::new(TextInput::new());
        t.dispatch(key(KeyCode::Char('a')));
        assert!(t.emitted().is_empty());

        let mut input = TextInput::new();
        input.focus();
        input.set_disabled(true);
        let mut t = TestComponent::new(input);
        t.dispatch(key(KeyCode::Char('a')));
        assert!(t.emitted().is_empty());
    }

    #[test]
    fn whitespace_counts_as_empty() {
        let mut input = TextInput::new();
        input.set_value("  \n ");
        assert!(input.is_empty());
        input.set_value(" x ");
        assert!(!input.is_empty());
    }

    #[test]
    fn error_needs_indicate_invalid() {
        let mut input = TextInput::new();
        input.set_error(Some("Required".into()));
        assert!(!input.shows_error());
        input.set_indicate_invalid(true);
        assert!(input.shows_error());
        assert_eq!(input.height(), 4);

        let t = TestComponent::new(input);
        let screen = t.render_string(20, 4);
        assert!(screen.lines().nth(3).unwrap_or_default().starts_with("Required"));
    }

    #[test]
    fn label_sits_inside_when_empty_and_unfocused() {
        let t = TestComponent::new(TextInput::new().with_label("Email"));
        let screen = t.render_string(20, 3);
        let lines: Vec<&str> = screen.lines().collect();
        assert!(!lines[0].contains("Email"));
        assert!(lines[1].contains("Email"));
    }

    #[test]
    fn label_floats_when_focused_or_filled() {
        let t = focused(TextInput::new().with_label("Email"));
        let screen = t.render_string(20, 3);
        assert!(screen.lines().next().unwrap_or_default().contains(" Email "));

        let mut input = TextInput::new().with_label("Email");
        input.set_value("a@b.c");
        assert!(input.label_floats());
        let screen = TestComponent::new(input).render_string(20, 3);
        let lines: Vec<&str> = screen.lines().collect();
        assert!(lines[0].contains("Email"));
        assert!(lines[1].contains("a@b.c"));
    }

    #[test]
    fn description_suppresses_label() {
        let mut input = TextInput::new()
            .with_label("Name")
            .with_description("As on your passport");
        input.focus();
        let t = TestComponent::new(input);
        let screen = t.render_string(30, 4);
        assert!(screen.starts_with("As on your passport"));
        assert!(!screen.contains("Name"));
    }

    #[test]
    fn password_is_masked() {
        let mut input = TextInput::new().with_kind(InputKind::Password);
        input.set_value("hunter2");
        let screen = TestComponent::new(input).render_string(20, 3);
        assert!(screen.contains("•••••••"));
        assert!(!screen.contains("hunter2"));
    }
}

//! Dropdown select with keyboard navigation, autocomplete and outside-click
//! dismissal.
//!
//! The committed value belongs to the caller: a commit is reported upward as
//! [`Message::Changed`] and only shows up in the trigger once the caller
//! passes it back through [`Select::set_value`]. Everything else (whether the
//! list is open, which option is highlighted, the filter text) is owned by
//! the select.
//!
//! Opening and closing never happen while the input event that asked for
//! them is still being handled. They are scheduled as deferred
//! continuations, one at a time: asking again before the pending one has run
//! supersedes it, so a rapid double toggle ends where it started instead of
//! leaving a stale focus transfer behind.
//!
//! Clicks arrive through [`Select::subscriptions`], which listens on the
//! process-wide [`ClickBus`](pearl_core::ClickBus). A click on the trigger
//! toggles, a click on an option row commits it, and any other click closes
//! the list right away. Clicking into an unfocused select takes keyboard
//! focus and emits [`Message::FocusRequested`] so the parent can follow.

use crate::error::ConfigError;
use crate::focus::{focus_after, FocusTarget, Transition};
use crate::key::{has_modifier, typed_char, SelectKeyMap};
use crate::options::{OptionStore, SelectOption};
use crate::overlay::{anchored_rect, render_overlay, Align};
use crate::selection::SelectionState;
use crate::text::{display_width, truncate};
use crossterm::event::KeyEvent;
use pearl_core::defer::DeferSlot;
use pearl_core::event::Click;
use pearl_core::pointer;
use pearl_core::{Command, Component, Subscription};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use std::cell::Cell;
use std::ops::Range;

/// Messages for the select component.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// A key press routed here by the parent while the select has focus.
    Key(KeyEvent),
    /// A left-button press anywhere on screen, delivered by the click bus.
    Pointer(Click),
    /// Open if closed, close if open (e.g. from a parent shortcut).
    Toggle,

    /// Deferred: apply an expansion change scheduled earlier.
    ApplyToggle { expand: bool, reason: Transition },
    /// Deferred: move focus inside the select once the state change landed.
    TransferFocus(FocusTarget),

    /// Emitted: the user confirmed `value`. The caller decides whether to
    /// apply it with [`Select::set_value`].
    Changed(String),
    /// Emitted instead of `Changed` in menu mode.
    Activated(String),
    /// Emitted: Enter was pressed while closed; the parent should submit
    /// its form if it has one.
    SubmitForm,
    /// Emitted: the user clicked into the select while it did not have
    /// focus. It now takes keys; the parent should move its own focus here.
    FocusRequested,
}

/// Construction-time settings for a [`Select`].
#[derive(Debug, Clone)]
pub struct SelectConfig {
    /// Typing narrows the options while the list is open.
    pub autocomplete: bool,
    pub disabled: bool,
    /// Rows shown before the list scrolls (default 6).
    pub max_items: usize,
    /// When false the list is as tall as the option count.
    pub scroll: bool,
    pub alignment: Align,
    /// Open above the trigger instead of below.
    pub upward: bool,
    /// Placeholder shown while nothing is committed.
    pub label: Option<String>,
    /// Show only the committed option's icon in the trigger, when it has one.
    pub concise: bool,
    /// Menu mode: the trigger shows this text and commits emit `Activated`.
    pub toggler: Option<String>,
    pub menu: bool,
    pub keymap: SelectKeyMap,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            autocomplete: false,
            disabled: false,
            max_items: 6,
            scroll: true,
            alignment: Align::Left,
            upward: false,
            label: None,
            concise: false,
            toggler: None,
            menu: false,
            keymap: SelectKeyMap::default(),
        }
    }
}

impl SelectConfig {
    /// Menu mode with `toggler` as the trigger text.
    pub fn menu(toggler: impl Into<String>) -> Self {
        Self {
            menu: true,
            toggler: Some(toggler.into()),
            ..Self::default()
        }
    }

    pub fn with_autocomplete(mut self, autocomplete: bool) -> Self {
        self.autocomplete = autocomplete;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn with_scroll(mut self, scroll: bool) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn with_alignment(mut self, alignment: Align) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_upward(mut self, upward: bool) -> Self {
        self.upward = upward;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_concise(mut self, concise: bool) -> Self {
        self.concise = concise;
        self
    }

    pub fn with_keymap(mut self, keymap: SelectKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    fn validate(&self, options: &[SelectOption]) -> Result<(), ConfigError> {
        if self.autocomplete && options.is_empty() {
            return Err(ConfigError::AutocompleteWithoutOptions);
        }
        if self.menu && self.toggler.as_deref().is_none_or(str::is_empty) {
            return Err(ConfigError::MenuWithoutToggler);
        }
        if self.menu && options.is_empty() {
            return Err(ConfigError::EmptyMenu);
        }
        if self.max_items == 0 {
            return Err(ConfigError::ZeroMaxItems);
        }
        Ok(())
    }
}

/// Visual style for the [`Select`].
#[derive(Debug, Clone)]
pub struct SelectStyle {
    pub trigger: Style,
    pub trigger_focused: Style,
    pub placeholder: Style,
    pub disabled: Style,
    pub option: Style,
    pub cursor: Style,
    pub committed: Style,
    pub border: Style,
    pub highlight_symbol: String,
}

impl Default for SelectStyle {
    fn default() -> Self {
        Self {
            trigger: Style::default(),
            trigger_focused: Style::default().fg(Color::Cyan),
            placeholder: Style::default().fg(Color::DarkGray),
            disabled: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            option: Style::default(),
            cursor: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            committed: Style::default().add_modifier(Modifier::UNDERLINED),
            border: Style::default().fg(Color::DarkGray),
            highlight_symbol: "▸ ".to_string(),
        }
    }
}

/// One row of the option list as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub icon: Option<String>,
    pub is_cursor: bool,
    pub is_committed: bool,
}

/// Everything [`Select::view`] draws, computed from state alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectView {
    /// Eligible options in order.
    pub options: Vec<OptionView>,
    pub expanded: bool,
    /// The filter text, present only while an autocomplete list is open.
    pub filter_text: Option<String>,
    /// Open autocomplete list whose filter matched nothing.
    pub no_results: bool,
    /// Text for the collapsed trigger.
    pub trigger_text: String,
    /// `trigger_text` is the placeholder rather than a committed option.
    pub placeholder: bool,
    /// Slice of `options` that fits in the list.
    pub window: Range<usize>,
    pub focus: Option<FocusTarget>,
    pub disabled: bool,
}

/// A dropdown select.
///
/// ```rust,ignore
/// let country = Select::new(
///     vec![
///         SelectOption::new("de", "DE").with_verbose("Germany"),
///         SelectOption::new("fr", "FR").with_verbose("France"),
///     ],
///     SelectConfig::default().with_autocomplete(true).with_label("Country"),
/// )?;
/// ```
pub struct Select {
    store: OptionStore,
    config: SelectConfig,
    style: SelectStyle,
    value: Option<String>,
    expanded: bool,
    filter_text: String,
    selection: SelectionState,
    focused: bool,
    focus_target: Option<FocusTarget>,
    toggle_slot: DeferSlot,
    pending_expand: Option<bool>,
    focus_slot: DeferSlot,
    listener: u64,
    trigger_area: Cell<Rect>,
    list_area: Cell<Rect>,
    list_rows: Cell<Rect>,
}

impl Select {
    /// Build a select, refusing configurations it cannot work with.
    pub fn new(options: Vec<SelectOption>, config: SelectConfig) -> Result<Self, ConfigError> {
        config.validate(&options)?;
        let store = OptionStore::new(options)?;
        let visible = visible_rows(&config, store.all().len());
        Ok(Self {
            selection: SelectionState::new(store.len(), visible),
            store,
            config,
            style: SelectStyle::default(),
            value: None,
            expanded: false,
            filter_text: String::new(),
            focused: false,
            focus_target: None,
            toggle_slot: DeferSlot::new(),
            pending_expand: None,
            focus_slot: DeferSlot::new(),
            listener: pointer::next_listener_id(),
            trigger_area: Cell::new(Rect::default()),
            list_area: Cell::new(Rect::default()),
            list_rows: Cell::new(Rect::default()),
        })
    }

    pub fn with_style(mut self, style: SelectStyle) -> Self {
        self.style = style;
        self
    }

    /// Initial committed value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Apply the caller's committed value.
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Replace the options. An open list keeps its filter and keeps the
    /// highlighted option when it is still eligible.
    pub fn set_options(&mut self, options: Vec<SelectOption>) -> Result<(), ConfigError> {
        self.config.validate(&options)?;
        let highlighted = self.cursor_value().map(str::to_owned);
        self.store = OptionStore::new(options)?;
        self.store.apply_filter(&self.filter_text);
        self.selection = SelectionState::new(
            self.store.len(),
            visible_rows(&self.config, self.store.all().len()),
        );
        if self.expanded {
            let position = highlighted.and_then(|v| self.store.position(&v)).unwrap_or(0);
            self.selection.select(position);
        }
        Ok(())
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
    }

    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    pub fn focus(&mut self) {
        self.focused = true;
        if self.focus_target.is_none() {
            self.focus_target = Some(FocusTarget::Toggle);
        }
    }

    /// Lose focus. An open list stays open until the user clicks elsewhere
    /// or tabs away.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn focus_target(&self) -> Option<FocusTarget> {
        self.focus_target
    }

    /// Value of the highlighted option while open.
    pub fn cursor_value(&self) -> Option<&str> {
        if !self.expanded {
            return None;
        }
        self.selection
            .cursor()
            .and_then(|i| self.store.get(i))
            .map(|o| o.value.as_str())
    }

    /// Eligible options right now.
    pub fn options(&self) -> impl Iterator<Item = &SelectOption> {
        self.store.iter()
    }

    /// The data the renderer needs.
    pub fn project(&self) -> SelectView {
        let cursor = self.selection.cursor().filter(|_| self.expanded);
        let options = self
            .store
            .iter()
            .enumerate()
            .map(|(i, o)| OptionView {
                value: o.value.clone(),
                label: o.label.clone(),
                icon: o.icon.clone(),
                is_cursor: cursor == Some(i),
                is_committed: self.value.as_deref() == Some(o.value.as_str()),
            })
            .collect();

        let committed = self.value.as_deref().and_then(|v| self.store.find(v));
        let (trigger_text, placeholder) = match (&self.config.toggler, committed) {
            (Some(toggler), _) if self.config.menu => (toggler.clone(), false),
            (_, Some(opt)) => match (&opt.icon, self.config.concise) {
                (Some(icon), true) => (icon.clone(), false),
                (Some(icon), false) => (format!("{icon} {}", opt.label), false),
                (None, _) => (opt.label.clone(), false),
            },
            (_, None) => (self.config.label.clone().unwrap_or_default(), true),
        };

        let autocompleting = self.expanded && self.config.autocomplete;
        SelectView {
            options,
            expanded: self.expanded,
            filter_text: autocompleting.then(|| self.filter_text.clone()),
            no_results: autocompleting && self.store.is_empty(),
            trigger_text,
            placeholder,
            window: self.selection.window(),
            focus: if self.focused { self.focus_target } else { None },
            disabled: self.config.disabled,
        }
    }

    // --- expansion ---

    /// Expansion state once the pending transition, if any, has landed.
    fn settled_expanded(&self) -> bool {
        match self.pending_expand {
            Some(expand) if self.toggle_slot.is_pending() => expand,
            _ => self.expanded,
        }
    }

    fn toggle(&mut self) -> Command<Message> {
        let expand = !self.settled_expanded();
        let reason = if expand {
            Transition::Expanded
        } else {
            Transition::ClosedFromTrigger
        };
        self.request(expand, reason)
    }

    /// Schedule an expansion change. Asking for the state the select is
    /// already in cancels whatever was pending instead.
    fn request(&mut self, expand: bool, reason: Transition) -> Command<Message> {
        if self.config.disabled {
            return Command::none();
        }
        if expand == self.expanded {
            if self.toggle_slot.is_pending() {
                tracing::trace!(listener = self.listener, "pending toggle superseded");
            }
            self.toggle_slot.cancel();
            self.pending_expand = None;
            return Command::none();
        }
        let token = self.toggle_slot.schedule();
        self.pending_expand = Some(expand);
        Command::defer(token, Message::ApplyToggle { expand, reason })
    }

    fn apply_toggle(&mut self, expand: bool, reason: Transition) -> Command<Message> {
        self.toggle_slot.finish();
        self.pending_expand = None;
        if expand == self.expanded {
            return Command::none();
        }
        if expand {
            self.expand();
        } else {
            self.expanded = false;
            self.release_list_focus();
            tracing::debug!(listener = self.listener, ?reason, "select collapsed");
        }
        self.schedule_focus(reason)
    }

    fn expand(&mut self) {
        self.expanded = true;
        if self.config.autocomplete {
            self.filter_text.clear();
            self.store.reset();
        }
        self.selection.set_count(self.store.len());
        let start = self
            .value
            .as_deref()
            .and_then(|v| self.store.position(v))
            .unwrap_or(0);
        self.selection.select(start);
        tracing::debug!(
            listener = self.listener,
            cursor = self.cursor_value(),
            "select expanded"
        );
    }

    fn schedule_focus(&mut self, reason: Transition) -> Command<Message> {
        match focus_after(reason, self.config.autocomplete) {
            Some(target) => Command::defer(self.focus_slot.schedule(), Message::TransferFocus(target)),
            None => {
                self.focus_slot.cancel();
                Command::none()
            }
        }
    }

    fn transfer_focus(&mut self, target: FocusTarget) {
        self.focus_slot.finish();
        let valid = match target {
            FocusTarget::FilterInput => self.expanded && self.config.autocomplete,
            FocusTarget::OptionList => self.expanded,
            FocusTarget::Toggle => !self.expanded,
        };
        if valid {
            self.focused = true;
            self.focus_target = Some(target);
        } else {
            tracing::trace!(?target, expanded = self.expanded, "stale focus transfer dropped");
        }
    }

    /// The filter input and the list vanish on collapse; focus falls back to
    /// the trigger.
    fn release_list_focus(&mut self) {
        if matches!(
            self.focus_target,
            Some(FocusTarget::FilterInput | FocusTarget::OptionList)
        ) {
            self.focus_target = Some(FocusTarget::Toggle);
        }
    }

    /// Take keyboard focus after a click inside the select.
    fn claim_focus(&mut self) -> Command<Message> {
        if self.focused || self.config.disabled {
            return Command::none();
        }
        self.focused = true;
        if self.focus_target.is_none() {
            self.focus_target = Some(FocusTarget::Toggle);
        }
        tracing::trace!(listener = self.listener, "focus claimed by click");
        Command::message(Message::FocusRequested)
    }

    fn commit(&mut self) -> Command<Message> {
        let Some(value) = self.cursor_value().map(str::to_owned) else {
            // Nothing highlighted (empty filter result): keep the list open.
            return Command::none();
        };
        tracing::debug!(listener = self.listener, %value, "option committed");
        let notify = if self.config.menu {
            Message::Activated(value)
        } else {
            Message::Changed(value)
        };
        Command::batch([
            Command::message(notify),
            self.request(false, Transition::Committed),
        ])
    }

    // --- input ---

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if self.config.disabled {
            return Command::none();
        }
        let keymap = &self.config.keymap;

        if self.expanded && self.config.autocomplete {
            if keymap.erase.matches(&key) {
                if self.filter_text.pop().is_some() {
                    self.refilter();
                }
                return Command::none();
            }
            if let Some(c) = typed_char(&key) {
                self.filter_text.push(c);
                self.refilter();
                return Command::none();
            }
        }

        if has_modifier(&key) {
            return Command::none();
        }

        if keymap.leave.matches(&key) {
            return if self.expanded {
                self.request(false, Transition::TabbedAway)
            } else {
                Command::none()
            };
        }
        if keymap.confirm.matches(&key) {
            return if self.expanded {
                self.commit()
            } else {
                Command::message(Message::SubmitForm)
            };
        }
        if keymap.space.matches(&key) {
            return match (self.expanded, self.config.autocomplete) {
                (false, _) => self.request(true, Transition::Expanded),
                (true, false) => self.commit(),
                (true, true) => Command::none(),
            };
        }
        if !self.expanded {
            return Command::none();
        }
        if keymap.previous.matches(&key) {
            if self.selection.move_up() {
                tracing::trace!(cursor = self.cursor_value(), "cursor moved up");
            }
        } else if keymap.next.matches(&key) {
            if self.selection.move_down() {
                tracing::trace!(cursor = self.cursor_value(), "cursor moved down");
            }
        } else if keymap.close.matches(&key) {
            return self.request(false, Transition::Escaped);
        }
        Command::none()
    }

    fn refilter(&mut self) {
        self.store.apply_filter(&self.filter_text);
        self.selection.set_count(self.store.len());
        if self.store.is_empty() {
            self.selection.clear();
        } else {
            self.selection.select(0);
        }
    }

    fn handle_click(&mut self, click: Click) -> Command<Message> {
        if click.within(self.trigger_area.get()) {
            let claim = self.claim_focus();
            if self.expanded && self.config.autocomplete {
                // The trigger is the filter input while open.
                return claim;
            }
            return Command::batch([claim, self.toggle()]);
        }

        let rows = self.list_rows.get();
        if self.expanded && click.within(rows) {
            if self.config.disabled {
                return Command::none();
            }
            let claim = self.claim_focus();
            let index = self.selection.offset() + usize::from(click.row - rows.y);
            if index < self.store.len() {
                self.selection.select(index);
                return Command::batch([claim, self.commit()]);
            }
            return claim;
        }
        if self.expanded && click.within(self.list_area.get()) {
            return self.claim_focus();
        }

        if self.expanded {
            // Outside the trigger and the list: close now, no focus transfer.
            self.expanded = false;
            self.focus_slot.cancel();
            self.release_list_focus();
            tracing::debug!(listener = self.listener, ?click, "select collapsed by outside click");
        }
        Command::none()
    }

    // --- rendering ---

    fn render_trigger(&self, frame: &mut Frame, area: Rect, view: &SelectView) {
        let arrow = if view.expanded { " ▾" } else { " ▸" };
        let width = (area.width as usize).saturating_sub(display_width(arrow));

        let base = if view.disabled {
            self.style.disabled
        } else if view.focus.is_some() {
            self.style.trigger_focused
        } else {
            self.style.trigger
        };

        let body = match &view.filter_text {
            Some(text) if !text.is_empty() => Span::styled(truncate(text, width, "…"), base),
            Some(_) => Span::styled(truncate(&view.trigger_text, width, "…"), self.style.placeholder),
            None if view.placeholder => {
                Span::styled(truncate(&view.trigger_text, width, "…"), self.style.placeholder)
            }
            None => Span::styled(truncate(&view.trigger_text, width, "…"), base),
        };
        let pad = width.saturating_sub(display_width(&body.content));
        let line = Line::from(vec![
            body,
            Span::raw(" ".repeat(pad)),
            Span::styled(arrow, self.style.placeholder),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Draw the open list; returns the whole overlay and its option rows.
    fn render_list(&self, frame: &mut Frame, trigger: Rect, view: &SelectView) -> (Rect, Rect) {
        let symbol_width = display_width(&self.style.highlight_symbol);
        let widest = view
            .options
            .iter()
            .map(|o| display_width(&o.label) + o.icon.as_ref().map_or(0, |i| display_width(i) + 1))
            .max()
            .unwrap_or(0)
            .max(display_width(NO_RESULTS));
        let width = ((widest + symbol_width + 2) as u16).max(trigger.width);
        let rows = if view.no_results { 1 } else { view.window.len() as u16 };
        let bounds = frame.area();
        let area = anchored_rect(
            trigger,
            width,
            rows + 2,
            self.config.alignment,
            self.config.upward,
            bounds,
        );
        if area.height < 3 {
            return (Rect::default(), Rect::default());
        }

        let mut block = Block::bordered().border_style(self.style.border);
        if view.window.start > 0 {
            block = block.title_top(Line::from("▲").right_aligned());
        }
        if view.window.end < view.options.len() {
            block = block.title_bottom(Line::from("▼").right_aligned());
        }
        let inner = render_overlay(frame, area, Some(&block));

        if view.no_results {
            frame.render_widget(
                Paragraph::new(Span::styled(NO_RESULTS, self.style.placeholder)),
                inner,
            );
            return (area, Rect::default());
        }

        let blank = " ".repeat(symbol_width);
        for (row, opt) in view.options[view.window.clone()].iter().enumerate() {
            if row as u16 >= inner.height {
                break;
            }
            let row_area = Rect {
                y: inner.y + row as u16,
                height: 1,
                ..inner
            };
            let mut style = if opt.is_cursor {
                self.style.cursor
            } else {
                self.style.option
            };
            if opt.is_committed {
                style = style.patch(self.style.committed);
            }
            let prefix = if opt.is_cursor {
                self.style.highlight_symbol.as_str()
            } else {
                blank.as_str()
            };
            let text = match &opt.icon {
                Some(icon) => format!("{prefix}{icon} {}", opt.label),
                None => format!("{prefix}{}", opt.label),
            };
            let text = truncate(&text, row_area.width as usize, "…");
            frame.render_widget(Paragraph::new(Span::styled(text, style)), row_area);
        }
        (area, inner)
    }
}

const NO_RESULTS: &str = "No results";

fn visible_rows(config: &SelectConfig, count: usize) -> usize {
    if config.scroll {
        config.max_items
    } else {
        count.max(1)
    }
}

impl Component for Select {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Key(key) if self.focused => self.handle_key(key),
            Message::Key(_) => Command::none(),
            Message::Pointer(click) => self.handle_click(click),
            Message::Toggle => self.toggle(),
            Message::ApplyToggle { expand, reason } => self.apply_toggle(expand, reason),
            Message::TransferFocus(target) => {
                self.transfer_focus(target);
                Command::none()
            }
            Message::Changed(_)
            | Message::Activated(_)
            | Message::SubmitForm
            | Message::FocusRequested => Command::none(),
        }
    }

    /// Draws the trigger into `area` and, while open, the option list as an
    /// overlay next to it. Render selects after their surroundings so the
    /// overlay ends up on top.
    fn view(&self, frame: &mut Frame, area: Rect) {
        let view = self.project();
        let trigger = Rect { height: 1, ..area };
        self.trigger_area.set(trigger);
        self.render_trigger(frame, trigger, &view);

        let (list, rows) = if view.expanded {
            self.render_list(frame, trigger, &view)
        } else {
            (Rect::default(), Rect::default())
        };
        self.list_area.set(list);
        self.list_rows.set(rows);
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        vec![pointer::clicks(self.listener).map(Message::Pointer)]
    }

    fn focused(&self) -> bool {
        self.focused
    }
}

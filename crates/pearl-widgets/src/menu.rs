//! Navigation menu, either always visible or sliding in from the left.

use crate::error::ConfigError;
use crate::text::{display_width, truncate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pearl_core::event::Click;
use pearl_core::pointer;
use pearl_core::{Command, Component, Subscription};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use std::cell::Cell;
use std::time::{Duration, Instant};

/// Length of the slide transition.
pub const SLIDE_DURATION: Duration = Duration::from_millis(120);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// One entry of a [`Menu`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub name: String,
    /// Where the entry leads; reported back in [`Message::Navigate`].
    pub link: String,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuMode {
    /// Always shown in the area it is given.
    Inline,
    /// Hidden until toggled; slides over the left edge of the area.
    Slideout,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Key(KeyEvent),
    Pointer(Click),
    Toggle,
    Show,
    Hide,
    /// The application navigated somewhere; a shown slideout hides.
    Navigated,
    /// Internal: an animation frame for the slide with this generation.
    Frame { generation: u64, at: Instant },

    /// Emitted: the user chose an entry.
    Navigate(String),
}

#[derive(Debug, Clone, Copy)]
struct Slide {
    from: f32,
    to: f32,
    started: Instant,
    generation: u64,
}

pub struct Menu {
    items: Vec<MenuItem>,
    mode: MenuMode,
    cursor: usize,
    shown: bool,
    /// 0.0 fully hidden, 1.0 fully out.
    progress: f32,
    slide: Option<Slide>,
    generation: u64,
    width: Option<u16>,
    style: Style,
    cursor_style: Style,
    listener: u64,
    panel: Cell<Rect>,
    rows: Cell<Rect>,
}

impl Menu {
    /// An inline menu. At least one item is required.
    pub fn new(items: Vec<MenuItem>) -> Result<Self, ConfigError> {
        if items.is_empty() {
            return Err(ConfigError::EmptyMenu);
        }
        Ok(Self {
            items,
            mode: MenuMode::Inline,
            cursor: 0,
            shown: false,
            progress: 0.0,
            slide: None,
            generation: 0,
            width: None,
            style: Style::default(),
            cursor_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            listener: pointer::next_listener_id(),
            panel: Cell::new(Rect::default()),
            rows: Cell::new(Rect::default()),
        })
    }

    /// A hidden slideout menu.
    pub fn slideout(items: Vec<MenuItem>) -> Result<Self, ConfigError> {
        let mut menu = Self::new(items)?;
        menu.mode = MenuMode::Slideout;
        Ok(menu)
    }

    /// Panel width; defaults to the widest name plus padding.
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_styles(mut self, item: Style, cursor: Style) -> Self {
        self.style = item;
        self.cursor_style = cursor;
        self
    }

    pub fn mode(&self) -> MenuMode {
        self.mode
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the menu takes input: always for inline, when shown for
    /// slideout.
    pub fn is_shown(&self) -> bool {
        self.mode == MenuMode::Inline || self.shown
    }

    /// Slide position between 0.0 (hidden) and 1.0 (out).
    pub fn progress(&self) -> f32 {
        match self.mode {
            MenuMode::Inline => 1.0,
            MenuMode::Slideout => self.progress,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.slide.is_some()
    }

    fn set_shown(&mut self, shown: bool) -> Command<Message> {
        if self.mode == MenuMode::Inline || shown == self.shown {
            return Command::none();
        }
        self.shown = shown;
        self.generation += 1;
        let slide = Slide {
            from: self.progress,
            to: if shown { 1.0 } else { 0.0 },
            started: Instant::now(),
            generation: self.generation,
        };
        self.slide = Some(slide);
        tracing::debug!(shown, "menu sliding");
        next_frame(slide.generation)
    }

    fn advance(&mut self, generation: u64, at: Instant) -> Command<Message> {
        let Some(slide) = self.slide.filter(|s| s.generation == generation) else {
            return Command::none();
        };
        let t = (at.saturating_duration_since(slide.started).as_secs_f32()
            / SLIDE_DURATION.as_secs_f32())
        .clamp(0.0, 1.0);
        self.progress = slide.from + (slide.to - slide.from) * ease_out(t);
        if t >= 1.0 {
            self.progress = slide.to;
            self.slide = None;
            return Command::none();
        }
        next_frame(generation)
    }

    fn choose(&mut self, index: usize) -> Command<Message> {
        let Some(item) = self.items.get(index) else {
            return Command::none();
        };
        self.cursor = index;
        tracing::debug!(link = %item.link, "menu item chosen");
        Command::message(Message::Navigate(item.link.clone()))
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if key.modifiers != KeyModifiers::NONE {
            return Command::none();
        }
        match key.code {
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                Command::none()
            }
            KeyCode::Down => {
                self.cursor = (self.cursor + 1).min(self.items.len() - 1);
                Command::none()
            }
            KeyCode::Enter => self.choose(self.cursor),
            KeyCode::Esc => self.set_shown(false),
            _ => Command::none(),
        }
    }

    fn handle_click(&mut self, click: Click) -> Command<Message> {
        let rows = self.rows.get();
        if click.within(rows) {
            return self.choose(usize::from(click.row - rows.y));
        }
        if self.mode == MenuMode::Slideout && !click.within(self.panel.get()) {
            return self.set_shown(false);
        }
        Command::none()
    }

    fn panel_width(&self, area: Rect) -> u16 {
        let natural = self
            .items
            .iter()
            .map(|i| display_width(&i.name))
            .max()
            .unwrap_or(0)
            + 5;
        self.width.unwrap_or(natural as u16).min(area.width)
    }
}

fn next_frame(generation: u64) -> Command<Message> {
    Command::tick(FRAME_INTERVAL, move |at| Message::Frame { generation, at })
}

/// Quadratic ease-out: fast start, gentle stop.
fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

impl Component for Menu {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Key(key) if self.is_shown() => self.handle_key(key),
            Message::Pointer(click) if self.is_shown() => self.handle_click(click),
            Message::Key(_) | Message::Pointer(_) => Command::none(),
            Message::Toggle => self.set_shown(!self.shown),
            Message::Show => self.set_shown(true),
            Message::Hide | Message::Navigated => self.set_shown(false),
            Message::Frame { generation, at } => self.advance(generation, at),
            Message::Navigate(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let full = self.panel_width(area);
        let visible = (f32::from(full) * self.progress()).round() as u16;
        if visible == 0 || area.is_empty() {
            self.panel.set(Rect::default());
            self.rows.set(Rect::default());
            return;
        }
        let panel = Rect {
            width: visible,
            ..area
        };
        self.panel.set(panel);

        let (block, inner_width) = match self.mode {
            MenuMode::Inline => (Block::default(), full),
            MenuMode::Slideout => {
                frame.render_widget(Clear, panel);
                (Block::default().borders(Borders::RIGHT), full.saturating_sub(1))
            }
        };
        let content = block.inner(panel);
        frame.render_widget(block, panel);

        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let (marker, style) = if i == self.cursor && self.is_shown() {
                    ("▸ ", self.cursor_style)
                } else {
                    ("  ", self.style)
                };
                let text = truncate(&format!("{marker}{}", item.name), inner_width as usize, "…");
                Line::from(Span::styled(text, style))
            })
            .collect();
        // While sliding, only the right-hand part of the panel is on screen.
        let hidden = inner_width.saturating_sub(content.width);
        frame.render_widget(Paragraph::new(lines).scroll((0, hidden)), content);

        let rows = (self.items.len() as u16).min(content.height);
        self.rows.set(Rect {
            height: rows,
            ..content
        });
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if !self.is_shown() {
            return vec![];
        }
        vec![pointer::clicks(self.listener).map(Message::Pointer)]
    }

    fn focused(&self) -> bool {
        self.is_shown()
    }
}

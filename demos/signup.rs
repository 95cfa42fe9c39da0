//! # Signup Form Demo
//!
//! A small form exercising every pearl widget:
//! - an autocomplete country select and a plain plan select
//! - a text input with floating label and validation error
//! - a modal that refuses to close while "saving" (with an activity ring)
//! - a slideout menu toggled with F2
//!
//! Click outside an open select to close it. Logs go to `signup.log`
//! (`RUST_LOG=pearl_widgets=debug` for state transitions).
//!
//! Run with: `cargo run --example signup`

use pearl::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pearl::ratatui::layout::{Constraint, Layout, Rect};
use pearl::ratatui::style::{Color, Style};
use pearl::ratatui::text::{Line, Span};
use pearl::ratatui::widgets::Paragraph;
use pearl::ratatui::Frame;
use pearl::widgets::activity::{self, ActivityIndicator};
use pearl::widgets::focus::FocusGroup;
use pearl::widgets::menu::{self, Menu, MenuItem};
use pearl::widgets::modal::{self, Modal};
use pearl::widgets::select::{self, Select, SelectConfig};
use pearl::widgets::text_input::{self, TextInput};
use pearl::widgets::{ConfigError, SelectOption};
use pearl::{
    run_with, terminal_events, Command, Component, Model, ProgramOptions, Subscription,
    TerminalEvent,
};
use std::time::Duration;

const NAME: usize = 0;
const COUNTRY: usize = 1;
const PLAN: usize = 2;
const SUBMIT: usize = 3;

struct Signup {
    name: TextInput,
    country: Select,
    plan: Select,
    dialog: Modal,
    saving: ActivityIndicator,
    nav: Menu,
    focus: FocusGroup<4>,
    status: String,
}

#[derive(Debug)]
enum Msg {
    Key(KeyEvent),
    Paste(String),
    Name(text_input::Message),
    Country(select::Message),
    Plan(select::Message),
    Dialog(modal::Message),
    Saving(activity::Message),
    Nav(menu::Message),
    Saved,
    Quit,
}

fn countries() -> Vec<SelectOption> {
    [
        ("de", "DE", "Germany"),
        ("fr", "FR", "France"),
        ("it", "IT", "Italy"),
        ("nl", "NL", "Netherlands"),
        ("pt", "PT", "Portugal"),
        ("es", "ES", "Spain"),
        ("se", "SE", "Sweden"),
        ("gb", "GB", "United Kingdom"),
        ("us", "US", "United States"),
    ]
    .into_iter()
    .map(|(value, code, name)| SelectOption::new(value, name).with_icon(code).with_verbose(name))
    .collect()
}

impl Signup {
    fn build() -> Result<Self, ConfigError> {
        let country = Select::new(
            countries(),
            SelectConfig::default()
                .with_autocomplete(true)
                .with_label("Country")
                .with_max_items(5),
        )?;
        let plan = Select::new(
            vec![
                SelectOption::new("free", "Free"),
                SelectOption::new("pro", "Pro"),
                SelectOption::new("team", "Team"),
            ],
            SelectConfig::default().with_label("Plan"),
        )?;
        let nav = Menu::slideout(vec![
            MenuItem::new("Sign up", "/signup"),
            MenuItem::new("Pricing", "/pricing"),
            MenuItem::new("About", "/about"),
        ])?;
        let mut name = TextInput::new().with_label("Full name");
        name.focus();
        Ok(Self {
            name,
            country,
            plan,
            dialog: Modal::new("Creating account")
                .with_fixed_size(40, 7)
                .with_close_button("✕"),
            saving: ActivityIndicator::new().with_caption("Saving..."),
            nav,
            focus: FocusGroup::new(),
            status: String::new(),
        })
    }

    fn refocus(&mut self) {
        self.name.blur();
        self.country.blur();
        self.plan.blur();
        match self.focus.focused() {
            NAME => self.name.focus(),
            COUNTRY => self.country.focus(),
            PLAN => self.plan.focus(),
            _ => {}
        }
    }

    fn submit(&mut self) -> Command<Msg> {
        if self.name.is_empty() {
            self.name.set_error(Some("Please enter your name".into()));
            self.name.set_indicate_invalid(true);
            return Command::none();
        }
        self.name.set_indicate_invalid(false);
        self.dialog.set_busy(true);
        self.saving.start();
        Command::batch([
            self.dialog.open().map(Msg::Dialog),
            Command::tick(Duration::from_millis(1500), |_| Msg::Saved),
        ])
    }

    fn route_key(&mut self, key: KeyEvent) -> Command<Msg> {
        if self.dialog.is_open() {
            return self.dialog.update(modal::Message::Key(key)).map(Msg::Dialog);
        }
        if key.code == KeyCode::F(2) {
            return self.nav.update(menu::Message::Toggle).map(Msg::Nav);
        }
        if self.nav.is_shown() {
            return self.nav.update(menu::Message::Key(key)).map(Msg::Nav);
        }

        let focused = self.focus.focused();
        let cmd = match focused {
            NAME => self.name.update(text_input::Message::Key(key)).map(Msg::Name),
            COUNTRY => self.country.update(select::Message::Key(key)).map(Msg::Country),
            PLAN => self.plan.update(select::Message::Key(key)).map(Msg::Plan),
            _ if key.code == KeyCode::Enter => self.submit(),
            _ => Command::none(),
        };
        match key.code {
            KeyCode::Tab => {
                self.focus.focus_next();
                self.refocus();
            }
            KeyCode::BackTab => {
                self.focus.focus_prev();
                self.refocus();
            }
            _ => {}
        }
        cmd
    }
}

impl Model for Signup {
    type Message = Msg;
    type Flags = Signup;

    fn init(app: Signup) -> (Self, Command<Msg>) {
        (app, Command::none())
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Key(key) => self.route_key(key),
            Msg::Paste(text) if self.focus.focused() == NAME => {
                self.name.update(text_input::Message::Paste(text)).map(Msg::Name)
            }
            Msg::Paste(_) => Command::none(),

            Msg::Name(text_input::Message::Changed(value)) => {
                self.name.set_value(value);
                if !self.name.is_empty() {
                    self.name.set_indicate_invalid(false);
                }
                Command::none()
            }
            Msg::Name(text_input::Message::SubmitForm)
            | Msg::Country(select::Message::SubmitForm)
            | Msg::Plan(select::Message::SubmitForm) => self.submit(),
            Msg::Name(m) => self.name.update(m).map(Msg::Name),

            Msg::Country(select::Message::FocusRequested) => {
                self.focus.focus(COUNTRY);
                self.refocus();
                Command::none()
            }
            Msg::Plan(select::Message::FocusRequested) => {
                self.focus.focus(PLAN);
                self.refocus();
                Command::none()
            }
            Msg::Country(select::Message::Changed(value)) => {
                self.country.set_value(Some(value));
                Command::none()
            }
            Msg::Country(m) => self.country.update(m).map(Msg::Country),
            Msg::Plan(select::Message::Changed(value)) => {
                self.plan.set_value(Some(value));
                Command::none()
            }
            Msg::Plan(m) => self.plan.update(m).map(Msg::Plan),

            Msg::Dialog(modal::Message::CloseRequested) => self.dialog.close().map(Msg::Dialog),
            Msg::Dialog(modal::Message::AfterClose) => {
                self.status = "Account created.".into();
                Command::none()
            }
            Msg::Dialog(m) => self.dialog.update(m).map(Msg::Dialog),
            Msg::Saving(m) => self.saving.update(m).map(Msg::Saving),
            Msg::Saved => {
                self.dialog.set_busy(false);
                self.saving.stop();
                Command::none()
            }

            Msg::Nav(menu::Message::Navigate(link)) => {
                self.status = format!("Navigated to {link}");
                self.nav.update(menu::Message::Navigated).map(Msg::Nav)
            }
            Msg::Nav(m) => self.nav.update(m).map(Msg::Nav),
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        let [title, name, country, plan, submit, status, _, help] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(self.name.height()),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(Span::styled("Sign up", Style::default().fg(Color::Cyan))),
            title,
        );
        self.name.view(frame, Rect { width: area.width.min(40), ..name });

        let submit_style = if self.focus.focused() == SUBMIT {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Cyan)
        };
        frame.render_widget(Paragraph::new(Span::styled("[ Create account ]", submit_style)), submit);
        frame.render_widget(
            Paragraph::new(Span::styled(self.status.as_str(), Style::default().fg(Color::Green))),
            status,
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Tab", Style::default().fg(Color::Cyan)),
                Span::raw(" next  "),
                Span::styled("Space", Style::default().fg(Color::Cyan)),
                Span::raw(" open  "),
                Span::styled("F2", Style::default().fg(Color::Cyan)),
                Span::raw(" menu  "),
                Span::styled("Ctrl+C", Style::default().fg(Color::Cyan)),
                Span::raw(" quit"),
            ])),
            help,
        );

        // Overlays last, the lower select first so the upper list covers it.
        let field = |r: Rect| Rect { width: area.width.min(30), height: 1, ..r };
        self.plan.view(frame, field(plan));
        self.country.view(frame, field(country));
        self.nav.view(frame, area);
        self.dialog.view(frame, area);
        if self.dialog.is_open() {
            let [_, spinner, _] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(area);
            let [_, spinner, _] = Layout::horizontal([
                Constraint::Fill(1),
                Constraint::Length(12),
                Constraint::Fill(1),
            ])
            .areas(spinner);
            self.saving.view(frame, spinner);
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(|ev| match ev {
            TerminalEvent::Key(key)
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Some(Msg::Quit)
            }
            TerminalEvent::Key(key) => Some(Msg::Key(key)),
            TerminalEvent::Paste(text) => Some(Msg::Paste(text)),
            _ => None,
        })];
        subs.extend(self.country.subscriptions().into_iter().map(|s| s.map(Msg::Country)));
        subs.extend(self.plan.subscriptions().into_iter().map(|s| s.map(Msg::Plan)));
        subs.extend(self.dialog.subscriptions().into_iter().map(|s| s.map(Msg::Dialog)));
        subs.extend(self.saving.subscriptions().into_iter().map(|s| s.map(Msg::Saving)));
        subs.extend(self.nav.subscriptions().into_iter().map(|s| s.map(Msg::Nav)));
        subs
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = Signup::build()?;
    let options = ProgramOptions {
        title: Some("pearl signup".into()),
        log_file: Some("signup.log".into()),
        ..ProgramOptions::default()
    };
    run_with::<Signup>(app, options).await?;
    Ok(())
}

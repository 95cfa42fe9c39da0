//! **pearl**: interactive terminal widgets on an Elm-style runtime for
//! [`ratatui`].
//!
//! This umbrella crate re-exports everything needed to build a pearl
//! application from a single dependency:
//!
//! ```toml
//! [dependencies]
//! pearl = "0.1"
//! ```
//!
//! * Everything public in [`pearl_core`] is available at the crate root
//!   ([`Model`], [`Component`], [`Command`], [`Subscription`], [`Program`],
//!   [`run`], [`run_with`], ...).
//! * [`widgets`] re-exports [`pearl_widgets`] (select, modal, menu, text
//!   input, activity indicator).
//! * [`ratatui`], [`crossterm`] and [`tokio`] are re-exported so applications
//!   do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use pearl::widgets::{select, Select, SelectConfig, SelectOption};
//! use pearl::{terminal_events, Command, Component, Model, Subscription, TerminalEvent};
//!
//! struct App {
//!     fruit: Select,
//! }
//!
//! enum Msg {
//!     Fruit(select::Message),
//!     Quit,
//! }
//!
//! impl Model for App {
//!     type Message = Msg;
//!     type Flags = ();
//!
//!     fn init(_: ()) -> (Self, Command<Msg>) {
//!         let options = vec![SelectOption::new("a", "Apple"), SelectOption::new("b", "Banana")];
//!         let mut fruit = Select::new(options, SelectConfig::default()).unwrap();
//!         fruit.focus();
//!         (App { fruit }, Command::none())
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Command<Msg> {
//!         match msg {
//!             Msg::Fruit(select::Message::Changed(value)) => {
//!                 self.fruit.set_value(Some(value));
//!                 Command::none()
//!             }
//!             Msg::Fruit(m) => self.fruit.update(m).map(Msg::Fruit),
//!             Msg::Quit => Command::quit(),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut pearl::ratatui::Frame) {
//!         let area = frame.area();
//!         self.fruit.view(frame, area);
//!     }
//!
//!     fn subscriptions(&self) -> Vec<Subscription<Msg>> {
//!         let mut subs = vec![terminal_events(|ev| match ev {
//!             TerminalEvent::Key(key) if key.code == pearl::crossterm::event::KeyCode::Char('q') => {
//!                 Some(Msg::Quit)
//!             }
//!             TerminalEvent::Key(key) => Some(Msg::Fruit(select::Message::Key(key))),
//!             _ => None,
//!         })];
//!         subs.extend(self.fruit.subscriptions().into_iter().map(|s| s.map(Msg::Fruit)));
//!         subs
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     pearl::run::<App>(()).await.unwrap();
//! }
//! ```

pub use pearl_core::*;
pub mod widgets {
    pub use pearl_widgets::*;
}

pub use crossterm;
pub use ratatui;
pub use tokio;

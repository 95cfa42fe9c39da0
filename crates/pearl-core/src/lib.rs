//! Core runtime for **pearl**, a set of interactive terminal widgets.
//!
//! Applications follow the [Elm Architecture]: state changes only in
//! `update`, side effects are described as [`Command`]s, and long-lived event
//! sources are declared as [`Subscription`]s.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view) |
//! | [`Component`] | Reusable sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Side effect for the runtime, including deferred continuations |
//! | [`Subscription`] | Long-lived event source (terminal events, timers, clicks) |
//! | [`ClickBus`] | Process-wide broadcast of mouse clicks for outside-click detection |
//! | [`Program`] | Wires a [`Model`] to a real terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) / [`TestComponent`](testing::TestComponent) | Headless test harnesses |
//!
//! # Dispatch order
//!
//! One incoming message is handled as a unit. Its `update` runs first, then
//! every message produced through [`Command::message`], then continuations
//! scheduled with [`Command::defer`] (round by round, skipping cancelled
//! ones). Subscriptions are reconciled and the screen redrawn afterwards.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod defer;
mod effects;
pub mod event;
pub mod logging;
pub mod model;
pub mod pointer;
pub mod runtime;
pub mod subscription;
pub mod subscriptions;
pub mod testing;

pub use command::{Command, TerminalCommand};
pub use component::Component;
pub use defer::{CancelToken, DeferSlot};
pub use event::{Click, TerminalEvent};
pub use model::Model;
pub use pointer::ClickBus;
pub use runtime::{OutputTarget, Program, ProgramError, ProgramHandle, ProgramOptions};
pub use subscription::{subscribe, Subscription, SubscriptionId, SubscriptionSource};
pub use subscriptions::{terminal_events, Every};

/// Run an application with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}

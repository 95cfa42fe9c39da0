//! Built-in subscription sources.
//!
//! - [`terminal_events`]: keyboard, mouse, resize, focus and paste events.
//!   Left-button presses are also published on the global
//!   [`ClickBus`](crate::pointer::ClickBus).
//! - [`Every`]: a repeating timer.

mod terminal;
mod timer;

pub use terminal::*;
pub use timer::*;
